//! Full runs over the built-in blueprints with real adapters.

use std::fs;
use std::path::{Path, PathBuf};

use stencil_adapters::{
    InMemoryCatalog, LocalFilesystem, MemoryFilesystem, SimpleRenderer, StaticToolProbe,
    builtin_blueprints, filesystem::TEMP_SUFFIX,
};
use stencil_core::{
    application::{ApplicationError, RunStep},
    prelude::*,
};
use tempfile::TempDir;
use walkdir::WalkDir;

fn request(base: &Path) -> RunRequest {
    RunRequest::new(EnvironmentRequest::java("17", "3.9.6", base).with_platform(Platform::Linux))
}

fn orchestrator(fs: impl Filesystem + 'static, probe: StaticToolProbe) -> Orchestrator {
    Orchestrator::new(
        Box::new(InMemoryCatalog::with_builtin().unwrap()),
        Box::new(SimpleRenderer::new()),
        Box::new(fs),
        Box::new(probe),
    )
}

/// Relative path → bytes for every file under `root`.
fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, fs::read(e.path()).unwrap())
        })
        .collect()
}

#[test]
fn generates_five_complete_projects() {
    let fs = MemoryFilesystem::new();
    let report = orchestrator(fs.clone(), StaticToolProbe::java_toolchain())
        .run(&request(Path::new("/gen")))
        .unwrap();

    assert_eq!(report.blueprints.len(), 5);
    assert!(report.warnings.is_empty());

    let header = LicenseHeader::default();
    for bp in builtin_blueprints::all().unwrap() {
        let root = Path::new("/gen").join(bp.name());
        let files = fs.list_files_under(&root);
        let pkg = bp.package_path();

        assert!(files.iter().any(|f| f.starts_with(&format!("src/main/java/{pkg}/")) && f.ends_with("Application.java")));
        assert!(files.contains(&"src/main/resources/application.yml".to_string()));
        assert!(files.iter().any(|f| f.starts_with(&format!("src/test/java/{pkg}/"))));
        assert!(files.contains(&"pom.xml".to_string()));
        for dir in ["config", "docs", "tests"] {
            assert!(fs.is_dir(&root.join(dir)), "{} lacks {dir}/", bp.name());
        }

        let readme = fs.read_file(&root.join("README.md")).unwrap();
        let stack = readme.split("## Tech Stack").nth(1).unwrap();
        for dep in bp.dependencies() {
            assert!(stack.contains(&dep.to_string()), "{}: {dep} missing", bp.name());
        }

        for file in files.iter().filter(|f| f.ends_with(".java")) {
            let text = fs.read_file(&root.join(file)).unwrap();
            assert!(text.starts_with(header.text()), "{file} lacks header");
            assert_eq!(header.occurrences(&text), 1, "{file}");
        }
    }
}

#[test]
fn pom_lists_every_dependency_and_target_java_version() {
    let fs = MemoryFilesystem::new();
    orchestrator(fs.clone(), StaticToolProbe::java_toolchain())
        .run(&request(Path::new("/gen")))
        .unwrap();

    let pom = fs.read_file(Path::new("/gen/crypto-vault/pom.xml")).unwrap();
    assert!(pom.contains("<artifactId>crypto-vault</artifactId>"));
    assert!(pom.contains("<java.version>17</java.version>"));
    assert!(pom.contains("<artifactId>bcprov-jdk18on</artifactId>"));
    assert!(pom.contains("<artifactId>spring-boot-starter-security</artifactId>"));
    assert!(!pom.contains("{{"));
}

#[test]
fn missing_build_tool_writes_nothing() {
    let fs = MemoryFilesystem::new();
    let failure = orchestrator(fs.clone(), StaticToolProbe::java_toolchain().without("mvn"))
        .run(&request(Path::new("/gen")))
        .unwrap_err();

    assert_eq!(failure.step, RunStep::ValidatingEnvironment);
    assert_eq!(
        failure.error,
        StencilError::Application(ApplicationError::PrerequisiteMissing { tool: "mvn".into() })
    );
    assert!(fs.list_files().is_empty());
}

#[test]
fn java_version_mismatch_only_warns() {
    let fs = MemoryFilesystem::new();
    let probe = StaticToolProbe::java_toolchain().tool("java", "openjdk version \"21.0.2\" 2024-01-16");
    let report = orchestrator(fs.clone(), probe)
        .run(&request(Path::new("/gen")))
        .unwrap();

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.blueprints.len(), 5);
}

#[test]
fn write_failure_keeps_earlier_projects_and_skips_later_ones() {
    let fs = MemoryFilesystem::new();
    fs.fail_writes_under("/gen/ml-inference-service");

    let failure = orchestrator(fs.clone(), StaticToolProbe::java_toolchain())
        .run(&request(Path::new("/gen")))
        .unwrap_err();

    assert!(matches!(
        failure.step,
        RunStep::Materializing { index: 2, ref blueprint } if blueprint == "ml-inference-service"
    ));
    assert_eq!(failure.completed.len(), 2);
    assert!(!fs.list_files_under(Path::new("/gen/api-gateway")).is_empty());
    assert!(!fs.list_files_under(Path::new("/gen/event-stream-processor")).is_empty());
    assert!(fs.list_files_under(Path::new("/gen/crypto-vault")).is_empty());
    assert!(fs.list_files_under(Path::new("/gen/analytics-pipeline")).is_empty());
}

#[test]
fn two_runs_on_disk_produce_identical_trees() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    for dir in [&first, &second] {
        orchestrator(LocalFilesystem::new(), StaticToolProbe::java_toolchain())
            .run(&request(dir.path()))
            .unwrap();
    }

    let a = snapshot(first.path());
    let b = snapshot(second.path());
    assert!(!a.is_empty());
    assert_eq!(a, b);
    assert!(a.iter().all(|(p, _)| !p.to_string_lossy().ends_with(TEMP_SUFFIX)));
}

#[test]
fn rerun_into_same_directory_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let run = || {
        orchestrator(LocalFilesystem::new(), StaticToolProbe::java_toolchain())
            .run(&request(dir.path()))
            .unwrap()
    };

    run();
    let before = snapshot(dir.path());
    run();
    assert_eq!(before, snapshot(dir.path()));
}

#[test]
fn dry_run_plans_without_writing() {
    let fs = MemoryFilesystem::new();
    let projects = orchestrator(fs.clone(), StaticToolProbe::java_toolchain())
        .plan(&request(Path::new("/gen")))
        .unwrap();

    assert_eq!(projects.len(), 5);
    assert!(fs.list_files().is_empty());
}
