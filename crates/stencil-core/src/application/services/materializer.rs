//! File Materializer - turns a rendered project into files on disk.
//!
//! Every file is prepared in memory first (license header applied and
//! checked), then written through [`Filesystem::write_atomic`]. A header
//! defect in any file therefore aborts before the first byte is written.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{DomainValidator as validator, FsEntry, LicenseHeader, RenderedProject},
    error::StencilResult,
};

/// What one blueprint left on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeReport {
    pub blueprint: String,
    pub root: PathBuf,
    pub files_written: usize,
    pub directories_created: usize,
}

pub struct Materializer {
    filesystem: Box<dyn Filesystem>,
}

enum Prepared {
    Directory(PathBuf),
    File(PathBuf, String),
}

impl Materializer {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Write `project` under its root.
    ///
    /// Directories are created idempotently; existing files are overwritten.
    /// There is no rollback: a failure leaves earlier files in place, each of
    /// them complete.
    #[instrument(
        skip_all,
        fields(blueprint = %project.name(), root = %project.root().display())
    )]
    pub fn materialize(
        &self,
        project: &RenderedProject,
        header: &LicenseHeader,
    ) -> StencilResult<MaterializeReport> {
        validator::validate_rendered(project)?;
        validator::validate_headers(project, header)?;

        let root = project.root();
        let prepared = Self::prepare(project, header);

        self.filesystem.create_dir_all(root)?;

        let mut files_written = 0;
        let mut directories_created = 0;
        for item in &prepared {
            match item {
                Prepared::Directory(path) => {
                    self.filesystem.create_dir_all(path)?;
                    debug!(path = %path.display(), "Directory ready");
                    directories_created += 1;
                }
                Prepared::File(path, content) => {
                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }
                    self.filesystem.write_atomic(path, content.as_bytes())?;
                    debug!(path = %path.display(), bytes = content.len(), "File written");
                    files_written += 1;
                }
            }
        }

        info!(
            files = files_written,
            directories = directories_created,
            "Blueprint materialized"
        );

        Ok(MaterializeReport {
            blueprint: project.name().to_string(),
            root: root.clone(),
            files_written,
            directories_created,
        })
    }

    /// Resolve absolute paths and final content for every entry.
    fn prepare(project: &RenderedProject, header: &LicenseHeader) -> Vec<Prepared> {
        let root = project.root();
        let mut prepared = Vec::with_capacity(project.entries().len());

        for entry in project.entries() {
            match entry {
                FsEntry::Directory(dir) => prepared.push(Prepared::Directory(root.join(&dir.path))),
                FsEntry::File(file) => {
                    let content = if file.license_header {
                        header.apply(&file.content)
                    } else {
                        file.content.clone()
                    };
                    prepared.push(Prepared::File(root.join(&file.path), content));
                }
            }
        }

        prepared
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{
        application::{ApplicationError, ports::output::MockFilesystem},
        domain::DomainError,
        error::StencilError,
    };

    fn project() -> RenderedProject {
        RenderedProject::new("api-gateway", "/out/api-gateway")
            .with_directory("src/main/java")
            .with_file("pom.xml", "<project/>\n".into(), false)
            .with_file("src/main/java/App.java", "class App {}\n".into(), true)
    }

    fn recording_fs(writes: Arc<Mutex<Vec<(PathBuf, String)>>>) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_atomic().returning(move |path, content| {
            writes.lock().unwrap().push((
                path.to_path_buf(),
                String::from_utf8_lossy(content).into_owned(),
            ));
            Ok(())
        });
        fs
    }

    #[test]
    fn writes_every_file_under_root() {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let materializer = Materializer::new(Box::new(recording_fs(writes.clone())));

        let report = materializer
            .materialize(&project(), &LicenseHeader::apache2())
            .unwrap();

        assert_eq!(report.files_written, 2);
        assert_eq!(report.directories_created, 1);
        assert_eq!(report.root, PathBuf::from("/out/api-gateway"));

        let writes = writes.lock().unwrap();
        assert_eq!(writes[0].0, Path::new("/out/api-gateway/pom.xml"));
        assert_eq!(writes[0].1, "<project/>\n");
        assert_eq!(writes[1].0, Path::new("/out/api-gateway/src/main/java/App.java"));
    }

    #[test]
    fn header_applied_once_only_to_flagged_files() {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let materializer = Materializer::new(Box::new(recording_fs(writes.clone())));
        let header = LicenseHeader::new("// Licensed");

        materializer.materialize(&project(), &header).unwrap();

        let writes = writes.lock().unwrap();
        assert_eq!(header.occurrences(&writes[0].1), 0);
        assert_eq!(writes[1].1, "// Licensed\n\nclass App {}\n");
        assert_eq!(header.occurrences(&writes[1].1), 1);
    }

    #[test]
    fn header_already_in_body_is_rejected_before_writing() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().never();
        fs.expect_write_atomic().never();

        let header = LicenseHeader::new("// Licensed");
        let project = RenderedProject::new("svc", "/out/svc").with_file(
            "A.java",
            "// Licensed\nclass A {}\n".into(),
            true,
        );

        let err = Materializer::new(Box::new(fs))
            .materialize(&project, &header)
            .unwrap_err();

        assert_eq!(
            err,
            StencilError::Domain(DomainError::HeaderInTemplate {
                path: "A.java".into()
            })
        );
    }

    #[test]
    fn write_failure_stops_remaining_files() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_atomic().times(1).returning(|path, _| {
            Err(ApplicationError::FilesystemWriteFailure {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });

        let err = Materializer::new(Box::new(fs))
            .materialize(&project(), &LicenseHeader::apache2())
            .unwrap_err();

        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::FilesystemWriteFailure { .. })
        ));
    }

    #[test]
    fn empty_project_is_rejected() {
        let mut fs = MockFilesystem::new();
        fs.expect_write_atomic().never();

        let result = Materializer::new(Box::new(fs))
            .materialize(&RenderedProject::new("x", "/out/x"), &LicenseHeader::apache2());

        assert!(matches!(
            result,
            Err(StencilError::Domain(DomainError::EmptyBlueprint { .. }))
        ));
    }
}
