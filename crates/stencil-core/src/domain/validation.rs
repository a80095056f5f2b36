use crate::domain::{
    entities::{
        Blueprint, RenderedProject,
        blueprint::ManifestSpec,
        license::LicenseHeader,
        render::RenderParams,
        rendered_project::FsEntry,
    },
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_blueprint(blueprint: &Blueprint) -> Result<(), DomainError> {
        blueprint.validate()
    }

    /// Check a whole run's blueprint list: each valid, target dirs disjoint.
    ///
    /// Two targets conflict when they are equal or one contains the other.
    pub fn validate_blueprint_set(blueprints: &[Blueprint]) -> Result<(), DomainError> {
        let mut claimed: Vec<&Blueprint> = Vec::with_capacity(blueprints.len());
        for blueprint in blueprints {
            blueprint.validate()?;
            let dir = blueprint.target_dir();
            for first in &claimed {
                let other = first.target_dir();
                if other == dir {
                    return Err(DomainError::DuplicateTargetDirectory {
                        path: dir.to_slash_string(),
                        first: first.name().to_string(),
                        second: blueprint.name().to_string(),
                    });
                }
                let (outer, inner) = if dir.as_path().starts_with(other.as_path()) {
                    (*first, blueprint)
                } else if other.as_path().starts_with(dir.as_path()) {
                    (blueprint, *first)
                } else {
                    continue;
                };
                return Err(DomainError::NestedTargetDirectory {
                    outer: outer.target_dir().to_slash_string(),
                    outer_owner: outer.name().to_string(),
                    inner: inner.target_dir().to_slash_string(),
                    inner_owner: inner.name().to_string(),
                });
            }
            claimed.push(blueprint);
        }
        Ok(())
    }

    /// Every placeholder in the blueprint must have a value in `params`.
    ///
    /// Unresolved placeholders are authoring defects. The renderer reports
    /// them as warnings and writes the text unchanged.
    pub fn validate_placeholders(
        blueprint: &Blueprint,
        params: &RenderParams,
    ) -> Result<(), DomainError> {
        for file in blueprint.files() {
            let missing = file.content().unresolved(params);
            if !missing.is_empty() {
                return Err(DomainError::UnresolvedPlaceholder {
                    path: file.path().to_slash_string(),
                    placeholders: missing,
                });
            }
        }

        let manifest = blueprint.manifest();
        let document_params = params
            .clone()
            .with(ManifestSpec::DEPENDENCIES_KEY, String::new());
        let mut missing = manifest.document().unresolved(&document_params);
        for dependency in blueprint.dependencies() {
            for key in manifest
                .entry()
                .unresolved(&params.clone().merged(&dependency.params()))
            {
                if !missing.contains(&key) {
                    missing.push(key);
                }
            }
        }
        if !missing.is_empty() {
            return Err(DomainError::UnresolvedPlaceholder {
                path: manifest.path().to_slash_string(),
                placeholders: missing,
            });
        }

        Ok(())
    }

    pub fn validate_rendered(project: &RenderedProject) -> Result<(), DomainError> {
        project.validate()
    }

    /// A file flagged for the header must not already contain it.
    pub fn validate_headers(
        project: &RenderedProject,
        header: &LicenseHeader,
    ) -> Result<(), DomainError> {
        let carrying = project.entries().iter().find_map(|entry| match entry {
            FsEntry::File(file) if file.license_header && header.occurrences(&file.content) > 0 => {
                Some(file)
            }
            _ => None,
        });
        match carrying {
            Some(file) => Err(DomainError::HeaderInTemplate {
                path: file.path.display().to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{blueprint::Dependency, render::TemplateContent};

    fn blueprint(name: &str, dir: Option<&str>) -> Blueprint {
        let mut builder = Blueprint::builder(name)
            .package("com.example")
            .manifest(
                "pom.xml",
                TemplateContent::parameterized("{{DEPENDENCIES}}"),
                TemplateContent::parameterized("{{groupId}}"),
            )
            .file("App.java", TemplateContent::parameterized("class {{PROJECT_NAME}}"));
        if let Some(dir) = dir {
            builder = builder.target_dir(dir);
        }
        builder.build().unwrap()
    }

    #[test]
    fn set_accepts_unique_dirs() {
        let set = vec![blueprint("a", None), blueprint("b", None)];
        assert!(DomainValidator::validate_blueprint_set(&set).is_ok());
    }

    #[test]
    fn set_rejects_shared_target_dir() {
        let set = vec![blueprint("a", Some("shared")), blueprint("b", Some("shared"))];
        let err = DomainValidator::validate_blueprint_set(&set).unwrap_err();
        assert_eq!(
            err,
            DomainError::DuplicateTargetDirectory {
                path: "shared".into(),
                first: "a".into(),
                second: "b".into(),
            }
        );
    }

    #[test]
    fn set_rejects_dot_aliases_of_the_same_dir() {
        let set = vec![
            blueprint("a", Some("api-gateway")),
            blueprint("b", Some("./api-gateway/")),
        ];
        let err = DomainValidator::validate_blueprint_set(&set).unwrap_err();
        assert!(matches!(
            err,
            DomainError::DuplicateTargetDirectory { path, .. } if path == "api-gateway"
        ));
    }

    #[test]
    fn root_target_dir_never_builds() {
        let builder = |name: &str| {
            Blueprint::builder(name)
                .package("com.example")
                .manifest("pom.xml", TemplateContent::literal(""), TemplateContent::literal(""))
                .file("x.txt", TemplateContent::literal("x"))
        };
        assert!(matches!(
            builder("a").target_dir("./").build(),
            Err(DomainError::InvalidBlueprint(_))
        ));
        assert!(matches!(builder(".").build(), Err(DomainError::InvalidBlueprint(_))));
    }

    #[test]
    fn set_rejects_nested_dirs_in_either_order() {
        let set = vec![blueprint("outer", Some("svc")), blueprint("inner", Some("svc/api"))];
        let err = DomainValidator::validate_blueprint_set(&set).unwrap_err();
        assert_eq!(
            err,
            DomainError::NestedTargetDirectory {
                outer: "svc".into(),
                outer_owner: "outer".into(),
                inner: "svc/api".into(),
                inner_owner: "inner".into(),
            }
        );

        let set = vec![blueprint("inner", Some("svc/api")), blueprint("outer", Some("svc"))];
        let err = DomainValidator::validate_blueprint_set(&set).unwrap_err();
        assert!(matches!(
            err,
            DomainError::NestedTargetDirectory { outer_owner, .. } if outer_owner == "outer"
        ));
    }

    #[test]
    fn set_allows_sibling_dirs_sharing_a_prefix() {
        let set = vec![blueprint("a", Some("svc")), blueprint("b", Some("svc-api"))];
        assert!(DomainValidator::validate_blueprint_set(&set).is_ok());
    }

    #[test]
    fn headers_flagged_file_may_not_carry_it() {
        let header = LicenseHeader::new("// Licensed");
        let clean = RenderedProject::new("a", "/out/a")
            .with_file("A.java", "class A {}".into(), true)
            .with_file("NOTICE", "// Licensed".into(), false);
        assert!(DomainValidator::validate_headers(&clean, &header).is_ok());

        let dirty = clean.with_file("B.java", "// Licensed\nclass B {}".into(), true);
        assert_eq!(
            DomainValidator::validate_headers(&dirty, &header),
            Err(DomainError::HeaderInTemplate { path: "B.java".into() })
        );
    }

    #[test]
    fn placeholders_resolved() {
        let bp = blueprint("a", None);
        let params = RenderParams::new().with("PROJECT_NAME", "a");
        assert!(DomainValidator::validate_placeholders(&bp, &params).is_ok());
    }

    #[test]
    fn placeholders_missing_in_file() {
        let bp = blueprint("a", None);
        let err = DomainValidator::validate_placeholders(&bp, &RenderParams::new()).unwrap_err();
        assert!(matches!(err, DomainError::UnresolvedPlaceholder { path, .. } if path == "App.java"));
    }

    #[test]
    fn placeholders_missing_in_dependency_entry() {
        let bp = Blueprint::builder("a")
            .package("com.example")
            .manifest(
                "pom.xml",
                TemplateContent::parameterized("{{DEPENDENCIES}}"),
                TemplateContent::parameterized("{{groupId}}:{{scope}}"),
            )
            .dependency(Dependency::new().field("groupId", "g"))
            .file("x.txt", TemplateContent::literal("x"))
            .build()
            .unwrap();

        let err = DomainValidator::validate_placeholders(&bp, &RenderParams::new()).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnresolvedPlaceholder {
                path: "pom.xml".into(),
                placeholders: vec!["scope".into()],
            }
        );
    }
}
