//! Generate operation - run a generator for a request.

use skel_core::{ArtifactRequest, Result};

use super::Project;
use crate::reports::GenerationReport;

/// Display name of the artifact a request produces.
fn artifact_name(request: &ArtifactRequest) -> String {
    match request {
        ArtifactRequest::Module(req) => req.container.clone(),
        ArtifactRequest::Controller(req) => format!("{}:{}", req.container.name, req.controller),
        ArtifactRequest::Entity(req) => format!("{}:{}", req.container.name, req.entity),
        ArtifactRequest::Crud(req) => format!("{}:{}", req.container.name, req.entity),
        ArtifactRequest::Form(req) => format!("{}:{}", req.container.name, req.entity),
    }
}

/// Execute the generation with the project's template overrides.
pub fn generate(project: &Project, request: &ArtifactRequest) -> Result<GenerationReport> {
    let base = request.container_path();
    let renderer = project.renderer(&base);
    let generated = skel_generator::generate(request, &renderer)?;

    Ok(GenerationReport::new(
        request.kind(),
        artifact_name(request),
        base,
        generated,
    ))
}

#[cfg(test)]
mod tests {
    use skel_core::{Config, Format, License, ModuleRequest};
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_report_paths_are_relative_to_the_module() {
        let temp = TempDir::new().unwrap();
        let project = Project {
            config: Config::discover(temp.path().join("skel.toml")).unwrap(),
        };
        let request = ArtifactRequest::Module(ModuleRequest {
            namespace: "Acme\\BlogModule".to_string(),
            container: "AcmeBlogModule".to_string(),
            dir: temp.path().join("src"),
            format: Format::Yaml,
            license: License::Mit,
        });

        let report = generate(&project, &request).unwrap();
        assert_eq!(report.name, "AcmeBlogModule");
        assert_eq!(report.base, temp.path().join("src/Acme/BlogModule"));
        assert!(
            report
                .generated
                .files
                .contains(&report.base.join("AcmeBlogModule.php"))
        );
    }

    #[test]
    fn test_artifact_name_uses_shortcut_notation() {
        let request = ArtifactRequest::Form(skel_core::FormRequest {
            container: skel_core::Container::new("AcmeBlogModule", "Acme\\BlogModule", "src"),
            entity: "Blog\\Post".to_string(),
            metadata: skel_core::EntityMetadata::with_id(),
        });
        assert_eq!(artifact_name(&request), "AcmeBlogModule:Blog\\Post");
    }
}
