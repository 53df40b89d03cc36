use std::path::Path;

use clap::Args;
use eyre::Result;
use skel_core::{
    ArtifactRequest, CrudRequest, FormRequest, default_route_prefix, naming,
};

use super::{ContainerArgs, EntityArgs, UnwrapOrExit, resolve_format};
use crate::{
    ops::{self, Project, import_crud_routes},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CrudCommand {
    #[command(flatten)]
    pub entity: EntityArgs,

    /// Route prefix (defaults to the lowercased entity name)
    #[arg(long)]
    pub route_prefix: Option<String>,

    /// Routing format: php, xml, yml or annotation
    #[arg(short, long)]
    pub format: Option<String>,

    /// Generate the new, create, edit, update and delete actions
    #[arg(long)]
    pub with_write: bool,

    /// Overwrite an existing controller
    #[arg(long)]
    pub overwrite: bool,

    #[command(flatten)]
    pub container: ContainerArgs,
}

impl CrudCommand {
    pub fn run(&self, config: Option<&Path>) -> Result<()> {
        let project = Project::load(config).unwrap_or_exit();

        let shortcut = naming::parse_shortcut(&self.entity.entity).unwrap_or_exit();
        let container = self
            .container
            .resolve(&project, &shortcut.container)
            .unwrap_or_exit();
        let metadata = self.entity.metadata().unwrap_or_exit();
        let format = resolve_format(&project, self.format.as_deref())?;
        let route_prefix = match &self.route_prefix {
            Some(prefix) => prefix.trim_start_matches('/').to_string(),
            None => default_route_prefix(&shortcut.name),
        };

        let request = ArtifactRequest::Crud(CrudRequest {
            container: container.clone(),
            entity: shortcut.name.clone(),
            metadata: metadata.clone(),
            format,
            route_prefix: route_prefix.clone(),
            with_write: self.with_write,
            force_overwrite: self.overwrite,
        });
        let mut report = ops::generate(&project, &request).unwrap_or_exit();

        if self.with_write {
            let form = ArtifactRequest::Form(FormRequest {
                container: container.clone(),
                entity: shortcut.name.clone(),
                metadata,
            });
            match ops::generate(&project, &form) {
                Ok(form_report) => {
                    report.generated.files.extend(form_report.generated.files);
                }
                Err(e) if e.is_already_exists() => {
                    report.notes.push(format!("{}; the existing form type is used", e));
                }
                Err(e) => Err::<(), _>(e).unwrap_or_exit(),
            }
        }

        report.routing_import = Some(import_crud_routes(
            &container,
            format,
            &route_prefix,
            &shortcut.name,
        ));

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
