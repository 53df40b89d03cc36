use std::path::Path;

use clap::Args;
use eyre::Result;
use skel_core::{ArtifactRequest, EntityRequest, naming, spec::parse_fields};

use super::{ContainerArgs, UnwrapOrExit, resolve_format};
use crate::{
    ops::{self, Project},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct EntityCommand {
    /// Entity shortcut (e.g. AcmeBlogModule:Blog/Post)
    #[arg(long)]
    pub entity: String,

    /// Fields as `name[:type[(length)]]`, space separated
    #[arg(long, default_value = "")]
    pub fields: String,

    /// Mapping format: php, xml, yml or annotation
    #[arg(short, long)]
    pub format: Option<String>,

    /// Also generate an empty repository class
    #[arg(long)]
    pub with_repository: bool,

    #[command(flatten)]
    pub container: ContainerArgs,
}

impl EntityCommand {
    pub fn run(&self, config: Option<&Path>) -> Result<()> {
        let project = Project::load(config).unwrap_or_exit();

        let shortcut = naming::parse_shortcut(&self.entity).unwrap_or_exit();
        let container = self
            .container
            .resolve(&project, &shortcut.container)
            .unwrap_or_exit();
        let fields = parse_fields(&self.fields).unwrap_or_exit();
        let format = resolve_format(&project, self.format.as_deref())?;

        let request = ArtifactRequest::Entity(EntityRequest {
            container,
            entity: shortcut.name,
            format,
            fields,
            with_repository: self.with_repository,
        });

        let report = ops::generate(&project, &request).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
