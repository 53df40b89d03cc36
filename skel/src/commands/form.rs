use std::path::Path;

use clap::Args;
use eyre::Result;
use skel_core::{ArtifactRequest, FormRequest, naming};

use super::{ContainerArgs, EntityArgs, UnwrapOrExit};
use crate::{
    ops::{self, Project},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct FormCommand {
    #[command(flatten)]
    pub entity: EntityArgs,

    #[command(flatten)]
    pub container: ContainerArgs,
}

impl FormCommand {
    pub fn run(&self, config: Option<&Path>) -> Result<()> {
        let project = Project::load(config).unwrap_or_exit();

        let shortcut = naming::parse_shortcut(&self.entity.entity).unwrap_or_exit();
        let container = self
            .container
            .resolve(&project, &shortcut.container)
            .unwrap_or_exit();
        let metadata = self.entity.metadata().unwrap_or_exit();

        let request = ArtifactRequest::Form(FormRequest {
            container,
            entity: shortcut.name,
            metadata,
        });

        let report = ops::generate(&project, &request).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
