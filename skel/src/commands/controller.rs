use std::path::Path;

use clap::Args;
use eyre::Result;
use skel_core::{
    ArtifactRequest, ControllerRequest, TemplateFormat, naming, spec::parse_actions, validate,
};

use super::{ContainerArgs, UnwrapOrExit, resolve_format};
use crate::{
    ops::{self, Project},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ControllerCommand {
    /// Controller shortcut (e.g. AcmeBlogModule:Post)
    #[arg(long)]
    pub controller: String,

    /// Actions as `name[:route[:template]]`, space separated
    #[arg(long, default_value = "")]
    pub actions: String,

    /// Routing format: php, xml, yml or annotation
    #[arg(long)]
    pub route_format: Option<String>,

    /// View template format
    #[arg(long, default_value = "twig")]
    pub template_format: TemplateFormat,

    #[command(flatten)]
    pub container: ContainerArgs,
}

impl ControllerCommand {
    pub fn run(&self, config: Option<&Path>) -> Result<()> {
        let project = Project::load(config).unwrap_or_exit();

        validate::validate_shortcut(&self.controller).unwrap_or_exit();
        let shortcut = naming::parse_shortcut(&self.controller).unwrap_or_exit();
        let container = self
            .container
            .resolve(&project, &shortcut.container)
            .unwrap_or_exit();
        let actions = parse_actions(&self.actions).unwrap_or_exit();
        let routing_format = resolve_format(&project, self.route_format.as_deref())?;

        let request = ArtifactRequest::Controller(ControllerRequest {
            container,
            controller: shortcut.name,
            routing_format,
            template_format: self.template_format,
            actions,
        });

        let report = ops::generate(&project, &request).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
