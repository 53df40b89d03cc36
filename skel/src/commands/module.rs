use std::path::{Path, PathBuf};

use clap::Args;
use eyre::Result;
use skel_core::{ArtifactRequest, License, ModuleRequest, validate};

use super::{UnwrapOrExit, resolve_format};
use crate::{
    ops::{self, Project},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ModuleCommand {
    /// Namespace of the module (e.g. Acme\BlogModule or Acme/BlogModule)
    #[arg(long)]
    pub namespace: String,

    /// Module name (defaults to the namespace without separators, e.g. AcmeBlogModule)
    #[arg(long)]
    pub name: Option<String>,

    /// Source root the module is created under (defaults to the configured dir)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Configuration format: php, xml, yml or annotation
    #[arg(short, long)]
    pub format: Option<String>,

    /// License of the module: MIT or LGPL
    #[arg(long)]
    pub license: Option<License>,
}

impl ModuleCommand {
    pub fn run(&self, config: Option<&Path>) -> Result<()> {
        let project = Project::load(config).unwrap_or_exit();

        let namespace = validate::validate_namespace(&self.namespace).unwrap_or_exit();
        let name = match &self.name {
            Some(name) => name.clone(),
            None => namespace.replace('\\', ""),
        };
        let container = validate::validate_container_name(&name).unwrap_or_exit();

        let dir = self
            .dir
            .as_ref()
            .map(|dir| PathBuf::from(validate::validate_target_dir(&dir.to_string_lossy())));
        let dir = project.source_dir(dir.as_deref());
        let format = resolve_format(&project, self.format.as_deref())?;

        let request = ArtifactRequest::Module(ModuleRequest {
            namespace,
            container,
            dir,
            format,
            license: self.license.unwrap_or(project.config.defaults.license),
        });

        let report = ops::generate(&project, &request).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
