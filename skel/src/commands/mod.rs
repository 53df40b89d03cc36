mod completions;
mod controller;
mod crud;
mod entity;
mod form;
mod init;
mod module;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use completions::CompletionsCommand;
use controller::ControllerCommand;
use crud::CrudCommand;
use entity::EntityCommand;
use eyre::Result;
use form::FormCommand;
use init::InitCommand;
use module::ModuleCommand;
use skel_core::{Container, EntityMetadata, Format, naming, spec::parse_fields, validate};

use crate::ops::Project;

/// Extension trait for exiting on library errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for skel_core::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "skel")]
#[command(version)]
#[command(about = "Generate module skeletons, controllers, entities and CRUD code")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to skel.toml (defaults to ./skel.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        let config = self.config.as_deref();
        match &self.command {
            Commands::Module(cmd) => cmd.run(config),
            Commands::Controller(cmd) => cmd.run(config),
            Commands::Entity(cmd) => cmd.run(config),
            Commands::Crud(cmd) => cmd.run(config),
            Commands::Form(cmd) => cmd.run(config),
            Commands::Init(cmd) => cmd.run(config),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a module skeleton
    Module(ModuleCommand),

    /// Generate a controller with actions, views and routes
    Controller(ControllerCommand),

    /// Generate a Doctrine entity
    Entity(EntityCommand),

    /// Generate CRUD controller, views and routing for an entity
    Crud(CrudCommand),

    /// Generate a form type for an entity
    Form(FormCommand),

    /// Create a starter skel.toml
    Init(InitCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Locates the module owning a generated artifact when it is not declared in skel.toml.
#[derive(Args)]
pub struct ContainerArgs {
    /// Namespace of the owning module (e.g. Acme\BlogModule)
    #[arg(long)]
    pub namespace: Option<String>,

    /// Source root the module lives under (defaults to the configured dir)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

impl ContainerArgs {
    /// Resolve a container from its name: skel.toml first, then `--namespace`.
    pub fn resolve(&self, project: &Project, name: &str) -> skel_core::Result<Container> {
        validate::validate_container_name(name)?;
        if let Some(container) = project.config.container(name) {
            return Ok(container);
        }

        match &self.namespace {
            Some(namespace) => {
                let namespace = naming::normalize_namespace(namespace);
                let root = project.source_dir(self.dir.as_deref());
                Ok(Container::under(&root, name, namespace))
            }
            None => Err(Box::new(skel_core::Error::UnknownContainer {
                name: name.to_string(),
            })),
        }
    }
}

/// Entity whose CRUD code or form type is generated.
#[derive(Args)]
pub struct EntityArgs {
    /// Entity shortcut (e.g. AcmeBlogModule:Blog/Post)
    #[arg(long)]
    pub entity: String,

    /// Mapped fields as `name[:type]`, space separated
    #[arg(long, default_value = "")]
    pub fields: String,

    /// Association names, space separated
    #[arg(long, default_value = "")]
    pub associations: String,
}

impl EntityArgs {
    /// Entity metadata with the implicit `id` identifier.
    pub fn metadata(&self) -> skel_core::Result<EntityMetadata> {
        let fields = parse_fields(&self.fields)?;
        let metadata = self
            .associations
            .split_whitespace()
            .fold(EntityMetadata::from_fields(&fields), |metadata, name| {
                metadata.association(name)
            });
        Ok(metadata)
    }
}

/// Parse `--format`, or ask for it on a terminal, or use the configured default.
pub fn resolve_format(project: &Project, format: Option<&str>) -> Result<Format> {
    match format {
        Some(format) => Ok(validate::validate_format(format).unwrap_or_exit()),
        None => project.prompt_format(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_args_metadata() {
        let args = EntityArgs {
            entity: "AcmeBlogModule:Post".to_string(),
            fields: "title:string body:text".to_string(),
            associations: "author tags".to_string(),
        };
        let metadata = args.metadata().unwrap();

        assert_eq!(metadata.identifier, vec!["id"]);
        let names: Vec<&str> = metadata.fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["id", "title", "body"]);
        assert_eq!(metadata.associations, vec!["author", "tags"]);
    }

    #[test]
    fn test_cli_parses_crud_flags() {
        let cli = Cli::try_parse_from([
            "skel",
            "-vv",
            "crud",
            "--entity",
            "AcmeBlogModule:Post",
            "--with-write",
            "--format",
            "yml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Crud(ref cmd) if cmd.with_write && !cmd.overwrite));
    }
}
