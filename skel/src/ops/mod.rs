//! Core operations.
//!
//! This module contains the project context and the steps shared by the
//! commands, separated from argument parsing and output rendering.

pub mod generate;
pub mod routing;

use std::{
    io::IsTerminal,
    path::{Path, PathBuf},
};

use dialoguer::{Select, theme::ColorfulTheme};
use eyre::{Context, Result};
use skel_core::{Config, Format, config::CONFIG_FILE};
use skel_generator::{Renderer, skeleton_dirs};

pub use generate::generate;
pub use routing::{RoutingImport, import_crud_routes};

/// Configuration and paths of the project skel runs in.
pub struct Project {
    pub config: Config,
}

impl Project {
    /// Load `skel.toml` from `path`, or discover it in the working directory.
    pub fn load(path: Option<&Path>) -> skel_core::Result<Self> {
        let config = match path {
            Some(path) => Config::load(path)?,
            None => Config::discover(CONFIG_FILE)?,
        };
        Ok(Self { config })
    }

    /// Source root for modules: the explicit directory or the configured default.
    pub fn source_dir(&self, dir: Option<&Path>) -> PathBuf {
        self.config
            .resolve(dir.unwrap_or(self.config.defaults.dir.as_path()))
    }

    /// Renderer searching the override directories of a container.
    pub fn renderer(&self, container_path: &Path) -> Renderer {
        let roots = skeleton_dirs(
            container_path,
            self.config.root(),
            &self.config.template_dirs(),
        );
        if !roots.is_empty() {
            tracing::debug!(roots = ?roots, "template overrides");
        }
        Renderer::new(roots)
    }

    /// Ask for a format on a terminal; otherwise use the configured default.
    pub fn prompt_format(&self) -> Result<Format> {
        let default = self.config.defaults.format;
        if !std::io::stdin().is_terminal() {
            return Ok(default);
        }

        let items: Vec<&str> = Format::ALL.iter().map(Format::as_str).collect();
        let default_index = Format::ALL.iter().position(|f| *f == default).unwrap_or(0);
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Configuration format")
            .items(&items)
            .default(default_index)
            .interact()
            .wrap_err("Failed to get format selection")?;

        Ok(Format::ALL[selection])
    }
}
