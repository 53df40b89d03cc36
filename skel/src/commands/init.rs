use std::path::Path;

use clap::Args;
use eyre::Result;
use skel_core::{Config, config::CONFIG_FILE};

use super::UnwrapOrExit;

#[derive(Args)]
pub struct InitCommand {}

impl InitCommand {
    pub fn run(&self, config: Option<&Path>) -> Result<()> {
        let path = config.unwrap_or(Path::new(CONFIG_FILE));

        if Config::write_starter(path).unwrap_or_exit() {
            println!("Created {}", path.display());
            println!();
            println!("Next steps:");
            println!("  skel module --namespace Acme/BlogModule");
        } else {
            println!("{} already exists, leaving it untouched", path.display());
        }
        Ok(())
    }
}
