//! Importing generated CRUD routes into the module routing file.

use std::path::PathBuf;

use skel_core::{Container, Format, entity_file_stem};
use skel_manipulator::{RoutingManipulator, resource_key};

/// Outcome of a routing import.
#[derive(Debug)]
pub enum RoutingImport {
    /// The import was prepended to this file
    Imported(PathBuf),
    /// Nothing to import (annotation routes)
    Skipped,
    /// The file could not be updated; the lines describe the manual edit
    Manual { reason: String, lines: Vec<String> },
}

/// Import `Resources/config/routing/<entity>.<ext>` into the module's `routing.yml`.
pub fn import_crud_routes(
    container: &Container,
    format: Format,
    route_prefix: &str,
    entity: &str,
) -> RoutingImport {
    let Some(ext) = format.extension() else {
        return RoutingImport::Skipped;
    };

    let file = container.join("Resources/config/routing.yml");
    let prefix = format!("/{}", route_prefix);
    let resource = format!("routing/{}", entity_file_stem(entity));

    match RoutingManipulator::new(&file).add_resource(&container.name, format, &prefix, &resource) {
        Ok(_) => RoutingImport::Imported(file),
        Err(e) => {
            tracing::warn!(file = %file.display(), error = %e, "routing import failed");
            RoutingImport::Manual {
                reason: e.to_string(),
                lines: vec![
                    format!(
                        "Import the module's routing resource in the module routing file ({}):",
                        file.display()
                    ),
                    String::new(),
                    format!("    {}:", resource_key(&container.name, &prefix)),
                    format!(
                        "        resource: \"@{}/Resources/config/{}.{}\"",
                        container.name, resource, ext
                    ),
                    format!("        prefix:   {}", prefix),
                ],
            }
        }
    }
}
