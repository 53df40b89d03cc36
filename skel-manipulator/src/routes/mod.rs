//! Appending single routes to routing files.

mod php;
mod xml;
mod yaml;

use std::path::{Path, PathBuf};

use skel_core::{Format, Result, file};

/// One route to register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// Route name (e.g. "show_page")
    pub name: String,
    /// Path pattern (e.g. "/{id}")
    pub path: String,
    /// Controller reference (e.g. "AcmeBlogModule:Post:showPage")
    pub controller: String,
}

impl RouteEntry {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        controller: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            controller: controller.into(),
        }
    }
}

/// Produces the new file content from the current one (`None` when the file is missing).
type MergeFn = fn(&Path, Option<&str>, &RouteEntry) -> Result<String>;

/// Route merge handler per format. Annotation routes live in the controller.
const HANDLERS: &[(Format, Option<MergeFn>)] = &[
    (Format::Yaml, Some(yaml::merge)),
    (Format::Xml, Some(xml::merge)),
    (Format::Php, Some(php::merge)),
    (Format::Annotation, None),
];

fn handler(format: Format) -> Option<MergeFn> {
    HANDLERS
        .iter()
        .find(|(f, _)| *f == format)
        .and_then(|(_, handler)| *handler)
}

/// Append a route to a routing file, creating the file when missing.
///
/// Returns `false` when the format keeps routes elsewhere. A duplicate route
/// name or an unparseable file is an error and leaves the file unchanged.
pub fn append_route(file: impl AsRef<Path>, format: Format, entry: &RouteEntry) -> Result<bool> {
    let file = file.as_ref();
    let Some(merge) = handler(format) else {
        tracing::debug!(route = %entry.name, %format, "routes are declared in the controller");
        return Ok(false);
    };

    let current = file::read_optional(file)?;
    let merged = merge(file, current.as_deref(), entry)?;
    file::write_file(file, &merged)?;

    tracing::debug!(file = %file.display(), route = %entry.name, "route appended");
    Ok(true)
}

/// Routing file of a container for a format (`Resources/config/routing.<ext>`).
pub fn routing_file(container_path: &Path, format: Format) -> Option<PathBuf> {
    format.extension().map(|ext| {
        container_path
            .join("Resources")
            .join("config")
            .join(format!("routing.{}", ext))
    })
}
