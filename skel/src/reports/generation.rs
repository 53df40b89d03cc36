//! Generation report data structures.

use std::path::{Path, PathBuf};

use skel_core::ArtifactKind;
use skel_generator::Generated;

use super::output::{Output, Report};
use crate::ops::RoutingImport;

/// Report data from one generation.
#[derive(Debug)]
pub struct GenerationReport {
    /// Kind of artifact generated.
    pub kind: ArtifactKind,

    /// Name of the artifact (module, controller or entity).
    pub name: String,

    /// Directory paths are displayed relative to.
    pub base: PathBuf,

    /// Files, directories and routing files touched.
    pub generated: Generated,

    /// Result of importing routes into the module routing file, if attempted.
    pub routing_import: Option<RoutingImport>,

    /// Informational messages (e.g. skipped follow-up steps).
    pub notes: Vec<String>,
}

impl GenerationReport {
    pub fn new(kind: ArtifactKind, name: impl Into<String>, base: PathBuf, generated: Generated) -> Self {
        Self {
            kind,
            name: name.into(),
            base,
            generated,
            routing_import: None,
            notes: Vec::new(),
        }
    }

    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.base)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

impl Report for GenerationReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(&format!("Generated {} {}", self.kind, self.name));
        out.preformatted(&format!("in {}", self.base.display()));
        out.newline();

        out.section("Files");
        for file in &self.generated.files {
            out.added_item(&self.relative(file));
        }
        for dir in &self.generated.directories {
            out.added_item(&format!("{}/", self.relative(dir)));
        }

        if !self.generated.routing.is_empty() {
            out.newline();
            out.section("Routes added to");
            for file in &self.generated.routing {
                out.list_item(&self.relative(file));
            }
        }

        match &self.routing_import {
            Some(RoutingImport::Imported(file)) => {
                out.newline();
                out.section("Routing imported into");
                out.list_item(&self.relative(file));
            }
            Some(RoutingImport::Manual { reason, lines }) => {
                out.newline();
                out.warning(reason);
                out.preformatted(&lines.join("\n"));
            }
            Some(RoutingImport::Skipped) | None => {}
        }

        if !self.notes.is_empty() {
            out.newline();
            out.section("Notes");
            for note in &self.notes {
                out.list_item(note);
            }
        }
    }
}
