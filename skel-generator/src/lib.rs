//! Template rendering and artifact generators.
//!
//! [`generate`] dispatches an [`ArtifactRequest`] to the matching generator:
//!
//! - [`module`] - a complete module skeleton
//! - [`controller`] - a controller with actions, views and routes
//! - [`entity`] - a Doctrine entity with its mapping
//! - [`crud`] - CRUD controller, views, tests and routing for an entity
//! - [`form`] - a form type for an entity
//!
//! Templates are resolved by a [`Renderer`] from override directories
//! (see [`skeleton_dirs`]) with the built-in skeletons as fallback.

pub mod controller;
pub mod crud;
pub mod entity;
pub mod form;
pub mod module;
mod render;
mod skeleton;

use std::path::{Path, PathBuf};

pub use render::{RenderParameters, Renderer};
use skel_core::{ArtifactRequest, Result};
pub use skeleton::{OVERRIDE_DIR, builtin, builtin_names, skeleton_dirs};

/// Outcome of one generation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Files written, in generation order
    pub files: Vec<PathBuf>,
    /// Directories created empty
    pub directories: Vec<PathBuf>,
    /// Existing or new routing files a route was appended to
    pub routing: Vec<PathBuf>,
}

impl Generated {
    pub fn file(&mut self, path: PathBuf) {
        self.files.push(path);
    }

    pub fn directory(&mut self, path: PathBuf) {
        self.directories.push(path);
    }

    /// Record a routing file update once.
    pub fn routing_file(&mut self, path: &Path) {
        if !self.routing.iter().any(|p| p == path) {
            self.routing.push(path.to_path_buf());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty() && self.routing.is_empty()
    }

    /// Paths relative to `base`, for reporting.
    pub fn relative_files<'a>(&'a self, base: &'a Path) -> impl Iterator<Item = &'a Path> + 'a {
        self.files
            .iter()
            .map(move |path| path.strip_prefix(base).unwrap_or(path))
    }
}

/// Run the generator matching the request.
pub fn generate(request: &ArtifactRequest, renderer: &Renderer) -> Result<Generated> {
    let kind = request.kind();
    tracing::debug!(%kind, path = %request.container_path().display(), "generating");

    let generated = match request {
        ArtifactRequest::Module(req) => module::generate(req, renderer)?,
        ArtifactRequest::Controller(req) => controller::generate(req, renderer)?,
        ArtifactRequest::Entity(req) => entity::generate(req, renderer)?,
        ArtifactRequest::Crud(req) => crud::generate(req, renderer)?,
        ArtifactRequest::Form(req) => form::generate(req, renderer)?,
    };

    tracing::info!(
        %kind,
        files = generated.files.len(),
        routing = generated.routing.len(),
        "generated"
    );
    Ok(generated)
}
