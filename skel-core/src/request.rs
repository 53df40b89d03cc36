//! Generation requests handed from the command line to the generators.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::{
    Format, License, TemplateFormat,
    naming::{namespace_to_path, split_entity},
    spec::{Actions, EntityMetadata, Fields},
};

/// The owning module a generated artifact is placed into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Container name (e.g. "AcmeBlogModule")
    pub name: String,
    /// PHP namespace (e.g. "Acme\BlogModule")
    pub namespace: String,
    /// Directory holding the container sources
    pub path: PathBuf,
}

impl Container {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// Locate a container under a source root from its namespace.
    pub fn under(root: &Path, name: impl Into<String>, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let path = root.join(namespace_to_path(&namespace));
        Self::new(name, namespace, path)
    }

    /// Path of a file inside the container.
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.path.join(relative)
    }
}

/// Kind of artifact produced by one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Module,
    Controller,
    Entity,
    Crud,
    Form,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Module => "module",
            ArtifactKind::Controller => "controller",
            ArtifactKind::Entity => "entity",
            ArtifactKind::Crud => "crud",
            ArtifactKind::Form => "form",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input to the module generator.
#[derive(Debug, Clone)]
pub struct ModuleRequest {
    /// Validated namespace (e.g. "Acme\BlogModule")
    pub namespace: String,
    /// Container name (e.g. "AcmeBlogModule")
    pub container: String,
    /// Source root the namespace directories are created under
    pub dir: PathBuf,
    pub format: Format,
    pub license: License,
}

/// Input to the controller generator.
#[derive(Debug, Clone)]
pub struct ControllerRequest {
    pub container: Container,
    /// Controller name without the `Controller` suffix
    pub controller: String,
    pub routing_format: Format,
    pub template_format: TemplateFormat,
    pub actions: Actions,
}

/// Input to the entity generator.
#[derive(Debug, Clone)]
pub struct EntityRequest {
    pub container: Container,
    /// Entity name relative to the `Entity` namespace (e.g. "Blog\Post")
    pub entity: String,
    pub format: Format,
    pub fields: Fields,
    pub with_repository: bool,
}

/// Input to the CRUD generator.
#[derive(Debug, Clone)]
pub struct CrudRequest {
    pub container: Container,
    pub entity: String,
    pub metadata: EntityMetadata,
    pub format: Format,
    /// Route prefix without leading slash (e.g. "post")
    pub route_prefix: String,
    pub with_write: bool,
    pub force_overwrite: bool,
}

/// Input to the form generator.
#[derive(Debug, Clone)]
pub struct FormRequest {
    pub container: Container,
    pub entity: String,
    pub metadata: EntityMetadata,
}

/// One generation request.
#[derive(Debug, Clone)]
pub enum ArtifactRequest {
    Module(ModuleRequest),
    Controller(ControllerRequest),
    Entity(EntityRequest),
    Crud(CrudRequest),
    Form(FormRequest),
}

impl ArtifactRequest {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            ArtifactRequest::Module(_) => ArtifactKind::Module,
            ArtifactRequest::Controller(_) => ArtifactKind::Controller,
            ArtifactRequest::Entity(_) => ArtifactKind::Entity,
            ArtifactRequest::Crud(_) => ArtifactKind::Crud,
            ArtifactRequest::Form(_) => ArtifactKind::Form,
        }
    }

    /// Directory of the owning container, once it exists.
    pub fn container_path(&self) -> PathBuf {
        match self {
            ArtifactRequest::Module(req) => req.dir.join(namespace_to_path(&req.namespace)),
            ArtifactRequest::Controller(req) => req.container.path.clone(),
            ArtifactRequest::Entity(req) => req.container.path.clone(),
            ArtifactRequest::Crud(req) => req.container.path.clone(),
            ArtifactRequest::Form(req) => req.container.path.clone(),
        }
    }
}

/// Default CRUD route prefix for an entity ("Blog\Post" -> "blog_post").
pub fn default_route_prefix(entity: &str) -> String {
    entity.replace(['\\', '/'], "_").to_lowercase()
}

/// Lowercased file stem for per-entity files ("Blog\Post" -> "blog_post").
pub fn entity_file_stem(entity: &str) -> String {
    entity.replace('\\', "_").to_lowercase()
}

/// Class name of an entity without its sub-namespace.
pub fn entity_class(entity: &str) -> &str {
    split_entity(entity).0
}
