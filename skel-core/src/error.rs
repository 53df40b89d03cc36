use std::path::{Path, PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for skel operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("I/O error on '{path}'")]
    #[diagnostic(code(skel::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse skel.toml")]
    #[diagnostic(code(skel::config))]
    ConfigParse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    // Input errors
    #[error("the name must contain a ':' ('{shortcut}' given)")]
    #[diagnostic(
        code(skel::malformed_shortcut),
        help("use the shortcut notation, e.g. AcmeBlogModule:Post")
    )]
    MalformedShortcut { shortcut: String },

    #[error("invalid namespace '{namespace}': {reason}")]
    #[diagnostic(code(skel::invalid_namespace))]
    InvalidNamespace { namespace: String, reason: String },

    #[error("the namespace '{namespace}' contains the PHP reserved word '{word}'")]
    #[diagnostic(code(skel::reserved_word))]
    ReservedWord { namespace: String, word: String },

    #[error("the namespace '{namespace}' must contain a vendor namespace")]
    #[diagnostic(
        code(skel::missing_vendor),
        help("use e.g. \"VendorName\\{namespace}\" instead of simply \"{namespace}\"")
    )]
    MissingVendor { namespace: String },

    #[error("the container name '{name}' must end with {expected}")]
    #[diagnostic(code(skel::invalid_container))]
    InvalidContainerName { name: String, expected: String },

    #[error("format '{format}' is not supported")]
    #[diagnostic(
        code(skel::invalid_format),
        help("valid formats are: php, xml, yml, annotation")
    )]
    InvalidFormat { format: String },

    #[error("invalid action name '{name}': {reason}")]
    #[diagnostic(code(skel::invalid_action))]
    InvalidActionName { name: String, reason: String },

    #[error("action '{name}' is already defined")]
    #[diagnostic(code(skel::duplicate_action))]
    DuplicateAction { name: String },

    #[error("template name '{name}' does not have 2 colons")]
    #[diagnostic(
        code(skel::invalid_template_name),
        help("use 'default' or the Container:Controller:template notation")
    )]
    InvalidTemplateName { name: String },

    #[error("invalid type '{ty}' for field '{field}'")]
    #[diagnostic(code(skel::invalid_field_type))]
    InvalidFieldType { field: String, ty: String },

    #[error("invalid length '{value}'")]
    #[diagnostic(code(skel::invalid_length), help("the length must be a positive integer"))]
    InvalidLength { value: String },

    #[error("field '{name}' is defined more than once")]
    #[diagnostic(code(skel::duplicate_field))]
    DuplicateField { name: String },

    #[error("field '{name}' is reserved")]
    #[diagnostic(
        code(skel::reserved_field),
        help("the primary key is added automatically")
    )]
    ReservedField { name: String },

    #[error("container '{name}' is unknown")]
    #[diagnostic(
        code(skel::unknown_container),
        help("declare it under [[modules]] in skel.toml or pass --namespace")
    )]
    UnknownContainer { name: String },

    // Template errors
    #[error("template '{template}' not found")]
    #[diagnostic(code(skel::template_not_found), help("searched: {searched}"))]
    TemplateNotFound { template: String, searched: String },

    #[error("template '{template}' references an undefined variable")]
    #[diagnostic(code(skel::undefined_variable), help("{detail}"))]
    UndefinedVariable { template: String, detail: String },

    #[error("failed to render template '{template}'")]
    #[diagnostic(code(skel::template), help("{detail}"))]
    Template { template: String, detail: String },

    // Pre-condition errors
    #[error("directory '{path}' was not created")]
    #[diagnostic(code(skel::directory_creation))]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to generate the module as the target directory '{path}' exists but is a file")]
    #[diagnostic(code(skel::not_a_directory))]
    NotADirectory { path: PathBuf },

    #[error("unable to generate the module as the target directory '{path}' is not empty")]
    #[diagnostic(code(skel::target_not_empty))]
    TargetNotEmpty { path: PathBuf },

    #[error("unable to generate the module as the target directory '{path}' is not writable")]
    #[diagnostic(code(skel::permission_denied))]
    PermissionDenied { path: PathBuf },

    #[error("controller '{controller}' already exists")]
    #[diagnostic(code(skel::controller_already_exists), help("remove '{}' first", path.display()))]
    ControllerAlreadyExists { controller: String, path: PathBuf },

    #[error("unable to generate the controller as '{path}' already exists")]
    #[diagnostic(code(skel::controller_exists), help("pass --overwrite to replace it"))]
    ControllerExists { path: PathBuf },

    #[error("entity '{entity}' already exists")]
    #[diagnostic(code(skel::entity_already_exists), help("remove '{}' first", path.display()))]
    EntityAlreadyExists { entity: String, path: PathBuf },

    #[error("unable to generate the form as '{path}' already exists")]
    #[diagnostic(code(skel::form_already_exists))]
    FormAlreadyExists { path: PathBuf },

    #[error("entity '{entity}' has multiple primary keys ({identifiers})")]
    #[diagnostic(
        code(skel::unsupported_key_structure),
        help("only entities with a single primary key are supported")
    )]
    UnsupportedKeyStructure { entity: String, identifiers: String },

    #[error("entity '{entity}' has no primary key field named 'id'")]
    #[diagnostic(
        code(skel::missing_id_field),
        help("the generated code accesses the primary key through getId()")
    )]
    MissingIdField { entity: String },

    // Merge conflicts
    #[error("container '{container}' is already imported in '{file}'")]
    #[diagnostic(code(skel::duplicate_import))]
    DuplicateImport { container: String, file: PathBuf },

    #[error("route '{name}' is already defined in '{file}'")]
    #[diagnostic(code(skel::duplicate_route))]
    DuplicateRoute { name: String, file: PathBuf },

    #[error("routing file '{file}' is not correct: {reason}")]
    #[diagnostic(code(skel::malformed_routing))]
    MalformedRoutingFile { file: PathBuf, reason: String },
}

impl Error {
    /// Create an I/O error for the given path
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// Create a config parse error from a toml error with source context
    pub fn config_parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::ConfigParse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a malformed routing file error
    pub fn malformed_routing(file: impl AsRef<Path>, reason: impl Into<String>) -> Box<Self> {
        Box::new(Error::MalformedRoutingFile {
            file: file.as_ref().to_path_buf(),
            reason: reason.into(),
        })
    }

    /// Whether this error comes from a pre-existing artifact on disk.
    pub fn is_already_exists(&self) -> bool {
        matches!(
            self,
            Error::ControllerAlreadyExists { .. }
                | Error::ControllerExists { .. }
                | Error::EntityAlreadyExists { .. }
                | Error::FormAlreadyExists { .. }
        )
    }
}
