//! Importing a container's routes into an application routing file.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use skel_core::{Error, Format, Result, file, naming};

/// Progress of a resource import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeState {
    NotStarted,
    /// Current content read (or the file found missing)
    Loaded,
    /// Content checked for an existing import of the container
    Validated,
    /// New content computed in memory
    Merged,
    Written,
}

impl fmt::Display for MergeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MergeState::NotStarted => "not started",
            MergeState::Loaded => "loaded",
            MergeState::Validated => "validated",
            MergeState::Merged => "merged",
            MergeState::Written => "written",
        };
        f.write_str(s)
    }
}

/// Prepends resource imports to a YAML routing file.
#[derive(Debug)]
pub struct RoutingManipulator {
    file: PathBuf,
    state: MergeState,
}

impl RoutingManipulator {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            state: MergeState::NotStarted,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn state(&self) -> MergeState {
        self.state
    }

    fn transition(&mut self, state: MergeState) {
        tracing::debug!(file = %self.file.display(), from = %self.state, to = %state, "routing import");
        self.state = state;
    }

    /// Import the routes of `container` under `prefix`.
    ///
    /// `path` is the routing resource relative to `Resources/config` without
    /// extension (e.g. `routing` or `routing/post`); it is ignored for
    /// annotations, which import the `Controller/` directory instead.
    ///
    /// Any existing mention of the container counts as an import: the file is
    /// then left untouched and `DuplicateImport` is returned.
    pub fn add_resource(
        &mut self,
        container: &str,
        format: Format,
        prefix: &str,
        path: &str,
    ) -> Result<bool> {
        let current = file::read_optional(&self.file)?.unwrap_or_default();
        self.transition(MergeState::Loaded);

        self.transition(MergeState::Validated);
        if current.contains(container) {
            return Err(Box::new(Error::DuplicateImport {
                container: container.to_string(),
                file: self.file.clone(),
            }));
        }

        let mut code = format!("{}:\n", resource_key(container, prefix));
        match format.extension() {
            None => {
                code.push_str(&format!("    resource: \"@{}/Controller/\"\n", container));
                code.push_str("    type:     annotation\n");
            }
            Some(ext) => {
                code.push_str(&format!(
                    "    resource: \"@{}/Resources/config/{}.{}\"\n",
                    container, path, ext
                ));
            }
        }
        code.push_str(&format!("    prefix:   {}\n", prefix));
        code.push('\n');
        code.push_str(&current);
        self.transition(MergeState::Merged);

        file::write_file(&self.file, &code)?;
        self.transition(MergeState::Written);

        Ok(true)
    }
}

/// Key of the import entry: the underscored container basename, followed by
/// the prefix (without its leading slash) when it is not `/`.
///
/// ```
/// use skel_manipulator::resource_key;
///
/// assert_eq!(resource_key("AcmeBlogModule", "/"), "acme_blog");
/// assert_eq!(resource_key("AcmeBlogModule", "/blog/post"), "acme_blog_blog_post");
/// ```
pub fn resource_key(container: &str, prefix: &str) -> String {
    let mut key = naming::underscore(naming::basename(container));
    if prefix != "/" {
        let trimmed = prefix.strip_prefix('/').unwrap_or(prefix);
        key.push('_');
        key.push_str(&trimmed.replace('/', "_"));
    }
    key
}
