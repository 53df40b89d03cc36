//! Project configuration (`skel.toml`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Container, Error, Format, License, Result, file};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "skel.toml";

/// Root of `skel.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub templates: Templates,

    /// Modules known to the project
    #[serde(default, rename = "modules")]
    pub modules: Vec<ModuleEntry>,

    /// Directory the configuration was loaded from; relative paths resolve against it
    #[serde(skip)]
    root: PathBuf,
}

/// Default values for command line options.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    #[serde(default = "default_format")]
    pub format: Format,
    #[serde(default)]
    pub license: License,
    /// Source root modules are generated under
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            format: default_format(),
            license: License::default(),
            dir: default_dir(),
        }
    }
}

fn default_format() -> Format {
    Format::Annotation
}

fn default_dir() -> PathBuf {
    PathBuf::from("src")
}

/// Template override settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Templates {
    /// Extra skeleton directories, searched after the module-local override
    #[serde(default)]
    pub dirs: Vec<PathBuf>,
}

/// A module declared in `skel.toml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleEntry {
    pub name: String,
    pub namespace: String,
    pub path: PathBuf,
}

impl Config {
    /// Parse configuration from a string.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config_parse(e, content, filename))
    }

    /// Load `skel.toml` from the given path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config = Self::from_str_with_filename(&content, &path.display().to_string())?;
        config.root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    /// Load the configuration if the file exists, otherwise use defaults rooted at its directory.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading configuration");
            return Self::load(path);
        }

        tracing::debug!(path = %path.display(), "no configuration file, using defaults");
        Ok(Self {
            root: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            ..Self::default()
        })
    }

    /// Project root (the directory holding `skel.toml`).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a path relative to the project root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Configured template directories, resolved against the project root.
    pub fn template_dirs(&self) -> Vec<PathBuf> {
        self.templates.dirs.iter().map(|d| self.resolve(d)).collect()
    }

    /// Find a declared module by name.
    pub fn container(&self, name: &str) -> Option<Container> {
        self.modules
            .iter()
            .find(|m| m.name == name)
            .map(|m| Container::new(&m.name, &m.namespace, self.resolve(&m.path)))
    }

    /// Starter configuration written by `skel init`.
    pub fn starter() -> &'static str {
        r#"[defaults]
format = "annotation"
license = "MIT"
dir = "src"

[templates]
dirs = []

# [[modules]]
# name = "AcmeBlogModule"
# namespace = "Acme\\BlogModule"
# path = "src/Acme/BlogModule"
"#
    }

    /// Write the starter configuration, refusing to replace an existing file.
    pub fn write_starter(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        file::write_file(path, Self::starter())?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_str_with_filename("", "skel.toml").unwrap();
        assert_eq!(config.defaults.format, Format::Annotation);
        assert_eq!(config.defaults.license, License::Mit);
        assert_eq!(config.defaults.dir, PathBuf::from("src"));
        assert!(config.modules.is_empty());
    }

    #[test]
    fn test_parse_full() {
        let config = Config::from_str_with_filename(
            r#"
            [defaults]
            format = "yml"
            license = "LGPL"
            dir = "modules"

            [templates]
            dirs = ["app/skeleton"]

            [[modules]]
            name = "AcmeBlogModule"
            namespace = "Acme\\BlogModule"
            path = "modules/Acme/BlogModule"
            "#,
            "skel.toml",
        )
        .unwrap();

        assert_eq!(config.defaults.format, Format::Yaml);
        assert_eq!(config.defaults.license, License::Lgpl);
        assert_eq!(config.templates.dirs, vec![PathBuf::from("app/skeleton")]);

        let container = config.container("AcmeBlogModule").unwrap();
        assert_eq!(container.namespace, "Acme\\BlogModule");
        assert!(config.container("Other").is_none());
    }

    #[test]
    fn test_parse_error() {
        let err = Config::from_str_with_filename("[defaults]\nformat = \"ini\"\n", "skel.toml")
            .unwrap_err();
        assert!(matches!(*err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_starter_parses() {
        let config = Config::from_str_with_filename(Config::starter(), "skel.toml").unwrap();
        assert_eq!(config.defaults.format, Format::Annotation);
    }

    #[test]
    fn test_discover_resolves_against_root() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);

        let config = Config::discover(&path).unwrap();
        assert_eq!(config.root(), temp.path());

        std::fs::write(
            &path,
            "[[modules]]\nname = \"AcmeBlogModule\"\nnamespace = \"Acme\\\\BlogModule\"\npath = \"src/Acme/BlogModule\"\n",
        )
        .unwrap();
        let config = Config::discover(&path).unwrap();
        let container = config.container("AcmeBlogModule").unwrap();
        assert_eq!(container.path, temp.path().join("src/Acme/BlogModule"));
    }

    #[test]
    fn test_write_starter_does_not_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);

        assert!(Config::write_starter(&path).unwrap());
        std::fs::write(&path, "# custom").unwrap();
        assert!(!Config::write_starter(&path).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# custom");
    }
}
