//! Template rendering on top of minijinja, configured to behave like Twig.

use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;
use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior, Value};
use serde::Serialize;
use skel_core::{Error, Result, file};

use crate::skeleton;

/// Variables available to a template, in insertion order.
///
/// Built completely before rendering; a template referencing a variable
/// missing from the mapping fails to render.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RenderParameters(IndexMap<String, Value>);

impl RenderParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Serialize) -> &mut Self {
        self.0.insert(name.into(), Value::from_serialize(value));
        self
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Serialize) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Renders skeleton templates from an ordered list of roots.
///
/// Roots are searched most specific first; the built-in skeletons are always
/// the final fallback.
#[derive(Debug)]
pub struct Renderer {
    roots: Vec<PathBuf>,
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        let search = roots.clone();
        env.set_loader(move |name| load(&search, name));

        Self { roots, env }
    }

    /// Renderer backed by the built-in skeletons only.
    pub fn builtin() -> Self {
        Self::new(Vec::new())
    }

    /// Render a template to a string.
    pub fn render(&self, template: &str, params: &RenderParameters) -> Result<String> {
        let tmpl = self
            .env
            .get_template(template)
            .map_err(|e| self.convert_error(template, e))?;
        tmpl.render(params)
            .map_err(|e| self.convert_error(template, e))
    }

    /// Render a template into `target`, creating parent directories and
    /// replacing any existing content.
    pub fn render_file(
        &self,
        template: &str,
        target: &Path,
        params: &RenderParameters,
    ) -> Result<PathBuf> {
        let content = self.render(template, params)?;
        file::write_file(target, &content)?;
        tracing::debug!(template, target = %target.display(), "rendered");
        Ok(target.to_path_buf())
    }

    fn searched(&self) -> String {
        self.roots
            .iter()
            .map(|root| root.display().to_string())
            .chain(std::iter::once("built-in skeletons".to_string()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn convert_error(&self, template: &str, err: minijinja::Error) -> Box<Error> {
        let name = err.name().unwrap_or(template).to_string();
        let mut detail = err.detail().map(str::to_string).unwrap_or_else(|| err.to_string());
        if let Some(line) = err.line() {
            detail = format!("{} (line {})", detail, line);
        }

        let error = match err.kind() {
            ErrorKind::TemplateNotFound => Error::TemplateNotFound {
                template: template.to_string(),
                searched: self.searched(),
            },
            ErrorKind::UndefinedError => Error::UndefinedVariable {
                template: name,
                detail,
            },
            _ => Error::Template {
                template: name,
                detail,
            },
        };
        Box::new(error)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::builtin()
    }
}

fn load(roots: &[PathBuf], name: &str) -> std::result::Result<Option<String>, minijinja::Error> {
    let relative = Path::new(name);
    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return Ok(None);
    }

    for root in roots {
        let path = root.join(relative);
        if path.is_file() {
            tracing::debug!(template = name, root = %root.display(), "template override");
            return std::fs::read_to_string(&path).map(Some).map_err(|e| {
                minijinja::Error::new(
                    ErrorKind::InvalidOperation,
                    format!("could not read {}", path.display()),
                )
                .with_source(e)
            });
        }
    }

    Ok(skeleton::builtin(name).map(str::to_string))
}
