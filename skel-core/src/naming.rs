//! Shortcut notation and naming conventions.
//!
//! Everything here is a pure function of its input.

use crate::{Error, Result, conventions::conventions};

/// A parsed `Container:Name` shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    /// Owning container identifier (e.g. "AcmeBlogModule")
    pub container: String,
    /// Member name, with `/` normalized to `\` (e.g. "Blog\Post")
    pub name: String,
}

/// Parse shortcut notation such as `AcmeBlogModule:Post` or `AcmeBlogModule:Blog/Post`.
pub fn parse_shortcut(shortcut: &str) -> Result<Shortcut> {
    let normalized = normalize_namespace(shortcut);

    match normalized.split_once(':') {
        Some((container, name)) => Ok(Shortcut {
            container: container.to_string(),
            name: name.to_string(),
        }),
        None => Err(Box::new(Error::MalformedShortcut {
            shortcut: shortcut.to_string(),
        })),
    }
}

/// Convert directory-style separators to namespace separators.
pub fn normalize_namespace(namespace: &str) -> String {
    namespace.replace('/', "\\")
}

/// Convert a namespace to a relative directory path (e.g. "Acme\BlogModule" -> "Acme/BlogModule").
pub fn namespace_to_path(namespace: &str) -> String {
    namespace.replace('\\', "/")
}

/// Strip the container suffix (e.g. "AcmeBlogModule" -> "AcmeBlog").
pub fn basename(container: &str) -> &str {
    conventions()
        .container_suffixes
        .iter()
        .find_map(|suffix| container.strip_suffix(suffix))
        .unwrap_or(container)
}

/// First segment of a namespace (e.g. "Acme\BlogModule" -> "Acme").
pub fn vendor(namespace: &str) -> &str {
    namespace.split('\\').next().unwrap_or(namespace)
}

/// Convert a camel/Pascal identifier to an underscored alias.
///
/// Uppercase runs are kept together: "HTMLParser" -> "html_parser",
/// "AcmeBlog" -> "acme_blog".
pub fn underscore(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }

    result
}

/// Convert a string to snake_case (e.g., "showPage" -> "show_page")
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.extend(c.to_lowercase());
    }
    result.replace('-', "_")
}

/// Convert a string to PascalCase (e.g., "hello_world" -> "HelloWorld")
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Route name prefix derived from a route prefix ("blog/post" -> "blog_post").
pub fn route_name_prefix(prefix: &str) -> String {
    prefix.replace('/', "_")
}

/// Split an entity name into its class and sub-namespace ("Blog\Post" -> ("Post", "Blog")).
pub fn split_entity(entity: &str) -> (&str, &str) {
    match entity.rsplit_once('\\') {
        Some((namespace, class)) => (class, namespace),
        None => (entity, ""),
    }
}

/// Strip the action suffix ("showPageAction" -> "showPage").
pub fn action_basename(action: &str) -> &str {
    action
        .strip_suffix(conventions().action_suffix)
        .unwrap_or(action)
}

/// Double every namespace separator, for embedding in PHP/JSON string literals.
pub fn double_backslashes(s: &str) -> String {
    s.replace('\\', "\\\\")
}
