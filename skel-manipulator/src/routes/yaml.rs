use std::path::Path;

use skel_core::{Error, Result};

use super::RouteEntry;

/// Whether a top-level key named `name` is already defined.
fn defines(current: &str, name: &str) -> bool {
    current
        .lines()
        .filter(|line| !line.starts_with([' ', '\t', '#']))
        .any(|line| line.trim_end().strip_suffix(':') == Some(name))
}

pub(super) fn merge(file: &Path, current: Option<&str>, entry: &RouteEntry) -> Result<String> {
    let current = current.unwrap_or_default();
    if defines(current, &entry.name) {
        return Err(Box::new(Error::DuplicateRoute {
            name: entry.name.clone(),
            file: file.to_path_buf(),
        }));
    }

    Ok(format!(
        "{current}\n{}:\n    path: {}\n    defaults: {{ _controller: {} }}\n",
        entry.name, entry.path, entry.controller
    ))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_append_to_missing_file() {
        let entry = RouteEntry::new("show", "/show", "AcmeBlogModule:Post:show");
        let merged = merge(&PathBuf::from("routing.yml"), None, &entry).unwrap();
        assert_eq!(
            merged,
            "\nshow:\n    path: /show\n    defaults: { _controller: AcmeBlogModule:Post:show }\n"
        );
    }

    #[test]
    fn test_append_keeps_existing_content() {
        let current = "index:\n    path: /\n";
        let entry = RouteEntry::new("show_page", "/{id}", "AcmeBlogModule:Post:showPage");
        let merged = merge(&PathBuf::from("routing.yml"), Some(current), &entry).unwrap();
        assert_eq!(
            merged,
            "index:\n    path: /\n\nshow_page:\n    path: /{id}\n    defaults: { _controller: AcmeBlogModule:Post:showPage }\n"
        );
    }

    #[test]
    fn test_duplicate_route() {
        let current = "show:\n    path: /show\n";
        let entry = RouteEntry::new("show", "/other", "AcmeBlogModule:Post:show");
        let err = merge(&PathBuf::from("routing.yml"), Some(current), &entry).unwrap_err();
        assert!(matches!(*err, Error::DuplicateRoute { .. }));
    }

    #[test]
    fn test_nested_keys_are_not_routes() {
        assert!(!defines("index:\n    show:\n", "show"));
        assert!(!defines("# show:\n", "show"));
        assert!(defines("show:  \n", "show"));
    }
}
