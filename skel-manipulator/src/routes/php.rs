use std::path::Path;

use skel_core::{Error, Result};

use super::RouteEntry;
use crate::php::{TokenKind, TokenStream};

const NEW_FILE_HEADER: &str = "<?php

use Symfony\\Component\\Routing\\RouteCollection;
use Symfony\\Component\\Routing\\Route;

$collection = new RouteCollection();

";

/// Positions found in an existing routing file.
struct Anchor {
    /// Collection variable, including the `$`
    variable: String,
    /// Byte offset to insert new statements at
    insert_at: usize,
}

fn add_statement(variable: &str, entry: &RouteEntry) -> String {
    format!(
        "{variable}->add('{}', new Route('{}', [\n    '_controller' => '{}',\n]));\n\n",
        escape(&entry.name),
        escape(&entry.path),
        escape(&entry.controller),
    )
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

pub(super) fn merge(file: &Path, current: Option<&str>, entry: &RouteEntry) -> Result<String> {
    let Some(current) = current.filter(|c| !c.trim().is_empty()) else {
        return Ok(format!(
            "{NEW_FILE_HEADER}{}return $collection;\n",
            add_statement("$collection", entry)
        ));
    };

    let anchor = scan(file, current, entry)?;
    tracing::debug!(
        file = %file.display(),
        variable = %anchor.variable,
        offset = anchor.insert_at,
        "splicing route into PHP collection"
    );

    let mut merged = String::with_capacity(current.len() + 128);
    merged.push_str(&current[..anchor.insert_at]);
    merged.push_str(&add_statement(&anchor.variable, entry));
    merged.push_str(&current[anchor.insert_at..]);
    Ok(merged)
}

/// Walk the statements looking for `$var = new RouteCollection(` and the first
/// `return` after it. Also rejects an existing route with the same name.
fn scan(file: &Path, current: &str, entry: &RouteEntry) -> Result<Anchor> {
    let mut stream = TokenStream::parse(current);
    let mut variable: Option<String> = None;

    while let Some(token) = stream.advance() {
        let token = token.clone();

        if token.kind == TokenKind::Variable && variable.is_none() {
            let is_anchor = stream.peek(1).is_some_and(|t| t.is_punct("="))
                && stream.peek(2).is_some_and(|t| t.is_name("new"))
                && stream.peek(3).is_some_and(|t| t.is_name("RouteCollection"))
                && stream.peek(4).is_some_and(|t| t.is_punct("("));
            if is_anchor {
                variable = Some(token.text.clone());
            }
            continue;
        }

        if token.is_punct("->")
            && stream.peek(1).is_some_and(|t| t.is_name("add"))
            && stream.peek(2).is_some_and(|t| t.is_punct("("))
            && stream
                .peek(3)
                .and_then(|t| t.string_value())
                .is_some_and(|name| name == entry.name)
        {
            return Err(Box::new(Error::DuplicateRoute {
                name: entry.name.clone(),
                file: file.to_path_buf(),
            }));
        }

        if token.is_name("return") {
            let Some(variable) = variable else {
                return Err(Error::malformed_routing(
                    file,
                    format!(
                        "no RouteCollection is created before the return statement on line {}",
                        stream.line()
                    ),
                ));
            };
            return Ok(Anchor {
                variable,
                insert_at: line_start_if_indented(current, token.offset),
            });
        }
    }

    match variable {
        Some(_) => Err(Error::malformed_routing(file, "no return statement found")),
        None => Err(Error::malformed_routing(
            file,
            "no RouteCollection instance found",
        )),
    }
}

/// Move an insertion point back to the start of its line when only
/// indentation precedes it.
fn line_start_if_indented(src: &str, offset: usize) -> usize {
    let line_start = src[..offset].rfind('\n').map_or(0, |i| i + 1);
    if src[line_start..offset].chars().all(|c| c == ' ' || c == '\t') {
        line_start
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn entry() -> RouteEntry {
        RouteEntry::new("show", "/show", "AcmeBlogModule:Post:show")
    }

    fn file() -> PathBuf {
        PathBuf::from("routing.php")
    }

    #[test]
    fn test_new_file() {
        let merged = merge(&file(), None, &entry()).unwrap();
        insta::assert_snapshot!(merged, @r"
        <?php

        use Symfony\Component\Routing\RouteCollection;
        use Symfony\Component\Routing\Route;

        $collection = new RouteCollection();

        $collection->add('show', new Route('/show', [
            '_controller' => 'AcmeBlogModule:Post:show',
        ]));

        return $collection;
        ");
    }

    #[test]
    fn test_splice_before_return() {
        let current = "<?php\n\nuse Symfony\\Component\\Routing\\RouteCollection;\n\n$routes = new RouteCollection();\n// existing\n$routes->add('index', new Route('/'));\n\nreturn $routes;\n";
        let merged = merge(&file(), Some(current), &entry()).unwrap();

        assert!(merged.starts_with(&current[..current.find("return").unwrap()]));
        assert!(merged.contains("$routes->add('show', new Route('/show', [\n"));
        assert!(merged.ends_with("]));\n\nreturn $routes;\n"));
    }

    #[test]
    fn test_return_inside_comment_is_ignored() {
        let current = "<?php\n$c = new RouteCollection();\n/* return early */\nreturn $c;\n";
        let merged = merge(&file(), Some(current), &entry()).unwrap();
        let add = merged.find("$c->add").unwrap();
        assert!(add > merged.find("/* return early */").unwrap());
    }

    #[test]
    fn test_missing_anchor() {
        let err = merge(&file(), Some("<?php\nreturn [];\n"), &entry()).unwrap_err();
        assert!(matches!(*err, Error::MalformedRoutingFile { .. }));

        let err = merge(&file(), Some("<?php\n$x = 1;\n"), &entry()).unwrap_err();
        assert!(matches!(*err, Error::MalformedRoutingFile { .. }));
    }

    #[test]
    fn test_duplicate_route() {
        let current = merge(&file(), None, &entry()).unwrap();
        let err = merge(&file(), Some(&current), &entry()).unwrap_err();
        assert!(matches!(*err, Error::DuplicateRoute { ref name, .. } if name == "show"));
    }

    #[test]
    fn test_unterminated_route_name_is_malformed() {
        let current = "<?php\n$c = new RouteCollection();\n$c->add('é";
        let err = merge(&file(), Some(current), &entry()).unwrap_err();
        assert!(matches!(*err, Error::MalformedRoutingFile { .. }));
    }

    #[test]
    fn test_return_inside_heredoc_is_ignored() {
        let current = "<?php\n$c = new RouteCollection();\n$x = <<<EOT\nreturn here\nEOT;\nreturn $c;\n";
        let merged = merge(&file(), Some(current), &entry()).unwrap();
        assert!(merged.contains("EOT;\n$c->add('show'"));
        assert!(merged.ends_with("]));\n\nreturn $c;\n"));
    }

    #[test]
    fn test_indented_return() {
        let current = "<?php\n$c = new RouteCollection();\n    return $c;\n";
        let merged = merge(&file(), Some(current), &entry()).unwrap();
        assert!(merged.contains("]));\n\n    return $c;\n"));
    }
}
