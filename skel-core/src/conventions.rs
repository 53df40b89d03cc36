//! Naming conventions shared by validators and generators.
//!
//! The tables are built once on first access and never mutated afterwards.

use std::sync::LazyLock;

/// Process-wide convention tables.
#[derive(Debug)]
pub struct Conventions {
    /// Suffixes a container name may end with, in lookup order.
    pub container_suffixes: &'static [&'static str],
    /// Suffix required on generated module namespaces.
    pub module_suffix: &'static str,
    /// Suffix required on controller action names.
    pub action_suffix: &'static str,
    /// PHP reserved words, lowercased.
    pub reserved_words: &'static [&'static str],
    /// Doctrine mapping types accepted for entity fields.
    pub field_types: &'static [&'static str],
}

impl Conventions {
    /// Whether `word` is a PHP reserved word (case-insensitive).
    pub fn is_reserved(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.reserved_words.contains(&lower.as_str())
    }

    /// Whether `ty` is a known field type.
    pub fn is_field_type(&self, ty: &str) -> bool {
        self.field_types.contains(&ty)
    }
}

static CONVENTIONS: LazyLock<Conventions> = LazyLock::new(|| Conventions {
    container_suffixes: &["Module", "Bundle"],
    module_suffix: "Module",
    action_suffix: "Action",
    reserved_words: PHP_RESERVED_WORDS,
    field_types: FIELD_TYPES,
});

/// Get the convention tables.
pub fn conventions() -> &'static Conventions {
    &CONVENTIONS
}

/// PHP reserved words that cannot be used as namespace segments
/// Source: https://www.php.net/manual/en/reserved.keywords.php
const PHP_RESERVED_WORDS: &[&str] = &[
    "abstract", "and", "array", "as", "break", "callable", "case", "catch", "class", "clone",
    "const", "continue", "declare", "default", "do", "else", "elseif", "enddeclare", "endfor",
    "endforeach", "endif", "endswitch", "endwhile", "extends", "final", "finally", "fn", "for",
    "foreach", "function", "global", "goto", "if", "implements", "interface", "instanceof",
    "insteadof", "match", "namespace", "new", "or", "private", "protected", "public",
    "readonly", "static", "switch", "throw", "trait", "try", "use", "var", "while", "xor",
    "yield",
    // Compile-time constants
    "__class__", "__dir__", "__file__", "__line__", "__function__", "__method__",
    "__namespace__", "__trait__",
    // Language constructs
    "die", "echo", "empty", "exit", "eval", "include", "include_once", "isset", "list",
    "require", "require_once", "return", "print", "unset",
];

/// Doctrine DBAL mapping types
const FIELD_TYPES: &[&str] = &[
    "array", "simple_array", "json_array", "json", "bigint", "boolean", "datetime",
    "datetimetz", "date", "time", "decimal", "integer", "object", "smallint", "string", "text",
    "binary", "blob", "float", "guid",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_words_case_insensitive() {
        assert!(conventions().is_reserved("class"));
        assert!(conventions().is_reserved("Namespace"));
        assert!(conventions().is_reserved("__CLASS__"));
        assert!(!conventions().is_reserved("Blog"));
    }

    #[test]
    fn test_field_types() {
        assert!(conventions().is_field_type("string"));
        assert!(conventions().is_field_type("datetime"));
        assert!(!conventions().is_field_type("varchar"));
    }

    #[test]
    fn test_same_instance() {
        assert!(std::ptr::eq(conventions(), conventions()));
    }
}
