//! Input validators run before any generation starts.
//!
//! Each validator returns the normalized value on success.

use std::str::FromStr;

use crate::{Error, Format, Result, conventions::conventions, naming, spec::has_action_suffix};

/// Validate a module namespace such as `Acme\BlogModule` (or `Acme/BlogModule`).
pub fn validate_namespace(namespace: &str) -> Result<String> {
    let namespace = naming::normalize_namespace(namespace);
    let conventions = conventions();

    let segments: Vec<&str> = namespace.split('\\').collect();
    if let Some(segment) = segments.iter().find(|s| !is_php_identifier(s)) {
        return Err(Box::new(Error::InvalidNamespace {
            namespace: namespace.clone(),
            reason: format!("'{}' contains invalid characters", segment),
        }));
    }

    if !namespace.ends_with(conventions.module_suffix) {
        return Err(Box::new(Error::InvalidNamespace {
            namespace: namespace.clone(),
            reason: format!("the namespace must end with {}", conventions.module_suffix),
        }));
    }

    if let Some(word) = segments.iter().find(|s| conventions.is_reserved(s)) {
        return Err(Box::new(Error::ReservedWord {
            namespace: namespace.clone(),
            word: word.to_string(),
        }));
    }

    if segments.len() < 2 {
        return Err(Box::new(Error::MissingVendor { namespace }));
    }

    Ok(namespace)
}

/// Validate a container name such as `AcmeBlogModule`.
pub fn validate_container_name(name: &str) -> Result<String> {
    let suffix = conventions().module_suffix;
    if !name.ends_with(suffix) {
        return Err(Box::new(Error::InvalidContainerName {
            name: name.to_string(),
            expected: suffix.to_string(),
        }));
    }
    Ok(name.to_string())
}

/// Validate shortcut notation (controller or entity names).
pub fn validate_shortcut(shortcut: &str) -> Result<String> {
    naming::parse_shortcut(shortcut)?;
    Ok(shortcut.to_string())
}

/// Normalize a target directory to end with a `/`.
pub fn validate_target_dir(dir: &str) -> String {
    if dir.ends_with('/') {
        dir.to_string()
    } else {
        format!("{}/", dir)
    }
}

/// Validate a configuration format name (case-insensitive).
pub fn validate_format(format: &str) -> Result<Format> {
    Format::from_str(format).map_err(|_| {
        Box::new(Error::InvalidFormat {
            format: format.to_string(),
        })
    })
}

/// Validate an action name such as `showAction`.
pub fn validate_action_name(name: &str) -> Result<String> {
    if name.is_empty() {
        return Err(Box::new(Error::InvalidActionName {
            name: name.to_string(),
            reason: "an action must have a name".to_string(),
        }));
    }
    if !has_action_suffix(name) || name == conventions().action_suffix {
        return Err(Box::new(Error::InvalidActionName {
            name: name.to_string(),
            reason: format!("the name is not suffixed by {}", conventions().action_suffix),
        }));
    }
    if !is_php_identifier(name) {
        return Err(Box::new(Error::InvalidActionName {
            name: name.to_string(),
            reason: "the name is not a valid PHP method name".to_string(),
        }));
    }
    Ok(name.to_string())
}

/// Validate a template logical name: `default` or `Container:Controller:template`.
pub fn validate_template_name(name: &str) -> Result<String> {
    if name == "default" || name.matches(':').count() == 2 {
        Ok(name.to_string())
    } else {
        Err(Box::new(Error::InvalidTemplateName {
            name: name.to_string(),
        }))
    }
}

/// Validate a field type against the type vocabulary.
pub fn validate_field_type(field: &str, ty: &str) -> Result<String> {
    if conventions().is_field_type(ty) {
        Ok(ty.to_string())
    } else {
        Err(Box::new(Error::InvalidFieldType {
            field: field.to_string(),
            ty: ty.to_string(),
        }))
    }
}

/// Validate a field length (a positive integer).
pub fn validate_length(value: &str) -> Result<u32> {
    match value.trim().parse::<u32>() {
        Ok(length) if length >= 1 => Ok(length),
        _ => Err(Box::new(Error::InvalidLength {
            value: value.to_string(),
        })),
    }
}

/// Check that a name is a valid PHP identifier (letters, digits, underscores, bytes >= 0x7f).
pub fn is_php_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || !c.is_ascii() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii())
}
