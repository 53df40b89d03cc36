//! Field and action specifications supplied to the generators.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::{Error, Result, conventions::conventions, naming::action_basename, validate};

/// A field of a generated entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub length: Option<u32>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            length: None,
        }
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }
}

/// Fields keyed by name, in declaration order.
pub type Fields = IndexMap<String, FieldSpec>;

/// Parse a field list such as `title:string(255) body:text published`.
///
/// The type defaults to `string` when omitted.
pub fn parse_fields(input: &str) -> Result<Fields> {
    let mut fields = Fields::new();

    for token in input.split_whitespace() {
        let (name, ty) = match token.split_once(':') {
            Some((name, ty)) => (name, ty),
            None => (token, "string"),
        };
        if name.is_empty() {
            continue;
        }

        let (ty, length) = match ty.split_once('(') {
            Some((ty, rest)) => {
                let raw = rest.strip_suffix(')').unwrap_or(rest);
                (ty, Some(validate::validate_length(raw)?))
            }
            None => (ty, None),
        };

        let ty = validate::validate_field_type(name, ty)?;
        if fields.contains_key(name) {
            return Err(Box::new(Error::DuplicateField {
                name: name.to_string(),
            }));
        }

        fields.insert(
            name.to_string(),
            FieldSpec {
                name: name.to_string(),
                ty,
                length,
            },
        );
    }

    Ok(fields)
}

/// View template requested for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateRef {
    /// Derive `Container:Controller:action.html.<format>` from the action name.
    Default,
    /// Explicit `Container:Controller:template` logical name.
    Explicit(String),
}

impl TemplateRef {
    pub fn parse(name: &str) -> Result<Self> {
        let name = validate::validate_template_name(name)?;
        if name == "default" {
            Ok(TemplateRef::Default)
        } else {
            Ok(TemplateRef::Explicit(name))
        }
    }
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateRef::Default => f.write_str("default"),
            TemplateRef::Explicit(name) => f.write_str(name),
        }
    }
}

/// A controller action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSpec {
    /// Method name, suffixed by `Action`
    pub name: String,
    /// Route pattern, e.g. `/{id}/{slug}`
    pub route: String,
    /// Placeholder names extracted from the route, in order
    pub placeholders: Vec<String>,
    pub template: TemplateRef,
}

impl ActionSpec {
    /// Create an action, extracting placeholders from the route.
    pub fn new(name: impl Into<String>, route: impl Into<String>, template: TemplateRef) -> Self {
        let route = route.into();
        Self {
            name: name.into(),
            placeholders: placeholders_from_route(&route),
            route,
            template,
        }
    }

    /// Action name without its suffix.
    pub fn basename(&self) -> &str {
        action_basename(&self.name)
    }
}

/// Actions keyed by name, in insertion order.
pub type Actions = IndexMap<String, ActionSpec>;

/// Parse an action list such as `showAction:/{id}:default listAction`.
///
/// Each token is `name[:route[:template]]`; the route defaults to
/// `/<basename>` and the template to `default`.
pub fn parse_actions(input: &str) -> Result<Actions> {
    let mut actions = Actions::new();

    for token in input.split_whitespace() {
        let mut parts = token.splitn(3, ':');
        let name = validate::validate_action_name(parts.next().unwrap_or_default())?;

        let route = match parts.next() {
            Some(route) if !route.is_empty() => route.to_string(),
            _ => format!("/{}", action_basename(&name)),
        };

        let template = match parts.next() {
            Some(template) if !template.is_empty() => TemplateRef::parse(template)?,
            _ => TemplateRef::Default,
        };

        if actions.contains_key(&name) {
            return Err(Box::new(Error::DuplicateAction { name }));
        }
        actions.insert(name.clone(), ActionSpec::new(name, route, template));
    }

    Ok(actions)
}

/// Extract `{placeholder}` names from a route pattern.
pub fn placeholders_from_route(route: &str) -> Vec<String> {
    let mut placeholders = Vec::new();
    let mut rest = route;

    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                placeholders.push(after[..end].to_string());
                rest = &after[end + 1..];
            }
            None => break,
        }
    }

    placeholders
}

/// Mapping information of an existing entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityMetadata {
    /// Identifier field names
    pub identifier: Vec<String>,
    /// Mapped field name -> type, in declaration order
    pub fields: IndexMap<String, String>,
    /// Association field names
    pub associations: Vec<String>,
}

impl EntityMetadata {
    /// Metadata for an entity with a single `id` identifier.
    pub fn with_id() -> Self {
        Self {
            identifier: vec!["id".to_string()],
            ..Self::default()
        }
    }

    pub fn field(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.fields.insert(name.into(), ty.into());
        self
    }

    pub fn association(mut self, name: impl Into<String>) -> Self {
        self.associations.push(name.into());
        self
    }

    /// Mapped fields that are not part of the identifier.
    pub fn non_identifier_fields(&self) -> impl Iterator<Item = (&String, &String)> {
        self.fields
            .iter()
            .filter(|(name, _)| !self.identifier.contains(name))
    }

    /// Build metadata from entity fields, adding the implicit `id` identifier.
    pub fn from_fields(fields: &Fields) -> Self {
        let mut metadata = Self::with_id();
        metadata.fields.insert("id".to_string(), "integer".to_string());
        for field in fields.values() {
            metadata.fields.insert(field.name.clone(), field.ty.clone());
        }
        metadata
    }
}

/// Whether an action name carries the conventional suffix.
pub fn has_action_suffix(name: &str) -> bool {
    name.ends_with(conventions().action_suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_from_route() {
        assert_eq!(placeholders_from_route("/show"), Vec::<String>::new());
        assert_eq!(placeholders_from_route("/{id}/{slug}"), vec!["id", "slug"]);
        assert_eq!(
            placeholders_from_route("/_get-pages/{max_count}"),
            vec!["max_count"]
        );
        assert_eq!(placeholders_from_route("/{unterminated"), Vec::<String>::new());
    }

    #[test]
    fn test_parse_actions_defaults() {
        let actions = parse_actions("showAction").unwrap();
        let action = &actions["showAction"];
        assert_eq!(action.route, "/show");
        assert!(action.placeholders.is_empty());
        assert_eq!(action.template, TemplateRef::Default);
        assert_eq!(action.basename(), "show");
    }

    #[test]
    fn test_parse_actions_full() {
        let actions = parse_actions(
            "showPageAction:/{id}/{slug} getListOfPagesAction:/_get-pages/{max_count}:FooBarModule:Page:pages_list.html.twig",
        )
        .unwrap();

        let names: Vec<_> = actions.keys().cloned().collect();
        assert_eq!(names, vec!["showPageAction", "getListOfPagesAction"]);

        let list = &actions["getListOfPagesAction"];
        assert_eq!(list.placeholders, vec!["max_count"]);
        assert_eq!(
            list.template,
            TemplateRef::Explicit("FooBarModule:Page:pages_list.html.twig".to_string())
        );
    }

    #[test]
    fn test_parse_actions_rejects_bad_input() {
        let err = parse_actions("show").unwrap_err();
        assert!(matches!(*err, Error::InvalidActionName { .. }));

        let err = parse_actions("showAction showAction").unwrap_err();
        assert!(matches!(*err, Error::DuplicateAction { .. }));

        let err = parse_actions("showAction:/show:Page:show.html.twig").unwrap_err();
        assert!(matches!(*err, Error::InvalidTemplateName { .. }));
    }

    #[test]
    fn test_parse_fields() {
        let fields = parse_fields("title:string(255) body:text published:boolean slug").unwrap();

        assert_eq!(fields.len(), 4);
        assert_eq!(fields["title"], FieldSpec::new("title", "string").with_length(255));
        assert_eq!(fields["body"].ty, "text");
        assert_eq!(fields["slug"].ty, "string");
        assert_eq!(fields["slug"].length, None);
    }

    #[test]
    fn test_parse_fields_rejects_bad_input() {
        let err = parse_fields("title:varchar").unwrap_err();
        assert!(matches!(*err, Error::InvalidFieldType { .. }));

        let err = parse_fields("title:string(0)").unwrap_err();
        assert!(matches!(*err, Error::InvalidLength { .. }));

        let err = parse_fields("title title:text").unwrap_err();
        assert!(matches!(*err, Error::DuplicateField { .. }));
    }

    #[test]
    fn test_metadata_from_fields() {
        let fields = parse_fields("title body:text").unwrap();
        let metadata = EntityMetadata::from_fields(&fields);

        assert_eq!(metadata.identifier, vec!["id"]);
        let names: Vec<_> = metadata.non_identifier_fields().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["title", "body"]);
    }
}
