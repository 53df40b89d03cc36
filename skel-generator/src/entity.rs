//! Doctrine entity generation.

use serde::Serialize;
use skel_core::{
    EntityRequest, Error, FieldSpec, Result, entity_file_stem, naming, validate,
};

use crate::{Generated, RenderParameters, Renderer};

/// A field as seen by the entity and mapping templates.
#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub length: Option<u32>,
    pub column: String,
    /// Type used in the docblocks
    pub php_type: &'static str,
    /// Accessor suffix (`getTitle`, `setTitle`)
    pub method: String,
    pub column_annotation: String,
}

impl FieldView {
    pub fn new(field: &FieldSpec) -> Self {
        let column = naming::underscore(&field.name);
        let mut column_annotation = format!(
            "@ORM\\Column(name=\"{}\", type=\"{}\"",
            column, field.ty
        );
        if let Some(length) = field.length {
            column_annotation.push_str(&format!(", length={}", length));
        }
        column_annotation.push(')');

        Self {
            name: field.name.clone(),
            ty: field.ty.clone(),
            length: field.length,
            php_type: php_type(&field.ty),
            method: naming::to_pascal_case(&field.name),
            column,
            column_annotation,
        }
    }
}

/// PHP type of a Doctrine mapping type.
pub fn php_type(ty: &str) -> &'static str {
    match ty {
        "integer" | "smallint" => "integer",
        "boolean" => "boolean",
        "float" => "float",
        "date" | "time" | "datetime" | "datetimetz" => "\\DateTime",
        "array" | "simple_array" | "json_array" | "json" => "array",
        "object" => "object",
        "binary" | "blob" => "resource",
        _ => "string",
    }
}

/// Check user supplied fields; the `id` identifier is always generated.
fn check_fields(request: &EntityRequest) -> Result<()> {
    for field in request.fields.values() {
        if field.name == "id" {
            return Err(Box::new(Error::ReservedField {
                name: field.name.clone(),
            }));
        }
        validate::validate_field_type(&field.name, &field.ty)?;
    }
    Ok(())
}

pub fn generate(request: &EntityRequest, renderer: &Renderer) -> Result<Generated> {
    let container = &request.container;
    let entity_path = naming::namespace_to_path(&request.entity);
    let target = container.join(format!("Entity/{}.php", entity_path));
    if target.exists() {
        return Err(Box::new(Error::EntityAlreadyExists {
            entity: request.entity.clone(),
            path: target,
        }));
    }
    check_fields(request)?;

    let (entity_class, sub_namespace) = naming::split_entity(&request.entity);
    let mut entity_namespace = format!("{}\\Entity", container.namespace);
    if !sub_namespace.is_empty() {
        entity_namespace.push('\\');
        entity_namespace.push_str(sub_namespace);
    }
    let entity_fqcn = format!("{}\\{}", entity_namespace, entity_class);
    let repository_class = request
        .with_repository
        .then(|| format!("{}Repository", entity_fqcn));
    let entity_annotation = match &repository_class {
        Some(class) => format!("@ORM\\Entity(repositoryClass=\"{}\")", class),
        None => "@ORM\\Entity".to_string(),
    };
    let fields: Vec<FieldView> = request.fields.values().map(FieldView::new).collect();

    let params = RenderParameters::new()
        .with("entity_namespace", &entity_namespace)
        .with("entity_class", entity_class)
        .with("entity_fqcn", &entity_fqcn)
        .with("entity_annotation", entity_annotation)
        .with("repository_class", &repository_class)
        .with("table_name", entity_file_stem(&request.entity))
        .with("format", request.format.as_str())
        .with("fields", &fields);

    let mut generated = Generated::default();
    generated.file(renderer.render_file("entity/Entity.php.twig", &target, &params)?);

    if repository_class.is_some() {
        let repository = container.join(format!("Entity/{}Repository.php", entity_path));
        generated.file(renderer.render_file("entity/Repository.php.twig", &repository, &params)?);
    }

    if let Some(ext) = request.format.extension() {
        let template = format!("entity/mapping.orm.{}.twig", ext);
        let mapping = container.join(format!(
            "Resources/config/doctrine/{}.orm.{}",
            request.entity.replace('\\', "."),
            ext
        ));
        generated.file(renderer.render_file(&template, &mapping, &params)?);
    }

    tracing::info!(entity = %request.entity, fields = fields.len(), "entity generated");
    Ok(generated)
}
