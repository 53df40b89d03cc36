//! Form type generation for an entity.

use skel_core::{EntityMetadata, Error, FormRequest, Result, naming};

use crate::{Generated, RenderParameters, Renderer};

/// Name a form type is registered under.
///
/// ```
/// use skel_generator::form::form_type_name;
///
/// assert_eq!(form_type_name("Foo\\BarBundle", "Post"), "foo_barbundle_posttype");
/// assert_eq!(form_type_name("Foo\\BarBundle", "Blog\\Post"), "foo_barbundle_blog_posttype");
/// ```
pub fn form_type_name(namespace: &str, entity: &str) -> String {
    let (class, sub_namespace) = naming::split_entity(entity);
    let mut parts = vec![namespace.replace('\\', "_")];
    parts.extend(
        sub_namespace
            .split('\\')
            .filter(|part| !part.is_empty())
            .map(str::to_string),
    );
    parts.push(format!("{}type", class));
    parts.join("_").to_lowercase()
}

/// Fields shown in the form: mapped non-identifier fields, then associations.
pub fn form_fields(metadata: &EntityMetadata) -> Vec<String> {
    metadata
        .non_identifier_fields()
        .map(|(name, _)| name.clone())
        .chain(metadata.associations.iter().cloned())
        .collect()
}

pub fn generate(request: &FormRequest, renderer: &Renderer) -> Result<Generated> {
    if request.metadata.identifier.len() > 1 {
        return Err(Box::new(Error::UnsupportedKeyStructure {
            entity: request.entity.clone(),
            identifiers: request.metadata.identifier.join(", "),
        }));
    }

    let container = &request.container;
    let (class, sub_namespace) = naming::split_entity(&request.entity);
    let target = container.join(format!(
        "Form/{}Type.php",
        naming::namespace_to_path(&request.entity)
    ));
    if target.exists() {
        return Err(Box::new(Error::FormAlreadyExists { path: target }));
    }

    let mut form_namespace = format!("{}\\Form", container.namespace);
    if !sub_namespace.is_empty() {
        form_namespace.push('\\');
        form_namespace.push_str(sub_namespace);
    }

    let params = RenderParameters::new()
        .with("form_namespace", form_namespace)
        .with("form_class", format!("{}Type", class))
        .with("fields", form_fields(&request.metadata))
        .with(
            "data_class",
            format!("{}\\Entity\\{}", container.namespace, request.entity),
        )
        .with("form_type_name", form_type_name(&container.namespace, &request.entity));

    let mut generated = Generated::default();
    generated.file(renderer.render_file("form/FormType.php.twig", &target, &params)?);

    tracing::info!(entity = %request.entity, "form generated");
    Ok(generated)
}
