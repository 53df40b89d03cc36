//! Doctrine CRUD generation: controller, views, functional test and routing.

use skel_core::{CrudRequest, Error, Result, entity_file_stem, naming};

use crate::{Generated, RenderParameters, Renderer, form::form_type_name};

const READ_ACTIONS: &[&str] = &["index", "show"];
const WRITE_ACTIONS: &[&str] = &["new", "edit", "delete"];

/// Actions with a view template.
const VIEWS: &[&str] = &["index", "show", "new", "edit"];

/// Actions linked from each record in the list view.
const RECORD_ACTIONS: &[&str] = &["show", "edit"];

/// Enabled actions, read actions first.
pub fn actions(with_write: bool) -> Vec<&'static str> {
    let mut actions = READ_ACTIONS.to_vec();
    if with_write {
        actions.extend_from_slice(WRITE_ACTIONS);
    }
    actions
}

/// Reject entities whose primary key is not a single `id` field.
pub fn check_identifier(request: &CrudRequest) -> Result<()> {
    let identifier = &request.metadata.identifier;
    if identifier.len() > 1 {
        return Err(Box::new(Error::UnsupportedKeyStructure {
            entity: request.entity.clone(),
            identifiers: identifier.join(", "),
        }));
    }
    if identifier.first().map(String::as_str) != Some("id") {
        return Err(Box::new(Error::MissingIdField {
            entity: request.entity.clone(),
        }));
    }
    Ok(())
}

fn sub_namespace(base: &str, sub: &str) -> String {
    if sub.is_empty() {
        base.to_string()
    } else {
        format!("{}\\{}", base, sub)
    }
}

pub fn generate(request: &CrudRequest, renderer: &Renderer) -> Result<Generated> {
    check_identifier(request)?;

    let container = &request.container;
    let entity_path = naming::namespace_to_path(&request.entity);
    let (entity_class, entity_namespace) = naming::split_entity(&request.entity);

    let controller = container.join(format!("Controller/{}Controller.php", entity_path));
    if controller.exists() && !request.force_overwrite {
        return Err(Box::new(Error::ControllerExists { path: controller }));
    }

    let actions = actions(request.with_write);
    let record_actions: Vec<&str> = RECORD_ACTIONS
        .iter()
        .copied()
        .filter(|action| actions.contains(action))
        .collect();

    let params = RenderParameters::new()
        .with("container", &container.name)
        .with("entity", &request.entity)
        .with("entity_class", entity_class)
        .with("entity_path", &entity_path)
        .with(
            "entity_fqcn",
            format!("{}\\Entity\\{}", container.namespace, request.entity),
        )
        .with(
            "form_type_fqcn",
            format!("{}\\Form\\{}Type", container.namespace, request.entity),
        )
        .with("form_type_name", form_type_name(&container.namespace, &request.entity))
        .with(
            "controller_namespace",
            sub_namespace(&format!("{}\\Controller", container.namespace), entity_namespace),
        )
        .with(
            "test_namespace",
            sub_namespace(
                &format!("{}\\Tests\\Controller", container.namespace),
                entity_namespace,
            ),
        )
        .with("fields", &request.metadata.fields)
        .with("actions", &actions)
        .with("record_actions", &record_actions)
        .with("format", request.format.as_str())
        .with("route_prefix", &request.route_prefix)
        .with("route_name_prefix", naming::route_name_prefix(&request.route_prefix));

    let mut generated = Generated::default();
    generated.file(renderer.render_file("crud/controller.php.twig", &controller, &params)?);

    let views = container.join("Resources/views").join(&entity_path);
    for view in VIEWS.iter().filter(|view| actions.contains(view)) {
        let template = format!("crud/views/{}.html.twig.twig", view);
        let target = views.join(format!("{}.html.twig", view));
        generated.file(renderer.render_file(&template, &target, &params)?);
    }

    let test = container.join(format!("Tests/Controller/{}ControllerTest.php", entity_path));
    generated.file(renderer.render_file("crud/tests/test.php.twig", &test, &params)?);

    if let Some(ext) = request.format.extension() {
        let template = format!("crud/config/routing.{}.twig", ext);
        let target = container.join(format!(
            "Resources/config/routing/{}.{}",
            entity_file_stem(&request.entity),
            ext
        ));
        generated.file(renderer.render_file(&template, &target, &params)?);
    }

    tracing::info!(
        entity = %request.entity,
        format = %request.format,
        actions = actions.len(),
        "crud generated"
    );
    Ok(generated)
}

#[cfg(test)]
mod tests {
    use skel_core::{Container, EntityMetadata, Format};
    use tempfile::TempDir;

    use super::*;

    fn request(root: &std::path::Path, format: Format, with_write: bool) -> CrudRequest {
        CrudRequest {
            container: Container::new("FooBarBundle", "Foo\\BarBundle", root),
            entity: "Post".to_string(),
            metadata: EntityMetadata::with_id()
                .field("id", "integer")
                .field("title", "string")
                .field("publishedAt", "datetime"),
            format,
            route_prefix: "post".to_string(),
            with_write,
            force_overwrite: false,
        }
    }

    #[test]
    fn test_actions() {
        assert_eq!(actions(false), vec!["index", "show"]);
        assert_eq!(actions(true), vec!["index", "show", "new", "edit", "delete"]);
    }

    #[test]
    fn test_missing_id_field() {
        let temp = TempDir::new().unwrap();
        let mut req = request(temp.path(), Format::Yaml, false);
        req.metadata.identifier = vec!["uuid".to_string()];

        let err = generate(&req, &Renderer::builtin()).unwrap_err();
        assert!(matches!(*err, Error::MissingIdField { .. }));
        assert!(std::fs::read_dir(temp.path()).unwrap().next().is_none());
    }

    #[test]
    fn test_read_only_annotation() {
        let temp = TempDir::new().unwrap();
        let generated = generate(&request(temp.path(), Format::Annotation, false), &Renderer::builtin()).unwrap();
        assert_eq!(generated.files.len(), 4);

        let controller = std::fs::read_to_string(temp.path().join("Controller/PostController.php")).unwrap();
        assert!(controller.contains("@Route(\"/post\")"));
        assert!(controller.contains("@Route(\"/{id}\", name=\"post_show\")"));
        assert!(!controller.contains("newAction"));
        assert!(!temp.path().join("Resources/config/routing").exists());
        assert!(!temp.path().join("Resources/views/Post/new.html.twig").exists());
    }

    #[test]
    fn test_write_yml() {
        let temp = TempDir::new().unwrap();
        generate(&request(temp.path(), Format::Yaml, true), &Renderer::builtin()).unwrap();

        let routing = std::fs::read_to_string(temp.path().join("Resources/config/routing/post.yml")).unwrap();
        assert!(routing.starts_with("post:\n"));
        assert!(routing.contains("post_delete:"));
        assert!(routing.contains("_controller: \"FooBarBundle:Post:edit\""));

        let index = std::fs::read_to_string(temp.path().join("Resources/views/Post/index.html.twig")).unwrap();
        assert!(index.contains("{% for entity in entities %}"));
        assert!(index.contains("{{ path('post_show', { 'id': entity.id }) }}"));
        assert!(index.contains("{{ entity.publishedAt|date('Y-m-d H:i:s') }}"));

        let controller = std::fs::read_to_string(temp.path().join("Controller/PostController.php")).unwrap();
        assert!(controller.contains("use Foo\\BarBundle\\Form\\PostType;"));
        assert!(!controller.contains("@Route"));
    }

    #[test]
    fn test_existing_controller_requires_force() {
        let temp = TempDir::new().unwrap();
        let mut req = request(temp.path(), Format::Xml, false);
        generate(&req, &Renderer::builtin()).unwrap();

        let err = generate(&req, &Renderer::builtin()).unwrap_err();
        assert!(matches!(*err, Error::ControllerExists { .. }));

        req.force_overwrite = true;
        generate(&req, &Renderer::builtin()).unwrap();
    }

    #[test]
    fn test_sub_namespace_entity() {
        let temp = TempDir::new().unwrap();
        let mut req = request(temp.path(), Format::Php, false);
        req.entity = "Blog\\Post".to_string();
        req.route_prefix = "blog/post".to_string();
        generate(&req, &Renderer::builtin()).unwrap();

        let controller = std::fs::read_to_string(temp.path().join("Controller/Blog/PostController.php")).unwrap();
        assert!(controller.contains("namespace Foo\\BarBundle\\Controller\\Blog;"));
        assert!(temp.path().join("Resources/config/routing/blog_post.php").exists());
        assert!(temp.path().join("Tests/Controller/Blog/PostControllerTest.php").exists());
    }
}
