//! Controller generation with views and routes per action.

use serde::Serialize;
use skel_core::{
    ActionSpec, ControllerRequest, Error, Result, TemplateFormat, naming, spec::TemplateRef,
};
use skel_manipulator::{RouteEntry, append_route, routing_file};

use crate::{Generated, RenderParameters, Renderer};

/// An action as seen by the controller templates.
#[derive(Debug, Clone, Serialize)]
pub struct ActionView {
    pub name: String,
    pub basename: String,
    pub route: String,
    /// Logical template name (`Container:Controller:file`)
    pub template: String,
    /// PHP parameter list built from the route placeholders
    pub arguments: String,
    pub test_name: String,
}

impl ActionView {
    pub fn new(request: &ControllerRequest, action: &ActionSpec) -> Self {
        let basename = action.basename().to_string();
        let template = resolve_template(request, action);
        let arguments = action
            .placeholders
            .iter()
            .map(|p| format!("${}", p))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            name: action.name.clone(),
            test_name: ucfirst(&basename),
            route: action.route.clone(),
            basename,
            template,
            arguments,
        }
    }
}

fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Logical view name of an action, synthesized for the `default` sentinel.
pub fn resolve_template(request: &ControllerRequest, action: &ActionSpec) -> String {
    match &action.template {
        TemplateRef::Default => format!(
            "{}:{}:{}.html.{}",
            request.container.name,
            request.controller,
            action.basename(),
            request.template_format.as_str()
        ),
        TemplateRef::Explicit(name) => name.clone(),
    }
}

/// View path below `Resources/views` for a logical template name.
///
/// `Container:Controller:file` maps to `Controller/file`; an empty
/// controller segment maps to `file`.
pub fn template_path(logical: &str) -> String {
    let mut parts = logical.splitn(3, ':');
    let (_, controller, file) = (parts.next(), parts.next(), parts.next());
    match (controller, file) {
        (Some(controller), Some(file)) if !controller.is_empty() => {
            format!("{}/{}", controller, file)
        }
        (_, Some(file)) => file.to_string(),
        (Some(only), None) => only.to_string(),
        (None, None) => logical.to_string(),
    }
}

fn view_template(format: TemplateFormat) -> &'static str {
    match format {
        TemplateFormat::Twig => "controller/Template.html.twig.twig",
        TemplateFormat::Php => "controller/Template.html.php.twig",
    }
}

#[derive(Serialize)]
struct FormatView {
    routing: &'static str,
    templating: &'static str,
}

pub fn generate(request: &ControllerRequest, renderer: &Renderer) -> Result<Generated> {
    let container = &request.container;
    let controller_file = container.join(format!("Controller/{}Controller.php", request.controller));
    if controller_file.exists() {
        return Err(Box::new(Error::ControllerAlreadyExists {
            controller: request.controller.clone(),
            path: controller_file,
        }));
    }

    let mut generated = Generated::default();
    let actions: Vec<ActionView> = request
        .actions
        .values()
        .map(|action| ActionView::new(request, action))
        .collect();

    let routes = routing_file(&container.path, request.routing_format);
    for action in &actions {
        let params = RenderParameters::new()
            .with("container", &container.name)
            .with("controller", &request.controller)
            .with("action", action);
        let view = container
            .join("Resources/views")
            .join(template_path(&action.template));
        generated.file(renderer.render_file(view_template(request.template_format), &view, &params)?);

        if let Some(routes) = &routes {
            let entry = RouteEntry::new(
                naming::to_snake_case(&action.basename),
                &action.route,
                format!("{}:{}:{}", container.name, request.controller, action.basename),
            );
            if append_route(routes, request.routing_format, &entry)? {
                generated.routing_file(routes);
            }
        }
    }

    let params = RenderParameters::new()
        .with("namespace", &container.namespace)
        .with("container", &container.name)
        .with("controller", &request.controller)
        .with(
            "format",
            FormatView {
                routing: request.routing_format.as_str(),
                templating: request.template_format.as_str(),
            },
        )
        .with("actions", &actions);

    generated.file(renderer.render_file("controller/Controller.php.twig", &controller_file, &params)?);

    let test = container.join(format!(
        "Tests/Controller/{}ControllerTest.php",
        request.controller
    ));
    generated.file(renderer.render_file("controller/ControllerTest.php.twig", &test, &params)?);

    tracing::info!(
        controller = %request.controller,
        actions = actions.len(),
        "controller generated"
    );
    Ok(generated)
}
