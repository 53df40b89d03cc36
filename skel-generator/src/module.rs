//! Module skeleton generation.

use std::path::Path;

use skel_core::{
    Error, Format, License, ModuleRequest, Result,
    file::{self, TargetState},
    naming,
};

use crate::{Generated, RenderParameters, Renderer};

/// Templates rendered for every module, with their target path.
const FILES: &[(&str, &str)] = &[
    ("module/composer.json.twig", "composer.json"),
    ("module/Installer.php.twig", "Installer.php"),
    ("module/README.md.twig", "README.md"),
    ("module/phpunit.xml.dist.twig", "phpunit.xml.dist"),
    ("module/gitignore.twig", ".gitignore"),
    ("module/DefaultController.php.twig", "Controller/DefaultController.php"),
    (
        "module/DefaultControllerTest.php.twig",
        "Tests/Controller/DefaultControllerTest.php",
    ),
    (
        "module/index.html.twig.twig",
        "Resources/views/Default/index.html.twig",
    ),
];

const PUBLIC_DIRS: &[&str] = &[
    "Resources/public/css",
    "Resources/public/images",
    "Resources/public/js",
];

fn license_template(license: License) -> &'static str {
    match license {
        License::Mit => "module/LICENSE-MIT.twig",
        License::Lgpl => "module/LICENSE-LGPL.twig",
    }
}

/// Extension of the service definitions file; annotation modules use XML.
fn services_extension(format: Format) -> &'static str {
    format.extension().unwrap_or("xml")
}

/// Refuse to generate into a path that is a file, a non-empty directory or
/// a read-only directory.
fn check_target(target: &Path) -> Result<()> {
    let error = match file::inspect_target(target)? {
        TargetState::Missing | TargetState::Empty { writable: true } => return Ok(()),
        TargetState::File => Error::NotADirectory {
            path: file::display_path(target),
        },
        TargetState::NotEmpty => Error::TargetNotEmpty {
            path: file::display_path(target),
        },
        TargetState::Empty { writable: false } => Error::PermissionDenied {
            path: file::display_path(target),
        },
    };
    Err(Box::new(error))
}

pub fn parameters(request: &ModuleRequest) -> RenderParameters {
    let basename = naming::basename(&request.container);
    RenderParameters::new()
        .with("namespace", &request.namespace)
        .with("vendor", naming::vendor(&request.namespace))
        .with("container", &request.container)
        .with("namespace_double", naming::double_backslashes(&request.namespace))
        .with("container_double", naming::double_backslashes(&request.container))
        .with("namespace_path", naming::namespace_to_path(&request.namespace))
        .with("format", request.format.as_str())
        .with("basename", basename)
        .with("extension_alias", naming::underscore(basename))
        .with("license", request.license.as_str())
}

pub fn generate(request: &ModuleRequest, renderer: &Renderer) -> Result<Generated> {
    let target = request
        .dir
        .join(naming::namespace_to_path(&request.namespace));
    check_target(&target)?;

    let params = parameters(request);
    let mut generated = Generated::default();

    let main_class = format!("{}.php", request.container);
    generated.file(renderer.render_file("module/Module.php.twig", &target.join(main_class), &params)?);

    for (template, relative) in FILES {
        generated.file(renderer.render_file(template, &target.join(relative), &params)?);
    }

    generated.file(renderer.render_file(
        license_template(request.license),
        &target.join("LICENSE.md"),
        &params,
    )?);

    let locale = format!("Resources/locale/{}.pot", request.container.to_lowercase());
    generated.file(renderer.render_file("module/messages.pot.twig", &target.join(locale), &params)?);

    let doc = target.join("Resources/doc/index.rst");
    file::touch(&doc)?;
    generated.file(doc);

    for dir in PUBLIC_DIRS {
        let path = target.join(dir);
        file::create_dir_all(&path)?;
        generated.directory(path);
    }

    if let Some(ext) = request.format.extension() {
        let template = format!("module/routing.{}.twig", ext);
        let routing = target.join(format!("Resources/config/routing.{}", ext));
        generated.file(renderer.render_file(&template, &routing, &params)?);
    }

    let ext = services_extension(request.format);
    let template = format!("module/services.{}.twig", ext);
    let services = target.join(format!("Resources/config/services.{}", ext));
    generated.file(renderer.render_file(&template, &services, &params)?);

    tracing::info!(module = %request.container, path = %target.display(), "module generated");
    Ok(generated)
}
