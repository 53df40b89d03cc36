//! Built-in skeleton templates and override directory lookup.

use std::path::{Path, PathBuf};

/// Directory, relative to a container or project root, that overrides the built-ins.
pub const OVERRIDE_DIR: &str = "Resources/skeleton";

macro_rules! skeleton {
    ($($name:literal),* $(,)?) => {
        &[$(($name, include_str!(concat!("../skeleton/", $name)))),*]
    };
}

/// Templates compiled into the binary, keyed by their id.
const BUILTIN: &[(&str, &str)] = skeleton![
    "controller/Controller.php.twig",
    "controller/ControllerTest.php.twig",
    "controller/Template.html.php.twig",
    "controller/Template.html.twig.twig",
    "crud/config/routing.php.twig",
    "crud/config/routing.xml.twig",
    "crud/config/routing.yml.twig",
    "crud/controller.php.twig",
    "crud/tests/test.php.twig",
    "crud/views/edit.html.twig.twig",
    "crud/views/index.html.twig.twig",
    "crud/views/new.html.twig.twig",
    "crud/views/show.html.twig.twig",
    "entity/Entity.php.twig",
    "entity/Repository.php.twig",
    "entity/mapping.orm.php.twig",
    "entity/mapping.orm.xml.twig",
    "entity/mapping.orm.yml.twig",
    "form/FormType.php.twig",
    "module/DefaultController.php.twig",
    "module/DefaultControllerTest.php.twig",
    "module/Installer.php.twig",
    "module/LICENSE-LGPL.twig",
    "module/LICENSE-MIT.twig",
    "module/Module.php.twig",
    "module/README.md.twig",
    "module/composer.json.twig",
    "module/gitignore.twig",
    "module/index.html.twig.twig",
    "module/messages.pot.twig",
    "module/phpunit.xml.dist.twig",
    "module/routing.php.twig",
    "module/routing.xml.twig",
    "module/routing.yml.twig",
    "module/services.php.twig",
    "module/services.xml.twig",
    "module/services.yml.twig",
];

/// Source of a built-in template.
pub fn builtin(name: &str) -> Option<&'static str> {
    BUILTIN
        .iter()
        .find(|(id, _)| *id == name)
        .map(|(_, source)| *source)
}

/// Ids of all built-in templates.
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTIN.iter().map(|(id, _)| *id)
}

/// Template roots for a generation, most specific first.
///
/// Order: `<container>/Resources/skeleton`, the configured `extra`
/// directories, `<project root>/Resources/skeleton`. Only existing
/// directories are returned; the built-ins are implied after the last one.
pub fn skeleton_dirs(container_path: &Path, project_root: &Path, extra: &[PathBuf]) -> Vec<PathBuf> {
    let candidates = std::iter::once(container_path.join(OVERRIDE_DIR))
        .chain(extra.iter().cloned())
        .chain(std::iter::once(project_root.join(OVERRIDE_DIR)));

    let mut dirs: Vec<PathBuf> = Vec::new();
    for dir in candidates {
        if dir.is_dir() && !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    dirs
}
