//! End-to-end edits of routing files on disk.

use skel_core::{Error, Format};
use skel_manipulator::{RouteEntry, RoutingManipulator, append_route, routing_file};
use tempfile::TempDir;

#[test]
fn merging_the_same_container_twice_fails_without_changes() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("routing.yml");
    std::fs::write(&file, "# application routes\n").unwrap();

    RoutingManipulator::new(&file)
        .add_resource("AcmeBlogModule", Format::Yaml, "/", "routing")
        .unwrap();
    let after_first = std::fs::read_to_string(&file).unwrap();
    assert!(after_first.starts_with("acme_blog:\n"));
    assert!(after_first.ends_with("\n# application routes\n"));

    let err = RoutingManipulator::new(&file)
        .add_resource("AcmeBlogModule", Format::Yaml, "/", "routing")
        .unwrap_err();
    assert!(matches!(*err, Error::DuplicateImport { .. }));
    assert_eq!(std::fs::read_to_string(&file).unwrap(), after_first);
}

#[test]
fn routes_accumulate_in_every_format() {
    let temp = TempDir::new().unwrap();

    for format in [Format::Yaml, Format::Xml, Format::Php] {
        let file = routing_file(temp.path(), format).unwrap();
        for (name, path) in [("index", "/"), ("show", "/{id}")] {
            let entry = RouteEntry::new(name, path, format!("AcmeBlogModule:Post:{}", name));
            assert!(append_route(&file, format, &entry).unwrap());
        }

        let content = std::fs::read_to_string(&file).unwrap();
        let index = content.find("index").unwrap();
        let show = content.find("show").unwrap();
        assert!(index < show, "{} routes out of order:\n{}", format, content);
        assert!(content.contains("AcmeBlogModule:Post:show"));
    }
}

#[test]
fn duplicate_route_leaves_file_unchanged() {
    let temp = TempDir::new().unwrap();

    for format in [Format::Yaml, Format::Xml, Format::Php] {
        let file = routing_file(temp.path(), format).unwrap();
        let entry = RouteEntry::new("show", "/show", "AcmeBlogModule:Post:show");
        append_route(&file, format, &entry).unwrap();
        let before = std::fs::read_to_string(&file).unwrap();

        let err = append_route(&file, format, &entry).unwrap_err();
        assert!(matches!(*err, Error::DuplicateRoute { .. }), "{}", format);
        assert_eq!(std::fs::read_to_string(&file).unwrap(), before);
    }
}

#[test]
fn annotation_routes_do_not_touch_the_filesystem() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("Resources/config/routing.yml");

    let entry = RouteEntry::new("show", "/show", "AcmeBlogModule:Post:show");
    assert!(!append_route(&file, Format::Annotation, &entry).unwrap());
    assert!(!file.exists());
}

#[test]
fn malformed_php_routing_file_is_reported() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("routing.php");
    std::fs::write(&file, "<?php\n\nreturn [];\n").unwrap();

    let entry = RouteEntry::new("show", "/show", "AcmeBlogModule:Post:show");
    let err = append_route(&file, Format::Php, &entry).unwrap_err();
    assert!(matches!(*err, Error::MalformedRoutingFile { .. }));
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "<?php\n\nreturn [];\n");
}

#[test]
fn truncated_php_routing_file_is_reported_not_panicked_on() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("routing.php");
    let content = "<?php\n$c = new RouteCollection();\n$c->add('é";
    std::fs::write(&file, content).unwrap();

    let entry = RouteEntry::new("show", "/show", "AcmeBlogModule:Post:show");
    let err = append_route(&file, Format::Php, &entry).unwrap_err();
    assert!(matches!(*err, Error::MalformedRoutingFile { .. }));
    assert_eq!(std::fs::read_to_string(&file).unwrap(), content);
}
