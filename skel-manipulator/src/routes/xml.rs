use std::path::Path;

use quick_xml::{
    Reader, Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};
use skel_core::{Error, Result};

use super::RouteEntry;

const EMPTY_DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<routes xmlns="http://symfony.com/schema/routing" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://symfony.com/schema/routing http://symfony.com/schema/routing/routing-1.0.xsd">
</routes>
"#;

fn write_route(writer: &mut Writer<Vec<u8>>, entry: &RouteEntry) -> quick_xml::Result<()> {
    let mut route = BytesStart::new("route");
    route.push_attribute(("id", entry.name.as_str()));
    route.push_attribute(("path", entry.path.as_str()));
    writer.write_event(Event::Start(route))?;

    let mut default = BytesStart::new("default");
    default.push_attribute(("key", "_controller"));
    writer.write_event(Event::Start(default))?;
    writer.write_event(Event::Text(BytesText::new(&entry.controller)))?;
    writer.write_event(Event::End(BytesEnd::new("default")))?;

    writer.write_event(Event::End(BytesEnd::new("route")))?;
    Ok(())
}

/// Whether a `<route>` element declares the given id.
fn has_id(element: &BytesStart, name: &str) -> bool {
    element.attributes().flatten().any(|attr| {
        attr.key.as_ref() == b"id"
            && attr
                .unescape_value()
                .is_ok_and(|value| value.as_ref() == name)
    })
}

fn reject_duplicate(file: &Path, element: &BytesStart, entry: &RouteEntry) -> Result<()> {
    if has_id(element, &entry.name) {
        return Err(Box::new(Error::DuplicateRoute {
            name: entry.name.clone(),
            file: file.to_path_buf(),
        }));
    }
    Ok(())
}

pub(super) fn merge(file: &Path, current: Option<&str>, entry: &RouteEntry) -> Result<String> {
    let current = current
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(EMPTY_DOCUMENT);
    let malformed = |e: quick_xml::Error| Error::malformed_routing(file, e.to_string());

    let mut reader = Reader::from_str(current);
    reader.trim_text(true);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    let mut inserted = false;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Eof => break,
            Event::Start(e) if e.name().as_ref() == b"route" => {
                reject_duplicate(file, &e, entry)?;
                writer.write_event(Event::Start(e)).map_err(malformed)?;
            }
            Event::Empty(e) if e.name().as_ref() == b"route" => {
                reject_duplicate(file, &e, entry)?;
                writer.write_event(Event::Empty(e)).map_err(malformed)?;
            }
            Event::End(e) if e.name().as_ref() == b"routes" && !inserted => {
                write_route(&mut writer, entry).map_err(malformed)?;
                writer.write_event(Event::End(e)).map_err(malformed)?;
                inserted = true;
            }
            Event::Empty(e) if e.name().as_ref() == b"routes" && !inserted => {
                let end = e.to_end().into_owned();
                writer.write_event(Event::Start(e)).map_err(malformed)?;
                write_route(&mut writer, entry).map_err(malformed)?;
                writer.write_event(Event::End(end)).map_err(malformed)?;
                inserted = true;
            }
            event => writer.write_event(event).map_err(malformed)?,
        }
    }

    if !inserted {
        return Err(Error::malformed_routing(file, "no <routes> element found"));
    }

    let mut merged = String::from_utf8(writer.into_inner())
        .map_err(|e| Error::malformed_routing(file, e.to_string()))?;
    merged.push('\n');
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn entry(name: &str) -> RouteEntry {
        RouteEntry::new(name, "/show", "AcmeBlogModule:Post:show")
    }

    #[test]
    fn test_new_file() {
        let merged = merge(&PathBuf::from("routing.xml"), None, &entry("show")).unwrap();

        assert!(merged.starts_with("<?xml"));
        assert!(merged.contains("<routes xmlns=\"http://symfony.com/schema/routing\""));
        assert!(merged.contains(
            "    <route id=\"show\" path=\"/show\">\n        <default key=\"_controller\">AcmeBlogModule:Post:show</default>\n    </route>\n</routes>"
        ));
    }

    #[test]
    fn test_insert_into_existing_routes() {
        let current = "<?xml version=\"1.0\"?>\n<routes>\n    <route id=\"index\" path=\"/\">\n        <default key=\"_controller\">AcmeBlogModule:Post:index</default>\n    </route>\n</routes>\n";
        let merged = merge(&PathBuf::from("routing.xml"), Some(current), &entry("show")).unwrap();

        let index = merged.find("id=\"index\"").unwrap();
        let show = merged.find("id=\"show\"").unwrap();
        assert!(index < show);
        assert!(merged.trim_end().ends_with("</routes>"));
    }

    #[test]
    fn test_insert_into_empty_routes_element() {
        let merged = merge(&PathBuf::from("routing.xml"), Some("<routes/>"), &entry("show")).unwrap();
        assert!(merged.starts_with("<routes>"));
        assert!(merged.contains("<route id=\"show\" path=\"/show\">"));
        assert!(merged.trim_end().ends_with("</routes>"));
    }

    #[test]
    fn test_self_closing_route_is_preserved() {
        let current = "<routes>\n    <route id=\"index\" path=\"/\"/>\n</routes>";
        let merged = merge(&PathBuf::from("routing.xml"), Some(current), &entry("show")).unwrap();
        assert!(merged.contains("<route id=\"index\" path=\"/\"/>"));
    }

    #[test]
    fn test_duplicate_route() {
        let current = merge(&PathBuf::from("routing.xml"), None, &entry("show")).unwrap();
        let err = merge(&PathBuf::from("routing.xml"), Some(&current), &entry("show")).unwrap_err();
        assert!(matches!(*err, Error::DuplicateRoute { .. }));
    }

    #[test]
    fn test_missing_routes_element() {
        let err = merge(&PathBuf::from("routing.xml"), Some("<config/>"), &entry("show")).unwrap_err();
        assert!(matches!(*err, Error::MalformedRoutingFile { .. }));
    }
}
