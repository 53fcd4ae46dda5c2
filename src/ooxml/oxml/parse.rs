//! quick-xml reader feeding the arena tree.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::ns::{canonical_prefix, local_name, prefix_of};
use super::tree::{AttrList, NodeId, XmlTree};
use crate::common::xml::{resolve_entity, unescape_xml};
use crate::ooxml::error::{OoxmlError, Result};

/// Namespace bindings of the open elements, innermost last.
#[derive(Default)]
struct NsScopes {
    frames: Vec<AttrList>,
}

impl NsScopes {
    fn resolve(&self, prefix: &str) -> Option<&str> {
        self.frames
            .iter()
            .rev()
            .find_map(|decls| decls.iter().rev().find(|(p, _)| p == prefix))
            .map(|(_, uri)| uri.as_str())
    }
}

/// Parse a complete document into a fresh tree.
///
/// Whitespace-only text is dropped except inside `t` elements (`a:t`,
/// `c:t`), where it is content.
///
/// Elements and attributes of the PresentationML, DrawingML, chart and
/// relationship namespaces are stored under their usual prefixes (`p:`,
/// `a:`, `c:`, `r:`) whatever prefix the document binds them to; the
/// usual prefix is declared next to the document's own.
pub(crate) fn parse_tree(xml: &str) -> Result<XmlTree> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut tree = XmlTree::new();
    let mut stack: Vec<NodeId> = Vec::new();
    let mut scopes = NsScopes::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let id = open_element(&mut tree, &stack, &mut scopes, e)?;
                stack.push(id);
            },
            Ok(Event::Empty(ref e)) => {
                open_element(&mut tree, &stack, &mut scopes, e)?;
                scopes.frames.pop();
            },
            Ok(Event::End(_)) => {
                stack.pop();
                scopes.frames.pop();
            },
            Ok(Event::Text(ref t)) => {
                let raw = std::str::from_utf8(t)
                    .map_err(|_| OoxmlError::Xml("Invalid UTF-8 in text content".to_string()))?;
                push_text(&mut tree, &stack, &unescape_xml(raw));
            },
            Ok(Event::CData(ref t)) => {
                let raw = std::str::from_utf8(t)
                    .map_err(|_| OoxmlError::Xml("Invalid UTF-8 in CDATA section".to_string()))?;
                push_text(&mut tree, &stack, raw);
            },
            Ok(Event::GeneralRef(ref r)) => {
                let name = std::str::from_utf8(r)
                    .map_err(|_| OoxmlError::Xml("Invalid UTF-8 in reference".to_string()))?;
                let ch = resolve_entity(name)
                    .ok_or_else(|| OoxmlError::Xml(format!("Unknown entity reference &{};", name)))?;
                push_text(&mut tree, &stack, ch.encode_utf8(&mut [0u8; 4]));
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
    }

    if !stack.is_empty() {
        return Err(OoxmlError::Xml("Unexpected end of document".to_string()));
    }
    if tree.root().is_none() {
        return Err(OoxmlError::Xml("Document has no root element".to_string()));
    }
    Ok(tree)
}

/// `qname` under the usual prefix of its namespace. `None` when it already
/// has it, the namespace is not a known one, or the usual prefix is bound
/// to something else here.
fn canonical_name(scopes: &NsScopes, qname: &str, is_element: bool) -> Option<String> {
    let prefix = match prefix_of(qname) {
        Some(prefix) => prefix,
        None if is_element => "",
        None => return None,
    };
    let uri = scopes.resolve(prefix)?;
    let canonical = canonical_prefix(uri)?;
    if canonical == prefix || scopes.resolve(canonical) != Some(uri) {
        return None;
    }
    Some(format!("{}:{}", canonical, local_name(qname)))
}

fn open_element(
    tree: &mut XmlTree,
    stack: &[NodeId],
    scopes: &mut NsScopes,
    e: &BytesStart<'_>,
) -> Result<NodeId> {
    let tag = std::str::from_utf8(e.name().as_ref())
        .map_err(|_| OoxmlError::Xml("Invalid UTF-8 in tag name".to_string()))?
        .to_string();

    let mut attrs = AttrList::new();
    let mut nsdecls = AttrList::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|_| OoxmlError::Xml("Invalid UTF-8 in attribute key".to_string()))?;
        let raw = std::str::from_utf8(&attr.value)
            .map_err(|_| OoxmlError::Xml("Invalid UTF-8 in attribute value".to_string()))?;
        let value = unescape_xml(raw);

        if key == "xmlns" {
            nsdecls.push((String::new(), value));
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            nsdecls.push((prefix.to_string(), value));
        } else {
            attrs.push((key.to_string(), value));
        }
    }

    let aliases: Vec<(&'static str, String)> = nsdecls
        .iter()
        .filter_map(|(prefix, uri)| {
            let canonical = canonical_prefix(uri)?;
            (canonical != prefix.as_str()).then(|| (canonical, uri.clone()))
        })
        .collect();
    scopes.frames.push(nsdecls.clone());
    for (prefix, uri) in aliases {
        if scopes.resolve(prefix).is_none() {
            nsdecls.push((prefix.to_string(), uri.clone()));
            if let Some(frame) = scopes.frames.last_mut() {
                frame.push((prefix.to_string(), uri));
            }
        }
    }

    let tag = canonical_name(scopes, &tag, true).unwrap_or(tag);
    for (key, _) in attrs.iter_mut() {
        if let Some(name) = canonical_name(scopes, key, false) {
            *key = name;
        }
    }

    let id = tree.new_element(&tag, attrs, nsdecls);
    match stack.last() {
        Some(&parent) => tree.append(parent, id),
        None if tree.root().is_none() => tree.set_root(id),
        None => return Err(OoxmlError::Xml("Multiple root elements".to_string())),
    }
    Ok(id)
}

fn push_text(tree: &mut XmlTree, stack: &[NodeId], text: &str) {
    let Some(&parent) = stack.last() else {
        return;
    };
    if text.trim().is_empty() && local_name(tree.tag(parent)) != "t" {
        return;
    }
    // Merge with a preceding text node so entity references do not split
    // character data.
    if let Some(&last) = tree.children(parent).last()
        && !tree.is_element(last)
    {
        tree.extend_text(last, text);
        return;
    }
    let node = tree.new_text(text);
    tree.append(parent, node);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_structure() {
        let tree = parse_tree(
            r#"<?xml version="1.0"?>
<p:spTree xmlns:p="urn:p">
  <p:sp><p:nvSpPr/></p:sp>
  <p:pic/>
</p:spTree>"#,
        )
        .unwrap();
        let root = tree.root().unwrap();
        assert_eq!(tree.tag(root), "p:spTree");
        // Indentation whitespace is not kept
        assert_eq!(tree.children(root).len(), 2);
        assert_eq!(tree.lookup_namespace(root, "p"), Some("urn:p"));
    }

    #[test]
    fn test_parse_text_and_entities() {
        let tree = parse_tree(r#"<a:p><a:t> A &amp; B </a:t><a:t>   </a:t></a:p>"#).unwrap();
        let root = tree.root().unwrap();
        let ts: Vec<NodeId> = tree.element_children(root).collect();
        assert_eq!(tree.text(ts[0]), " A & B ");
        assert_eq!(tree.text(ts[1]), "   ");
    }

    #[test]
    fn test_parse_attribute_unescape() {
        let tree = parse_tree(r#"<p:cNvPr name="Q1 &amp; &quot;Q2&quot;"/>"#).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(tree.attr(root, "name"), Some("Q1 & \"Q2\""));
    }

    #[test]
    fn test_known_namespaces_get_usual_prefixes() {
        let tree = parse_tree(
            r#"<pml:spTree xmlns:pml="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:rel="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><pml:pic><x:blip xmlns:x="urn:x" rel:embed="rId2"/></pml:pic><graphic xmlns="http://schemas.openxmlformats.org/drawingml/2006/main"/></pml:spTree>"#,
        )
        .unwrap();
        let root = tree.root().unwrap();
        assert_eq!(tree.tag(root), "p:spTree");
        assert_eq!(
            tree.lookup_namespace(root, "p"),
            Some("http://schemas.openxmlformats.org/presentationml/2006/main")
        );
        let children: Vec<NodeId> = tree.element_children(root).collect();
        assert_eq!(tree.tag(children[0]), "p:pic");
        assert_eq!(tree.tag(children[1]), "a:graphic");
        let blip = tree.element_children(children[0]).next().unwrap();
        assert_eq!(tree.tag(blip), "x:blip");
        assert_eq!(tree.attr(blip, "r:embed"), Some("rId2"));
    }

    #[test]
    fn test_usual_prefix_bound_elsewhere_is_left_alone() {
        let tree = parse_tree(
            r#"<p:root xmlns:p="urn:p"><pml:sp xmlns:pml="http://schemas.openxmlformats.org/presentationml/2006/main"/></p:root>"#,
        )
        .unwrap();
        let root = tree.root().unwrap();
        let sp = tree.element_children(root).next().unwrap();
        assert_eq!(tree.tag(root), "p:root");
        assert_eq!(tree.tag(sp), "pml:sp");
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_tree("").is_err());
        assert!(parse_tree("<a><b></a>").is_err());
        assert!(parse_tree("<a/><b/>").is_err());
    }
}
