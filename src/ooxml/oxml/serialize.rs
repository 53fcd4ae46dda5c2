//! Compact serialization of the arena tree.

use super::tree::{NodeData, NodeId, XmlTree};
use crate::common::xml::{escape_attr, escape_text};

/// Write element `id` and its subtree to `out`.
///
/// When `with_inherited_ns` is set, namespace declarations in scope from
/// ancestors are written on `id` so the output stands alone.
pub(crate) fn write_element(tree: &XmlTree, id: NodeId, out: &mut String, with_inherited_ns: bool) {
    let Some(data) = tree.element(id) else {
        return;
    };

    out.push('<');
    out.push_str(&data.tag);

    let inherited = if with_inherited_ns {
        tree.inherited_nsdecls(id)
    } else {
        Default::default()
    };
    for (prefix, uri) in data.nsdecls.iter().chain(inherited.iter()) {
        if prefix.is_empty() {
            out.push_str(" xmlns=\"");
        } else {
            out.push_str(" xmlns:");
            out.push_str(prefix);
            out.push_str("=\"");
        }
        out.push_str(&escape_attr(uri));
        out.push('"');
    }

    for (key, value) in &data.attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }

    let children = tree.children(id);
    if children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for &child in children {
        match &tree.node(child).data {
            NodeData::Element(_) => write_element(tree, child, out, false),
            NodeData::Text(text) => out.push_str(&escape_text(text)),
        }
    }
    out.push_str("</");
    out.push_str(&data.tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use crate::ooxml::oxml::{ElementBuilder, XmlDocument};

    #[test]
    fn test_serialize_escapes() {
        let doc = XmlDocument::from_builder(
            &ElementBuilder::new("a:t")
                .attr("name", "\"A\" & <B>")
                .text("1 < 2 & 3"),
        );
        assert_eq!(
            doc.root().xml(),
            r#"<a:t name="&quot;A&quot; &amp; &lt;B&gt;">1 &lt; 2 &amp; 3</a:t>"#
        );
    }

    #[test]
    fn test_serialize_then_parse_is_structurally_equal() {
        let doc = XmlDocument::from_builder(
            &ElementBuilder::new("p:sp")
                .nsdecls(&["p", "a"])
                .child(ElementBuilder::new("p:nvSpPr").child(
                    ElementBuilder::new("p:cNvPr").attr("id", 3).attr("name", "Oval 2"),
                ))
                .child(ElementBuilder::new("a:t").text("  padded  ")),
        );
        let reparsed = XmlDocument::parse(&doc.to_xml()).unwrap();
        assert!(doc.root().structurally_eq(&reparsed.root()));
    }
}
