//! Owned element templates.
//!
//! New shapes are assembled as [`ElementBuilder`] trees and then grafted
//! into a document in one step, so attribute values are always escaped on
//! output and a half-built fragment is never visible in the tree.

use super::ns;
use super::tree::AttrList;

/// A node of an owned template tree.
#[derive(Debug, Clone, PartialEq)]
pub enum BuilderNode {
    Element(ElementBuilder),
    Text(String),
}

/// Owned element with attributes, namespace declarations and children.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementBuilder {
    pub(crate) tag: String,
    pub(crate) attrs: AttrList,
    pub(crate) nsdecls: AttrList,
    pub(crate) children: Vec<BuilderNode>,
}

impl ElementBuilder {
    /// Start an element with qualified name `tag`, e.g. `"p:sp"`.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: AttrList::new(),
            nsdecls: AttrList::new(),
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Set attribute `name`, replacing an earlier value.
    pub fn attr(mut self, name: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
        self
    }

    /// Set attribute `name` only when `value` is present.
    pub fn opt_attr<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Declare the well-known namespaces for `prefixes` on this element.
    ///
    /// Unknown prefixes are ignored.
    pub fn nsdecls(mut self, prefixes: &[&str]) -> Self {
        for prefix in prefixes {
            if let Some(uri) = ns::nsuri(prefix)
                && !self.nsdecls.iter().any(|(p, _)| p == prefix)
            {
                self.nsdecls.push((prefix.to_string(), uri.to_string()));
            }
        }
        self
    }

    pub(crate) fn nsdecl(mut self, prefix: &str, uri: &str) -> Self {
        if !self.nsdecls.iter().any(|(p, _)| p == prefix) {
            self.nsdecls.push((prefix.to_string(), uri.to_string()));
        }
        self
    }

    pub fn child(mut self, child: ElementBuilder) -> Self {
        self.children.push(BuilderNode::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ElementBuilder>) -> Self {
        self.children
            .extend(children.into_iter().map(BuilderNode::Element));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(BuilderNode::Text(text.into()));
        self
    }

    /// Value of attribute `name` on this template element.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Element children of this template.
    pub fn element_children(&self) -> impl Iterator<Item = &ElementBuilder> {
        self.children.iter().filter_map(|child| match child {
            BuilderNode::Element(e) => Some(e),
            BuilderNode::Text(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_replaces_existing() {
        let b = ElementBuilder::new("p:cNvPr").attr("id", 1).attr("id", 2);
        assert_eq!(b.get_attr("id"), Some("2"));
        assert_eq!(b.attrs.len(), 1);
    }

    #[test]
    fn test_opt_attr_and_children() {
        let b = ElementBuilder::new("a:xfrm")
            .opt_attr("flipH", Some(1))
            .opt_attr::<u8>("flipV", None)
            .child(ElementBuilder::new("a:off"))
            .child(ElementBuilder::new("a:ext"));
        assert_eq!(b.get_attr("flipH"), Some("1"));
        assert_eq!(b.get_attr("flipV"), None);
        let tags: Vec<&str> = b.element_children().map(|c| c.tag()).collect();
        assert_eq!(tags, vec!["a:off", "a:ext"]);
    }

    #[test]
    fn test_nsdecls_known_prefixes_only() {
        let b = ElementBuilder::new("p:sp").nsdecls(&["p", "a", "zz", "p"]);
        assert_eq!(b.nsdecls.len(), 2);
    }
}
