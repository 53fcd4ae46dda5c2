//! Shared XML documents and element handles.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::builder::{BuilderNode, ElementBuilder};
use super::tree::{NodeData, NodeId, XmlTree};
use super::{parse, serialize};
use crate::ooxml::error::{OoxmlError, Result};

/// An XML document shared between all handles into it.
///
/// Cloning is cheap and yields another handle to the same tree.
///
/// Nodes live in an arena for the lifetime of the document. Removing an
/// element detaches it from its parent without freeing it, so every
/// [`XmlElement`] handle stays valid, and a detached subtree keeps its
/// memory until the document is dropped. A document that is edited
/// many times grows accordingly; reparse [`to_xml`](Self::to_xml) to get
/// a compact copy.
#[derive(Clone)]
pub struct XmlDocument {
    inner: Arc<RwLock<XmlTree>>,
    root: NodeId,
}

impl XmlDocument {
    /// Parse `xml` into a new document.
    ///
    /// # Examples
    ///
    /// ```
    /// use pptx_shapetree::ooxml::oxml::XmlDocument;
    ///
    /// let doc = XmlDocument::parse(r#"<p:spTree xmlns:p="urn:p"><p:sp/></p:spTree>"#).unwrap();
    /// assert_eq!(doc.root().tag(), "p:spTree");
    /// assert_eq!(doc.root().children().len(), 1);
    /// ```
    pub fn parse(xml: &str) -> Result<Self> {
        Self::from_tree(parse::parse_tree(xml)?)
    }

    /// Create a document whose root is built from `builder`.
    pub fn from_builder(builder: &ElementBuilder) -> Self {
        let mut tree = XmlTree::new();
        let root = graft(&mut tree, builder);
        tree.set_root(root);
        Self {
            inner: Arc::new(RwLock::new(tree)),
            root,
        }
    }

    fn from_tree(tree: XmlTree) -> Result<Self> {
        let root = tree
            .root()
            .ok_or_else(|| OoxmlError::Xml("document has no root element".to_string()))?;
        Ok(Self {
            inner: Arc::new(RwLock::new(tree)),
            root,
        })
    }

    /// The document element.
    pub fn root(&self) -> XmlElement {
        XmlElement {
            doc: self.clone(),
            id: self.root,
        }
    }

    /// Serialize the whole document, XML declaration included.
    pub fn to_xml(&self) -> String {
        let tree = self.read();
        let mut out =
            String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        serialize::write_element(&tree, self.root, &mut out, false);
        out
    }

    /// `true` when both handles address the same document.
    #[inline]
    pub fn ptr_eq(&self, other: &XmlDocument) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    #[inline]
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, XmlTree> {
        self.inner.read()
    }

    #[inline]
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, XmlTree> {
        self.inner.write()
    }

    fn handle(&self, id: NodeId) -> XmlElement {
        XmlElement {
            doc: self.clone(),
            id,
        }
    }
}

impl PartialEq for XmlDocument {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for XmlDocument {}

impl fmt::Debug for XmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlDocument")
            .field("root", &self.read().tag(self.root))
            .finish()
    }
}

/// Handle to one element of an [`XmlDocument`].
///
/// Equality is identity: two handles are equal when they address the same
/// node of the same document.
#[derive(Clone)]
pub struct XmlElement {
    doc: XmlDocument,
    id: NodeId,
}

impl PartialEq for XmlElement {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.doc.ptr_eq(&other.doc)
    }
}

impl Eq for XmlElement {}

impl Hash for XmlElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.doc.inner) as *const () as usize).hash(state);
        self.id.hash(state);
    }
}

impl fmt::Debug for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> ({:?})", self.tag(), self.id)
    }
}

impl XmlElement {
    #[inline]
    pub fn document(&self) -> &XmlDocument {
        &self.doc
    }

    #[inline]
    pub fn node_id(&self) -> NodeId {
        self.id
    }

    /// Root element of the owning document.
    pub fn root(&self) -> XmlElement {
        self.doc.root()
    }

    /// Qualified tag name, e.g. `"p:sp"`.
    pub fn tag(&self) -> String {
        self.doc.read().tag(self.id).to_string()
    }

    #[inline]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.doc.read().tag(self.id) == tag
    }

    pub fn local_name(&self) -> String {
        super::ns::local_name(self.doc.read().tag(self.id)).to_string()
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.doc.read().attr(self.id, name).map(str::to_string)
    }

    /// Attribute `name` parsed as `T`, `None` when absent or unparseable.
    pub fn parse_attr<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        self.doc.read().attr(self.id, name)?.parse().ok()
    }

    pub fn set_attr(&self, name: &str, value: impl ToString) {
        self.doc.write().set_attr(self.id, name, &value.to_string());
    }

    pub fn remove_attr(&self, name: &str) -> Option<String> {
        self.doc.write().remove_attr(self.id, name)
    }

    /// Concatenated direct text content.
    pub fn text(&self) -> String {
        self.doc.read().text(self.id)
    }

    pub fn set_text(&self, text: &str) {
        self.doc.write().set_text(self.id, text);
    }

    pub fn parent(&self) -> Option<XmlElement> {
        let parent = self.doc.read().parent(self.id)?;
        Some(self.doc.handle(parent))
    }

    /// Element children in document order.
    pub fn children(&self) -> Vec<XmlElement> {
        let ids: Vec<NodeId> = self.doc.read().element_children(self.id).collect();
        ids.into_iter().map(|id| self.doc.handle(id)).collect()
    }

    pub fn first_element_child(&self) -> Option<XmlElement> {
        let id = self.doc.read().element_children(self.id).next()?;
        Some(self.doc.handle(id))
    }

    /// First element child with qualified name `tag`.
    pub fn find(&self, tag: &str) -> Option<XmlElement> {
        let id = self.doc.read().first_child_with_tag(self.id, tag)?;
        Some(self.doc.handle(id))
    }

    /// All element children with qualified name `tag`.
    pub fn find_all(&self, tag: &str) -> Vec<XmlElement> {
        let ids: Vec<NodeId> = {
            let tree = self.doc.read();
            tree.element_children(self.id)
                .filter(|&c| tree.tag(c) == tag)
                .collect()
        };
        ids.into_iter().map(|id| self.doc.handle(id)).collect()
    }

    /// Follow a path of child tags, taking the first match at each step.
    ///
    /// A `"*"` segment matches any element.
    pub fn find_path(&self, path: &[&str]) -> Option<XmlElement> {
        let id = {
            let tree = self.doc.read();
            let mut current = self.id;
            for step in path {
                current = if *step == "*" {
                    tree.element_children(current).next()?
                } else {
                    tree.first_child_with_tag(current, step)?
                };
            }
            current
        };
        Some(self.doc.handle(id))
    }

    /// Element descendants in document order, excluding `self`.
    pub fn descendants(&self) -> Vec<XmlElement> {
        let ids = self.doc.read().descendants(self.id);
        ids.into_iter().map(|id| self.doc.handle(id)).collect()
    }

    /// Element descendants with qualified name `tag`, in document order.
    pub fn descendants_with_tag(&self, tag: &str) -> Vec<XmlElement> {
        let ids: Vec<NodeId> = {
            let tree = self.doc.read();
            tree.descendants(self.id)
                .into_iter()
                .filter(|&d| tree.tag(d) == tag)
                .collect()
        };
        ids.into_iter().map(|id| self.doc.handle(id)).collect()
    }

    /// Values of attribute `attr` on every descendant named `tag`.
    pub fn descendant_attr_values(&self, tag: &str, attr: &str) -> Vec<String> {
        let tree = self.doc.read();
        tree.descendants(self.id)
            .into_iter()
            .filter(|&d| tree.tag(d) == tag)
            .filter_map(|d| tree.attr(d, attr).map(str::to_string))
            .collect()
    }

    /// First element child at raw child position `pos` or later, together
    /// with its raw position.
    ///
    /// Used for iteration that must observe children appended between
    /// steps.
    pub fn element_child_from(&self, pos: usize) -> Option<(usize, XmlElement)> {
        let (index, id) = {
            let tree = self.doc.read();
            tree.children(self.id)
                .iter()
                .enumerate()
                .skip(pos)
                .find(|&(_, &c)| tree.is_element(c))
                .map(|(i, &c)| (i, c))?
        };
        Some((index, self.doc.handle(id)))
    }

    /// Append a new child built from `builder` and return it.
    pub fn append(&self, builder: &ElementBuilder) -> XmlElement {
        let mut tree = self.doc.write();
        let child = graft(&mut tree, builder);
        tree.append(self.id, child);
        tree.prune_redundant_nsdecls(child, self.id);
        drop(tree);
        self.doc.handle(child)
    }

    /// Insert a new child built from `builder` before the first existing
    /// child whose tag is in `successors`, or append when there is none.
    pub fn insert_before_any(&self, builder: &ElementBuilder, successors: &[&str]) -> XmlElement {
        let mut tree = self.doc.write();
        let index = tree
            .children(self.id)
            .iter()
            .position(|&c| tree.is_element(c) && successors.contains(&tree.tag(c)))
            .unwrap_or_else(|| tree.children(self.id).len());
        let child = graft(&mut tree, builder);
        tree.insert(self.id, index, child);
        tree.prune_redundant_nsdecls(child, self.id);
        drop(tree);
        self.doc.handle(child)
    }

    /// Existing child `tag`, or a new empty one inserted at its schema
    /// position (before any of `successors`).
    pub fn get_or_insert(&self, tag: &str, successors: &[&str]) -> XmlElement {
        match self.find(tag) {
            Some(existing) => existing,
            None => self.insert_before_any(&ElementBuilder::new(tag), successors),
        }
    }

    /// Insert a new sibling built from `builder` directly after `self`.
    ///
    /// Fails when `self` is the document root.
    pub fn add_next_sibling(&self, builder: &ElementBuilder) -> Result<XmlElement> {
        let mut tree = self.doc.write();
        let parent = tree
            .parent(self.id)
            .ok_or_else(|| OoxmlError::InvalidArgument("element has no parent".to_string()))?;
        let index = tree.position(self.id).map_or(0, |p| p + 1);
        let child = graft(&mut tree, builder);
        tree.insert(parent, index, child);
        tree.prune_redundant_nsdecls(child, parent);
        drop(tree);
        Ok(self.doc.handle(child))
    }

    /// Detach `self` from its parent. The handle stays usable.
    pub fn remove(&self) {
        self.doc.write().detach(self.id);
    }

    /// Remove every child element named `tag`.
    pub fn remove_all(&self, tag: &str) {
        for child in self.find_all(tag) {
            child.remove();
        }
    }

    /// Owned deep copy of this element's subtree.
    pub fn to_builder(&self) -> ElementBuilder {
        extract(&self.doc.read(), self.id)
    }

    /// Serialize this subtree. Namespace declarations inherited from
    /// ancestors are repeated on the subtree root.
    pub fn xml(&self) -> String {
        let tree = self.doc.read();
        let mut out = String::new();
        serialize::write_element(&tree, self.id, &mut out, true);
        out
    }

    /// Compare tag, attribute set, text and element children recursively.
    ///
    /// Namespace declarations and attribute order are ignored.
    pub fn structurally_eq(&self, other: &XmlElement) -> bool {
        self.to_builder().structurally_eq(&other.to_builder())
    }
}

impl ElementBuilder {
    /// Structural comparison, see [`XmlElement::structurally_eq`].
    pub fn structurally_eq(&self, other: &ElementBuilder) -> bool {
        if self.tag != other.tag || self.attrs.len() != other.attrs.len() {
            return false;
        }
        let attrs_match = self
            .attrs
            .iter()
            .all(|(key, value)| other.get_attr(key) == Some(value.as_str()));
        if !attrs_match || text_of(self) != text_of(other) {
            return false;
        }
        let mine: Vec<&ElementBuilder> = self.element_children().collect();
        let theirs: Vec<&ElementBuilder> = other.element_children().collect();
        mine.len() == theirs.len()
            && mine
                .iter()
                .zip(theirs.iter())
                .all(|(a, b)| a.structurally_eq(b))
    }
}

fn text_of(builder: &ElementBuilder) -> String {
    builder
        .children
        .iter()
        .filter_map(|c| match c {
            BuilderNode::Text(t) => Some(t.as_str()),
            BuilderNode::Element(_) => None,
        })
        .collect()
}

/// Copy `builder` into `tree` as a detached subtree.
fn graft(tree: &mut XmlTree, builder: &ElementBuilder) -> NodeId {
    let id = tree.new_element(&builder.tag, builder.attrs.clone(), builder.nsdecls.clone());
    for child in &builder.children {
        let node = match child {
            BuilderNode::Element(e) => graft(tree, e),
            BuilderNode::Text(t) => tree.new_text(t),
        };
        tree.append(id, node);
    }
    id
}

fn extract(tree: &XmlTree, id: NodeId) -> ElementBuilder {
    let Some(data) = tree.element(id) else {
        return ElementBuilder::new("");
    };
    let mut builder = ElementBuilder::new(data.tag.clone());
    builder.attrs = data.attrs.clone();
    builder.nsdecls = data.nsdecls.clone();
    for &child in tree.children(id) {
        builder.children.push(match &tree.node(child).data {
            NodeData::Element(_) => BuilderNode::Element(extract(tree, child)),
            NodeData::Text(t) => BuilderNode::Text(t.clone()),
        });
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    const SP_TREE: &str = r#"<p:spTree xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><p:nvGrpSpPr/><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/></p:nvSpPr></p:sp><p:pic/></p:spTree>"#;

    #[test]
    fn test_identity_equality() {
        let doc = XmlDocument::parse(SP_TREE).unwrap();
        let a = doc.root().find("p:sp").unwrap();
        let b = doc.root().children()[1].clone();
        assert_eq!(a, b);

        let other = XmlDocument::parse(SP_TREE).unwrap();
        assert_ne!(a, other.root().find("p:sp").unwrap());
    }

    #[test]
    fn test_find_path_and_attrs() {
        let doc = XmlDocument::parse(SP_TREE).unwrap();
        let c_nv_pr = doc
            .root()
            .find_path(&["p:sp", "*", "p:cNvPr"])
            .unwrap();
        assert_eq!(c_nv_pr.attr("name").as_deref(), Some("Title 1"));
        assert_eq!(c_nv_pr.parse_attr::<u32>("id"), Some(2));
        c_nv_pr.set_attr("id", 7);
        assert_eq!(c_nv_pr.parse_attr::<u32>("id"), Some(7));
        assert_eq!(c_nv_pr.remove_attr("id").as_deref(), Some("7"));
        assert_eq!(c_nv_pr.attr("id"), None);
    }

    #[test]
    fn test_append_prunes_inherited_nsdecls() {
        let doc = XmlDocument::parse(SP_TREE).unwrap();
        let sp = doc
            .root()
            .append(&ElementBuilder::new("p:sp").nsdecls(&["p", "a", "r"]));
        let xml = doc.to_xml();
        assert!(xml.ends_with(
            r#"<p:sp xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"/></p:spTree>"#
        ));
        assert!(sp.xml().contains("xmlns:p="));
    }

    #[test]
    fn test_insert_before_any() {
        let doc = XmlDocument::parse("<c:chart><c:plotArea/><c:plotVisOnly/></c:chart>").unwrap();
        let root = doc.root();
        root.insert_before_any(&ElementBuilder::new("c:legend"), &["c:plotVisOnly", "c:extLst"]);
        let tags: Vec<String> = root.children().iter().map(|c| c.tag()).collect();
        assert_eq!(tags, vec!["c:plotArea", "c:legend", "c:plotVisOnly"]);

        root.insert_before_any(&ElementBuilder::new("c:extLst"), &[]);
        assert_eq!(root.children().last().unwrap().tag(), "c:extLst");
    }

    #[test]
    fn test_add_next_sibling_and_remove() {
        let doc = XmlDocument::parse("<r><a/><c/></r>").unwrap();
        let a = doc.root().find("a").unwrap();
        let b = a.add_next_sibling(&ElementBuilder::new("b")).unwrap();
        assert_eq!(doc.root().xml(), "<r><a/><b/><c/></r>");
        b.remove();
        assert_eq!(doc.root().xml(), "<r><a/><c/></r>");
        assert!(doc.root().add_next_sibling(&ElementBuilder::new("x")).is_err());
    }

    #[test]
    fn test_removed_element_stays_readable() {
        let doc = XmlDocument::parse(SP_TREE).unwrap();
        let sp = doc.root().find("p:sp").unwrap();
        let c_nv_pr = sp.find_path(&["p:nvSpPr", "p:cNvPr"]).unwrap();
        sp.remove();

        assert!(sp.parent().is_none());
        assert_eq!(c_nv_pr.attr("name").as_deref(), Some("Title 1"));
        assert_eq!(c_nv_pr.parent().and_then(|p| p.parent()), Some(sp.clone()));
        assert!(doc.root().descendants_with_tag("p:cNvPr").is_empty());
        assert!(!doc.to_xml().contains("Title 1"));
        sp.remove();

        let compact = XmlDocument::parse(&doc.to_xml()).unwrap();
        assert!(compact.root().structurally_eq(&doc.root()));
    }

    #[test]
    fn test_element_child_from_sees_appended_children() {
        let doc = XmlDocument::parse("<r><a/></r>").unwrap();
        let root = doc.root();
        let (pos, first) = root.element_child_from(0).unwrap();
        assert!(first.has_tag("a"));
        assert!(root.element_child_from(pos + 1).is_none());
        root.append(&ElementBuilder::new("b"));
        let (_, second) = root.element_child_from(pos + 1).unwrap();
        assert!(second.has_tag("b"));
    }

    #[test]
    fn test_structural_equality_ignores_attr_order() {
        let a = XmlDocument::parse(r#"<x a="1" b="2"><y>t</y></x>"#).unwrap();
        let b = XmlDocument::parse(r#"<x b="2" a="1"><y>t</y></x>"#).unwrap();
        let c = XmlDocument::parse(r#"<x b="2" a="1"><y>u</y></x>"#).unwrap();
        assert!(a.root().structurally_eq(&b.root()));
        assert!(!a.root().structurally_eq(&c.root()));
    }

    #[test]
    fn test_descendant_attr_values() {
        let doc = XmlDocument::parse(SP_TREE).unwrap();
        assert_eq!(
            doc.root().descendant_attr_values("p:cNvPr", "name"),
            vec!["Title 1".to_string()]
        );
    }
}
