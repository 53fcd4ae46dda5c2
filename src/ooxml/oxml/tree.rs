//! Arena storage behind [`XmlDocument`](super::XmlDocument).
//!
//! Nodes are never freed: removing an element only detaches it, so a
//! [`NodeId`] stays valid for the lifetime of its tree.

use smallvec::SmallVec;

/// Stable address of a node inside one [`XmlTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Attribute or namespace-declaration list of one element.
pub(crate) type AttrList = SmallVec<[(String, String); 4]>;

#[derive(Debug, Clone)]
pub(crate) struct ElementData {
    pub(crate) tag: String,
    pub(crate) attrs: AttrList,
    pub(crate) nsdecls: AttrList,
}

#[derive(Debug, Clone)]
pub(crate) enum NodeData {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub(crate) data: NodeData,
}

/// Flat node store with parent/child links.
#[derive(Debug, Default)]
pub struct XmlTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl XmlTree {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data,
        });
        id
    }

    pub(crate) fn new_element(&mut self, tag: &str, attrs: AttrList, nsdecls: AttrList) -> NodeId {
        self.push(NodeData::Element(ElementData {
            tag: tag.to_string(),
            attrs,
            nsdecls,
        }))
    }

    pub(crate) fn new_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.node(id).data {
            NodeData::Element(data) => Some(data),
            NodeData::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.node_mut(id).data {
            NodeData::Element(data) => Some(data),
            NodeData::Text(_) => None,
        }
    }

    pub(crate) fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    pub(crate) fn tag(&self, id: NodeId) -> &str {
        self.element(id).map_or("", |e| e.tag.as_str())
    }

    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub(crate) fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub(crate) fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.is_element(child))
    }

    pub(crate) fn first_child_with_tag(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.element_children(id).find(|&child| self.tag(child) == tag)
    }

    pub(crate) fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?
            .attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(data) = self.element_mut(id) {
            match data.attrs.iter_mut().find(|(key, _)| key == name) {
                Some(slot) => slot.1 = value.to_string(),
                None => data.attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    pub(crate) fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        let data = self.element_mut(id)?;
        let pos = data.attrs.iter().position(|(key, _)| key == name)?;
        Some(data.attrs.remove(pos).1)
    }

    /// Concatenated direct text children.
    pub(crate) fn text(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            if let NodeData::Text(text) = &self.node(child).data {
                out.push_str(text);
            }
        }
        out
    }

    /// Append `text` to the text node `id`.
    pub(crate) fn extend_text(&mut self, id: NodeId, text: &str) {
        if let NodeData::Text(existing) = &mut self.node_mut(id).data {
            existing.push_str(text);
        }
    }

    /// Replace all direct text children by a single text node.
    pub(crate) fn set_text(&mut self, id: NodeId, text: &str) {
        let texts: Vec<NodeId> = self
            .children(id)
            .iter()
            .copied()
            .filter(|&child| !self.is_element(child))
            .collect();
        for child in texts {
            self.detach(child);
        }
        if !text.is_empty() {
            let node = self.new_text(text);
            self.insert(id, 0, node);
        }
    }

    /// Insert `child` at raw position `index` among the children of `parent`,
    /// detaching it from any previous parent first.
    pub(crate) fn insert(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        let children = &mut self.node_mut(parent).children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.node_mut(child).parent = Some(parent);
    }

    pub(crate) fn append(&mut self, parent: NodeId, child: NodeId) {
        let end = self.children(parent).len();
        self.insert(parent, end, child);
    }

    pub(crate) fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.node_mut(child).parent.take() {
            self.node_mut(parent).children.retain(|&c| c != child);
        }
    }

    /// Raw position of `child` in its parent's child list.
    pub(crate) fn position(&self, child: NodeId) -> Option<usize> {
        let parent = self.parent(child)?;
        self.children(parent).iter().position(|&c| c == child)
    }

    /// Element descendants of `id` in document order, excluding `id`.
    pub(crate) fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.element_children(id).collect();
        stack.reverse();
        while let Some(next) = stack.pop() {
            out.push(next);
            let start = stack.len();
            stack.extend(self.element_children(next));
            stack[start..].reverse();
        }
        out
    }

    /// Namespace URI bound to `prefix` at `id`, searching ancestors.
    pub(crate) fn lookup_namespace(&self, id: NodeId, prefix: &str) -> Option<&str> {
        let mut current = Some(id);
        while let Some(node) = current {
            if let Some(data) = self.element(node)
                && let Some((_, uri)) = data.nsdecls.iter().find(|(p, _)| p == prefix)
            {
                return Some(uri.as_str());
            }
            current = self.parent(node);
        }
        None
    }

    /// Namespace declarations in scope at `id` that are declared on an
    /// ancestor and not redeclared on `id` itself.
    pub(crate) fn inherited_nsdecls(&self, id: NodeId) -> AttrList {
        let mut out = AttrList::new();
        let own = self.element(id).map(|e| &e.nsdecls);
        let mut current = self.parent(id);
        while let Some(node) = current {
            if let Some(data) = self.element(node) {
                for (prefix, uri) in &data.nsdecls {
                    let shadowed = own.is_some_and(|own| own.iter().any(|(p, _)| p == prefix))
                        || out.iter().any(|(p, _)| p == prefix);
                    if !shadowed {
                        out.push((prefix.clone(), uri.clone()));
                    }
                }
            }
            current = self.parent(node);
        }
        out
    }

    /// Drop namespace declarations on `id` already bound identically in
    /// the scope of `parent`.
    pub(crate) fn prune_redundant_nsdecls(&mut self, id: NodeId, parent: NodeId) {
        let Some(data) = self.element(id) else {
            return;
        };
        let redundant: Vec<String> = data
            .nsdecls
            .iter()
            .filter(|(prefix, uri)| self.lookup_namespace(parent, prefix) == Some(uri.as_str()))
            .map(|(prefix, _)| prefix.clone())
            .collect();
        if let Some(data) = self.element_mut(id) {
            data.nsdecls.retain(|(prefix, _)| !redundant.contains(prefix));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tree: &mut XmlTree, tag: &str) -> NodeId {
        tree.new_element(tag, AttrList::new(), AttrList::new())
    }

    #[test]
    fn test_insert_and_detach() {
        let mut tree = XmlTree::new();
        let root = element(&mut tree, "p:spTree");
        let a = element(&mut tree, "p:sp");
        let b = element(&mut tree, "p:pic");
        tree.append(root, a);
        tree.insert(root, 0, b);
        assert_eq!(tree.children(root), &[b, a]);
        assert_eq!(tree.position(a), Some(1));

        tree.detach(b);
        assert_eq!(tree.children(root), &[a]);
        assert_eq!(tree.parent(b), None);
        assert_eq!(tree.tag(b), "p:pic");
    }

    #[test]
    fn test_descendants_document_order() {
        let mut tree = XmlTree::new();
        let root = element(&mut tree, "r");
        let a = element(&mut tree, "a");
        let a1 = element(&mut tree, "a1");
        let b = element(&mut tree, "b");
        tree.append(root, a);
        tree.append(a, a1);
        tree.append(root, b);
        assert_eq!(tree.descendants(root), vec![a, a1, b]);
    }

    #[test]
    fn test_set_text_replaces_text_nodes() {
        let mut tree = XmlTree::new();
        let t = element(&mut tree, "a:t");
        let one = tree.new_text("one");
        tree.append(t, one);
        tree.set_text(t, "two");
        assert_eq!(tree.text(t), "two");
        assert_eq!(tree.children(t).len(), 1);
    }
}
