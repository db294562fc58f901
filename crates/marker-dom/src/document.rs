//! Arena-backed document tree

use marker_core::markup::{Element, Fragment, Node, has_class, is_mark_tag};

use crate::error::Result;
use crate::range::DomRange;

/// Elements serialized without a closing tag
pub(crate) const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "wbr"];

/// Handle to a node in a [`Document`].
///
/// Handles stay valid for the lifetime of the document, including after the
/// node is detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Root,
    Text(String),
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// An editable document with a current selection.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    selection: Option<DomRange>,
    toolbar_closes: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
            }],
            selection: None,
            toolbar_closes: 0,
        }
    }

    /// Parse a small HTML subset: text, start/end tags with double-quoted
    /// attributes, and the `&amp; &lt; &gt; &quot; &#39;` entities.
    pub fn parse(markup: &str) -> Result<Self> {
        crate::parse::parse(markup)
    }

    /// Build a document whose root holds `fragment`
    pub fn from_fragment(fragment: Fragment) -> Self {
        let mut doc = Self::new();
        let root = doc.root();
        for node in fragment {
            let id = doc.build(node);
            doc.append_child(root, id);
        }
        doc
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.data(id).children
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.data(id).kind, NodeKind::Text(_))
    }

    /// Text of a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.data(id).kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub(crate) fn set_text(&mut self, id: NodeId, value: String) {
        if let NodeKind::Text(text) = &mut self.data_mut(id).kind {
            *text = value;
        }
    }

    /// Tag of an element
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.data(id).kind {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.data(id).kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// Set an attribute on an element; ignored for text and the root
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attributes, .. } = &mut self.data_mut(id).kind {
            match attributes.iter_mut().find(|(key, _)| key == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    /// Whether `id` is a highlight mark
    pub fn is_mark(&self, id: NodeId) -> bool {
        self.tag(id)
            .is_some_and(|tag| is_mark_tag(tag, self.attribute(id, "class")))
    }

    /// DOM node length: characters for text, children otherwise
    pub fn node_length(&self, id: NodeId) -> usize {
        match &self.data(id).kind {
            NodeKind::Text(text) => text.chars().count(),
            _ => self.data(id).children.len(),
        }
    }

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&child| child == id)
    }

    /// Whether the node is reachable from the root
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.ancestors(id).last().copied() == Some(self.root())
    }

    /// `id` followed by its ancestors up to the topmost one
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).contains(&ancestor)
    }

    /// Nearest inclusive ancestor that is an element with `tag` and `class`
    pub fn closest(&self, id: NodeId, tag: &str, class: &str) -> Option<NodeId> {
        self.ancestors(id).into_iter().find(|&node| {
            self.tag(node)
                .is_some_and(|t| t.eq_ignore_ascii_case(tag))
                && has_class(self.attribute(node, "class"), class)
        })
    }

    /// Attached nodes in document order, root excluded
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(self.root()).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Attached highlight marks in document order
    pub fn marks(&self) -> Vec<NodeId> {
        self.descendants()
            .into_iter()
            .filter(|&id| self.is_mark(id))
            .collect()
    }

    /// Whether any mark has another mark as an ancestor
    pub fn has_nested_marks(&self) -> bool {
        self.marks().into_iter().any(|mark| {
            self.ancestors(mark)
                .into_iter()
                .skip(1)
                .any(|ancestor| self.is_mark(ancestor))
        })
    }

    /// Attached text nodes in document order
    pub fn text_nodes(&self) -> Vec<NodeId> {
        self.descendants()
            .into_iter()
            .filter(|&id| self.is_text(id))
            .collect()
    }

    /// Visible text of the whole document
    pub fn text_content(&self) -> String {
        self.node_text_content(self.root())
    }

    pub fn node_text_content(&self, id: NodeId) -> String {
        match &self.data(id).kind {
            NodeKind::Text(text) => text.clone(),
            _ => self
                .children(id)
                .iter()
                .map(|&child| self.node_text_content(child))
                .collect(),
        }
    }

    /// Serialize the document. Adjacent text nodes serialize as one run.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for &child in self.children(self.root()) {
            self.write_html(child, &mut out);
        }
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        match &self.data(id).kind {
            NodeKind::Root => {
                for &child in self.children(id) {
                    self.write_html(child, out);
                }
            }
            NodeKind::Text(text) => out.push_str(&escape_text(text)),
            NodeKind::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push_str(&format!(" {name}=\"{}\"", escape_attribute(value)));
                }
                out.push('>');
                if VOID_TAGS.contains(&tag.as_str()) && self.children(id).is_empty() {
                    return;
                }
                for &child in self.children(id) {
                    self.write_html(child, out);
                }
                out.push_str(&format!("</{tag}>"));
            }
        }
    }

    /// Owned copy of the subtree at `id`; the root copies as a wrapper-less
    /// element named `#root`
    pub fn to_node(&self, id: NodeId) -> Node {
        match &self.data(id).kind {
            NodeKind::Text(text) => Node::Text(text.clone()),
            NodeKind::Root => Node::Element(Element::new("#root").with_children(self.child_nodes(id))),
            NodeKind::Element { tag, attributes } => Node::Element(Element {
                tag: tag.clone(),
                attributes: attributes.clone(),
                children: self.child_nodes(id),
            }),
        }
    }

    fn child_nodes(&self, id: NodeId) -> Vec<Node> {
        self.children(id)
            .iter()
            .map(|&child| self.to_node(child))
            .collect()
    }

    /// Copy of an element without its children
    pub(crate) fn shallow_element(&self, id: NodeId) -> Element {
        match &self.data(id).kind {
            NodeKind::Element { tag, attributes } => Element {
                tag: tag.clone(),
                attributes: attributes.clone(),
                children: Vec::new(),
            },
            _ => Element::new("#root"),
        }
    }

    pub(crate) fn create(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Materialize a detached node as a new, unattached subtree
    pub(crate) fn build(&mut self, node: Node) -> NodeId {
        match node {
            Node::Text(text) => self.create(NodeKind::Text(text)),
            Node::Element(element) => {
                let id = self.create(NodeKind::Element {
                    tag: element.tag,
                    attributes: element.attributes,
                });
                for child in element.children {
                    let child = self.build(child);
                    self.append_child(id, child);
                }
                id
            }
        }
    }

    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let index = self.children(parent).len();
        self.insert_children(parent, index, &[child]);
    }

    pub(crate) fn insert_children(&mut self, parent: NodeId, index: usize, ids: &[NodeId]) {
        for &id in ids {
            self.data_mut(id).parent = Some(parent);
        }
        let children = &mut self.data_mut(parent).children;
        let index = index.min(children.len());
        children.splice(index..index, ids.iter().copied());
    }

    pub(crate) fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.data_mut(id).parent.take() {
            self.data_mut(parent).children.retain(|&child| child != id);
        }
    }

    /// Detach `id` and return it as owned data
    pub(crate) fn take_node(&mut self, id: NodeId) -> Node {
        self.detach(id);
        self.to_node(id)
    }

    pub fn selection(&self) -> Option<&DomRange> {
        self.selection.as_ref()
    }

    /// Make `range` the current selection
    pub fn select(&mut self, range: DomRange) {
        self.selection = Some(range);
    }

    /// How many times the controller asked to close its toolbar
    pub fn toolbar_close_count(&self) -> usize {
        self.toolbar_closes
    }

    pub(crate) fn record_toolbar_close(&mut self) {
        self.toolbar_closes += 1;
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
