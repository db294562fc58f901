//! Detached markup content exchanged with the host document.
//!
//! Hosts hand extracted content to the controller as a [`Fragment`] and take
//! one back for insertion. Everything here is plain owned data, so the
//! transformations in this module are pure functions.


/// Tag name of highlight marks.
pub const MARK_TAG: &str = "mark";

/// Class identifying marks created by this tool.
pub const MARK_CLASS: &str = "cdx-marker";

/// Attribute carrying a mark's color name.
pub const COLOR_ATTRIBUTE: &str = "data-color";

/// A detached node: either text or an element subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(Element),
}

impl Node {
    /// Create a text node
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Whether this node is a highlight mark
    pub fn is_mark(&self) -> bool {
        matches!(self, Node::Element(element) if element.is_mark())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// An element with ordered attributes and owned children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    /// Attributes in insertion order
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an empty highlight mark painted with `color`
    pub fn mark(color: &str) -> Self {
        let mut mark = Self::new(MARK_TAG);
        mark.set_attribute("class", MARK_CLASS);
        mark.set_attribute(COLOR_ATTRIBUTE, color);
        mark
    }

    /// Replace the children
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self
                .attributes
                .push((name.to_string(), value.to_string())),
        }
    }

    /// Whether the whitespace-separated `class` attribute contains `class`
    pub fn has_class(&self, class: &str) -> bool {
        has_class(self.attribute("class"), class)
    }

    /// Whether the element matches the mark tag and class
    pub fn is_mark(&self) -> bool {
        is_mark_tag(&self.tag, self.attribute("class"))
    }
}

/// Whether a `class` attribute value contains `class` as one of its tokens.
pub fn has_class(class_attribute: Option<&str>, class: &str) -> bool {
    class_attribute.is_some_and(|value| value.split_whitespace().any(|token| token == class))
}

/// Whether a tag/class pair identifies a highlight mark.
pub fn is_mark_tag(tag: &str, class_attribute: Option<&str>) -> bool {
    tag.eq_ignore_ascii_case(MARK_TAG) && has_class(class_attribute, MARK_CLASS)
}

/// An ordered run of detached sibling nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub nodes: Vec<Node>,
}

impl Fragment {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// True when the fragment holds nothing but empty text.
    ///
    /// Elements count as content even when they carry no text.
    pub fn is_empty(&self) -> bool {
        self.nodes
            .iter()
            .all(|node| matches!(node, Node::Text(text) if text.is_empty()))
    }

    pub fn text_content(&self) -> String {
        self.nodes.iter().map(Node::text_content).collect()
    }

    /// Whether any node in the fragment, at any depth, is a mark
    pub fn contains_mark(&self) -> bool {
        fn walk(nodes: &[Node]) -> bool {
            nodes.iter().any(|node| match node {
                Node::Text(_) => false,
                Node::Element(element) => element.is_mark() || walk(&element.children),
            })
        }
        walk(&self.nodes)
    }
}

impl From<Node> for Fragment {
    fn from(node: Node) -> Self {
        Self { nodes: vec![node] }
    }
}

impl From<Vec<Node>> for Fragment {
    fn from(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}

impl IntoIterator for Fragment {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

/// Unwrap every mark inside `fragment`, promoting its children into its place.
///
/// Works at any depth, so the result never contains a mark and wrapping it in
/// a new mark cannot produce nesting. Non-mark elements and text are kept in
/// their original order.
pub fn strip_marks(fragment: Fragment) -> Fragment {
    Fragment::new(strip_nodes(fragment.nodes))
}

fn strip_nodes(nodes: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Element(element) if element.is_mark() => {
                out.extend(strip_nodes(element.children));
            }
            Node::Element(mut element) => {
                element.children = strip_nodes(std::mem::take(&mut element.children));
                out.push(Node::Element(element));
            }
            text => out.push(text),
        }
    }
    out
}
