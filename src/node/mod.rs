//! Renderable node tree
//!
//! The minimal host model render primitives are evaluated against:
//! - elements carry an optional identity key and ordered children
//! - fragments carry lists of nodes
//! - primitives (text, numbers, booleans) render as leaves
//!
//! `Else` / `ElseIf` markers are element kinds of a closed enum, so a
//! conditional recognises them by variant rather than by probing.

mod markup;

use crate::value::Value;
use indexmap::IndexMap;

/// Renderable node
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum Node {
    /// Renders nothing
    #[default]
    Empty,

    /// Text leaf
    Text(String),

    /// Number leaf
    Number(f64),

    /// Boolean leaf (renders nothing, like the host)
    Bool(bool),

    /// List of nodes
    Fragment(Vec<Node>),

    /// Element
    Element(Element),
}

/// Element node
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Element {
    /// What kind of element this is
    pub kind: ElementKind,

    /// Identity annotation used by the host to match nodes across renders
    pub key: Option<String>,

    /// Attributes in declaration order
    pub attrs: IndexMap<String, String>,

    /// Ordered children
    pub children: Vec<Node>,
}

/// Closed set of element kinds
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum ElementKind {
    /// Host element with a tag name
    Tag(String),

    /// Unconditional fallback branch of an enclosing conditional
    Else,

    /// Chained conditional branch with its own test
    ElseIf(Value),
}

impl Element {
    /// Create a host element with the given tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self::of_kind(ElementKind::Tag(tag.into()))
    }

    /// Create an element of any kind
    pub fn of_kind(kind: ElementKind) -> Self {
        Self {
            kind,
            key: None,
            attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder: set the identity key
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Builder: set an attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Builder: append a child
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Builder: append children
    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Tag name for host elements
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Tag(tag) => Some(tag),
            ElementKind::Else | ElementKind::ElseIf(_) => None,
        }
    }

    /// Whether this is an `Else` or `ElseIf` marker
    pub fn is_marker(&self) -> bool {
        matches!(self.kind, ElementKind::Else | ElementKind::ElseIf(_))
    }
}

impl Node {
    /// Text leaf
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// List of nodes; an empty list renders nothing
    pub fn fragment(children: Vec<Node>) -> Self {
        if children.is_empty() {
            Node::Empty
        } else {
            Node::Fragment(children)
        }
    }

    /// `Else` marker wrapping fallback content
    pub fn else_marker(children: Vec<Node>) -> Self {
        Node::Element(Element::of_kind(ElementKind::Else).children(children))
    }

    /// `ElseIf` marker: a nested conditional with its own test and children
    pub fn else_if(test: impl Into<Value>, children: Vec<Node>) -> Self {
        Node::Element(Element::of_kind(ElementKind::ElseIf(test.into())).children(children))
    }

    /// Single-element validity check
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    /// Whether this node renders nothing on its own
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Empty | Node::Bool(_) => true,
            Node::Fragment(children) => children.iter().all(Node::is_empty),
            _ => false,
        }
    }

    /// Identity key of an element
    pub fn key(&self) -> Option<&str> {
        match self {
            Node::Element(element) => element.key.as_deref(),
            _ => None,
        }
    }

    /// New node with its identity replaced
    ///
    /// Only elements carry identity; any other node is returned unchanged.
    pub fn with_key(self, key: impl Into<String>) -> Self {
        match self {
            Node::Element(element) => Node::Element(element.key(key)),
            other => other,
        }
    }

    /// Normalize into a child list: fragments open up, `Empty` disappears
    pub fn into_children(self) -> Vec<Node> {
        match self {
            Node::Empty => Vec::new(),
            Node::Fragment(children) => children,
            other => vec![other],
        }
    }

    /// Flatten nested fragments in a child list, keeping order
    pub fn flatten_children(children: Vec<Node>) -> Vec<Node> {
        let mut flat = Vec::with_capacity(children.len());
        for child in children {
            match child {
                Node::Fragment(inner) => flat.extend(Node::flatten_children(inner)),
                other => flat.push(other),
            }
        }
        flat
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<f64> for Node {
    fn from(n: f64) -> Self {
        Node::Number(n)
    }
}

impl From<i32> for Node {
    fn from(n: i32) -> Self {
        Node::Number(f64::from(n))
    }
}

impl From<usize> for Node {
    fn from(n: usize) -> Self {
        Node::Number(n as f64)
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<Vec<Node>> for Node {
    fn from(children: Vec<Node>) -> Self {
        Node::Fragment(children)
    }
}

impl From<Option<Node>> for Node {
    fn from(node: Option<Node>) -> Self {
        node.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_key_only_touches_elements() {
        let keyed = Node::from(Element::new("li")).with_key("7");
        assert_eq!(keyed.key(), Some("7"));

        let text = Node::text("A").with_key("7");
        assert_eq!(text, Node::text("A"));
        assert_eq!(text.key(), None);
    }

    #[test]
    fn test_with_key_leaves_original_untouched() {
        let original = Node::from(Element::new("li").key("a"));
        let rekeyed = original.clone().with_key("b");
        assert_eq!(original.key(), Some("a"));
        assert_eq!(rekeyed.key(), Some("b"));
    }

    #[test]
    fn test_into_children_normalizes() {
        assert!(Node::Empty.into_children().is_empty());
        assert_eq!(Node::text("A").into_children(), vec![Node::text("A")]);
        assert_eq!(
            Node::Fragment(vec![Node::text("A"), Node::text("B")]).into_children().len(),
            2
        );
    }

    #[test]
    fn test_flatten_children_keeps_order() {
        let flat = Node::flatten_children(vec![
            Node::text("A"),
            Node::Fragment(vec![Node::text("B"), Node::Fragment(vec![Node::text("C")])]),
            Node::text("D"),
        ]);
        assert_eq!(
            flat,
            vec![Node::text("A"), Node::text("B"), Node::text("C"), Node::text("D")]
        );
    }

    #[test]
    fn test_markers_are_recognised_by_kind() {
        let Node::Element(else_marker) = Node::else_marker(vec![]) else {
            panic!("marker should be an element");
        };
        assert!(else_marker.is_marker());
        assert_eq!(else_marker.tag(), None);
        assert!(!Element::new("div").is_marker());
    }

    #[test]
    fn test_fragment_of_nothing_is_empty() {
        assert_eq!(Node::fragment(Vec::new()), Node::Empty);
        assert!(Node::Fragment(vec![Node::Bool(true), Node::Empty]).is_empty());
    }
}
