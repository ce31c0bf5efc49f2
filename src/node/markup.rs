//! Deterministic markup rendering
//!
//! Keys are printed as a `key` attribute so identity is visible when
//! comparing renders. Booleans and `Empty` print nothing.

use super::{Element, ElementKind, Node};
use crate::value::format_number;
use std::fmt::{self, Write};

impl Node {
    /// Render the tree to markup
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_node(&mut out, self);
        out
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self)
    }
}

fn write_node<W: Write>(out: &mut W, node: &Node) -> fmt::Result {
    match node {
        Node::Empty | Node::Bool(_) => Ok(()),
        Node::Text(text) => write_escaped(out, text),
        Node::Number(n) => out.write_str(&format_number(*n)),
        Node::Fragment(children) => children.iter().try_for_each(|child| write_node(out, child)),
        Node::Element(element) => write_element(out, element),
    }
}

fn write_element<W: Write>(out: &mut W, element: &Element) -> fmt::Result {
    let tag = match &element.kind {
        ElementKind::Tag(tag) => tag.as_str(),
        ElementKind::Else => "else",
        ElementKind::ElseIf(_) => "else-if",
    };

    write!(out, "<{}", tag)?;
    if let Some(key) = &element.key {
        out.write_str(" key=\"")?;
        write_escaped(out, key)?;
        out.write_char('"')?;
    }
    if let ElementKind::ElseIf(test) = &element.kind {
        out.write_str(" test=\"")?;
        write_escaped(out, &test.to_string())?;
        out.write_char('"')?;
    }
    for (name, value) in &element.attrs {
        write!(out, " {}=\"", name)?;
        write_escaped(out, value)?;
        out.write_char('"')?;
    }
    out.write_char('>')?;

    for child in &element.children {
        write_node(out, child)?;
    }
    write!(out, "</{}>", tag)
}

fn write_escaped<W: Write>(out: &mut W, text: &str) -> fmt::Result {
    for c in text.chars() {
        match c {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' => out.write_str("&quot;")?,
            _ => out.write_char(c)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_markup_includes_key_and_attrs() {
        let node = Node::from(
            Element::new("li")
                .key("0")
                .attr("class", "item")
                .child("A & B"),
        );
        assert_eq!(
            node.to_markup(),
            r#"<li key="0" class="item">A &amp; B</li>"#
        );
    }

    #[test]
    fn test_primitives_render_like_host() {
        let node = Node::Fragment(vec![
            Node::from(3),
            Node::from(true),
            Node::Empty,
            Node::from(0.5),
        ]);
        assert_eq!(node.to_markup(), "30.5");
        assert_eq!(node.to_string(), node.to_markup());
    }

    #[test]
    fn test_stray_markers_are_visible() {
        let node = Node::else_if(1, vec![Node::text("B")]);
        assert_eq!(node.to_markup(), r#"<else-if test="1">B</else-if>"#);
    }
}
