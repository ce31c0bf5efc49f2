#![allow(dead_code)]

use render_loops::{Element, Frame, Node, Value};

/// `<li>{item}</li>`
pub fn li(item: &Value) -> Element {
    Element::new("li").child(item.to_string())
}

/// `<li>item|index|length|key|first|last</li>`; unknown fields print as `?` / `-`
pub fn li_with_frame(item: &Value, frame: &Frame) -> Element {
    let length = frame.length.map_or_else(|| "?".to_string(), |n| n.to_string());
    let key = frame.key.as_ref().map_or_else(|| "-".to_string(), |k| k.to_string());
    Element::new("li").child(format!(
        "{}|{}|{}|{}|{}|{}",
        item, frame.index, length, key, frame.is_first, frame.is_last
    ))
}

/// Keys of the top-level children of a rendered node
pub fn child_keys(node: &Node) -> Vec<Option<String>> {
    node.clone()
        .into_children()
        .iter()
        .map(|child| child.key().map(str::to_string))
        .collect()
}

/// Inner markup of each top-level child
pub fn child_texts(node: &Node) -> Vec<String> {
    node.clone()
        .into_children()
        .into_iter()
        .map(|child| match child {
            Node::Element(element) => Node::Fragment(element.children).to_markup(),
            other => other.to_markup(),
        })
        .collect()
}
