mod common;

use common::{child_keys, child_texts, li_with_frame};
use render_loops::{
    render_for, ConfigurationError, Element, Frame, ForProps, Mapper, Node, RenderConfig, Value,
};

fn entry(item: &Value, frame: &Frame) -> Element {
    let key = frame.key.as_ref().map(ToString::to_string).unwrap_or_default();
    Element::new("li").child(format!("{}={}", key, item))
}

#[test]
fn object_renders_one_item_per_property() {
    let node = render_for(
        ForProps::new()
            .in_(Value::object([("x", "A"), ("y", "B")]))
            .as_(Mapper::with_frame(entry)),
    )
    .expect("object renders");

    assert_eq!(
        node.to_markup(),
        r#"<li key="x">x=A</li><li key="y">y=B</li>"#
    );
}

#[test]
fn mapping_frames_know_length_and_edges() {
    let node = render_for(
        ForProps::new()
            .in_(Value::object([("b", 2), ("a", 1), ("c", 3)]))
            .as_(Mapper::with_frame(li_with_frame)),
    )
    .expect("object renders");

    assert_eq!(
        child_texts(&node),
        ["2|0|3|b|true|false", "1|1|3|a|false|false", "3|2|3|c|false|true"]
    );
}

#[test]
fn insertion_order_is_kept() {
    let node = render_for(
        ForProps::new()
            .in_(Value::object([("zeta", 1), ("alpha", 2), ("mid", 3)]))
            .as_(Mapper::item(|item: &Value| Element::new("span").child(item.to_string()))),
    )
    .expect("object renders");

    assert_eq!(
        child_keys(&node),
        [
            Some("zeta".to_string()),
            Some("alpha".to_string()),
            Some("mid".to_string())
        ]
    );
}

#[test]
fn null_object_renders_fallback() {
    let node = render_for(
        ForProps::new()
            .in_(Value::Null)
            .as_(Mapper::with_frame(entry))
            .if_empty("Nothing here"),
    )
    .expect("null renders");

    assert_eq!(node.to_markup(), "Nothing here");
}

#[test]
fn empty_object_without_fallback_renders_nothing() {
    let node = render_for(
        ForProps::new()
            .in_(Value::object(Vec::<(String, Value)>::new()))
            .as_(Mapper::with_frame(entry)),
    )
    .expect("empty object renders");

    assert_eq!(node, Node::Empty);
}

#[test]
fn collections_are_rejected() {
    let err = render_for(
        ForProps::new()
            .in_(Value::list([1, 2]))
            .as_(Mapper::with_frame(entry)),
    )
    .unwrap_err();
    assert_eq!(err, ConfigurationError::InRequiresObject { found: "array" });
    assert!(err.to_string().starts_with("<For in={}>"));

    let err = render_for(ForProps::new().in_(7).as_(Mapper::with_frame(entry))).unwrap_err();
    assert_eq!(err, ConfigurationError::InRequiresObject { found: "number" });
}

#[test]
fn length_objects_depend_on_shape_policy() {
    let length_object = Value::object([("length", Value::from(1)), ("0", Value::from("A"))]);

    let err = render_for(
        ForProps::new()
            .in_(length_object.clone())
            .as_(Mapper::with_frame(entry)),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::InRequiresObject {
            found: "array-like object"
        }
    );

    let node = render_for(
        ForProps::new()
            .in_(length_object)
            .as_(Mapper::with_frame(entry))
            .config(RenderConfig::strict()),
    )
    .expect("strict policy treats length objects as plain");
    assert_eq!(
        node.to_markup(),
        r#"<li key="length">length=1</li><li key="0">0=A</li>"#
    );
}
