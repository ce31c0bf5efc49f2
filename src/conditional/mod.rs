//! `<If>`: render exactly one branch
//!
//! Two mutually exclusive styles:
//! - value form: `then` / optional `else`
//! - child form: primary children plus `ElseIf` / `Else` markers
//!
//! The test is coerced to a boolean once, by [`coerce_test`].

mod branch;

pub use branch::{Branch, BranchKind, BranchTree};

use crate::{node::Node, value::Value, ConfigurationError};
use tracing::debug;

/// Truthiness coercion applied to every `test`
///
/// Uses host rules: `null`, `false`, `0`, `NaN`, and `""` fail; everything
/// else passes. Callers that want strict booleans pass [`Value::Bool`].
#[inline]
pub fn coerce_test(test: &Value) -> bool {
    test.is_truthy()
}

/// Props of one `<If>` render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IfProps {
    test: Option<Value>,
    then: Option<Node>,
    else_: Option<Node>,
    children: Option<Vec<Node>>,
}

impl IfProps {
    /// Empty props
    pub fn new() -> Self {
        Self::default()
    }

    /// `test`
    pub fn test(mut self, test: impl Into<Value>) -> Self {
        self.test = Some(test.into());
        self
    }

    /// `then`
    pub fn then(mut self, node: impl Into<Node>) -> Self {
        self.then = Some(node.into());
        self
    }

    /// `else`
    pub fn else_(mut self, node: impl Into<Node>) -> Self {
        self.else_ = Some(node.into());
        self
    }

    /// Replace the children
    pub fn children(mut self, children: Vec<Node>) -> Self {
        self.children = Some(children);
        self
    }

    /// Append one child
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child.into());
        self
    }
}

/// Render an `<If>` element
///
/// Returns the selected branch, or [`Node::Empty`] when none applies.
pub fn render_if(props: IfProps) -> Result<Node, ConfigurationError> {
    let IfProps {
        test,
        then,
        else_,
        children,
    } = props;

    let test = test.ok_or(ConfigurationError::MissingTest)?;
    let passed = coerce_test(&test);

    match (then, else_, children) {
        (None, Some(_), _) => Err(ConfigurationError::ElseWithoutThen),
        (Some(_), _, Some(_)) => Err(ConfigurationError::MixedBranchStyles),
        (None, None, None) => Err(ConfigurationError::MissingBranch),
        (Some(then), else_, None) => {
            debug!(passed, "rendered <If then>");
            Ok(if passed {
                then
            } else {
                else_.unwrap_or_default()
            })
        }
        (None, None, Some(children)) => {
            let selected = BranchTree::new(children).resolve(passed);
            debug!(passed, branch = ?selected.as_ref().map(|branch| branch.kind), "rendered <If>");
            Ok(selected.map_or(Node::Empty, |branch| Node::fragment(branch.content)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_form() {
        let yes = render_if(IfProps::new().test(1).then("yes").else_("no")).expect("renders");
        assert_eq!(yes, Node::text("yes"));

        let no = render_if(IfProps::new().test("").then("yes").else_("no")).expect("renders");
        assert_eq!(no, Node::text("no"));

        let nothing = render_if(IfProps::new().test(false).then("yes")).expect("renders");
        assert_eq!(nothing, Node::Empty);
    }

    #[test]
    fn test_child_form_suppresses_markers() {
        let node = render_if(
            IfProps::new()
                .test(true)
                .child("A")
                .child(Node::else_marker(vec![Node::text("B")])),
        )
        .expect("renders");
        assert_eq!(node, Node::Fragment(vec![Node::text("A")]));
    }

    #[test]
    fn test_validation_order() {
        assert_eq!(
            render_if(IfProps::new().then("x")).unwrap_err(),
            ConfigurationError::MissingTest
        );
        assert_eq!(
            render_if(IfProps::new().test(1).else_("x").child("y")).unwrap_err(),
            ConfigurationError::ElseWithoutThen
        );
        assert_eq!(
            render_if(IfProps::new().test(1).then("x").child("y")).unwrap_err(),
            ConfigurationError::MixedBranchStyles
        );
        assert_eq!(
            render_if(IfProps::new().test(1)).unwrap_err(),
            ConfigurationError::MissingBranch
        );
    }

    #[test]
    fn test_empty_children_are_allowed() {
        let node = render_if(IfProps::new().test(1).children(Vec::new())).expect("renders");
        assert_eq!(node, Node::Empty);
    }
}
