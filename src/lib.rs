//! # Declarative control flow for render trees
//!
//! This library implements two control-flow primitives for a tree-based
//! render model, where a component is a pure function from props to nodes
//! and the tree is re-evaluated top-down on every render pass.
//!
//! ## Primitives
//!
//! 1. **Iteration** ([`render_for`]): normalize a source (array, array-like,
//!    lazy iterable, key-value object, or state loop) into ordered frames,
//!    map each item to a node, and inject per-item identity keys
//! 2. **Conditional** ([`render_if`]): select exactly one branch among the
//!    primary content and chained `ElseIf` / `Else` markers
//!
//! Both are synchronous and pure: the same props always render the same
//! nodes with the same keys.
//!
//! ## Usage Example
//!
//! ```
//! use render_loops::{render_for, render_if, Element, ForProps, IfProps, Mapper, Node, Value};
//!
//! let list = Value::from(vec![Value::from("A"), Value::from("B")]);
//! let items = render_for(
//!     ForProps::new()
//!         .of(list)
//!         .as_(Mapper::item(|item| Element::new("li").child(item.to_string()))),
//! )?;
//! assert_eq!(items.to_markup(), r#"<li key="0">A</li><li key="1">B</li>"#);
//!
//! let branch = render_if(
//!     IfProps::new()
//!         .test(0)
//!         .child("primary")
//!         .child(Node::else_marker(vec![Node::from("fallback")])),
//! )?;
//! assert_eq!(branch.to_markup(), "fallback");
//! # Ok::<(), render_loops::ConfigurationError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

// Core modules
pub mod config;      // Render configuration and shape policy
pub mod value;       // Host values carried through props
pub mod node;        // Renderable node tree (host model)
pub mod iteration;   // <For> loops
pub mod conditional; // <If> / <ElseIf> / <Else>

// Re-exports for convenience
pub use conditional::{coerce_test, render_if, BranchKind, BranchTree, IfProps};
pub use config::{RenderConfig, ShapePolicy};
pub use iteration::{render_for, Fallback, ForProps, Frame, Key, Mapper, MapperSlot};
pub use node::{Element, ElementKind, Node};
pub use value::{ArrayLike, Iterable, Object, Value};

use thiserror::Error;

/// Contract violations detected at a component boundary
///
/// Raised before any iteration or branch selection happens. Errors coming
/// from caller callbacks never pass through this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Neither or both of `as` and render-as-child given, or the one given is not callable
    #[error("<For> expects either a render-prop child or a Function `as` prop (missing or duplicate mapper)")]
    Mapper,

    /// Not exactly one of `of`, `in`, `condition`
    #[error("<For> expects exactly one of an Iterable `of`, an Object `in`, or a `condition` prop (missing or duplicate source)")]
    Source,

    /// State loop without `initial` or `loop`, or those without `condition`
    #[error("<For condition> requires both `initial` and a Function `loop` prop (incomplete state-loop spec)")]
    IncompleteStateLoop,

    /// `in` given a collection or a non-object
    #[error("<For in={{}}> expects a non-collection Object, got {found}. Perhaps you meant to use <For of={{}}> with a Collection?")]
    InRequiresObject {
        /// Kind of value that was supplied
        found: &'static str,
    },

    /// `of` given something that is not an Array, Array-like, or Iterable
    #[error("<For of={{}}> expects an Array, Array-like, or Iterable collection, got {found}. Perhaps you meant to use <For in={{}}> with an Object?")]
    OfRequiresCollection {
        /// Kind of value that was supplied
        found: &'static str,
    },

    /// `<If>` without a `test`
    #[error("<If> requires a `test` prop")]
    MissingTest,

    /// `else` supplied without `then`
    #[error("<If> received an `else` prop without a `then` prop")]
    ElseWithoutThen,

    /// Neither `then` nor children
    #[error("<If> expects either a `then` prop or children")]
    MissingBranch,

    /// Both `then` and children
    #[error("<If> expects either a `then` prop or children, not both")]
    MixedBranchStyles,
}
