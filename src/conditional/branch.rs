//! Branch selection over a conditional's children
//!
//! Children split into primary content and markers. A passing test selects
//! the primary content; a failing one walks the markers in order and takes
//! the first that yields a branch. `ElseIf` recurses with its own children,
//! so chains nest to any depth.

use super::coerce_test;
use crate::node::{Element, ElementKind, Node};
use crate::value::Value;

/// Which branch of a chain was selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    /// Content of the conditional itself
    Primary,
    /// Content of an `ElseIf` whose test passed
    ElseIf,
    /// Content of an `Else`
    Else,
}

/// Selected branch with its content
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// Where the content came from
    pub kind: BranchKind,
    /// Nodes to render
    pub content: Vec<Node>,
}

enum Marker {
    Else(Vec<Node>),
    ElseIf { test: Value, children: Vec<Node> },
}

/// Children of a conditional, classified
#[derive(Debug, Clone, PartialEq)]
pub struct BranchTree {
    children: Vec<Node>,
}

impl BranchTree {
    /// Wrap a child list; nested fragments are flattened first
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            children: Node::flatten_children(children),
        }
    }

    /// Select at most one branch for the given test outcome
    ///
    /// Returns `None` when the test fails and no marker yields a branch.
    pub fn resolve(self, passed: bool) -> Option<Branch> {
        let (content, markers) = classify(self.children);
        if passed {
            return Some(Branch {
                kind: BranchKind::Primary,
                content,
            });
        }

        markers.into_iter().find_map(|marker| match marker {
            Marker::Else(content) => Some(Branch {
                kind: BranchKind::Else,
                content,
            }),
            Marker::ElseIf { test, children } => BranchTree::new(children)
                .resolve(coerce_test(&test))
                .map(|branch| match branch.kind {
                    BranchKind::Primary => Branch {
                        kind: BranchKind::ElseIf,
                        ..branch
                    },
                    _ => branch,
                }),
        })
    }
}

/// Split children into primary content and markers, both in document order
fn classify(children: Vec<Node>) -> (Vec<Node>, Vec<Marker>) {
    let mut content = Vec::new();
    let mut markers = Vec::new();

    for child in children {
        match child {
            Node::Element(Element {
                kind: ElementKind::Else,
                children,
                ..
            }) => markers.push(Marker::Else(children)),
            Node::Element(Element {
                kind: ElementKind::ElseIf(test),
                children,
                ..
            }) => markers.push(Marker::ElseIf { test, children }),
            other => content.push(other),
        }
    }

    (content, markers)
}
