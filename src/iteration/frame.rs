//! Per-iteration metadata

use std::fmt;

/// Identity of one iteration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum Key {
    /// Position in a sequence
    Index(usize),

    /// Property name in a mapping (or caller-supplied state-loop key)
    Name(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{}", index),
            Key::Name(name) => f.write_str(name),
        }
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

/// Metadata handed to frame-aware mappers
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Frame {
    /// 0-based position in emission order
    pub index: usize,

    /// Total count; unknown for state loops
    pub length: Option<usize>,

    /// Iteration identity; absent for state loops without a key callback
    pub key: Option<Key>,

    /// `index == 0`
    pub is_first: bool,

    /// `index == length - 1`; always false when length is unknown
    pub is_last: bool,
}

impl Frame {
    /// Frame for a source of known length
    pub(crate) fn bounded(index: usize, length: usize, key: Key) -> Self {
        debug_assert!(index < length, "index {} out of bounds {}", index, length);
        Self {
            index,
            length: Some(length),
            key: Some(key),
            is_first: index == 0,
            is_last: index + 1 == length,
        }
    }

    /// Frame for a source whose length is decided by a condition
    pub(crate) fn unbounded(index: usize, key: Option<Key>) -> Self {
        Self {
            index,
            length: None,
            key,
            is_first: index == 0,
            is_last: false,
        }
    }
}
