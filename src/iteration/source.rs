//! Source resolution
//!
//! `of` / `in` / `condition` are resolved once into an [`IterationSource`].
//! Finite sources normalize into ordered [`Entry`] lists. State loops
//! stream instead, since their length is decided by the condition.

use super::frame::{Frame, Key};
use crate::{config::ShapePolicy, value::Value, ConfigurationError};
use std::borrow::Cow;
use std::fmt;
use tracing::trace;

/// Continuation predicate of a state loop
pub(crate) type Condition<'a, E> = Box<dyn Fn(&Value) -> Result<bool, E> + 'a>;

/// Advance function of a state loop (the `loop` prop)
pub(crate) type Step<'a, E> = Box<dyn Fn(&Value) -> Result<Value, E> + 'a>;

/// Caller-supplied identity for state-loop iterations
pub(crate) type KeyFn<'a> = Box<dyn Fn(&Value) -> Key + 'a>;

/// Source-selecting props, exactly as the caller supplied them
pub(crate) struct SourceProps<'a, E> {
    pub of: Option<Value>,
    pub in_: Option<Value>,
    pub condition: Option<Condition<'a, E>>,
    pub initial: Option<Value>,
    pub step: Option<Step<'a, E>>,
    pub key: Option<KeyFn<'a>>,
}

/// One normalized item of a finite source
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<'v> {
    /// The item, borrowed from the source where possible
    pub item: Cow<'v, Value>,
    /// Array position or property name
    pub key: Key,
}

/// The active source of one `<For>` render
pub enum IterationSource<'a, E> {
    /// Array, array-like, or iterable (`of`)
    Sequence(Value),
    /// Plain key-value object (`in`)
    Mapping(Value),
    /// `initial` advanced by `loop` while `condition` holds
    StateLoop(StateLoop<'a, E>),
}

impl<'a, E> IterationSource<'a, E> {
    /// Pick exactly one source from the caller's props
    pub(crate) fn resolve(props: SourceProps<'a, E>) -> Result<Self, ConfigurationError> {
        let SourceProps {
            of,
            in_,
            condition,
            initial,
            step,
            key,
        } = props;

        let source = match (of, in_, condition) {
            (Some(list), None, None) => IterationSource::Sequence(list),
            (None, Some(object), None) => IterationSource::Mapping(object),
            (None, None, Some(condition)) => {
                return match (initial, step) {
                    (Some(initial), Some(step)) => Ok(IterationSource::StateLoop(StateLoop {
                        initial,
                        condition,
                        step,
                        key,
                    })),
                    _ => Err(ConfigurationError::IncompleteStateLoop),
                };
            }
            _ => return Err(ConfigurationError::Source),
        };

        // State-loop props are meaningless without a condition.
        if initial.is_some() || step.is_some() || key.is_some() {
            return Err(ConfigurationError::IncompleteStateLoop);
        }
        Ok(source)
    }

    /// Short name for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            IterationSource::Sequence(_) => "sequence",
            IterationSource::Mapping(_) => "mapping",
            IterationSource::StateLoop(_) => "state-loop",
        }
    }
}

impl<E> fmt::Debug for IterationSource<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IterationSource::Sequence(list) => f.debug_tuple("Sequence").field(list).finish(),
            IterationSource::Mapping(object) => f.debug_tuple("Mapping").field(object).finish(),
            IterationSource::StateLoop(state_loop) => {
                f.debug_tuple("StateLoop").field(state_loop).finish()
            }
        }
    }
}

/// Normalize an `of` value into ordered entries keyed by position
///
/// Array-likes and iterables are materialized so `length` is known up front.
/// Falsy values produce no entries.
pub fn sequence_entries(
    list: &Value,
    policy: ShapePolicy,
) -> Result<Vec<Entry<'_>>, ConfigurationError> {
    if !list.is_truthy() {
        return Ok(Vec::new());
    }

    let items: Vec<Cow<'_, Value>> = match list {
        Value::List(items) => items.iter().map(Cow::Borrowed).collect(),
        Value::ArrayLike(array_like) => array_like.to_vec().into_iter().map(Cow::Owned).collect(),
        Value::Iterable(iterable) => iterable
            .collect_values()
            .into_iter()
            .map(Cow::Owned)
            .collect(),
        Value::Object(object) => {
            let length = list
                .array_like_length()
                .filter(|_| policy.detects_length_objects())
                .ok_or(ConfigurationError::OfRequiresCollection { found: "object" })?;
            // Grow as slots are read; `length` is caller data.
            let mut items = Vec::new();
            for index in 0..length {
                items.push(
                    object
                        .get(&index.to_string())
                        .map_or(Cow::Owned(Value::Null), Cow::Borrowed),
                );
            }
            items
        }
        other => {
            return Err(ConfigurationError::OfRequiresCollection {
                found: other.kind(),
            })
        }
    };

    Ok(items
        .into_iter()
        .enumerate()
        .map(|(index, item)| Entry {
            item,
            key: Key::Index(index),
        })
        .collect())
}

/// Normalize an `in` value into entries keyed by property name
///
/// Only plain, non-collection objects are accepted. Falsy values produce
/// no entries.
pub fn mapping_entries(
    object: &Value,
    policy: ShapePolicy,
) -> Result<Vec<Entry<'_>>, ConfigurationError> {
    if !object.is_truthy() {
        return Ok(Vec::new());
    }

    match object {
        Value::Object(_) if object.is_collection(policy) => {
            Err(ConfigurationError::InRequiresObject {
                found: "array-like object",
            })
        }
        Value::Object(map) => Ok(map
            .iter()
            .map(|(key, item)| Entry {
                item: Cow::Borrowed(item),
                key: Key::Name(key.clone()),
            })
            .collect()),
        other => Err(ConfigurationError::InRequiresObject {
            found: other.kind(),
        }),
    }
}

/// Implicit sequence generated from a state value
pub struct StateLoop<'a, E> {
    initial: Value,
    condition: Condition<'a, E>,
    step: Step<'a, E>,
    key: Option<KeyFn<'a>>,
}

impl<E> StateLoop<'_, E> {
    /// Drive the loop, visiting each state with its frame
    ///
    /// No iteration bound is enforced: a condition that never fails never
    /// returns. Returns the number of iterations.
    pub fn run<V>(self, mut visit: V) -> Result<usize, E>
    where
        V: FnMut(&Value, Frame) -> Result<(), E>,
    {
        let mut state = self.initial;
        let mut index = 0;

        while (self.condition)(&state)? {
            let key = self.key.as_ref().map(|key_of| key_of(&state));
            trace!(index, "state loop iteration");
            visit(&state, Frame::unbounded(index, key))?;
            state = (self.step)(&state)?;
            index += 1;
        }

        Ok(index)
    }
}

impl<E> fmt::Debug for StateLoop<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateLoop")
            .field("initial", &self.initial)
            .field("keyed", &self.key.is_some())
            .finish_non_exhaustive()
    }
}
