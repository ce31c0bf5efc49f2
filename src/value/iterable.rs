//! Array-likes and lazy sequences
//!
//! Array-like = explicit `length` plus sparse indexed slots; holes read as null.
//! Iterable = lazy sequence, either a re-iterable factory or a one-shot iterator.

use super::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// `length` plus integer-indexed slots
///
/// Slots at or beyond `length` are kept but never visited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayLike {
    length: usize,
    slots: BTreeMap<usize, Value>,
}

impl ArrayLike {
    /// Create an array-like of the given length with every slot empty
    pub fn new(length: usize) -> Self {
        Self {
            length,
            slots: BTreeMap::new(),
        }
    }

    /// Fill slots from a dense list (e.g. a typed array)
    pub fn from_values(values: Vec<Value>) -> Self {
        Self {
            length: values.len(),
            slots: values.into_iter().enumerate().collect(),
        }
    }

    /// Builder: set a slot
    pub fn with(mut self, index: usize, value: impl Into<Value>) -> Self {
        self.set(index, value);
        self
    }

    /// Set a slot
    pub fn set(&mut self, index: usize, value: impl Into<Value>) {
        self.slots.insert(index, value.into());
    }

    /// Declared length
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether declared length is zero
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Read a slot; holes and out-of-range reads are null
    pub fn get(&self, index: usize) -> Value {
        if index >= self.length {
            return Value::Null;
        }
        self.slots.get(&index).cloned().unwrap_or_default()
    }

    /// Materialize `[0, length)` in order
    pub fn to_vec(&self) -> Vec<Value> {
        (0..self.length).map(|index| self.get(index)).collect()
    }
}

type Factory = dyn Fn() -> Box<dyn Iterator<Item = Value>>;
type OneShot = RefCell<Option<Box<dyn Iterator<Item = Value>>>>;

enum Producer {
    Factory(Box<Factory>),
    Once(OneShot),
}

/// Lazy sequence of values
///
/// A factory-backed iterable yields a fresh iterator each time it is walked,
/// so repeated renders see the same items. A one-shot iterable wraps an
/// iterator that is drained by the first walk; later walks see nothing.
///
/// Clones share the same producer.
#[derive(Clone)]
pub struct Iterable {
    producer: Rc<Producer>,
}

impl Iterable {
    /// Re-iterable sequence built from a factory
    pub fn from_fn<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        let factory: Box<Factory> = Box::new(move || Box::new(factory().into_iter()));
        Self {
            producer: Rc::new(Producer::Factory(factory)),
        }
    }

    /// Re-iterable sequence over a snapshot of values (set-like)
    pub fn from_values(values: Vec<Value>) -> Self {
        let values = Rc::new(values);
        Self::from_fn(move || (*values).clone())
    }

    /// One-shot sequence over an existing iterator
    pub fn once<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        let iter: Box<dyn Iterator<Item = Value>> = Box::new(iter.into_iter());
        Self {
            producer: Rc::new(Producer::Once(RefCell::new(Some(iter)))),
        }
    }

    /// Whether walking this iterable can be repeated
    pub fn is_reiterable(&self) -> bool {
        matches!(*self.producer, Producer::Factory(_))
    }

    /// Walk the sequence and collect it in order
    pub fn collect_values(&self) -> Vec<Value> {
        match &*self.producer {
            Producer::Factory(factory) => factory().collect(),
            Producer::Once(cell) => cell
                .borrow_mut()
                .take()
                .map(|iter| iter.collect())
                .unwrap_or_default(),
        }
    }
}

impl PartialEq for Iterable {
    /// Identity comparison: two iterables are equal when they share a producer
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.producer, &other.producer)
    }
}

impl fmt::Debug for Iterable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iterable")
            .field("reiterable", &self.is_reiterable())
            .finish_non_exhaustive()
    }
}
