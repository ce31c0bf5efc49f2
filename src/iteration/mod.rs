//! `<For>`: render one node per item of a source
//!
//! Pipeline for one render:
//! 1. Validate the mapper slots (`as` / render-as-child)
//! 2. Resolve exactly one source (`of` / `in` / `condition`)
//! 3. Normalize into frames and call the mapper per item
//! 4. Inject the frame key into unkeyed elements
//! 5. Fall back to `if_empty` when nothing was produced
//!
//! Callback errors are the caller's own type and pass through untouched.

mod frame;
mod source;

pub use frame::{Frame, Key};
pub use source::{mapping_entries, sequence_entries, Entry, IterationSource, StateLoop};

use crate::{config::RenderConfig, node::Node, value::Value, ConfigurationError};
use source::{Condition, KeyFn, SourceProps, Step};
use std::fmt;
use tracing::{debug, debug_span, info, trace};

/// Per-item callback
///
/// The two variants stand in for arity detection: an item-only mapper never
/// sees the frame.
pub enum Mapper<'a, E = ConfigurationError> {
    /// Called with the item only
    Item(Box<dyn Fn(&Value) -> Result<Node, E> + 'a>),

    /// Called with the item and its frame
    WithFrame(Box<dyn Fn(&Value, &Frame) -> Result<Node, E> + 'a>),
}

impl<'a, E> Mapper<'a, E> {
    /// Item-only mapper
    pub fn item<F, N>(f: F) -> Self
    where
        F: Fn(&Value) -> N + 'a,
        N: Into<Node>,
    {
        Mapper::Item(Box::new(move |item: &Value| Ok(f(item).into())))
    }

    /// Frame-aware mapper
    pub fn with_frame<F, N>(f: F) -> Self
    where
        F: Fn(&Value, &Frame) -> N + 'a,
        N: Into<Node>,
    {
        Mapper::WithFrame(Box::new(move |item: &Value, frame: &Frame| {
            Ok(f(item, frame).into())
        }))
    }

    /// Fallible item-only mapper
    pub fn try_item<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<Node, E> + 'a,
    {
        Mapper::Item(Box::new(f))
    }

    /// Fallible frame-aware mapper
    pub fn try_with_frame<F>(f: F) -> Self
    where
        F: Fn(&Value, &Frame) -> Result<Node, E> + 'a,
    {
        Mapper::WithFrame(Box::new(f))
    }

    fn call(&self, item: &Value, frame: &Frame) -> Result<Node, E> {
        match self {
            Mapper::Item(f) => f(item),
            Mapper::WithFrame(f) => f(item, frame),
        }
    }
}

impl<E> fmt::Debug for Mapper<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mapper::Item(_) => f.write_str("Mapper::Item(..)"),
            Mapper::WithFrame(_) => f.write_str("Mapper::WithFrame(..)"),
        }
    }
}

/// What a mapper prop slot holds
///
/// Props are loosely typed: a slot can hold a plain value where a callback
/// was expected, which is a configuration error.
pub enum MapperSlot<'a, E = ConfigurationError> {
    /// A callable mapper
    Callable(Mapper<'a, E>),

    /// A non-callable value
    Value(Value),
}

impl<E> fmt::Debug for MapperSlot<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapperSlot::Callable(mapper) => mapper.fmt(f),
            MapperSlot::Value(value) => f.debug_tuple("MapperSlot::Value").field(value).finish(),
        }
    }
}

impl<'a, E> From<Mapper<'a, E>> for MapperSlot<'a, E> {
    fn from(mapper: Mapper<'a, E>) -> Self {
        MapperSlot::Callable(mapper)
    }
}

impl<E> From<Value> for MapperSlot<'_, E> {
    fn from(value: Value) -> Self {
        MapperSlot::Value(value)
    }
}

/// Content rendered when a source produces no items
pub enum Fallback<'a, E = ConfigurationError> {
    /// Render this node
    Node(Node),

    /// Call this producer and render its result
    Produce(Box<dyn Fn() -> Result<Node, E> + 'a>),
}

impl<'a, E> Fallback<'a, E> {
    /// Fixed fallback content
    pub fn node(node: impl Into<Node>) -> Self {
        Fallback::Node(node.into())
    }

    /// Lazily produced fallback content
    pub fn produce<F, N>(f: F) -> Self
    where
        F: Fn() -> N + 'a,
        N: Into<Node>,
    {
        Fallback::Produce(Box::new(move || Ok(f().into())))
    }

    /// Lazily produced, fallible fallback content
    pub fn try_produce<F>(f: F) -> Self
    where
        F: Fn() -> Result<Node, E> + 'a,
    {
        Fallback::Produce(Box::new(f))
    }

    fn render(self) -> Result<Node, E> {
        match self {
            Fallback::Node(node) => Ok(node),
            Fallback::Produce(produce) => produce(),
        }
    }
}

impl<E> fmt::Debug for Fallback<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::Node(node) => f.debug_tuple("Fallback::Node").field(node).finish(),
            Fallback::Produce(_) => f.write_str("Fallback::Produce(..)"),
        }
    }
}

impl<E> From<Node> for Fallback<'_, E> {
    fn from(node: Node) -> Self {
        Fallback::Node(node)
    }
}

impl<E> From<&str> for Fallback<'_, E> {
    fn from(text: &str) -> Self {
        Fallback::Node(Node::from(text))
    }
}

/// Props of one `<For>` render
///
/// Every prop is optional so that missing and duplicate props can be
/// reported the way a loosely-typed tree author would hit them.
pub struct ForProps<'a, E = ConfigurationError> {
    of: Option<Value>,
    in_: Option<Value>,
    condition: Option<Condition<'a, E>>,
    initial: Option<Value>,
    step: Option<Step<'a, E>>,
    key: Option<KeyFn<'a>>,
    as_: Option<MapperSlot<'a, E>>,
    children: Option<MapperSlot<'a, E>>,
    if_empty: Option<Fallback<'a, E>>,
    config: RenderConfig,
}

impl<'a> ForProps<'a> {
    /// Empty props whose callbacks report [`ConfigurationError`]
    pub fn new() -> Self {
        Self::fallible()
    }
}

impl<'a, E> ForProps<'a, E> {
    /// Empty props whose callbacks report the caller's own error type
    pub fn fallible() -> Self {
        Self {
            of: None,
            in_: None,
            condition: None,
            initial: None,
            step: None,
            key: None,
            as_: None,
            children: None,
            if_empty: None,
            config: RenderConfig::default(),
        }
    }

    /// `of`: array, array-like, or iterable
    pub fn of(mut self, list: impl Into<Value>) -> Self {
        self.of = Some(list.into());
        self
    }

    /// `in`: plain key-value object
    pub fn in_(mut self, object: impl Into<Value>) -> Self {
        self.in_ = Some(object.into());
        self
    }

    /// `condition`: continue while this holds for the current state
    pub fn condition<F>(self, condition: F) -> Self
    where
        F: Fn(&Value) -> bool + 'a,
    {
        self.try_condition(move |state| Ok(condition(state)))
    }

    /// Fallible `condition`
    pub fn try_condition<F>(mut self, condition: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, E> + 'a,
    {
        self.condition = Some(Box::new(condition));
        self
    }

    /// `initial`: first state of a state loop
    pub fn initial(mut self, state: impl Into<Value>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// `loop`: derive the next state from the current one
    pub fn step<F, V>(self, step: F) -> Self
    where
        F: Fn(&Value) -> V + 'a,
        V: Into<Value>,
    {
        self.try_step(move |state| Ok(step(state).into()))
    }

    /// Fallible `loop`
    pub fn try_step<F>(mut self, step: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, E> + 'a,
    {
        self.step = Some(Box::new(step));
        self
    }

    /// Identity for state-loop iterations (state loops are unkeyed otherwise)
    pub fn key<F, K>(mut self, key_of: F) -> Self
    where
        F: Fn(&Value) -> K + 'a,
        K: Into<Key>,
    {
        self.key = Some(Box::new(move |state: &Value| key_of(state).into()));
        self
    }

    /// `as` prop
    pub fn as_(mut self, mapper: impl Into<MapperSlot<'a, E>>) -> Self {
        self.as_ = Some(mapper.into());
        self
    }

    /// Render-as-child callback
    pub fn children(mut self, mapper: impl Into<MapperSlot<'a, E>>) -> Self {
        self.children = Some(mapper.into());
        self
    }

    /// `ifEmpty` fallback
    pub fn if_empty(mut self, fallback: impl Into<Fallback<'a, E>>) -> Self {
        self.if_empty = Some(fallback.into());
        self
    }

    /// Render configuration
    pub fn config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }
}

impl<E> fmt::Debug for ForProps<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForProps")
            .field("of", &self.of)
            .field("in", &self.in_)
            .field("condition", &self.condition.is_some())
            .field("initial", &self.initial)
            .field("loop", &self.step.is_some())
            .field("as", &self.as_)
            .field("children", &self.children)
            .field("if_empty", &self.if_empty)
            .field("config", &self.config)
            .finish()
    }
}

/// Render a `<For>` element
///
/// Returns a fragment with one mapped node per item, the fallback when the
/// source is empty, or [`Node::Empty`] when there is no fallback.
pub fn render_for<E>(props: ForProps<'_, E>) -> Result<Node, E>
where
    E: From<ConfigurationError>,
{
    let ForProps {
        of,
        in_,
        condition,
        initial,
        step,
        key,
        as_,
        children,
        if_empty,
        config,
    } = props;

    let mapper = select_mapper(as_, children)?;
    let source = IterationSource::resolve(SourceProps {
        of,
        in_,
        condition,
        initial,
        step,
        key,
    })?;

    let _span = debug_span!("render_for", source = source.kind()).entered();

    let mut rendered = Vec::new();
    match source {
        IterationSource::Sequence(list) => {
            let entries = sequence_entries(&list, config.shape_policy)?;
            map_entries(entries, &mapper, &mut rendered)?;
        }
        IterationSource::Mapping(object) => {
            let entries = mapping_entries(&object, config.shape_policy)?;
            map_entries(entries, &mapper, &mut rendered)?;
        }
        IterationSource::StateLoop(state_loop) => {
            state_loop.run(|state, frame| {
                rendered.push(map_item(&mapper, state, &frame)?);
                Ok(())
            })?;
        }
    }

    if config.verbose {
        info!(items = rendered.len(), "rendered <For>");
    } else {
        debug!(items = rendered.len(), "rendered <For>");
    }

    if rendered.is_empty() {
        return match if_empty {
            Some(fallback) => fallback.render(),
            None => Ok(Node::Empty),
        };
    }
    Ok(Node::Fragment(rendered))
}

/// Exactly one slot, and it must be callable
fn select_mapper<'a, E>(
    as_: Option<MapperSlot<'a, E>>,
    children: Option<MapperSlot<'a, E>>,
) -> Result<Mapper<'a, E>, ConfigurationError> {
    match (as_, children) {
        (Some(MapperSlot::Callable(mapper)), None) | (None, Some(MapperSlot::Callable(mapper))) => {
            Ok(mapper)
        }
        _ => Err(ConfigurationError::Mapper),
    }
}

fn map_entries<E>(
    entries: Vec<Entry<'_>>,
    mapper: &Mapper<'_, E>,
    rendered: &mut Vec<Node>,
) -> Result<(), E> {
    let length = entries.len();
    rendered.reserve(length);

    for (index, entry) in entries.into_iter().enumerate() {
        let frame = Frame::bounded(index, length, entry.key);
        trace!(index, key = ?frame.key, "iteration");
        rendered.push(map_item(mapper, &entry.item, &frame)?);
    }
    Ok(())
}

fn map_item<E>(mapper: &Mapper<'_, E>, item: &Value, frame: &Frame) -> Result<Node, E> {
    let node = mapper.call(item, frame)?;
    Ok(assign_key(node, frame))
}

/// Give an unkeyed element the frame's key; anything else passes through
fn assign_key(node: Node, frame: &Frame) -> Node {
    match &frame.key {
        Some(key) if node.is_element() && node.key().is_none() => node.with_key(key.to_string()),
        _ => node,
    }
}
