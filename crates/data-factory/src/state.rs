//! Factory state: an insertion-ordered map of field names to unresolved values

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::FactoryResult;
use crate::factory::Factory;
use crate::sequence::Sequence;

type DeferredFn = dyn Fn() -> FactoryResult<Value> + Send + Sync;

/// A factory used as a field value, made afresh every time it is resolved
pub trait NestedFactory: Send + Sync {
    /// Clone the factory and make the clone, returning its output as JSON
    fn resolve(&self) -> FactoryResult<Value>;

    fn box_clone(&self) -> Box<dyn NestedFactory>;

    fn target(&self) -> &'static str;
}

impl<F: Factory> NestedFactory for F {
    fn resolve(&self) -> FactoryResult<Value> {
        let made = self.clone().make()?;
        Ok(serde_json::to_value(made)?)
    }

    fn box_clone(&self) -> Box<dyn NestedFactory> {
        Box::new(self.clone())
    }

    fn target(&self) -> &'static str {
        std::any::type_name::<F::Output>()
    }
}

/// Unresolved value of a single field
pub enum StateValue {
    Literal(Value),
    /// Computed when an instance is resolved
    Deferred(Arc<DeferredFn>),
    Nested(Box<dyn NestedFactory>),
    Sequence(Sequence),
}

impl StateValue {
    /// Wrap a factory so every resolution makes a fresh clone of it
    pub fn nested<F: Factory>(factory: F) -> Self {
        StateValue::Nested(Box::new(factory))
    }

    /// Defer a computation until resolution; its result is serialized into the field
    pub fn deferred<T, F>(f: F) -> Self
    where
        T: Serialize,
        F: Fn() -> FactoryResult<T> + Send + Sync + 'static,
    {
        StateValue::Deferred(Arc::new(move || -> FactoryResult<Value> {
            Ok(serde_json::to_value(f()?)?)
        }))
    }

    /// Serialize any value into a literal field
    pub fn literal<T: Serialize>(value: T) -> FactoryResult<Self> {
        Ok(StateValue::Literal(serde_json::to_value(value)?))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, StateValue::Sequence(_))
    }

    /// The literal value, if this field holds one
    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            StateValue::Literal(value) => Some(value),
            _ => None,
        }
    }
}

impl Clone for StateValue {
    fn clone(&self) -> Self {
        match self {
            StateValue::Literal(value) => StateValue::Literal(value.clone()),
            StateValue::Deferred(f) => StateValue::Deferred(Arc::clone(f)),
            StateValue::Nested(factory) => StateValue::Nested(factory.box_clone()),
            StateValue::Sequence(sequence) => StateValue::Sequence(sequence.clone()),
        }
    }
}

impl fmt::Debug for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            StateValue::Deferred(_) => f.write_str("Deferred(..)"),
            StateValue::Nested(factory) => f.debug_tuple("Nested").field(&factory.target()).finish(),
            StateValue::Sequence(sequence) => f.debug_tuple("Sequence").field(sequence).finish(),
        }
    }
}

impl From<Value> for StateValue {
    fn from(value: Value) -> Self {
        StateValue::Literal(value)
    }
}

impl From<Sequence> for StateValue {
    fn from(sequence: Sequence) -> Self {
        StateValue::Sequence(sequence)
    }
}

macro_rules! literal_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for StateValue {
                fn from(value: $ty) -> Self {
                    StateValue::Literal(Value::from(value))
                }
            }
        )*
    };
}

literal_from!(&str, String, bool, i32, i64, u32, u64, usize, f64);

impl From<DateTime<Utc>> for StateValue {
    fn from(value: DateTime<Utc>) -> Self {
        StateValue::Literal(Value::String(value.to_rfc3339()))
    }
}

impl<T: Into<Value>> From<Option<T>> for StateValue {
    fn from(value: Option<T>) -> Self {
        StateValue::Literal(value.map_or(Value::Null, Into::into))
    }
}

/// Ordered field map; re-inserting a key replaces its value in place
#[derive(Debug, Clone, Default)]
pub struct State {
    entries: IndexMap<String, StateValue>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StateValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StateValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut StateValue)> {
        self.entries.iter_mut()
    }

    /// Overlay `other` on top of this state; `other` wins on shared keys
    pub fn merge(&mut self, other: State) {
        self.entries.extend(other.entries);
    }

    pub(crate) fn sequences_mut(&mut self) -> impl Iterator<Item = &mut Sequence> {
        self.entries.values_mut().filter_map(|value| match value {
            StateValue::Sequence(sequence) => Some(sequence),
            _ => None,
        })
    }
}

impl<K: Into<String>, V: Into<StateValue>> FromIterator<(K, V)> for State {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut state = State::new();
        for (key, value) in iter {
            state.insert(key, value);
        }
        state
    }
}

/// Argument accepted by [`Factory::state`]
pub enum StateUpdate {
    /// Merged key-wise over the accumulated state
    Attributes(State),
    /// Stored under a synthetic key
    Sequence(Sequence),
}

impl From<State> for StateUpdate {
    fn from(state: State) -> Self {
        StateUpdate::Attributes(state)
    }
}

impl From<Sequence> for StateUpdate {
    fn from(sequence: Sequence) -> Self {
        StateUpdate::Sequence(sequence)
    }
}

/// Build a [`State`] from `key => value` pairs.
///
/// Values go through `Into<StateValue>`, so literals can be written directly
/// and nested factories, deferred values, and sequences are wrapped with the
/// `StateValue` constructors.
///
/// ```
/// use data_factory::{state, StateValue};
/// use serde_json::json;
///
/// let state = state! {
///     "make" => "Ford",
///     "tags" => json!(["blue", "used"]),
///     "year" => StateValue::deferred(|| Ok(2024)),
/// };
/// assert_eq!(state.len(), 3);
/// ```
#[macro_export]
macro_rules! state {
    () => {
        $crate::State::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut state = $crate::State::new();
        $(state.insert($key, $value);)+
        state
    }};
}
