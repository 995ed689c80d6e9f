//! Cyclic value sequences
//!
//! A [`Sequence`] hands out its slots in order and wraps around when it runs
//! out, which lets a batch of `n` instances cycle through `m` patterns.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::{FactoryError, FactoryResult};

type SlotFn = dyn Fn(&Sequence) -> Value + Send + Sync;

/// One entry of a sequence
#[derive(Clone)]
pub enum Slot {
    /// Returned as-is
    Value(Value),
    /// Called with the sequence, so it can read the current cursor
    Computed(Arc<SlotFn>),
}

impl Slot {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Sequence) -> Value + Send + Sync + 'static,
    {
        Slot::Computed(Arc::new(f))
    }
}

impl From<Value> for Slot {
    fn from(value: Value) -> Self {
        Slot::Value(value)
    }
}

impl From<&str> for Slot {
    fn from(value: &str) -> Self {
        Slot::Value(Value::from(value))
    }
}

impl From<String> for Slot {
    fn from(value: String) -> Self {
        Slot::Value(Value::from(value))
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Slot::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Cursor-tracked cycle over a non-empty list of slots
#[derive(Debug, Clone)]
pub struct Sequence {
    slots: Vec<Slot>,
    cursor: usize,
}

impl Sequence {
    /// Build a sequence, failing when `slots` is empty
    pub fn new<I, S>(slots: I) -> FactoryResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Slot>,
    {
        let slots: Vec<Slot> = slots.into_iter().map(Into::into).collect();
        if slots.is_empty() {
            return Err(FactoryError::invalid_construction(
                "Sequence must contain at least one value",
            ));
        }

        Ok(Self { slots, cursor: 0 })
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false`; kept for parity with `len`
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// How many times the sequence has been invoked since the last reset
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Produce the value under the cursor and advance.
    ///
    /// Computed slots observe the cursor before it is incremented.
    pub fn invoke(&mut self) -> Value {
        let value = match &self.slots[self.cursor % self.slots.len()] {
            Slot::Value(value) => value.clone(),
            Slot::Computed(f) => f(self),
        };
        self.cursor = self.cursor.wrapping_add(1);
        value
    }
}
