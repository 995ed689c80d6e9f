//! Factory system for test data generation
//!
//! A concrete factory is a small struct that owns a [`FactoryBuilder`]
//! (exposed through [`FactoryStorage`], usually generated with
//! [`define_factory!`](crate::define_factory)) and implements [`Factory`]: it
//! supplies a `definition` of default field values and names the
//! [`Materialize`] type it produces. Everything else (named
//! states, sequences, batch counts, per-call overrides, nested factories) is
//! provided by the trait.
//!
//! ```
//! use data_factory::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Vehicle {
//!     make: String,
//!     model: String,
//! }
//!
//! data_object!(Vehicle);
//!
//! #[derive(Clone)]
//! struct VehicleFactory {
//!     builder: FactoryBuilder,
//! }
//!
//! impl FactoryStorage for VehicleFactory {
//!     fn from_builder(builder: FactoryBuilder) -> Self {
//!         Self { builder }
//!     }
//!
//!     fn builder(&self) -> &FactoryBuilder {
//!         &self.builder
//!     }
//!
//!     fn builder_mut(&mut self) -> &mut FactoryBuilder {
//!         &mut self.builder
//!     }
//! }
//!
//! impl Factory for VehicleFactory {
//!     type Output = Vehicle;
//!
//!     fn definition(&self, fake: &Faker) -> State {
//!         state! {
//!             "make" => fake.company(),
//!             "model" => fake.word(),
//!         }
//!     }
//! }
//!
//! # fn main() -> FactoryResult<()> {
//! let vehicles = VehicleFactory::new()
//!     .sequence([json!({"make": "Ford"}), json!({"make": "Chevy"})])
//!     .count(3)
//!     .make()?
//!     .into_many();
//!
//! let makes: Vec<&str> = vehicles.iter().map(|v| v.make.as_str()).collect();
//! assert_eq!(makes, vec!["Ford", "Chevy", "Ford"]);
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use uuid::Uuid;

use crate::error::{FactoryError, FactoryResult};
use crate::fake::Faker;
use crate::sequence::{Sequence, Slot};
use crate::state::{State, StateUpdate};

mod resolve;
pub mod traits;

pub use traits::{construct, ArrayFactory, Attributes, HasFactory, Materialize};

/// Per-factory storage: accumulated state, target count and fake-value provider
#[derive(Debug, Clone)]
pub struct FactoryBuilder {
    state: State,
    count: usize,
    fake: Faker,
    pending_error: Option<String>,
}

impl FactoryBuilder {
    /// Create a new factory builder
    pub fn new() -> Self {
        Self::with_faker(Faker::new())
    }

    /// Create a builder around a specific fake-value provider
    pub fn with_faker(fake: Faker) -> Self {
        Self {
            state: State::new(),
            count: 1,
            fake,
            pending_error: None,
        }
    }

    /// Accumulated `state()` and `sequence()` layers
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn fake(&self) -> &Faker {
        &self.fake
    }

    fn record_error(&mut self, error: FactoryError) {
        tracing::debug!("Deferring factory configuration error: {}", error);
        if self.pending_error.is_none() {
            let message = match error {
                FactoryError::InvalidConstruction { message } => message,
                other => other.to_string(),
            };
            self.pending_error = Some(message);
        }
    }
}

impl Default for FactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of [`Factory::make`]: one instance when the count is 1, a list otherwise
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Made<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Made<T> {
    pub fn len(&self) -> usize {
        match self {
            Made::One(_) => 1,
            Made::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Made::One(_))
    }

    /// The single instance; fails when the factory produced a batch
    pub fn into_one(self) -> FactoryResult<T> {
        match self {
            Made::One(item) => Ok(item),
            Made::Many(items) => Err(FactoryError::UnexpectedBatch { count: items.len() }),
        }
    }

    /// All instances as a list; a single instance becomes a list of one
    pub fn into_many(self) -> Vec<T> {
        match self {
            Made::One(item) => vec![item],
            Made::Many(items) => items,
        }
    }

    /// First instance, whether one or many were made
    pub fn first(&self) -> Option<&T> {
        self.iter().next()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Made::One(item) => std::slice::from_ref(item).iter(),
            Made::Many(items) => items.iter(),
        }
    }
}

impl<T> IntoIterator for Made<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_many().into_iter()
    }
}

/// Access to the [`FactoryBuilder`] a concrete factory owns
pub trait FactoryStorage {
    fn from_builder(builder: FactoryBuilder) -> Self;

    fn builder(&self) -> &FactoryBuilder;

    fn builder_mut(&mut self) -> &mut FactoryBuilder;
}

/// Core factory trait that all data factories implement
pub trait Factory: FactoryStorage + Clone + Send + Sync + 'static {
    /// What one resolved instance materializes into
    type Output: Materialize;

    /// Default attributes for one instance
    fn definition(&self, fake: &Faker) -> State;

    /// Create a new factory with a fresh fake-value provider
    fn new() -> Self {
        Self::from_builder(FactoryBuilder::new())
    }

    fn fake(&self) -> &Faker {
        self.builder().fake()
    }

    /// Merge attributes over the accumulated state, or register a sequence
    fn state(&mut self, update: impl Into<StateUpdate>) -> &mut Self {
        match update.into() {
            StateUpdate::Attributes(attributes) => self.builder_mut().state.merge(attributes),
            StateUpdate::Sequence(sequence) => {
                let key = format!("__sequence_{}", Uuid::new_v4().simple());
                tracing::trace!("Registering sequence of {} slot(s) as {}", sequence.len(), key);
                self.builder_mut().state.insert(key, sequence);
            }
        }
        self
    }

    /// Merge attributes computed from the current state.
    ///
    /// The snapshot handed to `f` becomes the accumulated state, so the
    /// definition values it exposes are the ones every later instance uses.
    fn state_using<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&State) -> State,
    {
        let current = self.current_state();
        let partial = f(&current);
        self.builder_mut().state = current;
        self.state(partial)
    }

    /// Cycle through `slots` across the instances of a batch.
    ///
    /// An empty slot list is reported by the next `make()`.
    fn sequence<I, S>(&mut self, slots: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Slot>,
    {
        match Sequence::new(slots) {
            Ok(sequence) => self.state(sequence),
            Err(error) => {
                self.builder_mut().record_error(error);
                self
            }
        }
    }

    /// Number of instances the next `make()` produces
    fn count(&mut self, count: usize) -> &mut Self {
        self.builder_mut().count = count;
        self
    }

    /// Fresh definition with the accumulated state merged on top
    fn current_state(&self) -> State {
        let mut current = self.definition(self.fake());
        current.merge(self.builder().state.clone());
        current
    }

    fn make(&mut self) -> FactoryResult<Made<Self::Output>> {
        self.make_with(State::new())
    }

    /// Make instances with `overrides` taking precedence over every other source
    fn make_with(&mut self, overrides: State) -> FactoryResult<Made<Self::Output>> {
        if let Some(message) = self.builder().pending_error.clone() {
            return Err(FactoryError::InvalidConstruction { message });
        }

        tracing::debug!(
            "Making {} instance(s) of {}",
            self.builder().count,
            std::any::type_name::<Self::Output>()
        );

        resolve::make(self, overrides)
    }
}
