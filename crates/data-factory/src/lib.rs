//! # data-factory - Declarative Test Data Factories
//!
//! Build populated data objects or plain records for test suites from a
//! declarative definition of default field values.
//!
//! ## Features
//!
//! - **Definitions**: default field values computed with a per-factory [`Faker`]
//! - **States**: fluent `state()` layers that persist across `make()` calls
//! - **Sequences**: cycle field values across the instances of a batch
//! - **Nested factories**: factories as field values, made fresh on every resolution
//! - **Deferred values**: closures evaluated when an instance is resolved
//! - **Records**: factories whose output is the resolved attribute map itself
//!
//! ## Quick Start
//!
//! ```rust
//! use data_factory::prelude::*;
//!
//! define_factory! {
//!     pub struct VehicleRecordFactory;
//! }
//!
//! impl Factory for VehicleRecordFactory {
//!     type Output = Attributes;
//!
//!     fn definition(&self, fake: &Faker) -> State {
//!         state! { "make" => fake.company(), "model" => fake.word() }
//!     }
//! }
//!
//! # fn main() -> FactoryResult<()> {
//! let record = VehicleRecordFactory::new()
//!     .make_with(state! { "make" => "Toyota", "model" => "Corolla" })?
//!     .into_one()?;
//!
//! assert_eq!(record["make"], json!("Toyota"));
//! assert_eq!(record["model"], json!("Corolla"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod fake;
pub mod sequence;
pub mod state;

// Re-export commonly used types
pub use config::{factory_config, set_factory_config, FactoryConfig};
pub use error::{FactoryError, FactoryResult};
pub use factory::{
    construct, ArrayFactory, Attributes, Factory, FactoryBuilder, FactoryStorage, HasFactory, Made,
    Materialize,
};
pub use fake::Faker;
pub use sequence::{Sequence, Slot};
pub use state::{NestedFactory, State, StateUpdate, StateValue};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        data_object, define_factory, state, ArrayFactory, Attributes, Factory, FactoryBuilder,
        FactoryError, FactoryResult, FactoryStorage, Faker, HasFactory, Made, Materialize,
        Sequence, Slot, State, StateValue,
    };

    pub use chrono::{DateTime, Utc};
    pub use serde_json::{json, Value as JsonValue};
}
