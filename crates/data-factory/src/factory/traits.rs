//! Materialization and companion-factory traits

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::Factory;
use crate::error::{FactoryError, FactoryResult};

/// A fully resolved instance before materialization
pub type Attributes = Map<String, Value>;

/// Turns resolved attributes into the value a factory hands back
pub trait Materialize: Serialize + Sized {
    fn materialize(attributes: Attributes) -> FactoryResult<Self>;
}

/// Records are returned verbatim
impl Materialize for Attributes {
    fn materialize(attributes: Attributes) -> FactoryResult<Self> {
        Ok(attributes)
    }
}

/// Build `T` from named fields.
///
/// Missing fields and type mismatches surface as [`FactoryError::Resolution`].
pub fn construct<T: DeserializeOwned>(attributes: Attributes) -> FactoryResult<T> {
    serde_json::from_value(Value::Object(attributes)).map_err(|source| {
        let target = std::any::type_name::<T>();
        tracing::warn!("Failed to materialize {}: {}", target, source);
        FactoryError::Resolution { target, source }
    })
}

/// Factories producing plain attribute records instead of typed values
pub trait ArrayFactory: Factory<Output = Attributes> {
    /// Make records, always as a list
    fn records(&mut self) -> FactoryResult<Vec<Attributes>> {
        Ok(self.make()?.into_many())
    }
}

impl<F: Factory<Output = Attributes>> ArrayFactory for F {}

/// Data objects that know their companion factory
pub trait HasFactory: Materialize {
    type Factory: Factory<Output = Self>;

    /// A freshly constructed companion factory
    fn factory() -> Self::Factory {
        <Self::Factory as Factory>::new()
    }
}

/// Declare a factory struct holding a [`FactoryBuilder`](crate::FactoryBuilder).
///
/// Generates the struct and its [`FactoryStorage`](crate::FactoryStorage)
/// impl; the [`Factory`](crate::Factory) impl with the definition is written
/// by hand.
///
/// ```
/// use data_factory::prelude::*;
///
/// define_factory! {
///     /// Plain vehicle records
///     pub struct VehicleRecordFactory;
/// }
///
/// impl Factory for VehicleRecordFactory {
///     type Output = Attributes;
///
///     fn definition(&self, fake: &Faker) -> State {
///         state! { "make" => fake.company(), "model" => fake.word() }
///     }
/// }
///
/// let records = VehicleRecordFactory::new().count(2).records().unwrap();
/// assert_eq!(records.len(), 2);
/// ```
#[macro_export]
macro_rules! define_factory {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            builder: $crate::FactoryBuilder,
        }

        impl $crate::FactoryStorage for $name {
            fn from_builder(builder: $crate::FactoryBuilder) -> Self {
                Self { builder }
            }

            fn builder(&self) -> &$crate::FactoryBuilder {
                &self.builder
            }

            fn builder_mut(&mut self) -> &mut $crate::FactoryBuilder {
                &mut self.builder
            }
        }
    };
}

/// Materialize types by named-field construction through their `Deserialize` impl
#[macro_export]
macro_rules! data_object {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Materialize for $ty {
                fn materialize(attributes: $crate::Attributes) -> $crate::FactoryResult<Self> {
                    $crate::construct(attributes)
                }
            }
        )+
    };
}
