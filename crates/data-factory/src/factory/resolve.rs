//! Per-instance resolution pipeline behind `Factory::make`

use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

use super::{Attributes, Factory, Made, Materialize};
use crate::error::FactoryResult;
use crate::state::{NestedFactory, State, StateValue};

type DeferredFn = dyn Fn() -> FactoryResult<Value> + Send + Sync;

/// A field after sequence expansion, before nested resolution
enum Pending<'a> {
    Ready(Value),
    Deferred(&'a Arc<DeferredFn>),
    Nested(&'a dyn NestedFactory),
}

pub(super) fn make<F: Factory>(factory: &mut F, overrides: State) -> FactoryResult<Made<F::Output>> {
    let count = factory.builder().count;
    let mut accumulated = std::mem::take(&mut factory.builder_mut().state);
    let mut overrides = overrides;

    let made = produce(factory, &mut accumulated, &mut overrides, count);

    for sequence in accumulated.sequences_mut() {
        sequence.reset();
    }
    factory.builder_mut().state = accumulated;

    made
}

fn produce<F: Factory>(
    factory: &F,
    accumulated: &mut State,
    overrides: &mut State,
    count: usize,
) -> FactoryResult<Made<F::Output>> {
    if count == 1 {
        return Ok(Made::One(make_instance(factory, accumulated, overrides)?));
    }

    let mut instances = Vec::with_capacity(count);
    for _ in 0..count {
        instances.push(make_instance(factory, accumulated, overrides)?);
    }
    Ok(Made::Many(instances))
}

fn make_instance<F: Factory>(
    factory: &F,
    accumulated: &mut State,
    overrides: &mut State,
) -> FactoryResult<F::Output> {
    let pinned: HashSet<String> = overrides
        .iter()
        .filter(|(_, value)| !value.is_sequence())
        .map(|(key, _)| key.to_string())
        .collect();

    let mut defaults = factory.definition(factory.fake());

    // definition < accumulated state < overrides
    let mut layered: IndexMap<String, &mut StateValue> = IndexMap::new();
    for layer in [&mut defaults, accumulated, overrides] {
        for (key, value) in layer.iter_mut() {
            layered.insert(key.clone(), value);
        }
    }

    let expanded = expand_sequences(layered, &pinned);
    let attributes = resolve_nested(expanded)?;

    <F::Output as Materialize>::materialize(attributes)
}

/// Invoke every sequence once and splice mapping results into the field set
fn expand_sequences<'a>(
    layered: IndexMap<String, &'a mut StateValue>,
    pinned: &HashSet<String>,
) -> IndexMap<String, Pending<'a>> {
    let mut expanded = IndexMap::with_capacity(layered.len());

    for (key, value) in layered {
        match value {
            StateValue::Sequence(sequence) => match sequence.invoke() {
                Value::Object(fields) => {
                    for (field, field_value) in fields {
                        if !pinned.contains(&field) {
                            expanded.insert(field, Pending::Ready(field_value));
                        }
                    }
                }
                scalar => {
                    tracing::trace!("Discarding non-mapping sequence value {} from {}", scalar, key);
                }
            },
            StateValue::Literal(literal) => {
                expanded.insert(key, Pending::Ready(literal.clone()));
            }
            StateValue::Deferred(f) => {
                expanded.insert(key, Pending::Deferred(f));
            }
            StateValue::Nested(nested) => {
                expanded.insert(key, Pending::Nested(&**nested));
            }
        }
    }

    expanded
}

/// Run deferred computations and make nested factories
fn resolve_nested(expanded: IndexMap<String, Pending<'_>>) -> FactoryResult<Attributes> {
    let mut attributes = Attributes::new();

    for (key, pending) in expanded {
        let value = match pending {
            Pending::Ready(value) => value,
            Pending::Deferred(f) => f()?,
            Pending::Nested(nested) => {
                tracing::trace!("Resolving nested {} for {}", nested.target(), key);
                nested.resolve()?
            }
        };
        attributes.insert(key, value);
    }

    Ok(attributes)
}
