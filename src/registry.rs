use std::collections::btree_map::{BTreeMap, Entry, Values};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::label::Id;
use crate::validation::{ValidationResult, Violation};

/// A raw, unvalidated record supplied to construct or update an
/// entity.
pub type Slots = Map<String, Value>;

/// A persisted document: a map from decimal ID to record.
pub type Document = Map<String, Value>;

/// An entity that can be kept in a [`Registry`].
pub trait Entity: Clone + Serialize {
    /// The singular name of the entity type, for messages and logs.
    const NAME: &'static str;

    fn id(&self) -> Id;
}

/// Turns a JSON value into slots, rejecting anything but an object.
pub fn slots_from_value(value: Value) -> ValidationResult<Slots> {
    match value {
        Value::Object(slots) => Ok(slots),
        other => Err(Violation::Constraint(format!(
            "A record must be a JSON object, not {}",
            other
        ))),
    }
}

/// The in-memory population of one entity type, keyed by ID.
#[derive(Clone, Debug, PartialEq)]
pub struct Registry<E> {
    instances: BTreeMap<Id, E>,
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Registry {
            instances: BTreeMap::new(),
        }
    }
}

impl<E: Entity> Registry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn contains(&self, id: Id) -> bool {
        self.instances.contains_key(&id)
    }

    pub fn get(&self, id: Id) -> Option<&E> {
        self.instances.get(&id)
    }

    /// Iterates over the instances in ascending ID order.
    pub fn iter(&self) -> Values<'_, Id, E> {
        self.instances.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.instances.keys().copied()
    }

    /// Inserts a validated instance, replacing any instance with the
    /// same ID, and returns the stored instance.
    pub(crate) fn insert(&mut self, entity: E) -> &E {
        match self.instances.entry(entity.id()) {
            Entry::Occupied(mut occupied) => {
                occupied.insert(entity);
                occupied.into_mut()
            }
            Entry::Vacant(vacant) => vacant.insert(entity),
        }
    }

    pub(crate) fn remove(&mut self, id: Id) -> Option<E> {
        self.instances.remove(&id)
    }

    pub(crate) fn clear(&mut self) {
        self.instances.clear();
    }

    /// Serializes the instances accepted by `filter` into a document.
    pub fn to_document(&self, filter: impl Fn(&E) -> bool) -> serde_json::Result<Document> {
        self.iter()
            .filter(|e| filter(e))
            .map(|e| -> serde_json::Result<(String, Value)> {
                Ok((e.id().to_string(), serde_json::to_value(e)?))
            })
            .collect()
    }
}

impl<'a, E> IntoIterator for &'a Registry<E> {
    type Item = &'a E;
    type IntoIter = Values<'a, Id, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.instances.values()
    }
}
