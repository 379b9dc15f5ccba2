//! Generic insertion-ordered entity storage.
//!
//! # Layout
//!
//! Entities live in a dense `Vec<E>` in insertion order; an `FxHashMap`
//! maps each id to its position:
//!
//! ```text
//! index: { "EV-001" → 0, "EV-002" → 1, … }
//! items: [ Vehicle(EV-001), Vehicle(EV-002), … ]
//! ```
//!
//! `get` is one hash lookup plus one indexed read, and `list` is a plain
//! slice, so every view iterates in the same stable order.  Removal shifts
//! the tail down and re-indexes it, which keeps the order of the survivors.

use std::fmt::Display;
use std::hash::Hash;

use fw_core::{EntityKind, FleetError, FleetResult};
use rustc_hash::FxHashMap;

/// A record that can be held in an [`EntityStore`].
pub trait Entity {
    type Id: Clone + Eq + Hash + Display;

    /// Collection name used in `NotFound` errors.
    const KIND: EntityKind;

    fn id(&self) -> &Self::Id;
}

/// Insertion-ordered map from id to entity.
///
/// Read access is public.  Mutation is `pub(crate)` so that every write goes
/// through a named [`FleetState`](crate::FleetState) operation.
#[derive(Clone, Debug)]
pub struct EntityStore<E: Entity> {
    items: Vec<E>,
    index: FxHashMap<E::Id, usize>,
}

impl<E: Entity> Default for EntityStore<E> {
    fn default() -> Self {
        Self { items: Vec::new(), index: FxHashMap::default() }
    }
}

impl<E: Entity> EntityStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: &E::Id) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &E::Id) -> Option<&E> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    /// Like [`get`](Self::get) but reports a missing id as `NotFound`.
    pub fn require(&self, id: &E::Id) -> FleetResult<&E> {
        self.get(id).ok_or_else(|| FleetError::not_found(E::KIND, id))
    }

    /// All entities in insertion order.
    #[inline]
    pub fn list(&self) -> &[E] {
        &self.items
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.items.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &E::Id> + '_ {
        self.items.iter().map(Entity::id)
    }

    // ── Crate-private mutation ────────────────────────────────────────────

    pub(crate) fn get_mut(&mut self, id: &E::Id) -> Option<&mut E> {
        self.index.get(id).map(|&i| &mut self.items[i])
    }

    pub(crate) fn require_mut(&mut self, id: &E::Id) -> FleetResult<&mut E> {
        match self.index.get(id) {
            Some(&i) => Ok(&mut self.items[i]),
            None => Err(FleetError::not_found(E::KIND, id)),
        }
    }

    /// Insert `entity`, or replace the entity with the same id in place.
    /// Returns the replaced entity.
    pub(crate) fn upsert(&mut self, entity: E) -> Option<E> {
        match self.index.get(entity.id()) {
            Some(&i) => Some(std::mem::replace(&mut self.items[i], entity)),
            None => {
                self.index.insert(entity.id().clone(), self.items.len());
                self.items.push(entity);
                None
            }
        }
    }

    /// Remove the entity with `id`, preserving the order of the rest.
    pub(crate) fn remove(&mut self, id: &E::Id) -> Option<E> {
        let pos = self.index.remove(id)?;
        let removed = self.items.remove(pos);
        for item in &self.items[pos..] {
            if let Some(slot) = self.index.get_mut(item.id()) {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, E> {
        self.items.iter_mut()
    }
}

impl<'a, E: Entity> IntoIterator for &'a EntityStore<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
