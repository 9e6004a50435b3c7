//! Keyed in-memory entity collection.
//!
//! # Responsibility
//! - Provide the synchronous, total mutation operations the UI state
//!   depends on.
//!
//! # Invariants
//! - Identifiers are unique within a collection.
//! - Mutations never fail: absence of a target row is a silent no-op.
//! - Insertion order is preserved from the source.

use crate::model::{EntityId, StoreEntity};
use log::warn;

/// Ordered, keyed collection of one entity kind with an optional current
/// selection.
#[derive(Debug)]
pub struct EntityStore<T: StoreEntity> {
    rows: Vec<T>,
    selected: Option<EntityId>,
}

impl<T: StoreEntity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoreEntity> EntityStore<T> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            selected: None,
        }
    }

    /// Wholesale replacement after a fresh fetch; keeps source order and
    /// clears a selection that no longer resolves.
    pub fn replace(&mut self, rows: Vec<T>) {
        self.rows = rows;
        if let Some(selected) = self.selected {
            if self.get(selected).is_none() {
                self.selected = None;
            }
        }
    }

    /// Appends one entity and moves the selection to it.
    ///
    /// A duplicate id would break collection invariants; the row is
    /// ignored with a warning instead of silently shadowing.
    pub fn add(&mut self, row: T) {
        let id = row.entity_id();
        if self.get(id).is_some() {
            warn!("event=store_add module=sync status=duplicate id={id}");
            return;
        }
        self.rows.push(row);
        self.selected = Some(id);
    }

    /// Replaces the entity with the same identifier; no-op when absent.
    ///
    /// Update never inserts.
    pub fn update(&mut self, row: T) {
        let id = row.entity_id();
        if let Some(slot) = self.rows.iter_mut().find(|existing| existing.entity_id() == id) {
            *slot = row;
        }
    }

    /// Deletes by identifier; clears a matching selection.
    pub fn remove(&mut self, id: EntityId) {
        self.rows.retain(|row| row.entity_id() != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    /// Applies an in-place flip to the matching row.
    ///
    /// Returns whether a row was flipped. Calling twice with the same flip
    /// restores the original state; the rollback path relies on that.
    pub fn toggle(&mut self, id: EntityId, flip: impl FnOnce(&mut T)) -> bool {
        match self
            .rows
            .iter_mut()
            .find(|existing| existing.entity_id() == id)
        {
            Some(row) => {
                flip(row);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.rows.iter().find(|row| row.entity_id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Moves or clears the current selection.
    pub fn select(&mut self, id: Option<EntityId>) {
        self.selected = id.filter(|candidate| self.get(*candidate).is_some());
    }

    pub fn selected_id(&self) -> Option<EntityId> {
        self.selected
    }
}
