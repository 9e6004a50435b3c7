//! Session-scoped shared client state.
//!
//! # Responsibility
//! - Bundle the entity stores and the query cache for one user session.
//!
//! # Invariants
//! - Created at session start and torn down at session end; never a
//!   process-wide singleton, so tests can instantiate isolated instances.
//! - Locks are held only for synchronous store operations, never across
//!   network awaits.

use crate::model::checklist::{Checklist, ChecklistItem};
use crate::model::project::Project;
use crate::sync::cache::QueryCache;
use crate::sync::store::EntityStore;
use std::sync::{Mutex, MutexGuard};

/// The one shared mutable resource of a client session.
#[derive(Debug, Default)]
pub struct Session {
    pub projects: Mutex<EntityStore<Project>>,
    pub checklists: Mutex<EntityStore<Checklist>>,
    pub items: Mutex<EntityStore<ChecklistItem>>,
    pub queries: Mutex<QueryCache>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Acquires a session lock, recovering from poisoning.
///
/// Store operations are total and cannot leave a collection half-mutated,
/// so a poisoned lock still guards consistent data.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
