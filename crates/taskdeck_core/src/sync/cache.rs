//! Query freshness tracking with supersede guards.
//!
//! # Responsibility
//! - Mark read queries stale after mutations so the next read re-fetches.
//! - Detect fetches that were superseded by a newer invalidation.
//!
//! # Invariants
//! - Invalidation is coarse, by collection key; staleness windows are
//!   accepted instead of fine-grained dependency tracking.
//! - The cache holds freshness metadata only, never rows.

use crate::model::EntityId;
use std::collections::HashMap;

/// Collection-granularity read-query key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// All projects of the session user.
    Projects,
    /// Checklists of one project.
    Checklists(EntityId),
    /// Items of one checklist.
    ChecklistItems(EntityId),
}

#[derive(Debug, Clone, Copy, Default)]
struct QueryState {
    generation: u64,
    fresh: bool,
}

/// Proof that a fetch started against a specific cache generation.
///
/// Committing the ticket succeeds only while no newer invalidation has
/// landed; a superseded fetch's rows must be discarded by the caller.
#[derive(Debug, Clone, Copy)]
pub struct FetchTicket {
    key: QueryKey,
    generation: u64,
}

/// Per-session freshness ledger over the entity collections.
#[derive(Debug, Default)]
pub struct QueryCache {
    states: HashMap<QueryKey, QueryState>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks one collection stale and supersedes in-flight fetches for it.
    pub fn invalidate(&mut self, key: QueryKey) {
        let state = self.states.entry(key).or_default();
        state.generation += 1;
        state.fresh = false;
    }

    /// Returns whether the collection reflects the latest known fetch.
    pub fn is_fresh(&self, key: QueryKey) -> bool {
        self.states.get(&key).is_some_and(|state| state.fresh)
    }

    /// Starts a fetch against the current generation.
    pub fn begin_fetch(&mut self, key: QueryKey) -> FetchTicket {
        let state = self.states.entry(key).or_default();
        FetchTicket {
            key,
            generation: state.generation,
        }
    }

    /// Completes a fetch; returns `false` when it was superseded.
    pub fn commit_fetch(&mut self, ticket: FetchTicket) -> bool {
        let state = self.states.entry(ticket.key).or_default();
        if state.generation != ticket.generation {
            return false;
        }
        state.fresh = true;
        true
    }
}
