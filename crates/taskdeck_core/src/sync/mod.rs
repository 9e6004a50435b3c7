//! Client-side state synchronization.
//!
//! # Responsibility
//! - Hold the single in-memory copy of each entity collection.
//! - Track query freshness with coarse, collection-key invalidation.
//! - Bind remote mutations to store updates with rollback on failure.
//!
//! # Invariants
//! - The session stores are the only shared mutable state; every change
//!   goes through the defined store operations.
//! - Freshness metadata never holds rows; there is exactly one data copy.

pub mod cache;
pub mod coordinator;
pub mod session;
pub mod store;
