//! Domain records shared by the generation, sync and share layers.
//!
//! # Responsibility
//! - Define one canonical tagged record per entity kind.
//! - Validate rows at the ingestion boundary instead of passing untyped
//!   shapes through.
//!
//! # Invariants
//! - Every persisted record is identified by a stable `EntityId`.
//! - A checklist carries a share token if and only if it is public.
//! - A persisted due date is always an absolute calendar date.

pub mod checklist;
pub mod priority;
pub mod project;

use uuid::Uuid;

/// Stable identifier for every persisted domain record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EntityId = Uuid;

/// Keyed-collection access used by the session stores.
pub trait StoreEntity {
    /// Returns the stable identifier of this record.
    fn entity_id(&self) -> EntityId;
}
