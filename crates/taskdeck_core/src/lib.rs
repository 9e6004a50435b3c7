//! Core domain logic for TaskDeck.
//!
//! This crate owns the AI-assisted checklist ingestion pipeline and the
//! client-side synchronization of projects, checklists and items: parsing
//! model output into validated drafts, two-phase persistence that reports
//! partial failure, session stores with optimistic mutation and
//! rollback, and public share-link resolution. The relational store and
//! the text-generation model are external collaborators behind traits.

pub mod dates;
pub mod generate;
pub mod logging;
pub mod model;
pub mod remote;
pub mod share;
pub mod sync;

pub use dates::resolve_due_date;
pub use generate::client::{GenerationClient, GenerationError, PromptSpec};
pub use generate::ingest::{ChecklistIngestor, ChecklistSeed, IngestError, IngestionOutcome};
pub use generate::parser::{parse_generated_items, ParseError};
pub use logging::{default_log_level, init_logging};
pub use model::checklist::{
    Checklist, ChecklistItem, GeneratedItemDraft, NewChecklist, NewChecklistItem,
    RecordValidationError,
};
pub use model::priority::Priority;
pub use model::project::{NewProject, Project, ProjectStatus, Visibility};
pub use model::{EntityId, StoreEntity};
pub use remote::{RemoteError, RemoteResult, RemoteStore};
pub use share::{resolve_share_token, ShareError, SharedChecklistView};
pub use sync::cache::{FetchTicket, QueryCache, QueryKey};
pub use sync::coordinator::{MutationCoordinator, MutationError};
pub use sync::session::Session;
pub use sync::store::EntityStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
