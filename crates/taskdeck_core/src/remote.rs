//! Remote relational-store collaborator boundary.
//!
//! # Responsibility
//! - Define the persistence contract the core depends on, without binding
//!   to a concrete transport or SQL dialect.
//! - Return semantic errors (`NotFound`) in addition to transport errors.
//!
//! # Invariants
//! - Create operations return the full persisted row with server-assigned
//!   id and timestamps.
//! - Deleting a project cascades to its checklists and items remotely.

use crate::model::checklist::{Checklist, ChecklistItem, NewChecklist, NewChecklistItem};
use crate::model::project::{NewProject, Project};
use crate::model::EntityId;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Failure reported by the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Store unreachable or the request timed out.
    Transport(String),
    /// Store reached but the operation was rejected.
    Rejected {
        operation: &'static str,
        message: String,
    },
    /// Target row does not exist.
    NotFound(EntityId),
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "remote store unreachable: {message}"),
            Self::Rejected { operation, message } => {
                write!(f, "remote store rejected `{operation}`: {message}")
            }
            Self::NotFound(id) => write!(f, "remote row not found: {id}"),
        }
    }
}

impl Error for RemoteError {}

/// Persistence contract for the three row shapes.
///
/// Updates use full-row replacement semantics; partial patches are composed
/// by the caller on top of its last known row.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn list_projects(&self) -> RemoteResult<Vec<Project>>;
    async fn create_project(&self, new: &NewProject) -> RemoteResult<Project>;
    async fn update_project(&self, project: &Project) -> RemoteResult<Project>;
    async fn delete_project(&self, id: EntityId) -> RemoteResult<()>;

    async fn list_checklists(&self, project_id: EntityId) -> RemoteResult<Vec<Checklist>>;
    async fn create_checklist(&self, new: &NewChecklist) -> RemoteResult<Checklist>;
    async fn update_checklist(&self, checklist: &Checklist) -> RemoteResult<Checklist>;
    async fn delete_checklist(&self, id: EntityId) -> RemoteResult<()>;
    /// Looks a checklist up by its opaque share token, public or not.
    ///
    /// Visibility is the caller's concern: the share layer re-verifies
    /// `is_public` at read time so stale tokens stay inert.
    async fn find_checklist_by_share_token(&self, token: &str)
        -> RemoteResult<Option<Checklist>>;

    async fn list_items(&self, checklist_id: EntityId) -> RemoteResult<Vec<ChecklistItem>>;
    async fn create_item(&self, new: &NewChecklistItem) -> RemoteResult<ChecklistItem>;
    /// Bulk-inserts items in one request, preserving slice order.
    async fn create_items(&self, batch: &[NewChecklistItem]) -> RemoteResult<Vec<ChecklistItem>>;
    async fn update_item(&self, item: &ChecklistItem) -> RemoteResult<ChecklistItem>;
    /// Sets the completion flag to an explicit target value.
    ///
    /// Toggle mutations send their own intended value instead of a blind
    /// flip so a slow request cannot invert a newer state on the server.
    async fn set_item_completed(
        &self,
        id: EntityId,
        completed: bool,
    ) -> RemoteResult<ChecklistItem>;
    async fn delete_item(&self, id: EntityId) -> RemoteResult<()>;
}
