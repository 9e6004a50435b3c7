//! Checklist and checklist-item domain records.
//!
//! # Responsibility
//! - Define the checklist/item rows and their creation requests.
//! - Keep the share-token invariant mechanical via `publish`/`unpublish`.
//!
//! # Invariants
//! - `share_token` is present if and only if `is_public` is set.
//! - An item's `due_date`, when present, is an absolute calendar date.
//! - Titles are non-empty after trimming.

use crate::model::priority::Priority;
use crate::model::{EntityId, StoreEntity};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Validation failure for checklist/item rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Share token present on a private checklist, or missing on a public one.
    ShareTokenMismatch { is_public: bool },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::ShareTokenMismatch { is_public: true } => {
                write!(f, "public checklist is missing its share token")
            }
            Self::ShareTokenMismatch { is_public: false } => {
                write!(f, "private checklist must not carry a share token")
            }
        }
    }
}

impl Error for RecordValidationError {}

/// Checklist row as returned by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub id: EntityId,
    pub project_id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub share_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Checklist {
    /// Checks row-level invariants.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.title.trim().is_empty() {
            return Err(RecordValidationError::EmptyTitle);
        }
        if self.share_token.is_some() != self.is_public {
            return Err(RecordValidationError::ShareTokenMismatch {
                is_public: self.is_public,
            });
        }
        Ok(())
    }

    /// Makes the checklist public, minting a share token when absent.
    ///
    /// Minting happens exactly at the private-to-public flip; a token that
    /// already exists is kept so previously shared links stay valid.
    pub fn publish(&mut self) {
        if self.share_token.is_none() {
            self.share_token = Some(Uuid::new_v4().to_string());
        }
        self.is_public = true;
    }

    /// Makes the checklist private and clears its share token.
    ///
    /// The cleared token makes old share links inert even if a cached copy
    /// of the row still carries it somewhere.
    pub fn unpublish(&mut self) {
        self.share_token = None;
        self.is_public = false;
    }
}

impl StoreEntity for Checklist {
    fn entity_id(&self) -> EntityId {
        self.id
    }
}

/// Creation request for a checklist; the remote store assigns id/timestamps.
///
/// New checklists always start private with no share token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewChecklist {
    pub project_id: EntityId,
    pub title: String,
    pub description: Option<String>,
}

/// Checklist item row as returned by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: EntityId,
    pub checklist_id: EntityId,
    pub title: String,
    pub priority: Priority,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    pub position: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChecklistItem {
    /// Checks row-level invariants.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.title.trim().is_empty() {
            return Err(RecordValidationError::EmptyTitle);
        }
        Ok(())
    }
}

impl StoreEntity for ChecklistItem {
    fn entity_id(&self) -> EntityId {
        self.id
    }
}

/// Creation request for one checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewChecklistItem {
    pub checklist_id: EntityId,
    pub title: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub position: u32,
}

/// Unpersisted model-generated item awaiting ingestion.
///
/// Priority is already coerced by the response parser; the due date is kept
/// as the raw model string because the resolution reference instant belongs
/// to the ingestion step, not parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedItemDraft {
    pub title: String,
    pub priority: Priority,
    pub due_date: Option<String>,
}
