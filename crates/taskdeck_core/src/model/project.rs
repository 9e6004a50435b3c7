//! Project domain record.
//!
//! # Responsibility
//! - Define the project row owned by its creating user.
//!
//! # Invariants
//! - Projects are mutated only via explicit update operations.
//! - Deleting a project cascades to its checklists on the remote side.

use crate::model::priority::Priority;
use crate::model::{EntityId, StoreEntity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    InProgress,
    Completed,
    OnHold,
}

/// Who can see a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Private,
}

/// Project row as returned by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub owner_id: EntityId,
    pub status: ProjectStatus,
    pub priority: Priority,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
}

impl StoreEntity for Project {
    fn entity_id(&self) -> EntityId {
        self.id
    }
}

/// Creation request for a project; the remote store assigns id/timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub owner_id: EntityId,
    pub status: ProjectStatus,
    pub priority: Priority,
    pub visibility: Visibility,
}
