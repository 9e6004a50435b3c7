//! Public share-link resolution.
//!
//! # Responsibility
//! - Resolve an opaque share token into a read-only checklist view.
//!
//! # Invariants
//! - Visibility is re-verified at read time; a checklist toggled back to
//!   private makes its old token inert.
//! - The view is read-only: no item mutation is reachable from a token.

use crate::model::checklist::{Checklist, ChecklistItem};
use crate::remote::{RemoteError, RemoteStore};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Share-link resolution failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    /// Token unknown, blank, or pointing at a currently private checklist.
    ///
    /// The private case is folded in deliberately so a revoked token does
    /// not reveal that the checklist still exists.
    NotFound,
    /// Remote store failure while resolving.
    Remote(RemoteError),
}

impl Display for ShareError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "shared checklist not found or no longer public"),
            Self::Remote(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ShareError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Remote(err) => Some(err),
            Self::NotFound => None,
        }
    }
}

impl From<RemoteError> for ShareError {
    fn from(value: RemoteError) -> Self {
        Self::Remote(value)
    }
}

/// Anonymous read-only projection of a public checklist.
///
/// Items are exposed including their due dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedChecklistView {
    pub checklist: Checklist,
    pub items: Vec<ChecklistItem>,
}

impl SharedChecklistView {
    /// Completed/total progress for the shared page header.
    pub fn progress(&self) -> (usize, usize) {
        let completed = self.items.iter().filter(|item| item.completed).count();
        (completed, self.items.len())
    }
}

/// Resolves a share token into a read-only view.
///
/// The token is the only credential; no session is involved.
pub async fn resolve_share_token(
    remote: &dyn RemoteStore,
    token: &str,
) -> Result<SharedChecklistView, ShareError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ShareError::NotFound);
    }

    let checklist = remote
        .find_checklist_by_share_token(token)
        .await?
        .ok_or(ShareError::NotFound)?;
    if !checklist.is_public {
        // Row still carries the token but was unpublished since the link
        // was handed out.
        return Err(ShareError::NotFound);
    }

    let items = remote.list_items(checklist.id).await?;
    info!(
        "event=share_resolve module=share status=ok checklist_id={} item_count={}",
        checklist.id,
        items.len()
    );
    Ok(SharedChecklistView { checklist, items })
}
