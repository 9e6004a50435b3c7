//! Remote-mutation coordination with store reconciliation.
//!
//! # Responsibility
//! - Bind each remote mutation to its store update and cache invalidation.
//! - Apply completion toggles optimistically and compensate on failure.
//!
//! # Invariants
//! - Non-optimistic mutations touch the store only after the remote call
//!   succeeds; failures leave the store untouched.
//! - Toggle compensation re-applies the flip operation keyed by the
//!   mutation's own before/after values, never a stored snapshot, so it
//!   stays correct under rapid repeated toggles.
//! - A successful toggle never writes the server row back to the store; a
//!   slow response must not clobber a newer toggle.
//! - Every remote failure is logged and surfaced to the caller.

use crate::generate::client::{GenerationClient, PromptSpec};
use crate::generate::ingest::{ChecklistIngestor, ChecklistSeed, IngestError, IngestionOutcome};
use crate::model::checklist::{
    Checklist, ChecklistItem, NewChecklist, NewChecklistItem, RecordValidationError,
};
use crate::model::project::{NewProject, Project};
use crate::model::EntityId;
use crate::remote::{RemoteError, RemoteStore};
use crate::sync::cache::QueryKey;
use crate::sync::session::{lock, Session};
use chrono::{DateTime, Utc};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Mutation failure surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    /// The remote store rejected or never received the operation.
    Remote(RemoteError),
    /// Row failed boundary validation before any remote call.
    Validation(RecordValidationError),
    /// Toggle target is not present in the session store.
    UnknownItem(EntityId),
    /// Target checklist is not present in the session store.
    UnknownChecklist(EntityId),
    /// The compensating flip found no row to restore; the store is left in
    /// its best-known state and no further compensation is attempted.
    Rollback {
        item: EntityId,
        source: RemoteError,
    },
}

impl Display for MutationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::UnknownItem(id) => write!(f, "checklist item not in session store: {id}"),
            Self::UnknownChecklist(id) => write!(f, "checklist not in session store: {id}"),
            Self::Rollback { item, source } => write!(
                f,
                "rollback failed for item {item} after remote error: {source}"
            ),
        }
    }
}

impl Error for MutationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Remote(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Rollback { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<RemoteError> for MutationError {
    fn from(value: RemoteError) -> Self {
        Self::Remote(value)
    }
}

impl From<RecordValidationError> for MutationError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

fn flip_completed(item: &mut ChecklistItem) {
    item.completed = !item.completed;
}

/// Binds remote mutations to one session's stores and query cache.
pub struct MutationCoordinator {
    remote: Arc<dyn RemoteStore>,
    session: Arc<Session>,
}

impl MutationCoordinator {
    pub fn new(remote: Arc<dyn RemoteStore>, session: Arc<Session>) -> Self {
        Self { remote, session }
    }

    // ---- refresh (supersede-guarded fetches) ----

    /// Re-fetches the project collection; superseded results are dropped.
    pub async fn refresh_projects(&self) -> Result<(), MutationError> {
        let ticket = lock(&self.session.queries).begin_fetch(QueryKey::Projects);
        let rows = self.remote.list_projects().await.inspect_err(|err| {
            error!("event=refresh module=sync status=error collection=projects detail={err}")
        })?;
        if lock(&self.session.queries).commit_fetch(ticket) {
            lock(&self.session.projects).replace(rows);
        }
        Ok(())
    }

    /// Re-fetches the checklists of one project.
    pub async fn refresh_checklists(&self, project_id: EntityId) -> Result<(), MutationError> {
        let key = QueryKey::Checklists(project_id);
        let ticket = lock(&self.session.queries).begin_fetch(key);
        let rows = self
            .remote
            .list_checklists(project_id)
            .await
            .inspect_err(|err| {
                error!("event=refresh module=sync status=error collection=checklists detail={err}")
            })?;
        if lock(&self.session.queries).commit_fetch(ticket) {
            lock(&self.session.checklists).replace(rows);
        }
        Ok(())
    }

    /// Re-fetches the items of one checklist.
    pub async fn refresh_items(&self, checklist_id: EntityId) -> Result<(), MutationError> {
        let key = QueryKey::ChecklistItems(checklist_id);
        let ticket = lock(&self.session.queries).begin_fetch(key);
        let rows = self
            .remote
            .list_items(checklist_id)
            .await
            .inspect_err(|err| {
                error!("event=refresh module=sync status=error collection=items detail={err}")
            })?;
        if lock(&self.session.queries).commit_fetch(ticket) {
            lock(&self.session.items).replace(rows);
        }
        Ok(())
    }

    // ---- projects ----

    pub async fn create_project(&self, new: NewProject) -> Result<Project, MutationError> {
        let row = self
            .remote
            .create_project(&new)
            .await
            .inspect_err(log_mutation_error("create_project"))?;
        lock(&self.session.projects).add(row.clone());
        lock(&self.session.queries).invalidate(QueryKey::Projects);
        Ok(row)
    }

    pub async fn update_project(&self, project: Project) -> Result<Project, MutationError> {
        let row = self
            .remote
            .update_project(&project)
            .await
            .inspect_err(log_mutation_error("update_project"))?;
        lock(&self.session.projects).update(row.clone());
        lock(&self.session.queries).invalidate(QueryKey::Projects);
        Ok(row)
    }

    pub async fn delete_project(&self, id: EntityId) -> Result<(), MutationError> {
        self.remote
            .delete_project(id)
            .await
            .inspect_err(log_mutation_error("delete_project"))?;
        lock(&self.session.projects).remove(id);
        let mut queries = lock(&self.session.queries);
        queries.invalidate(QueryKey::Projects);
        // Remote deletion cascades to the project's checklists.
        queries.invalidate(QueryKey::Checklists(id));
        Ok(())
    }

    // ---- checklists ----

    pub async fn create_checklist(&self, new: NewChecklist) -> Result<Checklist, MutationError> {
        let row = self
            .remote
            .create_checklist(&new)
            .await
            .inspect_err(log_mutation_error("create_checklist"))?;
        lock(&self.session.checklists).add(row.clone());
        lock(&self.session.queries).invalidate(QueryKey::Checklists(row.project_id));
        Ok(row)
    }

    pub async fn update_checklist(&self, checklist: Checklist) -> Result<Checklist, MutationError> {
        checklist.validate()?;
        let row = self
            .remote
            .update_checklist(&checklist)
            .await
            .inspect_err(log_mutation_error("update_checklist"))?;
        lock(&self.session.checklists).update(row.clone());
        lock(&self.session.queries).invalidate(QueryKey::Checklists(row.project_id));
        Ok(row)
    }

    /// Flips checklist visibility, keeping the share-token invariant.
    ///
    /// The token is minted exactly when flipping public and cleared when
    /// flipping private, then routed through the regular update path.
    pub async fn set_checklist_visibility(
        &self,
        id: EntityId,
        public: bool,
    ) -> Result<Checklist, MutationError> {
        let mut checklist = lock(&self.session.checklists)
            .get(id)
            .cloned()
            .ok_or(MutationError::UnknownChecklist(id))?;
        if public {
            checklist.publish();
        } else {
            checklist.unpublish();
        }
        self.update_checklist(checklist).await
    }

    pub async fn delete_checklist(&self, id: EntityId) -> Result<(), MutationError> {
        let project_id = lock(&self.session.checklists)
            .get(id)
            .map(|row| row.project_id);
        self.remote
            .delete_checklist(id)
            .await
            .inspect_err(log_mutation_error("delete_checklist"))?;
        lock(&self.session.checklists).remove(id);
        let mut queries = lock(&self.session.queries);
        if let Some(project_id) = project_id {
            queries.invalidate(QueryKey::Checklists(project_id));
        }
        queries.invalidate(QueryKey::ChecklistItems(id));
        Ok(())
    }

    // ---- items (non-optimistic) ----

    pub async fn create_item(&self, new: NewChecklistItem) -> Result<ChecklistItem, MutationError> {
        let row = self
            .remote
            .create_item(&new)
            .await
            .inspect_err(log_mutation_error("create_item"))?;
        lock(&self.session.items).add(row.clone());
        lock(&self.session.queries).invalidate(QueryKey::ChecklistItems(row.checklist_id));
        Ok(row)
    }

    pub async fn update_item(&self, item: ChecklistItem) -> Result<ChecklistItem, MutationError> {
        item.validate()?;
        let row = self
            .remote
            .update_item(&item)
            .await
            .inspect_err(log_mutation_error("update_item"))?;
        lock(&self.session.items).update(row.clone());
        lock(&self.session.queries).invalidate(QueryKey::ChecklistItems(row.checklist_id));
        Ok(row)
    }

    pub async fn delete_item(&self, id: EntityId) -> Result<(), MutationError> {
        let checklist_id = lock(&self.session.items).get(id).map(|row| row.checklist_id);
        self.remote
            .delete_item(id)
            .await
            .inspect_err(log_mutation_error("delete_item"))?;
        lock(&self.session.items).remove(id);
        if let Some(checklist_id) = checklist_id {
            lock(&self.session.queries).invalidate(QueryKey::ChecklistItems(checklist_id));
        }
        Ok(())
    }

    // ---- items (optimistic toggle) ----

    /// Toggles an item's completion flag optimistically.
    ///
    /// The store flips before the remote call resolves; the remote request
    /// carries this mutation's own target value. On failure the flip is
    /// re-applied as compensation, but only while the flag still shows
    /// this mutation's value. Returns the completion value this mutation
    /// intended.
    pub async fn toggle_item(&self, id: EntityId) -> Result<bool, MutationError> {
        let (target, checklist_id) = {
            let mut items = lock(&self.session.items);
            if !items.toggle(id, flip_completed) {
                return Err(MutationError::UnknownItem(id));
            }
            let row = items.get(id).ok_or(MutationError::UnknownItem(id))?;
            (row.completed, row.checklist_id)
        };

        match self.remote.set_item_completed(id, target).await {
            Ok(_row) => {
                // Intent is already in the store from the optimistic flip;
                // writing the server row back here could clobber a newer
                // toggle that raced this response.
                lock(&self.session.queries).invalidate(QueryKey::ChecklistItems(checklist_id));
                Ok(target)
            }
            Err(err) => {
                error!(
                    "event=toggle_item module=sync status=error item_id={id} target={target} detail={err}"
                );
                // Compensation is keyed by this mutation's own after-value:
                // if a newer toggle already moved the flag on, the state
                // belongs to that mutation and must not be reverted.
                let row_present = lock(&self.session.items).toggle(id, |item| {
                    if item.completed == target {
                        flip_completed(item);
                    }
                });
                if !row_present {
                    error!(
                        "event=toggle_rollback module=sync status=error item_id={id} reason=row_missing"
                    );
                    return Err(MutationError::Rollback { item: id, source: err });
                }
                Err(MutationError::Remote(err))
            }
        }
    }

    // ---- AI generation pipeline ----

    /// Generates, parses and ingests a checklist, then reconciles the
    /// session stores and cache with the outcome.
    pub async fn generate_checklist(
        &self,
        client: &dyn GenerationClient,
        prompt: &PromptSpec,
        seed: ChecklistSeed,
        reference: DateTime<Utc>,
    ) -> Result<IngestionOutcome, IngestError> {
        let ingestor = ChecklistIngestor::new(Arc::clone(&self.remote));
        let outcome = ingestor
            .generate_and_ingest(client, prompt, seed, reference)
            .await?;

        lock(&self.session.checklists).add(outcome.checklist.clone());
        lock(&self.session.items).replace(outcome.items.clone());
        let mut queries = lock(&self.session.queries);
        queries.invalidate(QueryKey::Checklists(outcome.checklist.project_id));
        queries.invalidate(QueryKey::ChecklistItems(outcome.checklist.id));
        info!(
            "event=generate_checklist module=sync status=ok checklist_id={} item_count={}",
            outcome.checklist.id,
            outcome.items.len()
        );
        Ok(outcome)
    }
}

fn log_mutation_error(operation: &'static str) -> impl Fn(&RemoteError) {
    move |err| {
        error!("event={operation} module=sync status=error detail={err}");
    }
}
