//! Two-phase checklist ingestion.
//!
//! # Responsibility
//! - Persist a parsed draft list as one checklist plus one item batch.
//! - Report partial success instead of forcing atomicity.
//!
//! # Invariants
//! - Phase order is fixed: checklist first, then one item batch.
//! - A failed item batch never rolls the checklist back; the caller treats
//!   a checklist-with-zero-items as a valid, recoverable state.
//! - Item positions mirror draft order.

use crate::dates::resolve_due_date;
use crate::generate::client::{GenerationClient, GenerationError, PromptSpec};
use crate::generate::parser::{parse_generated_items, ParseError};
use crate::model::checklist::{
    Checklist, ChecklistItem, GeneratedItemDraft, NewChecklist, NewChecklistItem,
};
use crate::model::EntityId;
use crate::remote::{RemoteError, RemoteStore};
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Metadata for the checklist record created in phase one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistSeed {
    pub project_id: EntityId,
    pub title: String,
    pub description: Option<String>,
}

/// Terminal ingestion failure; nothing recoverable was persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// The generation collaborator failed before parsing.
    Generation(GenerationError),
    /// No valid item array could be recovered from the model text.
    Parse(ParseError),
    /// Phase one failed; no item creation was attempted.
    Checklist(RemoteError),
}

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generation(err) => write!(f, "{err}"),
            Self::Parse(err) => write!(f, "{err}"),
            Self::Checklist(err) => write!(f, "checklist creation failed: {err}"),
        }
    }
}

impl Error for IngestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Generation(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Checklist(err) => Some(err),
        }
    }
}

impl From<GenerationError> for IngestError {
    fn from(value: GenerationError) -> Self {
        Self::Generation(value)
    }
}

impl From<ParseError> for IngestError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

/// Result of an ingestion that reached phase two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionOutcome {
    /// The persisted checklist; present even when the item phase failed.
    pub checklist: Checklist,
    /// Items that were persisted; empty when the item phase failed.
    pub items: Vec<ChecklistItem>,
    /// Item-phase failure, kept separate from the surviving checklist.
    pub item_error: Option<RemoteError>,
}

impl IngestionOutcome {
    /// Renders the single user-facing notification for this outcome.
    ///
    /// Partial success (checklist created, items failed) must read
    /// differently from full success.
    pub fn user_notice(&self) -> String {
        match &self.item_error {
            None => format!(
                "Checklist \"{}\" created with {} items",
                self.checklist.title,
                self.items.len()
            ),
            Some(err) => format!(
                "Checklist \"{}\" was created, but its items could not be added: {err}",
                self.checklist.title
            ),
        }
    }
}

/// Per-ingestion phase, logged as the pipeline advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IngestionPhase {
    GeneratingText,
    Parsing,
    PersistingChecklist,
    PersistingItems,
    Done,
    DoneWithItemError,
    Failed,
}

impl IngestionPhase {
    fn as_str(self) -> &'static str {
        match self {
            Self::GeneratingText => "generating_text",
            Self::Parsing => "parsing",
            Self::PersistingChecklist => "persisting_checklist",
            Self::PersistingItems => "persisting_items",
            Self::Done => "done",
            Self::DoneWithItemError => "done_with_item_error",
            Self::Failed => "failed",
        }
    }
}

fn log_phase(phase: IngestionPhase) {
    info!(
        "event=ingest_phase module=generate phase={}",
        phase.as_str()
    );
}

/// Orchestrates draft persistence against the remote store.
pub struct ChecklistIngestor {
    remote: Arc<dyn RemoteStore>,
}

impl ChecklistIngestor {
    pub fn new(remote: Arc<dyn RemoteStore>) -> Self {
        Self { remote }
    }

    /// Runs the full pipeline: generate, parse, then ingest.
    ///
    /// Generation and parse failures are terminal and never reach the
    /// persistence phases.
    pub async fn generate_and_ingest(
        &self,
        client: &dyn GenerationClient,
        prompt: &PromptSpec,
        seed: ChecklistSeed,
        reference: DateTime<Utc>,
    ) -> Result<IngestionOutcome, IngestError> {
        log_phase(IngestionPhase::GeneratingText);
        let raw = client.generate(prompt).await.inspect_err(|err| {
            log_phase(IngestionPhase::Failed);
            error!("event=generate module=generate status=error detail={err}");
        })?;

        log_phase(IngestionPhase::Parsing);
        let drafts = parse_generated_items(&raw).inspect_err(|err| {
            log_phase(IngestionPhase::Failed);
            error!("event=parse module=generate status=error detail={err}");
        })?;

        self.ingest(drafts, seed, reference).await
    }

    /// Persists parsed drafts in two phases.
    pub async fn ingest(
        &self,
        drafts: Vec<GeneratedItemDraft>,
        seed: ChecklistSeed,
        reference: DateTime<Utc>,
    ) -> Result<IngestionOutcome, IngestError> {
        log_phase(IngestionPhase::PersistingChecklist);
        let new_checklist = NewChecklist {
            project_id: seed.project_id,
            title: seed.title,
            description: seed.description,
        };
        let checklist = match self.remote.create_checklist(&new_checklist).await {
            Ok(row) => row,
            Err(err) => {
                log_phase(IngestionPhase::Failed);
                error!("event=ingest_checklist module=generate status=error detail={err}");
                return Err(IngestError::Checklist(err));
            }
        };

        log_phase(IngestionPhase::PersistingItems);
        let batch = build_item_batch(checklist.id, &drafts, reference);
        match self.remote.create_items(&batch).await {
            Ok(items) => {
                log_phase(IngestionPhase::Done);
                info!(
                    "event=ingest module=generate status=ok checklist_id={} item_count={}",
                    checklist.id,
                    items.len()
                );
                Ok(IngestionOutcome {
                    checklist,
                    items,
                    item_error: None,
                })
            }
            Err(err) => {
                // The checklist survives on purpose; callers may retry the
                // item batch against the existing record.
                log_phase(IngestionPhase::DoneWithItemError);
                warn!(
                    "event=ingest module=generate status=partial checklist_id={} detail={err}",
                    checklist.id
                );
                Ok(IngestionOutcome {
                    checklist,
                    items: Vec::new(),
                    item_error: Some(err),
                })
            }
        }
    }
}

/// Builds creation requests from drafts, resolving due dates against the
/// reference instant and numbering positions in draft order.
fn build_item_batch(
    checklist_id: EntityId,
    drafts: &[GeneratedItemDraft],
    reference: DateTime<Utc>,
) -> Vec<NewChecklistItem> {
    drafts
        .iter()
        .enumerate()
        .map(|(index, draft)| NewChecklistItem {
            checklist_id,
            title: draft.title.clone(),
            priority: draft.priority,
            due_date: resolve_due_date(draft.due_date.as_deref(), reference),
            position: index as u32,
        })
        .collect()
}
