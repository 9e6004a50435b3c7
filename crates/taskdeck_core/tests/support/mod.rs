//! In-memory remote-store fake with failure injection and response gating.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use taskdeck_core::{
    Checklist, ChecklistItem, EntityId, NewChecklist, NewChecklistItem, NewProject, Project,
    RemoteError, RemoteResult, RemoteStore,
};
use tokio::sync::oneshot;
use uuid::Uuid;

/// In-memory stand-in for the relational store collaborator.
///
/// - `fail_next(op)` makes the next call of that operation fail with a
///   transport error.
/// - `gate_next_toggle()` makes the next `set_item_completed` call block
///   until the returned sender resolves it, enabling interleaving tests.
#[derive(Default)]
pub struct FakeRemote {
    projects: Mutex<Vec<Project>>,
    checklists: Mutex<Vec<Checklist>>,
    items: Mutex<Vec<ChecklistItem>>,
    failures: Mutex<HashSet<&'static str>>,
    toggle_gates: Mutex<VecDeque<oneshot::Receiver<RemoteResult<()>>>>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Injects one transport failure for the named operation.
    pub fn fail_next(&self, operation: &'static str) {
        self.failures.lock().unwrap().insert(operation);
    }

    /// Gates the next `set_item_completed` call on the returned sender.
    pub fn gate_next_toggle(&self) -> oneshot::Sender<RemoteResult<()>> {
        let (sender, receiver) = oneshot::channel();
        self.toggle_gates.lock().unwrap().push_back(receiver);
        sender
    }

    /// Seeds one checklist row directly, bypassing create bookkeeping.
    pub fn seed_checklist(&self, checklist: Checklist) {
        self.checklists.lock().unwrap().push(checklist);
    }

    /// Seeds one item row directly.
    pub fn seed_item(&self, item: ChecklistItem) {
        self.items.lock().unwrap().push(item);
    }

    /// Reads one item row back for assertions.
    pub fn item(&self, id: EntityId) -> Option<ChecklistItem> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }

    /// Reads one checklist row back for assertions.
    pub fn checklist(&self, id: EntityId) -> Option<Checklist> {
        self.checklists
            .lock()
            .unwrap()
            .iter()
            .find(|checklist| checklist.id == id)
            .cloned()
    }

    fn take_failure(&self, operation: &'static str) -> Option<RemoteError> {
        if self.failures.lock().unwrap().remove(operation) {
            Some(RemoteError::Transport(format!(
                "injected failure for {operation}"
            )))
        } else {
            None
        }
    }

    fn build_item(new: &NewChecklistItem) -> ChecklistItem {
        let now = Utc::now();
        ChecklistItem {
            id: Uuid::new_v4(),
            checklist_id: new.checklist_id,
            title: new.title.clone(),
            priority: new.priority,
            completed: false,
            due_date: new.due_date,
            position: new.position,
            created_at: now,
            updated_at: now,
        }
    }
}

#[async_trait]
impl RemoteStore for FakeRemote {
    async fn list_projects(&self) -> RemoteResult<Vec<Project>> {
        if let Some(err) = self.take_failure("list_projects") {
            return Err(err);
        }
        Ok(self.projects.lock().unwrap().clone())
    }

    async fn create_project(&self, new: &NewProject) -> RemoteResult<Project> {
        if let Some(err) = self.take_failure("create_project") {
            return Err(err);
        }
        let row = Project {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            description: new.description.clone(),
            owner_id: new.owner_id,
            status: new.status,
            priority: new.priority,
            visibility: new.visibility,
            created_at: Utc::now(),
        };
        self.projects.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update_project(&self, project: &Project) -> RemoteResult<Project> {
        if let Some(err) = self.take_failure("update_project") {
            return Err(err);
        }
        let mut projects = self.projects.lock().unwrap();
        let slot = projects
            .iter_mut()
            .find(|row| row.id == project.id)
            .ok_or(RemoteError::NotFound(project.id))?;
        *slot = project.clone();
        Ok(project.clone())
    }

    async fn delete_project(&self, id: EntityId) -> RemoteResult<()> {
        if let Some(err) = self.take_failure("delete_project") {
            return Err(err);
        }
        self.projects.lock().unwrap().retain(|row| row.id != id);
        let orphaned: Vec<EntityId> = {
            let mut checklists = self.checklists.lock().unwrap();
            let ids = checklists
                .iter()
                .filter(|row| row.project_id == id)
                .map(|row| row.id)
                .collect();
            checklists.retain(|row| row.project_id != id);
            ids
        };
        self.items
            .lock()
            .unwrap()
            .retain(|row| !orphaned.contains(&row.checklist_id));
        Ok(())
    }

    async fn list_checklists(&self, project_id: EntityId) -> RemoteResult<Vec<Checklist>> {
        if let Some(err) = self.take_failure("list_checklists") {
            return Err(err);
        }
        Ok(self
            .checklists
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn create_checklist(&self, new: &NewChecklist) -> RemoteResult<Checklist> {
        if let Some(err) = self.take_failure("create_checklist") {
            return Err(err);
        }
        let now = Utc::now();
        let row = Checklist {
            id: Uuid::new_v4(),
            project_id: new.project_id,
            title: new.title.clone(),
            description: new.description.clone(),
            is_public: false,
            share_token: None,
            created_at: now,
            updated_at: now,
        };
        self.checklists.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update_checklist(&self, checklist: &Checklist) -> RemoteResult<Checklist> {
        if let Some(err) = self.take_failure("update_checklist") {
            return Err(err);
        }
        let mut updated = checklist.clone();
        updated.updated_at = Utc::now();
        let mut checklists = self.checklists.lock().unwrap();
        let slot = checklists
            .iter_mut()
            .find(|row| row.id == checklist.id)
            .ok_or(RemoteError::NotFound(checklist.id))?;
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete_checklist(&self, id: EntityId) -> RemoteResult<()> {
        if let Some(err) = self.take_failure("delete_checklist") {
            return Err(err);
        }
        self.checklists.lock().unwrap().retain(|row| row.id != id);
        self.items
            .lock()
            .unwrap()
            .retain(|row| row.checklist_id != id);
        Ok(())
    }

    async fn find_checklist_by_share_token(
        &self,
        token: &str,
    ) -> RemoteResult<Option<Checklist>> {
        if let Some(err) = self.take_failure("find_checklist_by_share_token") {
            return Err(err);
        }
        Ok(self
            .checklists
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.share_token.as_deref() == Some(token))
            .cloned())
    }

    async fn list_items(&self, checklist_id: EntityId) -> RemoteResult<Vec<ChecklistItem>> {
        if let Some(err) = self.take_failure("list_items") {
            return Err(err);
        }
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.checklist_id == checklist_id)
            .cloned()
            .collect())
    }

    async fn create_item(&self, new: &NewChecklistItem) -> RemoteResult<ChecklistItem> {
        if let Some(err) = self.take_failure("create_item") {
            return Err(err);
        }
        let row = Self::build_item(new);
        self.items.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn create_items(&self, batch: &[NewChecklistItem]) -> RemoteResult<Vec<ChecklistItem>> {
        if let Some(err) = self.take_failure("create_items") {
            return Err(err);
        }
        let rows: Vec<ChecklistItem> = batch.iter().map(Self::build_item).collect();
        self.items.lock().unwrap().extend(rows.iter().cloned());
        Ok(rows)
    }

    async fn update_item(&self, item: &ChecklistItem) -> RemoteResult<ChecklistItem> {
        if let Some(err) = self.take_failure("update_item") {
            return Err(err);
        }
        let mut updated = item.clone();
        updated.updated_at = Utc::now();
        let mut items = self.items.lock().unwrap();
        let slot = items
            .iter_mut()
            .find(|row| row.id == item.id)
            .ok_or(RemoteError::NotFound(item.id))?;
        *slot = updated.clone();
        Ok(updated)
    }

    async fn set_item_completed(
        &self,
        id: EntityId,
        completed: bool,
    ) -> RemoteResult<ChecklistItem> {
        let gate = self.toggle_gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            match gate.await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => return Err(err),
                Err(_) => return Err(RemoteError::Transport("toggle gate dropped".to_string())),
            }
        }
        if let Some(err) = self.take_failure("set_item_completed") {
            return Err(err);
        }
        let mut items = self.items.lock().unwrap();
        let slot = items
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(RemoteError::NotFound(id))?;
        slot.completed = completed;
        slot.updated_at = Utc::now();
        Ok(slot.clone())
    }

    async fn delete_item(&self, id: EntityId) -> RemoteResult<()> {
        if let Some(err) = self.take_failure("delete_item") {
            return Err(err);
        }
        self.items.lock().unwrap().retain(|row| row.id != id);
        Ok(())
    }
}

/// Builds a checklist row for seeding.
pub fn checklist_row(project_id: EntityId, title: &str) -> Checklist {
    let now = Utc::now();
    Checklist {
        id: Uuid::new_v4(),
        project_id,
        title: title.to_string(),
        description: None,
        is_public: false,
        share_token: None,
        created_at: now,
        updated_at: now,
    }
}

/// Builds an item row for seeding.
pub fn item_row(checklist_id: EntityId, title: &str, position: u32) -> ChecklistItem {
    let now = Utc::now();
    ChecklistItem {
        id: Uuid::new_v4(),
        checklist_id,
        title: title.to_string(),
        priority: taskdeck_core::Priority::Medium,
        completed: false,
        due_date: None,
        position,
        created_at: now,
        updated_at: now,
    }
}
