//! The project session: loaded novels plus the active one.
//!
//! One [`ProjectSession`] is built at startup and shared (`Arc`) with the
//! navigation guard and every consumer. All mutation goes through its
//! methods. The state lock is never held across a network call, so
//! operations may interleave: two concurrent `create_project` calls both go
//! through and produce two novels, and a delete landing during a load is
//! overwritten by the load's full replace.

use std::{
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::{SystemTime, UNIX_EPOCH},
};

use tracing::{debug, info, warn};

use crate::{
    api::NovelApi,
    error::{Error, Result},
    storage::DurableStorage,
    types::{CreateNovel, Novel, NovelId},
};

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[derive(Debug, Default)]
struct SessionState {
    projects: Vec<Novel>,
    current: Option<Novel>,
}

pub struct ProjectSession {
    api: Arc<dyn NovelApi>,
    storage: Arc<dyn DurableStorage>,
    storage_key: String,
    state: RwLock<SessionState>,
}

impl ProjectSession {
    pub fn new(
        api: Arc<dyn NovelApi>,
        storage: Arc<dyn DurableStorage>,
        storage_key: impl Into<String>,
    ) -> Self {
        Self {
            api,
            storage,
            storage_key: storage_key.into(),
            state: RwLock::new(SessionState::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Snapshot of the loaded list, in server order.
    pub fn projects(&self) -> Vec<Novel> {
        self.read().projects.clone()
    }

    pub fn has_projects(&self) -> bool {
        !self.read().projects.is_empty()
    }

    pub fn current_project(&self) -> Option<Novel> {
        self.read().current.clone()
    }

    pub fn find_project(&self, id: &str) -> Option<Novel> {
        self.read()
            .projects
            .iter()
            .find(|p| p.id.matches(id))
            .cloned()
    }

    /// Id remembered in durable storage. A storage read failure counts as
    /// "nothing to restore".
    pub fn persisted_project_id(&self) -> Option<String> {
        match self.storage.get(&self.storage_key) {
            Ok(id) => id,
            Err(e) => {
                warn!(key = %self.storage_key, error = %e, "failed to read persisted project id");
                None
            },
        }
    }

    /// Fetch the full list and replace the local one.
    ///
    /// When nothing is active yet, the persisted id (if any) is looked up in
    /// the fresh list and made current. Failures are logged and leave the
    /// state untouched; callers cannot tell them apart from an empty list.
    /// An already active project is not re-validated against the new list.
    pub async fn load_projects(&self) {
        let projects = match self.api.list().await {
            Ok(projects) => projects,
            Err(e) => {
                warn!(error = %e, "failed to load projects");
                return;
            },
        };

        let mut state = self.write();
        state.projects = projects;
        info!(count = state.projects.len(), "loaded projects");

        if state.current.is_some() {
            return;
        }
        let Some(saved) = self.persisted_project_id() else {
            return;
        };
        let found = state.projects.iter().find(|p| p.id.matches(&saved)).cloned();
        match found {
            Some(found) => {
                info!(project_id = %found.id, "restored active project");
                state.current = Some(found);
            },
            None => debug!(project_id = %saved, "persisted project not in list, nothing restored"),
        }
    }

    /// Make `project` active and remember its id.
    pub fn select_project(&self, project: &Novel) -> Result<()> {
        let mut state = self.write();
        self.activate(&mut state, project)
    }

    /// Select a project from the loaded list by (string-compared) id.
    pub fn select_project_by_id(&self, id: &str) -> Result<Novel> {
        let mut state = self.write();
        let found = state
            .projects
            .iter()
            .find(|p| p.id.matches(id))
            .cloned()
            .ok_or_else(|| Error::ProjectNotFound { id: id.to_string() })?;
        self.activate(&mut state, &found)?;
        Ok(found)
    }

    /// Forget the active project, in memory and in storage.
    pub fn clear_project(&self) -> Result<()> {
        let mut state = self.write();
        self.deactivate(&mut state)
    }

    /// Create a novel remotely, append it and make it active.
    ///
    /// The id sent is a provisional timestamp; the novel returned by the
    /// server is what gets stored. On failure nothing changes locally and
    /// the error is returned. Once the server has accepted the novel the call
    /// succeeds: if the selection cannot be persisted, the novel is still
    /// appended but left inactive.
    pub async fn create_project(
        &self,
        title: &str,
        description: &str,
        kind: Option<&str>,
    ) -> Result<Novel> {
        let request = CreateNovel {
            id: now_ms().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            kind: kind.map(str::to_string),
        };

        let novel = self.api.create(&request).await.inspect_err(|e| {
            warn!(title = %request.title, error = %e, "failed to create project");
        })?;

        let mut state = self.write();
        state.projects.push(novel.clone());
        if let Err(e) = self.activate(&mut state, &novel) {
            warn!(project_id = %novel.id, error = %e, "created project could not be made active");
        }
        info!(project_id = %novel.id, title = %novel.title, "created project");
        Ok(novel)
    }

    /// Delete a novel remotely. Returns whether the server accepted it; the
    /// error itself is only logged.
    pub async fn delete_project(&self, id: &NovelId) -> bool {
        if let Err(e) = self.api.delete(id).await {
            warn!(project_id = %id, error = %e, "failed to delete project");
            return false;
        }

        let mut state = self.write();
        state.projects.retain(|p| !p.id.same_as(id));
        if state.current.as_ref().is_some_and(|c| c.id.same_as(id))
            && let Err(e) = self.deactivate(&mut state)
        {
            warn!(project_id = %id, error = %e, "deleted project is still marked active");
        }
        info!(project_id = %id, "deleted project");
        true
    }

    // Storage is written first so a failed write leaves memory untouched.
    fn activate(&self, state: &mut SessionState, project: &Novel) -> Result<()> {
        self.storage
            .set(&self.storage_key, &project.id.to_string())?;
        state.current = Some(project.clone());
        debug!(project_id = %project.id, "active project set");
        Ok(())
    }

    fn deactivate(&self, state: &mut SessionState) -> Result<()> {
        self.storage.remove(&self.storage_key)?;
        if state.current.take().is_some() {
            debug!("active project cleared");
        }
        Ok(())
    }
}
