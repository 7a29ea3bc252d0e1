//! In-memory task repository with snapshot persistence.
//!
//! One `RwLock` guards the task map and the id sequence together. Reads take
//! it shared; `create`, `update` and `delete` take it exclusively and rewrite
//! the snapshot file before releasing it, so the file always reflects a
//! state some reader could have observed.
//!
//! Snapshot writes are best-effort: a failed write is logged and the
//! in-memory change stands.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::{SnapshotStore, TaskMap};
use crate::task::{paginate, Task, TaskId};

#[derive(Debug, Default)]
struct State {
    /// Last identifier handed out; only ever increases.
    seq: u64,
    items: TaskMap,
}

impl State {
    fn next_id(&mut self) -> TaskId {
        self.seq += 1;
        TaskId::new(self.seq)
    }
}

/// Repository owning the authoritative task collection
#[derive(Debug)]
pub struct TaskRepository {
    state: RwLock<State>,
    store: SnapshotStore,
}

impl TaskRepository {
    /// Empty repository persisting through `store`
    pub fn new(store: SnapshotStore) -> Self {
        Self {
            state: RwLock::new(State::default()),
            store,
        }
    }

    /// Empty repository persisting to `path`
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(SnapshotStore::new(path))
    }

    /// Empty repository using the configured snapshot file under `base_dir`
    pub fn from_config(config: &Config, base_dir: &Path) -> Self {
        let store = SnapshotStore::new(config.data_path(base_dir))
            .with_pretty(config.storage.pretty);
        Self::new(store)
    }

    /// Path of the snapshot file
    pub fn data_path(&self) -> &Path {
        self.store.path()
    }

    // =========================================================================
    // Warm start
    // =========================================================================

    /// Best-effort warm start from the snapshot file
    ///
    /// A missing, unreadable or corrupt file leaves the repository as it was.
    pub fn load(&self) {
        if let Err(err) = self.try_load() {
            warn!(
                path = %self.store.path().display(),
                error = %err,
                "ignoring unreadable task snapshot"
            );
        }
    }

    /// Merge the snapshot file into the repository
    ///
    /// Returns the number of tasks read; a missing file reads as zero. The
    /// id sequence is advanced past every loaded id.
    pub fn try_load(&self) -> Result<usize> {
        let Some(loaded) = self.store.read()? else {
            debug!(path = %self.store.path().display(), "no task snapshot found");
            return Ok(0);
        };

        let count = loaded.len();
        let mut state = self.write();
        if let Some(max_id) = loaded.keys().next_back() {
            state.seq = state.seq.max(max_id.get());
        }
        state.items.extend(loaded);

        info!(
            path = %self.store.path().display(),
            count,
            seq = state.seq,
            "loaded task snapshot"
        );
        Ok(count)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All tasks in ascending id order
    pub fn list(&self) -> Vec<Task> {
        self.read().items.values().cloned().collect()
    }

    /// Look up one task
    pub fn get(&self, id: TaskId) -> Result<Task> {
        self.read().items.get(&id).cloned().ok_or(Error::NotFound(id))
    }

    /// Tasks matching `done` (all when `None`), optionally paginated
    ///
    /// Pages are 1-indexed over ascending ids. `page <= 0` or `limit <= 0`
    /// returns the whole filtered set; a page past the end is empty.
    pub fn list_filtered(&self, done: Option<bool>, page: i64, limit: i64) -> Vec<Task> {
        let matching: Vec<Task> = self
            .read()
            .items
            .values()
            .filter(|task| task.matches(done))
            .cloned()
            .collect();
        paginate(matching, page, limit)
    }

    pub fn len(&self) -> usize {
        self.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().items.is_empty()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create a task with the next id; never fails
    pub fn create(&self, title: &str) -> Task {
        let mut state = self.write();
        let id = state.next_id();
        let task = Task::new(id, title, Utc::now());
        state.items.insert(id, task.clone());
        debug!(%id, "created task");

        self.persist(&state.items);
        task
    }

    /// Overwrite a task's title and done flag
    pub fn update(&self, id: TaskId, title: &str, done: bool) -> Result<Task> {
        let mut state = self.write();
        let task = state.items.get_mut(&id).ok_or(Error::NotFound(id))?;
        task.apply(title, done, Utc::now());
        let updated = task.clone();
        debug!(%id, done, "updated task");

        self.persist(&state.items);
        Ok(updated)
    }

    /// Remove a task; its id is never handed out again
    pub fn delete(&self, id: TaskId) -> Result<Task> {
        let mut state = self.write();
        let removed = state.items.remove(&id).ok_or(Error::NotFound(id))?;
        debug!(%id, "deleted task");

        self.persist(&state.items);
        Ok(removed)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Called with the write lock held.
    fn persist(&self, items: &TaskMap) {
        if let Err(err) = self.store.write(items) {
            warn!(
                path = %self.store.path().display(),
                error = %err,
                "failed to write task snapshot"
            );
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
