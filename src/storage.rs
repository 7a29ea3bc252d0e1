//! Snapshot storage for the task repository
//!
//! The whole collection lives in one JSON file, rewritten after every
//! mutation:
//!
//! ```text
//! tasks.json        # {"1": {"id": 1, "title": ..., "done": ..., ...}, ...}
//! ```
//!
//! Writes go to a temp file in the same directory and are renamed over the
//! target, so readers and crash recovery only ever see a complete snapshot.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::Result;
use crate::task::{Task, TaskId};

/// Default snapshot file name, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "tasks.json";

/// Serialized form of the collection: identifier to record.
pub type TaskMap = BTreeMap<TaskId, Task>;

/// Reads and writes whole-collection snapshots at a fixed path
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
    pretty: bool,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: false,
        }
    }

    /// Pretty-print snapshots (handy when the file is checked by hand)
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Snapshot I/O
    // =========================================================================

    /// Read the snapshot
    ///
    /// Returns `Ok(None)` if the file does not exist. Entries are keyed by the
    /// record's own `id`, whatever key they were stored under.
    pub fn read(&self) -> Result<Option<TaskMap>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let stored: TaskMap = serde_json::from_str(&content)?;
        let tasks = stored
            .into_values()
            .map(|task| (task.id, task))
            .collect();
        Ok(Some(tasks))
    }

    /// Replace the snapshot with `tasks`
    pub fn write(&self, tasks: &TaskMap) -> Result<()> {
        let data = if self.pretty {
            serde_json::to_vec_pretty(tasks)?
        } else {
            serde_json::to_vec(tasks)?
        };
        write_atomic(&self.path, &data)
    }
}

/// Atomically write data to a file
///
/// Writes a temp file next to `path`, syncs it, then renames it over the
/// target. The file is either fully replaced or left untouched.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(data)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| err.error)?;

    Ok(())
}
