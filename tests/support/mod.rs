#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use taskrepo::storage::{SnapshotStore, TaskMap};
use taskrepo::TaskRepository;
use tempfile::TempDir;

pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_file(&self) -> PathBuf {
        self.dir.path().join("tasks.json")
    }

    pub fn repo(&self) -> TaskRepository {
        TaskRepository::open(self.data_file())
    }

    /// Fresh repository warm-started from the snapshot on disk
    pub fn reopen(&self) -> TaskRepository {
        let repo = self.repo();
        repo.load();
        repo
    }

    pub fn read_snapshot(&self) -> Result<TaskMap, Box<dyn std::error::Error>> {
        SnapshotStore::new(self.data_file())
            .read()?
            .ok_or_else(|| "snapshot missing".into())
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }
}

/// The taskrepo binary, isolated from the caller's environment
pub fn taskrepo_cmd(dir: &TestDir) -> Command {
    let mut cmd = Command::cargo_bin("taskrepo").expect("binary");
    cmd.current_dir(dir.path())
        .env_remove("TASKREPO_FILE")
        .env_remove("TASKREPO_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}
