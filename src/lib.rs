//! taskrepo - in-process task repository
//!
//! This library keeps a collection of tasks in memory and mirrors it to a
//! single JSON snapshot file after every mutation.
//!
//! # Core Concepts
//!
//! - **Tasks**: records with an id, title, done flag and timestamps
//! - **Repository**: the `RwLock`-guarded owner of all tasks
//! - **Snapshots**: whole-collection JSON files replaced atomically
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.taskrepo.toml`
//! - `error`: Error types and result aliases
//! - `output`: JSON envelope and human output for the CLI
//! - `repository`: The task repository
//! - `storage`: Snapshot file I/O
//! - `task`: Task records, filtering and pagination

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod repository;
pub mod storage;
pub mod task;

pub use error::{Error, Result};
pub use repository::TaskRepository;
pub use task::{Task, TaskId};
