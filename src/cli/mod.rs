//! Command-line interface for taskrepo
//!
//! This module defines the CLI structure using clap derive macros.
//! Command handlers live in `task`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::task::TaskId;

mod task;

/// taskrepo - in-process task repository
///
/// Manage tasks stored in a JSON snapshot file.
#[derive(Parser, Debug)]
#[command(name = "taskrepo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Snapshot file (overrides storage.data_file)
    #[arg(long, global = true, env = "TASKREPO_FILE")]
    pub file: Option<PathBuf>,

    /// Configuration file (defaults to ./.taskrepo.toml)
    #[arg(long, global = true, env = "TASKREPO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a task
    Add {
        /// Task title (may be empty)
        title: String,
    },

    /// Show one task
    Get {
        /// Task id
        id: TaskId,
    },

    /// List tasks, optionally filtered and paginated
    List {
        #[command(flatten)]
        done: DoneFlag,

        /// Page number, starting at 1 (0 disables paging; defaults to 1 with a limit)
        #[arg(long)]
        page: Option<i64>,

        /// Page size (0 disables paging)
        #[arg(long)]
        limit: Option<i64>,
    },

    /// Change a task's title or done flag
    Update {
        /// Task id
        id: TaskId,

        /// New title (defaults to the current one)
        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        done: DoneFlag,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: TaskId,
    },
}

/// Mutually exclusive `--done` / `--open` pair
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct DoneFlag {
    /// Only done tasks / mark as done
    #[arg(long, conflicts_with = "open")]
    pub done: bool,

    /// Only open tasks / mark as open
    #[arg(long)]
    pub open: bool,
}

impl DoneFlag {
    pub fn value(self) -> Option<bool> {
        match (self.done, self.open) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let ctx = task::Context::resolve(self.file, self.config, self.json, self.quiet)?;
        match self.command {
            Commands::Add { title } => task::run_add(&ctx, &title),
            Commands::Get { id } => task::run_get(&ctx, id),
            Commands::List { done, page, limit } => {
                task::run_list(&ctx, done.value(), page, limit)
            }
            Commands::Update { id, title, done } => {
                task::run_update(&ctx, id, title, done.value())
            }
            Commands::Delete { id } => task::run_delete(&ctx, id),
        }
    }
}
