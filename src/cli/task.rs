//! taskrepo command implementations
//!
//! Every command builds a repository from configuration, warm-starts it
//! from the snapshot file and performs a single operation. `--file` only
//! replaces the snapshot path; formatting still comes from configuration.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::output::{emit_success, task_line, HumanOutput, OutputOptions};
use crate::repository::TaskRepository;
use crate::storage::SnapshotStore;
use crate::task::{Task, TaskId};

/// Resolved configuration shared by all commands
pub struct Context {
    repo: TaskRepository,
    default_limit: i64,
    output: OutputOptions,
}

impl Context {
    pub fn resolve(
        file: Option<PathBuf>,
        config_path: Option<PathBuf>,
        json: bool,
        quiet: bool,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let (config, base_dir) = match config_path {
            Some(path) => {
                let config = Config::load(&path)?;
                let base_dir = path
                    .parent()
                    .filter(|parent| !parent.as_os_str().is_empty())
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| cwd.clone());
                (config, base_dir)
            }
            None => (Config::load_from_dir(&cwd), cwd.clone()),
        };

        let repo = match file {
            Some(file) => {
                TaskRepository::new(SnapshotStore::new(file).with_pretty(config.storage.pretty))
            }
            None => TaskRepository::from_config(&config, &base_dir),
        };
        repo.load();

        Ok(Self {
            repo,
            default_limit: config.list.default_limit,
            output: OutputOptions { json, quiet },
        })
    }
}

#[derive(Serialize)]
struct ListReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    done: Option<bool>,
    page: i64,
    limit: i64,
    tasks: &'a [Task],
}

pub fn run_add(ctx: &Context, title: &str) -> Result<()> {
    let task = ctx.repo.create(title);
    let human = HumanOutput::for_task(format!("Created task #{}", task.id), &task);
    emit_success(ctx.output, "add", &task, Some(&human))
}

pub fn run_get(ctx: &Context, id: TaskId) -> Result<()> {
    let task = ctx.repo.get(id)?;
    let human = HumanOutput::for_task(format!("Task #{}", task.id), &task);
    emit_success(ctx.output, "get", &task, Some(&human))
}

pub fn run_list(
    ctx: &Context,
    done: Option<bool>,
    page: Option<i64>,
    limit: Option<i64>,
) -> Result<()> {
    let limit = limit.unwrap_or(ctx.default_limit);
    // Only an omitted --page falls back to the first page.
    let page = page.unwrap_or(if limit > 0 { 1 } else { 0 });
    let tasks = ctx.repo.list_filtered(done, page, limit);

    let mut human = HumanOutput::new(format!("{} task(s)", tasks.len()));
    if page > 0 && limit > 0 {
        human.push_summary("page", page.to_string());
        human.push_summary("limit", limit.to_string());
    }
    for task in &tasks {
        human.push_detail(task_line(task));
    }

    let report = ListReport {
        done,
        page,
        limit,
        tasks: &tasks,
    };
    emit_success(ctx.output, "list", &report, Some(&human))
}

pub fn run_update(
    ctx: &Context,
    id: TaskId,
    title: Option<String>,
    done: Option<bool>,
) -> Result<()> {
    let current = ctx.repo.get(id)?;
    let title = title.unwrap_or(current.title);
    let done = done.unwrap_or(current.done);

    let task = ctx.repo.update(id, &title, done)?;
    let human = HumanOutput::for_task(format!("Updated task #{}", task.id), &task);
    emit_success(ctx.output, "update", &task, Some(&human))
}

pub fn run_delete(ctx: &Context, id: TaskId) -> Result<()> {
    let task = ctx.repo.delete(id)?;
    let human = HumanOutput::for_task(format!("Deleted task #{}", task.id), &task);
    emit_success(ctx.output, "delete", &task, Some(&human))
}
