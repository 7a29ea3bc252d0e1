//! Task records and list helpers.
//!
//! A [`Task`] is a plain value: the repository hands out clones, so a
//! caller holding one never observes later mutations.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Repository-assigned task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        let trimmed = raw.trim().trim_start_matches('#');
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|_| Error::InvalidArgument(format!("invalid task id '{raw}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Build a fresh, not-done task stamped with `now`.
    pub fn new(id: TaskId, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            done: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the mutable fields.
    ///
    /// `updated_at` never moves before `created_at`, even if the wall clock
    /// stepped backwards since creation.
    pub fn apply(&mut self, title: impl Into<String>, done: bool, now: DateTime<Utc>) {
        self.title = title.into();
        self.done = done;
        self.updated_at = now.max(self.created_at);
    }

    /// Whether the task passes an optional completion filter.
    pub fn matches(&self, done: Option<bool>) -> bool {
        done.map_or(true, |wanted| self.done == wanted)
    }
}

/// Slice one page out of an already filtered, ordered list.
///
/// Pages are 1-indexed. `page <= 0` or `limit <= 0` disables paging and
/// returns everything; a page starting past the end is empty.
pub fn paginate<T>(items: Vec<T>, page: i64, limit: i64) -> Vec<T> {
    if page <= 0 || limit <= 0 {
        return items;
    }

    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    let index = usize::try_from(page - 1).unwrap_or(usize::MAX);
    let start = index.saturating_mul(limit);
    if start >= items.len() {
        return Vec::new();
    }

    items.into_iter().skip(start).take(limit).collect()
}
