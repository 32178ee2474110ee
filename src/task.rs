//! Task data structure and related functionality.
//!
//! This module defines the `Task` record persisted in the store, together with the
//! local-time timestamp format used for its `createdAt` / `updatedAt` fields.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TaskError};
use crate::fields::Status;

/// On-disk and display format for task timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single tracked unit of work.
///
/// Field order here is the field order written to the store file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub description: String,
    pub status: Status,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub updated_at: NaiveDateTime,
}

impl Task {
    /// Build a new task stamped with `now` for both timestamps.
    pub fn new(id: u64, description: impl Into<String>, status: Status, now: NaiveDateTime) -> Result<Self> {
        let task = Task {
            id,
            description: description.into(),
            status,
            created_at: now,
            updated_at: now,
        };
        task.validate()?;
        Ok(task)
    }

    /// Check the invariants every stored task must hold.
    pub fn validate(&self) -> Result<()> {
        if self.id == 0 {
            return Err(TaskError::Validation("task id must be positive".into()));
        }
        if self.description.trim().is_empty() {
            return Err(TaskError::Validation("description must not be empty".into()));
        }
        Ok(())
    }

    /// Move the task to `status`, refreshing `updated_at`.
    pub fn set_status(&mut self, status: Status, now: NaiveDateTime) {
        self.status = status;
        self.updated_at = now;
    }
}

/// Current local time truncated to whole seconds, matching what the store can hold.
pub fn now_local() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Format a timestamp the way it is stored and listed.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(de::Error::custom)
    }
}
