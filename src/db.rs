//! Task store: loading, saving and mutating the task list.
//!
//! `Database` is the in-memory task list and owns the pure mutations. The
//! `add_task` / `update_task` / `delete_task` / `list_tasks` functions wrap them
//! in the load-mutate-save cycle against an explicit store path.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, TaskError};
use crate::fields::{Status, StatusFilter};
use crate::task::{format_timestamp, now_local, Task};

/// In-memory task list, serialised as a bare JSON array.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Database {
    pub tasks: Vec<Task>,
}

impl Database {
    /// Load the task list from `path`. A missing or blank file is an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "store file absent, starting empty");
            return Ok(Database::default());
        }
        let buf = fs::read_to_string(path).map_err(|e| TaskError::io(path, e))?;
        if buf.trim().is_empty() {
            debug!(path = %path.display(), "store file blank, starting empty");
            return Ok(Database::default());
        }
        let db: Database = serde_json::from_str(&buf).map_err(|e| TaskError::corrupt(path, e))?;
        db.check().map_err(|reason| TaskError::corrupt(path, reason))?;
        debug!(path = %path.display(), count = db.tasks.len(), "loaded task store");
        Ok(db)
    }

    /// Save the task list to `path` via a temp file and rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| TaskError::io(dir, e))?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|e| TaskError::io(path, std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp).map_err(|e| TaskError::io(&tmp, e))?;
        f.write_all(data.as_bytes())
            .and_then(|_| f.write_all(b"\n"))
            .and_then(|_| f.flush())
            .map_err(|e| TaskError::io(&tmp, e))?;
        drop(f);
        fs::rename(&tmp, path).map_err(|e| TaskError::io(path, e))?;
        debug!(path = %path.display(), count = self.tasks.len(), "saved task store");
        Ok(())
    }

    /// Verify loaded records: each task valid, ids unique.
    fn check(&self) -> std::result::Result<(), String> {
        let mut seen = HashSet::new();
        for t in &self.tasks {
            t.validate().map_err(|e| format!("task {}: {e}", t.id))?;
            if !seen.insert(t.id) {
                return Err(format!("duplicate task id {}", t.id));
            }
        }
        Ok(())
    }

    /// Next id to hand out: one past the current maximum, 1 when empty.
    pub fn next_id(&self) -> Result<u64> {
        let max = self.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        max.checked_add(1).ok_or(TaskError::IdsExhausted(max))
    }

    /// Get a mutable reference to a task by ID.
    pub fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Append a new task and return it.
    pub fn add(&mut self, description: &str, status: Status, now: NaiveDateTime) -> Result<&Task> {
        let id = self.next_id()?;
        self.tasks.push(Task::new(id, description, status, now)?);
        self.tasks.last().ok_or(TaskError::NotFound(id))
    }

    /// Change the status of task `id`.
    pub fn set_status(&mut self, id: u64, status: Status, now: NaiveDateTime) -> Result<&Task> {
        let task = self.get_mut(id).ok_or(TaskError::NotFound(id))?;
        task.set_status(status, now);
        Ok(&*task)
    }

    /// Remove task `id`, returning it.
    pub fn remove(&mut self, id: u64) -> Result<Task> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;
        Ok(self.tasks.remove(idx))
    }

    /// Tasks passing `filter`, in store order.
    pub fn filtered(&self, filter: Option<StatusFilter>) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| filter.map_or(true, |f| f.matches(t.status)))
            .collect()
    }
}

/// Add a task to the store at `db_path`.
pub fn add_task(db_path: &Path, description: &str, status: Status) -> Result<Task> {
    let mut db = Database::load(db_path)?;
    let task = db.add(description, status, now_local())?.clone();
    db.save(db_path)?;
    info!(id = task.id, status = %task.status, "added task");
    Ok(task)
}

/// Set the status of task `id` in the store at `db_path`.
pub fn update_task(db_path: &Path, id: u64, status: Status) -> Result<Task> {
    let mut db = Database::load(db_path)?;
    let task = db.set_status(id, status, now_local())?.clone();
    db.save(db_path)?;
    info!(id, status = %status, "updated task");
    Ok(task)
}

/// Delete task `id` from the store at `db_path`. The file is only rewritten on removal.
pub fn delete_task(db_path: &Path, id: u64) -> Result<Task> {
    let mut db = Database::load(db_path)?;
    let removed = db.remove(id)?;
    db.save(db_path)?;
    info!(id, remaining = db.tasks.len(), "deleted task");
    Ok(removed)
}

/// Tasks in the store at `db_path` passing `filter`, in store order.
pub fn list_tasks(db_path: &Path, filter: Option<StatusFilter>) -> Result<Vec<Task>> {
    let db = Database::load(db_path)?;
    Ok(db.filtered(filter).into_iter().cloned().collect())
}

/// Render tasks as the `list` table.
pub fn render_table(tasks: &[Task]) -> String {
    let mut out = format!(
        "{:<5} {:<30} {:<12} {:<20} {:<20}\n",
        "ID", "DESCRIPTION", "STATUS", "CREATED", "UPDATED"
    );
    out.push_str(&"-".repeat(95));
    out.push('\n');
    for t in tasks {
        out.push_str(&format!(
            "{:<5} {:<30} {:<12} {:<20} {:<20}\n",
            t.id,
            t.description,
            t.status.as_str(),
            format_timestamp(&t.created_at),
            format_timestamp(&t.updated_at),
        ));
    }
    out
}
