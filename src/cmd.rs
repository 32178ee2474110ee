//! Command implementations for the CLI interface.
//!
//! Each handler runs one store operation against the configured store path and
//! prints the outcome. Not-found ids are reported and the process carries on;
//! validation failures become clap usage errors; anything else is fatal.

use std::path::Path;

use clap::builder::NonEmptyStringValueParser;
use clap::error::ErrorKind;
use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use tracing::debug;

use crate::cli::Cli;
use crate::db::*;
use crate::error::TaskError;
use crate::fields::{Status, StatusFilter};
use crate::task::Task;

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task.
    Add {
        /// What needs doing.
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        description: String,
        /// Initial status.
        #[arg(long, value_enum, default_value_t = Status::Todo)]
        status: Status,
    },

    /// Change the status of a task.
    Update {
        /// Task ID.
        id: u64,
        /// New status.
        #[arg(long, value_enum)]
        status: Status,
    },

    /// Delete a task by ID.
    Delete {
        /// Task ID.
        id: u64,
    },

    /// List tasks, optionally filtered by status.
    List {
        /// Only show tasks with this status; not-done shows everything unfinished.
        #[arg(long, value_enum)]
        status: Option<StatusFilter>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Dispatch a parsed command against the store at `db_path`.
pub fn run(command: Commands, db_path: &Path) {
    match command {
        Commands::Add { description, status } => cmd_add(db_path, &description, status),
        Commands::Update { id, status } => cmd_update(db_path, id, status),
        Commands::Delete { id } => cmd_delete(db_path, id),
        Commands::List { status } => cmd_list(db_path, status),
        Commands::Completions { shell } => cmd_completions(shell),
    }
}

/// Add a new task to the store.
pub fn cmd_add(db_path: &Path, description: &str, status: Status) {
    match add_task(db_path, description, status) {
        Ok(task) => println!("{}", added_message(&task)),
        Err(e) => fail(e),
    }
}

/// Set a task's status.
pub fn cmd_update(db_path: &Path, id: u64, status: Status) {
    match update_task(db_path, id, status) {
        Ok(task) => println!("{}", updated_message(&task)),
        Err(TaskError::NotFound(id)) => println!("{}", not_found_message(id)),
        Err(e) => fail(e),
    }
}

/// Delete a task.
pub fn cmd_delete(db_path: &Path, id: u64) {
    match delete_task(db_path, id) {
        Ok(task) => println!("{}", deleted_message(&task)),
        Err(TaskError::NotFound(id)) => println!("{}", not_found_message(id)),
        Err(e) => fail(e),
    }
}

/// Print the task table.
pub fn cmd_list(db_path: &Path, status: Option<StatusFilter>) {
    match list_tasks(db_path, status) {
        Ok(tasks) => print!("{}", list_output(&tasks)),
        Err(e) => fail(e),
    }
}

/// Write a completion script for `shell` to stdout.
pub fn cmd_completions(shell: Shell) {
    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

fn added_message(task: &Task) -> String {
    format!("Added task #{}: '{}' [{}]", task.id, task.description, task.status)
}

fn updated_message(task: &Task) -> String {
    format!("Updated task {} to [{}]", task.id, task.status)
}

fn deleted_message(task: &Task) -> String {
    format!("Task {} deleted.", task.id)
}

fn not_found_message(id: u64) -> String {
    format!("Task {id} not found.")
}

/// Everything `list` prints: a blank line and the table, or a placeholder.
fn list_output(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        "(no tasks found)\n".to_string()
    } else {
        format!("\n{}", render_table(tasks))
    }
}

/// Report a fatal error and exit nonzero.
fn fail(err: TaskError) -> ! {
    match err {
        TaskError::Validation(msg) => Cli::command().error(ErrorKind::ValueValidation, msg).exit(),
        other => {
            debug!(error = ?other, "command failed");
            eprintln!("Error: {other}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task(id: u64, description: &str, status: Status) -> Task {
        let now = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
        Task::new(id, description, status, now).unwrap()
    }

    #[test]
    fn test_added_message() {
        let task = task(2, "review PR", Status::InProgress);
        assert_eq!(added_message(&task), "Added task #2: 'review PR' [in-progress]");
    }

    #[test]
    fn test_updated_message() {
        let task = task(1, "write report", Status::Done);
        assert_eq!(updated_message(&task), "Updated task 1 to [done]");
    }

    #[test]
    fn test_deleted_and_not_found_messages() {
        let task = task(1, "write report", Status::Todo);
        assert_eq!(deleted_message(&task), "Task 1 deleted.");
        assert_eq!(not_found_message(9), "Task 9 not found.");
        assert_eq!(not_found_message(9), TaskError::NotFound(9).to_string());
    }

    #[test]
    fn test_empty_list_prints_placeholder() {
        assert_eq!(list_output(&[]), "(no tasks found)\n");
    }

    #[test]
    fn test_list_starts_with_blank_line_then_table() {
        let tasks = vec![task(2, "review PR", Status::InProgress)];
        let out = list_output(&tasks);
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some(""));
        assert!(lines.next().unwrap().starts_with("ID    DESCRIPTION"));
        assert_eq!(lines.next(), Some("-".repeat(95).as_str()));
        assert!(lines.next().unwrap().starts_with("2     review PR"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_completions_mention_subcommands() {
        let mut app = Cli::command();
        let mut out = Vec::new();
        generate(Shell::Bash, &mut app, "tasks", &mut out);
        let script = String::from_utf8(out).unwrap();
        for sub in ["add", "update", "delete", "list"] {
            assert!(script.contains(sub), "completion script lacks {sub}");
        }
    }
}
