//! Enumerations used to categorise and filter tasks.
//!
//! `Status` is the only state a task carries; `StatusFilter` is the wider set of
//! values accepted by `list --status`, which adds the derived `not-done` filter.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Task lifecycle status. Any status may move to any other.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter accepted by `list --status`.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum StatusFilter {
    Todo,
    InProgress,
    Done,
    /// Anything that is not done.
    NotDone,
}

impl StatusFilter {
    /// Whether a task with the given status passes this filter.
    pub fn matches(self, status: Status) -> bool {
        match self {
            StatusFilter::Todo => status == Status::Todo,
            StatusFilter::InProgress => status == Status::InProgress,
            StatusFilter::Done => status == Status::Done,
            StatusFilter::NotDone => status != Status::Done,
        }
    }
}
