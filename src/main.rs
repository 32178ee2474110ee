//! # tasks - a small file-backed task tracker
//!
//! Keeps a flat list of tasks in a local JSON file and offers four commands
//! over it:
//!
//! ```bash
//! tasks add "write report"
//! tasks add "review PR" --status in-progress
//! tasks update 1 --status done
//! tasks list --status not-done
//! tasks delete 1
//! ```
//!
//! Every mutating command loads the whole file, applies one change and rewrites
//! it. The store lives in `./tasks.json` unless `--db` or `TASK_TRACKER_DB`
//! point elsewhere. There is no locking: two invocations racing on the same file
//! may lose an update.

use clap::Parser;
use tracing::debug;

pub mod cli;
pub mod cmd;
pub mod db;
pub mod error;
pub mod fields;
pub mod logging;
pub mod task;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    debug!(db = %cli.db.display(), command = ?cli.command, "starting");

    cmd::run(cli.command, &cli.db);
}
