use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Simple, file-backed task tracker CLI.
/// Storage defaults to ./tasks.json, or a path passed via --db / TASK_TRACKER_DB.
#[derive(Parser, Debug)]
#[command(name = "tasks", version, about = "Track tasks in a local JSON file")]
pub struct Cli {
    /// Path to the JSON task store.
    #[arg(long, global = true, env = "TASK_TRACKER_DB", default_value = "tasks.json")]
    pub db: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Status, StatusFilter};
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_add_defaults_to_todo() {
        let cli = Cli::try_parse_from(["tasks", "add", "write report"]).unwrap();
        match cli.command {
            Commands::Add { description, status } => {
                assert_eq!(description, "write report");
                assert_eq!(status, Status::Todo);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_add_accepts_status() {
        let cli = Cli::try_parse_from(["tasks", "add", "review PR", "--status", "in-progress"]).unwrap();
        assert!(matches!(cli.command, Commands::Add { status: Status::InProgress, .. }));
    }

    #[test]
    fn test_update_requires_status() {
        let err = Cli::try_parse_from(["tasks", "update", "1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_invalid_status_is_rejected() {
        let err = Cli::try_parse_from(["tasks", "update", "1", "--status", "blocked"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);

        let err = Cli::try_parse_from(["tasks", "add", "x", "--status", "not-done"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_non_numeric_id_is_rejected() {
        let err = Cli::try_parse_from(["tasks", "delete", "one"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_empty_description_is_rejected() {
        let err = Cli::try_parse_from(["tasks", "add", ""]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_list_accepts_not_done() {
        let cli = Cli::try_parse_from(["tasks", "list", "--status", "not-done"]).unwrap();
        assert!(matches!(cli.command, Commands::List { status: Some(StatusFilter::NotDone) }));

        let cli = Cli::try_parse_from(["tasks", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::List { status: None }));
    }

    #[test]
    fn test_db_flag_is_global() {
        let cli = Cli::try_parse_from(["tasks", "list", "--db", "/tmp/other.json", "-vv"]).unwrap();
        assert_eq!(cli.db, PathBuf::from("/tmp/other.json"));
        assert_eq!(cli.verbose, 2);
    }
}
