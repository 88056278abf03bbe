//! Command-line interface for charstore.
//!
//! This module provides the CLI structure and output rendering for the
//! `chars` binary.

mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, CreateCommand, DeleteCommand, InitCommand, ListCommand, OutputFormat,
    ShowCommand, StatsCommand, UpdateCommand,
};

/// chars - Manage a CSV file of character records
///
/// Every command reads the whole file, and every change rewrites it.
#[derive(Debug, Parser)]
#[command(name = "chars")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// CSV data file to operate on (overrides the configured one)
    #[arg(short, long, global = true, value_name = "CSV")]
    pub data_file: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an empty data file
    Init(InitCommand),

    /// List all characters
    List(ListCommand),

    /// Show one character
    Show(ShowCommand),

    /// Add a character
    Create(CreateCommand),

    /// Change fields of a character
    Update(UpdateCommand),

    /// Remove a character
    Delete(DeleteCommand),

    /// Count characters by gender
    Stats(StatsCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Gender;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "chars");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(
            parse(&["chars", "-q", "list"]).verbosity(),
            crate::logging::Verbosity::Quiet
        );
        assert_eq!(
            parse(&["chars", "list"]).verbosity(),
            crate::logging::Verbosity::Normal
        );
        assert_eq!(
            parse(&["chars", "-v", "list"]).verbosity(),
            crate::logging::Verbosity::Verbose
        );
        assert_eq!(
            parse(&["chars", "-vv", "list"]).verbosity(),
            crate::logging::Verbosity::Trace
        );
    }

    #[test]
    fn test_parse_with_data_file() {
        let cli = parse(&["chars", "list", "-d", "/tmp/chars.csv"]);
        assert_eq!(cli.data_file, Some(PathBuf::from("/tmp/chars.csv")));
    }

    #[test]
    fn test_parse_list_format() {
        let cli = parse(&["chars", "list", "--format", "json"]);
        match cli.command {
            Command::List(cmd) => assert_eq!(cmd.format, OutputFormat::Json),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_show_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["chars", "show", "abc"]).is_err());
        assert!(Cli::try_parse_from(["chars", "show", "-1"]).is_err());
    }

    #[test]
    fn test_parse_create() {
        let cli = parse(&[
            "chars", "create", "--name", "Morty", "--gender", "MALE", "--status", "Alive",
        ]);
        match cli.command {
            Command::Create(cmd) => {
                assert_eq!(cmd.name, "Morty");
                assert_eq!(cmd.gender, Gender::Male);
                assert_eq!(cmd.kind, "");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_create_requires_name() {
        assert!(Cli::try_parse_from(["chars", "create", "--status", "Alive"]).is_err());
    }

    #[test]
    fn test_parse_create_rejects_bad_gender() {
        let result = Cli::try_parse_from(["chars", "create", "--name", "X", "--gender", "robot"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_update_distinguishes_unset_and_empty() {
        let cli = parse(&["chars", "update", "2", "--type", ""]);
        match cli.command {
            Command::Update(cmd) => {
                let (id, changes) = cmd.into_changes();
                assert_eq!(id, 2);
                assert_eq!(changes.kind, Some(String::new()));
                assert!(changes.name.is_none());
                assert!(changes.gender.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_delete_yes() {
        let cli = parse(&["chars", "delete", "7", "--yes"]);
        assert!(matches!(
            cli.command,
            Command::Delete(DeleteCommand { id: 7, yes: true })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["chars", "-c", "/custom/config.toml", "stats"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = parse(&["chars", "config", "validate", "--file", "/x.toml"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }
}
