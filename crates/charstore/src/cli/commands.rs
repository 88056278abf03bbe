//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands and their
//! conversion into store inputs.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::record::{CharacterChanges, Gender, NewCharacter};

/// Init command arguments.
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Overwrite an existing data file with an empty one
    #[arg(long)]
    pub force: bool,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Character id
    pub id: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Create command arguments.
#[derive(Debug, Args)]
pub struct CreateCommand {
    /// Character name
    #[arg(short, long)]
    pub name: String,

    /// Status (Alive / Dead / unknown)
    #[arg(short, long, default_value = "")]
    pub status: String,

    /// Species (Human / Alien / Robot ...)
    #[arg(long, default_value = "")]
    pub species: String,

    /// Type, usually empty
    #[arg(long = "type", value_name = "TYPE", default_value = "")]
    pub kind: String,

    /// Gender (male / female / unknown / genderless)
    #[arg(short, long, default_value = "unknown")]
    pub gender: Gender,

    /// Place of origin
    #[arg(long, default_value = "")]
    pub origin: String,

    /// Current location
    #[arg(long, default_value = "")]
    pub location: String,
}

/// Update command arguments.
///
/// Omitted flags leave the field as it is; an explicit empty value
/// (`--type ""`) clears it.
#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Character id
    pub id: u32,

    /// New name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New status
    #[arg(short, long)]
    pub status: Option<String>,

    /// New species
    #[arg(long)]
    pub species: Option<String>,

    /// New type
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    /// New gender (male / female / unknown / genderless)
    #[arg(short, long)]
    pub gender: Option<Gender>,

    /// New place of origin
    #[arg(long)]
    pub origin: Option<String>,

    /// New location
    #[arg(long)]
    pub location: Option<String>,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Character id
    pub id: u32,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Also save the report to the report directory
    #[arg(long)]
    pub save: bool,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

impl From<CreateCommand> for NewCharacter {
    fn from(cmd: CreateCommand) -> Self {
        Self {
            name: cmd.name,
            status: cmd.status,
            species: cmd.species,
            kind: cmd.kind,
            gender: cmd.gender,
            origin_name: cmd.origin,
            location_name: cmd.location,
        }
    }
}

impl UpdateCommand {
    /// Split into the target id and the requested changes.
    #[must_use]
    pub fn into_changes(self) -> (u32, CharacterChanges) {
        let changes = CharacterChanges {
            name: self.name,
            status: self.status,
            species: self.species,
            kind: self.kind,
            gender: self.gender,
            origin_name: self.origin,
            location_name: self.location,
        };
        (self.id, changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(id: u32) -> UpdateCommand {
        UpdateCommand {
            id,
            name: None,
            status: None,
            species: None,
            kind: None,
            gender: None,
            origin: None,
            location: None,
        }
    }

    #[test]
    fn test_create_command_conversion() {
        let cmd = CreateCommand {
            name: "Squanchy".to_string(),
            status: "Alive".to_string(),
            species: "Cat-Person".to_string(),
            kind: String::new(),
            gender: Gender::Male,
            origin: "unknown".to_string(),
            location: "Planet Squanch".to_string(),
        };
        let new = NewCharacter::from(cmd);
        assert_eq!(new.name, "Squanchy");
        assert_eq!(new.origin_name, "unknown");
        assert_eq!(new.location_name, "Planet Squanch");
        assert_eq!(new.gender, Gender::Male);
    }

    #[test]
    fn test_update_without_flags_is_empty() {
        let (id, changes) = update(3).into_changes();
        assert_eq!(id, 3);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_update_keeps_explicit_empty() {
        let mut cmd = update(3);
        cmd.kind = Some(String::new());
        let (_, changes) = cmd.into_changes();
        assert_eq!(changes.kind, Some(String::new()));
        assert!(changes.name.is_none());
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
