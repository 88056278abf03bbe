//! `chars` - CLI for charstore
//!
//! Thin driver over [`charstore::Store`]: parses arguments, runs one store
//! operation, and prints the result.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use charstore::cli::output::{render_details, render_plain, render_table};
use charstore::cli::{Cli, Command, ConfigCommand, DeleteCommand, OutputFormat, StatsCommand};
use charstore::{init_logging, Character, Config, GenderCounts, Store};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    let store = Store::new(cli.data_file.clone().unwrap_or_else(|| config.data_file()));

    let found = match cli.command {
        Command::Init(cmd) => {
            if store.init(cmd.force).map_err(with_hint)? {
                println!("Created {}", store.path().display());
            } else {
                println!(
                    "{} already exists (use --force to overwrite)",
                    store.path().display()
                );
            }
            true
        }
        Command::List(cmd) => {
            let all = store.find_all().map_err(with_hint)?;
            print_records(&all, cmd.format, &config)?;
            true
        }
        Command::Show(cmd) => match store.find_by_id(cmd.id).map_err(with_hint)? {
            Some(character) => {
                print_one(&character, cmd.format, &config)?;
                true
            }
            None => not_found(cmd.id),
        },
        Command::Create(cmd) => {
            let created = store.create(cmd.into()).map_err(with_hint)?;
            println!("Created:");
            println!("{}", render_details(&created));
            true
        }
        Command::Update(cmd) => {
            let (id, changes) = cmd.into_changes();
            match store.update(id, changes).map_err(with_hint)? {
                Some(updated) => {
                    println!("Updated:");
                    println!("{}", render_details(&updated));
                    true
                }
                None => not_found(id),
            }
        }
        Command::Delete(cmd) => handle_delete(&store, &cmd)?,
        Command::Stats(cmd) => {
            handle_stats(&store, &config, &cmd)?;
            true
        }
        Command::Config(cmd) => {
            handle_config(&config, cmd)?;
            true
        }
    };

    Ok(if found {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Attach a next step to errors the user can fix directly.
fn with_hint(err: charstore::Error) -> anyhow::Error {
    if err.is_missing_file() {
        anyhow::Error::new(err).context("data file not found; run `chars init` to create it")
    } else {
        err.into()
    }
}

fn not_found(id: u32) -> bool {
    println!("Character with id {id} not found.");
    false
}

fn print_records(records: &[Character], format: OutputFormat, config: &Config) -> Result<()> {
    if records.is_empty() && format != OutputFormat::Json {
        println!("No characters.");
        return Ok(());
    }
    match format {
        OutputFormat::Plain => println!("{}", render_plain(records)),
        OutputFormat::Table => println!("{}", render_table(records, config.display.name_width)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
    }
    Ok(())
}

fn print_one(character: &Character, format: OutputFormat, config: &Config) -> Result<()> {
    match format {
        OutputFormat::Plain => println!("{}", render_details(character)),
        OutputFormat::Table => print_records(std::slice::from_ref(character), format, config)?,
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(character)?),
    }
    Ok(())
}

fn handle_delete(store: &Store, cmd: &DeleteCommand) -> Result<bool> {
    let Some(existing) = store.find_by_id(cmd.id).map_err(with_hint)? else {
        return Ok(not_found(cmd.id));
    };

    if !cmd.yes {
        println!("About to delete:");
        println!("{}", render_details(&existing));
        if !confirm("Delete this character? [y/N]")? {
            println!("Deletion cancelled.");
            return Ok(true);
        }
    }

    if store.delete(cmd.id).map_err(with_hint)? {
        println!("Deleted character {}.", cmd.id);
        Ok(true)
    } else {
        // Removed by someone else between the lookup and the delete.
        Ok(not_found(cmd.id))
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn handle_stats(store: &Store, config: &Config, cmd: &StatsCommand) -> Result<()> {
    let counts = GenderCounts::from_records(&store.find_all().map_err(with_hint)?);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        print!("{}", counts.render());
    }

    if cmd.save {
        let now = chrono::Local::now().naive_local();
        let path = counts
            .save_to(&config.report_dir(), now)
            .context("saving gender report")?;
        println!("Report saved to {}", path.display());
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data file:          {}", config.data_file().display());
                println!();
                println!("[Report]");
                println!("  Output directory:   {}", config.report_dir().display());
                println!();
                println!("[Display]");
                println!("  Name width:         {}", config.display.name_width);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
