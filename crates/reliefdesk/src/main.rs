//! `reliefdesk` - CLI for the disaster-response record desk
//!
//! Without a subcommand this binary runs the interactive session against the
//! record files in the configured data directory.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use reliefdesk::cli::{Cli, Command, ConfigCommand};
use reliefdesk::storage::FileReport;
use reliefdesk::{init_logging, Config, Console, RecordStore, Session};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration, letting --data-dir override it
    let mut config =
        Config::load_from(cli.config.clone()).context("could not load configuration")?;
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = Some(dir.clone());
    }

    match cli.into_command() {
        Command::Run => handle_run(&config)?,
        Command::Check(check_cmd) => return handle_check(&config, check_cmd.json),
        Command::Config(config_cmd) => handle_config(&config, config_cmd)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_run(config: &Config) -> anyhow::Result<()> {
    let (store, report) = RecordStore::open(config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(store, Console::new(stdin.lock(), stdout.lock()));
    session.announce_load(&report)?;
    session.run().context("interactive session failed")?;
    Ok(())
}

fn handle_check(config: &Config, json: bool) -> anyhow::Result<ExitCode> {
    let (_, report) = RecordStore::open(config);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("reliefdesk check");
        println!("----------------");
        print_file_report("Users", &report.users);
        print_file_report("Disasters", &report.events);
    }

    let unreadable = [&report.users, &report.events]
        .iter()
        .any(|file| file.is_unreadable());
    if report.skipped_count() > 0 || unreadable {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn print_file_report(label: &str, report: &FileReport) {
    println!("{label}:");
    println!("  File:     {}", report.path.display());
    if report.missing {
        println!("  Status:   not found (no records yet)");
    } else if let Some(failure) = &report.failure {
        println!("  Status:   unreadable ({failure})");
    } else {
        println!("  Records:  {}", report.loaded);
        println!("  Skipped:  {}", report.skipped.len());
        for skipped in &report.skipped {
            println!("    line {}: {}", skipped.line_number, skipped.reason);
        }
    }
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data directory:  {}", config.data_dir().display());
                println!("  Users file:      {}", config.users_path().display());
                println!("  Disasters file:  {}", config.events_path().display());
                println!("  Atomic writes:   {}", config.storage.atomic_writes);
                println!();
                println!("[Events]");
                println!("  Id strategy:     {:?}", config.events.id_strategy);
                println!("  Id range:        0..{}", config.events.id_range);
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
