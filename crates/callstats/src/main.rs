//! `callstats` - CLI for call billing records
//!
//! Runs the interactive menu by default; the other subcommands work on a
//! data file in one shot.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;
use std::path::Path;

use anyhow::Context;
use clap::Parser;

use callstats::cli::{
    Cli, Command, ConfigCommand, ExportCommand, MenuCommand, SearchCommand, ShowCommand,
};
use callstats::{init_logging, report, CallStore, Config, Session};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    // Execute the command
    match cli.command {
        None => handle_menu(&config, &MenuCommand::default()),
        Some(Command::Menu(menu_cmd)) => handle_menu(&config, &menu_cmd),
        Some(Command::Show(show_cmd)) => handle_show(&config, &show_cmd),
        Some(Command::Search(search_cmd)) => handle_search(&config, &search_cmd),
        Some(Command::Export(export_cmd)) => handle_export(&config, &export_cmd),
        Some(Command::Rates) => {
            print!("{}", report::render_rates());
            Ok(())
        }
        Some(Command::Config(config_cmd)) => handle_config(&config, config_cmd),
    }
}

fn load_store(config: &Config, file: &Path) -> anyhow::Result<CallStore> {
    let mut store = CallStore::from_config(&config.store);
    let report = store
        .bulk_load(file)
        .with_context(|| format!("loading call records from {}", file.display()))?;
    if report.skipped > 0 {
        eprintln!(
            "Store capacity is {}; {} records were not loaded.",
            store.capacity(),
            report.skipped
        );
    }
    Ok(store)
}

fn handle_menu(config: &Config, cmd: &MenuCommand) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let store = CallStore::from_config(&config.store);
    let mut session = Session::new(stdin.lock(), stdout.lock(), store, config.export_path());

    if let Some(path) = &cmd.load {
        session.initialize(path)?;
        session.run()?;
    } else {
        session.run_with_init_prompt()?;
    }
    Ok(())
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> anyhow::Result<()> {
    let mut store = load_store(config, &cmd.file)?;
    if !cmd.raw {
        store.recalculate_all();
    }

    if cmd.json {
        println!("{}", report::records_json(store.records())?);
    } else {
        print!("{}", report::render_table(store.records()));
    }
    Ok(())
}

fn handle_search(config: &Config, cmd: &SearchCommand) -> anyhow::Result<()> {
    let mut store = load_store(config, &cmd.file)?;
    store.recalculate_all();

    let totals = store
        .summarize(&cmd.number)
        .with_context(|| format!("searching {}", cmd.file.display()))?;
    let records = store.matching(&cmd.number);

    if cmd.json {
        println!("{}", report::stats_json(records, &totals)?);
    } else {
        print!("{}", report::render_stats(records, &totals));
    }
    Ok(())
}

fn handle_export(config: &Config, cmd: &ExportCommand) -> anyhow::Result<()> {
    let mut store = load_store(config, &cmd.file)?;
    if !cmd.raw {
        store.recalculate_all();
    }

    let output = cmd.output.as_deref().unwrap_or_else(|| config.export_path());
    let written = store.export_all(output)?;
    println!("Saved {written} call records to {}", output.display());
    Ok(())
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
                println!("[Store]");
                println!("  Capacity:           {}", config.store.capacity);
                println!("  Overflow policy:    {:?}", config.store.overflow);
                println!();
                println!("[Export]");
                println!("  Path:               {}", config.export_path().display());
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
