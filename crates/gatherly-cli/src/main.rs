use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use gatherly_core::Settings;

mod commands;

#[derive(Parser)]
#[command(name = "gatherly-cli", version, about = "Gatherly CLI")]
struct Cli {
    /// Path to a TOML settings file; defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Meeting suggestion and confirmation
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Compatibility matching
    Match {
        #[command(subcommand)]
        action: commands::matches::MatchAction,
    },
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn load_settings(path: Option<&Path>) -> Result<Settings, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Settings::from_toml(&fs::read_to_string(path)?)?),
        None => Ok(Settings::default()),
    }
}

fn main() {
    let cli = Cli::parse();
    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Schedule { action } => commands::schedule::run(action, &settings),
        Commands::Match { action } => commands::matches::run(action, &settings),
        Commands::Config { action } => commands::config::run(action, &settings),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
