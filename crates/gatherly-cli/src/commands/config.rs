use std::fs;
use std::path::PathBuf;

use clap::Subcommand;

use gatherly_core::Settings;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the active engine settings as TOML
    Show,
    /// Validate a settings file and echo the resolved values as JSON
    Check {
        #[arg(long)]
        file: PathBuf,
    },
}

pub fn run(action: ConfigAction, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            print!("{}", settings.to_toml()?);
        }
        ConfigAction::Check { file } => {
            let parsed = Settings::from_toml(&fs::read_to_string(file)?)?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
    }
    Ok(())
}
