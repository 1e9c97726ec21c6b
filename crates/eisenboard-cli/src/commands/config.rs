//! `config.toml` inspection and editing.

use clap::Subcommand;
use eisenboard_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting, e.g. `scoring.urgency_threshold` or `storage.api_url`
    Get {
        /// Dot path into a section of `config.toml`
        key: String,
    },
    /// Change one setting; the whole file is re-validated before saving
    Set {
        /// Dot path, e.g. `scoring.prefill`
        key: String,
        /// New value. Lists and sections take JSON, e.g. '["a","b","c"]'
        value: String,
    },
    /// Dump the whole configuration as JSON
    List,
    /// Restore the default questions and scoring policy
    Reset,
    /// Print where `config.toml` lives
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("no setting at '{key}'").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("{key} = {}", config.get(&key).unwrap_or_default());
        }
        ConfigAction::List => {
            let config = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("Configuration reset: {}", Config::path()?.display());
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
    }
    Ok(())
}
