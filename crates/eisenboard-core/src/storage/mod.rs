mod config;
pub mod database;
pub mod memory;
pub mod migrations;
pub mod remote;
mod store;

pub use config::{Config, StorageConfig};
pub use database::TaskDb;
pub use memory::{demo_tasks, DemoStore};
pub use remote::RemoteStore;
pub use store::{open_store, StoreKind, TaskStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it when missing.
///
/// `EISENBOARD_HOME` wins when set. Otherwise `~/.config/eisenboard/`, or
/// `~/.config/eisenboard-dev/` with `EISENBOARD_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("EISENBOARD_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("EISENBOARD_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("eisenboard-dev")
            } else {
                base_dir.join("eisenboard")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
