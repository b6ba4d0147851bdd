mod config;
pub mod database;

pub use config::{Config, ServerConfig, StorageConfig};
pub use database::{Bucket, Database, Txn};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "PUSHUP_DATA_DIR";

/// Returns the data directory, creating it if needed.
///
/// `PUSHUP_DATA_DIR` wins when set. Otherwise `~/.config/pushup-tracker[-dev]/`
/// based on `PUSHUP_ENV`; set `PUSHUP_ENV=dev` to use the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("PUSHUP_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pushup-tracker-dev")
            } else {
                base_dir.join("pushup-tracker")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
