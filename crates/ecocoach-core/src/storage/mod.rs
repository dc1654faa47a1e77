mod config;

pub use config::{CoachConfig, Config};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/ecocoach[-dev]/` based on ECOCOACH_ENV.
///
/// Set ECOCOACH_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("ECOCOACH_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("ecocoach-dev")
    } else {
        base_dir.join("ecocoach")
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
