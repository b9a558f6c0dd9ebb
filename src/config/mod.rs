//! Configuration module
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_ENV: &str = "ELASTIC_BACKEND_SETTINGS_PATH";

/// Load settings from an explicit file, the environment, a default location,
/// or fall back to built-in defaults.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var(SETTINGS_PATH_ENV).ok().map(PathBuf::from))
        .or_else(|| default_paths().into_iter().find(|p| p.exists()));

    let mut settings = match path {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };

    settings.merge_env()?;
    Ok(settings)
}

/// Locations searched for settings.yml, in order
fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("elastic-backend/settings.yml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yml");
        std::fs::write(&path, "nested:\n  default_path: labels\n").unwrap();

        let settings = load(Some(&path)).unwrap();
        assert_eq!(settings.nested.default_path, "labels");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = load(Some(&dir.path().join("missing.yml")));
        assert!(result.is_err());
    }
}
