//! Optional config file at `~/.sqlpush/config.json`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings persisted in the config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    pub repo: Option<String>,
    pub root: Option<PathBuf>,
    pub extension: Option<String>,
    pub branch: Option<String>,
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Default config file location.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".sqlpush").join("config.json"))
}

/// Load the config file.
///
/// An explicit `path` must exist. The default location is optional and a
/// missing file yields an empty config.
///
/// # Errors
///
/// Returns a configuration error if the file cannot be read or parsed.
pub fn load_file_config(path: Option<&Path>) -> Result<FileConfig> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match default_config_path() {
            Some(p) => (p, false),
            None => return Ok(FileConfig::default()),
        },
    };

    if !path.exists() {
        if required {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(FileConfig::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Failed to read config file: {e}")))?;

    serde_json::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse config file {}: {e}", path.display())))
}
