//! Configuration management.
//!
//! Settings are resolved once at startup and passed explicitly into the
//! push workflow. Precedence, highest first:
//!
//! 1. Command-line flags (clap also reads their environment variables,
//!    including anything loaded from `.env`)
//! 2. `~/.sqlpush/config.json`, or the file given with `--config`
//! 3. Built-in defaults

mod file;

pub use file::{FileConfig, default_config_path, load_file_config};

use crate::error::{Error, Result};

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default file suffix to sync.
pub const DEFAULT_EXTENSION: &str = ".sql";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A GitHub repository as `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidRepository {
            value: s.to_string(),
        };

        let trimmed = s.trim();
        let (owner, name) = trimmed.split_once('/').ok_or_else(invalid)?;
        let name = name.strip_suffix(".git").unwrap_or(name);

        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Fully resolved settings for a push run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Local directory to walk.
    pub root: PathBuf,
    pub repo: RepoRef,
    pub token: String,
    /// Case-sensitive name suffix, always starting with `.`.
    pub extension: String,
    /// Target branch; `None` uses the repository default.
    pub branch: Option<String>,
    pub api_url: String,
    pub timeout: Duration,
}

/// Values supplied on the command line (or via their environment variables).
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub repo: Option<String>,
    pub token: Option<String>,
    pub extension: Option<String>,
    pub branch: Option<String>,
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Merge overrides with the config file and validate the result.
///
/// # Errors
///
/// - `RootNotFound` if the root is not an existing directory
/// - `InvalidRepository` if no repository is configured or it is malformed
/// - `MissingToken` if no non-empty token is configured
pub fn resolve_settings(overrides: Overrides, file: FileConfig) -> Result<Settings> {
    let root = overrides
        .root
        .or(file.root)
        .unwrap_or_else(|| PathBuf::from("."));
    if !root.is_dir() {
        return Err(Error::RootNotFound { path: root });
    }

    let repo: RepoRef = overrides
        .repo
        .or(file.repo)
        .unwrap_or_default()
        .parse()?;

    let token = overrides
        .token
        .or(file.token)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(Error::MissingToken)?;

    let extension = normalize_extension(
        overrides
            .extension
            .or(file.extension)
            .as_deref()
            .unwrap_or(DEFAULT_EXTENSION),
    )?;

    let branch = overrides
        .branch
        .or(file.branch)
        .filter(|b| !b.trim().is_empty());

    let api_url = overrides
        .api_url
        .or(file.api_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let timeout_secs = overrides
        .timeout_secs
        .or(file.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(Error::InvalidArgument("timeout must be at least 1 second".into()));
    }

    Ok(Settings {
        root,
        repo,
        token,
        extension,
        branch,
        api_url,
        timeout: Duration::from_secs(timeout_secs),
    })
}

/// Normalize an extension to a leading-dot suffix (`sql` → `.sql`).
///
/// # Errors
///
/// Returns `InvalidArgument` for an empty extension or one containing a path
/// separator.
pub fn normalize_extension(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let bare = trimmed.strip_prefix('.').unwrap_or(trimmed);
    if bare.is_empty() || bare.contains(['/', '\\']) {
        return Err(Error::InvalidArgument(format!("invalid extension '{raw}'")));
    }
    Ok(format!(".{bare}"))
}

/// Load `.env` from the working directory (or a parent), if present.
///
/// Existing environment variables win over values in the file. Returns the
/// path that was loaded, if any.
///
/// # Errors
///
/// Returns a configuration error if a `.env` file exists but cannot be parsed.
pub fn load_dotenv() -> Result<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(Error::Config(format!("Failed to load .env: {e}"))),
    }
}
