//! Configuration loading and discovery for `qstr.toml`
//!
//! Provides functions to find and load configuration.

use super::schema::QstrConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name searched for during discovery
pub const CONFIG_FILE_NAME: &str = "qstr.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse qstr.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// Directory holding per-user configuration: `$XDG_CONFIG_HOME`, else `$HOME/.config`.
pub fn config_home() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
}

/// Every location a qstr.toml is looked for, nearest first.
///
/// `start` and each of its ancestors come first, then `<config_home>/qstr/qstr.toml`.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use qstr::config::candidate_paths;
///
/// let paths = candidate_paths(Path::new("/srv/chat"), Some(Path::new("/home/ana/.config")));
/// assert_eq!(
///     paths,
///     vec![
///         PathBuf::from("/srv/chat/qstr.toml"),
///         PathBuf::from("/srv/qstr.toml"),
///         PathBuf::from("/qstr.toml"),
///         PathBuf::from("/home/ana/.config/qstr/qstr.toml"),
///     ]
/// );
/// ```
pub fn candidate_paths(start: &Path, config_home: Option<&Path>) -> Vec<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .chain(config_home.map(|home| home.join("qstr").join(CONFIG_FILE_NAME)))
        .collect()
}

/// First existing file among [`candidate_paths`].
pub fn find_config_in(start: &Path, config_home: Option<&Path>) -> Option<PathBuf> {
    let found = candidate_paths(start, config_home)
        .into_iter()
        .find(|path| path.is_file());
    if let Some(path) = &found {
        debug!(path = %path.display(), "found config");
    }
    found
}

/// Discover qstr.toml from the current directory and the user config home.
pub fn find_config() -> Option<PathBuf> {
    let cwd = env::current_dir().ok()?;
    find_config_in(&cwd, config_home().as_deref())
}

/// Load configuration.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
///
/// # Errors
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_config(path: Option<&Path>) -> Result<QstrConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => {
            debug!("no qstr.toml found, using defaults");
            Ok(QstrConfig::default())
        }
    }
}

/// Load configuration from a specific file path.
pub fn load_config_file(path: &Path) -> Result<QstrConfig, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<QstrConfig, ConfigError> {
    let config: QstrConfig = toml::from_str(contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}
