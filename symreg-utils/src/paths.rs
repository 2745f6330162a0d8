//! Path utilities for symreg
//!
//! Handles XDG Base Directory specification compliance for config,
//! data, cache, and log directories.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Application identifier for XDG directories
const APP_NAME: &str = "symreg";

/// Get project directories
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Get the configuration directory
///
/// Location: `$XDG_CONFIG_HOME/symreg` or `~/.config/symreg`
pub fn config_dir() -> PathBuf {
    project_dirs()
        .map(|p| p.config_dir().to_path_buf())
        .unwrap_or_else(|| home_fallback(".config"))
}

/// Get the main configuration file path
///
/// Location: `$XDG_CONFIG_HOME/symreg/config.toml`
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Get the data directory (persistent data like exported data sets)
///
/// Location: `$XDG_DATA_HOME/symreg` or `~/.local/share/symreg`
pub fn data_dir() -> PathBuf {
    project_dirs()
        .map(|p| p.data_local_dir().to_path_buf())
        .unwrap_or_else(|| home_fallback(".local/share"))
}

/// Get the cache directory (temporary data, safe to delete)
///
/// Location: `$XDG_CACHE_HOME/symreg` or `~/.cache/symreg`
pub fn cache_dir() -> PathBuf {
    project_dirs()
        .map(|p| p.cache_dir().to_path_buf())
        .unwrap_or_else(|| home_fallback(".cache"))
}

/// Get the log directory
///
/// Location: `$XDG_STATE_HOME/symreg/logs` or `~/.local/state/symreg/logs`
pub fn log_dir() -> PathBuf {
    project_dirs()
        .and_then(|p| p.state_dir().map(|d| d.to_path_buf()))
        .unwrap_or_else(|| home_fallback(".local/state"))
        .join("logs")
}

fn home_fallback(subdir: &str) -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
        .join(subdir)
        .join(APP_NAME)
}
