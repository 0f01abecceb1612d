//! Centralized configuration paths for docbus
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/docbus/`
//! - Windows: `%APPDATA%\docbus\`

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "docbus";

/// Prefix of the daily-rotated log files
pub const LOG_FILE_PREFIX: &str = "docbus.log";

/// Base config directory for docbus
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/docbus`
///   - Else: `~/.config/docbus`
///
/// Windows:
///   - `%APPDATA%\docbus`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/docbus/keymap.yaml`
pub fn keymap_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("keymap.yaml"))
}

/// `~/.config/docbus/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Newest log file in the logs dir, e.g. `docbus.log.2026-10-19`
pub fn log_file() -> Option<PathBuf> {
    let logs_dir = logs_dir()?;
    latest_log_in(&logs_dir).or_else(|| Some(logs_dir.join(LOG_FILE_PREFIX)))
}

/// Daily rotation names sort by date, so the greatest name is the newest
fn latest_log_in(dir: &Path) -> Option<PathBuf> {
    fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(LOG_FILE_PREFIX))
        })
        .max()
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = ensure_config_dir()?.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}
