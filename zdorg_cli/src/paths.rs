//! Centralized path management for the zdorg CLI

use std::path::PathBuf;

/// The name of the application directory used across all platforms
const APP_DIR: &str = "zdorg";

/// The name of the configuration file
const CONFIG_FILE: &str = "config.toml";

/// Returns the path to the configuration directory
///
/// `$XDG_CONFIG_HOME/zdorg` when set (Linux/macOS), otherwise the platform
/// config directory:
/// - Linux: `~/.config/zdorg`
/// - macOS: `~/Library/Application Support/zdorg`
/// - Windows: `%APPDATA%/zdorg`
///
/// Falls back to `.zdorg` in the current directory.
pub fn get_config_dir() -> PathBuf {
    #[cfg(not(target_os = "windows"))]
    if let Some(xdg_config) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg_config).join(APP_DIR);
    }

    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".zdorg"))
}

/// Returns the path to the configuration file
pub fn get_config_path() -> PathBuf {
    get_config_dir().join(CONFIG_FILE)
}
