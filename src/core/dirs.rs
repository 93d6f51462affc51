use crate::core::error::ExplorerError;
use std::path::PathBuf;

const APP_DIR: &str = "git-explorer";

/// Per-user configuration directory for git-explorer.
///
/// Honors `XDG_CONFIG_HOME` on Unix-likes, falls back to the platform default elsewhere.
pub fn get_config_directory() -> Result<PathBuf, ExplorerError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::config_dir(),
    };

    base.map(|dir| dir.join(APP_DIR))
        .ok_or(ExplorerError::ConfigDirectoryNotFound)
}
