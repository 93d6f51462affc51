//! Persistent settings for git-explorer.
//!
//! Stored as pretty JSON in `<config dir>/git-explorer/config.json` (or the file named
//! by `GIT_EXPLORER_CONFIG`) and created with defaults on first use. Command-line flags
//! are applied on top through [`ConfigOverrides`] and never written back.

use crate::core::dirs::get_config_directory;
use crate::core::error::{ExplorerError, Result};
use crate::core::paths::normalize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "config.json";

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "GIT_EXPLORER_CONFIG";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Http,
    Local,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ExplorerConfig {
    pub backend: BackendKind,
    pub server_url: String,
    pub session_token: Option<String>,
    pub root: String,
    pub start_path: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Http,
            server_url: "http://127.0.0.1:8000".to_string(),
            session_token: None,
            root: "/".to_string(),
            start_path: None,
            request_timeout_secs: 30,
        }
    }
}

/// Values given on the command line; `None` keeps the configured value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub local: bool,
    pub server_url: Option<String>,
    pub session_token: Option<String>,
    pub root: Option<String>,
}

impl ExplorerConfig {
    /// `$GIT_EXPLORER_CONFIG` if set, else `<config dir>/git-explorer/config.json`
    pub fn config_path() -> Result<PathBuf> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => Ok(get_config_directory()?.join(CONFIG_FILE)),
        }
    }

    /// Load the user's config, writing the defaults if there is none yet.
    pub fn load_or_create() -> Result<Self> {
        Self::load_or_create_at(&Self::config_path()?)
    }

    pub fn load_or_create_at(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| ExplorerError::config_read_failed(path, e))?;
            let config = serde_json::from_str(&content)
                .map_err(|e| ExplorerError::config_parse_failed(path, e))?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            log::debug!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if overrides.local {
            self.backend = BackendKind::Local;
        }
        if let Some(url) = overrides.server_url {
            self.server_url = url;
            if !overrides.local {
                self.backend = BackendKind::Http;
            }
        }
        if overrides.session_token.is_some() {
            self.session_token = overrides.session_token;
        }
        if let Some(root) = overrides.root {
            self.root = root;
            self.start_path = None;
        }
        self
    }

    pub fn root(&self) -> String {
        normalize(&self.root)
    }

    /// Where browsing starts; the root unless configured otherwise
    pub fn start_path(&self) -> String {
        self.start_path
            .as_deref()
            .map(normalize)
            .unwrap_or_else(|| self.root())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
