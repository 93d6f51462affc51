//! Shared setup for every subcommand.
//!
//! [`CommandContext::initialize`] loads the config, applies the command-line overrides,
//! builds the selected backend and an [`Explorer`] positioned at the requested
//! directory, then loads that directory's listing. A listing that cannot be loaded
//! fails the command here so each subcommand can assume it has one.

use crate::core::{
    backend::{Backend, HttpBackend, LocalBackend},
    config::{BackendKind, ConfigOverrides, ExplorerConfig},
    error::Result,
    explorer::Explorer,
    listing_cache::RefreshOutcome,
    paths::{join, normalize},
};
use std::sync::Arc;

pub struct CommandContext {
    pub config: ExplorerConfig,
    pub explorer: Explorer,
}

impl CommandContext {
    /// Build the explorer for `path` (absolute, or relative to the root) and load it.
    pub async fn initialize(overrides: ConfigOverrides, path: Option<&str>) -> Result<Self> {
        let config = ExplorerConfig::load_or_create()?.apply(overrides);
        let backend = build_backend(&config)?;

        let root = config.root();
        let target = match path {
            Some(p) => resolve_path(&root, p),
            None => config.start_path(),
        };
        let root = if is_within(&root, &target) {
            root
        } else {
            log::warn!("{target} is outside the configured root {root}; using it as the root");
            target.clone()
        };

        log::debug!("Opening {target} (root {root}) with the {:?} backend", config.backend);
        let explorer = Explorer::with_initial_path(backend, &root, &target);

        if let RefreshOutcome::Failed { error, .. } = explorer.start().await {
            return Err(error);
        }

        Ok(Self { config, explorer })
    }
}

pub fn build_backend(config: &ExplorerConfig) -> Result<Arc<dyn Backend>> {
    Ok(match config.backend {
        BackendKind::Local => Arc::new(LocalBackend::new()),
        BackendKind::Http => Arc::new(HttpBackend::new(
            &config.server_url,
            config.session_token.clone(),
            config.request_timeout(),
        )?),
    })
}

fn resolve_path(root: &str, path: &str) -> String {
    if path.starts_with('/') {
        normalize(path)
    } else {
        join(root, path)
    }
}

fn is_within(root: &str, path: &str) -> bool {
    root == "/"
        || path == root
        || path
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('/'))
}
