//! Cache of the listing on screen.
//!
//! [`DirectoryListingCache`] holds the last committed [`Listing`]. A refresh fetches,
//! classifies and replaces it as a whole, but only if the requested path is still the
//! navigation's current path when the response arrives and the user has not navigated
//! away and back in between. Responses for a directory the user has already left are
//! dropped, whatever order they come back in.

use crate::core::backend::Backend;
use crate::core::error::ExplorerError;
use crate::core::navigation::NavigationState;
use crate::core::paths::normalize;
use crate::core::state::Listing;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// How a refresh settled
#[derive(Debug)]
pub enum RefreshOutcome {
    /// The fetched listing replaced the cached one
    Updated { path: String, entries: usize },
    /// The path was no longer current when the response arrived; nothing changed
    Stale { path: String },
    /// The fetch failed; the cache keeps the previous listing for this path, or an
    /// empty one if it held a different path
    Failed { path: String, error: ExplorerError },
}

impl RefreshOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, RefreshOutcome::Updated { .. })
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, RefreshOutcome::Stale { .. })
    }

    pub fn error(&self) -> Option<&ExplorerError> {
        match self {
            RefreshOutcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct DirectoryListingCache {
    root: String,
    listing: Mutex<Listing>,
}

impl DirectoryListingCache {
    pub fn new(root: &str, initial_path: &str) -> Self {
        let root = normalize(root);
        Self {
            listing: Mutex::new(Listing::empty(initial_path, &root)),
            root,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Listing> {
        self.listing.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The most recently committed listing
    pub fn current(&self) -> Listing {
        self.lock().clone()
    }

    /// Path of the most recently committed listing
    pub fn current_path(&self) -> String {
        self.lock().path.clone()
    }

    /// Fetch `path`, classify it and commit it if navigation has not moved since.
    pub async fn refresh(
        &self,
        backend: &dyn Backend,
        navigation: &NavigationState,
        path: &str,
    ) -> RefreshOutcome {
        let path = normalize(path);
        let ticket = navigation.ticket(&path);
        log::debug!("Refreshing listing for {path}");
        let result = backend.list(&path).await;

        if !navigation.is_valid(&ticket) {
            log::debug!("Discarding stale listing for {path}");
            return RefreshOutcome::Stale { path };
        }

        match result {
            Ok(raw) => {
                let listing = Listing::from_raw(&path, &self.root, &raw);
                let entries = listing.len();
                *self.lock() = listing;
                RefreshOutcome::Updated { path, entries }
            }
            Err(error) => {
                log::warn!("Failed to list {path}: {error}");
                let mut cached = self.lock();
                if cached.path != path {
                    *cached = Listing::empty(&path, &self.root);
                }
                RefreshOutcome::Failed { path, error }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::MemoryBackend;
    use crate::core::vcs_status::VcsStatus;

    fn backend() -> MemoryBackend {
        MemoryBackend::new()
            .with_file("/repo", "a.txt", VcsStatus::Staged)
            .with_folder("/repo", "sub", VcsStatus::Tracked)
            .with_file("/repo/sub", "b.txt", VcsStatus::Modified)
    }

    #[tokio::test]
    async fn test_refresh_replaces_listing() {
        let backend = backend();
        let navigation = NavigationState::new("/repo");
        let cache = DirectoryListingCache::new("/repo", "/repo");

        let outcome = cache.refresh(&backend, &navigation, "/repo").await;
        assert!(outcome.is_updated());
        let listing = cache.current();
        assert_eq!(listing.path, "/repo");
        assert_eq!(listing.get("a.txt").map(|e| e.status), Some(VcsStatus::Staged));
        assert!(!listing.contains(".."));
    }

    #[tokio::test]
    async fn test_refresh_for_non_current_path_is_discarded() {
        let backend = backend();
        let navigation = NavigationState::new("/repo");
        let cache = DirectoryListingCache::new("/repo", "/repo");
        cache.refresh(&backend, &navigation, "/repo").await;

        let outcome = cache.refresh(&backend, &navigation, "/repo/sub").await;
        assert!(outcome.is_stale());
        assert_eq!(cache.current_path(), "/repo");
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_listing_for_same_path() {
        let backend = backend();
        let navigation = NavigationState::new("/repo");
        let cache = DirectoryListingCache::new("/repo", "/repo");
        cache.refresh(&backend, &navigation, "/repo").await;

        // Same path, but the backend no longer knows it
        let empty = MemoryBackend::new();
        let outcome = cache.refresh(&empty, &navigation, "/repo").await;
        assert!(outcome.error().is_some());
        assert!(cache.current().contains("a.txt"));
    }

    #[tokio::test]
    async fn test_failed_refresh_for_new_path_yields_empty_listing() {
        let backend = MemoryBackend::new().with_dir("/repo");
        let navigation = NavigationState::new("/repo");
        let cache = DirectoryListingCache::new("/repo", "/repo");
        navigation.push("/repo/missing");

        let outcome = cache.refresh(&backend, &navigation, "/repo/missing").await;
        assert!(outcome.error().is_some());
        let listing = cache.current();
        assert_eq!(listing.path, "/repo/missing");
        assert!(listing.is_empty());
        assert!(listing.contains(".."));
    }
}
