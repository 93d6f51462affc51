//! Navigation controller.
//!
//! [`Explorer`] owns the navigation state, the listing cache and the backend handle,
//! and is the single entry point the presentation layer drives:
//!
//! - entry activation: open a folder or go back via `".."`
//! - refreshes: exactly one per path change, one per successful action
//! - actions: precondition check, backend request, refresh
//! - the commit flow: snapshot the staged entries, then commit them
//!
//! All methods take `&self`; state lives behind short-lived locks that are never held
//! across a backend request, so overlapping calls on one task are safe.

use crate::core::actions::Action;
use crate::core::affordances::{directory_affordance, DirectoryAffordance};
use crate::core::backend::Backend;
use crate::core::error::{ExplorerError, Result};
use crate::core::events::{EventSink, ExplorerEvent};
use crate::core::listing_cache::{DirectoryListingCache, RefreshOutcome};
use crate::core::navigation::NavigationState;
use crate::core::paths::{join, normalize};
use crate::core::staging::{compute_staged, is_plain_directory, CommitDraft, StagingSet};
use crate::core::state::{DirectoryEntry, Listing};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Result of activating an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Went up one level via `".."`
    Back { from: String, to: String },
    /// Opened a folder
    Descend { from: String, to: String },
    /// Nothing changed (file, root `".."`, or a folder already in the history)
    Stay,
}

impl Transition {
    pub fn changed_path(&self) -> Option<&str> {
        match self {
            Transition::Back { to, .. } | Transition::Descend { to, .. } => Some(to),
            Transition::Stay => None,
        }
    }
}

pub struct Explorer {
    backend: Arc<dyn Backend>,
    root: String,
    navigation: NavigationState,
    cache: DirectoryListingCache,
    events: EventSink,
}

impl Explorer {
    /// Start at `root`.
    pub fn new(backend: Arc<dyn Backend>, root: &str) -> Self {
        Self::with_initial_path(backend, root, root)
    }

    /// Start at `initial_path`, with `root` as the level `".."` cannot go above.
    ///
    /// The levels between `root` and `initial_path` count as visited, so `".."` walks
    /// back up to `root` one level at a time.
    pub fn with_initial_path(backend: Arc<dyn Backend>, root: &str, initial_path: &str) -> Self {
        let root = normalize(root);
        let initial_path = normalize(initial_path);
        Self {
            backend,
            navigation: NavigationState::from_root(&root, &initial_path),
            cache: DirectoryListingCache::new(&root, &initial_path),
            root,
            events: EventSink::default(),
        }
    }

    /// Publish events on a fresh channel and hand back its receiving end.
    pub fn subscribe(&mut self) -> UnboundedReceiver<ExplorerEvent> {
        let (sink, receiver) = EventSink::channel();
        self.events = sink;
        receiver
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn current_path(&self) -> String {
        self.navigation.current()
    }

    /// Visited paths, oldest first; the last one is the current path
    pub fn history(&self) -> Vec<String> {
        self.navigation.snapshot().as_slice().to_vec()
    }

    /// The listing on screen
    pub fn listing(&self) -> Listing {
        self.cache.current()
    }

    pub fn is_plain_directory(&self) -> bool {
        is_plain_directory(&self.cache.current())
    }

    pub fn directory_affordance(&self) -> DirectoryAffordance {
        directory_affordance(&self.cache.current())
    }

    /// Staged entries of the listing on screen, as of now
    pub fn staged(&self) -> StagingSet {
        compute_staged(&self.cache.current())
    }

    /// Announce the initial path and load its listing.
    pub async fn start(&self) -> RefreshOutcome {
        self.load(self.current_path()).await
    }

    /// Reload the current path.
    pub async fn refresh(&self) -> RefreshOutcome {
        let path = self.current_path();
        let outcome = self
            .cache
            .refresh(self.backend.as_ref(), &self.navigation, &path)
            .await;
        self.report_refresh(&outcome);
        outcome
    }

    /// Activate an entry of the listing on screen.
    ///
    /// Folders are resolved against the directory the listing was fetched for, so a
    /// second activation arriving before the new listing lands maps to the same child
    /// and leaves the history untouched.
    pub async fn activate(&self, entry: &DirectoryEntry) -> Transition {
        let transition = if entry.is_parent() {
            let (from, to) = self.navigation.pop();
            if from == to {
                log::debug!("Already at the top of the history ({to})");
                Transition::Stay
            } else {
                Transition::Back { from, to }
            }
        } else if entry.kind.is_folder() {
            let child = join(&self.cache.current_path(), &entry.name);
            let (from, to) = self.navigation.push(&child);
            if from == to {
                Transition::Stay
            } else {
                Transition::Descend { from, to }
            }
        } else {
            log::debug!("Ignoring activation of file {}", entry.name);
            Transition::Stay
        };

        if let Transition::Back { from, to } | Transition::Descend { from, to } = &transition {
            log::debug!("Navigating {from} -> {to}");
            self.events.publish(ExplorerEvent::PathChanged {
                from: from.clone(),
                to: to.clone(),
            });
            self.load(to.clone()).await;
        }
        transition
    }

    /// Activate the listing entry called `name`.
    pub async fn activate_name(&self, name: &str) -> Result<Transition> {
        let entry = self
            .cache
            .current()
            .get(name)
            .cloned()
            .ok_or_else(|| ExplorerError::entry_not_found(name))?;
        Ok(self.activate(&entry).await)
    }

    /// Go up one level, same as activating `".."`.
    pub async fn go_back(&self) -> Transition {
        self.activate(&DirectoryEntry::parent()).await
    }

    /// Check, send and on success refresh. Precondition failures send nothing.
    pub async fn dispatch(&self, action: Action) -> Result<String> {
        let listing = self.cache.current();
        let label = action.label();

        if let Err(reason) = action.check(&listing) {
            log::warn!("Refusing {label} in {}: {reason}", listing.path);
            self.events.publish(ExplorerEvent::ActionRejected {
                action: label,
                reason: reason.to_string(),
            });
            return Err(reason.into());
        }

        log::debug!("Sending {label} for {}", listing.path);
        match action.send(self.backend.as_ref(), &listing.path).await {
            Ok(message) => {
                log::info!("{label} succeeded: {message}");
                self.events.publish(ExplorerEvent::ActionSucceeded {
                    action: label,
                    message: message.clone(),
                });
                self.refresh().await;
                Ok(message)
            }
            Err(error) => {
                log::warn!("{label} failed: {error}");
                self.events.publish(ExplorerEvent::ActionFailed {
                    action: label,
                    error: error.to_string(),
                });
                Err(error)
            }
        }
    }

    pub async fn init_repository(&self) -> Result<String> {
        self.dispatch(Action::InitRepository).await
    }

    pub async fn stage_file(&self, name: &str) -> Result<String> {
        self.dispatch(Action::StageFile {
            name: name.to_string(),
        })
        .await
    }

    pub async fn restore_staged(&self, name: &str) -> Result<String> {
        self.dispatch(Action::RestoreStaged {
            name: name.to_string(),
        })
        .await
    }

    pub async fn undo_modification(&self, name: &str) -> Result<String> {
        self.dispatch(Action::UndoModification {
            name: name.to_string(),
        })
        .await
    }

    pub async fn untrack_file(&self, name: &str) -> Result<String> {
        self.dispatch(Action::UntrackFile {
            name: name.to_string(),
        })
        .await
    }

    pub async fn delete_file(&self, name: &str) -> Result<String> {
        self.dispatch(Action::DeleteFile {
            name: name.to_string(),
        })
        .await
    }

    pub async fn commit(&self, message: &str, names: &[String]) -> Result<String> {
        self.dispatch(Action::Commit {
            message: message.to_string(),
            names: names.to_vec(),
        })
        .await
    }

    pub async fn rename_file(&self, old_name: &str, new_name: &str) -> Result<String> {
        self.dispatch(Action::RenameFile {
            old_name: old_name.to_string(),
            new_name: new_name.to_string(),
        })
        .await
    }

    /// Open the commit flow: snapshot the staged entries on screen.
    pub fn open_commit(&self) -> CommitDraft {
        CommitDraft::open(&self.cache.current())
    }

    /// Commit the draft's snapshot with its message.
    ///
    /// The caller drops the draft on success and keeps it (dialog still open) on error.
    pub async fn submit_commit(&self, draft: &CommitDraft) -> Result<String> {
        self.commit(&draft.message, &draft.names()).await
    }

    async fn load(&self, path: String) -> RefreshOutcome {
        let register = async {
            if let Err(e) = self.backend.register_current_path(&path).await {
                log::warn!("Could not register current path {path}: {e}");
            }
        };
        let fetch = self
            .cache
            .refresh(self.backend.as_ref(), &self.navigation, &path);

        let ((), outcome) = tokio::join!(register, fetch);
        self.report_refresh(&outcome);
        outcome
    }

    fn report_refresh(&self, outcome: &RefreshOutcome) {
        let event = match outcome {
            RefreshOutcome::Updated { path, entries } => ExplorerEvent::ListingRefreshed {
                path: path.clone(),
                entries: *entries,
            },
            RefreshOutcome::Stale { path } => ExplorerEvent::RefreshDiscarded { path: path.clone() },
            RefreshOutcome::Failed { path, error } => ExplorerEvent::RefreshFailed {
                path: path.clone(),
                error: error.to_string(),
            },
        };
        self.events.publish(event);
    }
}
