//! Staging selection and commit drafts.
//!
//! The staging set is never stored: it is derived from a listing at the moment the
//! commit flow opens. A [`CommitDraft`] freezes that snapshot together with the
//! message being typed, so later stage/restore actions do not change what an open
//! draft will commit.

use crate::core::state::{DirectoryEntry, Listing};
use crate::core::vcs_status::VcsStatus;

/// Entries of one listing whose status is `Staged`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagingSet {
    pub path: String,
    pub entries: Vec<DirectoryEntry>,
}

impl StagingSet {
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Select exactly the staged entries of `listing`.
pub fn compute_staged(listing: &Listing) -> StagingSet {
    StagingSet {
        path: listing.path.clone(),
        entries: listing
            .iter()
            .filter(|e| e.status == VcsStatus::Staged)
            .cloned()
            .collect(),
    }
}

/// True when nothing in the listing is under version control.
pub fn is_plain_directory(listing: &Listing) -> bool {
    listing.iter().all(|e| e.status.is_unversioned())
}

/// Message plus the staging snapshot taken when the commit dialog opened
#[derive(Debug, Clone, PartialEq)]
pub struct CommitDraft {
    pub message: String,
    staged: StagingSet,
}

impl CommitDraft {
    pub fn open(listing: &Listing) -> Self {
        Self {
            message: String::new(),
            staged: compute_staged(listing),
        }
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn staged(&self) -> &StagingSet {
        &self.staged
    }

    pub fn names(&self) -> Vec<String> {
        self.staged.names()
    }

    /// Directory the snapshot was taken in
    pub fn path(&self) -> &str {
        &self.staged.path
    }
}
