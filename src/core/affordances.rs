//! Which actions to offer for an entry or a directory.
//!
//! Pure functions of the status; the presentation layer disables everything not
//! listed here.

use crate::core::staging::is_plain_directory;
use crate::core::state::{DirectoryEntry, Listing};
use crate::core::vcs_status::VcsStatus;
use std::fmt;

/// Per-entry action the user may invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affordance {
    Add,
    /// Discard working-copy changes of a modified file
    UndoModification,
    /// Unstage a staged file
    RestoreStaged,
    Untrack,
    Delete,
    Rename,
}

impl Affordance {
    pub fn label(&self) -> &'static str {
        match self {
            Affordance::Add => "Add",
            Affordance::UndoModification | Affordance::RestoreStaged => "Restore",
            Affordance::Untrack => "Untrack",
            Affordance::Delete => "Delete",
            Affordance::Rename => "Rename",
        }
    }

    pub fn tooltip(&self) -> &'static str {
        match self {
            Affordance::Add => "Adding the file into a staging area",
            Affordance::UndoModification => "Undoing the modification",
            Affordance::RestoreStaged => "Unstaging changes",
            Affordance::Untrack => "Untracking file",
            Affordance::Delete => "Deleting file",
            Affordance::Rename => "Renaming file",
        }
    }
}

impl fmt::Display for Affordance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Directory-level choice between creating a repository and committing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryAffordance {
    CreateRepository,
    CommitStaged,
}

impl DirectoryAffordance {
    pub fn label(&self) -> &'static str {
        match self {
            DirectoryAffordance::CreateRepository => "Create Git Repo",
            DirectoryAffordance::CommitStaged => "Commit Staged Changes",
        }
    }
}

pub fn affordances_for(status: VcsStatus) -> &'static [Affordance] {
    match status {
        VcsStatus::Untracked => &[Affordance::Add],
        VcsStatus::Modified => &[Affordance::Add, Affordance::UndoModification],
        VcsStatus::Staged => &[Affordance::RestoreStaged],
        VcsStatus::Committed => &[Affordance::Untrack, Affordance::Delete, Affordance::Rename],
        VcsStatus::None | VcsStatus::Tracked | VcsStatus::Back => &[],
    }
}

pub fn affordances(entry: &DirectoryEntry) -> &'static [Affordance] {
    affordances_for(entry.status)
}

pub fn directory_affordance(listing: &Listing) -> DirectoryAffordance {
    if is_plain_directory(listing) {
        DirectoryAffordance::CreateRepository
    } else {
        DirectoryAffordance::CommitStaged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affordances_per_status() {
        assert_eq!(affordances_for(VcsStatus::Untracked), [Affordance::Add]);
        assert_eq!(
            affordances_for(VcsStatus::Modified),
            [Affordance::Add, Affordance::UndoModification]
        );
        assert_eq!(affordances_for(VcsStatus::Staged), [Affordance::RestoreStaged]);
        assert_eq!(
            affordances_for(VcsStatus::Committed),
            [Affordance::Untrack, Affordance::Delete, Affordance::Rename]
        );
        assert!(affordances_for(VcsStatus::None).is_empty());
        assert!(affordances_for(VcsStatus::Tracked).is_empty());
        assert!(affordances_for(VcsStatus::Back).is_empty());
    }

    #[test]
    fn test_restore_labels_share_text() {
        assert_eq!(Affordance::UndoModification.label(), "Restore");
        assert_eq!(Affordance::RestoreStaged.label(), "Restore");
        assert_ne!(
            Affordance::UndoModification.tooltip(),
            Affordance::RestoreStaged.tooltip()
        );
    }

    #[test]
    fn test_plain_directory_offers_create_repository() {
        let listing = Listing::from_entries(
            "/repo",
            "/repo",
            vec![DirectoryEntry::file("a.txt", VcsStatus::None)],
        );
        assert_eq!(directory_affordance(&listing), DirectoryAffordance::CreateRepository);
    }

    #[test]
    fn test_versioned_directory_offers_commit() {
        let listing = Listing::from_entries(
            "/repo",
            "/repo",
            vec![DirectoryEntry::file("a.txt", VcsStatus::Untracked)],
        );
        assert_eq!(directory_affordance(&listing), DirectoryAffordance::CommitStaged);
    }
}
