//! Version-control actions and their preconditions.
//!
//! An [`Action`] names what the user asked for. [`Action::check`] validates it against
//! the listing on screen without touching the backend, and [`Action::send`] issues the
//! matching request. The controller runs both and refreshes on success; nothing here
//! retries.

use crate::core::backend::Backend;
use crate::core::error::{Precondition, Result};
use crate::core::paths::{is_valid_entry_name, join};
use crate::core::staging::is_plain_directory;
use crate::core::state::{DirectoryEntry, Listing};
use crate::core::vcs_status::VcsStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    InitRepository,
    StageFile { name: String },
    RestoreStaged { name: String },
    UndoModification { name: String },
    UntrackFile { name: String },
    DeleteFile { name: String },
    Commit { message: String, names: Vec<String> },
    RenameFile { old_name: String, new_name: String },
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::InitRepository => "init",
            Action::StageFile { .. } => "stage",
            Action::RestoreStaged { .. } => "unstage",
            Action::UndoModification { .. } => "restore",
            Action::UntrackFile { .. } => "untrack",
            Action::DeleteFile { .. } => "delete",
            Action::Commit { .. } => "commit",
            Action::RenameFile { .. } => "rename",
        }
    }

    /// Validate the action against `listing`. No request is made.
    pub fn check(&self, listing: &Listing) -> std::result::Result<(), Precondition> {
        match self {
            Action::InitRepository => {
                if is_plain_directory(listing) {
                    Ok(())
                } else {
                    Err(Precondition::NotPlainDirectory)
                }
            }
            Action::StageFile { name } => {
                require_status(self.label(), listing, name, &[VcsStatus::Untracked, VcsStatus::Modified])
            }
            Action::RestoreStaged { name } => {
                require_status(self.label(), listing, name, &[VcsStatus::Staged])
            }
            Action::UndoModification { name } => {
                require_status(self.label(), listing, name, &[VcsStatus::Modified])
            }
            Action::UntrackFile { name } | Action::DeleteFile { name } => {
                require_status(self.label(), listing, name, &[VcsStatus::Committed])
            }
            Action::Commit { message, names } => {
                if message.trim().is_empty() {
                    return Err(Precondition::EmptyCommitMessage);
                }
                if names.is_empty() {
                    return Err(Precondition::NothingStaged);
                }
                for name in names {
                    require_entry(listing, name)?;
                }
                Ok(())
            }
            Action::RenameFile { old_name, new_name } => {
                let entry = require_entry(listing, old_name)?;
                if entry.is_parent() {
                    return Err(Precondition::InvalidStatus {
                        action: self.label(),
                        name: old_name.clone(),
                        status: entry.status,
                    });
                }
                if new_name.trim().is_empty() {
                    return Err(Precondition::EmptyName);
                }
                if !is_valid_entry_name(new_name) {
                    return Err(Precondition::InvalidName {
                        name: new_name.clone(),
                    });
                }
                if listing.contains(new_name) {
                    return Err(Precondition::NameTaken {
                        name: new_name.clone(),
                    });
                }
                Ok(())
            }
        }
    }

    /// Issue the backend request for this action in directory `dir`.
    pub async fn send(&self, backend: &dyn Backend, dir: &str) -> Result<String> {
        match self {
            Action::InitRepository => backend.init_repository(dir).await,
            Action::StageFile { name } => backend.stage_file(dir, &join(dir, name)).await,
            Action::RestoreStaged { name } => backend.restore_staged(dir, &join(dir, name)).await,
            Action::UndoModification { name } => {
                backend.undo_modification(dir, &join(dir, name)).await
            }
            Action::UntrackFile { name } => backend.untrack_file(dir, &join(dir, name)).await,
            Action::DeleteFile { name } => backend.delete_file(dir, &join(dir, name)).await,
            Action::Commit { message, names } => {
                let file_paths: Vec<String> = names.iter().map(|n| join(dir, n)).collect();
                backend.commit(dir, message, &file_paths).await
            }
            Action::RenameFile { old_name, new_name } => {
                backend
                    .rename_file(dir, &join(dir, old_name), &join(dir, new_name))
                    .await
            }
        }
    }
}

fn require_entry<'a>(
    listing: &'a Listing,
    name: &str,
) -> std::result::Result<&'a DirectoryEntry, Precondition> {
    listing.get(name).ok_or_else(|| Precondition::EntryNotFound {
        name: name.to_string(),
    })
}

fn require_status(
    action: &'static str,
    listing: &Listing,
    name: &str,
    allowed: &[VcsStatus],
) -> std::result::Result<(), Precondition> {
    let entry = require_entry(listing, name)?;
    if allowed.contains(&entry.status) {
        Ok(())
    } else {
        Err(Precondition::InvalidStatus {
            action,
            name: name.to_string(),
            status: entry.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ExplorerError;

    fn listing() -> Listing {
        Listing::from_entries(
            "/repo/sub",
            "/repo",
            vec![
                DirectoryEntry::file("u.txt", VcsStatus::Untracked),
                DirectoryEntry::file("m.txt", VcsStatus::Modified),
                DirectoryEntry::file("s.txt", VcsStatus::Staged),
                DirectoryEntry::file("c.txt", VcsStatus::Committed),
                DirectoryEntry::folder("docs", VcsStatus::Tracked),
            ],
        )
    }

    fn stage(name: &str) -> Action {
        Action::StageFile {
            name: name.to_string(),
        }
    }

    fn rename(old: &str, new: &str) -> Action {
        Action::RenameFile {
            old_name: old.to_string(),
            new_name: new.to_string(),
        }
    }

    #[test]
    fn test_stage_requires_untracked_or_modified() {
        assert_eq!(stage("u.txt").check(&listing()), Ok(()));
        assert_eq!(stage("m.txt").check(&listing()), Ok(()));
        assert!(matches!(
            stage("c.txt").check(&listing()),
            Err(Precondition::InvalidStatus { status: VcsStatus::Committed, .. })
        ));
        assert!(matches!(
            stage("s.txt").check(&listing()),
            Err(Precondition::InvalidStatus { .. })
        ));
    }

    #[test]
    fn test_missing_entry_is_rejected() {
        assert_eq!(
            stage("gone.txt").check(&listing()),
            Err(Precondition::EntryNotFound {
                name: "gone.txt".to_string()
            })
        );
    }

    #[test]
    fn test_parent_entry_cannot_be_staged() {
        assert!(matches!(
            stage("..").check(&listing()),
            Err(Precondition::InvalidStatus { status: VcsStatus::Back, .. })
        ));
    }

    #[test]
    fn test_status_specific_actions() {
        let restore = Action::RestoreStaged { name: "s.txt".to_string() };
        let undo = Action::UndoModification { name: "m.txt".to_string() };
        let untrack = Action::UntrackFile { name: "c.txt".to_string() };
        let delete = Action::DeleteFile { name: "u.txt".to_string() };

        assert_eq!(restore.check(&listing()), Ok(()));
        assert_eq!(undo.check(&listing()), Ok(()));
        assert_eq!(untrack.check(&listing()), Ok(()));
        assert!(delete.check(&listing()).is_err());
    }

    #[test]
    fn test_commit_requires_message_and_names() {
        let empty_message = Action::Commit {
            message: "".to_string(),
            names: vec!["s.txt".to_string()],
        };
        assert_eq!(empty_message.check(&listing()), Err(Precondition::EmptyCommitMessage));

        let blank_message = Action::Commit {
            message: "   ".to_string(),
            names: vec!["s.txt".to_string()],
        };
        assert_eq!(blank_message.check(&listing()), Err(Precondition::EmptyCommitMessage));

        let no_names = Action::Commit {
            message: "fix bug".to_string(),
            names: vec![],
        };
        assert_eq!(no_names.check(&listing()), Err(Precondition::NothingStaged));

        let ok = Action::Commit {
            message: "fix bug".to_string(),
            names: vec!["s.txt".to_string()],
        };
        assert_eq!(ok.check(&listing()), Ok(()));
    }

    #[test]
    fn test_init_requires_plain_directory() {
        assert_eq!(
            Action::InitRepository.check(&listing()),
            Err(Precondition::NotPlainDirectory)
        );

        let plain = Listing::from_entries(
            "/data",
            "/data",
            vec![DirectoryEntry::file("a.txt", VcsStatus::None)],
        );
        assert_eq!(Action::InitRepository.check(&plain), Ok(()));
    }

    #[test]
    fn test_rename_validation() {
        assert_eq!(rename("c.txt", "d.txt").check(&listing()), Ok(()));
        assert_eq!(rename("c.txt", "").check(&listing()), Err(Precondition::EmptyName));
        assert_eq!(rename("c.txt", "  ").check(&listing()), Err(Precondition::EmptyName));
        assert_eq!(
            rename("c.txt", "u.txt").check(&listing()),
            Err(Precondition::NameTaken { name: "u.txt".to_string() })
        );
        assert_eq!(
            rename("c.txt", "c.txt").check(&listing()),
            Err(Precondition::NameTaken { name: "c.txt".to_string() })
        );
        assert_eq!(
            rename("c.txt", "a/b.txt").check(&listing()),
            Err(Precondition::InvalidName { name: "a/b.txt".to_string() })
        );
        assert!(rename("..", "up").check(&listing()).is_err());
        assert!(rename("missing.txt", "x.txt").check(&listing()).is_err());
    }

    #[test]
    fn test_precondition_converts_to_explorer_error() {
        let err = ExplorerError::from(stage("c.txt").check(&listing()).unwrap_err());
        assert!(err.to_string().contains("cannot stage 'c.txt' while it is committed"));
    }
}
