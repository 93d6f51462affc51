//! Type-safe version-control status of a directory entry.
//!
//! This module defines [`VcsStatus`] and [`FileKind`], the closed enumerations every
//! listing entry is tagged with, and [`classify`], the single decode step that turns
//! the loosely-typed status tag arriving from the backend into a [`VcsStatus`].
//!
//! # Public API
//! - [`FileKind`]: Folder or file
//! - [`VcsStatus`]: Classification relative to version control
//! - [`classify`]: Total mapping from `(kind, raw tag)` to [`VcsStatus`]
//!
//! # Untrusted input
//! Status tags come off the network. Unknown, empty or missing tags decode to
//! [`VcsStatus::None`] instead of failing, so one odd entry never breaks a listing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Filesystem nature of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Folder,
    File,
}

impl FileKind {
    /// Decode the backend's `file_type` tag. Anything that is not a folder is a file.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "folder" | "dir" | "directory" => FileKind::Folder,
            _ => FileKind::File,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Folder => "folder",
            FileKind::File => "file",
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, FileKind::Folder)
    }
}

/// Version-control status of an entry.
///
/// `None` means "not under version control" and `Tracked` means "under version
/// control with nothing pending". `Back` is reserved for the synthetic `".."` entry
/// and is never produced by [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsStatus {
    None,
    Untracked,
    Modified,
    Staged,
    Committed,
    Tracked,
    Back,
}

impl VcsStatus {
    /// Wire tag for this status, as the backend spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            VcsStatus::None => "null",
            VcsStatus::Untracked => "untracked",
            VcsStatus::Modified => "modified",
            VcsStatus::Staged => "staged",
            VcsStatus::Committed => "committed",
            VcsStatus::Tracked => "tracked",
            VcsStatus::Back => "back",
        }
    }

    /// Get human-readable description for status
    pub fn description(&self) -> &'static str {
        match self {
            VcsStatus::None => "not versioned",
            VcsStatus::Untracked => "untracked",
            VcsStatus::Modified => "modified",
            VcsStatus::Staged => "staged",
            VcsStatus::Committed => "committed",
            VcsStatus::Tracked => "tracked",
            VcsStatus::Back => "parent directory",
        }
    }

    /// True for statuses that mean the entry is outside version control
    pub fn is_unversioned(&self) -> bool {
        matches!(self, VcsStatus::None | VcsStatus::Back)
    }

    /// Check if this status can be staged
    pub fn can_be_staged(&self) -> bool {
        matches!(self, VcsStatus::Untracked | VcsStatus::Modified)
    }
}

impl fmt::Display for VcsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Map a raw backend status tag to a [`VcsStatus`].
///
/// Pure and total. Folders only carry a directory-level status, so a folder reported
/// as modified, staged or committed is shown as `Tracked`.
pub fn classify(kind: FileKind, raw_git_type: Option<&str>) -> VcsStatus {
    let Some(raw) = raw_git_type else {
        return VcsStatus::None;
    };

    let status = match raw.trim().to_ascii_lowercase().as_str() {
        "untracked" => VcsStatus::Untracked,
        "modified" => VcsStatus::Modified,
        "staged" => VcsStatus::Staged,
        "committed" => VcsStatus::Committed,
        "tracked" => VcsStatus::Tracked,
        _ => VcsStatus::None,
    };

    match (kind, status) {
        (FileKind::Folder, VcsStatus::Modified | VcsStatus::Staged | VcsStatus::Committed) => {
            VcsStatus::Tracked
        }
        (_, status) => status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_file_tags() {
        assert_eq!(classify(FileKind::File, Some("untracked")), VcsStatus::Untracked);
        assert_eq!(classify(FileKind::File, Some("modified")), VcsStatus::Modified);
        assert_eq!(classify(FileKind::File, Some("staged")), VcsStatus::Staged);
        assert_eq!(classify(FileKind::File, Some("committed")), VcsStatus::Committed);
        assert_eq!(classify(FileKind::File, Some("tracked")), VcsStatus::Tracked);
        assert_eq!(classify(FileKind::File, Some("null")), VcsStatus::None);
    }

    #[test]
    fn test_classify_unknown_tags_are_none() {
        for raw in ["", "  ", "STAGEDish", "back", "conflicted", "42", "\u{0}", "ödd"] {
            assert_eq!(classify(FileKind::File, Some(raw)), VcsStatus::None, "tag {raw:?}");
            assert_eq!(classify(FileKind::Folder, Some(raw)), VcsStatus::None, "tag {raw:?}");
        }
        assert_eq!(classify(FileKind::File, None), VcsStatus::None);
    }

    #[test]
    fn test_classify_never_yields_back() {
        assert_ne!(classify(FileKind::Folder, Some("back")), VcsStatus::Back);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify(FileKind::File, Some("Staged")), VcsStatus::Staged);
        assert_eq!(classify(FileKind::File, Some(" MODIFIED ")), VcsStatus::Modified);
    }

    #[test]
    fn test_folder_statuses_collapse_to_tracked() {
        assert_eq!(classify(FileKind::Folder, Some("untracked")), VcsStatus::Untracked);
        assert_eq!(classify(FileKind::Folder, Some("tracked")), VcsStatus::Tracked);
        assert_eq!(classify(FileKind::Folder, Some("staged")), VcsStatus::Tracked);
        assert_eq!(classify(FileKind::Folder, Some("committed")), VcsStatus::Tracked);
    }

    #[test]
    fn test_file_kind_from_raw() {
        assert_eq!(FileKind::from_raw("folder"), FileKind::Folder);
        assert_eq!(FileKind::from_raw("Folder"), FileKind::Folder);
        assert_eq!(FileKind::from_raw("file"), FileKind::File);
        assert_eq!(FileKind::from_raw("symlink"), FileKind::File);
    }

    #[test]
    fn test_staging_properties() {
        assert!(VcsStatus::Untracked.can_be_staged());
        assert!(VcsStatus::Modified.can_be_staged());
        assert!(!VcsStatus::Staged.can_be_staged());
        assert!(!VcsStatus::Committed.can_be_staged());
        assert!(VcsStatus::None.is_unversioned());
        assert!(VcsStatus::Back.is_unversioned());
        assert!(!VcsStatus::Tracked.is_unversioned());
    }

    #[test]
    fn test_display_uses_description() {
        assert_eq!(VcsStatus::Staged.to_string(), "staged");
        assert_eq!(VcsStatus::None.to_string(), "not versioned");
    }
}
