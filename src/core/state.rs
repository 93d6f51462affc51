//! Listing data structures.
//!
//! This module defines the records the explorer keeps for the directory on screen:
//! the wire record the backend sends, the typed entry built from it, and the listing
//! that groups entries for one path.
//!
//! # Public API
//! - [`RawEntry`]: Listing item exactly as the backend serializes it
//! - [`DirectoryEntry`]: One typed child of the current path
//! - [`Listing`]: All entries of one path, unique by name
//!
//! # Invariants
//! - Entry names are unique within a listing (first occurrence wins)
//! - A listing holds a `".."` folder entry with status `Back` iff its path is not the root
//! - A listing is never patched in place; a refresh replaces it as a whole

use crate::core::paths::{normalize, PARENT_ENTRY};
use crate::core::vcs_status::{classify, FileKind, VcsStatus};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Timestamp format used by the backend for `last_modified`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Listing item as the backend serializes it. Every field except the name is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub git_type: Option<String>,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub last_modified: Option<String>,
}

impl RawEntry {
    pub fn new(name: impl Into<String>, file_type: &str, git_type: &str) -> Self {
        Self {
            name: name.into(),
            file_type: Some(file_type.to_string()),
            git_type: Some(git_type.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub kind: FileKind,
    pub status: VcsStatus,
    /// Absent for folders
    pub size_bytes: Option<u64>,
    pub last_modified: Option<NaiveDateTime>,
}

impl DirectoryEntry {
    /// The synthetic parent-directory entry
    pub fn parent() -> Self {
        Self {
            name: PARENT_ENTRY.to_string(),
            kind: FileKind::Folder,
            status: VcsStatus::Back,
            size_bytes: None,
            last_modified: None,
        }
    }

    pub fn file(name: impl Into<String>, status: VcsStatus) -> Self {
        Self {
            name: name.into(),
            kind: FileKind::File,
            status,
            size_bytes: Some(0),
            last_modified: None,
        }
    }

    pub fn folder(name: impl Into<String>, status: VcsStatus) -> Self {
        Self {
            name: name.into(),
            kind: FileKind::Folder,
            status,
            size_bytes: None,
            last_modified: None,
        }
    }

    /// Decode a backend record. Never fails: malformed fields degrade to defaults.
    pub fn from_raw(raw: &RawEntry) -> Self {
        if raw.name == PARENT_ENTRY {
            return Self::parent();
        }

        let kind = raw
            .file_type
            .as_deref()
            .map(FileKind::from_raw)
            .unwrap_or(FileKind::File);
        let status = classify(kind, raw.git_type.as_deref());
        let size_bytes = match kind {
            FileKind::Folder => None,
            FileKind::File => Some(
                raw.size
                    .filter(|s| s.is_finite() && *s >= 0.0)
                    .map(|s| s as u64)
                    .unwrap_or(0),
            ),
        };

        Self {
            name: raw.name.clone(),
            kind,
            status,
            size_bytes,
            last_modified: raw.last_modified.as_deref().and_then(parse_timestamp),
        }
    }

    pub fn is_parent(&self) -> bool {
        self.status == VcsStatus::Back
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))
}

/// Entries of one directory, unique by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub path: String,
    entries: Vec<DirectoryEntry>,
}

impl Listing {
    /// An empty listing for `path`, holding only the parent entry when `path` is not the root.
    pub fn empty(path: &str, root: &str) -> Self {
        Self::from_entries(path, root, Vec::new())
    }

    /// Build a listing from backend records, enforcing the listing invariants.
    pub fn from_raw(path: &str, root: &str, raw: &[RawEntry]) -> Self {
        Self::from_entries(path, root, raw.iter().map(DirectoryEntry::from_raw).collect())
    }

    /// Build a listing from typed entries, enforcing the listing invariants.
    ///
    /// Any `".."` entries supplied are dropped and a single one is synthesized first
    /// when `path` differs from `root`. Duplicate names keep their first occurrence.
    pub fn from_entries(path: &str, root: &str, entries: Vec<DirectoryEntry>) -> Self {
        let path = normalize(path);
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(entries.len() + 1);

        if path != normalize(root) {
            out.push(DirectoryEntry::parent());
        }

        for entry in entries {
            if entry.name == PARENT_ENTRY || entry.name.is_empty() {
                continue;
            }
            if !seen.insert(entry.name.clone()) {
                log::debug!("Dropping duplicate entry '{}' in {}", entry.name, path);
                continue;
            }
            out.push(entry);
        }

        Self { path, entries: out }
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&DirectoryEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of entries, excluding the parent entry
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_parent()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &DirectoryEntry> {
        self.entries.iter()
    }
}
