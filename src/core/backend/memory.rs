//! In-memory backend for testing and demos.
//!
//! [`MemoryBackend`] keeps a directory tree with per-entry statuses behind a
//! `RwLock` and applies the same status transitions a git-backed service would:
//! add stages, commit records, restore and untrack step back. Every request is
//! appended to a call log so callers can assert exactly what was sent.

use crate::core::backend::Backend;
use crate::core::error::{ExplorerError, Result};
use crate::core::paths::{join, normalize};
use crate::core::state::RawEntry;
use crate::core::vcs_status::{FileKind, VcsStatus};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError, RwLock};

/// One request as received by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    List(String),
    RegisterPath(String),
    Init(String),
    Stage { path: String, file_path: String },
    RestoreStaged { path: String, file_path: String },
    UndoModification { path: String, file_path: String },
    Untrack { path: String, file_path: String },
    Delete { path: String, file_path: String },
    Commit { path: String, message: String, file_paths: Vec<String> },
    Rename { path: String, old_path: String, new_path: String },
}

impl BackendCall {
    pub fn is_list(&self) -> bool {
        matches!(self, BackendCall::List(_))
    }
}

#[derive(Debug, Clone)]
struct Node {
    kind: FileKind,
    status: VcsStatus,
    size: u64,
    /// Whether a committed version exists (decides where an unstage goes back to)
    committed: bool,
}

type Tree = BTreeMap<String, BTreeMap<String, Node>>;

#[derive(Debug, Default)]
pub struct MemoryBackend {
    dirs: RwLock<Tree>,
    calls: Mutex<Vec<BackendCall>>,
}

fn rejected(message: impl Into<String>) -> ExplorerError {
    ExplorerError::backend(Some(400), message)
}

fn split_file_path(file_path: &str) -> Result<(String, String)> {
    let file_path = normalize(file_path);
    match file_path.rsplit_once('/') {
        Some((dir, name)) if !name.is_empty() => {
            let dir = if dir.is_empty() { "/".to_string() } else { dir.to_string() };
            Ok((dir, name.to_string()))
        }
        _ => Err(rejected(format!("invalid file path: {file_path}"))),
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty directory (and nothing else).
    pub fn with_dir(self, dir: &str) -> Self {
        self.write().entry(normalize(dir)).or_default();
        self
    }

    pub fn with_file(self, dir: &str, name: &str, status: VcsStatus) -> Self {
        self.insert(dir, name, FileKind::File, status);
        self
    }

    pub fn with_folder(self, dir: &str, name: &str, status: VcsStatus) -> Self {
        self.insert(dir, name, FileKind::Folder, status);
        self
    }

    /// Add or replace an entry, e.g. to simulate a change made outside the explorer.
    pub fn insert(&self, dir: &str, name: &str, kind: FileKind, status: VcsStatus) {
        let dir = normalize(dir);
        let mut tree = self.write();
        let committed = matches!(status, VcsStatus::Committed | VcsStatus::Modified | VcsStatus::Tracked);
        tree.entry(dir.clone()).or_default().insert(
            name.to_string(),
            Node {
                kind,
                status,
                size: if kind == FileKind::File { name.len() as u64 } else { 0 },
                committed,
            },
        );
        if kind == FileKind::Folder {
            tree.entry(join(&dir, name)).or_default();
        }
    }

    pub fn status_of(&self, dir: &str, name: &str) -> Option<VcsStatus> {
        self.read()
            .get(&normalize(dir))
            .and_then(|entries| entries.get(name))
            .map(|node| node.status)
    }

    /// Every request received so far, in order
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Requests other than listings and path registrations
    pub fn action_calls(&self) -> Vec<BackendCall> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, BackendCall::List(_) | BackendCall::RegisterPath(_)))
            .collect()
    }

    pub fn list_count(&self, path: &str) -> usize {
        let path = normalize(path);
        self.calls()
            .iter()
            .filter(|c| matches!(c, BackendCall::List(p) if *p == path))
            .count()
    }

    fn record(&self, call: BackendCall) {
        log::debug!("memory backend: {call:?}");
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Tree> {
        self.dirs.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Tree> {
        self.dirs.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `change` to the file at `file_path`, failing when it does not exist.
    fn update_file<F>(&self, file_path: &str, change: F) -> Result<()>
    where
        F: FnOnce(&mut Node) -> Result<()>,
    {
        let (dir, name) = split_file_path(file_path)?;
        let mut tree = self.write();
        let node = tree
            .get_mut(&dir)
            .and_then(|entries| entries.get_mut(&name))
            .ok_or_else(|| ExplorerError::backend(Some(404), format!("File not found: {file_path}")))?;
        if node.status == VcsStatus::None {
            return Err(rejected("The directory is not a valid git repository"));
        }
        change(node)
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn list(&self, path: &str) -> Result<Vec<RawEntry>> {
        let path = normalize(path);
        self.record(BackendCall::List(path.clone()));

        let tree = self.read();
        let entries = tree
            .get(&path)
            .ok_or_else(|| ExplorerError::backend(Some(404), "Directory not found"))?;

        let mut items: Vec<(&String, &Node)> = entries.iter().collect();
        items.sort_by_key(|(name, node)| (node.kind == FileKind::File, name.to_string()));

        Ok(items
            .into_iter()
            .enumerate()
            .map(|(key, (name, node))| RawEntry {
                key: Some(key as i64),
                name: name.clone(),
                file_type: Some(node.kind.as_str().to_string()),
                git_type: Some(node.status.as_str().to_string()),
                size: Some(node.size as f64),
                last_modified: Some("2024-01-01 00:00:00".to_string()),
            })
            .collect())
    }

    async fn register_current_path(&self, path: &str) -> Result<()> {
        self.record(BackendCall::RegisterPath(normalize(path)));
        Ok(())
    }

    async fn init_repository(&self, path: &str) -> Result<String> {
        let path = normalize(path);
        self.record(BackendCall::Init(path.clone()));

        let mut tree = self.write();
        let entries = tree
            .get(&path)
            .ok_or_else(|| ExplorerError::backend(Some(404), "Directory not found"))?;
        if entries.values().any(|node| node.status != VcsStatus::None) {
            return Err(rejected("Directory is already a git repository"));
        }

        let nested = format!("{}/", path.trim_end_matches('/'));
        for (dir, entries) in tree.iter_mut() {
            if *dir == path || dir.starts_with(&nested) {
                for node in entries.values_mut() {
                    node.status = VcsStatus::Untracked;
                    node.committed = false;
                }
            }
        }
        Ok("Repository initialized successfully".to_string())
    }

    async fn stage_file(&self, path: &str, file_path: &str) -> Result<String> {
        self.record(BackendCall::Stage {
            path: normalize(path),
            file_path: file_path.to_string(),
        });
        self.update_file(file_path, |node| {
            if node.status.can_be_staged() {
                node.status = VcsStatus::Staged;
            }
            Ok(())
        })?;
        Ok("File added successfully".to_string())
    }

    async fn restore_staged(&self, path: &str, file_path: &str) -> Result<String> {
        self.record(BackendCall::RestoreStaged {
            path: normalize(path),
            file_path: file_path.to_string(),
        });
        self.update_file(file_path, |node| {
            if node.status != VcsStatus::Staged {
                return Err(rejected("File is not staged"));
            }
            node.status = if node.committed {
                VcsStatus::Modified
            } else {
                VcsStatus::Untracked
            };
            Ok(())
        })?;
        Ok("File restored successfully".to_string())
    }

    async fn undo_modification(&self, path: &str, file_path: &str) -> Result<String> {
        self.record(BackendCall::UndoModification {
            path: normalize(path),
            file_path: file_path.to_string(),
        });
        self.update_file(file_path, |node| {
            if node.status != VcsStatus::Modified {
                return Err(rejected("File has no modifications"));
            }
            node.status = VcsStatus::Committed;
            Ok(())
        })?;
        Ok("Undone Modification successfully".to_string())
    }

    async fn untrack_file(&self, path: &str, file_path: &str) -> Result<String> {
        self.record(BackendCall::Untrack {
            path: normalize(path),
            file_path: file_path.to_string(),
        });
        self.update_file(file_path, |node| {
            if !node.committed {
                return Err(rejected("File is not tracked"));
            }
            node.status = VcsStatus::Untracked;
            node.committed = false;
            Ok(())
        })?;
        Ok("File removed from index successfully".to_string())
    }

    async fn delete_file(&self, path: &str, file_path: &str) -> Result<String> {
        self.record(BackendCall::Delete {
            path: normalize(path),
            file_path: file_path.to_string(),
        });
        self.update_file(file_path, |node| {
            if !node.committed {
                return Err(rejected("File is not tracked"));
            }
            Ok(())
        })?;
        let (dir, name) = split_file_path(file_path)?;
        if let Some(entries) = self.write().get_mut(&dir) {
            entries.remove(&name);
        }
        Ok("File removed successfully".to_string())
    }

    async fn commit(&self, path: &str, message: &str, file_paths: &[String]) -> Result<String> {
        self.record(BackendCall::Commit {
            path: normalize(path),
            message: message.to_string(),
            file_paths: file_paths.to_vec(),
        });
        for file_path in file_paths {
            self.update_file(file_path, |node| {
                node.status = VcsStatus::Committed;
                node.committed = true;
                Ok(())
            })?;
        }
        Ok("Files committed successfully".to_string())
    }

    async fn rename_file(&self, path: &str, old_path: &str, new_path: &str) -> Result<String> {
        self.record(BackendCall::Rename {
            path: normalize(path),
            old_path: old_path.to_string(),
            new_path: new_path.to_string(),
        });
        let (old_dir, old_name) = split_file_path(old_path)?;
        let (new_dir, new_name) = split_file_path(new_path)?;

        let mut tree = self.write();
        if tree.get(&new_dir).is_some_and(|entries| entries.contains_key(&new_name)) {
            return Err(rejected(format!("destination exists: {new_path}")));
        }
        let node = tree
            .get_mut(&old_dir)
            .and_then(|entries| entries.remove(&old_name))
            .ok_or_else(|| ExplorerError::backend(Some(404), format!("File not found: {old_path}")))?;
        tree.entry(new_dir).or_default().insert(new_name, node);
        Ok("File renamed successfully".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> MemoryBackend {
        MemoryBackend::new()
            .with_file("/repo", "a.txt", VcsStatus::Untracked)
            .with_file("/repo", "b.txt", VcsStatus::Committed)
            .with_folder("/repo", "sub", VcsStatus::Tracked)
    }

    #[tokio::test]
    async fn test_list_puts_folders_first() {
        let entries = repo().list("/repo").await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["sub", "a.txt", "b.txt"]);
        assert_eq!(entries[0].file_type.as_deref(), Some("folder"));
    }

    #[tokio::test]
    async fn test_list_unknown_directory_fails() {
        let err = repo().list("/nowhere").await.unwrap_err();
        assert!(matches!(err, ExplorerError::Backend { status: Some(404), .. }));
    }

    #[tokio::test]
    async fn test_stage_then_restore_goes_back_to_untracked() {
        let backend = repo();
        backend.stage_file("/repo", "/repo/a.txt").await.unwrap();
        assert_eq!(backend.status_of("/repo", "a.txt"), Some(VcsStatus::Staged));

        backend.restore_staged("/repo", "/repo/a.txt").await.unwrap();
        assert_eq!(backend.status_of("/repo", "a.txt"), Some(VcsStatus::Untracked));
    }

    #[tokio::test]
    async fn test_commit_marks_files_committed() {
        let backend = repo();
        backend.stage_file("/repo", "/repo/a.txt").await.unwrap();
        backend
            .commit("/repo", "add a", &["/repo/a.txt".to_string()])
            .await
            .unwrap();
        assert_eq!(backend.status_of("/repo", "a.txt"), Some(VcsStatus::Committed));
    }

    #[tokio::test]
    async fn test_init_on_repository_is_rejected() {
        let err = repo().init_repository("/repo").await.unwrap_err();
        assert!(err.to_string().contains("already a git repository"));
    }

    #[tokio::test]
    async fn test_init_marks_everything_untracked() {
        let backend = MemoryBackend::new()
            .with_file("/plain", "a.txt", VcsStatus::None)
            .with_folder("/plain", "docs", VcsStatus::None);
        backend.insert("/plain/docs", "readme.md", FileKind::File, VcsStatus::None);

        backend.init_repository("/plain").await.unwrap();
        assert_eq!(backend.status_of("/plain", "a.txt"), Some(VcsStatus::Untracked));
        assert_eq!(backend.status_of("/plain/docs", "readme.md"), Some(VcsStatus::Untracked));
    }

    #[tokio::test]
    async fn test_rename_moves_entry_and_keeps_status() {
        let backend = repo();
        backend
            .rename_file("/repo", "/repo/b.txt", "/repo/c.txt")
            .await
            .unwrap();
        assert_eq!(backend.status_of("/repo", "b.txt"), None);
        assert_eq!(backend.status_of("/repo", "c.txt"), Some(VcsStatus::Committed));
    }

    #[tokio::test]
    async fn test_calls_are_recorded_in_order() {
        let backend = repo();
        backend.list("/repo").await.unwrap();
        backend.register_current_path("/repo").await.unwrap();
        backend.stage_file("/repo", "/repo/a.txt").await.unwrap();

        assert_eq!(backend.calls().len(), 3);
        assert_eq!(backend.list_count("/repo"), 1);
        assert_eq!(
            backend.action_calls(),
            vec![BackendCall::Stage {
                path: "/repo".to_string(),
                file_path: "/repo/a.txt".to_string()
            }]
        );
    }
}
