//! Local backend driving git through `git2`.
//!
//! Lists real directories and answers every action against the repository that
//! contains the directory. Work runs on tokio's blocking pool so the caller's task is
//! never stalled by disk or index I/O.
//!
//! # Status rules
//! - Outside a repository everything is `null`
//! - Files: untracked, then staged (index differs from HEAD), then modified
//!   (worktree differs from index), otherwise committed; ignored files are `null`
//! - Folders: tracked when the index holds anything below them, untracked otherwise
//! - The `.git` directory itself is never listed

use crate::core::backend::Backend;
use crate::core::error::{ExplorerError, Result};
use crate::core::state::{RawEntry, TIMESTAMP_FORMAT};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use git2::{IndexAddOption, Repository, Signature, Status};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_AUTHOR: &str = "git-explorer";
const DEFAULT_EMAIL: &str = "git-explorer@localhost";

#[derive(Debug, Default, Clone)]
pub struct LocalBackend;

impl LocalBackend {
    pub fn new() -> Self {
        Self
    }
}

/// Run blocking filesystem/git work off the async executor.
async fn blocking<T, F>(work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ExplorerError::backend(None, format!("background task failed: {e}")))?
}

fn fs_error(path: &Path, err: std::io::Error) -> ExplorerError {
    ExplorerError::backend(None, format!("{}: {err}", path.display()))
}

fn open_repo(path: &str) -> Result<Repository> {
    let dir = Path::new(path);
    if !dir.is_dir() {
        return Err(ExplorerError::backend(Some(404), "Directory not found"));
    }
    Repository::discover(dir)
        .map_err(|_| ExplorerError::backend(Some(400), "The directory is not a valid git repository"))
}

fn workdir(repo: &Repository) -> Result<PathBuf> {
    let workdir = repo
        .workdir()
        .ok_or_else(|| ExplorerError::backend(None, "Repository has no working directory"))?;
    // Canonical form so paths under symlinked temp dirs still strip cleanly.
    Ok(workdir.canonicalize().unwrap_or_else(|_| workdir.to_path_buf()))
}

/// Path of `file` relative to the repository working tree
fn relative_to_workdir(workdir: &Path, file: &Path) -> Result<PathBuf> {
    let absolute = match file.parent().map(|p| p.canonicalize()) {
        Some(Ok(parent)) => match file.file_name() {
            Some(name) => parent.join(name),
            None => parent,
        },
        _ => file.to_path_buf(),
    };
    absolute
        .strip_prefix(workdir)
        .map(Path::to_path_buf)
        .map_err(|_| ExplorerError::backend(Some(400), format!("{} is outside the repository", file.display())))
}

fn signature(repo: &Repository) -> Result<Signature<'static>> {
    match repo.signature() {
        Ok(sig) => Ok(sig.to_owned()),
        Err(_) => Ok(Signature::now(DEFAULT_AUTHOR, DEFAULT_EMAIL)?),
    }
}

/// Write the index as a tree and commit it on top of HEAD (if any).
fn commit_index(repo: &Repository, message: &str) -> Result<()> {
    let mut index = repo.index()?;
    let tree_id = index.write_tree()?;
    let tree = repo.find_tree(tree_id)?;
    let sig = signature(repo)?;

    let parent = match repo.head() {
        Ok(head) => Some(head.peel_to_commit()?),
        Err(_) => None,
    };
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;
    Ok(())
}

fn file_git_type(repo: &Repository, rel: &Path) -> &'static str {
    if repo.status_should_ignore(rel).unwrap_or(false) {
        return "null";
    }
    let flags = match repo.status_file(rel) {
        Ok(flags) => flags,
        Err(_) => return "untracked",
    };

    if flags.contains(Status::WT_NEW) {
        "untracked"
    } else if flags.intersects(
        Status::INDEX_NEW
            | Status::INDEX_MODIFIED
            | Status::INDEX_DELETED
            | Status::INDEX_RENAMED
            | Status::INDEX_TYPECHANGE,
    ) {
        "staged"
    } else if flags.intersects(Status::WT_MODIFIED | Status::WT_DELETED | Status::WT_TYPECHANGE | Status::WT_RENAMED) {
        "modified"
    } else {
        "committed"
    }
}

fn folder_git_type(repo: &Repository, rel: &Path) -> &'static str {
    let Ok(index) = repo.index() else {
        return "untracked";
    };
    let prefix = format!("{}/", rel.to_string_lossy().replace('\\', "/"));
    let tracked = index
        .iter()
        .any(|entry| entry.path.starts_with(prefix.as_bytes()));
    if tracked {
        "tracked"
    } else {
        "untracked"
    }
}

fn format_mtime(metadata: &fs::Metadata) -> Option<String> {
    let modified = metadata.modified().ok()?;
    let local: DateTime<Local> = modified.into();
    Some(local.format(TIMESTAMP_FORMAT).to_string())
}

fn list_directory(path: &str) -> Result<Vec<RawEntry>> {
    let dir = Path::new(path);
    if !dir.is_dir() {
        return Err(ExplorerError::backend(Some(404), "Directory not found"));
    }

    let repo = Repository::discover(dir).ok();
    let workdir = match &repo {
        Some(repo) => workdir(repo).ok(),
        None => None,
    };

    let mut children = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| fs_error(dir, e))? {
        let entry = entry.map_err(|e| fs_error(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name == ".git" {
            continue;
        }
        let metadata = entry.metadata().map_err(|e| fs_error(&entry.path(), e))?;
        children.push((name, entry.path(), metadata));
    }
    children.sort_by(|a, b| (!a.2.is_dir(), &a.0).cmp(&(!b.2.is_dir(), &b.0)));

    let mut entries = Vec::with_capacity(children.len());
    for (key, (name, full_path, metadata)) in children.into_iter().enumerate() {
        let is_dir = metadata.is_dir();
        let git_type = match (&repo, &workdir) {
            (Some(repo), Some(workdir)) => match relative_to_workdir(workdir, &full_path) {
                Ok(rel) if is_dir => folder_git_type(repo, &rel),
                Ok(rel) => file_git_type(repo, &rel),
                Err(_) => "null",
            },
            _ => "null",
        };

        entries.push(RawEntry {
            key: Some(key as i64),
            name,
            file_type: Some(if is_dir { "folder" } else { "file" }.to_string()),
            git_type: Some(git_type.to_string()),
            size: Some(metadata.len() as f64),
            last_modified: format_mtime(&metadata),
        });
    }

    log::debug!("Listed {} entries in {}", entries.len(), path);
    Ok(entries)
}

/// Open the repository for `path` and resolve `file_path` inside it.
fn repo_and_relative(path: &str, file_path: &str) -> Result<(Repository, PathBuf)> {
    let repo = open_repo(path)?;
    let rel = relative_to_workdir(&workdir(&repo)?, Path::new(file_path))?;
    Ok((repo, rel))
}

#[async_trait]
impl Backend for LocalBackend {
    async fn list(&self, path: &str) -> Result<Vec<RawEntry>> {
        let path = path.to_string();
        blocking(move || list_directory(&path)).await
    }

    async fn register_current_path(&self, path: &str) -> Result<()> {
        log::debug!("Current path is now {path}");
        Ok(())
    }

    async fn init_repository(&self, path: &str) -> Result<String> {
        let path = path.to_string();
        blocking(move || {
            let dir = Path::new(&path);
            if !dir.is_dir() {
                return Err(ExplorerError::backend(Some(404), "Directory not found"));
            }
            if Repository::open(dir).is_ok() {
                return Err(ExplorerError::backend(
                    Some(400),
                    "Directory is already a git repository",
                ));
            }
            let repo = Repository::init(dir)?;
            commit_index(&repo, "Initial commit")?;
            Ok("Repository initialized successfully".to_string())
        })
        .await
    }

    async fn stage_file(&self, path: &str, file_path: &str) -> Result<String> {
        let (path, file_path) = (path.to_string(), file_path.to_string());
        blocking(move || {
            let (repo, rel) = repo_and_relative(&path, &file_path)?;
            let mut index = repo.index()?;
            if Path::new(&file_path).is_dir() {
                index.add_all([rel.as_path()], IndexAddOption::DEFAULT, None)?;
            } else {
                index.add_path(&rel)?;
            }
            index.write()?;
            Ok("File added successfully".to_string())
        })
        .await
    }

    async fn restore_staged(&self, path: &str, file_path: &str) -> Result<String> {
        let (path, file_path) = (path.to_string(), file_path.to_string());
        blocking(move || {
            let (repo, rel) = repo_and_relative(&path, &file_path)?;
            match repo.head() {
                Ok(head) => {
                    let commit = head.peel_to_commit()?;
                    repo.reset_default(Some(commit.as_object()), [rel.as_path()])?;
                }
                Err(_) => {
                    let mut index = repo.index()?;
                    index.remove_path(&rel)?;
                    index.write()?;
                }
            }
            Ok("File restored successfully".to_string())
        })
        .await
    }

    async fn undo_modification(&self, path: &str, file_path: &str) -> Result<String> {
        let (path, file_path) = (path.to_string(), file_path.to_string());
        blocking(move || {
            let (repo, rel) = repo_and_relative(&path, &file_path)?;
            let mut checkout = git2::build::CheckoutBuilder::new();
            checkout.force().path(rel.as_path());
            repo.checkout_index(None, Some(&mut checkout))?;
            Ok("Undone Modification successfully".to_string())
        })
        .await
    }

    async fn untrack_file(&self, path: &str, file_path: &str) -> Result<String> {
        let (path, file_path) = (path.to_string(), file_path.to_string());
        blocking(move || {
            let (repo, rel) = repo_and_relative(&path, &file_path)?;
            let mut index = repo.index()?;
            index.remove_path(&rel)?;
            index.write()?;
            Ok("File removed from index successfully".to_string())
        })
        .await
    }

    async fn delete_file(&self, path: &str, file_path: &str) -> Result<String> {
        let (path, file_path) = (path.to_string(), file_path.to_string());
        blocking(move || {
            let (repo, rel) = repo_and_relative(&path, &file_path)?;
            let mut index = repo.index()?;
            index.remove_path(&rel)?;
            index.write()?;
            let full = Path::new(&file_path);
            fs::remove_file(full).map_err(|e| fs_error(full, e))?;
            commit_index(&repo, "Remove file from index")?;
            Ok("File removed successfully".to_string())
        })
        .await
    }

    async fn commit(&self, path: &str, message: &str, file_paths: &[String]) -> Result<String> {
        let (path, message, file_paths) = (path.to_string(), message.to_string(), file_paths.to_vec());
        blocking(move || {
            let repo = open_repo(&path)?;
            let workdir = workdir(&repo)?;
            let mut index = repo.index()?;
            for file_path in &file_paths {
                log::debug!("Committing {file_path}");
                let rel = relative_to_workdir(&workdir, Path::new(file_path))?;
                if Path::new(file_path).exists() {
                    index.add_path(&rel)?;
                }
            }
            index.write()?;
            commit_index(&repo, &message)?;
            Ok("Files committed successfully".to_string())
        })
        .await
    }

    async fn rename_file(&self, path: &str, old_path: &str, new_path: &str) -> Result<String> {
        let (path, old_path, new_path) = (path.to_string(), old_path.to_string(), new_path.to_string());
        blocking(move || {
            let (repo, old_rel) = repo_and_relative(&path, &old_path)?;
            let new_full = Path::new(&new_path);
            if new_full.exists() {
                return Err(ExplorerError::backend(
                    Some(400),
                    format!("destination exists: {new_path}"),
                ));
            }

            let mut index = repo.index()?;
            let tracked = index.get_path(&old_rel, 0).is_some();
            fs::rename(&old_path, new_full).map_err(|e| fs_error(Path::new(&old_path), e))?;
            if tracked {
                let new_rel = relative_to_workdir(&workdir(&repo)?, new_full)?;
                index.remove_path(&old_rel)?;
                index.add_path(&new_rel)?;
                index.write()?;
            }
            Ok("File renamed successfully".to_string())
        })
        .await
    }
}
