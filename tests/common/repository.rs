//! Real directories and repositories for local-backend and CLI tests
//!
//! Repositories are built with git2 directly so the tests do not depend on a `git`
//! binary being installed.

#![allow(dead_code)]

use git2::{Repository, Signature};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory kept alive for the duration of a test.
pub struct TestDir {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestDir {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The directory as the `/`-separated string the explorer works with
    pub fn path_str(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    /// Config file next to the listed directory, never inside it
    pub fn config_file(&self) -> PathBuf {
        self.temp_dir.path().join(".explorer-config.json")
    }
}

/// A plain, unversioned directory.
///
/// The repository lives one level below the temp dir so the config file written next
/// to it stays outside the listing.
pub fn setup_plain_dir() -> anyhow::Result<TestDir> {
    let temp_dir = TempDir::new()?;
    // Canonical path so it matches what the local backend reports on symlinked temp dirs
    let path = temp_dir.path().canonicalize()?.join("work");
    fs::create_dir(&path)?;
    Ok(TestDir { temp_dir, path })
}

pub fn setup_test_repo() -> anyhow::Result<TestDir> {
    let dir = setup_plain_dir()?;
    let repo = Repository::init(&dir.path)?;
    let mut config = repo.config()?;
    config.set_str("user.name", "Test User")?;
    config.set_str("user.email", "test@example.com")?;
    Ok(dir)
}

/// Repository whose history contains `initial.txt`
pub fn setup_test_repo_with_initial_commit() -> anyhow::Result<TestDir> {
    let dir = setup_test_repo()?;
    create_file(&dir.path, "initial.txt", "initial content\n")?;
    git_add(&dir.path, "initial.txt")?;
    git_commit(&dir.path, "Initial commit")?;
    Ok(dir)
}

pub fn create_file(dir: &Path, filename: &str, content: &str) -> anyhow::Result<()> {
    let path = dir.join(filename);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Stage `filename` (relative to the repository root).
pub fn git_add(repo_path: &Path, filename: &str) -> anyhow::Result<()> {
    let repo = Repository::open(repo_path)?;
    let mut index = repo.index()?;
    index.add_path(Path::new(filename))?;
    index.write()?;
    Ok(())
}

pub fn git_commit(repo_path: &Path, message: &str) -> anyhow::Result<()> {
    let repo = Repository::open(repo_path)?;
    let mut index = repo.index()?;
    let tree = repo.find_tree(index.write_tree()?)?;
    let sig = Signature::now("Test User", "test@example.com")?;
    let parent = match repo.head() {
        Ok(head) => Some(head.peel_to_commit()?),
        Err(_) => None,
    };
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;
    Ok(())
}

/// Index and worktree status flags of `filename`
pub fn status_of(repo_path: &Path, filename: &str) -> anyhow::Result<git2::Status> {
    let repo = Repository::open(repo_path)?;
    Ok(repo.status_file(Path::new(filename))?)
}

pub fn head_message(repo_path: &Path) -> anyhow::Result<String> {
    let repo = Repository::open(repo_path)?;
    let commit = repo.head()?.peel_to_commit()?;
    Ok(commit.message().unwrap_or_default().to_string())
}
