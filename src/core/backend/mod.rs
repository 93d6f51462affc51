//! Backend interface the explorer drives.
//!
//! The explorer never touches the filesystem or git itself; it talks to a [`Backend`].
//! Any implementation (HTTP service, local git2, in-memory) provides the same requests.
//! Paths are the backend's `/`-separated directory paths; file arguments are full paths
//! built by joining the directory with the entry name.

pub mod http;
pub mod local;
pub mod memory;

use crate::core::error::Result;
use crate::core::state::RawEntry;
use async_trait::async_trait;

pub use http::HttpBackend;
pub use local::LocalBackend;
pub use memory::MemoryBackend;

/// Requests the explorer issues. Action methods return the backend's confirmation message.
#[async_trait]
pub trait Backend: Send + Sync {
    /// List the immediate children of `path`.
    async fn list(&self, path: &str) -> Result<Vec<RawEntry>>;

    /// Tell the backend which directory is on screen. Fire-and-forget for the caller.
    async fn register_current_path(&self, path: &str) -> Result<()>;

    async fn init_repository(&self, path: &str) -> Result<String>;

    async fn stage_file(&self, path: &str, file_path: &str) -> Result<String>;

    /// Remove a staged change from the index (keeps the working copy).
    async fn restore_staged(&self, path: &str, file_path: &str) -> Result<String>;

    /// Discard working-copy modifications of a file.
    async fn undo_modification(&self, path: &str, file_path: &str) -> Result<String>;

    /// Stop tracking a file without deleting it.
    async fn untrack_file(&self, path: &str, file_path: &str) -> Result<String>;

    /// Delete a tracked file and record the removal.
    async fn delete_file(&self, path: &str, file_path: &str) -> Result<String>;

    async fn commit(&self, path: &str, message: &str, file_paths: &[String]) -> Result<String>;

    async fn rename_file(&self, path: &str, old_path: &str, new_path: &str) -> Result<String>;
}
