//! Scripted backends for controller tests
//!
//! [`GatedBackend`] forwards to a [`MemoryBackend`] but can hold listing responses
//! until released and make listings or actions fail, so tests can reproduce slow,
//! reordered and failing requests deterministically.

#![allow(dead_code)]

use async_trait::async_trait;
use git_explorer::core::backend::{Backend, MemoryBackend};
use git_explorer::core::error::{ExplorerError, Result};
use git_explorer::core::paths::normalize;
use git_explorer::core::state::RawEntry;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub struct GatedBackend {
    inner: MemoryBackend,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    failing_lists: Mutex<HashSet<String>>,
    failing_actions: Mutex<Option<String>>,
}

impl GatedBackend {
    pub fn new(inner: MemoryBackend) -> Self {
        Self {
            inner,
            gates: Mutex::new(HashMap::new()),
            failing_lists: Mutex::new(HashSet::new()),
            failing_actions: Mutex::new(None),
        }
    }

    pub fn inner(&self) -> &MemoryBackend {
        &self.inner
    }

    /// Hold every listing of `path` until [`GatedBackend::release`] is called.
    pub fn gate(&self, path: &str) {
        self.gates
            .lock()
            .unwrap()
            .insert(normalize(path), Arc::new(Notify::new()));
    }

    /// Let one held (or the next) listing of `path` complete.
    pub fn release(&self, path: &str) {
        if let Some(gate) = self.gates.lock().unwrap().get(&normalize(path)) {
            gate.notify_one();
        }
    }

    /// Drop the gate on `path`, waking every listing held by it.
    pub fn ungate(&self, path: &str) {
        if let Some(gate) = self.gates.lock().unwrap().remove(&normalize(path)) {
            gate.notify_waiters();
        }
    }

    /// Listings of `path` fail with a transport error from now on.
    pub fn fail_list(&self, path: &str) {
        self.failing_lists.lock().unwrap().insert(normalize(path));
    }

    pub fn heal_list(&self, path: &str) {
        self.failing_lists.lock().unwrap().remove(&normalize(path));
    }

    /// Every action is answered with a backend error carrying `message`.
    pub fn fail_actions(&self, message: &str) {
        *self.failing_actions.lock().unwrap() = Some(message.to_string());
    }

    fn action_failure(&self) -> Result<()> {
        match self.failing_actions.lock().unwrap().clone() {
            Some(message) => Err(ExplorerError::backend(Some(400), message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Backend for GatedBackend {
    async fn list(&self, path: &str) -> Result<Vec<RawEntry>> {
        let gate = self.gates.lock().unwrap().get(&normalize(path)).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.failing_lists.lock().unwrap().contains(&normalize(path)) {
            return Err(ExplorerError::transport(format!("connection reset listing {path}")));
        }
        self.inner.list(path).await
    }

    async fn register_current_path(&self, path: &str) -> Result<()> {
        self.inner.register_current_path(path).await
    }

    async fn init_repository(&self, path: &str) -> Result<String> {
        self.action_failure()?;
        self.inner.init_repository(path).await
    }

    async fn stage_file(&self, path: &str, file_path: &str) -> Result<String> {
        self.action_failure()?;
        self.inner.stage_file(path, file_path).await
    }

    async fn restore_staged(&self, path: &str, file_path: &str) -> Result<String> {
        self.action_failure()?;
        self.inner.restore_staged(path, file_path).await
    }

    async fn undo_modification(&self, path: &str, file_path: &str) -> Result<String> {
        self.action_failure()?;
        self.inner.undo_modification(path, file_path).await
    }

    async fn untrack_file(&self, path: &str, file_path: &str) -> Result<String> {
        self.action_failure()?;
        self.inner.untrack_file(path, file_path).await
    }

    async fn delete_file(&self, path: &str, file_path: &str) -> Result<String> {
        self.action_failure()?;
        self.inner.delete_file(path, file_path).await
    }

    async fn commit(&self, path: &str, message: &str, file_paths: &[String]) -> Result<String> {
        self.action_failure()?;
        self.inner.commit(path, message, file_paths).await
    }

    async fn rename_file(&self, path: &str, old_path: &str, new_path: &str) -> Result<String> {
        self.action_failure()?;
        self.inner.rename_file(path, old_path, new_path).await
    }
}
