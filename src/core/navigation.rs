//! Navigation history.
//!
//! [`NavigationStack`] is the plain history of visited directories, top = current.
//! [`NavigationState`] wraps it behind a lock so the controller and the listing cache
//! can share one owned instance by reference while requests are in flight. It also
//! counts path changes, so a listing requested before a round trip (A -> B -> A) is
//! told apart from one requested after it.

use crate::core::paths::{join, normalize};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Ordered history of visited paths. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStack {
    paths: Vec<String>,
}

impl NavigationStack {
    pub fn new(initial: &str) -> Self {
        Self {
            paths: vec![normalize(initial)],
        }
    }

    /// History for a session that starts at `initial` below `root`: every level from
    /// `root` down to `initial`, so `".."` can walk back up to the root.
    ///
    /// An `initial` outside `root` starts a one-element history.
    pub fn from_root(root: &str, initial: &str) -> Self {
        let root = normalize(root);
        let initial = normalize(initial);
        let rest = if root == "/" {
            initial.strip_prefix('/')
        } else {
            initial
                .strip_prefix(root.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
        };

        let Some(rest) = rest.filter(|rest| !rest.is_empty()) else {
            return Self::new(&initial);
        };

        let mut stack = Self::new(&root);
        let mut path = root;
        for segment in rest.split('/') {
            path = join(&path, segment);
            stack.push(&path);
        }
        stack
    }

    /// Push `path` unless it is already anywhere in the stack. Returns the current path.
    pub fn push(&mut self, path: &str) -> &str {
        let path = normalize(path);
        if self.paths.contains(&path) {
            log::debug!("Path {path} already in navigation stack, not pushing");
        } else {
            self.paths.push(path);
        }
        self.current()
    }

    /// Drop the top entry unless it is the last one. Returns the new current path.
    pub fn pop(&mut self) -> &str {
        if self.paths.len() > 1 {
            self.paths.pop();
        }
        self.current()
    }

    pub fn current(&self) -> &str {
        // The constructor seeds one element and pop never removes the last one.
        self.paths.last().map(String::as_str).unwrap_or_default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| *p == normalize(path))
    }

    pub fn depth(&self) -> usize {
        self.paths.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.paths
    }
}

/// Point in the navigation history a listing was requested at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTicket {
    path: String,
    generation: u64,
}

#[derive(Debug)]
struct Tracked {
    stack: NavigationStack,
    /// Bumped on every push or pop that changes the current path
    generation: u64,
}

impl Tracked {
    fn record(&mut self, previous: &str) {
        if self.stack.current() != previous {
            self.generation += 1;
        }
    }
}

/// Shared, owned navigation state handed to the controller and the listing cache.
#[derive(Debug)]
pub struct NavigationState {
    inner: Mutex<Tracked>,
}

impl NavigationState {
    pub fn new(initial: &str) -> Self {
        Self::from_stack(NavigationStack::new(initial))
    }

    /// Start at `initial` with the levels between `root` and it already visited.
    pub fn from_root(root: &str, initial: &str) -> Self {
        Self::from_stack(NavigationStack::from_root(root, initial))
    }

    fn from_stack(stack: NavigationStack) -> Self {
        Self {
            inner: Mutex::new(Tracked {
                stack,
                generation: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Tracked> {
        // The stack is always left consistent, so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current(&self) -> String {
        self.lock().stack.current().to_string()
    }

    pub fn is_current(&self, path: &str) -> bool {
        self.lock().stack.current() == normalize(path)
    }

    /// Take a ticket for a request about `path` issued now.
    pub fn ticket(&self, path: &str) -> NavigationTicket {
        NavigationTicket {
            path: normalize(path),
            generation: self.lock().generation,
        }
    }

    /// True while `ticket`'s path is current and the path has not changed since it was
    /// issued.
    pub fn is_valid(&self, ticket: &NavigationTicket) -> bool {
        let inner = self.lock();
        inner.generation == ticket.generation && inner.stack.current() == ticket.path
    }

    /// Push and report `(previous, current)`.
    pub fn push(&self, path: &str) -> (String, String) {
        let mut inner = self.lock();
        let previous = inner.stack.current().to_string();
        let current = inner.stack.push(path).to_string();
        inner.record(&previous);
        (previous, current)
    }

    /// Pop and report `(previous, current)`.
    pub fn pop(&self) -> (String, String) {
        let mut inner = self.lock();
        let previous = inner.stack.current().to_string();
        let current = inner.stack.pop().to_string();
        inner.record(&previous);
        (previous, current)
    }

    pub fn snapshot(&self) -> NavigationStack {
        self.lock().stack.clone()
    }
}
