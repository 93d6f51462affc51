//! Git Explorer - browse a directory tree with a git status overlay.
//!
//! The library holds the state machine behind the browser: a navigation history that
//! never duplicates a path, a cached listing that only ever shows the directory on
//! screen, and dispatch of staging, commit, rename and repository actions to a
//! [`Backend`].
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module:
//! - [`Explorer`]: the navigation controller
//! - [`Backend`] and its HTTP, local git and in-memory implementations
//! - Status classification, affordances and the commit draft
//! - Error handling and result types

pub mod commands;
pub mod core;

pub use self::core::{
    // Actions
    affordances,
    classify,
    compute_staged,
    directory_affordance,
    is_plain_directory,
    Action,
    Affordance,
    // Backends
    Backend,
    CommitDraft,
    // Listing
    DirectoryEntry,
    DirectoryAffordance,
    ErrorClass,
    ExplorerConfig,
    // Error handling
    ExplorerError,
    ExplorerEvent,
    // Navigation
    Explorer,
    FileKind,
    HttpBackend,
    Listing,
    LocalBackend,
    MemoryBackend,
    NavigationStack,
    Precondition,
    RawEntry,
    RefreshOutcome,
    Result,
    StagingSet,
    Transition,
    VcsStatus,
};
