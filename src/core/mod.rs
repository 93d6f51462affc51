//! Core functionality for git-explorer.
//!
//! This module provides the navigation state machine, the git status overlay, the
//! backend interface and the CLI presentation helpers.

pub mod actions;
pub mod affordances;
pub mod backend;
pub mod colors;
pub mod config;
pub mod dirs;
pub mod error;
pub mod events;
pub mod explorer;
pub mod listing_cache;
pub mod navigation;
pub mod output;
pub mod paths;
pub mod staging;
pub mod state;
pub mod vcs_status;

// === Error handling ===
pub use error::{ErrorClass, ExplorerError, Precondition, Result};

// === Status overlay ===
// Raw backend tags -> VcsStatus
pub use vcs_status::{classify, FileKind, VcsStatus};
pub use state::{DirectoryEntry, Listing, RawEntry};

// === Navigation ===
pub use navigation::{NavigationStack, NavigationState};
pub use listing_cache::{DirectoryListingCache, RefreshOutcome};
pub use explorer::{Explorer, Transition};
pub use events::{EventSink, ExplorerEvent};

// === Actions ===
pub use actions::Action;
pub use affordances::{affordances, affordances_for, directory_affordance, Affordance, DirectoryAffordance};
pub use staging::{compute_staged, is_plain_directory, CommitDraft, StagingSet};

// === Backends ===
pub use backend::{Backend, HttpBackend, LocalBackend, MemoryBackend};

// === Configuration ===
pub use config::{BackendKind, ConfigOverrides, ExplorerConfig};

// === Output formatting ===
pub use colors::{format_entry_line, get_aligned_status, get_colored_name, get_legend, get_status_color_style};
pub use output::{
    describe_event, print_error, print_explorer_error, print_info, print_section_header,
    print_success, print_warning,
};
