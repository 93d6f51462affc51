//! Status colors for listing output.
//!
//! One mapping from [`VcsStatus`] to a color, used for the status tag, the entry name
//! and the legend so they always agree.
//!
//! # Color Scheme
//! - **Untracked**: Blue
//! - **Modified**: Red
//! - **Staged**: Yellow
//! - **Committed**: Green
//! - **Tracked folders**: Cyan
//! - **Unversioned and `..`**: uncolored

use crate::core::affordances::affordances;
use crate::core::state::DirectoryEntry;
use crate::core::vcs_status::{FileKind, VcsStatus};
use colored::*;

/// Width of the widest status tag ("committed")
const STATUS_WIDTH: usize = 9;

/// Returns a closure that applies the status color to any text
pub fn get_status_color_style(status: VcsStatus) -> Box<dyn Fn(&str) -> ColoredString> {
    match status {
        VcsStatus::Untracked => Box::new(|text: &str| text.blue()),
        VcsStatus::Modified => Box::new(|text: &str| text.red()),
        VcsStatus::Staged => Box::new(|text: &str| text.yellow()),
        VcsStatus::Committed => Box::new(|text: &str| text.green()),
        VcsStatus::Tracked => Box::new(|text: &str| text.cyan()),
        VcsStatus::None | VcsStatus::Back => Box::new(|text: &str| text.normal()),
    }
}

/// Status tag padded to a fixed width; blank for entries without a status
pub fn get_aligned_status(status: VcsStatus) -> ColoredString {
    let tag = if status.is_unversioned() {
        ""
    } else {
        status.as_str()
    };
    get_status_color_style(status)(&format!("{:<width$}", tag, width = STATUS_WIDTH))
}

/// Entry name in its status color; folders get a trailing `/`
pub fn get_colored_name(entry: &DirectoryEntry) -> ColoredString {
    let color_fn = get_status_color_style(entry.status);
    match entry.kind {
        FileKind::Folder if !entry.is_parent() => color_fn(&format!("{}/", entry.name)).bold(),
        _ => color_fn(&entry.name),
    }
}

/// One listing line: index, status, name, size and the actions on offer
pub fn format_entry_line(index: usize, entry: &DirectoryEntry) -> String {
    let index_colored = format!("[{index}]").cyan().bold();
    let size = entry
        .size_bytes
        .map(format_size)
        .unwrap_or_default();
    let actions: Vec<&str> = affordances(entry).iter().map(|a| a.label()).collect();
    let actions = if actions.is_empty() {
        String::new()
    } else {
        format!("  ({})", actions.join(", ")).bright_black().to_string()
    };

    format!(
        "{index_colored} {} {}{}{actions}",
        get_aligned_status(entry.status),
        get_colored_name(entry),
        if size.is_empty() {
            String::new()
        } else {
            format!("  {}", size.bright_black())
        },
    )
}

/// Colored status names for the legend line
pub fn get_legend() -> String {
    [
        VcsStatus::Untracked,
        VcsStatus::Modified,
        VcsStatus::Staged,
        VcsStatus::Committed,
    ]
    .iter()
    .map(|status| get_status_color_style(*status)(status.as_str()).to_string())
    .collect::<Vec<_>>()
    .join("  ")
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
