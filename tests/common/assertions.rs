//! Predicates for validating git-explorer command output

#![allow(dead_code)]

use predicates::prelude::*;

/// Listing line for `name` carrying the status tag `status`
pub fn has_entry(status: &str, name: &str) -> impl Predicate<str> {
    predicates::str::is_match(format!(r"\] {status}\s+{}", regex::escape(name)))
        .expect("valid regex")
}

/// Numbered listing line
pub fn has_entry_index(index: u32) -> impl Predicate<str> {
    predicates::str::contains(format!("[{index}]"))
}

pub fn offers_create_repository() -> impl Predicate<str> {
    predicates::str::contains("Create Git Repo")
}

pub fn is_precondition_error() -> impl Predicate<str> {
    predicates::str::contains("Action refused")
}

pub fn is_backend_error() -> impl Predicate<str> {
    predicates::str::contains("Backend error")
}
