//! Shared test utilities for git-explorer integration tests
//!
//! Scripted backends for controller tests, real repositories for the local backend and
//! CLI tests, and output predicates.

pub mod assertions;
pub mod backends;
pub mod repository;
