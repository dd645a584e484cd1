//! Repository layer for roster persistence.
//!
//! # Responsibility
//! - Define the query/command surface the roster services require.
//! - Keep SQLite details out of validation and set-resolution logic.
//!
//! # Invariants
//! - Existence lookups answer "not found" as `Ok(false)`, never as an error.
//! - Any other storage failure surfaces as `RepoError` and is fatal for the call.

pub mod roster_repo;
