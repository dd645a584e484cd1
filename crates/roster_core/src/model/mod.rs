//! Roster domain model.
//!
//! # Responsibility
//! - Define the records the core reads from and writes to the store.
//! - Define the request/response records exchanged with the wire layer.
//!
//! # Invariants
//! - Teachers and students are identified solely by `Email`.
//! - A relationship is a directed teacher -> student edge, unique per pair.

pub mod email;
pub mod request;
pub mod roster;
