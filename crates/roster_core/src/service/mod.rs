//! Roster use-case services.
//!
//! # Responsibility
//! - Validate, reconcile and resolve roster requests above the repository.
//! - Keep wire-layer callers decoupled from storage details.

pub mod common_students;
pub mod error;
pub mod notification;
pub mod reconcile;
pub mod registration;
pub mod roster_service;
pub mod suspension;
pub mod validate;
