//! Core roster logic: email validation, existence reconciliation and
//! relationship set resolution between the wire layer and the store.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, RosterConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::email::{dedupe, is_valid_email, is_valid_mention, partition, Email};
pub use model::request::{
    CommonStudentsRequest, CommonStudentsResponse, ErrorResponse, NotificationRequest,
    RecipientsResponse, RegistrationRequest, SuspensionRequest,
};
pub use model::roster::{Relationship, Student, Teacher};
pub use repo::roster_repo::{RepoError, RepoResult, RosterRepository, SqliteRosterRepository};
pub use service::error::{status_for_message, ErrorCode, RosterError, RosterResult};
pub use service::notification::extract_mentions;
pub use service::roster_service::RosterService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
