//! Request and response records exchanged with the wire layer.
//!
//! Field names follow the JSON bodies accepted by the wire layer. Every
//! field is required; a body missing one fails to decode.

use crate::model::email::Email;
use serde::{Deserialize, Serialize};

/// Body of a `register` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub teacher: Email,
    pub students: Vec<Email>,
}

/// Body of a `commonstudents` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonStudentsRequest {
    pub teachers: Vec<Email>,
}

/// Body of a `suspend` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspensionRequest {
    pub student: Email,
}

/// Body of a `retrievefornotifications` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub teacher: Email,
    /// Free text that may `@`-mention students by email.
    pub notification: String,
}

/// Students linked to every requested teacher, sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonStudentsResponse {
    pub students: Vec<Email>,
}

/// Non-suspended notification recipients, sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientsResponse {
    pub recipients: Vec<Email>,
}

/// Error body; `message` starts with a stable error code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}
