//! Dispatch of parsed roster subcommands.
//!
//! # Responsibility
//! - Decode JSON bodies of the parsed subcommand into request records and
//!   hand them to the service.
//! - Render every outcome as a status plus an optional JSON body.
//!
//! # Invariants
//! - `handle` never panics; every failure becomes an error envelope.
//! - Error bodies are the serialized `ErrorResponse`
//!   (`{"message": "<code>: <text>"}`), with the status taken from the code.

use crate::cli::Commands;
use log::info;
use roster_core::{
    is_valid_email, CommonStudentsRequest, NotificationRequest, RegistrationRequest, RosterError,
    RosterResult, RosterService, SqliteRosterRepository, Student, SuspensionRequest, Teacher,
};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

/// Outcome of one routed call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// `None` for 204 responses.
    pub body: Option<Value>,
}

impl ApiResponse {
    fn no_content() -> Self {
        Self {
            status: 204,
            body: None,
        }
    }

    fn json<T: Serialize>(status: u16, payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(body) => Self {
                status,
                body: Some(body),
            },
            Err(err) => Self {
                status: 500,
                body: Some(serde_json::json!({
                    "message": format!("store_failure: response encoding failed: {err}")
                })),
            },
        }
    }

    fn failure(err: &RosterError) -> Self {
        Self::json(err.status(), &err.to_response())
    }

    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

/// Runs `command` against the roster stored behind `conn`.
pub fn handle(conn: &Connection, command: &Commands) -> ApiResponse {
    let started_at = Instant::now();
    let response = match dispatch(conn, command) {
        Ok(response) => response,
        Err(err) => ApiResponse::failure(&err),
    };
    info!(
        "event=api_call module=cli command={} status={} duration_ms={}",
        command.name(),
        response.status,
        started_at.elapsed().as_millis()
    );
    response
}

fn dispatch(conn: &Connection, command: &Commands) -> RosterResult<ApiResponse> {
    let service = RosterService::new(SqliteRosterRepository::try_new(conn)?);

    match command {
        Commands::Register { body } => {
            service.register(&decode::<RegistrationRequest>(body.as_deref())?)?;
            Ok(ApiResponse::no_content())
        }
        Commands::CommonStudents { body } => {
            let request = decode::<CommonStudentsRequest>(body.as_deref())?;
            Ok(ApiResponse::json(200, &service.common_students(&request)?))
        }
        Commands::Suspend { body } => {
            service.suspend(&decode::<SuspensionRequest>(body.as_deref())?)?;
            Ok(ApiResponse::no_content())
        }
        Commands::RetrieveForNotifications { body } => {
            let request = decode::<NotificationRequest>(body.as_deref())?;
            Ok(ApiResponse::json(200, &service.resolve_recipients(&request)?))
        }
        Commands::AddTeacher { email } => {
            let email = seed_email(email)?;
            service.repository().insert_teacher(&Teacher::new(email))?;
            Ok(ApiResponse::no_content())
        }
        Commands::AddStudent { email } => {
            let email = seed_email(email)?;
            service.repository().insert_student(&Student::new(email))?;
            Ok(ApiResponse::no_content())
        }
    }
}

fn decode<T: DeserializeOwned>(body: Option<&str>) -> RosterResult<T> {
    let body = body.ok_or(RosterError::MalformedRequest)?;
    serde_json::from_str(body).map_err(|_| RosterError::MalformedRequest)
}

fn seed_email(email: &str) -> RosterResult<&str> {
    let email = email.trim();
    if is_valid_email(email) {
        Ok(email)
    } else {
        Err(RosterError::InvalidEmail(vec![email.to_string()]))
    }
}
