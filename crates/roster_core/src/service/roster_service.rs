//! Roster use-case facade.
//!
//! # Responsibility
//! - Expose the four roster operations over one injected repository.
//! - Emit one metadata-only outcome event per call.
//!
//! # Invariants
//! - Validation and existence checks always precede store reads/writes.
//! - The first error wins; no partial-state cleanup is attempted.
//! - Rejected requests log counts and error codes only, never emails.

use crate::model::request::{
    CommonStudentsRequest, CommonStudentsResponse, NotificationRequest, RecipientsResponse,
    RegistrationRequest, SuspensionRequest,
};
use crate::repo::roster_repo::RosterRepository;
use crate::service::error::{RosterError, RosterResult};
use crate::service::{common_students, notification, registration, suspension};
use log::{info, warn};
use std::time::Instant;

/// Use-case service wrapper for roster operations.
pub struct RosterService<R: RosterRepository> {
    repo: R,
}

impl<R: RosterRepository> RosterService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Registers students with a teacher. Success carries no payload.
    pub fn register(&self, request: &RegistrationRequest) -> RosterResult<()> {
        let started_at = Instant::now();
        let result = registration::register(&self.repo, request);
        match &result {
            Ok(created) => info!(
                "event=register module=service status=ok created={created} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("register", started_at, err),
        }
        result.map(|_| ())
    }

    /// Lists students linked to every requested teacher, sorted.
    pub fn common_students(
        &self,
        request: &CommonStudentsRequest,
    ) -> RosterResult<CommonStudentsResponse> {
        let started_at = Instant::now();
        let result = common_students::common_students(&self.repo, request);
        match &result {
            Ok(response) => info!(
                "event=common_students module=service status=ok teachers={} students={} duration_ms={}",
                request.teachers.len(),
                response.students.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("common_students", started_at, err),
        }
        result
    }

    /// Suspends one student. Success carries no payload.
    pub fn suspend(&self, request: &SuspensionRequest) -> RosterResult<()> {
        let started_at = Instant::now();
        let result = suspension::suspend(&self.repo, request);
        match &result {
            Ok(()) => info!(
                "event=suspend module=service status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("suspend", started_at, err),
        }
        result
    }

    /// Resolves non-suspended notification recipients, sorted.
    pub fn resolve_recipients(
        &self,
        request: &NotificationRequest,
    ) -> RosterResult<RecipientsResponse> {
        let started_at = Instant::now();
        let result = notification::resolve_recipients(&self.repo, request);
        match &result {
            Ok(response) => info!(
                "event=resolve_recipients module=service status=ok recipients={} duration_ms={}",
                response.recipients.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure("resolve_recipients", started_at, err),
        }
        result
    }
}

fn log_failure(event: &str, started_at: Instant, err: &RosterError) {
    let duration_ms = started_at.elapsed().as_millis();
    let code = err.code();
    if err.status() >= 500 {
        warn!(
            "event={event} module=service status=error error_code={code} duration_ms={duration_ms} error={err}"
        );
    } else {
        info!(
            "event={event} module=service status=rejected error_code={code} duration_ms={duration_ms}"
        );
    }
}
