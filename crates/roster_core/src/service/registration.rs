//! Student registration under a teacher.
//!
//! # Invariants
//! - Gates run in order: dedupe, validate, reconcile, duplicate check, insert.
//! - Every already-registered student is reported, not just the first.
//! - Inserts follow input order and are not transactional: a failure on
//!   student `k` leaves students `1..k-1` persisted.

use crate::model::email::{dedupe, Email};
use crate::model::request::RegistrationRequest;
use crate::repo::roster_repo::RosterRepository;
use crate::service::error::{RosterError, RosterResult};
use crate::service::reconcile::reconcile_teacher_and_students;
use crate::service::validate::ensure_valid_emails;
use log::warn;

/// Registers `request.students` with `request.teacher`.
///
/// Returns the number of relationships created.
pub fn register<R: RosterRepository>(repo: &R, request: &RegistrationRequest) -> RosterResult<usize> {
    let teacher = request.teacher.as_str();
    let students = dedupe(&request.students);

    let mut all_emails = students.clone();
    all_emails.push(request.teacher.clone());
    ensure_valid_emails(&all_emails)?;

    reconcile_teacher_and_students(repo, teacher, &students)?;

    let already_registered = registered_among(repo, teacher, &students)?;
    if !already_registered.is_empty() {
        return Err(RosterError::AlreadyRegistered {
            teacher: request.teacher.clone(),
            students: already_registered,
        });
    }

    for (created, student) in students.iter().enumerate() {
        if let Err(err) = repo.create_relationship(teacher, student) {
            warn!(
                "event=register_partial module=service status=error created={created} remaining={}",
                students.len() - created
            );
            return Err(err.into());
        }
    }

    Ok(students.len())
}

fn registered_among<R: RosterRepository>(
    repo: &R,
    teacher: &str,
    students: &[Email],
) -> RosterResult<Vec<Email>> {
    let mut registered = Vec::new();
    for student in students {
        if repo.relationship_exists(teacher, student)? {
            registered.push(student.clone());
        }
    }
    Ok(registered)
}
