//! Students shared by every teacher of a query set.
//!
//! # Invariants
//! - A student is common only when linked to every requested teacher.
//! - Output is sorted, so teacher order never affects the result.

use crate::model::email::{dedupe, Email};
use crate::model::request::{CommonStudentsRequest, CommonStudentsResponse};
use crate::repo::roster_repo::RosterRepository;
use crate::service::error::RosterResult;
use crate::service::reconcile::reconcile_teachers;
use crate::service::validate::ensure_valid_emails;

/// Resolves the students taught by all of `request.teachers`.
pub fn common_students<R: RosterRepository>(
    repo: &R,
    request: &CommonStudentsRequest,
) -> RosterResult<CommonStudentsResponse> {
    let teachers = dedupe(&request.teachers);
    ensure_valid_emails(&teachers)?;
    reconcile_teachers(repo, &teachers)?;

    let mut requested = teachers.clone();
    requested.sort();

    let mut students: Vec<Email> = repo
        .students_of_teachers(&teachers)?
        .into_iter()
        .filter_map(|(student, mut linked)| {
            linked.sort();
            linked.dedup();
            (linked == requested).then_some(student)
        })
        .collect();
    students.sort();

    Ok(CommonStudentsResponse { students })
}
