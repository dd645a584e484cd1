//! Student suspension.

use crate::model::request::SuspensionRequest;
use crate::repo::roster_repo::RosterRepository;
use crate::service::error::RosterResult;
use crate::service::reconcile::reconcile_student;
use crate::service::validate::ensure_valid_emails;

/// Marks `request.student` as suspended.
///
/// Suspending an already-suspended student succeeds; the store update is
/// unconditional once existence is confirmed.
pub fn suspend<R: RosterRepository>(repo: &R, request: &SuspensionRequest) -> RosterResult<()> {
    ensure_valid_emails(std::slice::from_ref(&request.student))?;

    let student = request.student.as_str();
    reconcile_student(repo, student)?;
    repo.suspend(student)?;
    Ok(())
}
