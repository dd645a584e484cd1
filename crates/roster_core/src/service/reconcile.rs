//! Existence reconciliation against the roster store.
//!
//! # Responsibility
//! - Check teacher and student existence in one pass.
//! - Fold the missing sets into exactly one compound error.
//!
//! # Invariants
//! - Lookups run sequentially: teacher first, then students in input order.
//! - Students are always checked, even when the teacher is missing.
//! - Outcome priority: teacher+students, teacher only, students only, ok.
//! - A store error aborts the remaining lookups.

use crate::model::email::Email;
use crate::repo::roster_repo::{RepoResult, RosterRepository};
use crate::service::error::{RosterError, RosterResult};

/// Verifies that `teacher` and every one of `students` exist.
pub fn reconcile_teacher_and_students<R: RosterRepository>(
    repo: &R,
    teacher: &str,
    students: &[Email],
) -> RosterResult<()> {
    let teacher_exists = repo.teacher_exists(teacher)?;
    let missing_students = missing(students, |student| repo.student_exists(student))?;

    match (teacher_exists, missing_students.is_empty()) {
        (false, false) => Err(RosterError::NonExistentTeacherAndStudents {
            teacher: teacher.to_string(),
            students: missing_students,
        }),
        (false, true) => Err(RosterError::NonExistentTeacher(teacher.to_string())),
        (true, false) => Err(RosterError::NonExistentStudents(missing_students)),
        (true, true) => Ok(()),
    }
}

/// Verifies that every one of `teachers` exists.
pub fn reconcile_teachers<R: RosterRepository>(repo: &R, teachers: &[Email]) -> RosterResult<()> {
    let missing_teachers = missing(teachers, |teacher| repo.teacher_exists(teacher))?;
    if missing_teachers.is_empty() {
        Ok(())
    } else {
        Err(RosterError::NonExistentTeachers(missing_teachers))
    }
}

/// Verifies that a single student exists.
pub fn reconcile_student<R: RosterRepository>(repo: &R, student: &str) -> RosterResult<()> {
    if repo.student_exists(student)? {
        Ok(())
    } else {
        Err(RosterError::NonExistentStudent(student.to_string()))
    }
}

fn missing<F>(emails: &[Email], exists: F) -> RepoResult<Vec<Email>>
where
    F: Fn(&str) -> RepoResult<bool>,
{
    let mut absent = Vec::new();
    for email in emails {
        if !exists(email)? {
            absent.push(email.clone());
        }
    }
    Ok(absent)
}
