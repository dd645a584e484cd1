//! Roster use-case errors.
//!
//! # Responsibility
//! - Enumerate every failure a roster operation can report.
//! - Render one human-readable message per failure, prefixed by a stable
//!   machine code the wire layer maps to a status.
//!
//! # Invariants
//! - Every rendered message has the shape `<code>: <text>`.
//! - Email lists are rendered quoted and joined with `", "`, in input order.
//! - Unknown or missing codes map to status 500.

use crate::model::email::{quote_list, Email};
use crate::model::request::ErrorResponse;
use crate::repo::roster_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable machine-readable error code embedded in every error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    MalformedRequest,
    InvalidEmail,
    NonExistentTeacher,
    NonExistentTeachers,
    NonExistentStudent,
    NonExistentStudents,
    NonExistentTeacherAndStudents,
    AlreadyRegistered,
    StoreFailure,
}

impl ErrorCode {
    const ALL: [ErrorCode; 9] = [
        Self::MalformedRequest,
        Self::InvalidEmail,
        Self::NonExistentTeacher,
        Self::NonExistentTeachers,
        Self::NonExistentStudent,
        Self::NonExistentStudents,
        Self::NonExistentTeacherAndStudents,
        Self::AlreadyRegistered,
        Self::StoreFailure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MalformedRequest => "malformed_request",
            Self::InvalidEmail => "invalid_email",
            Self::NonExistentTeacher => "non_existent_teacher",
            Self::NonExistentTeachers => "non_existent_teachers",
            Self::NonExistentStudent => "non_existent_student",
            Self::NonExistentStudents => "non_existent_students",
            Self::NonExistentTeacherAndStudents => "non_existent_teacher_and_students",
            Self::AlreadyRegistered => "already_registered",
            Self::StoreFailure => "store_failure",
        }
    }

    /// HTTP-style status class for this code.
    pub fn status(self) -> u16 {
        match self {
            Self::AlreadyRegistered => 409,
            Self::StoreFailure => 500,
            _ => 400,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_str() == value)
    }

    /// Extracts the code prefix of a rendered error message.
    pub fn from_message(message: &str) -> Option<Self> {
        let (prefix, _) = message.split_once(':')?;
        Self::parse(prefix)
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a rendered error message back to its status; unclassified is 500.
pub fn status_for_message(message: &str) -> u16 {
    ErrorCode::from_message(message).map_or(500, ErrorCode::status)
}

/// Failure of a roster use-case.
#[derive(Debug)]
pub enum RosterError {
    /// Request body could not be decoded into the expected record.
    MalformedRequest,
    /// One or more emails fail the domain suffix rule.
    InvalidEmail(Vec<Email>),
    NonExistentTeacher(Email),
    NonExistentTeachers(Vec<Email>),
    NonExistentStudent(Email),
    NonExistentStudents(Vec<Email>),
    /// Teacher and at least one student are missing; takes precedence over
    /// the single-sided variants.
    NonExistentTeacherAndStudents { teacher: Email, students: Vec<Email> },
    /// Relationships already present for the listed students.
    AlreadyRegistered { teacher: Email, students: Vec<Email> },
    /// Unclassified persistence failure.
    Store(RepoError),
}

impl RosterError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedRequest => ErrorCode::MalformedRequest,
            Self::InvalidEmail(_) => ErrorCode::InvalidEmail,
            Self::NonExistentTeacher(_) => ErrorCode::NonExistentTeacher,
            Self::NonExistentTeachers(_) => ErrorCode::NonExistentTeachers,
            Self::NonExistentStudent(_) => ErrorCode::NonExistentStudent,
            Self::NonExistentStudents(_) => ErrorCode::NonExistentStudents,
            Self::NonExistentTeacherAndStudents { .. } => ErrorCode::NonExistentTeacherAndStudents,
            Self::AlreadyRegistered { .. } => ErrorCode::AlreadyRegistered,
            Self::Store(_) => ErrorCode::StoreFailure,
        }
    }

    pub fn status(&self) -> u16 {
        self.code().status()
    }

    /// Wire representation of this error.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            message: self.to_string(),
        }
    }
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", self.code())?;
        match self {
            Self::MalformedRequest => write!(
                f,
                "The JSON sent does not have the correct structure and/or types"
            ),
            Self::InvalidEmail(emails) => write!(
                f,
                "You have provided one or more invalid emails: {}",
                quote_list(emails)
            ),
            Self::NonExistentTeacher(teacher) => {
                write!(f, "The email '{teacher}' does not exist as a teacher")
            }
            Self::NonExistentTeachers(teachers) => write!(
                f,
                "The email(s) {} do(es) not exist as teacher(s)",
                quote_list(teachers)
            ),
            Self::NonExistentStudent(student) => {
                write!(f, "The email '{student}' does not exist as a student")
            }
            Self::NonExistentStudents(students) => write!(
                f,
                "The email(s) {} do(es) not exist as student(s)",
                quote_list(students)
            ),
            Self::NonExistentTeacherAndStudents { teacher, students } => write!(
                f,
                "'{teacher}' does not exist as a teacher and {} do(es) not exist as student(s)",
                quote_list(students)
            ),
            Self::AlreadyRegistered { teacher, students } => write!(
                f,
                "Student(s) {} has/have already been registered with the teacher '{teacher}'",
                quote_list(students)
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RosterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for RosterError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

pub type RosterResult<T> = Result<T, RosterError>;
