//! Stored roster records.
//!
//! # Invariants
//! - `Student::suspended` only ever moves from `false` to `true`.
//! - At most one `Relationship` exists per `(teacher, student)` pair.

use crate::model::email::Email;

/// A teacher known to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    pub email: Email,
}

impl Teacher {
    pub fn new(email: impl Into<Email>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// A student known to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub email: Email,
    /// Suspended students never receive notifications.
    pub suspended: bool,
}

impl Student {
    /// Creates an active (not suspended) student.
    pub fn new(email: impl Into<Email>) -> Self {
        Self {
            email: email.into(),
            suspended: false,
        }
    }
}

/// "Teacher teaches student" edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub teacher: Email,
    pub student: Email,
}
