//! Email validation gates run before any store access.
//!
//! Every `RosterError::InvalidEmail` is built here. Offenders are listed in
//! input order; a notification lists its mentions before its teacher.

use crate::model::email::{is_valid_email, is_valid_mention, partition_with, Email};
use crate::service::error::{RosterError, RosterResult};

/// Fails with every offender when any email breaks the suffix rule.
pub fn ensure_valid_emails(emails: &[Email]) -> RosterResult<()> {
    reject_any(offenders(emails, is_valid_email))
}

/// Checks notification mentions with the single-address mention rule and
/// the sending teacher with the plain suffix rule.
pub fn ensure_valid_notification(teacher: &str, mentions: &[Email]) -> RosterResult<()> {
    let mut invalid = offenders(mentions, is_valid_mention);
    if !is_valid_email(teacher) {
        invalid.push(teacher.to_string());
    }
    reject_any(invalid)
}

fn offenders(emails: &[Email], is_valid: fn(&str) -> bool) -> Vec<Email> {
    partition_with(emails, is_valid).1
}

fn reject_any(invalid: Vec<Email>) -> RosterResult<()> {
    if invalid.is_empty() {
        Ok(())
    } else {
        Err(RosterError::InvalidEmail(invalid))
    }
}
