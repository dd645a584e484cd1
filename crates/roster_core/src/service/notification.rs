//! Notification recipient resolution.
//!
//! # Responsibility
//! - Extract `@`-mentions from free notification text.
//! - Union mentioned students with the teacher's roster.
//! - Drop suspended students and sort the result.
//!
//! # Invariants
//! - A mention is a whitespace-delimited token starting with `@`; its
//!   candidate is the rest of the token.
//! - A candidate carrying more than one `@` is rejected as invalid. This
//!   covers merged mentions (`@a@gmail.com@b@gmail.com`) and any stored
//!   multi-`@` address alike; such students are reached through the roster.
//! - Suspended students are never recipients, even when mentioned.

use crate::model::email::{dedupe, Email};
use crate::model::request::{NotificationRequest, RecipientsResponse};
use crate::repo::roster_repo::RosterRepository;
use crate::service::error::RosterResult;
use crate::service::reconcile::reconcile_teacher_and_students;
use crate::service::validate::ensure_valid_notification;
use once_cell::sync::Lazy;
use regex::Regex;

static MENTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)@(\S*)").expect("valid mention regex"));

/// Returns mention candidates in order of appearance, duplicates included.
///
/// A bare `@` token yields an empty candidate.
pub fn extract_mentions(notification: &str) -> Vec<Email> {
    MENTION_RE
        .captures_iter(notification)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Resolves who receives `request.notification`.
pub fn resolve_recipients<R: RosterRepository>(
    repo: &R,
    request: &NotificationRequest,
) -> RosterResult<RecipientsResponse> {
    let teacher = request.teacher.as_str();
    let mentioned = dedupe(&extract_mentions(&request.notification));

    ensure_valid_notification(teacher, &mentioned)?;
    reconcile_teacher_and_students(repo, teacher, &mentioned)?;

    let roster = repo.registered_students_of(teacher)?;
    let mut candidates = mentioned;
    candidates.extend(roster);
    let candidates = dedupe(&candidates);

    let mut recipients = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !repo.is_suspended(&candidate)? {
            recipients.push(candidate);
        }
    }
    recipients.sort();

    Ok(RecipientsResponse { recipients })
}

#[cfg(test)]
mod tests {
    use super::extract_mentions;

    #[test]
    fn mentions_are_tokens_starting_with_at() {
        assert_eq!(
            extract_mentions("@tyke@gmail.com Good morning @jerry@gmail.com"),
            vec!["tyke@gmail.com", "jerry@gmail.com"]
        );
    }

    #[test]
    fn embedded_at_signs_do_not_start_mentions() {
        assert!(extract_mentions("mail me at tom@gmail.com").is_empty());
        assert_eq!(
            extract_mentions("Hi @jerry@gmail.com@nibbles@gmail.com!"),
            vec!["jerry@gmail.com@nibbles@gmail.com!"]
        );
    }

    #[test]
    fn any_whitespace_separates_mentions() {
        assert_eq!(
            extract_mentions("hey\t@a@gmail.com\n@b@gmail.com  @a@gmail.com"),
            vec!["a@gmail.com", "b@gmail.com", "a@gmail.com"]
        );
    }

    #[test]
    fn text_without_mentions_yields_nothing() {
        assert!(extract_mentions("Good morning!").is_empty());
        assert!(extract_mentions("").is_empty());
    }
}
