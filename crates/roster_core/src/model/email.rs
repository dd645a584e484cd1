//! Email value rules shared by every roster use-case.
//!
//! # Responsibility
//! - Classify raw email strings as valid or invalid.
//! - Produce stable, duplicate-free email lists.
//!
//! # Invariants
//! - Validity is a literal, case-sensitive suffix match on `@gmail.com`.
//!   No trimming and no local-part checks are applied.
//! - `dedupe` keeps the first occurrence of every value, in input order.
//! - Validity says nothing about existence in the store.

use std::collections::HashSet;

/// Email address used as the identity of teachers and students.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type Email = String;

/// Domain suffix every accepted email must end with.
pub const EMAIL_DOMAIN_SUFFIX: &str = "@gmail.com";

/// Returns whether `email` ends with the accepted domain suffix.
pub fn is_valid_email(email: &str) -> bool {
    email.ends_with(EMAIL_DOMAIN_SUFFIX)
}

/// Returns whether a notification mention candidate names exactly one email.
///
/// Back-to-back mentions written without whitespace
/// (`a@gmail.com@b@gmail.com`) still satisfy the suffix rule, so a candidate
/// is additionally required to carry a single `@`. The rule applies to every
/// multi-`@` address, including ones accepted by [`is_valid_email`] at
/// registration; those students can only be notified through the roster.
pub fn is_valid_mention(candidate: &str) -> bool {
    is_valid_email(candidate) && candidate.matches('@').count() == 1
}

/// Removes duplicates while keeping first-occurrence order.
pub fn dedupe<S: AsRef<str>>(emails: &[S]) -> Vec<Email> {
    let mut seen = HashSet::with_capacity(emails.len());
    emails
        .iter()
        .map(AsRef::as_ref)
        .filter(|email| seen.insert(*email))
        .map(str::to_string)
        .collect()
}

/// Splits `emails` into `(valid, invalid)` lists, both in input order.
pub fn partition<S: AsRef<str>>(emails: &[S]) -> (Vec<Email>, Vec<Email>) {
    partition_with(emails, is_valid_email)
}

/// Same as [`partition`] but with a caller-provided validity rule.
pub fn partition_with<S, F>(emails: &[S], is_valid: F) -> (Vec<Email>, Vec<Email>)
where
    S: AsRef<str>,
    F: Fn(&str) -> bool,
{
    let mut valid = Vec::new();
    let mut invalid = Vec::new();
    for email in emails.iter().map(AsRef::as_ref) {
        if is_valid(email) {
            valid.push(email.to_string());
        } else {
            invalid.push(email.to_string());
        }
    }
    (valid, invalid)
}

/// Renders emails as `'a', 'b'` for user-facing messages.
pub fn quote_list<S: AsRef<str>>(emails: &[S]) -> String {
    emails
        .iter()
        .map(|email| format!("'{}'", email.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::{dedupe, is_valid_email, is_valid_mention, partition, quote_list};

    #[test]
    fn suffix_rule_is_literal_and_case_sensitive() {
        assert!(is_valid_email("tom@gmail.com"));
        assert!(is_valid_email("@gmail.com"));
        assert!(!is_valid_email("tom@gmailcom"));
        assert!(!is_valid_email("tomgmail.com"));
        assert!(!is_valid_email("tom@GMAIL.com"));
        assert!(!is_valid_email("tom@gmail.com "));
        assert!(!is_valid_email(" "));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn breaking_the_suffix_invalidates_a_valid_email() {
        for suffix in [" ", "x", ".", "@"] {
            let email = format!("jerry@gmail.com{suffix}");
            assert!(!is_valid_email(&email), "{email} should be invalid");
        }
    }

    #[test]
    fn merged_mentions_are_not_valid_mentions() {
        assert!(is_valid_mention("jerry@gmail.com"));
        assert!(!is_valid_mention("jerry@gmail.com@nibbles@gmail.com"));
        assert!(!is_valid_mention("jerrygmail.com"));
    }

    #[test]
    fn multi_at_address_passes_suffix_rule_but_never_mentions() {
        assert!(is_valid_email("a@b@gmail.com"));
        assert!(!is_valid_mention("a@b@gmail.com"));
        assert!(!is_valid_mention("@gmail.com@gmail.com"));
    }

    #[test]
    fn dedupe_keeps_first_occurrence_and_is_idempotent() {
        let input = ["b", "a", "b", "c", "a"];
        let once = dedupe(&input);
        assert_eq!(once, vec!["b", "a", "c"]);
        assert_eq!(dedupe(&once), once);
        assert!(dedupe::<&str>(&[]).is_empty());
    }

    #[test]
    fn partition_preserves_input_order() {
        let (valid, invalid) = partition(&["x", "a@gmail.com", " ", "b@gmail.com", "x"]);
        assert_eq!(valid, vec!["a@gmail.com", "b@gmail.com"]);
        assert_eq!(invalid, vec!["x", " ", "x"]);
    }

    #[test]
    fn quote_list_wraps_and_joins() {
        assert_eq!(quote_list(&["a", "b"]), "'a', 'b'");
        assert_eq!(quote_list(&[" "]), "' '");
        assert_eq!(quote_list::<&str>(&[]), "");
    }
}
