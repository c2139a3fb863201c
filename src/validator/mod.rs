mod charset;
mod cursor;
mod domain;
mod ip;
mod local;
mod types;

pub use types::{EmailError, Position, ValidationOptions, ValidationResult};

use cursor::Cursor;
use domain::parse_domain;
use local::parse_local_part;

/// RFC 5321 §4.5.3.1.3 path limit minus the angle brackets.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// `true` iff [`validate_with_result`] returns [`ValidationResult::Success`].
pub fn validate(email: &str, options: ValidationOptions) -> bool {
    validate_with_result(email, options).is_success()
}

/// Checks `email` against the RFC 5322 addr-spec grammar with the RFC 5321
/// address literal forms and reports the first violation found.
///
/// Input is taken as is: no trimming, no case folding. Positions and lengths
/// are counted in extended grapheme clusters.
pub fn validate_with_result(email: &str, options: ValidationOptions) -> ValidationResult {
    match check(email, &options) {
        Ok(()) => ValidationResult::Success,
        Err(failure) => failure,
    }
}

fn check(email: &str, options: &ValidationOptions) -> Result<(), ValidationResult> {
    if email.is_empty() {
        return Err(ValidationResult::EmptyString);
    }

    let mut cursor = Cursor::new(email);
    parse_local_part(&mut cursor, options)?;
    // parse_local_part stops on the '@'
    cursor.advance();
    parse_domain(&mut cursor, options)?;

    let length = cursor.len();
    if length > MAX_EMAIL_LENGTH {
        return Err(ValidationResult::StringTooLong(length));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tld() -> ValidationOptions {
        ValidationOptions::new().allow_top_level_domains(true)
    }

    #[test]
    fn accepts_basic() {
        assert!(validate("alice@example.com", ValidationOptions::default()));
        assert_eq!(
            validate_with_result("\"Abc\\@def\"@example.com", ValidationOptions::default()),
            ValidationResult::Success
        );
    }

    #[test]
    fn empty_string_ignores_options() {
        for opts in [ValidationOptions::default(), ValidationOptions::permissive()] {
            assert_eq!(validate_with_result("", opts), ValidationResult::EmptyString);
        }
    }

    #[test]
    fn missing_domain_is_reported_after_at() {
        assert_eq!(
            validate_with_result("invalid@", tld()),
            ValidationResult::DomainMalformed(Position::new(8))
        );
    }

    #[test]
    fn total_length_boundary() {
        // 64 + 1 + 63 + 1 + 63 + 1 + 61 = 254
        let local = "l".repeat(64);
        let domain = format!("{}.{}.{}", "a".repeat(63), "b".repeat(63), "c".repeat(61));
        let ok = format!("{local}@{domain}");
        assert_eq!(ok.len(), 254);
        assert_eq!(validate_with_result(&ok, tld()), ValidationResult::Success);

        let too_long = format!("{ok}c");
        assert_eq!(
            validate_with_result(&too_long, tld()),
            ValidationResult::StringTooLong(255)
        );
    }

    #[test]
    fn structural_errors_win_over_length() {
        let input = format!("{}@{}", "a".repeat(64), "b-".repeat(100));
        assert!(matches!(
            validate_with_result(&input, tld()),
            ValidationResult::DomainMalformed(_)
        ));
    }

    #[test]
    fn length_counts_clusters() {
        let local = "é".repeat(60);
        let intl = ValidationOptions::permissive();
        assert!(validate(&format!("{local}@example.com"), intl));
    }
}
