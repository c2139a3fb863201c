#![forbid(unsafe_code)]
//! mailsyntax — email address syntax validation (RFC 5322 addr-spec, RFC 5321 address literals)
//!
//! ```
//! use mailsyntax::{Position, ValidationOptions, ValidationResult, validate_with_result};
//!
//! let opts = ValidationOptions::default();
//! assert_eq!(validate_with_result("alice@example.com", opts), ValidationResult::Success);
//! assert_eq!(
//!     validate_with_result("two..dots@sld.com", opts),
//!     ValidationResult::LocalPartMalformed(Position::new(4)),
//! );
//! ```

pub mod validator;
pub use validator::{
    EmailError, MAX_EMAIL_LENGTH, Position, ValidationOptions, ValidationResult, validate,
    validate_with_result,
};
