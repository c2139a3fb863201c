use std::fmt;

use thiserror::Error;

/// Switches that relax the default grammar.
#[cfg_attr(
    feature = "with-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Accept a domain made of a single label, e.g. `admin@mailserver1`.
    pub allow_top_level_domains: bool,
    /// Accept Unicode letters and digits in the local part and domain labels.
    pub allow_international: bool,
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both relaxations enabled.
    pub fn permissive() -> Self {
        Self {
            allow_top_level_domains: true,
            allow_international: true,
        }
    }

    pub fn allow_top_level_domains(mut self, allow: bool) -> Self {
        self.allow_top_level_domains = allow;
        self
    }

    pub fn allow_international(mut self, allow: bool) -> Self {
        self.allow_international = allow;
        self
    }
}

/// Offset into the validated input, counted in extended grapheme clusters
/// from 0. For ASCII input this is the character index.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position(usize);

impl Position {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Verdict of [`validate_with_result`](crate::validate_with_result).
///
/// Every failure that carries a [`Position`] points at the cluster where the
/// violation was detected, which is not necessarily the start of the
/// offending token.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Success,
    EmptyString,
    /// Observed length in grapheme clusters.
    StringTooLong(usize),
    LocalPartQuotedBadly(Position),
    LocalPartMalformed(Position),
    LocalPartTooLong(Position),
    NoAtCharacterFound,
    DomainMalformed(Position),
    IpAddressMalformed(Position),
    IpV4AddressMalformed(Position),
    IpV6AddressMalformed(Position),
}

impl ValidationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn position(&self) -> Option<Position> {
        match *self {
            Self::LocalPartQuotedBadly(pos)
            | Self::LocalPartMalformed(pos)
            | Self::LocalPartTooLong(pos)
            | Self::DomainMalformed(pos)
            | Self::IpAddressMalformed(pos)
            | Self::IpV4AddressMalformed(pos)
            | Self::IpV6AddressMalformed(pos) => Some(pos),
            Self::Success | Self::EmptyString | Self::StringTooLong(_) | Self::NoAtCharacterFound => {
                None
            }
        }
    }

    /// Stable machine-readable name of the variant.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::EmptyString => "empty_string",
            Self::StringTooLong(_) => "string_too_long",
            Self::LocalPartQuotedBadly(_) => "local_part_quoted_badly",
            Self::LocalPartMalformed(_) => "local_part_malformed",
            Self::LocalPartTooLong(_) => "local_part_too_long",
            Self::NoAtCharacterFound => "no_at_character_found",
            Self::DomainMalformed(_) => "domain_malformed",
            Self::IpAddressMalformed(_) => "ip_address_malformed",
            Self::IpV4AddressMalformed(_) => "ipv4_address_malformed",
            Self::IpV6AddressMalformed(_) => "ipv6_address_malformed",
        }
    }

    pub fn into_result(self) -> Result<(), EmailError> {
        let err = match self {
            Self::Success => return Ok(()),
            Self::EmptyString => EmailError::EmptyString,
            Self::StringTooLong(length) => EmailError::StringTooLong { length },
            Self::LocalPartQuotedBadly(at) => EmailError::LocalPartQuotedBadly { at },
            Self::LocalPartMalformed(at) => EmailError::LocalPartMalformed { at },
            Self::LocalPartTooLong(at) => EmailError::LocalPartTooLong { at },
            Self::NoAtCharacterFound => EmailError::NoAtCharacterFound,
            Self::DomainMalformed(at) => EmailError::DomainMalformed { at },
            Self::IpAddressMalformed(at) => EmailError::IpAddressMalformed { at },
            Self::IpV4AddressMalformed(at) => EmailError::IpV4AddressMalformed { at },
            Self::IpV6AddressMalformed(at) => EmailError::IpV6AddressMalformed { at },
        };
        Err(err)
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StringTooLong(length) => write!(f, "{} {length}", self.code()),
            other => match other.position() {
                Some(pos) => write!(f, "{} {pos}", other.code()),
                None => f.write_str(other.code()),
            },
        }
    }
}

impl From<ValidationResult> for bool {
    fn from(result: ValidationResult) -> Self {
        result.is_success()
    }
}

/// Failure side of a [`ValidationResult`], for callers that want `?`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailError {
    #[error("address is empty")]
    EmptyString,
    #[error("address is {length} characters long (max 254)")]
    StringTooLong { length: usize },
    #[error("local part is quoted badly at position {at}")]
    LocalPartQuotedBadly { at: Position },
    #[error("local part is malformed at position {at}")]
    LocalPartMalformed { at: Position },
    #[error("local part is longer than 64 characters (ends at position {at})")]
    LocalPartTooLong { at: Position },
    #[error("no '@' character found")]
    NoAtCharacterFound,
    #[error("domain is malformed at position {at}")]
    DomainMalformed { at: Position },
    #[error("IP address literal is malformed at position {at}")]
    IpAddressMalformed { at: Position },
    #[error("IPv4 address is malformed at position {at}")]
    IpV4AddressMalformed { at: Position },
    #[error("IPv6 address is malformed at position {at}")]
    IpV6AddressMalformed { at: Position },
}

impl EmailError {
    pub fn position(&self) -> Option<Position> {
        match *self {
            Self::LocalPartQuotedBadly { at }
            | Self::LocalPartMalformed { at }
            | Self::LocalPartTooLong { at }
            | Self::DomainMalformed { at }
            | Self::IpAddressMalformed { at }
            | Self::IpV4AddressMalformed { at }
            | Self::IpV6AddressMalformed { at } => Some(at),
            Self::EmptyString | Self::StringTooLong { .. } | Self::NoAtCharacterFound => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_builder() {
        let opts = ValidationOptions::new().allow_top_level_domains(true);
        assert!(opts.allow_top_level_domains);
        assert!(!opts.allow_international);
        assert_eq!(
            ValidationOptions::permissive(),
            ValidationOptions::new()
                .allow_top_level_domains(true)
                .allow_international(true)
        );
    }

    #[test]
    fn display_renders_code_and_position() {
        insta::assert_snapshot!(
            ValidationResult::LocalPartMalformed(Position::new(4)).to_string(),
            @"local_part_malformed 4"
        );
        insta::assert_snapshot!(ValidationResult::StringTooLong(255).to_string(), @"string_too_long 255");
        insta::assert_snapshot!(ValidationResult::NoAtCharacterFound.to_string(), @"no_at_character_found");
    }

    #[test]
    fn into_result_maps_failures() {
        assert_eq!(ValidationResult::Success.into_result(), Ok(()));
        let err = ValidationResult::DomainMalformed(Position::new(8))
            .into_result()
            .unwrap_err();
        assert_eq!(err.position(), Some(Position::new(8)));
        insta::assert_snapshot!(err.to_string(), @"domain is malformed at position 8");
    }

    #[test]
    fn bool_view() {
        assert!(bool::from(ValidationResult::Success));
        assert!(!bool::from(ValidationResult::EmptyString));
    }
}
