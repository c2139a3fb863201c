use super::charset::{is_ascii_digit, is_label_char};
use super::cursor::Cursor;
use super::ip::parse_ip_literal;
use super::types::{Position, ValidationOptions, ValidationResult};

/// RFC 1035 §2.3.4
pub(crate) const MAX_LABEL_LENGTH: usize = 63;

/// Consumes everything after `@`: either a bracketed address literal or a
/// dot-separated sequence of labels.
pub(crate) fn parse_domain(
    cursor: &mut Cursor<'_>,
    options: &ValidationOptions,
) -> Result<(), ValidationResult> {
    if cursor.at_end() {
        return Err(ValidationResult::DomainMalformed(cursor.position()));
    }
    if cursor.current_is("[") {
        return parse_address_literal(cursor);
    }

    let mut labels = 0;
    let mut numeric_tld;
    loop {
        numeric_tld = parse_label(cursor, options)?;
        labels += 1;

        if cursor.current_is(".") {
            cursor.advance();
        } else if cursor.at_end() {
            break;
        } else {
            return Err(ValidationResult::DomainMalformed(cursor.position()));
        }
    }

    // an all-digit last label would let `127.0.0.1` through as a hostname
    if numeric_tld || (labels < 2 && !options.allow_top_level_domains) {
        return Err(ValidationResult::DomainMalformed(cursor.position()));
    }
    Ok(())
}

fn parse_address_literal(cursor: &mut Cursor<'_>) -> Result<(), ValidationResult> {
    cursor.advance();
    if !cursor.is_ahead("]") {
        return Err(ValidationResult::DomainMalformed(Position::new(cursor.len())));
    }
    parse_ip_literal(cursor)?;
    // closing bracket ends the address
    cursor.advance();
    if !cursor.at_end() {
        return Err(ValidationResult::DomainMalformed(cursor.position()));
    }
    Ok(())
}

/// Parses one label and reports whether it is made only of ASCII digits.
fn parse_label(
    cursor: &mut Cursor<'_>,
    options: &ValidationOptions,
) -> Result<bool, ValidationResult> {
    let start = cursor.position();
    if cursor.current_is("-") {
        return Err(ValidationResult::DomainMalformed(start));
    }

    let mut length = 0;
    let mut all_digits = true;
    let mut last = None;
    while let Some(c) = cursor
        .current()
        .filter(|c| is_label_char(c, options.allow_international))
    {
        all_digits &= is_ascii_digit(c);
        last = Some(c);
        length += 1;
        cursor.advance();
    }

    if length == 0 || last == Some("-") || length > MAX_LABEL_LENGTH {
        return Err(ValidationResult::DomainMalformed(cursor.position()));
    }
    Ok(all_digits)
}
