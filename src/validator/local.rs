use super::charset::{is_atext, is_qtext};
use super::cursor::Cursor;
use super::types::{Position, ValidationOptions, ValidationResult};

/// RFC 5321 §4.5.3.1.1
pub(crate) const MAX_LOCAL_PART_LENGTH: usize = 64;

/// Consumes the local part, leaving the cursor on the `@` separator.
/// Returns the position where the local part ends.
pub(crate) fn parse_local_part(
    cursor: &mut Cursor<'_>,
    options: &ValidationOptions,
) -> Result<Position, ValidationResult> {
    if cursor.current_is("\"") {
        parse_quoted_string(cursor, options)?;
    } else {
        parse_dot_atom(cursor, options)?;
    }

    let end = cursor.position();
    if end.index() > MAX_LOCAL_PART_LENGTH {
        return Err(ValidationResult::LocalPartTooLong(end));
    }
    if cursor.at_end() {
        return Err(ValidationResult::NoAtCharacterFound);
    }
    Ok(end)
}

/// `atext+ ("." atext+)*`; an empty atom is reported where it should have started.
fn parse_dot_atom(
    cursor: &mut Cursor<'_>,
    options: &ValidationOptions,
) -> Result<(), ValidationResult> {
    loop {
        let atom_start = cursor.position();
        while cursor
            .current()
            .is_some_and(|c| is_atext(c, options.allow_international))
        {
            cursor.advance();
        }
        if cursor.position() == atom_start {
            return Err(ValidationResult::LocalPartMalformed(atom_start));
        }
        if cursor.current_is(".") {
            cursor.advance();
        } else {
            break;
        }
    }

    if !cursor.at_end() && !cursor.current_is("@") {
        return Err(ValidationResult::LocalPartMalformed(cursor.position()));
    }
    Ok(())
}

fn parse_quoted_string(
    cursor: &mut Cursor<'_>,
    options: &ValidationOptions,
) -> Result<(), ValidationResult> {
    // opening quote
    cursor.advance();
    loop {
        match cursor.current() {
            None => return Err(ValidationResult::LocalPartQuotedBadly(cursor.position())),
            Some("\\") => {
                cursor.advance();
                if cursor.at_end() {
                    return Err(ValidationResult::LocalPartQuotedBadly(cursor.position()));
                }
                cursor.advance();
            }
            Some("\"") => {
                cursor.advance();
                break;
            }
            Some(c) if is_qtext(c, options.allow_international) => cursor.advance(),
            Some(_) => return Err(ValidationResult::LocalPartQuotedBadly(cursor.position())),
        }
    }

    if !cursor.at_end() && !cursor.current_is("@") {
        return Err(ValidationResult::LocalPartQuotedBadly(cursor.position()));
    }
    Ok(())
}
