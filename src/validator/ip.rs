//! Address literals of RFC 5321 §4.1.3: `[IPv4]` and `[IPv6:...]`, including
//! the IPv6 form that ends in a dotted quad.

use super::charset::{is_ascii_digit, is_hex_digit};
use super::cursor::Cursor;
use super::types::{Position, ValidationResult};

const IPV6_TAG: &str = "IPv6:";
const IPV6_GROUPS: usize = 8;
const IPV6_GROUP_DIGITS: usize = 4;

/// Parses the literal after the opening `[` and leaves the cursor on the
/// closing `]`.
pub(crate) fn parse_ip_literal(cursor: &mut Cursor<'_>) -> Result<(), ValidationResult> {
    // trailing garbage inside an IPv6 literal stays an IPv6 error
    let trailing: fn(Position) -> ValidationResult =
        if cursor.lookahead_eq_ignore_ascii_case(IPV6_TAG) {
            cursor.advance_by(IPV6_TAG.len());
            parse_ipv6(cursor)?;
            ValidationResult::IpV6AddressMalformed
        } else if cursor.current().is_some_and(is_ascii_digit) {
            parse_ipv4(cursor, ValidationResult::IpV4AddressMalformed)?;
            ValidationResult::IpAddressMalformed
        } else {
            return Err(ValidationResult::IpAddressMalformed(cursor.position()));
        };

    match cursor.current() {
        Some("]") => Ok(()),
        None => Err(ValidationResult::DomainMalformed(cursor.position())),
        Some(_) => Err(trailing(cursor.position())),
    }
}

/// Dotted quad; `malformed` picks the variant so the embedded IPv6 form can
/// report its own kind.
fn parse_ipv4(
    cursor: &mut Cursor<'_>,
    malformed: fn(Position) -> ValidationResult,
) -> Result<(), ValidationResult> {
    for octet in 0..4 {
        if octet > 0 {
            if !cursor.current_is(".") {
                return Err(malformed(cursor.position()));
            }
            cursor.advance();
        }

        let mut digits = String::new();
        while let Some(c) = cursor.current().filter(|c| is_ascii_digit(c)) {
            digits.push_str(c);
            cursor.advance();
        }
        if digits.parse::<u8>().is_err() {
            return Err(malformed(cursor.position()));
        }
    }
    Ok(())
}

fn parse_ipv6(cursor: &mut Cursor<'_>) -> Result<(), ValidationResult> {
    let malformed =
        |at: Position| -> Result<(), ValidationResult> { Err(ValidationResult::IpV6AddressMalformed(at)) };

    let mut groups = 0;
    let mut elided = false;
    let mut group_expected = true;

    if cursor.current_is(":") {
        if cursor.peek(1) != Some(":") {
            return malformed(cursor.position());
        }
        cursor.advance_by(2);
        elided = true;
        group_expected = false;
    }

    loop {
        if !cursor.current().is_some_and(is_hex_digit) {
            if group_expected {
                return malformed(cursor.position());
            }
            break;
        }

        let group_start = cursor.position();
        let max_groups = if elided { IPV6_GROUPS - 1 } else { IPV6_GROUPS };

        if embedded_ipv4_ahead(cursor) {
            parse_ipv4(cursor, ValidationResult::IpV6AddressMalformed)?;
            groups += 2;
            if groups > max_groups {
                return malformed(group_start);
            }
            // the dotted quad is always the last component
            break;
        }

        let mut digits = 0;
        while cursor.current().is_some_and(is_hex_digit) {
            digits += 1;
            cursor.advance();
        }
        if digits > IPV6_GROUP_DIGITS {
            return malformed(cursor.position());
        }
        groups += 1;
        if groups > max_groups {
            return malformed(group_start);
        }

        if !cursor.current_is(":") {
            break;
        }
        if cursor.peek(1) == Some(":") {
            if elided {
                return malformed(cursor.position());
            }
            cursor.advance_by(2);
            elided = true;
            group_expected = false;
        } else {
            cursor.advance();
            group_expected = true;
        }
    }

    if !elided && groups != IPV6_GROUPS {
        return malformed(cursor.position());
    }
    Ok(())
}

/// A run of decimal digits followed by `.` starts a dotted quad rather than a
/// hex group.
fn embedded_ipv4_ahead(cursor: &Cursor<'_>) -> bool {
    let mut offset = 0;
    while let Some(c) = cursor.peek(offset).filter(|c| is_hex_digit(c)) {
        if !is_ascii_digit(c) {
            return false;
        }
        offset += 1;
    }
    offset > 0 && cursor.peek(offset) == Some(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Runs the parser on `literal` as if it followed `[` at position 0.
    fn literal(literal: &str) -> Result<(), ValidationResult> {
        let mut cursor = Cursor::new(literal);
        parse_ip_literal(&mut cursor)
    }

    fn v4_err(at: usize) -> Result<(), ValidationResult> {
        Err(ValidationResult::IpV4AddressMalformed(Position::new(at)))
    }

    fn v6_err(at: usize) -> Result<(), ValidationResult> {
        Err(ValidationResult::IpV6AddressMalformed(Position::new(at)))
    }

    #[test]
    fn ipv4_literals() {
        assert_eq!(literal("127.0.0.1]"), Ok(()));
        assert_eq!(literal("255.255.255.255]"), Ok(()));
        assert_eq!(literal("256.0.0.1]"), v4_err(3));
        assert_eq!(literal("1.2.3]"), v4_err(5));
        assert_eq!(literal("1..3.4]"), v4_err(2));
        assert_eq!(
            literal("1.2.3.4.]"),
            Err(ValidationResult::IpAddressMalformed(Position::new(7)))
        );
    }

    #[test]
    fn ipv6_literals() {
        for ok in [
            "IPv6:0::1]",
            "IPv6:::]",
            "ipv6:::1]",
            "IPv6:2607:f0d0:1002:51::4]",
            "IPv6:fe80:0000:0000:0000:0202:b3ff:fe1e:8329]",
            "IPv6:aaaa:aaaa:aaaa:aaaa:aaaa:aaaa:127.0.0.1]",
            "IPv6:::ffff:192.0.2.1]",
            "IPv6:1:2:3:4:5:6:7::]",
        ] {
            assert_eq!(literal(ok), Ok(()), "{ok}");
        }
    }

    #[test]
    fn ipv6_errors() {
        // group too long, reported where it ends
        assert_eq!(literal("IPv6:123456]"), v6_err(11));
        // too few groups without elision
        assert_eq!(literal("IPv6:1:2:3]"), v6_err(10));
        // second elision
        assert_eq!(literal("IPv6:1::2::3]"), v6_err(9));
        // lone leading colon
        assert_eq!(literal("IPv6::1]"), v6_err(5));
        // dangling single colon
        assert_eq!(literal("IPv6:1:]"), v6_err(7));
        // ninth group
        assert_eq!(literal("IPv6:1:2:3:4:5:6:7:8:9]"), v6_err(21));
        // elided address with eight explicit groups
        assert_eq!(literal("IPv6:1:2:3:4::5:6:7:8]"), v6_err(20));
        // embedded dotted quad out of range
        assert_eq!(literal("IPv6:::ffff:1.2.3.300]"), v6_err(21));
        assert_eq!(literal("IPv6:1:2:3:4:5:6:7:1.2.3.4]"), v6_err(19));
    }

    #[test]
    fn ipv6_trailing_garbage_keeps_ipv6_kind() {
        // third colon after an elision
        assert_eq!(literal("IPv6:1:::2]"), v6_err(8));
        // non-hex after the last group
        assert_eq!(literal("IPv6:::1g]"), v6_err(8));
        assert_eq!(literal("IPv6:1:2:3:4:5:6:7:8g]"), v6_err(20));
        // IPv4 keeps the generic kind
        assert_eq!(
            literal("127.0.0.1x]"),
            Err(ValidationResult::IpAddressMalformed(Position::new(9)))
        );
    }

    #[test]
    fn unrecognised_or_unterminated() {
        assert_eq!(
            literal("]"),
            Err(ValidationResult::IpAddressMalformed(Position::new(0)))
        );
        assert_eq!(
            literal("abc]"),
            Err(ValidationResult::IpAddressMalformed(Position::new(0)))
        );
        assert_eq!(
            literal("127.0.0.1"),
            Err(ValidationResult::DomainMalformed(Position::new(9)))
        );
    }
}
