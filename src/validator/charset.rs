//! Character classes of RFC 5322 / RFC 5321, evaluated per grapheme cluster.

use phf::phf_set;
use unicode_normalization::char::is_combining_mark;

/// `atext` specials besides letters and digits.
static ATEXT_SPECIALS: phf::Set<char> = phf_set! {
    '!', '#', '$', '%', '&', '\'', '*', '+', '-', '/', '=', '?', '^', '_', '`', '{', '|', '}', '~',
};

/// The single scalar of a one-scalar ASCII cluster.
fn single_ascii(cluster: &str) -> Option<char> {
    let mut chars = cluster.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Some(c),
        _ => None,
    }
}

pub(crate) fn is_ascii_digit(cluster: &str) -> bool {
    single_ascii(cluster).is_some_and(|c| c.is_ascii_digit())
}

pub(crate) fn is_hex_digit(cluster: &str) -> bool {
    single_ascii(cluster).is_some_and(|c| c.is_ascii_hexdigit())
}

pub(crate) fn is_atext_special(cluster: &str) -> bool {
    single_ascii(cluster).is_some_and(|c| ATEXT_SPECIALS.contains(&c))
}

/// A non-ASCII letter or digit, possibly followed by combining marks
/// (Devanagari vowel signs, viramas...).
pub(crate) fn is_international_alphanumeric(cluster: &str) -> bool {
    let mut chars = cluster.chars();
    match chars.next() {
        Some(first) if !cluster.is_ascii() && first.is_alphanumeric() => {
            chars.all(|c| c.is_alphanumeric() || is_combining_mark(c))
        }
        _ => false,
    }
}

fn is_alphanumeric(cluster: &str, international: bool) -> bool {
    single_ascii(cluster).is_some_and(|c| c.is_ascii_alphanumeric())
        || (international && is_international_alphanumeric(cluster))
}

/// Dot-atom character of the local part.
pub(crate) fn is_atext(cluster: &str, international: bool) -> bool {
    is_alphanumeric(cluster, international) || is_atext_special(cluster)
}

/// Character allowed inside a domain label (hyphen placement is checked by the caller).
pub(crate) fn is_label_char(cluster: &str, international: bool) -> bool {
    is_alphanumeric(cluster, international) || cluster == "-"
}

/// Unescaped character allowed between the quotes of a quoted local part:
/// printable ASCII and space, minus `"` and `\`.
pub(crate) fn is_qtext(cluster: &str, international: bool) -> bool {
    match single_ascii(cluster) {
        Some(c) => matches!(c, ' '..='~') && c != '"' && c != '\\',
        None => international && is_international_alphanumeric(cluster),
    }
}
