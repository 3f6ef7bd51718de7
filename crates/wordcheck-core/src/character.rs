// Character-level case mapping helpers
//
// These are the simple (one-to-one) Unicode case mappings the codecs build
// their case tables from. A character whose upper- or lowercase form expands
// to several characters ("ß" -> "SS") maps to itself, unless UnicodeData
// gives it a separate simple mapping.

/// Simple mappings that differ from the single-character form of the full
/// mapping: the full form expands, the simple one does not.
fn simple_lower_exception(c: char) -> Option<char> {
    match c {
        '\u{0130}' => Some('i'),
        _ => None,
    }
}

fn simple_upper_exception(c: char) -> Option<char> {
    match c {
        // Greek with ypogegrammeni: lowercase to titlecase form
        '\u{1F80}'..='\u{1F87}' | '\u{1F90}'..='\u{1F97}' | '\u{1FA0}'..='\u{1FA7}' => {
            char::from_u32(c as u32 + 8)
        }
        '\u{1FB3}' => Some('\u{1FBC}'),
        '\u{1FC3}' => Some('\u{1FCC}'),
        '\u{1FF3}' => Some('\u{1FFC}'),
        _ => None,
    }
}

/// Take the single character an iterator yields, or `None` if it yields
/// zero or more than one.
fn single(mut iter: impl Iterator<Item = char>) -> Option<char> {
    let first = iter.next()?;
    match iter.next() {
        Some(_) => None,
        None => Some(first),
    }
}

/// Convert a character to its simple lowercase equivalent.
///
/// Characters without a one-to-one lowercase mapping are returned unchanged.
pub fn simple_lower(c: char) -> char {
    simple_lower_exception(c)
        .or_else(|| single(c.to_lowercase()))
        .unwrap_or(c)
}

/// Convert a character to its simple uppercase equivalent.
///
/// Characters without a one-to-one uppercase mapping are returned unchanged,
/// so `'ß'` stays `'ß'`.
pub fn simple_upper(c: char) -> char {
    simple_upper_exception(c)
        .or_else(|| single(c.to_uppercase()))
        .unwrap_or(c)
}

/// ASCII digit test used by the number rules.
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Reverse the character order of a string.
pub fn reverse(word: &str) -> String {
    word.chars().rev().collect()
}
