// Dictionary encodings: decode/encode boundary and per-character case tables
//
// Every word is handled internally as a sequence of `char`s. A `Codec`
// converts between that form and the dictionary's byte encoding, reports
// encoded widths for the length bounds, and supplies the case metadata the
// capitalization classifier and case transforms run on. Single-byte code
// pages and UTF-8 differ only here.

use std::collections::HashMap;
use std::fmt;

use crate::character::{simple_lower, simple_upper};

/// Maximum word length in characters (and in bytes for single-byte
/// encodings). Words reaching this length are rejected.
pub const MAX_WORD_LEN: usize = 100;

/// Maximum word length in bytes for UTF-8 dictionaries.
pub const MAX_WORD_UTF8_LEN: usize = MAX_WORD_LEN * 4;

/// Errors raised at the encoding boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// The encoding name is not recognized.
    #[error("unknown encoding: {0}")]
    Unknown(String),

    /// The input bytes are not valid in the encoding.
    #[error("invalid byte sequence for {encoding}")]
    InvalidInput { encoding: String },

    /// A character has no byte representation in the encoding.
    #[error("character {character:?} is not representable in {encoding}")]
    Unrepresentable { character: char, encoding: String },
}

/// Case metadata of one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaseInfo {
    /// Uppercase partner (the character itself if it has none).
    pub upper: char,
    /// Lowercase partner (the character itself if it has none).
    pub lower: char,
    /// Whether the character is a capital letter.
    pub capital: bool,
}

impl CaseInfo {
    /// A character without any case relation.
    pub fn neutral(c: char) -> Self {
        Self {
            upper: c,
            lower: c,
            capital: false,
        }
    }

    fn from_partners(c: char, upper: char, lower: char) -> Self {
        Self {
            upper,
            lower,
            capital: lower != c,
        }
    }

    /// Neutral characters (digits, punctuation, uncased letters) have the
    /// same upper- and lowercase form.
    pub fn is_neutral(&self) -> bool {
        self.upper == self.lower
    }
}

/// Conversion between the dictionary encoding and `char`s.
pub trait Codec: fmt::Debug + Send + Sync {
    /// Canonical encoding name, as reported to callers.
    fn name(&self) -> &str;

    /// `true` for the wide (UTF-8) mode, `false` for single-byte code pages.
    fn is_wide(&self) -> bool;

    /// Encoded length at which an input word is rejected.
    fn max_bytes(&self) -> usize;

    /// Decode bytes in this encoding.
    fn decode(&self, bytes: &[u8]) -> Result<String, EncodingError>;

    /// Encode text into this encoding.
    fn encode(&self, text: &str) -> Result<Vec<u8>, EncodingError>;

    /// Encoded width of a character that is known to be representable.
    fn char_width(&self, c: char) -> usize;

    /// Case metadata for a character.
    fn case_info(&self, c: char) -> CaseInfo;

    /// Encoded length of `text`, failing on unrepresentable characters.
    fn encoded_len(&self, text: &str) -> Result<usize, EncodingError> {
        self.encode(text).map(|bytes| bytes.len())
    }
}

// ---------------------------------------------------------------------------
// UTF-8
// ---------------------------------------------------------------------------

/// UTF-8 codec. Case folding is limited to 16-bit code units: a character
/// has a case relation only if both it and its partner lie in the Basic
/// Multilingual Plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Codec;

fn in_bmp(c: char) -> bool {
    (c as u32) <= 0xFFFF
}

impl Codec for Utf8Codec {
    fn name(&self) -> &str {
        "UTF-8"
    }

    fn is_wide(&self) -> bool {
        true
    }

    fn max_bytes(&self) -> usize {
        MAX_WORD_UTF8_LEN
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, EncodingError> {
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| EncodingError::InvalidInput {
                encoding: self.name().to_string(),
            })
    }

    fn encode(&self, text: &str) -> Result<Vec<u8>, EncodingError> {
        Ok(text.as_bytes().to_vec())
    }

    fn char_width(&self, c: char) -> usize {
        c.len_utf8()
    }

    fn case_info(&self, c: char) -> CaseInfo {
        if !in_bmp(c) {
            return CaseInfo::neutral(c);
        }
        let upper = Some(simple_upper(c)).filter(|&u| in_bmp(u)).unwrap_or(c);
        let lower = Some(simple_lower(c)).filter(|&l| in_bmp(l)).unwrap_or(c);
        CaseInfo::from_partners(c, upper, lower)
    }

    fn encoded_len(&self, text: &str) -> Result<usize, EncodingError> {
        Ok(text.len())
    }
}

// ---------------------------------------------------------------------------
// Single-byte code pages
// ---------------------------------------------------------------------------

/// A single-byte code page built from a byte -> character table.
///
/// A byte's case partners are the simple case mappings of its character,
/// restricted to characters the same code page can represent.
#[derive(Clone)]
pub struct CodePage {
    name: String,
    chars: [char; 256],
    bytes: HashMap<char, u8>,
    cases: [CaseInfo; 256],
}

impl fmt::Debug for CodePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodePage").field("name", &self.name).finish()
    }
}

/// Positions where ISO8859-15 differs from ISO8859-1.
const ISO8859_15_OVERRIDES: [(u8, char); 8] = [
    (0xA4, '\u{20AC}'), // EURO SIGN
    (0xA6, '\u{0160}'), // Š
    (0xA8, '\u{0161}'), // š
    (0xB4, '\u{017D}'), // Ž
    (0xB8, '\u{017E}'), // ž
    (0xBC, '\u{0152}'), // Œ
    (0xBD, '\u{0153}'), // œ
    (0xBE, '\u{0178}'), // Ÿ
];

impl CodePage {
    /// Build a code page from its byte -> character table.
    ///
    /// If a character appears at several positions the lowest byte is used
    /// when encoding.
    pub fn from_table(name: impl Into<String>, chars: [char; 256]) -> Self {
        let mut bytes = HashMap::with_capacity(256);
        for (b, &c) in chars.iter().enumerate() {
            bytes.entry(c).or_insert(b as u8);
        }
        let cases = std::array::from_fn(|b| {
            let c = chars[b];
            let upper = Some(simple_upper(c))
                .filter(|u| bytes.contains_key(u))
                .unwrap_or(c);
            let lower = Some(simple_lower(c))
                .filter(|l| bytes.contains_key(l))
                .unwrap_or(c);
            CaseInfo::from_partners(c, upper, lower)
        });
        Self {
            name: name.into(),
            chars,
            bytes,
            cases,
        }
    }

    /// ISO8859-1 (Latin-1): every byte is the code point of the same value.
    pub fn iso8859_1() -> Self {
        Self::from_table("ISO8859-1", std::array::from_fn(|b| char::from(b as u8)))
    }

    /// ISO8859-15 (Latin-9).
    pub fn iso8859_15() -> Self {
        let mut table: [char; 256] = std::array::from_fn(|b| char::from(b as u8));
        for (b, c) in ISO8859_15_OVERRIDES {
            table[b as usize] = c;
        }
        Self::from_table("ISO8859-15", table)
    }

    fn unrepresentable(&self, character: char) -> EncodingError {
        EncodingError::Unrepresentable {
            character,
            encoding: self.name.clone(),
        }
    }
}

impl Codec for CodePage {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_wide(&self) -> bool {
        false
    }

    fn max_bytes(&self) -> usize {
        MAX_WORD_LEN
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, EncodingError> {
        Ok(bytes.iter().map(|&b| self.chars[b as usize]).collect())
    }

    fn encode(&self, text: &str) -> Result<Vec<u8>, EncodingError> {
        text.chars()
            .map(|c| self.bytes.get(&c).copied().ok_or_else(|| self.unrepresentable(c)))
            .collect()
    }

    fn char_width(&self, _c: char) -> usize {
        1
    }

    fn case_info(&self, c: char) -> CaseInfo {
        match self.bytes.get(&c) {
            Some(&b) => self.cases[b as usize],
            None => CaseInfo::neutral(c),
        }
    }

    fn encoded_len(&self, text: &str) -> Result<usize, EncodingError> {
        let mut len = 0;
        for c in text.chars() {
            if !self.bytes.contains_key(&c) {
                return Err(self.unrepresentable(c));
            }
            len += 1;
        }
        Ok(len)
    }
}

/// Resolve an encoding name to a codec.
///
/// Names are matched case-insensitively with `-` and `_` ignored, so
/// `"UTF-8"`, `"utf8"` and `"ISO-8859-15"` are all accepted.
pub fn codec_for(name: &str) -> Result<Box<dyn Codec>, EncodingError> {
    let key: String = name
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .map(|c| c.to_ascii_uppercase())
        .collect();
    match key.as_str() {
        "UTF8" => Ok(Box::new(Utf8Codec)),
        "ISO88591" | "LATIN1" => Ok(Box::new(CodePage::iso8859_1())),
        "ISO885915" | "LATIN9" => Ok(Box::new(CodePage::iso8859_15())),
        _ => Err(EncodingError::Unknown(name.to_string())),
    }
}
