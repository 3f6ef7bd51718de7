// Word buffers and the input normalizer

use std::fmt;

use crate::case::{CapType, classify};
use crate::encoding::{Codec, EncodingError, MAX_WORD_LEN};

/// Reasons an input word is refused before any lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WordError {
    /// The encoded input reaches the byte limit of the encoding.
    #[error("word is {len} bytes long, the limit is {max}")]
    TooLong { len: usize, max: usize },

    /// The decoded input reaches the character limit.
    #[error("word has {chars} characters, the limit is {max}")]
    TooManyChars { chars: usize, max: usize },

    /// The input cannot be represented in the dictionary encoding.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// An owned word together with its length in the dictionary encoding.
///
/// The byte length is recomputed on every mutation, so it always matches
/// the characters held.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WordBuf {
    chars: Vec<char>,
    byte_len: usize,
}

impl WordBuf {
    /// Wrap characters that are representable in `codec`.
    pub fn new(chars: Vec<char>, codec: &dyn Codec) -> Self {
        let byte_len = chars.iter().map(|&c| codec.char_width(c)).sum();
        Self { chars, byte_len }
    }

    /// Build a buffer from text that is representable in `codec`.
    pub fn from_text(text: &str, codec: &dyn Codec) -> Self {
        Self::new(text.chars().collect(), codec)
    }

    /// The characters of the word.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Length in bytes of the dictionary encoding.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Append text (representable in `codec`) to the word.
    pub fn push_str(&mut self, text: &str, codec: &dyn Codec) {
        for c in text.chars() {
            self.byte_len += codec.char_width(c);
            self.chars.push(c);
        }
    }

    /// Copy of the word with `suffix` appended.
    pub fn with_suffix(&self, suffix: &str, codec: &dyn Codec) -> WordBuf {
        let mut word = self.clone();
        word.push_str(suffix, codec);
        word
    }

    pub(crate) fn map_chars(&mut self, codec: &dyn Codec, f: impl Fn(char) -> char) -> usize {
        for c in self.chars.iter_mut() {
            *c = f(*c);
        }
        self.recount(codec)
    }

    pub(crate) fn map_first(&mut self, codec: &dyn Codec, f: impl Fn(char) -> char) -> usize {
        if let Some(first) = self.chars.first_mut() {
            *first = f(*first);
        }
        self.recount(codec)
    }

    fn recount(&mut self, codec: &dyn Codec) -> usize {
        self.byte_len = self.chars.iter().map(|&c| codec.char_width(c)).sum();
        self.byte_len
    }
}

impl fmt::Display for WordBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| fmt::Write::write_char(f, *c))
    }
}

/// A normalized input word.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CleanWord {
    /// The word without leading blanks and trailing periods.
    pub word: WordBuf,
    /// Capitalization class of `word`.
    pub captype: CapType,
    /// Number of trailing periods that were stripped.
    pub abbreviation: usize,
}

impl CleanWord {
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

/// Normalize an input word.
///
/// Leading spaces (only U+0020) are skipped and trailing periods are
/// stripped and counted. A word consisting only of periods and blanks
/// yields an empty `NoCap` word. Inputs whose encoded length reaches the
/// codec limit, or (in wide mode) whose character count reaches
/// [`MAX_WORD_LEN`], are refused.
pub fn clean_word(input: &str, codec: &dyn Codec) -> Result<CleanWord, WordError> {
    let len = codec.encoded_len(input)?;
    if len >= codec.max_bytes() {
        return Err(WordError::TooLong {
            len,
            max: codec.max_bytes(),
        });
    }

    let trimmed = input.trim_start_matches(' ');
    let body = trimmed.trim_end_matches('.');
    let abbreviation = trimmed.len() - body.len();

    if body.is_empty() {
        return Ok(CleanWord {
            abbreviation,
            ..CleanWord::default()
        });
    }

    if codec.is_wide() {
        let chars = trimmed.chars().count();
        if chars >= MAX_WORD_LEN {
            return Err(WordError::TooManyChars {
                chars,
                max: MAX_WORD_LEN,
            });
        }
    }

    let chars: Vec<char> = body.chars().collect();
    let captype = classify(&chars, codec);
    Ok(CleanWord {
        word: WordBuf::new(chars, codec),
        captype,
        abbreviation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{CodePage, MAX_WORD_UTF8_LEN, Utf8Codec};

    #[test]
    fn strips_leading_spaces_and_trailing_periods() {
        let cw = clean_word("  Dr.", &Utf8Codec).unwrap();
        assert_eq!(cw.word.to_string(), "Dr");
        assert_eq!(cw.abbreviation, 1);
        assert_eq!(cw.captype, CapType::InitCap);
        assert_eq!(cw.word.len(), 2);
    }

    #[test]
    fn only_spaces_are_skipped() {
        let cw = clean_word("\tword", &Utf8Codec).unwrap();
        assert_eq!(cw.word.to_string(), "\tword");
    }

    #[test]
    fn counts_multiple_periods() {
        let cw = clean_word("etc...", &Utf8Codec).unwrap();
        assert_eq!(cw.word.to_string(), "etc");
        assert_eq!(cw.abbreviation, 3);
    }

    #[test]
    fn periods_only_yield_empty_word() {
        for input in ["...", " .", ""] {
            let cw = clean_word(input, &Utf8Codec).unwrap();
            assert!(cw.is_empty(), "{input:?}");
            assert_eq!(cw.captype, CapType::NoCap);
        }
        assert_eq!(clean_word("...", &Utf8Codec).unwrap().abbreviation, 3);
    }

    #[test]
    fn inner_periods_are_kept() {
        let cw = clean_word("e.g.", &Utf8Codec).unwrap();
        assert_eq!(cw.word.to_string(), "e.g");
        assert_eq!(cw.abbreviation, 1);
    }

    #[test]
    fn byte_length_limit_depends_on_encoding() {
        let latin1 = CodePage::iso8859_1();
        let long = "a".repeat(MAX_WORD_LEN);
        assert!(matches!(
            clean_word(&long, &latin1),
            Err(WordError::TooLong { len: 100, max: 100 })
        ));
        assert!(clean_word(&"a".repeat(MAX_WORD_LEN - 1), &latin1).is_ok());

        let wide = "\u{00E9}".repeat(MAX_WORD_UTF8_LEN / 2);
        assert!(matches!(clean_word(&wide, &Utf8Codec), Err(WordError::TooLong { .. })));
    }

    #[test]
    fn wide_mode_character_limit() {
        // Under the byte limit but at the character limit.
        let long = "a".repeat(MAX_WORD_LEN);
        assert!(matches!(
            clean_word(&long, &Utf8Codec),
            Err(WordError::TooManyChars { chars: 100, max: 100 })
        ));
    }

    #[test]
    fn unrepresentable_input_is_refused() {
        let latin1 = CodePage::iso8859_1();
        assert!(matches!(
            clean_word("\u{0151}", &latin1),
            Err(WordError::Encoding(_))
        ));
    }

    #[test]
    fn byte_length_of_clean_word() {
        let cw = clean_word("\u{00E9}t\u{00E9}.", &Utf8Codec).unwrap();
        assert_eq!(cw.word.byte_len(), 5);
        let cw = clean_word("\u{00E9}t\u{00E9}.", &CodePage::iso8859_1()).unwrap();
        assert_eq!(cw.word.byte_len(), 3);
    }

    #[test]
    fn with_suffix_appends() {
        let w = WordBuf::from_text("Dr", &Utf8Codec);
        let dotted = w.with_suffix(".", &Utf8Codec);
        assert_eq!(dotted.to_string(), "Dr.");
        assert_eq!(dotted.byte_len(), 3);
        assert_eq!(w.to_string(), "Dr");
    }
}
