// Capitalization classes and case transforms

use crate::encoding::Codec;
use crate::word::WordBuf;

/// Capitalization pattern of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CapType {
    /// No capital letters: "hello".
    #[default]
    NoCap,
    /// Exactly one capital letter, in first position: "Hello".
    InitCap,
    /// Every cased letter is capital: "HELLO", "MP3".
    AllCap,
    /// Several capitals, the first letter not among them: "hELLO".
    HuhCap,
    /// Several capitals including the first letter: "HEllo".
    HuhInitCap,
}

/// Classify the capitalization of a word.
///
/// Only the codec's case metadata is consulted: a character counts as a
/// capital if it has a distinct lowercase partner, and as neutral if its
/// upper- and lowercase forms coincide. The rules apply in order:
///
/// 1. no capitals -> `NoCap`
/// 2. one capital and it is the first character -> `InitCap`
/// 3. capitals (plus neutral characters) make up the whole word -> `AllCap`
/// 4. several capitals, first one capital -> `HuhInitCap`
/// 5. otherwise -> `HuhCap`
pub fn classify(word: &[char], codec: &dyn Codec) -> CapType {
    let mut ncap = 0;
    let mut nneutral = 0;
    for &c in word {
        let info = codec.case_info(c);
        if info.capital {
            ncap += 1;
        }
        if info.is_neutral() {
            nneutral += 1;
        }
    }
    if ncap == 0 {
        return CapType::NoCap;
    }
    let first_cap = codec.case_info(word[0]).capital;
    let nc = word.len();

    if ncap == 1 && first_cap {
        CapType::InitCap
    } else if ncap == nc || ncap + nneutral == nc {
        CapType::AllCap
    } else if ncap > 1 && first_cap {
        CapType::HuhInitCap
    } else {
        CapType::HuhCap
    }
}

/// Uppercase every character. Returns the new byte length.
pub fn to_all_upper(word: &mut WordBuf, codec: &dyn Codec) -> usize {
    word.map_chars(codec, |c| codec.case_info(c).upper)
}

/// Lowercase every character. Returns the new byte length.
pub fn to_all_lower(word: &mut WordBuf, codec: &dyn Codec) -> usize {
    word.map_chars(codec, |c| codec.case_info(c).lower)
}

/// Uppercase the first character only. Returns the new byte length.
pub fn to_init_cap(word: &mut WordBuf, codec: &dyn Codec) -> usize {
    word.map_first(codec, |c| codec.case_info(c).upper)
}

/// Lowercase the first character only. Returns the new byte length.
pub fn to_init_lower(word: &mut WordBuf, codec: &dyn Codec) -> usize {
    word.map_first(codec, |c| codec.case_info(c).lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{CodePage, Utf8Codec};

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn classify_utf8(s: &str) -> CapType {
        classify(&chars(s), &Utf8Codec)
    }

    // -- classify --

    #[test]
    fn classify_basic_patterns() {
        assert_eq!(classify_utf8("hello"), CapType::NoCap);
        assert_eq!(classify_utf8("Hello"), CapType::InitCap);
        assert_eq!(classify_utf8("HELLO"), CapType::AllCap);
        assert_eq!(classify_utf8("hELLO"), CapType::HuhCap);
        assert_eq!(classify_utf8("HEllo"), CapType::HuhInitCap);
    }

    #[test]
    fn neutral_characters_count_towards_all_cap() {
        assert_eq!(classify_utf8("MP3"), CapType::AllCap);
        assert_eq!(classify_utf8("1A"), CapType::AllCap);
        assert_eq!(classify_utf8("A-B"), CapType::AllCap);
    }

    #[test]
    fn single_leading_capital_wins_over_all_cap() {
        // One capital in first position is InitCap even if the rest is neutral.
        assert_eq!(classify_utf8("A1"), CapType::InitCap);
        assert_eq!(classify_utf8("A"), CapType::InitCap);
    }

    #[test]
    fn digits_only_is_no_cap() {
        assert_eq!(classify_utf8("123"), CapType::NoCap);
        assert_eq!(classify_utf8("-"), CapType::NoCap);
    }

    #[test]
    fn mixed_with_one_inner_capital_is_huh_cap() {
        assert_eq!(classify_utf8("iPod"), CapType::HuhCap);
        assert_eq!(classify_utf8("OpenOffice"), CapType::HuhInitCap);
    }

    #[test]
    fn classify_agrees_across_codecs() {
        let latin1 = CodePage::iso8859_1();
        for w in ["\u{00C9}t\u{00E9}", "\u{00C9}T\u{00C9}", "\u{00E9}T\u{00C9}", "stra\u{00DF}e"] {
            assert_eq!(classify(&chars(w), &latin1), classify_utf8(w), "{w}");
        }
    }

    // -- transforms --

    #[test]
    fn transforms_in_wide_mode() {
        let mut w = WordBuf::from_text("\u{00E9}t\u{00E9}", &Utf8Codec);
        assert_eq!(to_all_upper(&mut w, &Utf8Codec), 5);
        assert_eq!(w.to_string(), "\u{00C9}T\u{00C9}");
        assert_eq!(to_init_lower(&mut w, &Utf8Codec), 5);
        assert_eq!(w.to_string(), "\u{00E9}T\u{00C9}");
        assert_eq!(to_all_lower(&mut w, &Utf8Codec), 5);
        assert_eq!(w.to_string(), "\u{00E9}t\u{00E9}");
        assert_eq!(to_init_cap(&mut w, &Utf8Codec), 5);
        assert_eq!(w.to_string(), "\u{00C9}t\u{00E9}");
    }

    #[test]
    fn transforms_in_byte_mode() {
        let cp = CodePage::iso8859_1();
        let mut w = WordBuf::from_text("\u{00E9}t\u{00E9}", &cp);
        assert_eq!(w.byte_len(), 3);
        assert_eq!(to_all_upper(&mut w, &cp), 3);
        assert_eq!(w.to_string(), "\u{00C9}T\u{00C9}");
    }

    #[test]
    fn byte_length_tracks_width_changes() {
        // U+0131 (dotless i, 2 bytes) uppercases to 'I' (1 byte).
        let mut w = WordBuf::from_text("\u{0131}k", &Utf8Codec);
        assert_eq!(w.byte_len(), 3);
        assert_eq!(to_all_upper(&mut w, &Utf8Codec), 2);
        assert_eq!(w.to_string(), "IK");
    }

    #[test]
    fn init_transforms_on_empty_word() {
        let mut w = WordBuf::from_text("", &Utf8Codec);
        assert_eq!(to_init_cap(&mut w, &Utf8Codec), 0);
        assert_eq!(to_init_lower(&mut w, &Utf8Codec), 0);
        assert!(w.is_empty());
    }

    #[test]
    fn lower_of_upper_equals_lower() {
        for s in ["hello", "HeLLo", "\u{00E4}\u{00F6}\u{00FC}", "Stra\u{00DF}e"] {
            let mut a = WordBuf::from_text(s, &Utf8Codec);
            to_all_upper(&mut a, &Utf8Codec);
            to_all_lower(&mut a, &Utf8Codec);
            let mut b = WordBuf::from_text(s, &Utf8Codec);
            to_all_lower(&mut b, &Utf8Codec);
            assert_eq!(a, b, "{s}");
        }
    }

    #[test]
    fn dotted_capital_i_is_a_capital() {
        assert_eq!(classify_utf8("\u{0130}stanbul"), CapType::InitCap);
        let mut w = WordBuf::from_text("\u{0130}stanbul", &Utf8Codec);
        assert_eq!(to_all_lower(&mut w, &Utf8Codec), 8);
        assert_eq!(w.to_string(), "istanbul");
    }
}
