// Service contracts: dictionary store, affix rules, suggestion ranking
//
// The engine owns one instance of each service for its whole lifetime and
// reaches them only through these traits. Implementations live outside the
// engine crate.

use serde::Deserialize;

use crate::flags::{DEFAULT_FORBIDDEN_FLAG, Flag, FlagSet};
use crate::suggestions::SuggestionList;

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// A dictionary root with its affix flags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    /// The root as written in the dictionary.
    pub word: String,
    /// Affix and property flags of this homonym.
    pub flags: FlagSet,
    /// Optional morphological description ("po:noun ...").
    pub morph: Option<String>,
}

impl Entry {
    pub fn new(word: impl Into<String>, flags: FlagSet) -> Self {
        Self {
            word: word.into(),
            flags,
            morph: None,
        }
    }

    pub fn with_morph(mut self, morph: impl Into<String>) -> Self {
        self.morph = Some(morph.into());
        self
    }

    /// Shorthand for `self.flags.has(flag)`.
    pub fn has_flag(&self, flag: Option<Flag>) -> bool {
        self.flags.has(flag)
    }
}

// ---------------------------------------------------------------------------
// Dictionary
// ---------------------------------------------------------------------------

/// Affix template for a runtime dictionary insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffixTemplate<'a> {
    /// No affix flags.
    None,
    /// Explicit flags, one character per flag.
    Flags(&'a str),
    /// Copy the flags of an existing dictionary word.
    LikeWord(&'a str),
}

/// Errors of runtime dictionary insertion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DictionaryError {
    /// The word is empty.
    #[error("cannot insert an empty word")]
    EmptyWord,

    /// The model word of an `AffixTemplate::LikeWord` insertion is unknown.
    #[error("model word not in dictionary: {0}")]
    UnknownModel(String),

    /// The dictionary does not accept insertions.
    #[error("dictionary is read-only")]
    ReadOnly,
}

/// Dictionary store with homonym chains.
pub trait Dictionary: Send + Sync {
    /// All homonyms of `word`, in dictionary order. Empty if unknown.
    fn lookup(&self, word: &str) -> &[Entry];

    /// Insert a word at runtime.
    fn insert(&mut self, word: &str, template: AffixTemplate<'_>) -> Result<(), DictionaryError>;

    /// Iterate over every entry of the dictionary.
    fn entries(&self) -> Box<dyn Iterator<Item = &Entry> + '_>;
}

// ---------------------------------------------------------------------------
// Affix rules
// ---------------------------------------------------------------------------

/// Context of an affix stripping request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AffixMode {
    /// The word stands alone.
    #[default]
    Standalone,
    /// The word is the last part of a compound.
    CompoundEnd,
}

/// Parameters of a compound check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompoundQuery {
    /// Maximum number of parts.
    pub max_words: usize,
    /// Relax the minimum length of the final part (used when retrying a
    /// word whose trailing hyphen was stripped).
    pub moving_rule: bool,
}

impl Default for CompoundQuery {
    fn default() -> Self {
        Self {
            max_words: 100,
            moving_rule: false,
        }
    }
}

/// Affix and compound configuration, as read from an affix file.
///
/// Every field has a default, so a partial JSON or TOML document
/// deserializes into a working configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AffixSettings {
    /// Dictionary encoding name.
    pub encoding: String,
    /// Language id (`"hu_HU"`, `"de"`).
    pub lang: Option<String>,
    /// Words are stored reversed (right-to-left affixing languages).
    pub complex_prefixes: bool,
    /// Flag marking forbidden words.
    pub forbidden_word: Option<Flag>,
    /// Flag allowing a root inside compounds. Compounding is enabled when set.
    pub compound_flag: Option<Flag>,
    /// Minimum length of a compound part.
    pub compound_min: usize,
    /// Flag marking roots that are valid only with an affix.
    pub pseudo_root: Option<Flag>,
    /// Flag marking roots (and affixes) valid only inside compounds.
    pub only_in_compound: Option<Flag>,
    /// Flag marking roots valid only in their recorded casing.
    pub keep_case: Option<Flag>,
    /// Treat "ss" as equivalent to "ß" in all-caps words.
    pub check_sharps: bool,
    /// Break strings, tried in order.
    pub break_table: Vec<String>,
    /// Maximum number of n-gram suggestions; 0 disables the fallback.
    pub max_ngram_suggestions: usize,
    /// Append the input's trailing periods to suggestions.
    pub suggestions_with_dots: bool,
    /// Extra word characters reported to tokenizers.
    pub word_chars: Option<String>,
    /// Characters tried by the edit-based suggester, most frequent first.
    pub try_chars: String,
    /// Free-form dictionary version string.
    pub version: Option<String>,
}

impl Default for AffixSettings {
    fn default() -> Self {
        Self {
            encoding: "ISO8859-1".to_string(),
            lang: None,
            complex_prefixes: false,
            forbidden_word: Some(DEFAULT_FORBIDDEN_FLAG),
            compound_flag: None,
            compound_min: 3,
            pseudo_root: None,
            only_in_compound: None,
            keep_case: None,
            check_sharps: false,
            break_table: Vec::new(),
            max_ngram_suggestions: 4,
            suggestions_with_dots: false,
            word_chars: None,
            try_chars: String::new(),
            version: None,
        }
    }
}

impl AffixSettings {
    pub fn compounding_enabled(&self) -> bool {
        self.compound_flag.is_some()
    }
}

/// Affix rule engine.
pub trait AffixRules: Send + Sync {
    /// The configuration the rules were loaded with.
    fn settings(&self) -> &AffixSettings;

    /// Strip recognized prefixes and suffixes and resolve `word` to a root.
    fn affix_check(&self, dict: &dyn Dictionary, word: &str, mode: AffixMode) -> Option<Entry>;

    /// Resolve `word` as a concatenation of compound-eligible parts.
    /// Returns the entry of the last part.
    fn compound_check(
        &self,
        dict: &dyn Dictionary,
        word: &str,
        query: CompoundQuery,
    ) -> Option<Entry>;
}

// ---------------------------------------------------------------------------
// Suggestion ranking
// ---------------------------------------------------------------------------

/// What a suggestion engine may ask the spelling engine.
pub trait Lexicon {
    /// Decision call: the entry `word` resolves to, if it is valid as
    /// written (no case variants, no break splitting).
    fn check(&self, word: &str) -> Option<Entry>;

    fn dictionary(&self) -> Option<&dyn Dictionary>;

    fn settings(&self) -> &AffixSettings;
}

/// Suggestion ranking engine.
///
/// Every method receives a single cased variant of the input; the caller
/// handles capitalization, abbreviations and deduplication.
pub trait SuggestEngine: Send + Sync {
    /// Add edit-based candidates for `word` to `out`.
    fn suggest(&self, lexicon: &dyn Lexicon, word: &str, out: &mut SuggestionList);

    /// Add up to `max` similarity-ranked candidates for `word` to `out`.
    fn ngram_suggest(&self, lexicon: &dyn Lexicon, word: &str, out: &mut SuggestionList, max: usize);

    /// Add safe automatic replacements for `word` to `out`.
    fn suggest_auto(&self, _lexicon: &dyn Lexicon, _word: &str, _out: &mut SuggestionList) {}

    /// Roots `word` can be derived from.
    fn suggest_stems(&self, lexicon: &dyn Lexicon, word: &str) -> Vec<String>;

    /// Morphological description of `word`, one analysis per line.
    fn suggest_morph(&self, lexicon: &dyn Lexicon, word: &str) -> Option<String>;

    /// Roots of `word` paired with their part of speech. A result starting
    /// with `#` is a placeholder stem; the caller may retry a lower-cased
    /// form.
    fn suggest_pos_stems(&self, _lexicon: &dyn Lexicon, _word: &str) -> Vec<String> {
        Vec::new()
    }

    /// Morphological description of the best correction of a misspelled
    /// `word`.
    fn suggest_morph_for_spelling_error(&self, lexicon: &dyn Lexicon, word: &str) -> Option<String> {
        let mut best = SuggestionList::new(1);
        self.suggest(lexicon, word, &mut best);
        let first = best.get(0)?.to_string();
        self.suggest_morph(lexicon, &first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_defaults() {
        let s = AffixSettings::default();
        assert_eq!(s.encoding, "ISO8859-1");
        assert_eq!(s.forbidden_word, Some(65510));
        assert_eq!(s.max_ngram_suggestions, 4);
        assert!(!s.compounding_enabled());
    }

    #[test]
    fn settings_from_partial_json() {
        let s: AffixSettings = serde_json::from_str(
            r#"{"encoding": "UTF-8", "lang": "hu_HU", "compound_flag": 88, "break_table": ["-"]}"#,
        )
        .unwrap();
        assert_eq!(s.encoding, "UTF-8");
        assert_eq!(s.lang.as_deref(), Some("hu_HU"));
        assert!(s.compounding_enabled());
        assert_eq!(s.break_table, vec!["-"]);
        // untouched fields keep their defaults
        assert_eq!(s.compound_min, 3);
        assert_eq!(s.forbidden_word, Some(65510));
    }

    #[test]
    fn entry_flag_test() {
        let e = Entry::new("word", FlagSet::from_chars("K")).with_morph("po:noun");
        assert!(e.has_flag(Some(u16::from(b'K'))));
        assert!(!e.has_flag(None));
        assert_eq!(e.morph.as_deref(), Some("po:noun"));
    }

    #[test]
    fn compound_query_defaults() {
        let q = CompoundQuery::default();
        assert_eq!(q.max_words, 100);
        assert!(!q.moving_rule);
    }
}
