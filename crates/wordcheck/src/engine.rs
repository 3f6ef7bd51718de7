// SpellEngine: owns the three services and runs the decision engine.
//
// The engine holds the dictionary store, the affix rule engine and the
// suggestion engine for its whole lifetime, together with the codec and
// locale policy derived from the affix settings. Spelling, suggestion and
// analysis entry points live in their own modules as further `impl` blocks.
//
// The engine keeps no state between calls: every decision call returns a
// fresh `Lookup`.

use tracing::debug;
use wordcheck_core::case::{to_all_lower, to_all_upper, to_init_cap};
use wordcheck_core::character::reverse;
use wordcheck_core::encoding::{Codec, EncodingError, codec_for};
use wordcheck_core::services::{
    AffixMode, AffixRules, AffixSettings, AffixTemplate, CompoundQuery, Dictionary,
    DictionaryError, Entry, Lexicon, SuggestEngine,
};
use wordcheck_core::word::WordBuf;

use crate::locale::{LocalePolicy, policy_for};
use crate::lookup::{Forbidden, Lookup};

/// Default capacity of a suggestion list.
pub const MAX_SUGGESTIONS: usize = 15;

/// Error type for engine construction and dictionary insertion.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The configured encoding is unknown, or a word cannot be encoded.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The dictionary refused an insertion.
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    /// The engine was built without a dictionary.
    #[error("no dictionary loaded")]
    NoDictionary,
}

/// The services an engine is built from. Each one is optional; operations
/// that need a missing service return their empty result.
#[derive(Default)]
pub struct Services {
    pub dictionary: Option<Box<dyn Dictionary>>,
    pub affixes: Option<Box<dyn AffixRules>>,
    pub suggester: Option<Box<dyn SuggestEngine>>,
}

impl Services {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dictionary(mut self, dictionary: impl Dictionary + 'static) -> Self {
        self.dictionary = Some(Box::new(dictionary));
        self
    }

    pub fn with_affixes(mut self, affixes: impl AffixRules + 'static) -> Self {
        self.affixes = Some(Box::new(affixes));
        self
    }

    pub fn with_suggester(mut self, suggester: impl SuggestEngine + 'static) -> Self {
        self.suggester = Some(Box::new(suggester));
        self
    }
}

/// Spell checking, suggestion and analysis engine for single words.
pub struct SpellEngine {
    pub(crate) dictionary: Option<Box<dyn Dictionary>>,
    pub(crate) affixes: Option<Box<dyn AffixRules>>,
    pub(crate) suggester: Option<Box<dyn SuggestEngine>>,

    /// Copy of the affix settings (defaults when no affix rules are loaded).
    pub(crate) settings: AffixSettings,

    /// Codec for the dictionary encoding.
    pub(crate) codec: Box<dyn Codec>,

    /// Language-specific rules, selected from the settings' language id.
    pub(crate) policy: Option<Box<dyn LocalePolicy>>,

    /// Capacity of suggestion lists.
    pub(crate) max_suggestions: usize,
}

impl SpellEngine {
    /// Build an engine from its services.
    ///
    /// The codec is chosen from the affix settings' encoding name and the
    /// locale policy from their language id.
    pub fn new(services: Services) -> Result<Self, EngineError> {
        let settings = services
            .affixes
            .as_ref()
            .map(|a| a.settings().clone())
            .unwrap_or_default();
        let codec = codec_for(&settings.encoding)?;
        let policy = settings.lang.as_deref().and_then(policy_for);
        debug!(
            encoding = codec.name(),
            lang = settings.lang.as_deref().unwrap_or(""),
            policy = policy.as_ref().map(|p| p.id()).unwrap_or("none"),
            "engine created"
        );

        Ok(Self {
            dictionary: services.dictionary,
            affixes: services.affixes,
            suggester: services.suggester,
            settings,
            codec,
            policy,
            max_suggestions: MAX_SUGGESTIONS,
        })
    }

    // =========================================================================
    // Options
    // =========================================================================

    /// Set the maximum number of suggestions returned by `suggest`.
    pub fn set_max_suggestions(&mut self, max: usize) {
        self.max_suggestions = max;
    }

    /// Replace the locale policy, or disable language-specific rules with
    /// `None`.
    pub fn set_locale_policy(&mut self, policy: Option<Box<dyn LocalePolicy>>) {
        self.policy = policy;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Canonical name of the dictionary encoding.
    pub fn dictionary_encoding(&self) -> &str {
        self.codec.name()
    }

    /// Extra word characters declared by the affix settings.
    pub fn word_chars(&self) -> Option<&str> {
        self.settings.word_chars.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.settings.version.as_deref()
    }

    pub fn settings(&self) -> &AffixSettings {
        &self.settings
    }

    pub fn codec(&self) -> &dyn Codec {
        self.codec.as_ref()
    }

    pub fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }

    pub fn locale_policy(&self) -> Option<&dyn LocalePolicy> {
        self.policy.as_deref()
    }

    // =========================================================================
    // Dictionary insertion
    // =========================================================================

    /// Add a word without affix flags.
    pub fn add_word(&mut self, word: &str) -> Result<(), EngineError> {
        self.insert_word(word, AffixTemplate::None)
    }

    /// Add a word with explicit affix flags (one character per flag).
    pub fn add_word_with_flags(&mut self, word: &str, flags: &str) -> Result<(), EngineError> {
        self.insert_word(word, AffixTemplate::Flags(flags))
    }

    /// Add a word inflecting like an existing dictionary word.
    pub fn add_word_like(&mut self, word: &str, model: &str) -> Result<(), EngineError> {
        self.insert_word(word, AffixTemplate::LikeWord(model))
    }

    fn insert_word(&mut self, word: &str, template: AffixTemplate<'_>) -> Result<(), EngineError> {
        self.codec.encode(word)?;
        let complex = self.settings.complex_prefixes;
        let dict = self
            .dictionary
            .as_deref_mut()
            .ok_or(EngineError::NoDictionary)?;

        // Dictionaries of complex-prefix languages store words reversed.
        if complex {
            let stored = reverse(word);
            match template {
                AffixTemplate::LikeWord(model) => {
                    let model = reverse(model);
                    dict.insert(&stored, AffixTemplate::LikeWord(&model))?;
                }
                other => dict.insert(&stored, other)?,
            }
        } else {
            dict.insert(word, template)?;
        }
        debug!(word, "word added");
        Ok(())
    }

    // =========================================================================
    // Decision engine
    // =========================================================================

    /// Decide whether `word` is valid exactly as written.
    ///
    /// Consults the dictionary first (forbidden entries end the search,
    /// pseudo-roots and compound-only homonyms are skipped), then affix
    /// stripping, then compounding. Case variants, abbreviations and break
    /// points are handled by [`spell`](Self::spell), not here.
    pub fn check(&self, word: &str) -> Lookup {
        let mut lookup = Lookup::default();
        if self.settings.complex_prefixes {
            let reversed = reverse(word);
            lookup.entry = self.resolve(&reversed, &mut lookup);
            lookup.root = lookup.root.as_deref().map(reverse);
        } else {
            lookup.entry = self.resolve(word, &mut lookup);
        }
        lookup
    }

    fn resolve(&self, word: &str, lookup: &mut Lookup) -> Option<Entry> {
        let s = &self.settings;
        let dict = self.dictionary.as_deref()?;

        let homonyms = dict.lookup(word);
        if let Some(head) = homonyms.first() {
            if head.has_flag(s.forbidden_word) {
                lookup.forbidden = match &self.policy {
                    Some(policy) => policy.classify_forbidden(head, s),
                    None => Forbidden::Word,
                };
                debug!(word, forbidden = ?lookup.forbidden, "forbidden entry");
                return None;
            }
        }
        if let Some(entry) = homonyms
            .iter()
            .find(|e| !e.has_flag(s.pseudo_root) && !e.has_flag(s.only_in_compound))
        {
            return Some(entry.clone());
        }

        let affixes = self.affixes.as_deref()?;
        let stripped = affixes
            .affix_check(dict, word, AffixMode::Standalone)
            .filter(|e| !e.has_flag(s.only_in_compound));
        if let Some(root) = stripped {
            if root.has_flag(s.forbidden_word) {
                lookup.forbidden = Forbidden::Word;
                debug!(word, root = %root.word, "forbidden root");
                return None;
            }
            lookup.root = Some(root.word.clone());
            return Some(root);
        }

        if !s.compounding_enabled() {
            return None;
        }
        let mut found = affixes.compound_check(dict, word, CompoundQuery::default());
        if found.is_none() {
            if let Some((retry, query)) = self.policy.as_ref().and_then(|p| p.compound_retry(word)) {
                found = affixes.compound_check(dict, retry, query);
            }
        }
        if let Some(entry) = &found {
            debug!(word, root = %entry.word, "compound");
            lookup.root = Some(entry.word.clone());
            lookup.compound = true;
        }
        found
    }

    /// Decision call that records its context in `last`.
    pub(crate) fn decide(&self, word: &str, last: &mut Lookup) -> Option<Entry> {
        *last = self.check(word);
        last.entry.clone()
    }

    pub(crate) fn is_keep_case(&self, entry: &Entry) -> bool {
        entry.has_flag(self.settings.keep_case)
    }

    // -------------------------------------------------------------------------
    // Case helpers over plain strings
    // -------------------------------------------------------------------------

    pub(crate) fn lowered(&self, word: &WordBuf) -> WordBuf {
        let mut w = word.clone();
        to_all_lower(&mut w, self.codec());
        w
    }

    pub(crate) fn init_capped(&self, word: &WordBuf) -> WordBuf {
        let mut w = word.clone();
        to_init_cap(&mut w, self.codec());
        w
    }

    pub(crate) fn upper_str(&self, word: &str) -> String {
        let mut w = WordBuf::from_text(word, self.codec());
        to_all_upper(&mut w, self.codec());
        w.to_string()
    }

    pub(crate) fn lower_str(&self, word: &str) -> String {
        let mut w = WordBuf::from_text(word, self.codec());
        to_all_lower(&mut w, self.codec());
        w.to_string()
    }

    pub(crate) fn init_cap_str(&self, word: &str) -> String {
        let mut w = WordBuf::from_text(word, self.codec());
        to_init_cap(&mut w, self.codec());
        w.to_string()
    }
}

impl Lexicon for SpellEngine {
    fn check(&self, word: &str) -> Option<Entry> {
        SpellEngine::check(self, word).entry
    }

    fn dictionary(&self) -> Option<&dyn Dictionary> {
        self.dictionary.as_deref()
    }

    fn settings(&self) -> &AffixSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordcheck_core::flags::{Flag, FlagSet};
    use wordcheck_mem::{AffixRule, AffixTable, HashDictionary};

    const COMPOUND: Flag = b'X' as Flag;
    const NEED_AFFIX: Flag = b'P' as Flag;
    const ONLY_COMPOUND: Flag = b'O' as Flag;
    const FORBIDDEN: Flag = b'!' as Flag;
    const SUFFIX_S: Flag = b'S' as Flag;

    fn settings() -> AffixSettings {
        AffixSettings {
            encoding: "UTF-8".to_string(),
            forbidden_word: Some(FORBIDDEN),
            pseudo_root: Some(NEED_AFFIX),
            only_in_compound: Some(ONLY_COMPOUND),
            compound_flag: Some(COMPOUND),
            ..AffixSettings::default()
        }
    }

    fn engine_with(words: &[(&str, &str)], settings: AffixSettings) -> SpellEngine {
        let dict = HashDictionary::from_words(words.iter().copied());
        let affixes = AffixTable::new(settings).with_rule(AffixRule::suffix(SUFFIX_S, "", "s", "."));
        SpellEngine::new(Services::new().with_dictionary(dict).with_affixes(affixes)).unwrap()
    }

    fn engine(words: &[(&str, &str)]) -> SpellEngine {
        engine_with(words, settings())
    }

    #[test]
    fn direct_hit_has_no_root() {
        let e = engine(&[("cat", "")]);
        let l = e.check("cat");
        assert!(l.is_found());
        assert_eq!(l.root, None);
        assert!(!l.compound);
        assert_eq!(l.forbidden, Forbidden::None);
    }

    #[test]
    fn affixed_hit_records_root() {
        let e = engine(&[("cat", "S")]);
        let l = e.check("cats");
        assert!(l.is_found());
        assert_eq!(l.root.as_deref(), Some("cat"));
    }

    #[test]
    fn forbidden_head_entry_stops_lookup() {
        let e = engine(&[("cats", "!"), ("cat", "S")]);
        let l = e.check("cats");
        assert!(!l.is_found());
        assert_eq!(l.forbidden, Forbidden::Word);
    }

    #[test]
    fn forbidden_root_through_affix() {
        let e = engine(&[("dog", "S!")]);
        let l = e.check("dogs");
        assert!(!l.is_found());
        assert_eq!(l.forbidden, Forbidden::Word);
        assert_eq!(l.root, None);
    }

    #[test]
    fn pseudo_root_and_compound_only_homonyms_are_skipped() {
        let e = engine(&[("base", "PS"), ("part", "O")]);
        assert!(!e.check("base").is_found());
        assert!(e.check("bases").is_found());
        assert!(!e.check("part").is_found());
    }

    #[test]
    fn compound_hit_sets_flag() {
        let e = engine(&[("sun", "X"), ("flower", "X")]);
        let l = e.check("sunflower");
        assert!(l.is_found());
        assert!(l.compound);
        assert_eq!(l.root.as_deref(), Some("flower"));
    }

    #[test]
    fn compounding_disabled_without_flag() {
        let s = AffixSettings {
            compound_flag: None,
            ..settings()
        };
        let e = engine_with(&[("sun", "X"), ("flower", "X")], s);
        assert!(!e.check("sunflower").is_found());
    }

    #[test]
    fn fresh_context_on_every_call() {
        let e = engine(&[("cats", "!"), ("cat", "")]);
        assert_eq!(e.check("cats").forbidden, Forbidden::Word);
        assert_eq!(e.check("cat").forbidden, Forbidden::None);
    }

    #[test]
    fn complex_prefixes_reverse_lookup_and_root() {
        let s = AffixSettings {
            complex_prefixes: true,
            ..settings()
        };
        // stored reversed
        let mut e = engine_with(&[("tac", "")], s);
        assert!(e.check("cat").is_found());
        assert!(!e.check("tac").is_found());

        e.add_word("dog").unwrap();
        assert!(e.check("dog").is_found());
    }

    #[test]
    fn missing_services_short_circuit() {
        let e = SpellEngine::new(Services::new()).unwrap();
        assert!(!e.check("anything").is_found());
        assert_eq!(e.dictionary_encoding(), "ISO8859-1");
    }

    #[test]
    fn unknown_encoding_fails_construction() {
        let s = AffixSettings {
            encoding: "KOI8-R".to_string(),
            ..settings()
        };
        let result = SpellEngine::new(Services::new().with_affixes(AffixTable::new(s)));
        assert!(matches!(result, Err(EngineError::Encoding(_))));
    }

    #[test]
    fn add_word_variants() {
        let mut e = engine(&[("cat", "S")]);
        e.add_word("dog").unwrap();
        e.add_word_with_flags("bird", "S").unwrap();
        e.add_word_like("cow", "cat").unwrap();
        assert!(e.check("dog").is_found());
        assert!(!e.check("dogs").is_found());
        assert!(e.check("birds").is_found());
        assert!(e.check("cows").is_found());
        assert!(matches!(
            e.add_word_like("yak", "unknown"),
            Err(EngineError::Dictionary(DictionaryError::UnknownModel(_)))
        ));
    }

    #[test]
    fn add_word_without_dictionary() {
        let mut e = SpellEngine::new(Services::new()).unwrap();
        assert!(matches!(e.add_word("x"), Err(EngineError::NoDictionary)));
    }

    #[test]
    fn add_word_rejects_unencodable() {
        let s = AffixSettings {
            encoding: "ISO8859-1".to_string(),
            ..settings()
        };
        let mut e = engine_with(&[], s);
        assert!(matches!(e.add_word("\u{0151}z"), Err(EngineError::Encoding(_))));
    }

    #[test]
    fn accessors() {
        let s = AffixSettings {
            word_chars: Some("0123456789'".to_string()),
            version: Some("2024.1".to_string()),
            ..settings()
        };
        let mut e = engine_with(&[], s);
        assert_eq!(e.dictionary_encoding(), "UTF-8");
        assert_eq!(e.word_chars(), Some("0123456789'"));
        assert_eq!(e.version(), Some("2024.1"));
        assert_eq!(e.max_suggestions(), MAX_SUGGESTIONS);
        e.set_max_suggestions(3);
        assert_eq!(e.max_suggestions(), 3);
        assert!(e.codec().is_wide());
    }

    #[test]
    fn entry_flags_follow_dictionary() {
        let e = engine(&[("cat", "SX")]);
        let entry = e.check("cat").entry.unwrap();
        assert_eq!(entry.flags, FlagSet::from_chars("SX"));
    }
}
