// Locale policies: language-specific rules at fixed extension points
//
// A policy is selected from the affix settings' language id when the
// engine is built and can be replaced or removed later. The engine consults
// it at these points:
//   - forbidden classification in the decision engine
//   - compound retry in the decision engine
//   - numeral + sign words in the spell pipeline
//   - dash resolution after break splitting
//   - suggestion list post-processing
//   - number and dash analysis in morphological analysis

pub mod hungarian;

use wordcheck_core::services::{AffixSettings, CompoundQuery, Entry};
use wordcheck_core::suggestions::SuggestionList;

use crate::engine::SpellEngine;
use crate::lookup::{Forbidden, Lookup};

pub use hungarian::HungarianPolicy;

/// Callbacks a policy may use to ask the engine about other words.
pub trait WordOracle {
    /// Full spell pipeline (case variants, abbreviations, break points).
    fn spell(&mut self, word: &str) -> bool;

    /// Decision call on the word exactly as written.
    fn check(&mut self, word: &str) -> bool;

    /// Full morphological analysis, lines joined with `'\n'`.
    fn morph(&mut self, word: &str) -> Option<String>;

    /// Analysis of one written form straight from the suggestion engine.
    fn describe(&mut self, word: &str) -> Option<String>;
}

/// Outcome of a policy's number analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberAnalysis {
    /// Not a number; analysis continues normally.
    NotNumber,
    /// A malformed number with no analysis at all.
    Invalid,
    /// The analysis of the number.
    Analysis(String),
}

/// Language-specific rules. Every hook defaults to "no special behavior".
pub trait LocalePolicy: Send + Sync {
    /// Identifier of the policy, for diagnostics.
    fn id(&self) -> &str;

    /// Classify a forbidden dictionary entry hit by the direct lookup.
    fn classify_forbidden(&self, _entry: &Entry, _settings: &AffixSettings) -> Forbidden {
        Forbidden::Word
    }

    /// A second compound check to try after the first one failed.
    fn compound_retry<'w>(&self, _word: &'w str) -> Option<(&'w str, CompoundQuery)> {
        None
    }

    /// Spell a word made of a numeral followed by `rest`, where `rest`
    /// starts at the first character that ended the numeral.
    fn spell_number_sign(&self, _rest: &[char], _oracle: &mut dyn WordOracle) -> bool {
        false
    }

    /// Accept a word the dictionary, affix rules and break points all
    /// rejected, by splitting it at dashes.
    fn resolve_dash(
        &self,
        _word: &[char],
        _settings: &AffixSettings,
        _oracle: &mut dyn WordOracle,
    ) -> bool {
        false
    }

    /// Rewrite the suggestion list of a word with the given forbidden status.
    fn rewrite_suggestions(&self, _forbidden: Forbidden, _out: &mut SuggestionList) {}

    /// Analyze a word that may be a number.
    fn analyze_number(&self, _word: &[char], _oracle: &mut dyn WordOracle) -> NumberAnalysis {
        NumberAnalysis::NotNumber
    }

    /// Analyze a word containing a dash when no other analysis was found.
    fn analyze_dash(&self, _word: &[char], _oracle: &mut dyn WordOracle) -> Option<String> {
        None
    }
}

/// The built-in policy for a language id, if any.
pub fn policy_for(lang: &str) -> Option<Box<dyn LocalePolicy>> {
    let lang = lang.to_ascii_lowercase();
    if lang.starts_with("hu") {
        Some(Box::new(HungarianPolicy))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Engine-backed oracle
// ---------------------------------------------------------------------------

/// Oracle answering through the engine. Decision calls made through it
/// are recorded in `last`.
pub(crate) struct EngineOracle<'a> {
    engine: &'a SpellEngine,
    last: &'a mut Lookup,
}

impl<'a> EngineOracle<'a> {
    pub(crate) fn new(engine: &'a SpellEngine, last: &'a mut Lookup) -> Self {
        Self { engine, last }
    }
}

impl WordOracle for EngineOracle<'_> {
    fn spell(&mut self, word: &str) -> bool {
        self.engine.spell_with(word, self.last)
    }

    fn check(&mut self, word: &str) -> bool {
        self.engine.decide(word, self.last).is_some()
    }

    fn morph(&mut self, word: &str) -> Option<String> {
        self.engine.morph_text(word)
    }

    fn describe(&mut self, word: &str) -> Option<String> {
        let suggester = self.engine.suggester.as_deref()?;
        suggester.suggest_morph(self.engine, word)
    }
}
