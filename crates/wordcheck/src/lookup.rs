// Per-call decision results

use wordcheck_core::services::Entry;

/// Forbidden status of a decision call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Forbidden {
    /// No forbidden entry was hit.
    #[default]
    None,
    /// The word (or the root it resolved to) is marked forbidden.
    Word,
    /// The word is forbidden as written but its entry may take part in
    /// compounds. Suggestions for such words are split at the first hyphen
    /// by locale policies that know the distinction.
    CompoundableWord,
}

/// Complete context of one decision call.
///
/// Every call builds a fresh `Lookup`; nothing is carried over between
/// calls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lookup {
    /// The entry the word resolved to, if it is valid.
    pub entry: Option<Entry>,
    /// Root reached through affix stripping or compounding. Direct
    /// dictionary hits leave it unset.
    pub root: Option<String>,
    /// The word was accepted as a compound.
    pub compound: bool,
    pub forbidden: Forbidden,
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        self.entry.is_some()
    }
}

/// Verdict of the spell pipeline together with the context of the last
/// decision call made while reaching it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpellInfo {
    pub correct: bool,
    pub last: Lookup,
}
