// Spell pipeline: normalization, numbers, case variants, break points, dashes

pub mod compound;

use tracing::{debug, debug_span};
use wordcheck_core::case::CapType;
use wordcheck_core::character::is_digit;
use wordcheck_core::services::Entry;
use wordcheck_core::word::{CleanWord, WordBuf, clean_word};

use crate::engine::SpellEngine;
use crate::locale::EngineOracle;
use crate::lookup::{Lookup, SpellInfo};

/// State of the number scanner after the last character it accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    Begin,
    Digit,
    Separator,
}

/// Scan the leading numeral of a word: digits with single '.', ',' or '-'
/// separators between them. Returns where the scan stopped and the state
/// there.
fn scan_number(word: &[char]) -> (usize, NumberState) {
    let mut state = NumberState::Begin;
    for (i, &c) in word.iter().enumerate() {
        if is_digit(c) {
            state = NumberState::Digit;
        } else if state == NumberState::Digit && matches!(c, '.' | ',' | '-') {
            state = NumberState::Separator;
        } else {
            return (i, state);
        }
    }
    (word.len(), state)
}

impl SpellEngine {
    /// Check whether a word is correctly spelled.
    ///
    /// Leading spaces and trailing periods are ignored (a word made only
    /// of periods is correct), numbers with single separators are always
    /// correct, and case variants, abbreviations, break points and locale
    /// dash rules are tried in turn. Words over the length limit, or with
    /// characters the dictionary encoding cannot hold, are incorrect.
    pub fn spell(&self, word: &str) -> bool {
        let _span = debug_span!("spell", word).entered();
        let mut last = Lookup::default();
        self.spell_with(word, &mut last)
    }

    /// Like [`spell`](Self::spell), for a word in the dictionary encoding.
    pub fn spell_bytes(&self, word: &[u8]) -> bool {
        match self.codec.decode(word) {
            Ok(text) => self.spell(&text),
            Err(err) => {
                debug!(%err, "undecodable input");
                false
            }
        }
    }

    /// Spell a word and report the context of the last decision call made
    /// on the way: root, compound and forbidden status.
    pub fn spell_info(&self, word: &str) -> SpellInfo {
        let _span = debug_span!("spell_info", word).entered();
        let mut last = Lookup::default();
        let correct = self.spell_with(word, &mut last);
        SpellInfo { correct, last }
    }

    pub(crate) fn spell_with(&self, word: &str, last: &mut Lookup) -> bool {
        let cw = match clean_word(word, self.codec()) {
            Ok(cw) => cw,
            Err(err) => {
                debug!(%err, "rejected");
                return false;
            }
        };
        if cw.is_empty() {
            return true;
        }

        let chars = cw.word.chars();
        let (stop, state) = scan_number(chars);
        if state == NumberState::Digit {
            if stop == chars.len() {
                return true;
            }
            if let Some(policy) = &self.policy {
                let mut oracle = EngineOracle::new(self, last);
                if policy.spell_number_sign(&chars[stop..], &mut oracle) {
                    return true;
                }
            }
        }

        if self.spell_cased(&cw, last) {
            return true;
        }

        // Break points and dashes work on the form the case stage left:
        // initial capital for InitCap and AllCap input.
        let word = match cw.captype {
            CapType::InitCap | CapType::AllCap => self.init_capped(&self.lowered(&cw.word)),
            _ => cw.word,
        };
        if compound::split_at_breaks(self, word.chars(), last) {
            return true;
        }
        if let Some(policy) = &self.policy {
            let mut oracle = EngineOracle::new(self, last);
            if policy.resolve_dash(word.chars(), &self.settings, &mut oracle) {
                return true;
            }
        }
        false
    }

    /// Try the case variants and abbreviation forms of a cleaned word.
    fn spell_cased(&self, cw: &CleanWord, last: &mut Lookup) -> bool {
        let abbreviated = cw.abbreviation > 0;
        match cw.captype {
            CapType::NoCap | CapType::HuhCap | CapType::HuhInitCap => {
                self.decide(&cw.word.to_string(), last).is_some()
                    || (abbreviated && self.decide(&self.dotted(&cw.word), last).is_some())
            }
            CapType::AllCap => {
                if self.decide(&cw.word.to_string(), last).is_some() {
                    return true;
                }
                if abbreviated && self.decide(&self.dotted(&cw.word), last).is_some() {
                    return true;
                }
                if self.settings.check_sharps
                    && cw.word.to_string().contains("SS")
                    && self.spell_sharps(cw, last)
                {
                    return true;
                }
                self.spell_capitalized(cw, last)
            }
            CapType::InitCap => self.spell_capitalized(cw, last),
        }
    }

    /// All-caps words with "SS": search the lowercase and initial-capital
    /// forms for "ss" spelled as "ß".
    fn spell_sharps(&self, cw: &CleanWord, last: &mut Lookup) -> bool {
        let lower = self.lowered(&cw.word);
        let init = self.init_capped(&lower);
        if compound::search_sharps(self, lower.chars(), last).is_some()
            || compound::search_sharps(self, init.chars(), last).is_some()
        {
            return true;
        }
        cw.abbreviation > 0
            && [lower, init].iter().any(|form| {
                let dotted = form.with_suffix(".", self.codec());
                compound::search_sharps(self, dotted.chars(), last).is_some()
            })
    }

    /// Rules for capitalized input (InitCap, and AllCap after its own
    /// variants failed): the lowercase form, then the initial-capital form
    /// when the lowercase hit is missing or keep-case. Keep-case entries
    /// never match all-caps input.
    fn spell_capitalized(&self, cw: &CleanWord, last: &mut Lookup) -> bool {
        let all_caps = cw.captype == CapType::AllCap;
        let lower = self.lowered(&cw.word);
        let init = self.init_capped(&lower);

        // Keep-case words containing "ß" have no uppercase form of their
        // own, so their initial-capital spelling is accepted.
        let sharps_exempt = cw.captype == CapType::InitCap
            && self.settings.check_sharps
            && lower.chars().contains(&'\u{00DF}');

        let mut hit = self.decide(&lower.to_string(), last);
        if hit
            .as_ref()
            .is_none_or(|e| self.is_keep_case(e) && !sharps_exempt)
        {
            hit = self.decide(&init.to_string(), last);
            hit = self.reject_keep_case(hit, all_caps);
        }

        if cw.abbreviation > 0 && hit.is_none() {
            hit = self.decide(&self.dotted(&lower), last);
            if hit.as_ref().is_none_or(|e| self.is_keep_case(e)) {
                hit = self.decide(&self.dotted(&init), last);
                hit = self.reject_keep_case(hit, all_caps);
            }
        }
        hit.is_some()
    }

    fn reject_keep_case(&self, hit: Option<Entry>, all_caps: bool) -> Option<Entry> {
        hit.filter(|e| !(all_caps && self.is_keep_case(e)))
    }

    fn dotted(&self, word: &WordBuf) -> String {
        word.with_suffix(".", self.codec()).to_string()
    }
}
