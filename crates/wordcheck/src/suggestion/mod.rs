// Suggestion orchestration
//
// The suggestion engine only ever sees single cased variants of the input.
// This module picks the variants by capitalization class, merges their
// candidates into one bounded list and restores the input's casing,
// reversal and abbreviation dots on the way out.

use tracing::{debug, debug_span};
use wordcheck_core::case::{CapType, to_init_cap, to_init_lower};
use wordcheck_core::character::reverse;
use wordcheck_core::services::SuggestEngine;
use wordcheck_core::suggestions::SuggestionList;
use wordcheck_core::word::{CleanWord, WordBuf, clean_word};

use crate::engine::SpellEngine;

const SHARP_S: char = '\u{00DF}';

impl SpellEngine {
    /// Suggest corrections for a word, best first.
    ///
    /// Returns at most [`max_suggestions`](Self::max_suggestions)
    /// distinct candidates. Empty when no suggestion engine is loaded or
    /// the input is empty or rejected.
    pub fn suggest(&self, word: &str) -> Vec<String> {
        let _span = debug_span!("suggest", word).entered();
        let Some(suggester) = self.suggester.as_deref() else {
            return Vec::new();
        };
        let Some(cw) = self.clean_for_suggest(word) else {
            return Vec::new();
        };

        let forbidden = self.check(&cw.word.to_string()).forbidden;
        let mut out = SuggestionList::new(self.max_suggestions);
        let capwords = self.suggest_variants(suggester, &cw, &mut out);

        if let Some(policy) = &self.policy {
            policy.rewrite_suggestions(forbidden, &mut out);
        }

        if out.is_empty() && self.settings.max_ngram_suggestions != 0 {
            self.ngram_fallback(suggester, &cw, &mut out);
        }

        self.unreverse(&mut out);
        if capwords {
            for candidate in out.iter_mut() {
                *candidate = self.init_cap_str(candidate);
            }
        }
        self.append_dots(&cw, word, &mut out);

        if self.settings.keep_case.is_some()
            && matches!(cw.captype, CapType::InitCap | CapType::AllCap)
        {
            self.repair_keep_case(&mut out);
        }

        out.dedup();
        debug!(count = out.len(), "suggestions");
        out.into_vec()
    }

    /// Suggest safe automatic replacements for a word.
    pub fn suggest_auto(&self, word: &str) -> Vec<String> {
        let _span = debug_span!("suggest_auto", word).entered();
        let Some(suggester) = self.suggester.as_deref() else {
            return Vec::new();
        };
        let Some(cw) = self.clean_for_suggest(word) else {
            return Vec::new();
        };
        let forbidden = self.check(&cw.word.to_string()).forbidden;
        let mut out = SuggestionList::new(self.max_suggestions);
        let as_is = cw.word.to_string();

        match cw.captype {
            CapType::NoCap => suggester.suggest_auto(self, &as_is, &mut out),
            CapType::InitCap => {
                let lower = self.lowered(&cw.word).to_string();
                suggester.suggest_auto(self, &lower, &mut out);
                for candidate in out.iter_mut() {
                    *candidate = self.init_cap_str(candidate);
                }
                suggester.suggest_auto(self, &as_is, &mut out);
            }
            CapType::HuhCap | CapType::HuhInitCap => {
                suggester.suggest_auto(self, &as_is, &mut out);
                if out.is_empty() {
                    let lower = self.lowered(&cw.word).to_string();
                    suggester.suggest_auto(self, &lower, &mut out);
                }
            }
            CapType::AllCap => {
                let lower = self.lowered(&cw.word);
                suggester.suggest_auto(self, &lower.to_string(), &mut out);
                suggester.suggest_auto(self, &self.init_capped(&lower).to_string(), &mut out);
                self.upper_all(&mut out);
            }
        }

        self.unreverse(&mut out);
        self.append_dots(&cw, word, &mut out);
        if let Some(policy) = &self.policy {
            policy.rewrite_suggestions(forbidden, &mut out);
        }
        out.dedup();
        out.into_vec()
    }

    fn clean_for_suggest(&self, word: &str) -> Option<CleanWord> {
        match clean_word(word, self.codec()) {
            Ok(cw) if cw.is_empty() => None,
            Ok(cw) => Some(cw),
            Err(err) => {
                debug!(%err, "rejected");
                None
            }
        }
    }

    /// Query the suggestion engine with the cased variants of the input.
    /// Returns whether the candidates need an initial capital.
    fn suggest_variants(
        &self,
        suggester: &dyn SuggestEngine,
        cw: &CleanWord,
        out: &mut SuggestionList,
    ) -> bool {
        let as_is = cw.word.to_string();
        match cw.captype {
            CapType::NoCap => {
                suggester.suggest(self, &as_is, out);
                false
            }
            CapType::InitCap => {
                suggester.suggest(self, &as_is, out);
                suggester.suggest(self, &self.lowered(&cw.word).to_string(), out);
                true
            }
            CapType::HuhCap | CapType::HuhInitCap => {
                self.suggest_mixed_case(suggester, cw, out);
                cw.captype == CapType::HuhInitCap
            }
            CapType::AllCap => {
                let lower = self.lowered(&cw.word);
                let lower_text = lower.to_string();
                suggester.suggest(self, &lower_text, out);
                if self.settings.keep_case.is_some() {
                    self.insert_if_correct(&lower_text, out);
                }
                suggester.suggest(self, &self.init_capped(&lower).to_string(), out);
                self.upper_all(out);
                false
            }
        }
    }

    /// Variants for words with mixed capitals ("iPod", "TheOpenOffice").
    fn suggest_mixed_case(
        &self,
        suggester: &dyn SuggestEngine,
        cw: &CleanWord,
        out: &mut SuggestionList,
    ) {
        let huh_init = cw.captype == CapType::HuhInitCap;
        suggester.suggest(self, &cw.word.to_string(), out);
        if huh_init {
            // "TheOpenOffice" -> "theOpenOffice" -> "the OpenOffice"
            let mut init_lower = cw.word.clone();
            to_init_lower(&mut init_lower, self.codec());
            suggester.suggest(self, &init_lower.to_string(), out);
        }

        let lower = self.lowered(&cw.word);
        let lower_text = lower.to_string();
        self.insert_if_correct(&lower_text, out);
        let first_new = out.len();
        suggester.suggest(self, &lower_text, out);
        if huh_init {
            let init = self.init_capped(&lower).to_string();
            self.insert_if_correct(&init, out);
            suggester.suggest(self, &init, out);
        }

        // "aNew" -> "a New": restore the capital the split lost and move
        // the candidate to the front
        let word = cw.word.chars();
        for j in first_new..out.len() {
            let Some(candidate) = out.get(j) else {
                continue;
            };
            let Some(space) = candidate.find(' ') else {
                continue;
            };
            let tail: Vec<char> = candidate[space + 1..].chars().collect();
            if tail.len() < word.len() && word[word.len() - tail.len()..] != tail[..] {
                let mut tail = WordBuf::new(tail, self.codec());
                to_init_cap(&mut tail, self.codec());
                let repaired = format!("{} {}", &candidate[..space], tail);
                if let Some(slot) = out.get_mut(j) {
                    *slot = repaired;
                }
                out.move_to_front(j);
            }
        }
    }

    /// Similarity-based candidates when nothing else was found.
    fn ngram_fallback(&self, suggester: &dyn SuggestEngine, cw: &CleanWord, out: &mut SuggestionList) {
        let max = self.settings.max_ngram_suggestions;
        match cw.captype {
            CapType::NoCap => suggester.ngram_suggest(self, &cw.word.to_string(), out, max),
            // HuhInitCap takes the HuhCap path
            CapType::InitCap | CapType::HuhCap | CapType::HuhInitCap => {
                suggester.ngram_suggest(self, &self.lowered(&cw.word).to_string(), out, max);
            }
            CapType::AllCap => {
                suggester.ngram_suggest(self, &self.lowered(&cw.word).to_string(), out, max);
                for candidate in out.iter_mut() {
                    *candidate = self.upper_str(candidate);
                }
            }
        }
    }

    /// Add `word` at the front of the list if it is spelled correctly,
    /// evicting the last candidate when the list is full.
    fn insert_if_correct(&self, word: &str, out: &mut SuggestionList) {
        if self.spell(word) {
            out.insert_front(word);
        }
    }

    /// Uppercase every candidate. Under the sharp-s policy "ß", which has
    /// no single-character capital, becomes "SS".
    fn upper_all(&self, out: &mut SuggestionList) {
        for candidate in out.iter_mut() {
            let upper = self.upper_str(candidate);
            *candidate = if self.settings.check_sharps {
                upper.replace(SHARP_S, "SS")
            } else {
                upper
            };
        }
    }

    /// Restore reversed spelling for complex-prefix dictionaries.
    fn unreverse(&self, out: &mut SuggestionList) {
        if self.settings.complex_prefixes {
            for candidate in out.iter_mut() {
                *candidate = reverse(candidate);
            }
        }
    }

    /// Re-attach the input's trailing periods when the settings ask for it.
    fn append_dots(&self, cw: &CleanWord, input: &str, out: &mut SuggestionList) {
        if cw.abbreviation == 0 || !self.settings.suggestions_with_dots {
            return;
        }
        let dots = &input[input.len() - cw.abbreviation..];
        for candidate in out.iter_mut() {
            candidate.push_str(dots);
        }
    }

    /// Replace candidates that fail the spell pipeline by their lowercase
    /// or initial-capital form, dropping those with no correct form.
    fn repair_keep_case(&self, out: &mut SuggestionList) {
        out.filter_map_in_place(|candidate| {
            if self.spell(candidate) {
                return Some(candidate.to_string());
            }
            let lower = self.lower_str(candidate);
            if self.spell(&lower) {
                return Some(lower);
            }
            let init = self.init_cap_str(&lower);
            self.spell(&init).then_some(init)
        });
    }
}
