// Morphological analysis and stemming

use tracing::{debug, debug_span};
use wordcheck_core::case::CapType;
use wordcheck_core::character::reverse;
use wordcheck_core::services::SuggestEngine;
use wordcheck_core::word::{CleanWord, WordBuf, clean_word};

use crate::engine::SpellEngine;
use crate::locale::{EngineOracle, NumberAnalysis};
use crate::lookup::Lookup;

impl SpellEngine {
    /// Morphological analyses of a word, one per line of the suggestion
    /// engine's output.
    pub fn analyze(&self, word: &str) -> Vec<String> {
        let _span = debug_span!("analyze", word).entered();
        self.morph_text(word)
            .map(|text| text.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Roots a word can be derived from.
    pub fn stem(&self, word: &str) -> Vec<String> {
        let _span = debug_span!("stem", word).entered();
        let Some(suggester) = self.suggester.as_deref() else {
            return Vec::new();
        };
        let Some(cw) = self.cleaned(word) else {
            return Vec::new();
        };

        let stems = |w: &str| suggester.suggest_stems(self, w);
        let abbreviated = cw.abbreviation > 0;
        let as_is = cw.word.to_string();
        let lower = self.lowered(&cw.word);

        let mut found = stems(&as_is);
        match cw.captype {
            // HuhInitCap takes the HuhCap path
            CapType::NoCap | CapType::HuhCap | CapType::HuhInitCap => {
                if abbreviated && found.is_empty() {
                    found = stems(&format!("{as_is}."));
                }
            }
            CapType::InitCap => {
                if found.is_empty() {
                    found = stems(&lower.to_string());
                }
                if abbreviated && found.is_empty() {
                    found = stems(&format!("{lower}."));
                }
            }
            CapType::AllCap => {
                if found.is_empty() {
                    found = stems(&lower.to_string());
                }
                if found.is_empty() {
                    found = stems(&self.init_capped(&lower).to_string());
                }
                if abbreviated && found.is_empty() {
                    found = stems(&format!("{lower}."));
                }
            }
        }
        found
    }

    /// Roots of a word with their part of speech.
    pub fn pos_stems(&self, word: &str) -> Vec<String> {
        let _span = debug_span!("pos_stems", word).entered();
        let Some(suggester) = self.suggester.as_deref() else {
            return Vec::new();
        };
        let Some(cw) = self.cleaned(word) else {
            return Vec::new();
        };

        let stems = |w: &str| suggester.suggest_pos_stems(self, w);
        let as_is = cw.word.to_string();
        let lower = self.lowered(&cw.word);

        let mut found = stems(&as_is);
        match cw.captype {
            // mixed-case input is looked up as written
            CapType::NoCap | CapType::HuhCap | CapType::HuhInitCap => {
                if cw.abbreviation > 0 && found.is_empty() {
                    found = stems(&format!("{as_is}."));
                }
            }
            CapType::InitCap => {
                let placeholder = found.first().is_some_and(|s| s.starts_with('#'));
                if found.is_empty() || placeholder {
                    found = stems(&lower.to_string());
                }
            }
            CapType::AllCap => {
                if found.is_empty() {
                    found = stems(&lower.to_string());
                }
                if found.is_empty() {
                    found = stems(&self.init_capped(&lower).to_string());
                }
            }
        }
        found
    }

    /// Analyses of the best correction of each cased variant of a
    /// misspelled word.
    pub fn analyze_with_correction(&self, word: &str) -> Vec<String> {
        let _span = debug_span!("analyze_with_correction", word).entered();
        let Some(suggester) = self.suggester.as_deref() else {
            return Vec::new();
        };
        let Some(cw) = self.cleaned(word) else {
            return Vec::new();
        };

        let as_is = cw.word.to_string();
        let lower = self.lowered(&cw.word);
        let init = self.init_capped(&lower);
        let abbreviated = cw.abbreviation > 0;

        let mut variants: Vec<String> = Vec::new();
        match cw.captype {
            CapType::NoCap => {
                variants.push(as_is.clone());
                if abbreviated {
                    variants.push(format!("{as_is}."));
                }
            }
            CapType::InitCap => {
                variants.push(lower.to_string());
                variants.push(as_is);
                if abbreviated {
                    variants.push(format!("{lower}."));
                    variants.push(format!("{init}."));
                }
            }
            // mixed-case input is corrected as written and lowercased
            CapType::HuhCap | CapType::HuhInitCap => {
                variants.push(as_is);
                variants.push(lower.to_string());
            }
            CapType::AllCap => {
                variants.push(as_is.clone());
                variants.push(lower.to_string());
                variants.push(init.to_string());
                if abbreviated {
                    variants.push(format!("{as_is}."));
                    variants.push(format!("{lower}."));
                    variants.push(format!("{init}."));
                }
            }
        }

        let mut lines: Vec<String> = Vec::new();
        for variant in &variants {
            let Some(text) = suggester.suggest_morph_for_spelling_error(self, variant) else {
                continue;
            };
            let text = if self.settings.complex_prefixes {
                reverse(&text)
            } else {
                text
            };
            for line in text.lines().filter(|l| !l.is_empty()) {
                if !lines.iter().any(|l| l == line) {
                    lines.push(line.to_string());
                }
            }
        }
        debug!(count = lines.len(), "corrected analyses");
        lines
    }

    fn cleaned(&self, word: &str) -> Option<CleanWord> {
        match clean_word(word, self.codec()) {
            Ok(cw) if !cw.is_empty() => Some(cw),
            Ok(_) => None,
            Err(err) => {
                debug!(%err, "rejected");
                None
            }
        }
    }

    /// Full analysis text of a word, analyses separated by '\n'.
    pub(crate) fn morph_text(&self, word: &str) -> Option<String> {
        let suggester = self.suggester.as_deref()?;
        let cw = match clean_word(word, self.codec()) {
            Ok(cw) => cw,
            Err(err) => {
                debug!(%err, "rejected");
                return None;
            }
        };

        // A word made of periods only is analyzed as written.
        let cw = if cw.is_empty() {
            if cw.abbreviation == 0 {
                return None;
            }
            CleanWord {
                word: WordBuf::from_text(&".".repeat(cw.abbreviation), self.codec()),
                captype: CapType::NoCap,
                abbreviation: 0,
            }
        } else {
            cw
        };

        let mut last = Lookup::default();
        if let Some(policy) = &self.policy {
            let mut oracle = EngineOracle::new(self, &mut last);
            match policy.analyze_number(cw.word.chars(), &mut oracle) {
                NumberAnalysis::NotNumber => {}
                NumberAnalysis::Invalid => return None,
                NumberAnalysis::Analysis(text) => return Some(text),
            }
        }

        let lines = self.collect_morphs(suggester, &cw);
        if !lines.is_empty() {
            let text = lines.join("\n");
            return Some(if self.settings.complex_prefixes {
                reverse(&text)
            } else {
                text
            });
        }

        let policy = self.policy.as_ref()?;
        let mut oracle = EngineOracle::new(self, &mut last);
        policy.analyze_dash(cw.word.chars(), &mut oracle)
    }

    /// Ask the suggestion engine about every cased variant of the word.
    fn collect_morphs(&self, suggester: &dyn SuggestEngine, cw: &CleanWord) -> Vec<String> {
        let mut variants: Vec<String> = Vec::new();
        let as_is = cw.word.to_string();
        let lower = self.lowered(&cw.word);
        let init = self.init_capped(&lower);
        let abbreviated = cw.abbreviation > 0;

        match cw.captype {
            CapType::NoCap => {
                variants.push(as_is.clone());
                if abbreviated {
                    variants.push(format!("{as_is}."));
                }
            }
            CapType::InitCap => {
                variants.push(lower.to_string());
                variants.push(as_is);
                if abbreviated {
                    variants.push(format!("{lower}."));
                    variants.push(format!("{init}."));
                }
            }
            // HuhInitCap takes the HuhCap path
            CapType::HuhCap | CapType::HuhInitCap => variants.push(as_is),
            CapType::AllCap => {
                variants.push(as_is.clone());
                variants.push(lower.to_string());
                variants.push(init.to_string());
                if abbreviated {
                    variants.push(format!("{as_is}."));
                    variants.push(format!("{lower}."));
                    variants.push(format!("{init}."));
                }
            }
        }

        variants
            .iter()
            .filter_map(|v| suggester.suggest_morph(self, v))
            .filter(|m| !m.is_empty())
            .collect()
    }
}
