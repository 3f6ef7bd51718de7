// Hungarian dash, number and compound rules
//
// Hungarian writes suffixes after a hyphen on numerals and abbreviations
// ("5-ös", "MÁV-os"), joins words with hyphens and n-dashes, and attaches
// suffixes to numbers with percent and degree signs ("12%-os"). The
// dictionary carries these suffix forms as entries beginning with '-'.

use wordcheck_core::character::is_digit;
use wordcheck_core::services::{AffixSettings, CompoundQuery, Entry};
use wordcheck_core::suggestions::SuggestionList;

use super::{LocalePolicy, NumberAnalysis, WordOracle};
use crate::lookup::Forbidden;

const EN_DASH: char = '\u{2013}';

/// Separator between the parts of a joined analysis.
const MORPH_JOIN: &str = "+";

/// Hungarian locale policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct HungarianPolicy;

fn text(chars: &[char]) -> String {
    chars.iter().collect()
}

/// Start positions of the numeral run that ends right before `dash`,
/// longest candidate first. Only positions holding a digit are returned.
///
/// The window looks back past a single '.' and extends over up to five
/// characters, further only across zeros.
fn numeral_starts(word: &[char], dash: usize) -> impl Iterator<Item = usize> + '_ {
    let mut n = 1;
    if dash >= 1 && word[dash - 1] == '.' {
        n += 1;
    }
    while dash >= n && (word[dash - n] == '0' || n < 3) && n < 6 {
        n += 1;
    }
    if dash < n {
        n -= 1;
    }
    (1..=n)
        .rev()
        .map(move |k| dash - k)
        .filter(move |&start| is_digit(word[start]))
}

/// Only a digit or '.' right before the dash ends a numeral; letters and
/// other punctuation ('/', ':') do not.
fn numeral_before(word: &[char], dash: usize) -> bool {
    dash > 0 && (is_digit(word[dash - 1]) || word[dash - 1] == '.')
}

/// A suffix after a hyphen is acceptable on its own if it is longer than
/// one character, the single letter 'e', or a single digit 1-8.
fn acceptable_suffix(suffix: &[char]) -> bool {
    suffix.len() > 1 || suffix.first().is_some_and(|&c| c == 'e' || ('1'..='8').contains(&c))
}

impl LocalePolicy for HungarianPolicy {
    fn id(&self) -> &str {
        "hu"
    }

    fn classify_forbidden(&self, entry: &Entry, settings: &AffixSettings) -> Forbidden {
        if entry.has_flag(settings.compound_flag) {
            Forbidden::CompoundableWord
        } else {
            Forbidden::Word
        }
    }

    fn compound_retry<'w>(&self, word: &'w str) -> Option<(&'w str, CompoundQuery)> {
        let stripped = word.strip_suffix('-')?;
        Some((
            stripped,
            CompoundQuery {
                moving_rule: true,
                ..CompoundQuery::default()
            },
        ))
    }

    fn spell_number_sign(&self, rest: &[char], oracle: &mut dyn WordOracle) -> bool {
        matches!(rest.first(), Some('%' | '\u{00B0}')) && oracle.check(&text(rest))
    }

    fn resolve_dash(
        &self,
        word: &[char],
        settings: &AffixSettings,
        oracle: &mut dyn WordOracle,
    ) -> bool {
        if settings.break_table.is_empty() {
            if let Some(at) = word.iter().position(|&c| c == EN_DASH) {
                if oracle.spell(&text(&word[..at])) && oracle.spell(&text(&word[at + 1..])) {
                    return true;
                }
            }
        }

        let Some(dash) = word.iter().position(|&c| c == '-') else {
            return false;
        };
        let left = text(&word[..dash]);
        let suffix = &word[dash + 1..];

        let mut joined = false;
        if suffix.is_empty() {
            if oracle.spell(&left) {
                return true;
            }
        } else {
            joined = oracle.spell(&format!("{left}-"));
            if joined && oracle.spell(&text(suffix)) && acceptable_suffix(suffix) {
                return true;
            }
        }

        // "1000-hez": the numeral run plus the suffix must be a valid word
        if joined && numeral_before(word, dash) {
            for start in numeral_starts(word, dash) {
                if oracle.check(&text(&word[start..])) {
                    return true;
                }
            }
        }
        false
    }

    fn rewrite_suggestions(&self, forbidden: Forbidden, out: &mut SuggestionList) {
        if forbidden != Forbidden::CompoundableWord {
            return;
        }
        for candidate in out.iter_mut() {
            if let Some(pos) = candidate.find('-') {
                candidate.replace_range(pos..pos + 1, " ");
            }
        }
    }

    fn analyze_number(&self, word: &[char], oracle: &mut dyn WordOracle) -> NumberAnalysis {
        let is_sep = |c: Option<&char>| matches!(c, Some('.' | ','));
        let len = word.len();
        let mut n = 0;
        let mut groups = 0;
        let mut last_sep = 0;
        while n < len && (is_digit(word[n]) || (is_sep(word.get(n)) && n > 0)) {
            n += 1;
            if is_sep(word.get(n)) {
                if (groups == 0 && n > 3) || (groups > 0 && is_sep(word.get(n - 1))) {
                    break;
                }
                groups += 1;
                last_sep = n;
            }
        }

        if n == 0 {
            return NumberAnalysis::NotNumber;
        }
        if n == len && last_sep > 0 && n - last_sep > 3 {
            return NumberAnalysis::Invalid;
        }
        let signed =
            matches!(word.get(n), Some('%' | '\u{00B0}')) && oracle.check(&text(&word[n..]));
        if n != len && !signed {
            return NumberAnalysis::NotNumber;
        }

        // The last digit carries the analysis of the whole numeral.
        let mut result = text(&word[..n - 1]);
        if n == len {
            result.push_str(&oracle.describe(&text(&word[n - 1..])).unwrap_or_default());
        } else {
            result.push_str(&oracle.describe(&text(&word[n - 1..n])).unwrap_or_default());
            result.push_str(MORPH_JOIN);
            result.push_str(&oracle.describe(&text(&word[n..])).unwrap_or_default());
        }
        NumberAnalysis::Analysis(result)
    }

    fn analyze_dash(&self, word: &[char], oracle: &mut dyn WordOracle) -> Option<String> {
        let dash = word.iter().position(|&c| c == '-')?;
        let left = text(&word[..dash]);
        let suffix = &word[dash + 1..];

        let mut joined = false;
        if suffix.is_empty() {
            if oracle.spell(&left) {
                return oracle.describe(&left);
            }
        } else if suffix == ['e'] {
            if oracle.spell(&left) && oracle.spell("-e") {
                let mut result = oracle.describe(&left).unwrap_or_default();
                result.push_str(MORPH_JOIN);
                result.push_str(&oracle.describe("-e").unwrap_or_default());
                return Some(result);
            }
        } else {
            joined = oracle.spell(&format!("{left}-"));
            let suffix_text = text(suffix);
            if joined
                && oracle.spell(&suffix_text)
                && (suffix.len() > 1 || ('1'..='8').contains(&suffix[0]))
            {
                let mut result = String::new();
                if let Some(head) = oracle.morph(&left) {
                    result.push_str(&head);
                    result.push_str(MORPH_JOIN);
                }
                result.push_str(&oracle.morph(&suffix_text).unwrap_or_default());
                return Some(result);
            }
        }

        if joined && numeral_before(word, dash) {
            for start in numeral_starts(word, dash) {
                let tail = text(&word[start..]);
                if oracle.check(&tail) {
                    let mut result = text(&word[..start]);
                    result.push_str(&oracle.describe(&tail).unwrap_or_default());
                    return Some(result);
                }
            }
        }
        None
    }
}
