// Break-point splitting and the "ss" / "ß" equivalence search
//
// Both searches work on an immutable character slice. Splits are index
// ranges; sharp-s substitutions are a set of positions passed down the
// recursion and applied only when a candidate is built for checking.

use tracing::debug;
use wordcheck_core::services::Entry;

use crate::engine::SpellEngine;
use crate::lookup::Lookup;

/// Maximum number of "ss" occurrences visited by the sharp-s search.
pub const MAX_SHARPS: usize = 5;

const SHARP_S: char = '\u{00DF}';

/// Position of the first occurrence of `pattern` in `word`.
fn find(word: &[char], pattern: &[char]) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > word.len() {
        return None;
    }
    word.windows(pattern.len()).position(|w| w == pattern)
}

/// Split `word` at the first occurrence of each break string, in table
/// order, and accept it if both sides pass the full spell pipeline.
pub(crate) fn split_at_breaks(engine: &SpellEngine, word: &[char], last: &mut Lookup) -> bool {
    for brk in &engine.settings.break_table {
        let pattern: Vec<char> = brk.chars().collect();
        let Some(at) = find(word, &pattern) else {
            continue;
        };
        let left: String = word[..at].iter().collect();
        let right: String = word[at + pattern.len()..].iter().collect();
        if engine.spell_with(&left, last) && engine.spell_with(&right, last) {
            debug!(%left, %right, brk = brk.as_str(), "break split");
            return true;
        }
    }
    false
}

/// Search the spellings of `word` where any subset of its "ss" pairs is
/// written "ß", and return the first one the decision engine accepts.
///
/// Occurrences are visited left to right without overlap, at most
/// [`MAX_SHARPS`] of them. At each one the substituted branch is explored
/// before the unsubstituted one; the unchanged word itself is never
/// checked.
pub(crate) fn search_sharps(
    engine: &SpellEngine,
    word: &[char],
    last: &mut Lookup,
) -> Option<Entry> {
    search_from(engine, word, 0, 0, &[], last)
}

fn search_from(
    engine: &SpellEngine,
    word: &[char],
    from: usize,
    visited: usize,
    substituted: &[usize],
    last: &mut Lookup,
) -> Option<Entry> {
    match find(&word[from..], &['s', 's']) {
        Some(offset) if visited < MAX_SHARPS => {
            let at = from + offset;
            let mut with = substituted.to_vec();
            with.push(at);
            search_from(engine, word, at + 2, visited + 1, &with, last)
                .or_else(|| search_from(engine, word, at + 2, visited + 1, substituted, last))
        }
        _ if !substituted.is_empty() => engine.decide(&substitute(word, substituted), last),
        _ => None,
    }
}

/// Build `word` with the "ss" pairs starting at `positions` replaced by "ß".
fn substitute(word: &[char], positions: &[usize]) -> String {
    let mut out = String::with_capacity(word.len());
    let mut i = 0;
    while i < word.len() {
        if positions.contains(&i) {
            out.push(SHARP_S);
            i += 2;
        } else {
            out.push(word[i]);
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordcheck_core::services::AffixSettings;
    use wordcheck_mem::HashDictionary;

    use crate::engine::Services;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn engine(words: &[&str]) -> SpellEngine {
        let dict = HashDictionary::from_words(words.iter().map(|w| (*w, "")));
        let settings = AffixSettings {
            encoding: "UTF-8".to_string(),
            check_sharps: true,
            ..AffixSettings::default()
        };
        let services = Services::new()
            .with_dictionary(dict)
            .with_affixes(wordcheck_mem::AffixTable::new(settings));
        SpellEngine::new(services).unwrap()
    }

    fn sharps(e: &SpellEngine, word: &str) -> Option<String> {
        let mut last = Lookup::default();
        search_sharps(e, &chars(word), &mut last).map(|entry| entry.word)
    }

    #[test]
    fn find_first_occurrence() {
        assert_eq!(find(&chars("well-known-fact"), &chars("-")), Some(4));
        assert_eq!(find(&chars("abc"), &chars("--")), None);
        assert_eq!(find(&chars("ab"), &chars("")), None);
        assert_eq!(find(&chars("a"), &chars("abc")), None);
    }

    #[test]
    fn substitute_positions() {
        let w = chars("strasse");
        assert_eq!(substitute(&w, &[4]), "stra\u{00DF}e");
        let w = chars("massstab");
        assert_eq!(substitute(&w, &[2]), "ma\u{00DF}stab");
        assert_eq!(substitute(&w, &[]), "massstab");
    }

    #[test]
    fn sharp_s_spelling_is_found() {
        let e = engine(&["stra\u{00DF}e"]);
        assert_eq!(sharps(&e, "strasse").as_deref(), Some("stra\u{00DF}e"));
        assert_eq!(sharps(&e, "strase"), None);
    }

    #[test]
    fn unchanged_word_is_never_checked() {
        let e = engine(&["strasse"]);
        assert_eq!(sharps(&e, "strasse"), None);
    }

    #[test]
    fn substituted_branch_comes_first() {
        let e = engine(&["strasse", "stra\u{00DF}e"]);
        assert_eq!(sharps(&e, "strasse").as_deref(), Some("stra\u{00DF}e"));

        // "ssxss": "ßxß", then "ßxss", then "ssxß"
        let e = engine(&["\u{00DF}xss", "ssx\u{00DF}"]);
        assert_eq!(sharps(&e, "ssxss").as_deref(), Some("\u{00DF}xss"));
        let e = engine(&["\u{00DF}xss", "ssx\u{00DF}", "\u{00DF}x\u{00DF}"]);
        assert_eq!(sharps(&e, "ssxss").as_deref(), Some("\u{00DF}x\u{00DF}"));
    }

    #[test]
    fn occurrences_beyond_the_limit_are_not_visited() {
        let word = ["ss"; MAX_SHARPS + 1].join("a");
        let last_pair = format!("{}a\u{00DF}", ["ss"; MAX_SHARPS].join("a"));
        let fifth_pair = format!("{}a\u{00DF}ass", ["ss"; MAX_SHARPS - 1].join("a"));

        assert_eq!(sharps(&engine(&[last_pair.as_str()]), &word), None);
        assert_eq!(sharps(&engine(&[fifth_pair.as_str()]), &word), Some(fifth_pair));
    }
}
