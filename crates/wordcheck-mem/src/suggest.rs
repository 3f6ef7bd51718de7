// Edit-distance and n-gram suggestion engine
//
// Candidates are built on the surface form and validated through the
// lexicon. Dictionaries of complex-prefix languages store words reversed,
// so output is reversed back into stored orientation for them.

use hashbrown::HashMap;
use wordcheck_core::character::{reverse, simple_lower};
use wordcheck_core::services::{Lexicon, SuggestEngine};
use wordcheck_core::suggestions::SuggestionList;

/// Longest n-gram used by the similarity score.
const MAX_GRAM: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct NgramSuggester;

impl NgramSuggester {
    pub fn new() -> Self {
        Self
    }
}

fn stored(lexicon: &dyn Lexicon, word: &str) -> String {
    if lexicon.settings().complex_prefixes {
        reverse(word)
    } else {
        word.to_string()
    }
}

/// Push `candidate` if it is a correct word. Returns `false` once the list
/// is full.
fn try_candidate(lexicon: &dyn Lexicon, candidate: &str, out: &mut SuggestionList) -> bool {
    if out.is_full() {
        return false;
    }
    if lexicon.check(candidate).is_some() {
        out.push_unique(&stored(lexicon, candidate));
    }
    !out.is_full()
}

// ---------------------------------------------------------------------------
// Edit generators
// ---------------------------------------------------------------------------

fn swapped(word: &[char]) -> impl Iterator<Item = String> + '_ {
    (1..word.len()).filter(move |&i| word[i - 1] != word[i]).map(move |i| {
        let mut w = word.to_vec();
        w.swap(i - 1, i);
        w.into_iter().collect()
    })
}

fn deleted(word: &[char]) -> impl Iterator<Item = String> + '_ {
    (0..word.len()).filter(move |_| word.len() > 1).map(move |i| {
        word[..i].iter().chain(&word[i + 1..]).collect()
    })
}

fn inserted<'a>(word: &'a [char], tries: &'a [char]) -> impl Iterator<Item = String> + 'a {
    tries.iter().flat_map(move |&t| {
        (0..=word.len()).map(move |i| {
            word[..i].iter().chain(std::iter::once(&t)).chain(&word[i..]).collect()
        })
    })
}

fn replaced<'a>(word: &'a [char], tries: &'a [char]) -> impl Iterator<Item = String> + 'a {
    tries.iter().flat_map(move |&t| {
        (0..word.len()).filter(move |&i| word[i] != t).map(move |i| {
            let mut w = word.to_vec();
            w[i] = t;
            w.into_iter().collect()
        })
    })
}

/// "thecat" -> "the cat" when both halves are words.
fn two_words(lexicon: &dyn Lexicon, word: &[char], out: &mut SuggestionList) {
    for i in 1..word.len() {
        let left: String = word[..i].iter().collect();
        let right: String = word[i..].iter().collect();
        if lexicon.check(&left).is_some() && lexicon.check(&right).is_some() {
            let pair = format!("{} {}", stored(lexicon, &left), stored(lexicon, &right));
            if !out.push_unique(&pair) && out.is_full() {
                return;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Similarity
// ---------------------------------------------------------------------------

fn lowered(word: &str) -> Vec<char> {
    word.chars().map(simple_lower).collect()
}

/// Shared n-grams of length 1 to [`MAX_GRAM`], minus the length difference.
fn ngram_score(word: &[char], candidate: &[char]) -> i64 {
    let mut score = 0i64;
    for n in 1..=MAX_GRAM.min(word.len()) {
        let mut grams: HashMap<&[char], usize> = HashMap::new();
        for g in candidate.windows(n) {
            *grams.entry(g).or_default() += 1;
        }
        for g in word.windows(n) {
            if let Some(count) = grams.get_mut(g) {
                if *count > 0 {
                    *count -= 1;
                    score += 1;
                }
            }
        }
    }
    score - word.len().abs_diff(candidate.len()) as i64
}

impl SuggestEngine for NgramSuggester {
    fn suggest(&self, lexicon: &dyn Lexicon, word: &str, out: &mut SuggestionList) {
        let chars: Vec<char> = word.chars().collect();
        let tries: Vec<char> = lexicon.settings().try_chars.chars().collect();

        let edits = swapped(&chars)
            .chain(deleted(&chars))
            .chain(inserted(&chars, &tries))
            .chain(replaced(&chars, &tries));
        for candidate in edits {
            if candidate != word && !try_candidate(lexicon, &candidate, out) {
                return;
            }
        }
        two_words(lexicon, &chars, out);
    }

    fn ngram_suggest(&self, lexicon: &dyn Lexicon, word: &str, out: &mut SuggestionList, max: usize) {
        let Some(dict) = lexicon.dictionary() else {
            return;
        };
        let s = lexicon.settings();
        let target = lowered(word);
        let threshold = (target.len() / 2) as i64;

        let mut ranked: Vec<(i64, String)> = dict
            .entries()
            .filter(|e| {
                !e.has_flag(s.forbidden_word)
                    && !e.has_flag(s.pseudo_root)
                    && !e.has_flag(s.only_in_compound)
            })
            .filter_map(|e| {
                let surface = stored(lexicon, &e.word);
                let score = ngram_score(&target, &lowered(&surface));
                (score > threshold && surface != word).then_some((score, surface))
            })
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        ranked.dedup_by(|a, b| a.1 == b.1);

        let mut added = 0;
        for (_, surface) in ranked {
            if added == max || out.is_full() {
                break;
            }
            if lexicon.check(&surface).is_some() && out.push_unique(&stored(lexicon, &surface)) {
                added += 1;
            }
        }
    }

    /// Only transpositions and word splits are safe enough to apply
    /// without asking.
    fn suggest_auto(&self, lexicon: &dyn Lexicon, word: &str, out: &mut SuggestionList) {
        let chars: Vec<char> = word.chars().collect();
        for candidate in swapped(&chars) {
            if !try_candidate(lexicon, &candidate, out) {
                return;
            }
        }
        two_words(lexicon, &chars, out);
    }

    fn suggest_stems(&self, lexicon: &dyn Lexicon, word: &str) -> Vec<String> {
        lexicon
            .check(word)
            .map(|entry| vec![stored(lexicon, &entry.word)])
            .unwrap_or_default()
    }

    fn suggest_morph(&self, lexicon: &dyn Lexicon, word: &str) -> Option<String> {
        let entry = lexicon.check(word)?;
        let root = stored(lexicon, &entry.word);
        let text = match &entry.morph {
            Some(morph) => format!("st:{root} {morph}"),
            None => format!("st:{root}"),
        };
        Some(stored(lexicon, &text))
    }

    /// The root followed by its `po:` field. Roots whose description
    /// starts with `#` are returned as `#root` placeholders.
    fn suggest_pos_stems(&self, lexicon: &dyn Lexicon, word: &str) -> Vec<String> {
        let Some(entry) = lexicon.check(word) else {
            return Vec::new();
        };
        let root = stored(lexicon, &entry.word);
        let morph = entry.morph.as_deref().unwrap_or_default();
        if morph.starts_with('#') {
            return vec![format!("#{root}")];
        }
        match morph.split_whitespace().find(|field| field.starts_with("po:")) {
            Some(pos) => vec![format!("{root} {pos}")],
            None => vec![root],
        }
    }

    fn suggest_morph_for_spelling_error(&self, lexicon: &dyn Lexicon, word: &str) -> Option<String> {
        let mut best = SuggestionList::new(1);
        self.suggest(lexicon, word, &mut best);
        // candidates come back in stored orientation
        let surface = stored(lexicon, best.get(0)?);
        self.suggest_morph(lexicon, &surface)
    }
}
