// Affix rule table: prefix and suffix stripping, compounding
//
// Rules are matched the way an affix file describes them: `add` is the
// text found on the surface word, `strip` is the text the root had in its
// place, and the condition is tested against the reconstructed root.

use wordcheck_core::flags::{Flag, FlagSet};
use wordcheck_core::services::{
    AffixMode, AffixRules, AffixSettings, CompoundQuery, Dictionary, Entry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffixKind {
    Prefix,
    Suffix,
}

/// One unit of an affix condition.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CondUnit {
    Any,
    Char(char),
    Set { negated: bool, chars: Vec<char> },
}

impl CondUnit {
    fn matches(&self, c: char) -> bool {
        match self {
            CondUnit::Any => true,
            CondUnit::Char(x) => *x == c,
            CondUnit::Set { negated, chars } => chars.contains(&c) != *negated,
        }
    }
}

/// Parse a condition such as `[^aeiou]y` or `.`.
///
/// An unterminated bracket takes the rest of the pattern as its set.
fn parse_condition(pattern: &str) -> Vec<CondUnit> {
    if pattern == "." {
        return Vec::new();
    }
    let mut units = Vec::new();
    let mut iter = pattern.chars().peekable();
    while let Some(c) = iter.next() {
        match c {
            '.' => units.push(CondUnit::Any),
            '[' => {
                let negated = iter.next_if_eq(&'^').is_some();
                let chars: Vec<char> = iter.by_ref().take_while(|&c| c != ']').collect();
                units.push(CondUnit::Set { negated, chars });
            }
            c => units.push(CondUnit::Char(c)),
        }
    }
    units
}

/// A single prefix or suffix rule.
#[derive(Debug, Clone)]
pub struct AffixRule {
    pub flag: Flag,
    pub kind: AffixKind,
    /// Text removed from the root when the affix is applied.
    pub strip: String,
    /// Text the affix puts on the surface word.
    pub add: String,
    /// May combine with an affix of the other kind.
    pub cross_product: bool,
    /// Continuation flags carried by the affix itself.
    pub contflags: FlagSet,
    condition: Vec<CondUnit>,
}

impl AffixRule {
    pub fn prefix(flag: Flag, strip: &str, add: &str, condition: &str) -> Self {
        Self::build(AffixKind::Prefix, flag, strip, add, condition)
    }

    pub fn suffix(flag: Flag, strip: &str, add: &str, condition: &str) -> Self {
        Self::build(AffixKind::Suffix, flag, strip, add, condition)
    }

    fn build(kind: AffixKind, flag: Flag, strip: &str, add: &str, condition: &str) -> Self {
        Self {
            flag,
            kind,
            strip: strip.to_string(),
            add: add.to_string(),
            cross_product: true,
            contflags: FlagSet::new(),
            condition: parse_condition(condition),
        }
    }

    /// Disallow combining this rule with an affix of the other kind.
    pub fn without_cross_product(mut self) -> Self {
        self.cross_product = false;
        self
    }

    pub fn with_contflags(mut self, flags: &str) -> Self {
        self.contflags = FlagSet::from_chars(flags);
        self
    }

    /// Reconstruct the root this rule would have produced `word` from.
    fn strip_from(&self, word: &str) -> Option<String> {
        let root = match self.kind {
            AffixKind::Suffix => {
                let base = word.strip_suffix(self.add.as_str())?;
                if base.is_empty() {
                    return None;
                }
                format!("{base}{}", self.strip)
            }
            AffixKind::Prefix => {
                let base = word.strip_prefix(self.add.as_str())?;
                if base.is_empty() {
                    return None;
                }
                format!("{}{base}", self.strip)
            }
        };
        self.condition_holds(&root).then_some(root)
    }

    fn condition_holds(&self, root: &str) -> bool {
        let chars: Vec<char> = root.chars().collect();
        let n = self.condition.len();
        if n > chars.len() {
            return false;
        }
        let window = match self.kind {
            AffixKind::Suffix => &chars[chars.len() - n..],
            AffixKind::Prefix => &chars[..n],
        };
        self.condition.iter().zip(window).all(|(u, &c)| u.matches(c))
    }
}

/// In-memory affix rule engine.
#[derive(Debug, Clone, Default)]
pub struct AffixTable {
    settings: AffixSettings,
    rules: Vec<AffixRule>,
}

impl AffixTable {
    pub fn new(settings: AffixSettings) -> Self {
        Self {
            settings,
            rules: Vec::new(),
        }
    }

    pub fn with_rule(mut self, rule: AffixRule) -> Self {
        self.rules.push(rule);
        self
    }

    fn usable(&self, rule: &AffixRule, mode: AffixMode) -> bool {
        mode == AffixMode::CompoundEnd || !rule.contflags.has(self.settings.only_in_compound)
    }

    /// First homonym of `root` carrying every flag in `flags`.
    fn root_with(dict: &dyn Dictionary, root: &str, flags: &[Flag]) -> Option<Entry> {
        dict.lookup(root)
            .iter()
            .find(|e| flags.iter().all(|&f| e.flags.contains(f)))
            .cloned()
    }

    fn rules_of(&self, kind: AffixKind, mode: AffixMode) -> impl Iterator<Item = &AffixRule> {
        self.rules
            .iter()
            .filter(move |r| r.kind == kind && self.usable(r, mode))
    }

    /// A homonym of `root` that can stand as the head or tail of a compound.
    fn compound_part(&self, dict: &dyn Dictionary, part: &str) -> Option<Entry> {
        let flag = self.settings.compound_flag?;
        dict.lookup(part)
            .iter()
            .find(|e| {
                e.flags.contains(flag)
                    && !e.has_flag(self.settings.forbidden_word)
                    && !e.has_flag(self.settings.pseudo_root)
            })
            .cloned()
    }

    /// Try every head of `chars` as one compound part; the tail is either a
    /// single part, an affixed last part or another compound. `words` counts
    /// the parts already consumed.
    fn compound_from(
        &self,
        dict: &dyn Dictionary,
        chars: &[char],
        words: usize,
        query: CompoundQuery,
    ) -> Option<Entry> {
        let min = self.settings.compound_min.max(1);
        let tail_min = if query.moving_rule { 1 } else { min };
        if chars.len() < min + tail_min || words + 2 > query.max_words {
            return None;
        }
        for split in min..=chars.len() - tail_min {
            let head: String = chars[..split].iter().collect();
            if self.compound_part(dict, &head).is_none() {
                continue;
            }
            let tail = &chars[split..];
            let tail_text: String = tail.iter().collect();
            if let Some(entry) = self.compound_part(dict, &tail_text) {
                return Some(entry);
            }
            if let Some(entry) = self
                .affix_check(dict, &tail_text, AffixMode::CompoundEnd)
                .filter(|e| e.has_flag(self.settings.compound_flag))
            {
                return Some(entry);
            }
            if words + 2 < query.max_words {
                if let Some(entry) = self.compound_from(dict, tail, words + 1, query) {
                    return Some(entry);
                }
            }
        }
        None
    }
}

impl AffixRules for AffixTable {
    fn settings(&self) -> &AffixSettings {
        &self.settings
    }

    fn affix_check(&self, dict: &dyn Dictionary, word: &str, mode: AffixMode) -> Option<Entry> {
        for rule in self.rules_of(AffixKind::Suffix, mode) {
            let Some(root) = rule.strip_from(word) else {
                continue;
            };
            if let Some(entry) = Self::root_with(dict, &root, &[rule.flag]) {
                return Some(entry);
            }
        }

        for prefix in self.rules_of(AffixKind::Prefix, mode) {
            let Some(inner) = prefix.strip_from(word) else {
                continue;
            };
            if let Some(entry) = Self::root_with(dict, &inner, &[prefix.flag]) {
                return Some(entry);
            }
            if !prefix.cross_product {
                continue;
            }
            for suffix in self.rules_of(AffixKind::Suffix, mode).filter(|r| r.cross_product) {
                let Some(root) = suffix.strip_from(&inner) else {
                    continue;
                };
                if let Some(entry) = Self::root_with(dict, &root, &[prefix.flag, suffix.flag]) {
                    return Some(entry);
                }
            }
        }
        None
    }

    fn compound_check(
        &self,
        dict: &dyn Dictionary,
        word: &str,
        query: CompoundQuery,
    ) -> Option<Entry> {
        if !self.settings.compounding_enabled() || query.max_words < 2 {
            return None;
        }
        let chars: Vec<char> = word.chars().collect();
        self.compound_from(dict, &chars, 0, query)
    }
}
