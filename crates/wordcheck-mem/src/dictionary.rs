// Hash-table dictionary with homonym chains

use hashbrown::HashMap;
use wordcheck_core::flags::FlagSet;
use wordcheck_core::services::{AffixTemplate, Dictionary, DictionaryError, Entry};

/// A dictionary kept entirely in memory.
///
/// Homonyms of one written form are kept in insertion order; the first one
/// is the head entry the forbidden check looks at.
#[derive(Debug, Clone, Default)]
pub struct HashDictionary {
    words: HashMap<String, Vec<Entry>>,
    count: usize,
}

impl HashDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from `(word, flags)` pairs, one character per flag.
    pub fn from_words<'a>(words: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut dict = Self::new();
        for (word, flags) in words {
            dict.add(Entry::new(word, FlagSet::from_chars(flags)));
        }
        dict
    }

    /// Append an entry to the homonym chain of its word.
    pub fn add(&mut self, entry: Entry) {
        self.words.entry(entry.word.clone()).or_default().push(entry);
        self.count += 1;
    }

    /// Builder form of [`add`](Self::add).
    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.add(entry);
        self
    }

    /// Number of entries, homonyms counted separately.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Dictionary for HashDictionary {
    fn lookup(&self, word: &str) -> &[Entry] {
        self.words.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    fn insert(&mut self, word: &str, template: AffixTemplate<'_>) -> Result<(), DictionaryError> {
        if word.is_empty() {
            return Err(DictionaryError::EmptyWord);
        }
        let flags = match template {
            AffixTemplate::None => FlagSet::new(),
            AffixTemplate::Flags(flags) => FlagSet::from_chars(flags),
            AffixTemplate::LikeWord(model) => self
                .lookup(model)
                .first()
                .map(|e| e.flags.clone())
                .ok_or_else(|| DictionaryError::UnknownModel(model.to_string()))?,
        };
        self.add(Entry::new(word, flags));
        Ok(())
    }

    fn entries(&self) -> Box<dyn Iterator<Item = &Entry> + '_> {
        Box::new(self.words.values().flatten())
    }
}
