// Bounded, ordered suggestion list

/// An ordered, capacity-bounded list of suggestion candidates.
///
/// Position reflects rank: index 0 is the best candidate. Appending to a
/// full list is refused, while [`insert_front`](Self::insert_front) evicts
/// the last (lowest-ranked) entry to make room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionList {
    items: Vec<String>,
    capacity: usize,
}

impl SuggestionList {
    /// Create an empty list holding at most `capacity` candidates.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn contains(&self, word: &str) -> bool {
        self.items.iter().any(|s| s == word)
    }

    /// Append a candidate. Returns `false` if the list is full.
    pub fn push(&mut self, word: impl Into<String>) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(word.into());
        true
    }

    /// Append a candidate unless it is already present or the list is full.
    pub fn push_unique(&mut self, word: &str) -> bool {
        if self.contains(word) {
            return false;
        }
        self.push(word)
    }

    /// Insert a candidate at the front, evicting the last entry if the list
    /// is full. A zero-capacity list stays empty.
    pub fn insert_front(&mut self, word: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.is_full() {
            self.items.pop();
        }
        self.items.insert(0, word.into());
    }

    /// Move the candidate at `index` to the front, shifting the ones before
    /// it down by one.
    pub fn move_to_front(&mut self, index: usize) {
        if index < self.items.len() {
            self.items[..=index].rotate_right(1);
        }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut String> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.items.iter_mut()
    }

    /// Apply `f` to every candidate in place, dropping those for which it
    /// returns `None`. Order of the survivors is kept.
    pub fn filter_map_in_place(&mut self, mut f: impl FnMut(&str) -> Option<String>) {
        let items = std::mem::take(&mut self.items);
        self.items = items.iter().filter_map(|s| f(s)).collect();
    }

    /// Drop every candidate equal to an earlier one, keeping first
    /// occurrences in order.
    pub fn dedup(&mut self) {
        let mut kept: Vec<String> = Vec::with_capacity(self.items.len());
        for item in self.items.drain(..) {
            if !kept.contains(&item) {
                kept.push(item);
            }
        }
        self.items = kept;
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

impl<'a> IntoIterator for &'a SuggestionList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(capacity: usize, words: &[&str]) -> SuggestionList {
        let mut l = SuggestionList::new(capacity);
        for w in words {
            l.push(*w);
        }
        l
    }

    #[test]
    fn push_respects_capacity() {
        let mut l = SuggestionList::new(2);
        assert!(l.push("a"));
        assert!(l.push("b"));
        assert!(!l.push("c"));
        assert!(l.is_full());
        assert_eq!(l.into_vec(), vec!["a", "b"]);
    }

    #[test]
    fn insert_front_evicts_last_when_full() {
        let mut l = list(3, &["a", "b", "c"]);
        l.insert_front("x");
        assert_eq!(l.into_vec(), vec!["x", "a", "b"]);
    }

    #[test]
    fn insert_front_into_zero_capacity() {
        let mut l = SuggestionList::new(0);
        l.insert_front("x");
        assert!(l.is_empty());
    }

    #[test]
    fn move_to_front_shifts_preceding() {
        let mut l = list(5, &["a", "b", "c", "d"]);
        l.move_to_front(2);
        assert_eq!(l.into_vec(), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let mut l = list(6, &["b", "a", "b", "c", "a"]);
        l.dedup();
        assert_eq!(l.into_vec(), vec!["b", "a", "c"]);
    }

    #[test]
    fn filter_map_drops_and_rewrites() {
        let mut l = list(4, &["one", "two", "three"]);
        l.filter_map_in_place(|s| (s != "two").then(|| s.to_uppercase()));
        assert_eq!(l.into_vec(), vec!["ONE", "THREE"]);
    }

    #[test]
    fn push_unique_skips_existing() {
        let mut l = list(4, &["a"]);
        assert!(!l.push_unique("a"));
        assert!(l.push_unique("b"));
        assert_eq!(l.len(), 2);
    }
}
