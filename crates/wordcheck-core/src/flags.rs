// Affix flags attached to dictionary roots

/// An affix flag identifier.
pub type Flag = u16;

/// Default flag id marking forbidden words.
pub const DEFAULT_FORBIDDEN_FLAG: Flag = 65510;

/// A sorted, duplicate-free set of affix flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FlagSet(Vec<Flag>);

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from flags given in any order.
    pub fn from_flags(flags: impl IntoIterator<Item = Flag>) -> Self {
        let mut v: Vec<Flag> = flags.into_iter().collect();
        v.sort_unstable();
        v.dedup();
        Self(v)
    }

    /// Build a set from one-character flags ("AB" -> {'A', 'B'}).
    ///
    /// Characters beyond U+FFFF are skipped.
    pub fn from_chars(flags: &str) -> Self {
        Self::from_flags(flags.chars().filter_map(|c| Flag::try_from(u32::from(c)).ok()))
    }

    pub fn contains(&self, flag: Flag) -> bool {
        self.0.binary_search(&flag).is_ok()
    }

    /// Test an optional flag: an unset (`None`) flag is never present.
    pub fn has(&self, flag: Option<Flag>) -> bool {
        flag.is_some_and(|f| self.contains(f))
    }

    pub fn insert(&mut self, flag: Flag) {
        if let Err(pos) = self.0.binary_search(&flag) {
            self.0.insert(pos, flag);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        Self::from_flags(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_sorted_and_unique() {
        let set = FlagSet::from_flags([5, 1, 5, 3]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3, 5]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn from_chars_uses_code_points() {
        let set = FlagSet::from_chars("BA");
        assert!(set.contains(u16::from(b'A')));
        assert!(set.contains(u16::from(b'B')));
        assert!(!set.contains(u16::from(b'C')));
    }

    #[test]
    fn unset_flag_is_never_present() {
        let set = FlagSet::from_flags([0]);
        assert!(!set.has(None));
        assert!(set.has(Some(0)));
    }

    #[test]
    fn insert_keeps_order() {
        let mut set = FlagSet::new();
        set.insert(9);
        set.insert(2);
        set.insert(9);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![2, 9]);
    }
}
