use crate::engine::entry::{Pairing, RecentGroup};
use fxhash::FxHashSet;

/// Pairings seen together in recent runs
#[derive(Debug, Clone, Default)]
pub struct RecentPairSet {
    pairs: FxHashSet<Pairing>,
}

impl RecentPairSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every pairing inside each group; groups below two members add nothing
    pub fn from_groups(groups: &[RecentGroup]) -> Self {
        let mut set = Self::new();
        for members in groups {
            set.add_group(members);
        }
        set
    }

    pub fn add_group(&mut self, members: &[String]) {
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                self.pairs.insert(Pairing::new(a, b));
            }
        }
    }

    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.pairs.contains(&Pairing::new(a, b))
    }

    /// True when any two members of the group were paired recently
    pub fn conflicts_with(&self, group: &[String]) -> bool {
        group
            .iter()
            .enumerate()
            .any(|(i, a)| group[i + 1..].iter().any(|b| self.contains(a, b)))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(ids: &[&str]) -> RecentGroup {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_groups_records_all_pairs() {
        let set = RecentPairSet::from_groups(&[group(&["a", "b", "c"]), group(&["d"])]);
        assert_eq!(set.len(), 3);
        assert!(set.contains("a", "b"));
        assert!(set.contains("c", "a"));
        assert!(set.contains("b", "c"));
        assert!(!set.contains("a", "d"));
    }

    #[test]
    fn test_reversed_pairs_are_counted_once() {
        let set = RecentPairSet::from_groups(&[group(&["a", "b"]), group(&["b", "a"])]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_conflicts_with() {
        let set = RecentPairSet::from_groups(&[group(&["a", "b"])]);
        assert!(set.conflicts_with(&group(&["c", "b", "a"])));
        assert!(!set.conflicts_with(&group(&["a", "c", "d"])));
        assert!(!set.conflicts_with(&[]));
    }

    #[test]
    fn test_empty_history() {
        let set = RecentPairSet::from_groups(&[]);
        assert!(set.is_empty());
        assert!(!set.conflicts_with(&group(&["a", "b"])));
    }
}
