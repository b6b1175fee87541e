//! Identity-keyed pairing of schema elements across two snapshots
//!
//! [`SetPair`] splits a "new" and an "old" collection into the elements
//! only present in new (`added`), only present in old (`removed`), and
//! the identity-matched [`Pair`]s. [`Pair`] holds one new/old
//! correspondence and lets the rules drill from schema to type to field
//! to argument.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// A single new/old correspondence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair<T> {
    pub new: T,
    pub old: T,
}

impl<T> Pair<T> {
    pub fn new(new: T, old: T) -> Self {
        Self { new, old }
    }

    /// Apply the same transform to both sides
    pub fn map<U, F>(self, transform: F) -> Pair<U>
    where
        F: Fn(T) -> U,
    {
        Pair {
            new: transform(self.new),
            old: transform(self.old),
        }
    }

    /// True when both sides project to equal values
    pub fn eq_by<U, F>(&self, projection: F) -> bool
    where
        U: PartialEq,
        F: Fn(&T) -> U,
    {
        projection(&self.new) == projection(&self.old)
    }
}

impl<'a, T: ?Sized> Pair<&'a T> {
    /// Pair up a sub-collection selected from both sides
    pub fn diff_on<U, I, K, S, F>(self, selector: S, identity: F) -> SetPair<'a, U>
    where
        S: Fn(&'a T) -> I,
        I: IntoIterator<Item = &'a U>,
        U: 'a,
        F: Fn(&'a U) -> K,
        K: Eq + Hash,
    {
        SetPair::new(selector(self.new), selector(self.old), identity)
    }
}

/// Partition of two collections by identity key
#[derive(Debug, Clone)]
pub struct SetPair<'a, T> {
    /// Present in new only, in new's order
    pub added: Vec<&'a T>,
    /// Present in old only, in old's order
    pub removed: Vec<&'a T>,
    /// Identity-matched pairs, in new's order
    pub paired: Vec<Pair<&'a T>>,
}

impl<'a, T> SetPair<'a, T> {
    pub fn new<A, B, K, F>(new: A, old: B, identity: F) -> Self
    where
        A: IntoIterator<Item = &'a T>,
        B: IntoIterator<Item = &'a T>,
        F: Fn(&'a T) -> K,
        K: Eq + Hash,
    {
        let new: Vec<&'a T> = new.into_iter().collect();
        let old: Vec<&'a T> = old.into_iter().collect();

        let mut old_by_key: HashMap<K, &'a T> = HashMap::with_capacity(old.len());
        for &item in &old {
            old_by_key.entry(identity(item)).or_insert(item);
        }
        let new_keys: HashSet<K> = new.iter().map(|&item| identity(item)).collect();

        let mut added = Vec::new();
        let mut paired = Vec::new();
        for &item in &new {
            match old_by_key.get(&identity(item)) {
                Some(&matched) => paired.push(Pair::new(item, matched)),
                None => added.push(item),
            }
        }

        let removed = old
            .into_iter()
            .filter(|&item| !new_keys.contains(&identity(item)))
            .collect();

        Self {
            added,
            removed,
            paired,
        }
    }

    /// Combined size of all three partitions; zero means nothing to compare
    pub fn total_cardinality(&self) -> usize {
        self.added.len() + self.removed.len() + self.paired.len()
    }

    pub fn has_added(&self) -> bool {
        !self.added.is_empty()
    }

    pub fn has_removed(&self) -> bool {
        !self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item {
        name: &'static str,
        value: u32,
    }

    fn item(name: &'static str, value: u32) -> Item {
        Item { name, value }
    }

    #[test]
    fn test_partitions_by_identity() {
        let new = vec![item("a", 1), item("b", 2), item("d", 4)];
        let old = vec![item("c", 3), item("b", 20), item("a", 10)];

        let set = SetPair::new(&new, &old, |i: &Item| i.name);

        let added: Vec<_> = set.added.iter().map(|i| i.name).collect();
        let removed: Vec<_> = set.removed.iter().map(|i| i.name).collect();
        let paired: Vec<_> = set.paired.iter().map(|p| (p.new.value, p.old.value)).collect();

        assert_eq!(added, vec!["d"]);
        assert_eq!(removed, vec!["c"]);
        assert_eq!(paired, vec![(1, 10), (2, 20)]);
        assert_eq!(set.total_cardinality(), 4);
    }

    #[test]
    fn test_empty_collections() {
        let empty: Vec<Item> = Vec::new();
        let set = SetPair::new(&empty, &empty, |i: &Item| i.name);
        assert_eq!(set.total_cardinality(), 0);
        assert!(!set.has_added());
        assert!(!set.has_removed());
    }

    #[test]
    fn test_first_old_match_wins_for_duplicates() {
        let new = vec![item("a", 1)];
        let old = vec![item("a", 10), item("a", 11)];
        let set = SetPair::new(&new, &old, |i: &Item| i.name);
        assert_eq!(set.paired.len(), 1);
        assert_eq!(set.paired[0].old.value, 10);
        assert!(set.removed.is_empty());
    }

    #[test]
    fn test_pair_helpers() {
        let new = item("a", 1);
        let old = item("a", 2);
        let pair = Pair::new(&new, &old);

        assert!(pair.eq_by(|i| i.name));
        assert!(!pair.eq_by(|i| i.value));

        let values = pair.map(|i| i.value * 10);
        assert_eq!(values, Pair::new(10, 20));
    }

    #[test]
    fn test_diff_on_subcollection() {
        struct Holder {
            items: Vec<Item>,
        }
        let new = Holder { items: vec![item("x", 1), item("y", 2)] };
        let old = Holder { items: vec![item("y", 2), item("z", 3)] };

        let set = Pair::new(&new, &old).diff_on(|h| &h.items, |i: &Item| i.name);
        assert_eq!(set.added.len(), 1);
        assert_eq!(set.removed.len(), 1);
        assert_eq!(set.paired.len(), 1);
    }
}
