//! A [disjoint-set] forest with union by rank and path compression.
//!
//! [disjoint-set]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure

use std::fmt;

use core::hash::Hash;
use core::mem;

use tracing::trace;

use crate::collections::{Array, HashTable};

/// A partition of values into disjoint sets.
///
/// Values are stored once in an arena, in the order they were added. Each
/// slot records its parent slot, and every root records the rank and size of
/// its set.
///
/// # Examples
///
/// ```
/// use dsa_catalog::collections::DisjointSet;
///
/// let mut sets = DisjointSet::new();
/// for x in 1..=4 {
///     sets.make_set(x);
/// }
///
/// sets.union(&1, &2);
/// sets.union(&3, &4);
/// assert!(!sets.same_set(&1, &3));
/// assert_eq!(sets.set_count(), 2);
///
/// sets.union(&2, &3);
/// assert!(sets.same_set(&1, &4));
/// assert_eq!(sets.set_size(&4), Some(4));
/// ```
#[derive(Clone)]
pub struct DisjointSet<T> {
    values: Array<T>,
    parent: Array<usize>,
    /// Upper bound on the height of the tree below each root.
    rank: Array<usize>,
    /// Members in the set, only meaningful at roots.
    size: Array<usize>,
    index: HashTable<T, usize>,
    sets: usize,
}

impl<T> DisjointSet<T> {
    /// Creates an empty partition.
    #[inline]
    pub const fn new() -> Self {
        Self {
            values: Array::new(),
            parent: Array::new(),
            rank: Array::new(),
            size: Array::new(),
            index: HashTable::new(),
            sets: 0,
        }
    }

    /// Returns the number of values across all sets.
    #[inline]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no values have been added.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of disjoint sets.
    #[inline]
    pub const fn set_count(&self) -> usize {
        self.sets
    }

    /// Returns every set, each listing its members in the order they were
    /// added. Sets are ordered by their earliest member.
    pub fn sets(&self) -> Vec<Vec<&T>> {
        let mut groups: Vec<Vec<&T>> = Vec::with_capacity(self.sets);
        // Position in `groups` of each root's set.
        let mut group_of: HashTable<usize, usize> = HashTable::new();

        for (slot, value) in self.values.iter().enumerate() {
            let root = self.root(slot);
            let group = *group_of.get_or_insert_with(root, || {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group].push(value);
        }

        groups
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.values.clear();
        self.parent.clear();
        self.rank.clear();
        self.size.clear();
        self.index.clear();
        self.sets = 0;
    }

    /// Root of `slot`'s tree, without compressing.
    fn root(&self, mut slot: usize) -> usize {
        while self.parent[slot] != slot {
            slot = self.parent[slot];
        }
        slot
    }

    /// Root of `slot`'s tree. Every slot on the way is re-pointed directly at
    /// the root.
    fn root_compressing(&mut self, slot: usize) -> usize {
        let root = self.root(slot);

        let mut current = slot;
        while current != root {
            current = mem::replace(&mut self.parent[current], root);
        }

        root
    }
}

impl<T: Eq + Hash + Clone> DisjointSet<T> {
    /// Adds `value` as a set of its own. Returns `false` if it is already
    /// present, leaving its set unchanged.
    pub fn make_set(&mut self, value: T) -> bool {
        if self.index.contains_key(&value) {
            return false;
        }

        let slot = self.values.len();
        self.index.insert(value.clone(), slot);
        self.values.push(value);
        self.parent.push(slot);
        self.rank.push(0);
        self.size.push(1);
        self.sets += 1;

        true
    }

    /// Returns `true` if `value` has been added.
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.index.contains_key(value)
    }

    /// Returns the representative of `value`'s set, compressing the path to
    /// it along the way.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::DisjointSet;
    ///
    /// let mut sets: DisjointSet<_> = ["a", "b", "c"].into_iter().collect();
    /// sets.union(&"a", &"b");
    ///
    /// let root = sets.find(&"a").copied();
    /// assert_eq!(sets.find(&"b").copied(), root);
    /// assert_eq!(sets.find(&"c"), Some(&"c"));
    /// assert_eq!(sets.find(&"z"), None);
    /// ```
    pub fn find(&mut self, value: &T) -> Option<&T> {
        let slot = self.slot(value)?;
        let root = self.root_compressing(slot);
        self.values.get(root)
    }

    /// Merges the sets holding `a` and `b`.
    ///
    /// The root of lower rank is placed under the other. On equal ranks `a`'s
    /// root stays on top and its rank grows by one. Returns `false` if either
    /// value is missing or both are already in the same set.
    pub fn union(&mut self, a: &T, b: &T) -> bool {
        let (Some(a), Some(b)) = (self.slot(a), self.slot(b)) else {
            return false;
        };

        let mut root = self.root_compressing(a);
        let mut absorbed = self.root_compressing(b);
        if root == absorbed {
            return false;
        }

        if self.rank[root] < self.rank[absorbed] {
            mem::swap(&mut root, &mut absorbed);
        }
        if self.rank[root] == self.rank[absorbed] {
            self.rank[root] += 1;
        }

        self.parent[absorbed] = root;
        self.size[root] += self.size[absorbed];
        self.sets -= 1;

        trace!(root, absorbed, size = self.size[root], "merged sets");

        true
    }

    /// Returns `true` if `a` and `b` are both present and in the same set.
    pub fn same_set(&self, a: &T, b: &T) -> bool {
        match (self.slot(a), self.slot(b)) {
            (Some(a), Some(b)) => self.root(a) == self.root(b),
            _ => false,
        }
    }

    /// Returns the number of members in `value`'s set.
    pub fn set_size(&self, value: &T) -> Option<usize> {
        let slot = self.slot(value)?;
        Some(self.size[self.root(slot)])
    }

    /// Returns the members of `value`'s set in the order they were added, or
    /// an empty list if `value` is missing.
    pub fn members(&self, value: &T) -> Vec<&T> {
        let Some(slot) = self.slot(value) else {
            return Vec::new();
        };
        let root = self.root(slot);

        self.values
            .iter()
            .enumerate()
            .filter(|&(other, _)| self.root(other) == root)
            .map(|(_, value)| value)
            .collect()
    }

    #[inline]
    fn slot(&self, value: &T) -> Option<usize> {
        self.index.get(value).copied()
    }
}

impl<T> Default for DisjointSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> Extend<T> for DisjointSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.make_set(value);
        }
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for DisjointSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sets = Self::new();
        sets.extend(iter);
        sets
    }
}

impl<T: fmt::Debug> fmt::Debug for DisjointSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.sets()).finish()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn test_singletons() {
        let mut sets: DisjointSet<u8> = (0..5).collect();

        assert_eq!(sets.len(), 5);
        assert_eq!(sets.set_count(), 5);
        assert!(!sets.make_set(3));
        assert_eq!(sets.find(&3), Some(&3));
        assert_eq!(sets.set_size(&3), Some(1));
        assert!(sets.same_set(&2, &2));
    }

    #[test]
    fn test_missing_values() {
        let mut sets: DisjointSet<u8> = (0..2).collect();

        assert!(!sets.union(&0, &9));
        assert!(!sets.same_set(&9, &9));
        assert_eq!(sets.find(&9), None);
        assert_eq!(sets.set_size(&9), None);
        assert!(sets.members(&9).is_empty());
        assert_eq!(sets.set_count(), 2);
    }

    #[test]
    fn test_union_by_rank() {
        let mut sets: DisjointSet<u8> = (0..4).collect();

        // Equal ranks: the first argument's root wins.
        assert!(sets.union(&1, &0));
        assert_eq!(sets.find(&0), Some(&1));
        assert_eq!(sets.rank[1], 1);

        // The rank-0 root goes under the rank-1 root regardless of order.
        assert!(sets.union(&2, &0));
        assert_eq!(sets.find(&2), Some(&1));
        assert_eq!(sets.rank[1], 1);

        assert!(!sets.union(&0, &2));
        assert_eq!(sets.set_size(&0), Some(3));
        assert_eq!(sets.set_count(), 2);
    }

    #[test]
    fn test_find_compresses_path() {
        let mut sets: DisjointSet<u32> = (0..4).collect();

        // 3 hangs below 2, which hangs below 0.
        sets.union(&0, &1);
        sets.union(&2, &3);
        sets.union(&0, &2);
        assert_eq!(sets.parent[3], 2);

        assert_eq!(sets.find(&3), Some(&0));
        assert_eq!(sets.parent[3], 0);
    }

    #[test]
    fn test_members_and_sets() {
        let mut sets: DisjointSet<char> = "abcdef".chars().collect();
        sets.union(&'a', &'d');
        sets.union(&'e', &'b');
        sets.union(&'d', &'f');

        assert_eq!(sets.members(&'f'), [&'a', &'d', &'f']);
        assert_eq!(
            sets.sets(),
            [vec![&'a', &'d', &'f'], vec![&'b', &'e'], vec![&'c']]
        );
    }

    #[test]
    fn test_clear() {
        let mut sets: DisjointSet<i32> = (0..3).collect();
        sets.union(&0, &1);
        sets.clear();

        assert!(sets.is_empty());
        assert_eq!(sets.set_count(), 0);
        assert!(sets.sets().is_empty());
        assert!(sets.make_set(1));
    }

    #[test]
    fn test_seeded_random_unions() {
        let mut rng = StdRng::seed_from_u64(0xd15_0147);
        let mut sets: DisjointSet<u32> = (0..200).collect();
        // Naive labelling as the model.
        let mut label: Vec<u32> = (0..200).collect();

        for _ in 0..300 {
            let (a, b) = (rng.gen_range(0..200), rng.gen_range(0..200));
            let merged = sets.union(&a, &b);

            let (from, to) = (label[b as usize], label[a as usize]);
            assert_eq!(merged, from != to);
            for l in label.iter_mut() {
                if *l == from {
                    *l = to;
                }
            }
        }

        for a in 0..200u32 {
            let b = (a * 7 + 3) % 200;
            assert_eq!(sets.same_set(&a, &b), label[a as usize] == label[b as usize]);
        }

        let mut distinct = label.clone();
        distinct.sort_unstable();
        distinct.dedup();
        assert_eq!(sets.set_count(), distinct.len());

        let total: usize = sets.sets().iter().map(Vec::len).sum();
        assert_eq!(total, 200);
    }
}
