//! A hash set built on [`HashTable`] with unit values.

use std::fmt;

use core::hash::{BuildHasher, Hash};

use crate::collections::hash_table::{self, FnvBuildHasher, HashTable};

/// A set of unique values, backed by a [`HashTable`] mapping each member to
/// `()`.
///
/// # Examples
///
/// ```
/// use dsa_catalog::collections::HashSet;
///
/// let mut primes = HashSet::new();
/// assert!(primes.insert(2));
/// assert!(primes.insert(3));
/// assert!(!primes.insert(3));
///
/// assert!(primes.contains(&2));
/// assert_eq!(primes.len(), 2);
/// ```
#[derive(Clone)]
pub struct HashSet<T, H = FnvBuildHasher>
where
    T: Eq + Hash,
    H: BuildHasher,
{
    table: HashTable<T, (), H>,
}

/// An iterator over the members of a `HashSet`.
#[derive(Debug)]
pub struct Iter<'a, T> {
    inner: hash_table::Keys<'a, T, ()>,
}

impl<T: Eq + Hash> HashSet<T, FnvBuildHasher> {
    /// Creates an empty `HashSet`. Nothing is allocated until the first
    /// insertion.
    #[inline]
    pub const fn new() -> Self {
        Self {
            table: HashTable::new(),
        }
    }
}

impl<T: Eq + Hash, H: BuildHasher> HashSet<T, H> {
    /// Creates an empty `HashSet` that hashes members with `build_hasher`.
    #[inline]
    pub const fn with_hasher(build_hasher: H) -> Self {
        Self {
            table: HashTable::with_hasher(build_hasher),
        }
    }

    /// Adds a value to the set. Returns `false` if an equal value was already
    /// present, in which case the set is unchanged.
    #[inline]
    pub fn insert(&mut self, value: T) -> bool {
        if self.table.contains_key(&value) {
            return false;
        }
        self.table.insert(value, ());
        true
    }

    /// Removes a value from the set. Returns whether it was present.
    #[inline]
    pub fn remove(&mut self, value: &T) -> bool {
        self.table.remove(value).is_some()
    }

    /// Returns `true` if the set contains `value`.
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.table.contains_key(value)
    }

    /// Returns `true` if every member of `self` is also in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::HashSet;
    ///
    /// let small: HashSet<_> = [1, 2].into_iter().collect();
    /// let large: HashSet<_> = [1, 2, 3].into_iter().collect();
    ///
    /// assert!(small.is_subset(&large));
    /// assert!(large.is_superset(&small));
    /// assert!(!large.is_subset(&small));
    /// ```
    pub fn is_subset<S: BuildHasher>(&self, other: &HashSet<T, S>) -> bool {
        self.len() <= other.len() && self.iter().all(|value| other.contains(value))
    }

    /// Returns `true` if every member of `other` is also in `self`.
    #[inline]
    pub fn is_superset<S: BuildHasher>(&self, other: &HashSet<T, S>) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if the two sets share no members.
    pub fn is_disjoint<S: BuildHasher>(&self, other: &HashSet<T, S>) -> bool {
        self.iter().all(|value| !other.contains(value))
    }

    /// Returns an iterator over the members, in no particular order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.keys(),
        }
    }

    /// Removes every member.
    #[inline]
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns the number of members.
    #[inline]
    pub const fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set has no members.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<T, H> HashSet<T, H>
where
    T: Eq + Hash + Clone,
    H: BuildHasher + Clone,
{
    /// Returns the members found in either set.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::HashSet;
    ///
    /// let a: HashSet<_> = [1, 2, 3].into_iter().collect();
    /// let b: HashSet<_> = [3, 4].into_iter().collect();
    ///
    /// let mut all: Vec<_> = a.union(&b).iter().copied().collect();
    /// all.sort();
    /// assert_eq!(all, [1, 2, 3, 4]);
    /// ```
    pub fn union<S: BuildHasher>(&self, other: &HashSet<T, S>) -> Self {
        let mut union = self.clone();
        union.extend(other.iter().cloned());
        union
    }

    /// Returns the members found in both sets.
    pub fn intersection<S: BuildHasher>(&self, other: &HashSet<T, S>) -> Self {
        self.filtered(|value| other.contains(value))
    }

    /// Returns the members of `self` that are not in `other`.
    pub fn difference<S: BuildHasher>(&self, other: &HashSet<T, S>) -> Self {
        self.filtered(|value| !other.contains(value))
    }

    fn filtered(&self, mut keep: impl FnMut(&T) -> bool) -> Self {
        let mut set = Self::with_hasher(self.table.hasher().clone());
        for value in self.iter() {
            if keep(value) {
                set.insert(value.clone());
            }
        }
        set
    }
}

impl<T: Eq + Hash, H: BuildHasher + Default> Default for HashSet<T, H> {
    fn default() -> Self {
        Self::with_hasher(H::default())
    }
}

impl<T: Eq + Hash, H: BuildHasher> PartialEq for HashSet<T, H> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl<T: Eq + Hash, H: BuildHasher> Eq for HashSet<T, H> {}

impl<T: Eq + Hash + fmt::Debug, H: BuildHasher> fmt::Debug for HashSet<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Eq + Hash, H: BuildHasher> Extend<T> for HashSet<T, H> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Eq + Hash, H: BuildHasher + Default> FromIterator<T> for HashSet<T, H> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<'a, T: Eq + Hash, H: BuildHasher> IntoIterator for &'a HashSet<T, H> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted<T: Ord + Clone + Eq + Hash>(set: &HashSet<T>) -> Vec<T> {
        let mut values: Vec<T> = set.iter().cloned().collect();
        values.sort();
        values
    }

    #[test]
    fn test_insert_remove() {
        let mut set = HashSet::new();

        assert!(set.insert("a"));
        assert!(!set.insert("a"));
        assert_eq!(set.len(), 1);

        assert!(set.remove(&"a"));
        assert!(!set.remove(&"a"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_set_algebra() {
        let a: HashSet<u32> = (0..10).collect();
        let b: HashSet<u32> = (5..15).collect();

        assert_eq!(sorted(&a.union(&b)), (0..15).collect::<Vec<_>>());
        assert_eq!(sorted(&a.intersection(&b)), (5..10).collect::<Vec<_>>());
        assert_eq!(sorted(&a.difference(&b)), (0..5).collect::<Vec<_>>());
        assert_eq!(sorted(&b.difference(&a)), (10..15).collect::<Vec<_>>());

        assert!(!a.is_disjoint(&b));
        assert!(a.difference(&b).is_disjoint(&b));
        assert!(a.intersection(&b).is_subset(&a));
        assert!(a.is_superset(&a.intersection(&b)));
    }

    #[test]
    fn test_empty_set_relations() {
        let empty: HashSet<u8> = HashSet::new();
        let some: HashSet<u8> = [1].into_iter().collect();

        assert!(empty.is_subset(&some));
        assert!(empty.is_subset(&empty));
        assert!(empty.is_disjoint(&some));
        assert!(!some.is_subset(&empty));
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: HashSet<i32> = [3, 1, 2].into_iter().collect();
        let b: HashSet<i32> = [1, 2, 3, 3].into_iter().collect();

        assert_eq!(a, b);
        assert_eq!(format!("{:?}", HashSet::<i32>::new()), "{}");
    }
}
