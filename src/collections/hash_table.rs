//! [Hash Table] implementation with separate chaining.
//!
//! Every bucket is an [`Array`] of key/value pairs that is scanned linearly.
//! The table doubles its bucket count once the number of entries exceeds
//! three quarters of it, and can be rehashed into an explicit bucket count
//! with [`HashTable::resize`].
//!
//! [Hash Table]: https://en.wikipedia.org/wiki/Hash_table

use std::fmt;

use core::hash::{BuildHasher, Hash, Hasher};
use core::iter::Flatten;
use core::mem;
use core::ops::Index;

use tracing::debug;

use crate::collections::{array, Array};
use crate::error::{Error, Result};

/// Fowler–Noll–Vo (FNV-1a) non-cryptographic hash function
#[derive(Debug, Copy, Clone)]
pub struct FnvHasher {
    hash: u64,
}

impl FnvHasher {
    const FNV_PRIME: u64 = 0x100000001B3;
    const FNV_OFFSET_BASIS: u64 = 0xCBF29CE484222325;

    /// Creates a new [`FnvHasher`], initialized with `FNV_OFFSET_BASIS`.
    pub const fn new() -> Self {
        Self {
            hash: FnvHasher::FNV_OFFSET_BASIS,
        }
    }
}

impl Default for FnvHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for FnvHasher {
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.hash ^= *byte as u64;
            self.hash = self.hash.wrapping_mul(Self::FNV_PRIME);
        }
    }
}

/// Builder for [`FnvHasher`]
#[derive(Debug, Copy, Clone, Default)]
pub struct FnvBuildHasher;

impl BuildHasher for FnvBuildHasher {
    type Hasher = FnvHasher;

    fn build_hasher(&self) -> Self::Hasher {
        Self::Hasher::new()
    }
}

/// Bucket count allocated by the first insertion into a lazily created table.
pub const INITIAL_BUCKETS: usize = 8;

/// [Hash Table] implementation with separate chaining.
///
/// Keys are hashed with FNV-1a unless another [`BuildHasher`] is supplied.
///
/// [Hash Table]: https://en.wikipedia.org/wiki/Hash_table
pub struct HashTable<K, V, H = FnvBuildHasher> {
    /// One chain per bucket. Empty until the first insertion when created
    /// lazily.
    buckets: Array<Array<(K, V)>>,
    /// Number of entries across all chains.
    len: usize,
    /// Builds the hasher for per-key hashing.
    build_hasher: H,
}

/// An iterator over the entries of a `HashTable<K, V>`.
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Array<(K, V)>>,
    chain: core::slice::Iter<'a, (K, V)>,
    remaining: usize,
}

/// An iterator over the keys of a `HashTable<K, V>`.
#[derive(Debug)]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `HashTable<K, V>`.
#[derive(Debug)]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An owning iterator over the entries of a `HashTable<K, V>`.
#[derive(Debug)]
pub struct IntoIter<K, V> {
    inner: Flatten<array::IntoIter<Array<(K, V)>>>,
    remaining: usize,
}

impl<K, V> HashTable<K, V, FnvBuildHasher> {
    /// Creates an empty `HashTable<K, V>`.
    ///
    /// No buckets are allocated until the first insertion, which creates
    /// [`INITIAL_BUCKETS`] of them.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::HashTable;
    ///
    /// let table: HashTable<&str, i32> = HashTable::new();
    /// assert_eq!(table.bucket_count(), 0);
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            buckets: Array::new(),
            len: 0,
            build_hasher: FnvBuildHasher,
        }
    }

    /// Creates an empty `HashTable` with exactly `buckets` buckets.
    ///
    /// # Panics
    ///
    /// Panics if `buckets` is zero. See [`try_with_buckets`] for a
    /// non-panicking version.
    ///
    /// [`try_with_buckets`]: HashTable::try_with_buckets
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::HashTable;
    ///
    /// let table: HashTable<u32, u32> = HashTable::with_buckets(3);
    /// assert_eq!(table.bucket_count(), 3);
    /// ```
    #[inline]
    pub fn with_buckets(buckets: usize) -> Self {
        Self::with_buckets_and_hasher(buckets, FnvBuildHasher)
    }

    /// Creates an empty `HashTable` with exactly `buckets` buckets, or
    /// [`Error::ZeroBuckets`] if `buckets` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::HashTable;
    /// use dsa_catalog::error::Error;
    ///
    /// let err = HashTable::<u8, u8>::try_with_buckets(0).unwrap_err();
    /// assert_eq!(err, Error::ZeroBuckets);
    /// ```
    #[inline]
    pub fn try_with_buckets(buckets: usize) -> Result<Self> {
        Self::try_with_buckets_and_hasher(buckets, FnvBuildHasher)
    }
}

impl<K, V, H> HashTable<K, V, H> {
    /// Creates an empty `HashTable` which will use the given hash builder to
    /// hash keys. Buckets are allocated lazily, as with [`HashTable::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::HashTable;
    /// use std::hash::RandomState;
    ///
    /// let mut table = HashTable::with_hasher(RandomState::new());
    /// table.insert(1, 2);
    /// assert_eq!(table.get(&1), Some(&2));
    /// ```
    #[inline]
    pub const fn with_hasher(build_hasher: H) -> Self {
        Self {
            buckets: Array::new(),
            len: 0,
            build_hasher,
        }
    }

    /// Creates an empty `HashTable` with exactly `buckets` buckets, using
    /// `build_hasher` to hash the keys.
    ///
    /// # Panics
    ///
    /// Panics if `buckets` is zero.
    pub fn with_buckets_and_hasher(buckets: usize, build_hasher: H) -> Self {
        match Self::try_with_buckets_and_hasher(buckets, build_hasher) {
            Ok(table) => table,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible version of [`with_buckets_and_hasher`].
    ///
    /// [`with_buckets_and_hasher`]: HashTable::with_buckets_and_hasher
    pub fn try_with_buckets_and_hasher(buckets: usize, build_hasher: H) -> Result<Self> {
        if buckets == 0 {
            return Err(Error::ZeroBuckets);
        }

        Ok(Self {
            buckets: empty_buckets(buckets),
            len: 0,
            build_hasher,
        })
    }

    /// Returns an iterator over all key/value pairs, in bucket order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: Default::default(),
            remaining: self.len,
        }
    }

    /// Returns an iterator over all keys, in bucket order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over all values, in bucket order.
    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Removes every entry. The buckets themselves are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert('a', 1);
    /// table.clear();
    ///
    /// assert!(table.is_empty());
    /// assert_eq!(table.bucket_count(), 8);
    /// ```
    pub fn clear(&mut self) {
        for chain in self.buckets.iter_mut() {
            chain.clear();
        }
        self.len = 0;
    }

    /// Returns the number of entries in the table.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no entries.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets currently allocated.
    #[inline]
    pub const fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Ratio of entries to buckets, `0.0` when no buckets are allocated.
    #[inline]
    pub fn load_factor(&self) -> f64 {
        if self.buckets.is_empty() {
            0.0
        } else {
            self.len as f64 / self.buckets.len() as f64
        }
    }

    /// Returns a reference to the table's hash builder.
    #[inline]
    pub const fn hasher(&self) -> &H {
        &self.build_hasher
    }
}

impl<K: Eq + Hash, V, H: BuildHasher> HashTable<K, V, H> {
    /// Inserts a key-value pair into the table.
    ///
    /// If the table did not have this key present, [`None`] is returned.
    ///
    /// If the table did have this key present, the value is updated, and the
    /// old value is returned, but the key is not updated.
    ///
    /// # Time Complexity
    ///
    /// Takes amortized *O*(1) time. Crossing the load factor threshold costs
    /// *O*(*n*) to rehash every entry into twice as many buckets, which is
    /// offset by the insertions it allows before the next rehash.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// assert_eq!(table.insert(37, "a"), None);
    /// assert_eq!(table.is_empty(), false);
    ///
    /// table.insert(37, "b");
    /// assert_eq!(table.insert(37, "c"), Some("b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.buckets.is_empty() {
            self.rehash(INITIAL_BUCKETS);
        }

        let slot = self.slot(&key);
        let chain = &mut self.buckets[slot];

        if let Some((_, old)) = chain.iter_mut().find(|(k, _)| *k == key) {
            return Some(mem::replace(old, value));
        }

        chain.push((key, value));
        self.len += 1;

        // Load factor of 3/4.
        if self.len * 4 > self.buckets.len() * 3 {
            self.rehash(self.buckets.len() * 2);
        }

        None
    }

    /// Returns the value for `key`, first inserting `make()` if the key is
    /// absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::HashTable;
    ///
    /// let mut counts = HashTable::new();
    /// for word in ["a", "b", "a"] {
    ///     *counts.get_or_insert_with(word, || 0) += 1;
    /// }
    /// assert_eq!(counts[&"a"], 2);
    /// assert_eq!(counts[&"b"], 1);
    /// ```
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, make: F) -> &mut V {
        if self.buckets.is_empty() {
            self.rehash(INITIAL_BUCKETS);
        }

        let slot = self.slot(&key);
        let (slot, index) = match self.buckets[slot].iter().position(|(k, _)| *k == key) {
            Some(index) => (slot, index),
            None => {
                if (self.len + 1) * 4 > self.buckets.len() * 3 {
                    self.rehash(self.buckets.len() * 2);
                }

                let slot = self.slot(&key);
                self.buckets[slot].push((key, make()));
                self.len += 1;

                (slot, self.buckets[slot].len() - 1)
            }
        };

        &mut self.buckets[slot][index].1
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Time Complexity
    ///
    /// Takes average *O*(1) time. Worst case is *O*(*n*) when every key lands
    /// in the same chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert(1, "a");
    /// assert_eq!(table.get(&1), Some(&"a"));
    /// assert_eq!(table.get(&2), None);
    /// ```
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert(1, "a");
    /// if let Some(x) = table.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(table[&1], "b");
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        if self.buckets.is_empty() {
            return None;
        }

        let slot = self.slot(key);
        self.buckets[slot]
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns the key/value pair corresponding to the supplied key.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        if self.buckets.is_empty() {
            return None;
        }

        self.buckets[self.slot(key)]
            .iter()
            .find(|(k, _)| k == key)
            .map(|(k, v)| (k, v))
    }

    /// Removes a key from the table, returning its value if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert(1, "a");
    /// assert_eq!(table.remove(&1), Some("a"));
    /// assert_eq!(table.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        if self.buckets.is_empty() {
            return None;
        }

        let slot = self.slot(key);
        let chain = &mut self.buckets[slot];

        // Chain order carries no meaning, so the cheaper removal is fine.
        let position = chain.iter().position(|(k, _)| k == key)?;
        let (_, value) = chain.swap_remove(position)?;

        self.len -= 1;

        Some(value)
    }

    /// Returns `true` if the table contains a value for the specified key.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get_key_value(key).is_some()
    }

    /// Rehashes every entry into exactly `buckets` fresh buckets.
    ///
    /// Shrinking below the entry count is allowed. The chains simply grow
    /// longer until the next insertion crosses the load factor threshold.
    ///
    /// # Panics
    ///
    /// Panics if `buckets` is zero. See [`try_resize`](HashTable::try_resize)
    /// for a non-panicking version.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::HashTable;
    ///
    /// let mut table: HashTable<_, _> = (0..6).map(|i| (i, i * i)).collect();
    /// table.resize(64);
    ///
    /// assert_eq!(table.bucket_count(), 64);
    /// assert_eq!(table.get(&5), Some(&25));
    /// ```
    pub fn resize(&mut self, buckets: usize) {
        if let Err(err) = self.try_resize(buckets) {
            panic!("{err}");
        }
    }

    /// Fallible version of [`resize`](HashTable::resize), returning
    /// [`Error::ZeroBuckets`] instead of panicking.
    pub fn try_resize(&mut self, buckets: usize) -> Result<()> {
        if buckets == 0 {
            return Err(Error::ZeroBuckets);
        }

        self.rehash(buckets);

        Ok(())
    }

    /// Copies every entry of `other` into this table, overwriting the values
    /// of keys present in both.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::HashTable;
    ///
    /// let mut a: HashTable<_, _> = [("x", 1), ("y", 2)].into_iter().collect();
    /// let b: HashTable<_, _> = [("y", 20), ("z", 30)].into_iter().collect();
    ///
    /// a.merge(&b);
    /// assert_eq!(a.len(), 3);
    /// assert_eq!(a[&"y"], 20);
    /// ```
    pub fn merge<S>(&mut self, other: &HashTable<K, V, S>)
    where
        K: Clone,
        V: Clone,
    {
        for (key, value) in other {
            self.insert(key.clone(), value.clone());
        }
    }

    /// Index of the chain holding `key`. The table must have buckets.
    #[inline]
    fn slot(&self, key: &K) -> usize {
        bucket_for(&self.build_hasher, key, self.buckets.len())
    }

    fn rehash(&mut self, buckets: usize) {
        let old = mem::replace(&mut self.buckets, empty_buckets(buckets));

        debug!(
            old_buckets = old.len(),
            new_buckets = buckets,
            entries = self.len,
            "rehashing hash table"
        );

        for (key, value) in old.into_iter().flatten() {
            let slot = bucket_for(&self.build_hasher, &key, buckets);
            self.buckets[slot].push((key, value));
        }
    }
}

fn empty_buckets<K, V>(buckets: usize) -> Array<Array<(K, V)>> {
    (0..buckets).map(|_| Array::new()).collect()
}

#[inline]
fn bucket_for<K: Hash, H: BuildHasher>(build_hasher: &H, key: &K, buckets: usize) -> usize {
    (build_hasher.hash_one(key) % buckets as u64) as usize
}

impl<K, V, H: Default> Default for HashTable<K, V, H> {
    fn default() -> Self {
        Self::with_hasher(H::default())
    }
}

impl<K: Clone, V: Clone, H: Clone> Clone for HashTable<K, V, H> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            len: self.len,
            build_hasher: self.build_hasher.clone(),
        }
    }
}

impl<K, V, H> fmt::Debug for HashTable<K, V, H>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, H> PartialEq for HashTable<K, V, H>
where
    K: Eq + Hash,
    V: PartialEq,
    H: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Eq + Hash, V: Eq, H: BuildHasher> Eq for HashTable<K, V, H> {}

impl<K: Eq + Hash, V, H: BuildHasher> Extend<(K, V)> for HashTable<K, V, H> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, H> FromIterator<(K, V)> for HashTable<K, V, H>
where
    K: Eq + Hash,
    H: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

impl<K, V, H> Index<&K> for HashTable<K, V, H>
where
    K: Eq + Hash,
    H: BuildHasher,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present in the table.
    #[inline]
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<'a, K, V, H> IntoIterator for &'a HashTable<K, V, H> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, H> IntoIterator for HashTable<K, V, H> {
    type IntoIter = IntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            remaining: self.len,
            inner: self.buckets.into_iter().flatten(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((k, v)) = self.chain.next() {
                self.remaining -= 1;
                return Some((k, v));
            }

            self.chain = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next()?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

// https://github.com/rust-lang/rust/blob/master/library/std/src/collections/hash/map/tests.rs
#[cfg(test)]
mod tests {
    use std::hash::RandomState;

    use super::*;

    /// Sends every key to the same bucket.
    #[derive(Debug, Clone, Default)]
    struct ConstantHasher;

    impl Hasher for ConstantHasher {
        fn finish(&self) -> u64 {
            0
        }

        fn write(&mut self, _: &[u8]) {}
    }

    impl BuildHasher for ConstantHasher {
        type Hasher = ConstantHasher;

        fn build_hasher(&self) -> Self::Hasher {
            ConstantHasher
        }
    }

    #[test]
    fn test_lazy_buckets() {
        let m: HashTable<i32, i32> = HashTable::new();
        assert_eq!(m.bucket_count(), 0);
        assert_eq!(m.load_factor(), 0.0);

        let m: HashTable<i32, i32> = HashTable::default();
        assert_eq!(m.bucket_count(), 0);

        let m: HashTable<i32, i32, RandomState> = HashTable::with_hasher(RandomState::new());
        assert_eq!(m.bucket_count(), 0);

        let mut m: HashTable<i32, i32> = HashTable::new();
        m.insert(1, 1);
        m.insert(2, 2);
        assert_eq!(m.bucket_count(), INITIAL_BUCKETS);

        m.remove(&1);
        m.remove(&2);
        // Buckets are never released by removal.
        assert_eq!(m.bucket_count(), INITIAL_BUCKETS);
    }

    #[test]
    fn test_zero_buckets_rejected() {
        assert_eq!(
            HashTable::<i32, i32>::try_with_buckets(0).err(),
            Some(Error::ZeroBuckets)
        );

        let mut m: HashTable<i32, i32> = HashTable::with_buckets(1);
        assert_eq!(m.try_resize(0), Err(Error::ZeroBuckets));
        assert_eq!(m.bucket_count(), 1);
    }

    #[test]
    #[should_panic(expected = "at least one bucket")]
    fn test_with_zero_buckets_panics() {
        let _: HashTable<i32, i32> = HashTable::with_buckets(0);
    }

    #[test]
    #[should_panic(expected = "at least one bucket")]
    fn test_resize_zero_panics() {
        let mut m: HashTable<i32, i32> = HashTable::new();
        m.resize(0);
    }

    #[test]
    fn test_insert() {
        let mut m = HashTable::new();

        assert_eq!(m.len(), 0);
        assert!(m.insert(1, 2).is_none());
        assert_eq!(m.len(), 1);
        assert!(m.insert(2, 4).is_none());
        assert_eq!(m.len(), 2);
        assert_eq!(*m.get(&1).unwrap(), 2);
        assert_eq!(*m.get(&2).unwrap(), 4);
    }

    #[test]
    fn test_growth_keeps_load_factor() {
        let mut m = HashTable::new();

        for i in 0..6 {
            m.insert(i, ());
        }
        // 6 entries in 8 buckets sits exactly at 3/4.
        assert_eq!(m.bucket_count(), 8);

        m.insert(6, ());
        assert_eq!(m.bucket_count(), 16);

        for i in 7..1000 {
            m.insert(i, ());
            assert!(m.load_factor() <= 0.75);
        }
        assert_eq!(m.len(), 1000);
    }

    #[test]
    fn test_clone() {
        let mut m = HashTable::new();

        assert!(m.insert(1, 2).is_none());
        assert!(m.insert(2, 4).is_none());

        let m2 = m.clone();
        assert_eq!(*m2.get(&1).unwrap(), 2);
        assert_eq!(*m2.get(&2).unwrap(), 4);
        assert_eq!(m2.len(), 2);
        assert_eq!(m, m2);
    }

    #[test]
    fn test_empty_remove() {
        let mut m: HashTable<i32, bool> = HashTable::new();
        assert_eq!(m.remove(&0), None);
        assert_eq!(m.get_mut(&0), None);
    }

    #[test]
    fn test_empty_iter() {
        let m: HashTable<i32, bool> = HashTable::new();

        assert_eq!(m.iter().next(), None);
        assert_eq!(m.keys().next(), None);
        assert_eq!(m.values().next(), None);
        assert!(m.is_empty());
    }

    #[test]
    fn test_insertions() {
        let mut m = HashTable::new();

        let loops = if cfg!(miri) { 2 } else { 10 };
        for _ in 0..loops {
            assert!(m.is_empty());

            let count = if cfg!(miri) { 66 } else { 501 };

            for i in 1..count {
                assert!(m.insert(i, i).is_none());

                for j in 1..=i {
                    assert_eq!(m.get(&j), Some(&j));
                }

                for j in i + 1..count {
                    assert_eq!(m.get(&j), None);
                }
            }

            for i in count..(2 * count) {
                assert!(!m.contains_key(&i));
            }

            // remove forwards
            for i in 1..count {
                assert!(m.remove(&i).is_some());

                for j in 1..=i {
                    assert!(!m.contains_key(&j));
                }

                for j in i + 1..count {
                    assert!(m.contains_key(&j));
                }
            }

            for i in 1..count {
                assert!(m.insert(i, i).is_none());
            }

            // remove backwards
            for i in (1..count).rev() {
                assert!(m.remove(&i).is_some());

                for j in i..count {
                    assert!(!m.contains_key(&j));
                }

                for j in 1..i {
                    assert!(m.contains_key(&j));
                }
            }
        }
    }

    #[test]
    fn test_find_mut() {
        let mut m = HashTable::new();

        assert!(m.insert(1, 12).is_none());
        assert!(m.insert(2, 8).is_none());
        assert!(m.insert(5, 14).is_none());
        let new = 100;
        match m.get_mut(&5) {
            None => panic!(),
            Some(x) => *x = new,
        }
        assert_eq!(m.get(&5), Some(&new));
    }

    #[test]
    fn test_insert_overwrite() {
        let mut m = HashTable::new();
        assert!(m.insert(1, 2).is_none());
        assert_eq!(*m.get(&1).unwrap(), 2);
        assert!(m.insert(1, 3).is_some());
        assert_eq!(*m.get(&1).unwrap(), 3);
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_single_chain() {
        let mut m = HashTable::with_buckets_and_hasher(4, ConstantHasher);

        for i in 0..3 {
            assert!(m.insert(i, i * 10).is_none());
        }

        assert_eq!(m.get(&2), Some(&20));
        assert_eq!(m.remove(&0), Some(0));
        assert_eq!(m.get(&1), Some(&10));
        assert_eq!(m.get(&2), Some(&20));
        assert_eq!(m.get_key_value(&2), Some((&2, &20)));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn test_resize_round_trip() {
        let mut m: HashTable<u32, String> = (0..50).map(|i| (i, i.to_string())).collect();

        for buckets in [1, 3, 50, 512] {
            m.resize(buckets);
            assert_eq!(m.bucket_count(), buckets);
            assert_eq!(m.len(), 50);

            for i in 0..50 {
                assert_eq!(m.get(&i), Some(&i.to_string()));
            }
        }
    }

    #[test]
    fn test_clear_keeps_buckets() {
        let mut m = HashTable::with_buckets(5);
        m.insert("a", 1);
        m.insert("b", 2);

        m.clear();
        assert!(m.is_empty());
        assert_eq!(m.bucket_count(), 5);
        assert!(!m.contains_key(&"a"));

        m.insert("a", 3);
        assert_eq!(m[&"a"], 3);
    }

    #[test]
    fn test_iterate() {
        let mut m = HashTable::with_buckets(7);
        for i in 0..32 {
            assert!(m.insert(i, i * 2).is_none());
        }
        assert_eq!(m.len(), 32);

        let mut observed: u32 = 0;
        let iter = m.iter();
        assert_eq!(iter.len(), 32);

        for (k, v) in iter {
            assert_eq!(*v, *k * 2);
            observed |= 1 << *k;
        }
        assert_eq!(observed, 0xFFFF_FFFF);

        let mut keys: Vec<_> = m.keys().copied().collect();
        keys.sort();
        assert_eq!(keys, (0..32).collect::<Vec<_>>());

        let total: i32 = m.values().sum();
        assert_eq!(total, (0..32).map(|i| i * 2).sum());

        let mut owned: Vec<_> = m.into_iter().collect();
        owned.sort();
        assert_eq!(owned.len(), 32);
        assert_eq!(owned[31], (31, 62));
    }

    #[test]
    fn test_merge_overwrites() {
        let mut a = HashTable::new();
        a.insert(1, "one");
        a.insert(2, "two");

        let mut b = HashTable::with_hasher(RandomState::new());
        b.insert(2, "deux");
        b.insert(3, "trois");

        a.merge(&b);
        assert_eq!(a.len(), 3);
        assert_eq!(a[&1], "one");
        assert_eq!(a[&2], "deux");
        assert_eq!(a[&3], "trois");
    }

    #[test]
    fn test_show() {
        let mut map = HashTable::new();
        let empty: HashTable<i32, i32> = HashTable::new();

        map.insert(1, 2);
        map.insert(3, 4);

        let map_str = format!("{:?}", map);

        assert!(map_str == "{1: 2, 3: 4}" || map_str == "{3: 4, 1: 2}");
        assert_eq!(format!("{:?}", empty), "{}");
    }

    #[test]
    #[should_panic(expected = "no entry found for key")]
    fn test_index_nonexistent() {
        let mut map = HashTable::new();

        map.insert(1, 2);
        map.insert(2, 1);
        map.insert(3, 4);

        let _ = map[&4];
    }

    #[test]
    fn test_get_or_insert_with() {
        let mut m = HashTable::new();

        for i in 0..100 {
            *m.get_or_insert_with(i % 10, Vec::new) = vec![i];
            m.get_or_insert_with(i % 10, || unreachable!()).push(i);
        }

        assert_eq!(m.len(), 10);
        assert!(m.len() * 4 <= m.bucket_count() * 3);
        assert_eq!(m[&3], [93, 93]);
    }

    #[test]
    fn test_fnv_known_vectors() {
        // Published FNV-1a 64-bit test vectors.
        let hash = |bytes: &[u8]| {
            let mut hasher = FnvHasher::new();
            hasher.write(bytes);
            hasher.finish()
        };

        assert_eq!(hash(b""), 0xcbf29ce484222325);
        assert_eq!(hash(b"a"), 0xaf63dc4c8601ec8c);
        assert_eq!(hash(b"foobar"), 0x85944171f73967e8);
    }
}
