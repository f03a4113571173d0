//! A [trie] of words, one `char` per edge.
//!
//! [trie]: https://en.wikipedia.org/wiki/Trie

use std::fmt;

use crate::collections::{HashTable, Stack};

#[derive(Default, Clone)]
struct TrieNode {
    children: HashTable<char, TrieNode>,
    /// A stored word ends here.
    terminal: bool,
}

/// A set of strings sharing storage for common prefixes.
///
/// The empty string is a word like any other and is stored at the root.
///
/// # Examples
///
/// ```
/// use dsa_catalog::collections::Trie;
///
/// let mut trie = Trie::new();
/// trie.insert("car");
/// trie.insert("cart");
/// trie.insert("dog");
///
/// assert!(trie.contains("car"));
/// assert!(!trie.contains("ca"));
/// assert!(trie.starts_with("ca"));
/// assert_eq!(trie.words_with_prefix("car"), ["car", "cart"]);
/// ```
#[derive(Default, Clone)]
pub struct Trie {
    root: TrieNode,
    len: usize,
}

impl Trie {
    /// Creates an empty trie.
    #[inline]
    pub const fn new() -> Self {
        Self {
            root: TrieNode {
                children: HashTable::new(),
                terminal: false,
            },
            len: 0,
        }
    }

    /// Returns the number of words stored.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no words are stored.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every word.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Adds `word`, returning `false` if it was already present.
    pub fn insert(&mut self, word: &str) -> bool {
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.get_or_insert_with(ch, TrieNode::default);
        }

        if node.terminal {
            return false;
        }

        node.terminal = true;
        self.len += 1;

        true
    }

    /// Returns `true` if `word` was inserted and not removed since.
    pub fn contains(&self, word: &str) -> bool {
        self.find(word).is_some_and(|node| node.terminal)
    }

    /// Returns `true` if any stored word begins with `prefix`. Every trie,
    /// even an empty one, starts with the empty prefix.
    pub fn starts_with(&self, prefix: &str) -> bool {
        // Removal prunes dead branches, so every reachable node leads to a
        // word.
        self.find(prefix).is_some()
    }

    /// Removes `word`, returning whether it was present.
    ///
    /// Nodes left with no children and no word ending at them are pruned, up
    /// to the nearest ancestor that ends another word or branches.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::Trie;
    ///
    /// let mut trie = Trie::new();
    /// trie.insert("tea");
    /// trie.insert("ten");
    ///
    /// assert!(trie.remove("tea"));
    /// assert!(!trie.remove("tea"));
    /// assert!(!trie.starts_with("tea"));
    /// assert!(trie.starts_with("te"));
    /// ```
    pub fn remove(&mut self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();

        // Depth of the deepest node on the path that must survive: the root,
        // another word's end, or a branch.
        let mut cut = 0;
        let mut node = &self.root;
        for (depth, ch) in chars.iter().enumerate() {
            if node.terminal || node.children.len() > 1 {
                cut = depth;
            }
            match node.children.get(ch) {
                Some(child) => node = child,
                None => return false,
            }
        }

        if !node.terminal {
            return false;
        }
        let has_children = !node.children.is_empty();
        self.len -= 1;

        if has_children || chars.is_empty() {
            if let Some(node) = self.find_mut(&chars) {
                node.terminal = false;
            }
        } else if let Some(keep) = self.find_mut(&chars[..cut]) {
            keep.children.remove(&chars[cut]);
        }

        true
    }

    /// Returns every stored word in ascending order.
    #[inline]
    pub fn words(&self) -> Vec<String> {
        self.words_with_prefix("")
    }

    /// Returns every stored word beginning with `prefix`, in ascending order.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut words = Vec::new();
        let Some(start) = self.find(prefix) else {
            return words;
        };

        let mut pending = Stack::new();
        pending.push((start, String::from(prefix)));

        while let Some((node, word)) = pending.pop() {
            if node.terminal {
                words.push(word.clone());
            }

            for (&ch, child) in node.children.iter() {
                let mut next = word.clone();
                next.push(ch);
                pending.push((child, next));
            }
        }

        words.sort_unstable();
        words
    }

    fn find(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in prefix.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    fn find_mut(&mut self, path: &[char]) -> Option<&mut TrieNode> {
        let mut node = &mut self.root;
        for ch in path {
            node = node.children.get_mut(ch)?;
        }
        Some(node)
    }
}

impl<'a> Extend<&'a str> for Trie {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word);
        }
    }
}

impl<'a> FromIterator<&'a str> for Trie {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}

impl fmt::Debug for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.words()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_count(trie: &Trie) -> usize {
        let mut count = 0;
        let mut pending = vec![&trie.root];

        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children.values());
        }

        count
    }

    #[test]
    fn test_insert_and_contains() {
        let mut trie = Trie::new();

        assert!(trie.insert("apple"));
        assert!(!trie.insert("apple"));
        assert!(trie.insert("app"));

        assert_eq!(trie.len(), 2);
        assert!(trie.contains("app"));
        assert!(!trie.contains("appl"));
        assert!(!trie.contains("apples"));
        assert!(trie.starts_with("appl"));
        assert!(!trie.starts_with("b"));
    }

    #[test]
    fn test_empty_word() {
        let mut trie = Trie::new();

        assert!(!trie.contains(""));
        assert!(trie.starts_with(""));

        assert!(trie.insert(""));
        assert!(trie.contains(""));
        assert_eq!(trie.words(), [""]);

        assert!(trie.remove(""));
        assert!(trie.is_empty());
    }

    #[test]
    fn test_remove_prunes_unshared_suffix() {
        let mut trie: Trie = ["car", "cart", "care"].into_iter().collect();
        assert_eq!(node_count(&trie), 6);

        assert!(trie.remove("cart"));
        assert_eq!(node_count(&trie), 5);

        // "car" still ends here, so nothing above it is pruned.
        assert!(trie.remove("care"));
        assert_eq!(node_count(&trie), 4);
        assert!(trie.contains("car"));

        assert!(trie.remove("car"));
        assert_eq!(node_count(&trie), 1);
        assert!(!trie.starts_with("c"));
    }

    #[test]
    fn test_remove_prefix_keeps_longer_word() {
        let mut trie: Trie = ["in", "inn"].into_iter().collect();

        assert!(trie.remove("in"));
        assert!(!trie.contains("in"));
        assert!(trie.contains("inn"));
        assert_eq!(node_count(&trie), 4);
    }

    #[test]
    fn test_remove_long_word() {
        let short = "a".repeat(1_000);
        let long = "a".repeat(2_000);
        let mut trie: Trie = [short.as_str(), long.as_str(), "ab"].into_iter().collect();
        assert_eq!(node_count(&trie), 2_002);

        assert!(trie.remove(&long));
        assert_eq!(node_count(&trie), 1_002);
        assert!(trie.contains(&short));

        assert!(trie.remove(&short));
        assert_eq!(node_count(&trie), 3);
        assert!(trie.contains("ab"));
    }

    #[test]
    fn test_remove_missing_word() {
        let mut trie: Trie = ["hello"].into_iter().collect();

        assert!(!trie.remove("hell"));
        assert!(!trie.remove("help"));
        assert_eq!(trie.len(), 1);
        assert_eq!(node_count(&trie), 6);
    }

    #[test]
    fn test_words_sorted() {
        let trie: Trie = ["zeta", "alpha", "beta", "al", "été"].into_iter().collect();

        assert_eq!(trie.words(), ["al", "alpha", "beta", "zeta", "été"]);
        assert_eq!(trie.words_with_prefix("al"), ["al", "alpha"]);
        assert!(trie.words_with_prefix("x").is_empty());
    }

    #[test]
    fn test_clear() {
        let mut trie: Trie = ["a", "b"].into_iter().collect();
        trie.clear();

        assert!(trie.is_empty());
        assert!(trie.words().is_empty());
        assert_eq!(node_count(&trie), 1);
    }
}
