//! A self-balancing [AVL tree].
//!
//! Every node stores the height of its subtree. After each insertion or
//! removal the heights along the unwind path are recomputed, and any node
//! whose children differ in height by more than one is restored with one or
//! two rotations. The height therefore stays within roughly `1.44 log2(n)`,
//! which also bounds the recursion depth of every operation.
//!
//! # Duplicates
//!
//! Equal values are accepted. Insertion sends a value that is not less than
//! the current node to the right, so the tree behaves as a sorted multiset and
//! [`AvlTree::len`] counts every copy. Rotations may later move an equal value
//! to the left of its twin, so the ordering invariant is
//! `left <= node <= right`.
//!
//! [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree

use std::fmt;

use core::cmp::{self, Ordering};
use core::mem;

use tracing::trace;

use crate::collections::Stack;

type Link<T> = Option<Box<Node<T>>>;

#[derive(Clone)]
struct Node<T> {
    value: T,
    /// Height of the subtree rooted here. A leaf has height 1.
    height: usize,
    left: Link<T>,
    right: Link<T>,
}

/// An ordered container kept height-balanced with rotations.
///
/// # Examples
///
/// ```
/// use dsa_catalog::collections::AvlTree;
///
/// let mut tree = AvlTree::new();
/// for x in 1..=7 {
///     tree.insert(x);
/// }
///
/// // Sorted input would degrade a plain binary search tree into a list.
/// assert_eq!(tree.height(), 3);
/// assert!(tree.iter().copied().eq(1..=7));
///
/// assert_eq!(tree.remove(&4), Some(4));
/// assert!(!tree.contains(&4));
/// assert!(tree.is_balanced());
/// ```
#[derive(Clone)]
pub struct AvlTree<T> {
    root: Link<T>,
    len: usize,
}

/// A lazy in-order iterator over an [`AvlTree`].
///
/// Holds at most one pending node per level, so its memory is bounded by the
/// tree height.
pub struct Iter<'a, T> {
    pending: Stack<&'a Node<T>>,
    remaining: usize,
}

impl<T> Node<T> {
    fn leaf(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + cmp::max(height(&self.left), height(&self.right));
    }

    /// Left height minus right height.
    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

#[inline]
fn height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

/// ```text
///       node              pivot
///      /    \            /     \
///   pivot    c   ==>    a      node
///   /   \                     /    \
///  a     b                   b      c
/// ```
fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };

    node.left = pivot.right.take();
    node.update_height();

    pivot.right = Some(node);
    pivot.update_height();

    pivot
}

/// Mirror image of [`rotate_right`].
fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };

    node.right = pivot.left.take();
    node.update_height();

    pivot.left = Some(node);
    pivot.update_height();

    pivot
}

/// Recomputes the height of `node` and restores the balance invariant at it,
/// assuming both subtrees already satisfy it.
fn rebalance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.update_height();

    let factor = node.balance_factor();

    if factor > 1 {
        if node.left.as_ref().is_some_and(|left| left.balance_factor() < 0) {
            trace!(case = "left-right", height = node.height, "rotating");
            node.left = node.left.take().map(rotate_left);
        } else {
            trace!(case = "left-left", height = node.height, "rotating");
        }
        return rotate_right(node);
    }

    if factor < -1 {
        if node.right.as_ref().is_some_and(|right| right.balance_factor() > 0) {
            trace!(case = "right-left", height = node.height, "rotating");
            node.right = node.right.take().map(rotate_right);
        } else {
            trace!(case = "right-right", height = node.height, "rotating");
        }
        return rotate_left(node);
    }

    node
}

fn insert<T: Ord>(link: Link<T>, value: T) -> Box<Node<T>> {
    let Some(mut node) = link else {
        return Node::leaf(value);
    };

    if value < node.value {
        node.left = Some(insert(node.left.take(), value));
    } else {
        node.right = Some(insert(node.right.take(), value));
    }

    rebalance(node)
}

/// Removes one value equal to `value` from the subtree, returning the new
/// subtree root and the removed value.
fn remove<T: Ord>(link: Link<T>, value: &T) -> (Link<T>, Option<T>) {
    let Some(mut node) = link else {
        return (None, None);
    };

    match value.cmp(&node.value) {
        Ordering::Less => {
            let (left, removed) = remove(node.left.take(), value);
            node.left = left;
            (Some(rebalance(node)), removed)
        }
        Ordering::Greater => {
            let (right, removed) = remove(node.right.take(), value);
            node.right = right;
            (Some(rebalance(node)), removed)
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, None) => (None, Some(node.value)),
            (Some(child), None) | (None, Some(child)) => (Some(child), Some(node.value)),
            (Some(left), Some(right)) => {
                let (right, successor) = take_min(right);
                let removed = mem::replace(&mut node.value, successor);

                node.left = Some(left);
                node.right = right;

                (Some(rebalance(node)), Some(removed))
            }
        },
    }
}

/// Detaches the minimum of the subtree, returning the rebalanced remainder
/// and the minimum value.
fn take_min<T>(mut node: Box<Node<T>>) -> (Link<T>, T) {
    match node.left.take() {
        None => {
            let Node { value, right, .. } = *node;
            (right, value)
        }
        Some(left) => {
            let (left, min) = take_min(left);
            node.left = left;
            (Some(rebalance(node)), min)
        }
    }
}

/// Height of a subtree after checking its stored heights and balance, or
/// [`None`] if either is wrong somewhere below.
fn checked_height<T>(link: &Link<T>) -> Option<usize> {
    let Some(node) = link else {
        return Some(0);
    };

    let left = checked_height(&node.left)?;
    let right = checked_height(&node.right)?;

    let balanced = left.abs_diff(right) <= 1;
    let height = 1 + cmp::max(left, right);

    (balanced && height == node.height).then_some(height)
}

impl<T> AvlTree<T> {
    /// Creates an empty tree.
    #[inline]
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns the number of values in the tree, duplicates included.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no values.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the height of the tree. An empty tree has height 0 and a single
    /// node has height 1.
    #[inline]
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Removes every value.
    #[inline]
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Returns the smallest value.
    pub fn min(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.value)
    }

    /// Returns the largest value.
    pub fn max(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.value)
    }

    /// Calls `visit` on every value in ascending order before returning.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::AvlTree;
    ///
    /// let tree: AvlTree<_> = [30, 10, 20].into_iter().collect();
    ///
    /// let mut seen = Vec::new();
    /// tree.inorder_traversal(|x| seen.push(*x));
    /// assert_eq!(seen, [10, 20, 30]);
    /// ```
    pub fn inorder_traversal<F: FnMut(&T)>(&self, visit: F) {
        self.iter().for_each(visit);
    }

    /// Returns a lazy in-order iterator. Each call starts a fresh traversal.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            pending: Stack::new(),
            remaining: self.len,
        };
        iter.descend_left(self.root.as_deref());
        iter
    }

    /// Verifies every stored height and the balance invariant at every node.
    ///
    /// Always `true` for a tree built through this API. Intended for tests
    /// and debugging.
    pub fn is_balanced(&self) -> bool {
        checked_height(&self.root).is_some()
    }
}

impl<T: Ord> AvlTree<T> {
    /// Inserts a value and rebalances every ancestor of the new leaf.
    ///
    /// Equal values are kept: a value equal to an existing one is placed to
    /// its right.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(log *n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(2);
    /// tree.insert(2);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert!(tree.iter().eq([2, 2].iter()));
    /// ```
    pub fn insert(&mut self, value: T) {
        self.root = Some(insert(self.root.take(), value));
        self.len += 1;
    }

    /// Removes one value equal to `value` and returns it, or [`None`] if no
    /// such value exists.
    ///
    /// A node with two children takes over its in-order successor's value and
    /// the successor node is unlinked instead. Every ancestor of the unlinked
    /// node is rebalanced.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(log *n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::AvlTree;
    ///
    /// let mut tree: AvlTree<_> = (1..=10).collect();
    ///
    /// assert_eq!(tree.remove(&4), Some(4));
    /// assert_eq!(tree.remove(&4), None);
    /// assert_eq!(tree.len(), 9);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let (root, removed) = remove(self.root.take(), value);
        self.root = root;

        if removed.is_some() {
            self.len -= 1;
        }

        removed
    }

    /// Returns `true` if the tree holds a value equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        let mut link = self.root.as_deref();

        while let Some(node) = link {
            link = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }

        false
    }
}

impl<'a, T> Iter<'a, T> {
    fn descend_left(&mut self, mut link: Option<&'a Node<T>>) {
        while let Some(node) = link {
            self.pending.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pending.pop()?;
        self.descend_left(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn values(tree: &AvlTree<i32>) -> Vec<i32> {
        tree.iter().copied().collect()
    }

    fn root_value(tree: &AvlTree<i32>) -> Option<i32> {
        tree.root.as_ref().map(|node| node.value)
    }

    #[test]
    fn test_empty_tree() {
        let mut tree: AvlTree<i32> = AvlTree::new();

        assert_eq!(tree.height(), 0);
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
        assert_eq!(tree.remove(&1), None);
        assert!(!tree.contains(&1));
        assert!(tree.iter().next().is_none());
        assert!(tree.is_balanced());
    }

    #[test]
    fn test_left_left_rotation() {
        let tree: AvlTree<_> = [3, 2, 1].into_iter().collect();

        assert_eq!(root_value(&tree), Some(2));
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn test_right_right_rotation() {
        let tree: AvlTree<_> = [1, 2, 3].into_iter().collect();

        assert_eq!(root_value(&tree), Some(2));
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn test_left_right_rotation() {
        let tree: AvlTree<_> = [3, 1, 2].into_iter().collect();

        assert_eq!(root_value(&tree), Some(2));
        assert_eq!(values(&tree), [1, 2, 3]);
    }

    #[test]
    fn test_right_left_rotation() {
        let tree: AvlTree<_> = [1, 3, 2].into_iter().collect();

        assert_eq!(root_value(&tree), Some(2));
        assert_eq!(values(&tree), [1, 2, 3]);
    }

    #[test]
    fn test_rotation_updates_heights() {
        let mut tree: AvlTree<_> = [10, 20, 30, 40, 50].into_iter().collect();
        assert!(tree.is_balanced());

        // Forces a right-right rotation rooted at the tree's root.
        tree.insert(60);
        assert_eq!(root_value(&tree), Some(40));
        assert_eq!(tree.height(), 3);
        assert!(tree.is_balanced());
    }

    #[test]
    fn test_remove_leaf_and_single_child() {
        let mut tree: AvlTree<_> = [5, 3, 8, 9].into_iter().collect();

        assert_eq!(tree.remove(&9), Some(9));
        assert_eq!(values(&tree), [3, 5, 8]);

        tree.insert(7);
        assert_eq!(tree.remove(&8), Some(8));
        assert_eq!(values(&tree), [3, 5, 7]);
        assert!(tree.is_balanced());
    }

    #[test]
    fn test_remove_two_children_uses_successor() {
        let mut tree: AvlTree<_> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();

        assert_eq!(tree.remove(&4), Some(4));
        assert_eq!(root_value(&tree), Some(5));
        assert_eq!(values(&tree), [1, 2, 3, 5, 6, 7]);
        assert!(tree.is_balanced());
    }

    #[test]
    fn test_remove_rebalances() {
        let mut tree: AvlTree<_> = [2, 1, 3, 4].into_iter().collect();

        // Leaves 2 with an empty left side and a right chain 3 -> 4.
        assert_eq!(tree.remove(&1), Some(1));
        assert_eq!(root_value(&tree), Some(3));
        assert_eq!(tree.height(), 2);
        assert!(tree.is_balanced());
    }

    #[test]
    fn test_duplicates_kept() {
        let mut tree: AvlTree<_> = [5, 5, 5, 1, 5].into_iter().collect();

        assert_eq!(tree.len(), 5);
        assert_eq!(values(&tree), [1, 5, 5, 5, 5]);
        assert!(tree.is_balanced());

        assert_eq!(tree.remove(&5), Some(5));
        assert_eq!(tree.remove(&5), Some(5));
        assert_eq!(values(&tree), [1, 5, 5]);
        assert!(tree.contains(&5));
    }

    #[test]
    fn test_min_max_and_clear() {
        let mut tree: AvlTree<_> = [8, -3, 12, 0].into_iter().collect();

        assert_eq!(tree.min(), Some(&-3));
        assert_eq!(tree.max(), Some(&12));

        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn test_iter_is_restartable() {
        let tree: AvlTree<_> = (0..50).rev().collect();

        let mut first = tree.iter();
        assert_eq!(first.len(), 50);
        assert_eq!(first.next(), Some(&0));

        // A second iterator is independent of the first.
        assert!(tree.iter().copied().eq(0..50));
        assert_eq!(first.next(), Some(&1));
        assert_eq!(format!("{:?}", [2, 1].into_iter().collect::<AvlTree<_>>()), "[1, 2]");
    }

    #[test]
    fn test_is_balanced_detects_corruption() {
        let mut tree: AvlTree<_> = (0..3).collect();
        if let Some(root) = tree.root.as_mut() {
            root.height = 7;
        }
        assert!(!tree.is_balanced());
    }

    #[test]
    fn test_seeded_random_operations() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut tree = AvlTree::new();
        let mut model: Vec<i32> = Vec::new();

        for _ in 0..3000 {
            let x = rng.gen_range(0..500);

            if rng.gen_bool(0.6) {
                tree.insert(x);
                model.push(x);
            } else {
                let expected = model.iter().position(|&y| y == x).map(|i| model.swap_remove(i));
                assert_eq!(tree.remove(&x), expected);
            }
        }

        model.sort();
        assert_eq!(values(&tree), model);
        assert_eq!(tree.len(), model.len());
        assert!(tree.is_balanced());
    }

    #[test]
    fn test_shuffled_drain() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut order: Vec<i32> = (0..1000).collect();
        order.shuffle(&mut rng);

        let mut tree: AvlTree<_> = order.iter().copied().collect();
        order.shuffle(&mut rng);

        for (i, x) in order.iter().enumerate() {
            assert_eq!(tree.remove(x), Some(*x));

            if i % 97 == 0 {
                assert!(tree.is_balanced());
            }
        }

        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
    }
}
