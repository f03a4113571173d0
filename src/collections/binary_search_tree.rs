//! An unbalanced [binary search tree].
//!
//! Nothing keeps the tree short, so sorted input degrades it into a list of
//! height `n`. Every operation here walks the tree with a loop or an explicit
//! stack, which keeps even a degenerate tree safe from call-stack overflow.
//! Use [`AvlTree`](crate::collections::AvlTree) when the height matters.
//!
//! [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree

use std::fmt;

use core::cmp::Ordering;

use crate::collections::{Queue, Stack};

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

/// An ordered set of unique values in an unbalanced binary search tree.
///
/// # Examples
///
/// ```
/// use dsa_catalog::collections::BinarySearchTree;
///
/// let mut tree = BinarySearchTree::new();
/// for x in [8, 3, 10, 1, 6] {
///     tree.insert(x);
/// }
///
/// assert!(!tree.insert(6));
/// assert_eq!(tree.inorder(), [&1, &3, &6, &8, &10]);
/// assert_eq!(tree.preorder(), [&8, &3, &1, &6, &10]);
/// assert_eq!(tree.remove(&3), Some(3));
/// assert_eq!(tree.height(), 3);
/// ```
pub struct BinarySearchTree<T> {
    root: Link<T>,
    len: usize,
}

/// A lazy in-order iterator over a [`BinarySearchTree`].
pub struct Iter<'a, T> {
    /// Nodes whose left subtree has been entered but whose value is not yet
    /// yielded.
    ancestors: Stack<&'a Node<T>>,
    remaining: usize,
}

/// Returns the link holding `value`, or the vacant link where it would be
/// inserted.
fn seek<'a, T: Ord>(mut link: &'a mut Link<T>, value: &T) -> &'a mut Link<T> {
    loop {
        let ordering = link.as_deref().map(|node| value.cmp(&node.value));

        match (ordering, link) {
            (Some(Ordering::Less), Some(node)) => link = &mut node.left,
            (Some(Ordering::Greater), Some(node)) => link = &mut node.right,
            (_, found) => return found,
        }
    }
}

/// Unlinks the leftmost node below `link` and returns its value.
fn take_min<T>(mut link: &mut Link<T>) -> Option<T> {
    while link.as_ref().is_some_and(|node| node.left.is_some()) {
        match link {
            Some(node) => link = &mut node.left,
            None => return None,
        }
    }

    let node = link.take()?;
    let Node { value, right, .. } = *node;
    *link = right;

    Some(value)
}

impl<T> BinarySearchTree<T> {
    /// Creates an empty tree.
    #[inline]
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns the number of values in the tree.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no values.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of levels. An empty tree has height 0.
    ///
    /// Counts levels breadth first rather than recursing.
    pub fn height(&self) -> usize {
        let mut level = Queue::new();
        level.extend(self.root.as_deref());

        let mut height = 0;
        while !level.is_empty() {
            height += 1;

            for _ in 0..level.len() {
                let Some(node) = level.dequeue() else {
                    break;
                };
                level.extend(node.left.as_deref());
                level.extend(node.right.as_deref());
            }
        }

        height
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

    /// Returns every value in ascending order.
    #[inline]
    pub fn inorder(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Returns every value with each node before its left then right subtree.
    pub fn preorder(&self) -> Vec<&T> {
        let mut order = Vec::with_capacity(self.len);
        let mut pending = Stack::new();
        pending.extend(self.root.as_deref());

        while let Some(node) = pending.pop() {
            order.push(&node.value);
            pending.extend(node.right.as_deref());
            pending.extend(node.left.as_deref());
        }

        order
    }

    /// Returns every value with each node after its left then right subtree.
    pub fn postorder(&self) -> Vec<&T> {
        // Node, right, left is exactly postorder reversed.
        let mut order = Vec::with_capacity(self.len);
        let mut pending = Stack::new();
        pending.extend(self.root.as_deref());

        while let Some(node) = pending.pop() {
            order.push(&node.value);
            pending.extend(node.left.as_deref());
            pending.extend(node.right.as_deref());
        }

        order.reverse();
        order
    }

    /// Returns a lazy in-order iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            ancestors: Stack::new(),
            remaining: self.len,
        };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        let mut pending = Stack::new();
        pending.extend(self.root.take());

        // Detach children before each node drops so no drop recurses.
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }

        self.len = 0;
    }
}

impl<T: Ord> BinarySearchTree<T> {
    /// Inserts `value` as a new leaf. Returns `false` and leaves the tree
    /// unchanged if an equal value is already present.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(*h*) time, where *h* is the height of the tree.
    pub fn insert(&mut self, value: T) -> bool {
        let link = seek(&mut self.root, &value);
        if link.is_some() {
            return false;
        }

        *link = Some(Box::new(Node {
            value,
            left: None,
            right: None,
        }));
        self.len += 1;

        true
    }

    /// Removes the value equal to `value` and returns it.
    ///
    /// A node with two children takes its in-order successor's value, and
    /// the successor's node is unlinked in its place.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::BinarySearchTree;
    ///
    /// let mut tree: BinarySearchTree<_> = [50, 30, 70, 60, 80].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&50), Some(50));
    /// assert_eq!(tree.preorder(), [&60, &30, &70, &80]);
    /// assert_eq!(tree.remove(&50), None);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let link = seek(&mut self.root, value);
        let node = link.as_mut()?;

        let removed = if node.left.is_some() && node.right.is_some() {
            let successor = take_min(&mut node.right)?;
            std::mem::replace(&mut node.value, successor)
        } else {
            let Node { value, left, right } = *link.take()?;
            *link = left.or(right);
            value
        };

        self.len -= 1;

        Some(removed)
    }

    /// Returns `true` if the tree holds a value equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        let mut link = self.root.as_deref();

        while let Some(node) = link {
            match value.cmp(&node.value) {
                Ordering::Less => link = node.left.as_deref(),
                Ordering::Greater => link = node.right.as_deref(),
                Ordering::Equal => return true,
            }
        }

        false
    }
}

impl<T> Drop for BinarySearchTree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<'a, T> Iter<'a, T> {
    fn push_left_spine(&mut self, mut link: Option<&'a Node<T>>) {
        while let Some(node) = link {
            self.ancestors.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.ancestors.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

impl<'a, T> IntoIterator for &'a BinarySearchTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Extend<T> for BinarySearchTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for BinarySearchTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: fmt::Debug> fmt::Debug for BinarySearchTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
