//! A general [binary tree] with no ordering between values.
//!
//! New values fill the first vacant child slot in level order, so every level
//! except the last is always full. Positions inside the tree are described by
//! the sequence of left and right turns taken from the root, which lets the
//! shared-reference walks find a node and a mutable walk reach it afterwards.
//!
//! [binary tree]: https://en.wikipedia.org/wiki/Binary_tree

use std::fmt;

use core::cmp;
use core::mem;

use crate::collections::{Array, Queue, Stack};

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// A node reached during a level-order walk, with the position of its parent
/// in that same walk.
struct Visit<'a, T> {
    node: &'a Node<T>,
    parent: Option<(usize, Side)>,
}

/// A binary tree that keeps values in insertion (level) order.
///
/// # Examples
///
/// ```
/// use dsa_catalog::collections::BinaryTree;
///
/// let mut tree = BinaryTree::new();
/// for x in 1..=5 {
///     tree.insert(x);
/// }
///
/// //       1
/// //     /   \
/// //    2     3
/// //   / \
/// //  4   5
/// assert_eq!(tree.inorder(), [&4, &2, &5, &1, &3]);
/// assert_eq!(tree.height(), 3);
///
/// tree.mirror();
/// assert_eq!(tree.level_order(), [&1, &3, &2, &5, &4]);
/// ```
pub struct BinaryTree<T> {
    root: Link<T>,
    len: usize,
    /// Every level but the last is full, and the last fills from the left.
    /// While this holds, the next vacant slot is found from `len` alone.
    complete: bool,
}

/// Follows `path` down from `link` and returns the link it ends at.
fn follow<'a, T>(mut link: &'a mut Link<T>, path: &[Side]) -> &'a mut Link<T> {
    for &side in path {
        match (side, link) {
            (Side::Left, Some(node)) => link = &mut node.left,
            (Side::Right, Some(node)) => link = &mut node.right,
            (_, end) => return end,
        }
    }

    link
}

/// Turns from the root to the slot at 1-based `position` in the level order
/// of a complete tree. The bits below the leading one spell the turns, most
/// significant first.
fn position_path(position: usize) -> Array<Side> {
    let depth = (usize::BITS - 1 - position.leading_zeros()) as usize;
    let mut path = Array::with_capacity(depth);

    for shift in (0..depth).rev() {
        path.push(if (position >> shift) & 1 == 0 {
            Side::Left
        } else {
            Side::Right
        });
    }

    path
}

/// Turns from the root to the node at `index` of a level-order walk.
fn path_to<T>(visits: &Array<Visit<'_, T>>, mut index: usize) -> Array<Side> {
    let mut path = Array::new();

    while let Some((parent, side)) = visits.get(index).and_then(|visit| visit.parent) {
        path.push(side);
        index = parent;
    }

    path.reverse();
    path
}

impl<T> BinaryTree<T> {
    /// Creates an empty tree.
    #[inline]
    pub const fn new() -> Self {
        Self {
            root: None,
            len: 0,
            complete: true,
        }
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

    /// Adds `value` as the left child of the first node in level order with a
    /// vacant slot, or as its right child if the left one is taken.
    pub fn insert(&mut self, value: T) {
        let leaf = Box::new(Node {
            value,
            left: None,
            right: None,
        });

        if self.complete {
            *follow(&mut self.root, &position_path(self.len + 1)) = Some(leaf);
            self.len += 1;
            return;
        }

        let visits = self.visits();
        let open = visits
            .iter()
            .position(|visit| visit.node.left.is_none() || visit.node.right.is_none());
        let path = open.map(|index| path_to(&visits, index));
        drop(visits);

        match path {
            None => self.root = Some(leaf),
            Some(path) => {
                if let Some(node) = follow(&mut self.root, &path).as_deref_mut() {
                    let slot = if node.left.is_none() {
                        &mut node.left
                    } else {
                        &mut node.right
                    };
                    *slot = Some(leaf);
                }
            }
        }

        self.len += 1;
    }

    /// Returns the number of levels. An empty tree has height 0.
    pub fn height(&self) -> usize {
        let mut pending = Stack::new();
        pending.extend(self.root.as_deref().map(|root| (root, 1)));

        let mut height = 0;
        while let Some((node, depth)) = pending.pop() {
            height = cmp::max(height, depth);
            pending.extend(node.left.as_deref().map(|left| (left, depth + 1)));
            pending.extend(node.right.as_deref().map(|right| (right, depth + 1)));
        }

        height
    }

    /// Swaps the children of every node, turning the tree into its mirror
    /// image.
    pub fn mirror(&mut self) {
        let mut pending = Stack::new();
        pending.extend(self.root.as_deref_mut());

        while let Some(node) = pending.pop() {
            mem::swap(&mut node.left, &mut node.right);
            pending.extend(node.left.as_deref_mut());
            pending.extend(node.right.as_deref_mut());
        }

        // Only a perfect tree is its own mirror image in shape.
        self.complete = self.complete && (self.len + 1).is_power_of_two();
    }

    /// Returns `true` if the two subtrees of every node differ in height by
    /// at most one.
    pub fn is_balanced(&self) -> bool {
        let visits = self.visits();
        // Heights of each node's left and right subtrees.
        let mut children = crate::array![[0usize; 2]; visits.len()];

        // Children follow their parents in level order, so walking backwards
        // finishes every subtree before its root.
        for (index, visit) in visits.iter().enumerate().rev() {
            let [left, right] = children[index];
            if left.abs_diff(right) > 1 {
                return false;
            }

            if let Some((parent, side)) = visit.parent {
                let height = 1 + cmp::max(left, right);
                match side {
                    Side::Left => children[parent][0] = height,
                    Side::Right => children[parent][1] = height,
                }
            }
        }

        true
    }

    /// Returns the values in in-order: left subtree, node, right subtree.
    pub fn inorder(&self) -> Vec<&T> {
        let mut order = Vec::with_capacity(self.len);
        let mut ancestors = Stack::new();
        let mut link = self.root.as_deref();

        loop {
            while let Some(node) = link {
                ancestors.push(node);
                link = node.left.as_deref();
            }

            let Some(node) = ancestors.pop() else {
                break;
            };
            order.push(&node.value);
            link = node.right.as_deref();
        }

        order
    }

    /// Returns the values in pre-order: node, left subtree, right subtree.
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

    /// Returns the values in post-order: left subtree, right subtree, node.
    pub fn postorder(&self) -> Vec<&T> {
        let mut order = Vec::with_capacity(self.len);
        // Second element marks a node whose children are already queued.
        let mut pending = Stack::new();
        pending.extend(self.root.as_deref().map(|root| (root, false)));

        while let Some((node, expanded)) = pending.pop() {
            if expanded {
                order.push(&node.value);
                continue;
            }

            pending.push((node, true));
            pending.extend(node.right.as_deref().map(|right| (right, false)));
            pending.extend(node.left.as_deref().map(|left| (left, false)));
        }

        order
    }

    /// Returns the values level by level, left to right.
    pub fn level_order(&self) -> Vec<&T> {
        let mut order = Vec::with_capacity(self.len);
        let mut pending = Queue::new();
        pending.extend(self.root.as_deref());

        while let Some(node) = pending.dequeue() {
            order.push(&node.value);
            pending.extend(node.left.as_deref());
            pending.extend(node.right.as_deref());
        }

        order
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        let mut pending = Stack::new();
        pending.extend(self.root.take());

        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }

        self.len = 0;
        self.complete = true;
    }

    fn visits(&self) -> Array<Visit<'_, T>> {
        let mut visits = Array::with_capacity(self.len);
        if let Some(root) = self.root.as_deref() {
            visits.push(Visit {
                node: root,
                parent: None,
            });
        }

        let mut index = 0;
        while let Some(node) = visits.get(index).map(|visit| visit.node) {
            for (side, child) in [(Side::Left, &node.left), (Side::Right, &node.right)] {
                if let Some(child) = child.as_deref() {
                    visits.push(Visit {
                        node: child,
                        parent: Some((index, side)),
                    });
                }
            }
            index += 1;
        }

        visits
    }
}

impl<T: PartialEq> BinaryTree<T> {
    /// Returns `true` if any node holds a value equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.level_order().into_iter().any(|x| x == value)
    }

    /// Removes the first node in level order that holds `value`.
    ///
    /// The deepest, right-most node is detached and its value moved into the
    /// removed node's place, which keeps every level but the last full.
    /// Returns `false` if no node holds `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::BinaryTree;
    ///
    /// let mut tree: BinaryTree<_> = (1..=5).collect();
    ///
    /// assert!(tree.remove(&2));
    /// assert_eq!(tree.level_order(), [&1, &5, &3, &4]);
    /// assert!(!tree.remove(&2));
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        let visits = self.visits();
        let Some(target) = visits.iter().position(|visit| visit.node.value == *value) else {
            return false;
        };

        let last = visits.len() - 1;
        let target_path = path_to(&visits, target);
        let last_path = path_to(&visits, last);
        drop(visits);

        // The last node in level order is always a leaf.
        let Some(deepest) = follow(&mut self.root, &last_path).take() else {
            return false;
        };
        self.len -= 1;
        if self.len == 0 {
            self.complete = true;
        }

        if target != last {
            if let Some(node) = follow(&mut self.root, &target_path).as_deref_mut() {
                node.value = deepest.value;
            }
        }

        true
    }
}

impl<T> Drop for BinaryTree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for BinaryTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> FromIterator<T> for BinaryTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: fmt::Debug> fmt::Debug for BinaryTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.level_order()).finish()
    }
}
