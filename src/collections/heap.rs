//! A [binary heap] stored in an [`Array`], ordered as a min-heap or a
//! max-heap.
//!
//! [binary heap]: https://en.wikipedia.org/wiki/Binary_heap

use std::fmt;

use crate::collections::{Array, Stack};

/// Which element a [`Heap`] keeps at its root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeapKind {
    /// Smallest element at the root.
    #[default]
    Min,
    /// Largest element at the root.
    Max,
}

impl HeapKind {
    /// Whether `a` belongs above `b` in a heap of this kind.
    #[inline]
    fn above<T: Ord>(self, a: &T, b: &T) -> bool {
        match self {
            HeapKind::Min => a < b,
            HeapKind::Max => a > b,
        }
    }
}

/// A binary heap.
///
/// Element `i` has children `2i + 1` and `2i + 2`. No child sits above its
/// parent under the heap's [`HeapKind`].
///
/// # Examples
///
/// ```
/// use dsa_catalog::collections::Heap;
///
/// let mut heap = Heap::min();
/// heap.push(5);
/// heap.push(1);
/// heap.push(3);
///
/// assert_eq!(heap.peek(), Some(&1));
/// assert_eq!(heap.pop(), Some(1));
/// assert_eq!(heap.pop(), Some(3));
/// ```
#[derive(Clone)]
pub struct Heap<T> {
    items: Array<T>,
    kind: HeapKind,
}

impl<T: Ord> Heap<T> {
    /// Creates an empty min-heap.
    #[inline]
    pub const fn min() -> Self {
        Self::with_kind(HeapKind::Min)
    }

    /// Creates an empty max-heap.
    #[inline]
    pub const fn max() -> Self {
        Self::with_kind(HeapKind::Max)
    }

    /// Creates an empty heap of the given kind.
    #[inline]
    pub const fn with_kind(kind: HeapKind) -> Self {
        Self {
            items: Array::new(),
            kind,
        }
    }

    /// Builds a heap from `items` in *O*(*n*) by sifting down every internal
    /// node, last parent first.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::array;
    /// use dsa_catalog::collections::{Heap, HeapKind};
    ///
    /// let heap = Heap::from_array(HeapKind::Max, array![3, 9, 4, 1]);
    /// assert_eq!(heap.peek(), Some(&9));
    /// assert_eq!(heap.len(), 4);
    /// ```
    pub fn from_array(kind: HeapKind, items: Array<T>) -> Self {
        let mut heap = Self { items, kind };

        for i in (0..heap.len() / 2).rev() {
            heap.sift_down(i);
        }

        heap
    }

    /// Pushes an element onto the heap.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(log *n*) time.
    pub fn push(&mut self, elem: T) {
        self.items.push(elem);
        self.sift_up(self.items.len() - 1);
    }

    /// Removes the root element and returns it, or [`None`] if the heap is
    /// empty.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(log *n*) time.
    pub fn pop(&mut self) -> Option<T> {
        let root = self.items.swap_remove(0)?;
        self.sift_down(0);
        Some(root)
    }

    /// Returns the root element without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.get(0)
    }

    /// Replaces the root with `elem` and restores the heap, returning the old
    /// root. On an empty heap `elem` is simply pushed and [`None`] returned.
    ///
    /// Cheaper than a `pop` followed by a `push`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::Heap;
    ///
    /// let mut heap = Heap::min();
    /// assert_eq!(heap.replace_root(4), None);
    ///
    /// heap.push(2);
    /// assert_eq!(heap.replace_root(7), Some(2));
    /// assert_eq!(heap.peek(), Some(&4));
    /// ```
    pub fn replace_root(&mut self, elem: T) -> Option<T> {
        match self.items.set(0, elem) {
            Ok(old) => {
                self.sift_down(0);
                Some(old)
            }
            Err(elem) => {
                self.push(elem);
                None
            }
        }
    }

    /// Removes the element at array position `index`, or returns [`None`] if
    /// `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::array;
    /// use dsa_catalog::collections::{Heap, HeapKind};
    ///
    /// let mut heap = Heap::from_array(HeapKind::Min, array![1, 5, 2, 8]);
    ///
    /// let index = heap.position(&5).unwrap();
    /// assert_eq!(heap.remove_at(index), Some(5));
    /// assert_eq!(heap.remove_at(10), None);
    /// assert_eq!(heap.into_sorted_array(), [1, 2, 8]);
    /// ```
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        let removed = self.items.swap_remove(index)?;

        // The former last element now sits at `index` and may need to move
        // either way.
        if index < self.items.len() {
            let index = self.sift_up(index);
            self.sift_down(index);
        }

        Some(removed)
    }

    /// Returns the array position of an element equal to `elem`.
    ///
    /// Subtrees whose root already lies beyond `elem` in heap order are
    /// skipped, since nothing below them can match.
    pub fn position(&self, elem: &T) -> Option<usize> {
        let mut pending = Stack::new();
        if !self.items.is_empty() {
            pending.push(0);
        }

        while let Some(i) = pending.pop() {
            let item = &self.items[i];

            if item == elem {
                return Some(i);
            }

            if self.kind.above(elem, item) {
                continue;
            }

            for child in [2 * i + 2, 2 * i + 1] {
                if child < self.items.len() {
                    pending.push(child);
                }
            }
        }

        None
    }

    /// Consumes the heap, returning its elements in pop order: ascending for a
    /// min-heap, descending for a max-heap.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::array;
    /// use dsa_catalog::collections::{Heap, HeapKind};
    ///
    /// let heap = Heap::from_array(HeapKind::Max, array![2, 7, 1, 7]);
    /// assert_eq!(heap.into_sorted_array(), [7, 7, 2, 1]);
    /// ```
    pub fn into_sorted_array(mut self) -> Array<T> {
        let mut sorted = Array::with_capacity(self.len());
        while let Some(elem) = self.pop() {
            sorted.push(elem);
        }
        sorted
    }

    /// Moves the element at `index` towards the root while it belongs above
    /// its parent. Returns its final position.
    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;

            if !self.kind.above(&self.items[index], &self.items[parent]) {
                break;
            }

            self.items.swap(index, parent);
            index = parent;
        }

        index
    }

    /// Moves the element at `index` towards the leaves while a child belongs
    /// above it.
    fn sift_down(&mut self, mut index: usize) {
        let len = self.items.len();

        loop {
            let (left, right) = (2 * index + 1, 2 * index + 2);
            let mut best = index;

            if left < len && self.kind.above(&self.items[left], &self.items[best]) {
                best = left;
            }
            if right < len && self.kind.above(&self.items[right], &self.items[best]) {
                best = right;
            }

            if best == index {
                break;
            }

            self.items.swap(index, best);
            index = best;
        }
    }
}

impl<T> Heap<T> {
    /// Returns which element the heap keeps at its root.
    #[inline]
    pub const fn kind(&self) -> HeapKind {
        self.kind
    }

    /// Returns the underlying array in heap order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Removes every element.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of elements in the heap.
    #[inline]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the heap holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Ord> Default for Heap<T> {
    fn default() -> Self {
        Self::min()
    }
}

impl<T: Ord> Extend<T> for Heap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.push(elem);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heap")
            .field("kind", &self.kind)
            .field("items", &self.items)
            .finish()
    }
}
