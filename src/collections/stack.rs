//! A last-in, first-out [stack] backed by an [`Array`].
//!
//! [stack]: https://en.wikipedia.org/wiki/Stack_(abstract_data_type)

use std::fmt;

use crate::collections::Array;

/// A last-in, first-out stack.
///
/// The top of the stack is the back of the underlying [`Array`], so pushing
/// and popping are amortized *O*(1).
///
/// # Examples
///
/// ```
/// use dsa_catalog::collections::Stack;
///
/// let mut stack = Stack::new();
/// stack.push(1);
/// stack.push(2);
///
/// assert_eq!(stack.peek(), Some(&2));
/// assert_eq!(stack.pop(), Some(2));
/// assert_eq!(stack.pop(), Some(1));
/// assert_eq!(stack.pop(), None);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Stack<T> {
    items: Array<T>,
}

impl<T> Stack<T> {
    /// Creates a new, empty `Stack`.
    #[inline]
    pub const fn new() -> Self {
        Self { items: Array::new() }
    }

    /// Creates a new, empty `Stack` with room for `capacity` elements.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Array::with_capacity(capacity),
        }
    }

    /// Pushes an element onto the top of the stack.
    #[inline]
    pub fn push(&mut self, elem: T) {
        self.items.push(elem);
    }

    /// Removes the top element and returns it, or [`None`] if the stack is
    /// empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Pops up to `n` elements, returned top first.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::Stack;
    ///
    /// let mut stack: Stack<_> = (1..=4).collect();
    ///
    /// assert_eq!(stack.pop_many(3), [4, 3, 2]);
    /// assert_eq!(stack.pop_many(3), [1]);
    /// assert!(stack.pop_many(1).is_empty());
    /// ```
    pub fn pop_many(&mut self, n: usize) -> Array<T> {
        let mut popped = Array::with_capacity(n.min(self.len()));

        while popped.len() < n {
            match self.pop() {
                Some(elem) => popped.push(elem),
                None => break,
            }
        }

        popped
    }

    /// Returns the top element without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Returns a mutable reference to the top element.
    #[inline]
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }

    /// Iterates from the top of the stack to the bottom.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::Stack;
    ///
    /// let stack: Stack<_> = ['a', 'b', 'c'].into_iter().collect();
    /// assert_eq!(stack.iter().collect::<String>(), "cba");
    /// ```
    #[inline]
    pub fn iter(&self) -> core::iter::Rev<core::slice::Iter<'_, T>> {
        self.items.iter().rev()
    }

    /// Removes every element.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of elements on the stack.
    #[inline]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the stack holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: PartialEq> Stack<T> {
    /// Returns `true` if any element on the stack equals `elem`.
    #[inline]
    pub fn contains(&self, elem: &T) -> bool {
        self.items.index_of(elem).is_some()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bottom to top, like the underlying storage.
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

/// Elements are pushed in iteration order, so the last one ends on top.
impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stack() {
        let mut stack: Stack<i32> = Stack::new();

        assert_eq!(stack.pop(), None);
        assert_eq!(stack.peek(), None);
        assert_eq!(stack.peek_mut(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_lifo_order() {
        let mut stack = Stack::with_capacity(2);
        for i in 0..5 {
            stack.push(i);
        }

        if let Some(top) = stack.peek_mut() {
            *top = 40;
        }

        assert_eq!(stack.len(), 5);
        assert!(stack.contains(&40));
        assert!(!stack.contains(&4));
        assert_eq!(stack.iter().copied().collect::<Vec<_>>(), [40, 3, 2, 1, 0]);
        assert_eq!(format!("{:?}", stack), "[0, 1, 2, 3, 40]");

        stack.clear();
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_many_past_bottom() {
        let mut stack: Stack<i32> = (1..=3).collect();

        assert!(stack.pop_many(0).is_empty());
        assert_eq!(stack.len(), 3);

        let popped = stack.pop_many(10);
        assert_eq!(popped, [3, 2, 1]);
        assert!(stack.is_empty());
        assert_eq!(stack.peek_mut(), None);
        assert!(stack.pop_many(4).is_empty());

        stack.push(7);
        assert_eq!(stack.peek(), Some(&7));
    }

    #[test]
    fn test_extend_pushes_in_order() {
        let mut stack = Stack::new();
        stack.push('a');
        stack.extend(['b', 'c']);

        assert_eq!(stack.pop(), Some('c'));
        assert_eq!(stack.iter().collect::<String>(), "ba");
    }
}
