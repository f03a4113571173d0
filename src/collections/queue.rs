//! A first-in, first-out [queue] backed by a [`LinkedList`].
//!
//! [queue]: https://en.wikipedia.org/wiki/Queue_(abstract_data_type)

use std::fmt;

use crate::collections::{linked_list, Array, LinkedList};

/// A first-in, first-out queue.
///
/// Enqueueing appends at the list's tail and dequeueing pops its head, so
/// both ends are *O*(1).
///
/// # Examples
///
/// ```
/// use dsa_catalog::collections::Queue;
///
/// let mut queue = Queue::new();
/// queue.enqueue("a");
/// queue.enqueue("b");
///
/// assert_eq!(queue.peek(), Some(&"a"));
/// assert_eq!(queue.dequeue(), Some("a"));
/// assert_eq!(queue.dequeue(), Some("b"));
/// assert_eq!(queue.dequeue(), None);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Queue<T> {
    items: LinkedList<T>,
}

impl<T> Queue<T> {
    /// Creates a new, empty `Queue`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            items: LinkedList::new(),
        }
    }

    /// Adds an element to the back of the queue.
    #[inline]
    pub fn enqueue(&mut self, elem: T) {
        self.items.push_back(elem);
    }

    /// Removes the front element and returns it, or [`None`] if the queue is
    /// empty.
    #[inline]
    pub fn dequeue(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Dequeues up to `n` elements, returned in queue order.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::Queue;
    ///
    /// let mut queue: Queue<_> = (1..=4).collect();
    ///
    /// assert_eq!(queue.dequeue_many(3), [1, 2, 3]);
    /// assert_eq!(queue.dequeue_many(3), [4]);
    /// ```
    pub fn dequeue_many(&mut self, n: usize) -> Array<T> {
        let mut dequeued = Array::with_capacity(n.min(self.len()));

        while dequeued.len() < n {
            match self.dequeue() {
                Some(elem) => dequeued.push(elem),
                None => break,
            }
        }

        dequeued
    }

    /// Returns the front element without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    /// Returns a mutable reference to the front element.
    #[inline]
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.items.front_mut()
    }

    /// Iterates from the front of the queue to the back.
    #[inline]
    pub fn iter(&self) -> linked_list::Iter<'_, T> {
        self.items.iter()
    }

    /// Removes every element.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of queued elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the queue holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: PartialEq> Queue<T> {
    /// Returns `true` if any queued element equals `elem`.
    #[inline]
    pub fn contains(&self, elem: &T) -> bool {
        self.items.contains(elem)
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.items, f)
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> FromIterator<T> for Queue<T> {
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
    fn test_empty_queue() {
        let mut queue: Queue<u8> = Queue::new();

        assert_eq!(queue.dequeue(), None);
        assert_eq!(queue.peek(), None);
        assert_eq!(queue.peek_mut(), None);
        assert!(queue.dequeue_many(2).is_empty());
    }

    #[test]
    fn test_dequeue_many_past_back() {
        let mut queue: Queue<i32> = (1..=3).collect();

        assert!(queue.dequeue_many(0).is_empty());
        assert_eq!(queue.len(), 3);

        assert_eq!(queue.dequeue_many(10), [1, 2, 3]);
        assert!(queue.is_empty());
        assert_eq!(queue.peek_mut(), None);

        // Both ends are reset, so the next element is front and back at once.
        queue.extend([4, 5]);
        assert_eq!(queue.dequeue_many(1), [4]);
        assert_eq!(queue.peek(), Some(&5));
        assert_eq!(format!("{:?}", queue), "[5]");
    }

    #[test]
    fn test_fifo_interleaved() {
        let mut queue = Queue::new();

        queue.enqueue(1);
        queue.enqueue(2);
        assert_eq!(queue.dequeue(), Some(1));

        queue.enqueue(3);
        if let Some(front) = queue.peek_mut() {
            *front = 20;
        }

        assert!(queue.contains(&20));
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), [20, 3]);

        // Draining to empty and refilling must keep both ends consistent.
        assert_eq!(queue.dequeue(), Some(20));
        assert_eq!(queue.dequeue(), Some(3));
        queue.enqueue(4);
        assert_eq!(queue.peek(), Some(&4));
        assert_eq!(queue.len(), 1);
    }
}
