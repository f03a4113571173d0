//! A [singly-linked list] with owned nodes and a tail pointer.
//!
//! [singly-linked list]: https://en.wikipedia.org/wiki/Linked_list

use std::fmt;

use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::ptr::NonNull;

/// Creates a `LinkedList` containing the arguments, front to back.
///
/// # Examples
///
/// ```
/// use dsa_catalog::list;
///
/// let mut list = list![1 => 2 => 3];
/// assert_eq!(list.len(), 3);
///
/// assert_eq!(list.pop_front(), Some(1));
/// assert_eq!(list.pop_front(), Some(2));
/// assert_eq!(list.pop_front(), Some(3));
/// ```
#[macro_export]
macro_rules! list {
    ($($elem:expr)=>*) => {{
        #[allow(unused_mut)]
        let mut list = $crate::collections::LinkedList::new();
        $(list.push_back($elem);)*
        list
    }};
}

type Link<T> = Option<NonNull<Node<T>>>;

/// A [singly-linked list] with owned nodes.
///
/// Keeps pointers to both ends, so prepending, appending and removing the
/// front are *O*(1). Everything positional walks from the head.
///
/// [singly-linked list]: https://en.wikipedia.org/wiki/Linked_list
pub struct LinkedList<T> {
    /// Pointer to the head of the list.
    head: Link<T>,
    /// Pointer to the tail of the list.
    tail: Link<T>,
    /// Number of allocated nodes in the list.
    len: usize,
    /// In order to tell the drop checker that we do own values of type `T`, and
    /// therefore may drop some `T`'s when we drop.
    _marker: PhantomData<T>,
}

struct Node<T> {
    /// Pointer to the next node.
    next: Link<T>,
    /// Data the node owns.
    elem: T,
}

/// An iterator that moves out of a `LinkedList<T>`.
#[derive(Debug)]
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

/// An iterator that borrows a `LinkedList<T>` immutably.
#[derive(Debug)]
pub struct Iter<'a, T> {
    /// Next node to yield.
    head: Link<T>,
    /// Number of nodes left to yield.
    len: usize,
    _marker: PhantomData<&'a T>,
}

/// An iterator that borrows a `LinkedList<T>` mutably.
#[derive(Debug)]
pub struct IterMut<'a, T> {
    /// Next node to yield.
    head: Link<T>,
    /// Number of nodes left to yield.
    len: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<T> LinkedList<T> {
    /// Creates a new, empty `LinkedList`.
    ///
    /// The list will not allocate until elements are pushed onto it.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::LinkedList;
    ///
    /// let list: LinkedList<i32> = LinkedList::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns an immutable reference to the first element of the list, or
    /// [`None`] if it is empty.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::list;
    ///
    /// let mut list = list![4 => 3];
    /// assert_eq!(list.front(), Some(&4));
    ///
    /// list.clear();
    /// assert_eq!(list.front(), None);
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.head.map(|node| unsafe { &(*node.as_ptr()).elem })
    }

    /// Returns a mutable reference to the first element of the list, or
    /// [`None`] if it is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.head.map(|node| unsafe { &mut (*node.as_ptr()).elem })
    }

    /// Returns an immutable reference to the last element of the list, or
    /// [`None`] if it is empty.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(1) time. Without the `tail` pointer this would be a walk of
    /// the whole list.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::list;
    ///
    /// let list = list![4 => 3];
    /// assert_eq!(list.back(), Some(&3));
    /// ```
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|node| unsafe { &(*node.as_ptr()).elem })
    }

    /// Returns a mutable reference to the last element of the list, or
    /// [`None`] if it is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.tail.map(|node| unsafe { &mut (*node.as_ptr()).elem })
    }

    /// Prepends an element to the front of the list.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::LinkedList;
    ///
    /// let mut list = LinkedList::new();
    /// list.push_front(3);
    /// list.push_front(4);
    ///
    /// assert_eq!(list.pop_front(), Some(4));
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn push_front(&mut self, elem: T) {
        let node = Self::alloc_node(self.head, elem);

        if self.tail.is_none() {
            self.tail = Some(node);
        }

        self.head = Some(node);
        self.len += 1;
    }

    /// Appends an element to the back of the list.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::LinkedList;
    ///
    /// let mut list = LinkedList::new();
    /// list.push_back(3);
    /// list.push_back(4);
    ///
    /// assert_eq!(list.pop_front(), Some(3));
    /// assert_eq!(list.back(), Some(&4));
    /// ```
    pub fn push_back(&mut self, elem: T) {
        let node = Self::alloc_node(None, elem);

        match self.tail {
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(node) },
            None => self.head = Some(node),
        }

        self.tail = Some(node);
        self.len += 1;
    }

    /// Removes the first element from the list and returns it, or [`None`] if
    /// it is empty.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::list;
    ///
    /// let mut list = list![5 => 4];
    ///
    /// assert_eq!(list.pop_front(), Some(5));
    /// assert_eq!(list.pop_front(), Some(4));
    /// assert_eq!(list.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        self.head.map(|node| unsafe {
            let boxed_node = Box::from_raw(node.as_ptr());

            self.head = boxed_node.next;
            if self.head.is_none() {
                self.tail = None;
            }

            self.len -= 1;

            boxed_node.elem
            // `boxed_node` handles its deallocation...
        })
    }

    /// Returns an immutable reference to the element at `idx`, or [`None`] if
    /// it is out of bounds.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::list;
    ///
    /// let list = list![4 => 3 => 2];
    ///
    /// assert_eq!(list.get(0), Some(&4));
    /// assert_eq!(list.get(2), Some(&2));
    /// assert_eq!(list.get(20), None);
    /// ```
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.node_at(idx).map(|node| unsafe { &(*node.as_ptr()).elem })
    }

    /// Returns a mutable reference to the element at `idx`, or [`None`] if it
    /// is out of bounds.
    #[inline]
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.node_at(idx).map(|node| unsafe { &mut (*node.as_ptr()).elem })
    }

    /// Inserts an element so that it ends up at position `idx`.
    ///
    /// `idx` may equal the length, which appends. A larger `idx` leaves the
    /// list untouched and hands `elem` back in the [`Err`] variant.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(*n*) time to walk to the predecessor. The splice itself is
    /// *O*(1).
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::list;
    ///
    /// let mut list = list![4 => 2 => 1];
    ///
    /// assert_eq!(list.insert_at(1, 3), Ok(()));
    /// assert_eq!(list.insert_at(4, 0), Ok(()));
    /// assert_eq!(list.insert_at(9, 9), Err(9));
    ///
    /// assert_eq!(list, dsa_catalog::list![4 => 3 => 2 => 1 => 0]);
    /// ```
    pub fn insert_at(&mut self, idx: usize, elem: T) -> Result<(), T> {
        if idx > self.len {
            return Err(elem);
        }

        if idx == 0 {
            self.push_front(elem);
        } else if idx == self.len {
            self.push_back(elem);
        } else {
            // `0 < idx < len`, so the predecessor exists and is not the tail.
            let Some(prev) = self.node_at(idx - 1) else {
                return Err(elem);
            };

            unsafe {
                let node = Self::alloc_node((*prev.as_ptr()).next, elem);
                (*prev.as_ptr()).next = Some(node);
            }

            self.len += 1;
        }

        Ok(())
    }

    /// Removes the element at `idx` and returns it, or [`None`] if `idx` is out
    /// of bounds.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::list;
    ///
    /// let mut list = list![4 => 3 => 2 => 1];
    ///
    /// assert_eq!(list.remove_at(1), Some(3));
    /// assert_eq!(list.remove_at(2), Some(1));
    /// assert_eq!(list.remove_at(2), None);
    /// assert_eq!(list.back(), Some(&2));
    /// ```
    pub fn remove_at(&mut self, idx: usize) -> Option<T> {
        if idx >= self.len {
            return None;
        }

        if idx == 0 {
            self.pop_front()
        } else {
            let prev = self.node_at(idx - 1)?;
            self.unlink_after(prev)
        }
    }

    /// Reverses the order of the list in place.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(*n*) time and no allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::list;
    ///
    /// let mut list = list![1 => 2 => 3];
    /// list.reverse();
    ///
    /// assert_eq!(list, dsa_catalog::list![3 => 2 => 1]);
    /// assert_eq!(list.back(), Some(&1));
    /// ```
    pub fn reverse(&mut self) {
        let mut prev: Link<T> = None;
        let mut curr = self.head;

        self.tail = self.head;

        while let Some(node) = curr {
            unsafe {
                curr = (*node.as_ptr()).next;
                (*node.as_ptr()).next = prev;
            }
            prev = Some(node);
        }

        self.head = prev;
    }

    /// Removes all elements from the list.
    #[inline]
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Returns an immutable iterator over the list, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            head: self.head,
            len: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns a mutable iterator over the list, front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::list;
    ///
    /// let mut list = list![1 => 2];
    /// list.iter_mut().for_each(|x| *x *= 10);
    ///
    /// assert_eq!(list, dsa_catalog::list![10 => 20]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            head: self.head,
            len: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns the number of nodes in the list.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list contains no nodes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn alloc_node(next: Link<T>, elem: T) -> NonNull<Node<T>> {
        NonNull::from(Box::leak(Box::new(Node { next, elem })))
    }

    /// Walks to the node at `idx`. [`None`] when out of bounds.
    fn node_at(&self, idx: usize) -> Link<T> {
        if idx >= self.len {
            return None;
        }

        let mut curr = self.head;
        for _ in 0..idx {
            curr = curr.and_then(|node| unsafe { (*node.as_ptr()).next });
        }

        curr
    }

    /// Unlinks and returns the successor of `prev`, fixing up `tail` when the
    /// successor was the last node.
    ///
    /// `prev` must be a node owned by this list.
    fn unlink_after(&mut self, prev: NonNull<Node<T>>) -> Option<T> {
        unsafe {
            let target = (*prev.as_ptr()).next?;
            let boxed_node = Box::from_raw(target.as_ptr());

            (*prev.as_ptr()).next = boxed_node.next;
            if boxed_node.next.is_none() {
                self.tail = Some(prev);
            }

            self.len -= 1;

            Some(boxed_node.elem)
        }
    }
}

impl<T: PartialEq> LinkedList<T> {
    /// Removes the first element equal to `key` and returns it, or [`None`] if
    /// no element matches.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::list;
    ///
    /// let mut list = list![4 => 2 => 4 => 1];
    ///
    /// assert_eq!(list.remove(&0), None);
    /// assert_eq!(list.remove(&4), Some(4));
    /// assert_eq!(list, dsa_catalog::list![2 => 4 => 1]);
    /// ```
    pub fn remove(&mut self, key: &T) -> Option<T> {
        let mut prev: Link<T> = None;
        let mut curr = self.head;

        while let Some(node) = curr {
            unsafe {
                if (*node.as_ptr()).elem == *key {
                    return match prev {
                        None => self.pop_front(),
                        Some(prev) => self.unlink_after(prev),
                    };
                }

                prev = curr;
                curr = (*node.as_ptr()).next;
            }
        }

        None
    }

    /// Removes every element equal to `key`, returning how many were removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::list;
    ///
    /// let mut list = list![7 => 1 => 7 => 7 => 2 => 7];
    ///
    /// assert_eq!(list.remove_all(&7), 4);
    /// assert_eq!(list, dsa_catalog::list![1 => 2]);
    /// assert_eq!(list.back(), Some(&2));
    /// ```
    pub fn remove_all(&mut self, key: &T) -> usize {
        let before = self.len;

        while self.front().is_some_and(|front| front == key) {
            self.pop_front();
        }

        let mut curr = self.head;
        while let Some(node) = curr {
            unsafe {
                match (*node.as_ptr()).next {
                    Some(next) if (*next.as_ptr()).elem == *key => {
                        self.unlink_after(node);
                    }
                    next => curr = next,
                }
            }
        }

        before - self.len
    }

    /// Returns `true` if any element equals `key`.
    #[inline]
    pub fn contains(&self, key: &T) -> bool {
        self.iter().any(|elem| elem == key)
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        // Iterative, so long lists cannot overflow the stack.
        while self.pop_front().is_some() {}
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|elem| self.push_back(elem));
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T: Hash> Hash for LinkedList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for elem in self {
            elem.hash(state);
        }
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len > 0 {
            self.head.map(|head| unsafe {
                self.len -= 1;
                self.head = (*head.as_ptr()).next;
                &(*head.as_ptr()).elem
            })
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len > 0 {
            self.head.map(|head| unsafe {
                self.len -= 1;
                self.head = (*head.as_ptr()).next;
                &mut (*head.as_ptr()).elem
            })
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

unsafe impl<T: Send> Send for LinkedList<T> {}
unsafe impl<T: Sync> Sync for LinkedList<T> {}

unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

#[allow(dead_code)]
fn assert_properties() {
    fn is_send<T: Send>() {}
    fn is_sync<T: Sync>() {}

    is_send::<LinkedList<i32>>();
    is_sync::<LinkedList<i32>>();

    is_send::<IntoIter<i32>>();
    is_sync::<IntoIter<i32>>();

    is_send::<Iter<'_, i32>>();
    is_sync::<Iter<'_, i32>>();

    fn list_covariant<'a, T>(x: LinkedList<&'static T>) -> LinkedList<&'a T> {
        x
    }
    fn iter_covariant<'i, 'a, T>(x: Iter<'i, &'static T>) -> Iter<'i, &'a T> {
        x
    }
}
