//! A contiguous growable array type with heap-allocated contents.
//!
//! Unlike [`Vec`], every index-bounded operation on [`Array`] reports an
//! out-of-range index through its return value instead of panicking. Reads
//! return [`None`], and writes that would consume an element hand it back in
//! an [`Err`].

use std::alloc::{self, Layout};
use std::fmt;

use core::cmp::{self, Ordering};
use core::hash::{Hash, Hasher};
use core::ops::{Deref, DerefMut};
use core::ptr::{self, NonNull};
use core::{marker, mem};

/// Creates an `Array` containing the arguments.
///
/// # Examples
///
/// - Create an `Array` containing a given list of elements:
///
/// ```
/// use dsa_catalog::array;
/// use dsa_catalog::collections::Array;
///
/// let a = array![1, 2, 3];
/// assert_eq!(a, [1, 2, 3]);
/// ```
///
/// - Create an `Array` from a given element and size:
///
/// ```
/// use dsa_catalog::array;
/// use dsa_catalog::collections::Array;
///
/// let a = array![String::from("hello"); 3];
/// assert_eq!(a, ["hello", "hello", "hello"]);
/// ```
#[macro_export]
macro_rules! array {
    () => {
        $crate::collections::Array::new()
    };
    // `$(,)?` allows for a trailing comma.
    ($($elem:expr),* $(,)?) => {{
        let mut a = $crate::collections::Array::with_capacity($crate::count![@COUNT; $($elem),*]);
        $(a.push($elem);)*
        a
    }};
    ($elem:expr; $n:expr) => {{
        // Ensure the expression is only evaluated once.
        let count = $n;

        let mut a = $crate::collections::Array::with_capacity(count);
        a.extend(::core::iter::repeat($elem).take(count));
        a
    }};
}

#[macro_export]
#[doc(hidden)]
macro_rules! count {
    (@COUNT; $($elem:expr),*) => {
        // For every `$elem`, create an array, substituting the `$elem` with
        // unit, take a reference to it, and invoke the len implementation for
        // a slice of unit values.
        <[()]>::len(&[$($crate::count![@SUBST; $elem]),*])
    };
    (@SUBST; $elem:expr) => { () };
}

/// A contiguous growable array type with heap-allocated contents.
///
/// Index-bounded operations never panic. See the [module documentation] for
/// the conventions.
///
/// [module documentation]: self
pub struct Array<T> {
    /// Internal buffer.
    buf: RawArray<T>,
    /// Number of initialized elements.
    len: usize,
}

/// An iterator that moves out of an `Array<T>`.
///
/// Implemented as a C-style iterator so reads can happen from both sides.
#[derive(Debug)]
pub struct IntoIter<T> {
    /// Pointer to the first unread element.
    start: *const T,
    /// Pointer one past the last unread element.
    end: *const T,
    /// Internal buffer of the array. Needed since the iterator takes ownership
    /// and we want to ensure it does not invoke its destructor early.
    _buf: RawArray<T>,
}

impl<T> Array<T> {
    /// Constructs a new, empty `Array<T>`.
    ///
    /// The array will not allocate until elements are pushed onto it.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::Array;
    ///
    /// let a: Array<i32> = Array::new();
    /// assert!(a.is_empty());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            buf: RawArray::new(),
            len: 0,
        }
    }

    /// Constructs a new, empty `Array<T>` with at least the specified
    /// capacity.
    ///
    /// The array will be able to hold at least `capacity` elements without
    /// reallocating. If `capacity` is zero, the array will not allocate.
    ///
    /// For `Array<T>` where `T` is a zero-sized type, there will be no
    /// allocation and the capacity will always be `usize::MAX`.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::collections::Array;
    ///
    /// let mut a: Array<i32> = Array::with_capacity(10);
    ///
    /// assert_eq!(a.len(), 0);
    /// assert!(a.capacity() >= 10);
    ///
    /// for i in 0..10 {
    ///     a.push(i);
    /// }
    ///
    /// assert_eq!(a.len(), 10);
    /// assert!(a.capacity() >= 10);
    ///
    /// let units = Array::<()>::with_capacity(10);
    /// assert_eq!(units.capacity(), usize::MAX);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: RawArray::with_capacity(capacity),
            len: 0,
        }
    }

    /// Appends an element to the back of the array.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    ///
    /// # Time Complexity
    ///
    /// Takes amortized *O*(1) time. If the array's length would exceed its
    /// capacity after the push, *O*(*capacity*) time is taken to copy the
    /// array's elements to a larger allocation. This expensive operation is
    /// offset by the *capacity* *O*(1) insertions it allows.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::array;
    /// use dsa_catalog::collections::Array;
    ///
    /// let mut a: Array<i32> = array![1, 2];
    /// a.push(3);
    /// assert_eq!(a, [1, 2, 3]);
    /// ```
    pub fn push(&mut self, elem: T) {
        if self.len == self.capacity() {
            self.buf.grow_one();
        }

        unsafe {
            // Offset by the previous `self.len` value.
            ptr::write(self.as_mut_ptr().add(self.len), elem);
        }

        self.len += 1;
    }

    /// Removes the last element from the array and returns it, or [`None`] if
    /// it is empty.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::array;
    /// use dsa_catalog::collections::Array;
    ///
    /// let mut a: Array<i32> = array![1, 2];
    ///
    /// assert_eq!(a.pop(), Some(2));
    /// assert_eq!(a.pop(), Some(1));
    /// assert_eq!(a.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            // Offset by the new `self.len` value.
            unsafe { Some(ptr::read(self.as_ptr().add(self.len))) }
        }
    }

    /// Returns a reference to the element at `index`, or [`None`] if `index`
    /// is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::array;
    ///
    /// let a = array![10, 20, 30];
    /// assert_eq!(a.get(1), Some(&20));
    /// assert_eq!(a.get(3), None);
    /// ```
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            unsafe { Some(&*self.as_ptr().add(index)) }
        } else {
            None
        }
    }

    /// Returns a mutable reference to the element at `index`, or [`None`] if
    /// `index` is out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            unsafe { Some(&mut *self.as_mut_ptr().add(index)) }
        } else {
            None
        }
    }

    /// Replaces the element at `index`, returning the previous element.
    ///
    /// When `index` is out of bounds the array is left untouched and `elem` is
    /// handed back in the [`Err`] variant.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::array;
    ///
    /// let mut a = array![1, 2, 3];
    /// assert_eq!(a.set(0, 7), Ok(1));
    /// assert_eq!(a.set(5, 9), Err(9));
    /// assert_eq!(a, [7, 2, 3]);
    /// ```
    pub fn set(&mut self, index: usize, elem: T) -> Result<T, T> {
        match self.get_mut(index) {
            Some(slot) => Ok(mem::replace(slot, elem)),
            None => Err(elem),
        }
    }

    /// Inserts an element at position `index` within the array, shifting all
    /// elements after it to the right.
    ///
    /// `index` may equal the length, which appends. A larger `index` leaves
    /// the array untouched and hands `elem` back in the [`Err`] variant.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(*len*) time. All items after the insertion index must be
    /// shifted to the right. In the worst case, all elements are shifted when
    /// the insertion index is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::array;
    ///
    /// let mut a = array![10, 11, 12, 13];
    ///
    /// assert_eq!(a.insert(2, 44), Ok(()));
    /// assert_eq!(a, [10, 11, 44, 12, 13]);
    ///
    /// assert_eq!(a.insert(9, 99), Err(99));
    /// assert_eq!(a.len(), 5);
    /// ```
    pub fn insert(&mut self, index: usize, elem: T) -> Result<(), T> {
        // Can be equal to `len` since inserting after all elements is valid.
        if index > self.len {
            return Err(elem);
        }

        if self.len == self.capacity() {
            self.buf.grow_one();
        }

        unsafe {
            // Effectively a `memmove`.
            //
            // https://en.cppreference.com/w/c/string/byte/memmove
            ptr::copy(
                self.as_ptr().add(index),
                self.as_mut_ptr().add(index + 1),
                self.len - index,
            );

            ptr::write(self.as_mut_ptr().add(index), elem);
        }

        self.len += 1;

        Ok(())
    }

    /// Removes and returns the element at position `index` within the array,
    /// shifting all elements after it to the left. Returns [`None`] if `index`
    /// is out of bounds.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(*len*) time. All items after the removal index must be
    /// shifted to the left.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::array;
    ///
    /// let mut a = array![10, 11, 12, 13];
    ///
    /// assert_eq!(a.remove(2), Some(12));
    /// assert_eq!(a.remove(3), None);
    /// assert_eq!(a, [10, 11, 13]);
    /// ```
    pub fn remove(&mut self, index: usize) -> Option<T> {
        // Can't be equal to `len` since removing after all elements is not
        // valid.
        if index >= self.len {
            return None;
        }

        self.len -= 1;

        unsafe {
            let elem = ptr::read(self.as_ptr().add(index));

            ptr::copy(
                self.as_ptr().add(index + 1),
                self.as_mut_ptr().add(index),
                self.len - index,
            );

            Some(elem)
        }
    }

    /// Removes the element at `index` and returns it, replacing it with the
    /// last element. Returns [`None`] if `index` is out of bounds.
    ///
    /// This does not preserve ordering.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::array;
    ///
    /// let mut a = array!["a", "b", "c", "d"];
    ///
    /// assert_eq!(a.swap_remove(1), Some("b"));
    /// assert_eq!(a, ["a", "d", "c"]);
    /// assert_eq!(a.swap_remove(3), None);
    /// ```
    pub fn swap_remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }

        unsafe {
            let elem = ptr::read(self.as_ptr().add(index));
            let base = self.as_mut_ptr();

            // Overlapping when `index` is the last element, which `ptr::copy`
            // permits.
            ptr::copy(base.add(self.len - 1), base.add(index), 1);
            self.len -= 1;

            Some(elem)
        }
    }

    /// Returns the sub-slice `start..end`, or [`None`] if the range is
    /// inverted or reaches past the end of the array.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::array;
    ///
    /// let a = array![1, 2, 3, 4, 5];
    /// assert_eq!(a.slice(1, 3), Some(&[2, 3][..]));
    /// assert_eq!(a.slice(3, 1), None);
    /// assert_eq!(a.slice(0, 6), None);
    /// ```
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> Option<&[T]> {
        if start <= end && end <= self.len {
            Some(&self[start..end])
        } else {
            None
        }
    }

    /// Keeps only the elements for which `keep` returns `true`, preserving
    /// their order.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(*len*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::array;
    ///
    /// let mut a = array![1, 2, 3, 4, 5];
    /// a.retain(|x| x % 2 == 1);
    /// assert_eq!(a, [1, 3, 5]);
    /// ```
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut keep: F) {
        let mut kept = 0;

        for i in 0..self.len {
            if keep(&self[i]) {
                // Everything in `kept..i` is rejected, so kept elements slide
                // forward in their original order.
                self.swap(kept, i);
                kept += 1;
            }
        }

        self.truncate(kept);
    }

    /// Shortens the array, keeping the first `len` elements and dropping
    /// the rest.
    ///
    /// If `len` is greater or equal to the array's current length, this has
    /// no effect. This method also has no effect on the allocated capacity.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(*self.len - len*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::array;
    ///
    /// let mut a = array![1, 2, 3, 4, 5];
    /// a.truncate(2);
    /// assert_eq!(a, [1, 2]);
    ///
    /// a.truncate(8);
    /// assert_eq!(a, [1, 2]);
    /// ```
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len() {
            return;
        }

        let remaining_len = self.len - len;
        unsafe {
            let slice = core::slice::from_raw_parts_mut(self.as_mut_ptr().add(len), remaining_len);
            // Exception Safety:
            //
            // `self.len` is set before calling `drop_in_place` so if an
            // element's Drop impl panics, the array's Drop impl will not
            // double-free.
            self.len = len;
            ptr::drop_in_place(slice);
        }
    }

    /// Reserves capacity for at least `additional` more elements. Does nothing
    /// if capacity is already sufficient.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds [`isize::MAX`] bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::array;
    ///
    /// let mut a = array![1];
    /// a.reserve(10);
    /// assert!(a.capacity() >= 11);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        self.buf.reserve(self.len, additional);
    }

    /// Clears the array, dropping all values. Keeps the allocated memory for
    /// reuse.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::array;
    ///
    /// let mut a = array![1, 2, 3];
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        let elems: *mut [T] = &mut self[..];

        unsafe {
            // Same exception safety argument as `truncate`.
            self.len = 0;
            ptr::drop_in_place(elems);
        }
    }

    /// Returns a raw pointer to the array's buffer, or a dangling raw pointer
    /// valid for zero sized reads if the array didn't allocate.
    ///
    /// The caller must ensure that the array outlives the pointer this
    /// function returns. Modifying the array may cause its buffer to be
    /// reallocated, which would also make any pointers to it invalid.
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.buf.ptr.as_ptr()
    }

    /// Returns a raw mutable pointer to the array's buffer, or a dangling raw
    /// pointer valid for zero sized reads if the array didn't allocate.
    ///
    /// Same caveats as [`as_ptr`](Array::as_ptr).
    #[inline]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr.as_ptr()
    }

    /// Returns the number of elements in the array.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the total number of elements the array can hold without
    /// reallocating.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.buf.cap
    }

    /// Returns `true` if the array contains no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T: PartialEq> Array<T> {
    /// Removes the first element equal to `item` and returns it, or [`None`]
    /// if no element matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::array;
    ///
    /// let mut a = array![3, 1, 3];
    /// assert_eq!(a.remove_item(&3), Some(3));
    /// assert_eq!(a, [1, 3]);
    /// assert_eq!(a.remove_item(&7), None);
    /// ```
    pub fn remove_item(&mut self, item: &T) -> Option<T> {
        let index = self.index_of(item)?;
        self.remove(index)
    }

    /// Returns the index of the first element equal to `item`.
    #[inline]
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.iter().position(|elem| elem == item)
    }

    /// Returns how many elements are equal to `item`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsa_catalog::array;
    ///
    /// let a = array![1, 2, 1, 1];
    /// assert_eq!(a.count_of(&1), 3);
    /// assert_eq!(a.count_of(&5), 0);
    /// ```
    #[inline]
    pub fn count_of(&self, item: &T) -> usize {
        self.iter().filter(|elem| *elem == item).count()
    }
}

impl<T> Drop for Array<T> {
    fn drop(&mut self) {
        // Not needed when `T: !Drop`.
        if mem::needs_drop::<T>() {
            unsafe {
                // The mutable slice is treated as a `*mut [T]`, and the
                // destructor for each element of `T` is invoked in place.
                ptr::drop_in_place(&mut self[..]);
            }
        }

        // `RawArray` handles deallocation...
    }
}

impl<T> Default for Array<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Array<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone> Clone for Array<T> {
    fn clone(&self) -> Self {
        let mut a = Array::with_capacity(self.len);
        a.extend(self.iter().cloned());
        a
    }
}

impl<T> Extend<T> for Array<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut iter = iter.into_iter();

        while let Some(elem) = iter.next() {
            let len = self.len();

            if len == self.capacity() {
                let (lower, _) = iter.size_hint();
                self.reserve(lower.saturating_add(1));
            }

            unsafe {
                ptr::write(self.as_mut_ptr().add(len), elem);
                self.len += 1;
            }
        }
    }
}

impl<T> Deref for Array<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        unsafe { core::slice::from_raw_parts(self.as_ptr(), self.len) }
    }
}

impl<T> DerefMut for Array<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        unsafe { core::slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }
}

impl<T> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut a = Array::new();
        a.extend(iter);
        a
    }
}

impl<'a, T> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Array<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        // Using `ptr::read` to move out of `Array` without invoking its Drop
        // implementation.
        let buf = unsafe { ptr::read(&self.buf) };
        let len = self.len;

        // `IntoIter` cleans up unread elements in its own Drop impl.
        mem::forget(self);

        IntoIter {
            start: buf.ptr.as_ptr(),
            end: if mem::size_of::<T>() == 0 {
                ((buf.ptr.as_ptr() as usize) + len) as *const _
            } else if len == 0 {
                buf.ptr.as_ptr()
            } else {
                unsafe { buf.ptr.as_ptr().add(len) }
            },
            _buf: buf,
        }
    }
}

// From `https://doc.rust-lang.org/src/alloc/vec/partial_eq.rs.html`
macro_rules! impl_slice_eq {
    ([$($vars:tt)*] $lhs:ty, $rhs:ty) => {
        impl<T, U, $($vars)*> PartialEq<$rhs> for $lhs
        where
            T: PartialEq<U>,
        {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool { self[..] == other[..] }
        }
    }
}

impl_slice_eq! { [] Array<T>, Array<U> }
impl_slice_eq! { [] Array<T>, &[U] }
impl_slice_eq! { [] Array<T>, [U] }
impl_slice_eq! { [] [T], Array<U> }
impl_slice_eq! { [const N: usize] Array<T>, [U; N] }
impl_slice_eq! { [const N: usize] Array<T>, &[U; N] }

impl<T: Eq> Eq for Array<T> {}

impl<T: PartialOrd> PartialOrd for Array<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for Array<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for Array<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);

        for elem in self.iter() {
            elem.hash(state);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            None
        } else {
            unsafe {
                if mem::size_of::<T>() == 0 {
                    self.start = (self.start as usize + 1) as *const _;
                    Some(ptr::read(NonNull::<T>::dangling().as_ptr()))
                } else {
                    let old_ptr = self.start;
                    self.start = self.start.offset(1);
                    Some(ptr::read(old_ptr))
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            None
        } else {
            unsafe {
                if mem::size_of::<T>() == 0 {
                    self.end = (self.end as usize - 1) as *const _;
                    Some(ptr::read(NonNull::<T>::dangling().as_ptr()))
                } else {
                    self.end = self.end.offset(-1);
                    Some(ptr::read(self.end))
                }
            }
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIter<T> {
    /// Number of elements not yet yielded.
    fn remaining(&self) -> usize {
        let elem_size = mem::size_of::<T>();
        (self.end as usize - self.start as usize) / if elem_size == 0 { 1 } else { elem_size }
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        if mem::needs_drop::<T>() {
            let len = self.remaining();

            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.start as *mut T, len));
            }
        }

        // `RawArray` handles deallocation...
    }
}

/// Low-level utility for allocating, reallocating, and deallocating a buffer
/// of memory on the heap.
#[derive(Debug)]
struct RawArray<T> {
    /// Pointer to the allocation.
    ///
    /// [`NonNull`] is covariant over `T` and is null-pointer optimized.
    ptr: NonNull<T>,
    /// Size of the current allocation.
    cap: usize,
    /// In order to tell the drop checker that we do own values of type T, and
    /// therefore may drop some T's when we drop.
    _marker: marker::PhantomData<T>,
}

impl<T> RawArray<T> {
    #[inline]
    const fn new() -> Self {
        // For ZSTs, capacity is set to `usize::MAX` so the invariant
        // `len <= capacity` always holds, even though memory is never
        // allocated.
        let cap = if mem::size_of::<T>() == 0 { !0 } else { 0 };

        Self {
            // Memory is lazily allocated. Initialization is tracked by `cap`.
            ptr: NonNull::dangling(),
            cap,
            _marker: marker::PhantomData,
        }
    }

    fn with_capacity(capacity: usize) -> Self {
        let layout = match Layout::array::<T>(capacity) {
            Ok(layout) => layout,
            Err(_) => panic!("capacity overflow"),
        };

        if layout.size() == 0 {
            return Self::new();
        }

        assert!(layout.size() <= isize::MAX as usize, "allocation too large");

        let result = unsafe { alloc::alloc(layout) };

        let ptr = match NonNull::new(result as *mut T) {
            Some(ptr) => ptr,
            // Abort the program if allocation fails.
            None => alloc::handle_alloc_error(layout),
        };

        Self {
            ptr,
            cap: capacity,
            _marker: marker::PhantomData,
        }
    }

    #[inline]
    fn reserve(&mut self, len: usize, additional: usize) {
        if len.saturating_add(additional) > self.cap && mem::size_of::<T>() != 0 {
            self.grow_amortized(len, additional);
        }
    }

    #[inline]
    fn grow_one(&mut self) {
        self.grow_amortized(self.cap, 1);
    }

    /// # Panics
    ///
    /// Panics if the requested capacity exceeds [`isize::MAX`] bytes.
    ///
    /// # Aborts
    ///
    /// Aborts on OOM.
    fn grow_amortized(&mut self, len: usize, additional: usize) {
        let required_cap = match len.checked_add(additional) {
            Some(cap) => cap,
            None => panic!("capacity overflow"),
        };

        // The doubling cannot overflow because `cap <= isize::MAX` and the
        // type of `cap` is `usize`.
        let new_cap = cmp::max(self.cap * 2, required_cap);

        let new_layout = match Layout::array::<T>(new_cap) {
            Ok(layout) => layout,
            Err(_) => panic!("capacity overflow"),
        };

        assert!(
            new_layout.size() <= isize::MAX as usize,
            "allocation too large"
        );

        let new_ptr = if self.cap == 0 {
            unsafe { alloc::alloc(new_layout) }
        } else {
            // SAFETY: this exact layout was accepted when the current buffer
            // was allocated.
            let old_layout =
                unsafe { Layout::from_size_align_unchecked(self.cap * mem::size_of::<T>(), mem::align_of::<T>()) };
            let old_ptr = self.ptr.as_ptr() as *mut u8;
            unsafe { alloc::realloc(old_ptr, old_layout, new_layout.size()) }
        };

        self.ptr = match NonNull::new(new_ptr as *mut T) {
            Some(ptr) => ptr,
            // Abort the program if allocation fails.
            None => alloc::handle_alloc_error(new_layout),
        };

        self.cap = new_cap;
    }
}

impl<T> Drop for RawArray<T> {
    fn drop(&mut self) {
        let elem_size = mem::size_of::<T>();

        if self.cap != 0 && elem_size != 0 {
            unsafe {
                // Since `cap` > 0, there is memory allocated with this layout.
                let layout = Layout::from_size_align_unchecked(self.cap * elem_size, mem::align_of::<T>());
                alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout);
            }
        }
    }
}

unsafe impl<T: Send> Send for Array<T> {}
unsafe impl<T: Sync> Sync for Array<T> {}

unsafe impl<T: Send> Send for IntoIter<T> {}
unsafe impl<T: Sync> Sync for IntoIter<T> {}

#[allow(dead_code)]
fn assert_properties() {
    fn is_send<T: Send>() {}
    fn is_sync<T: Sync>() {}

    is_send::<Array<i32>>();
    is_sync::<Array<i32>>();

    is_send::<IntoIter<i32>>();
    is_sync::<IntoIter<i32>>();

    fn array_covariant<'a, T>(x: Array<&'static T>) -> Array<&'a T> {
        x
    }
    fn into_iter_covariant<'a, T>(x: IntoIter<&'static T>) -> IntoIter<&'a T> {
        x
    }
}
