use std::fmt::{Debug, Display, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::ChainError;
use crate::forward::iterator::{IntoIter, Iter};

pub mod iterator;

mod algorithms;

/// The `ForwardChain` is a singly-linked chain of owned nodes.
///
/// Each node holds one item and a forward link; the chain exclusively owns
/// every node it links to. Front insertion and removal are *O*(1); back
/// insertion is *O*(1) thanks to the tail reference, but back removal must
/// walk the whole chain to find the predecessor of the tail, which is the
/// reason the doubly-linked [`BidirChain`] exists.
///
/// # Invariants
///
/// - `head` is `None` iff `tail` is `None` iff `len == 0`;
/// - `len` equals the number of nodes reachable from `head` by following
///   forward links until `None`;
/// - forward traversal from `head` terminates at `tail`; the public API
///   never introduces a cycle ([`has_cycle`] is a diagnostic over the raw
///   link structure, not something the public surface can trigger).
///
/// [`BidirChain`]: crate::BidirChain
/// [`has_cycle`]: ForwardChain::has_cycle
pub struct ForwardChain<T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

pub(crate) struct Node<T> {
    pub(crate) item: T,
    pub(crate) next: Option<NonNull<Node<T>>>,
}

// private methods
impl<T> ForwardChain<T> {
    pub(crate) fn head_node(&self) -> Option<NonNull<Node<T>>> {
        self.head
    }

    #[cfg(test)]
    pub(crate) fn tail_node(&self) -> Option<NonNull<Node<T>>> {
        self.tail
    }

    /// Walk `at` forward links from the head.
    fn node_at(&self, at: usize) -> Option<NonNull<Node<T>>> {
        let mut current = self.head;
        for _ in 0..at {
            // SAFETY: every node reachable from `head` is a live allocation
            // owned by this chain.
            current = unsafe { current?.as_ref().next };
        }
        current
    }

    /// Unlink the successor of `prev` and return its item.
    ///
    /// It is unsafe because it does not check whether `prev` belongs to the
    /// chain; the caller must also guarantee that `prev` has a successor.
    unsafe fn unlink_after(&mut self, mut prev: NonNull<Node<T>>) -> T {
        let node = Box::from_raw(
            prev.as_ref()
                .next
                .expect("unlink_after called on the tail node")
                .as_ptr(),
        );
        prev.as_mut().next = node.next;
        if node.next.is_none() {
            self.tail = Some(prev);
        }
        self.len -= 1;
        node.item
    }

    /// Splice a fresh node holding `item` right after `prev`.
    ///
    /// It is unsafe because it does not check whether `prev` belongs to the
    /// chain.
    unsafe fn splice_after(&mut self, mut prev: NonNull<Node<T>>, item: T) {
        let node = Node::new_detached(item, prev.as_ref().next);
        if prev.as_ref().next.is_none() {
            self.tail = Some(node);
        }
        prev.as_mut().next = Some(node);
        self.len += 1;
    }
}

impl<T> ForwardChain<T> {
    /// Create an empty `ForwardChain`.
    ///
    /// # Examples
    /// ```
    /// use chainlist::ForwardChain;
    /// let chain: ForwardChain<u32> = ForwardChain::new();
    /// assert!(chain.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if the chain holds no elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the number of elements in the chain.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::ForwardChain;
    ///
    /// let mut chain = ForwardChain::new();
    /// chain.push_back(1);
    /// chain.push_back(2);
    /// assert_eq!(chain.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements, resetting the chain to the empty state.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    #[inline]
    pub fn clear(&mut self) {
        while self.pop_front().is_ok() {}
    }

    /// Provides a reference to the front element, or `None` if the chain
    /// is empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        // SAFETY: `head` is either `None` or a live node owned by the chain.
        self.head.map(|node| unsafe { &node.as_ref().item })
    }

    /// Provides a reference to the back element, or `None` if the chain
    /// is empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        // SAFETY: `tail` is either `None` or a live node owned by the chain.
        self.tail.map(|node| unsafe { &node.as_ref().item })
    }

    /// Returns a reference to the element at position `at` (0-based),
    /// walking `at` forward links from the head.
    ///
    /// # Errors
    ///
    /// - [`ChainError::EmptyChain`] if the chain is empty;
    /// - [`ChainError::IndexOutOfRange`] if fewer than `at + 1` nodes exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{ChainError, ForwardChain};
    ///
    /// let chain: ForwardChain<_> = (1..=3).collect();
    /// assert_eq!(chain.get(1), Ok(&2));
    /// assert_eq!(
    ///     chain.get(5),
    ///     Err(ChainError::IndexOutOfRange { index: 5, len: 3 })
    /// );
    /// ```
    pub fn get(&self, at: usize) -> Result<&T, ChainError> {
        if self.is_empty() {
            return Err(ChainError::EmptyChain);
        }
        let node = self.node_at(at).ok_or(ChainError::IndexOutOfRange {
            index: at,
            len: self.len,
        })?;
        // SAFETY: `node` was reached by following forward links from `head`,
        // so it is a live node owned by this chain.
        Ok(unsafe { &node.as_ref().item })
    }

    /// Adds an element at the front of the chain.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::ForwardChain;
    ///
    /// let mut chain = ForwardChain::new();
    /// chain.push_front(2);
    /// chain.push_front(1);
    /// assert_eq!(chain.front(), Some(&1));
    /// ```
    pub fn push_front(&mut self, item: T) {
        let node = Node::new_detached(item, self.head);
        self.head = Some(node);
        if self.tail.is_none() {
            self.tail = Some(node);
        }
        self.len += 1;
    }

    /// Appends an element at the back of the chain.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::ForwardChain;
    ///
    /// let mut chain = ForwardChain::new();
    /// chain.push_back(1);
    /// chain.push_back(3);
    /// assert_eq!(chain.back(), Some(&3));
    /// ```
    pub fn push_back(&mut self, item: T) {
        let node = Node::new_detached(item, None);
        match self.tail {
            // SAFETY: `tail` is a live node owned by the chain, and its
            // forward link is `None` by invariant.
            Some(mut tail) => unsafe { tail.as_mut().next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
    }

    /// Adds an element at position `at`: `at == 0` behaves as
    /// [`push_front`], `at == len` behaves as [`push_back`], any other
    /// valid position splices a new node between the node at `at - 1` and
    /// its successor.
    ///
    /// # Errors
    ///
    /// [`ChainError::IndexOutOfRange`] if `at > len`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::ForwardChain;
    ///
    /// let mut chain: ForwardChain<_> = (1..=3).collect();
    /// chain.insert(1, 9)?;
    /// assert_eq!(chain.to_string(), "1->9->2->3");
    /// # Ok::<(), chainlist::ChainError>(())
    /// ```
    ///
    /// [`push_front`]: ForwardChain::push_front
    /// [`push_back`]: ForwardChain::push_back
    pub fn insert(&mut self, at: usize, item: T) -> Result<(), ChainError> {
        if at > self.len {
            return Err(ChainError::IndexOutOfRange {
                index: at,
                len: self.len,
            });
        }
        if at == 0 {
            self.push_front(item);
        } else if at == self.len {
            self.push_back(item);
        } else if let Some(prev) = self.node_at(at - 1) {
            // SAFETY: `prev` was reached from `head`, so it belongs to
            // this chain.
            unsafe { self.splice_after(prev, item) };
        }
        Ok(())
    }

    /// Removes the front element and returns it.
    ///
    /// # Errors
    ///
    /// [`ChainError::EmptyChain`] if the chain is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::{ChainError, ForwardChain};
    ///
    /// let mut chain = ForwardChain::new();
    /// assert_eq!(chain.pop_front(), Err(ChainError::EmptyChain));
    ///
    /// chain.push_front(1);
    /// chain.push_front(3);
    /// assert_eq!(chain.pop_front(), Ok(3));
    /// assert_eq!(chain.pop_front(), Ok(1));
    /// ```
    pub fn pop_front(&mut self) -> Result<T, ChainError> {
        let head = self.head.ok_or(ChainError::EmptyChain)?;
        // SAFETY: `head` is a live node owned by this chain; removing it
        // here is the single point where its ownership is reclaimed.
        let node = unsafe { Box::from_raw(head.as_ptr()) };
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.len -= 1;
        Ok(node.item)
    }

    /// Removes the back element and returns it.
    ///
    /// Walks from the head to find the predecessor of the tail, so this is
    /// *O*(*n*) on a forward-only chain.
    ///
    /// # Errors
    ///
    /// [`ChainError::EmptyChain`] if the chain is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::ForwardChain;
    ///
    /// let mut chain: ForwardChain<_> = (1..=3).collect();
    /// assert_eq!(chain.pop_back(), Ok(3));
    /// assert_eq!(chain.back(), Some(&2));
    /// ```
    pub fn pop_back(&mut self) -> Result<T, ChainError> {
        if self.len <= 1 {
            return self.pop_front();
        }
        let prev = self
            .node_at(self.len - 2)
            .ok_or(ChainError::EmptyChain)?;
        // SAFETY: `prev` is the predecessor of the tail, reached from
        // `head`, and has a successor since `len >= 2`.
        Ok(unsafe { self.unlink_after(prev) })
    }

    /// Removes the element at position `at` and returns it, delegating to
    /// [`pop_front`]/[`pop_back`] for the boundary positions and splicing
    /// the predecessor to the successor otherwise.
    ///
    /// # Errors
    ///
    /// - [`ChainError::EmptyChain`] if the chain is empty;
    /// - [`ChainError::IndexOutOfRange`] if `at >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::ForwardChain;
    ///
    /// let mut chain: ForwardChain<_> = (1..=3).collect();
    /// assert_eq!(chain.remove_at(1), Ok(2));
    /// assert_eq!(chain.to_string(), "1->3");
    /// assert_eq!(chain.len(), 2);
    /// ```
    ///
    /// [`pop_front`]: ForwardChain::pop_front
    /// [`pop_back`]: ForwardChain::pop_back
    pub fn remove_at(&mut self, at: usize) -> Result<T, ChainError> {
        if self.is_empty() {
            return Err(ChainError::EmptyChain);
        }
        if at >= self.len {
            return Err(ChainError::IndexOutOfRange {
                index: at,
                len: self.len,
            });
        }
        if at == 0 {
            return self.pop_front();
        }
        if at == self.len - 1 {
            return self.pop_back();
        }
        let prev = self.node_at(at - 1).ok_or(ChainError::IndexOutOfRange {
            index: at,
            len: self.len,
        })?;
        // SAFETY: `prev` belongs to the chain and `at` is interior, so a
        // successor exists.
        Ok(unsafe { self.unlink_after(prev) })
    }

    /// Copies all elements into `dest` starting at position `at`, leaving
    /// the chain untouched. A no-op on an empty chain.
    ///
    /// # Errors
    ///
    /// [`ChainError::InvalidArgument`] if `dest` cannot hold `at + len`
    /// items.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::ForwardChain;
    ///
    /// let chain: ForwardChain<_> = (1..=3).collect();
    /// let mut buf = [0; 5];
    /// chain.copy_into(&mut buf, 2)?;
    /// assert_eq!(buf, [0, 0, 1, 2, 3]);
    /// # Ok::<(), chainlist::ChainError>(())
    /// ```
    pub fn copy_into(&self, dest: &mut [T], at: usize) -> Result<(), ChainError>
    where
        T: Clone,
    {
        if self.is_empty() {
            return Ok(());
        }
        let end = at
            .checked_add(self.len)
            .filter(|&end| end <= dest.len())
            .ok_or(ChainError::InvalidArgument(
                "destination slice cannot hold the chain from the given offset",
            ))?;
        for (slot, item) in dest[at..end].iter_mut().zip(self.iter()) {
            *slot = item.clone();
        }
        Ok(())
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::ForwardChain;
    ///
    /// let chain: ForwardChain<_> = (0..3).collect();
    /// let mut iter = chain.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }
}

impl<T: Debug> Debug for ForwardChain<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders the chain as its items joined by `"->"`, and as the empty
/// string when the chain is empty.
///
/// # Examples
///
/// ```
/// use chainlist::ForwardChain;
///
/// let chain: ForwardChain<_> = (1..=3).collect();
/// assert_eq!(chain.to_string(), "1->2->3");
/// assert_eq!(ForwardChain::<i32>::new().to_string(), "");
/// ```
impl<T: Display> Display for ForwardChain<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut sep = "";
        for item in self.iter() {
            write!(f, "{}{}", sep, item)?;
            sep = "->";
        }
        Ok(())
    }
}

impl<T> Default for ForwardChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Node<T> {
    /// Create a detached node with the given item and forward link.
    pub(crate) fn new_detached(item: T, next: Option<NonNull<Node<T>>>) -> NonNull<Node<T>> {
        NonNull::from(Box::leak(Box::new(Node { item, next })))
    }
}

impl<T> Drop for ForwardChain<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

unsafe impl<T: Send> Send for ForwardChain<T> {}

unsafe impl<T: Sync> Sync for ForwardChain<T> {}

// Ensure that `ForwardChain` and its read-only iterator are covariant in
// their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: ForwardChain<&'static str>) -> ForwardChain<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}
