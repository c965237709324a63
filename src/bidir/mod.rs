use std::fmt::{Debug, Display, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::bidir::iterator::Iter;
use crate::error::ChainError;

pub mod iterator;

mod algorithms;

/// The `BidirChain` is a doubly-linked chain of owned nodes.
///
/// It carries the same contract as [`ForwardChain`], with every node
/// additionally holding a back-reference to its predecessor. The
/// back-reference is lookup-only (the forward direction is the single
/// ownership path) and exists to make the operations that suffer from
/// forward-only traversal *O*(1): back removal no longer scans for the
/// predecessor of the tail, and targeted removal repairs both directions
/// of linkage without a second walk.
///
/// # Invariants
///
/// On top of the [`ForwardChain`] invariants: for every node `n` with a
/// successor `m`, `m.prev` points back at `n`; `head.prev` and
/// `tail.next` are always `None`. Every structural change keeps both
/// directions of linkage consistent.
///
/// [`ForwardChain`]: crate::ForwardChain
pub struct BidirChain<T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    pub(crate) len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

pub(crate) struct Node<T> {
    pub(crate) item: T,
    pub(crate) next: Option<NonNull<Node<T>>>,
    pub(crate) prev: Option<NonNull<Node<T>>>,
}

// private methods
impl<T> BidirChain<T> {
    pub(crate) fn head_node(&self) -> Option<NonNull<Node<T>>> {
        self.head
    }

    pub(crate) fn tail_node(&self) -> Option<NonNull<Node<T>>> {
        self.tail
    }

    /// Walk `at` forward links from the head.
    fn node_at(&self, at: usize) -> Option<NonNull<Node<T>>> {
        let mut current = self.head;
        for _ in 0..at {
            // SAFETY: every node reachable from `head` is a live
            // allocation owned by this chain.
            current = unsafe { current?.as_ref().next };
        }
        current
    }

    /// Detach `node` from the chain, repairing the forward link of its
    /// predecessor and the back-reference of its successor, and return
    /// its item.
    ///
    /// It is unsafe because it does not check whether `node` belongs to
    /// the chain.
    unsafe fn unlink(&mut self, node: NonNull<Node<T>>) -> T {
        let node = Box::from_raw(node.as_ptr());
        match node.prev {
            Some(mut prev) => prev.as_mut().next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(mut next) => next.as_mut().prev = node.prev,
            None => self.tail = node.prev,
        }
        self.len -= 1;
        node.item
    }

    /// Splice a fresh node holding `item` right before `next`, setting
    /// all four affected links.
    ///
    /// It is unsafe because it does not check whether `next` belongs to
    /// the chain.
    unsafe fn splice_before(&mut self, mut next: NonNull<Node<T>>, item: T) {
        let prev = next.as_ref().prev;
        let node = Node::new_detached(item, Some(next), prev);
        next.as_mut().prev = Some(node);
        match prev {
            Some(mut prev) => prev.as_mut().next = Some(node),
            None => self.head = Some(node),
        }
        self.len += 1;
    }
}

impl<T> BidirChain<T> {
    /// Create an empty `BidirChain`.
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
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the number of elements in the chain.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements, resetting the chain to the empty state.
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

    /// Returns a reference to the element at position `at` (0-based).
    ///
    /// # Errors
    ///
    /// - [`ChainError::EmptyChain`] if the chain is empty;
    /// - [`ChainError::IndexOutOfRange`] if fewer than `at + 1` nodes exist.
    pub fn get(&self, at: usize) -> Result<&T, ChainError> {
        if self.is_empty() {
            return Err(ChainError::EmptyChain);
        }
        let node = self.node_at(at).ok_or(ChainError::IndexOutOfRange {
            index: at,
            len: self.len,
        })?;
        // SAFETY: `node` was reached by forward links from `head`.
        Ok(unsafe { &node.as_ref().item })
    }

    /// Adds an element at the front of the chain, setting the former
    /// head's back-reference in *O*(1).
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::BidirChain;
    ///
    /// let mut chain = BidirChain::new();
    /// chain.push_front(2);
    /// chain.push_front(1);
    /// assert_eq!(chain.to_string(), "1->2");
    /// ```
    pub fn push_front(&mut self, item: T) {
        let node = Node::new_detached(item, self.head, None);
        match self.head {
            // SAFETY: the former head is a live node; only its
            // back-reference is written.
            Some(mut head) => unsafe { head.as_mut().prev = Some(node) },
            None => self.tail = Some(node),
        }
        self.head = Some(node);
        self.len += 1;
    }

    /// Appends an element at the back of the chain in *O*(1).
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::BidirChain;
    ///
    /// let mut chain = BidirChain::new();
    /// chain.push_back(1);
    /// chain.push_back(3);
    /// assert_eq!(chain.back(), Some(&3));
    /// ```
    pub fn push_back(&mut self, item: T) {
        let node = Node::new_detached(item, None, self.tail);
        match self.tail {
            // SAFETY: the former tail is a live node whose forward link
            // is `None` by invariant.
            Some(mut tail) => unsafe { tail.as_mut().next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
    }

    /// Adds an element at position `at`, with the same bound rule as
    /// [`ForwardChain::insert`]: `at == 0` prepends, `at == len` appends,
    /// interior positions splice with both directions of linkage set.
    ///
    /// # Errors
    ///
    /// [`ChainError::IndexOutOfRange`] if `at > len`.
    ///
    /// [`ForwardChain::insert`]: crate::ForwardChain::insert
    pub fn insert(&mut self, at: usize, item: T) -> Result<(), ChainError> {
        if at > self.len {
            return Err(ChainError::IndexOutOfRange {
                index: at,
                len: self.len,
            });
        }
        if at == self.len {
            self.push_back(item);
        } else if let Some(next) = self.node_at(at) {
            // SAFETY: `next` was reached from `head`, so it belongs to
            // this chain.
            unsafe { self.splice_before(next, item) };
        }
        Ok(())
    }

    /// Removes the front element and returns it, clearing the new head's
    /// back-reference.
    ///
    /// # Errors
    ///
    /// [`ChainError::EmptyChain`] if the chain is empty.
    pub fn pop_front(&mut self) -> Result<T, ChainError> {
        let head = self.head.ok_or(ChainError::EmptyChain)?;
        // SAFETY: `head` belongs to this chain.
        Ok(unsafe { self.unlink(head) })
    }

    /// Removes the back element and returns it.
    ///
    /// The back-reference of the tail makes this *O*(1); no scan for the
    /// predecessor is needed. The new tail's forward link is cleared.
    ///
    /// # Errors
    ///
    /// [`ChainError::EmptyChain`] if the chain is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::BidirChain;
    ///
    /// let mut chain: BidirChain<_> = (1..=3).collect();
    /// assert_eq!(chain.pop_back(), Ok(3));
    /// assert_eq!(chain.back(), Some(&2));
    /// ```
    pub fn pop_back(&mut self) -> Result<T, ChainError> {
        let tail = self.tail.ok_or(ChainError::EmptyChain)?;
        // SAFETY: `tail` belongs to this chain.
        Ok(unsafe { self.unlink(tail) })
    }

    /// Removes the element at position `at` and returns it. The splice
    /// repairs both the successor's back-reference and the predecessor's
    /// forward link; removing the tail reassigns `tail` to the
    /// predecessor.
    ///
    /// # Errors
    ///
    /// - [`ChainError::EmptyChain`] if the chain is empty;
    /// - [`ChainError::IndexOutOfRange`] if `at >= len`.
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
        let node = self.node_at(at).ok_or(ChainError::IndexOutOfRange {
            index: at,
            len: self.len,
        })?;
        // SAFETY: `node` was reached from `head`.
        Ok(unsafe { self.unlink(node) })
    }

    /// Copies all elements into `dest` starting at position `at`, leaving
    /// the chain untouched. A no-op on an empty chain.
    ///
    /// # Errors
    ///
    /// [`ChainError::InvalidArgument`] if `dest` cannot hold `at + len`
    /// items.
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

    /// Provides a forward iterator. Unlike the [`ForwardChain`] iterator
    /// it is double-ended, walking back-references from the tail.
    ///
    /// [`ForwardChain`]: crate::ForwardChain
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }
}

impl<T: Debug> Debug for BidirChain<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders the chain as its items joined by `"->"`, and as the empty
/// string when the chain is empty.
impl<T: Display> Display for BidirChain<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut sep = "";
        for item in self.iter() {
            write!(f, "{}{}", sep, item)?;
            sep = "->";
        }
        Ok(())
    }
}

impl<T> Default for BidirChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Node<T> {
    /// Create a detached node with the given item and link pair.
    pub(crate) fn new_detached(
        item: T,
        next: Option<NonNull<Node<T>>>,
        prev: Option<NonNull<Node<T>>>,
    ) -> NonNull<Node<T>> {
        NonNull::from(Box::leak(Box::new(Node { item, next, prev })))
    }
}

impl<T> Drop for BidirChain<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

unsafe impl<T: Send> Send for BidirChain<T> {}

unsafe impl<T: Sync> Sync for BidirChain<T> {}

#[cfg(test)]
mod tests {
    use crate::bidir::BidirChain;
    use crate::error::ChainError;
    use std::cell::RefCell;

    /// Walk the forward links checking that every back-reference mirrors
    /// them, that the boundary links are `None`, and that `len` agrees
    /// with the number of reachable nodes.
    pub(crate) fn assert_links_mirrored<T>(chain: &BidirChain<T>) {
        let mut reachable = 0;
        let mut prev = None;
        let mut current = chain.head_node();
        while let Some(node) = current {
            unsafe {
                assert_eq!(node.as_ref().prev, prev);
                reachable += 1;
                prev = Some(node);
                current = node.as_ref().next;
            }
        }
        assert_eq!(chain.len(), reachable);
        assert_eq!(chain.tail_node(), prev);
        if let Some(tail) = chain.tail_node() {
            assert!(unsafe { tail.as_ref().next.is_none() });
        }
        if let Some(head) = chain.head_node() {
            assert!(unsafe { head.as_ref().prev.is_none() });
        }
    }

    #[test]
    fn chain_create() {
        let mut chain = BidirChain::<i32>::new();
        assert!(chain.is_empty());
        chain.push_back(1);
        assert!(!chain.is_empty());
        assert_eq!(chain.pop_back(), Ok(1));
        assert!(chain.is_empty());
        assert_links_mirrored(&chain);
    }

    #[test]
    fn chain_drop_reclaims_every_node() {
        struct DropChecker<'a> {
            value: i32,
            dropped: &'a RefCell<Vec<i32>>,
        }
        impl<'a> Drop for DropChecker<'a> {
            fn drop(&mut self) {
                self.dropped.borrow_mut().push(self.value);
            }
        }
        let dropped = RefCell::new(Vec::new());
        let mut chain = BidirChain::new();
        for value in 1..=3 {
            chain.push_back(DropChecker {
                value,
                dropped: &dropped,
            });
        }
        drop(chain);
        assert_eq!(dropped.borrow().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn chain_push_and_pop() {
        let mut chain = BidirChain::new();
        assert_eq!(chain.pop_front(), Err(ChainError::EmptyChain));
        assert_eq!(chain.pop_back(), Err(ChainError::EmptyChain));

        chain.push_front(1);
        chain.push_front(2);
        chain.push_back(3);
        assert_links_mirrored(&chain);
        assert_eq!(chain.front(), Some(&2));
        assert_eq!(chain.back(), Some(&3));

        assert_eq!(chain.pop_back(), Ok(3));
        assert_links_mirrored(&chain);
        assert_eq!(chain.pop_front(), Ok(2));
        assert_eq!(chain.pop_back(), Ok(1));
        assert!(chain.is_empty());
        assert_links_mirrored(&chain);
    }

    #[test]
    fn ordered_appends_traverse_in_order() {
        let mut chain = BidirChain::new();
        chain.push_back(1);
        chain.push_back(2);
        chain.push_back(3);
        assert_eq!(chain.len(), 3);
        assert_eq!(Vec::from_iter(chain.iter().copied()), vec![1, 2, 3]);
        assert_links_mirrored(&chain);
    }

    #[test]
    fn chain_insert_repairs_both_directions() {
        let mut chain: BidirChain<_> = (1..=3).collect();
        chain.insert(1, 9).unwrap();
        assert_eq!(chain.to_string(), "1->9->2->3");
        assert_links_mirrored(&chain);

        chain.insert(0, 0).unwrap();
        chain.insert(5, 4).unwrap();
        assert_eq!(chain.to_string(), "0->1->9->2->3->4");
        assert_links_mirrored(&chain);

        assert_eq!(
            chain.insert(9, 9),
            Err(ChainError::IndexOutOfRange { index: 9, len: 6 })
        );
    }

    #[test]
    fn chain_remove_at_repairs_both_directions() {
        let mut chain: BidirChain<_> = (1..=3).collect();
        assert_eq!(chain.remove_at(1), Ok(2));
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.to_string(), "1->3");
        assert_links_mirrored(&chain);

        // Removing the tail reassigns it to the predecessor.
        assert_eq!(chain.remove_at(1), Ok(3));
        assert_eq!(chain.back(), Some(&1));
        assert_links_mirrored(&chain);

        assert_eq!(
            chain.remove_at(1),
            Err(ChainError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(chain.remove_at(0), Ok(1));
        assert_eq!(chain.remove_at(0), Err(ChainError::EmptyChain));
    }

    #[test]
    fn chain_get() {
        let chain: BidirChain<_> = (1..=3).collect();
        assert_eq!(chain.get(0), Ok(&1));
        assert_eq!(chain.get(2), Ok(&3));
        assert_eq!(
            chain.get(5),
            Err(ChainError::IndexOutOfRange { index: 5, len: 3 })
        );
        assert_eq!(BidirChain::<i32>::new().get(0), Err(ChainError::EmptyChain));
    }

    #[test]
    fn length_tracks_reachability_through_mixed_mutations() {
        let mut chain = BidirChain::new();
        for i in 0..8 {
            if i % 2 == 0 {
                chain.push_back(i);
            } else {
                chain.push_front(i);
            }
            assert_links_mirrored(&chain);
        }
        chain.remove_at(3).unwrap();
        chain.insert(5, 42).unwrap();
        assert_links_mirrored(&chain);
        while !chain.is_empty() {
            chain.pop_back().unwrap();
            assert_links_mirrored(&chain);
        }
    }

    #[test]
    fn chain_copy_into() {
        let chain: BidirChain<_> = (1..=3).collect();
        let mut buf = [0; 5];
        chain.copy_into(&mut buf, 2).unwrap();
        assert_eq!(buf, [0, 0, 1, 2, 3]);

        let mut small = [0; 2];
        assert!(matches!(
            chain.copy_into(&mut small, 1),
            Err(ChainError::InvalidArgument(_))
        ));
    }

    #[test]
    fn chain_display() {
        let chain: BidirChain<_> = (1..=3).collect();
        assert_eq!(chain.to_string(), "1->2->3");
        assert_eq!(BidirChain::<i32>::new().to_string(), "");
    }
}
