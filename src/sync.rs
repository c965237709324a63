use std::fmt;
use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::ChainError;
use crate::traits::Chain;
use crate::{BidirChain, ForwardChain};

/// A lock-guarded [`ForwardChain`] shareable between threads.
pub type SyncForwardChain<T> = SyncChain<T, ForwardChain<T>>;

/// A lock-guarded [`BidirChain`] shareable between threads.
pub type SyncBidirChain<T> = SyncChain<T, BidirChain<T>>;

/// A shared-ownership, lock-guarded handle around a [`Chain`].
///
/// Every mutating operation acquires the chain-wide write lock for its
/// full duration, so at most one structural mutation is ever in flight
/// and all mutations serialize into a single total order; no caller can
/// observe a partially-applied transition. Queries and traversal
/// snapshots take the read lock, so a racing mutation can never be seen
/// mid-update either. Acquisition blocks until the lock is available;
/// there are no
/// timeouts and no retries.
///
/// Cloning the handle shares the same underlying chain.
///
/// # Examples
///
/// ```
/// use chainlist::SyncForwardChain;
///
/// let chain = SyncForwardChain::new();
/// let writer = chain.clone();
///
/// std::thread::spawn(move || writer.push_back(1)).join().unwrap();
/// chain.push_back(2);
/// assert_eq!(chain.len(), 2);
/// ```
pub struct SyncChain<T, C = ForwardChain<T>> {
    inner: Arc<RwLock<C>>,
    _marker: PhantomData<fn(T) -> T>,
}

impl<T, C> Clone for SyncChain<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _marker: PhantomData,
        }
    }
}

impl<T, C: Chain<T>> SyncChain<T, C> {
    /// Create a handle around an empty chain.
    pub fn new() -> Self {
        Self::from_chain(C::default())
    }

    /// Wrap an existing chain in a lock-guarded handle.
    pub fn from_chain(chain: C) -> Self {
        Self {
            inner: Arc::new(RwLock::new(chain)),
            _marker: PhantomData,
        }
    }

    /// True iff the chain holds no elements. Guarded by the read lock so
    /// a racing mutation cannot be observed mid-update.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Number of elements, under the read lock.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Remove all elements.
    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// Clone of the element at position `at`, read under the lock.
    pub fn get(&self, at: usize) -> Result<T, ChainError>
    where
        T: Clone,
    {
        self.inner.read().get(at).map(T::clone)
    }

    /// Clone of the front element, read under the lock.
    pub fn front(&self) -> Option<T>
    where
        T: Clone,
    {
        self.inner.read().front().cloned()
    }

    /// Clone of the back element, read under the lock.
    pub fn back(&self) -> Option<T>
    where
        T: Clone,
    {
        self.inner.read().back().cloned()
    }

    /// Add an element at the front.
    pub fn push_front(&self, item: T) {
        self.inner.write().push_front(item)
    }

    /// Append an element at the back.
    pub fn push_back(&self, item: T) {
        self.inner.write().push_back(item)
    }

    /// Add an element at position `at`; `at == len` appends.
    pub fn insert(&self, at: usize, item: T) -> Result<(), ChainError> {
        self.inner.write().insert(at, item)
    }

    /// Remove and return the front element.
    pub fn pop_front(&self) -> Result<T, ChainError> {
        self.inner.write().pop_front()
    }

    /// Remove and return the back element.
    pub fn pop_back(&self) -> Result<T, ChainError> {
        self.inner.write().pop_back()
    }

    /// Remove and return the element at position `at`.
    pub fn remove_at(&self, at: usize) -> Result<T, ChainError> {
        self.inner.write().remove_at(at)
    }

    /// Reverse the element order in place, as one atomic transition.
    pub fn reverse(&self) {
        self.inner.write().reverse()
    }

    /// Floyd cycle detection, under the read lock.
    pub fn has_cycle(&self) -> bool {
        self.inner.read().has_cycle()
    }

    /// Clone of the two-pointer middle element.
    pub fn find_middle(&self) -> Option<T>
    where
        T: Clone,
    {
        self.inner.read().find_middle().cloned()
    }

    /// Textual-match membership test, under the read lock.
    pub fn contains(&self, value: &T) -> bool
    where
        T: Display,
    {
        self.inner.read().contains(value)
    }

    /// Remove the first textual match; `Ok(true)` iff one was removed.
    pub fn remove(&self, value: &T) -> Result<bool, ChainError>
    where
        T: Display,
    {
        self.inner.write().remove(value)
    }

    /// Replace the payload of the first textual match of `old` with
    /// `new`.
    pub fn update(&self, old: &T, new: T) -> Result<bool, ChainError>
    where
        T: Display,
    {
        self.inner.write().update(old, new)
    }

    /// Collapse adjacent textually-equal runs to one representative.
    pub fn dedup_adjacent(&self)
    where
        T: Display,
    {
        self.inner.write().dedup_adjacent()
    }

    /// A consistent copy of the current forward order, taken in one
    /// read-lock hold.
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner.read().snapshot()
    }

    /// Items joined by `"->"`, rendered in one read-lock hold.
    pub fn render(&self) -> String
    where
        T: Display,
    {
        self.inner.read().render()
    }
}

impl<T, C: Chain<T>> Default for SyncChain<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: fmt::Debug> fmt::Debug for SyncChain<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SyncChain").field(&*self.inner.read()).finish()
    }
}
