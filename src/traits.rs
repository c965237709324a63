use std::fmt::Display;

use crate::bidir::BidirChain;
use crate::error::ChainError;
use crate::forward::ForwardChain;

/// The sequence-operation contract shared by [`ForwardChain`] and
/// [`BidirChain`].
///
/// The two chain kinds are independent types over their own concrete node
/// representations; this trait is the seam that lets callers (and the
/// lock-guarded [`SyncChain`] handle) stay generic over which linkage is
/// in use. The textual-match family carries a `T: Display` bound per
/// method because matching is defined on `Display` renderings, not
/// `PartialEq`.
///
/// [`SyncChain`]: crate::SyncChain
pub trait Chain<T>: Default {
    /// True iff the chain holds no elements.
    fn is_empty(&self) -> bool;

    /// Number of elements in the chain.
    fn len(&self) -> usize;

    /// Remove all elements, resetting to the empty state.
    fn clear(&mut self);

    /// Reference to the element at position `at`.
    fn get(&self, at: usize) -> Result<&T, ChainError>;

    /// Reference to the front element, if any.
    fn front(&self) -> Option<&T>;

    /// Reference to the back element, if any.
    fn back(&self) -> Option<&T>;

    /// Add an element at the front.
    fn push_front(&mut self, item: T);

    /// Append an element at the back.
    fn push_back(&mut self, item: T);

    /// Add an element at position `at`; `at == len` appends.
    fn insert(&mut self, at: usize, item: T) -> Result<(), ChainError>;

    /// Remove and return the front element.
    fn pop_front(&mut self) -> Result<T, ChainError>;

    /// Remove and return the back element.
    fn pop_back(&mut self) -> Result<T, ChainError>;

    /// Remove and return the element at position `at`.
    fn remove_at(&mut self, at: usize) -> Result<T, ChainError>;

    /// Reverse the element order in place.
    fn reverse(&mut self);

    /// Floyd cycle detection over the raw forward links.
    fn has_cycle(&self) -> bool;

    /// The two-pointer middle element, or `None` on an empty or cyclic
    /// chain.
    fn find_middle(&self) -> Option<&T>;

    /// Textual-match membership test.
    fn contains(&self, value: &T) -> bool
    where
        T: Display;

    /// Remove the first textual match; `Ok(true)` iff one was removed.
    fn remove(&mut self, value: &T) -> Result<bool, ChainError>
    where
        T: Display;

    /// Replace the payload of the first textual match of `old` with
    /// `new`; `Ok(true)` iff one was found.
    fn update(&mut self, old: &T, new: T) -> Result<bool, ChainError>
    where
        T: Display;

    /// Collapse adjacent textually-equal runs to one representative.
    fn dedup_adjacent(&mut self)
    where
        T: Display;

    /// Collect the current forward order into a `Vec`.
    fn snapshot(&self) -> Vec<T>
    where
        T: Clone;

    /// Items joined by `"->"`; the empty string for an empty chain.
    fn render(&self) -> String
    where
        T: Display;
}

macro_rules! impl_chain {
    ($CHAIN:ident) => {
        impl<T> Chain<T> for $CHAIN<T> {
            #[inline]
            fn is_empty(&self) -> bool {
                $CHAIN::is_empty(self)
            }

            #[inline]
            fn len(&self) -> usize {
                $CHAIN::len(self)
            }

            #[inline]
            fn clear(&mut self) {
                $CHAIN::clear(self)
            }

            #[inline]
            fn get(&self, at: usize) -> Result<&T, ChainError> {
                $CHAIN::get(self, at)
            }

            #[inline]
            fn front(&self) -> Option<&T> {
                $CHAIN::front(self)
            }

            #[inline]
            fn back(&self) -> Option<&T> {
                $CHAIN::back(self)
            }

            #[inline]
            fn push_front(&mut self, item: T) {
                $CHAIN::push_front(self, item)
            }

            #[inline]
            fn push_back(&mut self, item: T) {
                $CHAIN::push_back(self, item)
            }

            #[inline]
            fn insert(&mut self, at: usize, item: T) -> Result<(), ChainError> {
                $CHAIN::insert(self, at, item)
            }

            #[inline]
            fn pop_front(&mut self) -> Result<T, ChainError> {
                $CHAIN::pop_front(self)
            }

            #[inline]
            fn pop_back(&mut self) -> Result<T, ChainError> {
                $CHAIN::pop_back(self)
            }

            #[inline]
            fn remove_at(&mut self, at: usize) -> Result<T, ChainError> {
                $CHAIN::remove_at(self, at)
            }

            #[inline]
            fn reverse(&mut self) {
                $CHAIN::reverse(self)
            }

            #[inline]
            fn has_cycle(&self) -> bool {
                $CHAIN::has_cycle(self)
            }

            #[inline]
            fn find_middle(&self) -> Option<&T> {
                $CHAIN::find_middle(self)
            }

            #[inline]
            fn contains(&self, value: &T) -> bool
            where
                T: Display,
            {
                $CHAIN::contains(self, value)
            }

            #[inline]
            fn remove(&mut self, value: &T) -> Result<bool, ChainError>
            where
                T: Display,
            {
                $CHAIN::remove(self, value)
            }

            #[inline]
            fn update(&mut self, old: &T, new: T) -> Result<bool, ChainError>
            where
                T: Display,
            {
                $CHAIN::update(self, old, new)
            }

            #[inline]
            fn dedup_adjacent(&mut self)
            where
                T: Display,
            {
                $CHAIN::dedup_adjacent(self)
            }

            #[inline]
            fn snapshot(&self) -> Vec<T>
            where
                T: Clone,
            {
                self.iter().cloned().collect()
            }

            #[inline]
            fn render(&self) -> String
            where
                T: Display,
            {
                self.to_string()
            }
        }
    };
}

impl_chain!(ForwardChain);
impl_chain!(BidirChain);
