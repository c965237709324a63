use crate::forward::{ForwardChain, Node};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// An iterator over the elements of a `ForwardChain`.
///
/// Each call to [`ForwardChain::iter`] starts a fresh traversal from the
/// head. Though the `Iter` does not hold a reference to the chain, it
/// *borrows* (immutably) from it, so a phantom marker of
/// `&'a ForwardChain<T>` is added to protect the chain from being written.
///
/// # Examples
///
/// ```compile_fail
/// use chainlist::ForwardChain;
///
/// let mut chain: ForwardChain<_> = (1..=3).collect();
/// let mut iter = chain.iter();
///
/// // Won't compile, because the chain is already borrowed immutably.
/// chain.push_back(4);
/// println!("{:?}", iter.next());
/// ```
#[derive(Clone)]
pub struct Iter<'a, T: 'a> {
    current: Option<NonNull<Node<T>>>,
    len: usize,
    _marker: PhantomData<&'a ForwardChain<T>>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(chain: &'a ForwardChain<T>) -> Self {
        Self {
            current: chain.head_node(),
            len: chain.len(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.len).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current?;
        // SAFETY: `current` is reached by forward links from the head of a
        // chain borrowed for `'a`, so it is a live node for that lifetime.
        let node = unsafe { node.as_ref() };
        self.current = node.next;
        self.len -= 1;
        Some(&node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// An owning iterator over the elements of a `ForwardChain`.
///
/// This `struct` is created by the [`into_iter`] method on
/// [`ForwardChain`] (provided by the `IntoIterator` trait).
///
/// [`into_iter`]: ForwardChain::into_iter
pub struct IntoIter<T> {
    chain: ForwardChain<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("chain", &self.chain)
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.chain.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.chain.len();
        (len, Some(len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for ForwardChain<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { chain: self }
    }
}

impl<'a, T> IntoIterator for &'a ForwardChain<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for ForwardChain<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut chain = ForwardChain::new();
        chain.extend(iter);
        chain
    }
}

impl<T> Extend<T> for ForwardChain<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.push_back(item));
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::forward::ForwardChain;

    #[test]
    fn iter_is_lazy_and_restartable() {
        let chain: ForwardChain<_> = (0..4).collect();

        let mut iter = chain.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.len(), 3);

        // A fresh traversal starts from the head again.
        let restarted: Vec<_> = chain.iter().copied().collect();
        assert_eq!(restarted, vec![0, 1, 2, 3]);
    }

    #[test]
    fn iter_is_fused() {
        let chain: ForwardChain<_> = (0..2).collect();
        let mut iter = chain.iter();
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn into_iter_drains_in_forward_order() {
        let chain: ForwardChain<_> = (0..3).collect();
        assert_eq!(Vec::from_iter(chain), vec![0, 1, 2]);
    }

    #[test]
    fn extend_appends_at_the_back() {
        let mut chain: ForwardChain<_> = (0..2).collect();
        chain.extend(2..4);
        assert_eq!(chain.to_string(), "0->1->2->3");
    }
}
