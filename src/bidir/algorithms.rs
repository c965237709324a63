use crate::bidir::{BidirChain, Node};
use crate::error::ChainError;
use std::fmt::Display;
use std::ptr::NonNull;

impl<T: PartialEq> PartialEq for BidirChain<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for BidirChain<T> {}

impl<T: Clone> Clone for BidirChain<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: Display> BidirChain<T> {
    /// Returns `true` if the chain holds an element whose textual
    /// rendering equals that of `value`, under the same matching rule as
    /// [`ForwardChain::contains`].
    ///
    /// [`ForwardChain::contains`]: crate::ForwardChain::contains
    pub fn contains(&self, value: &T) -> bool {
        let needle = value.to_string();
        self.iter().any(|item| item.to_string() == needle)
    }

    /// Removes the first element whose textual rendering equals that of
    /// `value`, repairing both directions of linkage around the removed
    /// node. Returns whether a match was found and removed.
    ///
    /// # Errors
    ///
    /// [`ChainError::EmptyChain`] if the chain starts empty.
    pub fn remove(&mut self, value: &T) -> Result<bool, ChainError> {
        if self.is_empty() {
            return Err(ChainError::EmptyChain);
        }
        let needle = value.to_string();
        // SAFETY: all nodes visited below are reached by forward links
        // from `head`, so they are live nodes owned by this chain;
        // `unlink` repairs both directions at any position.
        unsafe {
            let mut current = self.head_node();
            while let Some(node) = current {
                if node.as_ref().item.to_string() == needle {
                    self.unlink(node);
                    return Ok(true);
                }
                current = node.as_ref().next;
            }
        }
        Ok(false)
    }

    /// Replaces the payload of the first element whose textual rendering
    /// equals that of `old` with `new`, in place. Returns whether a match
    /// was found.
    ///
    /// # Errors
    ///
    /// [`ChainError::EmptyChain`] if the chain is empty.
    pub fn update(&mut self, old: &T, new: T) -> Result<bool, ChainError> {
        if self.is_empty() {
            return Err(ChainError::EmptyChain);
        }
        let needle = old.to_string();
        let mut current = self.head_node();
        while let Some(mut node) = current {
            // SAFETY: `node` is reached from `head`; only the payload is
            // written, never the links.
            unsafe {
                if node.as_ref().item.to_string() == needle {
                    node.as_mut().item = new;
                    return Ok(true);
                }
                current = node.as_ref().next;
            }
        }
        Ok(false)
    }

    /// Collapses consecutive runs of textually-equal items into one
    /// representative. Each collapsed node is unlinked with both
    /// directions repaired and reclaimed; `len` stays consistent with the
    /// reachable nodes. Assumes duplicates are adjacent; does not sort.
    pub fn dedup_adjacent(&mut self) {
        let mut last_unique = match self.head_node() {
            Some(node) => node,
            None => return,
        };
        // SAFETY: the walk only follows live forward links; each
        // collapsed node is unlinked before being reclaimed, exactly once.
        unsafe {
            let mut rendering = last_unique.as_ref().item.to_string();
            let mut current = last_unique.as_ref().next;
            while let Some(node) = current {
                current = node.as_ref().next;
                if node.as_ref().item.to_string() == rendering {
                    self.unlink(node);
                } else {
                    rendering = node.as_ref().item.to_string();
                    last_unique = node;
                }
            }
        }
    }
}

impl<T> BidirChain<T> {
    /// Reverses the chain in place by swapping each node's forward and
    /// backward links while walking the chain once, then exchanging the
    /// head and tail references. Every node's new link pair is the mirror
    /// image of the old one, so the back-references keep mirroring the
    /// forward structure exactly.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::BidirChain;
    ///
    /// let mut chain: BidirChain<_> = (1..=3).collect();
    /// chain.reverse();
    /// assert_eq!(chain.to_string(), "3->2->1");
    /// ```
    pub fn reverse(&mut self) {
        if self.len <= 1 {
            return;
        }
        let mut current = self.head_node();
        // SAFETY: each node is visited exactly once; swapping its link
        // pair never detaches it from the chain.
        while let Some(mut node) = current {
            unsafe {
                let next = node.as_ref().next;
                node.as_mut().next = node.as_ref().prev;
                node.as_mut().prev = next;
                current = next;
            }
        }
        std::mem::swap(&mut self.head, &mut self.tail);
    }

    /// Detects a cycle in the raw forward-link structure with Floyd's
    /// tortoise-and-hare. A diagnostic, like
    /// [`ForwardChain::has_cycle`]; the public API never produces one.
    ///
    /// [`ForwardChain::has_cycle`]: crate::ForwardChain::has_cycle
    pub fn has_cycle(&self) -> bool {
        let mut slow = self.head_node();
        let mut fast = self.head_node();
        loop {
            // SAFETY: `step` only follows links of nodes owned by this
            // chain.
            fast = unsafe { step(step(fast)) };
            if fast.is_none() {
                return false;
            }
            slow = unsafe { step(slow) };
            if slow == fast {
                return true;
            }
        }
    }

    /// Returns the middle element by the slow/fast two-pointer sweep over
    /// the forward links; `None` on an empty chain or when a cycle is
    /// detected mid-scan. Same midpoint convention as
    /// [`ForwardChain::find_middle`].
    ///
    /// [`ForwardChain::find_middle`]: crate::ForwardChain::find_middle
    pub fn find_middle(&self) -> Option<&T> {
        let mut slow = self.head_node()?;
        let mut fast = slow;
        loop {
            // SAFETY: `slow` and `fast` only ever hold nodes reached by
            // forward links from `head`.
            unsafe {
                let two_ahead = match fast.as_ref().next {
                    Some(next) => next.as_ref().next,
                    None => None,
                };
                fast = match two_ahead {
                    Some(node) => node,
                    None => return Some(&slow.as_ref().item),
                };
                slow = slow
                    .as_ref()
                    .next
                    .expect("slow pointer cannot outrun fast pointer");
            }
            if slow == fast {
                return None;
            }
        }
    }
}

/// Follow one forward link, or stop at the end of the chain.
unsafe fn step<T>(node: Option<NonNull<Node<T>>>) -> Option<NonNull<Node<T>>> {
    match node {
        Some(node) => node.as_ref().next,
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::bidir::tests::assert_links_mirrored;
    use crate::bidir::BidirChain;
    use crate::error::ChainError;

    #[test]
    fn reverse_mirrors_every_link_pair() {
        let mut chain: BidirChain<_> = (1..=3).collect();
        chain.reverse();
        assert_eq!(chain.to_string(), "3->2->1");
        // Head's back-reference and tail's forward link must both be
        // gone; every interior pair must mirror.
        assert_links_mirrored(&chain);

        // Reversing twice restores the original order and all
        // back-references.
        chain.reverse();
        assert_eq!(chain.to_string(), "1->2->3");
        assert_links_mirrored(&chain);
    }

    #[test]
    fn reverse_degenerate_chains() {
        let mut empty = BidirChain::<i32>::new();
        empty.reverse();
        assert!(empty.is_empty());

        let mut single: BidirChain<_> = [1].into_iter().collect();
        single.reverse();
        assert_eq!(single.to_string(), "1");
        assert_links_mirrored(&single);

        let mut pair: BidirChain<_> = [1, 2].into_iter().collect();
        pair.reverse();
        assert_eq!(pair.to_string(), "2->1");
        assert_links_mirrored(&pair);
    }

    #[test]
    fn remove_by_value_repairs_links() {
        let mut chain: BidirChain<_> = (1..=5).collect();
        assert_eq!(chain.remove(&3), Ok(true)); // interior
        assert_links_mirrored(&chain);
        assert_eq!(chain.remove(&1), Ok(true)); // head
        assert_links_mirrored(&chain);
        assert_eq!(chain.remove(&5), Ok(true)); // tail
        assert_eq!(chain.back(), Some(&4));
        assert_links_mirrored(&chain);
        assert_eq!(chain.remove(&9), Ok(false));
        assert_eq!(chain.to_string(), "2->4");

        chain.clear();
        assert_eq!(chain.remove(&2), Err(ChainError::EmptyChain));
    }

    #[test]
    fn remove_takes_the_first_match_over_a_tail_duplicate() {
        let mut chain: BidirChain<_> = [1, 5, 2, 5].into_iter().collect();
        assert_eq!(chain.remove(&5), Ok(true));
        // The interior match at position 1 goes, not the tail one.
        assert_eq!(chain.to_string(), "1->2->5");
        assert_eq!(chain.back(), Some(&5));
        assert_links_mirrored(&chain);
    }

    #[test]
    fn update_replaces_first_match_in_place() {
        let mut chain: BidirChain<_> = [1, 2, 2].into_iter().collect();
        assert_eq!(chain.update(&2, 9), Ok(true));
        assert_eq!(chain.to_string(), "1->9->2");
        assert_eq!(chain.update(&7, 8), Ok(false));
        assert_links_mirrored(&chain);
    }

    #[test]
    fn contains_matches_textual_rendering() {
        let chain: BidirChain<_> = (0..3).collect();
        assert!(chain.contains(&0));
        assert!(chain.contains(&2));
        assert!(!chain.contains(&10));
        assert!(!BidirChain::<i32>::new().contains(&0));
    }

    #[test]
    fn dedup_adjacent_collapses_runs() {
        let mut chain: BidirChain<_> = [1, 1, 2, 2, 3].into_iter().collect();
        chain.dedup_adjacent();
        assert_eq!(chain.to_string(), "1->2->3");
        assert_eq!(chain.len(), 3);
        assert_links_mirrored(&chain);

        let mut trailing: BidirChain<_> = [1, 2, 2].into_iter().collect();
        trailing.dedup_adjacent();
        assert_eq!(trailing.to_string(), "1->2");
        assert_eq!(trailing.back(), Some(&2));
        assert_links_mirrored(&trailing);
    }

    #[test]
    fn public_api_never_creates_a_cycle() {
        let mut chain = BidirChain::new();
        assert!(!chain.has_cycle());
        for i in 0..5 {
            chain.push_back(i);
        }
        chain.reverse();
        chain.remove_at(2).unwrap();
        chain.insert(1, 9).unwrap();
        assert!(!chain.has_cycle());
    }

    #[test]
    fn spliced_cycle_is_detected() {
        let mut chain: BidirChain<_> = (0..6).collect();
        // Bend the raw tail link back to the head, then restore it
        // before the chain is dropped.
        unsafe {
            let mut tail = chain.tail_node().unwrap();
            tail.as_mut().next = chain.head_node();
            assert!(chain.has_cycle());
            assert_eq!(chain.find_middle(), None);
            tail.as_mut().next = None;
        }
        assert!(!chain.has_cycle());
        assert_eq!(chain.find_middle(), Some(&2));
    }

    #[test]
    fn find_middle_midpoints() {
        assert_eq!(BidirChain::<i32>::new().find_middle(), None);

        let cases: [(&[i32], i32); 5] = [
            (&[1], 1),
            (&[1, 2], 1),
            (&[1, 2, 3], 2),
            (&[1, 2, 3, 4], 2),
            (&[1, 2, 3, 4, 5], 3),
        ];
        for (items, expected) in cases {
            let chain: BidirChain<_> = items.iter().copied().collect();
            assert_eq!(chain.find_middle(), Some(&expected), "items {:?}", items);
        }
    }

    #[test]
    fn clone_and_eq_follow_element_order() {
        let chain: BidirChain<_> = (0..4).collect();
        let cloned = chain.clone();
        assert_eq!(chain, cloned);
        assert_links_mirrored(&cloned);
    }
}
