use crate::error::ChainError;
use crate::forward::{ForwardChain, Node};
use std::fmt::Display;
use std::ptr::NonNull;

impl<T: PartialEq> PartialEq for ForwardChain<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for ForwardChain<T> {}

impl<T: Clone> Clone for ForwardChain<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: Display> ForwardChain<T> {
    /// Returns `true` if the chain holds an element whose textual
    /// rendering equals that of `value`.
    ///
    /// Search, removal and update all match on `Display` output rather
    /// than `PartialEq`; two distinct values with identical renderings are
    /// deliberately conflated.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::ForwardChain;
    ///
    /// let chain: ForwardChain<_> = (0..3).collect();
    /// assert!(chain.contains(&0));
    /// assert!(!chain.contains(&10));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        let needle = value.to_string();
        self.iter().any(|item| item.to_string() == needle)
    }

    /// Removes the first element whose textual rendering equals that of
    /// `value`. Returns whether a match was found and removed.
    ///
    /// # Errors
    ///
    /// [`ChainError::EmptyChain`] if the chain starts empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::ForwardChain;
    ///
    /// let mut chain: ForwardChain<_> = (1..=3).collect();
    /// assert_eq!(chain.remove(&2), Ok(true));
    /// assert_eq!(chain.remove(&9), Ok(false));
    /// assert_eq!(chain.to_string(), "1->3");
    /// ```
    pub fn remove(&mut self, value: &T) -> Result<bool, ChainError> {
        let head = self.head_node().ok_or(ChainError::EmptyChain)?;
        let needle = value.to_string();
        // SAFETY: all nodes visited below are reached by forward links
        // from `head`, so they are live nodes owned by this chain.
        unsafe {
            if head.as_ref().item.to_string() == needle {
                self.pop_front()?;
                return Ok(true);
            }
            let mut prev = head;
            while let Some(node) = prev.as_ref().next {
                if node.as_ref().item.to_string() == needle {
                    self.unlink_after(prev);
                    return Ok(true);
                }
                prev = node;
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
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::ForwardChain;
    ///
    /// let mut chain: ForwardChain<_> = (1..=3).collect();
    /// assert_eq!(chain.update(&2, 9), Ok(true));
    /// assert_eq!(chain.to_string(), "1->9->3");
    /// ```
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
    /// representative, relinking around and reclaiming the skipped nodes.
    ///
    /// Assumes duplicates are adjacent (e.g. the chain is sorted); it does
    /// not sort. `len` is kept in step with the nodes actually reachable.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::ForwardChain;
    ///
    /// let mut chain: ForwardChain<_> = [1, 1, 2, 2, 3].into_iter().collect();
    /// chain.dedup_adjacent();
    /// assert_eq!(chain.to_string(), "1->2->3");
    /// assert_eq!(chain.len(), 3);
    /// ```
    pub fn dedup_adjacent(&mut self) {
        let mut last_unique = match self.head_node() {
            Some(node) => node,
            None => return,
        };
        // SAFETY: the walk only follows live forward links; each collapsed
        // node is unlinked before being reclaimed, exactly once.
        unsafe {
            let mut rendering = last_unique.as_ref().item.to_string();
            let mut current = last_unique.as_ref().next;
            while let Some(node) = current {
                current = node.as_ref().next;
                if node.as_ref().item.to_string() == rendering {
                    self.unlink_after(last_unique);
                } else {
                    rendering = node.as_ref().item.to_string();
                    last_unique = node;
                }
            }
        }
    }
}

impl<T> ForwardChain<T> {
    /// Reverses the chain in place by pointer reversal; a no-op on empty
    /// or single-node chains. After reversal the former tail is the head
    /// and vice versa.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::ForwardChain;
    ///
    /// let mut chain: ForwardChain<_> = (1..=3).collect();
    /// chain.reverse();
    /// assert_eq!(chain.to_string(), "3->2->1");
    /// ```
    pub fn reverse(&mut self) {
        if self.len <= 1 {
            return;
        }
        let mut prev = None;
        let mut current = self.head;
        // SAFETY: each node is visited exactly once and only its forward
        // link is rewritten; ownership stays with the chain throughout.
        while let Some(mut node) = current {
            unsafe {
                let next = node.as_ref().next;
                node.as_mut().next = prev;
                prev = Some(node);
                current = next;
            }
        }
        self.tail = self.head;
        self.head = prev;
    }

    /// Detects a cycle in the raw link structure with Floyd's
    /// tortoise-and-hare: `slow` advances one link and `fast` two per
    /// step; the two meeting proves a cycle, `fast` running off the end
    /// proves there is none.
    ///
    /// The public API never produces a cycle; this is a diagnostic over
    /// the links themselves, for chains whose nodes were manipulated
    /// directly.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::ForwardChain;
    ///
    /// let chain: ForwardChain<_> = (0..10).collect();
    /// assert!(!chain.has_cycle());
    /// ```
    pub fn has_cycle(&self) -> bool {
        let mut slow = self.head;
        let mut fast = self.head;
        loop {
            // SAFETY: `step` only follows links of nodes owned by this
            // chain; on a cyclic structure every link still targets a
            // live node.
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

    /// Returns the middle element by the same two-pointer sweep: the item
    /// `slow` references when `fast` exhausts the chain. With one slow
    /// advance per two fast advances this is the lower midpoint (the
    /// earlier of the two central items on an even length), and the head
    /// item for chains of length two or less.
    ///
    /// Returns `None` on an empty chain, or if a cycle is detected
    /// mid-scan.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlist::ForwardChain;
    ///
    /// let chain: ForwardChain<_> = (1..=5).collect();
    /// assert_eq!(chain.find_middle(), Some(&3));
    ///
    /// let short: ForwardChain<_> = (1..=2).collect();
    /// assert_eq!(short.find_middle(), Some(&1));
    /// ```
    pub fn find_middle(&self) -> Option<&T> {
        let mut slow = self.head?;
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
                // The two pointers met: a cycle, no well-defined middle.
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
    use crate::error::ChainError;
    use crate::forward::ForwardChain;

    #[test]
    fn contains_matches_textual_rendering() {
        let mut chain = ForwardChain::new();
        assert!(!chain.contains(&1));
        chain.push_back(1);
        chain.push_back(2);
        assert!(chain.contains(&1));
        assert!(chain.contains(&2));
        assert!(!chain.contains(&3));
    }

    #[test]
    fn contains_conflates_identical_renderings() {
        // "1" the string and 1 the integer render identically, so a chain
        // of strings must report both as contained.
        let chain: ForwardChain<String> = ["1", "2"].into_iter().map(String::from).collect();
        assert!(chain.contains(&String::from("1")));
        assert!(!chain.contains(&String::from("3")));
    }

    #[test]
    fn remove_by_value() {
        let mut chain: ForwardChain<_> = (1..=4).collect();
        assert_eq!(chain.remove(&1), Ok(true)); // head
        assert_eq!(chain.remove(&4), Ok(true)); // tail
        assert_eq!(chain.back(), Some(&3));
        assert_eq!(chain.remove(&9), Ok(false));
        assert_eq!(chain.remove(&3), Ok(true)); // new tail, interior path
        assert_eq!(chain.back(), Some(&2));
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.remove(&2), Ok(true));
        assert_eq!(chain.remove(&2), Err(ChainError::EmptyChain));
    }

    #[test]
    fn remove_takes_first_match_only() {
        let mut chain: ForwardChain<_> = [5, 7, 5].into_iter().collect();
        assert_eq!(chain.remove(&5), Ok(true));
        assert_eq!(chain.to_string(), "7->5");
    }

    #[test]
    fn update_replaces_first_match_in_place() {
        let mut chain: ForwardChain<_> = [1, 2, 2].into_iter().collect();
        assert_eq!(chain.update(&2, 9), Ok(true));
        assert_eq!(chain.to_string(), "1->9->2");
        assert_eq!(chain.update(&7, 8), Ok(false));
        assert_eq!(chain.len(), 3);

        let mut empty = ForwardChain::<i32>::new();
        assert_eq!(empty.update(&1, 2), Err(ChainError::EmptyChain));
    }

    #[test]
    fn reverse_reverses_forward_order() {
        let mut chain: ForwardChain<_> = (1..=3).collect();
        chain.reverse();
        assert_eq!(chain.to_string(), "3->2->1");
        assert_eq!(chain.front(), Some(&3));
        assert_eq!(chain.back(), Some(&1));
        assert_eq!(chain.len(), 3);

        // Reversing twice restores the original order.
        chain.reverse();
        assert_eq!(chain.to_string(), "1->2->3");
    }

    #[test]
    fn reverse_degenerate_chains() {
        let mut empty = ForwardChain::<i32>::new();
        empty.reverse();
        assert!(empty.is_empty());

        let mut single: ForwardChain<_> = [1].into_iter().collect();
        single.reverse();
        assert_eq!(single.to_string(), "1");
        assert_eq!(single.back(), Some(&1));

        let mut pair: ForwardChain<_> = [1, 2].into_iter().collect();
        pair.reverse();
        assert_eq!(pair.to_string(), "2->1");
        assert_eq!(pair.back(), Some(&1));
    }

    #[test]
    fn public_api_never_creates_a_cycle() {
        let mut chain = ForwardChain::new();
        assert!(!chain.has_cycle());
        for i in 0..5 {
            chain.push_back(i);
            assert!(!chain.has_cycle());
        }
        chain.reverse();
        assert!(!chain.has_cycle());
        chain.remove_at(2).unwrap();
        chain.insert(1, 9).unwrap();
        assert!(!chain.has_cycle());
    }

    #[test]
    fn spliced_cycle_is_detected() {
        let mut chain: ForwardChain<_> = (0..6).collect();
        // Bend the raw tail link back to the head, then restore it before
        // the chain is dropped.
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
        assert_eq!(ForwardChain::<i32>::new().find_middle(), None);

        let cases: [(&[i32], i32); 5] = [
            (&[1], 1),
            (&[1, 2], 1),
            (&[1, 2, 3], 2),
            (&[1, 2, 3, 4], 2),
            (&[1, 2, 3, 4, 5], 3),
        ];
        for (items, expected) in cases {
            let chain: ForwardChain<_> = items.iter().copied().collect();
            assert_eq!(chain.find_middle(), Some(&expected), "items {:?}", items);
        }
    }

    #[test]
    fn dedup_adjacent_collapses_runs() {
        let mut chain: ForwardChain<_> = [1, 1, 2, 2, 3].into_iter().collect();
        chain.dedup_adjacent();
        assert_eq!(chain.to_string(), "1->2->3");
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.back(), Some(&3));
    }

    #[test]
    fn dedup_adjacent_repairs_tail() {
        let mut chain: ForwardChain<_> = [1, 2, 2, 2].into_iter().collect();
        chain.dedup_adjacent();
        assert_eq!(chain.to_string(), "1->2");
        assert_eq!(chain.back(), Some(&2));
        // The repaired tail must accept appends.
        chain.push_back(3);
        assert_eq!(chain.to_string(), "1->2->3");

        let mut empty = ForwardChain::<i32>::new();
        empty.dedup_adjacent();
        assert!(empty.is_empty());

        let mut uniform: ForwardChain<_> = [7, 7, 7].into_iter().collect();
        uniform.dedup_adjacent();
        assert_eq!(uniform.to_string(), "7");
        assert_eq!(uniform.len(), 1);
    }

    #[test]
    fn clone_and_eq_follow_element_order() {
        let chain: ForwardChain<_> = (0..4).collect();
        let cloned = chain.clone();
        assert_eq!(chain, cloned);

        let mut reversed = cloned;
        reversed.reverse();
        assert_ne!(chain, reversed);
    }
}
