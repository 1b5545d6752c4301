use crate::queue::{move_node, Queue};

mod sort;

impl PartialEq for Queue {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl Eq for Queue {}

impl Clone for Queue {
    fn clone(&self) -> Self {
        self.iter().map(str::to_owned).collect()
    }
}

impl Queue {
    /// Removes and destroys the element at index ⌊n/2⌋ (0-indexed).
    ///
    /// The median is found with a slow/fast two-pointer traversal: `fast`
    /// advances two links per step while `slow` advances one, and `slow`
    /// stands on the median when `fast` reaches the ghost node.
    ///
    /// Returns `false` only when the queue is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c", "d"]);
    /// assert!(queue.delete_middle());
    /// assert_eq!(Vec::from_iter(queue.iter()), vec!["a", "b", "d"]);
    /// ```
    pub fn delete_middle(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        unsafe {
            let ghost = self.ghost_node();
            let mut slow = ghost.as_ref().next;
            let mut fast = ghost.as_ref().next;
            while fast != ghost && fast.as_ref().next != ghost {
                fast = fast.as_ref().next.as_ref().next;
                slow = slow.as_ref().next;
            }
            drop(self.detach_node(slow));
        }
        true
    }

    /// Removes every run of equal adjacent values, keeping only values that
    /// appeared exactly once.
    ///
    /// The queue is expected to be sorted by value; on unsorted input the
    /// surviving set is unspecified, though the ring stays well-formed. The
    /// *entire* run of equal values is destroyed, not just the excess
    /// copies.
    ///
    /// Returns `false` on queues with fewer than two elements (nothing to
    /// compare), `true` otherwise.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["1", "2", "2", "3"]);
    /// assert!(queue.delete_duplicates());
    /// assert_eq!(Vec::from_iter(queue.iter()), vec!["1", "3"]);
    /// ```
    pub fn delete_duplicates(&mut self) -> bool {
        if self.is_empty() || self.is_singular() {
            return false;
        }
        unsafe {
            let ghost = self.ghost_node();
            let mut curr = ghost.as_ref().next;
            while curr != ghost {
                let mut next = curr.as_ref().next;
                if next != ghost && next.as_ref().value == curr.as_ref().value {
                    // Destroy the whole run, the first copy included.
                    while next != ghost && next.as_ref().value == curr.as_ref().value {
                        let after = next.as_ref().next;
                        drop(self.detach_node(next));
                        next = after;
                    }
                    drop(self.detach_node(curr));
                }
                curr = next;
            }
        }
        true
    }

    /// Exchanges the elements at positions (2i, 2i+1) for every complete
    /// pair by relinking, leaving a trailing unpaired element in place.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time, in place, with no
    /// allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c", "d", "e"]);
    /// queue.swap_pairs();
    /// assert_eq!(Vec::from_iter(queue.iter()), vec!["b", "a", "d", "c", "e"]);
    /// ```
    pub fn swap_pairs(&mut self) {
        if self.is_empty() || self.is_singular() {
            return;
        }
        unsafe {
            let ghost = self.ghost_node();
            let mut first = ghost.as_ref().next;
            while first != ghost {
                let second = first.as_ref().next;
                if second == ghost {
                    break;
                }
                let resume = second.as_ref().next;
                // Moving the second element right before the first swaps
                // the pair with four relinks.
                move_node(second, first);
                first = resume;
            }
        }
    }

    /// Reverses the queue in place: one pass that swaps every node's `next`
    /// and `prev` links, the ghost node included, so iteration order is
    /// exactly reversed.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c"]);
    /// queue.reverse();
    /// assert_eq!(Vec::from_iter(queue.iter()), vec!["c", "b", "a"]);
    /// ```
    pub fn reverse(&mut self) {
        if self.is_empty() || self.is_singular() {
            return;
        }
        unsafe {
            let ghost = self.ghost_node();
            let mut curr = ghost;
            loop {
                let next = {
                    let node = &mut *curr.as_ptr();
                    std::mem::swap(&mut node.next, &mut node.prev);
                    node.prev
                };
                if next == ghost {
                    break;
                }
                curr = next;
            }
        }
    }

    /// Reverses each successive complete group of `k` elements
    /// independently, leaving a trailing group shorter than `k` untouched.
    ///
    /// `k <= 1` is the identity transform. `k >= len` reverses the whole
    /// queue in one piece.
    ///
    /// Each complete group is cut out of the ring, reversed as a standalone
    /// sub-ring with [`Queue::reverse`], and spliced back in its original
    /// position.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["5", "1", "4", "2", "3"]);
    /// queue.reverse_k(2);
    /// assert_eq!(Vec::from_iter(queue.iter()), vec!["1", "5", "2", "4", "3"]);
    /// ```
    pub fn reverse_k(&mut self, k: usize) {
        if k <= 1 || self.is_empty() {
            return;
        }
        if k >= self.len() {
            self.reverse();
            return;
        }
        unsafe {
            let ghost = self.ghost_node();
            let mut span_front = ghost.as_ref().next;
            while span_front != ghost {
                let mut span_back = span_front;
                let mut taken = 1;
                while taken < k && span_back.as_ref().next != ghost {
                    span_back = span_back.as_ref().next;
                    taken += 1;
                }
                if taken < k {
                    // Trailing group shorter than k stays in original order.
                    break;
                }
                let resume = span_back.as_ref().next;
                let mut group = Queue::from_detached(self.detach_nodes(span_front, span_back));
                group.reverse();
                if let Some(span) = group.into_detached() {
                    self.attach_nodes(resume.as_ref().prev, resume, span);
                }
                span_front = resume;
            }
        }
    }

    /// Removes every element that has a strictly smaller value anywhere to
    /// its right, so the surviving sequence read left-to-right is
    /// non-decreasing. Ties are kept.
    ///
    /// One backward pass with a running best-so-far; removed elements are
    /// destroyed immediately.
    ///
    /// Returns the resulting size, or 0 without scanning when the queue has
    /// fewer than two elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["e", "b", "f", "c", "d"]);
    /// assert_eq!(queue.ascend(), 3);
    /// assert_eq!(Vec::from_iter(queue.iter()), vec!["b", "c", "d"]);
    /// ```
    pub fn ascend(&mut self) -> usize {
        self.monotonic_filter(|survivor, candidate| candidate <= survivor)
    }

    /// Removes every element that has a strictly greater value anywhere to
    /// its right, so the surviving sequence read left-to-right is
    /// non-increasing. Ties are kept.
    ///
    /// One backward pass with a running best-so-far; removed elements are
    /// destroyed immediately.
    ///
    /// Returns the resulting size, or 0 without scanning when the queue has
    /// fewer than two elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["c", "i", "b", "e", "d"]);
    /// assert_eq!(queue.descend(), 3);
    /// assert_eq!(Vec::from_iter(queue.iter()), vec!["i", "e", "d"]);
    /// ```
    pub fn descend(&mut self) -> usize {
        self.monotonic_filter(|survivor, candidate| candidate >= survivor)
    }

    /// Backward monotonic-filtering pass shared by [`Queue::ascend`] and
    /// [`Queue::descend`].
    ///
    /// Scans right-to-left. The leftmost survivor so far dominates every
    /// value to its right, so it *is* the running best: a candidate element
    /// survives iff `keep(survivor, candidate)` holds against it, and then
    /// becomes the new survivor itself.
    fn monotonic_filter<F>(&mut self, keep: F) -> usize
    where
        F: Fn(&str, &str) -> bool,
    {
        if self.is_empty() || self.is_singular() {
            return 0;
        }
        unsafe {
            let ghost = self.ghost_node();
            let mut survivor = ghost.as_ref().prev;
            let mut curr = survivor.as_ref().prev;
            while curr != ghost {
                let prev = curr.as_ref().prev;
                if keep(survivor.as_ref().value.as_str(), curr.as_ref().value.as_str()) {
                    survivor = curr;
                } else {
                    drop(self.detach_node(curr));
                }
                curr = prev;
            }
        }
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::queue::tests::assert_well_formed;
    use crate::queue::Queue;
    use std::iter::FromIterator;

    fn queue_of(values: &[&str]) -> Queue {
        Queue::from_iter(values.iter().copied())
    }

    fn values_of(queue: &Queue) -> Vec<String> {
        queue.iter().map(str::to_owned).collect()
    }

    #[test]
    fn delete_middle_removes_floor_half() {
        fn check(input: &[&str], expected: &[&str], outcome: bool) {
            let mut queue = queue_of(input);
            assert_eq!(queue.delete_middle(), outcome);
            assert_eq!(values_of(&queue), expected);
            assert_well_formed(&queue);
        }
        check(&[], &[], false);
        check(&["a"], &[], true);
        check(&["a", "b"], &["a"], true);
        check(&["a", "b", "c"], &["a", "c"], true);
        check(&["a", "b", "c", "d"], &["a", "b", "d"], true);
        check(&["a", "b", "c", "d", "e"], &["a", "b", "d", "e"], true);
    }

    #[test]
    fn delete_duplicates_removes_whole_runs() {
        fn check(input: &[&str], expected: &[&str], outcome: bool) {
            let mut queue = queue_of(input);
            assert_eq!(queue.delete_duplicates(), outcome);
            assert_eq!(values_of(&queue), expected);
            assert_well_formed(&queue);
        }
        check(&[], &[], false);
        check(&["a"], &["a"], false);
        check(&["1", "2", "2", "3"], &["1", "3"], true);
        check(&["a", "a"], &[], true);
        check(&["a", "a", "a"], &[], true);
        check(&["a", "a", "b", "b", "c"], &["c"], true);
        check(&["a", "b", "c"], &["a", "b", "c"], true);
        check(&["a", "b", "b", "b", "c", "c", "d"], &["a", "d"], true);
    }

    #[test]
    fn swap_pairs_leaves_odd_tail() {
        fn check(input: &[&str], expected: &[&str]) {
            let mut queue = queue_of(input);
            queue.swap_pairs();
            assert_eq!(values_of(&queue), expected);
            assert_well_formed(&queue);
        }
        check(&[], &[]);
        check(&["a"], &["a"]);
        check(&["a", "b"], &["b", "a"]);
        check(&["a", "b", "c"], &["b", "a", "c"]);
        check(&["a", "b", "c", "d"], &["b", "a", "d", "c"]);
        check(&["a", "b", "c", "d", "e"], &["b", "a", "d", "c", "e"]);
    }

    #[test]
    fn reverse_reverses() {
        fn check(input: &[&str], expected: &[&str]) {
            let mut queue = queue_of(input);
            queue.reverse();
            assert_eq!(values_of(&queue), expected);
            assert_well_formed(&queue);
        }
        check(&[], &[]);
        check(&["a"], &["a"]);
        check(&["a", "b"], &["b", "a"]);
        check(&["a", "b", "c", "d"], &["d", "c", "b", "a"]);
    }

    #[test]
    fn reverse_is_an_involution() {
        let original = queue_of(&["c", "a", "d", "b"]);
        let mut queue = original.clone();
        queue.reverse();
        queue.reverse();
        assert_eq!(queue, original);
    }

    #[test]
    fn reverse_k_groups() {
        fn check(input: &[&str], k: usize, expected: &[&str]) {
            let mut queue = queue_of(input);
            queue.reverse_k(k);
            assert_eq!(values_of(&queue), expected);
            assert_well_formed(&queue);
        }
        // k <= 1 is the identity.
        check(&["a", "b", "c"], 0, &["a", "b", "c"]);
        check(&["a", "b", "c"], 1, &["a", "b", "c"]);
        // The trailing unpaired element stays put.
        check(&["5", "1", "4", "2", "3"], 2, &["1", "5", "2", "4", "3"]);
        check(&["a", "b", "c", "d", "e"], 3, &["c", "b", "a", "d", "e"]);
        check(&["a", "b", "c", "d", "e", "f"], 3, &["c", "b", "a", "f", "e", "d"]);
        // k >= len is a single full reversal.
        check(&["a", "b", "c"], 3, &["c", "b", "a"]);
        check(&["a", "b", "c"], 7, &["c", "b", "a"]);
        check(&[], 2, &[]);
    }

    #[test]
    fn reverse_k_of_one_equals_identity() {
        let original = queue_of(&["d", "a", "c", "b"]);
        let mut queue = original.clone();
        queue.reverse_k(1);
        assert_eq!(queue, original);
    }

    #[test]
    fn reverse_k_beyond_len_equals_reverse() {
        let original = queue_of(&["d", "a", "c", "b"]);
        let mut grouped = original.clone();
        let mut reversed = original.clone();
        grouped.reverse_k(10);
        reversed.reverse();
        assert_eq!(grouped, reversed);
    }

    #[test]
    fn ascend_keeps_non_decreasing_survivors() {
        fn check(input: &[&str], expected: &[&str], size: usize) {
            let mut queue = queue_of(input);
            assert_eq!(queue.ascend(), size);
            assert_eq!(values_of(&queue), expected);
            assert_well_formed(&queue);
            // Survivors are non-decreasing left to right.
            let survivors = values_of(&queue);
            assert!(survivors.windows(2).all(|w| w[0] <= w[1]));
        }
        check(&[], &[], 0);
        check(&["a"], &["a"], 0);
        check(&["b", "a"], &["a"], 1);
        check(&["a", "b"], &["a", "b"], 2);
        check(&["c", "a", "b", "a", "d"], &["a", "a", "d"], 3);
        // Ties are kept.
        check(&["b", "b", "c"], &["b", "b", "c"], 3);
    }

    #[test]
    fn descend_keeps_non_increasing_survivors() {
        fn check(input: &[&str], expected: &[&str], size: usize) {
            let mut queue = queue_of(input);
            assert_eq!(queue.descend(), size);
            assert_eq!(values_of(&queue), expected);
            assert_well_formed(&queue);
            let survivors = values_of(&queue);
            assert!(survivors.windows(2).all(|w| w[0] >= w[1]));
        }
        check(&[], &[], 0);
        check(&["a"], &["a"], 0);
        check(&["a", "b"], &["b"], 1);
        check(&["b", "a"], &["b", "a"], 2);
        check(&["a", "d", "b", "c", "b"], &["d", "c", "b"], 3);
        // Ties are kept.
        check(&["c", "c", "a"], &["c", "c", "a"], 3);
    }

    /// A deterministic pseudo-random soak: feed a long mixed command
    /// sequence and check the size bookkeeping and ring invariants after
    /// every step against a `Vec<String>` model.
    #[test]
    fn randomized_command_soak() {
        let mut state = 0x2545f4914f6cdd1d_u64;
        let mut next = move || {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };

        let mut queue = Queue::new();
        let mut model: Vec<String> = Vec::new();
        for step in 0..500 {
            match next() % 10 {
                0 | 1 | 2 => {
                    let value = format!("v{}", next() % 16);
                    queue.push_back(value.clone());
                    model.push(value);
                }
                3 | 4 => {
                    let value = format!("v{}", next() % 16);
                    queue.push_front(value.clone());
                    model.insert(0, value);
                }
                5 => {
                    let popped = queue.pop_front();
                    let expected = if model.is_empty() {
                        None
                    } else {
                        Some(model.remove(0))
                    };
                    assert_eq!(popped, expected);
                }
                6 => {
                    assert_eq!(queue.pop_back(), model.pop());
                }
                7 => {
                    queue.reverse();
                    model.reverse();
                }
                8 => {
                    let k = (next() % 5) as usize;
                    queue.reverse_k(k);
                    if k > 1 {
                        if k >= model.len() {
                            model.reverse();
                        } else {
                            for chunk in model.chunks_mut(k) {
                                if chunk.len() == k {
                                    chunk.reverse();
                                }
                            }
                        }
                    }
                }
                _ => {
                    let deleted = queue.delete_middle();
                    assert_eq!(deleted, !model.is_empty());
                    if !model.is_empty() {
                        let mid = model.len() / 2;
                        model.remove(mid);
                    }
                }
            }
            assert_eq!(queue.len(), model.len(), "diverged at step {}", step);
            assert_well_formed(&queue);
            assert_eq!(values_of(&queue), model);
        }
    }
}
