use crate::queue::{move_node, move_nodes, Node, Queue};
use std::ptr::NonNull;

const INSERTION_SORT_THRESHOLD: usize = 8;

impl Queue {
    /// Sorts the elements by string value, ascending when `descend` is
    /// `false` and descending when it is `true`.
    ///
    /// This sort is stable (it does not reorder equal elements) in both
    /// directions: the descending order is produced by flipping the strict
    /// comparison, never by reversing.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* \* log(*n*)) time and
    /// *O*(log(*n*)) memory (merge-sort recursion). Small ranges fall back
    /// to an insertion sort. Elements move by relinking only; no values are
    /// copied.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["e", "b", "d", "c", "a"]);
    ///
    /// queue.sort(false);
    /// assert_eq!(Vec::from_iter(queue.iter()), vec!["a", "b", "c", "d", "e"]);
    ///
    /// queue.sort(true);
    /// assert_eq!(Vec::from_iter(queue.iter()), vec!["e", "d", "c", "b", "a"]);
    /// ```
    pub fn sort(&mut self, descend: bool) {
        if descend {
            merge_sort(self, |a, b| b < a);
        } else {
            merge_sort(self, |a, b| a < b);
        }
    }

    /// Merges the contents of a collection of individually-sorted queues
    /// into one queue sorted per `descend`, emptying every input queue.
    ///
    /// Each input must already be sorted in the same direction; the result
    /// for unsorted inputs is unspecified, though every ring stays
    /// well-formed.
    ///
    /// The merge is a pairwise tournament: with *N* total elements over *k*
    /// queues it computes in *O*(*N* \* log(*k*)) time, moving nodes by
    /// relinking only.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut first = Queue::from_iter(["a", "c"]);
    /// let mut second = Queue::from_iter(["b", "d"]);
    ///
    /// let merged = Queue::merge(vec![&mut first, &mut second], false);
    ///
    /// assert_eq!(Vec::from_iter(merged.iter()), vec!["a", "b", "c", "d"]);
    /// assert!(first.is_empty());
    /// assert!(second.is_empty());
    /// ```
    pub fn merge<'a, I>(queues: I, descend: bool) -> Queue
    where
        I: IntoIterator<Item = &'a mut Queue>,
    {
        let mut round: Vec<Queue> = queues.into_iter().map(std::mem::take).collect();
        while round.len() > 1 {
            let mut next_round = Vec::with_capacity((round.len() + 1) / 2);
            let mut pairs = round.into_iter();
            while let Some(mut left) = pairs.next() {
                if let Some(right) = pairs.next() {
                    merge_into(&mut left, right, descend);
                }
                next_round.push(left);
            }
            round = next_round;
        }
        round.pop().unwrap_or_default()
    }
}

/// Merge the sorted queue `right` into the sorted queue `left`, by splicing
/// `right` onto the end of `left` and merging the two adjacent sorted
/// ranges in place.
fn merge_into(left: &mut Queue, mut right: Queue, descend: bool) {
    if right.is_empty() {
        return;
    }
    if left.is_empty() {
        left.append(&mut right);
        return;
    }
    let mid = right.front_node();
    left.append(&mut right);
    // SAFETY: after the append, `front..mid` and `mid..ghost` are two valid
    // adjacent non-empty ranges of `left`'s ring.
    unsafe {
        if descend {
            merge_range(left.front_node(), mid, left.ghost_node(), &mut |a, b| {
                b < a
            });
        } else {
            merge_range(left.front_node(), mid, left.ghost_node(), &mut |a, b| {
                a < b
            });
        }
    }
}

fn merge_sort<F>(queue: &mut Queue, mut less: F)
where
    F: FnMut(&str, &str) -> bool,
{
    if queue.is_empty() || queue.is_singular() {
        return;
    }
    let (start, end) = (queue.front_node(), queue.ghost_node());
    unsafe { merge_sort_range(start, end, &mut less) };
}

unsafe fn mid_of_range(
    mut start: NonNull<Node>,
    end: NonNull<Node>,
) -> (NonNull<Node>, usize) {
    let mut mid = start;
    let mut len = 0;
    while start != end {
        len += 1;
        start = start.as_ref().next;
        if start != end {
            len += 1;
            start = start.as_ref().next;
            mid = mid.as_ref().next;
        }
    }
    (mid, len)
}

unsafe fn merge_sort_range<F>(
    mut start: NonNull<Node>,
    end: NonNull<Node>,
    less: &mut F,
) -> NonNull<Node>
where
    F: FnMut(&str, &str) -> bool,
{
    let (mut mid, len) = mid_of_range(start, end);
    if len <= INSERTION_SORT_THRESHOLD {
        return insertion_sort_range(start, end, less);
    }

    if start != mid && start.as_ref().next != mid {
        start = merge_sort_range(start, mid, less);
    }
    if mid != end && mid.as_ref().next != end {
        mid = merge_sort_range(mid, end, less);
    }

    if start != mid && mid != end {
        start = merge_range(start, mid, end, less);
    }
    start
}

unsafe fn merge_range<F>(
    mut start: NonNull<Node>,
    mid: NonNull<Node>,
    end: NonNull<Node>,
    less: &mut F,
) -> NonNull<Node>
where
    F: FnMut(&str, &str) -> bool,
{
    // This algorithm first logically partitions the range into two
    // sub-ranges, both of which are internally sorted:
    // - merged range: `start..mid`,
    // - unmerged range: `mid..end`.
    //
    // Then merge the nodes in the unmerged range one by one into the merged
    // range.
    let (mut merged, merged_back, mut to_merge) = (start, mid.as_ref().prev, mid);
    // If the back of the merged range <= the front of the unmerged range,
    // it is fully sorted, and the algorithm stops here.
    while to_merge != end
        && less(
            to_merge.as_ref().value.as_str(),
            merged_back.as_ref().value.as_str(),
        )
    {
        // Find a position of `merged` in the merged range, where the value
        // of the current node to merge < `*merged`.
        while merged != to_merge
            && !less(
                to_merge.as_ref().value.as_str(),
                merged.as_ref().value.as_str(),
            )
        {
            merged = merged.as_ref().next;
        }
        if merged == to_merge {
            break;
        }

        // Find a sub-range `to_merge..next_to_merge` in the unmerged range,
        // where every value in it is < `*merged`.
        let mut next_to_merge = to_merge.as_ref().next;
        while next_to_merge != end
            && less(
                next_to_merge.as_ref().value.as_str(),
                merged.as_ref().value.as_str(),
            )
        {
            next_to_merge = next_to_merge.as_ref().next;
        }
        if merged == start {
            start = to_merge;
        }
        // Move the sub-range `to_merge..next_to_merge` to the node before
        // `merged`.
        move_nodes(to_merge, next_to_merge.as_ref().prev, merged);
        to_merge = next_to_merge;
    }
    start
}

unsafe fn insertion_sort_range<F>(
    mut start: NonNull<Node>,
    end: NonNull<Node>,
    less: &mut F,
) -> NonNull<Node>
where
    F: FnMut(&str, &str) -> bool,
{
    let (mut sorted_back, mut to_sort) = (start, start.as_ref().next);
    loop {
        // If the back of the sorted range <= the current node to sort, then
        // it is already sorted. Move on to sort the next node.
        while to_sort != end
            && !less(
                to_sort.as_ref().value.as_str(),
                sorted_back.as_ref().value.as_str(),
            )
        {
            sorted_back = to_sort;
            to_sort = to_sort.as_ref().next;
        }
        if to_sort == end {
            break;
        }
        // Find a position of `sorted` in the sorted range, where the value
        // of the current node to sort < `*sorted`.
        let mut sorted = start;
        while sorted != to_sort
            && !less(
                to_sort.as_ref().value.as_str(),
                sorted.as_ref().value.as_str(),
            )
        {
            sorted = sorted.as_ref().next;
        }
        if sorted == start {
            start = to_sort;
        }
        let next = to_sort.as_ref().next;
        // Move the node `to_sort` to the node before `sorted`.
        move_node(std::mem::replace(&mut to_sort, next), sorted);
    }
    start
}
