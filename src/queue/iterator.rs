use crate::queue::{Node, Queue};
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;
use std::ptr::NonNull;

/// An iterator over the element values of a `Queue`, yielding `&str`.
///
/// It uses a pair of nodes `start..end` to represent a half-open subrange of
/// the ring, where `start` is inclusive and `end` is not.
///
/// Though the `Iter` does not hold a reference to the queue, it *borrows*
/// (immutably) from it, so a phantom marker of `&'a Queue` is added to
/// protect the queue from being written while the iterator is alive.
///
/// Element values are immutable after insertion, so there is no mutable
/// counterpart; use [`CursorMut`] to restructure the ring instead.
///
/// [`CursorMut`]: crate::queue::cursor::CursorMut
#[derive(Clone)]
pub struct Iter<'a> {
    start: NonNull<Node>,
    end: NonNull<Node>,
    _marker: PhantomData<&'a Queue>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(queue: &'a Queue) -> Self {
        let start = queue.front_node();
        let end = queue.ghost_node();
        let _marker = PhantomData;
        Self {
            start,
            end,
            _marker,
        }
    }
}

impl<'a> fmt::Debug for Iter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("Iter");
        // SAFETY: `start..end` is always a valid range of a ring, so every
        // node on the way is live.
        let mut ptr = self.start;
        while ptr != self.end {
            let current = unsafe { ptr.as_ref() };
            f.field(&current.value);
            ptr = current.next;
        }
        f.finish()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    /// Return `*start` and reset the iterating range to `(start.next)..end`,
    /// or return `None` if `start..end` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start..end` is a valid non-empty range here, so `start`
        // is a live non-ghost node.
        let current = unsafe { self.start.as_ref() };
        self.start = current.next;
        Some(current.value.as_str())
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    /// Reset the iterating range to `start..(end.prev)` and return `*end`,
    /// or return `None` if `start..end` is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start..end` is a valid non-empty range here, so
        // `end.prev` is a live non-ghost node.
        self.end = unsafe { self.end.as_ref().prev };
        let current = unsafe { self.end.as_ref() };
        Some(current.value.as_str())
    }
}

impl<'a> FusedIterator for Iter<'a> {}

/// An owning iterator over the element values of a `Queue`.
///
/// This `struct` is created by the [`into_iter`] method on [`Queue`]
/// (provided by the `IntoIterator` trait).
///
/// [`into_iter`]: Queue::into_iter
pub struct IntoIter {
    queue: Queue,
}

impl fmt::Debug for IntoIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("queue", &self.queue)
            .finish()
    }
}

impl Iterator for IntoIter {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.queue.pop_front()
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl DoubleEndedIterator for IntoIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.queue.pop_back()
    }
}

impl FusedIterator for IntoIter {}

impl IntoIterator for Queue {
    type Item = String;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { queue: self }
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<String> for Queue {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut queue = Queue::new();
        queue.extend(iter);
        queue
    }
}

impl<'a> FromIterator<&'a str> for Queue {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_owned).collect()
    }
}

impl Extend<String> for Queue {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| self.push_back(value));
    }
}

impl<'a> Extend<&'a str> for Queue {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(str::to_owned))
    }
}

unsafe impl Send for Iter<'_> {}

unsafe impl Sync for Iter<'_> {}
