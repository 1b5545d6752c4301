use crate::queue::{Node, Queue};
use std::fmt;
use std::fmt::Formatter;
use std::ptr::NonNull;

/// A cursor over a `Queue`.
///
/// A `Cursor` is like an iterator, except that it can freely seek
/// back-and-forth.
///
/// In a queue with length *n*, there are *n* + 1 valid locations for the
/// cursor, the extra one being the ghost node.
///
/// # Examples
///
/// ```
/// use string_ring::Queue;
/// use std::iter::FromIterator;
///
/// let queue = Queue::from_iter(["a", "b", "c"]);
///
/// let mut cursor = queue.cursor_front();
/// assert_eq!(cursor.current(), Some("a"));
///
/// assert!(cursor.move_next().is_ok());
/// assert_eq!(cursor.current(), Some("b"));
///
/// let mut cursor = queue.cursor_end();
/// assert_eq!(cursor.current(), None);
/// assert_eq!(cursor.previous(), Some("c"));
///
/// // Moving forward off the end is refused, but cyclic motion
/// // passes through the ghost node.
/// assert!(cursor.move_next().is_err());
/// cursor.move_next_cyclic();
/// assert_eq!(cursor.current(), Some("a"));
/// ```
#[derive(Clone)]
pub struct Cursor<'a> {
    pub(crate) current: NonNull<Node>,
    pub(crate) queue: &'a Queue,
}

/// Compare cursors by their position.
///
/// Only cursors that belong to the same queue and sit at the same position
/// are considered equal.
impl<'a> PartialEq for Cursor<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.same_queue_with(other) && self.current == other.current
    }
}

impl<'a> Eq for Cursor<'a> {}

/// A cursor over a `Queue` with editing operations.
///
/// A `CursorMut` is like an iterator, except that it can freely seek
/// back-and-forth, and can safely restructure the queue during iteration.
/// It is the one canonical traverse-while-mutating abstraction of the crate:
/// [`remove`] detaches the current element and advances the cursor as a
/// single operation.
///
/// Element values are immutable after insertion, so the mutability is of the
/// ring structure, never of the stored strings.
///
/// [`remove`]: CursorMut::remove
pub struct CursorMut<'a> {
    pub(crate) current: NonNull<Node>,
    pub(crate) queue: &'a mut Queue,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        // Private methods
        impl<'a> $CURSOR<'a> {
            pub(crate) fn is_ghost_node(&self) -> bool {
                self.current == self.queue.ghost_node()
            }
            pub(crate) fn is_front_node(&self) -> bool {
                self.prev_node() == self.queue.ghost_node()
            }
            pub(crate) fn next_node(&self) -> NonNull<Node> {
                // SAFETY: `current.next` is always valid since it is a
                // cyclic ring.
                unsafe { self.current.as_ref().next }
            }
            pub(crate) fn prev_node(&self) -> NonNull<Node> {
                // SAFETY: `current.prev` is always valid since it is a
                // cyclic ring.
                unsafe { self.current.as_ref().prev }
            }
        }

        impl<'a> $CURSOR<'a> {
            /// Returns `true` if the `Queue` is empty. See [`Queue::is_empty`].
            pub fn is_empty(&self) -> bool {
                self.queue.is_empty()
            }

            /// Move the cursor to the next position, where passing through
            /// the ghost node is allowed.
            ///
            /// This operation should compute in *O*(1) time.
            pub fn move_next_cyclic(&mut self) {
                if self.is_empty() {
                    return;
                }
                self.current = self.next_node();
            }

            /// Move the cursor to the previous position, where passing
            /// through the ghost node is allowed.
            ///
            /// This operation should compute in *O*(1) time.
            pub fn move_prev_cyclic(&mut self) {
                if self.is_empty() {
                    return;
                }
                self.current = self.prev_node();
            }

            /// Move the cursor to the next position, or return an error if
            /// that would pass through the ghost node.
            ///
            /// This operation should compute in *O*(1) time.
            pub fn move_next(&mut self) -> Result<(), &'static str> {
                if !self.is_empty() && !self.is_ghost_node() {
                    self.move_next_cyclic();
                    return Ok(());
                }
                Err("`move_next` across ghost boundary")
            }

            /// Move the cursor to the previous position, or return an error
            /// if that would pass through the ghost node.
            ///
            /// This operation should compute in *O*(1) time.
            pub fn move_prev(&mut self) -> Result<(), &'static str> {
                if !self.is_empty() && !self.is_front_node() {
                    self.move_prev_cyclic();
                    return Ok(());
                }
                Err("`move_prev` across ghost boundary")
            }

            /// Move the cursor forward by the given number of steps, or
            /// return the step at which the ghost boundary was hit.
            ///
            /// If an error occurs, the cursor stays at the ghost node.
            ///
            /// This operation should compute in *O*(*n*) time.
            pub fn seek_forward(&mut self, steps: usize) -> Result<(), usize> {
                (0..steps).try_for_each(|i| self.move_next().map_err(|_| i))
            }

            /// Move the cursor backward by the given number of steps, or
            /// return the step at which the ghost boundary was hit.
            ///
            /// If an error occurs, the cursor stays at the first node.
            ///
            /// This operation should compute in *O*(*n*) time.
            pub fn seek_backward(&mut self, steps: usize) -> Result<(), usize> {
                (0..steps).try_for_each(|i| self.move_prev().map_err(|_| i))
            }

            /// Set the cursor to the start of the queue (i.e. the first node).
            ///
            /// This operation should compute in *O*(1) time.
            #[inline]
            pub fn move_to_start(&mut self) {
                self.current = self.queue.front_node();
            }

            /// Set the cursor to the end of the queue (i.e. the ghost node).
            ///
            /// This operation should compute in *O*(1) time.
            #[inline]
            pub fn move_to_end(&mut self) {
                self.current = self.queue.ghost_node();
            }

            /// Return the value at the current node of the cursor, or
            /// return `None` if it is located at the ghost node.
            pub fn current(&self) -> Option<&'a str> {
                if self.is_ghost_node() {
                    return None;
                }
                // SAFETY: non-ghost nodes always hold a valid value.
                unsafe { Some(self.current.as_ref().value.as_str()) }
            }

            /// Return the value at the previous node of the cursor, or
            /// return `None` if it is located at the first node.
            ///
            /// This is useful when walking the ring backwards.
            pub fn previous(&self) -> Option<&'a str> {
                if self.is_front_node() {
                    return None;
                }
                // SAFETY: the previous node of a non-first node is never the
                // ghost node, and non-ghost nodes always hold a valid value.
                unsafe { Some(self.prev_node().as_ref().value.as_str()) }
            }
        }

        impl<'a> fmt::Debug for $CURSOR<'a> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($CURSOR))
                    .field("queue", &self.queue)
                    .field("current", &self.current())
                    .finish()
            }
        }
    };
}

impl_cursor!(CursorMut);
impl_cursor!(Cursor);

impl<'a> Cursor<'a> {
    pub(crate) fn new(queue: &'a Queue, current: NonNull<Node>) -> Self {
        Self { current, queue }
    }

    fn same_queue_with(&self, other: &Self) -> bool {
        self.queue as *const _ == other.queue as *const _
    }
}

impl<'a> CursorMut<'a> {
    pub(crate) fn new(queue: &'a mut Queue, current: NonNull<Node>) -> Self {
        Self { current, queue }
    }

    /// Insert a new value before the given node `next`.
    ///
    /// It is unsafe because it does not check whether `next` belongs to the
    /// queue the cursor points into.
    unsafe fn insert_before(&mut self, next: NonNull<Node>, value: String) -> NonNull<Node> {
        let node = Node::new_detached(value);
        self.queue.attach_node(next.as_ref().prev, next, node);
        node
    }

    /// Re-borrow the mutable cursor as a short-lived immutable one.
    pub fn as_cursor(&self) -> Cursor<'_> {
        Cursor::new(self.queue, self.current)
    }

    /// Temporarily view the queue via an immutable reference.
    ///
    /// This is useful where the queue cannot be read directly while a
    /// mutable cursor is alive.
    pub fn view(&self) -> &Queue {
        self.queue
    }
}

// Methods that change the linking structure of the ring.
impl<'a> CursorMut<'a> {
    /// Insert a value before the cursor position. The cursor stays at the
    /// same node.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "c"]);
    /// let mut cursor = queue.cursor_front_mut();
    ///
    /// assert!(cursor.move_next().is_ok());
    /// cursor.insert("b".to_string());
    /// assert_eq!(cursor.current(), Some("c"));
    ///
    /// assert_eq!(Vec::from_iter(queue.iter()), vec!["a", "b", "c"]);
    /// ```
    pub fn insert(&mut self, value: String) {
        // SAFETY: `self.current` is a valid node of the ring, so it is safe.
        unsafe { self.insert_before(self.current, value) };
    }

    /// Detach the element at the cursor and return its value, or return
    /// `None` if the cursor is at the ghost node. After removal, the cursor
    /// is moved to the next node.
    ///
    /// This is the "advance and detach current" operation: it keeps the
    /// ring well-formed in a single step, so traversal code never touches a
    /// freed node.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c"]);
    /// let mut cursor = queue.cursor_front_mut();
    ///
    /// assert_eq!(cursor.remove().as_deref(), Some("a"));
    /// assert_eq!(cursor.current(), Some("b"));
    ///
    /// cursor.move_to_end();
    /// assert_eq!(cursor.remove(), None);
    ///
    /// assert_eq!(Vec::from_iter(queue.iter()), vec!["b", "c"]);
    /// ```
    pub fn remove(&mut self) -> Option<String> {
        if self.is_ghost_node() {
            return None;
        }
        let next = self.next_node();
        // SAFETY: `self.current` is a valid non-ghost node of the ring.
        let node = unsafe { self.queue.detach_node(self.current) };
        self.current = next;
        Some(Node::into_value(node))
    }

    /// Detach the element before the cursor and return its value, or return
    /// `None` if the cursor is at the first node. After removal, the cursor
    /// stays at the same node.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn backspace(&mut self) -> Option<String> {
        self.move_prev().ok().and_then(|_| self.remove())
    }

    /// Split the queue into two at the current element (inclusive). This
    /// returns a new queue consisting of everything from the cursor to the
    /// end, with the original queue retaining everything before the cursor.
    ///
    /// If the cursor is pointing at the ghost node, `None` is returned.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn split(&mut self) -> Option<Queue> {
        if self.is_ghost_node() {
            return None;
        }
        // After splitting, the cursor is left at the ghost node.
        let current = std::mem::replace(&mut self.current, self.queue.ghost_node());
        // SAFETY: `current` is a non-ghost node, so `current..=back` is a
        // valid range of the ring.
        unsafe {
            Some(Queue::from_detached(
                self.queue.detach_nodes(current, self.queue.back_node()),
            ))
        }
    }

    /// Splice another queue between the current node and its previous node,
    /// consuming the other queue.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "d"]);
    /// let other = Queue::from_iter(["b", "c"]);
    /// let mut cursor = queue.cursor_front_mut();
    ///
    /// assert!(cursor.move_next().is_ok());
    /// cursor.splice(other);
    /// assert_eq!(cursor.current(), Some("d"));
    ///
    /// assert_eq!(Vec::from_iter(queue.iter()), vec!["a", "b", "c", "d"]);
    /// ```
    pub fn splice(&mut self, other: Queue) {
        if let Some(span) = other.into_detached() {
            // SAFETY: `self.current.prev` and `self.current` are valid
            // adjacent nodes of the ring, so it is safe.
            unsafe {
                self.queue.attach_nodes(self.prev_node(), self.current, span);
            }
        }
    }
}

unsafe impl Send for Cursor<'_> {}

unsafe impl Sync for Cursor<'_> {}

unsafe impl Send for CursorMut<'_> {}

unsafe impl Sync for CursorMut<'_> {}

#[cfg(test)]
mod tests {
    use crate::queue::Queue;
    use std::iter::FromIterator;

    #[test]
    fn cursor_motion() {
        let queue = Queue::from_iter(["a", "b", "c"]);
        let mut cursor = queue.cursor_front();
        assert_eq!(cursor.current(), Some("a"));
        assert_eq!(cursor.previous(), None);

        assert!(cursor.move_next().is_ok());
        assert_eq!(cursor.current(), Some("b"));
        assert_eq!(cursor.previous(), Some("a"));

        assert!(cursor.seek_forward(2).is_ok());
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.previous(), Some("c"));
        assert!(cursor.move_next().is_err());

        cursor.move_next_cyclic();
        assert_eq!(cursor.current(), Some("a"));
        assert!(cursor.move_prev().is_err());
        cursor.move_prev_cyclic();
        assert_eq!(cursor.current(), None);

        cursor.move_to_start();
        assert_eq!(cursor.current(), Some("a"));
        cursor.move_to_end();
        assert_eq!(cursor.current(), None);

        assert!(cursor.seek_backward(4).is_err());
        assert_eq!(cursor.current(), Some("a"));
    }

    #[test]
    fn cursor_motion_on_empty() {
        let queue = Queue::new();
        let mut cursor = queue.cursor_front();
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.previous(), None);
        assert!(cursor.move_next().is_err());
        assert!(cursor.move_prev().is_err());
        cursor.move_next_cyclic();
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn cursor_eq() {
        let queue = Queue::from_iter(["a", "b"]);
        let cursor = queue.cursor_front();
        let mut other = cursor.clone();
        assert_eq!(cursor, other);
        other.move_next_cyclic();
        assert_ne!(cursor, other);

        let another_queue = queue.clone();
        let third = another_queue.cursor_front();
        assert_ne!(cursor, third);
    }

    #[test]
    fn cursor_remove_advances() {
        let mut queue = Queue::from_iter(["a", "b", "c"]);
        let mut cursor = queue.cursor_front_mut();

        assert_eq!(cursor.remove().as_deref(), Some("a"));
        assert_eq!(cursor.current(), Some("b"));

        cursor.move_next_cyclic();
        assert_eq!(cursor.remove().as_deref(), Some("c"));
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.remove(), None);

        assert_eq!(Vec::from_iter(queue.iter()), vec!["b"]);
    }

    #[test]
    fn cursor_backspace() {
        let mut queue = Queue::from_iter(["a", "b", "c"]);
        let mut cursor = queue.cursor_end_mut();

        assert_eq!(cursor.backspace().as_deref(), Some("c"));
        assert_eq!(cursor.current(), None);

        cursor.move_to_start();
        assert_eq!(cursor.backspace(), None);
        assert_eq!(cursor.current(), Some("a"));

        assert_eq!(Vec::from_iter(queue.iter()), vec!["a", "b"]);
    }

    #[test]
    fn cursor_insert() {
        let mut queue = Queue::from_iter(["b"]);
        let mut cursor = queue.cursor_front_mut();
        cursor.insert("a".to_string());
        assert_eq!(cursor.current(), Some("b"));
        cursor.move_to_end();
        cursor.insert("c".to_string());
        assert_eq!(cursor.previous(), Some("c"));

        let mut read_only = cursor.as_cursor();
        read_only.move_to_start();
        assert_eq!(read_only.current(), Some("a"));

        assert_eq!(Vec::from_iter(queue.iter()), vec!["a", "b", "c"]);
    }

    #[test]
    fn cursor_split_and_splice() {
        let mut queue = Queue::from_iter(["a", "b", "c", "d"]);
        let mut cursor = queue.cursor_front_mut();
        assert!(cursor.seek_forward(2).is_ok());

        let split = cursor.split().unwrap();
        assert_eq!(cursor.current(), None);
        assert_eq!(Vec::from_iter(split.iter()), vec!["c", "d"]);
        assert_eq!(Vec::from_iter(cursor.view().iter()), vec!["a", "b"]);

        // Splicing the split back at the ghost restores the original.
        cursor.splice(split);
        assert_eq!(Vec::from_iter(queue.iter()), vec!["a", "b", "c", "d"]);

        let mut cursor = queue.cursor_end_mut();
        assert!(cursor.split().is_none());
    }
}
