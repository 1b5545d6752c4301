use std::fmt::{Debug, Formatter};
use std::ptr::NonNull;

use crate::queue::cursor::{Cursor, CursorMut};
use crate::{IntoIter, Iter};

pub mod cursor;
pub mod iterator;

mod algorithms;

/// The `Queue` is an in-memory queue of heap-owned strings, implemented as a
/// cyclic doubly-linked list anchored by a ghost (sentinel) node. Insertion
/// and removal at either end compute in constant time; counting, searching
/// or transforming the elements take *O*(*n*) time.
///
/// The `Queue` owns exactly one ghost node. The ghost is a real, allocated
/// node that carries no element value, which means the ring is never empty
/// of nodes and every link operation works uniformly without null checks:
/// a queue is empty precisely when the ghost points to itself.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of ring nodes, both inclusive;
/// - `start..end`: a half-open range of ring nodes, left inclusive and right
///   exclusive (possibly the ghost node).
pub struct Queue {
    ghost: Box<Node>,
}

pub(crate) struct Node {
    pub(crate) next: NonNull<Node>,
    pub(crate) prev: NonNull<Node>,
    pub(crate) value: String,
}

/// A span of nodes cut out of a ring, used in splitting, splicing,
/// grouped reversal and merging.
///
/// While detached, reading `front.prev` and `back.next` is invalid.
pub(crate) struct DetachedSpan {
    pub(crate) front: NonNull<Node>,
    pub(crate) back: NonNull<Node>,
}

/// Link `prev` and `next` to each other.
///
/// It is unsafe because both pointers must refer to live nodes, and the
/// caller is responsible for keeping the rest of the ring consistent.
pub(crate) unsafe fn connect(mut prev: NonNull<Node>, mut next: NonNull<Node>) {
    prev.as_mut().next = next;
    next.as_mut().prev = prev;
}

/// Move the single node `from` out of its place and relink it right
/// before `to`. Both nodes must belong to the same ring.
pub(crate) unsafe fn move_node(from: NonNull<Node>, to: NonNull<Node>) {
    move_nodes(from, from, to);
}

/// Move the closed range `from_front..=from_back` out of its place and
/// relink it right before `to`. `to` must not lie inside the range.
pub(crate) unsafe fn move_nodes(
    from_front: NonNull<Node>,
    from_back: NonNull<Node>,
    to: NonNull<Node>,
) {
    connect(from_front.as_ref().prev, from_back.as_ref().next);
    connect(to.as_ref().prev, from_front);
    connect(from_back, to);
}

// private methods
impl Queue {
    pub(crate) fn ghost_node(&self) -> NonNull<Node> {
        NonNull::from(self.ghost.as_ref())
    }
    pub(crate) fn front_node(&self) -> NonNull<Node> {
        // SAFETY: `ghost.next` is always valid (either the ghost itself, or
        // the first element of the ring).
        NonNull::from(unsafe { self.ghost_node().as_ref().next.as_ref() })
    }
    pub(crate) fn back_node(&self) -> NonNull<Node> {
        // SAFETY: `ghost.prev` is always valid (either the ghost itself, or
        // the last element of the ring).
        NonNull::from(unsafe { self.ghost_node().as_ref().prev.as_ref() })
    }

    /// Detach a single node `node` from the ring, and return it as a box.
    ///
    /// It is unsafe because it does not check whether `node` belongs to the
    /// queue. If it does not, this call will make the ring ill-formed.
    pub(crate) unsafe fn detach_node(&mut self, node: NonNull<Node>) -> Box<Node> {
        let node = Box::from_raw(node.as_ptr());
        connect(node.prev, node.next);
        node
    }

    /// Attach a single node `node` to the ring, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next`
    /// belong to the queue, or (outside `#[cfg(debug_assertions)]`) whether
    /// they are adjacent. If either does not hold, this call will make the
    /// ring ill-formed.
    pub(crate) unsafe fn attach_node(
        &mut self,
        prev: NonNull<Node>,
        next: NonNull<Node>,
        node: NonNull<Node>,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, node);
        connect(node, next);
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, node);
            assert_adjacent(node, next);
        }
    }

    /// Detach the closed range `front..=back` from the ring, and return the
    /// detached span.
    ///
    /// It is unsafe because it does not check whether `front..=back` is a
    /// valid range (i.e. `front` must **NOT** be at the right of `back`), or
    /// whether it belongs to the queue. If either does not hold, this call
    /// will make the ring ill-formed.
    pub(crate) unsafe fn detach_nodes(
        &mut self,
        front: NonNull<Node>,
        back: NonNull<Node>,
    ) -> DetachedSpan {
        connect(front.as_ref().prev, back.as_ref().next);
        DetachedSpan { front, back }
    }

    /// Attach a detached span to the ring, between `prev` and `next`.
    ///
    /// It is unsafe because it does not check whether `prev` and `next`
    /// belong to the queue, or (outside `#[cfg(debug_assertions)]`) whether
    /// they are adjacent. If either does not hold, this call will make the
    /// ring ill-formed.
    pub(crate) unsafe fn attach_nodes(
        &mut self,
        prev: NonNull<Node>,
        next: NonNull<Node>,
        span: DetachedSpan,
    ) {
        #[cfg(debug_assertions)]
        assert_adjacent(prev, next);
        connect(prev, span.front);
        connect(span.back, next);
        #[cfg(debug_assertions)]
        {
            assert_adjacent(prev, span.front);
            assert_adjacent(span.back, next);
        }
    }

    /// Detach every element from the ring, and return the detached span, or
    /// return `None` if the queue is empty.
    ///
    /// It is safe because `self.front_node()..=self.back_node()` is a valid
    /// range of a non-empty queue.
    pub(crate) fn detach_all_nodes(&mut self) -> Option<DetachedSpan> {
        if self.is_empty() {
            return None;
        }
        unsafe { Some(self.detach_nodes(self.front_node(), self.back_node())) }
    }

    /// Construct a queue from a detached span.
    ///
    /// It is safe because a span is guaranteed to be a valid range when
    /// constructed.
    pub(crate) fn from_detached(span: DetachedSpan) -> Self {
        let mut queue = Queue::new();
        unsafe {
            queue.attach_nodes(queue.ghost_node(), queue.ghost_node(), span);
        }
        queue
    }

    /// Like [`Queue::detach_all_nodes`], but consume the queue.
    pub(crate) fn into_detached(mut self) -> Option<DetachedSpan> {
        self.detach_all_nodes()
    }
}

impl Queue {
    /// Create an empty `Queue`.
    ///
    /// # Examples
    /// ```
    /// use string_ring::Queue;
    /// let queue = Queue::new();
    /// assert!(queue.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self { ghost: new_ghost() }
    }

    /// Returns `true` if the `Queue` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    ///
    /// let mut queue = Queue::new();
    /// assert!(queue.is_empty());
    ///
    /// queue.push_front("foo");
    /// assert!(!queue.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == self.ghost_node()
    }

    /// Returns `true` if the `Queue` holds exactly one element.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_singular(&self) -> bool {
        !self.is_empty() && self.front_node() == self.back_node()
    }

    /// Returns the number of elements in the `Queue`, not counting the
    /// ghost node.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time: the ring carries no
    /// length field, so the elements are counted by traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    ///
    /// let mut queue = Queue::new();
    /// assert_eq!(queue.len(), 0);
    ///
    /// queue.push_back("a");
    /// queue.push_back("b");
    /// assert_eq!(queue.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Removes all elements from the `Queue`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    #[inline]
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Provides a reference to the front element's value, or `None` if the
    /// queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    ///
    /// let mut queue = Queue::new();
    /// assert_eq!(queue.front(), None);
    ///
    /// queue.push_front("a");
    /// assert_eq!(queue.front(), Some("a"));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&str> {
        self.cursor_front().current()
    }

    /// Provides a reference to the back element's value, or `None` if the
    /// queue is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    ///
    /// let mut queue = Queue::new();
    /// assert_eq!(queue.back(), None);
    ///
    /// queue.push_back("a");
    /// assert_eq!(queue.back(), Some("a"));
    /// ```
    #[inline]
    pub fn back(&self) -> Option<&str> {
        self.cursor_end().previous()
    }

    /// Inserts an element first in the queue. The value is copied onto the
    /// heap; the caller's buffer is never aliased.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    ///
    /// let mut queue = Queue::new();
    ///
    /// queue.push_front("b");
    /// queue.push_front("a");
    /// assert_eq!(queue.front(), Some("a"));
    /// ```
    pub fn push_front(&mut self, value: impl Into<String>) {
        self.cursor_front_mut().insert(value.into());
    }

    /// Removes the first element and returns its value, transferring
    /// ownership to the caller, or returns `None` if the queue is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    ///
    /// let mut queue = Queue::new();
    /// assert_eq!(queue.pop_front(), None);
    ///
    /// queue.push_front("a");
    /// queue.push_front("b");
    /// assert_eq!(queue.pop_front().as_deref(), Some("b"));
    /// assert_eq!(queue.pop_front().as_deref(), Some("a"));
    /// assert_eq!(queue.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        self.cursor_front_mut().remove()
    }

    /// Appends an element to the back of the queue. The value is copied onto
    /// the heap; the caller's buffer is never aliased.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    ///
    /// let mut queue = Queue::new();
    /// queue.push_back("a");
    /// queue.push_back("b");
    /// assert_eq!(queue.back(), Some("b"));
    /// ```
    pub fn push_back(&mut self, value: impl Into<String>) {
        self.cursor_end_mut().insert(value.into());
    }

    /// Removes the last element and returns its value, transferring
    /// ownership to the caller, or returns `None` if the queue is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    ///
    /// let mut queue = Queue::new();
    /// assert_eq!(queue.pop_back(), None);
    /// queue.push_back("a");
    /// queue.push_back("b");
    /// assert_eq!(queue.pop_back().as_deref(), Some("b"));
    /// ```
    pub fn pop_back(&mut self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        self.cursor_end_mut().backspace()
    }

    /// Provides a cursor at the first node.
    ///
    /// The cursor is pointing to the ghost node if the queue is empty.
    pub fn cursor_front(&self) -> Cursor<'_> {
        Cursor::new(self, self.front_node())
    }

    /// Provides a cursor at the ghost node.
    pub fn cursor_end(&self) -> Cursor<'_> {
        Cursor::new(self, self.ghost_node())
    }

    /// Provides a cursor with editing operations at the first node.
    ///
    /// The cursor is pointing to the ghost node if the queue is empty.
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_> {
        CursorMut::new(self, self.front_node())
    }

    /// Provides a cursor with editing operations at the ghost node.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_> {
        CursorMut::new(self, self.ghost_node())
    }

    /// Provides a forward iterator yielding `&str`.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    ///
    /// let mut queue = Queue::new();
    ///
    /// queue.push_back("a");
    /// queue.push_back("b");
    ///
    /// let mut iter = queue.iter();
    /// assert_eq!(iter.next(), Some("a"));
    /// assert_eq!(iter.next(), Some("b"));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Moves all elements from `other` to the end of the queue.
    ///
    /// This reuses all the nodes from `other` and moves them into `self`.
    /// After this operation, `other` becomes empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a"]);
    /// let mut other = Queue::from_iter(["b", "c"]);
    ///
    /// queue.append(&mut other);
    ///
    /// assert_eq!(Vec::from_iter(queue.iter()), vec!["a", "b", "c"]);
    /// assert!(other.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        if let Some(span) = other.detach_all_nodes() {
            // `self.back_node()` and `self.ghost_node()` are valid nodes of
            // the ring and they are adjacent, so it is safe.
            unsafe { self.attach_nodes(self.back_node(), self.ghost_node(), span) }
        }
    }

    /// Moves all elements from `other` to the beginning of the queue.
    ///
    /// This reuses all the nodes from `other` and moves them into `self`.
    /// After this operation, `other` becomes empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["b", "c"]);
    /// let mut other = Queue::from_iter(["a"]);
    ///
    /// queue.prepend(&mut other);
    ///
    /// assert_eq!(Vec::from_iter(queue.iter()), vec!["a", "b", "c"]);
    /// assert!(other.is_empty());
    /// ```
    pub fn prepend(&mut self, other: &mut Self) {
        if let Some(span) = other.detach_all_nodes() {
            // `self.ghost_node()` and `self.front_node()` are valid nodes of
            // the ring and they are adjacent, so it is safe.
            unsafe { self.attach_nodes(self.ghost_node(), self.front_node(), span) }
        }
    }

    /// Splits the queue into two at the given index. Returns everything
    /// after the given index (inclusive).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use string_ring::Queue;
    /// use std::iter::FromIterator;
    ///
    /// let mut queue = Queue::from_iter(["a", "b", "c"]);
    ///
    /// let split = queue.split_off(2);
    ///
    /// assert_eq!(Vec::from_iter(queue.iter()), vec!["a", "b"]);
    /// assert_eq!(Vec::from_iter(split.iter()), vec!["c"]);
    /// ```
    pub fn split_off(&mut self, at: usize) -> Queue {
        let mut cursor = self.cursor_front_mut();
        cursor
            .seek_forward(at)
            .expect("Cannot split off at a nonexistent index");
        cursor.split().unwrap_or_default()
    }
}

impl Debug for Queue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    /// Create a detached node owning the given value.
    ///
    /// The `next` and `prev` links are dangling until the node is attached,
    /// and must not be read before then.
    pub(crate) fn new_detached(value: String) -> NonNull<Node> {
        let node = Box::new(Node {
            next: NonNull::dangling(),
            prev: NonNull::dangling(),
            value,
        });
        NonNull::from(Box::leak(node))
    }

    /// Consume a detached node and return the owned value.
    pub(crate) fn into_value(node: Box<Node>) -> String {
        node.value
    }
}

fn new_ghost() -> Box<Node> {
    // An empty `String` does not allocate, so the ghost carries a value slot
    // that costs nothing and is never read.
    let mut ghost = Box::new(Node {
        next: NonNull::dangling(),
        prev: NonNull::dangling(),
        value: String::new(),
    });
    let ptr = NonNull::from(ghost.as_mut());
    ghost.next = ptr;
    ghost.prev = ptr;
    ghost
}

#[cfg(debug_assertions)]
fn assert_adjacent(prev: NonNull<Node>, next: NonNull<Node>) {
    unsafe {
        assert_eq!(prev.as_ref().next, next);
        assert_eq!(next.as_ref().prev, prev);
    }
}

impl Drop for Queue {
    fn drop(&mut self) {
        self.clear();
    }
}

// The queue exclusively owns its nodes and their `String` values, so moving
// it across threads is sound.
unsafe impl Send for Queue {}

unsafe impl Sync for Queue {}
