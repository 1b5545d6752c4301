//! This crate provides an in-memory queue of heap-owned strings, built on a
//! sentinel-headed cyclic doubly-linked list.
//!
//! The [`Queue`] supports insertion and removal at both ends in constant
//! time, plus a family of in-place structural transforms (full reversal,
//! reversal in groups of *k*, pairwise swapping) and content-based pruning
//! (duplicate-run removal on sorted input, monotonic filtering), all
//! performed by pointer relinking without copying element values.
//!
//! Here is a quick example showing how the queue works.
//!
//! ```
//! use string_ring::Queue;
//! use std::iter::FromIterator;
//!
//! let mut queue = Queue::from_iter(["b", "a", "c"]);
//! assert_eq!(queue.len(), 3);
//!
//! queue.sort(false);
//!
//! assert_eq!(queue.pop_front().as_deref(), Some("a"));
//! assert_eq!(queue.pop_front().as_deref(), Some("b"));
//! assert_eq!(queue.pop_front().as_deref(), Some("c"));
//! assert_eq!(queue.pop_front(), None);
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the queue is like the following graph:
//! ```text
//!          ┌────────────────────────────────────────────────────────────────┐
//!          ↓                                                  Ghost node    │
//!    ╔═══════════╗          ╔═══════════╗                    ┌───────────┐  │
//!    ║   next    ║ ───────→ ║   next    ║ ───────→ ┄ ──────→ │   next    │ ─┘
//!    ╟───────────╢          ╟───────────╢                    ├───────────┤
//! ┌─ ║   prev    ║ ←─────── ║   prev    ║ ←─────── ┄ ←────── │   prev    │
//! │  ╟───────────╢          ╟───────────╢                    ├───────────┤
//! │  ║  String   ║          ║  String   ║                    ┊ (no value)┊
//! │  ╚═══════════╝          ╚═══════════╝                    └╌╌╌╌╌╌╌╌╌╌╌┘
//! │    Element 0              Element 1                          ↑   ↑
//! └──────────────────────────────────────────────────────────────┘   │
//! ╔═══════════╗                                                      │
//! ║   ghost   ║ ─────────────────────────────────────────────────────┘
//! ╚═══════════╝
//!     Queue
//! ```
//!
//! Every node of the ring is allocated on the heap and carries a `next` and a
//! `prev` pointer. Non-ghost nodes exclusively own one `String` value. The
//! ghost node carries no meaningful value and is never counted as an element;
//! in an empty queue its `next` and `prev` point to itself, so the ring
//! invariant `node.next.prev == node` holds uniformly with no null-pointer
//! special cases, including for the empty queue.
//!
//! # Iteration
//!
//! Iterating over a queue is by the [`Iter`] iterator, which is double-ended,
//! fused and non-cyclic, and yields `&str`. Element values are immutable
//! after insertion, so there is no mutating iterator; consuming iteration is
//! by [`IntoIter`], which yields owned `String`s.
//!
//! ```
//! use string_ring::Queue;
//! use std::iter::FromIterator;
//!
//! let queue = Queue::from_iter(["x", "y", "z"]);
//! let mut iter = queue.iter();
//! assert_eq!(iter.next(), Some("x"));
//! assert_eq!(iter.next_back(), Some("z"));
//! assert_eq!(iter.next(), Some("y"));
//! assert_eq!(iter.next(), None);
//! ```
//!
//! # Cursors
//!
//! The cursors [`Cursor`] and [`CursorMut`] provide free back-and-forth
//! movement over the ring. In a queue with length *n*, there are *n* + 1
//! valid cursor locations, the extra one being the ghost node.
//!
//! [`CursorMut`] is the one canonical way the crate mutates the ring while
//! traversing it: [`remove`] detaches the current element and advances in a
//! single operation, [`backspace`] detaches the element before the cursor,
//! and [`split`]/[`splice`] cut out and re-insert whole spans.
//!
//! ```
//! use string_ring::Queue;
//! use std::iter::FromIterator;
//!
//! let mut queue = Queue::from_iter(["a", "b", "c"]);
//! let mut cursor = queue.cursor_front_mut();
//!
//! assert!(cursor.move_next().is_ok());
//! assert_eq!(cursor.remove().as_deref(), Some("b"));
//! assert_eq!(cursor.current(), Some("c"));
//!
//! assert_eq!(Vec::from_iter(queue), vec!["a".to_string(), "c".to_string()]);
//! ```
//!
//! [`Queue`]: crate::Queue
//! [`Iter`]: crate::Iter
//! [`IntoIter`]: crate::IntoIter
//! [`Cursor`]: crate::queue::cursor::Cursor
//! [`CursorMut`]: crate::queue::cursor::CursorMut
//! [`remove`]: crate::queue::cursor::CursorMut::remove
//! [`backspace`]: crate::queue::cursor::CursorMut::backspace
//! [`split`]: crate::queue::cursor::CursorMut::split
//! [`splice`]: crate::queue::cursor::CursorMut::splice

#[doc(inline)]
pub use queue::iterator::{IntoIter, Iter};
#[doc(inline)]
pub use queue::Queue;

pub mod queue;

mod experiments;
