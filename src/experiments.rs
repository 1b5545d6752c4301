//! A fully-safe rendition of the string deque, built on [`ghost_cell`] and
//! [`static_rc`] instead of raw pointers.
//!
//! Every node is shared between its two neighbors (or the deque ends) as a
//! pair of `StaticRc` halves, and all link mutation goes through a
//! [`GhostToken`], so the borrow checker proves the aliasing sound. The
//! price is that the token must be threaded through every call, which is why
//! this representation stays an experiment rather than the public API.

use ghost_cell::{GhostCell, GhostToken};
use static_rc::StaticRc;
use std::ops::Deref;

pub struct SafeDeque<'id> {
    ends: [Option<NodePtr<'id>>; 2],
}

struct Node<'id> {
    links: [Option<NodePtr<'id>>; 2],
    value: String,
}

type NodePtr<'id> = Half<GhostCell<'id, Node<'id>>>;

type Half<T> = StaticRc<T, 1, 2>;
type Full<T> = StaticRc<T, 2, 2>;

impl<'id> Node<'id> {
    fn new(value: String) -> Self {
        let links = [None, None];
        Self { links, value }
    }
}

impl<'id> Default for SafeDeque<'id> {
    fn default() -> Self {
        let ends = [None, None];
        Self { ends }
    }
}

impl<'id> SafeDeque<'id> {
    const FRONT: usize = 0;
    const BACK: usize = 1;

    // Both ends are handled by the same routine; `side` picks which, and
    // `1 - side` is the opposite end.
    fn push_at(&mut self, side: usize, value: String, token: &mut GhostToken<'id>) {
        let oppo = 1 - side;
        let (inner, outer) = Full::split(Full::new(GhostCell::new(Node::new(value))));
        match self.ends[side].take() {
            Some(old_end) => {
                old_end.deref().borrow_mut(token).links[oppo] = Some(inner);
                outer.deref().borrow_mut(token).links[side] = Some(old_end);
            }
            None => self.ends[oppo] = Some(inner),
        }
        self.ends[side] = Some(outer);
    }

    fn pop_at(&mut self, side: usize, token: &mut GhostToken<'id>) -> Option<String> {
        debug_assert!(side < 2);
        let oppo = 1 - side;
        let outer = self.ends[side].take()?;
        let inner = match outer.deref().borrow_mut(token).links[side].take() {
            Some(new_end) => {
                let inner = new_end.deref().borrow_mut(token).links[oppo]
                    .take()
                    .unwrap();
                self.ends[side] = Some(new_end);
                inner
            }
            None => self.ends[oppo].take().unwrap(),
        };
        Some(Full::into_box(Full::join(inner, outer)).into_inner().value)
    }
}

impl<'id> SafeDeque<'id> {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn is_empty(&self) -> bool {
        self.ends[Self::FRONT].is_none()
    }
    pub fn push_front(&mut self, value: String, token: &mut GhostToken<'id>) {
        self.push_at(Self::FRONT, value, token);
    }
    pub fn push_back(&mut self, value: String, token: &mut GhostToken<'id>) {
        self.push_at(Self::BACK, value, token);
    }
    pub fn pop_front(&mut self, token: &mut GhostToken<'id>) -> Option<String> {
        self.pop_at(Self::FRONT, token)
    }
    pub fn pop_back(&mut self, token: &mut GhostToken<'id>) -> Option<String> {
        self.pop_at(Self::BACK, token)
    }
    /// Empties the deque front to back, returning the values in order.
    pub fn drain_to_vec(&mut self, token: &mut GhostToken<'id>) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(value) = self.pop_front(token) {
            out.push(value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::experiments::SafeDeque;
    use ghost_cell::GhostToken;

    #[test]
    fn deque_push_pop() {
        GhostToken::new(|mut token| {
            let mut deque = SafeDeque::new();
            assert!(deque.is_empty());
            deque.push_back("tail".to_owned(), &mut token);
            deque.push_front("head".to_owned(), &mut token);
            assert!(!deque.is_empty());
            assert_eq!(deque.pop_back(&mut token).as_deref(), Some("tail"));
            assert_eq!(deque.pop_front(&mut token).as_deref(), Some("head"));
            assert!(deque.is_empty());
            assert_eq!(deque.pop_front(&mut token), None);
        })
    }

    #[test]
    fn deque_drain_preserves_order() {
        GhostToken::new(|mut token| {
            let mut deque = SafeDeque::new();
            for value in ["b", "c", "d"] {
                deque.push_back(value.to_owned(), &mut token);
            }
            deque.push_front("a".to_owned(), &mut token);
            assert_eq!(deque.drain_to_vec(&mut token), vec!["a", "b", "c", "d"]);
            assert!(deque.is_empty());
        })
    }
}
