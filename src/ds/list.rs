//! Doubly linked list backed by a [`NodeArena`].
//!
//! Stores list nodes in a `NodeArena` and links them by `NodeId`, giving
//! stable handles and O(1) splice/move operations without raw pointers.
//! The recency lists of the LRU/MRU policies and the insertion queue of the
//! FIFO policy are all instances of this structure; its surface is exactly
//! what those policies call.
//!
//! ## Architecture
//!
//! ```text
//!   arena (NodeArena<Node<T>>)
//!   ┌────────┬─────────────────────────────────────────────┐
//!   │ NodeId │ Node { value, prev, next }                  │
//!   ├────────┼─────────────────────────────────────────────┤
//!   │ id_1   │ { value: A, prev: None, next: Some(id_2) }  │
//!   │ id_2   │ { value: B, prev: Some(id_1), next: id_3 }  │
//!   │ id_3   │ { value: C, prev: Some(id_2), next: None }  │
//!   └────────┴─────────────────────────────────────────────┘
//!
//!   head ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//! ```
//!
//! ## Performance
//! - `push_front` / `push_back`: O(1)
//! - `move_to_front` / `remove`: O(1)
//! - `iter`: O(n)
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use crate::ds::arena::{NodeArena, NodeId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

#[derive(Debug)]
/// Doubly linked list that stores nodes in a `NodeArena` and links them via
/// `NodeId`.
pub struct ArenaList<T> {
    arena: NodeArena<Node<T>>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
}

impl<T> ArenaList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: NodeArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of nodes in the list.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns the value at the front of the list.
    pub fn front(&self) -> Option<&T> {
        self.head
            .and_then(|id| self.arena.get(id).map(|node| &node.value))
    }

    /// Returns the value at the back of the list.
    pub fn back(&self) -> Option<&T> {
        self.tail
            .and_then(|id| self.arena.get(id).map(|node| &node.value))
    }

    /// Returns the value for a node id, if present.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    /// Inserts a new node at the front and returns its `NodeId`.
    pub fn push_front(&mut self, value: T) -> NodeId {
        let id = self.arena.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        self.attach_front(id);
        id
    }

    /// Inserts a new node at the back and returns its `NodeId`.
    pub fn push_back(&mut self, value: T) -> NodeId {
        let id = self.arena.insert(Node {
            value,
            prev: self.tail,
            next: None,
        });
        self.attach_back(id);
        id
    }

    /// Moves the node at `id` to the front of the list.
    ///
    /// Does nothing if `id` is not a live node.
    pub fn move_to_front(&mut self, id: NodeId) {
        if !self.arena.contains(id) || self.head == Some(id) {
            return;
        }
        self.detach(id);
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = self.head;
        }
        self.attach_front(id);
    }

    /// Removes the node at `id` and returns its value, if present.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.arena.contains(id) {
            return None;
        }
        self.detach(id);
        self.arena.remove(id).map(|node| node.value)
    }

    /// Removes all nodes and resets internal state.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Returns an iterator from front to back.
    pub fn iter(&self) -> ArenaListIter<'_, T> {
        ArenaListIter {
            list: self,
            current: self.head,
        }
    }

    /// Unlinks `id` from its neighbours without freeing the slot.
    fn detach(&mut self, id: NodeId) {
        let (prev, next) = match self.arena.get(id) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_id) => {
                if let Some(node) = self.arena.get_mut(prev_id) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(next_id) => {
                if let Some(node) = self.arena.get_mut(next_id) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    /// Links a detached node (with `prev`/`next` already set) as the new head.
    fn attach_front(&mut self, id: NodeId) {
        match self.head {
            Some(old_head) => {
                if let Some(node) = self.arena.get_mut(old_head) {
                    node.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    /// Links a detached node (with `prev`/`next` already set) as the new tail.
    fn attach_back(&mut self, id: NodeId) {
        match self.tail {
            Some(old_tail) => {
                if let Some(node) = self.arena.get_mut(old_tail) {
                    node.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.arena.debug_validate_invariants();

        if self.is_empty() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            return;
        }

        let mut count = 0usize;
        let mut last = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self.arena.get(id).expect("list node missing from arena");
            assert_eq!(node.prev, last);
            last = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.arena.len(), "cycle detected in list");
        }
        assert_eq!(self.tail, last);
        assert_eq!(count, self.arena.len());
    }
}

impl<T> Default for ArenaList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over an [`ArenaList`] from front to back.
pub struct ArenaListIter<'a, T> {
    list: &'a ArenaList<T>,
    current: Option<NodeId>,
}

impl<'a, T> Iterator for ArenaListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}
