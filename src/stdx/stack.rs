//! Growable LIFO over a reusable slot arena.
//!
//! Backward element processing needs two short-lived stacks per step. This
//! type keeps its slots across `reset` calls, so steady-state use performs
//! no allocation once the arena has grown to the longest run seen.
//!
//! # Invariants
//! - `len <= slots.len()`.
//! - Slots in `0..len` hold live elements; slots in `len..` are stale and
//!   never read.

const GROW_BY: usize = 8;

/// Index-based stack that never shrinks its storage.
#[derive(Clone, Debug)]
pub struct ElementStack<T> {
    slots: Vec<T>,
    len: usize,
}

impl<T: Copy> ElementStack<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Forgets all live elements, keeping the arena.
    #[inline]
    pub fn reset(&mut self) {
        self.len = 0;
    }

    pub fn push(&mut self, value: T) {
        if self.len == self.slots.len() {
            self.slots.reserve(GROW_BY);
            self.slots.push(value);
        } else {
            self.slots[self.len] = value;
        }
        self.len += 1;
    }

    /// Removes and returns the most recently pushed element.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.slots[self.len])
    }
}

impl<T: Copy> Default for ElementStack<T> {
    fn default() -> Self {
        Self::with_capacity(GROW_BY)
    }
}
