//! LIFO buffer shared by conversion (operator/group stack) and evaluation (operand stack)

use smallvec::SmallVec;

/// Inline capacity before the buffer spills to the heap
const INLINE_CAPACITY: usize = 16;

/// A last-in, first-out stack of expression items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionBuffer<T> {
    items: SmallVec<[T; INLINE_CAPACITY]>,
}

impl<T> Default for ExpressionBuffer<T> {
    fn default() -> Self {
        Self {
            items: SmallVec::new(),
        }
    }
}

impl<T> ExpressionBuffer<T> {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an item on top
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove and return the top item
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Look at the top item
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Pop the two topmost items as `(left, right)`
    ///
    /// The right-hand item is on top, so it comes off first. Returns `None` and leaves
    /// the buffer untouched when fewer than two items are present.
    pub fn pop_pair(&mut self) -> Option<(T, T)> {
        if self.items.len() < 2 {
            return None;
        }
        let right = self.items.pop()?;
        let left = self.items.pop()?;
        Some((left, right))
    }

    /// Consume the buffer, returning its item if exactly one remains
    pub fn into_single(mut self) -> Option<T> {
        if self.items.len() == 1 {
            self.items.pop()
        } else {
            None
        }
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
