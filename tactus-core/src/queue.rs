//! Pending key events
//!
//! A fixed-capacity FIFO between the decoders and the consumer. When the
//! consumer falls behind, the oldest pending key is discarded so the
//! newest input is never lost.

use heapless::Deque;

use tactus_protocol::KeyCode;

/// Maximum number of pending keys
pub const QUEUE_CAPACITY: usize = 8;

/// Bounded key queue with drop-oldest overflow
#[derive(Debug, Clone)]
pub struct EventQueue {
    keys: Deque<KeyCode, QUEUE_CAPACITY>,
    /// Keys discarded by overflow since the last clear
    dropped: u32,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            keys: Deque::new(),
            dropped: 0,
        }
    }

    /// Append a key
    ///
    /// `None` is ignored. A full queue evicts its oldest key first.
    pub fn push(&mut self, key: impl Into<Option<KeyCode>>) {
        let Some(key) = key.into() else {
            return;
        };

        if self.keys.is_full() {
            self.keys.pop_front();
            self.dropped = self.dropped.saturating_add(1);
        }

        // Cannot fail: a slot was freed above if needed
        let _ = self.keys.push_back(key);
    }

    /// Remove and return the oldest key
    pub fn pop(&mut self) -> Option<KeyCode> {
        self.keys.pop_front()
    }

    /// Number of pending keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if no keys are pending
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Check if the next push will evict
    pub fn is_full(&self) -> bool {
        self.keys.is_full()
    }

    /// Keys lost to overflow since creation or the last clear
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Discard all pending keys and reset the overflow count
    pub fn clear(&mut self) {
        self.keys.clear();
        self.dropped = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const KEYS: [KeyCode; 10] = [
        KeyCode::Left,
        KeyCode::Right,
        KeyCode::Up,
        KeyCode::Down,
        KeyCode::FireA,
        KeyCode::FireB,
        KeyCode::Enter,
        KeyCode::PageUp,
        KeyCode::PotUp,
        KeyCode::PotDown,
    ];

    #[test]
    fn test_fifo_order() {
        let mut queue = EventQueue::new();
        queue.push(KeyCode::Left);
        queue.push(KeyCode::Enter);
        queue.push(KeyCode::PotUp);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some(KeyCode::Left));
        assert_eq!(queue.pop(), Some(KeyCode::Enter));
        assert_eq!(queue.pop(), Some(KeyCode::PotUp));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_empty_pop() {
        let mut queue = EventQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_none_is_ignored() {
        let mut queue = EventQueue::new();
        queue.push(None);
        assert!(queue.is_empty());

        queue.push(Some(KeyCode::FireB));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let mut queue = EventQueue::new();
        for key in &KEYS[..QUEUE_CAPACITY] {
            queue.push(*key);
        }
        assert!(queue.is_full());
        assert_eq!(queue.dropped(), 0);

        queue.push(KeyCode::PotDown);

        assert_eq!(queue.len(), QUEUE_CAPACITY);
        assert_eq!(queue.dropped(), 1);
        // Left was evicted, Right is now the oldest
        assert_eq!(queue.pop(), Some(KeyCode::Right));

        let mut last = None;
        while let Some(key) = queue.pop() {
            last = Some(key);
        }
        assert_eq!(last, Some(KeyCode::PotDown));
    }

    #[test]
    fn test_clear() {
        let mut queue = EventQueue::new();
        for _ in 0..QUEUE_CAPACITY + 3 {
            queue.push(KeyCode::Up);
        }
        assert_eq!(queue.dropped(), 3);

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.dropped(), 0);
    }

    proptest! {
        #[test]
        fn prop_capacity_never_exceeded(indices in proptest::collection::vec(0usize..KEYS.len(), 0..64)) {
            let mut queue = EventQueue::new();
            for &i in &indices {
                queue.push(KEYS[i]);
                prop_assert!(queue.len() <= QUEUE_CAPACITY);
            }

            // What remains is exactly the newest pushes, in order
            let kept = indices.len().min(QUEUE_CAPACITY);
            for &i in &indices[indices.len() - kept..] {
                prop_assert_eq!(queue.pop(), Some(KEYS[i]));
            }
            prop_assert_eq!(queue.pop(), None);
            prop_assert_eq!(queue.dropped() as usize, indices.len() - kept);
        }
    }
}
