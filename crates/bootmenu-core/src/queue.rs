//! Bounded FIFO between the input thread and the menu logic

use std::collections::VecDeque;

use parking_lot::{Condvar, Mutex};
use tracing::debug;

use crate::messages::UiEvent;

/// Event queue with a non-blocking producer side and a blocking consumer side.
///
/// When full, new events are dropped: a stale menu is preferable to stalling
/// the input thread.
pub struct EventQueue {
    events: Mutex<VecDeque<UiEvent>>,
    available: Condvar,
    capacity: usize,
}

impl EventQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::with_capacity(capacity)),
            available: Condvar::new(),
            capacity,
        }
    }

    /// Append an event. Returns false if the queue was full and the event dropped.
    pub fn push(&self, event: UiEvent) -> bool {
        let mut events = self.events.lock();
        if events.len() >= self.capacity {
            debug!(?event, capacity = self.capacity, "event queue full, dropping event");
            return false;
        }
        events.push_back(event);
        self.available.notify_one();
        true
    }

    /// Wait for the next event
    pub fn pop(&self) -> UiEvent {
        let mut events = self.events.lock();
        loop {
            if let Some(event) = events.pop_front() {
                return event;
            }
            self.available.wait(&mut events);
        }
    }

    pub fn try_pop(&self) -> Option<UiEvent> {
        self.events.lock().pop_front()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn overflow_drops_newest_events() {
        let queue = EventQueue::new(256);
        let accepted = (0..300u16)
            .filter(|code| queue.push(UiEvent::key_down(*code)))
            .count();

        assert_eq!(accepted, 256);
        assert_eq!(queue.len(), 256);

        let drained: Vec<UiEvent> = std::iter::from_fn(|| queue.try_pop()).collect();
        let expected: Vec<UiEvent> = (0..256u16).map(UiEvent::key_down).collect();
        assert_eq!(drained, expected);
    }

    #[test]
    fn clear_empties_the_queue() {
        let queue = EventQueue::new(4);
        queue.push(UiEvent::key_down(1));
        queue.push(UiEvent::key_down(2));
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.push(UiEvent::key_down(3)));
        assert_eq!(queue.pop(), UiEvent::key_down(3));
    }

    #[test]
    fn pop_blocks_until_an_event_arrives() {
        let queue = Arc::new(EventQueue::new(8));
        let producer = {
            let queue = queue.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                queue.push(UiEvent::key_down(7));
                queue.push(UiEvent::key_down(8));
            })
        };

        assert_eq!(queue.pop(), UiEvent::key_down(7));
        assert_eq!(queue.pop(), UiEvent::key_down(8));
        producer.join().unwrap();
    }
}
