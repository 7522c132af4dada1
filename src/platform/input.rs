//! Input queue
//!
//! Input may arrive at any time (keyboard callback, another thread), but it
//! is only applied at tick boundaries. The sender half can be cloned and moved
//! to a producer thread; the queue half is drained by the session.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::sim::InputEvent;

/// Producer handle
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<InputEvent>,
}

impl InputSender {
    /// Queue an event. Returns false once the game side has gone away.
    pub fn send(&self, event: InputEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Consumer side, owned by the game loop
#[derive(Debug)]
pub struct InputQueue {
    rx: Receiver<InputEvent>,
}

impl InputQueue {
    pub fn channel() -> (InputSender, InputQueue) {
        let (tx, rx) = mpsc::channel();
        (InputSender { tx }, InputQueue { rx })
    }

    /// Everything queued so far, in arrival order
    pub fn drain(&self) -> Vec<InputEvent> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let (tx, queue) = InputQueue::channel();
        tx.send(InputEvent::SelectMode(2));
        tx.send(InputEvent::Flap);
        tx.send(InputEvent::TogglePause);

        assert_eq!(
            queue.drain(),
            vec![
                InputEvent::SelectMode(2),
                InputEvent::Flap,
                InputEvent::TogglePause
            ]
        );
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_send_from_other_thread() {
        let (tx, queue) = InputQueue::channel();
        let producer = std::thread::spawn(move || {
            for _ in 0..10 {
                tx.send(InputEvent::Flap);
            }
        });
        producer.join().expect("producer thread");
        assert_eq!(queue.drain().len(), 10);
    }

    #[test]
    fn test_send_after_queue_dropped() {
        let (tx, queue) = InputQueue::channel();
        drop(queue);
        assert!(!tx.send(InputEvent::Flap));
    }
}
