//! Request/response slots keyed by answer id.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

use crate::data::DataObject;
use crate::error::BridgeError;

#[derive(Debug)]
struct Slots {
    next_id: u64,
    waiters: HashMap<u64, Sender<DataObject>>,
    closed: bool,
}

/// Pending synchronous requests.
///
/// The session side allocates a slot and waits; the transport reader, possibly
/// on another thread, fulfills it when the runtime replies.
#[derive(Debug)]
pub struct AnswerSlots {
    slots: Mutex<Slots>,
    timeout: Duration,
}

/// A slot waiting for its answer.
#[derive(Debug)]
pub struct PendingAnswer {
    id: u64,
    receiver: Receiver<DataObject>,
}

impl PendingAnswer {
    /// The answer id sent with the request.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}

impl AnswerSlots {
    /// Creates slots whose waits give up after `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            slots: Mutex::new(Slots {
                next_id: 1,
                waiters: HashMap::new(),
                closed: false,
            }),
            timeout,
        }
    }

    /// The wait deadline.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Allocates a slot.
    ///
    /// # Errors
    ///
    /// Fails with [`BridgeError::Closed`] once the slots are closed.
    pub fn allocate(&self) -> Result<PendingAnswer, BridgeError> {
        let mut slots = self.slots.lock().map_err(|_| BridgeError::Closed)?;
        if slots.closed {
            return Err(BridgeError::Closed);
        }
        let id = slots.next_id;
        slots.next_id += 1;
        let (sender, receiver) = mpsc::channel();
        slots.waiters.insert(id, sender);
        drop(slots);
        Ok(PendingAnswer { id, receiver })
    }

    /// Frees a slot without waiting for it.
    pub fn release(&self, id: u64) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.waiters.remove(&id);
        }
    }

    /// Blocks until the answer of `pending` arrives, the deadline passes or the slots close.
    ///
    /// # Errors
    ///
    /// [`BridgeError::Timeout`] after the deadline, [`BridgeError::Closed`] when closed.
    pub fn wait(&self, pending: PendingAnswer) -> Result<DataObject, BridgeError> {
        let PendingAnswer { id, receiver } = pending;
        // An in-process runtime answers while the request is still being sent.
        let result = match receiver.try_recv() {
            Ok(answer) => Ok(answer),
            Err(TryRecvError::Disconnected) => Err(BridgeError::Closed),
            Err(TryRecvError::Empty) => match receiver.recv_timeout(self.timeout) {
                Ok(answer) => Ok(answer),
                Err(RecvTimeoutError::Timeout) => Err(BridgeError::Timeout { answer_id: id }),
                Err(RecvTimeoutError::Disconnected) => Err(BridgeError::Closed),
            },
        };
        self.release(id);
        result
    }

    /// Routes an answer message to its waiter.
    ///
    /// Returns `false` and logs when the message has no valid `answerID` or
    /// nobody waits for it.
    pub fn fulfill(&self, answer: &DataObject) -> bool {
        let Some(text) = answer.text("answerID") else {
            tracing::warn!("answer without answerID");
            return false;
        };
        let Ok(id) = text.trim().parse::<u64>() else {
            tracing::warn!(answer_id = text, "invalid answerID");
            return false;
        };
        let sender = match self.slots.lock() {
            Ok(mut slots) => slots.waiters.remove(&id),
            Err(_) => None,
        };
        match sender {
            Some(sender) => sender.send(answer.clone()).is_ok(),
            None => {
                tracing::warn!(answer_id = id, "no request waits for the answer");
                false
            }
        }
    }

    /// Number of requests still waiting.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.slots.lock().map_or(0, |slots| slots.waiters.len())
    }

    /// Releases every waiter with [`BridgeError::Closed`] and rejects new requests.
    pub fn close(&self) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.closed = true;
            slots.waiters.clear();
        }
    }

    /// Returns `true` once closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.slots.lock().map_or(true, |slots| slots.closed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn answer_from_another_thread() {
        let slots = Arc::new(AnswerSlots::new(Duration::from_secs(5)));
        let pending = slots.allocate().unwrap();
        let id = pending.id();
        let reader = Arc::clone(&slots);
        let handle = thread::spawn(move || {
            let answer = DataObject::new("answer").with("answerID", id.to_string()).with("value", "42");
            assert!(reader.fulfill(&answer));
        });
        let answer = slots.wait(pending).unwrap();
        handle.join().unwrap();
        assert_eq!(answer.text("value"), Some("42"));
        assert_eq!(slots.pending(), 0);
    }

    #[test]
    fn deadline_and_close() {
        let slots = AnswerSlots::new(Duration::from_millis(10));
        let pending = slots.allocate().unwrap();
        let id = pending.id();
        assert_eq!(slots.wait(pending), Err(BridgeError::Timeout { answer_id: id }));
        assert_eq!(slots.pending(), 0);

        let unknown = DataObject::new("answer").with("answerID", "99");
        assert!(!slots.fulfill(&unknown));

        let slots = Arc::new(AnswerSlots::new(Duration::from_secs(30)));
        let pending = slots.allocate().unwrap();
        let closer = Arc::clone(&slots);
        let handle = thread::spawn(move || closer.close());
        assert_eq!(slots.wait(pending), Err(BridgeError::Closed));
        handle.join().unwrap();
        assert!(matches!(slots.allocate(), Err(BridgeError::Closed)));
    }
}
