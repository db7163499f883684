use std::sync::{Arc, OnceLock};

use async_channel::Sender;
use rui_core::BridgeError;
use rui_core::bridge::{AnswerSlots, ScriptSink};

/// Answer slots of one session, shared between its bridge and the socket reader.
pub type SharedAnswers = Arc<OnceLock<Arc<AnswerSlots>>>;

/// Queues scripts for the socket writer of one connection.
///
/// The session thread pushes finished scripts; the async writer task sends
/// them as text frames in order.
#[derive(Debug, Clone)]
pub struct SocketSink {
    scripts: Sender<String>,
    answers: SharedAnswers,
}

impl SocketSink {
    /// A sink feeding `scripts` whose answer slots are published to `answers`.
    #[must_use]
    pub const fn new(scripts: Sender<String>, answers: SharedAnswers) -> Self {
        Self { scripts, answers }
    }
}

impl ScriptSink for SocketSink {
    fn send(&self, script: &str) -> Result<(), BridgeError> {
        self.scripts
            .send_blocking(script.to_string())
            .map_err(|_| BridgeError::Closed)
    }

    fn attach_answers(&self, answers: Arc<AnswerSlots>) {
        if self.answers.set(answers).is_err() {
            tracing::warn!("answer slots are already attached");
        }
    }

    fn close(&self) {
        self.scripts.close();
    }
}

/// Delivers an answer to the waiting request of the session.
///
/// Returns `false` when no request waits for it.
pub fn fulfill(answers: &OnceLock<Arc<AnswerSlots>>, answer: &rui_core::DataObject) -> bool {
    match answers.get() {
        Some(slots) => slots.fulfill(answer),
        None => {
            tracing::warn!("answer before the session started");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use rui_core::DataObject;

    use super::*;

    #[test]
    fn scripts_queue_in_order_until_closed() {
        let (sender, receiver) = async_channel::unbounded();
        let sink = SocketSink::new(sender, SharedAnswers::default());
        sink.send("first();").unwrap();
        sink.send("second();").unwrap();
        assert_eq!(receiver.try_recv().unwrap(), "first();");
        assert_eq!(receiver.try_recv().unwrap(), "second();");

        sink.close();
        assert_eq!(sink.send("late();"), Err(BridgeError::Closed));
    }

    #[test]
    fn answers_reach_the_attached_slots() {
        let (sender, _receiver) = async_channel::unbounded();
        let answers = SharedAnswers::default();
        let sink = SocketSink::new(sender, Arc::clone(&answers));
        let answer = DataObject::new("answer").with("answerID", "1");
        assert!(!fulfill(&answers, &answer));

        let slots = Arc::new(AnswerSlots::new(Duration::from_millis(50)));
        sink.attach_answers(Arc::clone(&slots));
        let pending = slots.allocate().unwrap();
        assert!(fulfill(&answers, &answer));
        assert_eq!(slots.wait(pending).unwrap().text("answerID"), Some("1"));
    }
}
