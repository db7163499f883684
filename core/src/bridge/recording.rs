//! A headless sink that records scripts instead of running them.

use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use core::fmt::{self, Debug};
use std::sync::Arc;

use super::{AnswerSlots, ScriptSink};
use crate::data::DataObject;
use crate::error::BridgeError;

type Responder = Box<dyn Fn(&str) -> Option<DataObject>>;

#[derive(Default)]
struct Inner {
    scripts: RefCell<Vec<String>>,
    responder: Option<Responder>,
    answers: RefCell<Option<Arc<AnswerSlots>>>,
    failing: Cell<bool>,
    closed: Cell<bool>,
}

/// Records every script; clones share the record.
///
/// A responder may answer synchronous requests: it sees each script and
/// returns the answer message the runtime would send.
#[derive(Clone, Default)]
pub struct RecordingSink {
    inner: Rc<Inner>,
}

impl Debug for RecordingSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingSink")
            .field("scripts", &self.inner.scripts.borrow().len())
            .field("closed", &self.inner.closed.get())
            .finish_non_exhaustive()
    }
}

impl RecordingSink {
    /// A sink that never answers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink answering requests with `responder`.
    pub fn with_responder(responder: impl Fn(&str) -> Option<DataObject> + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                responder: Some(Box::new(responder)),
                ..Inner::default()
            }),
        }
    }

    /// Recorded scripts in send order.
    #[must_use]
    pub fn scripts(&self) -> Vec<String> {
        self.inner.scripts.borrow().clone()
    }

    /// Removes and returns the recorded scripts.
    #[must_use]
    pub fn take(&self) -> Vec<String> {
        core::mem::take(&mut *self.inner.scripts.borrow_mut())
    }

    /// Number of recorded scripts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.scripts.borrow().len()
    }

    /// Returns `true` when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.scripts.borrow().is_empty()
    }

    /// Returns `true` when some recorded script contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.inner
            .scripts
            .borrow()
            .iter()
            .any(|script| script.contains(needle))
    }

    /// Makes later sends fail as a broken transport would.
    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.set(failing);
    }

    /// Returns `true` once the bridge closed the sink.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.closed.get()
    }
}

impl ScriptSink for RecordingSink {
    fn send(&self, script: &str) -> Result<(), BridgeError> {
        if self.inner.failing.get() {
            return Err(BridgeError::Transport("connection reset".to_string()));
        }
        self.inner.scripts.borrow_mut().push(script.to_string());
        if let Some(answer) = self.inner.responder.as_ref().and_then(|respond| respond(script)) {
            if let Some(answers) = self.inner.answers.borrow().as_ref() {
                answers.fulfill(&answer);
            }
        }
        Ok(())
    }

    fn attach_answers(&self, answers: Arc<AnswerSlots>) {
        *self.inner.answers.borrow_mut() = Some(answers);
    }

    fn close(&self) {
        self.inner.closed.set(true);
    }
}
