//! In-browser transport.
//!
//! The session runs inside the page next to the page runtime. Scripts are
//! evaluated directly and the runtime reaches the session through a global
//! `sendMessage(text)` function installed by [`WebApp::mount`].

use std::cell::{OnceCell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use core::time::Duration;

use rui_core::bridge::{AnswerSlots, ScriptSink};
use rui_core::session::{DEFAULT_ANSWER_TIMEOUT, ROOT_ELEMENT_ID};
use rui_core::{BridgeError, DataObject, SessionContent};
use wasm_bindgen::prelude::*;

use crate::driver::SessionDriver;
use crate::error::WebError;
use crate::protocol::{self, Incoming};

/// Evaluates scripts in the page.
///
/// The runtime answers synchronous requests from within the evaluated script,
/// so answers are fulfilled before the session starts waiting.
#[derive(Debug, Clone, Default)]
struct JsSink {
    answers: Rc<OnceCell<Arc<AnswerSlots>>>,
}

impl ScriptSink for JsSink {
    fn send(&self, script: &str) -> Result<(), BridgeError> {
        js_sys::eval(script)
            .map(drop)
            .map_err(|error| BridgeError::Transport(format!("{error:?}")))
    }

    fn attach_answers(&self, answers: Arc<AnswerSlots>) {
        if self.answers.set(answers).is_err() {
            tracing::warn!("answer slots are already attached");
        }
    }
}

struct Mounted {
    driver: RefCell<SessionDriver<JsSink>>,
    answers: Rc<OnceCell<Arc<AnswerSlots>>>,
    queue: RefCell<VecDeque<Incoming>>,
}

impl Mounted {
    fn receive(&self, text: &str) {
        let message = match Incoming::parse(text) {
            Ok(message) => message,
            Err(error) => {
                tracing::warn!(%error, "malformed message");
                return;
            }
        };
        if let Incoming::Answer(answer) = &message {
            if !self.answers.get().is_some_and(|slots| slots.fulfill(answer)) {
                tracing::debug!("late answer dropped");
            }
            return;
        }
        self.queue.borrow_mut().push_back(message);
        // messages sent while the session is busy are drained by the running call
        let Ok(mut driver) = self.driver.try_borrow_mut() else {
            return;
        };
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(message) = next else { break };
            if !driver.handle(message) {
                driver.close();
                self.queue.borrow_mut().clear();
                break;
            }
        }
    }
}

/// Builder for [`WebApp`].
#[derive(Debug, Clone)]
pub struct WebAppBuilder {
    container_id: Option<String>,
    answer_timeout: Duration,
}

impl Default for WebAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAppBuilder {
    /// Creates a new builder with default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            container_id: None,
            answer_timeout: DEFAULT_ANSWER_TIMEOUT,
        }
    }

    /// Sets the element the root view element is created in; defaults to the body.
    #[must_use]
    pub fn with_container_id(mut self, id: impl Into<String>) -> Self {
        self.container_id = Some(id.into());
        self
    }

    /// Sets the deadline of synchronous answers.
    #[must_use]
    pub const fn with_answer_timeout(mut self, timeout: Duration) -> Self {
        self.answer_timeout = timeout;
        self
    }

    /// Finalises the builder and creates a [`WebApp`].
    #[must_use]
    pub fn build(self) -> WebApp {
        WebApp {
            options: self,
            mounted: None,
        }
    }
}

/// Entry point for running a session inside the browser.
#[derive(Debug)]
pub struct WebApp {
    options: WebAppBuilder,
    mounted: Option<Closure<dyn Fn(String)>>,
}

impl WebApp {
    /// Starts a session with `content` in the current page.
    ///
    /// Creates the root view element when the page has none, installs the
    /// global `sendMessage` function and renders the root view.
    ///
    /// # Errors
    ///
    /// Fails without a document or when the DOM rejects the root element.
    pub fn mount(&mut self, content: impl SessionContent + 'static) -> Result<(), WebError> {
        let window = web_sys::window().ok_or_else(|| WebError::Js("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| WebError::Js("no document".to_string()))?;
        if document.get_element_by_id(ROOT_ELEMENT_ID).is_none() {
            let container: web_sys::Node = match &self.options.container_id {
                Some(id) => document
                    .get_element_by_id(id)
                    .ok_or_else(|| WebError::Js(format!("no element with id `{id}`")))?
                    .into(),
                None => document
                    .body()
                    .ok_or_else(|| WebError::Js("no body".to_string()))?
                    .into(),
            };
            let root = document.create_element("div")?;
            root.set_id(ROOT_ELEMENT_ID);
            container.append_child(&root)?;
        }

        let sink = JsSink::default();
        let answers = Rc::clone(&sink.answers);
        let driver = SessionDriver::new(1, sink, content, self.options.answer_timeout);
        let mounted = Rc::new(Mounted {
            driver: RefCell::new(driver),
            answers,
            queue: RefCell::new(VecDeque::new()),
        });

        let receiver = Rc::clone(&mounted);
        let closure = Closure::<dyn Fn(String)>::new(move |text: String| receiver.receive(&text));
        js_sys::Reflect::set(&window, &JsValue::from_str("sendMessage"), closure.as_ref())?;
        self.mounted = Some(closure);

        mounted.receive(&DataObject::new(protocol::START_SESSION).to_string());
        Ok(())
    }

    /// Whether [`WebApp::mount`] succeeded.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }
}
