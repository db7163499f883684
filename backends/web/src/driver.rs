use core::time::Duration;

use rui_core::bridge::ScriptSink;
use rui_core::{DataObject, ScriptBridge, Session, SessionContent, SessionHost};

use crate::protocol::{self, Incoming};

/// Runs one session: starts it on the first `startSession` and routes the
/// following page messages through it.
///
/// The driver owns the non-`Send` session state, so it lives on the thread
/// that created it.
pub struct SessionDriver<S> {
    id: u64,
    sink: S,
    host: SessionHost,
    started: bool,
}

impl<S> core::fmt::Debug for SessionDriver<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionDriver")
            .field("id", &self.id)
            .field("started", &self.started)
            .field("closed", &self.host.is_closed())
            .finish_non_exhaustive()
    }
}

impl<S: ScriptSink + Clone + 'static> SessionDriver<S> {
    /// A driver of `content` writing to `sink`.
    pub fn new(id: u64, sink: S, content: impl SessionContent + 'static, answer_timeout: Duration) -> Self {
        let session = Session::new(ScriptBridge::new(sink.clone(), answer_timeout));
        Self {
            id,
            sink,
            host: SessionHost::new(session, content),
            started: false,
        }
    }
}

impl<S: ScriptSink> SessionDriver<S> {
    /// The session id sent to the page.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// The session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        self.host.session()
    }

    /// Whether the root view was rendered.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started
    }

    /// Handles one page message; returns `false` once the session is over.
    pub fn handle(&mut self, message: Incoming) -> bool {
        match message {
            Incoming::Start(info) => self.start(&info),
            Incoming::Answer(answer) => {
                self.host.session().bridge().answer_received(&answer);
                true
            }
            Incoming::Event(event) if !self.started => {
                tracing::warn!(session = self.id, command = event.tag(), "message before startSession dropped");
                true
            }
            Incoming::Event(event) => self.host.handle_message(&event) && !self.host.is_closed(),
        }
    }

    fn start(&mut self, info: &DataObject) -> bool {
        if self.started {
            tracing::warn!(session = self.id, "session is already started");
            return true;
        }
        if info.tag() == protocol::RECONNECT {
            tracing::info!(session = self.id, old = info.text("session"), "reconnect starts a new session");
        }
        if let Err(error) = self.sink.send(&protocol::session_id_script(self.id)) {
            tracing::error!(session = self.id, %error, "sending the session id failed");
            return false;
        }
        self.host.session().handle_event("sessionInfo", info);
        self.started = self.host.start();
        if self.started {
            tracing::info!(session = self.id, "session started");
        }
        self.started
    }

    /// Closes the session.
    pub fn close(&mut self) {
        self.host.close();
    }

    /// Handles messages until the channel closes or the session ends.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run(mut self, messages: &async_channel::Receiver<Incoming>) {
        while let Ok(message) = messages.recv_blocking() {
            if !self.handle(message) {
                break;
            }
        }
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use rui_core::bridge::RecordingSink;
    use rui_core::{Params, View};
    use rui_text::TextView;

    use super::*;

    #[derive(Default)]
    struct Hello {
        closed: std::rc::Rc<core::cell::Cell<bool>>,
    }

    impl SessionContent for Hello {
        fn create_root_view(&mut self, session: &Session) -> Option<View> {
            Some(TextView::create(session, Params::new().with("text", "hello")))
        }

        fn on_close(&mut self, _session: &Session) {
            self.closed.set(true);
        }
    }

    fn incoming(text: &str) -> Incoming {
        Incoming::parse(text).unwrap()
    }

    #[test]
    fn start_greets_then_renders_the_root() {
        let sink = RecordingSink::new();
        let mut driver = SessionDriver::new(4, sink.clone(), Hello::default(), Duration::from_millis(50));
        assert!(driver.handle(incoming("startSession{language=fr, pixel-ratio=2}")));
        assert!(driver.is_started());

        let scripts = sink.take();
        assert_eq!(scripts[0], "sessionID = '4';");
        assert!(scripts[1].starts_with("updateInnerHTML('ruiRootView', '<div id=\"id000001\""));
        assert!(scripts[1].contains("hello"));
        assert_eq!(driver.session().language(), "fr");
        assert_eq!(driver.session().pixel_ratio(), 2.0);

        assert!(driver.handle(incoming("startSession{}")));
        assert!(sink.is_empty());
    }

    #[test]
    fn events_before_start_are_dropped() {
        let sink = RecordingSink::new();
        let mut driver = SessionDriver::new(1, sink.clone(), Hello::default(), Duration::from_millis(50));
        assert!(driver.handle(incoming("session-pause{}")));
        assert!(!driver.session().is_paused());
        assert!(sink.is_empty());
    }

    #[test]
    fn session_close_ends_the_loop() {
        let sink = RecordingSink::new();
        let content = Hello::default();
        let closed = std::rc::Rc::clone(&content.closed);
        let (sender, receiver) = async_channel::unbounded();
        for text in ["startSession{}", "session-pause{}", "session-close{}", "session-resume{}"] {
            sender.try_send(incoming(text)).unwrap();
        }

        SessionDriver::new(2, sink.clone(), content, Duration::from_millis(50)).run(&receiver);
        assert!(closed.get());
        assert!(sink.is_closed());
        assert_eq!(receiver.try_recv().ok(), Some(incoming("session-resume{}")));
    }

    #[test]
    fn disconnect_closes_the_session() {
        let sink = RecordingSink::new();
        let content = Hello::default();
        let closed = std::rc::Rc::clone(&content.closed);
        let (sender, receiver) = async_channel::unbounded();
        sender.try_send(incoming("startSession{}")).unwrap();
        drop(sender);

        SessionDriver::new(3, sink, content, Duration::from_millis(50)).run(&receiver);
        assert!(closed.get());
    }
}
