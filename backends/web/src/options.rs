use core::time::Duration;

use rui_core::session::DEFAULT_ANSWER_TIMEOUT;

/// Default websocket bind address.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:8080";

/// Default websocket request path.
pub const DEFAULT_PATH: &str = "/ws";

/// Settings of the websocket server.
///
/// ```
/// use std::time::Duration;
/// use rui_web::ServerOptions;
///
/// let options = ServerOptions::new("0.0.0.0:9000")
///     .with_path("/ui")
///     .with_answer_timeout(Duration::from_secs(3));
/// assert_eq!(options.address(), "0.0.0.0:9000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOptions {
    address: String,
    path: String,
    answer_timeout: Duration,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS)
    }
}

impl ServerOptions {
    /// Options listening on `address` with the default path and timeout.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            path: DEFAULT_PATH.to_string(),
            answer_timeout: DEFAULT_ANSWER_TIMEOUT,
        }
    }

    /// Sets the request path accepted for the websocket upgrade.
    ///
    /// An empty path accepts every request path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets how long a session waits for a synchronous answer of the page.
    #[must_use]
    pub const fn with_answer_timeout(mut self, timeout: Duration) -> Self {
        self.answer_timeout = timeout;
        self
    }

    /// The bind address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The accepted request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The deadline of synchronous answers.
    #[must_use]
    pub const fn answer_timeout(&self) -> Duration {
        self.answer_timeout
    }

    /// Whether a websocket upgrade of `path` is accepted.
    #[must_use]
    pub fn accepts_path(&self, path: &str) -> bool {
        self.path.is_empty() || self.path == path
    }
}
