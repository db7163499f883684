use std::io;

use thiserror::Error;

/// Error type produced by the web transports.
#[derive(Debug, Error)]
pub enum WebError {
    /// The listening socket could not be bound.
    #[error("failed to bind the websocket listener: {0}")]
    Bind(#[source] io::Error),

    /// The async runtime or a session thread could not be started.
    #[error("failed to start the server runtime: {0}")]
    Runtime(#[source] io::Error),

    /// The websocket upgrade of a connection failed.
    #[error("websocket handshake failed: {0}")]
    Handshake(String),

    /// Reading from or writing to an open socket failed.
    #[error("websocket error: {0}")]
    Socket(String),

    /// The transport is not available on the active target.
    #[error("the in-browser transport requires the wasm32 target")]
    Unsupported,

    /// Wrapper around JavaScript exceptions.
    #[error("JavaScript error: {0}")]
    Js(String),
}

#[cfg(feature = "wasm")]
impl From<wasm_bindgen::JsValue> for WebError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        value
            .as_string()
            .map_or_else(|| Self::Js(format!("{value:?}")), Self::Js)
    }
}

#[cfg(feature = "wasm")]
impl From<WebError> for wasm_bindgen::JsValue {
    fn from(value: WebError) -> Self {
        Self::from(value.to_string())
    }
}

/// Why a websocket connection ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectReason {
    /// The browser closed the connection.
    Graceful {
        /// Websocket close code, if provided.
        code: Option<u16>,
    },
    /// The session ended and the server closed the connection.
    SessionClosed,
    /// The connection failed.
    Abnormal {
        /// Error details.
        details: String,
    },
}

impl core::fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Graceful { code: Some(code) } => write!(f, "closed by the browser (close code {code})"),
            Self::Graceful { code: None } => f.write_str("closed by the browser"),
            Self::SessionClosed => f.write_str("session closed"),
            Self::Abnormal { details } => write!(f, "connection failed: {}", details.trim()),
        }
    }
}
