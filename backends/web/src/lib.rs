#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Transports connecting RUI sessions to a browser.
//!
//! Two ways to reach the page runtime are provided:
//!
//! - [`Server`] accepts websocket connections and runs one session per
//!   connection on its own thread. Incoming frames are data objects; outgoing
//!   frames are scripts.
//! - `WebApp` (feature `wasm`, `wasm32` targets) runs the session inside the
//!   page and evaluates scripts directly.
//!
//! Both are thin: [`SessionDriver`] does the session handling and only needs
//! a [`rui_core::ScriptSink`] to write to.

mod driver;
mod error;
mod options;
mod protocol;
#[cfg(not(target_arch = "wasm32"))]
mod server;
#[cfg(not(target_arch = "wasm32"))]
mod sink;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod wasm;

pub use driver::SessionDriver;
pub use error::{DisconnectReason, WebError};
pub use options::{DEFAULT_ADDRESS, DEFAULT_PATH, ServerOptions};
pub use protocol::{ANSWER, Incoming, RECONNECT, START_SESSION, session_id_script};
#[cfg(not(target_arch = "wasm32"))]
pub use server::{Server, run};
#[cfg(not(target_arch = "wasm32"))]
pub use sink::{SharedAnswers, SocketSink};
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use wasm::{WebApp, WebAppBuilder};
