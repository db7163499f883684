//! # RUI Core
//!
//! The server side of a browser-rendered UI: every connected page is a
//! [`Session`] holding one tree of [`View`]s. Property writes go through the
//! property engine, which normalizes and coerces them, stores them in the
//! view's [`Properties`] and emits the matching DOM or CSS mutation over the
//! session's [`Bridge`]. Runtime messages come back as [`DataObject`]s and are
//! routed to the view named by their `id`.
//!
//! The crate is organized bottom-up:
//!
//! - [`value`]: the value taxonomy and its text and CSS forms,
//! - [`data`]: the data-text format used on the wire and in resource files,
//! - [`properties`]: tag tables, coercion and the property map,
//! - [`event`]: listener shapes, bindings and decoded input events,
//! - [`view`]: the widget contract and the view base,
//! - [`animation`]: keyframes, animations and transitions,
//! - [`bridge`]: the command stream and its script builder,
//! - [`session`] and [`theme`]: per-connection state and resources.

#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]

extern crate alloc;

pub mod animation;
pub mod bridge;
pub mod data;
pub mod error;
pub mod event;
pub mod properties;
pub mod session;
pub mod theme;
pub mod value;
pub mod view;

#[doc(inline)]
pub use animation::{AnimatedProperty, Animation, AnimationEventKind, AnimationStatus};
#[doc(inline)]
pub use bridge::{Bridge, JsArg, RecordingSink, ScriptBridge, ScriptSink};
#[doc(inline)]
pub use data::{DataNode, DataObject, DataValue};
pub use error::{BindingError, BridgeError, DataError, PropertyError, ValueParseError};
#[doc(inline)]
pub use event::{
    BindingMethod, BindingTable, EventListeners, Frame, KeyEvent, Listener, MouseEvent, PointerEvent, TouchEvent,
};
#[doc(inline)]
pub use properties::{Properties, PropertyKind};
#[doc(inline)]
pub use session::{Lifecycle, Session, SessionContent, SessionHost};
pub use theme::Theme;
#[doc(inline)]
pub use value::{Angle, Bounds, Color, Range, Size, Value};
#[doc(inline)]
pub use view::{CssBuilder, Params, View, WeakView, Widget};
