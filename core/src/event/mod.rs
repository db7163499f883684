//! Event listeners, input events and named-method bindings.

mod binding;
mod input;
pub mod kinds;
mod listener;

pub use binding::{BindingMethod, BindingTable};
pub use input::{Frame, KeyEvent, MouseEvent, PointerEvent, Touch, TouchEvent};
pub use kinds::{EventFamily, EventKind};
pub use listener::{EventListeners, Listener, Shape};
