//! Text display for RUI.
//!
//! [`TextView`] renders a block of text. The typography properties
//! (`text-size`, `text-weight`, `text-color`, `italic`, ...) are general view
//! properties and inherited by nested views, so they can equally be set on an
//! enclosing container.
//!
//! ```
//! use rui_core::Session;
//! use rui_text::text;
//!
//! let (session, _) = Session::headless();
//! let label = text(&session, "Hello");
//! label.set("text-size", "18px");
//! assert_eq!(label.get_text("text").as_deref(), Some("Hello"));
//! ```

mod text;

pub use text::{TextView, text};
