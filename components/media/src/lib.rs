//! Images for RUI.
//!
//! [`ImageView`] renders an `<img>` element. Sources starting with `@` are
//! names in the session image table, so a theme can swap the file without
//! touching the view.
//!
//! ```
//! use rui_core::Session;
//! use rui_media::{ImageView, image};
//!
//! let (session, _) = Session::headless();
//! session.set_image("logo", "images/logo.png");
//! let view = image(&session, "@logo");
//! view.set("fit", "contain");
//! assert_eq!(ImageView::source_url(&view), "images/logo.png");
//! assert!(view.html().contains(" src=\"images/logo.png\""));
//! ```

mod image;

pub use image::{ImageView, image};

#[cfg(test)]
mod tests;
