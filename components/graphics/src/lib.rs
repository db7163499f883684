#![doc = "Canvas drawing for RUI."]
//!
//! A [`CanvasView`] is a `<canvas>` element whose content is produced by a
//! draw function. The function receives a [`Canvas`] context whose calls are
//! collected into a single script and run by the page.
//!
//! ```
//! use rui_core::{Color, Params, Session};
//! use rui_graphics::{CanvasView, draw_function};
//!
//! let (session, sink) = Session::headless();
//! let view = CanvasView::create(&session, Params::new());
//! session.set_root(&view);
//! view.set(
//!     "draw-function",
//!     draw_function(|canvas| {
//!         canvas.set_fill_style(Color::rgb(255, 0, 0));
//!         canvas.fill_rect(0.0, 0.0, 10.0, 10.0);
//!     }),
//! );
//! assert!(sink.contains("ctx.fillRect(0, 0, 10, 10);"));
//! ```
#![allow(clippy::multiple_crate_versions)]

pub mod canvas;
pub mod state;
mod view;

pub use canvas::Canvas;
pub use canvas::gradient::{ColorStop, LinearGradient, RadialGradient};
pub use canvas::path::Path;
pub use state::{FillStyle, FontParams, ImageRepeat, LineCap, LineJoin, TextAlign, TextBaseline};
pub use view::{CanvasView, draw_function, redraw_canvas_view};

#[cfg(test)]
mod tests;
