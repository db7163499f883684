#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod logging;

#[doc(inline)]
pub use rui_color as color;
#[doc(inline)]
pub use rui_core as core;
#[doc(inline)]
pub use rui_form as form;
#[doc(inline)]
pub use rui_graphics as graphics;
#[doc(inline)]
pub use rui_layout as layout;
#[doc(inline)]
pub use rui_list as list;
#[doc(inline)]
pub use rui_media as media;
#[doc(inline)]
pub use rui_table as table;
#[doc(inline)]
pub use rui_text as text;
#[cfg(feature = "web")]
#[doc(inline)]
pub use rui_web as web;

pub use config::RuiConfig;
pub use rui_core::{Params, Session, SessionContent, SessionHost, View, Widget};

pub mod prelude {
    //! The types most applications need.
    //!
    //! ```
    //! use rui::prelude::*;
    //!
    //! let (session, _) = Session::headless();
    //! let column = ListLayout::create(&session, Params::new().with("orientation", "vertical"));
    //! column.append(text(&session, "Hello"));
    //! assert_eq!(column.views_count(), 1);
    //! ```
    pub use rui_color::Color;
    pub use rui_core::{
        Angle, Animation, AnimationEventKind, Bounds, DataObject, Frame, KeyEvent, MouseEvent, Params, PointerEvent,
        Range, Session, SessionContent, SessionHost, Size, Theme, Value, View, WeakView, Widget,
    };
    pub use rui_form::{ColorPicker, DatePicker, DropDownList, EditView, FileInfo, FilePicker, NumberPicker, TimePicker};
    pub use rui_graphics::{Canvas, CanvasView, LinearGradient, Path, RadialGradient, draw_function, redraw_canvas_view};
    pub use rui_layout::{ContainerExt, DetailsView, GridLayout, ListLayout, ViewsContainer};
    pub use rui_list::{ListAdapter, ListView, TextListAdapter, ViewListAdapter};
    pub use rui_media::{ImageView, image};
    pub use rui_table::{SimpleTableAdapter, TableAdapter, TableCell, TableView, TextTableAdapter};
    pub use rui_text::{TextView, text};

    pub use crate::RuiConfig;
}
