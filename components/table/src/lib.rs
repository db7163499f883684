//! The table view of RUI.
//!
//! A [`TableView`] draws the rows and columns supplied by a [`TableAdapter`].
//! Content given as rows of [`TableCell`]s or of text is wrapped in a
//! [`SimpleTableAdapter`] or a [`TextTableAdapter`]; the simple adapter turns
//! [`TableCell::HorizontalJoin`] and [`TableCell::VerticalJoin`] into spans.
//!
//! ```
//! use rui_core::{Params, Session};
//! use rui_table::{SimpleTableAdapter, TableView};
//!
//! let (session, _) = Session::headless();
//! let content = SimpleTableAdapter::new(vec![
//!     vec!["name".into(), "age".into()],
//!     vec!["Ann".into(), 41.into()],
//! ]);
//! let table = TableView::create(
//!     &session,
//!     Params::new().with("content", content).with("head-height", 1),
//! );
//! assert!(table.html().contains("<thead"));
//! ```

mod adapter;
mod view;

pub use adapter::{
    LineStyles, SimpleTableAdapter, TableAdapter, TableCell, TableSelection, TableStyle, TextTableAdapter,
};
pub use view::{TableView, content, selection, style};
