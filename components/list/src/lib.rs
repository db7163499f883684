//! The list view of RUI.
//!
//! A [`ListView`] shows the items of a [`ListAdapter`] along an orientation
//! and tracks the selected one. Items given as text are wrapped in a
//! [`TextListAdapter`], items given as views in a [`ViewListAdapter`].
//!
//! ```
//! use rui_core::{Params, Session};
//! use rui_list::ListView;
//!
//! let (session, _) = Session::headless();
//! let list = ListView::create(
//!     &session,
//!     Params::new().with("items", ["red", "green", "blue"]).with("current", 1),
//! );
//! assert_eq!(ListView::current(&list), 1);
//! assert!(list.html().contains("listItemClickEvent"));
//! ```

mod adapter;
mod view;

pub use adapter::{ListAdapter, TextListAdapter, ViewListAdapter};
pub use view::{ListView, items};

#[cfg(test)]
mod tests;
