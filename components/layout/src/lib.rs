//! Container views of RUI.
//!
//! Every container keeps its children under the `content` tag. The child list
//! is edited either by writing `content` as a whole or through
//! [`ContainerExt`], which keeps the remote DOM in sync with the smallest
//! update it can: appending a child appends its HTML, any other edit
//! re-renders the container content.
//!
//! - [`ViewsContainer`]: a plain block holding its children in order,
//! - [`ListLayout`]: a flex box along an orientation, optionally wrapping,
//! - [`GridLayout`]: a CSS grid with explicit track sizes,
//! - [`DetailsView`]: a disclosure element with a summary.
//!
//! ```
//! use rui_core::{Params, Session};
//! use rui_layout::{ContainerExt, ListLayout};
//! use rui_text::text;
//!
//! let (session, _) = Session::headless();
//! let list = ListLayout::create(&session, Params::new().with("orientation", "horizontal"));
//! list.append(text(&session, "one"));
//! list.append(text(&session, "two"));
//! assert_eq!(list.views_count(), 2);
//! ```

pub mod container;
mod details;
mod grid;
mod stack;

pub use container::{ContainerExt, ViewsContainer};
pub use details::DetailsView;
pub use grid::GridLayout;
pub use stack::{ListLayout, flex_declarations};

#[cfg(test)]
mod tests;
