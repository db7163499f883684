use rui_core::view::CssBuilder;
use rui_core::{Params, PropertyError, PropertyKind, Range, Session, Value, View, Widget};

use crate::container::{self, CONTENT};

/// Children placed on the cells of a grid.
///
/// Track sizes come from `cell-width` and `cell-height`, spacing from
/// `grid-row-gap` and `grid-column-gap`; `gap` writes both. A child is placed
/// by its own `row` and `column` ranges, see [`GridLayout::place`].
#[derive(Debug, Default)]
pub struct GridLayout;

impl GridLayout {
    /// Creates a grid layout.
    pub fn create(session: &Session, params: Params) -> View {
        View::create(session, Self, params)
    }

    /// Places `child` on the given rows and columns.
    pub fn place(child: &View, row: Range, column: Range) {
        child.set("row", row);
        child.set("column", column);
    }
}

impl Widget for GridLayout {
    fn type_name(&self) -> &'static str {
        "GridLayout"
    }

    fn property_kind(&self, tag: &str) -> Option<PropertyKind> {
        (tag == CONTENT).then_some(PropertyKind::Views)
    }

    fn set(&self, view: &View, tag: &str, value: Value) -> Result<Vec<String>, PropertyError> {
        if tag == "gap" {
            let mut changed = view.base_set("grid-row-gap", value.clone())?;
            changed.extend(view.base_set("grid-column-gap", value)?);
            return Ok(changed);
        }
        container::container_set(view, tag, value)
    }

    fn remove(&self, view: &View, tag: &str) -> Vec<String> {
        if tag == "gap" {
            let mut changed = view.base_remove("grid-row-gap");
            changed.extend(view.base_remove("grid-column-gap"));
            return changed;
        }
        container::container_remove(view, tag)
    }

    fn get(&self, view: &View, tag: &str) -> Option<Value> {
        if tag == "gap" {
            let row = view.base_get("grid-row-gap");
            return (row == view.base_get("grid-column-gap")).then_some(row).flatten();
        }
        view.base_get(tag)
    }

    fn changed(&self, view: &View, tag: &str) {
        if tag == CONTENT {
            view.update_inner_html();
        } else {
            view.base_changed(tag);
        }
    }

    fn css_style(&self, view: &View, builder: &mut CssBuilder) {
        builder.add("display", "grid");
        view.base_css_style(builder);
    }

    fn html_subviews(&self, view: &View, buffer: &mut String) {
        container::write_children(view, buffer);
    }

    fn subviews(&self, view: &View) -> Vec<View> {
        container::children(view)
    }
}
