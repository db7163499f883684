use rui_core::properties::tables;
use rui_core::view::CssBuilder;
use rui_core::{Params, PropertyError, PropertyKind, Session, Value, View, Widget};

use crate::container::{self, CONTENT};

/// Children laid out one after another along an orientation.
///
/// `orientation` picks the main axis (`up-down`, `start-to-end`, `bottom-up`,
/// `end-to-start`), `list-wrap` lets the children wrap onto further lines and
/// `list-row-gap`/`list-column-gap` space them. `vertical-align` and
/// `horizontal-align` position the children on both axes.
#[derive(Debug, Default)]
pub struct ListLayout;

impl ListLayout {
    /// Creates a list layout.
    pub fn create(session: &Session, params: Params) -> View {
        View::create(session, Self, params)
    }
}

fn enum_css(view: &View, tag: &str, fallback: &'static str) -> &'static str {
    let index = view.get_int(tag).unwrap_or(0);
    tables::enum_spec(tag)
        .and_then(|spec| spec.css_value(index))
        .unwrap_or(fallback)
}

/// The flex box declarations of a list layout.
#[must_use]
pub fn flex_declarations(view: &View) -> Vec<(&'static str, String)> {
    let orientation = view.get_int("orientation").unwrap_or(0);
    let vertical = orientation % 2 == 0;
    let reverse = orientation >= 2;
    let v_align = view.get_int("vertical-align").unwrap_or(0);
    let h_align = view.get_int("horizontal-align").unwrap_or(0);
    let (main, cross) = if vertical { (v_align, h_align) } else { (h_align, v_align) };

    let justify = match (main, reverse) {
        (0, false) | (1, true) => "flex-start",
        (1, false) | (0, true) => "flex-end",
        (2, _) => "center",
        _ => "space-between",
    };
    let align = match cross {
        0 => "flex-start",
        1 => "flex-end",
        2 => "center",
        _ => "stretch",
    };
    vec![
        ("display", "flex".to_string()),
        ("flex-direction", enum_css(view, "orientation", "column").to_string()),
        ("flex-wrap", enum_css(view, "list-wrap", "nowrap").to_string()),
        ("justify-content", justify.to_string()),
        ("align-items", align.to_string()),
    ]
}

impl Widget for ListLayout {
    fn type_name(&self) -> &'static str {
        "ListLayout"
    }

    fn property_kind(&self, tag: &str) -> Option<PropertyKind> {
        (tag == CONTENT).then_some(PropertyKind::Views)
    }

    fn set(&self, view: &View, tag: &str, value: Value) -> Result<Vec<String>, PropertyError> {
        container::container_set(view, tag, value)
    }

    fn remove(&self, view: &View, tag: &str) -> Vec<String> {
        container::container_remove(view, tag)
    }

    fn changed(&self, view: &View, tag: &str) {
        match tag {
            CONTENT => view.update_inner_html(),
            "orientation" | "list-wrap" | "vertical-align" | "horizontal-align" => {
                if view.updates_enabled() {
                    view.update_css(&flex_declarations(view)[1..]);
                }
            }
            _ => view.base_changed(tag),
        }
    }

    fn css_style(&self, view: &View, builder: &mut CssBuilder) {
        view.base_css_style(builder);
        builder.extend(flex_declarations(view));
    }

    fn html_subviews(&self, view: &View, buffer: &mut String) {
        container::write_children(view, buffer);
    }

    fn subviews(&self, view: &View) -> Vec<View> {
        container::children(view)
    }
}
