use core::fmt::Write;

use rui_core::bridge::JsArg;
use rui_core::view::escape_html;
use rui_core::{DataObject, Params, PropertyError, PropertyKind, Session, Value, View, Widget};

use crate::container::{self, CONTENT};

/// A disclosure element: a summary line and content shown when expanded.
///
/// `summary` is text or a view. Opening or closing the element in the page
/// updates `expanded` and calls its change listeners.
#[derive(Debug, Default)]
pub struct DetailsView;

impl DetailsView {
    /// Creates a details view.
    pub fn create(session: &Session, params: Params) -> View {
        View::create(session, Self, params)
    }

    /// Returns `true` when the content is shown.
    #[must_use]
    pub fn is_expanded(view: &View) -> bool {
        view.get_bool("expanded").unwrap_or(false)
    }

    fn summary_view(view: &View) -> Option<View> {
        view.get_raw("summary").and_then(|value| value.as_view().cloned())
    }
}

impl Widget for DetailsView {
    fn type_name(&self) -> &'static str {
        "DetailsView"
    }

    fn property_kind(&self, tag: &str) -> Option<PropertyKind> {
        match tag {
            CONTENT => Some(PropertyKind::Views),
            "summary" => Some(PropertyKind::Text),
            _ => None,
        }
    }

    fn set(&self, view: &View, tag: &str, value: Value) -> Result<Vec<String>, PropertyError> {
        if tag != "summary" {
            return container::container_set(view, tag, value);
        }
        let old = Self::summary_view(view);
        let value = match value {
            Value::View(summary) => Some(Value::View(summary)),
            other => rui_core::properties::coerce_tag(tag, other, Some(PropertyKind::Text))?,
        };
        if let Some(old) = old.filter(|old| value.as_ref().and_then(Value::as_view) != Some(old)) {
            old.set_parent(None);
        }
        if let Some(summary) = value.as_ref().and_then(Value::as_view) {
            summary.set_parent(Some(view));
        }
        Ok(view.store_raw(tag, value))
    }

    fn remove(&self, view: &View, tag: &str) -> Vec<String> {
        if tag == "summary" {
            if let Some(old) = Self::summary_view(view) {
                old.set_parent(None);
            }
            return view.store_raw(tag, None);
        }
        container::container_remove(view, tag)
    }

    fn changed(&self, view: &View, tag: &str) {
        match tag {
            CONTENT | "summary" | "hide-summary-marker" => view.update_inner_html(),
            "expanded" if view.updates_enabled() => {
                let bridge = view.session().bridge();
                if Self::is_expanded(view) {
                    bridge.update_property(view.html_id(), "open", &JsArg::from("open"));
                } else {
                    bridge.remove_property(view.html_id(), "open");
                }
            }
            "expanded" => {}
            _ => view.base_changed(tag),
        }
    }

    fn html_tag(&self, _view: &View) -> String {
        "details".to_string()
    }

    fn html_properties(&self, view: &View, buffer: &mut String) {
        if Self::is_expanded(view) {
            buffer.push_str(" open");
        }
        buffer.push_str(" ontoggle=\"detailsEvent(this)\"");
    }

    fn html_subviews(&self, view: &View, buffer: &mut String) {
        buffer.push_str("<summary");
        if view.get_bool("hide-summary-marker").unwrap_or(false) {
            buffer.push_str(" style=\"list-style: none;\"");
        }
        buffer.push('>');
        match view.get_raw("summary") {
            Some(Value::View(summary)) => summary.write_html(buffer),
            Some(_) => {
                let text = view.get_text("summary").unwrap_or_default();
                let _ = write!(buffer, "{}", escape_html(&view.session().translate(&text)));
            }
            None => {}
        }
        buffer.push_str("</summary>");
        container::write_children(view, buffer);
    }

    fn handle_command(&self, view: &View, command: &str, data: &DataObject) -> bool {
        if command != "details-open" {
            return view.base_handle_command(command, data);
        }
        let open = data.flag("open");
        for tag in view.store_raw("expanded", Some(Value::Bool(open))) {
            view.fire_change_listeners(&tag);
        }
        true
    }

    fn subviews(&self, view: &View) -> Vec<View> {
        let mut subviews: Vec<View> = Self::summary_view(view).into_iter().collect();
        subviews.extend(container::children(view));
        subviews
    }
}
