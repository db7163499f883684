use core::any::Any;

use rui_core::bridge::JsArg;
use rui_core::view::escape_html;
use rui_core::{DataObject, Params, PropertyError, Session, Value, View, Widget, js_args};

use crate::write_attribute;

const INPUT_TYPES: [&str; 6] = ["text", "password", "email", "email", "url", "tel"];
const MULTILINE: i64 = 6;

/// A text input.
///
/// `edit-view-type` selects the variant: `text`, `password`, `email`,
/// `emails`, `url`, `phone` or `multiline`. Every edit in the page fires
/// `edit-text-changed` with the new and the old text.
#[derive(Debug, Default)]
pub struct EditView;

impl EditView {
    /// Creates an edit view.
    pub fn create(session: &Session, params: Params) -> View {
        View::create(session, Self, params)
    }

    /// The current text.
    #[must_use]
    pub fn text(view: &View) -> String {
        view.get_text("text").unwrap_or_default()
    }

    /// Appends to the current text.
    pub fn append_text(view: &View, text: &str) {
        if text.is_empty() {
            return;
        }
        let mut current = Self::text(view);
        current.push_str(text);
        view.set("text", current);
    }

    fn is_multiline(view: &View) -> bool {
        view.get_int("edit-view-type") == Some(MULTILINE)
    }
}

fn update_attribute(view: &View, name: &str, value: Option<String>) {
    let bridge = view.session().bridge();
    match value {
        Some(value) => bridge.update_property(view.html_id(), name, &JsArg::from(value)),
        None => bridge.remove_property(view.html_id(), name),
    }
}

impl Widget for EditView {
    fn type_name(&self) -> &'static str {
        "EditView"
    }

    fn normalize(&self, tag: &str) -> String {
        match rui_core::properties::normalize(tag).as_str() {
            "value" => "text".to_string(),
            "type" => "edit-view-type".to_string(),
            "pattern" => "edit-view-pattern".to_string(),
            other => other.to_string(),
        }
    }

    fn event_arity(&self, tag: &str) -> Option<usize> {
        (tag == "edit-text-changed").then_some(2)
    }

    fn set(&self, view: &View, tag: &str, value: Value) -> Result<Vec<String>, PropertyError> {
        if tag == "text" {
            crate::set_with_event(view, tag, value, "edit-text-changed", EditView::text)
        } else {
            view.base_set(tag, value)
        }
    }

    fn changed(&self, view: &View, tag: &str) {
        if !view.updates_enabled() {
            return;
        }
        match tag {
            "text" => view
                .session()
                .bridge()
                .call_func("setInputValue", &js_args![view.html_id(), EditView::text(view)]),
            "hint" => update_attribute(
                view,
                "placeholder",
                view.get_text("hint").map(|hint| view.session().translate(&hint)),
            ),
            "max-length" => update_attribute(
                view,
                "maxlength",
                view.get_int("max-length").filter(|length| *length > 0).map(|length| length.to_string()),
            ),
            "read-only" => update_attribute(
                view,
                "readonly",
                view.get_bool("read-only").unwrap_or(false).then(String::new),
            ),
            "spellcheck" => update_attribute(
                view,
                "spellcheck",
                Some(view.get_bool("spellcheck").unwrap_or(false).to_string()),
            ),
            "edit-view-pattern" => update_attribute(view, "pattern", view.get_text("edit-view-pattern")),
            "edit-wrap" => update_attribute(
                view,
                "wrap",
                Some(if view.get_bool("edit-wrap").unwrap_or(false) { "soft" } else { "off" }.to_string()),
            ),
            "edit-view-type" => match view.parent() {
                Some(parent) => parent.update_inner_html(),
                None => view.session().refresh(),
            },
            _ => view.base_changed(tag),
        }
    }

    fn html_tag(&self, view: &View) -> String {
        if EditView::is_multiline(view) { "textarea" } else { "input" }.to_string()
    }

    fn html_properties(&self, view: &View, buffer: &mut String) {
        let multiline = EditView::is_multiline(view);
        if multiline {
            let wrap = if view.get_bool("edit-wrap").unwrap_or(false) { "soft" } else { "off" };
            write_attribute(buffer, "wrap", wrap);
        } else {
            let kind = view
                .get_int("edit-view-type")
                .and_then(|kind| usize::try_from(kind).ok())
                .and_then(|kind| INPUT_TYPES.get(kind).copied())
                .unwrap_or("text");
            write_attribute(buffer, "type", kind);
            if view.get_int("edit-view-type") == Some(3) {
                buffer.push_str(" multiple");
            }
            write_attribute(buffer, "value", &EditView::text(view));
            if let Some(pattern) = view.get_text("edit-view-pattern") {
                write_attribute(buffer, "pattern", &pattern);
            }
        }
        if let Some(hint) = view.get_text("hint") {
            write_attribute(buffer, "placeholder", &view.session().translate(&hint));
        }
        if let Some(length) = view.get_int("max-length").filter(|length| *length > 0) {
            write_attribute(buffer, "maxlength", &length.to_string());
        }
        if view.get_bool("read-only").unwrap_or(false) {
            buffer.push_str(" readonly");
        }
        let spellcheck = view.get_bool("spellcheck").unwrap_or(false);
        write_attribute(buffer, "spellcheck", if spellcheck { "true" } else { "false" });
        buffer.push_str(" oninput=\"editViewInputEvent(this)\"");
    }

    fn html_subviews(&self, view: &View, buffer: &mut String) {
        if EditView::is_multiline(view) {
            buffer.push_str(&escape_html(&EditView::text(view)).replace("<br>", "\n"));
        }
    }

    fn html_disabled(&self) -> bool {
        true
    }

    fn focusable(&self) -> bool {
        true
    }

    fn handle_command(&self, view: &View, command: &str, data: &DataObject) -> bool {
        if command != "textChanged" {
            return view.base_handle_command(command, data);
        }
        let text = data.text("text").unwrap_or_default().to_string();
        let old = EditView::text(view);
        if text != old {
            let value = (!text.is_empty()).then(|| Value::Text(text.clone()));
            crate::store_from_page(
                view,
                "text",
                value,
                "edit-text-changed",
                &[&text as &dyn Any, &old as &dyn Any],
            );
        }
        true
    }
}
