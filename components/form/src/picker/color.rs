use core::any::Any;

use rui_core::{Color, DataObject, Params, PropertyError, Session, Value, View, Widget};

use super::set_input_value;
use crate::write_attribute;

/// A color input; the value is opaque and black when unset.
#[derive(Debug, Default)]
pub struct ColorPicker;

impl ColorPicker {
    /// Creates a color picker.
    pub fn create(session: &Session, params: Params) -> View {
        View::create(session, Self, params)
    }

    /// The current color.
    #[must_use]
    pub fn value(view: &View) -> Color {
        view.get_color("color-picker-value").unwrap_or(Color::BLACK)
    }
}

impl Widget for ColorPicker {
    fn type_name(&self) -> &'static str {
        "ColorPicker"
    }

    fn normalize(&self, tag: &str) -> String {
        match rui_core::properties::normalize(tag).as_str() {
            "value" | "color" => "color-picker-value".to_string(),
            other => other.to_string(),
        }
    }

    fn event_arity(&self, tag: &str) -> Option<usize> {
        (tag == "color-changed").then_some(2)
    }

    fn set(&self, view: &View, tag: &str, value: Value) -> Result<Vec<String>, PropertyError> {
        if tag == "color-picker-value" {
            crate::set_with_event(view, tag, value, "color-changed", ColorPicker::value)
        } else {
            view.base_set(tag, value)
        }
    }

    fn changed(&self, view: &View, tag: &str) {
        if tag == "color-picker-value" {
            set_input_value(view, &ColorPicker::value(view).rgb_hex());
        } else {
            view.base_changed(tag);
        }
    }

    fn html_tag(&self, _view: &View) -> String {
        "input".to_string()
    }

    fn html_properties(&self, view: &View, buffer: &mut String) {
        write_attribute(buffer, "type", "color");
        write_attribute(buffer, "value", &ColorPicker::value(view).rgb_hex());
        buffer.push_str(" oninput=\"editViewInputEvent(this)\"");
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
        let text = data.text("text").unwrap_or_default();
        let color = match text.parse::<Color>() {
            Ok(color) => color.with_alpha(0xFF),
            Err(error) => {
                tracing::warn!(view = view.html_id(), text, %error, "invalid color from the page");
                return true;
            }
        };
        let old = ColorPicker::value(view);
        if color != old {
            crate::store_from_page(
                view,
                "color-picker-value",
                Some(Value::Color(color)),
                "color-changed",
                &[&color as &dyn Any, &old as &dyn Any],
            );
        }
        true
    }
}
