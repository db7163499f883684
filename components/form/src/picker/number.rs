use core::any::Any;

use rui_core::value::format_number;
use rui_core::{DataObject, Params, PropertyError, Session, Value, View, Widget};

use super::{set_input_value, update_attribute};
use crate::write_attribute;

const SLIDER: i64 = 1;

/// A number input, shown as an editor or as a slider.
///
/// A slider ranges over `0..=1` unless `number-picker-min` and
/// `number-picker-max` say otherwise.
#[derive(Debug, Default)]
pub struct NumberPicker;

impl NumberPicker {
    /// Creates a number picker.
    pub fn create(session: &Session, params: Params) -> View {
        View::create(session, Self, params)
    }

    /// The current value, `0` when unset.
    #[must_use]
    pub fn value(view: &View) -> f64 {
        view.get_float("number-picker-value").unwrap_or(0.0)
    }

    /// The smallest value, if bounded.
    #[must_use]
    pub fn min(view: &View) -> Option<f64> {
        view.get_float("number-picker-min")
    }

    /// The largest value, if bounded.
    #[must_use]
    pub fn max(view: &View) -> Option<f64> {
        view.get_float("number-picker-max")
    }

    // reads the stored type; `get` falls back through here
    fn is_slider(view: &View) -> bool {
        matches!(view.base_get("number-picker-type"), Some(Value::Int(SLIDER)))
    }
}

impl Widget for NumberPicker {
    fn type_name(&self) -> &'static str {
        "NumberPicker"
    }

    fn normalize(&self, tag: &str) -> String {
        let tag = rui_core::properties::normalize(tag);
        match tag.as_str() {
            "type" | "min" | "max" | "step" | "value" | "precision" => format!("number-picker-{tag}"),
            _ => tag,
        }
    }

    fn event_arity(&self, tag: &str) -> Option<usize> {
        (tag == "number-changed").then_some(2)
    }

    fn set(&self, view: &View, tag: &str, value: Value) -> Result<Vec<String>, PropertyError> {
        if tag == "number-picker-value" {
            crate::set_with_event(view, tag, value, "number-changed", NumberPicker::value)
        } else {
            view.base_set(tag, value)
        }
    }

    fn get(&self, view: &View, tag: &str) -> Option<Value> {
        let value = view.base_get(tag);
        let default = match tag {
            "number-picker-min" => 0.0,
            "number-picker-max" => 1.0,
            _ => return value,
        };
        if value.is_none() && NumberPicker::is_slider(view) {
            Some(Value::Float(default))
        } else {
            value
        }
    }

    fn changed(&self, view: &View, tag: &str) {
        let number = |tag: &str| view.get_float(tag).map(format_number);
        match tag {
            "number-picker-value" => set_input_value(view, &format_number(NumberPicker::value(view))),
            "number-picker-min" => update_attribute(view, "min", number(tag)),
            "number-picker-max" => update_attribute(view, "max", number(tag)),
            "number-picker-step" => update_attribute(view, "step", number(tag)),
            "number-picker-type" => {
                let kind = if NumberPicker::is_slider(view) { "range" } else { "number" };
                update_attribute(view, "type", Some(kind.to_string()));
                update_attribute(view, "min", number("number-picker-min"));
                update_attribute(view, "max", number("number-picker-max"));
            }
            _ => view.base_changed(tag),
        }
    }

    fn html_tag(&self, _view: &View) -> String {
        "input".to_string()
    }

    fn html_properties(&self, view: &View, buffer: &mut String) {
        let kind = if NumberPicker::is_slider(view) { "range" } else { "number" };
        write_attribute(buffer, "type", kind);
        for (tag, name) in [
            ("number-picker-min", "min"),
            ("number-picker-max", "max"),
            ("number-picker-step", "step"),
        ] {
            if let Some(value) = view.get_float(tag) {
                write_attribute(buffer, name, &format_number(value));
            }
        }
        write_attribute(buffer, "value", &format_number(NumberPicker::value(view)));
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
        let Some(number) = data.float("text") else {
            tracing::warn!(view = view.html_id(), text = data.text("text"), "invalid number from the page");
            return true;
        };
        let old = NumberPicker::value(view);
        if number != old {
            crate::store_from_page(
                view,
                "number-picker-value",
                Some(Value::Float(number)),
                "number-changed",
                &[&number as &dyn Any, &old as &dyn Any],
            );
        }
        true
    }
}
