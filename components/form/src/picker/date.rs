use core::any::Any;

use rui_core::value::datetime::{format_date, format_time, parse_date, parse_time};
use rui_core::value::{Date, Time};
use rui_core::{DataObject, Params, PropertyError, PropertyKind, Session, Value, View, Widget};

use super::{set_input_value, update_attribute};
use crate::write_attribute;

fn prefixed(tag: &str, prefix: &str) -> String {
    let tag = rui_core::properties::normalize(tag);
    match tag.as_str() {
        "min" | "max" | "step" | "value" => format!("{prefix}-{tag}"),
        _ => tag,
    }
}

fn bound_kind(tag: &str, prefix: &str, kind: PropertyKind) -> Option<PropertyKind> {
    let name = tag.strip_prefix(prefix)?.strip_prefix('-')?;
    match name {
        "min" | "max" | "value" => Some(kind),
        "step" => Some(PropertyKind::Int),
        _ => None,
    }
}

fn write_bounds(view: &View, buffer: &mut String, prefix: &str, format: impl Fn(&Value) -> Option<String>) {
    for name in ["min", "max", "step", "value"] {
        let text = match view.get(&format!("{prefix}-{name}")) {
            Some(Value::Int(step)) => Some(step.to_string()),
            Some(value) => format(&value),
            None => None,
        };
        if let Some(text) = text {
            write_attribute(buffer, name, &text);
        }
    }
}

fn changed_bound(view: &View, tag: &str, prefix: &str, format: impl Fn(&Value) -> Option<String>) -> bool {
    let Some(name) = tag.strip_prefix(prefix).and_then(|rest| rest.strip_prefix('-')) else {
        return false;
    };
    let text = match view.get(tag) {
        Some(Value::Int(step)) => Some(step.to_string()),
        Some(value) => format(&value),
        None => None,
    };
    match name {
        "value" => set_input_value(view, &text.unwrap_or_default()),
        "min" | "max" | "step" => update_attribute(view, name, text),
        _ => return false,
    }
    true
}

fn date_text(value: &Value) -> Option<String> {
    match value {
        Value::Date(date) => Some(format_date(*date)),
        _ => None,
    }
}

fn time_text(value: &Value) -> Option<String> {
    match value {
        Value::Time(time) => Some(format_time(*time)),
        _ => None,
    }
}

/// A date input with optional bounds; `date-changed` reports `Option<Date>` pairs.
#[derive(Debug, Default)]
pub struct DatePicker;

impl DatePicker {
    /// Creates a date picker.
    pub fn create(session: &Session, params: Params) -> View {
        View::create(session, Self, params)
    }

    /// The selected date.
    #[must_use]
    pub fn value(view: &View) -> Option<Date> {
        match view.get("date-picker-value") {
            Some(Value::Date(date)) => Some(date),
            _ => None,
        }
    }
}

impl Widget for DatePicker {
    fn type_name(&self) -> &'static str {
        "DatePicker"
    }

    fn normalize(&self, tag: &str) -> String {
        prefixed(tag, "date-picker")
    }

    fn property_kind(&self, tag: &str) -> Option<PropertyKind> {
        bound_kind(tag, "date-picker", PropertyKind::Date)
    }

    fn event_arity(&self, tag: &str) -> Option<usize> {
        (tag == "date-changed").then_some(2)
    }

    fn set(&self, view: &View, tag: &str, value: Value) -> Result<Vec<String>, PropertyError> {
        if tag == "date-picker-value" {
            crate::set_with_event(view, tag, value, "date-changed", DatePicker::value)
        } else {
            view.base_set(tag, value)
        }
    }

    fn changed(&self, view: &View, tag: &str) {
        if !changed_bound(view, tag, "date-picker", date_text) {
            view.base_changed(tag);
        }
    }

    fn html_tag(&self, _view: &View) -> String {
        "input".to_string()
    }

    fn html_properties(&self, view: &View, buffer: &mut String) {
        write_attribute(buffer, "type", "date");
        write_bounds(view, buffer, "date-picker", date_text);
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
        let date = match parse_date(text) {
            Ok(date) => Some(date),
            Err(_) if text.trim().is_empty() => None,
            Err(error) => {
                tracing::warn!(view = view.html_id(), %error, "invalid date from the page");
                return true;
            }
        };
        let old = DatePicker::value(view);
        if date != old {
            crate::store_from_page(
                view,
                "date-picker-value",
                date.map(Value::Date),
                "date-changed",
                &[&date as &dyn Any, &old as &dyn Any],
            );
        }
        true
    }
}

/// A time-of-day input; `time-changed` reports `Option<Time>` pairs.
///
/// `time-picker-step` is in seconds.
#[derive(Debug, Default)]
pub struct TimePicker;

impl TimePicker {
    /// Creates a time picker.
    pub fn create(session: &Session, params: Params) -> View {
        View::create(session, Self, params)
    }

    /// The selected time.
    #[must_use]
    pub fn value(view: &View) -> Option<Time> {
        match view.get("time-picker-value") {
            Some(Value::Time(time)) => Some(time),
            _ => None,
        }
    }
}

impl Widget for TimePicker {
    fn type_name(&self) -> &'static str {
        "TimePicker"
    }

    fn normalize(&self, tag: &str) -> String {
        prefixed(tag, "time-picker")
    }

    fn property_kind(&self, tag: &str) -> Option<PropertyKind> {
        bound_kind(tag, "time-picker", PropertyKind::Time)
    }

    fn event_arity(&self, tag: &str) -> Option<usize> {
        (tag == "time-changed").then_some(2)
    }

    fn set(&self, view: &View, tag: &str, value: Value) -> Result<Vec<String>, PropertyError> {
        if tag == "time-picker-value" {
            crate::set_with_event(view, tag, value, "time-changed", TimePicker::value)
        } else {
            view.base_set(tag, value)
        }
    }

    fn changed(&self, view: &View, tag: &str) {
        if !changed_bound(view, tag, "time-picker", time_text) {
            view.base_changed(tag);
        }
    }

    fn html_tag(&self, _view: &View) -> String {
        "input".to_string()
    }

    fn html_properties(&self, view: &View, buffer: &mut String) {
        write_attribute(buffer, "type", "time");
        write_bounds(view, buffer, "time-picker", time_text);
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
        let time = match parse_time(text) {
            Ok(time) => Some(time),
            Err(_) if text.trim().is_empty() => None,
            Err(error) => {
                tracing::warn!(view = view.html_id(), %error, "invalid time from the page");
                return true;
            }
        };
        let old = TimePicker::value(view);
        if time != old {
            crate::store_from_page(
                view,
                "time-picker-value",
                time.map(Value::Time),
                "time-changed",
                &[&time as &dyn Any, &old as &dyn Any],
            );
        }
        true
    }
}
