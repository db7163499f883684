//! Input views of RUI.
//!
//! Every input owns one typed value and reports changes with a two-argument
//! event carrying the new and the old value:
//!
//! | View | Value tag | Event |
//! |---|---|---|
//! | [`EditView`] | `text` | `edit-text-changed` |
//! | [`NumberPicker`] | `number-picker-value` | `number-changed` |
//! | [`ColorPicker`] | `color-picker-value` | `color-changed` |
//! | [`DatePicker`] | `date-picker-value` | `date-changed` |
//! | [`TimePicker`] | `time-picker-value` | `time-changed` |
//! | [`DropDownList`] | `current` | `drop-down-event` |
//!
//! [`FilePicker`] reports the selected files with `file-selected-event`.
//!
//! A value typed in the page is stored without echoing a DOM update back,
//! then the event and the change listeners of the tag run. A value written by
//! the application updates the element and runs the same callbacks.

use core::any::Any;

use rui_core::{PropertyError, Value, View};

mod dropdown;
mod edit;
pub mod picker;

pub use dropdown::DropDownList;
pub use edit::EditView;
pub use picker::{ColorPicker, DatePicker, FileInfo, FilePicker, NumberPicker, TimePicker};

/// Stores a value sent by the page, then fires `event` and the change listeners.
pub(crate) fn store_from_page(view: &View, tag: &str, value: Option<Value>, event: &str, args: &[&dyn Any]) {
    let changed = view.store_raw(tag, value);
    if changed.is_empty() {
        return;
    }
    tracing::debug!(view = view.html_id(), tag, "value changed in the page");
    view.fire(event, args);
    for tag in changed {
        view.fire_change_listeners(&tag);
    }
}

/// Writes a value from the application and fires `event` with the new and old value.
///
/// The DOM update and change listeners run before the event, which fires
/// only when the read value differs.
pub(crate) fn set_with_event<T: PartialEq + 'static>(
    view: &View,
    tag: &str,
    value: Value,
    event: &str,
    read: impl Fn(&View) -> T,
) -> Result<Vec<String>, PropertyError> {
    let old = read(view);
    let changed = view.base_set(tag, value)?;
    if changed.is_empty() {
        return Ok(changed);
    }
    view.notify(&changed);
    let new = read(view);
    if new != old {
        view.fire(event, &[&new as &dyn Any, &old as &dyn Any]);
    }
    Ok(Vec::new())
}

/// Writes `name="value"` with the value escaped.
pub(crate) fn write_attribute(buffer: &mut String, name: &str, value: &str) {
    buffer.push(' ');
    buffer.push_str(name);
    buffer.push_str("=\"");
    buffer.push_str(&rui_core::view::escape_html(value));
    buffer.push('"');
}

#[cfg(test)]
mod tests;
