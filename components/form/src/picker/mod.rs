//! Value pickers built on the browser's typed `<input>` elements.

mod color;
mod date;
mod file;
mod number;

pub use color::ColorPicker;
pub use date::{DatePicker, TimePicker};
pub use file::{FileInfo, FilePicker};
pub use number::NumberPicker;

use rui_core::bridge::JsArg;
use rui_core::View;

/// Sets or removes an attribute of a created element.
pub(crate) fn update_attribute(view: &View, name: &str, value: Option<String>) {
    if !view.updates_enabled() {
        return;
    }
    let bridge = view.session().bridge();
    match value {
        Some(value) => bridge.update_property(view.html_id(), name, &JsArg::from(value)),
        None => bridge.remove_property(view.html_id(), name),
    }
}

/// Sends a value to the input element.
pub(crate) fn set_input_value(view: &View, value: &str) {
    if view.updates_enabled() {
        view.session()
            .bridge()
            .call_func("setInputValue", &rui_core::js_args![view.html_id(), value]);
    }
}
