use core::any::Any;
use core::fmt::Write;

use rui_core::view::escape_html;
use rui_core::{DataObject, Params, PropertyError, PropertyKind, Session, Value, View, Widget, js_args};

/// A list of text items of which one is selected.
///
/// `current` is the selected index, `-1` for none. Items listed in
/// `disabled-items` are shown but cannot be selected.
#[derive(Debug, Default)]
pub struct DropDownList;

impl DropDownList {
    /// Creates a drop-down list.
    pub fn create(session: &Session, params: Params) -> View {
        View::create(session, Self, params)
    }

    /// The items.
    #[must_use]
    pub fn items(view: &View) -> Vec<String> {
        match view.get("items") {
            Some(Value::Texts(items)) => items,
            _ => Vec::new(),
        }
    }

    /// Indices of the disabled items.
    #[must_use]
    pub fn disabled_items(view: &View) -> Vec<i64> {
        match view.get("disabled-items") {
            Some(Value::Ints(items)) => items,
            _ => Vec::new(),
        }
    }

    /// The selected index.
    #[must_use]
    pub fn current(view: &View) -> i64 {
        view.get_int("current").unwrap_or(0)
    }
}

fn indices(tag: &str, value: Value) -> Result<Option<Value>, PropertyError> {
    let items = match value {
        Value::Ints(items) => items,
        Value::Int(item) => vec![item],
        Value::Text(text) if text.trim().is_empty() => Vec::new(),
        Value::Text(text) => text
            .split(',')
            .map(|part| part.trim().parse::<i64>())
            .collect::<Result<_, _>>()
            .map_err(|_| PropertyError::parse(tag, text))?,
        Value::List(items) => items
            .iter()
            .map(|item| item.as_int().ok_or_else(|| PropertyError::incompatible(tag, item.kind())))
            .collect::<Result<_, _>>()?,
        other => return Err(PropertyError::incompatible(tag, other.kind())),
    };
    Ok((!items.is_empty()).then_some(Value::Ints(items)))
}

impl Widget for DropDownList {
    fn type_name(&self) -> &'static str {
        "DropDownList"
    }

    fn property_kind(&self, tag: &str) -> Option<PropertyKind> {
        match tag {
            "items" => Some(PropertyKind::Texts),
            "current" => Some(PropertyKind::Int),
            _ => None,
        }
    }

    fn event_arity(&self, tag: &str) -> Option<usize> {
        (tag == "drop-down-event").then_some(2)
    }

    fn set(&self, view: &View, tag: &str, value: Value) -> Result<Vec<String>, PropertyError> {
        match tag {
            "current" => crate::set_with_event(view, tag, value, "drop-down-event", DropDownList::current),
            "disabled-items" => Ok(view.store_raw(tag, indices(tag, value)?)),
            _ => view.base_set(tag, value),
        }
    }

    fn changed(&self, view: &View, tag: &str) {
        match tag {
            "items" | "disabled-items" => view.update_inner_html(),
            "current" if view.updates_enabled() => {
                view.session().bridge().call_func(
                    "selectDropDownListItem",
                    &js_args![view.html_id(), DropDownList::current(view)],
                );
            }
            "current" => {}
            _ => view.base_changed(tag),
        }
    }

    fn html_tag(&self, _view: &View) -> String {
        "select".to_string()
    }

    fn html_properties(&self, _view: &View, buffer: &mut String) {
        buffer.push_str(" size=\"1\" onchange=\"dropDownListEvent(this, event)\"");
    }

    fn html_subviews(&self, view: &View, buffer: &mut String) {
        let current = DropDownList::current(view);
        let disabled = DropDownList::disabled_items(view);
        let session = view.session();
        for (index, item) in (0_i64..).zip(DropDownList::items(view)) {
            let _ = write!(buffer, "<option value=\"{index}\"");
            if index == current {
                buffer.push_str(" selected");
            }
            if disabled.contains(&index) {
                buffer.push_str(" disabled");
            }
            let _ = write!(buffer, ">{}</option>", escape_html(&session.translate(&item)));
        }
    }

    fn html_disabled(&self) -> bool {
        true
    }

    fn focusable(&self) -> bool {
        true
    }

    fn handle_command(&self, view: &View, command: &str, data: &DataObject) -> bool {
        if command != "itemSelected" {
            return view.base_handle_command(command, data);
        }
        let Some(number) = data.int("number") else {
            tracing::warn!(view = view.html_id(), "itemSelected without a number");
            return true;
        };
        let count = i64::try_from(DropDownList::items(view).len()).unwrap_or(i64::MAX);
        if !(-1..count).contains(&number) {
            tracing::warn!(view = view.html_id(), number, "selected item out of range");
            return true;
        }
        let old = DropDownList::current(view);
        if number != old {
            crate::store_from_page(
                view,
                "current",
                Some(Value::Int(number)),
                "drop-down-event",
                &[&number as &dyn Any, &old as &dyn Any],
            );
        }
        true
    }
}
