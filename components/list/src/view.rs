use core::any::Any;
use core::cell::RefCell;
use core::fmt::Write;
use std::rc::Rc;

use rui_core::bridge::JsArg;
use rui_core::value::Handle;
use rui_core::view::escape_html;
use rui_core::{DataObject, Params, PropertyError, PropertyKind, Session, Value, View, Widget};

use crate::adapter::{ListAdapter, TextListAdapter, ViewListAdapter};

const ITEMS: &str = "items";
const FOCUSED: &str = "ruiListItemFocused";
const BLURRED: &str = "ruiListItemSelected";

/// Wraps an adapter for the `items` property.
pub fn items(adapter: impl ListAdapter + 'static) -> Value {
    Value::Handle(Handle::new(Rc::new(adapter) as Rc<dyn ListAdapter>))
}

impl From<TextListAdapter> for Value {
    fn from(adapter: TextListAdapter) -> Self {
        items(adapter)
    }
}

impl From<ViewListAdapter> for Value {
    fn from(adapter: ViewListAdapter) -> Self {
        items(adapter)
    }
}

/// A selectable list of items drawn from a [`ListAdapter`].
///
/// Items are laid out along `orientation` and wrap with `list-wrap`; each one
/// sits in an element with the html id `<list id>-<index>`. `current` is the
/// selected index, `-1` when nothing is selected. The runtime reports
/// keyboard selection with `itemSelected` and `itemUnselected` and clicks
/// with `itemClick`; listeners of `list-item-selected` and
/// `list-item-clicked` receive the index as `i64`.
#[derive(Debug, Default)]
pub struct ListView {
    item_views: RefCell<Vec<View>>,
}

impl ListView {
    /// Creates a list view.
    pub fn create(session: &Session, params: Params) -> View {
        View::create(session, Self::default(), params)
    }

    /// The item adapter.
    #[must_use]
    pub fn adapter(view: &View) -> Option<Rc<dyn ListAdapter>> {
        match view.get_raw(ITEMS) {
            Some(Value::Handle(handle)) => handle.downcast_ref::<Rc<dyn ListAdapter>>().cloned(),
            _ => None,
        }
    }

    /// The selected index, `-1` when nothing is selected.
    #[must_use]
    pub fn current(view: &View) -> i64 {
        view.get_int("current").unwrap_or(-1)
    }

    /// Re-renders the items after the adapter's data changed.
    pub fn reload(view: &View) {
        view.update_inner_html();
    }
}

fn current_style(view: &View) -> String {
    view.get_text("current-style").unwrap_or_else(|| FOCUSED.to_string())
}

fn blurred_style(view: &View) -> String {
    view.get_text("current-inactive-style")
        .unwrap_or_else(|| BLURRED.to_string())
}

fn item_id(view: &View, index: i64) -> String {
    format!("{}-{index}", view.html_id())
}

fn is_enabled(view: &View, index: i64) -> bool {
    let Some(adapter) = ListView::adapter(view) else {
        return false;
    };
    usize::try_from(index).is_ok_and(|index| index < adapter.count() && adapter.is_enabled(index))
}

fn items_value(view: &View, value: Value) -> Result<Option<Value>, PropertyError> {
    match value {
        Value::Handle(handle) if handle.downcast_ref::<Rc<dyn ListAdapter>>().is_some() => {
            Ok(Some(Value::Handle(handle)))
        }
        Value::Handle(_) => Err(PropertyError::incompatible(ITEMS, value.kind())),
        Value::Texts(texts) if texts.is_empty() => Ok(None),
        Value::Texts(texts) => Ok(Some(items(TextListAdapter::new(texts)))),
        Value::List(list) if list.iter().all(|item| matches!(item, Value::Text(_))) => {
            let texts = list.into_iter().filter_map(|item| item.as_text().map(str::to_string)).collect();
            items_value(view, Value::Texts(texts))
        }
        other => {
            let views = rui_layout::container::content_views(view, other)?;
            Ok((!views.is_empty()).then(|| items(ViewListAdapter::new(views))))
        }
    }
}

fn write_flex_style(view: &View, buffer: &mut String) {
    buffer.push_str("<div style=\"align-content: stretch;");
    for (name, value) in rui_layout::flex_declarations(view) {
        let _ = write!(buffer, " {name}: {value};");
    }
    for (tag, name) in [("list-row-gap", "row-gap"), ("list-column-gap", "column-gap")] {
        if let Some(gap) = view.get_size(tag).filter(|gap| !gap.is_auto()) {
            let _ = write!(buffer, " {name}: {};", gap.css("0"));
        }
    }
    buffer.push_str("\">");
}

fn item_style(view: &View) -> String {
    let mut style = String::from("max-width: 100%; max-height: 100%; display: grid;");
    for (tag, name) in [("item-width", "width"), ("item-height", "height")] {
        if let Some(size) = view.get_size(tag).filter(|size| !size.is_auto()) {
            let _ = write!(style, " {name}: {};", size.css("auto"));
        }
    }
    style
}

impl Widget for ListView {
    fn type_name(&self) -> &'static str {
        "ListView"
    }

    fn normalize(&self, tag: &str) -> String {
        match rui_core::properties::normalize(tag).as_str() {
            "content" => ITEMS.to_string(),
            "wrap" => "list-wrap".to_string(),
            "row-gap" => "list-row-gap".to_string(),
            "column-gap" => "list-column-gap".to_string(),
            other => other.to_string(),
        }
    }

    fn property_kind(&self, tag: &str) -> Option<PropertyKind> {
        match tag {
            "current" => Some(PropertyKind::Int),
            "gap" => Some(PropertyKind::Size),
            "current-style" | "current-inactive-style" => Some(PropertyKind::Text),
            _ => None,
        }
    }

    fn event_arity(&self, tag: &str) -> Option<usize> {
        matches!(tag, "list-item-clicked" | "list-item-selected").then_some(1)
    }

    fn set(&self, view: &View, tag: &str, value: Value) -> Result<Vec<String>, PropertyError> {
        match tag {
            ITEMS => {
                let stored = items_value(view, value)?;
                Ok(view.store_raw(ITEMS, stored))
            }
            "gap" => {
                let mut changed = view.base_set("list-row-gap", value.clone())?;
                changed.extend(view.base_set("list-column-gap", value)?);
                Ok(changed)
            }
            "current" => {
                let index = value
                    .as_int()
                    .or_else(|| value.as_text().and_then(|text| text.trim().parse().ok()))
                    .ok_or_else(|| PropertyError::incompatible(tag, value.kind()))?;
                Ok(view.store_raw(tag, (index >= 0).then_some(Value::Int(index))))
            }
            _ => view.base_set(tag, value),
        }
    }

    fn remove(&self, view: &View, tag: &str) -> Vec<String> {
        if tag == "gap" {
            let mut changed = view.base_remove("list-row-gap");
            changed.extend(view.base_remove("list-column-gap"));
            return changed;
        }
        view.base_remove(tag)
    }

    fn get(&self, view: &View, tag: &str) -> Option<Value> {
        match tag {
            "gap" => view.base_get("list-row-gap"),
            _ => view.base_get(tag),
        }
    }

    fn changed(&self, view: &View, tag: &str) {
        match tag {
            "current" => {
                let current = ListView::current(view);
                if view.updates_enabled() {
                    let bridge = view.session().bridge();
                    if current >= 0 {
                        bridge.update_property(view.html_id(), "data-current", &JsArg::from(item_id(view, current)));
                    } else {
                        bridge.remove_property(view.html_id(), "data-current");
                    }
                }
                view.update_inner_html();
                view.fire("list-item-selected", &[&current as &dyn Any]);
            }
            ITEMS | "orientation" | "list-wrap" | "list-row-gap" | "list-column-gap" | "vertical-align"
            | "horizontal-align" | "item-width" | "item-height" => view.update_inner_html(),
            "current-style" if view.updates_enabled() => {
                view.session().bridge().update_property(
                    view.html_id(),
                    "data-focusitemstyle",
                    &JsArg::from(current_style(view)),
                );
                view.update_inner_html();
            }
            "current-inactive-style" if view.updates_enabled() => {
                view.session().bridge().update_property(
                    view.html_id(),
                    "data-bluritemstyle",
                    &JsArg::from(blurred_style(view)),
                );
                view.update_inner_html();
            }
            "current-style" | "current-inactive-style" => {}
            _ => view.base_changed(tag),
        }
    }

    fn html_properties(&self, view: &View, buffer: &mut String) {
        let _ = write!(
            buffer,
            " tabindex=\"{}\" onfocus=\"listViewFocusEvent(this, event)\" onblur=\"listViewBlurEvent(this, event)\" \
             onkeydown=\"listViewKeyDownEvent(this, event)\" data-focusitemstyle=\"{}\" data-bluritemstyle=\"{}\"",
            view.get_int("tab-index").unwrap_or(0),
            escape_html(&current_style(view)),
            escape_html(&blurred_style(view))
        );
        let current = ListView::current(view);
        if current >= 0 {
            let _ = write!(buffer, " data-current=\"{}\"", item_id(view, current));
        }
    }

    fn html_subviews(&self, view: &View, buffer: &mut String) {
        self.item_views.borrow_mut().clear();
        let Some(adapter) = ListView::adapter(view) else {
            return;
        };

        let session = view.session();
        let held = !session.ignore_view_updates();
        if held {
            session.set_ignore_view_updates(true);
        }

        let current = ListView::current(view);
        let current_class = if view.has_focus() { current_style(view) } else { blurred_style(view) };
        let style = item_style(view);

        write_flex_style(view, buffer);
        for index in 0..adapter.count() {
            let Some(item) = adapter.item(index, session) else {
                tracing::warn!(view = view.html_id(), index, "list adapter returned no item");
                continue;
            };
            let number = i64::try_from(index).unwrap_or(i64::MAX);
            let _ = write!(buffer, "<div id=\"{}\" class=\"ruiListItem", item_id(view, number));
            if number == current {
                let _ = write!(buffer, " {}", escape_html(&current_class));
            }
            let _ = write!(buffer, "\" style=\"{style}\" onclick=\"listItemClickEvent(this, event)\"");
            if !adapter.is_enabled(index) {
                buffer.push_str(" data-disabled=\"1\"");
            }
            buffer.push('>');
            item.set_parent(Some(view));
            item.write_html(buffer);
            buffer.push_str("</div>");
            self.item_views.borrow_mut().push(item);
        }
        buffer.push_str("</div>");

        if held {
            session.set_ignore_view_updates(false);
        }
    }

    fn subviews(&self, _view: &View) -> Vec<View> {
        self.item_views.borrow().clone()
    }

    fn handle_command(&self, view: &View, command: &str, data: &DataObject) -> bool {
        let current = ListView::current(view);
        let select = |number: i64| {
            let stored = (number >= 0).then_some(Value::Int(number));
            let changed = view.store_raw("current", stored);
            view.fire("list-item-selected", &[&number as &dyn Any]);
            for tag in changed {
                view.fire_change_listeners(&tag);
            }
        };
        match command {
            "itemSelected" => match data.int("number") {
                Some(number) if number != current && is_enabled(view, number) => select(number),
                Some(_) => {}
                None => tracing::warn!(view = view.html_id(), "itemSelected without a number"),
            },
            "itemUnselected" => {
                if current >= 0 {
                    select(-1);
                }
            }
            "itemClick" => match data.int("number") {
                Some(number) if is_enabled(view, number) => {
                    if number != current {
                        select(number);
                    }
                    view.fire("list-item-clicked", &[&number as &dyn Any]);
                }
                Some(_) => {}
                None => tracing::warn!(view = view.html_id(), "itemClick without a number"),
            },
            _ => return view.base_handle_command(command, data),
        }
        true
    }
}
