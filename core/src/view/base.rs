//! Default behavior of the widget hooks.

use core::any::Any;

use super::View;
use crate::bridge::JsArg;
use crate::data::DataObject;
use crate::error::PropertyError;
use crate::event::kinds::{self, EventFamily};
use crate::event::{EventListeners, Frame, KeyEvent, MouseEvent, PointerEvent, TouchEvent};
use crate::properties::{self, PropertyKind, tables};
use crate::value::{Size, Value};

const UNSTYLED: &[&str] = &["id", "style", "style-disabled", "disabled", "binding"];

impl View {
    /// Kind of a canonical tag for this view: the widget's table, then the general one.
    #[must_use]
    pub fn kind_of(&self, tag: &str) -> Option<PropertyKind> {
        self.widget_hooks()
            .property_kind(tag)
            .or_else(|| tables::kind(tag))
    }

    fn event_arity(&self, tag: &str) -> Option<usize> {
        self.widget_hooks()
            .event_arity(tag)
            .or_else(|| kinds::view_event_arity(tag))
    }

    /// Base [`super::Widget::set`]: coerces by the view's kinds and stores.
    ///
    /// # Errors
    ///
    /// Rejects unknown tags and incompatible values; the map is unchanged then.
    pub fn base_set(&self, tag: &str, value: Value) -> Result<Vec<String>, PropertyError> {
        match tag {
            "binding" => {
                let value = match value {
                    Value::Binding(_) => Some(value),
                    Value::Text(text) if text.trim().is_empty() => None,
                    other => return Err(PropertyError::incompatible(tag, other.kind())),
                };
                return Ok(self.store_raw(tag, value));
            }
            "animation" => return self.set_animations(value),
            "transition" => {
                let value = match value {
                    Value::Transitions(transitions) if transitions.is_empty() => None,
                    Value::Transitions(_) => Some(value),
                    Value::Text(text) if text.trim().is_empty() => None,
                    other => return Err(PropertyError::incompatible(tag, other.kind())),
                };
                return Ok(self.store_raw(tag, value));
            }
            "disabled" => {
                let value = properties::coerce_tag(tag, value, Some(PropertyKind::Bool))?;
                let changed = self.store_raw(tag, value.clone());
                for child in self.subviews() {
                    match &value {
                        Some(value) => {
                            child.set(tag, value.clone());
                        }
                        None => child.remove(tag),
                    }
                }
                return Ok(changed);
            }
            _ => {}
        }

        if let Some(arity) = self.event_arity(tag) {
            let value = match value {
                Value::Text(text) if text.trim().is_empty() => None,
                value => {
                    let listeners = EventListeners::from_value(tag, value, arity)?;
                    (!listeners.is_empty()).then_some(Value::Listeners(listeners))
                }
            };
            return Ok(self.store_raw(tag, value));
        }

        let value = properties::coerce_tag(tag, value, self.kind_of(tag))?;
        Ok(self.store_raw(tag, value))
    }

    /// Base [`super::Widget::remove`].
    pub fn base_remove(&self, tag: &str) -> Vec<String> {
        self.base_set(tag, Value::Text(String::new()))
            .unwrap_or_else(|_| self.store_raw(tag, None))
    }

    pub(crate) fn resolver(&self) -> impl Fn(&str, &str) -> Option<Value> + '_ {
        move |tag: &str, name: &str| {
            self.session()
                .resolve_constant(tag, name, self.kind_of(tag))
        }
    }

    fn style_names(&self) -> Vec<String> {
        let resolve = self.resolver();
        let own = |tag: &str| {
            self.data()
                .properties
                .lookup(tag, &resolve)
                .and_then(|value| value.as_text().map(str::to_string))
                .filter(|name| !name.is_empty())
        };
        let mut names = Vec::with_capacity(2);
        if self.is_disabled() {
            names.extend(own("style-disabled"));
        }
        names.extend(own("style"));
        names
    }

    /// Value of a tag from the map or the style sheets, without inheritance or defaults.
    #[must_use]
    pub fn styled_value(&self, tag: &str) -> Option<Value> {
        let resolve = self.resolver();
        let direct = self.data().properties.lookup(tag, &resolve);
        if direct.is_some() || UNSTYLED.contains(&tag) || self.event_arity(tag).is_some() {
            return direct;
        }
        self.style_names()
            .iter()
            .find_map(|style| self.session().style_value(style, tag, &resolve))
    }

    /// The whole-family value of a family tag, from the map or else the style sheets.
    #[must_use]
    pub fn family_value(&self, tag: &str) -> Option<Value> {
        let resolve = self.resolver();
        let own = self.data().properties.family_value(tag, &resolve);
        own.or_else(|| {
            self.style_names()
                .iter()
                .find_map(|style| self.session().style_family_value(style, tag, &resolve))
        })
    }

    /// Base [`super::Widget::get`]: the map, the style sheets, the parent chain
    /// for inherited tags, then the hard default.
    #[must_use]
    pub fn base_get(&self, tag: &str) -> Option<Value> {
        if let Some(value) = self.styled_value(tag) {
            return Some(value);
        }
        if tables::is_inherited(tag) {
            if let Some(parent) = self.parent() {
                return parent.get(tag);
            }
        }
        tables::default_value(tag)
    }

    /// CSS declarations of a tag for this view, `None` when it has no CSS.
    ///
    /// Family tags yield the declarations of the whole family, transform tags
    /// those of the whole transform group.
    #[must_use]
    pub fn tag_declarations(&self, tag: &str) -> Option<Vec<(&'static str, String)>> {
        if let Some(root) = properties::family_root(tag) {
            return Some(properties::family_declarations(
                root,
                self.family_value(root).as_ref(),
            ));
        }
        if super::transform::is_transform_tag(tag) {
            return Some(super::transform::declarations(&|name| self.styled_value(name)));
        }
        super::css::declarations(tag, self.styled_value(tag).as_ref())
    }

    /// Sends CSS declarations, batched when there are several.
    pub fn update_css(&self, declarations: &[(&str, String)]) {
        let bridge = self.session().bridge();
        let id = self.html_id();
        let batch = declarations.len() > 1 && bridge.start_update_script(id);
        for (name, value) in declarations {
            bridge.update_css_property(id, name, value);
        }
        if batch {
            bridge.finish_update_script(id);
        }
    }

    /// Returns `true` when DOM updates of the view are to be emitted.
    #[must_use]
    pub fn updates_enabled(&self) -> bool {
        self.is_created() && !self.session().ignore_view_updates()
    }

    /// The `tabindex` of the view when enabled.
    #[must_use]
    pub fn tab_index(&self) -> Option<i64> {
        self.get_int("tab-index")
            .or_else(|| self.is_focusable().then_some(0))
    }

    fn update_listener_attribute(&self, kind: &kinds::EventKind) {
        let bridge = self.session().bridge();
        let keep = !self.listeners(kind.tag).is_empty()
            || (matches!(kind.family, EventFamily::Focus | EventFamily::Key) && self.is_focusable());
        if keep {
            bridge.update_property(self.html_id(), kind.js_event, &JsArg::from(kind.handler()));
        } else {
            bridge.remove_property(self.html_id(), kind.js_event);
        }
    }

    fn update_disabled(&self) {
        let bridge = self.session().bridge();
        let id = self.html_id();
        let disabled = self.is_disabled();
        let batch = bridge.start_update_script(id);
        bridge.update_property(id, "data-disabled", &JsArg::from(if disabled { "1" } else { "0" }));
        if self.widget_hooks().html_disabled() {
            if disabled {
                bridge.update_property(id, "disabled", &JsArg::from(true));
            } else {
                bridge.remove_property(id, "disabled");
            }
        }
        if let Some(tab_index) = self.tab_index() {
            bridge.update_property(id, "tabindex", &JsArg::from(if disabled { -1 } else { tab_index }));
        }
        bridge.update_property(id, "class", &JsArg::from(self.html_class(disabled)));
        bridge.update_property(id, "style", &JsArg::from(self.inline_style()));
        if batch {
            bridge.finish_update_script(id);
        }
    }

    /// Base [`super::Widget::changed`]: the minimal DOM update of one tag.
    pub fn base_changed(&self, tag: &str) {
        if !self.updates_enabled() {
            return;
        }
        let bridge = self.session().bridge();
        let id = self.html_id();
        match tag {
            "style" | "style-disabled" => {
                let batch = bridge.start_update_script(id);
                bridge.update_property(id, "class", &JsArg::from(self.html_class(self.is_disabled())));
                bridge.update_property(id, "style", &JsArg::from(self.inline_style()));
                if batch {
                    bridge.finish_update_script(id);
                }
            }
            "disabled" => self.update_disabled(),
            "tab-index" | "focusable" => match self.tab_index() {
                Some(index) if !self.is_disabled() => {
                    bridge.update_property(id, "tabindex", &JsArg::from(index));
                }
                Some(_) => bridge.update_property(id, "tabindex", &JsArg::from(-1)),
                None => bridge.remove_property(id, "tabindex"),
            },
            "tooltip" => match self.get_text("tooltip") {
                Some(tooltip) => {
                    let batch = bridge.start_update_script(id);
                    bridge.update_property(id, "data-tooltip", &JsArg::from(tooltip));
                    bridge.update_property(id, "onmouseenter", &JsArg::from("mouseEnterEvent(this, event)"));
                    bridge.update_property(id, "onmouseleave", &JsArg::from("mouseLeaveEvent(this, event)"));
                    if batch {
                        bridge.finish_update_script(id);
                    }
                }
                None => {
                    bridge.remove_property(id, "data-tooltip");
                    bridge.call_func("hideTooltip", &[]);
                }
            },
            _ => {
                if let Some(kind) = kinds::dom_event(tag) {
                    self.update_listener_attribute(kind);
                    return;
                }
                if let Some(declarations) = self.tag_declarations(tag) {
                    if tag == "visibility" && declarations.first().is_some_and(|(_, value)| value == "hidden") {
                        bridge.call_func("hideTooltip", &[]);
                    }
                    self.update_css(&declarations);
                }
            }
        }
    }

    /// Base [`super::Widget::html_tag`]: the element of the `semantics` property.
    #[must_use]
    pub fn base_html_tag(&self) -> String {
        let semantics = self.get_int("semantics").unwrap_or(0);
        tables::enum_spec("semantics")
            .and_then(|spec| spec.css_value(semantics))
            .unwrap_or("div")
            .to_string()
    }

    /// Fires the `resize-event` listeners after the runtime measured the view.
    pub fn handle_resize(&self, frame: Frame, scroll: Frame) {
        let changed = {
            let mut data = self.data_mut();
            data.scroll = scroll;
            let changed = data.frame != frame;
            data.frame = frame;
            changed
        };
        if changed {
            self.widget_hooks().resized(self, frame);
            self.fire("resize-event", &[&frame as &dyn Any]);
        }
    }

    fn handle_key(&self, command: &str, data: &DataObject) {
        let event = KeyEvent::from_data(data);
        if command == "key-down-event"
            && event.is_activation()
            && self.is_focusable()
            && self.listeners("key-down-event").is_empty()
            && !self.listeners("click-event").is_empty()
        {
            let click = MouseEvent {
                time_stamp: event.time_stamp,
                ctrl_key: event.ctrl_key,
                shift_key: event.shift_key,
                alt_key: event.alt_key,
                meta_key: event.meta_key,
                ..MouseEvent::default()
            };
            self.fire("click-event", &[&click as &dyn Any]);
            return;
        }
        self.fire(command, &[&event as &dyn Any]);
    }

    fn set_reported_size(&self, tag: &str, data: &DataObject) {
        let Some(text) = data.text(tag) else {
            return;
        };
        match text.parse::<Size>() {
            Ok(size) => {
                let value = (!size.is_auto()).then_some(Value::Size(size));
                for tag in self.store_raw(tag, value) {
                    self.fire_change_listeners(&tag);
                }
            }
            Err(error) => tracing::warn!(view = self.html_id(), %error, "invalid reported size"),
        }
    }

    /// Base [`super::Widget::handle_command`]: input, focus, transition,
    /// animation, scroll and size messages.
    pub fn base_handle_command(&self, command: &str, data: &DataObject) -> bool {
        if let Some(kind) = kinds::dom_event(command) {
            match kind.family {
                EventFamily::Key => {
                    if !self.is_disabled() {
                        self.handle_key(command, data);
                    }
                }
                EventFamily::Mouse => self.fire(command, &[&MouseEvent::from_data(data) as &dyn Any]),
                EventFamily::Pointer => self.fire(command, &[&PointerEvent::from_data(data) as &dyn Any]),
                EventFamily::Touch => self.fire(command, &[&TouchEvent::from_data(data) as &dyn Any]),
                EventFamily::Focus => {
                    self.data_mut().has_focus = command == "focus-event";
                    self.fire(command, &[]);
                }
                EventFamily::Transition => {
                    let property = data.text("property").unwrap_or_default().to_string();
                    if matches!(command, "transition-end-event" | "transition-cancel-event") {
                        self.transition_finished(&property);
                    }
                    self.fire(command, &[&property as &dyn Any]);
                }
                EventFamily::Animation => {
                    let name = data.text("name").unwrap_or_default().to_string();
                    self.fire(command, &[&name as &dyn Any]);
                }
            }
            return true;
        }
        match command {
            "scroll" => {
                let scroll = Frame::from_data(data);
                self.data_mut().scroll = scroll;
                self.fire("scroll-event", &[&scroll as &dyn Any]);
            }
            "widthChanged" => self.set_reported_size("width", data),
            "heightChanged" => self.set_reported_size("height", data),
            _ => return false,
        }
        true
    }
}
