//! The view tree.
//!
//! A [`View`] is a shared handle to one widget instance: its html id, its
//! property map and the [`Widget`] that specializes the base behavior. The
//! widget hooks default to the `base_*` functions on [`View`], so a widget
//! overrides only the tags it treats specially and delegates the rest.
//!
//! Views hold their [`Session`] strongly; the session and parents hold views
//! weakly, so dropping the application's last handle to a subtree frees it.

mod base;
pub mod css;
mod html;
#[cfg(test)]
mod tests;
mod transform;

use alloc::collections::BTreeMap;
use alloc::rc::{Rc, Weak};
use core::any::Any;
use core::cell::RefCell;
use core::fmt::{self, Debug};

pub use css::CssBuilder;
pub use html::escape_html;

use crate::animation::Animation;
use crate::data::DataObject;
use crate::error::PropertyError;
use crate::event::{BindingTable, EventListeners, Frame, Listener};
use crate::properties::{self, Properties, PropertyKind};
use crate::session::Session;
use crate::value::{Color, Size, Value};

/// Tag/value pairs applied in order when a view is created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Vec<(String, Value)>);

impl Params {
    /// No parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with(mut self, tag: &str, value: impl Into<Value>) -> Self {
        self.0.push((tag.to_string(), value.into()));
        self
    }

    /// Appends a parameter in place.
    pub fn push(&mut self, tag: &str, value: impl Into<Value>) {
        self.0.push((tag.to_string(), value.into()));
    }

    /// Returns `true` when empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the parameters in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(tag, value)| (tag.as_str(), value))
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = alloc::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<const N: usize> From<[(&str, Value); N]> for Params {
    fn from(value: [(&str, Value); N]) -> Self {
        Self(
            value
                .into_iter()
                .map(|(tag, value)| (tag.to_string(), value))
                .collect(),
        )
    }
}

/// The specialization slots of a view.
///
/// Every hook has a default that delegates to the matching `base_*` function
/// of [`View`]. Hooks receive the view they belong to, never hold it.
pub trait Widget: Any {
    /// Type name used in diagnostics and resource files, e.g. `TextView`.
    fn type_name(&self) -> &'static str;

    /// Maps a tag to its canonical form.
    fn normalize(&self, tag: &str) -> String {
        properties::normalize(tag)
    }

    /// Kind of a widget specific tag; `None` falls back to the general tables.
    fn property_kind(&self, _tag: &str) -> Option<PropertyKind> {
        None
    }

    /// Event arity of a widget specific listener tag.
    fn event_arity(&self, _tag: &str) -> Option<usize> {
        None
    }

    /// Stores a value under a canonical tag.
    ///
    /// Returns the tags still to be notified; the caller runs
    /// [`Widget::changed`] and the change listeners for each of them.
    ///
    /// # Errors
    ///
    /// Rejects unknown tags and incompatible values, leaving the map unchanged.
    fn set(&self, view: &View, tag: &str, value: Value) -> Result<Vec<String>, PropertyError> {
        view.base_set(tag, value)
    }

    /// Removes a canonical tag; returns the tags still to be notified.
    fn remove(&self, view: &View, tag: &str) -> Vec<String> {
        view.base_remove(tag)
    }

    /// Reads a canonical tag.
    fn get(&self, view: &View, tag: &str) -> Option<Value> {
        view.base_get(tag)
    }

    /// Emits the DOM update of a changed tag.
    fn changed(&self, view: &View, tag: &str) {
        view.base_changed(tag);
    }

    /// Element name of the view.
    fn html_tag(&self, view: &View) -> String {
        view.base_html_tag()
    }

    /// Writes widget specific attributes, each with a leading space.
    fn html_properties(&self, _view: &View, _buffer: &mut String) {}

    /// Writes the element content.
    fn html_subviews(&self, _view: &View, _buffer: &mut String) {}

    /// Collects the inline style.
    fn css_style(&self, view: &View, builder: &mut CssBuilder) {
        view.base_css_style(builder);
    }

    /// Handles a runtime message addressed to the view; returns `false` when unknown.
    fn handle_command(&self, view: &View, command: &str, data: &DataObject) -> bool {
        view.base_handle_command(command, data)
    }

    /// Whether the view takes keyboard focus by default.
    fn focusable(&self) -> bool {
        false
    }

    /// Whether the element supports the HTML `disabled` attribute.
    fn html_disabled(&self) -> bool {
        false
    }

    /// Class written before `ruiView`.
    fn system_class(&self) -> &'static str {
        ""
    }

    /// Direct child views, in order.
    fn subviews(&self, _view: &View) -> Vec<View> {
        Vec::new()
    }

    /// Called after the runtime reported a new frame of the view.
    fn resized(&self, _view: &View, _frame: Frame) {}

    /// Called when an item element `<id>-<item>` of the view was resized.
    fn item_resized(&self, _view: &View, _item: &str, _frame: Frame) {}
}

#[derive(Debug, Default)]
pub(crate) struct ViewData {
    pub(crate) parent: Option<WeakView>,
    pub(crate) properties: Properties,
    pub(crate) created: bool,
    pub(crate) has_focus: bool,
    pub(crate) change_listeners: BTreeMap<String, EventListeners>,
    pub(crate) frame: Frame,
    pub(crate) scroll: Frame,
    pub(crate) transition_saves: BTreeMap<String, Option<Animation>>,
}

pub(crate) struct ViewInner {
    session: Session,
    html_id: String,
    widget: Box<dyn Widget>,
    data: RefCell<ViewData>,
}

/// A shared handle to a widget instance; clones refer to the same view.
#[derive(Clone)]
pub struct View(Rc<ViewInner>);

/// A non-owning handle to a view.
#[derive(Clone)]
pub struct WeakView(Weak<ViewInner>);

impl WeakView {
    /// The view, if it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<View> {
        self.0.upgrade().map(View)
    }
}

impl Debug for WeakView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(view) => write!(f, "WeakView({})", view.html_id()),
            None => f.write_str("WeakView(dropped)"),
        }
    }
}

impl PartialEq for View {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for View {}

impl Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.0.widget.type_name())
            .field("html_id", &self.0.html_id)
            .field("properties", &self.0.data.borrow().properties.tags())
            .finish_non_exhaustive()
    }
}

impl View {
    /// Creates a view of `widget` in `session` and applies `params` in order.
    ///
    /// Rejected parameters are logged and skipped.
    pub fn create(session: &Session, widget: impl Widget, params: Params) -> Self {
        let view = Self(Rc::new(ViewInner {
            session: session.clone(),
            html_id: session.next_view_id(),
            widget: Box::new(widget),
            data: RefCell::new(ViewData::default()),
        }));
        session.register_view(&view);
        for (tag, value) in params {
            view.set(&tag, value);
        }
        view
    }

    /// A non-owning handle.
    #[must_use]
    pub fn downgrade(&self) -> WeakView {
        WeakView(Rc::downgrade(&self.0))
    }

    /// The session the view belongs to.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.0.session
    }

    /// The element id, unique within the session.
    #[must_use]
    pub fn html_id(&self) -> &str {
        &self.0.html_id
    }

    /// The widget type name.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.0.widget.type_name()
    }

    /// The widget, if it is a `T`.
    #[must_use]
    pub fn widget<T: Widget>(&self) -> Option<&T> {
        let widget: &dyn Any = &*self.0.widget;
        widget.downcast_ref()
    }

    pub(crate) fn widget_hooks(&self) -> &dyn Widget {
        &*self.0.widget
    }

    pub(crate) fn data(&self) -> core::cell::Ref<'_, ViewData> {
        self.0.data.borrow()
    }

    pub(crate) fn data_mut(&self) -> core::cell::RefMut<'_, ViewData> {
        self.0.data.borrow_mut()
    }

    /// The user id given by the `id` property.
    #[must_use]
    pub fn id(&self) -> String {
        self.get_text("id").unwrap_or_default()
    }

    /// The parent view.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.data().parent.as_ref().and_then(WeakView::upgrade)
    }

    /// The html id of the parent, empty without a parent.
    #[must_use]
    pub fn parent_id(&self) -> String {
        self.parent()
            .map(|parent| parent.html_id().to_string())
            .unwrap_or_default()
    }

    /// Links the view under `parent`, or unlinks it.
    ///
    /// Unlinking also forgets that the element exists, since its DOM node is gone.
    pub fn set_parent(&self, parent: Option<&Self>) {
        self.data_mut().parent = parent.map(Self::downgrade);
        if parent.is_none() {
            self.set_created(false);
        }
    }

    /// Returns `true` once the element exists in the remote DOM.
    #[must_use]
    pub fn is_created(&self) -> bool {
        self.data().created
    }

    pub(crate) fn set_created(&self, created: bool) {
        self.data_mut().created = created;
        for child in self.subviews() {
            child.set_created(created);
        }
    }

    /// Direct child views.
    #[must_use]
    pub fn subviews(&self) -> Vec<Self> {
        self.0.widget.subviews(self)
    }

    /// Finds a view by user id in the subtree; `a/b` looks for `b` under `a`.
    #[must_use]
    pub fn view_by_id(&self, id: &str) -> Option<Self> {
        if self.id() == id {
            return Some(self.clone());
        }
        if let Some(view) = self.find_descendant(id) {
            return Some(view);
        }
        let (head, rest) = id.split_once('/')?;
        self.view_by_id(head)?.view_by_id(rest)
    }

    fn find_descendant(&self, id: &str) -> Option<Self> {
        self.subviews().into_iter().find_map(|child| {
            if child.id() == id {
                Some(child)
            } else {
                child.find_descendant(id)
            }
        })
    }

    /// Returns `true` when the view has keyboard focus.
    #[must_use]
    pub fn has_focus(&self) -> bool {
        self.data().has_focus
    }

    /// Whether the view takes keyboard focus: the `focusable` property, else the widget default.
    #[must_use]
    pub fn is_focusable(&self) -> bool {
        self.get_bool("focusable")
            .unwrap_or_else(|| self.0.widget.focusable())
    }

    /// Position and size last reported by the runtime.
    #[must_use]
    pub fn frame(&self) -> Frame {
        self.data().frame
    }

    /// Scroll position and scrollable size last reported by the runtime.
    #[must_use]
    pub fn scroll(&self) -> Frame {
        self.data().scroll
    }

    /// The binding table of listeners given by name, inherited from the parent chain.
    #[must_use]
    pub fn binding(&self) -> Option<Rc<BindingTable>> {
        let own = match self.data().properties.get("binding") {
            Some(Value::Binding(table)) => Some(Rc::clone(table)),
            _ => None,
        };
        own.or_else(|| self.parent().and_then(|parent| parent.binding()))
    }

    /// Sets a property; a rejected value is logged and `false` returned.
    pub fn set(&self, tag: &str, value: impl Into<Value>) -> bool {
        match self.try_set(tag, value) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(view = self.html_id(), widget = self.type_name(), %error, "property write rejected");
                false
            }
        }
    }

    /// Sets a property.
    ///
    /// # Errors
    ///
    /// Returns why the value was rejected; the property map is unchanged then.
    pub fn try_set(&self, tag: &str, value: impl Into<Value>) -> Result<(), PropertyError> {
        let tag = self.0.widget.normalize(tag);
        let changed = self.0.widget.set(self, &tag, value.into())?;
        self.notify(&changed);
        Ok(())
    }

    /// Removes a property.
    pub fn remove(&self, tag: &str) {
        let tag = self.0.widget.normalize(tag);
        let changed = self.0.widget.remove(self, &tag);
        self.notify(&changed);
    }

    /// Reads a property, falling back to the style sheets, the parent chain and defaults.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<Value> {
        let tag = self.0.widget.normalize(tag);
        self.0.widget.get(self, &tag)
    }

    /// The directly stored value of a canonical tag, constants unresolved.
    #[must_use]
    pub fn get_raw(&self, tag: &str) -> Option<Value> {
        self.data().properties.get(tag).cloned()
    }

    /// Stored tags in sorted order.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        self.data().properties.tags()
    }

    /// Text value of a tag.
    #[must_use]
    pub fn get_text(&self, tag: &str) -> Option<String> {
        match self.get(tag)? {
            Value::Text(text) => Some(text),
            other => Some(other.to_string()),
        }
    }

    /// Flag value of a tag.
    #[must_use]
    pub fn get_bool(&self, tag: &str) -> Option<bool> {
        self.get(tag)?.as_bool()
    }

    /// Integer or enum index value of a tag.
    #[must_use]
    pub fn get_int(&self, tag: &str) -> Option<i64> {
        self.get(tag)?.as_int()
    }

    /// Number value of a tag.
    #[must_use]
    pub fn get_float(&self, tag: &str) -> Option<f64> {
        self.get(tag)?.as_float()
    }

    /// Size value of a tag.
    #[must_use]
    pub fn get_size(&self, tag: &str) -> Option<Size> {
        self.get(tag)?.as_size().cloned()
    }

    /// Color value of a tag.
    #[must_use]
    pub fn get_color(&self, tag: &str) -> Option<Color> {
        self.get(tag)?.as_color()
    }

    /// Returns `true` when the view or an ancestor is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        let own = self.data().properties.get("disabled").cloned();
        let own = match own {
            Some(Value::Constant(name)) => self
                .session()
                .resolve_constant("disabled", &name, Some(PropertyKind::Bool))
                .and_then(|value| value.as_bool()),
            Some(value) => value.as_bool(),
            None => None,
        };
        own.unwrap_or(false) || self.parent().is_some_and(|parent| parent.is_disabled())
    }

    /// Writes an already coerced value without emitting a DOM update.
    ///
    /// Used by command handlers whose value came from the runtime. Returns the
    /// changed tags; the caller fires the events and change listeners.
    pub fn store_raw(&self, tag: &str, value: Option<Value>) -> Vec<String> {
        self.data_mut().properties.store(tag, value)
    }

    /// Runs [`Widget::changed`] and the change listeners of each tag.
    pub fn notify(&self, tags: &[String]) {
        for tag in tags {
            self.0.widget.changed(self, tag);
            self.fire_change_listeners(tag);
        }
    }

    /// Registers the change listener of a tag, `None` removing it.
    ///
    /// The listener receives the view and the changed tag as a `String`.
    pub fn set_change_listener(&self, tag: &str, listener: Option<Listener>) {
        let tag = self.0.widget.normalize(tag);
        let mut data = self.data_mut();
        match listener {
            Some(listener) => {
                data.change_listeners.insert(tag, EventListeners::single(listener));
            }
            None => {
                data.change_listeners.remove(&tag);
            }
        }
    }

    /// Calls the change listeners of a tag.
    pub fn fire_change_listeners(&self, tag: &str) {
        let listeners = self.data().change_listeners.get(tag).cloned();
        if let Some(listeners) = listeners {
            let name = tag.to_string();
            listeners.invoke(tag, self, &[&name as &dyn Any]);
        }
    }

    /// The listeners stored under an event tag.
    #[must_use]
    pub fn listeners(&self, tag: &str) -> EventListeners {
        match self.data().properties.get(tag) {
            Some(Value::Listeners(listeners)) => listeners.clone(),
            _ => EventListeners::default(),
        }
    }

    /// Calls the listeners of an event tag with the event arguments.
    pub fn fire(&self, tag: &str, args: &[&dyn Any]) {
        let listeners = self.listeners(tag);
        if !listeners.is_empty() {
            tracing::debug!(view = self.html_id(), tag, "event");
            listeners.invoke(tag, self, args);
        }
    }

    /// Moves keyboard focus to the view.
    pub fn focus(&self) {
        self.session()
            .bridge()
            .call_func("focus", &crate::js_args![self.html_id()]);
    }

    /// Removes keyboard focus from the view.
    pub fn blur(&self) {
        self.session()
            .bridge()
            .call_func("blur", &crate::js_args![self.html_id()]);
    }
}
