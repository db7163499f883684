//! Per-connection state: the bridge, the view registry, resources and the
//! keyframe registry.
//!
//! A [`Session`] is a cheap handle; clones share the state. Every view holds
//! its session, while the session only holds views weakly. [`SessionHost`]
//! owns the root view of a connection and drives the session with the
//! messages of the runtime.

use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use core::fmt::{self, Debug};
use core::mem::{self, Discriminant};
use core::time::Duration;
use std::collections::HashMap;

use crate::animation::KeyframeRegistry;
use crate::bridge::{Bridge, RecordingSink, ScriptBridge};
use crate::data::{DataObject, DataValue};
use crate::event::Frame;
use crate::properties::{self, Properties, PropertyKind, Resolver, constant_name, tables};
use crate::theme::Theme;
use crate::value::Value;
use crate::view::{View, WeakView};

/// Id of the element the root view is rendered into.
pub const ROOT_ELEMENT_ID: &str = "ruiRootView";

/// Default deadline of synchronous bridge calls.
pub const DEFAULT_ANSWER_TIMEOUT: Duration = Duration::from_secs(10);

const MAX_CONSTANT_DEPTH: usize = 16;

/// Lifecycle changes reported by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// The page went to the background.
    Pause,
    /// The page came back.
    Resume,
    /// The page is closing.
    Close,
}

#[derive(Default)]
struct State {
    theme: Theme,
    dark: bool,
    touch: bool,
    language: String,
    pixel_ratio: f64,
    root_size: (f64, f64),
    paused: bool,
    constants: HashMap<String, String>,
    strings: HashMap<String, String>,
    images: HashMap<String, String>,
    styles: HashMap<String, Rc<Properties>>,
    views: HashMap<String, WeakView>,
    registrations: u64,
    root: Option<WeakView>,
}

// tag, constant name and the kind it was coerced to
type ConstantKey = (String, String, Option<Discriminant<PropertyKind>>);

struct SessionInner {
    bridge: Rc<dyn Bridge>,
    state: RefCell<State>,
    cache: RefCell<HashMap<ConstantKey, Option<Value>>>,
    keyframes: RefCell<KeyframeRegistry>,
    ignore_updates: Cell<bool>,
    view_counter: Cell<u64>,
}

/// One connected runtime.
#[derive(Clone)]
pub struct Session(Rc<SessionInner>);

impl Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0.state.borrow();
        f.debug_struct("Session")
            .field("theme", &state.theme.name())
            .field("views", &state.views.len())
            .field("closed", &self.0.bridge.is_closed())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Session {
    /// A session emitting its commands through `bridge`.
    pub fn new(bridge: impl Bridge + 'static) -> Self {
        Self(Rc::new(SessionInner {
            bridge: Rc::new(bridge),
            state: RefCell::new(State {
                pixel_ratio: 1.0,
                ..State::default()
            }),
            cache: RefCell::new(HashMap::new()),
            keyframes: RefCell::new(KeyframeRegistry::new()),
            ignore_updates: Cell::new(false),
            view_counter: Cell::new(0),
        }))
    }

    /// A session recording its scripts into `sink`.
    #[must_use]
    pub fn headless_with(sink: RecordingSink) -> Self {
        Self::new(ScriptBridge::new(sink, DEFAULT_ANSWER_TIMEOUT))
    }

    /// A session without a runtime and the sink recording its scripts.
    #[must_use]
    pub fn headless() -> (Self, RecordingSink) {
        let sink = RecordingSink::new();
        (Self::headless_with(sink.clone()), sink)
    }

    /// The bridge of the session.
    #[must_use]
    pub fn bridge(&self) -> &dyn Bridge {
        &*self.0.bridge
    }

    pub(crate) fn next_view_id(&self) -> String {
        let id = self.0.view_counter.get() + 1;
        self.0.view_counter.set(id);
        format!("id{id:06}")
    }

    pub(crate) fn register_view(&self, view: &View) {
        let mut state = self.0.state.borrow_mut();
        state.registrations += 1;
        if state.registrations % 256 == 0 {
            state.views.retain(|_, weak| weak.upgrade().is_some());
        }
        state
            .views
            .insert(view.html_id().to_string(), view.downgrade());
    }

    /// A live view of the session by html id.
    #[must_use]
    pub fn view_by_html_id(&self, id: &str) -> Option<View> {
        let view = self.0.state.borrow().views.get(id).and_then(WeakView::upgrade);
        if view.is_none() {
            self.0.state.borrow_mut().views.remove(id);
        }
        view
    }

    /// Returns `true` while view updates are held back, e.g. during a table rebuild.
    #[must_use]
    pub fn ignore_view_updates(&self) -> bool {
        self.0.ignore_updates.get()
    }

    /// Holds back or releases DOM updates of every view.
    pub fn set_ignore_view_updates(&self, ignore: bool) {
        self.0.ignore_updates.set(ignore);
    }

    fn invalidate(&self) {
        self.0.cache.borrow_mut().clear();
    }

    /// Replaces the theme.
    pub fn set_theme(&self, theme: Theme) {
        self.0.state.borrow_mut().theme = theme;
        self.invalidate();
    }

    /// Name of the current theme.
    #[must_use]
    pub fn theme_name(&self) -> String {
        self.0.state.borrow().theme.name().to_string()
    }

    /// Sets an application constant, overriding the theme.
    pub fn set_constant(&self, name: &str, value: impl Into<String>) {
        self.0
            .state
            .borrow_mut()
            .constants
            .insert(name.to_string(), value.into());
        self.invalidate();
    }

    /// Switches the dark color tables.
    pub fn set_dark_theme(&self, dark: bool) {
        self.0.state.borrow_mut().dark = dark;
        self.invalidate();
    }

    /// Returns `true` in dark mode.
    #[must_use]
    pub fn is_dark_theme(&self) -> bool {
        self.0.state.borrow().dark
    }

    /// Switches the touch constant tables.
    pub fn set_touch_screen(&self, touch: bool) {
        self.0.state.borrow_mut().touch = touch;
        self.invalidate();
    }

    /// Returns `true` when the runtime reported a touch screen.
    #[must_use]
    pub fn is_touch_screen(&self) -> bool {
        self.0.state.borrow().touch
    }

    /// Language reported by the runtime.
    #[must_use]
    pub fn language(&self) -> String {
        self.0.state.borrow().language.clone()
    }

    /// Device pixel ratio reported by the runtime.
    #[must_use]
    pub fn pixel_ratio(&self) -> f64 {
        self.0.state.borrow().pixel_ratio
    }

    /// Size of the root element reported by the runtime.
    #[must_use]
    pub fn root_size(&self) -> (f64, f64) {
        self.0.state.borrow().root_size
    }

    /// Returns `true` between a pause and a resume message.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.0.state.borrow().paused
    }

    /// Sets the translation of a text.
    pub fn set_string(&self, name: &str, text: impl Into<String>) {
        self.0
            .state
            .borrow_mut()
            .strings
            .insert(name.to_string(), text.into());
    }

    /// The translation of `text`, or `text` itself.
    #[must_use]
    pub fn translate(&self, text: &str) -> String {
        self.0
            .state
            .borrow()
            .strings
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }

    /// Sets the url of a named image.
    pub fn set_image(&self, name: &str, url: impl Into<String>) {
        self.0
            .state
            .borrow_mut()
            .images
            .insert(name.to_string(), url.into());
    }

    /// The url of an image source: `@name` is looked up in the image tables.
    #[must_use]
    pub fn image_url(&self, src: &str) -> String {
        let Some(name) = constant_name(src) else {
            return src.to_string();
        };
        let state = self.0.state.borrow();
        state
            .images
            .get(name)
            .map(String::as_str)
            .or_else(|| state.theme.image(name, state.dark))
            .unwrap_or_default()
            .to_string()
    }

    /// Sets a named style, overriding the theme style of the same name.
    pub fn set_style(&self, name: &str, properties: Properties) {
        self.0
            .state
            .borrow_mut()
            .styles
            .insert(name.to_string(), Rc::new(properties));
    }

    fn style(&self, name: &str) -> Option<Rc<Properties>> {
        let state = self.0.state.borrow();
        state
            .styles
            .get(name)
            .cloned()
            .or_else(|| state.theme.style(name))
    }

    /// A value of a named style.
    #[must_use]
    pub fn style_value(&self, style: &str, tag: &str, resolve: Resolver<'_>) -> Option<Value> {
        self.style(style)?.lookup(tag, resolve)
    }

    /// The whole-family value of `tag`'s family in a named style.
    #[must_use]
    pub fn style_family_value(&self, style: &str, tag: &str, resolve: Resolver<'_>) -> Option<Value> {
        self.style(style)?.family_value(tag, resolve)
    }

    /// Tags stored in a named style.
    #[must_use]
    pub fn style_tags(&self, style: &str) -> Vec<String> {
        self.style(style)
            .map(|style| style.tags())
            .unwrap_or_default()
    }

    fn constant_text(&self, name: &str, color: bool) -> Option<String> {
        let state = self.0.state.borrow();
        let theme_color = || color.then(|| state.theme.color(name, state.dark)).flatten();
        state
            .constants
            .get(name)
            .map(String::as_str)
            .or_else(theme_color)
            .or_else(|| state.theme.constant(name, state.touch))
            .map(str::to_string)
    }

    /// Resolves the constant `name` for `tag`, coerced to the kind of the tag.
    ///
    /// References between constants are followed; a cycle or a missing name
    /// resolves to `None`. Results are cached until a constant table changes.
    #[must_use]
    pub fn resolve_constant(&self, tag: &str, name: &str, kind: Option<PropertyKind>) -> Option<Value> {
        let key = (tag.to_string(), name.to_string(), kind.as_ref().map(mem::discriminant));
        if let Some(value) = self.0.cache.borrow().get(&key) {
            return value.clone();
        }

        let color = matches!(kind, Some(PropertyKind::Color))
            || tables::COLORS.iter().any(|(color, _)| *color == tag);
        let mut current = name.to_string();
        let mut seen = vec![current.clone()];
        let value = loop {
            let Some(text) = self.constant_text(&current, color) else {
                tracing::debug!(tag, constant = name, "constant not found");
                break None;
            };
            match constant_name(&text).map(str::to_string) {
                Some(next) if seen.contains(&next) || seen.len() >= MAX_CONSTANT_DEPTH => {
                    tracing::warn!(tag, constant = name, "cyclic constant reference");
                    break None;
                }
                Some(next) => {
                    seen.push(next.clone());
                    current = next;
                }
                None => match properties::coerce_tag(tag, Value::Text(text), kind) {
                    Ok(value) => break value,
                    Err(error) => {
                        tracing::warn!(tag, constant = name, %error, "constant value rejected");
                        break None;
                    }
                },
            }
        };
        self.0.cache.borrow_mut().insert(key, value.clone());
        value
    }

    pub(crate) fn acquire_keyframes(&self, body: &str) -> (String, Option<String>) {
        self.0.keyframes.borrow_mut().acquire(body)
    }

    pub(crate) fn release_keyframes(&self, name: &str) -> Option<String> {
        self.0.keyframes.borrow_mut().release(name)
    }

    /// Live uses of a generated keyframes name.
    #[must_use]
    pub fn keyframes_uses(&self, name: &str) -> usize {
        self.0.keyframes.borrow().uses(name)
    }

    /// Number of registered `@keyframes` blocks.
    #[must_use]
    pub fn keyframes_count(&self) -> usize {
        self.0.keyframes.borrow().len()
    }

    /// Renders `view` into the root element and makes it the root view.
    ///
    /// The session only holds the root weakly; the caller keeps it alive.
    pub fn set_root(&self, view: &View) {
        if let Some(old) = self.root() {
            if old != *view {
                old.set_created(false);
            }
        }
        self.0.state.borrow_mut().root = Some(view.downgrade());
        view.set_parent(None);
        let html = view.html();
        self.bridge().update_inner_html(ROOT_ELEMENT_ID, &html);
    }

    /// The root view.
    #[must_use]
    pub fn root(&self) -> Option<View> {
        self.0.state.borrow().root.as_ref().and_then(WeakView::upgrade)
    }

    /// Renders the root view again, e.g. after a theme change.
    pub fn refresh(&self) {
        if let Some(root) = self.root() {
            self.set_root(&root);
        }
    }

    fn update_session_info(&self, data: &DataObject) {
        {
            let mut state = self.0.state.borrow_mut();
            if data.node("touch").is_some() {
                state.touch = data.flag("touch");
            }
            if data.node("dark").is_some() {
                state.dark = data.flag("dark");
            }
            if let Some(language) = data.text("language") {
                state.language = language.to_string();
            }
            if let Some(ratio) = data.float("pixel-ratio") {
                state.pixel_ratio = ratio;
            }
            if let (Some(width), Some(height)) = (data.float("width"), data.float("height")) {
                state.root_size = (width, height);
            }
        }
        self.invalidate();
    }

    fn handle_resize(&self, data: &DataObject) {
        for item in data.array("views").unwrap_or_default() {
            let DataValue::Object(object) = item else {
                continue;
            };
            let Some(id) = object.text("id") else {
                continue;
            };
            let frame = Frame::from_data(object);
            let scroll = object.object("scroll").map(Frame::from_data).unwrap_or_default();
            if let Some(view) = self.view_by_html_id(id) {
                view.handle_resize(frame, scroll);
            } else if let Some((owner, item)) = id.split_once('-') {
                if let Some(view) = self.view_by_html_id(owner) {
                    view.widget_hooks().item_resized(&view, item, frame);
                }
            }
        }
    }

    /// Handles one runtime message.
    ///
    /// Lifecycle messages are returned to the caller; everything else is routed
    /// to the answer slots or to the view named by the `id` field.
    pub fn handle_event(&self, command: &str, data: &DataObject) -> Option<Lifecycle> {
        match command {
            "answer" => self.bridge().answer_received(data),
            "session-pause" => {
                self.0.state.borrow_mut().paused = true;
                return Some(Lifecycle::Pause);
            }
            "session-resume" => {
                self.0.state.borrow_mut().paused = false;
                return Some(Lifecycle::Resume);
            }
            "session-close" => return Some(Lifecycle::Close),
            "root-size" => {
                if let (Some(width), Some(height)) = (data.float("width"), data.float("height")) {
                    self.0.state.borrow_mut().root_size = (width, height);
                }
            }
            "resize" => self.handle_resize(data),
            "sessionInfo" => self.update_session_info(data),
            _ => match data.text("id") {
                Some(id) => match self.view_by_html_id(id) {
                    Some(view) => {
                        tracing::debug!(view = id, command, "route event");
                        if !view.widget_hooks().handle_command(&view, command, data) {
                            tracing::warn!(view = id, command, "unknown command");
                        }
                    }
                    None => tracing::warn!(view = id, command, "event for an unknown view"),
                },
                None => tracing::warn!(command, "event without a view id"),
            },
        }
        None
    }

    /// Handles a message object whose tag is the command.
    pub fn handle_message(&self, message: &DataObject) -> Option<Lifecycle> {
        self.handle_event(message.tag(), message)
    }
}

/// The application side of one connection.
pub trait SessionContent {
    /// Builds the root view of a new session.
    fn create_root_view(&mut self, session: &Session) -> Option<View>;

    /// Called when the page goes to the background.
    fn on_pause(&mut self, _session: &Session) {}

    /// Called when the page comes back.
    fn on_resume(&mut self, _session: &Session) {}

    /// Called before the session is dropped.
    fn on_close(&mut self, _session: &Session) {}
}

/// Owns the root view and the content of one connection.
pub struct SessionHost {
    session: Session,
    content: Box<dyn SessionContent>,
    root: Option<View>,
    closed: bool,
}

impl Debug for SessionHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHost")
            .field("session", &self.session)
            .field("root", &self.root)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl SessionHost {
    /// A host of `content` on `session`.
    pub fn new(session: Session, content: impl SessionContent + 'static) -> Self {
        Self {
            session,
            content: Box::new(content),
            root: None,
            closed: false,
        }
    }

    /// The session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The root view, once started.
    #[must_use]
    pub const fn root(&self) -> Option<&View> {
        self.root.as_ref()
    }

    /// Builds and renders the root view; returns `false` when the content has none.
    pub fn start(&mut self) -> bool {
        let Some(root) = self.content.create_root_view(&self.session) else {
            tracing::warn!("session content created no root view");
            return false;
        };
        self.session.set_root(&root);
        self.root = Some(root);
        true
    }

    /// Handles one runtime message; returns `false` once the session is closed.
    pub fn handle_message(&mut self, message: &DataObject) -> bool {
        if self.closed {
            return false;
        }
        match self.session.handle_message(message) {
            Some(Lifecycle::Pause) => self.content.on_pause(&self.session),
            Some(Lifecycle::Resume) => self.content.on_resume(&self.session),
            Some(Lifecycle::Close) => {
                self.close();
                return false;
            }
            None => {}
        }
        true
    }

    /// Closes the session: notifies the content, drops the root and closes the bridge.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.content.on_close(&self.session);
        self.root = None;
        self.session.bridge().close();
        tracing::info!("session closed");
    }

    /// Returns `true` after [`SessionHost::close`] or when the bridge failed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed || self.session.bridge().is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Color, Size};
    use crate::view::Widget;

    struct Plain;

    impl Widget for Plain {
        fn type_name(&self) -> &'static str {
            "Plain"
        }
    }

    #[test]
    fn constants_follow_references_and_cache() {
        let (session, _) = Session::headless();
        session.set_constant("gap", "@base");
        session.set_constant("base", "7px");
        assert_eq!(
            session.resolve_constant("width", "gap", None),
            Some(Value::Size(Size::px(7.0)))
        );
        session.set_constant("base", "9px");
        assert_eq!(
            session.resolve_constant("width", "gap", None),
            Some(Value::Size(Size::px(9.0)))
        );

        session.set_constant("a", "@b");
        session.set_constant("b", "@a");
        assert_eq!(session.resolve_constant("width", "a", None), None);
    }

    #[test]
    fn constants_are_cached_per_kind() {
        let (session, _) = Session::headless();
        session.set_constant("c", "2");
        assert_eq!(
            session.resolve_constant("current", "c", Some(PropertyKind::Int)),
            Some(Value::Int(2))
        );
        assert_eq!(
            session.resolve_constant("current", "c", Some(PropertyKind::Text)),
            Some(Value::Text("2".into()))
        );
        assert_eq!(
            session.resolve_constant("current", "c", Some(PropertyKind::Int)),
            Some(Value::Int(2))
        );
    }

    #[test]
    fn theme_colors_follow_dark_mode() {
        let (session, _) = Session::headless();
        let mut theme = Theme::new("test");
        theme.set_color("ink", "#FF000000", false);
        theme.set_color("ink", "#FFFFFFFF", true);
        session.set_theme(theme);
        assert_eq!(
            session.resolve_constant("text-color", "ink", None),
            Some(Value::Color(Color::new(0xFF00_0000)))
        );
        session.set_dark_theme(true);
        assert_eq!(
            session.resolve_constant("text-color", "ink", None),
            Some(Value::Color(Color::new(0xFFFF_FFFF)))
        );
    }

    #[test]
    fn view_registry_and_root() {
        let (session, sink) = Session::headless();
        let view = View::create(&session, Plain, [("id", Value::from("main"))].into());
        assert_eq!(view.html_id(), "id000001");
        assert_eq!(session.view_by_html_id("id000001"), Some(view.clone()));

        session.set_root(&view);
        assert!(view.is_created());
        assert!(sink.contains(ROOT_ELEMENT_ID));
        assert_eq!(session.root(), Some(view.clone()));

        drop(view);
        assert!(session.view_by_html_id("id000001").is_none());
        assert!(session.root().is_none());
    }

    #[test]
    fn lifecycle_and_unknown_messages() {
        let (session, _) = Session::headless();
        let pause = DataObject::new("session-pause");
        assert_eq!(session.handle_message(&pause), Some(Lifecycle::Pause));
        assert!(session.is_paused());
        let info = DataObject::parse("sessionInfo{touch=1, language=de, pixel-ratio=2}").unwrap();
        assert_eq!(session.handle_message(&info), None);
        assert!(session.is_touch_screen());
        assert_eq!(session.language(), "de");
        assert_eq!(session.pixel_ratio(), 2.0);
        let stray = DataObject::parse("click-event{id=id999999}").unwrap();
        assert_eq!(session.handle_message(&stray), None);
    }

    #[test]
    fn images_and_strings() {
        let (session, _) = Session::headless();
        session.set_image("logo", "/img/logo.png");
        assert_eq!(session.image_url("@logo"), "/img/logo.png");
        assert_eq!(session.image_url("plain.png"), "plain.png");
        session.set_string("Hello", "Hallo");
        assert_eq!(session.translate("Hello"), "Hallo");
        assert_eq!(session.translate("Bye"), "Bye");
    }
}
