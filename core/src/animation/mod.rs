//! Keyframe animations and property transitions.
//!
//! An [`Animation`] is a shared handle: the copy stored in a view's
//! `animation` property and the one kept by the application are the same
//! object, so [`Animation::stop`] and friends act on the running instance.
//!
//! While running, an animation holds its view weakly. The internal listeners
//! it installs on the view hold the animation weakly in turn, so neither keeps
//! the other alive.

mod keyframes;
mod property;
pub mod timing;
mod transition;

use alloc::collections::BTreeMap;
use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::fmt::{self, Debug};

pub use keyframes::{KeyframeRegistry, keyframes_body};
pub use property::AnimatedProperty;
pub use timing::{cubic_bezier_timing, steps_timing, timing_css, validate_timing_function};

use crate::data::DataObject;
use crate::error::PropertyError;
use crate::event::{EventListeners, Listener};
use crate::properties::{coerce, constant_name, tables};
use crate::value::{Value, format_number};
use crate::view::{View, WeakView};

/// Events reported to an animation listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEventKind {
    /// The CSS animation started.
    Start,
    /// The animation ran to completion.
    End,
    /// The animation was stopped or aborted by the runtime.
    Cancel,
    /// One iteration ended and another began.
    Iteration,
}

impl AnimationEventKind {
    /// The listener tag of the view event.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Start => "animation-start-event",
            Self::End => "animation-end-event",
            Self::Cancel => "animation-cancel-event",
            Self::Iteration => "animation-iteration-event",
        }
    }

    const ALL: [Self; 4] = [Self::Start, Self::End, Self::Cancel, Self::Iteration];
}

/// Lifecycle of an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationStatus {
    /// Not attached to a view.
    #[default]
    Detached,
    /// Playing on a view.
    Running,
    /// Attached but paused.
    Paused,
    /// Ran to completion.
    Ended,
    /// Stopped before completion.
    Cancelled,
}

/// Callback of a started animation.
pub type AnimationListener = Rc<dyn Fn(&View, &Animation, AnimationEventKind)>;

#[derive(Default)]
struct RunState {
    view: Option<WeakView>,
    listener: Option<AnimationListener>,
    old_animation: Option<Value>,
    old_listeners: BTreeMap<&'static str, EventListeners>,
    status: AnimationStatus,
}

struct AnimationInner {
    properties: Vec<AnimatedProperty>,
    duration: f64,
    delay: f64,
    timing: String,
    iteration_count: i64,
    direction: usize,
    keyframes: RefCell<Option<String>>,
    state: RefCell<RunState>,
}

/// A set of animated properties with timing parameters and run state.
#[derive(Clone)]
pub struct Animation(Rc<AnimationInner>);

impl PartialEq for Animation {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("properties", &self.0.properties)
            .field("duration", &self.0.duration)
            .field("delay", &self.0.delay)
            .field("timing", &self.0.timing)
            .field("iteration_count", &self.0.iteration_count)
            .field("direction", &self.0.direction)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

/// Builder of an [`Animation`].
#[derive(Debug, Clone)]
pub struct AnimationBuilder {
    properties: Vec<AnimatedProperty>,
    duration: f64,
    delay: f64,
    timing: String,
    iteration_count: i64,
    direction: usize,
}

impl Default for AnimationBuilder {
    fn default() -> Self {
        Self {
            properties: Vec::new(),
            duration: 1.0,
            delay: 0.0,
            timing: String::new(),
            iteration_count: 1,
            direction: 0,
        }
    }
}

impl AnimationBuilder {
    /// Adds an animated property.
    #[must_use]
    pub fn property(mut self, property: AnimatedProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// Duration in seconds.
    #[must_use]
    pub const fn duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    /// Delay in seconds before the start.
    #[must_use]
    pub const fn delay(mut self, seconds: f64) -> Self {
        self.delay = seconds;
        self
    }

    /// Timing function; empty means `ease`.
    #[must_use]
    pub fn timing(mut self, timing: impl Into<String>) -> Self {
        self.timing = timing.into();
        self
    }

    /// Iteration count; zero or less repeats forever.
    #[must_use]
    pub const fn iteration_count(mut self, count: i64) -> Self {
        self.iteration_count = count;
        self
    }

    /// Playback direction, a name or index of the `animation-direction` enum.
    ///
    /// # Errors
    ///
    /// Fails for names outside the enum.
    pub fn direction(mut self, direction: impl Into<Value>) -> Result<Self, PropertyError> {
        self.direction = direction_index(&direction.into())?;
        Ok(self)
    }

    /// Validates and builds the animation.
    ///
    /// A `@name` timing function is kept as given and resolved when applied.
    ///
    /// # Errors
    ///
    /// Fails for incomplete property scripts and invalid timing functions.
    pub fn build(self) -> Result<Animation, PropertyError> {
        for property in &self.properties {
            property.validate()?;
        }
        let timing = match timing_css(&self.timing) {
            Some(timing) => timing,
            None if constant_name(&self.timing).is_some() => self.timing.trim().to_string(),
            None => return Err(PropertyError::parse("timing-function", self.timing)),
        };
        Ok(Animation(Rc::new(AnimationInner {
            properties: self.properties,
            duration: self.duration,
            delay: self.delay,
            timing,
            iteration_count: self.iteration_count,
            direction: self.direction,
            keyframes: RefCell::new(None),
            state: RefCell::new(RunState::default()),
        })))
    }
}

fn direction_index(value: &Value) -> Result<usize, PropertyError> {
    let spec = tables::enum_spec("animation-direction")
        .ok_or_else(|| PropertyError::UnknownTag("animation-direction".into()))?;
    let index = coerce::enum_index("animation-direction", value, spec)?;
    usize::try_from(index).map_err(|_| PropertyError::NotInEnum {
        tag: "animation-direction".into(),
        text: index.to_string(),
    })
}

impl Animation {
    /// Starts building an animation: one second, `ease`, one iteration.
    #[must_use]
    pub fn builder() -> AnimationBuilder {
        AnimationBuilder::default()
    }

    /// A transition record: duration, timing function and delay, no keyframes.
    ///
    /// # Errors
    ///
    /// Fails for invalid timing functions.
    pub fn transition(duration: f64, timing: &str, delay: f64) -> Result<Self, PropertyError> {
        Self::builder().duration(duration).timing(timing).delay(delay).build()
    }

    /// Reads an animation from a resource object.
    ///
    /// `property` holds one or more animated property objects; the timing
    /// tags are `duration`, `delay`, `timing-function`, `iteration-count`
    /// and `animation-direction`.
    ///
    /// # Errors
    ///
    /// Fails for ill-formed numbers, scripts or timing functions.
    pub fn from_object(object: &DataObject) -> Result<Self, PropertyError> {
        let mut builder = Self::builder();
        if let Some(node) = object.node("property") {
            match &node.value {
                crate::data::DataValue::Object(property) => {
                    builder = builder.property(AnimatedProperty::from_object(property)?);
                }
                crate::data::DataValue::Array(items) => {
                    for item in items {
                        let property = item
                            .as_object()
                            .ok_or_else(|| PropertyError::incompatible("property", "text"))?;
                        builder = builder.property(AnimatedProperty::from_object(property)?);
                    }
                }
                crate::data::DataValue::Text(text) => {
                    return Err(PropertyError::parse("property", text.clone()));
                }
            }
        }
        let number = |tag: &str| -> Result<Option<f64>, PropertyError> {
            object
                .text(tag)
                .map(|text| {
                    text.trim()
                        .parse::<f64>()
                        .map_err(|_| PropertyError::parse(tag, text))
                })
                .transpose()
        };
        if let Some(duration) = number("duration")? {
            builder = builder.duration(duration);
        }
        if let Some(delay) = number("delay")? {
            builder = builder.delay(delay);
        }
        if let Some(timing) = object.text("timing-function") {
            builder = builder.timing(timing);
        }
        if let Some(count) = object.text("iteration-count") {
            let count = count
                .trim()
                .parse::<i64>()
                .map_err(|_| PropertyError::parse("iteration-count", count))?;
            builder = builder.iteration_count(count);
        }
        if let Some(direction) = object.text("animation-direction") {
            builder = builder.direction(direction)?;
        }
        builder.build()
    }

    /// The animated properties.
    #[must_use]
    pub fn properties(&self) -> &[AnimatedProperty] {
        &self.0.properties
    }

    /// Duration in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.0.duration
    }

    /// Delay in seconds.
    #[must_use]
    pub fn delay(&self) -> f64 {
        self.0.delay
    }

    /// Timing function, empty for the CSS default.
    #[must_use]
    pub fn timing(&self) -> &str {
        &self.0.timing
    }

    /// A detached copy with another timing function.
    pub(crate) fn with_timing(&self, timing: String) -> Self {
        Self(Rc::new(AnimationInner {
            properties: self.0.properties.clone(),
            duration: self.0.duration,
            delay: self.0.delay,
            timing,
            iteration_count: self.0.iteration_count,
            direction: self.0.direction,
            keyframes: RefCell::new(None),
            state: RefCell::new(RunState::default()),
        }))
    }

    /// Iteration count; zero or less is infinite.
    #[must_use]
    pub fn iteration_count(&self) -> i64 {
        self.0.iteration_count
    }

    /// Index into the `animation-direction` enum.
    #[must_use]
    pub fn direction(&self) -> usize {
        self.0.direction
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn status(&self) -> AnimationStatus {
        self.0.state.borrow().status
    }

    /// Generated name of the registered `@keyframes` block, while attached.
    #[must_use]
    pub fn keyframes_name(&self) -> Option<String> {
        self.0.keyframes.borrow().clone()
    }

    pub(crate) fn set_keyframes_name(&self, name: Option<String>) {
        *self.0.keyframes.borrow_mut() = name;
    }

    fn downgrade(&self) -> Weak<AnimationInner> {
        Rc::downgrade(&self.0)
    }

    /// The value of the CSS `animation` shorthand for this animation.
    #[must_use]
    pub fn css(&self) -> Option<String> {
        let name = self.keyframes_name()?;
        // an unresolved `@name` timing plays as the default
        let timing = match timing_css(self.timing()) {
            Some(timing) if !timing.is_empty() => timing,
            _ => timing::EASE.to_string(),
        };
        let count = if self.iteration_count() <= 0 {
            "infinite".to_string()
        } else {
            self.iteration_count().to_string()
        };
        let direction = tables::enum_spec("animation-direction")
            .and_then(|spec| spec.values.get(self.direction()).copied())
            .unwrap_or("normal");
        Some(format!(
            "{name} {}s {timing} {}s {count} {direction}",
            format_number(self.duration()),
            format_number(self.delay()),
        ))
    }

    /// Starts the animation on `view`.
    ///
    /// The view's `animation` value and its four animation listener lists are
    /// saved, the animation's own handlers are appended to the lists and the
    /// view's `animation` is set to this animation. Returns `false` when the
    /// animation has nothing to animate, already runs, or the view rejects it;
    /// nothing stays installed then.
    pub fn start(
        &self,
        view: &View,
        listener: impl Fn(&View, &Self, AnimationEventKind) + 'static,
    ) -> bool {
        if self.properties().is_empty() {
            tracing::warn!(view = view.html_id(), "animation without animated properties");
            return false;
        }
        if matches!(self.status(), AnimationStatus::Running | AnimationStatus::Paused) {
            tracing::warn!(view = view.html_id(), "animation is already running");
            return false;
        }

        let old_animation = view
            .get_raw("animation")
            .filter(|value| !matches!(value, Value::Animations(list) if list.is_empty()));
        let mut old_listeners = BTreeMap::new();
        for kind in AnimationEventKind::ALL {
            let mut listeners = view.listeners(kind.tag());
            if !listeners.is_empty() {
                old_listeners.insert(kind.tag(), listeners.clone());
            }
            listeners.push(self.internal_listener(kind));
            view.set(kind.tag(), Value::Listeners(listeners));
        }
        {
            let mut state = self.0.state.borrow_mut();
            state.view = Some(view.downgrade());
            state.listener = Some(Rc::new(listener));
            state.old_animation = old_animation;
            state.old_listeners = old_listeners;
            state.status = AnimationStatus::Running;
        }

        if let Err(error) = view.try_set("animation", self.clone()) {
            tracing::warn!(view = view.html_id(), %error, "animation start rejected");
            self.restore(view);
            self.0.state.borrow_mut().status = AnimationStatus::Detached;
            return false;
        }
        true
    }

    fn internal_listener(&self, kind: AnimationEventKind) -> Listener {
        let animation = self.downgrade();
        Listener::view_event::<String>(move |_, name| {
            let Some(animation) = animation.upgrade().map(Animation) else {
                return;
            };
            let own = animation.keyframes_name();
            if !name.is_empty() && own.as_deref().is_some_and(|own| own != name.as_str()) {
                return;
            }
            match kind {
                AnimationEventKind::End | AnimationEventKind::Cancel => animation.finish(kind),
                AnimationEventKind::Start | AnimationEventKind::Iteration => animation.notify(kind),
            }
        })
    }

    fn view(&self) -> Option<View> {
        self.0.state.borrow().view.as_ref().and_then(WeakView::upgrade)
    }

    fn notify(&self, kind: AnimationEventKind) {
        let (view, listener) = {
            let state = self.0.state.borrow();
            (state.view.as_ref().and_then(WeakView::upgrade), state.listener.clone())
        };
        if let (Some(view), Some(listener)) = (view, listener) {
            listener(&view, self, kind);
        }
    }

    fn restore(&self, view: &View) {
        let (old_animation, old_listeners) = {
            let mut state = self.0.state.borrow_mut();
            (state.old_animation.take(), core::mem::take(&mut state.old_listeners))
        };
        for kind in AnimationEventKind::ALL {
            match old_listeners.get(kind.tag()) {
                Some(listeners) => {
                    view.set(kind.tag(), Value::Listeners(listeners.clone()));
                }
                None => view.remove(kind.tag()),
            }
        }
        match old_animation {
            Some(value) => {
                view.set("animation", value);
            }
            None => view.remove("animation"),
        }
    }

    fn finish(&self, kind: AnimationEventKind) {
        let Some(view) = self.view() else {
            return;
        };
        for property in self.properties() {
            if let Some(to) = property.to() {
                view.set(property.tag(), to.clone());
            }
        }
        let listener = self.0.state.borrow().listener.clone();
        self.restore(&view);
        {
            let mut state = self.0.state.borrow_mut();
            state.view = None;
            state.listener = None;
            state.status = if kind == AnimationEventKind::End {
                AnimationStatus::Ended
            } else {
                AnimationStatus::Cancelled
            };
        }
        if let Some(listener) = listener {
            listener(&view, self, kind);
        }
    }

    /// Cancels a running animation through the same path as a runtime cancel event.
    pub fn stop(&self) {
        self.finish(AnimationEventKind::Cancel);
    }

    /// Pauses playback through the view's `animation-paused` property.
    pub fn pause(&self) {
        if let Some(view) = self.view() {
            if view.set("animation-paused", true) {
                self.0.state.borrow_mut().status = AnimationStatus::Paused;
            }
        }
    }

    /// Resumes a paused animation.
    pub fn resume(&self) {
        if let Some(view) = self.view() {
            view.remove("animation-paused");
            self.0.state.borrow_mut().status = AnimationStatus::Running;
        }
    }
}

/// The CSS `animation` shorthand of attached animations, comma separated.
#[must_use]
pub fn animations_css(animations: &[Animation]) -> String {
    animations
        .iter()
        .filter_map(Animation::css)
        .collect::<Vec<_>>()
        .join(", ")
}

pub use transition::transitions_css;

#[cfg(test)]
mod tests;
