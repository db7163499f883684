//! Listener shapes and per-tag listener lists.
//!
//! Events carry zero, one or two arguments (a new and an old value). A
//! [`Listener`] wraps any callable whose parameters are a prefix-compatible
//! subset of `(view, new, old)`; the argument values are passed erased and
//! downcast to the listener's declared type.

use alloc::rc::Rc;
use core::any::Any;
use core::fmt::{self, Debug};

use crate::error::{BindingError, PropertyError};
use crate::value::Value;
use crate::view::View;

type Callback = Rc<dyn Fn(&View, &[&dyn Any])>;

/// Number and kind of parameters a listener accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `()`.
    Empty,
    /// `(view)`.
    View,
    /// `(event)`.
    Event,
    /// `(view, event)`.
    ViewEvent,
    /// `(new, old)`.
    Values,
    /// `(view, new, old)`.
    ViewValues,
    /// A method of the view's binding table, called by name.
    Binding,
}

impl Shape {
    /// Event arguments the shape needs.
    #[must_use]
    pub const fn event_args(self) -> usize {
        match self {
            Self::Empty | Self::View | Self::Binding => 0,
            Self::Event | Self::ViewEvent => 1,
            Self::Values | Self::ViewValues => 2,
        }
    }
}

#[derive(Clone)]
enum Target {
    Func(Callback),
    Binding(String),
}

/// One event listener.
#[derive(Clone)]
pub struct Listener {
    shape: Shape,
    target: Target,
}

fn downcast<'a, E: 'static>(args: &[&'a dyn Any], index: usize) -> Option<&'a E> {
    let arg: &'a dyn Any = *args.get(index)?;
    let value = arg.downcast_ref::<E>();
    if value.is_none() {
        tracing::warn!(
            expected = core::any::type_name::<E>(),
            "listener argument has an unexpected type"
        );
    }
    value
}

impl Listener {
    fn func(shape: Shape, func: impl Fn(&View, &[&dyn Any]) + 'static) -> Self {
        Self {
            shape,
            target: Target::Func(Rc::new(func)),
        }
    }

    /// A listener without parameters.
    pub fn new(func: impl Fn() + 'static) -> Self {
        Self::func(Shape::Empty, move |_, _| func())
    }

    /// A listener receiving the view.
    pub fn view(func: impl Fn(&View) + 'static) -> Self {
        Self::func(Shape::View, move |view, _| func(view))
    }

    /// A listener receiving the event.
    pub fn event<E: 'static>(func: impl Fn(&E) + 'static) -> Self {
        Self::func(Shape::Event, move |_, args| {
            if let Some(event) = downcast::<E>(args, 0) {
                func(event);
            }
        })
    }

    /// A listener receiving the view and the event.
    pub fn view_event<E: 'static>(func: impl Fn(&View, &E) + 'static) -> Self {
        Self::func(Shape::ViewEvent, move |view, args| {
            if let Some(event) = downcast::<E>(args, 0) {
                func(view, event);
            }
        })
    }

    /// A listener receiving the new and the old value.
    pub fn values<E: 'static>(func: impl Fn(&E, &E) + 'static) -> Self {
        Self::func(Shape::Values, move |_, args| {
            if let (Some(new), Some(old)) = (downcast::<E>(args, 0), downcast::<E>(args, 1)) {
                func(new, old);
            }
        })
    }

    /// A listener receiving the view, the new and the old value.
    pub fn view_values<E: 'static>(func: impl Fn(&View, &E, &E) + 'static) -> Self {
        Self::func(Shape::ViewValues, move |view, args| {
            if let (Some(new), Some(old)) = (downcast::<E>(args, 0), downcast::<E>(args, 1)) {
                func(view, new, old);
            }
        })
    }

    /// A listener calling the method `name` of the view's binding table.
    pub fn binding(name: impl Into<String>) -> Self {
        Self {
            shape: Shape::Binding,
            target: Target::Binding(name.into()),
        }
    }

    /// The listener shape.
    #[must_use]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Calls the listener with the view and the event arguments.
    ///
    /// # Errors
    ///
    /// Only binding listeners fail: no binding table, missing method or an arity mismatch.
    pub fn invoke(&self, view: &View, args: &[&dyn Any]) -> Result<(), BindingError> {
        match &self.target {
            Target::Func(func) => {
                func(view, args);
                Ok(())
            }
            Target::Binding(name) => match view.binding() {
                Some(table) => table.call(name, view, args),
                None => Err(BindingError::NoTarget),
            },
        }
    }
}

impl Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Target::Func(_) => write!(f, "Listener({:?})", self.shape),
            Target::Binding(name) => write!(f, "Listener(binding {name:?})"),
        }
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
            && match (&self.target, &other.target) {
                (Target::Func(a), Target::Func(b)) => Rc::ptr_eq(a, b),
                (Target::Binding(a), Target::Binding(b)) => a == b,
                _ => false,
            }
    }
}

/// The listeners of one event tag, in registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventListeners(Vec<Listener>);

impl EventListeners {
    /// A list holding `listener`.
    #[must_use]
    pub fn single(listener: Listener) -> Self {
        Self(vec![listener])
    }

    /// Listeners in order.
    #[must_use]
    pub fn listeners(&self) -> &[Listener] {
        &self.0
    }

    /// Returns `true` when empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Appends a listener.
    pub fn push(&mut self, listener: Listener) {
        self.0.push(listener);
    }

    /// Converts a property value into listeners accepting at most `arity` event arguments.
    ///
    /// Accepts a listener list, a binding method name, or a list of either.
    ///
    /// # Errors
    ///
    /// Fails for other value kinds and listeners that need more arguments than the event has.
    pub fn from_value(tag: &str, value: Value, arity: usize) -> Result<Self, PropertyError> {
        let mut listeners = Vec::new();
        collect(tag, value, &mut listeners)?;
        if listeners
            .iter()
            .any(|listener| listener.shape.event_args() > arity)
        {
            return Err(PropertyError::incompatible(tag, "listener"));
        }
        Ok(Self(listeners))
    }

    /// Calls every listener; binding failures are logged and swallowed.
    pub fn invoke(&self, tag: &str, view: &View, args: &[&dyn Any]) {
        for listener in &self.0 {
            if let Err(error) = listener.invoke(view, args) {
                tracing::warn!(tag, %error, "event listener failed");
            }
        }
    }
}

fn collect(tag: &str, value: Value, listeners: &mut Vec<Listener>) -> Result<(), PropertyError> {
    match value {
        Value::Listeners(list) => listeners.extend(list.0),
        Value::Text(name) => listeners.push(Listener::binding(name.trim())),
        Value::Texts(names) => listeners.extend(names.iter().map(|name| Listener::binding(name.trim()))),
        Value::List(items) => {
            for item in items {
                collect(tag, item, listeners)?;
            }
        }
        other => return Err(PropertyError::incompatible(tag, other.kind())),
    }
    Ok(())
}

impl From<Listener> for EventListeners {
    fn from(listener: Listener) -> Self {
        Self::single(listener)
    }
}

impl FromIterator<Listener> for EventListeners {
    fn from_iter<I: IntoIterator<Item = Listener>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Listener> for Value {
    fn from(listener: Listener) -> Self {
        Self::Listeners(EventListeners::single(listener))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_check() {
        let two = Value::from(Listener::values(|_: &i64, _: &i64| {}));
        assert!(EventListeners::from_value("drop-down-event", two.clone(), 2).is_ok());
        assert!(EventListeners::from_value("focus-event", two, 0).is_err());
        assert!(EventListeners::from_value("focus-event", Value::from(Listener::new(|| {})), 0).is_ok());
        let bound = EventListeners::from_value("click-event", Value::from("onClick"), 1).unwrap();
        assert_eq!(bound.listeners()[0].shape(), Shape::Binding);
        assert!(EventListeners::from_value("click-event", Value::Int(1), 1).is_err());
    }

    #[test]
    fn listener_identity() {
        let listener = Listener::new(|| {});
        assert_eq!(listener, listener.clone());
        assert_ne!(listener, Listener::new(|| {}));
        assert_eq!(Listener::binding("a"), Listener::binding("a"));
    }
}
