//! DOM events a view can listen to, and the runtime handlers that report them.

/// Argument family of a DOM event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFamily {
    /// Focus changes; no argument.
    Focus,
    /// [`super::KeyEvent`].
    Key,
    /// [`super::MouseEvent`].
    Mouse,
    /// [`super::PointerEvent`].
    Pointer,
    /// [`super::TouchEvent`].
    Touch,
    /// The property tag of the transition, as a `String`.
    Transition,
    /// The id of the animation, as a `String`.
    Animation,
}

/// One DOM event tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventKind {
    /// Property tag holding the listeners.
    pub tag: &'static str,
    /// Argument family.
    pub family: EventFamily,
    /// Element attribute, e.g. `onclick`.
    pub js_event: &'static str,
    /// Runtime handler, e.g. `clickEvent`.
    pub js_func: &'static str,
}

impl EventKind {
    const fn new(tag: &'static str, family: EventFamily, js_event: &'static str, js_func: &'static str) -> Self {
        Self {
            tag,
            family,
            js_event,
            js_func,
        }
    }

    /// Number of event arguments besides the view.
    #[must_use]
    pub const fn arity(&self) -> usize {
        match self.family {
            EventFamily::Focus => 0,
            _ => 1,
        }
    }

    /// The attribute value, e.g. `clickEvent(this, event)`.
    #[must_use]
    pub fn handler(&self) -> String {
        format!("{}(this, event)", self.js_func)
    }
}

use EventFamily::{Animation, Focus, Key, Mouse, Pointer, Touch, Transition};

/// Every DOM event tag.
pub static DOM_EVENTS: &[EventKind] = &[
    EventKind::new("focus-event", Focus, "onfocus", "focusEvent"),
    EventKind::new("lost-focus-event", Focus, "onblur", "blurEvent"),
    EventKind::new("key-down-event", Key, "onkeydown", "keyDownEvent"),
    EventKind::new("key-up-event", Key, "onkeyup", "keyUpEvent"),
    EventKind::new("click-event", Mouse, "onclick", "clickEvent"),
    EventKind::new("double-click-event", Mouse, "ondblclick", "doubleClickEvent"),
    EventKind::new("mouse-down", Mouse, "onmousedown", "mouseDownEvent"),
    EventKind::new("mouse-up", Mouse, "onmouseup", "mouseUpEvent"),
    EventKind::new("mouse-move", Mouse, "onmousemove", "mouseMoveEvent"),
    EventKind::new("mouse-out", Mouse, "onmouseout", "mouseOutEvent"),
    EventKind::new("mouse-over", Mouse, "onmouseover", "mouseOverEvent"),
    EventKind::new("context-menu-event", Mouse, "oncontextmenu", "contextMenuEvent"),
    EventKind::new("pointer-down", Pointer, "onpointerdown", "pointerDownEvent"),
    EventKind::new("pointer-up", Pointer, "onpointerup", "pointerUpEvent"),
    EventKind::new("pointer-move", Pointer, "onpointermove", "pointerMoveEvent"),
    EventKind::new("pointer-cancel", Pointer, "onpointercancel", "pointerCancelEvent"),
    EventKind::new("pointer-out", Pointer, "onpointerout", "pointerOutEvent"),
    EventKind::new("pointer-over", Pointer, "onpointerover", "pointerOverEvent"),
    EventKind::new("touch-start", Touch, "ontouchstart", "touchStartEvent"),
    EventKind::new("touch-end", Touch, "ontouchend", "touchEndEvent"),
    EventKind::new("touch-move", Touch, "ontouchmove", "touchMoveEvent"),
    EventKind::new("touch-cancel", Touch, "ontouchcancel", "touchCancelEvent"),
    EventKind::new("transition-run-event", Transition, "ontransitionrun", "transitionRunEvent"),
    EventKind::new("transition-start-event", Transition, "ontransitionstart", "transitionStartEvent"),
    EventKind::new("transition-end-event", Transition, "ontransitionend", "transitionEndEvent"),
    EventKind::new("transition-cancel-event", Transition, "ontransitioncancel", "transitionCancelEvent"),
    EventKind::new("animation-start-event", Animation, "onanimationstart", "animationStartEvent"),
    EventKind::new("animation-end-event", Animation, "onanimationend", "animationEndEvent"),
    EventKind::new("animation-iteration-event", Animation, "onanimationiteration", "animationIterationEvent"),
    EventKind::new("animation-cancel-event", Animation, "onanimationcancel", "animationCancelEvent"),
];

/// Listener tags that are not DOM attributes: `(tag, arity)`.
pub static VIEW_EVENTS: &[(&str, usize)] = &[("resize-event", 1), ("scroll-event", 1)];

/// Looks up a DOM event tag.
#[must_use]
pub fn dom_event(tag: &str) -> Option<&'static EventKind> {
    DOM_EVENTS.iter().find(|kind| kind.tag == tag)
}

/// Event arity of a general view event tag.
#[must_use]
pub fn view_event_arity(tag: &str) -> Option<usize> {
    dom_event(tag)
        .map(EventKind::arity)
        .or_else(|| {
            VIEW_EVENTS
                .iter()
                .find(|(name, _)| *name == tag)
                .map(|(_, arity)| *arity)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        let click = dom_event("click-event").unwrap();
        assert_eq!(click.js_event, "onclick");
        assert_eq!(click.handler(), "clickEvent(this, event)");
        assert_eq!(view_event_arity("focus-event"), Some(0));
        assert_eq!(view_event_arity("resize-event"), Some(1));
        assert_eq!(view_event_arity("width"), None);
        let touch = dom_event("touch-move").unwrap();
        assert_eq!(touch.family, EventFamily::Touch);
        assert_eq!(touch.handler(), "touchMoveEvent(this, event)");
    }
}
