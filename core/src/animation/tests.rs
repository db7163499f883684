use alloc::rc::Rc;
use core::cell::RefCell;

use super::*;
use crate::data::DataObject;
use crate::session::Session;
use crate::value::{Color, Size};
use crate::view::{Params, View, Widget};

struct Plain;

impl Widget for Plain {
    fn type_name(&self) -> &'static str {
        "Plain"
    }
}

fn rendered(session: &Session) -> View {
    let view = View::create(session, Plain, Params::new());
    session.set_root(&view);
    view
}

fn width_animation() -> Animation {
    Animation::builder()
        .property(AnimatedProperty::new("width", "100px", "300px").with_key_frame(50, "200px"))
        .duration(2.0)
        .build()
        .unwrap()
}

type Events = Rc<RefCell<Vec<AnimationEventKind>>>;

fn recorder() -> (Events, impl Fn(&View, &Animation, AnimationEventKind) + 'static) {
    let events: Events = Rc::default();
    let sink = Rc::clone(&events);
    (events, move |_: &View, _: &Animation, kind: AnimationEventKind| sink.borrow_mut().push(kind))
}

fn runtime_event(view: &View, command: &str, field: &str, value: &str) -> DataObject {
    DataObject::new(command)
        .with("id", view.html_id())
        .with(field, value)
}

#[test]
fn keyframes_and_end_restore_listeners() {
    let (session, sink) = Session::headless();
    let view = rendered(&session);
    let noop = Listener::new(|| {});
    view.set("animation-end-event", noop.clone());
    view.set("animation-start-event", Listener::view(|_| {}));
    let before_end = view.listeners("animation-end-event");
    let before_start = view.listeners("animation-start-event");

    let animation = width_animation();
    let (events, listener) = recorder();
    assert!(animation.start(&view, listener));
    assert_eq!(animation.status(), AnimationStatus::Running);
    assert_eq!(animation.keyframes_name().as_deref(), Some("kf000001"));
    assert_eq!(session.keyframes_uses("kf000001"), 1);
    assert!(sink.contains("@keyframes kf000001"));
    assert!(sink.contains("from { width: 100px; }"));
    assert!(sink.contains("50% { width: 200px; }"));
    assert!(sink.contains("to { width: 300px; }"));
    assert!(sink.contains("kf000001 2s ease 0s 1 normal"));
    assert_eq!(view.listeners("animation-end-event").len(), 2);
    assert_eq!(view.listeners("animation-cancel-event").len(), 1);

    session.handle_message(&runtime_event(&view, "animation-end-event", "name", "kf000001"));

    assert_eq!(*events.borrow(), vec![AnimationEventKind::End]);
    assert_eq!(animation.status(), AnimationStatus::Ended);
    assert_eq!(view.get_size("width"), Some(Size::px(300.0)));
    assert_eq!(view.listeners("animation-end-event"), before_end);
    assert_eq!(view.listeners("animation-start-event"), before_start);
    assert!(view.listeners("animation-cancel-event").is_empty());
    assert!(view.listeners("animation-iteration-event").is_empty());
    assert!(view.get_raw("animation").is_none());
    assert_eq!(session.keyframes_count(), 0);
}

#[test]
fn stop_takes_the_end_path_with_cancel() {
    let (session, _) = Session::headless();
    let view = rendered(&session);
    let animation = width_animation();
    let (events, listener) = recorder();
    assert!(animation.start(&view, listener));
    assert!(!animation.start(&view, |_, _, _| {}));

    animation.stop();
    assert_eq!(*events.borrow(), vec![AnimationEventKind::Cancel]);
    assert_eq!(animation.status(), AnimationStatus::Cancelled);
    assert_eq!(view.get_size("width"), Some(Size::px(300.0)));
    assert!(view.listeners("animation-end-event").is_empty());
    assert!(view.get_raw("animation").is_none());
}

#[test]
fn start_and_iteration_are_reported_without_finishing() {
    let (session, _) = Session::headless();
    let view = rendered(&session);
    let animation = width_animation();
    let (events, listener) = recorder();
    animation.start(&view, listener);

    session.handle_message(&runtime_event(&view, "animation-start-event", "name", "kf000001"));
    session.handle_message(&runtime_event(&view, "animation-iteration-event", "name", "kf000001"));
    session.handle_message(&runtime_event(&view, "animation-end-event", "name", "kf999999"));
    assert_eq!(
        *events.borrow(),
        vec![AnimationEventKind::Start, AnimationEventKind::Iteration]
    );
    assert_eq!(animation.status(), AnimationStatus::Running);
}

#[test]
fn pause_and_resume_toggle_play_state() {
    let (session, sink) = Session::headless();
    let view = rendered(&session);
    let animation = width_animation();
    animation.start(&view, |_, _, _| {});

    animation.pause();
    assert_eq!(animation.status(), AnimationStatus::Paused);
    assert_eq!(view.get_bool("animation-paused"), Some(true));
    assert!(sink.contains("animation-play-state"));

    animation.resume();
    assert_eq!(animation.status(), AnimationStatus::Running);
    assert!(view.get_raw("animation-paused").is_none());
}

#[test]
fn shared_keyframes_released_after_last_use() {
    let (session, sink) = Session::headless();
    let first = rendered(&session);
    let second = View::create(&session, Plain, Params::new());
    let a = width_animation();
    let b = width_animation();
    a.start(&first, |_, _, _| {});
    b.start(&second, |_, _, _| {});
    assert_eq!(a.keyframes_name(), b.keyframes_name());
    assert_eq!(session.keyframes_uses("kf000001"), 2);
    assert_eq!(session.keyframes_count(), 1);

    a.stop();
    assert_eq!(session.keyframes_uses("kf000001"), 1);
    sink.take();
    b.stop();
    assert_eq!(session.keyframes_uses("kf000001"), 0);
    assert_eq!(session.keyframes_count(), 0);
    assert!(sink.contains("styles.textContent = '';"));
}

#[test]
fn animation_property_requires_both_ends() {
    let (session, _) = Session::headless();
    let view = rendered(&session);
    let object = DataObject::parse("animation { property = _{ tag = width, from = 1px }, duration = 1 }").unwrap();
    assert!(matches!(
        Animation::from_object(&object),
        Err(PropertyError::IncompleteAnimatedProperty(tag)) if tag == "width"
    ));

    let empty = Animation::builder().build().unwrap();
    assert!(!empty.start(&view, |_, _, _| {}));
    assert!(view.listeners("animation-end-event").is_empty());
    assert!(!view.set("animation", empty));
    assert!(view.get_raw("animation").is_none());
}

#[test]
fn animation_from_resource_object() {
    let object = DataObject::parse(
        "animation { property = _{ tag = opacity, from = 0, to = 1 }, duration = 0.5, delay = 0.1, \
         timing-function = \"steps(4)\", iteration-count = 3, animation-direction = alternate }",
    )
    .unwrap();
    let animation = Animation::from_object(&object).unwrap();
    assert_eq!(animation.duration(), 0.5);
    assert_eq!(animation.delay(), 0.1);
    assert_eq!(animation.timing(), "steps(4)");
    assert_eq!(animation.iteration_count(), 3);
    assert_eq!(animation.direction(), 2);
    assert_eq!(animation.properties()[0].tag(), "opacity");
}

#[test]
fn transition_round_trip() {
    let (session, sink) = Session::headless();
    let view = rendered(&session);
    let slow = Animation::transition(0.5, "", 0.0).unwrap();
    assert!(view.set_transition("background-color", Some(slow.clone())));
    view.set("background-color", Color::new(0xFF00_0000));
    assert!(sink.contains("background-color 0.5s"));

    let fast = Animation::transition(0.2, timing::LINEAR, 0.0).unwrap();
    assert!(view.set_animated("background-color", Color::new(0xFFFF_FFFF), &fast));
    assert_eq!(view.saved_transition("background-color"), Some(Some(slow.clone())));
    assert_eq!(view.transition("background-color"), Some(fast));
    assert!(sink.contains("ontransitionend"));
    assert!(sink.contains("background-color 0.2s linear"));
    assert_eq!(view.get_color("background-color"), Some(Color::new(0xFFFF_FFFF)));

    sink.take();
    session.handle_message(&runtime_event(&view, "transition-end-event", "property", "background-color"));
    assert_eq!(view.saved_transition("background-color"), None);
    assert_eq!(view.transition("background-color"), Some(slow));
    assert!(sink.contains("background-color 0.5s"));
}

#[test]
fn animated_set_resolves_timing_constants() {
    let (session, sink) = Session::headless();
    let view = rendered(&session);
    session.set_constant("snappy", "cubic-bezier(-1, 0.5, 2, 1)");
    let snappy = Animation::transition(0.4, "@snappy", 0.0).unwrap();
    assert_eq!(snappy.timing(), "@snappy");

    assert!(view.set_animated("opacity", 0.5, &snappy));
    assert!(sink.contains("opacity 0.4s cubic-bezier(0, 0.5, 1, 1)"));
    assert_eq!(
        view.transition("opacity").map(|animation| animation.timing().to_string()),
        Some("cubic-bezier(0, 0.5, 1, 1)".to_string())
    );

    sink.take();
    let missing = Animation::transition(0.4, "@nowhere", 0.0).unwrap();
    assert!(view.set_animated("width", "10px", &missing));
    assert_eq!(view.transition("width"), None);
    assert!(!sink.contains("nowhere"));
    assert!(Animation::transition(0.4, "bounce", 0.0).is_err());
}

#[test]
fn rejected_animated_set_restores_transition() {
    let (session, _) = Session::headless();
    let view = rendered(&session);
    let fast = Animation::transition(0.2, "", 0.0).unwrap();
    assert!(!view.set_animated("width", "wide", &fast));
    assert_eq!(view.transition("width"), None);
    assert_eq!(view.saved_transition("width"), None);
    assert!(view.get_raw("transition").is_none());
}

#[test]
fn transition_css_entries() {
    let mut transitions = BTreeMap::new();
    transitions.insert("opacity".to_string(), Animation::transition(1.0, "", 0.0).unwrap());
    transitions.insert(
        "text-size".to_string(),
        Animation::transition(0.3, timing::EASE_IN, 0.1).unwrap(),
    );
    assert_eq!(
        transitions_css(&transitions),
        "opacity 1s, font-size 0.3s ease-in 0.1s"
    );
}
