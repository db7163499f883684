use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use super::*;
use crate::event::{BindingMethod, MouseEvent, TouchEvent};
use crate::value::Bounds;

struct Plain;

impl Widget for Plain {
    fn type_name(&self) -> &'static str {
        "Plain"
    }
}

struct Focusable;

impl Widget for Focusable {
    fn type_name(&self) -> &'static str {
        "Focusable"
    }

    fn focusable(&self) -> bool {
        true
    }
}

#[derive(Default)]
struct Stack {
    children: RefCell<Vec<View>>,
}

impl Stack {
    fn push(view: &View, child: &View) {
        if let Some(stack) = view.widget::<Self>() {
            child.set_parent(Some(view));
            stack.children.borrow_mut().push(child.clone());
        }
    }
}

impl Widget for Stack {
    fn type_name(&self) -> &'static str {
        "Stack"
    }

    fn subviews(&self, _view: &View) -> Vec<View> {
        self.children.borrow().clone()
    }

    fn html_subviews(&self, _view: &View, buffer: &mut String) {
        for child in self.children.borrow().iter() {
            child.write_html(buffer);
        }
    }
}

fn counter(view: &View, tag: &str) -> Rc<Cell<usize>> {
    let count = Rc::new(Cell::new(0));
    let sink = Rc::clone(&count);
    view.set_change_listener(tag, Some(Listener::new(move || sink.set(sink.get() + 1))));
    count
}

#[test]
fn padding_shorthand_reads_per_side() {
    let (session, _) = Session::headless();
    let view = View::create(&session, Plain, Params::new());
    assert!(view.set("padding", "4px,8px,12px,16px"));
    assert_eq!(view.get_size("padding-top"), Some(Size::px(4.0)));
    assert_eq!(view.get_size("padding-right"), Some(Size::px(8.0)));
    assert_eq!(view.get_size("padding-bottom"), Some(Size::px(12.0)));
    assert_eq!(view.get_size("padding-left"), Some(Size::px(16.0)));

    view.remove("padding");
    for side in ["padding-top", "padding-right", "padding-bottom", "padding-left"] {
        assert!(view.get_size(side).is_none_or(|size| size.is_auto()), "{side}");
    }
}

#[test]
fn side_override_and_removal_restore_shorthand() {
    let (session, _) = Session::headless();
    let view = View::create(&session, Plain, Params::new());
    view.set("margin", "2px");
    view.set("margin-left", "5px");
    assert_eq!(
        view.get("margin"),
        Some(Value::Bounds(Bounds::new(2.0, 2.0, 2.0, 5.0)))
    );
    view.remove("margin-left");
    assert_eq!(view.get("margin"), Some(Value::Bounds(Bounds::all(Size::px(2.0)))));
}

#[test]
fn enum_writes_by_name_and_index() {
    let (session, _) = Session::headless();
    let view = View::create(&session, Plain, Params::new());
    assert!(view.set("animation-direction", "alternate"));
    assert_eq!(view.get_int("animation-direction"), Some(2));
    assert!(view.set("animation-direction", 3));
    assert_eq!(view.get_int("animation-direction"), Some(3));
    assert!(!view.set("animation-direction", "nonsense"));
    assert_eq!(view.get_int("animation-direction"), Some(3));
}

#[test]
fn auto_size_and_zero_color_remove() {
    let (session, _) = Session::headless();
    let view = View::create(&session, Plain, Params::new());
    view.set("width", "10px");
    view.set("background-color", Color::new(0xFF11_2233));
    assert!(view.set("width", "auto"));
    assert!(view.set("background-color", Color::new(0)));
    assert!(view.tags().is_empty());
}

#[test]
fn equal_write_does_not_notify() {
    let (session, _) = Session::headless();
    let view = View::create(&session, Plain, Params::new());
    let count = counter(&view, "width");
    view.set("width", "10px");
    view.set("width", 10);
    view.set("width", Size::px(10.0));
    assert_eq!(count.get(), 1);
    view.set("width", "12px");
    assert_eq!(count.get(), 2);
}

#[test]
fn failed_write_leaves_map_untouched() {
    let (session, sink) = Session::headless();
    let view = View::create(&session, Plain, Params::new());
    session.set_root(&view);
    view.set("opacity", 0.5);
    sink.take();
    let before = view.tags();
    let count = counter(&view, "opacity");
    assert!(!view.set("opacity", 2.0));
    assert!(!view.set("opacity", "half"));
    assert!(!view.set("frobnicate", 1));
    assert_eq!(view.tags(), before);
    assert_eq!(view.get_float("opacity"), Some(0.5));
    assert_eq!(count.get(), 0);
    assert!(sink.is_empty());
    assert!(matches!(
        view.try_set("opacity", 2.0),
        Err(PropertyError::OutOfRange { .. })
    ));
}

#[test]
fn disabled_reaches_every_descendant() {
    let (session, _) = Session::headless();
    let root = View::create(&session, Stack::default(), Params::new());
    let middle = View::create(&session, Stack::default(), Params::new());
    let leaf = View::create(&session, Plain, Params::new());
    Stack::push(&root, &middle);
    Stack::push(&middle, &leaf);

    root.set("disabled", true);
    assert!(middle.is_disabled());
    assert!(leaf.is_disabled());
    assert_eq!(leaf.get_bool("disabled"), Some(true));

    root.set("disabled", false);
    assert!(!leaf.is_disabled());
    assert_eq!(leaf.parent_id(), middle.html_id());
    leaf.set_parent(None);
    assert!(leaf.parent_id().is_empty());
}

#[test]
fn styles_inheritance_and_constants() {
    let (session, _) = Session::headless();
    session.set_style("big", Properties::new().with("text-size", "20px"));
    session.set_style("muted", Properties::new().with("opacity", 0.4));
    session.set_constant("gap", "6px");

    let root = View::create(&session, Stack::default(), [("style", Value::from("big"))].into());
    let child = View::create(&session, Plain, Params::new().with("padding", "@gap"));
    Stack::push(&root, &child);

    assert_eq!(root.get_size("text-size"), Some(Size::px(20.0)));
    assert_eq!(child.get_size("text-size"), Some(Size::px(20.0)));
    assert_eq!(child.get_size("padding-left"), Some(Size::px(6.0)));
    assert_eq!(child.get_raw("padding"), Some(Value::Constant("gap".into())));

    child.set("style-disabled", "muted");
    assert_eq!(child.get_float("opacity"), Some(1.0));
    child.set("disabled", true);
    assert_eq!(child.get_float("opacity"), Some(0.4));
    assert!(child.html_class(true).ends_with("ruiView muted"));
}

#[test]
fn writes_after_creation_emit_minimal_updates() {
    let (session, sink) = Session::headless();
    let view = View::create(&session, Plain, Params::new());
    view.set("width", "10px");
    assert!(sink.is_empty());

    session.set_root(&view);
    assert_eq!(sink.len(), 1);
    assert!(sink.contains("updateInnerHTML('ruiRootView'"));
    sink.take();

    view.set("width", "12px");
    assert_eq!(sink.take(), vec!["updateCSSProperty('id000001', 'width', '12px');".to_string()]);

    view.set("margin", "1px,2px,3px,4px");
    assert_eq!(
        sink.take(),
        vec!["updateCSSProperty('id000001', 'margin', '1px 2px 3px 4px');".to_string()]
    );

    view.set("border", "solid 2px red");
    let scripts = sink.take();
    assert_eq!(scripts.len(), 1);
    assert!(scripts[0].starts_with("{\nlet element = document.getElementById('id000001');"));
    assert!(scripts[0].contains("element.style['border-style'] = 'solid';"));
    assert!(scripts[0].ends_with("scanElementsSize();\n}\n}\n"));
}

#[test]
fn shorthand_families_reach_the_style_attribute() {
    let (session, sink) = Session::headless();
    let params = Params::new().with("border", "solid 2px red").with("radius", "4px");
    let view = View::create(&session, Plain, params);
    let html = view.html();
    assert!(html.contains("border-style: solid;"));
    assert!(html.contains("border-width: 2px;"));
    assert!(html.contains("border-color: rgb(255,0,0);"));
    assert!(html.contains("border-radius: 4px;"));

    session.set_root(&view);
    sink.take();
    view.set("border-left-color", "blue");
    let scripts = sink.take();
    assert_eq!(scripts.len(), 1);
    assert!(scripts[0].contains("element.style['border-style'] = 'solid';"));
    assert!(scripts[0].contains("rgb(255,0,0) rgb(255,0,0) rgb(255,0,0) rgb(0,0,255)"));
}

#[test]
fn visibility_updates_reach_the_dom() {
    let (session, sink) = Session::headless();
    let view = View::create(&session, Plain, Params::new());
    session.set_root(&view);
    sink.take();

    view.set("visibility", "gone");
    let scripts = sink.take();
    let batch = scripts
        .iter()
        .find(|script| script.contains("getElementById('id000001')"))
        .unwrap();
    assert!(batch.contains("element.style['visibility'] = 'hidden';"));
    assert!(batch.contains("element.style['display'] = 'none';"));
    assert!(scripts.iter().any(|script| script.contains("hideTooltip")));

    view.set("visibility", "visible");
    let scripts = sink.take();
    assert_eq!(scripts.len(), 1);
    assert!(scripts[0].contains("element.style['visibility'] = 'visible';"));
}

#[test]
fn transform_group_renders_once_and_updates_whole() {
    let (session, sink) = Session::headless();
    let params = Params::new()
        .with("rotate", "30deg")
        .with("scale-x", 2.0)
        .with("origin-x", "10px");
    let view = View::create(&session, Plain, params);
    let html = view.html();
    assert_eq!(html.matches("transform:").count(), 1);
    assert!(html.contains("transform-origin: 10px 50%;"));
    assert!(html.contains("transform: scale(2,1) rotate(30deg);"));

    session.set_root(&view);
    sink.take();
    view.set("perspective", "200px");
    let scripts = sink.take();
    assert_eq!(scripts.len(), 1);
    assert!(scripts[0].contains("element.style['perspective'] = '200px';"));
    assert!(scripts[0].contains("element.style['transform-origin'] = '10px 50% 0';"));
    assert!(scripts[0].contains("element.style['transform'] = 'scale3d(2,1,1) rotate3d(1,1,1,30deg)';"));

    view.remove("perspective");
    let scripts = sink.take();
    assert!(scripts[0].contains("element.style['perspective'] = '';"));
    assert!(scripts[0].contains("element.style['transform'] = 'scale(2,1) rotate(30deg)';"));
}

#[test]
fn filters_and_clip_shapes_reach_the_dom() {
    let (session, sink) = Session::headless();
    let params = Params::new()
        .with("filter", "filter{blur = 2, invert = 50}")
        .with("clip", "inset{top = 4px, radius = 2px}");
    let view = View::create(&session, Plain, params);
    let html = view.html();
    assert!(html.contains("filter: blur(2px) invert(50%);"));
    assert!(html.contains("clip-path: inset(4px 0px 0px 0px round 2px);"));

    session.set_root(&view);
    sink.take();
    view.set("backdrop-filter", "filter{hue-rotate = 0.5turn}");
    assert!(sink.contains("hue-rotate(0.5turn)"));
    view.set("shape-outside", "circle{radius = 10px}");
    assert!(sink.contains("circle(10px at 50% 50%)"));
    assert!(!view.set("filter", "filter{contrast = -1}"));
}

#[test]
fn html_composition() {
    let (session, _) = Session::headless();
    let root = View::create(&session, Stack::default(), Params::new().with("width", "50%"));
    let child = View::create(&session, Focusable, Params::new().with("tooltip", "a<b"));
    Stack::push(&root, &child);
    child.set("click-event", Listener::new(|| {}));

    let html = root.html();
    assert!(html.starts_with("<div id=\"id000001\" class=\"ruiView\" style=\"width: 50%;\" data-disabled=\"0\""));
    assert!(html.contains("<div id=\"id000002\""));
    assert!(html.contains("tabindex=\"0\""));
    assert!(html.contains("data-tooltip=\"a&lt;b\""));
    assert!(html.contains("onclick=\"clickEvent(this, event)\""));
    assert!(html.contains("onkeydown=\"keyDownEvent(this, event)\""));
    assert!(html.ends_with("</div></div>"));
    assert!(root.is_created() && child.is_created());
}

#[test]
fn activation_key_synthesizes_click() {
    let (session, _) = Session::headless();
    let view = View::create(&session, Focusable, Params::new());
    let clicks = Rc::new(Cell::new(0));
    let sink = Rc::clone(&clicks);
    view.set(
        "click-event",
        Listener::event::<MouseEvent>(move |_| sink.set(sink.get() + 1)),
    );
    let key = DataObject::new("key-down-event")
        .with("id", view.html_id())
        .with("code", "Enter");
    session.handle_message(&key);
    assert_eq!(clicks.get(), 1);

    let other = DataObject::new("key-down-event")
        .with("id", view.html_id())
        .with("code", "KeyA");
    session.handle_message(&other);
    assert_eq!(clicks.get(), 1);
}

#[test]
fn touch_listeners_receive_contacts() {
    let (session, sink) = Session::headless();
    let view = View::create(&session, Plain, Params::new());
    session.set_root(&view);
    sink.take();

    let contacts = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&contacts);
    assert!(view.set(
        "touch-start",
        Listener::event::<TouchEvent>(move |event| {
            seen.borrow_mut().extend(event.touches.iter().map(|touch| (touch.identifier, touch.x)));
        }),
    ));
    assert!(sink.contains("ontouchstart"));
    assert!(view.html().contains("ontouchstart=\"touchStartEvent(this, event)\""));

    let message = DataObject::parse(&format!(
        "touch-start{{id={}, touches=[_{{identifier=1, x=10}}, _{{identifier=2, x=20}}]}}",
        view.html_id()
    ))
    .unwrap();
    session.handle_message(&message);
    assert_eq!(*contacts.borrow(), vec![(1, 10.0), (2, 20.0)]);
}

#[test]
fn binding_listener_calls_named_method() {
    let (session, _) = Session::headless();
    let hits = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&hits);
    let table = BindingTable::new().with(
        "onClick",
        BindingMethod::with_view(move |view: &View| sink.borrow_mut().push(view.html_id().to_string())),
    );
    let root = View::create(&session, Stack::default(), Params::new().with("binding", table));
    let child = View::create(&session, Plain, Params::new());
    Stack::push(&root, &child);
    assert!(child.set("click-event", "onClick"));
    assert!(child.set("double-click-event", "missing"));

    session.handle_message(&DataObject::new("click-event").with("id", child.html_id()));
    session.handle_message(&DataObject::new("double-click-event").with("id", child.html_id()));
    assert_eq!(*hits.borrow(), vec![child.html_id().to_string()]);
}

#[test]
fn listener_arity_is_checked() {
    let (session, _) = Session::headless();
    let view = View::create(&session, Plain, Params::new());
    assert!(!view.set("focus-event", Listener::event::<MouseEvent>(|_| {})));
    assert!(view.listeners("focus-event").is_empty());
    assert!(view.set("focus-event", Listener::view(|_| {})));
}

#[test]
fn lookup_by_user_id() {
    let (session, _) = Session::headless();
    let root = View::create(&session, Stack::default(), Params::new().with("id", "root"));
    let panel = View::create(&session, Stack::default(), Params::new().with("id", "panel"));
    let label = View::create(&session, Plain, Params::new().with("id", "label"));
    Stack::push(&root, &panel);
    Stack::push(&panel, &label);
    assert_eq!(root.view_by_id("label"), Some(label.clone()));
    assert_eq!(root.view_by_id("panel/label"), Some(label));
    assert!(root.view_by_id("nothing").is_none());
}

#[test]
fn resize_updates_frame() {
    let (session, _) = Session::headless();
    let view = View::create(&session, Plain, Params::new());
    let frames = Rc::new(Cell::new(0));
    let sink = Rc::clone(&frames);
    view.set("resize-event", Listener::event::<Frame>(move |_| sink.set(sink.get() + 1)));
    let message = DataObject::parse(&format!(
        "resize{{views=[_{{id={}, x=1, y=2, width=30, height=40}}]}}",
        view.html_id()
    ))
    .unwrap();
    session.handle_message(&message);
    session.handle_message(&message);
    assert_eq!(view.frame().width, 30.0);
    assert_eq!(view.frame().top, 2.0);
    assert_eq!(frames.get(), 1);
}
