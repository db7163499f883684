//! List rendering, selection commands and the events they fire.

use std::cell::RefCell;
use std::rc::Rc;

use rui_core::{DataObject, Listener, Params, Session, Value, View};
use rui_text::TextView;

use crate::{ListView, TextListAdapter};

// ============================================================================
// Test Infrastructure
// ============================================================================

type Calls = Rc<RefCell<Vec<i64>>>;

fn record(list: &View, event: &str) -> Calls {
    let calls: Calls = Rc::default();
    let sink = Rc::clone(&calls);
    assert!(list.set(event, Listener::event::<i64>(move |index| sink.borrow_mut().push(*index))));
    calls
}

fn colors(session: &Session) -> View {
    let list = ListView::create(session, Params::new().with("items", ["red", "green", "blue"]));
    session.set_root(&list);
    list
}

fn message(list: &View, command: &str, number: &str) -> DataObject {
    DataObject::new(command)
        .with("id", list.html_id())
        .with("number", number)
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn item_selected_from_the_page_fires_once() {
    let (session, sink) = Session::headless();
    let list = colors(&session);
    sink.take();
    let selected = record(&list, "list-item-selected");
    let changes = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&changes);
    list.set_change_listener("current", Some(Listener::new(move || *counter.borrow_mut() += 1)));

    session.handle_message(&message(&list, "itemSelected", "1"));
    assert_eq!(ListView::current(&list), 1);
    assert_eq!(*selected.borrow(), vec![1]);
    assert_eq!(*changes.borrow(), 1);
    assert!(sink.is_empty());

    session.handle_message(&message(&list, "itemSelected", "1"));
    assert_eq!(selected.borrow().len(), 1);
}

#[test]
fn item_unselected_clears_current() {
    let (session, _) = Session::headless();
    let list = colors(&session);
    list.set("current", 2);
    let selected = record(&list, "list-item-selected");

    session.handle_message(&DataObject::new("itemUnselected").with("id", list.html_id()));
    assert_eq!(ListView::current(&list), -1);
    assert!(list.get_raw("current").is_none());
    assert_eq!(*selected.borrow(), vec![-1]);

    session.handle_message(&DataObject::new("itemUnselected").with("id", list.html_id()));
    assert_eq!(selected.borrow().len(), 1);
}

#[test]
fn click_selects_then_reports() {
    let (session, _) = Session::headless();
    let list = colors(&session);
    let selected = record(&list, "list-item-selected");
    let clicked = record(&list, "list-item-clicked");

    session.handle_message(&message(&list, "itemClick", "2"));
    session.handle_message(&message(&list, "itemClick", "2"));
    session.handle_message(&message(&list, "itemClick", "7"));
    assert_eq!(*selected.borrow(), vec![2]);
    assert_eq!(*clicked.borrow(), vec![2, 2]);
    assert_eq!(ListView::current(&list), 2);
}

#[test]
fn disabled_items_ignore_clicks() {
    let (session, _) = Session::headless();
    let on = TextView::create(&session, Params::new().with("text", "on"));
    let off = TextView::create(&session, Params::new().with("text", "off").with("disabled", true));
    let list = ListView::create(&session, Params::new().with("items", Value::Views(vec![on, off])));
    session.set_root(&list);
    let clicked = record(&list, "list-item-clicked");

    session.handle_message(&message(&list, "itemClick", "1"));
    session.handle_message(&message(&list, "itemSelected", "1"));
    assert!(clicked.borrow().is_empty());
    assert_eq!(ListView::current(&list), -1);

    let html = list.html();
    assert!(html.contains(&format!("<div id=\"{}-1\" class=\"ruiListItem\"", list.html_id())));
    assert!(html.contains("data-disabled=\"1\""));
}

#[test]
fn programmatic_current_updates_the_page() {
    let (session, sink) = Session::headless();
    let list = colors(&session);
    sink.take();
    let selected = record(&list, "list-item-selected");

    assert!(list.set("current", 2));
    let id = list.html_id();
    assert!(sink.contains(&format!("updateProperty('{id}', 'data-current', '{id}-2');")));
    assert!(sink.contains(&format!("updateInnerHTML('{id}'")));
    assert_eq!(*selected.borrow(), vec![2]);

    assert!(list.set("current", -1));
    assert!(list.get_raw("current").is_none());
    assert_eq!(*selected.borrow(), vec![2, -1]);
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn layout_and_gaps_reach_the_item_box() {
    let (session, _) = Session::headless();
    let list = ListView::create(
        &session,
        Params::new()
            .with("content", ["a", "b"])
            .with("orientation", "horizontal")
            .with("wrap", "on")
            .with("gap", "4px")
            .with("item-width", "40px")
            .with("current", 0),
    );
    assert_eq!(list.get_int("list-wrap"), Some(1));
    let id = list.html_id().to_string();
    let html = list.html();
    assert!(html.contains("onfocus=\"listViewFocusEvent(this, event)\""));
    assert!(html.contains("onkeydown=\"listViewKeyDownEvent(this, event)\""));
    assert!(html.contains("data-focusitemstyle=\"ruiListItemFocused\""));
    assert!(html.contains(&format!("data-current=\"{id}-0\"")));
    assert!(html.contains("flex-direction: row;"));
    assert!(html.contains("flex-wrap: wrap;"));
    assert!(html.contains("row-gap: 4px; column-gap: 4px;"));
    assert!(html.contains(&format!(
        "<div id=\"{id}-0\" class=\"ruiListItem ruiListItemSelected\" \
         style=\"max-width: 100%; max-height: 100%; display: grid; width: 40px;\" \
         onclick=\"listItemClickEvent(this, event)\">"
    )));
    assert_eq!(list.subviews().len(), 2);
}

#[test]
fn text_adapter_views_are_children() {
    let (session, _) = Session::headless();
    let adapter = TextListAdapter::new(vec!["one".into(), "two".into()]);
    let list = ListView::create(&session, Params::new().with("items", adapter));
    list.html();
    let items = list.subviews();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].get_text("text").as_deref(), Some("two"));
    assert_eq!(items[0].parent(), Some(list.clone()));
    assert!(items[0].is_created());
}

#[test]
fn items_reject_other_values() {
    let (session, _) = Session::headless();
    let list = ListView::create(&session, Params::new());
    assert!(!list.set("items", 3));
    assert!(ListView::adapter(&list).is_none());
    assert!(list.set("items", Value::List(vec![Value::from("x"), Value::from("y")])));
    assert_eq!(ListView::adapter(&list).map(|adapter| adapter.count()), Some(2));
}
