//! Container behavior: child list edits, disabled propagation and the DOM
//! updates each layout emits.

use std::cell::Cell;
use std::rc::Rc;

use rui_core::{DataObject, Listener, Params, Range, RecordingSink, Session, Size, Value, View};
use rui_text::{TextView, text};

use crate::container::CONTENT;
use crate::{ContainerExt, DetailsView, GridLayout, ListLayout, ViewsContainer};

// ============================================================================
// Test Infrastructure
// ============================================================================

fn rendered(session: &Session, view: &View, sink: &RecordingSink) {
    session.set_root(view);
    sink.take();
}

fn labels(session: &Session, count: usize) -> Vec<View> {
    (0..count).map(|index| text(session, format!("item {index}"))).collect()
}

fn change_counter(view: &View, tag: &str) -> Rc<Cell<usize>> {
    let count = Rc::new(Cell::new(0));
    let sink = Rc::clone(&count);
    view.set_change_listener(tag, Some(Listener::new(move || sink.set(sink.get() + 1))));
    count
}

// ============================================================================
// Child List
// ============================================================================

#[test]
fn append_puts_the_child_last() {
    let (session, _) = Session::headless();
    let container = ViewsContainer::create(&session, Params::new());
    let [a, b, c]: [View; 3] = labels(&session, 3).try_into().unwrap();
    container.append(a.clone());
    container.append(b.clone());
    container.append(c.clone());
    assert_eq!(container.index_of(&c), Some(2));
    assert_eq!(c.parent(), Some(container.clone()));

    container.append(a.clone());
    assert_eq!(container.views(), vec![b, c, a.clone()]);
    assert_eq!(container.index_of(&a), Some(2));
}

#[test]
fn insert_clamps_the_index() {
    let (session, _) = Session::headless();
    let container = ViewsContainer::create(&session, Params::new());
    let [a, b, c, d]: [View; 4] = labels(&session, 4).try_into().unwrap();
    container.append(a.clone());
    container.append(b);
    container.insert(c.clone(), 0);
    assert_eq!(container.index_of(&c), Some(0));
    container.insert(d.clone(), 99);
    assert_eq!(container.index_of(&d), Some(3));
    assert_eq!(container.index_of(&a), Some(1));
}

#[test]
fn remove_returns_the_previous_child_unlinked() {
    let (session, _) = Session::headless();
    let container = ViewsContainer::create(&session, Params::new());
    for label in labels(&session, 3) {
        container.append(label);
    }
    let middle = container.views()[1].clone();
    let removed = container.remove_view(1).unwrap();
    assert_eq!(removed, middle);
    assert!(removed.parent().is_none());
    assert_eq!(container.views_count(), 2);
    assert!(container.remove_view(5).is_none());
}

#[test]
fn content_accepts_views_and_text() {
    let (session, _) = Session::headless();
    let label = text(&session, "a");
    let container = ViewsContainer::create(
        &session,
        Params::new().with(CONTENT, vec![Value::from(label.clone()), Value::from("b")]),
    );
    let views = container.views();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0], label);
    assert!(views[1].widget::<TextView>().is_some());
    assert_eq!(views[1].get_text("text").as_deref(), Some("b"));

    assert!(!container.set(CONTENT, 5));
    assert_eq!(container.views_count(), 2);

    container.remove(CONTENT);
    assert!(container.views().is_empty());
    assert!(label.parent().is_none());
}

#[test]
fn user_ids_are_found_through_content() {
    let (session, _) = Session::headless();
    let inner = ViewsContainer::create(&session, Params::new().with("id", "inner"));
    let leaf = TextView::create(&session, Params::new().with("id", "leaf").with("text", "x"));
    inner.append(leaf.clone());
    let outer = ViewsContainer::create(&session, Params::new().with(CONTENT, inner));
    assert_eq!(outer.view_by_id("inner/leaf"), Some(leaf));
    assert_eq!(outer.remove_view_by_id("inner").map(|view| view.id()), Some("inner".to_string()));
}

// ============================================================================
// Disabled Propagation
// ============================================================================

#[test]
fn disabling_reaches_every_descendant() {
    let (session, _) = Session::headless();
    let leaf = text(&session, "leaf");
    let inner = ListLayout::create(&session, Params::new().with(CONTENT, leaf.clone()));
    let outer = GridLayout::create(&session, Params::new().with(CONTENT, inner.clone()));
    let details = DetailsView::create(&session, Params::new().with(CONTENT, outer.clone()));

    details.set("disabled", true);
    for view in [&outer, &inner, &leaf] {
        assert!(view.is_disabled(), "{}", view.type_name());
    }
    let late = text(&session, "late");
    inner.append(late.clone());
    assert!(late.is_disabled());

    details.set("disabled", false);
    assert!(!leaf.is_disabled());
}

// ============================================================================
// DOM Updates
// ============================================================================

#[test]
fn append_to_rendered_container_appends_html() {
    let (session, sink) = Session::headless();
    let container = ViewsContainer::create(&session, Params::new());
    rendered(&session, &container, &sink);
    let count = change_counter(&container, CONTENT);

    let label = text(&session, "new");
    container.append(label.clone());
    let scripts = sink.take();
    assert_eq!(scripts.len(), 1);
    assert!(scripts[0].starts_with(&format!("appendToInnerHTML('{}', ", container.html_id())));
    assert!(scripts[0].contains(label.html_id()));
    assert!(label.is_created());
    assert_eq!(count.get(), 1);

    container.insert(text(&session, "first"), 0);
    let scripts = sink.take();
    assert_eq!(scripts.len(), 1);
    assert!(scripts[0].starts_with(&format!("updateInnerHTML('{}', ", container.html_id())));
    assert_eq!(count.get(), 2);
}

#[test]
fn unrendered_container_emits_nothing() {
    let (session, sink) = Session::headless();
    let container = ViewsContainer::create(&session, Params::new());
    container.append(text(&session, "a"));
    container.insert(text(&session, "b"), 0);
    container.remove_view(0);
    assert!(sink.is_empty());
}

#[test]
fn list_layout_flex_box() {
    let (session, sink) = Session::headless();
    let list = ListLayout::create(
        &session,
        Params::new()
            .with("orientation", "horizontal")
            .with("list-wrap", "on")
            .with("list-column-gap", "4px")
            .with("vertical-align", "center"),
    );
    let style = list.inline_style();
    assert!(style.contains("display: flex;"));
    assert!(style.contains("flex-direction: row;"));
    assert!(style.contains("flex-wrap: wrap;"));
    assert!(style.contains("column-gap: 4px;"));
    assert!(style.contains("align-items: center;"));
    assert!(style.contains("justify-content: flex-start;"));

    rendered(&session, &list, &sink);
    list.set("orientation", "bottom-up");
    let scripts = sink.take();
    assert_eq!(scripts.len(), 1);
    assert!(scripts[0].contains("element.style['flex-direction'] = 'column-reverse';"));
    assert!(scripts[0].contains("element.style['justify-content'] = 'center';"));
    assert!(scripts[0].contains("element.style['align-items'] = 'flex-start';"));
}

#[test]
fn grid_gap_writes_both_axes() {
    let (session, _) = Session::headless();
    let grid = GridLayout::create(
        &session,
        Params::new()
            .with("cell-width", "1fr,2fr")
            .with("gap", "8px"),
    );
    assert_eq!(grid.get_size("grid-row-gap"), Some(Size::px(8.0)));
    assert_eq!(grid.get_size("grid-column-gap"), Some(Size::px(8.0)));
    assert_eq!(grid.get_size("gap"), Some(Size::px(8.0)));
    grid.set("grid-column-gap", "2px");
    assert!(grid.get("gap").is_none());

    let cell = text(&session, "cell");
    GridLayout::place(&cell, Range::single(1), Range::new(0, 1));
    grid.append(cell.clone());
    let style = grid.inline_style();
    assert!(style.starts_with("display: grid;"));
    assert!(style.contains("grid-template-columns: 1fr 2fr;"));
    assert!(cell.inline_style().contains("grid-row: 2 / 3;"));
    assert!(cell.inline_style().contains("grid-column: 1 / 3;"));

    grid.remove("gap");
    assert!(grid.get_raw("grid-row-gap").is_none());
    assert!(grid.get_raw("grid-column-gap").is_none());
}

#[test]
fn details_open_updates_expanded_without_echo() {
    let (session, sink) = Session::headless();
    let summary = text(&session, "More");
    let details = DetailsView::create(
        &session,
        Params::new()
            .with("summary", summary.clone())
            .with(CONTENT, "hidden text"),
    );
    assert_eq!(summary.parent(), Some(details.clone()));
    let html = details.html();
    assert!(html.starts_with(&format!("<details id=\"{}\"", details.html_id())));
    assert!(html.contains("ontoggle=\"detailsEvent(this)\""));
    assert!(html.contains(&format!("<summary><div id=\"{}\"", summary.html_id())));
    assert!(!html.contains(" open"));

    rendered(&session, &details, &sink);
    let count = change_counter(&details, "expanded");
    let message = DataObject::new("details-open")
        .with("id", details.html_id())
        .with("open", "1");
    session.handle_message(&message);
    assert!(DetailsView::is_expanded(&details));
    assert_eq!(count.get(), 1);
    assert!(sink.is_empty());

    details.set("expanded", false);
    assert_eq!(
        sink.take(),
        vec![format!("removeProperty('{}', 'open');", details.html_id())]
    );
    assert_eq!(count.get(), 2);
}

#[test]
fn details_text_summary() {
    let (session, _) = Session::headless();
    let details = DetailsView::create(
        &session,
        Params::new()
            .with("summary", "Info & more")
            .with("hide-summary-marker", true)
            .with("expanded", true),
    );
    let html = details.html();
    assert!(html.contains(" open"));
    assert!(html.contains("<summary style=\"list-style: none;\">Info &amp; more</summary>"));
}
