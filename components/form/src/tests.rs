//! Input behavior: page commands, programmatic writes and the HTML of each input.

use std::cell::RefCell;
use std::rc::Rc;

use rui_core::{Color, DataObject, Listener, Params, RecordingSink, Session, View};
use time::{Date, Month, Time};

use crate::{ColorPicker, DatePicker, DropDownList, EditView, FileInfo, FilePicker, NumberPicker, TimePicker};

// ============================================================================
// Test Infrastructure
// ============================================================================

type Calls<T> = Rc<RefCell<Vec<(String, T, T)>>>;

fn record<T: Clone + 'static>(view: &View, event: &str) -> Calls<T> {
    let calls: Calls<T> = Rc::default();
    let sink = Rc::clone(&calls);
    assert!(view.set(
        event,
        Listener::view_values::<T>(move |view, new, old| {
            sink.borrow_mut().push((view.html_id().to_string(), new.clone(), old.clone()));
        })
    ));
    calls
}

fn rendered(session: &Session, view: &View, sink: &RecordingSink) {
    session.set_root(view);
    sink.take();
}

fn command(view: &View, tag: &str, field: &str, value: &str) -> DataObject {
    DataObject::new(tag).with("id", view.html_id()).with(field, value)
}

fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}

// ============================================================================
// Drop-down List
// ============================================================================

#[test]
fn item_selected_in_the_page_fires_once() {
    let (session, sink) = Session::headless();
    let dropdown = DropDownList::create(
        &session,
        Params::new().with("items", ["a", "b", "c"]).with("current", 0),
    );
    rendered(&session, &dropdown, &sink);
    let calls = record::<i64>(&dropdown, "drop-down-event");

    session.handle_message(&command(&dropdown, "itemSelected", "number", "2"));
    assert_eq!(DropDownList::current(&dropdown), 2);
    assert_eq!(*calls.borrow(), vec![(dropdown.html_id().to_string(), 2, 0)]);
    assert!(!sink.contains("selectDropDownListItem"));

    session.handle_message(&command(&dropdown, "itemSelected", "number", "2"));
    session.handle_message(&command(&dropdown, "itemSelected", "number", "7"));
    assert_eq!(calls.borrow().len(), 1);
    assert_eq!(DropDownList::current(&dropdown), 2);
}

#[test]
fn programmatic_current_selects_in_the_page() {
    let (session, sink) = Session::headless();
    let dropdown = DropDownList::create(&session, Params::new().with("items", ["a", "b"]));
    rendered(&session, &dropdown, &sink);
    let calls = record::<i64>(&dropdown, "drop-down-event");

    assert!(dropdown.set("current", 1));
    assert!(sink.contains(&format!("selectDropDownListItem('{}', 1);", dropdown.html_id())));
    assert_eq!(*calls.borrow(), vec![(dropdown.html_id().to_string(), 1, 0)]);
}

#[test]
fn dropdown_options() {
    let (session, _) = Session::headless();
    let dropdown = DropDownList::create(
        &session,
        Params::new()
            .with("items", ["one", "<two>"])
            .with("disabled-items", "1")
            .with("current", 0),
    );
    let html = dropdown.html();
    assert!(html.starts_with(&format!("<select id=\"{}\"", dropdown.html_id())));
    assert!(html.contains("<option value=\"0\" selected>one</option>"));
    assert!(html.contains("<option value=\"1\" disabled>&lt;two&gt;</option>"));
    assert_eq!(DropDownList::disabled_items(&dropdown), vec![1]);
}

// ============================================================================
// Edit View
// ============================================================================

#[test]
fn typed_text_is_stored_without_echo() {
    let (session, sink) = Session::headless();
    let edit = EditView::create(&session, Params::new().with("text", "ab"));
    rendered(&session, &edit, &sink);
    let calls = record::<String>(&edit, "edit-text-changed");

    session.handle_message(&command(&edit, "textChanged", "text", "abc"));
    assert_eq!(EditView::text(&edit), "abc");
    assert_eq!(*calls.borrow(), vec![(edit.html_id().to_string(), "abc".into(), "ab".into())]);
    assert!(sink.is_empty());
}

#[test]
fn append_text_updates_the_input() {
    let (session, sink) = Session::headless();
    let edit = EditView::create(&session, Params::new().with("value", "one"));
    rendered(&session, &edit, &sink);
    EditView::append_text(&edit, " two");
    assert_eq!(EditView::text(&edit), "one two");
    assert!(sink.contains(&format!("setInputValue('{}', 'one two');", edit.html_id())));
}

#[test]
fn edit_view_variants() {
    let (session, _) = Session::headless();
    let password = EditView::create(
        &session,
        Params::new().with("type", "password").with("hint", "secret").with("max-length", 8),
    );
    let html = password.html();
    assert!(html.starts_with("<input"));
    assert!(html.contains("type=\"password\""));
    assert!(html.contains("placeholder=\"secret\""));
    assert!(html.contains("maxlength=\"8\""));

    let memo = EditView::create(&session, Params::new().with("type", "multiline").with("text", "a<b"));
    let html = memo.html();
    assert!(html.starts_with("<textarea"));
    assert!(html.contains(">a&lt;b</textarea>"));
}

// ============================================================================
// Pickers
// ============================================================================

#[test]
fn number_picker_slider_bounds() {
    let (session, _) = Session::headless();
    let slider = NumberPicker::create(&session, Params::new().with("type", "slider"));
    assert_eq!(NumberPicker::min(&slider), Some(0.0));
    assert_eq!(NumberPicker::max(&slider), Some(1.0));
    assert!(slider.html().contains("type=\"range\""));

    let editor = NumberPicker::create(&session, Params::new().with("max", 10));
    assert_eq!(NumberPicker::min(&editor), None);
    assert!(editor.html().contains("max=\"10\""));
}

#[test]
fn default_number_picker_reads_unset_tags() {
    let (session, _) = Session::headless();
    let picker = NumberPicker::create(&session, Params::new());
    assert_eq!(picker.get("number-picker-type"), None);
    assert_eq!(NumberPicker::min(&picker), None);
    assert_eq!(NumberPicker::max(&picker), None);
    assert_eq!(picker.get_float("number-picker-step"), None);

    picker.set("type", "slider");
    assert_eq!(picker.get_int("number-picker-type"), Some(1));
    assert_eq!(NumberPicker::max(&picker), Some(1.0));
}

#[test]
fn number_typed_and_written() {
    let (session, sink) = Session::headless();
    let picker = NumberPicker::create(&session, Params::new());
    rendered(&session, &picker, &sink);
    let calls = record::<f64>(&picker, "number-changed");

    session.handle_message(&command(&picker, "textChanged", "text", "2.5"));
    session.handle_message(&command(&picker, "textChanged", "text", "many"));
    assert_eq!(NumberPicker::value(&picker), 2.5);
    assert!(sink.is_empty());

    picker.set("value", 4);
    assert!(sink.contains(&format!("setInputValue('{}', '4');", picker.html_id())));
    let values: Vec<(f64, f64)> = calls.borrow().iter().map(|(_, new, old)| (*new, *old)).collect();
    assert_eq!(values, vec![(2.5, 0.0), (4.0, 2.5)]);
}

#[test]
fn color_from_the_page_is_opaque() {
    let (session, _) = Session::headless();
    let picker = ColorPicker::create(&session, Params::new());
    let calls = record::<Color>(&picker, "color-changed");
    assert_eq!(ColorPicker::value(&picker), Color::BLACK);

    session.handle_message(&command(&picker, "textChanged", "text", "#336699"));
    assert_eq!(ColorPicker::value(&picker), Color::new(0xFF33_6699));
    assert_eq!(calls.borrow()[0].1, Color::new(0xFF33_6699));
    assert!(picker.html().contains("value=\"#336699\""));
}

#[test]
fn date_picker_bounds_and_events() {
    let (session, sink) = Session::headless();
    let picker = DatePicker::create(
        &session,
        Params::new().with("min", "2024-01-01").with("value", "2024-03-05"),
    );
    assert_eq!(DatePicker::value(&picker), Some(date(2024, Month::March, 5)));
    let html = picker.html();
    assert!(html.contains("type=\"date\""));
    assert!(html.contains("min=\"2024-01-01\""));
    assert!(html.contains("value=\"2024-03-05\""));

    rendered(&session, &picker, &sink);
    let calls = record::<Option<Date>>(&picker, "date-changed");
    session.handle_message(&command(&picker, "textChanged", "text", "2024-04-01"));
    assert_eq!(DatePicker::value(&picker), Some(date(2024, Month::April, 1)));
    assert!(sink.is_empty());

    picker.remove("date-picker-value");
    assert_eq!(DatePicker::value(&picker), None);
    assert_eq!(
        calls.borrow()[0],
        (
            picker.html_id().to_string(),
            Some(date(2024, Month::April, 1)),
            Some(date(2024, Month::March, 5))
        )
    );
}

#[test]
fn time_picker_value() {
    let (session, sink) = Session::headless();
    let picker = TimePicker::create(&session, Params::new().with("step", 60));
    rendered(&session, &picker, &sink);
    let calls = record::<Option<Time>>(&picker, "time-changed");

    assert!(picker.set("value", "12:30"));
    let noon = Time::from_hms(12, 30, 0).unwrap();
    assert_eq!(TimePicker::value(&picker), Some(noon));
    assert_eq!(*calls.borrow(), vec![(picker.html_id().to_string(), Some(noon), None)]);
    assert!(sink.contains("setInputValue"));
    assert!(picker.html().contains("step=\"60\""));
}

#[test]
fn selected_files_are_reported() {
    let (session, _) = Session::headless();
    let picker = FilePicker::create(&session, Params::new().with("accept", ".png").with("multiple", true));
    let html = picker.html();
    assert!(html.contains("type=\"file\""));
    assert!(html.contains("accept=\".png\""));
    assert!(html.contains(" multiple"));

    let selected: Rc<RefCell<Vec<FileInfo>>> = Rc::default();
    let sink = Rc::clone(&selected);
    picker.set(
        "file-selected-event",
        Listener::event::<Vec<FileInfo>>(move |files| sink.borrow_mut().clone_from(files)),
    );
    let message = DataObject::parse(&format!(
        "fileSelected{{id={}, files=[_{{name=a.png, size=120, mime-type=\"image/png\", \
         last-modified=1700000000000}}, _{{name=b.png, size=3}}]}}",
        picker.html_id()
    ))
    .unwrap();
    session.handle_message(&message);

    let files = FilePicker::files(&picker);
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].name, "a.png");
    assert_eq!(files[0].size, 120);
    assert_eq!(files[0].mime_type, "image/png");
    assert_eq!(files[0].last_modified.map(|time| time.unix_timestamp()), Some(1_700_000_000));
    assert!(files[1].last_modified.is_none());
    assert_eq!(*selected.borrow(), files);
}
