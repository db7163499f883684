use std::cell::Cell;
use std::rc::Rc;

use rui_core::{DataObject, Listener, Params, Session};

use crate::{ImageView, image};

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn image_table_names_resolve_on_render() {
    let (session, _) = Session::headless();
    session.set_image("logo", "images/logo.png");
    let view = image(&session, "@logo");
    assert_eq!(view.get_text("src").as_deref(), Some("@logo"));

    let html = view.html();
    assert!(html.starts_with("<img id="));
    assert!(html.contains(" src=\"images/logo.png\""));
    assert!(html.contains(" onload=\"imageLoaded(this, event)\""));
    assert!(!html.contains("onerror"));

    session.set_image("logo", "images/logo-dark.png");
    assert_eq!(ImageView::source_url(&view), "images/logo-dark.png");
}

#[test]
fn unknown_names_render_without_src() {
    let (session, _) = Session::headless();
    let view = image(&session, "@missing");
    assert_eq!(ImageView::source_url(&view), "");
    assert!(!view.html().contains(" src="));
}

#[test]
fn src_set_densities() {
    let (session, _) = Session::headless();
    let view = ImageView::create(
        &session,
        Params::new()
            .with("source", "cat.png")
            .with("srcset", "cat@2x.png, cat@3x.png ,cat-large.png"),
    );
    assert!(view.html().contains(" srcset=\"cat@2x.png 2x, cat@3x.png 3x, cat-large.png 1x\""));
}

#[test]
fn alt_text_is_escaped() {
    let (session, _) = Session::headless();
    let view = ImageView::create(&session, Params::new().with("src", "a.png").with("alt", "\"A\" & B"));
    assert!(view.html().contains(" alt=\"&quot;A&quot; &amp; B\""));
}

#[test]
fn fit_and_position_styles() {
    let (session, _) = Session::headless();
    let view = image(&session, "a.png");
    assert!(view.inline_style().contains("object-fit: none;"));
    assert!(!view.inline_style().contains("object-position"));

    view.set("fit", "cover");
    view.set("image-vertical-align", "top");
    let style = view.inline_style();
    assert!(style.contains("object-fit: cover;"));
    assert_eq!(style.matches("object-fit").count(), 1);
    assert!(style.contains("object-position: center top;"));
}

// ============================================================================
// Updates
// ============================================================================

#[test]
fn source_change_updates_the_element() {
    let (session, sink) = Session::headless();
    let view = image(&session, "a.png");
    session.set_root(&view);
    sink.take();

    view.set("src", "b.png");
    let id = view.html_id();
    let scripts = sink.take();
    assert_eq!(scripts.len(), 1);
    assert!(scripts[0].starts_with(&format!("{{\nlet element = document.getElementById('{id}');")));
    assert!(scripts[0].contains("element.setAttribute('src', 'b.png');"));
    assert!(scripts[0].contains("element.removeAttribute('srcset');"));

    view.remove("src");
    assert!(sink.contains("element.removeAttribute('src');"));

    sink.take();
    view.set("alt-text", "Logo");
    assert_eq!(sink.take(), vec![format!("updateProperty('{id}', 'alt', 'Logo');")]);
}

#[test]
fn loaded_message_records_natural_size() {
    let (session, _) = Session::headless();
    let view = image(&session, "a.png");
    session.set_root(&view);
    let loaded = Rc::new(Cell::new(0));
    let counter = Rc::clone(&loaded);
    view.set("loaded-event", Listener::new(move || counter.set(counter.get() + 1)));

    let message = DataObject::new("imageViewLoaded")
        .with("id", view.html_id())
        .with("natural-width", "640")
        .with("natural-height", "480")
        .with("current-src", "http://localhost/a.png");
    session.handle_message(&message);

    assert_eq!(loaded.get(), 1);
    assert_eq!(ImageView::natural_size(&view), (640.0, 480.0));
    assert_eq!(ImageView::current_source(&view), "http://localhost/a.png");
}

#[test]
fn error_listener_adds_onerror() {
    let (session, _) = Session::headless();
    let view = image(&session, "a.png");
    let failed = Rc::new(Cell::new(false));
    let flag = Rc::clone(&failed);
    view.set("error-event", Listener::new(move || flag.set(true)));
    assert!(view.html().contains(" onerror=\"imageError(this, event)\""));

    session.set_root(&view);
    session.handle_message(&DataObject::new("imageViewError").with("id", view.html_id()));
    assert!(failed.get());
}
