//! Canvas scripts produced by draw functions.

use std::cell::Cell;
use std::rc::Rc;

use rui_core::bridge::RecordingSink;
use rui_core::{Color, DataObject, Params, Session, Size, View};

use crate::{
    CanvasView, FontParams, ImageRepeat, LineCap, LinearGradient, Path, RadialGradient, TextAlign, draw_function,
    redraw_canvas_view,
};

fn rendered(session: &Session) -> View {
    let view = CanvasView::create(session, Params::new().with("id", "chart"));
    session.set_root(&view);
    view
}

fn resize(view: &View, width: u32, height: u32) -> DataObject {
    DataObject::parse(&format!(
        "resize{{views=[_{{id={}, x=0, y=0, width={width}, height={height}}}]}}",
        view.html_id()
    ))
    .unwrap()
}

#[test]
fn draw_function_runs_as_one_script() {
    let (session, sink) = Session::headless();
    let view = rendered(&session);
    assert!(sink.take().iter().any(|script| script.contains("<canvas id=")));

    view.set(
        "draw-function",
        draw_function(|canvas| {
            canvas.save();
            canvas.set_fill_style(Color::rgb(255, 0, 0));
            canvas.fill_rect(1.0, 2.0, 3.0, 4.5);
            canvas.set_line_width(2.0);
            canvas.set_line_width(0.0);
            canvas.set_line_cap(LineCap::Round);
            canvas.draw_line(0.0, 0.0, 10.0, 10.0);
            canvas.restore();
        }),
    );
    let scripts = sink.take();
    assert_eq!(scripts.len(), 1);
    let id = view.html_id();
    assert_eq!(
        scripts[0],
        format!(
            "{{\nconst ctx = getCanvasContext('{id}');\n\
             ctx.clearRect(0, 0, 0, 0);\n\
             ctx.save();\n\
             ctx.fillStyle = 'rgb(255,0,0)';\n\
             ctx.fillRect(1, 2, 3, 4.5);\n\
             ctx.lineWidth = 2;\n\
             ctx.lineCap = 'round';\n\
             ctx.beginPath();\n\
             ctx.moveTo(0, 0);\n\
             ctx.lineTo(10, 10);\n\
             ctx.stroke();\n\
             ctx.restore();\n}}\n"
        )
    );
}

#[test]
fn nothing_is_drawn_before_the_page_exists() {
    let (session, sink) = Session::headless();
    let view = CanvasView::create(&session, Params::new());
    view.set("draw-function", draw_function(|canvas| canvas.fill_rect(0.0, 0.0, 1.0, 1.0)));
    CanvasView::redraw(&view);
    assert!(sink.is_empty());
}

#[test]
fn resize_redraws_with_the_new_frame() {
    let (session, sink) = Session::headless();
    let view = rendered(&session);
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    view.set(
        "draw-func",
        draw_function(move |canvas| {
            counter.set(counter.get() + 1);
            let (width, height) = (canvas.width(), canvas.height());
            canvas.stroke_rect(0.0, 0.0, width, height);
        }),
    );
    sink.take();

    session.handle_message(&resize(&view, 120, 80));
    assert_eq!(calls.get(), 2);
    assert!(sink.contains("ctx.clearRect(0, 0, 120, 80);"));
    assert!(sink.contains("ctx.strokeRect(0, 0, 120, 80);"));

    session.handle_message(&resize(&view, 120, 80));
    assert_eq!(calls.get(), 2);

    let root = session.root().unwrap();
    redraw_canvas_view(&root, "chart");
    assert_eq!(calls.get(), 3);
}

#[test]
fn gradients_and_paths_become_variables() {
    let (session, sink) = Session::headless();
    let view = rendered(&session);
    view.set(
        "draw-function",
        draw_function(|canvas| {
            canvas.set_fill_style(
                LinearGradient::new(0.0, 0.0, 100.0, 0.0)
                    .with_color_stop(0.0, Color::rgb(0, 0, 0))
                    .with_color_stop(1.0, Color::rgb(255, 255, 255)),
            );
            canvas.set_stroke_style(RadialGradient::new(5.0, 5.0, 0.0, 5.0, 5.0, 5.0));
            let mut path = Path::new();
            path.move_to(0.0, 0.0);
            path.line_to(5.0, 5.0);
            path.close();
            canvas.fill_and_stroke_path(&path);
            canvas.clip_path(&Path::from_svg("M 0 0 h 10"));
        }),
    );
    let script = sink.take().pop().unwrap_or_default();
    assert!(script.contains("let v1 = ctx.createLinearGradient(0, 0, 100, 0);"));
    assert!(script.contains("v1.addColorStop(0, 'rgb(0,0,0)');\nv1.addColorStop(1, 'rgb(255,255,255)');"));
    assert!(script.contains("ctx.fillStyle = v1;"));
    assert!(script.contains("let v2 = ctx.createRadialGradient(5, 5, 0, 5, 5, 5);\nctx.strokeStyle = v2;"));
    assert!(script.contains("let v3 = new Path2D();\nv3.moveTo(0, 0);\nv3.lineTo(5, 5);\nv3.closePath();"));
    assert!(script.contains("ctx.fill(v3);\nctx.stroke(v3);"));
    assert!(script.contains("let v4 = new Path2D('M 0 0 h 10');\nctx.clip(v4);"));
}

#[test]
fn text_and_images() {
    let (session, sink) = Session::headless();
    session.set_image("logo", "images/logo.png");
    let view = rendered(&session);
    view.set(
        "draw-function",
        draw_function(|canvas| {
            canvas.set_font("Open Sans", &Size::px(14.0));
            canvas.set_text_align(TextAlign::Center);
            canvas.fill_text(10.0, 20.0, "it's");
            canvas.draw_image(1.0, 2.0, "@logo");
            canvas.draw_image(1.0, 2.0, "@missing");
            canvas.set_image_fill_style("@logo", ImageRepeat::RepeatX);
        }),
    );
    let script = sink.take().pop().unwrap_or_default();
    assert!(script.contains("ctx.font = '14px \"Open Sans\"';"));
    assert!(script.contains("ctx.textAlign = 'center';"));
    assert!(script.contains("ctx.fillText('it\\'s', 10, 20);"));
    assert!(script.contains("img = images.get('images/logo.png');\nif (img) {\nctx.drawImage(img, 1, 2);\n}"));
    assert_eq!(script.matches("drawImage").count(), 1);
    assert!(script.contains("ctx.fillStyle = ctx.createPattern(img, 'repeat-x');"));
}

#[test]
fn shadows_skip_transparent_colors() {
    let (session, sink) = Session::headless();
    let view = rendered(&session);
    view.set(
        "draw-function",
        draw_function(|canvas| {
            canvas.set_shadow(1.0, 1.0, 2.0, Color::new(0));
            canvas.set_shadow(1.0, 2.0, 3.0, Color::rgb(0, 0, 0));
            canvas.reset_shadow();
        }),
    );
    let script = sink.take().pop().unwrap_or_default();
    assert_eq!(script.matches("ctx.shadowColor").count(), 2);
    assert!(script.contains("ctx.shadowOffsetY = 2;"));
    assert!(script.contains("ctx.shadowColor = 'rgba(0,0,0,0)';"));
}

#[test]
fn text_metrics_wait_for_the_answer() {
    let sink = RecordingSink::with_responder(|script| {
        let args = script.strip_prefix("canvasTextMetrics(")?;
        let (id, _) = args.split_once(',')?;
        Some(
            DataObject::new("answer")
                .with("answerID", id)
                .with("width", "42.5")
                .with("ascent", "9"),
        )
    });
    let session = Session::headless_with(sink.clone());
    let view = rendered(&session);
    let measured = Rc::new(Cell::new(0.0));
    let result = Rc::clone(&measured);
    view.set(
        "draw-function",
        draw_function(move |canvas| {
            if let Ok(metrics) = canvas.text_metrics("hello", "serif", &Size::px(12.0), &FontParams::default()) {
                result.set(metrics.width);
            }
        }),
    );
    assert_eq!(measured.get(), 42.5);
    assert!(sink
        .scripts()
        .iter()
        .any(|script| script.contains(&format!("'{}', '12px serif', 'hello'", view.html_id()))));
}
