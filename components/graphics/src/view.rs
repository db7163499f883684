use std::rc::Rc;

use rui_core::bridge::Bridge;
use rui_core::value::Handle;
use rui_core::{Frame, Params, PropertyError, Session, Value, View, Widget};

use crate::canvas::Canvas;

const DRAW_FUNCTION: &str = "draw-function";

type DrawFunction = Rc<dyn Fn(&mut Canvas<'_>)>;

/// Wraps a drawing closure for the `draw-function` property.
pub fn draw_function(draw: impl Fn(&mut Canvas<'_>) + 'static) -> Value {
    Value::Handle(Handle::new(Rc::new(draw) as DrawFunction))
}

/// A `<canvas>` element painted by a draw function.
///
/// The canvas is cleared and redrawn when `draw-function` changes, when the
/// page reports a new size and on [`CanvasView::redraw`].
#[derive(Debug, Default)]
pub struct CanvasView;

impl CanvasView {
    /// Creates a canvas view.
    pub fn create(session: &Session, params: Params) -> View {
        View::create(session, Self, params)
    }

    /// Clears the canvas and runs the draw function as one canvas script.
    ///
    /// Does nothing until the view is on the page.
    pub fn redraw(view: &View) {
        if !view.updates_enabled() {
            return;
        }
        let bridge: &dyn Bridge = view.session().bridge();
        bridge.canvas_start(view.html_id());
        let mut canvas = Canvas::new(view);
        let frame = view.frame();
        canvas.clear_rect(0.0, 0.0, frame.width, frame.height);
        if let Some(draw) = draw(view) {
            draw(&mut canvas);
        }
        bridge.canvas_finish();
    }
}

/// Redraws the canvas view with the user id `id` below `root`.
pub fn redraw_canvas_view(root: &View, id: &str) {
    match root.view_by_id(id) {
        Some(view) if view.widget::<CanvasView>().is_some() => CanvasView::redraw(&view),
        Some(_) => tracing::warn!(id, "view is not a canvas view"),
        None => tracing::warn!(id, "canvas view not found"),
    }
}

fn draw(view: &View) -> Option<DrawFunction> {
    match view.get_raw(DRAW_FUNCTION) {
        Some(Value::Handle(handle)) => handle.downcast_ref::<DrawFunction>().cloned(),
        _ => None,
    }
}

impl Widget for CanvasView {
    fn type_name(&self) -> &'static str {
        "CanvasView"
    }

    fn normalize(&self, tag: &str) -> String {
        match rui_core::properties::normalize(tag).as_str() {
            "draw-func" => DRAW_FUNCTION.to_string(),
            other => other.to_string(),
        }
    }

    fn set(&self, view: &View, tag: &str, value: Value) -> Result<Vec<String>, PropertyError> {
        if tag != DRAW_FUNCTION {
            return view.base_set(tag, value);
        }
        match value {
            Value::Handle(handle) if handle.downcast_ref::<DrawFunction>().is_some() => {
                Ok(view.store_raw(tag, Some(Value::Handle(handle))))
            }
            other => Err(PropertyError::incompatible(tag, other.kind())),
        }
    }

    fn changed(&self, view: &View, tag: &str) {
        match tag {
            DRAW_FUNCTION => CanvasView::redraw(view),
            _ => view.base_changed(tag),
        }
    }

    fn html_tag(&self, _view: &View) -> String {
        "canvas".to_string()
    }

    fn resized(&self, view: &View, _frame: Frame) {
        CanvasView::redraw(view);
    }
}
