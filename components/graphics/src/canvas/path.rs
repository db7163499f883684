//! Path builder for Canvas-style path construction.

use core::f64::consts::{FRAC_PI_2, PI};

use rui_core::bridge::{Bridge, CanvasVar, JsArg};
use rui_core::js_args;

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    QuadraticTo(f64, f64, f64, f64),
    BezierTo(f64, f64, f64, f64, f64, f64),
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start: f64,
        end: f64,
        anticlockwise: bool,
    },
    ArcTo(f64, f64, f64, f64, f64),
    Ellipse {
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start: f64,
        end: f64,
        anticlockwise: bool,
    },
    Rect(f64, f64, f64, f64),
    Close,
}

impl Segment {
    fn call(&self) -> (&'static str, Vec<JsArg>) {
        match *self {
            Self::MoveTo(x, y) => ("moveTo", js_args![x, y]),
            Self::LineTo(x, y) => ("lineTo", js_args![x, y]),
            Self::QuadraticTo(cpx, cpy, x, y) => ("quadraticCurveTo", js_args![cpx, cpy, x, y]),
            Self::BezierTo(cp0x, cp0y, cp1x, cp1y, x, y) => {
                ("bezierCurveTo", js_args![cp0x, cp0y, cp1x, cp1y, x, y])
            }
            Self::Arc { x, y, radius, start, end, anticlockwise } => {
                ("arc", js_args![x, y, radius, start, end, anticlockwise])
            }
            Self::ArcTo(x0, y0, x1, y1, radius) => ("arcTo", js_args![x0, y0, x1, y1, radius]),
            Self::Ellipse { x, y, radius_x, radius_y, rotation, start, end, anticlockwise } => (
                "ellipse",
                js_args![x, y, radius_x, radius_y, rotation, start, end, anticlockwise],
            ),
            Self::Rect(x, y, width, height) => ("rect", js_args![x, y, width, height]),
            Self::Close => ("closePath", Vec::new()),
        }
    }
}

/// Path builder for constructing complex shapes.
///
/// The path is sent as a `Path2D` object when it is filled, stroked or used
/// as a clip. A path may start from SVG path data.
///
/// ```
/// use rui_graphics::Path;
///
/// let mut path = Path::new();
/// path.move_to(10.0, 10.0);
/// path.line_to(100.0, 10.0);
/// path.line_to(100.0, 100.0);
/// path.close();
/// assert_eq!(path.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    svg: Option<String>,
    segments: Vec<Segment>,
}

impl Path {
    /// Creates a new empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a path from SVG path data, e.g. `M 10 10 h 80 v 80 Z`.
    #[must_use]
    pub fn from_svg(data: impl Into<String>) -> Self {
        Self {
            svg: Some(data.into()),
            segments: Vec::new(),
        }
    }

    /// A closed rectangle path with rounded corners of radius `r`.
    #[must_use]
    pub fn rounded_rect(x: f64, y: f64, width: f64, height: f64, r: f64) -> Self {
        let mut path = Self::new();
        path.move_to(x, y + r);
        path.arc(x + r, y + r, r, PI, PI * 1.5, false);
        path.line_to(x + width - r, y);
        path.arc(x + width - r, y + r, r, PI * 1.5, PI * 2.0, false);
        path.line_to(x + width, y + height - r);
        path.arc(x + width - r, y + height - r, r, 0.0, FRAC_PI_2, false);
        path.line_to(x + r, y + height);
        path.arc(x + r, y + height - r, r, FRAC_PI_2, PI, false);
        path.close();
        path
    }

    /// A full ellipse centered on (x, y).
    #[must_use]
    pub fn full_ellipse(x: f64, y: f64, radius_x: f64, radius_y: f64, rotation: f64) -> Self {
        let mut path = Self::new();
        path.move_to(x + radius_x, y);
        path.ellipse(x, y, radius_x, radius_y, rotation, 0.0, PI * 2.0, false);
        path
    }

    /// Number of recorded segments, excluding the SVG data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has neither SVG data nor segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.svg.is_none() && self.segments.is_empty()
    }

    /// Starts a new sub-path at (x, y).
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.segments.push(Segment::MoveTo(x, y));
    }

    /// Draws a straight line to (x, y).
    pub fn line_to(&mut self, x: f64, y: f64) {
        self.segments.push(Segment::LineTo(x, y));
    }

    /// Draws a quadratic Bezier curve to (x, y) through the control point.
    pub fn quadratic_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.segments.push(Segment::QuadraticTo(cpx, cpy, x, y));
    }

    /// Draws a cubic Bezier curve to (x, y) through two control points.
    pub fn bezier_to(&mut self, cp0x: f64, cp0y: f64, cp1x: f64, cp1y: f64, x: f64, y: f64) {
        self.segments.push(Segment::BezierTo(cp0x, cp0y, cp1x, cp1y, x, y));
    }

    /// Draws a circular arc; angles are in radians, 0 at three o'clock.
    pub fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64, anticlockwise: bool) {
        if radius < 0.0 {
            tracing::warn!(radius, "arc with a negative radius skipped");
            return;
        }
        self.segments.push(Segment::Arc { x, y, radius, start, end, anticlockwise });
    }

    /// Draws an arc tangent to the lines through the two control points.
    pub fn arc_to(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, radius: f64) {
        if radius < 0.0 {
            tracing::warn!(radius, "arc with a negative radius skipped");
            return;
        }
        self.segments.push(Segment::ArcTo(x0, y0, x1, y1, radius));
    }

    /// Draws an elliptical arc.
    #[allow(clippy::too_many_arguments)]
    pub fn ellipse(
        &mut self,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start: f64,
        end: f64,
        anticlockwise: bool,
    ) {
        if radius_x < 0.0 || radius_y < 0.0 {
            tracing::warn!(radius_x, radius_y, "ellipse with a negative radius skipped");
            return;
        }
        self.segments.push(Segment::Ellipse {
            x,
            y,
            radius_x,
            radius_y,
            rotation,
            start,
            end,
            anticlockwise,
        });
    }

    /// Adds a closed rectangle sub-path.
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.segments.push(Segment::Rect(x, y, width, height));
    }

    /// Closes the current sub-path with a straight line to its start.
    pub fn close(&mut self) {
        self.segments.push(Segment::Close);
    }

    /// Sends the path as a `Path2D` variable of the current canvas script.
    pub(crate) fn create(&self, bridge: &dyn Bridge) -> CanvasVar {
        let path = bridge.create_path2d(self.svg.as_deref());
        for segment in &self.segments {
            let (name, args) = segment.call();
            bridge.call_canvas_var_func(&path, name, &args);
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_radii_are_skipped() {
        let mut path = Path::new();
        path.arc(0.0, 0.0, -1.0, 0.0, 1.0, false);
        path.arc_to(0.0, 0.0, 1.0, 1.0, -2.0);
        path.ellipse(0.0, 0.0, 1.0, -1.0, 0.0, 0.0, 1.0, false);
        assert!(path.is_empty());
        assert!(!Path::from_svg("M 0 0").is_empty());
    }

    #[test]
    fn rounded_rect_outline() {
        let path = Path::rounded_rect(0.0, 0.0, 10.0, 20.0, 2.0);
        // the closing edge comes from `Close`, not a fourth line
        assert_eq!(path.len(), 9);
        assert_eq!(path.segments[0], Segment::MoveTo(0.0, 2.0));
        assert_eq!(path.segments[2], Segment::LineTo(8.0, 0.0));
        assert_eq!(path.segments[6], Segment::LineTo(2.0, 20.0));
        assert_eq!(path.segments[8], Segment::Close);
    }
}
