//! Gradient builders for the canvas fill and stroke styles.

use rui_core::bridge::{Bridge, CanvasVar};
use rui_core::{Color, js_args};

/// A color at a position along a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Position along the gradient (0.0 to 1.0).
    pub offset: f64,
    /// Color at this position.
    pub color: Color,
}

impl ColorStop {
    /// Creates a new color stop.
    #[must_use]
    pub const fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

fn push_stop(stops: &mut Vec<ColorStop>, offset: f64, color: Color) {
    if (0.0..=1.0).contains(&offset) {
        stops.push(ColorStop::new(offset, color));
    } else {
        tracing::warn!(offset, "gradient stop outside 0..=1 skipped");
    }
}

fn add_stops(bridge: &dyn Bridge, gradient: &CanvasVar, stops: &[ColorStop]) {
    for stop in stops {
        bridge.call_canvas_var_func(gradient, "addColorStop", &js_args![stop.offset, stop.color.css()]);
    }
}

/// Colors transitioning along a straight line.
///
/// ```
/// use rui_core::Color;
/// use rui_graphics::LinearGradient;
///
/// let mut gradient = LinearGradient::new(0.0, 0.0, 100.0, 0.0);
/// gradient.add_color_stop(0.0, Color::rgb(255, 0, 0));
/// gradient.add_color_stop(1.0, Color::rgb(0, 0, 255));
/// assert_eq!(gradient.stops().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    start: (f64, f64),
    end: (f64, f64),
    stops: Vec<ColorStop>,
}

impl LinearGradient {
    /// Creates a gradient from (x0, y0) to (x1, y1).
    #[must_use]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            start: (x0, y0),
            end: (x1, y1),
            stops: Vec::new(),
        }
    }

    /// Adds a color stop; offsets outside `0..=1` are skipped.
    pub fn add_color_stop(&mut self, offset: f64, color: Color) {
        push_stop(&mut self.stops, offset, color);
    }

    /// Adds a color stop, builder style.
    #[must_use]
    pub fn with_color_stop(mut self, offset: f64, color: Color) -> Self {
        self.add_color_stop(offset, color);
        self
    }

    /// The color stops in insertion order.
    #[must_use]
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub(crate) fn create(&self, bridge: &dyn Bridge) -> CanvasVar {
        let gradient = bridge.create_canvas_var(
            "createLinearGradient",
            &js_args![self.start.0, self.start.1, self.end.0, self.end.1],
        );
        add_stops(bridge, &gradient, &self.stops);
        gradient
    }
}

/// Colors transitioning from one circle to another.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    start: (f64, f64, f64),
    end: (f64, f64, f64),
    stops: Vec<ColorStop>,
}

impl RadialGradient {
    /// Creates a gradient from the circle (x0, y0, r0) to the circle (x1, y1, r1).
    #[must_use]
    pub const fn new(x0: f64, y0: f64, r0: f64, x1: f64, y1: f64, r1: f64) -> Self {
        Self {
            start: (x0, y0, r0),
            end: (x1, y1, r1),
            stops: Vec::new(),
        }
    }

    /// Adds a color stop; offsets outside `0..=1` are skipped.
    pub fn add_color_stop(&mut self, offset: f64, color: Color) {
        push_stop(&mut self.stops, offset, color);
    }

    /// Adds a color stop, builder style.
    #[must_use]
    pub fn with_color_stop(mut self, offset: f64, color: Color) -> Self {
        self.add_color_stop(offset, color);
        self
    }

    /// The color stops in insertion order.
    #[must_use]
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub(crate) fn create(&self, bridge: &dyn Bridge) -> CanvasVar {
        let (x0, y0, r0) = self.start;
        let (x1, y1, r1) = self.end;
        let gradient = bridge.create_canvas_var("createRadialGradient", &js_args![x0, y0, r0, x1, y1, r1]);
        add_stops(bridge, &gradient, &self.stops);
        gradient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_stops_are_skipped() {
        let gradient = RadialGradient::new(5.0, 5.0, 0.0, 5.0, 5.0, 5.0)
            .with_color_stop(0.0, Color::rgb(255, 255, 255))
            .with_color_stop(1.5, Color::rgb(1, 2, 3))
            .with_color_stop(-0.1, Color::rgb(1, 2, 3))
            .with_color_stop(1.0, Color::rgb(0, 0, 0));
        assert_eq!(
            gradient.stops(),
            &[
                ColorStop::new(0.0, Color::rgb(255, 255, 255)),
                ColorStop::new(1.0, Color::rgb(0, 0, 0))
            ]
        );
    }
}
