//! The drawing context handed to a canvas view's draw function.
//!
//! Every call appends to the canvas script opened by the view; the script is
//! sent as one block once the draw function returns.

pub mod gradient;
pub mod path;

use rui_core::bridge::{Bridge, JsArg, TextMetrics};
use rui_core::{BridgeError, Color, Frame, Size, View, js_args};

use self::path::Path;
use crate::state::{FillStyle, FontParams, ImageRepeat, LineCap, LineJoin, TextAlign, TextBaseline, font_css};

/// Canvas drawing context.
///
/// Coordinates are CSS pixels of the canvas element. The context only exists
/// while the draw function of a [`crate::CanvasView`] runs.
pub struct Canvas<'a> {
    view: &'a View,
}

impl core::fmt::Debug for Canvas<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Canvas")
            .field("view", &self.view.html_id())
            .finish()
    }
}

impl<'a> Canvas<'a> {
    pub(crate) const fn new(view: &'a View) -> Self {
        Self { view }
    }

    fn bridge(&self) -> &dyn Bridge {
        self.view.session().bridge()
    }

    fn call(&self, name: &str, args: &[JsArg]) {
        self.bridge().call_canvas_func(name, args);
    }

    fn property(&self, name: &str, value: impl Into<JsArg>) {
        self.bridge().update_canvas_property(name, &value.into());
    }

    /// The canvas view being drawn.
    #[must_use]
    pub const fn view(&self) -> &View {
        self.view
    }

    /// Width of the canvas as last measured by the page.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.frame().width
    }

    /// Height of the canvas as last measured by the page.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.frame().height
    }

    fn frame(&self) -> Frame {
        self.view.frame()
    }

    // ------------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------------

    /// Pushes the drawing state.
    pub fn save(&mut self) {
        self.call("save", &[]);
    }

    /// Pops the drawing state.
    pub fn restore(&mut self) {
        self.call("restore", &[]);
    }

    /// Restricts drawing to a rectangle.
    pub fn clip_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.call("beginPath", &[]);
        self.call("rect", &js_args![x, y, width, height]);
        self.call("clip", &[]);
    }

    /// Restricts drawing to the interior of a path.
    pub fn clip_path(&mut self, path: &Path) {
        let path = path.create(self.bridge());
        self.call("clip", &js_args![path]);
    }

    // ------------------------------------------------------------------------
    // Transformations
    // ------------------------------------------------------------------------

    /// Scales the following drawing.
    pub fn set_scale(&mut self, x: f64, y: f64) {
        self.call("scale", &js_args![x, y]);
    }

    /// Moves the origin.
    pub fn set_translation(&mut self, x: f64, y: f64) {
        self.call("translate", &js_args![x, y]);
    }

    /// Rotates clockwise by `angle` radians around the origin.
    pub fn set_rotation(&mut self, angle: f64) {
        self.call("rotate", &js_args![angle]);
    }

    /// Multiplies the transformation matrix.
    pub fn set_transformation(&mut self, x_scale: f64, y_scale: f64, x_skew: f64, y_skew: f64, dx: f64, dy: f64) {
        self.call("transform", &js_args![x_scale, y_skew, x_skew, y_scale, dx, dy]);
    }

    /// Resets the transformation to the device pixel scale.
    pub fn reset_transformation(&mut self) {
        let ratio = self.view.session().pixel_ratio();
        self.call("resetTransform", &[]);
        self.call("scale", &js_args![ratio, ratio]);
    }

    // ------------------------------------------------------------------------
    // Styles
    // ------------------------------------------------------------------------

    fn set_style(&mut self, property: &str, style: impl Into<FillStyle>) {
        match style.into() {
            FillStyle::Color(color) => self.property(property, color.css()),
            FillStyle::LinearGradient(gradient) => {
                let gradient = gradient.create(self.bridge());
                self.property(property, gradient);
            }
            FillStyle::RadialGradient(gradient) => {
                let gradient = gradient.create(self.bridge());
                self.property(property, gradient);
            }
        }
    }

    /// Sets the paint of filled shapes and text.
    pub fn set_fill_style(&mut self, style: impl Into<FillStyle>) {
        self.set_style("fillStyle", style);
    }

    /// Sets the paint of stroked shapes and text.
    pub fn set_stroke_style(&mut self, style: impl Into<FillStyle>) {
        self.set_style("strokeStyle", style);
    }

    /// Fills with a pattern of the image `src`, an url or an `@image` name.
    ///
    /// Skipped by the page when the image is not loaded there.
    pub fn set_image_fill_style(&mut self, src: &str, repeat: ImageRepeat) {
        let url = self.view.session().image_url(src);
        if url.is_empty() {
            tracing::warn!(src, "unknown canvas image");
            return;
        }
        self.bridge()
            .call_canvas_image_func(&url, Some("fillStyle"), "createPattern", &js_args![repeat.as_str()]);
    }

    /// Sets the stroke width; non-positive widths are ignored.
    pub fn set_line_width(&mut self, width: f64) {
        if width > 0.0 {
            self.property("lineWidth", width);
        }
    }

    /// Sets the corner style of strokes.
    pub fn set_line_join(&mut self, join: LineJoin) {
        self.property("lineJoin", join.as_str());
    }

    /// Sets the end style of strokes.
    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.property("lineCap", cap.as_str());
    }

    /// Sets the dash pattern; a negative offset keeps the current one.
    pub fn set_line_dash(&mut self, dash: &[f64], offset: f64) {
        self.call("setLineDash", &js_args![dash]);
        if offset >= 0.0 {
            self.property("lineDashOffset", offset);
        }
    }

    /// Sets the font of text drawing.
    pub fn set_font(&mut self, name: &str, size: &Size) {
        self.set_font_with_params(name, size, &FontParams::default());
    }

    /// Sets the font of text drawing with style, weight and line height.
    pub fn set_font_with_params(&mut self, name: &str, size: &Size, params: &FontParams) {
        self.property("font", font_css(name, size, params));
    }

    /// Measures `text` in the given font; blocks until the page answers.
    ///
    /// # Errors
    ///
    /// Fails when the connection closes or the answer does not arrive in time.
    pub fn text_metrics(
        &self,
        text: &str,
        font_name: &str,
        font_size: &Size,
        params: &FontParams,
    ) -> Result<TextMetrics, BridgeError> {
        self.bridge()
            .canvas_text_metrics(self.view.html_id(), &font_css(font_name, font_size, params), text)
    }

    /// Sets the vertical anchor of drawn text.
    pub fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.property("textBaseline", baseline.as_str());
    }

    /// Sets the horizontal anchor of drawn text.
    pub fn set_text_align(&mut self, align: TextAlign) {
        self.property("textAlign", align.as_str());
    }

    /// Sets the shadow of the following drawing; ignored for a transparent
    /// color or a negative blur.
    pub fn set_shadow(&mut self, offset_x: f64, offset_y: f64, blur: f64, color: Color) {
        if color.alpha() == 0 || blur < 0.0 {
            return;
        }
        self.property("shadowColor", color.css());
        self.property("shadowOffsetX", offset_x);
        self.property("shadowOffsetY", offset_y);
        self.property("shadowBlur", blur);
    }

    /// Removes the shadow.
    pub fn reset_shadow(&mut self) {
        self.property("shadowColor", "rgba(0,0,0,0)");
        self.property("shadowOffsetX", 0);
        self.property("shadowOffsetY", 0);
        self.property("shadowBlur", 0);
    }

    // ------------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------------

    /// Makes a rectangle transparent.
    pub fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.call("clearRect", &js_args![x, y, width, height]);
    }

    /// Fills a rectangle.
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.call("fillRect", &js_args![x, y, width, height]);
    }

    /// Strokes a rectangle outline.
    pub fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.call("strokeRect", &js_args![x, y, width, height]);
    }

    /// Fills then strokes a rectangle.
    pub fn fill_and_stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.fill_rect(x, y, width, height);
        self.stroke_rect(x, y, width, height);
    }

    /// Fills a rectangle with rounded corners.
    pub fn fill_rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, r: f64) {
        self.fill_path(&Path::rounded_rect(x, y, width, height, r));
    }

    /// Strokes a rectangle with rounded corners.
    pub fn stroke_rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, r: f64) {
        self.stroke_path(&Path::rounded_rect(x, y, width, height, r));
    }

    /// Fills then strokes a rectangle with rounded corners.
    pub fn fill_and_stroke_rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, r: f64) {
        self.fill_and_stroke_path(&Path::rounded_rect(x, y, width, height, r));
    }

    /// Fills an ellipse centered on (x, y); negative radii draw nothing.
    pub fn fill_ellipse(&mut self, x: f64, y: f64, radius_x: f64, radius_y: f64, rotation: f64) {
        if radius_x >= 0.0 && radius_y >= 0.0 {
            self.fill_path(&Path::full_ellipse(x, y, radius_x, radius_y, rotation));
        }
    }

    /// Strokes an ellipse centered on (x, y); negative radii draw nothing.
    pub fn stroke_ellipse(&mut self, x: f64, y: f64, radius_x: f64, radius_y: f64, rotation: f64) {
        if radius_x >= 0.0 && radius_y >= 0.0 {
            self.stroke_path(&Path::full_ellipse(x, y, radius_x, radius_y, rotation));
        }
    }

    /// Fills then strokes an ellipse centered on (x, y).
    pub fn fill_and_stroke_ellipse(&mut self, x: f64, y: f64, radius_x: f64, radius_y: f64, rotation: f64) {
        if radius_x >= 0.0 && radius_y >= 0.0 {
            self.fill_and_stroke_path(&Path::full_ellipse(x, y, radius_x, radius_y, rotation));
        }
    }

    /// Fills a path.
    pub fn fill_path(&mut self, path: &Path) {
        let path = path.create(self.bridge());
        self.call("fill", &js_args![path]);
    }

    /// Strokes a path.
    pub fn stroke_path(&mut self, path: &Path) {
        let path = path.create(self.bridge());
        self.call("stroke", &js_args![path]);
    }

    /// Fills then strokes a path.
    pub fn fill_and_stroke_path(&mut self, path: &Path) {
        let path = path.create(self.bridge());
        self.call("fill", &js_args![&path]);
        self.call("stroke", &js_args![path]);
    }

    /// Strokes a straight line.
    pub fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.call("beginPath", &[]);
        self.call("moveTo", &js_args![x0, y0]);
        self.call("lineTo", &js_args![x1, y1]);
        self.call("stroke", &[]);
    }

    /// Fills text at (x, y).
    pub fn fill_text(&mut self, x: f64, y: f64, text: &str) {
        self.call("fillText", &js_args![text, x, y]);
    }

    /// Strokes text at (x, y).
    pub fn stroke_text(&mut self, x: f64, y: f64, text: &str) {
        self.call("strokeText", &js_args![text, x, y]);
    }

    fn image(&mut self, src: &str, args: &[JsArg]) {
        let url = self.view.session().image_url(src);
        if url.is_empty() {
            tracing::warn!(src, "unknown canvas image");
            return;
        }
        self.bridge().call_canvas_image_func(&url, None, "drawImage", args);
    }

    /// Draws the image `src` at its natural size.
    pub fn draw_image(&mut self, x: f64, y: f64, src: &str) {
        self.image(src, &js_args![x, y]);
    }

    /// Draws the image `src` scaled into a rectangle.
    pub fn draw_image_in_rect(&mut self, x: f64, y: f64, width: f64, height: f64, src: &str) {
        self.image(src, &js_args![x, y, width, height]);
    }

    /// Draws a fragment of the image `src` scaled into a rectangle.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_image_fragment(
        &mut self,
        src_x: f64,
        src_y: f64,
        src_width: f64,
        src_height: f64,
        dst_x: f64,
        dst_y: f64,
        dst_width: f64,
        dst_height: f64,
        src: &str,
    ) {
        self.image(
            src,
            &js_args![src_x, src_y, src_width, src_height, dst_x, dst_y, dst_width, dst_height],
        );
    }
}
