//! Canvas drawing state: fill and stroke styles, line and text styling.

use core::fmt::Write;

use rui_core::{Color, Size};

use crate::canvas::gradient::{LinearGradient, RadialGradient};

// ============================================================================
// Fill and Stroke Styles
// ============================================================================

/// Paint of filled or stroked shapes: a solid color or a gradient.
#[derive(Debug, Clone, PartialEq)]
pub enum FillStyle {
    /// Solid color.
    Color(Color),
    /// Linear gradient.
    LinearGradient(LinearGradient),
    /// Radial gradient.
    RadialGradient(RadialGradient),
}

impl From<Color> for FillStyle {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

impl From<LinearGradient> for FillStyle {
    fn from(gradient: LinearGradient) -> Self {
        Self::LinearGradient(gradient)
    }
}

impl From<RadialGradient> for FillStyle {
    fn from(gradient: RadialGradient) -> Self {
        Self::RadialGradient(gradient)
    }
}

/// Repetition of an image pattern fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ImageRepeat {
    /// The image is drawn once.
    NoRepeat,
    /// The image repeats in both directions.
    #[default]
    Repeat,
    /// The image repeats horizontally.
    RepeatX,
    /// The image repeats vertically.
    RepeatY,
}

impl ImageRepeat {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::NoRepeat => "no-repeat",
            Self::Repeat => "repeat",
            Self::RepeatX => "repeat-x",
            Self::RepeatY => "repeat-y",
        }
    }
}

// ============================================================================
// Line Styling
// ============================================================================

/// Line cap style (end of strokes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Squared off at the endpoint.
    #[default]
    Butt,
    /// Rounded.
    Round,
    /// Squared off past the endpoint by half the line width.
    Square,
}

impl LineCap {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// Line join style (corners of strokes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineJoin {
    /// Outside edges extended to meet at a point.
    #[default]
    Miter,
    /// Rounded corner.
    Round,
    /// Corner cut off.
    Bevel,
}

impl LineJoin {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

// ============================================================================
// Text Styling
// ============================================================================

/// Horizontal alignment of text relative to the drawing point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Left edge at the point.
    Left,
    /// Right edge at the point.
    Right,
    /// Centered on the point.
    Center,
    /// Start of the line at the point, by text direction.
    #[default]
    Start,
    /// End of the line at the point, by text direction.
    End,
}

impl TextAlign {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

/// Vertical position of the text baseline relative to the drawing point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextBaseline {
    /// Normal alphabetic baseline.
    #[default]
    Alphabetic,
    /// Top of the em square.
    Top,
    /// Middle of the em square.
    Middle,
    /// Bottom of the bounding box.
    Bottom,
    /// Hanging baseline of Indic scripts.
    Hanging,
    /// Ideographic baseline of CJK scripts.
    Ideographic,
}

impl TextBaseline {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Alphabetic => "alphabetic",
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
            Self::Hanging => "hanging",
            Self::Ideographic => "ideographic",
        }
    }
}

/// Optional font attributes.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FontParams {
    /// Italic face.
    pub italic: bool,
    /// Small-caps glyphs.
    pub small_caps: bool,
    /// Weight from `1` (thinnest) to `9` (heaviest); `0` leaves it unset.
    pub weight: u8,
    /// Line height; `None` keeps the default.
    pub line_height: Option<Size>,
}

/// The CSS `font` shorthand of a family list, a size and optional attributes.
///
/// Family names containing spaces are quoted.
#[must_use]
pub fn font_css(name: &str, size: &Size, params: &FontParams) -> String {
    let mut font = String::new();
    if params.italic {
        font.push_str("italic ");
    }
    if params.small_caps {
        font.push_str("small-caps ");
    }
    match params.weight {
        4 => font.push_str("normal "),
        7 => font.push_str("bold "),
        weight @ 1..=9 => {
            let _ = write!(font, "{} ", u32::from(weight) * 100);
        }
        _ => {}
    }
    font.push_str(&size.css("1rem"));
    if let Some(line_height) = params.line_height.as_ref().filter(|height| !height.is_auto()) {
        let _ = write!(font, "/{}", line_height.css(""));
    }

    let mut lead = " ";
    for family in name.split(',') {
        let family = family.trim_matches(|ch| matches!(ch, ' ' | '\n' | '"' | '\''));
        if family.is_empty() {
            continue;
        }
        font.push_str(lead);
        lead = ",";
        if family.contains(' ') {
            let _ = write!(font, "\"{family}\"");
        } else {
            font.push_str(family);
        }
    }
    font
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_shorthand() {
        assert_eq!(font_css("serif", &Size::px(12.0), &FontParams::default()), "12px serif");
        let params = FontParams {
            italic: true,
            weight: 7,
            line_height: Some(Size::px(20.0)),
            ..FontParams::default()
        };
        assert_eq!(
            font_css("Open Sans, 'sans-serif'", &Size::pt(10.0), &params),
            "italic bold 10pt/20px \"Open Sans\",sans-serif"
        );
        let light = FontParams { weight: 3, small_caps: true, ..FontParams::default() };
        assert_eq!(font_css("mono", &Size::px(9.0), &light), "small-caps 300 9px mono");
    }
}
