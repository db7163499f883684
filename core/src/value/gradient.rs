//! Background gradients.

use rui_color::Color;

use super::{Angle, Size};
use crate::data::DataObject;
use crate::error::ValueParseError;

/// Keywords of a linear gradient direction, in enum-index order.
pub const DIRECTION_NAMES: [&str; 8] = [
    "to-top",
    "to-right-top",
    "to-right",
    "to-right-bottom",
    "to-bottom",
    "to-left-bottom",
    "to-left",
    "to-left-top",
];

const DIRECTION_CSS: [&str; 8] = [
    "to top",
    "to right top",
    "to right",
    "to right bottom",
    "to bottom",
    "to left bottom",
    "to left",
    "to left top",
];

/// Keywords of a radial gradient extent, in enum-index order.
pub const RADIAL_RADIUS_NAMES: [&str; 4] = [
    "closest-side",
    "closest-corner",
    "farthest-side",
    "farthest-corner",
];

/// A color stop at an optional position along the gradient line.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    /// Stop color.
    pub color: Color,
    /// Position, `None` for evenly spaced stops.
    pub position: Option<Size>,
}

impl GradientStop {
    /// A stop without a position.
    #[must_use]
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            position: None,
        }
    }

    /// A stop at `position`.
    #[must_use]
    pub const fn at(color: Color, position: Size) -> Self {
        Self {
            color,
            position: Some(position),
        }
    }

    fn css(&self) -> String {
        match &self.position {
            Some(position) if !position.is_auto() => {
                format!("{} {}", self.color.css(), position.css(""))
            }
            _ => self.color.css(),
        }
    }
}

/// A color stop at an optional angle of a conic gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleStop {
    /// Stop color.
    pub color: Color,
    /// Angle of the stop.
    pub angle: Option<Angle>,
}

fn split_stop(text: &str) -> Result<(Color, Option<&str>), ValueParseError> {
    let text = text.trim();
    let (color, position) = match text.split_once(char::is_whitespace) {
        Some((color, position)) => (color, Some(position.trim())),
        None => (text, None),
    };
    let color = color
        .parse::<Color>()
        .map_err(|_| ValueParseError::new("gradient stop", text))?;
    Ok((color, position))
}

/// Parses `"color [position], color [position], ..."`; at least two stops are required.
///
/// # Errors
///
/// Fails on a malformed stop or when fewer than two stops are given.
pub fn parse_stops(text: &str) -> Result<Vec<GradientStop>, ValueParseError> {
    let stops = text
        .split(',')
        .map(|element| {
            let (color, position) = split_stop(element)?;
            Ok(GradientStop {
                color,
                position: position.map(str::parse).transpose()?,
            })
        })
        .collect::<Result<Vec<_>, ValueParseError>>()?;
    if stops.len() < 2 {
        return Err(ValueParseError::new("gradient", text));
    }
    Ok(stops)
}

/// Parses the stops of a conic gradient: `"color [angle], ..."`.
///
/// # Errors
///
/// Fails on a malformed stop or when fewer than two stops are given.
pub fn parse_angle_stops(text: &str) -> Result<Vec<AngleStop>, ValueParseError> {
    let stops = text
        .split(',')
        .map(|element| {
            let (color, angle) = split_stop(element)?;
            Ok(AngleStop {
                color,
                angle: angle.map(str::parse).transpose()?,
            })
        })
        .collect::<Result<Vec<_>, ValueParseError>>()?;
    if stops.len() < 2 {
        return Err(ValueParseError::new("conic gradient", text));
    }
    Ok(stops)
}

/// Direction of a linear gradient.
#[derive(Debug, Clone, PartialEq)]
pub enum LinearDirection {
    /// Index into [`DIRECTION_NAMES`].
    Keyword(usize),
    /// Explicit angle.
    Angle(Angle),
}

impl LinearDirection {
    fn parse(text: &str) -> Result<Self, ValueParseError> {
        let trimmed = text.trim();
        if let Some(index) = DIRECTION_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(trimmed))
        {
            return Ok(Self::Keyword(index));
        }
        trimmed.parse().map(Self::Angle)
    }

    fn css(&self) -> String {
        match self {
            Self::Keyword(index) => DIRECTION_CSS.get(*index).copied().unwrap_or("").to_string(),
            Self::Angle(angle) => angle.css(),
        }
    }
}

/// Shape of a radial gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadialShape {
    /// Ellipse fitting the box.
    #[default]
    Ellipse,
    /// Circle.
    Circle,
}

/// Extent of a radial gradient.
#[derive(Debug, Clone, PartialEq)]
pub enum RadialExtent {
    /// Index into [`RADIAL_RADIUS_NAMES`].
    Keyword(usize),
    /// Explicit horizontal and vertical radii.
    Size(Size, Size),
}

/// One layer of the `background` property.
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundElement {
    /// `linear-gradient(...)`
    Linear {
        /// Color stops.
        stops: Vec<GradientStop>,
        /// Gradient line direction.
        direction: Option<LinearDirection>,
        /// Repeat the stops.
        repeating: bool,
    },
    /// `radial-gradient(...)`
    Radial {
        /// Color stops.
        stops: Vec<GradientStop>,
        /// Ending shape.
        shape: RadialShape,
        /// Extent of the ending shape.
        radius: Option<RadialExtent>,
        /// Center, `auto` for the box center.
        center: (Size, Size),
        /// Repeat the stops.
        repeating: bool,
    },
    /// `conic-gradient(...)`
    Conic {
        /// Color stops.
        stops: Vec<AngleStop>,
        /// Start angle.
        from: Option<Angle>,
        /// Center, `auto` for the box center.
        center: (Size, Size),
        /// Repeat the stops.
        repeating: bool,
    },
}

fn center_css(center: &(Size, Size)) -> Option<String> {
    if center.0.is_auto() && center.1.is_auto() {
        return None;
    }
    Some(format!("at {} {}", center.0.css("50%"), center.1.css("50%")))
}

impl BackgroundElement {
    /// A linear gradient.
    #[must_use]
    pub const fn linear(stops: Vec<GradientStop>, direction: Option<LinearDirection>) -> Self {
        Self::Linear {
            stops,
            direction,
            repeating: false,
        }
    }

    /// A radial gradient.
    #[must_use]
    pub const fn radial(stops: Vec<GradientStop>, shape: RadialShape) -> Self {
        Self::Radial {
            stops,
            shape,
            radius: None,
            center: (Size::auto(), Size::auto()),
            repeating: false,
        }
    }

    /// A conic gradient.
    #[must_use]
    pub const fn conic(stops: Vec<AngleStop>, from: Option<Angle>) -> Self {
        Self::Conic {
            stops,
            from,
            center: (Size::auto(), Size::auto()),
            repeating: false,
        }
    }

    /// Builds an element from a resource object such as
    /// `linear-gradient { gradient = "red, blue 50%", direction = to-right }`.
    ///
    /// # Errors
    ///
    /// Fails on an unknown object tag or a malformed field.
    pub fn from_object(object: &DataObject) -> Result<Self, ValueParseError> {
        let repeating = matches!(
            object.text("repeating").map(str::trim),
            Some("true" | "yes" | "on" | "1")
        );
        let gradient = object
            .text("gradient")
            .ok_or_else(|| ValueParseError::new("background", object.tag()))?;
        let size = |tag: &str| -> Result<Size, ValueParseError> {
            object.text(tag).map_or(Ok(Size::auto()), str::parse)
        };

        match object.tag() {
            "linear-gradient" => Ok(Self::Linear {
                stops: parse_stops(gradient)?,
                direction: object
                    .text("direction")
                    .map(LinearDirection::parse)
                    .transpose()?,
                repeating,
            }),
            "radial-gradient" => {
                let shape = match object.text("radial-gradient-shape").map(str::trim) {
                    Some("circle" | "1") => RadialShape::Circle,
                    _ => RadialShape::Ellipse,
                };
                let radius = match object.text("radial-gradient-radius").map(str::trim) {
                    None => None,
                    Some(text) => Some(
                        match RADIAL_RADIUS_NAMES.iter().position(|name| *name == text) {
                            Some(index) => RadialExtent::Keyword(index),
                            None => {
                                let size: Size = text.parse()?;
                                RadialExtent::Size(size.clone(), size)
                            }
                        },
                    ),
                };
                Ok(Self::Radial {
                    stops: parse_stops(gradient)?,
                    shape,
                    radius,
                    center: (size("center-x")?, size("center-y")?),
                    repeating,
                })
            }
            "conic-gradient" => Ok(Self::Conic {
                stops: parse_angle_stops(gradient)?,
                from: object.text("from").map(str::parse).transpose()?,
                center: (size("center-x")?, size("center-y")?),
                repeating,
            }),
            tag => Err(ValueParseError::new("background", tag)),
        }
    }

    /// The CSS image function.
    #[must_use]
    pub fn css(&self) -> String {
        let prefix = |repeating: bool| if repeating { "repeating-" } else { "" };
        let mut args: Vec<String> = Vec::new();
        match self {
            Self::Linear {
                stops,
                direction,
                repeating,
            } => {
                if let Some(direction) = direction {
                    args.push(direction.css());
                }
                args.extend(stops.iter().map(GradientStop::css));
                format!("{}linear-gradient({})", prefix(*repeating), args.join(", "))
            }
            Self::Radial {
                stops,
                shape,
                radius,
                center,
                repeating,
            } => {
                let mut head = match radius {
                    Some(RadialExtent::Keyword(index)) => format!(
                        "{} {}",
                        if *shape == RadialShape::Circle { "circle" } else { "ellipse" },
                        RADIAL_RADIUS_NAMES.get(*index).copied().unwrap_or("farthest-corner")
                    ),
                    Some(RadialExtent::Size(x, y)) => {
                        format!("ellipse {} {}", x.css("50%"), y.css("50%"))
                    }
                    None if *shape == RadialShape::Circle => "circle".to_string(),
                    None => "ellipse".to_string(),
                };
                if let Some(at) = center_css(center) {
                    head.push(' ');
                    head.push_str(&at);
                }
                args.push(head);
                args.extend(stops.iter().map(GradientStop::css));
                format!("{}radial-gradient({})", prefix(*repeating), args.join(", "))
            }
            Self::Conic {
                stops,
                from,
                center,
                repeating,
            } => {
                let mut head = Vec::new();
                if let Some(from) = from {
                    head.push(format!("from {}", from.css()));
                }
                if let Some(at) = center_css(center) {
                    head.push(at);
                }
                if !head.is_empty() {
                    args.push(head.join(" "));
                }
                args.extend(stops.iter().map(|stop| match stop.angle {
                    Some(angle) => format!("{} {}", stop.color.css(), angle.css()),
                    None => stop.color.css(),
                }));
                format!("{}conic-gradient({})", prefix(*repeating), args.join(", "))
            }
        }
    }
}

/// The `background-image` value of several layers.
#[must_use]
pub fn background_css(elements: &[BackgroundElement]) -> String {
    elements
        .iter()
        .map(BackgroundElement::css)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_text() {
        let stops = parse_stops("red, #FF0000FF 50%").unwrap();
        assert_eq!(stops[0], GradientStop::new(Color::RED));
        assert_eq!(stops[1], GradientStop::at(Color::BLUE, Size::percent(50.0)));
        assert!(parse_stops("red").is_err());
    }

    #[test]
    fn linear_css() {
        let object = DataObject::parse(
            "linear-gradient { gradient = \"red, blue 40%\", direction = to-right, repeating = true }",
        )
        .unwrap();
        let element = BackgroundElement::from_object(&object).unwrap();
        assert_eq!(
            element.css(),
            "repeating-linear-gradient(to right, rgb(255,0,0), rgb(0,0,255) 40%)"
        );
    }

    #[test]
    fn radial_and_conic_css() {
        let stops = parse_stops("white, black").unwrap();
        let radial = BackgroundElement::Radial {
            stops,
            shape: RadialShape::Circle,
            radius: Some(RadialExtent::Keyword(2)),
            center: (Size::percent(10.0), Size::auto()),
            repeating: false,
        };
        assert_eq!(
            radial.css(),
            "radial-gradient(circle farthest-side at 10% 50%, rgb(255,255,255), rgb(0,0,0))"
        );

        let conic = BackgroundElement::conic(
            parse_angle_stops("red, blue 90deg").unwrap(),
            Some(Angle::deg(45.0)),
        );
        assert_eq!(
            conic.css(),
            "conic-gradient(from 45deg, rgb(255,0,0), rgb(0,0,255) 90deg)"
        );
    }
}
