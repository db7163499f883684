use core::fmt::{self, Display};
use core::str::FromStr;

use rui_color::Color;

use super::Size;
use crate::error::ValueParseError;

/// Line style of a border, outline or column separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineStyle {
    /// No line.
    #[default]
    None,
    /// Solid line.
    Solid,
    /// Dashed line.
    Dashed,
    /// Dotted line.
    Dotted,
    /// Double line.
    Double,
}

impl LineStyle {
    /// Values in enum-index order.
    pub const NAMES: [&'static str; 5] = ["none", "solid", "dashed", "dotted", "double"];

    const ALL: [Self; 5] = [
        Self::None,
        Self::Solid,
        Self::Dashed,
        Self::Dotted,
        Self::Double,
    ];

    /// The CSS keyword.
    #[must_use]
    pub const fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    /// Style of an enum index.
    #[must_use]
    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Looks a style up by name, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::NAMES
            .iter()
            .position(|candidate| *candidate == name)
            .map(|index| Self::ALL[index])
    }
}

/// One side of a border, or an outline.
///
/// Unset parts are `None`; CSS output uses the property initial value for them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BorderSide {
    /// Line style.
    pub style: Option<LineStyle>,
    /// Line width.
    pub width: Option<Size>,
    /// Line color.
    pub color: Option<Color>,
}

impl BorderSide {
    /// A fully specified side.
    pub fn new(style: LineStyle, width: impl Into<Size>, color: Color) -> Self {
        Self {
            style: Some(style),
            width: Some(width.into()),
            color: Some(color),
        }
    }

    /// Returns `true` when no part is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.style.is_none() && self.width.is_none() && self.color.is_none()
    }

    /// CSS shorthand text `width style color`, skipping unset parts.
    #[must_use]
    pub fn css(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(width) = &self.width {
            parts.push(width.css("medium"));
        }
        if let Some(style) = self.style {
            parts.push(style.name().to_string());
        }
        if let Some(color) = self.color {
            parts.push(color.css());
        }
        parts.join(" ")
    }
}

impl Display for BorderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if let Some(style) = self.style {
            parts.push(style.name().to_string());
        }
        if let Some(width) = &self.width {
            parts.push(width.to_string());
        }
        if let Some(color) = self.color {
            parts.push(color.to_string());
        }
        f.write_str(&parts.join(" "))
    }
}

impl FromStr for BorderSide {
    type Err = ValueParseError;

    /// Parses `"style width color"` with the parts in any order.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut side = Self::default();
        for token in text.split_whitespace() {
            if let Some(style) = LineStyle::from_name(token) {
                side.style = Some(style);
            } else if let Ok(color) = token.parse::<Color>() {
                side.color = Some(color);
            } else if let Ok(width) = token.parse::<Size>() {
                side.width = Some(width);
            } else {
                return Err(ValueParseError::new("border", text));
            }
        }
        if side.is_empty() {
            return Err(ValueParseError::new("border", text));
        }
        Ok(side)
    }
}

/// A border with independent sides.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Border {
    /// Top side.
    pub top: BorderSide,
    /// Right side.
    pub right: BorderSide,
    /// Bottom side.
    pub bottom: BorderSide,
    /// Left side.
    pub left: BorderSide,
}

impl Border {
    /// A border with four equal sides.
    #[must_use]
    pub fn all(side: BorderSide) -> Self {
        Self {
            top: side.clone(),
            right: side.clone(),
            bottom: side.clone(),
            left: side,
        }
    }

    /// Sides in `top, right, bottom, left` order.
    #[must_use]
    pub fn sides(&self) -> [&BorderSide; 4] {
        [&self.top, &self.right, &self.bottom, &self.left]
    }

    /// CSS declarations `(name, value)` for `border-style`, `border-width` and
    /// `border-color`, each collapsed to one value when the sides agree.
    #[must_use]
    pub fn css_declarations(&self) -> [(&'static str, String); 3] {
        let sides = self.sides();
        let join = |values: [String; 4]| {
            if values.iter().all(|value| *value == values[0]) {
                values[0].clone()
            } else {
                values.join(" ")
            }
        };
        [
            (
                "border-style",
                join(sides.map(|side| side.style.unwrap_or_default().name().to_string())),
            ),
            (
                "border-width",
                join(sides.map(|side| {
                    side.width
                        .as_ref()
                        .map_or_else(|| "medium".to_string(), |width| width.css("medium"))
                })),
            ),
            (
                "border-color",
                join(sides.map(|side| {
                    side.color
                        .map_or_else(|| "currentcolor".to_string(), Color::css)
                })),
            ),
        ]
    }
}

impl Display for Border {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.top == self.right && self.top == self.bottom && self.top == self.left {
            return Display::fmt(&self.top, f);
        }
        write!(
            f,
            "{}; {}; {}; {}",
            self.top, self.right, self.bottom, self.left
        )
    }
}

impl From<BorderSide> for Border {
    fn from(value: BorderSide) -> Self {
        Self::all(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_any_order() {
        let side: BorderSide = "2px red solid".parse().unwrap();
        assert_eq!(side, BorderSide::new(LineStyle::Solid, 2, Color::RED));
        assert_eq!(side.css(), "2px solid rgb(255,0,0)");
        assert!("wobbly".parse::<BorderSide>().is_err());
    }

    #[test]
    fn declarations_collapse() {
        let mut border = Border::all(BorderSide::new(LineStyle::Dashed, 1, Color::BLACK));
        let [style, width, color] = border.css_declarations();
        assert_eq!(style.1, "dashed");
        assert_eq!(width.1, "1px");
        assert_eq!(color.1, "rgb(0,0,0)");

        border.left.style = Some(LineStyle::None);
        assert_eq!(border.css_declarations()[0].1, "dashed dashed dashed none");
    }
}
