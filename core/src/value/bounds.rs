use core::fmt::{self, Display};
use core::str::FromStr;

use super::Size;
use crate::error::ValueParseError;

/// Four sizes, one per side: margins, paddings and similar.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bounds {
    /// Top side.
    pub top: Size,
    /// Right side.
    pub right: Size,
    /// Bottom side.
    pub bottom: Size,
    /// Left side.
    pub left: Size,
}

impl Bounds {
    /// Builds bounds from four sides.
    pub fn new(
        top: impl Into<Size>,
        right: impl Into<Size>,
        bottom: impl Into<Size>,
        left: impl Into<Size>,
    ) -> Self {
        Self {
            top: top.into(),
            right: right.into(),
            bottom: bottom.into(),
            left: left.into(),
        }
    }

    /// Bounds with every side set to `size`.
    #[must_use]
    pub fn all(size: Size) -> Self {
        Self {
            top: size.clone(),
            right: size.clone(),
            bottom: size.clone(),
            left: size,
        }
    }

    /// Sides in `top, right, bottom, left` order.
    #[must_use]
    pub fn sides(&self) -> [&Size; 4] {
        [&self.top, &self.right, &self.bottom, &self.left]
    }

    /// Returns `true` when the four sides are equal.
    #[must_use]
    pub fn all_equal(&self) -> bool {
        self.top == self.right && self.top == self.bottom && self.top == self.left
    }

    /// CSS text: one value when the sides are equal, otherwise four. Auto sides are `0`.
    pub fn css_with(&self, resolve: &dyn Fn(&str) -> Option<String>) -> String {
        if self.all_equal() {
            return self.top.css_with("0", resolve);
        }
        self.sides()
            .iter()
            .map(|side| side.css_with("0", resolve))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// CSS text without constant resolution.
    #[must_use]
    pub fn css(&self) -> String {
        self.css_with(&|_| None)
    }
}

impl Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.all_equal() {
            return Display::fmt(&self.top, f);
        }
        write!(f, "{},{},{},{}", self.top, self.right, self.bottom, self.left)
    }
}

impl FromStr for Bounds {
    type Err = ValueParseError;

    /// Parses `"top,right,bottom,left"` or a single size applied to every side.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let parts = text.split(',').map(str::trim).collect::<Vec<_>>();
        match parts.as_slice() {
            [all] => Ok(Self::all(all.parse()?)),
            [top, right, bottom, left] => Ok(Self {
                top: top.parse()?,
                right: right.parse()?,
                bottom: bottom.parse()?,
                left: left.parse()?,
            }),
            _ => Err(ValueParseError::new("bounds", text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_forms() {
        let bounds: Bounds = "4px, 8px, 12px, 16px".parse().unwrap();
        assert_eq!(bounds, Bounds::new(4, 8, 12, 16));
        assert_eq!("1em".parse::<Bounds>().unwrap(), Bounds::all(Size::em(1.0)));
        assert!("1px,2px".parse::<Bounds>().is_err());
    }

    #[test]
    fn css_collapses_equal_sides() {
        assert_eq!(Bounds::all(Size::px(2.0)).css(), "2px");
        assert_eq!(Bounds::new(1, 2, 3, 4).css(), "1px 2px 3px 4px");
        let partial = Bounds {
            top: Size::px(3.0),
            ..Bounds::default()
        };
        assert_eq!(partial.css(), "3px 0 0 0");
        assert_eq!(Bounds::new(1, 2, 3, 4).to_string(), "1px,2px,3px,4px");
    }
}
