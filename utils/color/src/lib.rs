//! # Color
//!
//! A 32-bit ARGB color value shared by every widget property that carries a
//! color. The crate knows three text forms:
//!
//! - the wire form `#AARRGGBB` written by [`Display`](core::fmt::Display),
//! - the CSS form `rgb(r,g,b)` / `rgba(r,g,b,.aa)` returned by [`Color::css`],
//! - the accepted input forms listed on [`Color::from_str`](core::str::FromStr):
//!   `#RGB`, `#ARGB`, `#RRGGBB`, `#AARRGGBB`, `rgb(...)`, `rgba(...)` and the
//!   CSS named colors.
//!
//! ```
//! use rui_color::Color;
//!
//! let color: Color = "#F80".parse().unwrap();
//! assert_eq!(color, Color::from_argb(0xFF, 0xFF, 0x88, 0x00));
//! assert_eq!(color.to_string(), "#FFFF8800");
//! assert_eq!(color.css(), "rgb(255,136,0)");
//! ```

mod named;
mod parse;

pub use parse::ColorParseError;

use core::fmt::{self, Display};
use core::str::FromStr;

/// A color in ARGB order, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(u32);

impl Color {
    /// Fully transparent black. Writing it to a color property removes the property.
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    /// Opaque red.
    pub const RED: Self = Self(0xFFFF_0000);
    /// Opaque green (`#008000`).
    pub const GREEN: Self = Self(0xFF00_8000);
    /// Opaque blue.
    pub const BLUE: Self = Self(0xFF00_00FF);
    /// Opaque gray (`#808080`).
    pub const GRAY: Self = Self(0xFF80_8080);

    /// Builds a color from its packed `0xAARRGGBB` form.
    #[must_use]
    pub const fn new(argb: u32) -> Self {
        Self(argb)
    }

    /// Builds a color from separate channels.
    #[must_use]
    pub const fn from_argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self(
            ((alpha as u32) << 24) | ((red as u32) << 16) | ((green as u32) << 8) | (blue as u32),
        )
    }

    /// Builds an opaque color.
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::from_argb(0xFF, red, green, blue)
    }

    /// The packed `0xAARRGGBB` value.
    #[must_use]
    pub const fn argb(self) -> u32 {
        self.0
    }

    /// Alpha channel.
    #[must_use]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel.
    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Returns `true` for the all-zero value.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns a copy with the alpha channel replaced.
    #[must_use]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0x00FF_FFFF) | ((alpha as u32) << 24))
    }

    /// The CSS form: `rgb(r,g,b)` when opaque, otherwise `rgba(r,g,b,.aa)`.
    #[must_use]
    pub fn css(self) -> String {
        let (red, green, blue) = (self.red(), self.green(), self.blue());
        let alpha = self.alpha();
        if alpha == 0xFF {
            return format!("rgb({red},{green},{blue})");
        }
        let fraction = format!("{:.2}", f64::from(alpha) / 255.0);
        let fraction = fraction.strip_prefix('0').unwrap_or(&fraction);
        format!("rgba({red},{green},{blue},{fraction})")
    }

    /// The `#RRGGBB` form without alpha, as used by `<input type="color">`.
    #[must_use]
    pub fn rgb_hex(self) -> String {
        format!("#{:06X}", self.0 & 0x00FF_FFFF)
    }

    /// Looks up a CSS color name (case-insensitive).
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        named::NAMED_COLORS
            .binary_search_by(|(candidate, _)| (*candidate).cmp(name.as_str()))
            .ok()
            .map(|index| Self(named::NAMED_COLORS[index].1))
    }

    /// Returns the CSS name of the color, if it has one.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        named::NAMED_COLORS
            .iter()
            .find(|(_, argb)| *argb == self.0)
            .map(|(name, _)| *name)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parses `#RGB`, `#ARGB`, `#RRGGBB`, `#AARRGGBB`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)` and the CSS color names.
    ///
    /// `rgb` components are integers in `0..=255`, percentages, or fractions in `0..=1`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse::parse_color(text)
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Color> for u32 {
    fn from(value: Color) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_forms() {
        assert_eq!("#FF0000".parse::<Color>(), Ok(Color::RED));
        assert_eq!("#80FF0000".parse::<Color>(), Ok(Color::new(0x80FF_0000)));
        assert_eq!("#8F00".parse::<Color>(), Ok(Color::new(0x88FF_0000)));
        assert_eq!("  #abc ".parse::<Color>(), Ok(Color::new(0xFFAA_BBCC)));
        assert!("#12345".parse::<Color>().is_err());
        assert!("#GG0000".parse::<Color>().is_err());
    }

    #[test]
    fn functional_forms() {
        assert_eq!("rgb(255, 0, 0)".parse::<Color>(), Ok(Color::RED));
        assert_eq!(
            "RGBA(0, 0, 255, .5)".parse::<Color>(),
            Ok(Color::new(0x7F00_00FF))
        );
        assert_eq!("rgb(100%, 0%, 0%)".parse::<Color>(), Ok(Color::RED));
        assert!("rgb(256, 0, 0)".parse::<Color>().is_err());
        assert!("rgb(1, 2)".parse::<Color>().is_err());
    }

    #[test]
    fn named_colors() {
        assert_eq!("Blue".parse::<Color>(), Ok(Color::BLUE));
        assert_eq!(Color::named("orange"), Some(Color::new(0xFFFF_A500)));
        assert_eq!(Color::WHITE.name(), Some("white"));
        assert!("no-such-color".parse::<Color>().is_err());
    }

    #[test]
    fn text_forms() {
        let color = Color::from_argb(0x80, 1, 2, 3);
        assert_eq!(color.to_string(), "#80010203");
        assert_eq!(color.css(), "rgba(1,2,3,.50)");
        assert_eq!(Color::RED.css(), "rgb(255,0,0)");
        assert_eq!(color.rgb_hex(), "#010203");
    }
}
