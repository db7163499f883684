//! Lengths and CSS math functions.

use core::fmt::{self, Display, Write};
use core::str::FromStr;

use super::format_number;
use crate::error::ValueParseError;

/// Unit of a [`Size`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeUnit {
    /// No explicit size.
    #[default]
    Auto,
    /// Pixels.
    Px,
    /// Font-relative em, written to CSS as `rem`.
    Em,
    /// Height of the `x` glyph.
    Ex,
    /// Percentage of the containing block.
    Percent,
    /// Points.
    Pt,
    /// Picas.
    Pc,
    /// Inches.
    Inch,
    /// Millimetres.
    Mm,
    /// Centimetres.
    Cm,
    /// Fraction of the free space of a grid track.
    Fraction,
    /// The value is the result of a [`SizeFunc`].
    Function,
}

impl SizeUnit {
    const SUFFIXES: [(Self, &'static str); 10] = [
        (Self::Px, "px"),
        (Self::Percent, "%"),
        (Self::Em, "em"),
        (Self::Ex, "ex"),
        (Self::Pt, "pt"),
        (Self::Pc, "pc"),
        (Self::Inch, "in"),
        (Self::Mm, "mm"),
        (Self::Cm, "cm"),
        (Self::Fraction, "fr"),
    ];

    /// Text suffix of the unit, empty for `Auto` and `Function`.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        Self::SUFFIXES
            .iter()
            .find(|(unit, _)| *unit == self)
            .map_or("", |(_, suffix)| suffix)
    }
}

/// A length: a unit and a number, or a math function.
#[derive(Debug, Clone, Default)]
pub struct Size {
    /// Unit of `value`.
    pub unit: SizeUnit,
    /// Magnitude; ignored for `Auto` and `Function`.
    pub value: f64,
    /// Expression of a `Function` size.
    pub function: Option<Box<SizeFunc>>,
}

impl PartialEq for Size {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit
            && match self.unit {
                SizeUnit::Auto => true,
                SizeUnit::Function => self.function == other.function,
                _ => self.value == other.value,
            }
    }
}

impl Size {
    /// The `auto` size.
    #[must_use]
    pub const fn auto() -> Self {
        Self {
            unit: SizeUnit::Auto,
            value: 0.0,
            function: None,
        }
    }

    /// Builds a size with an explicit unit.
    #[must_use]
    pub const fn new(unit: SizeUnit, value: f64) -> Self {
        Self {
            unit,
            value,
            function: None,
        }
    }

    /// Pixels.
    #[must_use]
    pub const fn px(value: f64) -> Self {
        Self::new(SizeUnit::Px, value)
    }

    /// Font-relative em.
    #[must_use]
    pub const fn em(value: f64) -> Self {
        Self::new(SizeUnit::Em, value)
    }

    /// Percentage.
    #[must_use]
    pub const fn percent(value: f64) -> Self {
        Self::new(SizeUnit::Percent, value)
    }

    /// Points.
    #[must_use]
    pub const fn pt(value: f64) -> Self {
        Self::new(SizeUnit::Pt, value)
    }

    /// Grid fraction.
    #[must_use]
    pub const fn fr(value: f64) -> Self {
        Self::new(SizeUnit::Fraction, value)
    }

    /// Wraps a math function.
    #[must_use]
    pub fn function(function: SizeFunc) -> Self {
        Self {
            unit: SizeUnit::Function,
            value: 0.0,
            function: Some(Box::new(function)),
        }
    }

    /// Returns `true` for `auto` (and for a function size without a function).
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        match self.unit {
            SizeUnit::Auto => true,
            SizeUnit::Function => self.function.is_none(),
            _ => false,
        }
    }

    /// CSS text, with `auto_text` written for `auto`.
    ///
    /// `resolve` maps `@constant` arguments of math functions to their text.
    pub fn css_with(&self, auto_text: &str, resolve: &dyn Fn(&str) -> Option<String>) -> String {
        match self.unit {
            SizeUnit::Auto => auto_text.to_string(),
            SizeUnit::Em => format!("{}rem", format_number(self.value)),
            SizeUnit::Function => self.function.as_ref().map_or_else(
                || auto_text.to_string(),
                |function| function.css(resolve),
            ),
            _ if self.value == 0.0 => "0".to_string(),
            _ => self.to_string(),
        }
    }

    /// CSS text without constant resolution.
    #[must_use]
    pub fn css(&self, auto_text: &str) -> String {
        self.css_with(auto_text, &|_| None)
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            SizeUnit::Auto => f.write_str("auto"),
            SizeUnit::Function => match &self.function {
                Some(function) => Display::fmt(function, f),
                None => f.write_str("auto"),
            },
            unit => write!(f, "{}{}", format_number(self.value), unit.suffix()),
        }
    }
}

impl FromStr for Size {
    type Err = ValueParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        match text {
            "auto" | "none" | "" => return Ok(Self::auto()),
            "0" => return Ok(Self::px(0.0)),
            _ => {}
        }

        if let Some(function) = SizeFunc::parse(text)? {
            return Ok(Self::function(function));
        }

        for (unit, suffix) in SizeUnit::SUFFIXES {
            if let Some(number) = text.strip_suffix(suffix) {
                let value = number
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| ValueParseError::new("size", text))?;
                return Ok(Self::new(unit, value));
            }
        }

        text.parse::<f64>()
            .map(Self::px)
            .map_err(|_| ValueParseError::new("size", text))
    }
}

impl From<f64> for Size {
    fn from(value: f64) -> Self {
        Self::px(value)
    }
}

impl From<i32> for Size {
    fn from(value: i32) -> Self {
        Self::px(f64::from(value))
    }
}

/// Operation of a [`SizeFunc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeFuncKind {
    /// `min(a, b, ...)`
    Min,
    /// `max(a, b, ...)`
    Max,
    /// `a + b + ...`
    Sum,
    /// `a - b`
    Sub,
    /// `a * n`
    Mul,
    /// `a / n`
    Div,
    /// `mod(a, n)`
    Mod,
    /// `rem(a, n)`
    Rem,
    /// `clamp(min, value, max)`
    Clamp,
    /// `round(nearest, a, n)`
    Round,
    /// `round(up, a, n)`
    RoundUp,
    /// `round(down, a, n)`
    RoundDown,
    /// `round(to-zero, a, n)`
    RoundToZero,
}

impl SizeFuncKind {
    // longest prefixes first so that `round-up` is not read as `round`
    const NAMES: [(Self, &'static str); 13] = [
        (Self::RoundToZero, "round-to-zero"),
        (Self::RoundDown, "round-down"),
        (Self::RoundUp, "round-up"),
        (Self::Round, "round"),
        (Self::Clamp, "clamp"),
        (Self::Min, "min"),
        (Self::Max, "max"),
        (Self::Sum, "sum"),
        (Self::Sub, "sub"),
        (Self::Mul, "mul"),
        (Self::Div, "div"),
        (Self::Mod, "mod"),
        (Self::Rem, "rem"),
    ];

    /// Function name as written in text form.
    #[must_use]
    pub fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map_or("", |(_, name)| name)
    }

    const fn arity(self) -> Option<usize> {
        match self {
            Self::Min | Self::Max | Self::Sum => None,
            Self::Clamp => Some(3),
            _ => Some(2),
        }
    }

    /// Whether the second argument may be a plain number.
    const fn numeric_second(self) -> bool {
        matches!(
            self,
            Self::Mul
                | Self::Div
                | Self::Mod
                | Self::Rem
                | Self::Round
                | Self::RoundUp
                | Self::RoundDown
                | Self::RoundToZero
        )
    }

    const fn infix(self) -> Option<&'static str> {
        match self {
            Self::Sum => Some(" + "),
            Self::Sub => Some(" - "),
            Self::Mul => Some(" * "),
            Self::Div => Some(" / "),
            _ => None,
        }
    }
}

/// Argument of a [`SizeFunc`].
#[derive(Debug, Clone, PartialEq)]
pub enum SizeFuncArg {
    /// A concrete size.
    Size(Size),
    /// A nested function.
    Func(SizeFunc),
    /// A plain number (only as the second argument of `mul`, `div`, `mod`, `rem`, `round*`).
    Number(f64),
    /// A `@constant` resolved when the CSS is written.
    Constant(String),
}

/// A CSS math expression over sizes, written as `calc(...)`, `min(...)`, `round(...)` etc.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeFunc {
    kind: SizeFuncKind,
    args: Vec<SizeFuncArg>,
}

impl SizeFunc {
    /// Builds a function after validating arity and argument kinds.
    ///
    /// # Errors
    ///
    /// Fails when the argument count is wrong for `kind`, a number appears where
    /// a size is required, `auto` is passed, or a divisor / rounding interval is zero.
    pub fn new(kind: SizeFuncKind, args: Vec<SizeFuncArg>) -> Result<Self, ValueParseError> {
        let invalid = || ValueParseError::new("size function", kind.name());
        match kind.arity() {
            Some(count) if args.len() != count => return Err(invalid()),
            None if args.len() < 2 => return Err(invalid()),
            _ => {}
        }
        for (index, arg) in args.iter().enumerate() {
            match arg {
                SizeFuncArg::Number(number) => {
                    if index != 1 || !kind.numeric_second() || *number == 0.0 {
                        return Err(invalid());
                    }
                }
                SizeFuncArg::Size(size) if size.unit == SizeUnit::Auto => return Err(invalid()),
                _ => {}
            }
        }
        Ok(Self { kind, args })
    }

    /// `min(a, b, ...)`.
    ///
    /// # Errors
    ///
    /// See [`SizeFunc::new`].
    pub fn min(args: Vec<SizeFuncArg>) -> Result<Self, ValueParseError> {
        Self::new(SizeFuncKind::Min, args)
    }

    /// `max(a, b, ...)`.
    ///
    /// # Errors
    ///
    /// See [`SizeFunc::new`].
    pub fn max(args: Vec<SizeFuncArg>) -> Result<Self, ValueParseError> {
        Self::new(SizeFuncKind::Max, args)
    }

    /// `a + b + ...`.
    ///
    /// # Errors
    ///
    /// See [`SizeFunc::new`].
    pub fn sum(args: Vec<SizeFuncArg>) -> Result<Self, ValueParseError> {
        Self::new(SizeFuncKind::Sum, args)
    }

    /// `clamp(min, value, max)`.
    ///
    /// # Errors
    ///
    /// See [`SizeFunc::new`].
    pub fn clamp(
        min: impl Into<SizeFuncArg>,
        value: impl Into<SizeFuncArg>,
        max: impl Into<SizeFuncArg>,
    ) -> Result<Self, ValueParseError> {
        Self::new(
            SizeFuncKind::Clamp,
            vec![min.into(), value.into(), max.into()],
        )
    }

    /// The operation.
    #[must_use]
    pub const fn kind(&self) -> SizeFuncKind {
        self.kind
    }

    /// The arguments.
    #[must_use]
    pub fn args(&self) -> &[SizeFuncArg] {
        &self.args
    }

    /// Parses the text form (`sum(100%, -10px)`), returning `Ok(None)` when the
    /// text does not start with a function name.
    ///
    /// # Errors
    ///
    /// Fails when the text starts with a function name but is malformed.
    pub fn parse(text: &str) -> Result<Option<Self>, ValueParseError> {
        let text = text.trim();
        let Some((kind, rest)) = SizeFuncKind::NAMES
            .iter()
            .find_map(|(kind, name)| text.strip_prefix(name).map(|rest| (*kind, rest)))
        else {
            return Ok(None);
        };
        let invalid = || ValueParseError::new("size function", text);
        let inner = rest
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let mut parts = Vec::new();
        let mut depth = 0i32;
        let mut start = 0;
        for (index, ch) in inner.char_indices() {
            match ch {
                '(' => depth += 1,
                ')' => depth -= 1,
                ',' if depth == 0 => {
                    parts.push(&inner[start..index]);
                    start = index + 1;
                }
                _ => {}
            }
        }
        if depth != 0 {
            return Err(invalid());
        }
        parts.push(&inner[start..]);

        let args = parts
            .into_iter()
            .map(|part| {
                let part = part.trim();
                if part.is_empty() {
                    Err(invalid())
                } else if part.starts_with('@') {
                    Ok(SizeFuncArg::Constant(part[1..].to_string()))
                } else if let Ok(number) = part.parse::<f64>() {
                    Ok(SizeFuncArg::Number(number))
                } else if let Some(function) = Self::parse(part)? {
                    Ok(SizeFuncArg::Func(function))
                } else {
                    part.parse::<Size>().map(SizeFuncArg::Size)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(kind, args).map(Some)
    }

    /// CSS text, e.g. `calc(100% - 10px)`.
    pub fn css(&self, resolve: &dyn Fn(&str) -> Option<String>) -> String {
        let mut buffer = String::new();
        self.write_css(None, &mut buffer, resolve);
        buffer
    }

    fn write_css(
        &self,
        parent: Option<SizeFuncKind>,
        buffer: &mut String,
        resolve: &dyn Fn(&str) -> Option<String>,
    ) {
        let mut close = true;
        let separator = if let Some(infix) = self.kind.infix() {
            match parent {
                None => buffer.push_str("calc("),
                Some(kind) if kind.infix().is_none() => close = false,
                Some(_) => buffer.push('('),
            }
            infix
        } else {
            match self.kind {
                SizeFuncKind::Round => buffer.push_str("round(nearest, "),
                SizeFuncKind::RoundUp => buffer.push_str("round(up, "),
                SizeFuncKind::RoundDown => buffer.push_str("round(down, "),
                SizeFuncKind::RoundToZero => buffer.push_str("round(to-zero, "),
                kind => {
                    buffer.push_str(kind.name());
                    buffer.push('(');
                }
            }
            ", "
        };

        for (index, arg) in self.args.iter().enumerate() {
            if index > 0 {
                buffer.push_str(separator);
            }
            match arg {
                SizeFuncArg::Size(size) => buffer.push_str(&size.css_with("0", resolve)),
                SizeFuncArg::Func(function) => function.write_css(Some(self.kind), buffer, resolve),
                SizeFuncArg::Number(number) => buffer.push_str(&format_number(*number)),
                SizeFuncArg::Constant(name) => {
                    let resolved = resolve(name).and_then(|text| text.parse::<Size>().ok());
                    match resolved {
                        Some(Size {
                            function: Some(function),
                            ..
                        }) => function.write_css(Some(self.kind), buffer, resolve),
                        Some(size) => buffer.push_str(&size.css_with("0", resolve)),
                        None => buffer.push('0'),
                    }
                }
            }
        }
        if close {
            buffer.push(')');
        }
    }
}

impl Display for SizeFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.name())?;
        f.write_char('(')?;
        for (index, arg) in self.args.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            match arg {
                SizeFuncArg::Size(size) => Display::fmt(size, f)?,
                SizeFuncArg::Func(function) => Display::fmt(function, f)?,
                SizeFuncArg::Number(number) => f.write_str(&format_number(*number))?,
                SizeFuncArg::Constant(name) => write!(f, "@{name}")?,
            }
        }
        f.write_char(')')
    }
}

impl From<Size> for SizeFuncArg {
    fn from(value: Size) -> Self {
        Self::Size(value)
    }
}

impl From<SizeFunc> for SizeFuncArg {
    fn from(value: SizeFunc) -> Self {
        Self::Func(value)
    }
}

impl From<f64> for SizeFuncArg {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_units() {
        assert_eq!("12px".parse::<Size>().unwrap(), Size::px(12.0));
        assert_eq!("1.5em".parse::<Size>().unwrap(), Size::em(1.5));
        assert_eq!("50%".parse::<Size>().unwrap(), Size::percent(50.0));
        assert_eq!("2fr".parse::<Size>().unwrap(), Size::fr(2.0));
        assert_eq!("7".parse::<Size>().unwrap(), Size::px(7.0));
        assert!("auto".parse::<Size>().unwrap().is_auto());
        assert!("".parse::<Size>().unwrap().is_auto());
        assert!("12qq".parse::<Size>().is_err());
    }

    #[test]
    fn text_and_css_forms() {
        assert_eq!(Size::px(4.0).to_string(), "4px");
        assert_eq!(Size::em(1.5).css("auto"), "1.5rem");
        assert_eq!(Size::px(0.0).css("auto"), "0");
        assert_eq!(Size::auto().css("auto"), "auto");
        assert_eq!(Size::percent(12.5).css("auto"), "12.5%");
    }

    #[test]
    fn functions() {
        let size: Size = "sum(100%, -10px)".parse().unwrap();
        assert_eq!(size.unit, SizeUnit::Function);
        assert_eq!(size.css("auto"), "calc(100% + -10px)");
        assert_eq!(size.to_string(), "sum(100%, -10px)");

        let nested: Size = "max(10px, mul(5%, 2))".parse().unwrap();
        assert_eq!(nested.css("auto"), "max(10px, 5% * 2)");

        let rounded: Size = "round-up(33px, 5px)".parse().unwrap();
        assert_eq!(rounded.css("auto"), "round(up, 33px, 5px)");

        assert!("div(10px, 0)".parse::<Size>().is_err());
        assert!("clamp(1px, 2px)".parse::<Size>().is_err());
        assert!("sub(1px, 2)".parse::<Size>().is_err());
    }

    #[test]
    fn constants_in_functions() {
        let size: Size = "min(@gap, 20px)".parse().unwrap();
        let css = size.css_with("auto", &|name| (name == "gap").then(|| "8px".to_string()));
        assert_eq!(css, "min(8px, 20px)");
        assert_eq!(size.css("auto"), "min(0, 20px)");
    }
}
