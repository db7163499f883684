use core::fmt;

use crate::Color;

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// The input was empty.
    Empty,
    /// A `#` form had a digit count other than 3, 4, 6 or 8.
    InvalidLength(usize),
    /// A character at the given offset is not a hexadecimal digit.
    InvalidDigit(usize),
    /// An `rgb(...)` or `rgba(...)` form was malformed.
    InvalidFunction(String),
    /// The text is neither a known form nor a color name.
    Unknown(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty color value"),
            Self::InvalidLength(len) => write!(
                f,
                "invalid color length {len}, expected #AARRGGBB, #RRGGBB, #ARGB or #RGB"
            ),
            Self::InvalidDigit(index) => write!(f, "invalid hex digit at offset {index}"),
            Self::InvalidFunction(text) => write!(f, "invalid color function \"{text}\""),
            Self::Unknown(text) => write!(f, "invalid color format \"{text}\""),
        }
    }
}

impl std::error::Error for ColorParseError {}

const fn hex_digit(b: u8, index: usize) -> Result<u32, ColorParseError> {
    match b {
        b'0'..=b'9' => Ok((b - b'0') as u32),
        b'a'..=b'f' => Ok((b - b'a' + 10) as u32),
        b'A'..=b'F' => Ok((b - b'A' + 10) as u32),
        _ => Err(ColorParseError::InvalidDigit(index)),
    }
}

fn parse_hex(digits: &str) -> Result<Color, ColorParseError> {
    let bytes = digits.as_bytes();
    let mut packed = 0u32;
    for (index, b) in bytes.iter().enumerate() {
        packed = (packed << 4) | hex_digit(*b, index + 1)?;
    }

    // duplicates each nibble of a short form: 0xABC -> 0xAABBCC
    let widen = |short: u32, nibbles: u32| {
        (0..nibbles).fold(0u32, |acc, i| {
            let nibble = (short >> (4 * (nibbles - 1 - i))) & 0xF;
            (acc << 8) | (nibble << 4) | nibble
        })
    };

    match bytes.len() {
        8 => Ok(Color::new(packed)),
        6 => Ok(Color::new(packed | 0xFF00_0000)),
        4 => Ok(Color::new(widen(packed, 4))),
        3 => Ok(Color::new(0xFF00_0000 | widen(packed, 3))),
        len => Err(ColorParseError::InvalidLength(len)),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_component(text: &str) -> Option<u32> {
    let text = text.trim();
    if let Some(percent) = text.strip_suffix('%') {
        let n: u32 = percent.trim().parse().ok()?;
        return (n <= 100).then_some(n * 255 / 100);
    }
    if text.contains('.') {
        let f: f64 = if text.starts_with('.') {
            format!("0{text}").parse().ok()?
        } else {
            text.parse().ok()?
        };
        return (0.0..=1.0).contains(&f).then(|| (f * 255.0) as u32);
    }
    let n: u32 = text.parse().ok()?;
    (n <= 255).then_some(n)
}

fn parse_args(args: &str, count: usize) -> Option<Vec<u32>> {
    let inner = args.trim().strip_prefix('(')?.strip_suffix(')')?;
    let values = inner
        .split(',')
        .map(parse_component)
        .collect::<Option<Vec<_>>>()?;
    (values.len() == count).then_some(values)
}

pub(crate) fn parse_color(text: &str) -> Result<Color, ColorParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ColorParseError::Empty);
    }

    if let Some(digits) = text.strip_prefix('#') {
        return parse_hex(digits);
    }

    let lower = text.to_ascii_lowercase();
    if let Some(args) = lower.strip_prefix("rgba") {
        let values = parse_args(args, 4)
            .ok_or_else(|| ColorParseError::InvalidFunction(text.to_string()))?;
        return Ok(Color::new(
            (values[3] << 24) | (values[0] << 16) | (values[1] << 8) | values[2],
        ));
    }
    if let Some(args) = lower.strip_prefix("rgb") {
        let values = parse_args(args, 3)
            .ok_or_else(|| ColorParseError::InvalidFunction(text.to_string()))?;
        return Ok(Color::new(
            0xFF00_0000 | (values[0] << 16) | (values[1] << 8) | values[2],
        ));
    }

    Color::named(&lower).ok_or_else(|| ColorParseError::Unknown(text.to_string()))
}
