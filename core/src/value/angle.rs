use core::f64::consts::PI;
use core::fmt::{self, Display};
use core::str::FromStr;

use super::format_number;
use crate::error::ValueParseError;

/// Unit of an [`Angle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AngleUnit {
    /// Radians.
    #[default]
    Radian,
    /// Multiples of π radians.
    PiRadian,
    /// Degrees.
    Degree,
    /// Gradians, 1/400 of a full circle.
    Gradian,
    /// Full turns.
    Turn,
}

impl AngleUnit {
    /// Text suffix. `grad` must be tried before `rad` when parsing.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Radian => "rad",
            Self::PiRadian => "pi",
            Self::Degree => "deg",
            Self::Gradian => "grad",
            Self::Turn => "turn",
        }
    }
}

/// An angle value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Angle {
    /// Unit of `value`.
    pub unit: AngleUnit,
    /// Magnitude.
    pub value: f64,
}

impl Angle {
    /// Radians.
    #[must_use]
    pub const fn rad(value: f64) -> Self {
        Self {
            unit: AngleUnit::Radian,
            value,
        }
    }

    /// Multiples of π.
    #[must_use]
    pub const fn pi_rad(value: f64) -> Self {
        Self {
            unit: AngleUnit::PiRadian,
            value,
        }
    }

    /// Degrees.
    #[must_use]
    pub const fn deg(value: f64) -> Self {
        Self {
            unit: AngleUnit::Degree,
            value,
        }
    }

    /// Gradians.
    #[must_use]
    pub const fn grad(value: f64) -> Self {
        Self {
            unit: AngleUnit::Gradian,
            value,
        }
    }

    /// Turns.
    #[must_use]
    pub const fn turn(value: f64) -> Self {
        Self {
            unit: AngleUnit::Turn,
            value,
        }
    }

    /// CSS text. π multiples are written as radians.
    #[must_use]
    pub fn css(&self) -> String {
        if self.unit == AngleUnit::PiRadian {
            format!("{}rad", format_number(self.value * PI))
        } else {
            self.to_string()
        }
    }

    /// The same angle in radians.
    #[must_use]
    pub fn to_radian(self) -> Self {
        Self::rad(match self.unit {
            AngleUnit::Radian => self.value,
            AngleUnit::PiRadian => self.value * PI,
            AngleUnit::Degree => self.value * PI / 180.0,
            AngleUnit::Gradian => self.value * PI / 200.0,
            AngleUnit::Turn => self.value * 2.0 * PI,
        })
    }

    /// The same angle in degrees.
    #[must_use]
    pub fn to_degree(self) -> Self {
        Self::deg(match self.unit {
            AngleUnit::Radian => self.value * 180.0 / PI,
            AngleUnit::PiRadian => self.value * 180.0,
            AngleUnit::Degree => self.value,
            AngleUnit::Gradian => self.value * 360.0 / 400.0,
            AngleUnit::Turn => self.value * 360.0,
        })
    }

    /// The same angle in gradians.
    #[must_use]
    pub fn to_gradian(self) -> Self {
        Self::grad(match self.unit {
            AngleUnit::Radian => self.value * 200.0 / PI,
            AngleUnit::PiRadian => self.value * 200.0,
            AngleUnit::Degree => self.value * 400.0 / 360.0,
            AngleUnit::Gradian => self.value,
            AngleUnit::Turn => self.value * 400.0,
        })
    }

    /// The same angle in turns.
    #[must_use]
    pub fn to_turn(self) -> Self {
        Self::turn(match self.unit {
            AngleUnit::Radian => self.value / (2.0 * PI),
            AngleUnit::PiRadian => self.value / 2.0,
            AngleUnit::Degree => self.value / 360.0,
            AngleUnit::Gradian => self.value / 400.0,
            AngleUnit::Turn => self.value,
        })
    }
}

impl Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_number(self.value), self.unit.suffix())
    }
}

impl FromStr for Angle {
    type Err = ValueParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let lower = text.trim().to_lowercase();
        let number = |digits: &str| {
            digits
                .trim()
                .parse::<f64>()
                .map_err(|_| ValueParseError::new("angle", text))
        };

        if lower == "π" {
            return Ok(Self::pi_rad(1.0));
        }
        if let Some(digits) = lower.strip_suffix('π') {
            return Ok(Self::pi_rad(number(digits)?));
        }
        if let Some(digits) = lower.strip_suffix('°') {
            return Ok(Self::deg(number(digits)?));
        }

        const ORDER: [AngleUnit; 5] = [
            AngleUnit::Degree,
            AngleUnit::Gradian,
            AngleUnit::Radian,
            AngleUnit::PiRadian,
            AngleUnit::Turn,
        ];
        for unit in ORDER {
            if let Some(digits) = lower.strip_suffix(unit.suffix()) {
                return Ok(Self {
                    unit,
                    value: number(digits)?,
                });
            }
        }

        number(&lower).map(Self::rad)
    }
}

impl From<f64> for Angle {
    fn from(value: f64) -> Self {
        Self::rad(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_suffixes() {
        assert_eq!("90deg".parse::<Angle>().unwrap(), Angle::deg(90.0));
        assert_eq!("45°".parse::<Angle>().unwrap(), Angle::deg(45.0));
        assert_eq!("100grad".parse::<Angle>().unwrap(), Angle::grad(100.0));
        assert_eq!("1.5rad".parse::<Angle>().unwrap(), Angle::rad(1.5));
        assert_eq!("0.25turn".parse::<Angle>().unwrap(), Angle::turn(0.25));
        assert_eq!("2π".parse::<Angle>().unwrap(), Angle::pi_rad(2.0));
        assert_eq!("π".parse::<Angle>().unwrap(), Angle::pi_rad(1.0));
        assert_eq!("0.5pi".parse::<Angle>().unwrap(), Angle::pi_rad(0.5));
        assert_eq!("2".parse::<Angle>().unwrap(), Angle::rad(2.0));
        assert!("north".parse::<Angle>().is_err());
    }

    #[test]
    fn conversions() {
        assert!((Angle::turn(0.5).to_degree().value - 180.0).abs() < 1e-9);
        assert!((Angle::deg(180.0).to_radian().value - PI).abs() < 1e-9);
        assert!((Angle::pi_rad(1.0).to_gradian().value - 200.0).abs() < 1e-9);
        assert_eq!(Angle::deg(90.0).css(), "90deg");
    }
}
