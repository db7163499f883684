//! Date and time text forms of the picker widgets.
//!
//! Accepted dates: `YYYYMMDD`, `YYYY-MM-DD`, `DD-Mon-YYYY`, `Mon-DD-YY`, `Mon-DD-YYYY`,
//! `Month DD, YYYY`, `DD Month YYYY`, `MM/DD/YY`, `MM/DD/YYYY`, `MMDDYY`.
//! Accepted times: `HH:MM`, `HH:MM PM`, `HH:MM:SS`, `HH:MM:SS PM`.
//! The storage and wire forms are `YYYY-MM-DD` and `HH:MM:SS`.

use time::{Date, Month, Time};

use crate::error::ValueParseError;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

fn month_by_name(name: &str) -> Option<Month> {
    let name = name.trim().to_lowercase();
    if name.len() < 3 {
        return None;
    }
    let index = MONTHS
        .iter()
        .position(|month| *month == name || (name.len() == 3 && month.starts_with(&name)))?;
    u8::try_from(index + 1)
        .ok()
        .and_then(|number| Month::try_from(number).ok())
}

fn number<T: core::str::FromStr>(text: &str, digits: Option<usize>) -> Option<T> {
    let text = text.trim();
    if digits.is_some_and(|digits| text.len() != digits) || !text.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    text.parse().ok()
}

const fn widen_year(year: i32) -> i32 {
    if year < 69 { 2000 + year } else { 1900 + year }
}

fn build(year: i32, month: Option<Month>, day: Option<u8>) -> Option<Date> {
    Date::from_calendar_date(year, month?, day?).ok()
}

fn month_number(text: &str) -> Option<Month> {
    number::<u8>(text, Some(2)).and_then(|month| Month::try_from(month).ok())
}

/// Parses a date in one of the accepted forms.
///
/// # Errors
///
/// Fails when the text matches no accepted form or names an invalid day.
pub fn parse_date(text: &str) -> Result<Date, ValueParseError> {
    let trimmed = text.trim();
    let starts_alpha = |part: &str| part.bytes().next().is_some_and(|b| b > b'9');

    let date = if trimmed.contains('-') {
        match trimmed.split('-').collect::<Vec<_>>().as_slice() {
            [month, day, year] if starts_alpha(month) => {
                let year = if year.len() == 2 {
                    number::<i32>(year, Some(2)).map(widen_year)
                } else {
                    number::<i32>(year, Some(4))
                };
                year.and_then(|year| build(year, month_by_name(month), number(day, Some(2))))
            }
            [day, month, year] if starts_alpha(month) => number::<i32>(year, Some(4))
                .and_then(|year| build(year, month_by_name(month), number(day, Some(2)))),
            [year, month, day] => number::<i32>(year, Some(4))
                .and_then(|year| build(year, month_number(month), number(day, Some(2)))),
            _ => None,
        }
    } else if trimmed.contains(' ') {
        match trimmed.split(' ').collect::<Vec<_>>().as_slice() {
            [month, day, year] if starts_alpha(month) => {
                number::<i32>(year, Some(4)).and_then(|year| {
                    build(
                        year,
                        month_by_name(month),
                        day.strip_suffix(',').and_then(|day| number(day, Some(2))),
                    )
                })
            }
            [day, month, year] => number::<i32>(year, Some(4))
                .and_then(|year| build(year, month_by_name(month), number(day, Some(2)))),
            _ => None,
        }
    } else if trimmed.contains('/') {
        match trimmed.split('/').collect::<Vec<_>>().as_slice() {
            [month, day, year] => {
                let year = if year.len() == 2 {
                    number::<i32>(year, Some(2)).map(widen_year)
                } else {
                    number::<i32>(year, Some(4))
                };
                year.and_then(|year| build(year, month_number(month), number(day, Some(2))))
            }
            _ => None,
        }
    } else if trimmed.len() == 6 && trimmed.is_ascii() {
        number::<i32>(&trimmed[4..], Some(2)).and_then(|year| {
            build(
                widen_year(year),
                month_number(&trimmed[..2]),
                number(&trimmed[2..4], Some(2)),
            )
        })
    } else if trimmed.len() == 8 && trimmed.is_ascii() {
        number::<i32>(&trimmed[..4], Some(4)).and_then(|year| {
            build(
                year,
                month_number(&trimmed[4..6]),
                number(&trimmed[6..], Some(2)),
            )
        })
    } else {
        None
    };

    date.ok_or_else(|| ValueParseError::new("date", text))
}

/// The `YYYY-MM-DD` form.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parses a time in one of the accepted forms.
///
/// # Errors
///
/// Fails when the text matches no accepted form or is out of range.
pub fn parse_time(text: &str) -> Result<Time, ValueParseError> {
    let invalid = || ValueParseError::new("time", text);
    let trimmed = text.trim();
    let (clock, meridiem) = match trimmed.rsplit_once(' ') {
        Some((clock, suffix)) => (clock.trim(), Some(suffix.trim().to_ascii_uppercase())),
        None => (trimmed, None),
    };

    let parts = clock.split(':').collect::<Vec<_>>();
    let (hour, minute, second) = match parts.as_slice() {
        [hour, minute] => (number::<u8>(hour, None), number::<u8>(minute, Some(2)), Some(0)),
        [hour, minute, second] => (
            number::<u8>(hour, None),
            number::<u8>(minute, Some(2)),
            number::<u8>(second, Some(2)),
        ),
        _ => return Err(invalid()),
    };
    let (mut hour, minute, second) = (
        hour.ok_or_else(invalid)?,
        minute.ok_or_else(invalid)?,
        second.ok_or_else(invalid)?,
    );

    match meridiem.as_deref() {
        None => {}
        Some(suffix @ ("AM" | "PM")) => {
            if !(1..=12).contains(&hour) {
                return Err(invalid());
            }
            hour %= 12;
            if suffix == "PM" {
                hour += 12;
            }
        }
        Some(_) => return Err(invalid()),
    }

    Time::from_hms(hour, minute, second).map_err(|_| invalid())
}

/// The `HH:MM:SS` form.
#[must_use]
pub fn format_time(time: Time) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u8, day: u8) -> Date {
        Date::from_calendar_date(year, Month::try_from(month).unwrap(), day).unwrap()
    }

    #[test]
    fn date_forms() {
        let expected = date(2024, 3, 5);
        for text in [
            "20240305",
            "2024-03-05",
            "05-Mar-2024",
            "Mar-05-24",
            "Mar-05-2024",
            "March 05, 2024",
            "05 March 2024",
            "03/05/24",
            "03/05/2024",
            "030524",
        ] {
            assert_eq!(parse_date(text).unwrap(), expected, "{text}");
        }
        assert_eq!(format_date(expected), "2024-03-05");
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn time_forms() {
        assert_eq!(format_time(parse_time("09:30").unwrap()), "09:30:00");
        assert_eq!(format_time(parse_time("09:30 PM").unwrap()), "21:30:00");
        assert_eq!(format_time(parse_time("12:15:07 am").unwrap()), "00:15:07");
        assert_eq!(format_time(parse_time("23:59:59").unwrap()), "23:59:59");
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("13:00 PM").is_err());
    }
}
