//! CSS timing functions.

use crate::value::format_number;

/// Speeds up towards the middle and slows down at the end.
pub const EASE: &str = "ease";
/// Starts slowly and speeds up until complete.
pub const EASE_IN: &str = "ease-in";
/// Starts quickly and slows down.
pub const EASE_OUT: &str = "ease-out";
/// Starts slowly, speeds up, then slows down again.
pub const EASE_IN_OUT: &str = "ease-in-out";
/// Constant speed.
pub const LINEAR: &str = "linear";

/// `steps(n)`: `n` stops shown for equal lengths of time.
#[must_use]
pub fn steps_timing(count: u32) -> String {
    format!("steps({count})")
}

/// `cubic-bezier(x1, y1, x2, y2)` with the x values clamped to `[0, 1]`.
#[must_use]
pub fn cubic_bezier_timing(x1: f64, y1: f64, x2: f64, y2: f64) -> String {
    format!(
        "cubic-bezier({}, {}, {}, {})",
        format_number(x1.clamp(0.0, 1.0)),
        format_number(y1),
        format_number(x2.clamp(0.0, 1.0)),
        format_number(y2)
    )
}

/// Returns `true` for the names, `steps(<int>)` and `cubic-bezier` with four numbers.
///
/// The empty text stands for the CSS default and is valid.
#[must_use]
pub fn validate_timing_function(timing: &str) -> bool {
    timing_css(timing).is_some()
}

/// The CSS text of a valid timing function, `cubic-bezier` x values clamped to `[0, 1]`.
#[must_use]
pub fn timing_css(timing: &str) -> Option<String> {
    let timing = timing.trim();
    if matches!(timing, "" | EASE | EASE_IN | EASE_OUT | EASE_IN_OUT | LINEAR) {
        return Some(timing.to_string());
    }
    let (name, args) = timing.strip_suffix(')')?.split_once('(')?;
    match name.trim() {
        "steps" => {
            let count = args.trim().parse::<i64>().ok()?;
            Some(format!("steps({count})"))
        }
        "cubic-bezier" => {
            let params = args
                .split(',')
                .map(|param| param.trim().parse::<f64>().ok())
                .collect::<Option<Vec<_>>>()?;
            let [x1, y1, x2, y2] = params[..] else {
                return None;
            };
            Some(cubic_bezier_timing(x1, y1, x2, y2))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar() {
        assert!(validate_timing_function("ease-in-out"));
        assert!(validate_timing_function("steps(4)"));
        assert!(validate_timing_function(" cubic-bezier(0.1, 0.7, 1.0, 0.1) "));
        assert!(!validate_timing_function("steps(x)"));
        assert!(!validate_timing_function("cubic-bezier(0.1, 0.7, 1.0)"));
        assert!(!validate_timing_function("bounce"));
    }

    #[test]
    fn bezier_clamps_x() {
        assert_eq!(cubic_bezier_timing(-1.0, 2.0, 1.5, -0.5), "cubic-bezier(0, 2, 1, -0.5)");
        assert_eq!(steps_timing(3), "steps(3)");
        assert_eq!(
            timing_css("cubic-bezier(-0.5, 1.2, 1.4, 0)").as_deref(),
            Some("cubic-bezier(0, 1.2, 1, 0)")
        );
        assert_eq!(timing_css(" linear ").as_deref(), Some(LINEAR));
        assert_eq!(timing_css("steps( 2 )").as_deref(), Some("steps(2)"));
        assert_eq!(timing_css("bounce"), None);
    }
}
