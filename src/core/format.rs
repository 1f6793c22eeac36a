//! Display formatting for calculator values.
//!
//! Every number that reaches the display goes through [`format_number`], so
//! the rendered text never depends on locale or platform stringification.

/// Sentinel shown in place of a number when a computation is not finite.
pub const ERROR_SENTINEL: &str = "Error";

const PLAIN_LOWER_BOUND: f64 = 1e-7;
const PLAIN_UPPER_BOUND: f64 = 1e21;

/// Format a number for the calculator display.
///
/// - Non-finite values render as `"Error"`.
/// - Negative zero renders as `"0"`.
/// - Magnitudes in `[1e-7, 1e21)` use the shortest decimal text that
///   parses back to the same value, with no trailing `.0` on integers.
/// - Anything else uses scientific notation (`1e21`, `1.5e-8`).
///
/// # Example
///
/// ```rust
/// use abacus::core::format_number;
///
/// assert_eq!(format_number(8.0), "8");
/// assert_eq!(format_number(2.5), "2.5");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(f64::NAN), "Error");
/// assert_eq!(format_number(1e21), "1e21");
/// ```
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return ERROR_SENTINEL.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (PLAIN_LOWER_BOUND..PLAIN_UPPER_BOUND).contains(&magnitude) {
        format!("{value}")
    } else {
        format!("{value:e}")
    }
}

/// Read the display back as a number.
///
/// The `"Error"` sentinel, or anything else that does not parse, reads as
/// NaN so that it keeps propagating through later arithmetic.
pub fn parse_display(display: &str) -> f64 {
    display.parse::<f64>().unwrap_or(f64::NAN)
}

/// Check whether a display string is a finite number or the error sentinel.
pub fn is_valid_display(display: &str) -> bool {
    display == ERROR_SENTINEL || display.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Check whether a display string is a run of typed digits, optionally with
/// one decimal point (`"12"`, `"0."`, `"3.25"`).
///
/// Typed entry has no length limit, so the value may exceed `f64` range.
pub(crate) fn is_typed_number(display: &str) -> bool {
    let (whole, fraction) = display.split_once('.').unwrap_or((display, ""));
    !whole.is_empty()
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}
