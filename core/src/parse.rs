//! Raw text → typed values, one field at a time.
//!
//! Nothing here panics on user input; every failure comes back as a
//! [`FieldError`] or `None` so callers can keep going with sibling fields.

use crate::models::FieldError;

/// Parse a whole number, e.g. a day or year typed into a form.
pub fn parse_integer(text: &str, field_label: &str) -> Result<i64, FieldError> {
    let cleaned = text.trim();
    if cleaned.is_empty() {
        return Err(FieldError::required(field_label));
    }
    cleaned
        .parse::<i64>()
        .map_err(|_| FieldError::format(format!("{field_label} must be a whole number.")))
}

/// Parse a decimal number. `NaN` and infinities are rejected as malformed.
pub fn parse_decimal(text: &str, field_label: &str) -> Result<f64, FieldError> {
    let cleaned = text.trim();
    if cleaned.is_empty() {
        return Err(FieldError::required(field_label));
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FieldError::format(format!(
            "{field_label} must be a number (example: 7.5)."
        ))),
    }
}

/// Resolve a month name, abbreviation, or number to 1..=12.
///
/// Accepts "january"/"jan", "sept" as well as "sep", and "1".."12" with or
/// without a leading zero. Case and surrounding whitespace are ignored.
#[must_use]
pub fn month_lookup(text: &str) -> Option<u32> {
    let lower = text.trim().to_lowercase();
    let month = match lower.as_str() {
        "january" | "jan" | "1" | "01" => 1,
        "february" | "feb" | "2" | "02" => 2,
        "march" | "mar" | "3" | "03" => 3,
        "april" | "apr" | "4" | "04" => 4,
        "may" | "5" | "05" => 5,
        "june" | "jun" | "6" | "06" => 6,
        "july" | "jul" | "7" | "07" => 7,
        "august" | "aug" | "8" | "08" => 8,
        "september" | "sep" | "sept" | "9" | "09" => 9,
        "october" | "oct" | "10" => 10,
        "november" | "nov" | "11" => 11,
        "december" | "dec" | "12" => 12,
        _ => return None,
    };
    Some(month)
}

/// Combine an hours box and a minutes box into total minutes.
///
/// A blank box counts as 0, except that with `require_any` at least one of
/// the two must be filled in. Range checks are left to the caller.
#[must_use]
pub fn hours_minutes_to_total_minutes(
    hours_text: &str,
    minutes_text: &str,
    require_any: bool,
) -> Option<i64> {
    let hours = hours_text.trim();
    let minutes = minutes_text.trim();

    if require_any && hours.is_empty() && minutes.is_empty() {
        return None;
    }

    let number = |s: &str| -> Option<i64> {
        if s.is_empty() { Some(0) } else { s.parse().ok() }
    };

    number(hours)?.checked_mul(60)?.checked_add(number(minutes)?)
}
