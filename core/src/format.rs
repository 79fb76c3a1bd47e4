//! Rendering stored values back into text for summaries and listings.

use chrono::NaiveDate;

/// `125` → `"02:05"`.
#[must_use]
pub fn minutes_to_clock_text(total_minutes: i64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    format!("{hours:02}:{minutes:02}")
}

/// `125` → `"2 hours 5 minutes"`, or `"2h 5m"` when `abbreviated`.
///
/// A zero component is dropped unless both are zero.
#[must_use]
pub fn minutes_to_human_text(total_minutes: i64, abbreviated: bool) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours == 0 && minutes == 0 {
        let zero = if abbreviated { "0min" } else { "0 minutes" };
        return zero.to_string();
    }

    let mut parts = Vec::with_capacity(2);
    if hours != 0 {
        parts.push(if abbreviated {
            format!("{hours}h")
        } else {
            format!("{hours} {}", plural(hours, "hour"))
        });
    }
    if minutes != 0 {
        parts.push(if abbreviated {
            format!("{minutes}m")
        } else {
            format!("{minutes} {}", plural(minutes, "minute"))
        });
    }
    parts.join(" ")
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 { unit.to_string() } else { format!("{unit}s") }
}

/// `"2024-06-05"` → `"June 5, 2024"`. Anything that isn't a valid ISO date
/// comes back untouched.
#[must_use]
pub fn date_to_human_text(iso_date: &str) -> String {
    match NaiveDate::parse_from_str(iso_date, "%Y-%m-%d") {
        Ok(d) => d.format("%B %-d, %Y").to_string(),
        Err(_) => iso_date.to_string(),
    }
}
