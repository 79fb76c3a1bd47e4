use chrono::NaiveDate;

use crate::models::{Entry, EntryField, FieldError, FieldErrorKind, RawEntry, ValidationErrors};
use crate::parse::{hours_minutes_to_total_minutes, month_lookup, parse_decimal, parse_integer};

pub const MAX_MINUTES_PER_DAY: i64 = 1440;
pub const MOOD_MIN: f64 = 0.0;
pub const MOOD_MAX: f64 = 10.0;

/// Turn one raw form submission into a canonical [`Entry`].
///
/// Every field is checked before returning, so the error map holds every
/// problem in the submission, not just the first one.
pub fn create_daily_entry(raw: &RawEntry) -> Result<Entry, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let date = validate_date(&raw.day, &raw.month, &raw.year, &mut errors);

    let sleep_minutes = validate_duration(
        &raw.sleep_hours,
        &raw.sleep_minutes,
        "Sleep time",
        EntryField::SleepTime,
        &mut errors,
    );
    let exercise_minutes = validate_duration(
        &raw.exercise_hours,
        &raw.exercise_minutes,
        "Exercise time",
        EntryField::ExerciseTime,
        &mut errors,
    );

    let mood_scale = record(
        parse_decimal(&raw.mood_scale, "Mood scale").and_then(|v| {
            if (MOOD_MIN..=MOOD_MAX).contains(&v) {
                Ok(round_to_tenth(v))
            } else {
                Err(FieldError::range("Mood scale must be between 0.0 and 10.0."))
            }
        }),
        EntryField::MoodScale,
        &mut errors,
    );

    let mood_tags = required_text(&raw.mood_tags, "Mood tags", EntryField::MoodTags, &mut errors);
    let activities = required_text(
        &raw.activities,
        "Activities",
        EntryField::Activities,
        &mut errors,
    );

    let notes = raw.notes.trim().to_string();

    match (date, sleep_minutes, exercise_minutes, mood_scale, mood_tags, activities) {
        (Some(date), Some(sleep), Some(exercise), Some(mood), Some(tags), Some(activities))
            if errors.is_empty() =>
        {
            Ok(Entry {
                date,
                sleep_minutes: sleep,
                exercise_minutes: exercise,
                mood_scale: mood,
                mood_tags: tags,
                activities,
                notes,
            })
        }
        _ => Err(errors),
    }
}

/// Day, month and year are checked independently; the combined calendar
/// check only runs once all three parsed.
fn validate_date(
    day_text: &str,
    month_text: &str,
    year_text: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let day = record(parse_integer(day_text, "Day"), EntryField::DateDay, errors);
    let year = record(parse_integer(year_text, "Year"), EntryField::DateYear, errors);
    let month = month_lookup(month_text);
    if month.is_none() {
        errors.insert(
            EntryField::DateMonth,
            FieldError::format("Month must be a real month (example: January)."),
        );
    }

    let (day, month, year) = (day?, month?, year?);

    match calendar_date(year, month, day) {
        Some(date) => Some(date.format("%Y-%m-%d").to_string()),
        None => {
            errors.insert(
                EntryField::Date,
                FieldError::range("That date does not exist."),
            );
            None
        }
    }
}

/// Four-digit years only, matching the `YYYY-MM-DD` storage format.
fn calendar_date(year: i64, month: u32, day: i64) -> Option<NaiveDate> {
    if !(1..=9999).contains(&year) {
        return None;
    }
    let year = i32::try_from(year).ok()?;
    let day = u32::try_from(day).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn record<T>(
    result: Result<T, FieldError>,
    field: EntryField,
    errors: &mut ValidationErrors,
) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            errors.insert(field, e);
            None
        }
    }
}

fn validate_duration(
    hours_text: &str,
    minutes_text: &str,
    label: &str,
    field: EntryField,
    errors: &mut ValidationErrors,
) -> Option<i64> {
    let Some(total) = hours_minutes_to_total_minutes(hours_text, minutes_text, true) else {
        let message = format!("{label} must include hours or minutes (numbers only).");
        let error = if hours_text.trim().is_empty() && minutes_text.trim().is_empty() {
            FieldError {
                kind: FieldErrorKind::Required,
                message,
            }
        } else {
            FieldError::format(message)
        };
        errors.insert(field, error);
        return None;
    };

    if !(0..=MAX_MINUTES_PER_DAY).contains(&total) {
        errors.insert(
            field,
            FieldError::range(format!("{label} must be between 0 and 24 hours.")),
        );
        return None;
    }
    Some(total)
}

fn required_text(
    text: &str,
    label: &str,
    field: EntryField,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        errors.insert(field, FieldError::required(label));
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn round_to_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_raw() -> RawEntry {
        RawEntry {
            day: "15".to_string(),
            month: "June".to_string(),
            year: "2024".to_string(),
            sleep_hours: "7".to_string(),
            sleep_minutes: "30".to_string(),
            exercise_hours: "0".to_string(),
            exercise_minutes: "45".to_string(),
            mood_scale: "8.0".to_string(),
            mood_tags: "happy".to_string(),
            activities: "jogging, reading".to_string(),
            notes: String::new(),
        }
    }

    fn error_keys(errors: &ValidationErrors) -> Vec<&'static str> {
        errors.fields().map(EntryField::key).collect()
    }

    #[test]
    fn test_valid_entry() {
        let entry = create_daily_entry(&valid_raw()).unwrap();
        assert_eq!(
            entry,
            Entry {
                date: "2024-06-15".to_string(),
                sleep_minutes: 450,
                exercise_minutes: 45,
                mood_scale: 8.0,
                mood_tags: "happy".to_string(),
                activities: "jogging, reading".to_string(),
                notes: String::new(),
            }
        );
    }

    #[test]
    fn test_trims_text_fields() {
        let raw = RawEntry {
            mood_tags: "  calm, tired ".to_string(),
            activities: "\treading\n".to_string(),
            notes: "  long day  ".to_string(),
            ..valid_raw()
        };
        let entry = create_daily_entry(&raw).unwrap();
        assert_eq!(entry.mood_tags, "calm, tired");
        assert_eq!(entry.activities, "reading");
        assert_eq!(entry.notes, "long day");
    }

    #[test]
    fn test_zero_pads_date() {
        let raw = RawEntry {
            day: "5".to_string(),
            month: "3".to_string(),
            year: "2024".to_string(),
            ..valid_raw()
        };
        assert_eq!(create_daily_entry(&raw).unwrap().date, "2024-03-05");
    }

    #[test]
    fn test_mood_rounded_to_one_decimal() {
        let raw = RawEntry {
            mood_scale: "7.46".to_string(),
            ..valid_raw()
        };
        let entry = create_daily_entry(&raw).unwrap();
        assert!((entry.mood_scale - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_collects_all_errors() {
        let raw = RawEntry {
            day: "abc".to_string(),
            mood_scale: "11".to_string(),
            activities: "   ".to_string(),
            ..valid_raw()
        };
        let errors = create_daily_entry(&raw).unwrap_err();
        assert_eq!(error_keys(&errors), vec!["date_day", "mood_scale", "activities"]);
        assert_eq!(
            errors.get(EntryField::DateDay).unwrap().kind,
            FieldErrorKind::Format
        );
        assert_eq!(
            errors.get(EntryField::MoodScale).unwrap().message,
            "Mood scale must be between 0.0 and 10.0."
        );
        assert_eq!(
            errors.get(EntryField::Activities).unwrap().message,
            "Activities is required."
        );
    }

    #[test]
    fn test_nonexistent_date() {
        let raw = RawEntry {
            day: "31".to_string(),
            month: "February".to_string(),
            year: "2023".to_string(),
            ..valid_raw()
        };
        let errors = create_daily_entry(&raw).unwrap_err();
        assert_eq!(error_keys(&errors), vec!["date"]);
        let err = errors.get(EntryField::Date).unwrap();
        assert_eq!(err.message, "That date does not exist.");
        assert_eq!(err.kind, FieldErrorKind::Range);
    }

    #[test]
    fn test_leap_day() {
        let leap = RawEntry {
            day: "29".to_string(),
            month: "feb".to_string(),
            year: "2024".to_string(),
            ..valid_raw()
        };
        assert_eq!(create_daily_entry(&leap).unwrap().date, "2024-02-29");

        let not_leap = RawEntry {
            year: "2023".to_string(),
            ..leap
        };
        assert!(create_daily_entry(&not_leap).unwrap_err().contains(EntryField::Date));
    }

    #[test]
    fn test_out_of_range_date_parts() {
        for (day, year) in [("0", "2024"), ("-1", "2024"), ("10", "0"), ("10", "10000")] {
            let raw = RawEntry {
                day: day.to_string(),
                year: year.to_string(),
                ..valid_raw()
            };
            let errors = create_daily_entry(&raw).unwrap_err();
            assert_eq!(error_keys(&errors), vec!["date"], "day={day} year={year}");
        }
    }

    #[test]
    fn test_date_check_skipped_when_component_fails() {
        let raw = RawEntry {
            day: "31".to_string(),
            month: "Febtember".to_string(),
            year: String::new(),
            ..valid_raw()
        };
        let errors = create_daily_entry(&raw).unwrap_err();
        assert_eq!(error_keys(&errors), vec!["date_month", "date_year"]);
        assert_eq!(
            errors.get(EntryField::DateMonth).unwrap().message,
            "Month must be a real month (example: January)."
        );
        assert_eq!(
            errors.get(EntryField::DateYear).unwrap().message,
            "Year is required."
        );
    }

    #[test]
    fn test_sleep_requires_hours_or_minutes() {
        let raw = RawEntry {
            sleep_hours: String::new(),
            sleep_minutes: " ".to_string(),
            ..valid_raw()
        };
        let errors = create_daily_entry(&raw).unwrap_err();
        let err = errors.get(EntryField::SleepTime).unwrap();
        assert_eq!(err.kind, FieldErrorKind::Required);
        assert_eq!(
            err.message,
            "Sleep time must include hours or minutes (numbers only)."
        );
    }

    #[test]
    fn test_sleep_only_hours_is_fine() {
        let raw = RawEntry {
            sleep_hours: "8".to_string(),
            sleep_minutes: String::new(),
            ..valid_raw()
        };
        assert_eq!(create_daily_entry(&raw).unwrap().sleep_minutes, 480);
    }

    #[test]
    fn test_exercise_not_numeric() {
        let raw = RawEntry {
            exercise_hours: "one".to_string(),
            ..valid_raw()
        };
        let errors = create_daily_entry(&raw).unwrap_err();
        assert_eq!(error_keys(&errors), vec!["exercise_time"]);
        assert_eq!(
            errors.get(EntryField::ExerciseTime).unwrap().kind,
            FieldErrorKind::Format
        );
    }

    #[test]
    fn test_duration_range() {
        let full_day = RawEntry {
            sleep_hours: "24".to_string(),
            sleep_minutes: "0".to_string(),
            ..valid_raw()
        };
        assert_eq!(create_daily_entry(&full_day).unwrap().sleep_minutes, 1440);

        let too_long = RawEntry {
            sleep_hours: "24".to_string(),
            sleep_minutes: "1".to_string(),
            ..valid_raw()
        };
        let errors = create_daily_entry(&too_long).unwrap_err();
        let err = errors.get(EntryField::SleepTime).unwrap();
        assert_eq!(err.kind, FieldErrorKind::Range);
        assert_eq!(err.message, "Sleep time must be between 0 and 24 hours.");

        let negative = RawEntry {
            exercise_hours: "0".to_string(),
            exercise_minutes: "-5".to_string(),
            ..valid_raw()
        };
        let errors = create_daily_entry(&negative).unwrap_err();
        assert_eq!(
            errors.get(EntryField::ExerciseTime).unwrap().message,
            "Exercise time must be between 0 and 24 hours."
        );
    }

    #[test]
    fn test_mood_bounds_inclusive() {
        for mood in ["0", "0.0", "10", "10.0"] {
            let raw = RawEntry {
                mood_scale: mood.to_string(),
                ..valid_raw()
            };
            assert!(create_daily_entry(&raw).is_ok(), "{mood}");
        }
        for mood in ["-0.1", "10.1", "abc", ""] {
            let raw = RawEntry {
                mood_scale: mood.to_string(),
                ..valid_raw()
            };
            let errors = create_daily_entry(&raw).unwrap_err();
            assert_eq!(error_keys(&errors), vec!["mood_scale"], "{mood}");
        }
    }

    #[test]
    fn test_blank_submission_reports_every_required_field() {
        let errors = create_daily_entry(&RawEntry::default()).unwrap_err();
        assert_eq!(
            error_keys(&errors),
            vec![
                "date_day",
                "date_month",
                "date_year",
                "sleep_time",
                "exercise_time",
                "mood_scale",
                "mood_tags",
                "activities"
            ]
        );
    }
}
