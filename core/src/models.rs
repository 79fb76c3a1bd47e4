use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::store::Row;

/// One canonical daily record, keyed by `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// `YYYY-MM-DD`
    pub date: String,
    pub sleep_minutes: i64,
    pub exercise_minutes: i64,
    pub mood_scale: f64,
    pub mood_tags: String,
    pub activities: String,
    pub notes: String,
}

/// Raw form text for one submission, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct RawEntry {
    pub day: String,
    pub month: String,
    pub year: String,
    pub sleep_hours: String,
    pub sleep_minutes: String,
    pub exercise_hours: String,
    pub exercise_minutes: String,
    pub mood_scale: String,
    pub mood_tags: String,
    pub activities: String,
    pub notes: String,
}

/// Stable identifiers for the fields a validation error can attach to.
///
/// Variant order is form order, so a `BTreeMap` keyed by this enum lists
/// errors top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryField {
    DateDay,
    DateMonth,
    DateYear,
    Date,
    SleepTime,
    ExerciseTime,
    MoodScale,
    MoodTags,
    Activities,
}

impl EntryField {
    pub const ALL: [EntryField; 9] = [
        Self::DateDay,
        Self::DateMonth,
        Self::DateYear,
        Self::Date,
        Self::SleepTime,
        Self::ExerciseTime,
        Self::MoodScale,
        Self::MoodTags,
        Self::Activities,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::DateDay => "date_day",
            Self::DateMonth => "date_month",
            Self::DateYear => "date_year",
            Self::Date => "date",
            Self::SleepTime => "sleep_time",
            Self::ExerciseTime => "exercise_time",
            Self::MoodScale => "mood_scale",
            Self::MoodTags => "mood_tags",
            Self::Activities => "activities",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// True for the four keys that belong to the date group on a form.
    #[must_use]
    pub fn is_date_part(self) -> bool {
        matches!(
            self,
            Self::DateDay | Self::DateMonth | Self::DateYear | Self::Date
        )
    }
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// Blank where a value is needed.
    Required,
    /// Text that does not parse as the expected type.
    Format,
    /// Parsed fine but outside the allowed domain.
    Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn required(label: &str) -> Self {
        Self {
            kind: FieldErrorKind::Required,
            message: format!("{label} is required."),
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self {
            kind: FieldErrorKind::Format,
            message: message.into(),
        }
    }

    pub fn range(message: impl Into<String>) -> Self {
        Self {
            kind: FieldErrorKind::Range,
            message: message.into(),
        }
    }
}

/// Every field error found in one submission. Never empty when returned as `Err`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<EntryField, FieldError>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: EntryField, error: FieldError) {
        self.0.insert(field, error);
    }

    #[must_use]
    pub fn get(&self, field: EntryField) -> Option<&FieldError> {
        self.0.get(&field)
    }

    #[must_use]
    pub fn contains(&self, field: EntryField) -> bool {
        self.0.contains_key(&field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryField, &FieldError)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    pub fn fields(&self) -> impl Iterator<Item = EntryField> + '_ {
        self.0.keys().copied()
    }

    /// Date-group messages joined into one line, the way a form shows them
    /// under a single date control.
    #[must_use]
    pub fn date_summary(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .iter()
            .filter(|(field, _)| field.is_date_part())
            .map(|(_, e)| e.message.as_str())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, err) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {err}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

impl UpsertOutcome {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inserted => "inserted",
            Self::Updated => "updated",
        }
    }
}

impl fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display-side reading of a stored row. Cells that don't parse become `None`
/// rather than failing the row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryView {
    pub date: String,
    pub sleep_minutes: Option<i64>,
    pub exercise_minutes: Option<i64>,
    pub mood_scale: Option<f64>,
    pub mood_tags: String,
    pub activities: String,
    pub notes: String,
}

impl EntryView {
    #[must_use]
    pub fn from_row(row: &Row) -> Self {
        let text = |key: &str| row.get(key).map(|v| v.trim().to_string()).unwrap_or_default();
        Self {
            date: text("date"),
            sleep_minutes: parse_minutes_cell(row.get("sleep_minutes")),
            exercise_minutes: parse_minutes_cell(row.get("exercise_minutes")),
            mood_scale: row
                .get("mood_scale")
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite()),
            mood_tags: text("mood_tags"),
            activities: text("activities"),
            notes: text("notes"),
        }
    }
}

/// Minute cells are integers, but hand-edited files sometimes carry "450.0".
fn parse_minutes_cell(cell: Option<&String>) -> Option<i64> {
    let cell = cell?.trim();
    if let Ok(v) = cell.parse::<i64>() {
        return Some(v);
    }
    cell.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_entry_field_keys_round_trip() {
        for field in EntryField::ALL {
            assert_eq!(EntryField::from_key(field.key()), Some(field));
        }
        assert_eq!(EntryField::from_key("nope"), None);
    }

    #[test]
    fn test_entry_field_serializes_as_key() {
        let json = serde_json::to_string(&EntryField::ExerciseTime).unwrap();
        assert_eq!(json, "\"exercise_time\"");
    }

    #[test]
    fn test_validation_errors_ordered_by_form_position() {
        let mut errors = ValidationErrors::new();
        errors.insert(EntryField::Activities, FieldError::required("Activities"));
        errors.insert(EntryField::DateDay, FieldError::required("Day"));
        errors.insert(EntryField::MoodScale, FieldError::range("too big"));

        let fields: Vec<EntryField> = errors.fields().collect();
        assert_eq!(
            fields,
            vec![
                EntryField::DateDay,
                EntryField::MoodScale,
                EntryField::Activities
            ]
        );
        assert_eq!(
            errors.to_string(),
            "date_day: Day is required.; mood_scale: too big; activities: Activities is required."
        );
    }

    #[test]
    fn test_validation_errors_json_shape() {
        let mut errors = ValidationErrors::new();
        errors.insert(EntryField::MoodTags, FieldError::required("Mood tags"));
        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(value["mood_tags"]["kind"], "required");
        assert_eq!(value["mood_tags"]["message"], "Mood tags is required.");
    }

    #[test]
    fn test_date_summary_joins_date_group_only() {
        let mut errors = ValidationErrors::new();
        errors.insert(EntryField::DateYear, FieldError::required("Year"));
        errors.insert(EntryField::DateDay, FieldError::format("Day must be a whole number."));
        errors.insert(EntryField::SleepTime, FieldError::format("bad"));
        assert_eq!(
            errors.date_summary().as_deref(),
            Some("Day must be a whole number. Year is required.")
        );

        let none = ValidationErrors::new();
        assert!(none.date_summary().is_none());
    }

    #[test]
    fn test_entry_view_from_row() {
        let view = EntryView::from_row(&row(&[
            ("date", "2024-06-15"),
            ("sleep_minutes", "450"),
            ("exercise_minutes", "45.0"),
            ("mood_scale", "8.0"),
            ("mood_tags", "happy"),
            ("activities", "jogging, reading"),
        ]));
        assert_eq!(view.date, "2024-06-15");
        assert_eq!(view.sleep_minutes, Some(450));
        assert_eq!(view.exercise_minutes, Some(45));
        assert_eq!(view.mood_scale, Some(8.0));
        assert_eq!(view.activities, "jogging, reading");
        assert_eq!(view.notes, "");
    }

    #[test]
    fn test_entry_view_tolerates_garbage() {
        let view = EntryView::from_row(&row(&[
            ("date", "someday"),
            ("sleep_minutes", "lots"),
            ("mood_scale", "nan"),
        ]));
        assert_eq!(view.date, "someday");
        assert_eq!(view.sleep_minutes, None);
        assert_eq!(view.exercise_minutes, None);
        assert_eq!(view.mood_scale, None);
    }

    #[test]
    fn test_upsert_outcome_text() {
        assert_eq!(UpsertOutcome::Inserted.to_string(), "inserted");
        assert_eq!(UpsertOutcome::Updated.as_str(), "updated");
    }
}
