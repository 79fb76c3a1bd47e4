use anyhow::{Context, Result, bail};
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use daylog_core::{EntryView, minutes_to_human_text};

pub(crate) fn parse_date(date_str: Option<&str>) -> Result<NaiveDate> {
    match date_str {
        None => Ok(Local::now().date_naive()),
        Some(s) => match s {
            "today" => Ok(Local::now().date_naive()),
            "yesterday" => Ok(Local::now().date_naive() - chrono::Duration::days(1)),
            "tomorrow" => Ok(Local::now().date_naive() + chrono::Duration::days(1)),
            _ => NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| {
                format!("Invalid date '{s}'. Use YYYY-MM-DD or today/yesterday/tomorrow")
            }),
        },
    }
}

/// Split a `--date` value into raw day/month/year text.
///
/// Keywords resolve against the local calendar. Anything shaped like
/// `YYYY-MM-DD` is passed through unchecked so that impossible dates get
/// reported by entry validation alongside the other fields.
pub(crate) fn date_parts(date_str: &str) -> Result<(String, String, String)> {
    if matches!(date_str, "today" | "yesterday" | "tomorrow") {
        let d = parse_date(Some(date_str))?;
        return Ok((d.day().to_string(), d.month().to_string(), d.year().to_string()));
    }
    let parts: Vec<&str> = date_str.trim().splitn(3, '-').collect();
    match parts.as_slice() {
        [y, m, d] if !y.is_empty() && !m.is_empty() && !d.is_empty() => {
            Ok(((*d).to_string(), (*m).to_string(), (*y).to_string()))
        }
        _ => bail!("Invalid date '{date_str}'. Use YYYY-MM-DD or today/yesterday/tomorrow"),
    }
}

pub(crate) fn duration_text(minutes: Option<i64>) -> String {
    minutes.map_or_else(|| "n/a".to_string(), |m| minutes_to_human_text(m, true))
}

pub(crate) fn mood_text(mood: Option<f64>) -> String {
    mood.map_or_else(|| "n/a".to_string(), |m| format!("{m:.1}"))
}

pub(crate) fn or_na(s: &str) -> &str {
    if s.is_empty() { "n/a" } else { s }
}

pub(crate) fn print_entry_table(entries: &[EntryView], expand: bool) {
    #[derive(Tabled)]
    struct EntryRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Sleep")]
        sleep: String,
        #[tabled(rename = "Exercise")]
        exercise: String,
        #[tabled(rename = "Mood")]
        mood: String,
        #[tabled(rename = "Tags")]
        tags: String,
    }

    #[derive(Tabled)]
    struct ExpandedRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Sleep")]
        sleep: String,
        #[tabled(rename = "Exercise")]
        exercise: String,
        #[tabled(rename = "Mood")]
        mood: String,
        #[tabled(rename = "Tags")]
        tags: String,
        #[tabled(rename = "Activities")]
        activities: String,
        #[tabled(rename = "Notes")]
        notes: String,
    }

    let table = if expand {
        let rows: Vec<ExpandedRow> = entries
            .iter()
            .map(|e| ExpandedRow {
                date: e.date.clone(),
                sleep: duration_text(e.sleep_minutes),
                exercise: duration_text(e.exercise_minutes),
                mood: mood_text(e.mood_scale),
                tags: e.mood_tags.clone(),
                activities: e.activities.clone(),
                notes: or_na(&e.notes).to_string(),
            })
            .collect();
        Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..4)).with(Alignment::right()))
            .to_string()
    } else {
        let rows: Vec<EntryRow> = entries
            .iter()
            .map(|e| EntryRow {
                date: e.date.clone(),
                sleep: duration_text(e.sleep_minutes),
                exercise: duration_text(e.exercise_minutes),
                mood: mood_text(e.mood_scale),
                tags: truncate(&e.mood_tags, 30),
            })
            .collect();
        Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..4)).with(Alignment::right()))
            .to_string()
    };
    println!("{table}");
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}
