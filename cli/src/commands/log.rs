use anyhow::{Result, bail};
use chrono::{Datelike, Local};
use clap::Args;
use std::process;

use daylog_core::{DaylogService, LogError, RawEntry, minutes_to_human_text};

use super::helpers::date_parts;

#[derive(Args, Debug, Default)]
pub(crate) struct LogArgs {
    /// Date shortcut: YYYY-MM-DD or today/yesterday/tomorrow
    #[arg(long, conflicts_with_all = ["day", "month", "year"])]
    pub date: Option<String>,
    /// Day of month (default: today)
    #[arg(long)]
    pub day: Option<String>,
    /// Month name, abbreviation, or number (default: this month)
    #[arg(long)]
    pub month: Option<String>,
    /// Four-digit year (default: this year)
    #[arg(long)]
    pub year: Option<String>,
    /// Hours slept
    #[arg(long)]
    pub sleep_hours: Option<String>,
    /// Minutes slept, on top of --sleep-hours
    #[arg(long)]
    pub sleep_minutes: Option<String>,
    /// Hours exercised
    #[arg(long)]
    pub exercise_hours: Option<String>,
    /// Minutes exercised, on top of --exercise-hours
    #[arg(long)]
    pub exercise_minutes: Option<String>,
    /// Mood from 0.0 to 10.0
    #[arg(long)]
    pub mood: Option<String>,
    /// Comma-separated mood tags (e.g. "calm, tired")
    #[arg(long)]
    pub tags: Option<String>,
    /// Comma-separated activities (e.g. "jogging, reading")
    #[arg(long)]
    pub activities: Option<String>,
    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl LogArgs {
    /// Flags become raw form text; omitted date parts fall back to today.
    pub(crate) fn into_raw(self) -> Result<RawEntry> {
        let today = Local::now().date_naive();
        let (day, month, year) = match self.date.as_deref() {
            Some(d) => date_parts(d)?,
            None => (
                self.day.unwrap_or_else(|| today.day().to_string()),
                self.month.unwrap_or_else(|| today.month().to_string()),
                self.year.unwrap_or_else(|| today.year().to_string()),
            ),
        };
        Ok(RawEntry {
            day,
            month,
            year,
            sleep_hours: self.sleep_hours.unwrap_or_default(),
            sleep_minutes: self.sleep_minutes.unwrap_or_default(),
            exercise_hours: self.exercise_hours.unwrap_or_default(),
            exercise_minutes: self.exercise_minutes.unwrap_or_default(),
            mood_scale: self.mood.unwrap_or_default(),
            mood_tags: self.tags.unwrap_or_default(),
            activities: self.activities.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
        })
    }
}

pub(crate) fn cmd_log(svc: &DaylogService, args: LogArgs, json: bool) -> Result<()> {
    let raw = args.into_raw()?;

    match svc.log_entry(&raw) {
        Ok(result) => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "outcome": result.outcome,
                        "entry": result.entry,
                    }))?
                );
            } else {
                let e = &result.entry;
                println!("Saved: entry {} for {}", result.outcome, e.date);
                println!(
                    "  Sleep {} | Exercise {} | Mood {:.1}",
                    minutes_to_human_text(e.sleep_minutes, true),
                    minutes_to_human_text(e.exercise_minutes, true),
                    e.mood_scale
                );
            }
            Ok(())
        }
        Err(LogError::Invalid(errors)) => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({ "errors": errors }))?
                );
                process::exit(1);
            }
            eprintln!("Entry not saved:");
            for (field, err) in errors.iter() {
                eprintln!("  {field}: {err}");
            }
            bail!("{} field(s) need fixing", errors.len())
        }
        Err(LogError::Storage(e)) => Err(e),
    }
}
