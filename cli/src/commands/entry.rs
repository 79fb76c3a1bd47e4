use anyhow::{Result, bail};
use std::process;

use daylog_core::{DaylogService, date_to_human_text, minutes_to_clock_text, minutes_to_human_text};

use super::helpers::{json_error, mood_text, or_na, parse_date};

pub(crate) fn cmd_show(svc: &DaylogService, date: Option<&str>, json: bool) -> Result<()> {
    let date = parse_date(date)?.format("%Y-%m-%d").to_string();

    let Some(e) = svc.get_entry(&date)? else {
        if json {
            println!("{}", json_error(&format!("No entry for {date}")));
        } else {
            eprintln!("No entry for {date}");
        }
        process::exit(2);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&e)?);
        return Ok(());
    }

    let duration = |m: Option<i64>| match m {
        Some(m) => format!(
            "{} ({})",
            minutes_to_human_text(m, false),
            minutes_to_clock_text(m)
        ),
        None => "n/a".to_string(),
    };

    println!("=== {} ===\n", date_to_human_text(&e.date));
    println!("  Sleep:       {}", duration(e.sleep_minutes));
    println!("  Exercise:    {}", duration(e.exercise_minutes));
    println!("  Mood:        {}", mood_text(e.mood_scale));
    println!("  Mood tags:   {}", or_na(&e.mood_tags));
    println!("  Activities:  {}", or_na(&e.activities));
    println!("  Notes:       {}", or_na(&e.notes));

    Ok(())
}

pub(crate) fn cmd_delete(svc: &DaylogService, date: &str, json: bool) -> Result<()> {
    let date = parse_date(Some(date))?.format("%Y-%m-%d").to_string();

    if !svc.delete_entry(&date)? {
        bail!("No entry for {date}");
    }

    if json {
        println!("{}", serde_json::json!({ "deleted": date }));
    } else {
        println!("Deleted entry for {date}");
    }

    Ok(())
}

pub(crate) fn cmd_resort(svc: &DaylogService, json: bool) -> Result<()> {
    svc.resort()?;
    let count = svc.read_entries()?.len();
    let path = svc.store_path().display().to_string();

    if json {
        println!("{}", serde_json::json!({ "resorted": count, "store": path }));
    } else {
        println!("Sorted {count} entries by date in {path}");
    }

    Ok(())
}
