use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::models::{Entry, UpsertOutcome};

/// Column order on disk. Never reordered.
pub const COLUMNS: [&str; 7] = [
    "date",
    "sleep_minutes",
    "exercise_minutes",
    "mood_scale",
    "mood_tags",
    "activities",
    "notes",
];

/// One stored row: column name → cell text, exactly as on disk.
pub type Row = BTreeMap<String, String>;

/// Flat CSV table of entries, one row per date, kept in date order.
///
/// The store does no business validation; anything handed to [`EntryStore::upsert`]
/// is assumed to have come through `create_daily_entry`.
#[derive(Debug, Clone)]
pub struct EntryStore {
    path: PathBuf,
}

impl EntryStore {
    /// Point at a store location without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Point at a store location and create it if missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(path);
        store.ensure_exists()?;
        Ok(store)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and a header-only file if absent.
    /// Existing files are left alone.
    pub fn ensure_exists(&self) -> Result<()> {
        if self.path.is_file() {
            return Ok(());
        }
        debug!(path = %self.path.display(), "creating entry store");
        self.replace_contents(&[])
    }

    /// All rows in file order. Cells are not interpreted.
    pub fn read_all(&self) -> Result<Vec<Row>> {
        self.ensure_exists()?;

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open store: {}", self.path.display()))?;
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(file);

        let headers = rdr
            .headers()
            .with_context(|| format!("Failed to read header of {}", self.path.display()))?
            .clone();

        let mut rows = Vec::new();
        for (line_num, result) in rdr.records().enumerate() {
            let record = result.with_context(|| {
                format!(
                    "Failed to parse row {} of {}",
                    line_num + 2,
                    self.path.display()
                )
            })?;
            let row: Row = headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect();
            rows.push(row);
        }

        debug!(path = %self.path.display(), rows = rows.len(), "read entry store");
        Ok(rows)
    }

    /// Replace the whole file with `rows`, in the order given.
    ///
    /// Missing cells are written empty and unknown columns are dropped.
    pub fn write_all(&self, rows: &[Row]) -> Result<()> {
        self.replace_contents(rows)?;
        debug!(path = %self.path.display(), rows = rows.len(), "wrote entry store");
        Ok(())
    }

    /// Replace the row with the same date, or append a new one, then
    /// rewrite the file in date order.
    pub fn upsert(&self, entry: &Entry) -> Result<UpsertOutcome> {
        let mut rows = self.read_all()?;
        let new_row = entry_to_row(entry);

        let outcome = if let Some(existing) = rows.iter_mut().find(|r| row_date(r) == entry.date)
        {
            *existing = new_row;
            UpsertOutcome::Updated
        } else {
            rows.push(new_row);
            UpsertOutcome::Inserted
        };

        sort_by_date(&mut rows);
        self.write_all(&rows)?;

        info!(date = %entry.date, outcome = %outcome, "upserted entry");
        Ok(outcome)
    }

    /// Rewrite the file in date order. Useful after hand edits.
    pub fn resort(&self) -> Result<()> {
        let mut rows = self.read_all()?;
        sort_by_date(&mut rows);
        self.write_all(&rows)
    }

    /// The row stored for `date`, if any.
    pub fn find(&self, date: &str) -> Result<Option<Row>> {
        Ok(self.read_all()?.into_iter().find(|r| row_date(r) == date))
    }

    /// Remove the row for `date`. Returns whether a row was removed.
    pub fn delete(&self, date: &str) -> Result<bool> {
        let mut rows = self.read_all()?;
        let before = rows.len();
        rows.retain(|r| row_date(r) != date);
        if rows.len() == before {
            return Ok(false);
        }

        sort_by_date(&mut rows);
        self.write_all(&rows)?;

        info!(date, "deleted entry");
        Ok(true)
    }

    /// Write to a sibling temp file, then rename over the store so a crash
    /// never leaves a half-written table behind.
    fn replace_contents(&self, rows: &[Row]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;

        let mut tmp = NamedTempFile::new_in(&dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        {
            let mut wtr = csv::WriterBuilder::new()
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(tmp.as_file_mut());
            wtr.write_record(COLUMNS)?;
            for row in rows {
                wtr.write_record(
                    COLUMNS
                        .iter()
                        .map(|col| row.get(*col).map_or("", String::as_str)),
                )?;
            }
            wtr.flush()?;
        }
        tmp.as_file_mut().flush()?;
        tmp.as_file().sync_all()?;

        tmp.persist(&self.path)
            .with_context(|| format!("Failed to replace store: {}", self.path.display()))?;
        Ok(())
    }
}

/// Canonical text form of an entry: integers bare, mood with one decimal.
#[must_use]
pub fn entry_to_row(entry: &Entry) -> Row {
    let cells = [
        entry.date.clone(),
        entry.sleep_minutes.to_string(),
        entry.exercise_minutes.to_string(),
        format!("{:.1}", entry.mood_scale),
        entry.mood_tags.clone(),
        entry.activities.clone(),
        entry.notes.clone(),
    ];
    COLUMNS
        .iter()
        .map(|c| (*c).to_string())
        .zip(cells)
        .collect()
}

fn row_date(row: &Row) -> &str {
    row.get("date").map_or("", String::as_str)
}

/// Stable, so rows sharing a date (or lacking one) keep their relative order.
fn sort_by_date(rows: &mut [Row]) {
    rows.sort_by(|a, b| row_date(a).cmp(row_date(b)));
}
