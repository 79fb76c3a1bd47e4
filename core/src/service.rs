use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::models::{Entry, EntryView, RawEntry, UpsertOutcome, ValidationErrors};
use crate::store::{EntryStore, Row};
use crate::validation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Date,
    Mood,
    Sleep,
    Exercise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Why a submission was not saved.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("invalid entry: {0}")]
    Invalid(ValidationErrors),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Debug, Clone)]
pub struct LogResult {
    pub entry: Entry,
    pub outcome: UpsertOutcome,
}

/// Everything a front end needs: validate, save, list.
pub struct DaylogService {
    store: EntryStore,
}

impl DaylogService {
    pub fn new(store_path: impl Into<PathBuf>) -> Result<Self> {
        let store = EntryStore::open(store_path)?;
        Ok(Self { store })
    }

    #[must_use]
    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    pub fn create_daily_entry(&self, raw: &RawEntry) -> Result<Entry, ValidationErrors> {
        validation::create_daily_entry(raw)
    }

    /// Validate a raw submission and save it. Nothing is written when any
    /// field is invalid.
    pub fn log_entry(&self, raw: &RawEntry) -> Result<LogResult, LogError> {
        let entry = validation::create_daily_entry(raw).map_err(LogError::Invalid)?;
        let outcome = self.store.upsert(&entry)?;
        Ok(LogResult { entry, outcome })
    }

    pub fn upsert_entry(&self, entry: &Entry) -> Result<UpsertOutcome> {
        self.store.upsert(entry)
    }

    pub fn read_entries(&self) -> Result<Vec<Row>> {
        self.store.read_all()
    }

    pub fn list_entries(&self, key: SortKey, order: SortOrder) -> Result<Vec<EntryView>> {
        let mut views: Vec<EntryView> = self
            .store
            .read_all()?
            .iter()
            .map(EntryView::from_row)
            .collect();
        sort_views(&mut views, key, order);
        Ok(views)
    }

    pub fn get_entry(&self, date: &str) -> Result<Option<EntryView>> {
        Ok(self.store.find(date)?.as_ref().map(EntryView::from_row))
    }

    pub fn delete_entry(&self, date: &str) -> Result<bool> {
        self.store.delete(date)
    }

    pub fn resort(&self) -> Result<()> {
        self.store.resort()
    }
}

/// Sort listing rows. Rows with a missing or unreadable value for a numeric
/// key always go last; ties fall back to ascending date.
pub fn sort_views(views: &mut [EntryView], key: SortKey, order: SortOrder) {
    let directed = |o: Ordering| match order {
        SortOrder::Ascending => o,
        SortOrder::Descending => o.reverse(),
    };

    views.sort_by(|a, b| {
        let primary = match key {
            SortKey::Date => directed(a.date.cmp(&b.date)),
            SortKey::Mood => cmp_missing_last(a.mood_scale, b.mood_scale, |x, y| {
                directed(x.total_cmp(&y))
            }),
            SortKey::Sleep => cmp_missing_last(a.sleep_minutes, b.sleep_minutes, |x, y| {
                directed(x.cmp(&y))
            }),
            SortKey::Exercise => {
                cmp_missing_last(a.exercise_minutes, b.exercise_minutes, |x, y| {
                    directed(x.cmp(&y))
                })
            }
        };
        primary.then_with(|| a.date.cmp(&b.date))
    });
}

fn cmp_missing_last<T: Copy>(
    a: Option<T>,
    b: Option<T>,
    cmp: impl Fn(T, T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
