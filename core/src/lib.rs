pub mod format;
pub mod models;
pub mod parse;
pub mod service;
pub mod store;
pub mod validation;

pub use format::{date_to_human_text, minutes_to_clock_text, minutes_to_human_text};
pub use models::{
    Entry, EntryField, EntryView, FieldError, FieldErrorKind, RawEntry, UpsertOutcome,
    ValidationErrors,
};
pub use service::{DaylogService, LogError, LogResult, SortKey, SortOrder};
pub use store::{EntryStore, Row};
pub use validation::create_daily_entry;
