use anyhow::Result;
use clap::ValueEnum;

use daylog_core::{DaylogService, SortKey, SortOrder};

use super::helpers::print_entry_table;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum SortArg {
    #[default]
    Date,
    Mood,
    Sleep,
    Exercise,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => SortKey::Date,
            SortArg::Mood => SortKey::Mood,
            SortArg::Sleep => SortKey::Sleep,
            SortArg::Exercise => SortKey::Exercise,
        }
    }
}

#[allow(clippy::fn_params_excessive_bools)]
pub(crate) fn cmd_list(
    svc: &DaylogService,
    sort: SortArg,
    desc: bool,
    limit: Option<usize>,
    expand: bool,
    json: bool,
) -> Result<()> {
    let order = if desc {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };
    let mut entries = svc.list_entries(sort.into(), order)?;
    if let Some(n) = limit {
        entries.truncate(n);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        eprintln!("No entries found. Use `daylog log` to record your day.");
    } else {
        print_entry_table(&entries, expand);
    }

    Ok(())
}
