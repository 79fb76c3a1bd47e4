mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use crate::commands::{LogArgs, SortArg, cmd_delete, cmd_list, cmd_log, cmd_resort, cmd_show};
use crate::config::Config;
use daylog_core::DaylogService;

#[derive(Parser)]
#[command(
    name = "daylog",
    version,
    about = "A simple daily wellness log",
    long_about = "\n\n  ┌┬┐┌─┐┬ ┬┬  ┌─┐┌─┐
   ││├─┤└┬┘│  │ ││ ┬
  ─┴┘┴ ┴ ┴ ┴─┘└─┘└─┘
   sleep, move, feel. one line a day.
"
)]
struct Cli {
    /// Path to the entries CSV (default: platform data directory)
    #[arg(long, global = true, value_name = "PATH")]
    store: Option<PathBuf>,
    /// Print debug logs to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log (or replace) the entry for a day
    Log {
        #[command(flatten)]
        fields: LogArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List saved entries
    List {
        /// Column to sort by
        #[arg(short, long, value_enum, default_value_t = SortArg::Date)]
        sort: SortArg,
        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
        /// Show at most N entries
        #[arg(short, long)]
        limit: Option<usize>,
        /// Show every field, including activities and notes
        #[arg(short, long)]
        expand: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one day's entry (defaults to today)
    Show {
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete the entry for a date
    Delete {
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow)
        date: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Re-sort the store by date after hand edits
    Resort {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.store)?;
    tracing::debug!(store = %config.store_path.display(), "using entry store");
    let svc = DaylogService::new(config.store_path)?;

    match cli.command {
        Commands::Log { fields, json } => cmd_log(&svc, fields, json),
        Commands::List {
            sort,
            desc,
            limit,
            expand,
            json,
        } => cmd_list(&svc, sort, desc, limit, expand, json),
        Commands::Show { date, json } => cmd_show(&svc, date.as_deref(), json),
        Commands::Delete { date, json } => cmd_delete(&svc, &date, json),
        Commands::Resort { json } => cmd_resort(&svc, json),
    }
}
