//! CLI argument definitions for the people table.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use people_generate::LevelSizes;
use people_cli::session::parse_salary;
use people_model::{ColumnId, DEFAULT_PAGE_SIZE, Gender};

#[derive(Parser)]
#[command(
    name = "people-table",
    version,
    about = "Browse and edit a locally stored table of synthetic people",
    long_about = "Browse and edit a locally stored table of synthetic people.\n\n\
                  The table is kept in a single slot of a local store. An empty\n\
                  store is seeded with generated records on first use; every edit\n\
                  or delete rewrites the whole slot."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow names and other record values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

/// Where the table lives and how an empty store is seeded.
#[derive(Args)]
pub struct StoreArgs {
    /// Directory holding the store's slot files.
    #[arg(
        long = "store-dir",
        value_name = "DIR",
        default_value = ".people-table",
        global = true
    )]
    pub store_dir: PathBuf,

    /// Records per level generated for an empty store (e.g. `2000` or `100,3`).
    #[arg(
        long = "seed-sizes",
        value_name = "SIZES",
        default_value = "2000",
        global = true
    )]
    pub seed_sizes: LevelSizes,

    /// Fixed RNG seed for generated records.
    #[arg(long = "seed", value_name = "N", global = true)]
    pub seed: Option<u64>,

    /// What to do when the stored table cannot be read.
    #[arg(
        long = "on-corrupt",
        value_enum,
        default_value = "regenerate",
        global = true
    )]
    pub on_corrupt: OnCorruptArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Display the table.
    Show(ShowArgs),

    /// Edit a top-level record.
    Edit(EditArgs),

    /// Delete a top-level record.
    Delete(DeleteArgs),

    /// Clear the stored table; the next command regenerates it.
    Reset,

    /// Print or write a generated forest without touching the store.
    Generate(GenerateArgs),
}

#[derive(Args)]
pub struct ShowArgs {
    /// Column to sort by (default: state).
    #[arg(long = "sort", value_name = "COLUMN")]
    pub sort: Option<ColumnId>,

    /// Sort descending.
    #[arg(long = "desc")]
    pub desc: bool,

    /// Keep stored order instead of sorting.
    #[arg(long = "unsorted", conflicts_with_all = ["sort", "desc"])]
    pub unsorted: bool,

    /// Group rows by a column and show aggregates per group.
    #[arg(long = "group-by", value_name = "COLUMN")]
    pub group_by: Option<ColumnId>,

    /// Only show records whose cells contain this text (case-insensitive).
    #[arg(long = "filter", value_name = "TEXT")]
    pub filter: Option<String>,

    /// Page to show, starting at 1.
    #[arg(long = "page", value_name = "N", default_value_t = 1)]
    pub page: usize,

    /// Rows per page (50, 100, 250 or 500).
    #[arg(long = "page-size", value_name = "N", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Hide nested records.
    #[arg(long = "collapsed")]
    pub collapsed: bool,
}

#[derive(Args)]
pub struct EditArgs {
    /// Position of the record in the stored table (as shown in the `#` column).
    #[arg(value_name = "INDEX")]
    pub index: usize,

    #[arg(long = "first-name")]
    pub first_name: Option<String>,

    #[arg(long = "last-name")]
    pub last_name: Option<String>,

    #[arg(long = "age")]
    pub age: Option<u32>,

    /// Male or Female.
    #[arg(long = "gender")]
    pub gender: Option<Gender>,

    #[arg(long = "state")]
    pub state: Option<String>,

    /// Non-negative amount in dollars.
    #[arg(long = "salary", value_parser = parse_salary)]
    pub salary: Option<f64>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Identifier of the record to delete.
    #[arg(value_name = "ID")]
    pub id: String,

    /// Skip the confirmation prompt.
    #[arg(long = "yes", short = 'y')]
    pub yes: bool,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Records per level, comma-separated (e.g. `10,3`).
    #[arg(value_name = "SIZES")]
    pub sizes: LevelSizes,

    /// Write JSON to this file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON.
    #[arg(long = "pretty")]
    pub pretty: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OnCorruptArg {
    /// Warn and regenerate the table.
    Regenerate,
    /// Stop with an error.
    Fail,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
