//! CLI argument parsing for the result picker.
//!
//! `select` is the user-facing command; `preview` is what the chooser runs
//! for each highlighted row and is hidden from help.
use crate::model::EntityKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "rpick",
    version,
    about = "Pick one catalog search result interactively and print its reference",
    after_help = "Commands:\n  select --kind <kind> [--records <file>]   Choose a result with fzf and print its id/url\n  table --kind <kind> [--records <file>]    Print the formatted result table\n\nRecords are a JSON array or JSON Lines, read from stdin when --records is omitted.\n\nExamples:\n  search-backend --json tidal track 'blue monday' | rpick select --kind track\n  rpick select --kind album --records results.json --json\n  rpick table --kind artist --records artists.jsonl",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Config file (defaults to <config dir>/resultpick/config.json)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Emit debug logs on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Select(SelectArgs),
    Table(TableArgs),
    #[command(hide = true)]
    Preview(PreviewArgs),
}

/// Select command inputs for one interactive session.
#[derive(Parser, Debug)]
#[command(about = "Choose one result interactively and print its reference")]
pub struct SelectArgs {
    /// Entity kind of every record in the result set
    #[arg(long, value_enum)]
    pub kind: EntityKind,

    /// Records file (JSON array or JSON Lines); `-` or omitted reads stdin
    #[arg(long, value_name = "PATH")]
    pub records: Option<PathBuf>,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,

    /// Take the first result without starting the chooser
    #[arg(long)]
    pub first: bool,

    /// Disable the chooser preview pane
    #[arg(long, conflicts_with = "first")]
    pub no_preview: bool,
}

/// Table command inputs.
#[derive(Parser, Debug)]
#[command(about = "Print the formatted result table without choosing")]
pub struct TableArgs {
    #[arg(long, value_enum)]
    pub kind: EntityKind,

    #[arg(long, value_name = "PATH")]
    pub records: Option<PathBuf>,
}

/// Preview re-invocation inputs supplied by the chooser.
#[derive(Parser, Debug)]
pub struct PreviewArgs {
    #[arg(long, value_enum)]
    pub kind: EntityKind,

    /// Session records file written by `select`
    #[arg(long, value_name = "PATH")]
    pub records: PathBuf,

    /// Index token of the highlighted line, e.g. `3.`
    #[arg(long, value_name = "TOKEN")]
    pub index: String,
}
