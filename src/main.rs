use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};

mod cli;
mod config;
mod error;
mod layout;
mod logging;
mod model;
mod normalize;
mod preview;
mod records;
mod resolve;
mod select;
mod session;
mod util;

use cli::{Command, PreviewArgs, RootArgs, SelectArgs, TableArgs};
use config::{load_config, FallbackMode, PickConfig};
use model::Resolution;
use records::load_records;
use select::{FirstRowChooser, FzfChooser, PromptChooser};
use session::{preview_from_file, Session};

fn main() -> Result<()> {
    let args = RootArgs::parse();
    logging::init_tracing(args.verbose);

    match &args.command {
        Command::Select(select) => {
            let config = load_config(args.config.as_deref())?;
            cmd_select(select, &config)
        }
        Command::Table(table) => cmd_table(table),
        Command::Preview(preview) => cmd_preview(preview),
    }
}

fn cmd_select(args: &SelectArgs, config: &PickConfig) -> Result<()> {
    let records = load_records(args.records.as_deref())?;
    let mut session = Session::new(records, args.kind)?;

    let resolution = if args.first {
        session.run(&mut FirstRowChooser, None)?
    } else {
        let mut fzf = FzfChooser::from_config(&config.chooser);
        match fzf.resolve_program() {
            Ok(_) => {
                let preview = if args.no_preview {
                    None
                } else {
                    let exe = std::env::current_exe().context("locate rpick executable")?;
                    Some(session.preview_command(&exe)?)
                };
                session.run(&mut fzf, preview.as_ref())?
            }
            Err(err) if config.fallback == FallbackMode::Prompt => {
                tracing::warn!(%err, "falling back to numbered prompt");
                let mut prompt = PromptChooser::new(terminal_input()?, io::stderr());
                session.run(&mut prompt, None)?
            }
            Err(err) => return Err(err.into()),
        }
    };
    emit_resolution(&resolution, args.json)
}

/// Answers must come from the terminal even when records arrive on stdin.
fn terminal_input() -> Result<Box<dyn BufRead>> {
    if io::stdin().is_terminal() {
        return Ok(Box::new(io::stdin().lock()));
    }
    let tty = File::open("/dev/tty").context("open terminal for selection prompt")?;
    Ok(Box::new(BufReader::new(tty)))
}

fn emit_resolution(resolution: &Resolution, as_json: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match (resolution, as_json) {
        (Resolution::Reference(reference), true) => {
            let value = json!({"status": "selected", "reference": reference});
            writeln!(stdout, "{}", serde_json::to_string(&value)?)?;
        }
        (Resolution::Reference(reference), false) => writeln!(stdout, "{reference}")?,
        (Resolution::Cancelled, true) => {
            writeln!(stdout, "{}", json!({"status": "cancelled"}))?;
        }
        (Resolution::Cancelled, false) => {
            tracing::info!("selection cancelled");
        }
    }
    Ok(())
}

fn cmd_table(args: &TableArgs) -> Result<()> {
    let records = load_records(args.records.as_deref())?;
    let session = Session::new(records, args.kind)?;
    tracing::debug!(kind = %session.kind(), rows = session.rows().len(), "render table");
    print!("{}", session.table().render());
    Ok(())
}

fn cmd_preview(args: &PreviewArgs) -> Result<()> {
    let card = preview_from_file(&args.records, args.kind, &args.index)?;
    print!("{card}");
    Ok(())
}
