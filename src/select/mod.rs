//! Selection driver: hands the formatted table to a chooser and maps the
//! chosen line back to a row ordinal.
//!
//! The chooser only ever sees text. The line it returns is mapped back through
//! its leading index token (`3.` is ordinal 2), never by comparing display
//! text, because truncated or duplicate titles are not a reliable key.
mod fzf;
mod prompt;

pub use fzf::FzfChooser;
pub use prompt::PromptChooser;

use crate::error::PickError;
use crate::layout::{format_table, ColumnSpec};
use crate::model::{EntityKind, Row, SelectionResult};
use std::time::Instant;

/// Placeholder the chooser replaces with the first field of the highlighted line.
pub const HIGHLIGHTED_INDEX_FIELD: &str = "{1}";

/// Everything a chooser needs for one session.
#[derive(Debug)]
pub struct ChooserRequest<'a> {
    /// Header line followed by one line per row.
    pub input: &'a str,
    pub header_lines: usize,
    pub prompt: String,
    /// Shell command run per highlighted line; `None` disables the preview pane.
    pub preview_command: Option<String>,
}

impl ChooserRequest<'_> {
    pub fn data_lines(&self) -> impl Iterator<Item = &str> {
        self.input.lines().skip(self.header_lines)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChooserOutcome {
    Chosen(String),
    Cancelled,
}

/// An interactive line chooser.
pub trait Chooser {
    fn name(&self) -> &str;

    fn choose(&mut self, request: &ChooserRequest<'_>) -> Result<ChooserOutcome, PickError>;
}

/// Picks the first row without interaction.
#[derive(Debug, Default)]
pub struct FirstRowChooser;

impl Chooser for FirstRowChooser {
    fn name(&self) -> &str {
        "first-row"
    }

    fn choose(&mut self, request: &ChooserRequest<'_>) -> Result<ChooserOutcome, PickError> {
        request
            .data_lines()
            .next()
            .map(|line| ChooserOutcome::Chosen(line.to_string()))
            .ok_or_else(|| PickError::selection_failed("no rows to choose from"))
    }
}

/// Shell-quoted base command for preview re-invocations.
///
/// The highlighted index is appended as `--index {1}` when the session
/// builds its chooser request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewCommand {
    base: String,
}

impl PreviewCommand {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            base: shell_words::join(argv),
        }
    }

    pub fn template(&self) -> String {
        format!("{} --index {HIGHLIGHTED_INDEX_FIELD}", self.base)
    }
}

/// Parse an index token such as `3.` into ordinal 2.
pub fn parse_index_token(token: &str) -> Option<usize> {
    let token = token.trim().trim_matches(|ch| ch == '\'' || ch == '"');
    let digits = token.strip_suffix('.').unwrap_or(token);
    digits.parse::<usize>().ok()?.checked_sub(1)
}

/// Ordinal of a chosen table line, taken from its leading index column.
pub fn parse_chosen_line(line: &str) -> Option<usize> {
    line.split_whitespace().next().and_then(parse_index_token)
}

/// Run one interactive selection over `rows`.
pub fn select(
    rows: &[Row],
    columns: &[ColumnSpec],
    kind: EntityKind,
    chooser: &mut dyn Chooser,
    preview: Option<&PreviewCommand>,
) -> Result<SelectionResult, PickError> {
    if rows.is_empty() {
        return Err(PickError::NoResults { kind });
    }
    let input = format_table(rows, columns).render();
    let request = ChooserRequest {
        input: &input,
        header_lines: 1,
        prompt: format!("{} > ", kind.label()),
        preview_command: preview.map(PreviewCommand::template),
    };

    let start = Instant::now();
    let outcome = chooser.choose(&request);
    let elapsed_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        chooser = chooser.name(),
        rows = rows.len(),
        elapsed_ms,
        ok = outcome.is_ok(),
        "chooser finished"
    );

    match outcome? {
        ChooserOutcome::Cancelled => Ok(SelectionResult::Cancelled),
        ChooserOutcome::Chosen(line) => {
            let ordinal = parse_chosen_line(&line)
                .filter(|ordinal| *ordinal < rows.len())
                .ok_or_else(|| {
                    PickError::selection_failed(format!(
                        "chosen line does not start with a row index: {line:?}"
                    ))
                })?;
            Ok(SelectionResult::Chosen(ordinal))
        }
    }
}

#[cfg(test)]
#[path = "select_tests.rs"]
mod tests;
