use super::{Chooser, ChooserOutcome, ChooserRequest};
use crate::error::PickError;
use std::io::{BufRead, Write};

const CANCEL_WORDS: [&str; 5] = ["q", "quit", "e", "exit", "x"];

/// Numbered line prompt used when no interactive chooser is installed.
pub struct PromptChooser<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptChooser<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Chooser for PromptChooser<R, W> {
    fn name(&self) -> &str {
        "prompt"
    }

    fn choose(&mut self, request: &ChooserRequest<'_>) -> Result<ChooserOutcome, PickError> {
        let io_failed = |err: std::io::Error| PickError::selection_failed(format!("prompt: {err}"));
        self.output
            .write_all(request.input.as_bytes())
            .map_err(io_failed)?;
        write!(self.output, "Selection: ").map_err(io_failed)?;
        self.output.flush().map_err(io_failed)?;

        let mut answer = String::new();
        let read = self.input.read_line(&mut answer).map_err(io_failed)?;
        let answer = answer.trim();
        if read == 0 || answer.is_empty() || CANCEL_WORDS.contains(&answer.to_ascii_lowercase().as_str()) {
            return Ok(ChooserOutcome::Cancelled);
        }
        let number: usize = answer
            .trim_end_matches('.')
            .parse()
            .map_err(|_| PickError::selection_failed(format!("input a number, got {answer:?}")))?;
        number
            .checked_sub(1)
            .and_then(|ordinal| request.data_lines().nth(ordinal))
            .map(|line| ChooserOutcome::Chosen(line.to_string()))
            .ok_or_else(|| PickError::selection_failed(format!("invalid selection {number}")))
    }
}
