use super::{Chooser, ChooserOutcome, ChooserRequest};
use crate::config::ChooserConfig;
use crate::error::PickError;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};

/// fzf exit status for "no match".
const EXIT_NO_MATCH: i32 = 1;
/// fzf exit status when interrupted with escape or ctrl-c.
const EXIT_INTERRUPTED: i32 = 130;

/// External fzf-compatible chooser.
#[derive(Clone, Debug)]
pub struct FzfChooser {
    program: String,
    args: Vec<String>,
    preview_window: String,
}

impl FzfChooser {
    pub fn from_config(config: &ChooserConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            preview_window: config.preview_window.clone(),
        }
    }

    /// Locate the chooser executable before anything is shown to the user.
    pub fn resolve_program(&self) -> Result<PathBuf, PickError> {
        which::which(&self.program)
            .map_err(|err| PickError::chooser_unavailable(&self.program, err))
    }

    fn command_args(&self, request: &ChooserRequest<'_>) -> Vec<String> {
        let mut args = vec![
            "--reverse".to_string(),
            "--no-multi".to_string(),
            "--header-lines".to_string(),
            request.header_lines.to_string(),
            "--prompt".to_string(),
            request.prompt.clone(),
        ];
        if let Some(preview) = &request.preview_command {
            args.push("--preview".to_string());
            args.push(preview.clone());
            args.push("--preview-window".to_string());
            args.push(self.preview_window.clone());
        }
        args.extend(self.args.iter().cloned());
        args
    }
}

impl Chooser for FzfChooser {
    fn name(&self) -> &str {
        &self.program
    }

    fn choose(&mut self, request: &ChooserRequest<'_>) -> Result<ChooserOutcome, PickError> {
        let program = self.resolve_program()?;
        let args = self.command_args(request);
        tracing::debug!(program = %program.display(), ?args, "spawn chooser");

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                    PickError::chooser_unavailable(&self.program, err)
                }
                _ => PickError::selection_failed(format!("spawn {}: {err}", self.program)),
            })?;
        let mut guard = ChildGuard::new(child);

        guard
            .write_input(request.input)
            .map_err(|err| PickError::selection_failed(format!("write chooser input: {err}")))?;
        let (status, stdout) = guard
            .wait()
            .map_err(|err| PickError::selection_failed(format!("wait for chooser: {err}")))?;
        tracing::debug!(code = ?status.code(), stdout_bytes = stdout.len(), "chooser exited");
        classify_exit(status, &stdout)
    }
}

/// Map the chooser's exit status and output to an outcome.
pub(super) fn classify_exit(status: ExitStatus, stdout: &str) -> Result<ChooserOutcome, PickError> {
    match status.code() {
        Some(0) => stdout
            .lines()
            .map(str::trim_end)
            .find(|line| !line.is_empty())
            .map(|line| ChooserOutcome::Chosen(line.to_string()))
            .ok_or_else(|| PickError::selection_failed("chooser exited 0 without a selection")),
        Some(EXIT_NO_MATCH) | Some(EXIT_INTERRUPTED) => Ok(ChooserOutcome::Cancelled),
        Some(code) => Err(PickError::selection_failed(format!(
            "chooser exited with status {code}"
        ))),
        None => Err(PickError::selection_failed("chooser terminated by a signal")),
    }
}

/// Kills and reaps the chooser on any exit path that did not wait for it.
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
        }
    }

    fn write_input(&mut self, input: &str) -> io::Result<()> {
        let Some(mut stdin) = self.child.stdin.take() else {
            return Ok(());
        };
        match stdin.write_all(input.as_bytes()) {
            // The chooser may exit (user cancelled) before reading all rows.
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
            other => other,
        }
    }

    fn wait(&mut self) -> io::Result<(ExitStatus, String)> {
        let mut stdout = String::new();
        if let Some(mut pipe) = self.child.stdout.take() {
            pipe.read_to_string(&mut stdout)?;
        }
        let status = self.child.wait()?;
        self.reaped = true;
        Ok((status, stdout))
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
