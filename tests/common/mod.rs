//! Shared test infrastructure for rpick integration tests.
//!
//! Tests drive the built binary with a fake chooser: a shell script that
//! records its arguments, optionally runs the preview command for one index
//! token, and then "selects" a data line or exits with a given status.

use serde_json::Value;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const FAKE_CHOOSER: &str = r#"#!/bin/sh
prev=""
preview=""
for arg in "$@"; do
  if [ "$prev" = "--preview" ]; then preview="$arg"; fi
  prev="$arg"
done
printf '%s\n' "$@" > "$FAKE_ARGS_OUT"
input=$(cat)
printf '%s\n' "$input" > "$FAKE_INPUT_OUT"
if [ -n "$FAKE_PREVIEW_TOKEN" ] && [ -n "$preview" ]; then
  cmd=$(printf '%s' "$preview" | sed "s/{1}/'$FAKE_PREVIEW_TOKEN'/")
  sh -c "$cmd" > "$FAKE_PREVIEW_OUT"
fi
if [ -n "$FAKE_EXIT" ]; then exit "$FAKE_EXIT"; fi
printf '%s\n' "$input" | sed -n "$((FAKE_PICK + 2))p"
"#;

/// How the fake chooser should behave for one run.
#[derive(Default)]
pub struct ChooserScript {
    /// 0-based data line to select.
    pub pick: usize,
    /// Exit with this status instead of selecting.
    pub exit: Option<i32>,
    /// Index token to render a preview for while the session is alive.
    pub preview_token: Option<String>,
}

/// Captured results of one rpick invocation.
pub struct RunResult {
    pub output: Output,
    pub chooser_args: Vec<String>,
    pub chooser_input: String,
    pub preview: Option<String>,
}

impl RunResult {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }
}

/// Temp workspace holding records, config and the fake chooser.
pub struct PickFixture {
    pub dir: TempDir,
    pub records_path: PathBuf,
    pub config_path: PathBuf,
    pub chooser_path: PathBuf,
}

impl PickFixture {
    pub fn new(records: &[Value]) -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let records_path = dir.path().join("records.json");
        fs::write(&records_path, serde_json::to_string(records)?)?;
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, r#"{"schema_version": 1}"#)?;
        let chooser_path = dir.path().join("fake-chooser");
        fs::write(&chooser_path, FAKE_CHOOSER)?;
        fs::set_permissions(&chooser_path, fs::Permissions::from_mode(0o755))?;
        Ok(Self {
            dir,
            records_path,
            config_path,
            chooser_path,
        })
    }

    fn out_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Base command with isolated config and logging.
    pub fn command(&self, chooser: &str) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_rpick"));
        command
            .arg("--config")
            .arg(&self.config_path)
            .env("RPICK_CHOOSER", chooser)
            .env_remove("RPICK_LOG")
            .env_remove("RUST_LOG")
            .stdin(Stdio::null());
        command
    }

    /// Run `rpick <args>` against the fake chooser.
    pub fn run(&self, args: &[&str], script: &ChooserScript) -> anyhow::Result<RunResult> {
        let chooser = self.chooser_path.display().to_string();
        let mut command = self.command(&chooser);
        command
            .args(args)
            .arg("--records")
            .arg(&self.records_path)
            .env("FAKE_ARGS_OUT", self.out_path("args.txt"))
            .env("FAKE_INPUT_OUT", self.out_path("input.txt"))
            .env("FAKE_PREVIEW_OUT", self.out_path("preview.txt"))
            .env("FAKE_PICK", script.pick.to_string());
        match script.exit {
            Some(code) => command.env("FAKE_EXIT", code.to_string()),
            None => command.env_remove("FAKE_EXIT"),
        };
        match &script.preview_token {
            Some(token) => command.env("FAKE_PREVIEW_TOKEN", token),
            None => command.env_remove("FAKE_PREVIEW_TOKEN"),
        };
        for name in ["args.txt", "input.txt", "preview.txt"] {
            let _ = fs::remove_file(self.out_path(name));
        }

        let output = command.output()?;
        let chooser_args = fs::read_to_string(self.out_path("args.txt"))
            .map(|text| text.lines().map(str::to_string).collect())
            .unwrap_or_default();
        let chooser_input = fs::read_to_string(self.out_path("input.txt")).unwrap_or_default();
        let preview = fs::read_to_string(self.out_path("preview.txt")).ok();
        Ok(RunResult {
            output,
            chooser_args,
            chooser_input,
            preview,
        })
    }
}
