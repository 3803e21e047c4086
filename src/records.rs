//! Loading the raw result records handed over by the search backend.
//!
//! Accepts either a JSON array of records or JSON Lines (one record per
//! non-empty line).
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read records from `path`, or from stdin when `path` is `None` or `-`.
pub fn load_records(path: Option<&Path>) -> Result<Vec<Value>> {
    let text = match path.filter(|path| *path != Path::new("-")) {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("read records {}", path.display()))?
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("read records from stdin")?;
            text
        }
    };
    parse_records(&text)
}

pub fn parse_records(text: &str) -> Result<Vec<Value>> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("parse records JSON array");
    }
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line)
                .map_err(|err| anyhow!("parse records JSON line {}: {err}", idx + 1))
        })
        .collect()
}

/// Write records where preview re-invocations can read them back.
pub fn write_records(path: &Path, records: &[Value]) -> Result<()> {
    let text = serde_json::to_string(records).context("serialize records")?;
    fs::write(path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
