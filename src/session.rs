//! One selection session: records in, resolution out.
//!
//! The session owns the raw records, their normalized rows and the temporary
//! records file that preview re-invocations read. The file lives exactly as
//! long as the session.
use crate::error::PickError;
use crate::layout::{columns_for, format_table, Table};
use crate::model::{EntityKind, Resolution, Row};
use crate::normalize::{normalize, normalize_record};
use crate::preview::render_preview;
use crate::records::{load_records, write_records};
use crate::resolve::resolve;
use crate::select::{parse_index_token, select, Chooser, PreviewCommand};
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::path::Path;
use tempfile::NamedTempFile;

pub struct Session {
    kind: EntityKind,
    records: Vec<Value>,
    rows: Vec<Row>,
    records_file: Option<NamedTempFile>,
}

impl Session {
    /// Start a session; an empty result set is rejected up front.
    pub fn new(records: Vec<Value>, kind: EntityKind) -> Result<Self, PickError> {
        if records.is_empty() {
            return Err(PickError::NoResults { kind });
        }
        let rows = normalize(&records, kind);
        tracing::debug!(%kind, rows = rows.len(), "session started");
        Ok(Self {
            kind,
            records,
            rows,
            records_file: None,
        })
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn table(&self) -> Table {
        format_table(&self.rows, columns_for(self.kind))
    }

    /// Persist the records for preview re-invocations of `exe`.
    pub fn preview_command(&mut self, exe: &Path) -> Result<PreviewCommand> {
        if self.records_file.is_none() {
            let file = tempfile::Builder::new()
                .prefix("rpick-records-")
                .suffix(".json")
                .tempfile()
                .context("create preview records file")?;
            write_records(file.path(), &self.records)?;
            self.records_file = Some(file);
        }
        let records_path = self
            .records_file
            .as_ref()
            .map(|file| file.path().display().to_string())
            .ok_or_else(|| anyhow!("preview records file missing"))?;
        let exe = exe.display().to_string();
        Ok(PreviewCommand::new([
            exe.as_str(),
            "preview",
            "--kind",
            self.kind.as_str(),
            "--records",
            records_path.as_str(),
        ]))
    }

    /// Run the chooser and resolve its answer against the original records.
    pub fn run(
        &self,
        chooser: &mut dyn Chooser,
        preview: Option<&PreviewCommand>,
    ) -> Result<Resolution, PickError> {
        let columns = columns_for(self.kind);
        let result = select(&self.rows, columns, self.kind, chooser, preview)?;
        resolve(result, &self.records, self.kind)
    }
}

/// Preview card for the record at `index_token` in a records file.
///
/// Only the highlighted record is normalized.
pub fn preview_from_file(records_path: &Path, kind: EntityKind, index_token: &str) -> Result<String> {
    let ordinal = parse_index_token(index_token)
        .ok_or_else(|| anyhow!("invalid row index {index_token:?}"))?;
    let records = load_records(Some(records_path))?;
    let record = records.get(ordinal).ok_or(PickError::RecordMissing {
        index: ordinal,
        len: records.len(),
    })?;
    let row = normalize_record(record, ordinal, kind);
    Ok(render_preview(&row, kind))
}
