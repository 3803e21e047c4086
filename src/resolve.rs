//! Mapping a selection back to the record the download backend needs.
use crate::error::PickError;
use crate::model::{ActionableReference, EntityKind, Resolution, SelectionResult};
use serde_json::Value;

const ID_KEYS: [&str; 4] = ["id", "result_id", "media_id", "uri"];
const EXTRA_KEYS: [&str; 2] = ["extra_kwargs", "extra"];

/// Resolve a selection against the records the session was built from.
pub fn resolve(
    result: SelectionResult,
    records: &[Value],
    kind: EntityKind,
) -> Result<Resolution, PickError> {
    let index = match result {
        SelectionResult::Cancelled => return Ok(Resolution::Cancelled),
        SelectionResult::Chosen(index) => index,
    };
    let record = records.get(index).ok_or(PickError::RecordMissing {
        index,
        len: records.len(),
    })?;
    let reference = reference_from_record(record, kind).ok_or(PickError::IdentifierMissing { index })?;
    tracing::debug!(index, id = %reference.id, "resolved selection");
    Ok(Resolution::Reference(reference))
}

fn reference_from_record(record: &Value, kind: EntityKind) -> Option<ActionableReference> {
    let object = record.as_object()?;
    let url = object
        .get("url")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|url| url.starts_with("http"))
        .map(str::to_string);
    let id = ID_KEYS
        .iter()
        .find_map(|key| object.get(*key).and_then(identifier))
        .or_else(|| url.as_deref().and_then(last_path_segment))?;
    let extra = EXTRA_KEYS
        .iter()
        .find_map(|key| object.get(*key).filter(|value| !value.is_null()))
        .cloned();
    Some(ActionableReference {
        kind,
        id,
        url,
        extra,
    })
}

fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn last_path_segment(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .filter(|segment| !segment.contains(':'))
        .map(str::to_string)
}
