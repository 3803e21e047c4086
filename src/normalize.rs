//! Entity normalization from raw search records into display rows.
//!
//! Normalization is total: any field that is absent, null, blank or of an
//! unexpected JSON type becomes [`FieldValue::Unknown`] and the rest of the
//! record is still used.
use crate::model::{EntityKind, Field, FieldValue, Quality, Row};
use crate::util::{compact_count, format_seconds, sanitize_display};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Normalize a whole result set; ordinals follow input order.
pub fn normalize(records: &[Value], kind: EntityKind) -> Vec<Row> {
    records
        .iter()
        .enumerate()
        .map(|(ordinal, record)| normalize_record(record, ordinal, kind))
        .collect()
}

/// Normalize a single record; used directly by preview re-invocations.
pub fn normalize_record(record: &Value, ordinal: usize, kind: EntityKind) -> Row {
    let empty = Map::new();
    let record = record.as_object().unwrap_or(&empty);
    let fields: BTreeMap<Field, FieldValue> = kind
        .canonical_fields()
        .iter()
        .map(|field| (*field, extract_field(record, *field)))
        .collect();
    Row::new(ordinal, kind, fields)
}

fn extract_field(record: &Map<String, Value>, field: Field) -> FieldValue {
    let value = match field {
        Field::Title => first_text(record, &["title", "name"]).map(FieldValue::Text),
        Field::Name => first_text(record, &["name", "title"]).map(FieldValue::Text),
        Field::Artist => artists(record).map(FieldValue::Text),
        Field::Album => first_named(record, &["album", "album_name"]).map(FieldValue::Text),
        Field::Year => year(record).map(FieldValue::Text),
        Field::Duration | Field::TotalDuration => duration_seconds(record)
            .map(format_seconds)
            .map(FieldValue::Text),
        Field::Explicit => record.get("explicit").and_then(as_flag).map(FieldValue::Flag),
        Field::Quality => quality(record).map(FieldValue::Quality),
        Field::TrackCount => track_count(record).map(|count| FieldValue::Text(count.to_string())),
        Field::Popularity => popularity(record).map(FieldValue::Text),
        Field::Genre => genre(record).map(FieldValue::Text),
        Field::Owner => {
            first_named(record, &["owner", "creator", "user"]).map(FieldValue::Text)
        }
    };
    value.unwrap_or(FieldValue::Unknown)
}

fn as_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => sanitize_display(text),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn first_text(record: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| record.get(*key).and_then(as_text))
}

/// Text, or the `name`/`title`/`display_name` of a nested object.
fn named(value: &Value) -> Option<String> {
    match value {
        Value::Object(object) => first_text(object, &["name", "title", "display_name"]),
        other => as_text(other),
    }
}

fn first_named(record: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| record.get(*key).and_then(named))
}

fn artists(record: &Map<String, Value>) -> Option<String> {
    ["artists", "artist"].iter().find_map(|key| {
        let value = record.get(*key)?;
        match value {
            Value::Array(items) => {
                let names: Vec<String> = items.iter().filter_map(named).collect();
                if names.is_empty() {
                    None
                } else {
                    Some(names.join(", "))
                }
            }
            other => named(other),
        }
    })
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|v| *v >= 0.0).map(|v| v.round() as u64)),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn year(record: &Map<String, Value>) -> Option<String> {
    if let Some(year) = record.get("year").and_then(as_u64).filter(|y| *y > 0) {
        return Some(year.to_string());
    }
    ["release_date", "date"].iter().find_map(|key| {
        let text = record.get(*key)?.as_str()?;
        let digits: String = text.trim().chars().take(4).collect();
        if digits.len() == 4 && digits.chars().all(|ch| ch.is_ascii_digit()) {
            Some(digits)
        } else {
            None
        }
    })
}

fn duration_seconds(record: &Map<String, Value>) -> Option<u64> {
    if let Some(seconds) = record.get("duration").and_then(as_u64) {
        return Some(seconds);
    }
    if let Some(millis) = record.get("duration_ms").and_then(as_u64) {
        return Some(millis / 1_000);
    }
    record.get("length").and_then(as_u64)
}

fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => match number.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn quality(record: &Map<String, Value>) -> Option<Quality> {
    let raw = record.get("quality").and_then(as_text).or_else(|| {
        record
            .get("additional")
            .and_then(Value::as_array)
            .and_then(|items| items.iter().find_map(as_text))
    })?;
    Some(Quality::classify(&raw))
}

fn track_count(record: &Map<String, Value>) -> Option<u64> {
    ["track_count", "tracks_count", "number_of_tracks"]
        .iter()
        .find_map(|key| record.get(*key).and_then(as_u64))
        .or_else(|| {
            record
                .get("tracks")
                .and_then(Value::as_array)
                .map(|tracks| tracks.len() as u64)
        })
}

fn popularity(record: &Map<String, Value>) -> Option<String> {
    let followers = record.get("followers").and_then(|value| match value {
        Value::Object(object) => object.get("total").and_then(as_u64),
        other => as_u64(other),
    });
    if let Some(followers) = followers {
        return Some(format!("{} followers", compact_count(followers)));
    }
    record
        .get("popularity")
        .and_then(as_u64)
        .map(|popularity| format!("pop {popularity}"))
}

fn genre(record: &Map<String, Value>) -> Option<String> {
    record.get("genre").and_then(as_text).or_else(|| {
        record
            .get("genres")
            .and_then(Value::as_array)
            .and_then(|genres| genres.iter().find_map(as_text))
    })
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
