//! Core data model shared by the normalizer, layout, preview and resolver.
//!
//! Every row carries a value for each canonical field of its kind; missing
//! metadata is represented explicitly by [`FieldValue::Unknown`].
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Rendered in place of any field the search backend did not provide.
pub const UNKNOWN: &str = "----";

/// Catalog entity kind; fixed for the lifetime of a selection session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Track,
    Album,
    Artist,
    Playlist,
}

impl EntityKind {
    #[cfg(test)]
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Track,
        EntityKind::Album,
        EntityKind::Artist,
        EntityKind::Playlist,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Track => "track",
            EntityKind::Album => "album",
            EntityKind::Artist => "artist",
            EntityKind::Playlist => "playlist",
        }
    }

    /// Upper-case label used for the primary column and chooser prompt.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Track => "TRACK",
            EntityKind::Album => "ALBUM",
            EntityKind::Artist => "ARTIST",
            EntityKind::Playlist => "PLAYLIST",
        }
    }

    /// Canonical fields in display order; the first one is the primary label.
    pub fn canonical_fields(self) -> &'static [Field] {
        match self {
            EntityKind::Track => &[
                Field::Title,
                Field::Artist,
                Field::Album,
                Field::Year,
                Field::Duration,
                Field::Explicit,
                Field::Quality,
            ],
            EntityKind::Album => &[
                Field::Title,
                Field::Artist,
                Field::Year,
                Field::TrackCount,
                Field::Quality,
            ],
            EntityKind::Artist => &[Field::Name, Field::Popularity, Field::Genre],
            EntityKind::Playlist => &[
                Field::Title,
                Field::Owner,
                Field::TrackCount,
                Field::TotalDuration,
            ],
        }
    }

    pub fn primary_field(self) -> Field {
        self.canonical_fields()[0]
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical field names across all entity kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Name,
    Artist,
    Album,
    Year,
    Duration,
    Explicit,
    Quality,
    TrackCount,
    Popularity,
    Genre,
    Owner,
    TotalDuration,
}

impl Field {
    /// Label used on the preview card.
    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Name => "Artist",
            Field::Artist => "Artist",
            Field::Album => "Album",
            Field::Year => "Year",
            Field::Duration => "Length",
            Field::Explicit => "Explicit",
            Field::Quality => "Quality",
            Field::TrackCount => "Tracks",
            Field::Popularity => "Followers",
            Field::Genre => "Genre",
            Field::Owner => "Owner",
            Field::TotalDuration => "Length",
        }
    }
}

/// Closed set of audio quality tiers reported by catalog backends.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Quality {
    Lossless,
    HiFi,
    Master,
    DolbyAtmos,
    Unknown,
}

impl Quality {
    /// Classify a backend quality string; unrecognised text maps to `Unknown`.
    pub fn classify(raw: &str) -> Quality {
        let lowered = raw.to_ascii_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|needle| lowered.contains(needle));
        if has(&["atmos", "dolby"]) {
            Quality::DolbyAtmos
        } else if has(&["master", "mqa"]) {
            Quality::Master
        } else if has(&["hifi", "hi-fi", "hi_res", "hires", "hi-res"]) {
            Quality::HiFi
        } else if has(&["lossless", "flac", "alac"]) {
            Quality::Lossless
        } else {
            Quality::Unknown
        }
    }

    /// Fixed four-column table code.
    pub fn code(self) -> &'static str {
        match self {
            Quality::Lossless => "LOSS",
            Quality::HiFi => "HIFI",
            Quality::Master => "MAST",
            Quality::DolbyAtmos => "DA",
            Quality::Unknown => UNKNOWN,
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            Quality::Lossless => "Lossless",
            Quality::HiFi => "HiFi",
            Quality::Master => "Master",
            Quality::DolbyAtmos => "Dolby Atmos",
            Quality::Unknown => UNKNOWN,
        }
    }
}

/// Display-ready value of one canonical field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Quality(Quality),
    Unknown,
}

impl FieldValue {
    #[cfg(test)]
    pub fn is_unknown(&self) -> bool {
        matches!(self, FieldValue::Unknown)
    }

    pub fn is_flag_set(&self) -> bool {
        matches!(self, FieldValue::Flag(true))
    }
}

/// Normalized representation of one raw record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub ordinal: usize,
    pub kind: EntityKind,
    fields: BTreeMap<Field, FieldValue>,
}

impl Row {
    /// Build a row; canonical fields of `kind` absent from `fields` are filled
    /// with `Unknown`, and non-canonical fields are dropped.
    pub fn new(ordinal: usize, kind: EntityKind, mut fields: BTreeMap<Field, FieldValue>) -> Self {
        let fields = kind
            .canonical_fields()
            .iter()
            .map(|field| (*field, fields.remove(field).unwrap_or(FieldValue::Unknown)))
            .collect();
        Self {
            ordinal,
            kind,
            fields,
        }
    }

    pub fn get(&self, field: Field) -> &FieldValue {
        self.fields.get(&field).unwrap_or(&FieldValue::Unknown)
    }

    #[cfg(test)]
    pub fn has_field(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    /// 1-based label shown in the index column, e.g. `3.`.
    pub fn index_label(&self) -> String {
        index_label(self.ordinal)
    }
}

pub fn index_label(ordinal: usize) -> String {
    format!("{}.", ordinal + 1)
}

/// Outcome of one interactive selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectionResult {
    Chosen(usize),
    Cancelled,
}

/// What the download backend needs to fetch the chosen entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionableReference {
    pub kind: EntityKind,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Value>,
}

impl fmt::Display for ActionableReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.url {
            Some(url) => f.write_str(url),
            None => write!(f, "{}:{}", self.kind, self.id),
        }
    }
}

/// Final outcome handed back to the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    Reference(ActionableReference),
    Cancelled,
}
