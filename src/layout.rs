//! Column layout policy and table formatting per entity kind.
//!
//! Layouts are static. Each one fits [`TERMINAL_BUDGET`] columns including
//! one separator space between adjacent columns, and every rendered line of a
//! table has the same width so the chooser shows aligned columns.
use crate::model::{EntityKind, Field, FieldValue, Row, UNKNOWN};
use crate::util::{display_width, truncate_to_width};

pub const TERMINAL_BUDGET: usize = 80;
pub const TRUNCATION_MARKER: char = '…';
/// Fits labels up to `99999.`.
const INDEX_WIDTH: usize = 6;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColumnSource {
    Index,
    Field(Field),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WidthPolicy {
    Fixed(usize),
    /// Padded to `max`; longer text is truncated with a marker.
    Flexible { max: usize },
}

impl WidthPolicy {
    pub fn width(self) -> usize {
        match self {
            WidthPolicy::Fixed(width) => width,
            WidthPolicy::Flexible { max } => max,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColumnSpec {
    pub source: ColumnSource,
    pub header: &'static str,
    pub width: WidthPolicy,
    pub align: Alignment,
}

const fn index() -> ColumnSpec {
    ColumnSpec {
        source: ColumnSource::Index,
        header: "#",
        width: WidthPolicy::Fixed(INDEX_WIDTH),
        align: Alignment::Left,
    }
}

const fn flexible(field: Field, header: &'static str, max: usize) -> ColumnSpec {
    ColumnSpec {
        source: ColumnSource::Field(field),
        header,
        width: WidthPolicy::Flexible { max },
        align: Alignment::Left,
    }
}

const fn fixed(field: Field, header: &'static str, width: usize, align: Alignment) -> ColumnSpec {
    ColumnSpec {
        source: ColumnSource::Field(field),
        header,
        width: WidthPolicy::Fixed(width),
        align,
    }
}

const TRACK_COLUMNS: [ColumnSpec; 8] = [
    index(),
    flexible(Field::Title, "TRACK", 22),
    flexible(Field::Artist, "ARTIST", 16),
    flexible(Field::Album, "ALBUM", 12),
    fixed(Field::Year, "YEAR", 4, Alignment::Left),
    fixed(Field::Duration, "LENGTH", 8, Alignment::Right),
    fixed(Field::Explicit, "E", 1, Alignment::Left),
    fixed(Field::Quality, "QUAL", 4, Alignment::Left),
];

const ALBUM_COLUMNS: [ColumnSpec; 6] = [
    index(),
    flexible(Field::Title, "ALBUM", 30),
    flexible(Field::Artist, "ARTIST", 22),
    fixed(Field::Year, "YEAR", 4, Alignment::Left),
    fixed(Field::TrackCount, "TRKS", 5, Alignment::Right),
    fixed(Field::Quality, "QUAL", 4, Alignment::Left),
];

const ARTIST_COLUMNS: [ColumnSpec; 4] = [
    index(),
    flexible(Field::Name, "ARTIST", 40),
    fixed(Field::Popularity, "FOLLOWERS", 16, Alignment::Right),
    flexible(Field::Genre, "GENRE", 14),
];

const PLAYLIST_COLUMNS: [ColumnSpec; 5] = [
    index(),
    flexible(Field::Title, "PLAYLIST", 36),
    flexible(Field::Owner, "OWNER", 20),
    fixed(Field::TrackCount, "TRKS", 5, Alignment::Right),
    fixed(Field::TotalDuration, "LENGTH", 8, Alignment::Right),
];

/// Column layout for `kind`.
pub fn columns_for(kind: EntityKind) -> &'static [ColumnSpec] {
    match kind {
        EntityKind::Track => &TRACK_COLUMNS,
        EntityKind::Album => &ALBUM_COLUMNS,
        EntityKind::Artist => &ARTIST_COLUMNS,
        EntityKind::Playlist => &PLAYLIST_COLUMNS,
    }
}

/// Full line width of a layout, separators included.
pub fn table_width(columns: &[ColumnSpec]) -> usize {
    let widths: usize = columns.iter().map(|column| column.width.width()).sum();
    widths + columns.len().saturating_sub(1)
}

/// Shorten `text` to at most `max` terminal cells, ending in the marker.
///
/// Cuts at the last word boundary that leaves room for the marker, or hard
/// cuts when the text has no usable boundary.
pub fn truncate(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let head = truncate_to_width(text, max - 1);
    let cut = if text[head.len()..].starts_with(char::is_whitespace) {
        head.trim_end()
    } else {
        match head.rfind(char::is_whitespace) {
            Some(boundary) if !head[..boundary].trim_end().is_empty() => head[..boundary].trim_end(),
            _ => head,
        }
    };
    let mut out = cut.to_string();
    out.push(TRUNCATION_MARKER);
    out
}

/// Pad to `width` cells; `format!` width counts chars, not cells.
fn pad(text: &str, width: usize, align: Alignment) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(text)));
    match align {
        Alignment::Left => format!("{text}{fill}"),
        Alignment::Right => format!("{fill}{text}"),
    }
}

fn fit(text: &str, column: &ColumnSpec) -> String {
    let width = column.width.width();
    // The index token is the selection join key and is never cut.
    if column.source == ColumnSource::Index {
        return pad(text, width, column.align);
    }
    pad(&truncate(text, width), width, column.align)
}

/// Raw cell text for one column of `row`, before padding.
pub fn cell_text(row: &Row, source: ColumnSource) -> String {
    let field = match source {
        ColumnSource::Index => return row.index_label(),
        ColumnSource::Field(field) => field,
    };
    match row.get(field) {
        FieldValue::Text(text) => text.clone(),
        FieldValue::Flag(true) => "E".to_string(),
        FieldValue::Flag(false) => String::new(),
        FieldValue::Quality(quality) => quality.code().to_string(),
        FieldValue::Unknown if field == Field::Explicit => String::new(),
        FieldValue::Unknown => UNKNOWN.to_string(),
    }
}

/// Formatted chooser input: one header line plus one line per row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    pub header: String,
    pub lines: Vec<String>,
}

impl Table {
    /// Newline-delimited text, header first.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.lines.len() + 1) * TERMINAL_BUDGET);
        out.push_str(&self.header);
        out.push('\n');
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

fn join_cells(cells: Vec<String>) -> String {
    cells.join(" ").trim_end().to_string()
}

pub fn format_header(columns: &[ColumnSpec]) -> String {
    join_cells(
        columns
            .iter()
            .map(|column| fit(column.header, column))
            .collect(),
    )
}

pub fn format_row(row: &Row, columns: &[ColumnSpec]) -> String {
    join_cells(
        columns
            .iter()
            .map(|column| fit(&cell_text(row, column.source), column))
            .collect(),
    )
}

pub fn format_table(rows: &[Row], columns: &[ColumnSpec]) -> Table {
    debug_assert!(table_width(columns) <= TERMINAL_BUDGET);
    Table {
        header: format_header(columns),
        lines: rows.iter().map(|row| format_row(row, columns)).collect(),
    }
}
