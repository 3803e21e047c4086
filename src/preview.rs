//! Summary card rendering for the highlighted row.
use crate::model::{EntityKind, Field, FieldValue, Row, UNKNOWN};

/// Render the preview card for `row`.
///
/// The card has one line per canonical field of `kind`, primary label first,
/// so its height never depends on which metadata is present.
pub fn render_preview(row: &Row, kind: EntityKind) -> String {
    debug_assert_eq!(row.kind, kind);
    let fields = kind.canonical_fields();
    let label_width = fields
        .iter()
        .map(|field| field.label().len() + 1)
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(fields.len());
    for field in fields {
        let mut value = preview_value(row.get(*field));
        if *field == kind.primary_field() && row.get(Field::Explicit).is_flag_set() {
            value.push_str(" [E]");
        }
        let label = format!("{}:", field.label());
        lines.push(format!("{label:<label_width$} {value}"));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn preview_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(text) => text.clone(),
        FieldValue::Flag(true) => "yes".to_string(),
        FieldValue::Flag(false) => "no".to_string(),
        FieldValue::Quality(quality) => quality.full_name().to_string(),
        FieldValue::Unknown => UNKNOWN.to_string(),
    }
}
