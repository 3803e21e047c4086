use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Collapse whitespace and control characters into single spaces so a value
/// always renders on one table line.
pub fn sanitize_display(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() || ch.is_control() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }
    out
}

/// Terminal cells `text` occupies; wide CJK characters count as two.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Longest prefix of `text` that fits in `max_cells` terminal cells.
pub fn truncate_to_width(text: &str, max_cells: usize) -> &str {
    let mut used = 0;
    for (offset, ch) in text.char_indices() {
        let cells = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cells > max_cells {
            return &text[..offset];
        }
        used += cells;
    }
    text
}

/// Format whole seconds as `MM:SS`, or `H:MM:SS` from one hour up.
pub fn format_seconds(total: u64) -> String {
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

const COUNT_UNITS: [(f64, &str); 3] = [(1_000.0, "K"), (1_000_000.0, "M"), (1_000_000_000.0, "B")];

/// Compact human count: `999`, `12.3K`, `1.2M`.
pub fn compact_count(count: u64) -> String {
    if count < 1_000 {
        return count.to_string();
    }
    // Move up a unit when rounding would print four integer digits.
    let mut unit = 0;
    while unit + 1 < COUNT_UNITS.len()
        && (count as f64 / COUNT_UNITS[unit].0 * 10.0).round() >= 10_000.0
    {
        unit += 1;
    }
    let (scale, suffix) = COUNT_UNITS[unit];
    let rendered = format!("{:.1}", count as f64 / scale);
    let rendered = rendered.strip_suffix(".0").unwrap_or(&rendered);
    format!("{rendered}{suffix}")
}
