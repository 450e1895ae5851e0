//! Field extractors.
//!
//! Absent data is never an error here: a null or empty cell reads as an
//! empty string, and callers always get a value back.

use gather_model::{Element, FieldLayout, HeaderRow, Row};

use crate::session::SheetSession;

/// Cell text, or an empty string when the cell is null or empty.
pub fn content(row: &Row, column: usize) -> String {
    let cell = row.cell(column);
    if cell.is_blank() {
        String::new()
    } else {
        cell.to_string()
    }
}

/// Stringified cell wrapped under `label`, for use as an attribute.
///
/// Null cells stringify to `None`, matching what existing documents carry.
pub fn label(row: &Row, column: usize, label: &str) -> (String, String) {
    (label.to_string(), row.cell(column).to_label())
}

/// Header text of `column` wrapped under `label`.
pub fn header_label(header: &HeaderRow, column: usize, label: &str) -> (String, String) {
    (label.to_string(), header.label(column).to_string())
}

/// `"{start}-{end}"` when an end date is present, else the start alone.
///
/// A null start reads as an empty string, so an end without a start gives
/// `"-{end}"` and a row with neither gives `""`.
pub fn date_range(row: &Row, layout: &FieldLayout) -> String {
    let start = content(row, layout.date_start);
    let end = row.cell(layout.date_end);
    if end.is_blank() {
        start
    } else {
        format!("{start}-{end}")
    }
}

/// Split a cell into lines; `\r\n` endings lose their `\r`.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// One `<p>` per line of the cell, each with a fresh token.
///
/// An empty cell still yields a single empty paragraph so the enclosing
/// element keeps its shape; that paragraph has no token.
pub fn paragraphs(session: &mut SheetSession, row: &Row, column: usize) -> Vec<Element> {
    let text = content(row, column);
    if text.is_empty() {
        return vec![Element::new("p").with_text("")];
    }
    split_lines(&text)
        .into_iter()
        .map(|line| {
            Element::new("p")
                .with_text(line)
                .with_attrs(session.token_attr(row, column))
        })
        .collect()
}
