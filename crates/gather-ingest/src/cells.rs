//! Conversion of raw spreadsheet and CSV values into worksheet rows.

use calamine::{Data, Range};
use gather_model::{CellValue, Row};

/// Convert one spreadsheet cell.
///
/// Dates become timestamps when they can be interpreted; otherwise the
/// serial number is kept. Error cells keep their display text (`#N/A`).
pub fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(text) => CellValue::Text(text.clone()),
        Data::Int(value) => CellValue::Int(*value),
        Data::Float(value) => CellValue::Float(*value),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::DateTime(value) => value
            .as_datetime()
            .map_or_else(|| CellValue::Float(value.as_f64()), CellValue::DateTime),
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::Text(text.clone()),
        Data::Error(error) => CellValue::Text(error.to_string()),
    }
}

/// Convert one CSV field. CSV carries no types, so anything non-empty is text.
pub fn cell_from_field(field: &str) -> CellValue {
    if field.is_empty() {
        CellValue::Empty
    } else {
        CellValue::text(field)
    }
}

/// Rows of a spreadsheet range at their absolute positions.
///
/// A range starts at its first used cell, so leading empty rows and
/// columns are restored to keep column indices aligned with the template.
pub fn rows_from_range(range: &Range<Data>) -> Vec<Row> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };
    let lead = start_col as usize;
    let mut rows: Vec<Row> = (0..start_row).map(|_| Row::default()).collect();
    rows.extend(range.rows().map(|cells| {
        std::iter::repeat_n(CellValue::Empty, lead)
            .chain(cells.iter().map(cell_from_data))
            .collect::<Row>()
    }));
    trim_trailing_blank_rows(&mut rows);
    rows
}

/// Drop blank rows after the last populated one. Blank rows in the middle
/// of a sheet are kept so row order stays intact.
pub fn trim_trailing_blank_rows(rows: &mut Vec<Row>) {
    while rows.last().is_some_and(Row::is_blank) {
        rows.pop();
    }
}
