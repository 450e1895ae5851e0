//! Worksheet abstraction handed to the document builder.

use chrono::NaiveDateTime;

use crate::cell::{CellValue, Row};

/// One tab of a catalogue workbook.
///
/// Row 0 is the header row; every following row describes one item.
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    pub name: String,
    pub rows: Vec<Row>,
    /// Modification time of the workbook that contains this sheet.
    pub modified: Option<NaiveDateTime>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
            modified: None,
        }
    }

    #[must_use]
    pub fn with_modified(mut self, modified: NaiveDateTime) -> Self {
        self.modified = Some(modified);
        self
    }

    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Data rows, skipping the header row.
    pub fn data_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().skip(1)
    }

    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}

/// Header row values surfaced as human-readable column names.
#[derive(Debug, Clone, Default)]
pub struct HeaderRow {
    labels: Vec<String>,
}

impl HeaderRow {
    pub fn from_row(row: &Row) -> Self {
        Self {
            labels: row.cells().iter().map(CellValue::to_string).collect(),
        }
    }

    /// Header text for `column`, empty when the column has no header.
    pub fn label(&self, column: usize) -> &str {
        self.labels.get(column).map_or("", String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_excluded_from_data_rows() {
        let sheet = Worksheet::new(
            "IOR_L_PS_5",
            vec![
                Row::new(vec![CellValue::from("Repository")]),
                Row::new(vec![CellValue::from("British Library")]),
                Row::new(vec![CellValue::from("British Library")]),
            ],
        );
        assert_eq!(sheet.data_row_count(), 2);
        assert_eq!(sheet.data_rows().count(), 2);
        assert_eq!(
            sheet.header().map(|row| row.cell(0).to_string()),
            Some("Repository".to_string())
        );
    }

    #[test]
    fn empty_sheet_has_no_data_rows() {
        let sheet = Worksheet::new("empty", Vec::new());
        assert_eq!(sheet.data_row_count(), 0);
        assert!(sheet.header().is_none());
    }

    #[test]
    fn header_labels_default_to_empty() {
        let header = HeaderRow::from_row(&Row::new(vec![
            CellValue::from("Repository"),
            CellValue::Empty,
        ]));
        assert_eq!(header.label(0), "Repository");
        assert_eq!(header.label(1), "");
        assert_eq!(header.label(9), "");
    }
}
