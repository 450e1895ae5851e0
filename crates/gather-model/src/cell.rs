//! Cell values and rows as read from a catalogue worksheet.

use std::fmt;

use chrono::NaiveDateTime;

/// Text written for a null cell when it is stringified into a label.
pub const NULL_LABEL: &str = "None";

/// A single typed spreadsheet cell.
///
/// `Empty` is the null cell. `Text(String::new())` is a cell that exists but
/// holds an empty string; the two are not interchangeable because only
/// non-null cells mint tokens.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Build a cell from raw text, treating an empty string as a present value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns true for the null cell.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns true when the cell carries no usable content.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(value) => value.is_empty(),
            _ => false,
        }
    }

    /// Borrow the text of a `Text` cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Stringify the cell, rendering the null cell as [`NULL_LABEL`].
    pub fn to_label(&self) -> String {
        match self {
            Self::Empty => NULL_LABEL.to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(value) => f.write_str(value),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => format_float(*value, f),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

// Spreadsheet engines store every number as a float; whole numbers such as
// years must still print as "1920".
fn format_float(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        write!(f, "{}", value as i64)
    } else {
        write!(f, "{value}")
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// One worksheet row, addressed by zero-based column position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<CellValue>,
}

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    /// Cell at `column`; columns past the end of the row read as null.
    pub fn cell(&self, column: usize) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.cells.get(column).unwrap_or(EMPTY)
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_blank)
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }
}

impl FromIterator<CellValue> for Row {
    fn from_iter<I: IntoIterator<Item = CellValue>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn whole_floats_print_as_integers() {
        assert_eq!(CellValue::Float(1920.0).to_string(), "1920");
        assert_eq!(CellValue::Float(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Int(-4).to_string(), "-4");
    }

    #[test]
    fn null_label_is_none() {
        assert_eq!(CellValue::Empty.to_label(), "None");
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::text("").to_label(), "");
    }

    #[test]
    fn booleans_and_datetimes_stringify() {
        assert_eq!(CellValue::Bool(true).to_string(), "True");
        let stamp = NaiveDate::from_ymd_opt(2024, 1, 11)
            .and_then(|date| date.and_hms_opt(10, 35, 56))
            .unwrap();
        assert_eq!(
            CellValue::DateTime(stamp).to_string(),
            "2024-01-11 10:35:56"
        );
    }

    #[test]
    fn empty_text_is_blank_but_not_null() {
        let cell = CellValue::text("");
        assert!(cell.is_blank());
        assert!(!cell.is_null());
        assert!(CellValue::Empty.is_null());
    }

    #[test]
    fn out_of_range_columns_read_as_null() {
        let row = Row::new(vec![CellValue::from("a")]);
        assert_eq!(row.cell(0), &CellValue::from("a"));
        assert!(row.cell(80).is_null());
    }
}
