//! Workbook access: spreadsheet files and CSV folders behind one interface.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use calamine::{Reader, Sheets, open_workbook_auto};
use chrono::{DateTime, Local, NaiveDateTime};
use gather_model::{Row, Worksheet};
use tracing::{debug, info};

use crate::cells::{cell_from_field, rows_from_range, trim_trailing_blank_rows};
use crate::discovery::{WorkbookFormat, list_csv_files, sheet_name_for};
use crate::error::{IngestError, Result};

enum Backend {
    Spreadsheet(Sheets<BufReader<File>>),
    Csv(Vec<(String, PathBuf)>),
}

/// An opened workbook whose worksheets can be listed and loaded by name.
pub struct Workbook {
    path: PathBuf,
    format: WorkbookFormat,
    backend: Backend,
}

impl Workbook {
    /// Open the spreadsheet file, CSV file or CSV folder at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let format = WorkbookFormat::detect(path)?;
        let backend = match format {
            WorkbookFormat::Spreadsheet => {
                let sheets = open_workbook_auto(path).map_err(|e| IngestError::Spreadsheet {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Backend::Spreadsheet(sheets)
            }
            WorkbookFormat::CsvFile => {
                Backend::Csv(vec![(sheet_name_for(path), path.to_path_buf())])
            }
            WorkbookFormat::CsvDirectory => Backend::Csv(
                list_csv_files(path)?
                    .into_iter()
                    .map(|file| (sheet_name_for(&file), file))
                    .collect(),
            ),
        };
        let workbook = Self {
            path: path.to_path_buf(),
            format,
            backend,
        };
        if workbook.sheet_names().is_empty() {
            return Err(IngestError::EmptyWorkbook {
                path: path.to_path_buf(),
            });
        }
        info!(
            path = %path.display(),
            format = ?format,
            sheets = workbook.sheet_names().len(),
            "workbook opened"
        );
        Ok(workbook)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> WorkbookFormat {
        self.format
    }

    /// Worksheet names in workbook order (file-name order for CSV folders).
    pub fn sheet_names(&self) -> Vec<String> {
        match &self.backend {
            Backend::Spreadsheet(sheets) => sheets.sheet_names(),
            Backend::Csv(files) => files.iter().map(|(name, _)| name.clone()).collect(),
        }
    }

    /// Load the worksheet called `name`.
    pub fn load_sheet(&mut self, name: &str) -> Result<Worksheet> {
        let path = &self.path;
        let (rows, source) = match &mut self.backend {
            Backend::Spreadsheet(sheets) => {
                if !sheets.sheet_names().iter().any(|sheet| sheet == name) {
                    return Err(sheet_not_found(path, name));
                }
                let range = sheets
                    .worksheet_range(name)
                    .map_err(|e| IngestError::Spreadsheet {
                        path: path.clone(),
                        message: e.to_string(),
                    })?;
                (rows_from_range(&range), path.clone())
            }
            Backend::Csv(files) => {
                let Some((_, file)) = files.iter().find(|(sheet, _)| sheet == name) else {
                    return Err(sheet_not_found(path, name));
                };
                (read_csv_rows(file)?, file.clone())
            }
        };

        let mut sheet = Worksheet::new(name, rows);
        if let Some(modified) = modified_time(&source)? {
            sheet = sheet.with_modified(modified);
        }
        debug!(
            sheet = name,
            rows = sheet.rows.len(),
            modified = ?sheet.modified,
            "worksheet loaded"
        );
        Ok(sheet)
    }

    /// Load the only worksheet of a single-sheet workbook, or `name`
    /// otherwise.
    pub fn load_sole_or_named(&mut self, name: &str) -> Result<Worksheet> {
        if self.format == WorkbookFormat::CsvFile {
            let sole = sheet_name_for(&self.path);
            return self.load_sheet(&sole);
        }
        self.load_sheet(name)
    }
}

fn sheet_not_found(path: &Path, name: &str) -> IngestError {
    IngestError::SheetNotFound {
        sheet: name.to_string(),
        path: path.to_path_buf(),
    }
}

/// Read every record of a headerless, possibly ragged CSV file.
pub fn read_csv_rows(path: &Path) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        rows.push(record.iter().map(cell_from_field).collect::<Row>());
    }
    trim_trailing_blank_rows(&mut rows);
    Ok(rows)
}

/// Local modification time of `path`, if the platform reports one.
pub fn modified_time(path: &Path) -> Result<Option<NaiveDateTime>> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(metadata.modified().ok().map(local_timestamp))
}

fn local_timestamp(time: SystemTime) -> NaiveDateTime {
    DateTime::<Local>::from(time).naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gather_model::CellValue;
    use tempfile::TempDir;

    #[test]
    fn ragged_csv_rows_are_kept_as_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sheet.csv");
        std::fs::write(&path, "a,b,c\r\n1,,\"x\ny\"\n2\n,,\n").unwrap();

        let rows = read_csv_rows(&path).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].cell(1), &CellValue::Empty);
        assert_eq!(rows[1].cell(2), &CellValue::text("x\ny"));
        assert_eq!(rows[2].width(), 1);
    }

    #[test]
    fn sheet_modified_time_comes_from_the_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("one.csv"), "h\nv\n").unwrap();
        let mut workbook = Workbook::open(dir.path()).unwrap();
        let sheet = workbook.load_sheet("one").unwrap();
        assert!(sheet.modified.is_some());
        assert_eq!(sheet.data_row_count(), 1);
    }
}
