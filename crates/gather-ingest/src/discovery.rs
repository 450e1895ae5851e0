//! Workbook format detection and CSV folder discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// How a workbook path is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    /// A spreadsheet file; every tab is a worksheet.
    Spreadsheet,
    /// A single CSV file; the file is the only worksheet.
    CsvFile,
    /// A folder of CSV files, one worksheet per file.
    CsvDirectory,
}

impl WorkbookFormat {
    /// Detect the format of `path` from its kind and extension.
    pub fn detect(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(IngestError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        if path.is_dir() {
            return Ok(Self::CsvDirectory);
        }
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        if extension.eq_ignore_ascii_case("csv") {
            Ok(Self::CsvFile)
        } else if SPREADSHEET_EXTENSIONS
            .iter()
            .any(|known| extension.eq_ignore_ascii_case(known))
        {
            Ok(Self::Spreadsheet)
        } else {
            Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: extension.to_string(),
            })
        }
    }
}

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::FileNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Worksheet name for a CSV file: its file stem.
pub fn sheet_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn detects_formats_by_extension() {
        let dir = TempDir::new().unwrap();
        let xlsx = dir.path().join("gather.XLSX");
        let csv = dir.path().join("sheet.csv");
        let txt = dir.path().join("notes.txt");
        for path in [&xlsx, &csv, &txt] {
            std::fs::write(path, "").unwrap();
        }

        assert_eq!(WorkbookFormat::detect(&xlsx).unwrap(), WorkbookFormat::Spreadsheet);
        assert_eq!(WorkbookFormat::detect(&csv).unwrap(), WorkbookFormat::CsvFile);
        assert_eq!(
            WorkbookFormat::detect(dir.path()).unwrap(),
            WorkbookFormat::CsvDirectory
        );
        assert!(matches!(
            WorkbookFormat::detect(&txt),
            Err(IngestError::UnsupportedFormat { extension, .. }) if extension == "txt"
        ));
        assert!(matches!(
            WorkbookFormat::detect(&dir.path().join("missing.xlsx")),
            Err(IngestError::FileNotFound { .. })
        ));
    }

    #[test]
    fn csv_files_are_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        for name in ["b.csv", "A.CSV", "notes.txt"] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let names: Vec<String> = list_csv_files(dir.path())
            .unwrap()
            .iter()
            .map(|path| sheet_name_for(path))
            .collect();
        assert_eq!(names, vec!["A", "b"]);
    }
}
