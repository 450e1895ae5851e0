//! Tests for workbook and authority loading from CSV sources.

use std::fs;
use std::path::{Path, PathBuf};

use gather_ingest::{
    AuthoritySource, IngestError, Workbook, WorkbookFormat, load_lookup_table,
};
use gather_model::{CellValue, LookupId};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn csv_folder_lists_sheets_by_file_name() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "IOR_L_PS_5_271.csv", "h\nv\n");
    write(dir.path(), "IOR_L_PS_5_270.csv", "h\nv\nw\n");
    write(dir.path(), "readme.txt", "ignored");

    let mut workbook = Workbook::open(dir.path()).expect("open folder");
    assert_eq!(workbook.format(), WorkbookFormat::CsvDirectory);
    assert_eq!(
        workbook.sheet_names(),
        vec!["IOR_L_PS_5_270", "IOR_L_PS_5_271"]
    );

    let sheet = workbook.load_sheet("IOR_L_PS_5_270").expect("load sheet");
    assert_eq!(sheet.name, "IOR_L_PS_5_270");
    assert_eq!(sheet.data_row_count(), 2);
    assert_eq!(sheet.rows[2].cell(0), &CellValue::text("w"));
}

#[test]
fn unknown_sheet_is_reported_by_name() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "one.csv", "h\n");
    let mut workbook = Workbook::open(dir.path()).unwrap();

    let err = workbook.load_sheet("two").unwrap_err();
    assert!(matches!(err, IngestError::SheetNotFound { ref sheet, .. } if sheet == "two"));
}

#[test]
fn folder_without_csv_files_is_empty() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "notes.txt", "");
    assert!(matches!(
        Workbook::open(dir.path()),
        Err(IngestError::EmptyWorkbook { .. })
    ));
}

#[test]
fn authority_csv_is_indexed_case_insensitively() {
    let dir = TempDir::new().unwrap();
    let mut contents = String::new();
    let pad = ",".repeat(17);
    contents.push_str(&format!("Name{pad},Identifier\n"));
    contents.push_str(&format!("Jane Doe{pad},co1\n"));
    contents.push_str(&format!("{pad},orphan\n"));
    contents.push_str(&format!("JANE DOE{pad},co2\n"));
    let path = write(dir.path(), "authorities.csv", &contents);

    let table = load_lookup_table(&path, &AuthoritySource::default()).expect("load table");
    // header row takes part, the blank-name row does not
    assert_eq!(table.len(), 3);
    assert_eq!(table.find("jane doe"), LookupId::Found("co1".to_string()));
    assert_eq!(table.find(" Jane Doe "), LookupId::Found("co1".to_string()));
    assert_eq!(table.find("Nobody"), LookupId::NotFound);
    assert_eq!(table.duplicate_names(), vec!["jane doe".to_string()]);
}

#[test]
fn authority_columns_are_configurable() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "auth.csv", "id,name\nP1,Smith\n");
    let source = AuthoritySource {
        sheet: "ignored for csv".to_string(),
        key_column: 1,
        identifier_column: 0,
    };
    let table = load_lookup_table(&path, &source).unwrap();
    assert_eq!(table.find("smith"), LookupId::Found("P1".to_string()));
}

#[test]
fn missing_authority_workbook_fails() {
    let dir = TempDir::new().unwrap();
    let result = load_lookup_table(&dir.path().join("missing.xlsx"), &AuthoritySource::default());
    assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
}
