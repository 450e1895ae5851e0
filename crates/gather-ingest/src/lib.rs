//! Catalogue workbook ingestion.
//!
//! This crate opens the catalogue workbook and the authority workbook and
//! hands their worksheets to the document builder as [`gather_model::Worksheet`]s.
//!
//! # Features
//!
//! - **Spreadsheets**: `.xlsx`, `.xlsm`, `.xlsb`, `.xls` and `.ods` through `calamine`
//! - **CSV**: a single file, or a folder with one worksheet per file
//! - **Authorities**: the lookup table, loaded once per run
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use gather_ingest::{AuthoritySource, Workbook, load_lookup_table};
//!
//! let table = load_lookup_table(Path::new("Authorities_combined.xlsx"), &AuthoritySource::default())?;
//! let mut workbook = Workbook::open(Path::new("gather.xlsx"))?;
//! for name in workbook.sheet_names() {
//!     let sheet = workbook.load_sheet(&name)?;
//! }
//! ```

mod authorities;
mod cells;
mod discovery;
mod error;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Workbooks ===
pub use discovery::{WorkbookFormat, list_csv_files, sheet_name_for};
pub use workbook::{Workbook, modified_time, read_csv_rows};

// === Cell Conversion ===
pub use cells::{cell_from_data, cell_from_field, rows_from_range};

// === Authorities ===
pub use authorities::{AuthoritySource, load_lookup_table};
