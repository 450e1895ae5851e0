//! Authority lookup loading.

use std::path::Path;

use gather_model::LookupTable;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::workbook::Workbook;

/// Where authority names and identifiers live in the lookup workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthoritySource {
    /// Worksheet holding the table. Ignored for single CSV files.
    pub sheet: String,
    /// Column holding the authority name used as the lookup key.
    pub key_column: usize,
    /// Column holding the identifier written to `authfilenumber`.
    pub identifier_column: usize,
}

impl Default for AuthoritySource {
    fn default() -> Self {
        Self {
            sheet: "1".to_string(),
            key_column: 0,
            identifier_column: 18,
        }
    }
}

/// Load the authority table described by `source` from the workbook at
/// `path`. Called once per run.
pub fn load_lookup_table(path: &Path, source: &AuthoritySource) -> Result<LookupTable> {
    let mut workbook = Workbook::open(path)?;
    let sheet = workbook.load_sole_or_named(&source.sheet)?;
    let table = LookupTable::from_rows(&sheet.rows, source.key_column, source.identifier_column);

    let duplicates = table.duplicate_names();
    if !duplicates.is_empty() {
        warn!(
            count = duplicates.len(),
            first = %duplicates[0],
            "duplicate authority names; the first row wins"
        );
    }
    info!(
        path = %path.display(),
        sheet = %sheet.name,
        entries = table.len(),
        "authority table loaded"
    );
    Ok(table)
}
