//! Namespaces and filesystem helpers shared by the writers.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// EAD 2002 namespace.
pub const EAD_NS: &str = "urn:isbn:1-931666-22-9";

/// XLink namespace.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// XML Schema instance namespace.
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Default prefix bound to [`EAD_NS`].
pub const EAD_PREFIX: &str = "ead";

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}

/// Output path for a worksheet document: `<dir>/<stem>.xml`.
pub fn document_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{stem}.xml"))
}
