//! Errors that stop a single worksheet.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    /// The worksheet has no rows at all, so there is no header to read.
    #[error("worksheet '{sheet}' has no header row")]
    MissingHeader { sheet: String },
}

pub type Result<T> = std::result::Result<T, BuildError>;
