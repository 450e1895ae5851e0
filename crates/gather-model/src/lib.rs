//! Data model for turning catalogue worksheets into archival description
//! documents.

pub mod cell;
pub mod entity;
pub mod error;
pub mod layout;
pub mod lookup;
pub mod node;
pub mod token;
pub mod worksheet;

pub use cell::{CellValue, NULL_LABEL, Row};
pub use entity::{
    AUTHORITY_SOURCE, EntityCategory, LookupId, NOT_ALLOCATED, NOT_FOUND, ResolvedEntity,
};
pub use error::{ModelError, Result};
pub use layout::{EntityColumn, FieldLayout, LanguageBlock, NoteField};
pub use lookup::{LookupEntry, LookupTable, normalize_key};
pub use node::{DocumentNode, Element};
pub use token::{TOKEN_ATTRIBUTE, Token, normalize_shelfmark};
pub use worksheet::{HeaderRow, Worksheet};
