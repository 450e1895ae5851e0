//! Record-to-document mapping engine.
//!
//! Reads catalogue rows under a [`FieldLayout`](gather_model::FieldLayout),
//! resolves controlled-access descriptors against an authority table and
//! assembles one archival description tree per worksheet.

pub mod builder;
pub mod error;
pub mod extract;
pub mod resolve;
pub mod segment;
pub mod session;

pub use builder::{
    BuildOptions, DocumentBuilder, ROOT_TAG, RecordProgress, SheetDocument, SheetStats,
    TIMESTAMP_FORMAT, UnresolvedEntity,
};
pub use error::{BuildError, Result};
pub use extract::{content, date_range, header_label, label, paragraphs};
pub use resolve::{
    Descriptor, ResolvedColumn, entity_element, parse_descriptors, resolve_all, resolve_column,
    resolve_descriptor,
};
pub use segment::{Segments, segment_cell, segment_text};
pub use session::SheetSession;
