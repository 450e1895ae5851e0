//! EAD XML output for catalogue documents.
//!
//! Each worksheet document is written as one UTF-8 file with an XML
//! declaration. Elements are qualified with the `ead` prefix and the root
//! declares the EAD, XLink and XML Schema instance namespaces.

mod common;
mod ead_xml;

pub use common::{EAD_NS, EAD_PREFIX, XLINK_NS, XSI_NS, document_path};
pub use ead_xml::{XmlOptions, render_to_string, write_document, write_sheet_document};
