//! EAD XML output generation.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gather_core::SheetDocument;
use gather_model::{DocumentNode, Element};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::{info, warn};

use crate::common::{EAD_NS, EAD_PREFIX, XLINK_NS, XSI_NS, document_path, ensure_parent_dir};

/// Options for EAD serialization.
#[derive(Debug, Clone)]
pub struct XmlOptions {
    /// Spaces per nesting level; `None` writes everything on one line.
    pub indent: Option<usize>,
    /// Prefix qualifying every element. `None` declares EAD as the default
    /// namespace instead.
    pub prefix: Option<String>,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            indent: Some(2),
            prefix: Some(EAD_PREFIX.to_string()),
        }
    }
}

impl XmlOptions {
    /// Single-line output with the default prefix.
    pub fn compact() -> Self {
        Self {
            indent: None,
            ..Self::default()
        }
    }

    fn qualify(&self, tag: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{tag}"),
            None => tag.to_string(),
        }
    }
}

/// Write `root` as a complete XML document.
pub fn write_document<W: Write>(writer: W, root: &Element, options: &XmlOptions) -> Result<()> {
    let mut xml = match options.indent {
        Some(width) => Writer::new_with_indent(writer, b' ', width),
        None => Writer::new(writer),
    };
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let name = options.qualify(root.tag());
    let mut start = BytesStart::new(name.as_str());
    let ns_attr = options
        .prefix
        .as_ref()
        .map_or_else(|| "xmlns".to_string(), |prefix| format!("xmlns:{prefix}"));
    start.push_attribute((ns_attr.as_str(), EAD_NS));
    start.push_attribute(("xmlns:xlink", XLINK_NS));
    start.push_attribute(("xmlns:xsi", XSI_NS));
    write_body(&mut xml, start, &name, root, options)
}

fn write_element<W: Write>(xml: &mut Writer<W>, element: &Element, options: &XmlOptions) -> Result<()> {
    let name = options.qualify(element.tag());
    let start = BytesStart::new(name.as_str());
    write_body(xml, start, &name, element, options)
}

fn write_body<W: Write>(
    xml: &mut Writer<W>,
    mut start: BytesStart<'_>,
    name: &str,
    element: &Element,
    options: &XmlOptions,
) -> Result<()> {
    for (key, value) in element.attributes() {
        let value = xml_safe(value);
        start.push_attribute((key.as_str(), value.as_ref()));
    }
    if element.text().is_none() && element.children().is_empty() {
        xml.write_event(Event::Empty(start))?;
        return Ok(());
    }

    xml.write_event(Event::Start(start))?;
    // Even empty text is written so the end tag stays on the same line.
    if let Some(text) = element.text() {
        let text = xml_safe(text);
        xml.write_event(Event::Text(BytesText::new(text.as_ref())))?;
    }
    for child in element.children() {
        match child {
            DocumentNode::Element(inner) => write_element(xml, inner, options)?,
            DocumentNode::Comment(text) => {
                let text = comment_safe(&xml_safe(text));
                xml.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))?;
            }
        }
    }
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..
    )
}

/// Drop characters XML 1.0 cannot carry, such as vertical tabs pasted
/// into spreadsheet cells.
fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        return Cow::Borrowed(text);
    }
    let safe: String = text.chars().filter(|&c| is_xml_char(c)).collect();
    warn!(
        dropped = text.chars().count() - safe.chars().count(),
        text = %safe,
        "dropped characters not allowed in XML"
    );
    Cow::Owned(safe)
}

/// `--` may not appear inside a comment.
fn comment_safe(text: &str) -> String {
    let mut safe = text.replace("--", "- -");
    if safe.ends_with('-') {
        safe.push(' ');
    }
    safe
}

/// Serialize `root` to a string.
pub fn render_to_string(root: &Element, options: &XmlOptions) -> Result<String> {
    let mut buffer = Vec::new();
    write_document(&mut buffer, root, options)?;
    String::from_utf8(buffer).context("serialized document is not UTF-8")
}

/// Write one worksheet document to `<output_dir>/<sheet>.xml`.
pub fn write_sheet_document(
    output_dir: &Path,
    document: &SheetDocument,
    options: &XmlOptions,
) -> Result<PathBuf> {
    let path = document_path(output_dir, document.file_stem());
    ensure_parent_dir(&path)?;
    let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_document(&mut writer, &document.root, options)
        .with_context(|| format!("write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    info!(
        sheet = %document.sheet_name,
        path = %path.display(),
        records = document.records,
        "document written"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_never_contain_double_hyphens() {
        assert_eq!(comment_safe("a--b"), "a- -b");
        assert_eq!(comment_safe("ends-"), "ends- ");
        assert_eq!(comment_safe("IOR/L/PS/5/270"), "IOR/L/PS/5/270");
    }

    #[test]
    fn control_characters_are_dropped() {
        assert_eq!(xml_safe("a\u{0B}b\u{1}c\u{FFFE}"), "abc");
        assert!(matches!(xml_safe("tab\tand\r\nnewline é 𝄞"), Cow::Borrowed(_)));
    }

    #[test]
    fn unprefixed_output_declares_default_namespace() {
        let options = XmlOptions {
            indent: None,
            prefix: None,
        };
        let xml = render_to_string(&Element::new("ead"), &options).unwrap();
        assert!(xml.contains(r#"<ead xmlns="urn:isbn:1-931666-22-9""#));
        assert!(xml.ends_with("/>"));
    }
}
