//! Document builder: one archival description document per worksheet.
//!
//! Every data row becomes a record made of an `eadheader` subtree and an
//! `archdesc` subtree. Both are appended to the worksheet root as siblings,
//! preceded by a comment naming the record's shelfmark, in row order.

use std::time::Instant;

use chrono::NaiveDateTime;
use gather_model::{
    AUTHORITY_SOURCE, DocumentNode, Element, EntityCategory, FieldLayout, HeaderRow,
    LanguageBlock, LookupTable, Row, Worksheet,
};
use tracing::{debug, info, info_span, warn};

use crate::error::{BuildError, Result};
use crate::extract::{content, date_range, header_label, label, paragraphs};
use crate::resolve::resolve_column;
use crate::segment::segment_cell;
use crate::session::SheetSession;

/// Timestamp format used for the creation dates in the header.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Root element of every output document.
pub const ROOT_TAG: &str = "ead";

/// Options shared by every worksheet of a run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Export time written into every record header.
    pub exported_at: NaiveDateTime,
    /// Emit a `New record starts here` comment before each record.
    pub record_comments: bool,
}

impl BuildOptions {
    pub fn new(exported_at: NaiveDateTime) -> Self {
        Self {
            exported_at,
            record_comments: true,
        }
    }

    #[must_use]
    pub fn with_record_comments(mut self, enable: bool) -> Self {
        self.record_comments = enable;
        self
    }
}

/// An entity whose name has no authority record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedEntity {
    pub shelfmark: String,
    pub category: EntityCategory,
    pub subject: String,
    /// Role as written, or `not_allocated`.
    pub role: String,
    /// Variant label as written, or `not_allocated`.
    pub variant: String,
}

/// Counters collected while building one worksheet.
#[derive(Debug, Clone, Default)]
pub struct SheetStats {
    pub tokens: u64,
    pub entities: usize,
    pub unresolved: Vec<UnresolvedEntity>,
}

/// The finished tree for one worksheet.
#[derive(Debug, Clone)]
pub struct SheetDocument {
    pub sheet_name: String,
    pub root: Element,
    pub records: usize,
    pub stats: SheetStats,
}

impl SheetDocument {
    /// Base name for the output file.
    pub fn file_stem(&self) -> &str {
        &self.sheet_name
    }
}

/// Progress notification emitted once per record.
#[derive(Debug, Clone, Copy)]
pub struct RecordProgress<'a> {
    pub record: usize,
    pub total: usize,
    pub shelfmark: &'a str,
}

/// Builds worksheet documents from a field layout and an authority table.
#[derive(Debug, Clone)]
pub struct DocumentBuilder<'a> {
    layout: &'a FieldLayout,
    authorities: &'a LookupTable,
    options: BuildOptions,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(layout: &'a FieldLayout, authorities: &'a LookupTable, options: BuildOptions) -> Self {
        Self {
            layout,
            authorities,
            options,
        }
    }

    pub fn build_sheet(&self, sheet: &Worksheet) -> Result<SheetDocument> {
        self.build_sheet_with_progress(sheet, |_| {})
    }

    /// Build the document for `sheet`, reporting each record as it is done.
    ///
    /// A worksheet without a header row is rejected; anything wrong inside a
    /// row degrades to empty values and never stops the worksheet.
    pub fn build_sheet_with_progress<F>(
        &self,
        sheet: &Worksheet,
        mut on_record: F,
    ) -> Result<SheetDocument>
    where
        F: FnMut(RecordProgress<'_>),
    {
        let span = info_span!("sheet", sheet = %sheet.name);
        let _guard = span.enter();
        let start = Instant::now();

        let header = sheet
            .header()
            .map(HeaderRow::from_row)
            .ok_or_else(|| BuildError::MissingHeader {
                sheet: sheet.name.clone(),
            })?;
        let modified = sheet
            .modified
            .map(|stamp| stamp.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default();
        let total = sheet.data_row_count();

        let mut session = SheetSession::new(self.layout.shelfmark);
        let mut stats = SheetStats::default();
        let mut root = Element::new(ROOT_TAG);

        for row in sheet.data_rows() {
            let record = self.build_record(&mut session, &header, row, &modified, &mut stats);
            debug!(
                record = record.number,
                shelfmark = %record.shelfmark,
                "record built"
            );
            on_record(RecordProgress {
                record: record.number,
                total,
                shelfmark: &record.shelfmark,
            });
            if self.options.record_comments {
                root.push(DocumentNode::comment(format!(
                    "New record starts here {}",
                    record.shelfmark
                )));
            }
            root.push(record.header);
            root.push(record.body);
        }

        stats.tokens = session.tokens_minted();
        let records = session.records_started();
        info!(
            records,
            tokens = stats.tokens,
            entities = stats.entities,
            unresolved = stats.unresolved.len(),
            duration_ms = start.elapsed().as_millis(),
            "sheet complete"
        );

        Ok(SheetDocument {
            sheet_name: sheet.name.clone(),
            root,
            records,
            stats,
        })
    }

    fn build_record(
        &self,
        session: &mut SheetSession,
        header: &HeaderRow,
        row: &Row,
        modified: &str,
        stats: &mut SheetStats,
    ) -> Record {
        let number = session.start_record(row);
        let shelfmark = content(row, self.layout.shelfmark);
        let eadheader = self.build_header(session, row, number, &shelfmark, modified);
        let archdesc = self.build_description(session, header, row, &shelfmark, stats);
        Record {
            number,
            shelfmark,
            header: eadheader,
            body: archdesc,
        }
    }

    fn build_header(
        &self,
        session: &mut SheetSession,
        row: &Row,
        number: usize,
        shelfmark: &str,
        modified: &str,
    ) -> Element {
        let layout = self.layout;
        let eadid = Element::new("eadid")
            .with_text(shelfmark)
            .with_attrs(session.token_attr(row, layout.shelfmark));
        let filedesc = Element::new("filedesc")
            .with_child(Element::new("titlestmt").with_child(Element::new("titleproper")));

        let exported = Element::new("date")
            .with_text(self.options.exported_at.format(TIMESTAMP_FORMAT).to_string())
            .with_attr("type", "exported")
            .with_attrs(session.token_attr(row, layout.shelfmark));
        let modified = Element::new("date")
            .with_text(modified)
            .with_attr("type", "modified")
            .with_attrs(session.token_attr(row, layout.shelfmark));
        let creation = Element::new("creation")
            .with_child(exported)
            .with_child(modified);

        let (langcode_name, langcode) = label(row, layout.description_language_code, "langcode");
        let (scriptcode_name, scriptcode) =
            label(row, layout.description_script_code, "scriptcode");
        let language = Element::new("language")
            .with_text(content(row, layout.description_language))
            .with_attr(langcode_name, langcode)
            .with_attr(scriptcode_name, scriptcode)
            .with_attrs(session.token_attr(row, layout.material_languages.values));
        let profiledesc = Element::new("profiledesc")
            .with_child(creation)
            .with_child(Element::new("langusage").with_child(language));

        Element::new("eadheader")
            .with_attr("StartRecord", number.to_string())
            .with_child(eadid)
            .with_child(filedesc)
            .with_child(profiledesc)
    }

    fn build_description(
        &self,
        session: &mut SheetSession,
        header: &HeaderRow,
        row: &Row,
        shelfmark: &str,
        stats: &mut SheetStats,
    ) -> Element {
        let layout = self.layout;
        let (level_name, level) = label(row, layout.level, "level");
        let mut archdesc = Element::new("archdesc").with_attr(level_name, level);

        archdesc.push(self.build_did(session, header, row, shelfmark));

        archdesc.push(
            Element::new("accessrestrict").with_children(paragraphs(
                session,
                row,
                layout.access_restriction,
            )),
        );
        let legalstatus = Element::new("legalstatus")
            .with_text(content(row, layout.legal_status))
            .with_attrs(session.token_attr(row, layout.legal_status));
        archdesc.push(Element::new("accessrestrict").with_child(legalstatus));

        for (tag, column) in [
            ("accruals", layout.accruals),
            ("bioghist", layout.biographical_history),
            ("appraisal", layout.appraisal),
            ("arrangement", layout.arrangement),
            ("phystech", layout.physical_characteristics),
            ("scopecontent", layout.scope_content),
        ] {
            archdesc.push(Element::new(tag).with_children(segment_cell(session, row, column)));
        }
        for (tag, column) in [
            ("userestrict", layout.use_restriction),
            ("odd", layout.general_note),
        ] {
            archdesc.push(Element::new(tag).with_children(paragraphs(session, row, column)));
        }

        archdesc.push(self.build_controlaccess(session, header, row, shelfmark, stats));
        archdesc
    }

    fn build_did(
        &self,
        session: &mut SheetSession,
        header: &HeaderRow,
        row: &Row,
        shelfmark: &str,
    ) -> Element {
        let layout = self.layout;
        let mut did = Element::new("did");

        let repository = format!(
            "{}: {}",
            content(row, layout.repository),
            content(row, layout.repository_unit)
        );
        did.push(
            Element::new("repository")
                .with_text(repository)
                .with_attrs(session.token_attr(row, layout.repository)),
        );
        did.push(
            Element::new("unitid")
                .with_text(shelfmark)
                .with_attr("label", "IAMS_label_NA")
                .with_attr("identifier", "ark_identifier")
                .with_attrs(session.token_attr(row, layout.shelfmark)),
        );

        let (title_label, title_header) = header_label(header, layout.title, "label");
        let title = Element::new("title")
            .with_text(content(row, layout.title))
            .with_attrs(session.token_attr(row, layout.title));
        did.push(
            Element::new("unittitle")
                .with_attr(title_label, title_header)
                .with_child(title),
        );
        for column in [
            layout.former_external_reference,
            layout.former_internal_reference,
        ] {
            let (name, value) = header_label(header, column, "label");
            did.push(
                Element::new("unittitle")
                    .with_text(content(row, column))
                    .with_attr(name, value)
                    .with_attrs(session.token_attr(row, column)),
            );
        }

        did.push(
            Element::new("unitdate")
                .with_text(date_range(row, layout))
                .with_attr("datechar", "Creation")
                .with_attrs([
                    label(row, layout.calendar, "calendar"),
                    label(row, layout.era, "era"),
                    label(row, layout.date_normal, "normal"),
                ])
                .with_attrs(session.token_attr(row, layout.date_normal)),
        );

        for block in [&layout.material_languages, &layout.material_scripts] {
            did.push(self.build_langmaterial(session, row, block, shelfmark));
        }

        let extent = Element::new("extent")
            .with_text(content(row, layout.extent))
            .with_attrs(session.token_attr(row, layout.extent));
        did.push(Element::new("physdesc").with_child(extent));
        did
    }

    /// One `language` per `|`-separated value, paired positionally with the
    /// code column. Unpaired values or codes are dropped.
    fn build_langmaterial(
        &self,
        session: &mut SheetSession,
        row: &Row,
        block: &LanguageBlock,
        shelfmark: &str,
    ) -> Element {
        let mut langmaterial = Element::new("langmaterial");
        let values = content(row, block.values);
        if values.is_empty() {
            return langmaterial;
        }
        let codes = content(row, block.codes);
        let values: Vec<&str> = values.split('|').collect();
        let codes: Vec<&str> = codes.split('|').collect();
        if values.len() != codes.len() {
            warn!(
                shelfmark,
                column = block.values,
                values = values.len(),
                codes = codes.len(),
                "language values and codes differ in count"
            );
        }
        for (value, code) in values.iter().zip(codes.iter()) {
            langmaterial.push(
                Element::new("language")
                    .with_text(*value)
                    .with_attr(block.code_attribute.as_str(), *code)
                    .with_attrs(session.token_attr(row, block.codes)),
            );
        }
        langmaterial
    }

    fn build_controlaccess(
        &self,
        session: &mut SheetSession,
        header: &HeaderRow,
        row: &Row,
        shelfmark: &str,
        stats: &mut SheetStats,
    ) -> Element {
        let layout = self.layout;
        let mut controlaccess = Element::new("controlaccess");
        controlaccess.push(
            Element::new("genreform")
                .with_text(content(row, layout.genre_form))
                .with_attr("source", AUTHORITY_SOURCE)
                .with_attrs(session.token_attr(row, layout.genre_form)),
        );

        debug!(shelfmark, "resolving authorities");
        for entry in &layout.controlled_access {
            let resolved =
                resolve_column(session, row, entry.column, entry.category, self.authorities);
            stats.entities += resolved.entities.len();
            stats
                .unresolved
                .extend(resolved.unresolved().map(|entity| UnresolvedEntity {
                    shelfmark: shelfmark.to_string(),
                    category: entry.category,
                    subject: entity.subject.clone(),
                    role: entity.role_or_sentinel().to_string(),
                    variant: entity.variant_or_sentinel().to_string(),
                }));
            controlaccess.extend(resolved.nodes);
        }

        for note in &layout.notes {
            let (name, value) = header_label(header, note.type_header, "type");
            controlaccess.push(
                Element::new("note")
                    .with_attr(name, value)
                    .with_children(paragraphs(session, row, note.column)),
            );
        }
        controlaccess
    }
}

struct Record {
    number: usize,
    shelfmark: String,
    header: Element,
    body: Element,
}
