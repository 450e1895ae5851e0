//! Workbook conversion pipeline with explicit stages.
//!
//! 1. **Workbook**: open the catalogue workbook and choose the worksheets
//! 2. **Authorities**: load the lookup table once; when it cannot be read,
//!    every chosen worksheet is marked failed and nothing is built
//! 3. **Build**: map every row of a worksheet into its document tree
//! 4. **Output**: serialize each document to `<sheet>.xml`
//!
//! Stages 3 and 4 run per worksheet. A worksheet that fails is recorded in
//! the result and the run moves on.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use gather_core::{BuildOptions, DocumentBuilder, SheetDocument, TIMESTAMP_FORMAT};
use gather_ingest::{AuthoritySource, Workbook, load_lookup_table};
use gather_model::{FieldLayout, LookupTable};
use gather_output::{XmlOptions, write_sheet_document};
use indicatif::ProgressBar;
use tracing::{error, info, info_span};

use crate::types::{NotFoundEntity, RunResult, SheetStatus, SheetSummary};

/// Everything a conversion run needs, resolved from flags and config.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub workbook: PathBuf,
    pub authorities: PathBuf,
    pub authority_source: AuthoritySource,
    pub layout: FieldLayout,
    pub output_dir: PathBuf,
    /// Worksheets to convert; empty means all of them.
    pub sheets: Vec<String>,
    pub xml: XmlOptions,
    pub record_comments: bool,
    pub dry_run: bool,
    pub exported_at: NaiveDateTime,
}

/// Default output directory: the folder holding the workbook, or the
/// workbook itself when it is a CSV folder.
pub fn default_output_dir(workbook: &Path) -> PathBuf {
    if workbook.is_dir() {
        return workbook.to_path_buf();
    }
    workbook
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Run the whole conversion.
pub fn run_gather(config: &RunConfig, progress: &ProgressBar) -> Result<RunResult> {
    let span = info_span!("workbook", path = %config.workbook.display());
    let _guard = span.enter();
    let start = Instant::now();

    // ========================================================================
    // Stage 1: Workbook
    // ========================================================================
    config.layout.validate().context("invalid column layout")?;
    let mut workbook = Workbook::open(&config.workbook)
        .with_context(|| format!("open workbook {}", config.workbook.display()))?;
    let names = if config.sheets.is_empty() {
        workbook.sheet_names()
    } else {
        config.sheets.clone()
    };

    // ========================================================================
    // Stage 2: Authorities (loaded once; a failure fails every worksheet)
    // ========================================================================
    let authorities = load_lookup_table(&config.authorities, &config.authority_source)
        .with_context(|| format!("load authorities {}", config.authorities.display()))
        .map_err(|e| format!("{e:#}"));

    // ========================================================================
    // Stage 3-4: Build and write, one worksheet at a time
    // ========================================================================
    let mut sheets = Vec::with_capacity(names.len());
    match &authorities {
        Ok(table) => {
            let options =
                BuildOptions::new(config.exported_at).with_record_comments(config.record_comments);
            let builder = DocumentBuilder::new(&config.layout, table, options);
            for name in &names {
                let summary = match convert_sheet(&mut workbook, &builder, name, config, progress) {
                    Ok(summary) => summary,
                    Err(e) => {
                        let message = format!("{e:#}");
                        error!(sheet = %name, error = %message, "worksheet failed");
                        SheetSummary::failed(name.as_str(), message)
                    }
                };
                sheets.push(summary);
            }
        }
        Err(message) => {
            error!(error = %message, "authority table unavailable");
            for name in &names {
                error!(sheet = %name, "worksheet skipped");
                sheets.push(SheetSummary::failed(name.as_str(), message.clone()));
            }
        }
    }

    let mut result = RunResult {
        workbook: config.workbook.clone(),
        authorities: config.authorities.clone(),
        authority_entries: authorities.as_ref().map_or(0, LookupTable::len),
        output_dir: config.output_dir.clone(),
        exported_at: config.exported_at.format(TIMESTAMP_FORMAT).to_string(),
        dry_run: config.dry_run,
        sheets,
        has_errors: false,
    };
    let failed = result.failed_sheets();
    result.has_errors = failed > 0;
    info!(
        sheets = result.sheets.len(),
        failed,
        duration_ms = start.elapsed().as_millis(),
        "workbook complete"
    );
    Ok(result)
}

fn convert_sheet(
    workbook: &mut Workbook,
    builder: &DocumentBuilder<'_>,
    name: &str,
    config: &RunConfig,
    progress: &ProgressBar,
) -> Result<SheetSummary> {
    let sheet = workbook.load_sheet(name)?;

    progress.reset();
    progress.set_length(sheet.data_row_count() as u64);
    progress.set_message(name.to_string());
    let document = builder.build_sheet_with_progress(&sheet, |record| {
        progress.set_position(record.record as u64);
    })?;

    let (output, status) = if config.dry_run {
        (None, SheetStatus::Built)
    } else {
        let path = write_sheet_document(&config.output_dir, &document, &config.xml)?;
        (Some(path), SheetStatus::Written)
    };
    Ok(summarize(document, output, status))
}

fn summarize(document: SheetDocument, output: Option<PathBuf>, status: SheetStatus) -> SheetSummary {
    SheetSummary {
        sheet: document.sheet_name,
        records: document.records,
        tokens: document.stats.tokens,
        entities: document.stats.entities,
        not_found: document
            .stats
            .unresolved
            .into_iter()
            .map(NotFoundEntity::from)
            .collect(),
        output,
        status,
    }
}

/// Write the run result as pretty JSON.
pub fn write_report(path: &Path, result: &RunResult) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), result)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
