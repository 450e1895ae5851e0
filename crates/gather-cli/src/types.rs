use std::path::PathBuf;

use gather_core::UnresolvedEntity;
use gather_model::EntityCategory;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RunResult {
    pub workbook: PathBuf,
    pub authorities: PathBuf,
    pub authority_entries: usize,
    pub output_dir: PathBuf,
    pub exported_at: String,
    pub dry_run: bool,
    pub sheets: Vec<SheetSummary>,
    pub has_errors: bool,
}

impl RunResult {
    pub fn failed_sheets(&self) -> usize {
        self.sheets
            .iter()
            .filter(|sheet| matches!(sheet.status, SheetStatus::Failed { .. }))
            .count()
    }
}

#[derive(Debug, Serialize)]
pub struct SheetSummary {
    pub sheet: String,
    pub records: usize,
    pub tokens: u64,
    pub entities: usize,
    pub not_found: Vec<NotFoundEntity>,
    pub output: Option<PathBuf>,
    pub status: SheetStatus,
}

impl SheetSummary {
    pub fn failed(sheet: impl Into<String>, error: String) -> Self {
        Self {
            sheet: sheet.into(),
            records: 0,
            tokens: 0,
            entities: 0,
            not_found: Vec::new(),
            output: None,
            status: SheetStatus::Failed { error },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SheetStatus {
    Written,
    /// Built but not written (dry run).
    Built,
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct NotFoundEntity {
    pub shelfmark: String,
    pub category: EntityCategory,
    pub subject: String,
    pub role: String,
    pub variant: String,
}

impl From<UnresolvedEntity> for NotFoundEntity {
    fn from(entity: UnresolvedEntity) -> Self {
        Self {
            shelfmark: entity.shelfmark,
            category: entity.category,
            subject: entity.subject,
            role: entity.role,
            variant: entity.variant,
        }
    }
}
