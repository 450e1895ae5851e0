//! Column contract between the catalogue template and the document builder.
//!
//! Worksheets are not self-describing: every field sits at a fixed
//! zero-based column. [`FieldLayout`] names each of those positions once so
//! the mapping can be inspected, tested and overridden from configuration.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entity::EntityCategory;
use crate::error::{ModelError, Result};

/// Named column positions for one catalogue template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldLayout {
    pub repository: usize,
    pub repository_unit: usize,
    pub level: usize,
    pub shelfmark: usize,
    pub former_internal_reference: usize,
    pub former_external_reference: usize,
    pub title: usize,
    pub date_normal: usize,
    pub date_start: usize,
    pub date_end: usize,
    pub era: usize,
    pub calendar: usize,
    pub extent: usize,
    pub scope_content: usize,
    pub physical_characteristics: usize,
    pub appraisal: usize,
    pub accruals: usize,
    pub biographical_history: usize,
    pub access_restriction: usize,
    pub use_restriction: usize,
    pub arrangement: usize,
    pub general_note: usize,
    pub description_language: usize,
    pub description_language_code: usize,
    pub description_script_code: usize,
    pub legal_status: usize,
    pub genre_form: usize,
    pub material_languages: LanguageBlock,
    pub material_scripts: LanguageBlock,
    pub controlled_access: Vec<EntityColumn>,
    pub notes: Vec<NoteField>,
}

/// A pair of parallel `|`-separated columns: names and their codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageBlock {
    pub values: usize,
    pub codes: usize,
    /// Attribute that receives each code.
    pub code_attribute: String,
}

/// A controlled-access column and the category its descriptors belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityColumn {
    pub column: usize,
    pub category: EntityCategory,
}

/// A note block: paragraphs from `column`, `type` attribute taken from the
/// header of `type_header`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoteField {
    pub column: usize,
    pub type_header: usize,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            repository: 0,
            repository_unit: 1,
            level: 4,
            shelfmark: 5,
            former_internal_reference: 6,
            former_external_reference: 7,
            title: 10,
            date_normal: 14,
            date_start: 15,
            date_end: 16,
            era: 17,
            calendar: 18,
            extent: 19,
            scope_content: 20,
            physical_characteristics: 21,
            appraisal: 22,
            accruals: 23,
            biographical_history: 24,
            access_restriction: 25,
            use_restriction: 27,
            arrangement: 31,
            general_note: 36,
            description_language: 44,
            description_language_code: 45,
            description_script_code: 47,
            legal_status: 71,
            genre_form: 79,
            material_languages: LanguageBlock {
                values: 40,
                codes: 41,
                code_attribute: "langcode".to_string(),
            },
            // The template has always written script codes under `langcode`.
            material_scripts: LanguageBlock {
                values: 42,
                codes: 43,
                code_attribute: "langcode".to_string(),
            },
            controlled_access: EntityCategory::ALL
                .into_iter()
                .zip(48..)
                .map(|(category, column)| EntityColumn { column, category })
                .collect(),
            notes: vec![
                NoteField {
                    column: 1,
                    type_header: 2,
                },
                NoteField {
                    column: 2,
                    type_header: 2,
                },
            ],
        }
    }
}

impl FieldLayout {
    /// Reject layouts the builder cannot honour.
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for entry in &self.controlled_access {
            if !seen.insert(entry.column) {
                return Err(ModelError::InvalidLayout {
                    message: format!(
                        "column {} is mapped to more than one controlled-access category",
                        entry.column
                    ),
                });
            }
        }
        for block in [&self.material_languages, &self.material_scripts] {
            if block.code_attribute.trim().is_empty() {
                return Err(ModelError::InvalidLayout {
                    message: format!(
                        "language block at column {} has an empty code attribute",
                        block.values
                    ),
                });
            }
        }
        Ok(())
    }

    /// Every named field with its column, in template order. Used for
    /// listing the effective layout.
    pub fn named_columns(&self) -> Vec<(String, usize)> {
        let mut columns: Vec<(String, usize)> = vec![
            ("repository".into(), self.repository),
            ("repository_unit".into(), self.repository_unit),
            ("level".into(), self.level),
            ("shelfmark".into(), self.shelfmark),
            (
                "former_internal_reference".into(),
                self.former_internal_reference,
            ),
            (
                "former_external_reference".into(),
                self.former_external_reference,
            ),
            ("title".into(), self.title),
            ("date_normal".into(), self.date_normal),
            ("date_start".into(), self.date_start),
            ("date_end".into(), self.date_end),
            ("era".into(), self.era),
            ("calendar".into(), self.calendar),
            ("extent".into(), self.extent),
            ("scope_content".into(), self.scope_content),
            (
                "physical_characteristics".into(),
                self.physical_characteristics,
            ),
            ("appraisal".into(), self.appraisal),
            ("accruals".into(), self.accruals),
            ("biographical_history".into(), self.biographical_history),
            ("access_restriction".into(), self.access_restriction),
            ("use_restriction".into(), self.use_restriction),
            ("arrangement".into(), self.arrangement),
            ("general_note".into(), self.general_note),
            ("material_languages".into(), self.material_languages.values),
            (
                "material_language_codes".into(),
                self.material_languages.codes,
            ),
            ("material_scripts".into(), self.material_scripts.values),
            ("material_script_codes".into(), self.material_scripts.codes),
            ("description_language".into(), self.description_language),
            (
                "description_language_code".into(),
                self.description_language_code,
            ),
            (
                "description_script_code".into(),
                self.description_script_code,
            ),
            ("legal_status".into(), self.legal_status),
            ("genre_form".into(), self.genre_form),
        ];
        for entry in &self.controlled_access {
            columns.push((format!("controlled_access.{}", entry.category.tag()), entry.column));
        }
        for (position, note) in self.notes.iter().enumerate() {
            columns.push((format!("notes[{position}]"), note.column));
        }
        columns.sort_by_key(|(_, column)| *column);
        columns
    }
}
