//! Authority lookup table with a normalized-name index.

use std::collections::HashMap;

use crate::cell::Row;
use crate::entity::LookupId;

/// Normalize an entity name for lookup: trimmed and case-folded.
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// One authority record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupEntry {
    /// Entity name as written in the authority file.
    pub name: String,
    pub identifier: String,
    /// One-based row number in the authority sheet.
    pub row_number: usize,
}

/// Read-only authority table.
///
/// Names are expected to be unique but the source data does not guarantee
/// it, so the index keeps the first entry for every normalized name. That
/// matches a top-to-bottom scan of the sheet.
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    entries: Vec<LookupEntry>,
    index: HashMap<String, usize>,
}

impl LookupTable {
    pub fn new(entries: Vec<LookupEntry>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            index.entry(normalize_key(&entry.name)).or_insert(position);
        }
        Self { entries, index }
    }

    /// Build the table from sheet rows. Every row takes part, header
    /// included; rows with a blank name cell are skipped.
    pub fn from_rows<'a, I>(rows: I, key_column: usize, identifier_column: usize) -> Self
    where
        I: IntoIterator<Item = &'a Row>,
    {
        let entries = rows
            .into_iter()
            .enumerate()
            .filter(|(_, row)| !row.cell(key_column).is_blank())
            .map(|(position, row)| LookupEntry {
                name: row.cell(key_column).to_string(),
                identifier: row.cell(identifier_column).to_string(),
                row_number: position + 1,
            })
            .collect();
        Self::new(entries)
    }

    /// Indexed lookup of `name`.
    pub fn find(&self, name: &str) -> LookupId {
        self.index
            .get(&normalize_key(name))
            .and_then(|position| self.entries.get(*position))
            .map_or(LookupId::NotFound, |entry| {
                LookupId::Found(entry.identifier.clone())
            })
    }

    /// Reference linear scan from the first entry. Same answers as
    /// [`LookupTable::find`], at O(n) per call.
    pub fn find_linear(&self, name: &str) -> LookupId {
        let wanted = normalize_key(name);
        self.entries
            .iter()
            .find(|entry| normalize_key(&entry.name) == wanted)
            .map_or(LookupId::NotFound, |entry| {
                LookupId::Found(entry.identifier.clone())
            })
    }

    pub fn entries(&self) -> &[LookupEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Normalized names that occur more than once, in first-seen order.
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut duplicates = Vec::new();
        for entry in &self.entries {
            let key = normalize_key(&entry.name);
            let count = seen.entry(key.clone()).or_insert(0);
            *count += 1;
            if *count == 2 {
                duplicates.push(key);
            }
        }
        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;

    fn entry(name: &str, identifier: &str, row_number: usize) -> LookupEntry {
        LookupEntry {
            name: name.to_string(),
            identifier: identifier.to_string(),
            row_number,
        }
    }

    #[test]
    fn lookup_is_trimmed_and_case_insensitive() {
        let table = LookupTable::new(vec![entry("Jane Doe", "A123", 1)]);
        assert_eq!(table.find("  jane DOE "), LookupId::Found("A123".into()));
        assert_eq!(table.find("John Doe"), LookupId::NotFound);
    }

    #[test]
    fn first_duplicate_wins() {
        let table = LookupTable::new(vec![
            entry("India Office", "first", 1),
            entry("india office ", "second", 2),
        ]);
        assert_eq!(table.find("India Office"), LookupId::Found("first".into()));
        assert_eq!(table.find_linear("India Office"), table.find("India Office"));
        assert_eq!(table.duplicate_names(), vec!["india office".to_string()]);
    }

    #[test]
    fn rows_with_blank_names_are_skipped() {
        let mut cells = vec![CellValue::Empty; 19];
        cells[0] = CellValue::from("Jane Doe");
        cells[18] = CellValue::from("A123");
        let rows = vec![
            Row::new(vec![CellValue::from("Name")]),
            Row::new(vec![CellValue::Empty]),
            Row::new(cells),
        ];
        let table = LookupTable::from_rows(&rows, 0, 18);
        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[1].row_number, 3);
        assert_eq!(table.find("jane doe"), LookupId::Found("A123".into()));
    }
}
