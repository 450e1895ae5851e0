//! Per-worksheet processing state.
//!
//! A [`SheetSession`] owns the only mutable state of a worksheet pass: the
//! record counter used for header sequencing and the token counter. A new
//! session is created for every worksheet, so both restart at 1.

use gather_model::{Row, Token, normalize_shelfmark};

#[derive(Debug, Clone)]
pub struct SheetSession {
    shelfmark_column: usize,
    next_sequence: u64,
    next_record: usize,
    scope_key: String,
}

impl SheetSession {
    pub fn new(shelfmark_column: usize) -> Self {
        Self {
            shelfmark_column,
            next_sequence: 1,
            next_record: 1,
            scope_key: String::new(),
        }
    }

    /// Enter a new record: caches the row's normalized shelfmark as the
    /// token scope and returns the one-based record number.
    pub fn start_record(&mut self, row: &Row) -> usize {
        let shelfmark = row.cell(self.shelfmark_column);
        self.scope_key = if shelfmark.is_null() {
            String::new()
        } else {
            normalize_shelfmark(&shelfmark.to_string())
        };
        let record = self.next_record;
        self.next_record += 1;
        record
    }

    /// Mint a token for the cell at `column`.
    ///
    /// A null cell mints nothing and leaves the counter untouched; an empty
    /// string is still a value and mints. The counter is shared by every
    /// field of every record in the worksheet.
    pub fn mint(&mut self, row: &Row, column: usize) -> Option<Token> {
        if row.cell(column).is_null() {
            return None;
        }
        let token = Token::new(self.scope_key.clone(), self.next_sequence);
        self.next_sequence += 1;
        Some(token)
    }

    /// `tid` attribute fragment for the cell at `column`, if it mints.
    pub fn token_attr(&mut self, row: &Row, column: usize) -> Option<(&'static str, String)> {
        self.mint(row, column).map(|token| token.attribute())
    }

    /// Number of tokens minted so far.
    pub fn tokens_minted(&self) -> u64 {
        self.next_sequence - 1
    }

    /// Number of records started so far.
    pub fn records_started(&self) -> usize {
        self.next_record - 1
    }

    pub fn scope_key(&self) -> &str {
        &self.scope_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gather_model::CellValue;

    fn row(cells: &[Option<&str>]) -> Row {
        cells.iter().map(|cell| CellValue::from(*cell)).collect()
    }

    #[test]
    fn tokens_are_scoped_to_the_current_shelfmark() {
        let mut session = SheetSession::new(1);
        let first = row(&[Some("x"), Some("IOR/L/PS 5")]);
        assert_eq!(session.start_record(&first), 1);
        let token = session.mint(&first, 0).unwrap();
        assert_eq!(token.to_string(), "IOR_L_PS_5_1");
    }

    #[test]
    fn null_cells_do_not_advance_the_counter() {
        let mut session = SheetSession::new(0);
        let record = row(&[Some("A-1"), None, Some("")]);
        session.start_record(&record);
        assert_eq!(session.mint(&record, 0).map(|t| t.sequence), Some(1));
        assert!(session.mint(&record, 1).is_none());
        assert!(session.mint(&record, 7).is_none());
        assert_eq!(session.mint(&record, 2).map(|t| t.sequence), Some(2));
        assert_eq!(session.tokens_minted(), 2);
    }

    #[test]
    fn counter_runs_across_records() {
        let mut session = SheetSession::new(0);
        let first = row(&[Some("A")]);
        let second = row(&[Some("B")]);
        session.start_record(&first);
        session.mint(&first, 0);
        assert_eq!(session.start_record(&second), 2);
        let token = session.mint(&second, 0).unwrap();
        assert_eq!(token.to_string(), "B_2");
        assert_eq!(session.records_started(), 2);
    }

    #[test]
    fn new_session_restarts_at_one() {
        let record = row(&[Some("A")]);
        let mut first = SheetSession::new(0);
        first.start_record(&record);
        first.mint(&record, 0);
        first.mint(&record, 0);
        let mut second = SheetSession::new(0);
        second.start_record(&record);
        assert_eq!(second.mint(&record, 0).map(|t| t.sequence), Some(1));
    }
}
