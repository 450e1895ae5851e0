//! Property tests for token sequencing and authority resolution.

use chrono::NaiveDate;
use gather_core::{BuildOptions, DocumentBuilder, resolve_all, segment_text, Segments};
use gather_model::{CellValue, FieldLayout, LookupEntry, LookupTable, Row, Worksheet};
use proptest::prelude::*;

const WIDTH: usize = 80;

fn options() -> BuildOptions {
    let exported = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap();
    BuildOptions::new(exported)
}

fn cell_strategy() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        3 => Just(CellValue::Empty),
        1 => Just(CellValue::text("")),
        2 => "[A-Za-z ]{1,12}".prop_map(CellValue::Text),
        1 => "[a-z]{1,6}(\n-[a-z]{1,6}){0,3}".prop_map(CellValue::Text),
        1 => "[A-Za-z]{1,8}(>[a-z]{0,5}){0,2}(\\|[A-Za-z]{1,8}){0,2}".prop_map(CellValue::Text),
    ]
}

fn row_strategy() -> impl Strategy<Value = Row> {
    (
        "[A-Z]{1,4}/[0-9]{1,3}",
        prop::collection::vec(cell_strategy(), WIDTH),
    )
        .prop_map(|(shelfmark, mut cells)| {
            cells[5] = CellValue::Text(shelfmark);
            Row::new(cells)
        })
}

fn sequence_numbers(document: &gather_core::SheetDocument) -> Vec<u64> {
    document
        .root
        .descendants()
        .into_iter()
        .filter_map(|element| element.attr("tid"))
        .filter_map(|tid| tid.rsplit('_').next()?.parse().ok())
        .collect()
}

fn table_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[A-Za-z]{1,6}", "[A-Z][0-9]{1,4}"), 0..12)
}

proptest! {
    #[test]
    fn tokens_are_contiguous_in_document_order(rows in prop::collection::vec(row_strategy(), 0..5)) {
        let mut all_rows = vec![Row::new(vec![CellValue::text("header"); WIDTH])];
        all_rows.extend(rows);
        let layout = FieldLayout::default();
        let table = LookupTable::default();
        let document = DocumentBuilder::new(&layout, &table, options())
            .build_sheet(&Worksheet::new("sheet", all_rows))
            .unwrap();

        let sequence = sequence_numbers(&document);
        let expected: Vec<u64> = (1..=sequence.len() as u64).collect();
        prop_assert_eq!(&sequence, &expected);
        prop_assert_eq!(document.stats.tokens, sequence.len() as u64);
    }

    #[test]
    fn resolution_is_idempotent(raw in "[A-Za-z>| ]{0,40}", pairs in table_strategy()) {
        let table = LookupTable::new(
            pairs
                .into_iter()
                .enumerate()
                .map(|(position, (name, identifier))| LookupEntry {
                    name,
                    identifier,
                    row_number: position + 1,
                })
                .collect(),
        );
        prop_assert_eq!(resolve_all(&raw, &table), resolve_all(&raw, &table));
    }

    #[test]
    fn indexed_lookup_matches_linear_scan(pairs in table_strategy(), probe in "[A-Za-z]{1,6}") {
        let table = LookupTable::new(
            pairs
                .iter()
                .enumerate()
                .map(|(position, (name, identifier))| LookupEntry {
                    name: name.clone(),
                    identifier: identifier.clone(),
                    row_number: position + 1,
                })
                .collect(),
        );
        prop_assert_eq!(table.find(&probe), table.find_linear(&probe));
        for (name, _) in &pairs {
            prop_assert_eq!(table.find(name), table.find_linear(name));
            prop_assert!(table.find(&name.to_uppercase()).is_found());
        }
    }

    #[test]
    fn list_mode_keeps_every_line(lines in prop::collection::vec("-?[a-z]{0,6}", 1..8)) {
        let text = lines.join("\n");
        let total = match segment_text(&text) {
            Segments::Flat(flat) => flat.len(),
            Segments::Listed { top, items, bottom } => top.len() + items.len() + bottom.len(),
        };
        prop_assert_eq!(total, lines.len());
    }
}
