use std::path::PathBuf;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use gather_cli::types::{RunResult, SheetStatus};
use gather_model::NOT_ALLOCATED;

pub fn print_summary(result: &RunResult) {
    println!("Workbook: {}", result.workbook.display());
    println!(
        "Authorities: {} ({} entries)",
        result.authorities.display(),
        result.authority_entries
    );
    if result.dry_run {
        println!("Dry run: no files written");
    } else {
        println!("Output: {}", result.output_dir.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Records"),
        header_cell("Entities"),
        header_cell("Not found"),
        header_cell("Output"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);

    let mut total_records = 0usize;
    let mut total_entities = 0usize;
    let mut total_not_found = 0usize;
    for sheet in &result.sheets {
        total_records += sheet.records;
        total_entities += sheet.entities;
        total_not_found += sheet.not_found.len();
        table.add_row(vec![
            Cell::new(&sheet.sheet)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(sheet.records),
            Cell::new(sheet.entities),
            count_cell(sheet.not_found.len(), Color::Yellow),
            output_cell(sheet.output.as_ref()),
            status_cell(&sheet.status),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_records).add_attribute(Attribute::Bold),
        Cell::new(total_entities).add_attribute(Attribute::Bold),
        count_cell(total_not_found, Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
    print_not_found_table(result);

    let failures: Vec<(&str, &str)> = result
        .sheets
        .iter()
        .filter_map(|sheet| match &sheet.status {
            SheetStatus::Failed { error } => Some((sheet.sheet.as_str(), error.as_str())),
            _ => None,
        })
        .collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for (sheet, error) in failures {
            eprintln!("- {sheet}: {error}");
        }
    }
}

fn print_not_found_table(result: &RunResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Shelfmark"),
        header_cell("Category"),
        header_cell("Name"),
        header_cell("Role"),
        header_cell("Variant"),
    ]);
    apply_table_style(&mut table);
    let mut rows = 0usize;
    for sheet in &result.sheets {
        for entity in &sheet.not_found {
            table.add_row(vec![
                Cell::new(&sheet.sheet),
                Cell::new(&entity.shelfmark),
                Cell::new(entity.category.label()).fg(Color::DarkGrey),
                Cell::new(&entity.subject).fg(Color::Yellow),
                allocated_cell(&entity.role),
                allocated_cell(&entity.variant),
            ]);
            rows += 1;
        }
    }
    if rows == 0 {
        return;
    }
    println!();
    println!("Authorities not found:");
    println!("{table}");
}

fn output_cell(path: Option<&PathBuf>) -> Cell {
    match path.and_then(|path| path.file_name()) {
        Some(name) => Cell::new(name.to_string_lossy()).fg(Color::Green),
        None => dim_cell("-"),
    }
}

fn status_cell(status: &SheetStatus) -> Cell {
    match status {
        SheetStatus::Written => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        SheetStatus::Built => Cell::new("built").fg(Color::Cyan),
        SheetStatus::Failed { .. } => Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn allocated_cell(value: &str) -> Cell {
    if value == NOT_ALLOCATED {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::LowerBoundary(Width::Fixed(11)),
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
