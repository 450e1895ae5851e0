use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::{Cell, CellAlignment, Table};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use gather_cli::config::load_config;
use gather_cli::pipeline::{RunConfig, default_output_dir, run_gather, write_report};
use gather_cli::types::RunResult;
use gather_ingest::Workbook;
use gather_output::XmlOptions;

use crate::cli::{ConvertArgs, LayoutArgs, LayoutFormatArg, SheetsArgs};
use crate::summary::{apply_table_style, header_cell};

pub fn run_convert(args: &ConvertArgs, quiet: bool) -> Result<RunResult> {
    let config = load_config(args.config.as_deref())?;
    let mut authority_source = config.authorities;
    if let Some(sheet) = &args.authority_sheet {
        authority_source.sheet = sheet.clone();
    }
    let xml = if args.compact {
        XmlOptions::compact()
    } else {
        XmlOptions::default()
    };
    let run = RunConfig {
        workbook: args.workbook.clone(),
        authorities: args.authorities.clone(),
        authority_source,
        layout: config.layout,
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&args.workbook)),
        sheets: args.sheets.clone(),
        xml,
        record_comments: !args.no_record_comments,
        dry_run: args.dry_run,
        exported_at: Local::now().naive_local(),
    };

    let progress = record_progress(quiet || args.no_progress);
    let result = run_gather(&run, &progress);
    progress.finish_and_clear();
    let result = result?;

    if let Some(path) = &args.report {
        write_report(path, &result)?;
        info!(path = %path.display(), "run report written");
    }
    Ok(result)
}

pub fn run_sheets(args: &SheetsArgs) -> Result<()> {
    let mut workbook = Workbook::open(&args.workbook)
        .with_context(|| format!("open workbook {}", args.workbook.display()))?;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Sheet"), header_cell("Records")]);
    apply_table_style(&mut table);
    for name in workbook.sheet_names() {
        let sheet = workbook.load_sheet(&name)?;
        table.add_row(vec![
            Cell::new(&name),
            Cell::new(sheet.data_row_count()).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_layout(args: &LayoutArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    match args.format {
        LayoutFormatArg::Toml => {
            let text = toml::to_string_pretty(&config).context("serialize layout")?;
            print!("{text}");
        }
        LayoutFormatArg::Table => {
            let mut table = Table::new();
            table.set_header(vec![header_cell("Column"), header_cell("Field")]);
            apply_table_style(&mut table);
            for (field, column) in config.layout.named_columns() {
                table.add_row(vec![
                    Cell::new(column).set_alignment(CellAlignment::Right),
                    Cell::new(field),
                ]);
            }
            println!("{table}");
            println!(
                "Authorities: sheet \"{}\", name column {}, identifier column {}",
                config.authorities.sheet,
                config.authorities.key_column,
                config.authorities.identifier_column
            );
        }
    }
    Ok(())
}

fn record_progress(hidden: bool) -> ProgressBar {
    if hidden || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(0);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{msg:>24} [{bar:40.cyan/blue}] {pos}/{len} records")
    {
        bar.set_style(style.progress_chars("#>-"));
    }
    bar
}
