use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use importer_map::MatchSource;
use importer_model::FileData;

use crate::types::{ColumnReport, ImportResult};

/// Longest sample or cell shown before truncation.
const MAX_CELL_CHARS: usize = 40;

pub fn print_import_summary(result: &ImportResult) {
    eprintln!("File: {}", result.file_name);
    eprintln!("Header row: {}", result.header_row);
    for notice in &result.notices {
        eprintln!("Note: {notice}");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Uploaded column"),
        header_cell("Sample"),
        header_cell("Template key"),
        header_cell("Match"),
        header_cell("Included"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);
    for column in &result.columns {
        table.add_row(column_row(column));
    }
    let summary = &result.summary;
    table.add_row(vec![
        dim_cell("-"),
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(format!(
            "{} mapped, {}/{} required",
            summary.mapped, summary.required_mapped, summary.required_total
        ))
        .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(summary.included).add_attribute(Attribute::Bold),
    ]);
    eprintln!("{table}");

    match (&result.payload, &result.output) {
        (Some(payload), Some(path)) => {
            eprintln!("Imported {} rows to {}", payload.num_rows, path.display());
        }
        (Some(payload), None) => eprintln!("Imported {} rows", payload.num_rows),
        (None, _) => {
            eprintln!("Import blocked:");
            for error in &result.errors {
                eprintln!("- {error}");
            }
        }
    }
}

pub fn print_inspection(file: &FileData, limit: usize) {
    println!("File: {}", file.file_name);
    if !file.sheet_list.is_empty() {
        println!("Sheets: {}", file.sheet_list.join(", "));
    }
    println!("Rows: {}  Columns: {}", file.rows.len(), file.width());

    let mut table = Table::new();
    let mut header = vec![header_cell("Row")];
    header.extend((0..file.width()).map(|index| header_cell(&index.to_string())));
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for row in file.rows.iter().take(limit) {
        let mut cells = vec![dim_cell(row.index)];
        cells.extend(row.values.iter().map(|value| Cell::new(truncate(value))));
        table.add_row(cells);
    }
    println!("{table}");
    if file.rows.len() > limit {
        println!("... {} more rows", file.rows.len() - limit);
    }

    if !file.errors.is_empty() {
        eprintln!("Warnings:");
        for warning in &file.errors {
            eprintln!("- {warning}");
        }
    }
}

fn column_row(column: &ColumnReport) -> Vec<Cell> {
    let key = match &column.key {
        Some(key) if column.required => Cell::new(format!("{key} *")).fg(Color::Blue),
        Some(key) => Cell::new(key),
        None => dim_cell("-"),
    };
    let source = match column.source {
        Some(MatchSource::Hint) => Cell::new("hint").fg(Color::Green),
        Some(MatchSource::Similarity(score)) => {
            Cell::new(format!("{:.0}%", score * 100.0)).fg(Color::Green)
        }
        None if column.key.is_some() => Cell::new("manual"),
        None => dim_cell("-"),
    };
    let included = if column.included {
        Cell::new("yes").fg(Color::Green)
    } else {
        dim_cell("no")
    };
    vec![
        Cell::new(column.index),
        Cell::new(&column.header),
        column
            .sample
            .as_deref()
            .map_or_else(|| dim_cell("-"), |sample| dim_cell(truncate(sample))),
        key,
        source,
        included,
    ]
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_CELL_CHARS {
        return value.to_string();
    }
    let mut short: String = value.chars().take(MAX_CELL_CHARS - 1).collect();
    short.push('…');
    short
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
