use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use docalign_cli::types::{BatchResult, DocumentSummary};
use docalign_model::{AlignmentResult, MatchOrigin, Template};

pub fn print_summary(result: &BatchResult) {
    println!("Input: {}", result.input_dir.display());
    println!("Output: {}", result.output_dir.display());
    if let Some(path) = &result.report {
        println!("Report: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Document"),
        header_cell("Lines"),
        header_cell("Filled"),
        header_cell("Keys"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);

    let mut total_lines = 0usize;
    let mut total_filled = 0usize;
    for summary in &result.documents {
        total_lines += summary.lines;
        total_filled += summary.filled;
        table.add_row(vec![
            Cell::new(&summary.stem)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            count_cell(summary.lines),
            fill_cell(summary),
            Cell::new(summary.keys),
            status_cell(summary),
        ]);
    }
    let failed = result.failed_count();
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_lines).add_attribute(Attribute::Bold),
        Cell::new(total_filled).add_attribute(Attribute::Bold),
        dim_cell("-"),
        if failed > 0 {
            Cell::new(format!("{failed} failed"))
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        } else {
            dim_cell("-")
        },
    ]);
    println!("{table}");

    let errors: Vec<&DocumentSummary> = result.documents.iter().filter(|d| !d.is_ok()).collect();
    if !errors.is_empty() {
        eprintln!("Errors:");
        for summary in errors {
            if let Some(error) = &summary.error {
                eprintln!("- {}: {error}", summary.stem);
            }
        }
    }
}

pub fn print_alignment(result: &AlignmentResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Value"),
        header_cell("Match"),
    ]);
    apply_table_style(&mut table);
    for (key, value) in result.iter() {
        let origin = result
            .occurrences()
            .iter()
            .rev()
            .find(|occurrence| &occurrence.key == key)
            .map(|occurrence| occurrence.origin);
        let value_cell = if value.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(value)
        };
        table.add_row(vec![Cell::new(key), value_cell, origin_cell(origin)]);
    }
    println!("{table}");
    println!("Filled {} of {} keys", result.filled_count(), result.len());
}

pub fn print_keys(template: &Template) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Key"), header_cell("Words")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (index, key) in template.iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(key),
            Cell::new(key.token_count()),
        ]);
    }
    println!("{table}");
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

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count)
    }
}

fn fill_cell(summary: &DocumentSummary) -> Cell {
    if !summary.is_ok() {
        return dim_cell("-");
    }
    let color = if summary.filled == summary.keys {
        Color::Green
    } else if summary.filled == 0 {
        Color::Red
    } else {
        Color::Yellow
    };
    Cell::new(summary.filled).fg(color)
}

fn status_cell(summary: &DocumentSummary) -> Cell {
    if summary.is_ok() {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("✗")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn origin_cell(origin: Option<MatchOrigin>) -> Cell {
    match origin {
        Some(MatchOrigin::Exact) => Cell::new("exact").fg(Color::Green),
        Some(MatchOrigin::Fuzzy) => Cell::new("fuzzy").fg(Color::Yellow),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
