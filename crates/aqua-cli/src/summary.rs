use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::types::{ApplyReport, RunReport};

pub fn print_run_summary(report: &RunReport) {
    println!(
        "Dataset: {} ({})",
        report.dataset.display(),
        report.dataset_version
    );
    if report.dry_run {
        println!("Dry run: no files were written and no run was recorded.");
    }
    let strategy = if report.scaled {
        format!("{} + standard scaling", report.strategy)
    } else {
        report.strategy.clone()
    };
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.add_row(vec![label_cell("Rows"), Cell::new(report.rows)]);
    table.add_row(vec![
        label_cell("Features"),
        Cell::new(report.feature_count),
    ]);
    table.add_row(vec![
        label_cell("Missing cells"),
        missing_cell(report.missing_cells),
    ]);
    table.add_row(vec![
        label_cell("Imputed columns"),
        list_cell(&report.imputed_columns),
    ]);
    table.add_row(vec![label_cell("Strategy"), Cell::new(strategy)]);
    table.add_row(vec![
        label_cell("Cleaned CSV"),
        written_cell(&report.output_path, report.wrote_output),
    ]);
    table.add_row(vec![
        label_cell("Pipeline"),
        written_cell(&report.pipeline_path, report.wrote_pipeline),
    ]);
    table.add_row(vec![
        label_cell("Tracking run"),
        match &report.run_id {
            Some(run_id) => Cell::new(run_id),
            None => dim_cell("-"),
        },
    ]);
    println!("{table}");
}

pub fn print_apply_summary(report: &ApplyReport) {
    println!("Pipeline: {}", report.pipeline.display());
    println!("Dataset: {}", report.dataset.display());
    println!("Output: {}", report.output_path.display());
    println!("Rows: {}", report.rows);
    println!("Stages: {}", report.stages.join(", "));
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn missing_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        dim_cell(count)
    }
}

fn list_cell(names: &[String]) -> Cell {
    if names.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(names.join(", "))
    }
}

fn written_cell(path: &Path, written: bool) -> Cell {
    if written {
        Cell::new(path.display().to_string()).fg(Color::Green)
    } else {
        dim_cell("-")
    }
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
