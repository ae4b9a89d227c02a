use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use finrec_model::format_numeric;

use crate::types::RunReport;

pub fn print_summary(report: &RunReport) {
    println!(
        "Records: {} ({} ledger), pricing rows: {}",
        report.record_count, report.ledger_count, report.pricing_count
    );
    if let Some(dir) = &report.output_dir {
        println!("Output: {}", dir.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Report"),
        header_cell("Groups"),
        header_cell("GIT"),
        header_cell("Qty variance"),
        header_cell("Value variance (TP)"),
    ]);
    apply_table_style(&mut table);
    for idx in 1..5 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for figures in &report.reports {
        table.add_row(vec![
            Cell::new(&figures.variance_type)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(figures.groups),
            git_cell(figures.git_groups),
            variance_cell(figures.total_quantity_variance as f64),
            variance_cell(figures.total_value_variance_tp),
        ]);
    }
    println!("{table}");

    if report.summaries.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Report"),
        header_cell("Category"),
        header_cell("PKRD value (TP)"),
        header_cell("Variance (TP)"),
        header_cell("GIT value"),
        header_cell("% of sales"),
        header_cell("PTD ex GIT"),
        header_cell("% ex GIT"),
    ]);
    apply_table_style(&mut table);
    for idx in 2..8 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for summary in &report.summaries {
        let grand_total = summary.category == "SUMMARY";
        let mut category = Cell::new(&summary.category);
        if grand_total {
            category = category.fg(Color::Cyan).add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            Cell::new(&summary.report_type),
            category,
            Cell::new(format_numeric(summary.pkrd_value_tp_sum)),
            variance_cell(summary.value_variance_sum),
            Cell::new(format_numeric(summary.git_value_sum)),
            Cell::new(format_numeric(summary.pct_of_sales)),
            variance_cell(summary.ptd_ex_git),
            Cell::new(format_numeric(summary.pct_of_sales_ex_git)),
        ]);
    }
    println!();
    println!("Summary totals:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
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

fn git_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}

fn variance_cell(value: f64) -> Cell {
    if value == 0.0 {
        Cell::new(format_numeric(value)).fg(Color::DarkGrey)
    } else if value < 0.0 {
        Cell::new(format_numeric(value)).fg(Color::Red)
    } else {
        Cell::new(format_numeric(value))
    }
}
