use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use comfy_table::Table;
use tracing::{info, info_span, warn};

use finrec_core::filter::DateRange;
use finrec_core::run::{RunOutput, SourceTables, run};
use finrec_core::scrub::parse_date;
use finrec_ingest::read_csv_table;
use finrec_model::fields::{DEPOT_CATEGORY, DEPOT_ID, DEPOT_NAME};
use finrec_model::{RawRow, SourceMappings, SourceType};
use finrec_output::{new_envelope, write_result_set};

use crate::cli::RunArgs;
use crate::summary::apply_table_style;
use crate::types::{ReportFigures, RunReport};

pub fn run_sources() -> Result<()> {
    let mappings = SourceMappings::default();
    let mut table = Table::new();
    table.set_header(vec![
        "Source", "Date", "SKU", "Move order", "Depot", "Order", "Quantity", "Value",
    ]);
    apply_table_style(&mut table);
    for source in SourceType::ALL {
        let columns = mappings.columns(source);
        let (qty, value) = if source.is_ledger() {
            (&columns.pkrd_qty, &columns.pkrd_value)
        } else {
            (&columns.nfsi_qty, &columns.nfsi_value)
        };
        table.add_row(vec![
            source.label().to_string(),
            columns.date.clone(),
            columns.sku.clone(),
            columns.moveorder.clone(),
            columns.depot.clone(),
            columns.order.clone().unwrap_or_else(|| "-".to_string()),
            qty.clone().unwrap_or_else(|| "-".to_string()),
            value.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_reconciliation(args: &RunArgs) -> Result<RunReport> {
    let span = info_span!("run");
    let _guard = span.enter();

    let mappings = match &args.mappings {
        Some(path) => SourceMappings::from_json_file(path)
            .with_context(|| format!("load mappings: {}", path.display()))?,
        None => SourceMappings::default(),
    };
    let range = reporting_range(args.start_date.as_deref(), args.end_date.as_deref())?;
    let effective_date = match &args.effective_date {
        Some(raw) => parse_date(raw).context("parse --effective-date")?,
        None => Utc::now().date_naive(),
    };

    let ingest_span = info_span!("ingest");
    let tables = ingest_span.in_scope(|| load_tables(args))?;

    let output = run(tables, &mappings, &range)?;

    let mut report = RunReport {
        record_count: output.records.len(),
        ledger_count: output
            .records
            .iter()
            .filter(|r| r.source_type == SourceType::Pkrd)
            .count(),
        pricing_count: output.pricing.len(),
        reports: output
            .variances
            .iter()
            .map(|set| ReportFigures {
                variance_type: set.report.variance_type.to_string(),
                groups: set.aggregates.len(),
                git_groups: set.aggregates.iter().filter(|a| a.is_git).count(),
                total_quantity_variance: set
                    .aggregates
                    .iter()
                    .map(|a| a.total_quantity_variance)
                    .sum(),
                total_value_variance_tp: set
                    .aggregates
                    .iter()
                    .map(|a| a.total_value_variance_tp)
                    .sum(),
                output: None,
            })
            .collect(),
        summaries: output.summaries.clone(),
        output_dir: args.output_dir.clone(),
    };

    if let Some(dir) = &args.output_dir {
        write_outputs(dir, &output, effective_date, &mut report)?;
    }
    Ok(report)
}

fn load_tables(args: &RunArgs) -> Result<SourceTables> {
    Ok(SourceTables {
        pkrd: load_rows(&args.pkrd, "PKRD")?,
        sales: load_rows(&args.sales, "Sales")?,
        fresh: load_rows(&args.fresh, "NFSI Fresh")?,
        frozen: load_rows(&args.frozen, "NFSI Frozen")?,
        non_nfsi: load_rows(&args.non_nfsi, "Non-NFSI")?,
        pricing: load_rows(&args.pricing, "Pricing")?,
        depots: load_depots(&args.depot)?,
    })
}

fn load_rows(path: &Path, name: &str) -> Result<Vec<RawRow>> {
    let table =
        read_csv_table(path).with_context(|| format!("ingest {name}: {}", path.display()))?;
    let rows = table.well_formed_row_maps();
    info!(
        source = name,
        rows = rows.len(),
        dropped = table.rows.len() - rows.len(),
        "source ingested"
    );
    Ok(rows)
}

fn load_depots(path: &Path) -> Result<Vec<RawRow>> {
    let table =
        read_csv_table(path).with_context(|| format!("ingest depots: {}", path.display()))?;
    Ok(table.row_maps_with_headers(&[DEPOT_ID, DEPOT_NAME, DEPOT_CATEGORY]))
}

/// Builds the optional reporting window. Bounds must parse; an inverted
/// range is logged and ignored rather than silently rewritten.
fn reporting_range(start: Option<&str>, end: Option<&str>) -> Result<DateRange> {
    let start = start
        .map(|raw| parse_date(raw).context("parse --start-date"))
        .transpose()?;
    let end = end
        .map(|raw| parse_date(raw).context("parse --end-date"))
        .transpose()?;
    if let (Some(s), Some(e)) = (start, end)
        && s >= e
    {
        warn!(start = %s, end = %e, "start date not before end date; ignoring range");
        return Ok(DateRange::default());
    }
    Ok(DateRange::new(start, end))
}

fn write_outputs(
    dir: &Path,
    output: &RunOutput,
    effective_date: NaiveDate,
    report: &mut RunReport,
) -> Result<()> {
    let record_envelope = new_envelope().with_valid_from();
    write_result_set(dir, "fin-rec-data", &output.records, &record_envelope)?;
    write_result_set(dir, "fin-rec-pricing", &output.pricing, &record_envelope)?;

    let report_envelope = new_envelope().with_effective_date(effective_date);
    for set in &output.variances {
        let path = write_result_set(
            dir,
            set.report.variance_type,
            &set.aggregates,
            &report_envelope,
        )?;
        if let Some(figures) = report
            .reports
            .iter_mut()
            .find(|f| f.variance_type == set.report.variance_type)
        {
            figures.output = Some(path);
        }
    }
    write_result_set(
        dir,
        "fin-rec-report-totals",
        &output.summaries,
        &report_envelope,
    )?;
    Ok(())
}
