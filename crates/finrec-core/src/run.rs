//! Full reconciliation run over ingested source tables.
//!
//! Mirrors the deployed dataflow: sales rows are normalized once and
//! projected into two keyed bridge extracts; the ledger joins to sales on
//! `sku_moveorder` to recover order numbers; each receipt feed joins to
//! sales on `order_id` to recover the shared sku/moveorder identity; the
//! joined rows become canonical records, which feed the six variance
//! reports and the summary roll-ups. Every stage is a pure function of
//! its input rows plus the read-only reference tables, so re-execution
//! over any partition of the inputs is safe.

use anyhow::Result;
use tracing::{info, info_span};

use finrec_model::fields::{ORDER_ID, SKU_AND_ORDER, SKU_MOVEORDER};
use finrec_model::{Pricing, RawRow, ReconRecord, SourceMappings, SourceType, SummaryTotal};

use crate::aggregate::{VarianceReport, aggregate_variance, standard_reports};
use crate::enrich::{DepotTable, PricingTable, build_pricing_record};
use crate::filter::{
    DateRange, exclude_depot_prefix, exclude_moveorder_prefix, retain_category_prefix,
    retain_date_range,
};
use crate::join::{keyed_by, left_join, project};
use crate::normalize::apply_computed_fields;
use crate::record::build_record;
use crate::summary::{grand_totals, summarize};

/// Ledger move orders with this prefix are scrap/sample movements.
const EXCLUDED_MOVEORDER_PREFIX: &str = "SS";
/// Central-stores depot excluded from depot-level reconciliation.
const EXCLUDED_DEPOT_PREFIX: &str = "CSL";

/// The well-formed row sets of one reconciliation snapshot.
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub pkrd: Vec<RawRow>,
    pub sales: Vec<RawRow>,
    pub fresh: Vec<RawRow>,
    pub frozen: Vec<RawRow>,
    pub non_nfsi: Vec<RawRow>,
    pub pricing: Vec<RawRow>,
    pub depots: Vec<RawRow>,
}

/// One report's aggregates, tagged with its definition.
#[derive(Debug, Clone)]
pub struct VarianceSet {
    pub report: VarianceReport,
    pub aggregates: Vec<finrec_model::VarianceAggregate>,
}

/// Everything a run produces for persistence.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub records: Vec<ReconRecord>,
    pub pricing: Vec<Pricing>,
    pub variances: Vec<VarianceSet>,
    /// Per-category summaries followed by the grand-total rows.
    pub summaries: Vec<SummaryTotal>,
}

/// Executes a full reconciliation over one input snapshot.
pub fn run(
    tables: SourceTables,
    mappings: &SourceMappings,
    range: &DateRange,
) -> Result<RunOutput> {
    let span = info_span!("reconcile");
    let _guard = span.enter();

    // Reference tables: built once, read-only from here on.
    let depots = DepotTable::from_rows(&tables.depots);
    let pricing_records: Vec<Pricing> = tables
        .pricing
        .iter()
        .map(|row| build_pricing_record(row, &mappings.pricing))
        .collect();
    let prices = PricingTable::from_records(&pricing_records);
    info!(
        depots = depots.len(),
        prices = prices.len(),
        "reference tables loaded"
    );

    // Sales bridge extracts, keyed both ways.
    let sales_slice = sales_slice(mappings);
    let slice_refs: Vec<&str> = sales_slice.iter().map(String::as_str).collect();
    let mut sales_rows = tables.sales;
    for row in &mut sales_rows {
        apply_computed_fields(SourceType::Sales, row, mappings);
    }
    let sales_extracts: Vec<RawRow> = sales_rows
        .iter()
        .map(|row| project(row, &slice_refs))
        .collect();
    let sales_by_moveorder = keyed_by(sales_extracts.clone(), SKU_MOVEORDER);
    let sales_by_order = keyed_by(sales_extracts, ORDER_ID);

    // Ledger: normalize, enrich, bridge to sales, build and filter.
    let mut pkrd_rows = tables.pkrd;
    for row in &mut pkrd_rows {
        apply_computed_fields(SourceType::Pkrd, row, mappings);
        depots.enrich(row);
        prices.enrich(SourceType::Pkrd, row, &mappings.pkrd.sku);
    }
    let pkrd_joined = left_join(keyed_by(pkrd_rows, SKU_MOVEORDER), &sales_by_moveorder);
    let mut records = Vec::new();
    for row in &pkrd_joined {
        let record = build_record(SourceType::Pkrd, row, mappings)?;
        if exclude_moveorder_prefix(&record, EXCLUDED_MOVEORDER_PREFIX)
            && exclude_depot_prefix(&record, EXCLUDED_DEPOT_PREFIX)
        {
            records.push(record);
        }
    }
    let ledger_count = records.len();

    // Receipt feeds: normalize, enrich, bridge to sales, build.
    for (source, rows) in [
        (SourceType::Fresh, tables.fresh),
        (SourceType::Frozen, tables.frozen),
        (SourceType::NonNfsi, tables.non_nfsi),
    ] {
        let mut rows = rows;
        for row in &mut rows {
            apply_computed_fields(source, row, mappings);
            depots.enrich(row);
        }
        let joined = left_join(keyed_by(rows, ORDER_ID), &sales_by_order);
        for row in &joined {
            let record = build_record(source, row, mappings)?;
            if source == SourceType::NonNfsi
                && !retain_category_prefix(&record, SourceType::NonNfsi.label())
            {
                continue;
            }
            records.push(record);
        }
    }
    info!(
        ledger = ledger_count,
        total = records.len(),
        "canonical records built"
    );

    // Variance reports. The reporting window constrains only the
    // frozen-by-depot-sku report.
    let mut variances = Vec::new();
    for report in standard_reports() {
        let aggregates = if report.variance_type == "frozen-depot-sku" && !range.is_unbounded() {
            let windowed: Vec<ReconRecord> = records
                .iter()
                .filter(|record| retain_date_range(record, range))
                .cloned()
                .collect();
            aggregate_variance(&windowed, &report)
        } else {
            aggregate_variance(&records, &report)
        };
        info!(
            report = report.variance_type,
            groups = aggregates.len(),
            "variance aggregated"
        );
        variances.push(VarianceSet { report, aggregates });
    }

    // Summary roll-ups: fresh over its move-order report, non-NFSI over
    // its move-order report, frozen over its depot/date report.
    let mut summaries = Vec::new();
    for (variance_type, report_type) in [
        ("fresh-moveorder", SourceType::Fresh),
        ("non-nfsi-moveorder", SourceType::NonNfsi),
        ("frozen-depot-date", SourceType::Frozen),
    ] {
        if let Some(set) = variances
            .iter()
            .find(|set| set.report.variance_type == variance_type)
        {
            summaries.extend(summarize(&set.aggregates, report_type.label()));
        }
    }
    let totals = grand_totals(&summaries);
    summaries.extend(totals);

    Ok(RunOutput {
        records,
        pricing: pricing_records,
        variances,
        summaries,
    })
}

/// The sales-extract fields carried across the joins: both composite
/// keys, both derived ids, and the physical order/move-order columns so
/// they overwrite the left side's own on a match.
fn sales_slice(mappings: &SourceMappings) -> Vec<String> {
    let sales = &mappings.sales;
    let mut slice = vec![
        SKU_MOVEORDER.to_string(),
        SKU_AND_ORDER.to_string(),
        ORDER_ID.to_string(),
        sales.moveorder.clone(),
    ];
    if let Some(order) = &sales.order {
        slice.push(order.clone());
    }
    slice
}
