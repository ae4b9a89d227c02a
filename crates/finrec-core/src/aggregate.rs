//! Grouped variance aggregation and goods-in-transit classification.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use finrec_model::{ReconRecord, SourceType, VarianceAggregate};

use crate::scrub::round_to;

/// Grouping dimensions available to variance reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    DepotId,
    DepotName,
    DepotCategory,
    Sku,
    MoveorderShort,
    RecordDate,
}

/// One report definition: a target feed and the dimensions to group by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarianceReport {
    pub variance_type: &'static str,
    pub target: SourceType,
    pub dimensions: &'static [Dimension],
}

/// The six deployed report instantiations, in pipeline order.
///
/// The frozen-by-depot-sku report is the only one subject to the optional
/// reporting date-range filter.
pub fn standard_reports() -> Vec<VarianceReport> {
    vec![
        VarianceReport {
            variance_type: "frozen-depot-sku",
            target: SourceType::Frozen,
            dimensions: &[
                Dimension::DepotId,
                Dimension::DepotCategory,
                Dimension::DepotName,
                Dimension::Sku,
            ],
        },
        VarianceReport {
            variance_type: "fresh-sku",
            target: SourceType::Fresh,
            dimensions: &[Dimension::DepotCategory, Dimension::Sku],
        },
        VarianceReport {
            variance_type: "frozen-sku",
            target: SourceType::Frozen,
            dimensions: &[Dimension::DepotCategory, Dimension::Sku],
        },
        VarianceReport {
            variance_type: "fresh-moveorder",
            target: SourceType::Fresh,
            dimensions: &[Dimension::DepotCategory, Dimension::MoveorderShort],
        },
        VarianceReport {
            variance_type: "non-nfsi-moveorder",
            target: SourceType::NonNfsi,
            dimensions: &[Dimension::DepotCategory, Dimension::MoveorderShort],
        },
        VarianceReport {
            variance_type: "frozen-depot-date",
            target: SourceType::Frozen,
            dimensions: &[
                Dimension::DepotCategory,
                Dimension::DepotId,
                Dimension::DepotName,
                Dimension::RecordDate,
            ],
        },
    ]
}

#[derive(Debug, Default, Clone, PartialEq)]
struct MeasureSums {
    pkrd_quantity: i64,
    pkrd_value_tp: f64,
    nfsi_quantity: i64,
    nfsi_value: f64,
    quantity_variance: i64,
    value_variance_tp: f64,
}

impl MeasureSums {
    fn add(&mut self, record: &ReconRecord) {
        self.pkrd_quantity += record.pkrd_quantity;
        self.pkrd_value_tp += record.pkrd_value_tp;
        self.nfsi_quantity += record.nfsi_quantity;
        self.nfsi_value += record.nfsi_value;
        self.quantity_variance += record.quantity_variance;
        self.value_variance_tp += record.value_variance_tp;
    }
}

fn dimension_value(record: &ReconRecord, dimension: Dimension) -> Option<String> {
    match dimension {
        Dimension::DepotId => Some(record.depot_id.clone()),
        Dimension::DepotName => record.depot_name.clone(),
        Dimension::DepotCategory => record.depot_category.clone(),
        Dimension::Sku => Some(record.sku.clone()),
        Dimension::MoveorderShort => Some(record.moveorder_short.clone()),
        Dimension::RecordDate => Some(record.record_date.to_string()),
    }
}

/// Goods-in-transit test over a group's sums: exactly one side entirely
/// zero means the imbalance is timing lag, not a true discrepancy.
fn is_goods_in_transit(sums: &MeasureSums) -> bool {
    let pkrd_zero = sums.pkrd_quantity == 0 && sums.pkrd_value_tp == 0.0;
    let nfsi_zero = sums.nfsi_quantity == 0 && sums.nfsi_value == 0.0;
    pkrd_zero != nfsi_zero
}

/// Runs one variance report over the flattened record set.
///
/// Rows are retained when their source is the ledger or the report's
/// target feed AND their depot category matches the target feed; the
/// retained rows are grouped by the report's dimensions and the six
/// measures summed per group. Group order is the lexicographic order of
/// the dimension values, so output is deterministic.
pub fn aggregate_variance(
    records: &[ReconRecord],
    report: &VarianceReport,
) -> Vec<VarianceAggregate> {
    let target_category = report.target.label();
    let mut groups: BTreeMap<Vec<Option<String>>, MeasureSums> = BTreeMap::new();
    for record in records {
        let in_types =
            record.source_type == SourceType::Pkrd || record.source_type == report.target;
        if !in_types || record.depot_category_str() != target_category {
            continue;
        }
        let key: Vec<Option<String>> = report
            .dimensions
            .iter()
            .map(|dim| dimension_value(record, *dim))
            .collect();
        groups.entry(key).or_default().add(record);
    }

    groups
        .into_iter()
        .map(|(key, sums)| build_aggregate(report, &key, &sums))
        .collect()
}

fn build_aggregate(
    report: &VarianceReport,
    key: &[Option<String>],
    sums: &MeasureSums,
) -> VarianceAggregate {
    let mut aggregate = VarianceAggregate {
        variance_type: report.variance_type.to_string(),
        record_date: None,
        depot_id: None,
        depot_name: None,
        depot_category: String::new(),
        moveorder_short: None,
        sku: None,
        total_pkrd_quantity: sums.pkrd_quantity,
        total_pkrd_value_tp: round_to(sums.pkrd_value_tp, 4),
        total_nfsi_quantity: sums.nfsi_quantity,
        total_nfsi_value: round_to(sums.nfsi_value, 4),
        total_quantity_variance: sums.quantity_variance,
        total_value_variance_tp: round_to(sums.value_variance_tp, 4),
        is_git: false,
        git_quantity: 0,
        git_value: 0.0,
    };
    for (dimension, value) in report.dimensions.iter().zip(key) {
        match dimension {
            Dimension::DepotId => aggregate.depot_id = value.clone(),
            Dimension::DepotName => aggregate.depot_name = value.clone(),
            Dimension::DepotCategory => {
                aggregate.depot_category = value.clone().unwrap_or_default();
            }
            Dimension::Sku => aggregate.sku = value.clone(),
            Dimension::MoveorderShort => aggregate.moveorder_short = value.clone(),
            Dimension::RecordDate => {
                aggregate.record_date =
                    value.as_deref().and_then(|v| v.parse::<NaiveDate>().ok());
            }
        }
    }
    if is_goods_in_transit(sums) {
        aggregate.is_git = true;
        aggregate.git_quantity = aggregate.total_quantity_variance;
        aggregate.git_value = aggregate.total_value_variance_tp;
    }
    aggregate
}
