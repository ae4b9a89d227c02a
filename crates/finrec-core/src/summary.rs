//! Category and grand-total summary roll-ups.

use std::collections::BTreeMap;

use finrec_model::fields::SUMMARY_CATEGORY;
use finrec_model::{SummaryTotal, VarianceAggregate};

use crate::scrub::round_to;

#[derive(Debug, Default, Clone)]
struct SummarySums {
    pkrd_quantity: i64,
    pkrd_value_tp: f64,
    nfsi_quantity: i64,
    nfsi_value: f64,
    quantity_variance: i64,
    value_variance_tp: f64,
    git_quantity: i64,
    git_value: f64,
}

impl SummarySums {
    fn add_aggregate(&mut self, aggregate: &VarianceAggregate) {
        self.pkrd_quantity += aggregate.total_pkrd_quantity;
        self.pkrd_value_tp += aggregate.total_pkrd_value_tp;
        self.nfsi_quantity += aggregate.total_nfsi_quantity;
        self.nfsi_value += aggregate.total_nfsi_value;
        self.quantity_variance += aggregate.total_quantity_variance;
        self.value_variance_tp += aggregate.total_value_variance_tp;
        self.git_quantity += aggregate.git_quantity;
        self.git_value += aggregate.git_value;
    }

    fn add_summary(&mut self, summary: &SummaryTotal) {
        self.pkrd_quantity += summary.pkrd_quantity_sum;
        self.pkrd_value_tp += summary.pkrd_value_tp_sum;
        self.nfsi_quantity += summary.nfsi_quantity_sum;
        self.nfsi_value += summary.nfsi_value_sum;
        self.quantity_variance += summary.quantity_variance_sum;
        self.value_variance_tp += summary.value_variance_sum;
        self.git_quantity += summary.git_quantity_sum;
        self.git_value += summary.git_value_sum;
    }

    fn into_total(self, report_type: &str, category: &str) -> SummaryTotal {
        let value_variance_sum = round_to(self.value_variance_tp, 4);
        let git_value_sum = round_to(self.git_value, 4);
        let ptd_ex_git = round_to(value_variance_sum - git_value_sum, 4);
        SummaryTotal {
            report_type: report_type.to_string(),
            category: category.to_string(),
            pkrd_quantity_sum: self.pkrd_quantity,
            pkrd_value_tp_sum: round_to(self.pkrd_value_tp, 4),
            nfsi_quantity_sum: self.nfsi_quantity,
            nfsi_value_sum: round_to(self.nfsi_value, 4),
            quantity_variance_sum: self.quantity_variance,
            value_variance_sum,
            git_quantity_sum: self.git_quantity,
            git_value_sum,
            pct_of_sales: percentage(value_variance_sum, self.pkrd_value_tp),
            ptd_ex_git,
            pct_of_sales_ex_git: percentage(ptd_ex_git, self.pkrd_value_tp),
        }
    }
}

/// Percentage with a defined zero: when no ledger value moved in the
/// group the ratio is reported as 0 rather than NaN/infinity, keeping
/// the summary sets storable in typed columns.
fn percentage(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        round_to(numerator / denominator * 100.0, 4)
    }
}

/// Rolls one report's variance aggregates up to depot-category level,
/// deriving the percentage-of-sales and ex-goods-in-transit metrics.
pub fn summarize(aggregates: &[VarianceAggregate], report_type: &str) -> Vec<SummaryTotal> {
    let mut groups: BTreeMap<String, SummarySums> = BTreeMap::new();
    for aggregate in aggregates {
        groups
            .entry(aggregate.depot_category.clone())
            .or_default()
            .add_aggregate(aggregate);
    }
    groups
        .into_iter()
        .map(|(category, sums)| sums.into_total(report_type, &category))
        .collect()
}

/// Rolls the category summaries up once more, grouped by report type,
/// re-deriving the ratios from the re-summed measures. Grand-total rows
/// carry the generic summary category tag.
pub fn grand_totals(summaries: &[SummaryTotal]) -> Vec<SummaryTotal> {
    let mut groups: BTreeMap<String, SummarySums> = BTreeMap::new();
    for summary in summaries {
        groups
            .entry(summary.report_type.clone())
            .or_default()
            .add_summary(summary);
    }
    groups
        .into_iter()
        .map(|(report_type, sums)| sums.into_total(&report_type, SUMMARY_CATEGORY))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate(
        category: &str,
        pkrd: (i64, f64),
        nfsi: (i64, f64),
        git: (i64, f64),
    ) -> VarianceAggregate {
        VarianceAggregate {
            variance_type: "fresh-moveorder".to_string(),
            record_date: None,
            depot_id: None,
            depot_name: None,
            depot_category: category.to_string(),
            moveorder_short: Some("MM01".to_string()),
            sku: None,
            total_pkrd_quantity: pkrd.0,
            total_pkrd_value_tp: pkrd.1,
            total_nfsi_quantity: nfsi.0,
            total_nfsi_value: nfsi.1,
            total_quantity_variance: pkrd.0 + nfsi.0,
            total_value_variance_tp: pkrd.1 + nfsi.1,
            is_git: git != (0, 0.0),
            git_quantity: git.0,
            git_value: git.1,
        }
    }

    #[test]
    fn categories_roll_up_with_derived_ratios() {
        let aggregates = vec![
            aggregate("NFSI Fresh", (-100, -400.0), (90, 380.0), (0, 0.0)),
            aggregate("NFSI Fresh", (0, 0.0), (10, 30.0), (10, 30.0)),
        ];
        let totals = summarize(&aggregates, "NFSI Fresh");
        assert_eq!(totals.len(), 1);
        let total = &totals[0];
        assert_eq!(total.report_type, "NFSI Fresh");
        assert_eq!(total.category, "NFSI Fresh");
        assert_eq!(total.pkrd_quantity_sum, -100);
        assert_eq!(total.pkrd_value_tp_sum, -400.0);
        assert_eq!(total.nfsi_quantity_sum, 100);
        assert_eq!(total.value_variance_sum, 10.0);
        assert_eq!(total.git_value_sum, 30.0);
        // 10 / -400 * 100
        assert_eq!(total.pct_of_sales, -2.5);
        assert_eq!(total.ptd_ex_git, -20.0);
        assert_eq!(total.pct_of_sales_ex_git, 5.0);
    }

    #[test]
    fn zero_ledger_value_defines_ratios_as_zero() {
        let aggregates = vec![aggregate("NFSI Fresh", (0, 0.0), (10, 30.0), (10, 30.0))];
        let totals = summarize(&aggregates, "NFSI Fresh");
        let total = &totals[0];
        assert_eq!(total.pkrd_value_tp_sum, 0.0);
        assert_eq!(total.pct_of_sales, 0.0);
        assert_eq!(total.pct_of_sales_ex_git, 0.0);
        assert_eq!(total.ptd_ex_git, 0.0);
    }

    #[test]
    fn grand_totals_group_by_report_type() {
        let fresh = summarize(
            &[aggregate("NFSI Fresh", (-100, -400.0), (90, 380.0), (0, 0.0))],
            "NFSI Fresh",
        );
        let frozen = summarize(
            &[aggregate("NFSI Frozen", (-50, -200.0), (50, 210.0), (0, 0.0))],
            "NFSI Frozen",
        );
        let mut summaries = fresh;
        summaries.extend(frozen);
        let totals = grand_totals(&summaries);
        assert_eq!(totals.len(), 2);
        assert!(totals.iter().all(|t| t.category == "SUMMARY"));
        let fresh_total = totals
            .iter()
            .find(|t| t.report_type == "NFSI Fresh")
            .unwrap();
        assert_eq!(fresh_total.value_variance_sum, -20.0);
        assert_eq!(fresh_total.pct_of_sales, 5.0);
    }
}
