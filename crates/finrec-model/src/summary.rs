use serde::{Deserialize, Serialize};

use crate::TableRecord;
use crate::fields::format_numeric;

/// Category-level roll-up of one report's variance aggregates, plus the
/// grand-total rows derived from the category summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTotal {
    pub report_type: String,
    /// Depot category for per-category rows; `SUMMARY` on grand totals.
    pub category: String,
    pub pkrd_quantity_sum: i64,
    pub pkrd_value_tp_sum: f64,
    pub nfsi_quantity_sum: i64,
    pub nfsi_value_sum: f64,
    pub quantity_variance_sum: i64,
    pub value_variance_sum: f64,
    pub git_quantity_sum: i64,
    pub git_value_sum: f64,
    /// Variance as a percentage of ledger transfer-priced value.
    pub pct_of_sales: f64,
    /// Variance to date excluding goods in transit.
    pub ptd_ex_git: f64,
    pub pct_of_sales_ex_git: f64,
}

impl TableRecord for SummaryTotal {
    fn field_names() -> &'static [&'static str] {
        &[
            "report_type",
            "category",
            "pkrd_quantity_sum",
            "pkrd_value_tp_sum",
            "nfsi_quantity_sum",
            "nfsi_value_sum",
            "quantity_variance_sum",
            "value_variance_sum",
            "git_quantity_sum",
            "git_value_sum",
            "pct_of_sales",
            "ptd_ex_git",
            "pct_of_sales_ex_git",
        ]
    }

    fn field_values(&self) -> Vec<String> {
        vec![
            self.report_type.clone(),
            self.category.clone(),
            self.pkrd_quantity_sum.to_string(),
            format_numeric(self.pkrd_value_tp_sum),
            self.nfsi_quantity_sum.to_string(),
            format_numeric(self.nfsi_value_sum),
            self.quantity_variance_sum.to_string(),
            format_numeric(self.value_variance_sum),
            self.git_quantity_sum.to_string(),
            format_numeric(self.git_value_sum),
            format_numeric(self.pct_of_sales),
            format_numeric(self.ptd_ex_git),
            format_numeric(self.pct_of_sales_ex_git),
        ]
    }
}
