use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::TableRecord;
use crate::fields::format_numeric;

/// One grouped variance row for a single report.
///
/// Dimension members are populated only when the owning report groups on
/// them; `depot_category` is always present because every report filters
/// and groups by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarianceAggregate {
    /// Report tag, e.g. `frozen-depot-sku`.
    pub variance_type: String,
    pub record_date: Option<NaiveDate>,
    pub depot_id: Option<String>,
    pub depot_name: Option<String>,
    pub depot_category: String,
    pub moveorder_short: Option<String>,
    pub sku: Option<String>,
    pub total_pkrd_quantity: i64,
    pub total_pkrd_value_tp: f64,
    pub total_nfsi_quantity: i64,
    pub total_nfsi_value: f64,
    pub total_quantity_variance: i64,
    pub total_value_variance_tp: f64,
    /// True when exactly one side of the group is entirely zero: the
    /// variance is attributed to transit lag, not a discrepancy.
    pub is_git: bool,
    pub git_quantity: i64,
    pub git_value: f64,
}

impl TableRecord for VarianceAggregate {
    fn field_names() -> &'static [&'static str] {
        &[
            "variance_type",
            "record_date",
            "depot_id",
            "depot_name",
            "depot_category",
            "moveorder_short",
            "sku",
            "total_pkrd_quantity",
            "total_pkrd_value_tp",
            "total_nfsi_quantity",
            "total_nfsi_value",
            "total_quantity_variance",
            "total_value_variance_tp",
            "is_git",
            "git_quantity",
            "git_value",
        ]
    }

    fn field_values(&self) -> Vec<String> {
        vec![
            self.variance_type.clone(),
            self.record_date.map(|d| d.to_string()).unwrap_or_default(),
            self.depot_id.clone().unwrap_or_default(),
            self.depot_name.clone().unwrap_or_default(),
            self.depot_category.clone(),
            self.moveorder_short.clone().unwrap_or_default(),
            self.sku.clone().unwrap_or_default(),
            self.total_pkrd_quantity.to_string(),
            format_numeric(self.total_pkrd_value_tp),
            self.total_nfsi_quantity.to_string(),
            format_numeric(self.total_nfsi_value),
            self.total_quantity_variance.to_string(),
            format_numeric(self.total_value_variance_tp),
            if self.is_git { "true" } else { "false" }.to_string(),
            self.git_quantity.to_string(),
            format_numeric(self.git_value),
        ]
    }
}
