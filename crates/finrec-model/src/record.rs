use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::TableRecord;
use crate::fields::format_numeric;
use crate::source::SourceType;

/// The reconciled unit of record: one ledger movement or one receipt-feed
/// row, normalized into a shared shape after the sales join.
///
/// Exactly one side is populated per record: `pkrd_*` measures are
/// non-zero only for ledger rows, `nfsi_*` measures only for receipt
/// rows. The variance fields are the signed sum of both sides, so once
/// matched rows are combined downstream the sum is the true imbalance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconRecord {
    /// Business date of the movement or receipt. Unparseable dates take a
    /// far-future sentinel so they sort last instead of aborting the run.
    pub record_date: NaiveDate,
    pub source_type: SourceType,
    /// Item identifier, shifted into the ledger SKU namespace.
    pub sku: String,
    /// Move/sales order id truncated to its primary segment.
    pub moveorder_short: String,
    /// Ledger rows only; empty for every other source.
    pub lot_number: String,
    pub depot_id: String,
    pub depot_name: Option<String>,
    pub depot_category: Option<String>,
    pub sku_moveorder: String,
    pub order_id: Option<String>,
    pub sku_and_order: String,
    pub pkrd_unit_price: f64,
    pub pkrd_case_price: f64,
    pub pkrd_quantity: i64,
    pub pkrd_value: f64,
    pub pkrd_value_tp: f64,
    pub nfsi_quantity: i64,
    pub nfsi_value: f64,
    pub quantity_variance: i64,
    pub value_variance: f64,
    pub value_variance_tp: f64,
    /// SHA-256 content hash used as a stable identity for downstream
    /// storage; not an in-memory equality key.
    pub fingerprint: String,
}

impl ReconRecord {
    pub fn depot_category_str(&self) -> &str {
        self.depot_category.as_deref().unwrap_or("")
    }
}

impl TableRecord for ReconRecord {
    fn field_names() -> &'static [&'static str] {
        &[
            "record_date",
            "source_data_type",
            "sku",
            "moveorder_short",
            "lot_number",
            "depot_id",
            "depot_name",
            "depot_category",
            "sku_moveorder",
            "order_id",
            "sku_and_order",
            "pkrd_unit_price",
            "pkrd_case_price",
            "pkrd_quantity",
            "pkrd_value",
            "pkrd_value_tp",
            "nfsi_quantity",
            "nfsi_value",
            "quantity_variance",
            "value_variance",
            "value_variance_tp",
            "fingerprint",
        ]
    }

    fn field_values(&self) -> Vec<String> {
        vec![
            self.record_date.to_string(),
            self.source_type.label().to_string(),
            self.sku.clone(),
            self.moveorder_short.clone(),
            self.lot_number.clone(),
            self.depot_id.clone(),
            self.depot_name.clone().unwrap_or_default(),
            self.depot_category.clone().unwrap_or_default(),
            self.sku_moveorder.clone(),
            self.order_id.clone().unwrap_or_default(),
            self.sku_and_order.clone(),
            format_numeric(self.pkrd_unit_price),
            format_numeric(self.pkrd_case_price),
            self.pkrd_quantity.to_string(),
            format_numeric(self.pkrd_value),
            format_numeric(self.pkrd_value_tp),
            self.nfsi_quantity.to_string(),
            format_numeric(self.nfsi_value),
            self.quantity_variance.to_string(),
            format_numeric(self.value_variance),
            format_numeric(self.value_variance_tp),
            self.fingerprint.clone(),
        ]
    }
}
