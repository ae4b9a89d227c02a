use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::TableRecord;
use crate::fields::format_numeric;

/// One transfer-pricing reference row.
///
/// Unit costs are per pack; `_case` members are the per-case variants.
/// `total_case` is the case price used to derive ledger transfer-priced
/// values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub pricing_date: NaiveDate,
    pub sku: String,
    pub min: Option<String>,
    pub pin: Option<String>,
    pub long_desc: String,
    pub room: String,
    pub room_two: Option<String>,
    pub trading_category: Option<String>,
    pub pack_weight: f64,
    pub case_size: i64,
    pub case_weight: f64,
    pub rm: f64,
    pub pack: f64,
    pub lab: f64,
    pub dist: f64,
    pub oh: f64,
    pub depot_loss: f64,
    pub total: f64,
    pub rm_case: f64,
    pub pack_case: f64,
    pub lab_case: f64,
    pub dist_case: f64,
    pub oh_case: f64,
    pub depot_loss_case: f64,
    pub total_case: f64,
}

impl TableRecord for Pricing {
    fn field_names() -> &'static [&'static str] {
        &[
            "pricing_date",
            "sku",
            "min",
            "pin",
            "long_desc",
            "room",
            "room_two",
            "trading_category",
            "pack_weight",
            "case_size",
            "case_weight",
            "rm",
            "pack",
            "lab",
            "dist",
            "oh",
            "depot_loss",
            "total",
            "rm_case",
            "pack_case",
            "lab_case",
            "dist_case",
            "oh_case",
            "depot_loss_case",
            "total_case",
        ]
    }

    fn field_values(&self) -> Vec<String> {
        vec![
            self.pricing_date.to_string(),
            self.sku.clone(),
            self.min.clone().unwrap_or_default(),
            self.pin.clone().unwrap_or_default(),
            self.long_desc.clone(),
            self.room.clone(),
            self.room_two.clone().unwrap_or_default(),
            self.trading_category.clone().unwrap_or_default(),
            format_numeric(self.pack_weight),
            self.case_size.to_string(),
            format_numeric(self.case_weight),
            format_numeric(self.rm),
            format_numeric(self.pack),
            format_numeric(self.lab),
            format_numeric(self.dist),
            format_numeric(self.oh),
            format_numeric(self.depot_loss),
            format_numeric(self.total),
            format_numeric(self.rm_case),
            format_numeric(self.pack_case),
            format_numeric(self.lab_case),
            format_numeric(self.dist_case),
            format_numeric(self.oh_case),
            format_numeric(self.depot_loss_case),
            format_numeric(self.total_case),
        ]
    }
}
