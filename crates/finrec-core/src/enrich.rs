//! Reference-data enrichment: depot decode and transfer pricing.
//!
//! Both lookups are built once from their reference extracts and never
//! written again; workers share them by plain `&` reference. A miss is a
//! no-op: the enrichment fields are simply absent from the row.

use std::collections::BTreeMap;

use finrec_model::fields::{CASE_PRICE, DEPOT_CATEGORY, DEPOT_ID, DEPOT_NAME, UNIT_PRICE};
use finrec_model::{DepotInfo, Pricing, PricingColumns, RawRow, SourceType};

use crate::scrub::{clean_description, float_or_zero, int_or_zero, max_date, parse_date};

/// Depot id to name/category decode table.
#[derive(Debug, Clone, Default)]
pub struct DepotTable {
    depots: BTreeMap<String, DepotInfo>,
}

impl DepotTable {
    /// Builds the table from reference rows keyed on the canonical
    /// `depot_id`/`depot_name`/`depot_category` names.
    pub fn from_rows(rows: &[RawRow]) -> DepotTable {
        let mut depots = BTreeMap::new();
        for row in rows {
            let Some(id) = row.get(DEPOT_ID) else {
                continue;
            };
            depots.insert(
                id.clone(),
                DepotInfo {
                    depot_name: row.get(DEPOT_NAME).cloned().unwrap_or_default(),
                    depot_category: row.get(DEPOT_CATEGORY).cloned().unwrap_or_default(),
                },
            );
        }
        DepotTable { depots }
    }

    pub fn get(&self, depot_id: &str) -> Option<&DepotInfo> {
        self.depots.get(depot_id)
    }

    pub fn len(&self) -> usize {
        self.depots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depots.is_empty()
    }

    /// Attaches `depot_name`/`depot_category` by the row's derived depot
    /// id. No-op on a miss.
    pub fn enrich(&self, row: &mut RawRow) {
        let Some(id) = row.get(DEPOT_ID) else {
            return;
        };
        if let Some(info) = self.depots.get(id) {
            row.insert(DEPOT_NAME.to_string(), info.depot_name.clone());
            row.insert(DEPOT_CATEGORY.to_string(), info.depot_category.clone());
        }
    }
}

/// Pricing attributes attached to ledger rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceDecode {
    pub unit_price: f64,
    pub case_price: f64,
}

/// SKU to transfer-price decode table, built from the scrubbed pricing
/// records and keyed on the pricing extract's raw SKU reference.
#[derive(Debug, Clone, Default)]
pub struct PricingTable {
    prices: BTreeMap<String, PriceDecode>,
}

impl PricingTable {
    pub fn from_records(records: &[Pricing]) -> PricingTable {
        let mut prices = BTreeMap::new();
        for record in records {
            prices.insert(
                record.sku.clone(),
                PriceDecode {
                    unit_price: record.total,
                    case_price: record.total_case,
                },
            );
        }
        PricingTable { prices }
    }

    pub fn get(&self, sku: &str) -> Option<&PriceDecode> {
        self.prices.get(sku)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Attaches `unit_price`/`case_price` to a ledger row, keyed on the
    /// row's raw SKU column (the pricing extract shares the ledger's raw
    /// numbering). Non-ledger rows and misses are no-ops.
    pub fn enrich(&self, source: SourceType, row: &mut RawRow, sku_column: &str) {
        if !source.is_ledger() {
            return;
        }
        let Some(sku) = row.get(sku_column) else {
            return;
        };
        if let Some(decode) = self.prices.get(sku) {
            row.insert(UNIT_PRICE.to_string(), decode.unit_price.to_string());
            row.insert(CASE_PRICE.to_string(), decode.case_price.to_string());
        }
    }
}

/// Builds one pricing record from a raw pricing row, scrubbing currency
/// cells and descriptions. A missing or malformed pricing date falls back
/// to the far-future sentinel rather than failing the reference load.
pub fn build_pricing_record(row: &RawRow, cols: &PricingColumns) -> Pricing {
    let value = |column: &str| row.get(column).cloned().unwrap_or_default();
    let optional = |column: &str| row.get(column).cloned().filter(|v| !v.is_empty());
    let money = |column: &str| float_or_zero(&value(column));
    let pricing_date = row
        .get(&cols.date)
        .and_then(|raw| parse_date(raw).ok())
        .unwrap_or_else(max_date);
    Pricing {
        pricing_date,
        sku: value(&cols.sku),
        min: optional(&cols.min),
        pin: optional(&cols.pin),
        long_desc: clean_description(&value(&cols.description)),
        room: clean_description(&value(&cols.room)),
        room_two: optional(&cols.room_two).map(|v| clean_description(&v)),
        trading_category: optional(&cols.trading_category).map(|v| clean_description(&v)),
        pack_weight: money(&cols.pack_weight),
        case_size: int_or_zero(&value(&cols.case_size)),
        case_weight: money(&cols.case_weight),
        rm: money(&cols.rm),
        pack: money(&cols.pack),
        lab: money(&cols.lab),
        dist: money(&cols.dist),
        oh: money(&cols.oh),
        depot_loss: money(&cols.depot_loss),
        total: money(&cols.total),
        rm_case: money(&cols.rm_case),
        pack_case: money(&cols.pack_case),
        lab_case: money(&cols.lab_case),
        dist_case: money(&cols.dist_case),
        oh_case: money(&cols.oh_case),
        depot_loss_case: money(&cols.depot_loss_case),
        total_case: money(&cols.total_case),
    }
}
