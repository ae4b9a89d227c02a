//! Source-to-canonical column mapping configuration.
//!
//! Each source type owns a fixed table of logical field to physical column
//! name. The table is data, not logic: a compiled-in default matches the
//! deployed feeds, and a JSON override can be loaded for re-pointed
//! extracts. Mapping changes are versioned with the configuration file,
//! never with code.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::source::SourceType;

/// Logical field to physical column mapping for one source type.
///
/// Optional members are absent for sources that do not carry the field
/// (e.g. only the ledger has lot numbers, only receipt feeds have
/// receipt-side quantities).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub date: String,
    pub sku: String,
    pub moveorder: String,
    pub depot: String,
    #[serde(default)]
    pub lot: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub pkrd_qty: Option<String>,
    #[serde(default)]
    pub pkrd_value: Option<String>,
    #[serde(default)]
    pub nfsi_qty: Option<String>,
    #[serde(default)]
    pub nfsi_value: Option<String>,
}

/// Column layout of the transfer-pricing reference extract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingColumns {
    pub date: String,
    pub sku: String,
    pub min: String,
    pub pin: String,
    pub description: String,
    pub room: String,
    pub room_two: String,
    pub trading_category: String,
    pub pack_weight: String,
    pub case_size: String,
    pub case_weight: String,
    pub rm: String,
    pub pack: String,
    pub lab: String,
    pub dist: String,
    pub oh: String,
    pub depot_loss: String,
    pub total: String,
    pub rm_case: String,
    pub pack_case: String,
    pub lab_case: String,
    pub dist_case: String,
    pub oh_case: String,
    pub depot_loss_case: String,
    pub total_case: String,
}

/// The full per-source mapping set for a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMappings {
    pub pkrd: ColumnMapping,
    pub fresh: ColumnMapping,
    pub frozen: ColumnMapping,
    pub non_nfsi: ColumnMapping,
    pub sales: ColumnMapping,
    pub pricing: PricingColumns,
}

impl SourceMappings {
    pub fn columns(&self, source: SourceType) -> &ColumnMapping {
        match source {
            SourceType::Pkrd => &self.pkrd,
            SourceType::Fresh => &self.fresh,
            SourceType::Frozen => &self.frozen,
            SourceType::NonNfsi => &self.non_nfsi,
            SourceType::Sales => &self.sales,
        }
    }

    /// Loads a mapping override from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<SourceMappings> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl Default for SourceMappings {
    fn default() -> Self {
        SourceMappings {
            pkrd: ColumnMapping {
                date: "Move Date".into(),
                sku: "Item No.".into(),
                moveorder: "Move Order".into(),
                depot: "Store".into(),
                lot: Some("Lot Number".into()),
                order: Some("SMS_ORDER_NUMBER".into()),
                pkrd_qty: Some("Qty".into()),
                pkrd_value: Some("Value".into()),
                nfsi_qty: None,
                nfsi_value: None,
            },
            fresh: ColumnMapping {
                date: "ACTUAL_TRAN_DATE".into(),
                sku: "LPC".into(),
                moveorder: "SORDNO_ITM1".into(),
                depot: "DEPOT".into(),
                lot: None,
                order: Some("ORDER_NO".into()),
                pkrd_qty: None,
                pkrd_value: None,
                nfsi_qty: Some("PACKS_RECEIVED".into()),
                nfsi_value: Some("TOTAL_COST".into()),
            },
            frozen: ColumnMapping {
                date: "ACTUAL_TRAN_DATE".into(),
                sku: "LPC".into(),
                moveorder: "SORDNO_ITM1".into(),
                depot: "DEPOT".into(),
                lot: None,
                order: Some("ORDER_NO".into()),
                pkrd_qty: None,
                pkrd_value: None,
                nfsi_qty: Some("PACKS_RECEIVED".into()),
                nfsi_value: Some("TOTAL_COST".into()),
            },
            non_nfsi: ColumnMapping {
                date: "Invoice Date".into(),
                sku: "Item No".into(),
                moveorder: "Sales Order No".into(),
                depot: "Customer No".into(),
                lot: None,
                order: Some("PO # (1)".into()),
                pkrd_qty: None,
                pkrd_value: None,
                nfsi_qty: Some("QTY In Cases".into()),
                nfsi_value: Some("Total Price".into()),
            },
            sales: ColumnMapping {
                date: "CUSTREQDTE_SOR".into(),
                sku: "PARTNO".into(),
                moveorder: "SORDNO_ITM1".into(),
                depot: "Textbox268".into(),
                lot: None,
                order: Some("SMS_ORDER_NUMBER".into()),
                pkrd_qty: None,
                pkrd_value: None,
                nfsi_qty: Some("SO_DESPATCHED_QUANTITY".into()),
                nfsi_value: None,
            },
            pricing: PricingColumns {
                date: "pricing_date".into(),
                sku: "FB Ref".into(),
                min: "MIN".into(),
                pin: "PIN".into(),
                description: "Description".into(),
                room: "Room".into(),
                room_two: "Room 2".into(),
                trading_category: "Trading Category".into(),
                pack_weight: "Pack Weight".into(),
                case_size: "Case Size".into(),
                case_weight: "Case Weight".into(),
                rm: "RM".into(),
                pack: "Pack".into(),
                lab: "Lab".into(),
                dist: "Dist".into(),
                oh: "OH".into(),
                depot_loss: "Depot Loss".into(),
                total: "Total".into(),
                rm_case: "RM_case".into(),
                pack_case: "Pack_case".into(),
                lab_case: "Lab_case".into(),
                dist_case: "Dist_case".into(),
                oh_case: "OH_case".into(),
                depot_loss_case: "Depot Loss_case".into(),
                total_case: "Total_case".into(),
            },
        }
    }
}
