//! Canonical field derivation for raw source rows.
//!
//! Every derivation here is a pure function of the row, its source type
//! and the mapping configuration: same inputs, same outputs, no side
//! effects beyond diagnostics. The derived fields are inserted into the
//! row under reserved logical names ahead of the join stages.

use tracing::warn;

use finrec_model::fields::{
    DEPOT_ID, MISSING_MO, MOVEORDER_SHORT, ORDER_ID, SKU, SKU_AND_ORDER, SKU_MOVEORDER,
};
use finrec_model::{RawRow, SourceMappings, SourceType};

use crate::scrub::composite_key;

/// Offset shifting receipt-feed SKUs into the ledger numbering scheme.
const SKU_NAMESPACE_OFFSET: i64 = 60_000_000;

/// Normalized item identifier.
///
/// Receipt feeds number items in a shorter internal scheme; their raw
/// SKUs are shifted by a fixed offset into the ledger namespace so every
/// source shares one identifier space. The third-party feed mixes both
/// schemes: identifiers of 1-7 characters are internal and shifted,
/// longer ones are already ledger-native. Ledger and sales SKUs pass
/// through unchanged.
pub fn item_number(source: SourceType, row: &RawRow, mappings: &SourceMappings) -> String {
    let raw = mapped_value(row, &mappings.columns(source).sku);
    let needs_offset = match source {
        SourceType::Fresh | SourceType::Frozen => !raw.is_empty(),
        SourceType::NonNfsi => (1..=7).contains(&raw.len()),
        SourceType::Pkrd | SourceType::Sales => false,
    };
    if !needs_offset {
        return raw;
    }
    match raw.parse::<i64>() {
        Ok(value) => (value + SKU_NAMESPACE_OFFSET).to_string(),
        Err(_) => {
            warn!(sku = %raw, source = %source, "non-numeric sku left unshifted");
            raw
        }
    }
}

/// Move/sales order id truncated to its primary segment (text before the
/// first `/`) for ledger and sales rows; raw value otherwise. A missing
/// column maps to the `MISSING_MO` sentinel.
pub fn short_moveorder(source: SourceType, row: &RawRow, mappings: &SourceMappings) -> String {
    let column = &mappings.columns(source).moveorder;
    let Some(raw) = row.get(column) else {
        return MISSING_MO.to_string();
    };
    if !raw.is_empty() && source.splits_moveorder() {
        raw.split('/').next().unwrap_or_default().to_string()
    } else {
        raw.clone()
    }
}

/// Lot number: ledger rows only, empty for every other source.
pub fn lot_number(source: SourceType, row: &RawRow, mappings: &SourceMappings) -> String {
    match &mappings.columns(source).lot {
        Some(column) if source.is_ledger() => mapped_value(row, column),
        _ => String::new(),
    }
}

/// Depot identifier. The receipt feeds prefix their depot codes with a
/// depot-type marker; the id proper is the last three characters.
pub fn depot_id(source: SourceType, row: &RawRow, mappings: &SourceMappings) -> String {
    let raw = mapped_value(row, &mappings.columns(source).depot);
    if !raw.is_empty() && source.uses_prefixed_depot() {
        let chars: Vec<char> = raw.chars().collect();
        let start = chars.len().saturating_sub(3);
        chars[start..].iter().collect()
    } else {
        raw
    }
}

/// Order number, absent when the source has no configured order column
/// or the row lacks it.
pub fn order_number(source: SourceType, row: &RawRow, mappings: &SourceMappings) -> Option<String> {
    let column = mappings.columns(source).order.as_ref()?;
    row.get(column).cloned()
}

/// The derived pre-join field set for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedFields {
    pub sku: String,
    pub moveorder_short: String,
    pub order_id: Option<String>,
    pub depot_id: String,
    pub sku_moveorder: String,
    pub sku_and_order: String,
}

/// Derives identifiers, keys and depot id for a row of any source type.
pub fn computed_fields(
    source: SourceType,
    row: &RawRow,
    mappings: &SourceMappings,
) -> ComputedFields {
    let sku = item_number(source, row, mappings);
    let moveorder_short = short_moveorder(source, row, mappings);
    let order_id = order_number(source, row, mappings);
    let depot = depot_id(source, row, mappings);
    let sku_moveorder = composite_key(&sku, &moveorder_short);
    let sku_and_order = composite_key(&sku, order_id.as_deref().unwrap_or(""));
    ComputedFields {
        sku,
        moveorder_short,
        order_id,
        depot_id: depot,
        sku_moveorder,
        sku_and_order,
    }
}

/// Merges the computed fields into the row under the reserved names.
pub fn apply_computed_fields(source: SourceType, row: &mut RawRow, mappings: &SourceMappings) {
    let fields = computed_fields(source, row, mappings);
    row.insert(SKU.to_string(), fields.sku);
    row.insert(MOVEORDER_SHORT.to_string(), fields.moveorder_short);
    row.insert(DEPOT_ID.to_string(), fields.depot_id);
    row.insert(SKU_MOVEORDER.to_string(), fields.sku_moveorder);
    row.insert(SKU_AND_ORDER.to_string(), fields.sku_and_order);
    if let Some(order_id) = fields.order_id {
        row.insert(ORDER_ID.to_string(), order_id);
    }
}

fn mapped_value(row: &RawRow, column: &str) -> String {
    row.get(column).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mappings() -> SourceMappings {
        SourceMappings::default()
    }

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn receipt_skus_shift_into_ledger_namespace() {
        let fresh = row(&[("LPC", "0998877")]);
        assert_eq!(
            item_number(SourceType::Fresh, &fresh, &mappings()),
            "60998877"
        );
    }

    #[test]
    fn non_nfsi_skus_shift_only_when_short() {
        let short = row(&[("Item No", "0998877")]);
        let long = row(&[("Item No", "60897654")]);
        assert_eq!(
            item_number(SourceType::NonNfsi, &short, &mappings()),
            "60998877"
        );
        assert_eq!(
            item_number(SourceType::NonNfsi, &long, &mappings()),
            "60897654"
        );
    }

    #[test]
    fn ledger_skus_pass_through() {
        let pkrd = row(&[("Item No.", "60330045")]);
        assert_eq!(
            item_number(SourceType::Pkrd, &pkrd, &mappings()),
            "60330045"
        );
    }

    #[test]
    fn ledger_moveorders_truncate_at_first_slash() {
        let pkrd = row(&[("Move Order", "MM012345/005")]);
        assert_eq!(
            short_moveorder(SourceType::Pkrd, &pkrd, &mappings()),
            "MM012345"
        );
        let frozen = row(&[("SORDNO_ITM1", "SO888/001")]);
        assert_eq!(
            short_moveorder(SourceType::Frozen, &frozen, &mappings()),
            "SO888/001"
        );
    }

    #[test]
    fn missing_moveorder_column_takes_sentinel() {
        let pkrd = row(&[]);
        assert_eq!(
            short_moveorder(SourceType::Pkrd, &pkrd, &mappings()),
            "MISSING_MO"
        );
        let empty = row(&[("Move Order", "")]);
        assert_eq!(short_moveorder(SourceType::Pkrd, &empty, &mappings()), "");
    }

    #[test]
    fn receipt_depot_codes_drop_their_prefix() {
        let fresh = row(&[("DEPOT", "FD709")]);
        assert_eq!(depot_id(SourceType::Fresh, &fresh, &mappings()), "709");
        let pkrd = row(&[("Store", "709")]);
        assert_eq!(depot_id(SourceType::Pkrd, &pkrd, &mappings()), "709");
    }

    #[test]
    fn lot_numbers_are_ledger_only() {
        let pkrd = row(&[("Lot Number", "L42")]);
        assert_eq!(lot_number(SourceType::Pkrd, &pkrd, &mappings()), "L42");
        let fresh = row(&[("Lot Number", "L42")]);
        assert_eq!(lot_number(SourceType::Fresh, &fresh, &mappings()), "");
    }

    #[test]
    fn computed_fields_build_both_composite_keys() {
        let pkrd = row(&[
            ("Item No.", "60330045"),
            ("Move Order", "MM012345/005"),
            ("Store", "709"),
            ("SMS_ORDER_NUMBER", "8811223"),
        ]);
        let fields = computed_fields(SourceType::Pkrd, &pkrd, &mappings());
        assert_eq!(fields.sku_moveorder, "60330045_MM012345");
        assert_eq!(fields.sku_and_order, "60330045_8811223");
        assert_eq!(fields.order_id.as_deref(), Some("8811223"));
    }

    #[test]
    fn computed_fields_are_pure() {
        let fresh = row(&[
            ("LPC", "0998877"),
            ("SORDNO_ITM1", "SO888"),
            ("DEPOT", "FD709"),
            ("ORDER_NO", "44556"),
        ]);
        let first = computed_fields(SourceType::Fresh, &fresh, &mappings());
        let second = computed_fields(SourceType::Fresh, &fresh, &mappings());
        assert_eq!(first, second);
    }
}
