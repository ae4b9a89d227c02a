//! Reserved logical field names and sentinel values.
//!
//! Rows travel between ingest, normalization, enrichment and join as flat
//! string maps keyed on physical column names. Derived fields are inserted
//! under the reserved names below; they never collide with source columns,
//! which are all mixed-case or spaced.

use std::collections::BTreeMap;

/// A single source row: physical column name (or reserved logical field
/// name) mapped to its raw string value.
pub type RawRow = BTreeMap<String, String>;

// Reserved logical field names.
pub const DEPOT_ID: &str = "depot_id";
pub const DEPOT_NAME: &str = "depot_name";
pub const DEPOT_CATEGORY: &str = "depot_category";
pub const SKU: &str = "sku";
pub const MOVEORDER_SHORT: &str = "moveorder_short";
pub const ORDER_ID: &str = "order_id";
pub const SKU_MOVEORDER: &str = "sku_moveorder";
pub const SKU_AND_ORDER: &str = "sku_and_order";
pub const UNIT_PRICE: &str = "unit_price";
pub const CASE_PRICE: &str = "case_price";
pub const JOIN_MATCH: &str = "join_match";

// Sentinel values.

/// Substituted for an absent composite-key component.
pub const MISSING: &str = "MISSING";
/// Substituted for an absent move-order column.
pub const MISSING_MO: &str = "MISSING_MO";
/// Marks a cell whose column was missing from a short row.
pub const MISSING_COLUMN_INPUT: &str = "MISSING_COLUMN_INPUT";
/// Category tag on grand-total summary rows.
pub const SUMMARY_CATEGORY: &str = "SUMMARY";

/// Formats a float without a trailing `.0` for whole values.
pub fn format_numeric(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::format_numeric;

    #[test]
    fn whole_floats_print_as_integers() {
        assert_eq!(format_numeric(42.0), "42");
        assert_eq!(format_numeric(-3.0), "-3");
        assert_eq!(format_numeric(0.0), "0");
    }

    #[test]
    fn fractional_floats_keep_their_digits() {
        assert_eq!(format_numeric(-560.88), "-560.88");
        assert_eq!(format_numeric(0.25), "0.25");
    }
}
