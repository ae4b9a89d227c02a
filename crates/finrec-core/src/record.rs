//! Canonical record construction, performed once joins are complete.

use sha2::{Digest, Sha256};
use thiserror::Error;

use finrec_model::fields::{CASE_PRICE, DEPOT_CATEGORY, DEPOT_NAME, UNIT_PRICE};
use finrec_model::{RawRow, ReconRecord, SourceMappings, SourceType};

use crate::normalize;
use crate::scrub::{composite_key, date_or, float_or_zero, int_or_zero, max_date, round_to};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordBuildError {
    /// Sales rows are a join bridge, never a reconciled record.
    #[error("sales rows cannot become reconciliation records")]
    SalesNotARecordSource,
}

/// Builds the canonical record for a joined row.
///
/// Identifier fields are re-derived from the merged row so sales-side
/// fields recovered by the join participate; quantities and values are
/// scrubbed per side, with the opposite side fixed at zero. The
/// fingerprint hashes the identity fields into a stable storage key.
pub fn build_record(
    source: SourceType,
    row: &RawRow,
    mappings: &SourceMappings,
) -> Result<ReconRecord, RecordBuildError> {
    if !source.is_record_source() {
        return Err(RecordBuildError::SalesNotARecordSource);
    }
    let columns = mappings.columns(source);

    let record_date = date_or(
        row.get(&columns.date).map(String::as_str).unwrap_or(""),
        max_date(),
    );
    let sku = normalize::item_number(source, row, mappings);
    let moveorder_short = normalize::short_moveorder(source, row, mappings);
    let lot_number = normalize::lot_number(source, row, mappings);
    let depot_id = normalize::depot_id(source, row, mappings);
    let order_id = normalize::order_number(source, row, mappings);
    let sku_moveorder = composite_key(&sku, &moveorder_short);
    let sku_and_order = composite_key(&sku, order_id.as_deref().unwrap_or(""));

    let depot_name = row.get(DEPOT_NAME).cloned();
    let depot_category = row.get(DEPOT_CATEGORY).cloned();

    let ledger = source.is_ledger();
    let enriched_price =
        |field: &str| row.get(field).and_then(|v| v.parse::<f64>().ok()).unwrap_or(0.0);
    let pkrd_unit_price = if ledger { enriched_price(UNIT_PRICE) } else { 0.0 };
    let pkrd_case_price = if ledger { enriched_price(CASE_PRICE) } else { 0.0 };

    let column_value = |column: &Option<String>| {
        column
            .as_ref()
            .and_then(|name| row.get(name))
            .map(String::as_str)
            .unwrap_or("0")
    };
    let (pkrd_quantity, pkrd_value) = if ledger {
        (
            int_or_zero(column_value(&columns.pkrd_qty)),
            float_or_zero(column_value(&columns.pkrd_value)),
        )
    } else {
        (0, 0.0)
    };
    let pkrd_value_tp = if ledger {
        round_to(pkrd_quantity as f64 * pkrd_case_price, 5)
    } else {
        0.0
    };
    let (nfsi_quantity, nfsi_value) = if ledger {
        (0, 0.0)
    } else {
        (
            int_or_zero(column_value(&columns.nfsi_qty)),
            float_or_zero(column_value(&columns.nfsi_value)),
        )
    };

    let quantity_variance = pkrd_quantity + nfsi_quantity;
    let value_variance = round_to(pkrd_value + nfsi_value, 4);
    let value_variance_tp = round_to(pkrd_value_tp + nfsi_value, 4);

    let fingerprint = fingerprint(
        &record_date.to_string(),
        source.label(),
        &sku_moveorder,
        &sku_and_order,
        &depot_id,
        &lot_number,
        pkrd_quantity,
        nfsi_quantity,
    );

    Ok(ReconRecord {
        record_date,
        source_type: source,
        sku,
        moveorder_short,
        lot_number,
        depot_id,
        depot_name,
        depot_category,
        sku_moveorder,
        order_id,
        sku_and_order,
        pkrd_unit_price,
        pkrd_case_price,
        pkrd_quantity,
        pkrd_value,
        pkrd_value_tp,
        nfsi_quantity,
        nfsi_value,
        quantity_variance,
        value_variance,
        value_variance_tp,
        fingerprint,
    })
}

#[allow(clippy::too_many_arguments)]
fn fingerprint(
    record_date: &str,
    source_label: &str,
    sku_moveorder: &str,
    sku_and_order: &str,
    depot_id: &str,
    lot_number: &str,
    pkrd_quantity: i64,
    nfsi_quantity: i64,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(record_date.as_bytes());
    hasher.update(source_label.as_bytes());
    hasher.update(sku_moveorder.as_bytes());
    hasher.update(sku_and_order.as_bytes());
    hasher.update(depot_id.as_bytes());
    hasher.update(lot_number.as_bytes());
    hasher.update(pkrd_quantity.to_string().as_bytes());
    hasher.update(nfsi_quantity.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn ledger_row() -> RawRow {
        row(&[
            ("Move Date", "01/01/2023"),
            ("Item No.", "60330045"),
            ("Move Order", "MM012345/005"),
            ("Lot Number", "L7"),
            ("Store", "709"),
            ("SMS_ORDER_NUMBER", "8811223"),
            ("Qty", "-123"),
            ("Value", "-560.88"),
            ("depot_name", "Depot A"),
            ("depot_category", "NFSI Fresh"),
            ("unit_price", "1.2"),
            ("case_price", "4.56"),
        ])
    }

    #[test]
    fn ledger_row_normalizes_per_contract() {
        let record =
            build_record(SourceType::Pkrd, &ledger_row(), &SourceMappings::default()).unwrap();
        assert_eq!(
            record.record_date,
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
        assert_eq!(record.sku, "60330045");
        assert_eq!(record.moveorder_short, "MM012345");
        assert_eq!(record.depot_id, "709");
        assert_eq!(record.sku_moveorder, "60330045_MM012345");
        assert_eq!(record.pkrd_quantity, -123);
        assert_eq!(record.pkrd_value, -560.88);
        assert_eq!(record.nfsi_quantity, 0);
        assert_eq!(record.nfsi_value, 0.0);
        assert_eq!(record.depot_name.as_deref(), Some("Depot A"));
        assert_eq!(record.depot_category.as_deref(), Some("NFSI Fresh"));
    }

    #[test]
    fn transfer_priced_value_is_quantity_times_case_price() {
        let record =
            build_record(SourceType::Pkrd, &ledger_row(), &SourceMappings::default()).unwrap();
        assert_eq!(record.pkrd_value_tp, round_to(-123.0 * 4.56, 5));
        assert_eq!(
            record.value_variance_tp,
            round_to(record.pkrd_value_tp, 4)
        );
    }

    #[test]
    fn receipt_rows_zero_the_ledger_side() {
        let fresh = row(&[
            ("ACTUAL_TRAN_DATE", "02/01/2023"),
            ("LPC", "0998877"),
            ("SORDNO_ITM1", "SO888"),
            ("DEPOT", "FD709"),
            ("ORDER_NO", "44556"),
            ("PACKS_RECEIVED", "567"),
            ("TOTAL_COST", "3963.33"),
        ]);
        let record = build_record(SourceType::Fresh, &fresh, &SourceMappings::default()).unwrap();
        assert_eq!(record.sku, "60998877");
        assert_eq!(record.depot_id, "709");
        assert_eq!(record.pkrd_quantity, 0);
        assert_eq!(record.pkrd_value_tp, 0.0);
        assert_eq!(record.nfsi_quantity, 567);
        assert_eq!(record.nfsi_value, 3963.33);
        assert_eq!(record.quantity_variance, 567);
        assert_eq!(record.value_variance, 3963.33);
    }

    #[test]
    fn unparseable_dates_take_the_sentinel() {
        let mut bad = ledger_row();
        bad.insert("Move Date".to_string(), "not-a-date".to_string());
        let record = build_record(SourceType::Pkrd, &bad, &SourceMappings::default()).unwrap();
        assert_eq!(record.record_date, max_date());
    }

    #[test]
    fn sales_rows_are_rejected() {
        let err = build_record(SourceType::Sales, &row(&[]), &SourceMappings::default());
        assert_eq!(err, Err(RecordBuildError::SalesNotARecordSource));
    }

    #[test]
    fn fingerprint_is_deterministic_and_sensitive() {
        let mappings = SourceMappings::default();
        let base = build_record(SourceType::Pkrd, &ledger_row(), &mappings).unwrap();
        let again = build_record(SourceType::Pkrd, &ledger_row(), &mappings).unwrap();
        assert_eq!(base.fingerprint, again.fingerprint);
        assert_eq!(base.fingerprint.len(), 64);

        let mut changed = ledger_row();
        changed.insert("Qty".to_string(), "-124".to_string());
        let other = build_record(SourceType::Pkrd, &changed, &mappings).unwrap();
        assert_ne!(base.fingerprint, other.fingerprint);
    }
}
