//! Keyed left-join over raw row sets.
//!
//! Used to bridge the ledger and receipt feeds to the sales-order extract:
//! ledger rows join on `sku_moveorder` to recover order numbers, receipt
//! rows join on `order_id` to recover the shared sku/moveorder identity.

use std::collections::BTreeMap;

use tracing::debug;

use finrec_model::RawRow;
use finrec_model::fields::JOIN_MATCH;

/// Extracts `(key, row)` pairs keyed on `field`. Rows without the key
/// field are dropped: grouping requires a key.
pub fn keyed_by(rows: Vec<RawRow>, field: &str) -> Vec<(String, RawRow)> {
    let mut keyed = Vec::with_capacity(rows.len());
    for row in rows {
        match row.get(field) {
            Some(key) => {
                let key = key.clone();
                keyed.push((key, row));
            }
            None => debug!(field, "dropping row without join key"),
        }
    }
    keyed
}

/// Subsets a row to the given fields, for the join-side extracts.
pub fn project(row: &RawRow, fields: &[&str]) -> RawRow {
    let mut subset = RawRow::new();
    for field in fields {
        if let Some(value) = row.get(*field) {
            subset.insert((*field).to_string(), value.clone());
        }
    }
    subset
}

/// Left-joins two keyed row sets.
///
/// Every left row is emitted. When one or more right rows share its key,
/// the first right row's fields (by right-side input order) are merged
/// into the left row, right winning on collision, and `join_match` is set
/// to `1`; otherwise the row passes through with `join_match` `0`.
/// Duplicate right-side keys beyond the first are ignored.
pub fn left_join(left: Vec<(String, RawRow)>, right: &[(String, RawRow)]) -> Vec<RawRow> {
    let mut lookup: BTreeMap<&str, &RawRow> = BTreeMap::new();
    for (key, row) in right {
        if lookup.contains_key(key.as_str()) {
            debug!(key = %key, "duplicate right-side join key; keeping first");
            continue;
        }
        lookup.insert(key.as_str(), row);
    }
    let mut joined = Vec::with_capacity(left.len());
    for (key, mut row) in left {
        match lookup.get(key.as_str()) {
            Some(matched) => {
                for (field, value) in matched.iter() {
                    row.insert(field.clone(), value.clone());
                }
                row.insert(JOIN_MATCH.to_string(), "1".to_string());
            }
            None => {
                row.insert(JOIN_MATCH.to_string(), "0".to_string());
            }
        }
        joined.push(row);
    }
    joined
}
