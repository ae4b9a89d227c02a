use std::fmt;

use serde::{Deserialize, Serialize};

/// The feeds a reconciliation run consumes.
///
/// `Pkrd` is the warehouse movement ledger, the authoritative side of the
/// reconciliation. `Fresh`, `Frozen` and `NonNfsi` are the independent
/// receipt/shipment feeds compared against it. `Sales` is the sales-order
/// extract used purely as a join bridge to recover shared identifiers; it
/// never becomes a reconciled record itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Pkrd,
    Fresh,
    Frozen,
    NonNfsi,
    Sales,
}

impl SourceType {
    pub const ALL: [SourceType; 5] = [
        SourceType::Pkrd,
        SourceType::Fresh,
        SourceType::Frozen,
        SourceType::NonNfsi,
        SourceType::Sales,
    ];

    /// Wire label: matches the depot-category values in the depot
    /// reference data and the report tags in downstream storage.
    pub fn label(self) -> &'static str {
        match self {
            SourceType::Pkrd => "PKRD",
            SourceType::Fresh => "NFSI Fresh",
            SourceType::Frozen => "NFSI Frozen",
            SourceType::NonNfsi => "Non-NFSI",
            SourceType::Sales => "SALES",
        }
    }

    pub fn from_label(label: &str) -> Option<SourceType> {
        SourceType::ALL.into_iter().find(|s| s.label() == label)
    }

    /// True for the ledger side of the reconciliation.
    pub fn is_ledger(self) -> bool {
        matches!(self, SourceType::Pkrd)
    }

    /// True for feeds whose rows become reconciled records.
    pub fn is_record_source(self) -> bool {
        !matches!(self, SourceType::Sales)
    }

    /// Feeds whose SKUs live in a shorter internal numbering scheme and
    /// are shifted into the ledger namespace during normalization.
    pub fn uses_offset_sku(self) -> bool {
        matches!(self, SourceType::Fresh | SourceType::Frozen)
    }

    /// Feeds whose depot codes carry a depot-type prefix ahead of the
    /// three-character depot id.
    pub fn uses_prefixed_depot(self) -> bool {
        matches!(self, SourceType::Fresh | SourceType::Frozen)
    }

    /// Feeds whose move orders are truncated to the segment before the
    /// first `/`.
    pub fn splits_moveorder(self) -> bool {
        matches!(self, SourceType::Pkrd | SourceType::Sales)
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
