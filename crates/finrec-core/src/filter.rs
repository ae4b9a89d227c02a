//! Record-level filters applied between record construction and
//! aggregation.

use chrono::NaiveDate;

use finrec_model::ReconRecord;

/// Optional inclusive reporting window. Absent bounds impose no
/// constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> DateRange {
        DateRange { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start
            && date < start
        {
            return false;
        }
        if let Some(end) = self.end
            && date > end
        {
            return false;
        }
        true
    }
}

/// True when the record's date falls inside the reporting window.
pub fn retain_date_range(record: &ReconRecord, range: &DateRange) -> bool {
    range.contains(record.record_date)
}

/// Drops ledger rows whose move order starts with the given prefix
/// (scrap/sample orders are excluded from reconciliation).
pub fn exclude_moveorder_prefix(record: &ReconRecord, prefix: &str) -> bool {
    !record.moveorder_short.starts_with(prefix)
}

/// Drops rows whose depot id starts with the given prefix.
pub fn exclude_depot_prefix(record: &ReconRecord, prefix: &str) -> bool {
    !record.depot_id.starts_with(prefix)
}

/// Keeps rows whose decoded depot category starts with the given prefix.
pub fn retain_category_prefix(record: &ReconRecord, prefix: &str) -> bool {
    record.depot_category_str().starts_with(prefix)
}
