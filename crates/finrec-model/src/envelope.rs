//! Persistence metadata merged onto every emitted result row.
//!
//! The envelope is supplied by the caller (the output stage); the models'
//! only obligation is to merge it with their own field lists, never to
//! generate it.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    Active,
    Inactive,
    Valid,
    Invalid,
    Error,
}

impl RecordStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordStatus::Active => "ACTIVE",
            RecordStatus::Inactive => "INACTIVE",
            RecordStatus::Valid => "VALID",
            RecordStatus::Invalid => "INVALID",
            RecordStatus::Error => "ERROR",
        }
    }
}

/// Common metadata attached to each persisted result set.
///
/// A run stamps either an `effective_date` (reporting sets) or a
/// minute-truncated `valid_from` timestamp (record sets), never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEnvelope {
    pub created_ts: DateTime<Utc>,
    pub correlation_id: String,
    pub record_status: RecordStatus,
    pub effective_date: Option<NaiveDate>,
    pub valid_from: Option<DateTime<Utc>>,
}

impl MetadataEnvelope {
    pub fn new(created_ts: DateTime<Utc>, correlation_id: String) -> Self {
        MetadataEnvelope {
            created_ts,
            correlation_id,
            record_status: RecordStatus::Active,
            effective_date: None,
            valid_from: None,
        }
    }

    /// Extends the envelope with the report effective date.
    pub fn with_effective_date(mut self, date: NaiveDate) -> Self {
        self.effective_date = Some(date);
        self.valid_from = None;
        self
    }

    /// Extends the envelope with a `valid_from` timestamp normalized to
    /// the minute.
    pub fn with_valid_from(mut self) -> Self {
        let truncated = self
            .created_ts
            .with_second(0)
            .and_then(|ts| ts.with_nanosecond(0))
            .unwrap_or(self.created_ts);
        self.valid_from = Some(truncated);
        self.effective_date = None;
        self
    }

    /// Envelope columns in persistence order.
    pub fn field_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("created_ts", self.created_ts.to_rfc3339()),
            ("correlation_id", self.correlation_id.clone()),
            ("record_status", self.record_status.as_str().to_string()),
        ];
        if let Some(date) = self.effective_date {
            pairs.push(("effective_date", date.to_string()));
        }
        if let Some(valid_from) = self.valid_from {
            pairs.push(("valid_from", valid_from.to_rfc3339()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn envelope() -> MetadataEnvelope {
        let ts = Utc.with_ymd_and_hms(2023, 4, 5, 10, 30, 59).unwrap();
        MetadataEnvelope::new(ts, "abc123".to_string())
    }

    #[test]
    fn valid_from_truncates_to_the_minute() {
        let env = envelope().with_valid_from();
        let valid_from = env.valid_from.expect("valid_from set");
        assert_eq!(valid_from.second(), 0);
        assert_eq!(valid_from.minute(), 30);
        assert!(env.effective_date.is_none());
    }

    #[test]
    fn effective_date_replaces_valid_from() {
        let date = NaiveDate::from_ymd_opt(2023, 4, 5).unwrap();
        let env = envelope().with_valid_from().with_effective_date(date);
        assert_eq!(env.effective_date, Some(date));
        assert!(env.valid_from.is_none());
        let names: Vec<&str> = env.field_pairs().into_iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec![
                "created_ts",
                "correlation_id",
                "record_status",
                "effective_date"
            ]
        );
    }
}
