//! CSV result-set writers.
//!
//! Each result set lands as `<prefix>-<YYYYMMDD>.csv` in the output
//! directory, with the caller's metadata envelope columns prepended to
//! every row. The envelope is generated here, at the persistence seam;
//! the core never stamps its own metadata.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use finrec_model::{MetadataEnvelope, TableRecord};

/// A fresh envelope for one persistence pass: current UTC timestamp, a
/// v4 correlation id, active status.
pub fn new_envelope() -> MetadataEnvelope {
    MetadataEnvelope::new(Utc::now(), Uuid::new_v4().simple().to_string())
}

/// Writes one result set, returning the file path.
pub fn write_result_set<R: TableRecord>(
    dir: &Path,
    prefix: &str,
    records: &[R],
    envelope: &MetadataEnvelope,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output dir: {}", dir.display()))?;
    let stamp = envelope.created_ts.format("%Y%m%d");
    let path = dir.join(format!("{prefix}-{stamp}.csv"));
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("create output file: {}", path.display()))?;

    let envelope_pairs = envelope.field_pairs();
    let mut header: Vec<&str> = envelope_pairs.iter().map(|(name, _)| *name).collect();
    header.extend(R::field_names());
    writer
        .write_record(&header)
        .with_context(|| format!("write header: {}", path.display()))?;

    for record in records {
        let mut row: Vec<String> = envelope_pairs
            .iter()
            .map(|(_, value)| value.clone())
            .collect();
        row.extend(record.field_values());
        writer
            .write_record(&row)
            .with_context(|| format!("write row: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush output: {}", path.display()))?;
    info!(path = %path.display(), rows = records.len(), "result set written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use finrec_model::SummaryTotal;

    fn summary() -> SummaryTotal {
        SummaryTotal {
            report_type: "NFSI Fresh".to_string(),
            category: "NFSI Fresh".to_string(),
            pkrd_quantity_sum: -100,
            pkrd_value_tp_sum: -400.0,
            nfsi_quantity_sum: 100,
            nfsi_value_sum: 410.0,
            quantity_variance_sum: 0,
            value_variance_sum: 10.0,
            git_quantity_sum: 0,
            git_value_sum: 0.0,
            pct_of_sales: -2.5,
            ptd_ex_git: 10.0,
            pct_of_sales_ex_git: -2.5,
        }
    }

    #[test]
    fn files_are_stamped_and_envelope_columns_lead() {
        let dir = tempfile::tempdir().expect("temp dir");
        let ts = Utc.with_ymd_and_hms(2023, 4, 5, 9, 0, 0).unwrap();
        let envelope = MetadataEnvelope::new(ts, "corr1".to_string())
            .with_effective_date(NaiveDate::from_ymd_opt(2023, 4, 5).unwrap());
        let path =
            write_result_set(dir.path(), "fin-rec-report-totals", &[summary()], &envelope)
                .expect("write result set");
        assert!(path.ends_with("fin-rec-report-totals-20230405.csv"));

        let contents = std::fs::read_to_string(&path).expect("read back");
        let mut lines = contents.lines();
        let header = lines.next().expect("header row");
        assert!(header.starts_with(
            "created_ts,correlation_id,record_status,effective_date,report_type,category"
        ));
        let row = lines.next().expect("data row");
        assert!(row.contains("corr1"));
        assert!(row.contains("ACTIVE"));
        assert!(row.contains("NFSI Fresh"));
    }

    #[test]
    fn empty_result_sets_still_write_a_header() {
        let dir = tempfile::tempdir().expect("temp dir");
        let envelope = MetadataEnvelope::new(Utc::now(), "corr2".to_string()).with_valid_from();
        let path = write_result_set::<SummaryTotal>(dir.path(), "empty", &[], &envelope)
            .expect("write result set");
        let contents = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.starts_with("created_ts"));
    }
}
