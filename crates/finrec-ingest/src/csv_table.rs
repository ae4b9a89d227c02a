use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::warn;

use finrec_model::RawRow;
use finrec_model::fields::MISSING_COLUMN_INPUT;

/// An ingested CSV extract: the header row plus raw string rows.
///
/// Rows keep their original cell counts; short and long rows are only
/// resolved when converting to row maps, so well-formedness can still be
/// judged against the header.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads a CSV extract, taking the first row as the header.
///
/// Cells are trimmed and BOM-stripped; fully blank rows are skipped.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        match headers {
            None => headers = Some(row.iter().map(|value| normalize_header(value)).collect()),
            Some(_) => rows.push(row),
        }
    }
    Ok(CsvTable {
        headers: headers.unwrap_or_default(),
        rows,
    })
}

impl CsvTable {
    /// Converts one row to a column-name-keyed map. Cells missing from a
    /// short row take the `MISSING_COLUMN_INPUT` sentinel; extra cells
    /// beyond the header are dropped (their presence is reported by
    /// `is_well_formed`).
    pub fn row_map(&self, idx: usize) -> Option<RawRow> {
        let row = self.rows.get(idx)?;
        Some(Self::map_row(&self.headers, row))
    }

    /// Row maps re-keyed with caller-supplied column names, for reference
    /// extracts whose physical header is not trusted.
    pub fn row_maps_with_headers(&self, headers: &[&str]) -> Vec<RawRow> {
        let owned: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
        self.rows
            .iter()
            .map(|row| Self::map_row(&owned, row))
            .collect()
    }

    /// True when the row's cell count matches the header exactly.
    pub fn is_well_formed(&self, idx: usize) -> bool {
        self.rows
            .get(idx)
            .is_some_and(|row| row.len() == self.headers.len())
    }

    /// All well-formed rows as maps. Malformed rows (column-count
    /// mismatch) are logged and dropped so they never reach the
    /// normalizer.
    pub fn well_formed_row_maps(&self) -> Vec<RawRow> {
        let mut maps = Vec::with_capacity(self.rows.len());
        for (idx, row) in self.rows.iter().enumerate() {
            if row.len() == self.headers.len() {
                maps.push(Self::map_row(&self.headers, row));
            } else {
                warn!(
                    row = idx,
                    cells = row.len(),
                    columns = self.headers.len(),
                    "dropping malformed row"
                );
            }
        }
        maps
    }

    fn map_row(headers: &[String], row: &[String]) -> RawRow {
        let mut map = RawRow::new();
        for (idx, header) in headers.iter().enumerate() {
            let value = row
                .get(idx)
                .cloned()
                .unwrap_or_else(|| MISSING_COLUMN_INPUT.to_string());
            map.insert(header.clone(), value);
        }
        map
    }
}
