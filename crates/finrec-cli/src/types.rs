use std::path::PathBuf;

use finrec_model::SummaryTotal;

/// Per-report figures for the run summary table.
pub struct ReportFigures {
    pub variance_type: String,
    pub groups: usize,
    pub git_groups: usize,
    pub total_quantity_variance: i64,
    pub total_value_variance_tp: f64,
    pub output: Option<PathBuf>,
}

/// Everything the CLI reports after a run.
pub struct RunReport {
    pub record_count: usize,
    pub ledger_count: usize,
    pub pricing_count: usize,
    pub reports: Vec<ReportFigures>,
    pub summaries: Vec<SummaryTotal>,
    pub output_dir: Option<PathBuf>,
}
