pub mod aggregate;
pub mod enrich;
pub mod filter;
pub mod join;
pub mod normalize;
pub mod record;
pub mod run;
pub mod scrub;
pub mod summary;

pub use aggregate::{Dimension, VarianceReport, aggregate_variance, standard_reports};
pub use enrich::{DepotTable, PricingTable, build_pricing_record};
pub use filter::DateRange;
pub use join::{keyed_by, left_join, project};
pub use record::build_record;
pub use run::{RunOutput, SourceTables, VarianceSet, run};
pub use scrub::{composite_key, max_date};
pub use summary::{grand_totals, summarize};
