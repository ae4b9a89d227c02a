pub mod envelope;
pub mod error;
pub mod fields;
pub mod mapping;
pub mod pricing;
pub mod record;
pub mod reference;
pub mod source;
pub mod summary;
pub mod variance;

pub use envelope::{MetadataEnvelope, RecordStatus};
pub use error::{ModelError, Result};
pub use fields::{RawRow, format_numeric};
pub use mapping::{ColumnMapping, PricingColumns, SourceMappings};
pub use pricing::Pricing;
pub use record::ReconRecord;
pub use reference::DepotInfo;
pub use source::SourceType;
pub use summary::SummaryTotal;
pub use variance::VarianceAggregate;

/// A record that can be emitted as a flat result-set row.
///
/// `field_names` defines the column order for a whole result set, so it
/// must not depend on instance state; `field_values` must produce values
/// in the same order.
pub trait TableRecord {
    fn field_names() -> &'static [&'static str];
    fn field_values(&self) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_labels_round_trip() {
        for source in SourceType::ALL {
            let label = source.label();
            assert_eq!(SourceType::from_label(label), Some(source));
        }
    }

    #[test]
    fn default_mappings_cover_every_source() {
        let mappings = SourceMappings::default();
        for source in SourceType::ALL {
            let columns = mappings.columns(source);
            assert!(!columns.date.is_empty());
            assert!(!columns.sku.is_empty());
        }
        assert_eq!(mappings.columns(SourceType::Pkrd).lot.as_deref(), Some("Lot Number"));
        assert_eq!(mappings.columns(SourceType::Fresh).lot, None);
    }

    #[test]
    fn mappings_serialize() {
        let mappings = SourceMappings::default();
        let json = serde_json::to_string(&mappings).expect("serialize mappings");
        let round: SourceMappings = serde_json::from_str(&json).expect("deserialize mappings");
        assert_eq!(
            round.columns(SourceType::NonNfsi).depot,
            mappings.columns(SourceType::NonNfsi).depot
        );
    }
}
