use serde::{Deserialize, Serialize};

/// Depot reference attributes attached during enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepotInfo {
    pub depot_name: String,
    /// Matches a `SourceType` label for depots served by that feed.
    pub depot_category: String,
}
