use serde::{Deserialize, Serialize};

/// One day of aggregated activity for a pool, as indexed by the subgraph.
/// Numeric fields arrive as decimal strings and are parsed at assembly time;
/// the wire names are the subgraph's camel-case ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolDayData {
    pub date: i64,

    #[serde(rename = "volumeUSD")]
    pub volume: String,

    #[serde(rename = "tvlUSD")]
    pub total_value_locked: String,

    #[serde(rename = "feesUSD")]
    pub fees: String,
}
