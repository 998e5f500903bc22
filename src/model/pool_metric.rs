use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One day of pool activity in the shape the endpoint returns it: parsed
/// decimals, an RFC 3339 timestamp and the derived annualized rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolMetric {
    pub timestamp: DateTime<Utc>,
    pub contract_address: String,
    pub total_value_locked: BigDecimal,
    pub volume: BigDecimal,
    pub fee: BigDecimal,
    pub annual_percentage_rate: String,
}
