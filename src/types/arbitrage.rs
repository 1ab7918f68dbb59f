use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::UpstreamPayload;

#[derive(Debug, Serialize)]
pub struct ArbitrageRequest {
    pub chain_id: u64,
    pub min_profit_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArbitrageData {
    pub opportunities: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UpstreamPayload for ArbitrageData {}
