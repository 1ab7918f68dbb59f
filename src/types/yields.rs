use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::UpstreamPayload;

#[derive(Debug, Serialize)]
pub struct YieldRequest<'a> {
    pub protocol_ids: &'static [&'static str],
    pub chain_ids: &'a [u64],
    pub apy_threshold: f64,
    pub tvl_threshold: f64,
}

/// Pool descriptor as returned by the yield service. Fields this service
/// does not interpret are carried through to the report untouched.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct YieldPool {
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub chain_id: Option<u64>,
    #[serde(default)]
    pub apy: Option<f64>,
    #[serde(default)]
    pub tvl_usd: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct YieldData {
    pub pools: Vec<YieldPool>,
    pub alerts_count: u32,
}

impl UpstreamPayload for YieldData {}
