use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::UpstreamPayload;

#[derive(Debug, Serialize)]
pub struct PerpsRequest {
    pub venue_ids: &'static [&'static str],
    pub markets: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PerpsData {
    pub positions: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UpstreamPayload for PerpsData {}
