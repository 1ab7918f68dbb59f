use serde::{Deserialize, Serialize};

use super::UpstreamPayload;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LpAnalysisRequest {
    pub initial_price_0: f64,
    pub initial_price_1: f64,
    pub current_price_ratio: f64,
    pub amount_0: f64,
    pub amount_1: f64,
    pub fees_earned: f64,
    pub days_held: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImpermanentLossResult {
    /// Negative values are losses.
    pub il_percentage: f64,
    pub net_apr: f64,
    pub recommendation: String,
}

impl UpstreamPayload for ImpermanentLossResult {
    fn validate(&self) -> Result<(), String> {
        if !self.il_percentage.is_finite() || !self.net_apr.is_finite() {
            return Err(String::from("non-finite il_percentage or net_apr"));
        }
        Ok(())
    }
}
