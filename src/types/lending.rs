use serde::{Deserialize, Serialize};

use super::UpstreamPayload;

#[derive(Debug, Serialize)]
pub struct LendingRequest<'a> {
    pub wallet_address: &'a str,
    pub chain_ids: &'a [u64],
    pub protocols: &'static [&'static str],
    pub alert_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LendingPosition {
    pub protocol: String,
    pub chain_id: u64,
    pub health_factor: f64,
    pub collateral_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LendingData {
    pub positions: Vec<LendingPosition>,
    #[serde(default)]
    pub total_positions: Option<u32>,
    #[serde(default)]
    pub at_risk_count: Option<u32>,
}

impl LendingData {
    pub fn total_positions(&self) -> u32 {
        self.total_positions
            .unwrap_or(self.positions.len() as u32)
    }

    /// Upstream count, or positions under `threshold` when it is missing.
    pub fn at_risk_count(&self, threshold: f64) -> u32 {
        self.at_risk_count.unwrap_or_else(|| {
            self.positions
                .iter()
                .filter(|p| p.health_factor < threshold)
                .count() as u32
        })
    }

    pub fn total_collateral_usd(&self) -> f64 {
        self.positions.iter().map(|p| p.collateral_usd).sum()
    }

    /// Distinct protocols in first-seen order.
    pub fn protocols(&self) -> Vec<&str> {
        let mut protocols: Vec<&str> = vec![];
        for position in &self.positions {
            if !protocols.contains(&position.protocol.as_str()) {
                protocols.push(position.protocol.as_str());
            }
        }
        protocols
    }
}

impl UpstreamPayload for LendingData {
    fn validate(&self) -> Result<(), String> {
        for position in &self.positions {
            if !position.health_factor.is_finite()
                || position.health_factor < 0.0
            {
                return Err(format!(
                    "invalid health factor {} for {}",
                    position.health_factor, position.protocol
                ));
            }
            if !position.collateral_usd.is_finite() {
                return Err(format!(
                    "invalid collateral for {}",
                    position.protocol
                ));
            }
        }
        Ok(())
    }
}
