use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UpstreamPayload;
use crate::helpers::{is_non_negative_finite, is_positive_finite};

#[derive(Debug, Serialize)]
pub struct PortfolioRequest<'a> {
    pub wallet_address: &'a str,
    pub chain_ids: &'a [u64],
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetectedLpPosition {
    pub protocol: String,
    #[serde(default)]
    pub token0_symbol: String,
    #[serde(default)]
    pub token1_symbol: String,
    pub token0_amount: f64,
    pub token1_amount: f64,
    pub token0_price_usd: f64,
    pub token1_price_usd: f64,
    #[serde(default)]
    pub fees_owed_0: f64,
    #[serde(default)]
    pub fees_owed_1: f64,
    #[serde(default)]
    pub initial_price0_usd: Option<f64>,
    #[serde(default)]
    pub initial_price1_usd: Option<f64>,
    #[serde(default)]
    pub entry_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub days_held: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PortfolioData {
    pub lp_positions: Vec<DetectedLpPosition>,
    #[serde(default)]
    pub total_portfolio_value_usd: f64,
}

impl UpstreamPayload for PortfolioData {
    fn validate(&self) -> Result<(), String> {
        for p in &self.lp_positions {
            let amounts = [
                p.token0_amount,
                p.token1_amount,
                p.fees_owed_0,
                p.fees_owed_1,
            ];
            if !amounts.into_iter().all(is_non_negative_finite) {
                return Err(format!("invalid amounts for {}", p.protocol));
            }
            if !is_positive_finite(p.token0_price_usd)
                || !is_positive_finite(p.token1_price_usd)
            {
                return Err(format!("invalid prices for {}", p.protocol));
            }
            let initial = [p.initial_price0_usd, p.initial_price1_usd];
            if !initial.into_iter().flatten().all(is_positive_finite) {
                return Err(format!(
                    "invalid initial prices for {}",
                    p.protocol
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_position_parses() {
        let data: PortfolioData = serde_json::from_str(
            r#"{
                "lp_positions": [{
                    "protocol": "uniswap-v3",
                    "token0_amount": 1.5,
                    "token1_amount": 3000,
                    "token0_price_usd": 2000,
                    "token1_price_usd": 1
                }]
            }"#,
        )
        .unwrap();

        assert!(data.validate().is_ok());
        assert_eq!(data.total_portfolio_value_usd, 0.0);
        assert_eq!(data.lp_positions[0].fees_owed_0, 0.0);
        assert_eq!(data.lp_positions[0].entry_timestamp, None);
    }

    #[test]
    fn test_zero_price_is_rejected() {
        let data: PortfolioData = serde_json::from_str(
            r#"{
                "lp_positions": [{
                    "protocol": "uniswap-v3",
                    "token0_amount": 1,
                    "token1_amount": 1,
                    "token0_price_usd": 0,
                    "token1_price_usd": 1
                }]
            }"#,
        )
        .unwrap();

        assert!(data.validate().is_err());
    }
}
