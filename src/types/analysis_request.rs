use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    error::Error,
    helpers::{is_evm_address, is_non_negative_finite, is_positive_finite},
};

pub const DEFAULT_CHAIN_IDS: [u64; 3] = [1, 42161, 8453];
pub const MAX_CHAIN_IDS: usize = 16;

fn default_chain_ids() -> Vec<u64> {
    DEFAULT_CHAIN_IDS.to_vec()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub wallet_address: String,
    #[serde(default = "default_chain_ids")]
    pub chain_ids: Vec<u64>,
    #[serde(default)]
    pub include_perps: bool,
    #[serde(default)]
    pub include_arbitrage: bool,
    #[serde(default)]
    pub lp_positions: Option<Vec<ExplicitLpPosition>>,
}

/// LP position supplied by the caller instead of being discovered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExplicitLpPosition {
    pub protocol: String,
    pub token0_symbol: String,
    pub token1_symbol: String,
    pub token0_amount: f64,
    pub token1_amount: f64,
    pub initial_price0: f64,
    pub initial_price1: f64,
    pub entry_date: DateTime<Utc>,
    #[serde(default)]
    pub current_price0: Option<f64>,
    #[serde(default)]
    pub current_price1: Option<f64>,
}

impl AnalysisRequest {
    pub fn new(wallet_address: &str) -> Self {
        Self {
            wallet_address: wallet_address.to_string(),
            chain_ids: default_chain_ids(),
            include_perps: false,
            include_arbitrage: false,
            lp_positions: None,
        }
    }

    /// Explicit positions, treating an empty list the same as none.
    pub fn explicit_positions(&self) -> Option<&[ExplicitLpPosition]> {
        match &self.lp_positions {
            Some(positions) if !positions.is_empty() => Some(positions),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !is_evm_address(&self.wallet_address) {
            return Err(Error::Validation(format!(
                "wallet_address '{}' is not a 0x-prefixed 20 byte address",
                self.wallet_address
            )));
        }

        if self.chain_ids.is_empty() {
            return Err(Error::Validation(String::from(
                "chain_ids must not be empty",
            )));
        }

        if self.chain_ids.len() > MAX_CHAIN_IDS {
            return Err(Error::Validation(format!(
                "chain_ids supports at most {} entries",
                MAX_CHAIN_IDS
            )));
        }

        if self.chain_ids.contains(&0) {
            return Err(Error::Validation(String::from(
                "chain_ids must be positive",
            )));
        }

        for (index, position) in
            self.lp_positions.iter().flatten().enumerate()
        {
            position.validate().map_err(|reason| {
                Error::Validation(format!(
                    "lp_positions[{}]: {}",
                    index, reason
                ))
            })?;
        }

        Ok(())
    }
}

impl ExplicitLpPosition {
    fn validate(&self) -> Result<(), String> {
        if self.protocol.trim().is_empty() {
            return Err(String::from("protocol is required"));
        }
        if self.token0_symbol.trim().is_empty()
            || self.token1_symbol.trim().is_empty()
        {
            return Err(String::from("token symbols are required"));
        }
        if !is_non_negative_finite(self.token0_amount)
            || !is_non_negative_finite(self.token1_amount)
        {
            return Err(String::from("token amounts must be >= 0"));
        }
        if !is_positive_finite(self.initial_price0)
            || !is_positive_finite(self.initial_price1)
        {
            return Err(String::from("initial prices must be > 0"));
        }
        let current = [self.current_price0, self.current_price1];
        if !current.into_iter().flatten().all(is_positive_finite) {
            return Err(String::from("current prices must be > 0"));
        }
        Ok(())
    }
}
