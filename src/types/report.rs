use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{
    ArbitrageData, ImpermanentLossResult, LendingPosition, PerpsData,
    YieldPool,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LendingAnalysis {
    pub positions: Vec<LendingPosition>,
    pub at_risk_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldAnalysis {
    pub pools: Vec<YieldPool>,
    pub alerts_count: u32,
}

/// Composite report returned for a wallet. Sections whose source was
/// unavailable or not requested serialise as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    pub wallet_address: String,
    pub overall_risk_score: u8,
    pub total_positions: u32,
    pub critical_alerts: Vec<String>,
    pub lending_analysis: Option<LendingAnalysis>,
    pub yield_analysis: Option<YieldAnalysis>,
    pub lp_analysis: Option<ImpermanentLossResult>,
    pub perps_analysis: Option<PerpsData>,
    pub arbitrage_opportunities: Option<ArbitrageData>,
    pub summary: String,
    pub timestamp: DateTime<Utc>,
}

impl RiskReport {
    pub fn present_sections(&self) -> Vec<&'static str> {
        let sections = [
            ("lending", self.lending_analysis.is_some()),
            ("yield", self.yield_analysis.is_some()),
            ("lp", self.lp_analysis.is_some()),
            ("perps", self.perps_analysis.is_some()),
            ("arbitrage", self.arbitrage_opportunities.is_some()),
        ];

        sections
            .into_iter()
            .filter(|(_, present)| *present)
            .map(|(name, _)| name)
            .collect()
    }
}
