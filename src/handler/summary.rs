use std::fmt;

use crate::types::{
    ImpermanentLossResult, LendingData, UpstreamResult, YieldData,
};

use super::aggregator::LENDING_ALERT_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskBand {
    pub fn from_score(score: u8) -> RiskBand {
        match score {
            0..=24 => RiskBand::Low,
            25..=49 => RiskBand::Moderate,
            50..=74 => RiskBand::High,
            _ => RiskBand::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "LOW",
            RiskBand::Moderate => "MODERATE",
            RiskBand::High => "HIGH",
            RiskBand::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

/// Renders the report narrative. Clause order is fixed; a clause is only
/// emitted when its data is present.
pub fn summarize(
    score: u8,
    total_positions: u32,
    alerts: &[String],
    lending: &UpstreamResult<LendingData>,
    lp: &UpstreamResult<ImpermanentLossResult>,
    yields: &UpstreamResult<YieldData>,
) -> String {
    let band = RiskBand::from_score(score);
    let mut clauses = vec![format!("{} risk ({}/100).", band, score)];

    let lending = lending.present();

    if let Some(data) = lending {
        if data.total_positions() > 0 {
            let protocols = data.protocols().len();
            clauses.push(format!(
                "${:.2} collateral across {} lending {}.",
                data.total_collateral_usd(),
                protocols,
                plural(protocols, "protocol", "protocols")
            ));
        }
    }

    if !alerts.is_empty() {
        clauses.push(format!(
            "{} critical {} raised.",
            alerts.len(),
            plural(alerts.len(), "alert", "alerts")
        ));
    }

    if let Some(data) = lending {
        let at_risk = data.at_risk_count(LENDING_ALERT_THRESHOLD) as usize;
        if at_risk > 0 {
            clauses.push(format!(
                "{} lending {} at risk.",
                at_risk,
                plural(at_risk, "position", "positions")
            ));
        }
    }

    if let Some(result) = lp.present() {
        if result.net_apr >= 0.0 {
            clauses.push(format!(
                "LP position earning a positive net APR of {:.2}%.",
                result.net_apr
            ));
        } else {
            clauses.push(format!(
                "LP position running a negative net APR of {:.2}%.",
                result.net_apr
            ));
        }
    }

    if let Some(data) = yields.present() {
        let pools = data.pools.len();
        if pools > 0 {
            clauses.push(format!(
                "{} yield {} identified.",
                pools,
                plural(pools, "opportunity", "opportunities")
            ));
        }
    }

    if band == RiskBand::Low {
        if total_positions == 0 {
            clauses.push(String::from("No active positions detected."));
        } else {
            clauses.push(String::from("Positions look healthy."));
        }
    }

    clauses.join(" ")
}
