use chrono::{DateTime, Utc};

use crate::types::{DetectedLpPosition, ExplicitLpPosition, LpAnalysisRequest};

/// Holding period assumed when neither an entry date nor a duration is known.
pub const DEFAULT_HOLDING_DAYS: u32 = 30;

/// LP position normalised from either the caller or the portfolio scan.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryLpPosition {
    pub protocol: String,
    pub amount_0: f64,
    pub amount_1: f64,
    pub initial_price_0: f64,
    pub initial_price_1: f64,
    pub current_price_0: f64,
    pub current_price_1: f64,
    pub fees_earned_usd: f64,
    pub entry: Option<DateTime<Utc>>,
    pub days_held: Option<u32>,
}

impl From<&ExplicitLpPosition> for PrimaryLpPosition {
    fn from(position: &ExplicitLpPosition) -> Self {
        Self {
            protocol: position.protocol.to_owned(),
            amount_0: position.token0_amount,
            amount_1: position.token1_amount,
            initial_price_0: position.initial_price0,
            initial_price_1: position.initial_price1,
            current_price_0: position
                .current_price0
                .unwrap_or(position.initial_price0),
            current_price_1: position
                .current_price1
                .unwrap_or(position.initial_price1),
            fees_earned_usd: 0.0,
            entry: Some(position.entry_date),
            days_held: None,
        }
    }
}

impl From<&DetectedLpPosition> for PrimaryLpPosition {
    fn from(position: &DetectedLpPosition) -> Self {
        let fees_earned_usd = position.fees_owed_0 * position.token0_price_usd
            + position.fees_owed_1 * position.token1_price_usd;

        Self {
            protocol: position.protocol.to_owned(),
            amount_0: position.token0_amount,
            amount_1: position.token1_amount,
            initial_price_0: position
                .initial_price0_usd
                .unwrap_or(position.token0_price_usd),
            initial_price_1: position
                .initial_price1_usd
                .unwrap_or(position.token1_price_usd),
            current_price_0: position.token0_price_usd,
            current_price_1: position.token1_price_usd,
            fees_earned_usd,
            entry: position.entry_timestamp,
            days_held: position.days_held,
        }
    }
}

impl PrimaryLpPosition {
    /// Whole days held, at least one. An explicit duration wins over the
    /// entry date; with neither the default estimate is used.
    pub fn days_held(&self, now: DateTime<Utc>) -> u32 {
        if let Some(days) = self.days_held {
            return days.max(1);
        }

        match self.entry {
            Some(entry) => {
                let days = (now - entry).num_days().max(1);
                u32::try_from(days).unwrap_or(u32::MAX)
            },
            None => DEFAULT_HOLDING_DAYS,
        }
    }

    /// Current token0/token1 price relative to the ratio at entry,
    /// computed as `(c0 * i1) / (c1 * i0)`.
    pub fn current_price_ratio(&self) -> f64 {
        let numerator = self.current_price_0 * self.initial_price_1;
        let denominator = self.current_price_1 * self.initial_price_0;
        numerator / denominator
    }

    /// `None` when the prices cannot produce a finite ratio.
    pub fn to_request(&self, now: DateTime<Utc>) -> Option<LpAnalysisRequest> {
        let current_price_ratio = self.current_price_ratio();
        if !current_price_ratio.is_finite() {
            return None;
        }

        Some(LpAnalysisRequest {
            initial_price_0: self.initial_price_0,
            initial_price_1: self.initial_price_1,
            current_price_ratio,
            amount_0: self.amount_0,
            amount_1: self.amount_1,
            fees_earned: self.fees_earned_usd,
            days_held: self.days_held(now),
        })
    }
}
