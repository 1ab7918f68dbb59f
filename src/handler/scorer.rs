//! Composite risk score.
//!
//! Three capped components are summed: lending (50), impermanent loss (30)
//! and yield alerts (20). Missing sources contribute nothing.

use crate::types::{
    ImpermanentLossResult, LendingData, UpstreamResult, YieldData,
};

/// Positions below this health factor are considered critical.
pub const CRITICAL_HEALTH_FACTOR: f64 = 1.2;

const LENDING_POINTS_PER_POSITION: f64 = 25.0;
const LENDING_CAP: f64 = 50.0;

const IL_SCORE_THRESHOLD: f64 = -5.0;
const IL_POINTS_PER_PERCENT: f64 = 3.0;
const IL_CAP: f64 = 30.0;

const YIELD_POINTS_PER_ALERT: f64 = 5.0;
const YIELD_CAP: f64 = 20.0;

const MAX_SCORE: f64 = 100.0;

pub fn critical_positions(lending: &LendingData) -> usize {
    lending
        .positions
        .iter()
        .filter(|p| p.health_factor < CRITICAL_HEALTH_FACTOR)
        .count()
}

pub fn lending_component(lending: &UpstreamResult<LendingData>) -> f64 {
    match lending.present() {
        Some(data) => {
            let count = critical_positions(data) as f64;
            (count * LENDING_POINTS_PER_POSITION).min(LENDING_CAP)
        },
        None => 0.0,
    }
}

pub fn lp_component(lp: &UpstreamResult<ImpermanentLossResult>) -> f64 {
    match lp.present() {
        Some(result) if result.il_percentage < IL_SCORE_THRESHOLD => {
            (result.il_percentage.abs() * IL_POINTS_PER_PERCENT).min(IL_CAP)
        },
        _ => 0.0,
    }
}

pub fn yield_component(yields: &UpstreamResult<YieldData>) -> f64 {
    match yields.present() {
        Some(data) => {
            (data.alerts_count as f64 * YIELD_POINTS_PER_ALERT).min(YIELD_CAP)
        },
        None => 0.0,
    }
}

pub fn score(
    lending: &UpstreamResult<LendingData>,
    lp: &UpstreamResult<ImpermanentLossResult>,
    yields: &UpstreamResult<YieldData>,
) -> u8 {
    let total =
        lending_component(lending) + lp_component(lp) + yield_component(yields);

    total.round().clamp(0.0, MAX_SCORE) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LendingPosition;

    fn lending(health_factors: &[f64]) -> UpstreamResult<LendingData> {
        let positions = health_factors
            .iter()
            .map(|hf| LendingPosition {
                protocol: String::from("aave"),
                chain_id: 1,
                health_factor: *hf,
                collateral_usd: 500.0,
            })
            .collect();

        UpstreamResult::Present(LendingData {
            positions,
            total_positions: None,
            at_risk_count: None,
        })
    }

    fn lp(il_percentage: f64) -> UpstreamResult<ImpermanentLossResult> {
        UpstreamResult::Present(ImpermanentLossResult {
            il_percentage,
            net_apr: 4.0,
            recommendation: String::from("hold"),
        })
    }

    fn yields(alerts_count: u32) -> UpstreamResult<YieldData> {
        UpstreamResult::Present(YieldData {
            pools: vec![],
            alerts_count,
        })
    }

    #[test]
    fn test_all_absent_scores_zero() {
        assert_eq!(
            score(
                &UpstreamResult::Absent,
                &UpstreamResult::Absent,
                &UpstreamResult::Absent
            ),
            0
        );
    }

    #[test]
    fn test_lending_component_counts_critical_positions() {
        let data = lending(&[1.0, 1.3, 1.1]);
        assert_eq!(critical_positions(data.present().unwrap()), 2);
        assert_eq!(lending_component(&data), 50.0);
        assert_eq!(lending_component(&lending(&[1.19])), 25.0);
        assert_eq!(lending_component(&lending(&[1.2, 3.0])), 0.0);
        assert_eq!(lending_component(&lending(&[0.5, 0.6, 0.7])), 50.0);
    }

    #[test]
    fn test_lp_component_is_capped() {
        assert_eq!(lp_component(&lp(-20.0)), 30.0);
        assert_eq!(lp_component(&lp(-8.0)), 24.0);
        assert_eq!(lp_component(&lp(-5.0)), 0.0);
        assert_eq!(lp_component(&lp(12.0)), 0.0);
    }

    #[test]
    fn test_yield_component_is_capped() {
        assert_eq!(yield_component(&yields(0)), 0.0);
        assert_eq!(yield_component(&yields(3)), 15.0);
        assert_eq!(yield_component(&yields(9)), 20.0);
    }

    #[test]
    fn test_score_is_bounded_and_rounded() {
        assert_eq!(
            score(&lending(&[0.9, 1.0, 1.1]), &lp(-50.0), &yields(100)),
            100
        );
        // 3 * 5.5 = 16.5 rounds away from zero
        assert_eq!(
            score(&UpstreamResult::Absent, &lp(-5.5), &UpstreamResult::Absent),
            17
        );
    }

    #[test]
    fn test_score_is_monotonic_per_component() {
        let mut previous = 0;
        for count in 0..6 {
            let hfs = vec![1.0; count];
            let current = score(&lending(&hfs), &lp(-6.0), &yields(1));
            assert!(current >= previous);
            previous = current;
        }

        let mut previous = 0;
        for step in 0..40 {
            let il = -(step as f64);
            let current = score(&UpstreamResult::Absent, &lp(il), &yields(2));
            assert!(current >= previous);
            previous = current;
        }

        let mut previous = 0;
        for alerts in 0..10 {
            let current = score(
                &lending(&[1.0]),
                &UpstreamResult::Absent,
                &yields(alerts),
            );
            assert!(current >= previous);
            previous = current;
        }
    }
}
