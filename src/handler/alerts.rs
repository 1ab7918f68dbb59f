use crate::types::{ImpermanentLossResult, LendingData, UpstreamResult};

use super::scorer::CRITICAL_HEALTH_FACTOR;

/// Losses deeper than this percentage on the primary LP position alert.
pub const IL_ALERT_THRESHOLD: f64 = -10.0;

/// Critical alerts in discovery order: lending positions first, then the
/// primary LP position.
pub fn critical_alerts(
    lending: &UpstreamResult<LendingData>,
    primary_lp_protocol: Option<&str>,
    lp: &UpstreamResult<ImpermanentLossResult>,
) -> Vec<String> {
    let mut alerts = vec![];

    if let Some(data) = lending.present() {
        for position in &data.positions {
            if position.health_factor < CRITICAL_HEALTH_FACTOR {
                alerts.push(format!(
                    "Liquidation risk: {} on chain {} has health factor {:.2}",
                    position.protocol,
                    position.chain_id,
                    position.health_factor
                ));
            }
        }
    }

    if let (Some(protocol), Some(result)) = (primary_lp_protocol, lp.present())
    {
        if result.il_percentage < IL_ALERT_THRESHOLD {
            alerts.push(format!(
                "Impermanent loss: {} position is at {:.2}%",
                protocol, result.il_percentage
            ));
        }
    }

    alerts
}
