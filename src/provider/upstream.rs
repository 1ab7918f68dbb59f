use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::{
    helpers::Service,
    types::{UpstreamPayload, UpstreamResult},
};

/// Transport to the analytics services. Implementations must never fail:
/// every fault is reported as `UpstreamResult::Absent`. This is also the
/// only place a retry policy would be introduced.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn post(
        &self,
        service: Service,
        payload: Value,
    ) -> UpstreamResult<Value>;
}

/// Sends `payload` to `service` and validates the response against `T`.
pub async fn call<U, P, T>(
    upstream: &U,
    service: Service,
    payload: &P,
) -> UpstreamResult<T>
where
    U: Upstream + ?Sized,
    P: Serialize + ?Sized,
    T: UpstreamPayload,
{
    let body = match serde_json::to_value(payload) {
        Ok(body) => body,
        Err(e) => {
            warn!(service = %service, "could not encode request: {}", e);
            return UpstreamResult::Absent;
        },
    };

    let value = match upstream.post(service, body).await {
        UpstreamResult::Present(value) => value,
        UpstreamResult::Absent => return UpstreamResult::Absent,
    };

    let data = match serde_json::from_value::<T>(value) {
        Ok(data) => data,
        Err(e) => {
            warn!(service = %service, "unexpected response shape: {}", e);
            return UpstreamResult::Absent;
        },
    };

    if let Err(reason) = data.validate() {
        warn!(service = %service, "rejected response: {}", reason);
        return UpstreamResult::Absent;
    }

    UpstreamResult::Present(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ImpermanentLossResult, LendingData};
    use serde_json::json;

    struct Fixed(UpstreamResult<Value>);

    #[async_trait]
    impl Upstream for Fixed {
        async fn post(&self, _: Service, _: Value) -> UpstreamResult<Value> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn test_call_parses_valid_payload() {
        let upstream = Fixed(UpstreamResult::Present(json!({
            "il_percentage": -3.5,
            "net_apr": 12.0,
            "recommendation": "hold"
        })));

        let result: UpstreamResult<ImpermanentLossResult> =
            call(&upstream, Service::LpAnalysis, &json!({})).await;

        assert_eq!(
            result.present().map(|r| r.il_percentage),
            Some(-3.5)
        );
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_absent() {
        let upstream =
            Fixed(UpstreamResult::Present(json!({ "unexpected": true })));

        let result: UpstreamResult<ImpermanentLossResult> =
            call(&upstream, Service::LpAnalysis, &json!({})).await;

        assert!(matches!(result, UpstreamResult::Absent));
    }

    #[tokio::test]
    async fn test_failed_validation_is_absent() {
        let upstream = Fixed(UpstreamResult::Present(json!({
            "positions": [{
                "protocol": "aave",
                "chain_id": 1,
                "health_factor": -1.0,
                "collateral_usd": 10.0
            }]
        })));

        let result: UpstreamResult<LendingData> =
            call(&upstream, Service::Lending, &json!({})).await;

        assert!(matches!(result, UpstreamResult::Absent));
    }

    #[tokio::test]
    async fn test_absent_transport_stays_absent() {
        let upstream = Fixed(UpstreamResult::Absent);

        let result: UpstreamResult<LendingData> =
            call(&upstream, Service::Lending, &json!({})).await;

        assert!(matches!(result, UpstreamResult::Absent));
    }
}
