//! Report assembly.
//!
//! Lending, yield and the discovery→LP chain run concurrently; only LP
//! analysis waits on position discovery. Optional perps and arbitrage
//! scans join the same fan-out. No upstream fault fails the request.

use chrono::{DateTime, Utc};
use futures::future::OptionFuture;
use tracing::{debug, info};

use crate::{
    error::Error,
    helpers::Service,
    provider::{call, Upstream},
    types::{
        AnalysisRequest, ArbitrageData, ArbitrageRequest,
        ImpermanentLossResult, LendingAnalysis, LendingData, LendingRequest,
        PerpsData, PerpsRequest, PortfolioData, PortfolioRequest, RiskReport,
        UpstreamResult, YieldAnalysis, YieldData, YieldRequest,
    },
};

use super::{
    alerts::critical_alerts, lp_input::PrimaryLpPosition, scorer,
    summary::summarize,
};

pub const LENDING_PROTOCOLS: &[&str] = &["aave", "compound"];
pub const LENDING_ALERT_THRESHOLD: f64 = 1.5;

pub const YIELD_PROTOCOL_IDS: &[&str] =
    &["aave-v3", "compound-v3", "uniswap-v3", "curve-dex", "lido"];
pub const YIELD_APY_THRESHOLD: f64 = 10.0;
pub const YIELD_TVL_THRESHOLD: f64 = 0.2;

pub const PERPS_VENUE_IDS: &[&str] = &["hyperliquid", "dydx", "gmx"];
pub const PERPS_MARKETS: &[&str] = &["BTC", "ETH", "SOL"];

pub const ARBITRAGE_MIN_PROFIT_PCT: f64 = 0.5;

/// Outcome of the discovery→LP chain.
#[derive(Debug)]
struct LpOutcome {
    position_count: u32,
    primary_protocol: Option<String>,
    result: UpstreamResult<ImpermanentLossResult>,
}

pub async fn generate_report<U>(
    upstream: &U,
    request: &AnalysisRequest,
) -> Result<RiskReport, Error>
where
    U: Upstream + ?Sized,
{
    generate_report_at(upstream, request, Utc::now()).await
}

pub async fn generate_report_at<U>(
    upstream: &U,
    request: &AnalysisRequest,
    now: DateTime<Utc>,
) -> Result<RiskReport, Error>
where
    U: Upstream + ?Sized,
{
    request.validate()?;

    let wallet_address = request.wallet_address.as_str();
    let chain_ids = request.chain_ids.as_slice();

    let lending_request = LendingRequest {
        wallet_address,
        chain_ids,
        protocols: LENDING_PROTOCOLS,
        alert_threshold: LENDING_ALERT_THRESHOLD,
    };
    let yield_request = YieldRequest {
        protocol_ids: YIELD_PROTOCOL_IDS,
        chain_ids,
        apy_threshold: YIELD_APY_THRESHOLD,
        tvl_threshold: YIELD_TVL_THRESHOLD,
    };
    let perps_request = PerpsRequest {
        venue_ids: PERPS_VENUE_IDS,
        markets: PERPS_MARKETS,
    };
    let arbitrage_request = ArbitrageRequest {
        chain_id: chain_ids[0],
        min_profit_pct: ARBITRAGE_MIN_PROFIT_PCT,
    };

    let lending = call::<_, _, LendingData>(
        upstream,
        Service::Lending,
        &lending_request,
    );
    let yields =
        call::<_, _, YieldData>(upstream, Service::Yield, &yield_request);
    let perps: OptionFuture<_> = request
        .include_perps
        .then(|| {
            call::<_, _, PerpsData>(upstream, Service::Perps, &perps_request)
        })
        .into();
    let arbitrage: OptionFuture<_> = request
        .include_arbitrage
        .then(|| {
            call::<_, _, ArbitrageData>(
                upstream,
                Service::Arbitrage,
                &arbitrage_request,
            )
        })
        .into();

    let (lp, lending, yields, perps, arbitrage) = tokio::join!(
        analyze_lp(upstream, request, now),
        lending,
        yields,
        perps,
        arbitrage,
    );

    let score = scorer::score(&lending, &lp.result, &yields);
    let alerts = critical_alerts(
        &lending,
        lp.primary_protocol.as_deref(),
        &lp.result,
    );
    let total_positions = lending
        .present()
        .map(|data| data.total_positions())
        .unwrap_or(0)
        + lp.position_count;
    let summary = summarize(
        score,
        total_positions,
        &alerts,
        &lending,
        &lp.result,
        &yields,
    );

    let report = RiskReport {
        wallet_address: request.wallet_address.to_owned(),
        overall_risk_score: score,
        total_positions,
        critical_alerts: alerts,
        lending_analysis: lending.into_option().map(|data| LendingAnalysis {
            at_risk_count: data.at_risk_count(LENDING_ALERT_THRESHOLD),
            positions: data.positions,
        }),
        yield_analysis: yields.into_option().map(|data| YieldAnalysis {
            pools: data.pools,
            alerts_count: data.alerts_count,
        }),
        lp_analysis: lp.result.into_option(),
        perps_analysis: perps.and_then(UpstreamResult::into_option),
        arbitrage_opportunities: arbitrage
            .and_then(UpstreamResult::into_option),
        summary,
        timestamp: now,
    };

    info!(
        wallet = %report.wallet_address,
        score = report.overall_risk_score,
        alerts = report.critical_alerts.len(),
        sections = ?report.present_sections(),
        "risk report generated"
    );

    Ok(report)
}

async fn analyze_lp<U>(
    upstream: &U,
    request: &AnalysisRequest,
    now: DateTime<Utc>,
) -> LpOutcome
where
    U: Upstream + ?Sized,
{
    let positions: Vec<PrimaryLpPosition> =
        match request.explicit_positions() {
            Some(explicit) => {
                explicit.iter().map(PrimaryLpPosition::from).collect()
            },
            None => discover_positions(upstream, request).await,
        };

    let position_count = positions.len() as u32;

    let Some(primary) = positions.into_iter().next() else {
        debug!(
            wallet = %request.wallet_address,
            "no LP position, skipping LP analysis"
        );
        return LpOutcome {
            position_count,
            primary_protocol: None,
            result: UpstreamResult::Absent,
        };
    };

    let Some(lp_request) = primary.to_request(now) else {
        debug!(
            wallet = %request.wallet_address,
            protocol = %primary.protocol,
            "LP prices give no finite ratio, skipping LP analysis"
        );
        return LpOutcome {
            position_count,
            primary_protocol: Some(primary.protocol),
            result: UpstreamResult::Absent,
        };
    };

    let result = call::<_, _, ImpermanentLossResult>(
        upstream,
        Service::LpAnalysis,
        &lp_request,
    )
    .await;

    LpOutcome {
        position_count,
        primary_protocol: Some(primary.protocol),
        result,
    }
}

async fn discover_positions<U>(
    upstream: &U,
    request: &AnalysisRequest,
) -> Vec<PrimaryLpPosition>
where
    U: Upstream + ?Sized,
{
    let portfolio_request = PortfolioRequest {
        wallet_address: &request.wallet_address,
        chain_ids: &request.chain_ids,
    };

    match call::<_, _, PortfolioData>(
        upstream,
        Service::Portfolio,
        &portfolio_request,
    )
    .await
    {
        UpstreamResult::Present(data) => {
            data.lp_positions.iter().map(PrimaryLpPosition::from).collect()
        },
        UpstreamResult::Absent => vec![],
    }
}
