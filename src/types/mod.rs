pub use self::{
    analysis_request::{
        AnalysisRequest, ExplicitLpPosition, DEFAULT_CHAIN_IDS, MAX_CHAIN_IDS,
    },
    arbitrage::{ArbitrageData, ArbitrageRequest},
    lending::{LendingData, LendingPosition, LendingRequest},
    lp_analysis::{ImpermanentLossResult, LpAnalysisRequest},
    perps::{PerpsData, PerpsRequest},
    portfolio::{DetectedLpPosition, PortfolioData, PortfolioRequest},
    report::{LendingAnalysis, RiskReport, YieldAnalysis},
    upstream_result::{UpstreamPayload, UpstreamResult},
    yields::{YieldData, YieldPool, YieldRequest},
};

mod analysis_request;
mod arbitrage;
mod lending;
mod lp_analysis;
mod perps;
mod portfolio;
mod report;
mod upstream_result;
mod yields;
