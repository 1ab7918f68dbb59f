use std::fmt;

/// Analytics services a report is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Lending,
    Yield,
    LpAnalysis,
    Portfolio,
    Perps,
    Arbitrage,
}

impl Service {
    /// Returns the canonical string representation of this service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Lending => "lending",
            Service::Yield => "yield",
            Service::LpAnalysis => "lp-analysis",
            Service::Portfolio => "portfolio",
            Service::Perps => "perps",
            Service::Arbitrage => "arbitrage",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `0x` followed by 40 hex digits, either case.
pub fn is_evm_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(hex) => {
            hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
        },
        None => false,
    }
}

pub fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

pub fn is_non_negative_finite(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
