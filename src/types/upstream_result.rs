use serde::de::DeserializeOwned;

/// Outcome of a single upstream call. `Absent` covers every failure mode:
/// non-success status, transport error, timeout and schema mismatch.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamResult<T> {
    Present(T),
    Absent,
}

impl<T> UpstreamResult<T> {
    pub fn present(&self) -> Option<&T> {
        match self {
            UpstreamResult::Present(value) => Some(value),
            UpstreamResult::Absent => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            UpstreamResult::Present(value) => Some(value),
            UpstreamResult::Absent => None,
        }
    }
}

/// Response body of an upstream service, checked beyond what serde enforces.
pub trait UpstreamPayload: DeserializeOwned {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}
