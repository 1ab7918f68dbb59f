use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client,
};
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

use crate::{
    configuration::Config,
    error::{self, Error},
    helpers::Service,
    types::UpstreamResult,
};

use super::Upstream;

pub const SECRET_HEADER: &str = "x-internal-secret";

#[derive(Debug)]
pub struct HTTP {
    pub config: Config,
    pub http: Client,
}

impl HTTP {
    pub fn new(config: Config) -> Result<HTTP, Error> {
        let mut header_map = HeaderMap::new();
        let mut secret = HeaderValue::from_str(&config.internal_secret)?;
        secret.set_sensitive(true);

        header_map.insert(HeaderName::from_static(SECRET_HEADER), secret);
        header_map.insert(
            HeaderName::from_static("user-agent"),
            HeaderValue::from_static("risk-aggregator"),
        );

        let http = match Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .default_headers(header_map)
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                return Err(error::Error::ReqwestError(e));
            },
        };

        Ok(HTTP { config, http })
    }

    async fn send(
        &self,
        service: Service,
        payload: &Value,
    ) -> Result<Value, Error> {
        let url = self.config.endpoints.get(service).clone();
        let response = self.http.post(url).json(payload).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::UpstreamStatus(status.as_u16()));
        }

        let json = response.json::<Value>().await?;
        Ok(json)
    }
}

#[async_trait]
impl Upstream for HTTP {
    async fn post(
        &self,
        service: Service,
        payload: Value,
    ) -> UpstreamResult<Value> {
        match self.send(service, &payload).await {
            Ok(json) => UpstreamResult::Present(json),
            Err(Error::ReqwestError(e)) if e.is_timeout() => {
                warn!(
                    service = %service,
                    "timed out after {}s",
                    self.config.timeout
                );
                UpstreamResult::Absent
            },
            Err(e) => {
                warn!(service = %service, "unavailable: {}", e);
                UpstreamResult::Absent
            },
        }
    }
}
