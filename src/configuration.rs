use std::{
    env::{self, VarError},
    fs,
    ops::Deref,
    path::Path,
    sync::Arc,
};

use anyhow::Context;
use url::Url;

use crate::{error::Error, helpers::Service, provider::HTTP};

const DEFAULT_TIMEOUT_SECONDS: u64 = 8;

#[derive(Debug)]
pub struct AppState<T>(Arc<T>);

impl<T> AppState<T> {
    pub fn new(state: T) -> AppState<T> {
        AppState(Arc::new(state))
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> AppState<T> {
        AppState(Arc::clone(&self.0))
    }
}

impl<T> Deref for AppState<T> {
    type Target = Arc<T>;

    fn deref(&self) -> &Arc<T> {
        &self.0
    }
}

#[derive(Debug)]
pub struct State {
    pub config: Config,
    pub http: HTTP,
}

impl State {
    pub fn new(config: Config, http: HTTP) -> State {
        Self { config, http }
    }
}

/// Base URLs of the analytics services a report is assembled from.
#[derive(Debug, Clone)]
pub struct UpstreamEndpoints {
    pub lending: Url,
    pub yields: Url,
    pub lp_analysis: Url,
    pub portfolio: Url,
    pub perps: Url,
    pub arbitrage: Url,
}

impl UpstreamEndpoints {
    pub fn get(&self, service: Service) -> &Url {
        match service {
            Service::Lending => &self.lending,
            Service::Yield => &self.yields,
            Service::LpAnalysis => &self.lp_analysis,
            Service::Portfolio => &self.portfolio,
            Service::Perps => &self.perps,
            Service::Arbitrage => &self.arbitrage,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub timeout: u64,
    pub internal_secret: String,
    pub endpoints: UpstreamEndpoints,
}

impl Config {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

pub fn get_configuration() -> Result<Config, Error> {
    parse_configuration(|key| env::var(key))
}

/// Builds the configuration from an arbitrary key lookup.
pub fn parse_configuration<F>(lookup: F) -> Result<Config, Error>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let server_host = lookup("SERVER_HOST")?;
    let port: u16 = lookup("PORT")?.parse()?;
    let allowed_origins = lookup("ALLOWED_ORIGINS")?
        .split(',')
        .map(|item| item.trim().to_owned())
        .filter(|item| !item.is_empty())
        .collect::<Vec<String>>();

    let timeout = match lookup("TIMEOUT") {
        Ok(value) => value.parse()?,
        Err(VarError::NotPresent) => DEFAULT_TIMEOUT_SECONDS,
        Err(e) => return Err(Error::VAR(e)),
    };

    if timeout == 0 {
        return Err(Error::ConfigurationError(String::from(
            "TIMEOUT must be greater than zero",
        )));
    }

    let internal_secret = match lookup("INTERNAL_SECRET") {
        Ok(secret) if !secret.trim().is_empty() => secret,
        _ => return Err(Error::MissingSecret()),
    };

    let endpoints = UpstreamEndpoints {
        lending: parse_url(&lookup, "LENDING_SERVICE_URL")?,
        yields: parse_url(&lookup, "YIELD_SERVICE_URL")?,
        lp_analysis: parse_url(&lookup, "LP_SERVICE_URL")?,
        portfolio: parse_url(&lookup, "PORTFOLIO_SERVICE_URL")?,
        perps: parse_url(&lookup, "PERPS_SERVICE_URL")?,
        arbitrage: parse_url(&lookup, "ARBITRAGE_SERVICE_URL")?,
    };

    let config = Config {
        server_host,
        port,
        allowed_origins,
        timeout,
        internal_secret,
        endpoints,
    };

    Ok(config)
}

fn parse_url<F>(lookup: &F, key: &str) -> Result<Url, Error>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let value = lookup(key)?;
    let url = Url::parse(&value)
        .with_context(|| format!("{} is not a valid url", key))?;

    Ok(url)
}

/// Exports `KEY=VALUE` lines of the optional `.env` file into the process
/// environment. Values already present in the environment are kept.
pub fn set_configuration() -> Result<(), Error> {
    let config_file: &str = ".env";
    let directory = env!("CARGO_MANIFEST_DIR");
    let path = format!("{}/{}", directory, config_file);

    if !Path::new(&path).exists() {
        return Ok(());
    }

    let config_string = fs::read_to_string(path)?;

    for (key, value) in parse_config_string(&config_string) {
        if env::var_os(key).is_none() {
            env::set_var(key, value);
        }
    }

    Ok(())
}

fn parse_config_string(config: &str) -> Vec<(&str, &str)> {
    config
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, _)| !k.is_empty())
        .collect()
}
