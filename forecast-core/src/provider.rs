use crate::{Config, ForecastResponse, error::FetchError, provider::openweather::OpenWeatherClient};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Anything that can turn a city name into a forecast.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch_forecast(&self, city: &str) -> Result<ForecastResponse, FetchError>;
}

/// Construct the forecast client described by `config`.
///
/// A missing API key is not an error here; the endpoint rejects the request
/// and the rejection surfaces as a domain error.
pub fn client_from_config(config: &Config) -> Box<dyn ForecastSource> {
    if config.api_key.is_none() {
        tracing::warn!("no API key configured; requests will be rejected by the endpoint");
    }

    let api_key = config.api_key.clone().unwrap_or_default();
    Box::new(OpenWeatherClient::with_endpoint(api_key, config.endpoint_or_default()))
}
