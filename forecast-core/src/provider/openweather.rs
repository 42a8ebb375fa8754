use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::instrument;

use crate::{
    error::{CITY_NOT_FOUND_MESSAGE, FetchError},
    model::{ForecastResponse, SUCCESS_CODE},
};

use super::ForecastSource;

pub const OPENWEATHER_FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, OPENWEATHER_FORECAST_URL.to_string())
    }

    pub fn with_endpoint(api_key: String, endpoint: String) -> Self {
        Self { api_key, endpoint, http: Client::new() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[instrument(skip(self), level = "debug")]
    async fn fetch(&self, city: &str) -> Result<ForecastResponse, FetchError> {
        tracing::debug!(endpoint = %self.endpoint, "requesting 5-day forecast");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| transport("Failed to send request to OpenWeather (5-day forecast)", e))?;

        // The body carries its own status code, so the HTTP status is only logged.
        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| transport("Failed to read OpenWeather forecast response body", e))?;

        tracing::debug!(%status, bytes = body.len(), "forecast response received");

        classify(&body)
    }
}

#[async_trait]
impl ForecastSource for OpenWeatherClient {
    async fn fetch_forecast(&self, city: &str) -> Result<ForecastResponse, FetchError> {
        if city.is_empty() {
            return Err(FetchError::EmptyCity);
        }

        self.fetch(city).await
    }
}

/// Split a response body into a forecast, a domain error or a transport error.
///
/// Only the code is inspected until it reads "200"; the rest of the payload is
/// decoded afterwards, so odd error bodies still surface as domain errors.
fn classify(body: &str) -> Result<ForecastResponse, FetchError> {
    let mut payload: Value = serde_json::from_str(body).map_err(|e| {
        transport(&format!("Failed to parse OpenWeather forecast JSON: {}", truncate_body(body)), e)
    })?;

    let code = response_code(&payload);

    if code.as_deref() != Some(SUCCESS_CODE) {
        let message =
            server_message(&payload).unwrap_or_else(|| CITY_NOT_FOUND_MESSAGE.to_string());

        tracing::info!(code = code.as_deref().unwrap_or("<missing>"), %message, "forecast lookup rejected");
        return Err(FetchError::Domain(message));
    }

    if let Some(fields) = payload.as_object_mut() {
        fields.insert("cod".to_string(), Value::String(SUCCESS_CODE.to_string()));
    }

    serde_json::from_value(payload)
        .map_err(|e| transport("Failed to decode OpenWeather forecast payload", e))
}

/// `cod` is a string on most responses but a bare number on some errors.
fn response_code(payload: &Value) -> Option<String> {
    match payload.get("cod")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// The server's explanation, unless it is empty, null, false or zero.
fn server_message(payload: &Value) -> Option<String> {
    match payload.get("message")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

fn transport(context: &str, cause: impl std::fmt::Display) -> FetchError {
    tracing::warn!(error = %cause, "{context}");
    FetchError::transport(format!("{context}: {cause}"))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
