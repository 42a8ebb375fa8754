use thiserror::Error;

pub const EMPTY_CITY_MESSAGE: &str = "Please enter a city!";
pub const CITY_NOT_FOUND_MESSAGE: &str = "City not found!";
pub const TRANSPORT_ERROR_MESSAGE: &str = "Error fetching weather data!";

/// Why a forecast lookup produced no forecast.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Submitted without a city name; no request was made.
    #[error("Please enter a city!")]
    EmptyCity,

    /// The endpoint answered with a non-success code.
    #[error("{0}")]
    Domain(String),

    /// The exchange failed or the body could not be parsed. The payload is
    /// the underlying cause, kept for logs.
    #[error("Error fetching weather data!")]
    Transport(String),
}

impl FetchError {
    /// Input problems are shown as an alert rather than in the error banner.
    pub fn is_alert(&self) -> bool {
        matches!(self, Self::EmptyCity)
    }

    pub fn transport(cause: impl std::fmt::Display) -> Self {
        Self::Transport(cause.to_string())
    }
}
