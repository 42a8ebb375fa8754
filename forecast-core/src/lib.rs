//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - The city directory and prefix-based city suggestions
//! - The OpenWeather 5-day forecast client behind the [`ForecastSource`] trait
//! - Icon lookup and card shaping for forecast entries
//! - The view state the interactive front end drives
//! - Configuration handling
//!
//! It is used by `forecast-cli`, but can also be reused by other front ends.

pub mod cities;
pub mod config;
pub mod error;
pub mod icon;
pub mod model;
pub mod provider;
pub mod suggest;
pub mod view;

pub use cities::CityDirectory;
pub use config::Config;
pub use error::FetchError;
pub use icon::{Icon, resolve_icon};
pub use model::{ForecastEntry, ForecastResponse};
pub use provider::{ForecastSource, client_from_config, openweather::OpenWeatherClient};
pub use suggest::suggestions;
pub use view::{FetchOutcome, FetchTicket, ForecastCard, ViewState};
