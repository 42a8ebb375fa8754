use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Code the forecast endpoint reports for a successful lookup.
pub const SUCCESS_CODE: &str = "200";

/// Parsed 5-day / 3-hour forecast payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(rename = "cod")]
    pub code: String,
    #[serde(rename = "cnt", default)]
    pub count: Option<u32>,
    pub city: City,
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
}

/// One 3-hour step of the forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Unix timestamp, UTC.
    pub dt: i64,
    /// "YYYY-MM-DD HH:MM:SS" as sent by the endpoint.
    #[serde(default)]
    pub dt_txt: Option<String>,
    pub main: Readings,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readings {
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Condition group label, e.g. "Rain" or "Clouds".
    pub main: String,
    pub description: String,
}

impl ForecastEntry {
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    /// Wall-clock time of this step.
    ///
    /// `dt_txt` is taken verbatim when present, otherwise `dt` is shifted into
    /// the local timezone.
    pub fn local_time(&self) -> Option<NaiveDateTime> {
        self.dt_txt
            .as_deref()
            .and_then(|txt| NaiveDateTime::parse_from_str(txt, "%Y-%m-%d %H:%M:%S").ok())
            .or_else(|| {
                DateTime::from_timestamp(self.dt, 0)
                    .map(|utc| utc.with_timezone(&Local).naive_local())
            })
    }
}
