//! State behind the forecast view and the data shaping for its cards.
//!
//! [`ViewState`] owns the four independent slots of the view (query,
//! suggestions, forecast, error) and applies user events to them. Rendering
//! code only reads from it; [`ViewState::cards`] turns the current forecast
//! into presentation-ready [`ForecastCard`]s.

use chrono::NaiveDateTime;

use crate::{
    cities::CityDirectory,
    error::FetchError,
    icon::{Icon, resolve_icon},
    model::{ForecastEntry, ForecastResponse},
    provider::ForecastSource,
    suggest::suggestions,
};

/// Number of forecast entries shown as cards.
pub const MAX_CARDS: usize = 9;

/// Handle for one in-flight lookup, returned by [`ViewState::begin_fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    id: u64,
    city: String,
}

impl FetchTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// What a completed lookup did to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Forecast,
    Error,
    /// A newer lookup was started before this one finished.
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    query: String,
    suggestions: Vec<String>,
    forecast: Option<ForecastResponse>,
    error: Option<String>,
    last_request_id: u64,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn forecast(&self) -> Option<&ForecastResponse> {
        self.forecast.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A keystroke: store the lowercased text and recompute suggestions.
    pub fn input(&mut self, text: &str, directory: &CityDirectory) {
        self.query = text.to_lowercase();
        self.suggestions = suggestions(&self.query, directory);
    }

    /// City to look up for a submitted prompt value.
    ///
    /// A picked suggestion is used as shown; typed text goes through
    /// [`ViewState::input`] and the lowercased query is looked up.
    pub fn submitted_city(&mut self, text: &str, directory: &CityDirectory) -> String {
        if self.suggestions.iter().any(|s| s == text) {
            return text.to_string();
        }

        self.input(text, directory);
        self.query.clone()
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.suggestions.clear();
    }

    /// Start a lookup for `city`.
    ///
    /// An empty name is refused with [`FetchError::EmptyCity`] and the state
    /// is left as it was.
    pub fn begin_fetch(&mut self, city: &str) -> Result<FetchTicket, FetchError> {
        if city.is_empty() {
            return Err(FetchError::EmptyCity);
        }

        self.error = None;
        self.last_request_id += 1;

        Ok(FetchTicket { id: self.last_request_id, city: city.to_string() })
    }

    /// Apply the result of the lookup identified by `ticket`.
    ///
    /// Only the most recently started lookup may write; results of older
    /// tickets are dropped.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<ForecastResponse, FetchError>,
    ) -> FetchOutcome {
        if ticket.id != self.last_request_id {
            tracing::debug!(
                request = ticket.id,
                latest = self.last_request_id,
                city = %ticket.city,
                "dropping stale forecast result"
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(forecast) => {
                tracing::debug!(city = %forecast.city.name, entries = forecast.list.len(), "forecast updated");
                self.forecast = Some(forecast);
                self.clear();
                FetchOutcome::Forecast
            }
            Err(err) => {
                self.error = Some(err.to_string());
                FetchOutcome::Error
            }
        }
    }

    /// Begin a lookup, await `source` and apply the result.
    pub async fn fetch(
        &mut self,
        source: &dyn ForecastSource,
        city: &str,
    ) -> Result<FetchOutcome, FetchError> {
        let ticket = self.begin_fetch(city)?;
        let result = source.fetch_forecast(ticket.city()).await;
        Ok(self.complete_fetch(ticket, result))
    }

    /// Title line for the current forecast.
    pub fn heading(&self) -> Option<String> {
        self.forecast.as_ref().map(|f| format!("Weather Forecast for {}", f.city.name))
    }

    /// Cards for the first [`MAX_CARDS`] entries of the current forecast.
    pub fn cards(&self) -> Vec<ForecastCard> {
        self.forecast
            .as_ref()
            .map(|f| f.list.iter().take(MAX_CARDS).map(ForecastCard::from_entry).collect())
            .unwrap_or_default()
    }
}

/// Display-ready fields of one forecast entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub when: String,
    pub condition: String,
    pub icon: Icon,
    pub temperature_c: f64,
    pub humidity_pct: u8,
}

impl ForecastCard {
    pub fn from_entry(entry: &ForecastEntry) -> Self {
        let (label, description) = entry
            .primary_condition()
            .map(|c| (c.main.as_str(), c.description.as_str()))
            .unwrap_or(("", ""));

        Self {
            when: entry.local_time().map(format_timestamp).unwrap_or_default(),
            condition: display_condition(description),
            icon: resolve_icon(label),
            temperature_c: entry.main.temp,
            humidity_pct: entry.main.humidity,
        }
    }
}

/// Any description mentioning clouds is shown simply as "cloudy".
pub fn display_condition(description: &str) -> String {
    if description.to_lowercase().contains("cloud") {
        "cloudy".to_string()
    } else {
        description.to_string()
    }
}

/// Medium date, short time: "Jan 5, 2026, 3:00 PM".
pub fn format_timestamp(t: NaiveDateTime) -> String {
    t.format("%b %-d, %Y, %-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{City, Condition, Readings};
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn entry(hour: u32, main: &str, description: &str) -> ForecastEntry {
        ForecastEntry {
            dt: 1_767_600_000 + i64::from(hour) * 3600,
            dt_txt: Some(format!("2026-01-05 {hour:02}:00:00")),
            main: Readings { temp: 2.5 + f64::from(hour), humidity: 80 },
            weather: vec![Condition { main: main.into(), description: description.into() }],
        }
    }

    fn forecast(city: &str, entries: usize) -> ForecastResponse {
        ForecastResponse {
            code: "200".into(),
            count: Some(entries as u32),
            city: City { name: city.into(), country: None },
            list: (0..entries).map(|i| entry((i % 24) as u32, "Rain", "light rain")).collect(),
        }
    }

    /// Hands out queued results in order and records the cities asked for.
    #[derive(Debug, Default)]
    struct FakeSource {
        results: Mutex<Vec<Result<ForecastResponse, FetchError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn with(results: Vec<Result<ForecastResponse, FetchError>>) -> Self {
            Self { results: Mutex::new(results), calls: Mutex::default() }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ForecastSource for FakeSource {
        async fn fetch_forecast(&self, city: &str) -> Result<ForecastResponse, FetchError> {
            self.calls.lock().unwrap().push(city.to_string());
            self.results.lock().unwrap().remove(0)
        }
    }

    #[test]
    fn input_lowercases_and_suggests() {
        let dir = CityDirectory::new(["London", "Lisbon", "Paris"]);
        let mut state = ViewState::new();

        state.input("LO", &dir);
        assert_eq!(state.query(), "lo");
        assert_eq!(state.suggestions(), ["London"]);

        state.input("", &dir);
        assert!(state.suggestions().is_empty());
    }

    #[test]
    fn submitted_text_is_lowercased_unless_a_suggestion() {
        let dir = CityDirectory::new(["London", "Lisbon"]);
        let mut state = ViewState::new();

        state.input("lo", &dir);
        assert_eq!(state.submitted_city("London", &dir), "London");

        state.input("new yo", &dir);
        assert_eq!(state.submitted_city("New York", &dir), "new york");
        assert_eq!(state.query(), "new york");
    }

    #[test]
    fn clear_resets_query_and_suggestions_only() {
        let dir = CityDirectory::new(["London"]);
        let mut state = ViewState::new();
        state.input("lon", &dir);
        let ticket = state.begin_fetch("London").unwrap();
        state.complete_fetch(ticket, Err(FetchError::Domain("boom".into())));

        state.input("lon", &dir);
        state.clear();
        assert_eq!(state.query(), "");
        assert!(state.suggestions().is_empty());
        assert_eq!(state.error(), Some("boom"));
    }

    #[tokio::test]
    async fn success_stores_payload_and_clears_suggestions() {
        let dir = CityDirectory::new(["London", "Londonderry"]);
        let payload = forecast("London", 3);
        let source = FakeSource::with(vec![Ok(payload.clone())]);
        let mut state = ViewState::new();

        state.input("lon", &dir);
        assert_eq!(state.suggestions().len(), 2);

        let outcome = state.fetch(&source, "London").await.unwrap();
        assert_eq!(outcome, FetchOutcome::Forecast);
        assert_eq!(state.forecast(), Some(&payload));
        assert!(state.suggestions().is_empty());
        assert_eq!(state.query(), "");
        assert!(state.error().is_none());
        assert_eq!(source.calls(), vec!["London"]);
    }

    #[tokio::test]
    async fn domain_error_keeps_previous_forecast() {
        let previous = forecast("Paris", 2);
        let source = FakeSource::with(vec![
            Ok(previous.clone()),
            Err(FetchError::Domain("city not found".into())),
        ]);
        let mut state = ViewState::new();

        state.fetch(&source, "Paris").await.unwrap();
        let outcome = state.fetch(&source, "Atlantis").await.unwrap();

        assert_eq!(outcome, FetchOutcome::Error);
        assert_eq!(state.error(), Some("city not found"));
        assert_eq!(state.forecast(), Some(&previous));
    }

    #[tokio::test]
    async fn transport_error_shows_generic_text() {
        let source = FakeSource::with(vec![Err(FetchError::transport("connection refused"))]);
        let mut state = ViewState::new();

        state.fetch(&source, "Oslo").await.unwrap();
        assert_eq!(state.error(), Some(crate::error::TRANSPORT_ERROR_MESSAGE));
        assert!(state.forecast().is_none());
    }

    #[tokio::test]
    async fn new_fetch_clears_previous_error() {
        let source = FakeSource::with(vec![
            Err(FetchError::Domain("city not found".into())),
            Ok(forecast("Oslo", 1)),
        ]);
        let mut state = ViewState::new();

        state.fetch(&source, "Olso").await.unwrap();
        assert!(state.error().is_some());

        let ticket = state.begin_fetch("Oslo").unwrap();
        assert!(state.error().is_none());
        let result = source.fetch_forecast(ticket.city()).await;
        state.complete_fetch(ticket, result);
        assert!(state.forecast().is_some());
    }

    #[tokio::test]
    async fn empty_city_is_refused_without_calling_source() {
        let source = FakeSource::default();
        let mut state = ViewState::new();
        state.error = Some("old".into());

        let err = state.fetch(&source, "").await.unwrap_err();
        assert_eq!(err, FetchError::EmptyCity);
        assert!(err.is_alert());
        assert!(source.calls().is_empty());
        // untouched, the banner keeps its last message
        assert_eq!(state.error(), Some("old"));
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut state = ViewState::new();

        let first = state.begin_fetch("Paris").unwrap();
        let second = state.begin_fetch("Oslo").unwrap();
        assert!(second.id() > first.id());

        let outcome = state.complete_fetch(second, Ok(forecast("Oslo", 1)));
        assert_eq!(outcome, FetchOutcome::Forecast);

        let outcome = state.complete_fetch(first, Err(FetchError::Domain("late".into())));
        assert_eq!(outcome, FetchOutcome::Stale);
        assert!(state.error().is_none());
        assert_eq!(state.forecast().map(|f| f.city.name.as_str()), Some("Oslo"));
    }

    #[test]
    fn cards_truncate_to_nine() {
        let mut state = ViewState::new();
        assert!(state.cards().is_empty());

        let ticket = state.begin_fetch("London").unwrap();
        state.complete_fetch(ticket, Ok(forecast("London", 40)));

        assert_eq!(state.cards().len(), MAX_CARDS);
        assert_eq!(state.heading().as_deref(), Some("Weather Forecast for London"));
    }

    #[test]
    fn card_fields_come_from_entry() {
        let card = ForecastCard::from_entry(&entry(15, "Clouds", "broken clouds"));
        assert_eq!(card.when, "Jan 5, 2026, 3:00 PM");
        assert_eq!(card.condition, "cloudy");
        assert_eq!(card.icon, Icon::Cloudy);
        assert_eq!(card.temperature_c, 17.5);
        assert_eq!(card.humidity_pct, 80);

        let card = ForecastCard::from_entry(&entry(9, "Rain", "light rain"));
        assert_eq!(card.when, "Jan 5, 2026, 9:00 AM");
        assert_eq!(card.condition, "light rain");
        assert_eq!(card.icon, Icon::Rain);
    }

    #[test]
    fn card_without_condition_uses_defaults() {
        let mut e = entry(0, "Clear", "clear sky");
        e.weather.clear();
        let card = ForecastCard::from_entry(&e);
        assert_eq!(card.condition, "");
        assert_eq!(card.icon, Icon::Cloudy);
        assert_eq!(card.when, "Jan 5, 2026, 12:00 AM");
    }

    #[test]
    fn cloud_descriptions_display_as_cloudy() {
        assert_eq!(display_condition("broken clouds"), "cloudy");
        assert_eq!(display_condition("Overcast CLOUDS"), "cloudy");
        assert_eq!(display_condition("cloudburst"), "cloudy");
        assert_eq!(display_condition("light rain"), "light rain");
        assert_eq!(display_condition("clear sky"), "clear sky");
    }
}
