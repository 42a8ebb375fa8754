//! Human-friendly output for the forecast view.

use forecast_core::{ForecastCard, ViewState};

pub fn banner(message: &str) -> String {
    let bar = "─".repeat(message.chars().count() + 4);
    format!("┌{bar}┐\n│  {message}  │\n└{bar}┘")
}

pub fn alert(message: &str) -> String {
    format!("! {message}")
}

pub fn card(card: &ForecastCard) -> String {
    format!(
        "{icon}  {when}\n   Weather: {condition}\n   Temp: {temp}°C\n   Humidity: {humidity}%",
        icon = card.icon.glyph(),
        when = card.when,
        condition = card.condition,
        temp = card.temperature_c,
        humidity = card.humidity_pct,
    )
}

/// Heading plus one block per card; empty when nothing has been fetched.
pub fn forecast(state: &ViewState) -> String {
    let Some(heading) = state.heading() else {
        return String::new();
    };

    let mut out = format!("{heading}\n{}\n", "=".repeat(heading.chars().count()));
    for c in state.cards() {
        out.push('\n');
        out.push_str(&card(&c));
        out.push('\n');
    }
    out
}

/// Everything the view currently shows below the prompt.
pub fn view(state: &ViewState) -> String {
    let mut out = String::new();
    if let Some(error) = state.error() {
        out.push_str(&banner(error));
        out.push('\n');
    }
    out.push_str(&forecast(state));
    out
}
