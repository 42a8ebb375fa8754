/// Display glyph for a forecast condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Sunny,
    Cloudy,
    Rain,
    Snow,
    Thunderstorm,
    Fog,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Sunny => "☀",
            Icon::Cloudy => "☁",
            Icon::Rain => "🌧",
            Icon::Snow => "❄",
            Icon::Thunderstorm => "⛈",
            Icon::Fog => "🌫",
        }
    }
}

/// Map an OpenWeather condition label (`weather[].main`) to an icon.
///
/// Exact, case-sensitive match. Anything unknown renders as cloudy.
pub fn resolve_icon(label: &str) -> Icon {
    match label {
        "Clear" => Icon::Sunny,
        "Clouds" => Icon::Cloudy,
        "Rain" => Icon::Rain,
        "Snow" => Icon::Snow,
        "Thunderstorm" => Icon::Thunderstorm,
        "Mist" | "Fog" => Icon::Fog,
        _ => Icon::Cloudy,
    }
}
