use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Cities offered as suggestions when no custom list is configured.
const BUILTIN_CITIES: &[&str] = &[
    "London", "New York", "Paris", "Tokyo", "Berlin", "Madrid", "Rome", "Lisbon",
    "Dublin", "Amsterdam", "Brussels", "Vienna", "Prague", "Warsaw", "Budapest",
    "Athens", "Istanbul", "Moscow", "Kyiv", "Stockholm", "Oslo", "Helsinki",
    "Copenhagen", "Zurich", "Geneva", "Munich", "Hamburg", "Frankfurt", "Milan",
    "Naples", "Barcelona", "Valencia", "Seville", "Porto", "Edinburgh",
    "Manchester", "Liverpool", "Leeds", "Lyon", "Marseille", "Nice", "Toulouse",
    "Los Angeles", "Chicago", "Houston", "Phoenix", "Philadelphia", "San Antonio",
    "San Diego", "San Francisco", "Seattle", "Boston", "Miami", "Denver",
    "Toronto", "Montreal", "Vancouver", "Mexico City", "Sao Paulo", "Rio de Janeiro",
    "Buenos Aires", "Lima", "Bogota", "Santiago", "Cairo", "Lagos", "Nairobi",
    "Johannesburg", "Cape Town", "Casablanca", "Dubai", "Doha", "Riyadh",
    "Tehran", "Delhi", "Mumbai", "Bangalore", "Kolkata", "Chennai", "Karachi",
    "Lahore", "Dhaka", "Bangkok", "Singapore", "Kuala Lumpur", "Jakarta",
    "Manila", "Hanoi", "Ho Chi Minh City", "Hong Kong", "Shanghai", "Beijing",
    "Seoul", "Busan", "Osaka", "Kyoto", "Sydney", "Melbourne", "Brisbane",
    "Perth", "Auckland", "Wellington",
];

/// Ordered, immutable list of city names used for suggestions.
///
/// Entries keep whatever casing the source used; matching lowercases them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityDirectory {
    cities: Vec<String>,
}

impl CityDirectory {
    pub fn new<I, S>(cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { cities: cities.into_iter().map(Into::into).collect() }
    }

    /// The directory compiled into the binary.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_CITIES.iter().copied())
    }

    /// Parse a newline-separated list. Blank lines and `#` comments are skipped.
    pub fn parse(contents: &str) -> Self {
        Self::new(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Load a city list from a text file, one city per line.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read city list: {}", path.display()))?;

        Ok(Self::parse(&contents))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cities.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl Default for CityDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}
