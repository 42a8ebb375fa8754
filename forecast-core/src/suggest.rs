use crate::cities::CityDirectory;

/// Upper bound on the number of suggestions offered for one query.
pub const MAX_SUGGESTIONS: usize = 5;

/// Case-insensitive prefix matches for `query`, in directory order.
///
/// Matches are lowercased and then re-capitalized on the first character only,
/// so "new york" in the list is offered as "New york".
pub fn suggestions(query: &str, directory: &CityDirectory) -> Vec<String> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();

    directory
        .iter()
        .map(str::to_lowercase)
        .filter(|city| city.starts_with(&needle))
        .take(MAX_SUGGESTIONS)
        .map(|city| capitalize_first(&city))
        .collect()
}

pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
