//! Station search and directory derivation
//!
//! Both are pure functions over the merged station universe. Matching is a
//! case-insensitive substring test on the resolved display name or the line
//! code.

use crate::i18n::Resolver;
use crate::types::Station;

fn matches(station: &Station, needle: &str, resolver: &Resolver<'_>) -> bool {
    if resolver.resolve(station).to_lowercase().contains(needle) {
        return true;
    }
    station
        .line
        .as_deref()
        .is_some_and(|line| line.to_lowercase().contains(needle))
}

/// Live search results, in catalog order.
///
/// An empty query yields no results, which is distinct from a query that
/// matched nothing only in how the caller words it.
pub fn search_stations<'a>(
    query: &str,
    universe: &'a [Station],
    resolver: &Resolver<'_>,
) -> Vec<&'a Station> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    universe
        .iter()
        .filter(|s| matches(s, &needle, resolver))
        .collect()
}

/// Alphabetical station directory, ignoring case. An empty query lists
/// every station.
pub fn directory<'a>(
    query: &str,
    universe: &'a [Station],
    resolver: &Resolver<'_>,
) -> Vec<&'a Station> {
    let needle = query.to_lowercase();
    let mut stations: Vec<&Station> = universe
        .iter()
        .filter(|s| needle.is_empty() || matches(s, &needle, resolver))
        .collect();
    stations.sort_by_cached_key(|s| (s.name.to_lowercase(), s.name.clone()));
    stations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Translations;

    fn station(id: &str, name: &str, line: Option<&str>) -> Station {
        Station {
            id: id.into(),
            name: name.to_string(),
            translation_key: None,
            distance: "—".to_string(),
            line: line.map(str::to_string),
            is_favorite: false,
        }
    }

    fn universe() -> Vec<Station> {
        vec![
            station("1", "Trichy Junction", Some("TPJ")),
            station("2", "Agra Cantt", Some("AGC")),
            station("3", "Madurai Junction", Some("MDU")),
        ]
    }

    #[test]
    fn test_empty_query_is_empty() {
        let t = Translations::builtin().unwrap();
        let u = universe();
        assert!(search_stations("", &u, &t.resolver("English")).is_empty());
    }

    #[test]
    fn test_substring_not_prefix() {
        let t = Translations::builtin().unwrap();
        let u = universe();
        let found = search_stations("junc", &u, &t.resolver("English"));
        let ids: Vec<_> = found.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_line_code_match() {
        let t = Translations::builtin().unwrap();
        let u = universe();
        let found = search_stations("agc", &u, &t.resolver("English"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.as_str(), "2");
    }

    #[test]
    fn test_directory_sorted_and_lists_all_on_empty() {
        let t = Translations::builtin().unwrap();
        let u = universe();
        let names: Vec<_> = directory("", &u, &t.resolver("English"))
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Agra Cantt", "Madurai Junction", "Trichy Junction"]);
    }

    #[test]
    fn test_directory_ignores_case() {
        let t = Translations::builtin().unwrap();
        let mut u = universe();
        u.push(station("4", "bhopal Junction", Some("BPL")));
        let names: Vec<_> = directory("", &u, &t.resolver("English"))
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Agra Cantt",
                "bhopal Junction",
                "Madurai Junction",
                "Trichy Junction",
            ]
        );
    }
}
