//! Search and merge behavior against the shipped catalog and locale tables

use steasy_core::{
    builtin_catalog, directory, merge_stations, search_stations, Station, StationGroup,
    Translations,
};

fn ids(stations: &[&Station]) -> Vec<String> {
    stations.iter().map(|s| s.id.to_string()).collect()
}

#[test]
fn empty_query_yields_no_results_in_every_language() {
    let translations = Translations::builtin().unwrap();
    let universe = builtin_catalog().station_universe();
    for code in ["English", "Hindi", "Tamil", "Malayalam"] {
        assert!(search_stations("", universe, &translations.resolver(code)).is_empty());
    }
}

#[test]
fn results_follow_catalog_order() {
    let translations = Translations::builtin().unwrap();
    let universe = builtin_catalog().station_universe();
    let found = search_stations("central", universe, &translations.resolver("English"));
    assert_eq!(ids(&found), vec!["2", "3", "108", "201", "409"]);
}

#[test]
fn match_is_case_insensitive_substring() {
    let translations = Translations::builtin().unwrap();
    let universe = builtin_catalog().station_universe();
    let resolver = translations.resolver("English");
    assert_eq!(
        ids(&search_stations("CHENNAI", universe, &resolver)),
        vec!["2", "20"]
    );
    assert_eq!(
        ids(&search_stations("nnai", universe, &resolver)),
        vec!["2", "20"]
    );
}

#[test]
fn line_code_matches_when_name_does_not() {
    let translations = Translations::builtin().unwrap();
    let universe = builtin_catalog().station_universe();
    let found = search_stations("tpj", universe, &translations.resolver("English"));
    assert_eq!(ids(&found), vec!["415"]);
}

#[test]
fn search_uses_resolved_names() {
    let translations = Translations::builtin().unwrap();
    let universe = builtin_catalog().station_universe();
    let hindi = translations.resolver("Hindi");

    // localized stations no longer match their English literal
    assert!(search_stations("chennai", universe, &hindi).is_empty());
    assert_eq!(ids(&search_stations("चेन्नई", universe, &hindi)), vec!["2", "20"]);
    // ...but their line code still does
    assert_eq!(ids(&search_stations("mas", universe, &hindi)), vec!["2"]);
}

#[test]
fn no_match_is_empty() {
    let translations = Translations::builtin().unwrap();
    let universe = builtin_catalog().station_universe();
    assert!(search_stations("zzzz", universe, &translations.resolver("English")).is_empty());
}

#[test]
fn directory_lists_everything_alphabetically() {
    let translations = Translations::builtin().unwrap();
    let universe = builtin_catalog().station_universe();
    let listed = directory("", universe, &translations.resolver("English"));
    assert_eq!(listed.len(), universe.len());
    assert!(listed.windows(2).all(|w| w[0].name <= w[1].name));
    assert_eq!(listed[0].name, "Ahmedabad Junction");
}

#[test]
fn universe_has_one_entry_per_identifier() {
    let catalog = builtin_catalog();
    let universe = catalog.station_universe();
    let mut seen = std::collections::HashSet::new();
    for station in universe {
        assert!(seen.insert(station.id.clone()), "duplicate {}", station.id);
    }
}

#[test]
fn overlapping_groups_merge_to_single_entry() {
    let catalog = builtin_catalog();
    let nearby = catalog.group(StationGroup::Nearby);
    let five = nearby.iter().find(|s| s.id.as_str() == "5").unwrap().clone();
    let mut overlap = vec![five.clone()];
    overlap[0].distance = "9 km".to_string();

    let merged = merge_stations([nearby, overlap.as_slice()]);
    let matching: Vec<_> = merged.iter().filter(|s| s.id.as_str() == "5").collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(merged.len(), nearby.len());
    assert_eq!(matching[0].distance, "9 km");
}
