//! Derived, read-only views over [`AppState`]
//!
//! Nothing here mutates state. Every name goes through the active language's
//! resolver, so a language switch is reflected on the next read.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use steasy_core::{directory, search_stations, Amenity, Coordinates, Station};

use crate::state::{AppState, ChatSender};

/// Characters left as-is in a URI component
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// How many favorite stations the home screen previews
pub const HOME_FAVORITES_PREVIEW: usize = 4;

// ─────────────────────────────────────────────────────────────────────────────
// Search
// ─────────────────────────────────────────────────────────────────────────────

/// Home live search over the merged station universe
pub fn search_results(state: &AppState) -> Vec<&'static Station> {
    search_stations(
        &state.home_query,
        state.catalog.station_universe(),
        &state.resolver(),
    )
}

/// Station list, alphabetical, filtered by the directory query
pub fn directory_results(state: &AppState) -> Vec<&'static Station> {
    directory(
        &state.directory_query,
        state.catalog.station_universe(),
        &state.resolver(),
    )
}

/// Favorite stations shown on home, in catalog order
pub fn home_favorites(state: &AppState) -> Vec<&'static Station> {
    state
        .catalog
        .station_universe()
        .iter()
        .filter(|s| state.favorites.is_station_favorite(&s.id))
        .take(HOME_FAVORITES_PREVIEW)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Map and facility
// ─────────────────────────────────────────────────────────────────────────────

/// Station in context: the selection, or the first nearby station
pub fn map_station(state: &AppState) -> Option<&'static Station> {
    state
        .nav
        .selection
        .station()
        .and_then(|id| state.catalog.station(id))
        .or_else(|| state.catalog.default_station())
}

/// Amenities pinned on the map under the active category filter
pub fn map_amenities(state: &AppState) -> Vec<&'static Amenity> {
    match state.map.category {
        Some(category) => state.catalog.amenities_in(category).collect(),
        None => state.catalog.amenities().iter().collect(),
    }
}

/// Amenity behind the detail screen
pub fn facility(state: &AppState) -> Option<&'static Amenity> {
    match state.nav.selection.facility() {
        Some(id) => state.catalog.amenity_or_fallback(id),
        None => state
            .catalog
            .amenities()
            .get(1)
            .or_else(|| state.catalog.amenities().first()),
    }
}

/// Localized facility detail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityView<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub category: &'a str,
    pub status: &'a str,
    pub distance: &'a str,
    pub stars: u8,
    pub reviews: u32,
    pub is_favorite: bool,
}

pub fn facility_view(state: &AppState) -> Option<FacilityView<'_>> {
    let amenity = facility(state)?;
    let resolver = state.resolver();
    Some(FacilityView {
        id: amenity.id.as_str(),
        name: resolver.resolve(amenity),
        category: resolver.text(amenity.category.translation_key()),
        status: resolver.text(amenity.status.translation_key()),
        distance: &amenity.distance,
        stars: amenity.star_count(),
        reviews: amenity.reviews,
        is_favorite: state.favorites.is_amenity_favorite(&amenity.id),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Route
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStep<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteView<'a> {
    pub title: String,
    pub destination: &'a str,
    /// Place query for the map provider, built from literal names
    pub query: String,
    pub steps: Vec<RouteStep<'a>>,
    /// Turn-by-turn from the user's position; otherwise destination only
    pub directions: bool,
    pub origin: Option<Coordinates>,
    pub map_url: String,
}

const ROUTE_STEPS: [(&str, &str); 3] = [
    ("navStep1", "navStep1Desc"),
    ("navStep2", "navStep2Desc"),
    ("navStep3", "navStep3Desc"),
];

/// Route to the selected facility, or to the station when none is selected
pub fn route_view(state: &AppState) -> Option<RouteView<'_>> {
    let station = map_station(state)?;
    let target = state
        .nav
        .selection
        .facility()
        .and_then(|id| state.catalog.amenity(id));
    let resolver = state.resolver();

    let destination = match target {
        Some(amenity) => resolver.resolve(amenity),
        None => resolver.resolve(station),
    };
    let query = match target {
        Some(amenity) => format!("{}, {} Railway Station, India", amenity.name, station.name),
        None => format!("{} Railway Station, India", station.name),
    };

    let directions = state.route.directions_mode();
    let encoded = utf8_percent_encode(&query, COMPONENT);
    let map_url = match state.route.origin.filter(|_| directions) {
        Some(origin) => format!(
            "https://maps.google.com/maps?saddr={origin}&daddr={encoded}&output=embed&t=m&z=17"
        ),
        None => format!("https://maps.google.com/maps?q={encoded}&output=embed&t=m&z=17"),
    };

    Some(RouteView {
        title: format!("{} {}", resolver.text("navigate"), destination),
        destination,
        query,
        steps: ROUTE_STEPS
            .iter()
            .map(|&(title, description)| RouteStep {
                title: resolver.text(title),
                description: resolver.text(description),
            })
            .collect(),
        directions,
        origin: state.route.origin,
        map_url,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Saved
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct SavedView {
    pub stations: Vec<Station>,
    pub amenities: Vec<&'static Amenity>,
}

/// Favorites screen under the active filter, both lists in catalog order
pub fn saved_view(state: &AppState) -> SavedView {
    let stations = if state.saved_filter.shows_stations() {
        state
            .catalog
            .saved_candidates()
            .into_iter()
            .filter(|s| state.favorites.is_station_favorite(&s.id))
            .collect()
    } else {
        Vec::new()
    };
    let amenities = if state.saved_filter.shows_amenities() {
        state
            .catalog
            .amenities()
            .iter()
            .filter(|a| state.favorites.is_amenity_favorite(&a.id))
            .collect()
    } else {
        Vec::new()
    };
    SavedView {
        stations,
        amenities,
    }
}

impl SavedView {
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty() && self.amenities.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inbox and chat
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InboxItem<'a> {
    pub title: &'a str,
    pub message: &'a str,
    pub time: &'static str,
}

const INBOX: [(&str, &str, &str); 3] = [
    ("notifTrainDelayed", "notifTrainDelayedMsg", "2 min ago"),
    ("notifPlatformChange", "notifPlatformChangeMsg", "10 min ago"),
    ("notifWelcome", "notifWelcomeMsg", "1 hour ago"),
];

/// The static notifications inbox
pub fn inbox(state: &AppState) -> Vec<InboxItem<'_>> {
    let resolver = state.resolver();
    INBOX
        .iter()
        .map(|&(title, message, time)| InboxItem {
            title: resolver.text(title),
            message: resolver.text(message),
            time,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatLine<'a> {
    pub sender: ChatSender,
    pub text: &'a str,
    /// Local wall-clock time, `HH:MM`
    pub time: String,
}

pub fn chat_transcript(state: &AppState) -> Vec<ChatLine<'_>> {
    let resolver = state.resolver();
    state
        .chat
        .transcript
        .iter()
        .map(|entry| ChatLine {
            sender: entry.sender,
            text: entry.text(&resolver),
            time: entry.sent_at.format("%H:%M").to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::navigation::NavState;
    use crate::screen::Screen;
    use crate::settings_store::SettingsPatch;
    use crate::state::SavedFilter;
    use steasy_core::{AmenityCategory, Language, Translations};

    fn state() -> AppState {
        let mut state = AppState::new(Arc::new(Translations::builtin().unwrap()));
        state.nav = NavState {
            screen: Screen::Home,
            splash_visible: false,
            ..NavState::default()
        };
        state
    }

    fn ids(stations: &[&Station]) -> Vec<String> {
        stations.iter().map(|s| s.id.as_str().to_string()).collect()
    }

    #[test]
    fn test_search_follows_query() {
        let mut state = state();
        assert!(search_results(&state).is_empty());
        state.home_query = "nnai".to_string();
        assert_eq!(ids(&search_results(&state)), vec!["2", "20"]);
    }

    #[test]
    fn test_directory_lists_everything_when_empty() {
        let state = state();
        assert_eq!(
            directory_results(&state).len(),
            state.catalog.station_universe().len()
        );
    }

    #[test]
    fn test_map_station_defaults_to_first_nearby() {
        let mut state = state();
        assert_eq!(map_station(&state).map(|s| s.id.as_str()), Some("1"));
        state.nav.selection = state.nav.selection.with_station("12".into());
        assert_eq!(map_station(&state).map(|s| s.id.as_str()), Some("12"));
    }

    #[test]
    fn test_map_amenities_filtered_by_category() {
        let mut state = state();
        assert_eq!(map_amenities(&state).len(), 3);
        state.map.category = Some(AmenityCategory::Shop);
        let shops = map_amenities(&state);
        assert_eq!(shops.len(), 1);
        assert_eq!(shops[0].id.as_str(), "2");
    }

    #[test]
    fn test_facility_fallback_for_unknown_id() {
        let mut state = state();
        state.nav.selection = state.nav.selection.with_facility("999".into());
        assert_eq!(facility(&state).map(|a| a.id.as_str()), Some("2"));
        state.nav.selection = state.nav.selection.with_facility("3".into());
        assert_eq!(facility(&state).map(|a| a.id.as_str()), Some("3"));
    }

    #[test]
    fn test_facility_view_is_localized() {
        let mut state = state();
        state.nav.selection = state.nav.selection.with_facility("1".into());
        let view = facility_view(&state).unwrap();
        assert_eq!(view.name, "Platform 2 Cafe");
        assert!(view.is_favorite);

        state
            .settings
            .update(&SettingsPatch::language(Language::Hindi));
        let view = facility_view(&state).unwrap();
        assert_ne!(view.name, "Platform 2 Cafe");
    }

    #[test]
    fn test_route_to_station_without_facility() {
        let mut state = state();
        state.nav.selection = state.nav.selection.with_station("11".into());
        let route = route_view(&state).unwrap();
        assert_eq!(route.query, "Tambaram Railway Station, India");
        assert_eq!(route.destination, "Tambaram");
        assert_eq!(route.title, "Navigate to Tambaram");
        assert_eq!(route.steps.len(), 3);
        assert!(!route.directions);
        assert!(route.map_url.contains("q=Tambaram%20Railway%20Station%2C%20India"));
    }

    #[test]
    fn test_route_to_facility_and_directions_mode() {
        let mut state = state();
        state.nav.selection = state
            .nav
            .selection
            .with_station("1".into())
            .with_facility("1".into());
        state.route.guidance = true;
        assert!(!route_view(&state).unwrap().directions);

        state.route.origin = Some(steasy_device::DEFAULT_POSITION);
        let route = route_view(&state).unwrap();
        assert_eq!(
            route.query,
            "Platform 2 Cafe, Ernakulam Junction South Railway Station, India"
        );
        assert!(route.directions);
        assert!(route.map_url.contains("saddr=9.9816,76.2999"));
    }

    #[test]
    fn test_saved_view_filters() {
        let mut state = state();
        let view = saved_view(&state);
        let station_ids: Vec<_> = view.stations.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(station_ids, vec!["10", "11", "12"]);
        assert_eq!(view.amenities.len(), 1);

        state.saved_filter = SavedFilter::Amenities;
        let view = saved_view(&state);
        assert!(view.stations.is_empty());
        assert_eq!(view.amenities.len(), 1);

        state.favorites.toggle_amenity(&"1".into());
        assert!(saved_view(&state).is_empty());
    }

    #[test]
    fn test_inbox_has_three_items() {
        let state = state();
        let items = inbox(&state);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Train Delayed");
        assert_eq!(items[2].time, "1 hour ago");
    }

    #[test]
    fn test_chat_transcript_opens_with_greeting() {
        let state = state();
        let lines = chat_transcript(&state);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].sender, ChatSender::Bot);
        assert!(lines[0].text.starts_with("Hello!"));
    }
}
