//! Static station and amenity catalogs
//!
//! Stations are published in named groups that overlap by identifier.
//! Whenever the full station universe is needed the groups are combined with
//! [`merge_stations`], never by plain concatenation.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

use crate::types::{
    Amenity, AmenityCategory, AmenityId, OpenStatus, PlanPoint, Station, StationId, User,
    UNKNOWN_DISTANCE,
};

/// Named station groups, in the order they are merged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StationGroup {
    Nearby,
    Favorite,
    Recent,
    AllIndia,
}

impl StationGroup {
    pub const ALL: [StationGroup; 4] = [
        StationGroup::Nearby,
        StationGroup::Favorite,
        StationGroup::Recent,
        StationGroup::AllIndia,
    ];
}

/// Combine station lists keyed by identifier.
///
/// The first occurrence of an id fixes its position; a later occurrence
/// replaces the stored value in place.
pub fn merge_stations<'a, I>(groups: I) -> Vec<Station>
where
    I: IntoIterator<Item = &'a [Station]>,
{
    let mut index: HashMap<StationId, usize> = HashMap::new();
    let mut merged: Vec<Station> = Vec::new();

    for station in groups.into_iter().flatten() {
        match index.get(&station.id) {
            Some(&pos) => merged[pos] = station.clone(),
            None => {
                index.insert(station.id.clone(), merged.len());
                merged.push(station.clone());
            }
        }
    }

    merged
}

/// Read-only catalog provided at startup
#[derive(Debug, Clone)]
pub struct Catalog {
    groups: Vec<(StationGroup, Vec<Station>)>,
    amenities: Vec<Amenity>,
    universe: Vec<Station>,
}

impl Catalog {
    pub fn new(groups: Vec<(StationGroup, Vec<Station>)>, amenities: Vec<Amenity>) -> Self {
        let universe = merge_stations(groups.iter().map(|(_, s)| s.as_slice()));
        Self {
            groups,
            amenities,
            universe,
        }
    }

    /// Stations of one named group (empty if the group is absent)
    pub fn group(&self, group: StationGroup) -> &[Station] {
        self.groups
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, s)| s.as_slice())
            .unwrap_or(&[])
    }

    /// Every station across all groups, deduplicated by identifier
    pub fn station_universe(&self) -> &[Station] {
        &self.universe
    }

    /// Stations that can appear in the saved view
    pub fn saved_candidates(&self) -> Vec<Station> {
        merge_stations([
            self.group(StationGroup::Nearby),
            self.group(StationGroup::Favorite),
            self.group(StationGroup::Recent),
        ])
    }

    pub fn station(&self, id: &StationId) -> Option<&Station> {
        self.universe.iter().find(|s| &s.id == id)
    }

    /// Station shown when nothing has been selected yet
    pub fn default_station(&self) -> Option<&Station> {
        self.group(StationGroup::Nearby)
            .first()
            .or_else(|| self.universe.first())
    }

    pub fn amenities(&self) -> &[Amenity] {
        &self.amenities
    }

    pub fn amenity(&self, id: &AmenityId) -> Option<&Amenity> {
        self.amenities.iter().find(|a| &a.id == id)
    }

    /// Amenity for the detail screen: unknown ids fall back to the second
    /// entry (then the first) rather than rendering nothing
    pub fn amenity_or_fallback(&self, id: &AmenityId) -> Option<&Amenity> {
        self.amenity(id)
            .or_else(|| self.amenities.get(1))
            .or_else(|| self.amenities.first())
    }

    pub fn amenities_in(&self, category: AmenityCategory) -> impl Iterator<Item = &Amenity> {
        self.amenities.iter().filter(move |a| a.category == category)
    }

    /// Initial favorite stations: the whole favorite group
    pub fn seed_favorite_stations(&self) -> Vec<StationId> {
        self.group(StationGroup::Favorite)
            .iter()
            .map(|s| s.id.clone())
            .collect()
    }

    /// Initial favorite amenities
    pub fn seed_favorite_amenities(&self) -> Vec<AmenityId> {
        vec![AmenityId::from("1")]
    }
}

/// The signed-in traveler
pub const CURRENT_USER: User = User {
    name: "Rohan Singh",
    id: "123456",
    mobile: "+91 98765 43210",
    email: "rohan.singh@example.com",
};

static BUILTIN: LazyLock<Catalog> = LazyLock::new(build_builtin);

/// The catalog shipped with the app
pub fn builtin() -> &'static Catalog {
    &BUILTIN
}

fn local(id: &str, name: &str, code: &str, distance: &str, favorite: bool) -> Station {
    Station {
        id: StationId::from(id),
        name: name.to_string(),
        translation_key: Some(format!("station_{code}")),
        distance: distance.to_string(),
        line: Some(code.to_string()),
        is_favorite: favorite,
    }
}

fn national(id: &str, name: &str, code: &str) -> Station {
    Station {
        id: StationId::from(id),
        name: name.to_string(),
        translation_key: None,
        distance: UNKNOWN_DISTANCE.to_string(),
        line: Some(code.to_string()),
        is_favorite: false,
    }
}

fn build_builtin() -> Catalog {
    let nearby = vec![
        local("1", "Ernakulam Junction South", "ERS", "1.2 km", false),
        local("2", "Chennai Central", "MAS", "2.5 km", false),
        local("3", "Thiruvananthapuram Central", "TVC", "3.1 km", false),
        local("4", "Coimbatore Junction", "CBE", "4.0 km", false),
        local("5", "Shoranur Junction", "SRR", "4.5 km", false),
    ];

    let favorite = vec![
        local("10", "Kollam Junction", "KJ", "0.8 km", true),
        local("11", "Tambaram", "TBM", "12 km", true),
        local("12", "Palakkad Junction", "PAC", "15 km", true),
    ];

    let recent = vec![
        local("20", "Chennai Egmore", "MS", "3 km", false),
        local("21", "Chengalpattu", "CGL", "35 km", false),
    ];

    let all_india: Vec<Station> = [
        // North
        ("101", "New Delhi", "NDLS"),
        ("102", "Delhi Junction", "DLI"),
        ("103", "Hazrat Nizamuddin", "NZM"),
        ("104", "Amritsar Junction", "ASR"),
        ("105", "Ludhiana Junction", "LDH"),
        ("106", "Lucknow Charbagh NR", "LKO"),
        ("107", "Varanasi Junction", "BSB"),
        ("108", "Kanpur Central", "CNB"),
        ("109", "Prayagraj Junction", "PRYJ"),
        ("110", "Jaipur Junction", "JP"),
        ("111", "Chandigarh Junction", "CDG"),
        ("112", "Jammu Tawi", "JAT"),
        // West
        ("201", "Mumbai Central", "MMCT"),
        ("202", "Chhatrapati Shivaji Maharaj Terminus", "CSMT"),
        ("203", "Bandra Terminus", "BDTS"),
        ("204", "Pune Junction", "PUNE"),
        ("205", "Ahmedabad Junction", "ADI"),
        ("206", "Surat", "ST"),
        ("207", "Vadodara Junction", "BRC"),
        ("208", "Rajkot Junction", "RJT"),
        ("209", "Goa Madgaon", "MAO"),
        // East
        ("301", "Howrah Junction", "HWH"),
        ("302", "Sealdah", "SDAH"),
        ("303", "Kolkata Chitpur", "KOAA"),
        ("304", "Patna Junction", "PNBE"),
        ("305", "Bhubaneswar", "BBS"),
        ("306", "Puri", "PURI"),
        ("307", "Guwahati", "GHY"),
        ("308", "Ranchi Junction", "RNC"),
        ("309", "Kharagpur Junction", "KGP"),
        // South
        ("401", "KSR Bengaluru City Junction", "SBC"),
        ("402", "Yesvantpur Junction", "YPR"),
        ("403", "Mysuru Junction", "MYS"),
        ("404", "Secunderabad Junction", "SC"),
        ("405", "Hyderabad Deccan Nampally", "HYB"),
        ("406", "Visakhapatnam Junction", "VSKP"),
        ("407", "Vijayawada Junction", "BZA"),
        ("408", "Tirupati", "TPTY"),
        ("409", "Mangaluru Central", "MAQ"),
        ("410", "Kozhikode Main", "CLT"),
        ("411", "Thrissur", "TCR"),
        ("412", "Alappuzha", "ALLP"),
        ("413", "Kannur", "CAN"),
        ("414", "Madurai Junction", "MDU"),
        ("415", "Tiruchchirappalli Junction", "TPJ"),
        // Central
        ("501", "Nagpur Junction", "NGP"),
        ("502", "Bhopal Junction", "BPL"),
        ("503", "Gwalior Junction", "GWL"),
        ("504", "Jabalpur Junction", "JBP"),
        ("505", "Raipur Junction", "R"),
    ]
    .into_iter()
    .map(|(id, name, code)| national(id, name, code))
    .collect();

    let amenities = vec![
        Amenity {
            id: AmenityId::from("1"),
            name: "Platform 2 Cafe".to_string(),
            translation_key: Some("amenity_cafe".to_string()),
            category: AmenityCategory::Food,
            distance: "50m".to_string(),
            status: OpenStatus::Open,
            rating: 4.5,
            reviews: 128,
            description: Some(
                "Great coffee and quick snacks right on the platform. Famous for fresh samosas and filter coffee."
                    .to_string(),
            ),
            position: PlanPoint { x: 150.0, y: 200.0 },
        },
        Amenity {
            id: AmenityId::from("2"),
            name: "Station Hub Convenience Store".to_string(),
            translation_key: Some("amenity_shop".to_string()),
            category: AmenityCategory::Shop,
            distance: "150m".to_string(),
            status: OpenStatus::Open,
            rating: 4.8,
            reviews: 1200,
            description: Some(
                "One-stop shop for travel essentials, newspapers, bottled water, and packaged snacks. Located near the main exit."
                    .to_string(),
            ),
            position: PlanPoint { x: 300.0, y: 250.0 },
        },
        Amenity {
            id: AmenityId::from("3"),
            name: "Waiting Room A".to_string(),
            translation_key: Some("amenity_waiting".to_string()),
            category: AmenityCategory::Waiting,
            distance: "100m".to_string(),
            status: OpenStatus::Open,
            rating: 3.9,
            reviews: 45,
            description: Some(
                "Comfortable air-conditioned seating area with charging ports, clean restrooms, and departure information screens."
                    .to_string(),
            ),
            position: PlanPoint { x: 100.0, y: 100.0 },
        },
    ];

    Catalog::new(
        vec![
            (StationGroup::Nearby, nearby),
            (StationGroup::Favorite, favorite),
            (StationGroup::Recent, recent),
            (StationGroup::AllIndia, all_india),
        ],
        amenities,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str, name: &str) -> Station {
        Station {
            id: StationId::from(id),
            name: name.to_string(),
            translation_key: None,
            distance: "1 km".to_string(),
            line: None,
            is_favorite: false,
        }
    }

    #[test]
    fn test_merge_keeps_first_position_and_last_value() {
        let a = vec![station("1", "One"), station("5", "Five (old)")];
        let b = vec![station("5", "Five (new)"), station("7", "Seven")];

        let merged = merge_stations([a.as_slice(), b.as_slice()]);

        let ids: Vec<_> = merged.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "5", "7"]);
        assert_eq!(merged[1].name, "Five (new)");
    }

    #[test]
    fn test_builtin_universe_is_deduplicated() {
        let catalog = builtin();
        let total: usize = StationGroup::ALL
            .iter()
            .map(|g| catalog.group(*g).len())
            .sum();
        assert_eq!(catalog.station_universe().len(), total);

        let mut ids: Vec<_> = catalog.station_universe().iter().map(|s| &s.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.station_universe().len());
    }

    #[test]
    fn test_group_lookup() {
        let catalog = builtin();
        assert_eq!(catalog.group(StationGroup::Nearby).len(), 5);
        assert_eq!(catalog.group(StationGroup::Favorite).len(), 3);
        assert_eq!(catalog.group(StationGroup::Recent).len(), 2);
        assert_eq!(catalog.group(StationGroup::AllIndia).len(), 50);
    }

    #[test]
    fn test_missing_group_is_empty() {
        let catalog = Catalog::new(vec![(StationGroup::Nearby, vec![station("1", "One")])], vec![]);
        assert!(catalog.group(StationGroup::AllIndia).is_empty());
        assert_eq!(catalog.station_universe().len(), 1);
    }

    #[test]
    fn test_seed_favorites() {
        let catalog = builtin();
        let seeded: Vec<_> = catalog
            .seed_favorite_stations()
            .into_iter()
            .map(|id| id.0)
            .collect();
        assert_eq!(seeded, vec!["10", "11", "12"]);
        assert_eq!(catalog.seed_favorite_amenities(), vec![AmenityId::from("1")]);
    }

    #[test]
    fn test_amenity_fallback_for_unknown_id() {
        let catalog = builtin();
        let fallback = catalog.amenity_or_fallback(&AmenityId::from("999")).unwrap();
        assert_eq!(fallback.id.as_str(), "2");

        let exact = catalog.amenity_or_fallback(&AmenityId::from("3")).unwrap();
        assert_eq!(exact.id.as_str(), "3");
    }

    #[test]
    fn test_default_station_is_first_nearby() {
        let catalog = builtin();
        assert_eq!(catalog.default_station().unwrap().id.as_str(), "1");
    }

    #[test]
    fn test_national_stations_have_unknown_distance() {
        let catalog = builtin();
        assert!(catalog
            .group(StationGroup::AllIndia)
            .iter()
            .all(|s| !s.has_known_distance() && s.translation_key.is_none()));
    }
}
