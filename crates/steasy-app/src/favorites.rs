//! Favorite stations and amenities

use std::collections::HashSet;

use steasy_core::{AmenityId, Catalog, StationId};

/// Two independent membership sets with toggle semantics.
///
/// Iteration order is unspecified; sort at the presentation boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSets {
    stations: HashSet<StationId>,
    amenities: HashSet<AmenityId>,
}

impl FavoriteSets {
    pub fn new(
        stations: impl IntoIterator<Item = StationId>,
        amenities: impl IntoIterator<Item = AmenityId>,
    ) -> Self {
        Self {
            stations: stations.into_iter().collect(),
            amenities: amenities.into_iter().collect(),
        }
    }

    /// Seeded from the catalog's favorite group and seed amenities
    pub fn seeded(catalog: &Catalog) -> Self {
        Self::new(
            catalog.seed_favorite_stations(),
            catalog.seed_favorite_amenities(),
        )
    }

    /// Flip membership; returns whether `id` is now a favorite
    pub fn toggle_station(&mut self, id: &StationId) -> bool {
        toggle(&mut self.stations, id)
    }

    /// Flip membership; returns whether `id` is now a favorite
    pub fn toggle_amenity(&mut self, id: &AmenityId) -> bool {
        toggle(&mut self.amenities, id)
    }

    pub fn is_station_favorite(&self, id: &StationId) -> bool {
        self.stations.contains(id)
    }

    pub fn is_amenity_favorite(&self, id: &AmenityId) -> bool {
        self.amenities.contains(id)
    }

    pub fn stations(&self) -> impl Iterator<Item = &StationId> {
        self.stations.iter()
    }

    pub fn amenities(&self) -> impl Iterator<Item = &AmenityId> {
        self.amenities.iter()
    }
}

fn toggle<T: Clone + Eq + std::hash::Hash>(set: &mut HashSet<T>, id: &T) -> bool {
    if set.remove(id) {
        false
    } else {
        set.insert(id.clone());
        true
    }
}
