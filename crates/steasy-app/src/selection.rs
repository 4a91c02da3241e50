//! Contextual selection: the station in focus and, optionally, one facility

use serde::Serialize;
use steasy_core::{AmenityId, StationId};

/// Immutable (station, facility) pair.
///
/// Choosing a station always drops the facility, so a facility never
/// outlives the station context it was picked in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    station: Option<StationId>,
    facility: Option<AmenityId>,
}

impl Selection {
    pub fn station(&self) -> Option<&StationId> {
        self.station.as_ref()
    }

    pub fn facility(&self) -> Option<&AmenityId> {
        self.facility.as_ref()
    }

    #[must_use]
    pub fn with_station(&self, station: StationId) -> Self {
        Self {
            station: Some(station),
            facility: None,
        }
    }

    #[must_use]
    pub fn with_facility(&self, facility: AmenityId) -> Self {
        Self {
            station: self.station.clone(),
            facility: Some(facility),
        }
    }
}
