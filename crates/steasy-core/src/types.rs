//! Domain types: stations, amenities, identifiers, and validated inputs

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Distance label meaning "unknown / not a local station"
pub const UNKNOWN_DISTANCE: &str = "—";

/// Number of digits of a verification code
pub const OTP_LENGTH: usize = 6;

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("Invalid phone regex"));

// ─────────────────────────────────────────────────────────────────────────────
// Identifiers
// ─────────────────────────────────────────────────────────────────────────────

/// Stable station identifier, the merge key across catalog groups
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub String);

/// Stable amenity identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmenityId(pub String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(StationId);
string_id!(AmenityId);

// ─────────────────────────────────────────────────────────────────────────────
// Station
// ─────────────────────────────────────────────────────────────────────────────

/// A railway station as listed in the static catalogs.
///
/// `is_favorite` is the catalog's informational flag only; live favorite
/// status belongs to the favorites store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub translation_key: Option<String>,
    pub distance: String,
    pub line: Option<String>,
    pub is_favorite: bool,
}

impl Station {
    /// Whether the distance label carries a real value
    pub fn has_known_distance(&self) -> bool {
        let d = self.distance.trim();
        !(d.is_empty() || d == UNKNOWN_DISTANCE || d == "-")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Amenity
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed amenity categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmenityCategory {
    Food,
    Restroom,
    Atm,
    Shop,
    Waiting,
    Ticket,
    Info,
}

impl AmenityCategory {
    pub const ALL: [AmenityCategory; 7] = [
        AmenityCategory::Food,
        AmenityCategory::Restroom,
        AmenityCategory::Atm,
        AmenityCategory::Shop,
        AmenityCategory::Waiting,
        AmenityCategory::Ticket,
        AmenityCategory::Info,
    ];

    /// Canonical English label
    pub fn label(&self) -> &'static str {
        match self {
            AmenityCategory::Food => "Food & Dining",
            AmenityCategory::Restroom => "Restroom",
            AmenityCategory::Atm => "ATM",
            AmenityCategory::Shop => "Retail & Shops",
            AmenityCategory::Waiting => "Waiting Room",
            AmenityCategory::Ticket => "Ticket Counter",
            AmenityCategory::Info => "Information",
        }
    }

    /// Translation key for the localized category label
    pub fn translation_key(&self) -> &'static str {
        match self {
            AmenityCategory::Food => "catFoodStalls",
            AmenityCategory::Restroom => "catRestroom",
            AmenityCategory::Atm => "catATM",
            AmenityCategory::Shop => "catShop",
            AmenityCategory::Waiting => "catWaiting",
            AmenityCategory::Ticket => "catTicket",
            AmenityCategory::Info => "catInfo",
        }
    }

    /// Parse a category from a loose user-facing name
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "food" | "food & dining" | "dining" => Some(AmenityCategory::Food),
            "restroom" | "toilet" => Some(AmenityCategory::Restroom),
            "atm" => Some(AmenityCategory::Atm),
            "shop" | "retail" | "retail & shops" => Some(AmenityCategory::Shop),
            "waiting" | "waiting room" => Some(AmenityCategory::Waiting),
            "ticket" | "ticket counter" => Some(AmenityCategory::Ticket),
            "info" | "information" => Some(AmenityCategory::Info),
            _ => None,
        }
    }
}

impl fmt::Display for AmenityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Opening status of an amenity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenStatus {
    Open,
    Closed,
}

impl OpenStatus {
    pub fn translation_key(&self) -> &'static str {
        match self {
            OpenStatus::Open => "openNow",
            OpenStatus::Closed => "closed",
        }
    }
}

/// Position on the station floor plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanPoint {
    pub x: f32,
    pub y: f32,
}

/// A facility inside a station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: AmenityId,
    pub name: String,
    pub translation_key: Option<String>,
    pub category: AmenityCategory,
    pub distance: String,
    pub status: OpenStatus,
    /// 0.0 to 5.0
    pub rating: f32,
    pub reviews: u32,
    pub description: Option<String>,
    pub position: PlanPoint,
}

impl Amenity {
    /// Rating rounded to whole stars, clamped to 0..=5
    pub fn star_count(&self) -> u8 {
        self.rating.clamp(0.0, 5.0).round() as u8
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Device-facing values
// ─────────────────────────────────────────────────────────────────────────────

/// Geographic position reported by the geolocation collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// A mobile number that passed validation: exactly 10 ASCII digits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(input: &str) -> Result<Self> {
        if PHONE_PATTERN.is_match(input) {
            Ok(Self(input.to_string()))
        } else {
            Err(Error::invalid_phone(input))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last four digits, for log lines
    pub fn masked(&self) -> String {
        format!("******{}", &self.0[6..])
    }
}

/// The signed-in traveler shown on the profile screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub name: &'static str,
    pub id: &'static str,
    pub mobile: &'static str,
    pub email: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_accepts_exactly_ten_digits() {
        assert!(PhoneNumber::parse("9876543210").is_ok());
    }

    #[test]
    fn test_phone_rejects_other_shapes() {
        for input in ["", "987654321", "98765432101", "98765 4321", "98765432a0", "+919876543"] {
            let err = PhoneNumber::parse(input).unwrap_err();
            assert!(matches!(err, Error::InvalidPhone { .. }), "input {input:?}");
        }
    }

    #[test]
    fn test_phone_masking() {
        let phone = PhoneNumber::parse("9876543210").unwrap();
        assert_eq!(phone.masked(), "******3210");
    }

    #[test]
    fn test_unknown_distance_sentinels() {
        let mut station = Station {
            id: "1".into(),
            name: "Test".to_string(),
            translation_key: None,
            distance: "1.2 km".to_string(),
            line: None,
            is_favorite: false,
        };
        assert!(station.has_known_distance());

        station.distance = UNKNOWN_DISTANCE.to_string();
        assert!(!station.has_known_distance());

        station.distance = "-".to_string();
        assert!(!station.has_known_distance());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(AmenityCategory::parse("Food"), Some(AmenityCategory::Food));
        assert_eq!(AmenityCategory::parse(" atm "), Some(AmenityCategory::Atm));
        assert_eq!(
            AmenityCategory::parse("waiting room"),
            Some(AmenityCategory::Waiting)
        );
        assert_eq!(AmenityCategory::parse("charging"), None);
    }

    #[test]
    fn test_star_count_rounds_and_clamps() {
        let mut amenity = crate::catalog::builtin().amenities()[0].clone();
        amenity.rating = 4.5;
        assert_eq!(amenity.star_count(), 5);
        amenity.rating = 3.9;
        assert_eq!(amenity.star_count(), 4);
        amenity.rating = 7.0;
        assert_eq!(amenity.star_count(), 5);
    }
}
