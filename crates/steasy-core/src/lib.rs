//! # steasy-core - Core Domain Types for Station Easy
//!
//! Foundation crate with zero internal dependencies. Provides the station and
//! amenity model, static catalogs, the localization resolver, search
//! derivation, the workspace error type, and logging setup.
//!
//! ## Public API
//!
//! ### Domain Types ([`types`])
//! - [`Station`], [`Amenity`], [`AmenityCategory`], [`OpenStatus`]
//! - [`StationId`], [`AmenityId`] - stable identifiers, the merge key
//! - [`PhoneNumber`] - a validated 10-digit mobile number
//! - [`Coordinates`] - a geolocation fix
//!
//! ### Catalogs ([`catalog`])
//! - [`Catalog`] - named station groups plus amenities
//! - [`merge_stations`] - identifier-keyed merge of station groups
//!
//! ### Localization ([`i18n`])
//! - [`Language`], [`Translations`], [`Resolver`], [`resolve()`]
//!
//! ### Search ([`search`])
//! - [`search_stations`] - live search, empty query gives no results
//! - [`directory`] - alphabetical listing
//!
//! ### Error Handling ([`error`])
//! - [`Error`], [`ErrorKind`], [`Result`], [`ResultExt`]
//!
//! ### Logging ([`logging`])
//! - [`logging::init`] - rolling file subscriber

pub mod catalog;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod search;
pub mod types;

/// Prelude for common imports used across the workspace
pub mod prelude {
    pub use crate::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, trace, warn};
}

pub use catalog::{builtin as builtin_catalog, merge_stations, Catalog, StationGroup, CURRENT_USER};
pub use error::{Error, ErrorKind, Result, ResultExt};
pub use i18n::{resolve, Language, LanguageTable, Localized, Resolver, Translations};
pub use search::{directory, search_stations};
pub use types::{
    Amenity, AmenityCategory, AmenityId, Coordinates, OpenStatus, PhoneNumber, PlanPoint, Station,
    StationId, User, OTP_LENGTH, UNKNOWN_DISTANCE,
};
