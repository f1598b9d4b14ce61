//! Adapter configuration.

use serde::Deserialize;

use crate::domain::RouteColor;
use crate::text::{DEFAULT_HEADSIGN_PREFIX, Normalizer};

/// GTFS `route_type` for bus service.
pub const ROUTE_TYPE_BUS: u8 = 3;

/// Settings for one adapter run.
///
/// Every field has a default, so a partial config deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Route color used when neither the feed nor the color table has one.
    pub agency_color: RouteColor,

    /// GTFS route type reported for every route.
    pub route_type: u8,

    /// Agency name stripped from the start of headsigns.
    pub headsign_prefix: String,
}

impl AdapterConfig {
    pub fn new(agency_color: RouteColor, route_type: u8, headsign_prefix: impl Into<String>) -> Self {
        Self {
            agency_color,
            route_type,
            headsign_prefix: headsign_prefix.into(),
        }
    }

    /// Label pipelines for this configuration.
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(&self.headsign_prefix)
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            agency_color: RouteColor::AGENCY_BLUE,
            route_type: ROUTE_TYPE_BUS,
            headsign_prefix: DEFAULT_HEADSIGN_PREFIX.to_string(),
        }
    }
}
