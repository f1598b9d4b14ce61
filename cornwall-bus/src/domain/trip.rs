//! Trip types.
//!
//! A `RawTrip` is consumed once by the splitter and produces one or two
//! `CanonicalTrip`s. Raw trips are never retained after splitting.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Direction, RouteId, StopId, TripStop};

/// A trip as it appears in the upstream feed, with its stop visits attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTrip {
    pub trip_id: String,
    /// Upstream route ID this trip belongs to
    pub route_id: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub trip_headsign: Option<String>,
    /// Upstream binary direction flag (0 or 1)
    #[serde(default)]
    pub direction_id: Option<u8>,
    /// Stop visits in whatever order the feed listed them
    #[serde(default)]
    pub stops: Vec<TripStop>,
}

impl RawTrip {
    /// Stop visits sorted by the feed's declared sequence number.
    ///
    /// The sort is stable, so visits sharing a sequence number keep their
    /// listed order.
    pub fn stops_in_feed_order(&self) -> Vec<TripStop> {
        let mut stops = self.stops.clone();
        stops.sort_by_key(|s| s.sequence);
        stops
    }

    /// The trip headsign, if present and not blank.
    pub fn headsign(&self) -> Option<&str> {
        self.trip_headsign
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }
}

/// Direction of a canonical trip.
///
/// Split routes use one of their two compass directions. Every other route
/// keeps the feed's own binary flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TripDirection {
    Compass(Direction),
    Feed(u8),
}

impl fmt::Display for TripDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripDirection::Compass(d) => write!(f, "{d}"),
            TripDirection::Feed(flag) => write!(f, "direction {flag}"),
        }
    }
}

/// A normalized trip handed back to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalTrip {
    /// Upstream trip this was derived from
    pub source_trip_id: String,
    pub route_id: RouteId,
    pub direction: TripDirection,
    pub headsign: String,
    /// Stop visits in canonical order
    pub stops: Vec<TripStop>,
    /// True when produced by splitting along a static direction spec.
    /// Split trips must never be merged downstream.
    pub split: bool,
}

impl CanonicalTrip {
    /// The stop IDs of this trip, in order.
    pub fn stop_ids(&self) -> Vec<&StopId> {
        self.stops.iter().map(|s| &s.stop_id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
