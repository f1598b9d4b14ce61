//! Feed snapshots for dry runs.
//!
//! A snapshot is a JSON file holding the parts of a feed the adapter looks
//! at. Running it through an adapter produces the normalized records the
//! pipeline would store, which is handy for checking a new feed against the
//! whitelist and direction table before a real import.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::adapter::{AdapterError, AgencyAdapter, CornwallAdapter};
use crate::config::AdapterConfig;
use crate::domain::{
    CanonicalTrip, RawRoute, RawStop, RawTrip, RouteColor, RouteId, RouteIdentity, StopId,
    TripDirection,
};
use crate::service::ServiceFilter;

/// Error loading or normalizing a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// A trip names a route the snapshot does not contain
    #[error("trip {trip_id} references unknown route {route_id:?}")]
    UnknownRoute { trip_id: String, route_id: String },
}

/// The feed records an adapter run needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedSnapshot {
    #[serde(default)]
    pub routes: Vec<RawRoute>,
    #[serde(default)]
    pub trips: Vec<RawTrip>,
    #[serde(default)]
    pub stops: Vec<RawStop>,
    /// Useful service IDs; absent means every service is useful
    #[serde(default)]
    pub service_ids: Option<Vec<String>>,
    #[serde(default)]
    pub config: Option<AdapterConfig>,
}

impl FeedSnapshot {
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let json = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn service_filter(&self) -> ServiceFilter {
        match &self.service_ids {
            Some(ids) => ServiceFilter::from_ids(ids.iter().cloned()),
            None => ServiceFilter::keep_all(),
        }
    }

    /// The Cornwall adapter configured by this snapshot.
    pub fn adapter(&self) -> CornwallAdapter {
        CornwallAdapter::new(self.config.clone().unwrap_or_default(), self.service_filter())
    }
}

/// Agency-wide values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgencySummary {
    pub color: RouteColor,
    pub route_type: u8,
}

/// One direction of one route, after merging every trip that runs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectionSummary {
    pub route_id: RouteId,
    pub direction: TripDirection,
    pub headsign: String,
    pub trip_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedStop {
    pub stop_id: StopId,
    pub stop_name: String,
}

/// Everything the adapter produced for a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedFeed {
    pub agency: AgencySummary,
    pub routes: Vec<RouteIdentity>,
    pub directions: Vec<DirectionSummary>,
    pub trips: Vec<CanonicalTrip>,
    pub stops: Vec<NormalizedStop>,
    /// Trips dropped by the service filter
    pub excluded_trips: usize,
}

/// Run a snapshot through an adapter.
///
/// Trips on the same route and direction are merged into one direction
/// summary, asking the adapter for the merged headsign. Trips left without
/// stops by splitting are not emitted. The first fatal error aborts the run.
pub fn normalize_feed<A: AgencyAdapter>(
    adapter: &A,
    snapshot: &FeedSnapshot,
) -> Result<NormalizedFeed, SnapshotError> {
    let mut feed = NormalizedFeed {
        agency: AgencySummary {
            color: adapter.agency_color(),
            route_type: adapter.agency_route_type(),
        },
        routes: Vec::new(),
        directions: Vec::new(),
        trips: Vec::new(),
        stops: Vec::new(),
        excluded_trips: 0,
    };

    if adapter.excluding_all() {
        info!("no useful services, skipping feed");
        feed.excluded_trips = snapshot.trips.len();
        return Ok(feed);
    }

    let mut identities: HashMap<&str, RouteIdentity> = HashMap::new();
    for raw in &snapshot.routes {
        let identity = adapter.resolve_route(raw)?;
        debug!(route = %raw.route_id, id = %identity.numeric_id, "route");
        identities.insert(raw.route_id.as_str(), identity.clone());
        feed.routes.push(identity);
    }

    let mut directions: Vec<(CanonicalTrip, usize)> = Vec::new();
    for trip in &snapshot.trips {
        if adapter.exclude_trip(trip) {
            feed.excluded_trips += 1;
            continue;
        }
        let route = identities
            .get(trip.route_id.as_str())
            .ok_or_else(|| SnapshotError::UnknownRoute {
                trip_id: trip.trip_id.clone(),
                route_id: trip.route_id.clone(),
            })?;

        for canonical in adapter.split_trip(route, trip)? {
            if canonical.is_empty() {
                continue;
            }
            match directions.iter_mut().find(|(first, _)| {
                first.route_id == canonical.route_id && first.direction == canonical.direction
            }) {
                Some((first, count)) => {
                    let headsign = adapter.merge_headsign(first, &canonical)?;
                    first.headsign = headsign;
                    *count += 1;
                }
                None => directions.push((canonical.clone(), 1)),
            }
            feed.trips.push(canonical);
        }
    }
    feed.directions = directions
        .into_iter()
        .map(|(first, trip_count)| DirectionSummary {
            route_id: first.route_id,
            direction: first.direction,
            headsign: first.headsign,
            trip_count,
        })
        .collect();

    feed.stops = snapshot
        .stops
        .iter()
        .map(|stop| NormalizedStop {
            stop_id: stop.stop_id.clone(),
            stop_name: adapter.clean_stop_name(&stop.stop_name),
        })
        .collect();

    info!(
        routes = feed.routes.len(),
        trips = feed.trips.len(),
        stops = feed.stops.len(),
        excluded = feed.excluded_trips,
        "normalized feed"
    );
    Ok(feed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "routes": [
            {"route_id": "MCCONNELL", "route_short_name": "1", "route_long_name": "1-MCCONNELL"},
            {"route_id": "17", "route_short_name": "17", "route_long_name": "17-BENSON CENTRE", "route_color": "123abc"}
        ],
        "trips": [
            {
                "trip_id": "T1", "route_id": "MCCONNELL", "service_id": "WKDY",
                "stops": [
                    {"stop_id": "125", "sequence": 1}, {"stop_id": "418", "sequence": 2},
                    {"stop_id": "440", "sequence": 3}, {"stop_id": "401", "sequence": 4},
                    {"stop_id": "402", "sequence": 5}, {"stop_id": "413", "sequence": 6},
                    {"stop_id": "122", "sequence": 7}, {"stop_id": "124", "sequence": 8},
                    {"stop_id": "125", "sequence": 9}
                ]
            },
            {
                "trip_id": "T2", "route_id": "MCCONNELL", "service_id": "WKDY",
                "stops": [
                    {"stop_id": "125", "sequence": 1}, {"stop_id": "418", "sequence": 2},
                    {"stop_id": "440", "sequence": 3}, {"stop_id": "401", "sequence": 4}
                ]
            },
            {
                "trip_id": "T3", "route_id": "17", "service_id": "SUN",
                "trip_headsign": "CORNWALL SQUARE", "direction_id": 1,
                "stops": [{"stop_id": "9", "sequence": 1}]
            }
        ],
        "stops": [
            {"stop_id": "125", "stop_name": "Pitt @ Second"},
            {"stop_id": "418", "stop_name": "123 Main St. and Apartments"}
        ],
        "service_ids": ["WKDY", "SUN"]
    }"#;

    #[test]
    fn normalizes_a_snapshot() {
        let snapshot = FeedSnapshot::from_json(SNAPSHOT).unwrap();
        let feed = normalize_feed(&snapshot.adapter(), &snapshot).unwrap();

        assert_eq!(feed.agency.color.as_str(), "0072BC");
        assert_eq!(feed.routes.len(), 2);
        assert_eq!(feed.routes[0].short_name, "1 MC");
        assert_eq!(feed.routes[1].color.as_str(), "123ABC");

        // T1 splits into two, T2 only runs East, T3 is unsplit
        assert_eq!(feed.trips.len(), 4);
        assert_eq!(feed.excluded_trips, 0);

        let east = &feed.directions[0];
        assert_eq!(east.direction, TripDirection::Compass(Direction::East));
        assert_eq!(east.headsign, "East");
        assert_eq!(east.trip_count, 2);
        assert_eq!(feed.directions.len(), 3);
        assert_eq!(feed.directions[2].headsign, "Sq");

        assert_eq!(feed.stops[0].stop_name, "Pitt / 2nd");
        assert_eq!(feed.stops[1].stop_name, "Main St & Apts");
    }

    #[test]
    fn service_filter_drops_trips() {
        let mut snapshot = FeedSnapshot::from_json(SNAPSHOT).unwrap();
        snapshot.service_ids = Some(vec!["WKDY".into()]);
        let feed = normalize_feed(&snapshot.adapter(), &snapshot).unwrap();
        assert_eq!(feed.excluded_trips, 1);
        assert_eq!(feed.trips.len(), 3);
    }

    #[test]
    fn empty_service_set_skips_everything() {
        let mut snapshot = FeedSnapshot::from_json(SNAPSHOT).unwrap();
        snapshot.service_ids = Some(vec![]);
        let feed = normalize_feed(&snapshot.adapter(), &snapshot).unwrap();
        assert!(feed.routes.is_empty());
        assert!(feed.trips.is_empty());
        assert_eq!(feed.excluded_trips, 3);
    }

    #[test]
    fn unknown_route_aborts() {
        let mut snapshot = FeedSnapshot::from_json(SNAPSHOT).unwrap();
        snapshot.routes.push(RawRoute::new("UNKNOWN", "5", "5-UNKNOWN"));
        let err = normalize_feed(&snapshot.adapter(), &snapshot).unwrap_err();
        assert!(matches!(err, SnapshotError::Adapter(AdapterError::Resolve(_))));
    }

    #[test]
    fn trip_on_missing_route_aborts() {
        let mut snapshot = FeedSnapshot::from_json(SNAPSHOT).unwrap();
        snapshot.routes.remove(1);
        let err = normalize_feed(&snapshot.adapter(), &snapshot).unwrap_err();
        assert!(matches!(err, SnapshotError::UnknownRoute { .. }));
    }

    #[test]
    fn conflicting_headsigns_abort() {
        let mut snapshot = FeedSnapshot::from_json(SNAPSHOT).unwrap();
        let mut other = snapshot.trips[2].clone();
        other.trip_id = "T4".into();
        other.trip_headsign = Some("Brookdale".into());
        snapshot.trips.push(other);
        let err = normalize_feed(&snapshot.adapter(), &snapshot).unwrap_err();
        assert!(matches!(err, SnapshotError::Adapter(AdapterError::Merge(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();
        let snapshot = FeedSnapshot::load(file.path()).unwrap();
        assert_eq!(snapshot.routes.len(), 2);
        assert_eq!(snapshot.trips.len(), 3);
        assert!(snapshot.config.is_none());
    }

    #[test]
    fn load_reads_embedded_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, r#"{"config": {"headsign_prefix": "Transit", "route_type": 700}}"#).unwrap();
        assert!(FeedSnapshot::load(&path).is_err());

        fs::write(&path, r#"{"config": {"headsign_prefix": "Transit"}}"#).unwrap();
        let snapshot = FeedSnapshot::load(&path).unwrap();
        let adapter = snapshot.adapter();
        assert_eq!(adapter.config().headsign_prefix, "Transit");
        assert_eq!(adapter.agency_route_type(), 3);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FeedSnapshot::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }

    #[test]
    fn feed_serializes() {
        let snapshot = FeedSnapshot::from_json(SNAPSHOT).unwrap();
        let feed = normalize_feed(&snapshot.adapter(), &snapshot).unwrap();
        let json = serde_json::to_value(&feed).unwrap();
        assert_eq!(json["routes"][0]["numeric_id"], 1001);
        assert_eq!(json["trips"][0]["direction"], "EAST");
        assert_eq!(json["agency"]["color"], "0072BC");
    }
}
