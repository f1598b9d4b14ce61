//! Per-route direction specifications.
//!
//! A [`RouteTripSpec`] describes a route whose feed trips run both ways in
//! one trip record. It names the route's two opposite directions and the
//! stop sequence each one visits. Stops that appear in both sequences are
//! wildcards: they belong to whichever direction is passing at the time.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::domain::{Direction, RouteId, StopId, TripStop};

/// Error returned when a direction specification is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid trip spec for route {route_id}: {reason}")]
pub struct InvalidTripSpec {
    route_id: RouteId,
    reason: &'static str,
}

/// One slot of a direction's stop sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceStop {
    pub stop_id: StopId,
    /// The stop also appears in the opposite direction
    pub wildcard: bool,
}

/// The ordered stops of one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionSpec {
    pub direction: Direction,
    pub stops: Vec<SequenceStop>,
}

impl DirectionSpec {
    /// First position of `stop` at or after `from`.
    pub fn position_from(&self, stop: &StopId, from: usize) -> Option<usize> {
        self.stops
            .iter()
            .skip(from)
            .position(|s| &s.stop_id == stop)
            .map(|offset| from + offset)
    }

    /// Position of `stop` and its wildcard flag, if it occurs exactly once
    /// in this direction.
    ///
    /// Stops visited more than once (loops) have no single rank.
    pub fn rank(&self, stop: &StopId) -> Option<(usize, bool)> {
        let mut positions = self
            .stops
            .iter()
            .enumerate()
            .filter(|(_, s)| &s.stop_id == stop)
            .map(|(i, s)| (i, s.wildcard));
        match (positions.next(), positions.next()) {
            (Some(ranked), None) => Some(ranked),
            _ => None,
        }
    }

    pub fn contains(&self, stop: &StopId) -> bool {
        self.stops.iter().any(|s| &s.stop_id == stop)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// The two-direction specification of one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTripSpec {
    route_id: RouteId,
    directions: [DirectionSpec; 2],
}

impl RouteTripSpec {
    pub fn builder(route_id: RouteId) -> RouteTripSpecBuilder {
        RouteTripSpecBuilder::new(route_id)
    }

    pub fn route_id(&self) -> RouteId {
        self.route_id
    }

    /// Both directions, in declaration order.
    pub fn directions(&self) -> &[DirectionSpec; 2] {
        &self.directions
    }

    pub fn direction(&self, direction: Direction) -> Option<&DirectionSpec> {
        self.directions.iter().find(|d| d.direction == direction)
    }

    /// True if `stop` appears in both directions.
    pub fn is_wildcard(&self, stop: &StopId) -> bool {
        self.directions[0]
            .stops
            .iter()
            .any(|s| &s.stop_id == stop && s.wildcard)
    }

    /// True if `stop` appears in either direction.
    pub fn contains(&self, stop: &StopId) -> bool {
        self.directions.iter().any(|d| d.contains(stop))
    }

    /// Order two visits of a trip travelling `direction`.
    ///
    /// Visits are ordered by their rank in the direction's sequence when
    /// both have one. Two wildcard stops never get a verdict from the
    /// sequence; like unranked stops they fall back to the feed's declared
    /// sequence number, which also breaks rank ties.
    pub fn compare(&self, direction: Direction, a: &TripStop, b: &TripStop) -> Ordering {
        let Some(spec) = self.direction(direction) else {
            return a.sequence.cmp(&b.sequence);
        };
        match (spec.rank(&a.stop_id), spec.rank(&b.stop_id)) {
            (Some((rank_a, wild_a)), Some((rank_b, wild_b))) if !(wild_a && wild_b) => rank_a
                .cmp(&rank_b)
                .then_with(|| a.sequence.cmp(&b.sequence)),
            _ => a.sequence.cmp(&b.sequence),
        }
    }
}

/// Builder for a [`RouteTripSpec`].
///
/// # Example
///
/// ```
/// use cornwall_bus::domain::{Direction, RouteId};
/// use cornwall_bus::trips::RouteTripSpec;
///
/// let spec = RouteTripSpec::builder(RouteId(2_001))
///     .direction(Direction::North, &["125", "332", "301"])
///     .direction(Direction::South, &["301", "311", "125"])
///     .build()
///     .unwrap();
/// assert_eq!(spec.directions()[0].len(), 3);
/// ```
#[derive(Debug)]
pub struct RouteTripSpecBuilder {
    route_id: RouteId,
    directions: Vec<(Direction, Vec<&'static str>)>,
}

impl RouteTripSpecBuilder {
    pub fn new(route_id: RouteId) -> Self {
        Self {
            route_id,
            directions: Vec::new(),
        }
    }

    /// Add a direction and its stop sequence.
    pub fn direction(mut self, direction: Direction, stops: &[&'static str]) -> Self {
        self.directions.push((direction, stops.to_vec()));
        self
    }

    /// Validate the directions and mark wildcard stops.
    pub fn build(self) -> Result<RouteTripSpec, InvalidTripSpec> {
        let invalid = |reason: &'static str| InvalidTripSpec {
            route_id: self.route_id,
            reason,
        };

        let [(dir_a, stops_a), (dir_b, stops_b)] = <[_; 2]>::try_from(self.directions)
            .map_err(|_| invalid("must have exactly two directions"))?;
        if dir_a.opposite() != dir_b {
            return Err(invalid("directions must be opposite"));
        }

        let parse = |stops: &[&str]| -> Result<Vec<StopId>, InvalidTripSpec> {
            if stops.is_empty() {
                return Err(invalid("direction has no stops"));
            }
            stops
                .iter()
                .map(|s| StopId::parse(s).map_err(|_| invalid("invalid stop ID")))
                .collect()
        };
        let stops_a = parse(&stops_a)?;
        let stops_b = parse(&stops_b)?;

        let in_a: HashSet<&StopId> = stops_a.iter().collect();
        let in_b: HashSet<&StopId> = stops_b.iter().collect();
        let mark = |stops: &[StopId]| -> Vec<SequenceStop> {
            stops
                .iter()
                .map(|s| SequenceStop {
                    stop_id: s.clone(),
                    wildcard: in_a.contains(s) && in_b.contains(s),
                })
                .collect()
        };

        Ok(RouteTripSpec {
            route_id: self.route_id,
            directions: [
                DirectionSpec {
                    direction: dir_a,
                    stops: mark(&stops_a),
                },
                DirectionSpec {
                    direction: dir_b,
                    stops: mark(&stops_b),
                },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str) -> StopId {
        StopId::parse(id).unwrap()
    }

    fn visit(id: &str, sequence: u32) -> TripStop {
        TripStop::new(stop(id), sequence)
    }

    fn pitt() -> RouteTripSpec {
        RouteTripSpec::builder(RouteId(1_002))
            .direction(Direction::North, &["125", "418", "624", "633", "601"])
            .direction(Direction::South, &["601", "611", "614", "118", "124", "125"])
            .build()
            .unwrap()
    }

    #[test]
    fn build_marks_wildcards() {
        let spec = pitt();
        let north = spec.direction(Direction::North).unwrap();
        let flags: Vec<bool> = north.stops.iter().map(|s| s.wildcard).collect();
        assert_eq!(flags, vec![true, false, false, false, true]);
        assert!(spec.is_wildcard(&stop("125")));
        assert!(!spec.is_wildcard(&stop("611")));
    }

    #[test]
    fn build_rejects_bad_specs() {
        let one = RouteTripSpec::builder(RouteId(1))
            .direction(Direction::East, &["1"])
            .build();
        assert!(one.is_err());

        let same_way = RouteTripSpec::builder(RouteId(1))
            .direction(Direction::East, &["1"])
            .direction(Direction::North, &["2"])
            .build();
        assert!(same_way.is_err());

        let empty = RouteTripSpec::builder(RouteId(1))
            .direction(Direction::East, &[])
            .direction(Direction::West, &["2"])
            .build();
        assert!(empty.is_err());

        let blank = RouteTripSpec::builder(RouteId(1))
            .direction(Direction::East, &[" "])
            .direction(Direction::West, &["2"])
            .build();
        assert!(blank.is_err());
    }

    #[test]
    fn position_from_skips_earlier_visits() {
        let spec = RouteTripSpec::builder(RouteId(71))
            .direction(Direction::North, &["125", "219", "241", "225", "241", "125"])
            .direction(Direction::South, &["125", "126"])
            .build()
            .unwrap();
        let north = spec.direction(Direction::North).unwrap();
        assert_eq!(north.position_from(&stop("241"), 0), Some(2));
        assert_eq!(north.position_from(&stop("241"), 3), Some(4));
        assert_eq!(north.position_from(&stop("241"), 5), None);
        assert_eq!(north.position_from(&stop("125"), 1), Some(5));
    }

    #[test]
    fn repeated_stops_have_no_rank() {
        let spec = RouteTripSpec::builder(RouteId(71))
            .direction(Direction::North, &["125", "219", "241", "225", "241", "125"])
            .direction(Direction::South, &["125", "126"])
            .build()
            .unwrap();
        let north = spec.direction(Direction::North).unwrap();
        assert_eq!(north.rank(&stop("241")), None);
        assert_eq!(north.rank(&stop("219")), Some((1, false)));
        assert_eq!(north.rank(&stop("999")), None);
    }

    #[test]
    fn rank_carries_the_wildcard_flag() {
        let spec = pitt();
        let north = spec.direction(Direction::North).unwrap();
        assert_eq!(north.rank(&stop("125")), Some((0, true)));
        assert_eq!(north.rank(&stop("624")), Some((2, false)));
        assert_eq!(north.rank(&stop("601")), Some((4, true)));
    }

    #[test]
    fn compare_uses_rank_over_feed_sequence() {
        let spec = pitt();
        let a = visit("624", 9);
        let b = visit("633", 2);
        assert_eq!(spec.compare(Direction::North, &a, &b), Ordering::Less);
        assert_eq!(spec.compare(Direction::North, &b, &a), Ordering::Greater);
    }

    #[test]
    fn compare_ranked_against_wildcard() {
        let spec = pitt();
        // 125 starts North and is ranked ahead of 418 despite its sequence
        let a = visit("125", 20);
        let b = visit("418", 3);
        assert_eq!(spec.compare(Direction::North, &a, &b), Ordering::Less);
    }

    #[test]
    fn wildcards_defer_to_feed_sequence() {
        let spec = pitt();
        let a = visit("601", 1);
        let b = visit("125", 7);
        // 125 ranks before 601 going North, but both are wildcards
        assert_eq!(spec.compare(Direction::North, &a, &b), Ordering::Less);
        assert_eq!(spec.compare(Direction::North, &b, &a), Ordering::Greater);
    }

    #[test]
    fn unknown_stops_defer_to_feed_sequence() {
        let spec = pitt();
        let a = visit("999", 4);
        let b = visit("418", 2);
        assert_eq!(spec.compare(Direction::North, &a, &b), Ordering::Greater);
    }

    #[test]
    fn other_axis_defers_to_feed_sequence() {
        let spec = pitt();
        let a = visit("633", 5);
        let b = visit("624", 6);
        assert_eq!(spec.compare(Direction::East, &a, &b), Ordering::Less);
    }
}
