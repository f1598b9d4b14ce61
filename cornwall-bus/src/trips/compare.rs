//! Stop-order comparator for the pipeline's own sorting.

use std::cmp::Ordering;

use crate::domain::{Direction, RouteId, TripStop};

use super::table::route_trip_specs;

/// Order two visits of a trip on `route_id` travelling `direction`.
///
/// Uses the agency's table. Routes without a direction spec are ordered by
/// feed sequence alone; see [`super::RouteTripSpec::compare`] for the rule
/// used otherwise.
pub fn compare_stop_order(
    route_id: RouteId,
    direction: Direction,
    a: &TripStop,
    b: &TripStop,
) -> Ordering {
    route_trip_specs().compare(route_id, direction, a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StopId;

    fn visit(id: &str, sequence: u32) -> TripStop {
        TripStop::new(StopId::parse(id).unwrap(), sequence)
    }

    #[test]
    fn unlisted_route_uses_feed_sequence() {
        let a = visit("7", 3);
        let b = visit("8", 1);
        assert_eq!(
            compare_stop_order(RouteId(17), Direction::North, &a, &b),
            Ordering::Greater
        );
    }

    #[test]
    fn listed_route_uses_sequence_rank() {
        // 3 Montreal, westbound: 501 then 507 then 125
        let a = visit("507", 1);
        let b = visit("501", 2);
        assert_eq!(
            compare_stop_order(RouteId(3_002), Direction::West, &a, &b),
            Ordering::Greater
        );
    }

    #[test]
    fn turnaround_stops_use_feed_sequence() {
        let a = visit("501", 9);
        let b = visit("125", 1);
        assert_eq!(
            compare_stop_order(RouteId(3_002), Direction::West, &a, &b),
            Ordering::Greater
        );
    }

    #[test]
    fn sorts_a_scrambled_trip() {
        let mut stops = vec![visit("125", 3), visit("501", 1), visit("507", 2)];
        stops.sort_by(|a, b| compare_stop_order(RouteId(3_002), Direction::West, a, b));
        let ids: Vec<_> = stops.iter().map(|s| s.stop_id.as_str()).collect();
        assert_eq!(ids, vec!["501", "507", "125"]);
    }
}
