//! Headsign merge guard.

use tracing::error;

use crate::domain::CanonicalTrip;

use super::error::MergeError;

/// Headsign to keep when the pipeline merges two trips.
///
/// Only trips that already agree on headsign and direction can be merged.
/// Anything else would fold together trips this adapter deliberately kept
/// apart, so it is refused.
pub fn merge_headsign(first: &CanonicalTrip, second: &CanonicalTrip) -> Result<String, MergeError> {
    if first.route_id == second.route_id
        && first.direction == second.direction
        && first.headsign == second.headsign
    {
        return Ok(first.headsign.clone());
    }

    let split = first.split || second.split;
    error!(
        route = %first.route_id,
        first = %first.source_trip_id,
        second = %second.source_trip_id,
        split,
        "refusing to merge trips"
    );
    Err(MergeError::UnexpectedMerge {
        route_id: first.route_id,
        first_headsign: first.headsign.clone(),
        first_direction: first.direction,
        second_headsign: second.headsign.clone(),
        second_direction: second.direction,
        split,
    })
}
