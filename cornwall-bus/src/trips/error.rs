//! Trip splitting and merging errors.

use crate::domain::{RouteId, StopId, TripDirection};

/// A raw trip that cannot be split along its route's directions.
///
/// Either variant means the direction table no longer matches the feed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplitError {
    /// The stop is in neither direction's sequence
    #[error("trip {trip_id} on route {route_id} visits stop {stop_id}, which is in neither direction")]
    UnknownStop {
        route_id: RouteId,
        trip_id: String,
        stop_id: StopId,
    },

    /// The stop is known but cannot be placed in order in either direction
    #[error("trip {trip_id} on route {route_id} visits stop {stop_id} (sequence {sequence}) out of order")]
    OutOfSequence {
        route_id: RouteId,
        trip_id: String,
        stop_id: StopId,
        sequence: u32,
    },
}

/// The pipeline tried to merge two trips that must stay apart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    #[error(
        "unexpected merge on route {route_id}: {first_headsign:?} ({first_direction}) with {second_headsign:?} ({second_direction}){}",
        split_note(.split)
    )]
    UnexpectedMerge {
        route_id: RouteId,
        first_headsign: String,
        first_direction: TripDirection,
        second_headsign: String,
        second_direction: TripDirection,
        /// Either trip came out of splitting a round trip
        split: bool,
    },
}

fn split_note(split: &bool) -> &'static str {
    if *split { ", halves of a split trip" } else { "" }
}
