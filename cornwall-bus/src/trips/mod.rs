//! Trip direction table, stop ordering and trip splitting.
//!
//! Some Cornwall routes publish each bus run as one trip that goes out and
//! comes back. The direction table lists, for those routes, the two
//! directions and the stops each one visits. Trips on those routes are split
//! into one trip per direction, headsigned with the compass direction.

mod compare;
mod error;
mod merge;
mod spec;
mod split;
mod table;

pub use compare::compare_stop_order;
pub use error::{MergeError, SplitError};
pub use merge::merge_headsign;
pub use spec::{DirectionSpec, InvalidTripSpec, RouteTripSpec, RouteTripSpecBuilder, SequenceStop};
pub use split::{TripSplitter, split_along, split_trip};
pub use table::{RouteTripSpecs, route_trip_specs};
