//! Domain types for the Cornwall Transit adapter.
//!
//! Raw types (`RawRoute`, `RawTrip`, `RawStop`) mirror what the import
//! pipeline reads from the feed. `RouteColor` and `StopId` are checked when
//! parsed and never re-validated after that.

mod color;
mod direction;
mod route;
mod stop;
mod trip;

pub use color::{InvalidRouteColor, RouteColor};
pub use direction::Direction;
pub use route::{RawRoute, RouteId, RouteIdentity};
pub use stop::{InvalidStopId, RawStop, StopId, TripStop};
pub use trip::{CanonicalTrip, RawTrip, TripDirection};
