//! Route resolution errors.

/// A raw route the resolver refuses to map.
///
/// Both variants are fatal for the route: guessing an ID would attach every
/// trip and stop of the line to the wrong route downstream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The route family is known but this route ID is not whitelisted in it
    #[error("unrecognized route {route_id:?} in family {short_name:?}")]
    UnrecognizedRoute {
        route_id: String,
        short_name: String,
    },

    /// Neither the short name nor the long name names a route family
    #[error("no route family in short name {short_name:?} or long name {long_name:?}")]
    UnknownFamily {
        short_name: String,
        long_name: String,
    },
}
