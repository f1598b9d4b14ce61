//! Route types.
//!
//! A `RawRoute` is one row of the agency's `routes.txt` as the pipeline hands
//! it over. A `RouteIdentity` is what the app data generator needs instead:
//! a stable numeric ID, a short display code, a cleaned long name and a color.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::RouteColor;

/// Stable numeric route ID emitted to the app data.
///
/// # Examples
///
/// ```
/// use cornwall_bus::domain::RouteId;
///
/// let id = RouteId(1_001);
/// assert_eq!(id.to_string(), "1001");
/// assert_eq!(RouteId::from_digits("61"), Some(RouteId(61)));
/// assert_eq!(RouteId::from_digits("CS-EAST"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(pub i64);

impl RouteId {
    /// Interpret a raw route identifier made only of ASCII digits.
    ///
    /// Returns `None` for anything else, including the empty string and
    /// numbers too large for an `i64`.
    pub fn from_digits(s: &str) -> Option<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse().ok().map(RouteId)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RouteId {
    fn from(value: i64) -> Self {
        RouteId(value)
    }
}

/// A route as it appears in the upstream feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRoute {
    /// Upstream route ID, e.g. `"MCCONNELL"`, `"CS-EAST"` or `"17"`
    pub route_id: String,
    /// Upstream short name, usually the bare route number
    #[serde(default)]
    pub route_short_name: String,
    /// Upstream long name, e.g. `"1-MCCONNELL"`
    #[serde(default)]
    pub route_long_name: String,
    /// Upstream color, if the feed supplies one
    #[serde(default)]
    pub route_color: Option<String>,
}

impl RawRoute {
    /// Create a raw route with no explicit color.
    pub fn new(
        route_id: impl Into<String>,
        route_short_name: impl Into<String>,
        route_long_name: impl Into<String>,
    ) -> Self {
        Self {
            route_id: route_id.into(),
            route_short_name: route_short_name.into(),
            route_long_name: route_long_name.into(),
            route_color: None,
        }
    }

    /// Set the feed-supplied color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.route_color = Some(color.into());
        self
    }

    /// The upstream route ID, when it is already numeric. Surrounding
    /// whitespace is ignored.
    pub fn numeric_id(&self) -> Option<RouteId> {
        RouteId::from_digits(self.route_id.trim())
    }
}

impl fmt::Display for RawRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "route {} (short name {:?}, long name {:?})",
            self.route_id, self.route_short_name, self.route_long_name
        )
    }
}

/// The resolved identity of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteIdentity {
    pub numeric_id: RouteId,
    /// Short display code, e.g. `"1 MC"`
    pub short_name: String,
    pub long_name: String,
    pub color: RouteColor,
}
