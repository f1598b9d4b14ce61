//! Route color type.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid route color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route color: {reason}")]
pub struct InvalidRouteColor {
    reason: &'static str,
}

/// A 6-hex-digit RGB route color, as GTFS `route_color` carries it.
///
/// Stored upper-case so `8dc63f` and `8DC63F` compare equal. A leading `#`
/// is tolerated on input and never emitted.
///
/// # Examples
///
/// ```
/// use cornwall_bus::domain::RouteColor;
///
/// let green = RouteColor::parse("8dc63f").unwrap();
/// assert_eq!(green.as_str(), "8DC63F");
///
/// assert!(RouteColor::parse("#0072BC").is_ok());
/// assert!(RouteColor::parse("0072B").is_err());
/// assert!(RouteColor::parse("GGGGGG").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteColor([u8; 6]);

impl RouteColor {
    /// The agency's own blue.
    pub const AGENCY_BLUE: RouteColor = RouteColor(*b"0072BC");

    pub const BLACK: RouteColor = RouteColor(*b"000000");

    /// Parse a route color from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidRouteColor> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        let bytes = s.as_bytes();

        if bytes.len() != 6 {
            return Err(InvalidRouteColor {
                reason: "must be exactly 6 hex digits",
            });
        }

        let mut out = [0u8; 6];
        for (slot, &b) in out.iter_mut().zip(bytes) {
            if !b.is_ascii_hexdigit() {
                return Err(InvalidRouteColor {
                    reason: "must contain only hex digits 0-9, A-F",
                });
            }
            *slot = b.to_ascii_uppercase();
        }

        Ok(RouteColor(out))
    }

    /// Returns the color as a string slice, without a leading `#`.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store ASCII hex digits
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Debug for RouteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteColor({})", self.as_str())
    }
}

impl fmt::Display for RouteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RouteColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RouteColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        RouteColor::parse(&s).map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any 6 hex digits parse, and case does not matter
        #[test]
        fn hex_always_parses(s in "[0-9a-fA-F]{6}") {
            let color = RouteColor::parse(&s).unwrap();
            prop_assert_eq!(color.as_str(), s.to_ascii_uppercase());
        }

        /// Wrong-length strings are always rejected
        #[test]
        fn wrong_length_rejected(s in "[0-9A-F]{0,5}|[0-9A-F]{7,12}") {
            prop_assert!(RouteColor::parse(&s).is_err());
        }
    }
}
