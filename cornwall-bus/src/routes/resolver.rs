//! Route identity resolution.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, error, warn};

use crate::domain::{RawRoute, RouteColor, RouteId, RouteIdentity};
use crate::text::Normalizer;

use super::error::ResolveError;
use super::whitelist::{FamilyKey, PREFIX_FAMILIES, RouteWhitelist, WhitelistEntry, cornwall_whitelist};

lazy_static! {
    static ref LONG_NAME_FAMILY: Regex = Regex::new(r"^\s*([0-9]+)\s*-").unwrap();
}

const COMMUNITY_SERVICE: &str = "Community Service";

/// Maps raw feed routes to stable identities.
///
/// Numeric route IDs pass through untouched. Everything else must be listed
/// in the whitelist or resolution fails.
#[derive(Debug, Clone)]
pub struct RouteResolver<'w> {
    whitelist: &'w RouteWhitelist,
    normalizer: Normalizer,
    agency_color: RouteColor,
}

impl RouteResolver<'static> {
    /// A resolver over the agency whitelist.
    pub fn new(normalizer: Normalizer, agency_color: RouteColor) -> Self {
        Self::with_whitelist(cornwall_whitelist(), normalizer, agency_color)
    }
}

impl<'w> RouteResolver<'w> {
    pub fn with_whitelist(
        whitelist: &'w RouteWhitelist,
        normalizer: Normalizer,
        agency_color: RouteColor,
    ) -> Self {
        Self {
            whitelist,
            normalizer,
            agency_color,
        }
    }

    /// Resolve every part of a route's identity at once.
    pub fn resolve(&self, raw: &RawRoute) -> Result<RouteIdentity, ResolveError> {
        Ok(RouteIdentity {
            numeric_id: self.route_id(raw)?,
            short_name: self.short_name(raw)?,
            long_name: self.long_name(raw),
            color: self.color(raw)?,
        })
    }

    /// Stable numeric ID for a route.
    pub fn route_id(&self, raw: &RawRoute) -> Result<RouteId, ResolveError> {
        if let Some(id) = raw.numeric_id() {
            return Ok(id);
        }
        Ok(self.entry(raw)?.numeric_id)
    }

    /// Short display code, e.g. `"1 MC"`.
    ///
    /// Numeric routes keep the feed's short name, or their ID when the feed
    /// has none.
    pub fn short_name(&self, raw: &RawRoute) -> Result<String, ResolveError> {
        if raw.numeric_id().is_some() {
            let short_name = raw.route_short_name.trim();
            return Ok(if short_name.is_empty() {
                raw.route_id.trim().to_string()
            } else {
                short_name.to_string()
            });
        }
        Ok(self.entry(raw)?.short_name.to_string())
    }

    /// Cleaned display name. Never fails.
    pub fn long_name(&self, raw: &RawRoute) -> String {
        if raw.route_id.starts_with("CS-") && raw.route_long_name.starts_with("61-CS-") {
            return COMMUNITY_SERVICE.to_string();
        }
        self.normalizer.route_long_name(&raw.route_long_name)
    }

    /// Display color: the feed's own color when valid, else the color table,
    /// else the agency color.
    pub fn color(&self, raw: &RawRoute) -> Result<RouteColor, ResolveError> {
        if let Some(feed_color) = raw.route_color.as_deref().filter(|c| !c.trim().is_empty()) {
            match RouteColor::parse(feed_color) {
                Ok(color) => return Ok(color),
                Err(e) => warn!(route = %raw.route_id, color = feed_color, "{e}, using table color"),
            }
        }
        let id = self.route_id(raw)?;
        Ok(self.whitelist.color(id).unwrap_or(self.agency_color))
    }

    fn entry(&self, raw: &RawRoute) -> Result<&'w WhitelistEntry, ResolveError> {
        let family = family_of(raw)?;
        let route_id = raw.route_id.trim();
        match self.whitelist.lookup(family, route_id) {
            Some(entry) => {
                debug!(route = route_id, %family, id = %entry.numeric_id, "resolved route");
                Ok(entry)
            }
            None => {
                error!(route = route_id, %family, "route is not whitelisted");
                Err(ResolveError::UnrecognizedRoute {
                    route_id: route_id.to_string(),
                    short_name: raw.route_short_name.clone(),
                })
            }
        }
    }
}

/// Work out which family a raw route belongs to.
///
/// The short name is tried first as a number, then as a known prefix. A
/// route with no usable short name falls back to the `"N-"` prefix of its
/// long name.
pub fn family_of(raw: &RawRoute) -> Result<FamilyKey, ResolveError> {
    let short_name = raw.route_short_name.trim();
    if let Ok(n) = short_name.parse::<u32>() {
        return Ok(FamilyKey::Number(n));
    }

    let short_upper = short_name.to_uppercase();
    let long_upper = raw.route_long_name.trim().to_uppercase();
    for &prefix in PREFIX_FAMILIES {
        if short_upper.starts_with(prefix) || long_upper.starts_with(prefix) {
            return Ok(FamilyKey::Prefix(prefix));
        }
    }

    if let Some(n) = LONG_NAME_FAMILY
        .captures(&raw.route_long_name)
        .and_then(|caps| caps[1].parse::<u32>().ok())
    {
        return Ok(FamilyKey::Number(n));
    }

    error!(route = %raw.route_id, "no route family");
    Err(ResolveError::UnknownFamily {
        short_name: raw.route_short_name.clone(),
        long_name: raw.route_long_name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::whitelist::Variant;

    fn resolver() -> RouteResolver<'static> {
        RouteResolver::new(Normalizer::default(), RouteColor::AGENCY_BLUE)
    }

    #[test]
    fn mcconnell_scenario() {
        let raw = RawRoute::new("MCCONNELL", "1", "1-MCCONNELL");
        let identity = resolver().resolve(&raw).unwrap();
        assert_eq!(identity.numeric_id, RouteId(1_001));
        assert_eq!(identity.short_name, "1 MC");
        assert_eq!(identity.long_name, "McConnell");
        assert_eq!(identity.color.as_str(), "8DC63F");
    }

    #[test]
    fn community_service_east_scenario() {
        let raw = RawRoute::new("CS-EAST", "61", "61-CS-EAST");
        let identity = resolver().resolve(&raw).unwrap();
        assert_eq!(identity.numeric_id, RouteId(61_001));
        assert_eq!(identity.short_name, "61 E");
        assert_eq!(identity.long_name, "Community Service");
        assert_eq!(identity.color.as_str(), "1C3E94");
    }

    #[test]
    fn unknown_route_is_fatal() {
        let raw = RawRoute::new("UNKNOWN", "5", "5-UNKNOWN");
        let err = resolver().route_id(&raw).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnrecognizedRoute {
                route_id: "UNKNOWN".into(),
                short_name: "5".into(),
            }
        );
        assert!(resolver().resolve(&raw).is_err());
        assert!(resolver().short_name(&raw).is_err());
    }

    #[test]
    fn variant_from_another_family_is_fatal() {
        let raw = RawRoute::new("PITT", "2", "2-PITT");
        assert!(matches!(
            resolver().route_id(&raw),
            Err(ResolveError::UnrecognizedRoute { .. })
        ));
    }

    #[test]
    fn numeric_route_passes_through() {
        let raw = RawRoute::new("17", "17", "17-BENSON CENTRE");
        let identity = resolver().resolve(&raw).unwrap();
        assert_eq!(identity.numeric_id, RouteId(17));
        assert_eq!(identity.short_name, "17");
        assert_eq!(identity.long_name, "Benson Centre");
        assert_eq!(identity.color.as_str(), "0072BC");
    }

    #[test]
    fn numeric_route_without_short_name_uses_its_id() {
        let raw = RawRoute::new("42", "", "");
        assert_eq!(resolver().short_name(&raw).unwrap(), "42");
    }

    #[test]
    fn padded_numeric_route_resolves_fully() {
        let raw = RawRoute::new(" 42 ", "42", "42-Loop");
        let identity = resolver().resolve(&raw).unwrap();
        assert_eq!(identity.numeric_id, RouteId(42));
        assert_eq!(identity.short_name, "42");
        assert_eq!(identity.color.as_str(), "0072BC");

        let unnamed = RawRoute::new(" 42 ", "", "");
        assert_eq!(resolver().short_name(&unnamed).unwrap(), "42");
    }

    #[test]
    fn family_wide_entries() {
        let r = resolver();
        let express = RawRoute::new("EXPRESS", "71", "71-EXPRESS");
        assert_eq!(r.route_id(&express).unwrap(), RouteId(71));
        assert_eq!(r.short_name(&express).unwrap(), "71 EX");

        let business_park = RawRoute::new("BUSINESS PARK 2", "99", "99-BUSINESS PARK");
        assert_eq!(r.route_id(&business_park).unwrap(), RouteId(99));
        assert_eq!(r.short_name(&business_park).unwrap(), "99 BP");

        let school = RawRoute::new("ST LAWRENCE", "14", "14-ST LAWRENCE");
        assert_eq!(r.route_id(&school).unwrap(), RouteId(14));
        assert_eq!(r.short_name(&school).unwrap(), "14");
    }

    #[test]
    fn canada_day_prefix_family() {
        let raw = RawRoute::new("CANADA DAY SHUTTLE", "CANADA DAY", "Canada Day Shuttle");
        assert_eq!(
            family_of(&raw).unwrap(),
            FamilyKey::Prefix("CANADA DAY")
        );
        assert_eq!(resolver().short_name(&raw).unwrap(), "CD");
    }

    #[test]
    fn family_falls_back_to_long_name() {
        let raw = RawRoute::new("SUNRISE", "", "2-SUNRISE");
        assert_eq!(family_of(&raw).unwrap(), FamilyKey::Number(2));
        assert_eq!(resolver().route_id(&raw).unwrap(), RouteId(2_002));
    }

    #[test]
    fn no_family_is_fatal() {
        let raw = RawRoute::new("MYSTERY", "", "Mystery Tour");
        assert!(matches!(
            resolver().route_id(&raw),
            Err(ResolveError::UnknownFamily { .. })
        ));
    }

    #[test]
    fn valid_feed_color_wins() {
        let raw = RawRoute::new("MCCONNELL", "1", "1-MCCONNELL").with_color("#abcdef");
        assert_eq!(resolver().color(&raw).unwrap().as_str(), "ABCDEF");
    }

    #[test]
    fn malformed_feed_color_falls_back_to_table() {
        let raw = RawRoute::new("PITT", "1", "1-PITT").with_color("orange");
        assert_eq!(resolver().color(&raw).unwrap().as_str(), "F78F1E");

        let blank = RawRoute::new("PITT", "1", "1-PITT").with_color("  ");
        assert_eq!(resolver().color(&blank).unwrap().as_str(), "F78F1E");
    }

    #[test]
    fn community_service_name_needs_both_prefixes() {
        let r = resolver();
        let raw = RawRoute::new("CS-WEST", "61", "61-CS-WEST");
        assert_eq!(r.long_name(&raw), "Community Service");

        let other = RawRoute::new("CS-WEST", "61", "61-WEST LOOP");
        assert_eq!(r.long_name(&other), "West Loop");
    }

    #[test]
    fn every_whitelisted_variant_resolves_to_its_entry() {
        let r = resolver();
        for e in cornwall_whitelist().entries() {
            let (FamilyKey::Number(family), Variant::Id(route_id)) = (e.family, e.variant) else {
                continue;
            };
            let raw = RawRoute::new(route_id, family.to_string(), "");
            assert_eq!(r.route_id(&raw).unwrap(), e.numeric_id);
            assert_eq!(r.short_name(&raw).unwrap(), e.short_name);
        }
    }
}
