//! The closed whitelist of non-numeric route identifiers.
//!
//! Cornwall Transit publishes most routes under street-name IDs such as
//! `"MCCONNELL"` or `"CS-EAST"`. Each one belongs to a route family (the
//! number riders see) and gets a numeric ID from that family's block:
//! family 1 owns 1001-1999, family 61 owns 61001-61999, and so on.
//!
//! The table is data, loaded once into an immutable lookup. Anything not
//! listed here is rejected by the resolver.

use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;

use crate::domain::{RouteColor, RouteId};

/// How a route family is recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FamilyKey {
    /// The route number, parsed from the short name
    Number(u32),
    /// A fixed short-name prefix, for event services without a number
    Prefix(&'static str),
}

impl fmt::Display for FamilyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FamilyKey::Number(n) => write!(f, "{n}"),
            FamilyKey::Prefix(p) => f.write_str(p),
        }
    }
}

/// Which upstream route IDs within a family an entry covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Exactly this upstream route ID
    Id(&'static str),
    /// Every non-numeric route ID in the family
    Any,
}

/// One whitelist row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhitelistEntry {
    pub family: FamilyKey,
    pub variant: Variant,
    pub numeric_id: RouteId,
    pub short_name: &'static str,
}

const fn entry(
    family: FamilyKey,
    variant: Variant,
    numeric_id: i64,
    short_name: &'static str,
) -> WhitelistEntry {
    WhitelistEntry {
        family,
        variant,
        numeric_id: RouteId(numeric_id),
        short_name,
    }
}

/// Short-name prefixes that identify a family on their own.
pub const PREFIX_FAMILIES: &[&str] = &["CANADA DAY"];

use FamilyKey::{Number, Prefix};
use Variant::{Any, Id};

#[rustfmt::skip]
const ENTRIES: &[WhitelistEntry] = &[
    entry(Number(1), Id("MCCONNELL"), 1_001, "1 MC"),
    entry(Number(1), Id("PITT"), 1_002, "1 PT"),
    entry(Number(2), Id("CUMBERLAND"), 2_001, "2 CB"),
    entry(Number(2), Id("SUNRISE"), 2_002, "2 SR"),
    entry(Number(3), Id("BROOKDALE"), 3_001, "3 BD"),
    entry(Number(3), Id("MONTREAL"), 3_002, "3 MT"),
    entry(Number(4), Id("RIVERDALE"), 4_001, "4 RV"),
    entry(Number(61), Id("CS-EAST"), 61_001, "61 E"),
    entry(Number(61), Id("CS-WEST"), 61_002, "61 W"),
    entry(Number(71), Any, 71, "71 EX"),
    entry(Number(88), Any, 88, "88 CA"),
    entry(Number(99), Any, 99, "99 BP"),
    entry(Number(12), Any, 12, "12"),
    entry(Number(14), Any, 14, "14"),
    entry(Number(17), Any, 17, "17"),
    entry(Number(18), Any, 18, "18"),
    entry(Number(19), Any, 19, "19"),
    entry(Number(20), Any, 20, "20"),
    entry(Prefix("CANADA DAY"), Any, 9_001, "CD"),
];

/// Colors for routes whose feed record carries none.
#[rustfmt::skip]
const COLORS: &[(i64, &str)] = &[
    (1_001, "8DC63F"), // 1-MCCONNELL
    (1_002, "F78F1E"), // 1-PITT
    (2_001, "FFD200"), // 2-CUMBERLAND
    (2_002, "0072BC"), // 2-SUNRISE
    (3_001, "00AEEF"), // 3-BROOKDALE
    (3_002, "EB4498"), // 3-MONTREAL
    (4_001, "7D4199"), // 4-RIVERDALE
    (61, "1C3E94"),    // 61-CS
    (61_001, "1C3E94"),
    (61_002, "1C3E94"),
];

/// Immutable lookup built from the whitelist and color tables.
#[derive(Debug, Default)]
pub struct RouteWhitelist {
    exact: HashMap<FamilyKey, HashMap<&'static str, WhitelistEntry>>,
    family_wide: HashMap<FamilyKey, WhitelistEntry>,
    colors: HashMap<RouteId, RouteColor>,
}

impl RouteWhitelist {
    /// Build a lookup from explicit rows.
    ///
    /// Colors that fail to parse are skipped.
    pub fn new(entries: &[WhitelistEntry], colors: &[(i64, &str)]) -> Self {
        let mut whitelist = Self::default();
        for e in entries {
            match e.variant {
                Id(route_id) => {
                    whitelist
                        .exact
                        .entry(e.family)
                        .or_default()
                        .insert(route_id, *e);
                }
                Any => {
                    whitelist.family_wide.insert(e.family, *e);
                }
            }
        }
        whitelist.colors = colors
            .iter()
            .filter_map(|(id, hex)| RouteColor::parse(hex).ok().map(|c| (RouteId(*id), c)))
            .collect();
        whitelist
    }

    /// Look up the entry for an upstream route ID within a family.
    ///
    /// An exact ID match wins over a family-wide entry.
    pub fn lookup(&self, family: FamilyKey, route_id: &str) -> Option<&WhitelistEntry> {
        self.exact
            .get(&family)
            .and_then(|ids| ids.get(route_id))
            .or_else(|| self.family_wide.get(&family))
    }

    /// Table color for an already-resolved route.
    pub fn color(&self, id: RouteId) -> Option<RouteColor> {
        self.colors.get(&id).copied()
    }

    /// Every row, exact and family-wide.
    pub fn entries(&self) -> impl Iterator<Item = &WhitelistEntry> {
        self.exact
            .values()
            .flat_map(|ids| ids.values())
            .chain(self.family_wide.values())
    }

    pub fn len(&self) -> usize {
        self.exact.values().map(|ids| ids.len()).sum::<usize>() + self.family_wide.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

lazy_static! {
    static ref CORNWALL: RouteWhitelist = RouteWhitelist::new(ENTRIES, COLORS);
}

/// The agency's whitelist, built on first use.
pub fn cornwall_whitelist() -> &'static RouteWhitelist {
    &CORNWALL
}
