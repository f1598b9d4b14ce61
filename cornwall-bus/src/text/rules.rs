//! Agency-specific label pipelines.
//!
//! Cornwall Transit publishes route long names like `"1-MCCONNELL"`,
//! headsigns like `"Cornwall Square"` and stop names like
//! `"123 Main St. and Apartments"`. Each label kind runs its own ordered
//! pipeline of word-boundary-safe substitutions followed by the shared
//! cleanup in [`super::clean`].
//!
//! Every pipeline is idempotent: normalizing an already-normalized label
//! returns it unchanged.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use super::clean::{clean_label, clean_numbers, clean_street_types, collapse_spaces, remove_points};

lazy_static! {
    static ref AND: Regex = Regex::new(r"(?i)\band\b").unwrap();
    static ref AT_SIGN: Regex = Regex::new(r"(^|\W)@(\W|$)").unwrap();
    static ref APARTMENTS: Regex = Regex::new(r"(?i)\bapartments\b").unwrap();
    static ref COMMUNITY_SERVICE: Regex = Regex::new(r"(?i)\bcommunity\s+service\b").unwrap();
    static ref SAINT: Regex = Regex::new(r"(?i)\bsaint\b").unwrap();
    static ref MC_NAME: Regex = Regex::new(r"(?i)\b(mc)([a-z])([a-z]+)\b").unwrap();
    static ref STARTS_WITH_RSN: Regex = Regex::new(r"^(?:[0-9]+-\s*)+").unwrap();
    static ref LEADING_CIVIC_NUMBER: Regex = Regex::new(r"^(?:[0-9]+\s+)+").unwrap();
    static ref UPPERCASE_RUN: Regex = Regex::new(r"\p{Lu}{3,}").unwrap();
    static ref DEFAULT: Normalizer = Normalizer::default();
}

/// Agency name stripped from the start of headsigns by default.
pub const DEFAULT_HEADSIGN_PREFIX: &str = "Cornwall";

/// Which pipeline a label runs through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    RouteLongName,
    Headsign,
    StopName,
}

/// Compiled label pipelines.
///
/// Only the headsign prefix is configurable; everything else is fixed
/// agency policy.
#[derive(Debug, Clone)]
pub struct Normalizer {
    headsign_prefix: Option<Regex>,
}

impl Normalizer {
    /// Build pipelines that strip `headsign_prefix` from headsigns.
    ///
    /// An empty prefix disables stripping.
    pub fn new(headsign_prefix: &str) -> Self {
        let prefix = headsign_prefix.trim();
        let headsign_prefix = if prefix.is_empty() {
            None
        } else {
            // An escaped literal always compiles
            Regex::new(&format!(r"(?i)^(?:{}\s+)+", regex::escape(prefix))).ok()
        };
        Self { headsign_prefix }
    }

    /// Run `raw` through the pipeline for `kind`.
    pub fn normalize(&self, kind: LabelKind, raw: &str) -> String {
        match kind {
            LabelKind::RouteLongName => self.route_long_name(raw),
            LabelKind::Headsign => self.trip_headsign(raw),
            LabelKind::StopName => self.stop_name(raw),
        }
    }

    /// `"1-MCCONNELL"` becomes `"McConnell"`.
    pub fn route_long_name(&self, raw: &str) -> String {
        let label = fix_case(&collapse_spaces(raw));
        let label = fix_mc_names(&label);
        let label = STARTS_WITH_RSN.replace(&label, "");
        finish(&label)
    }

    /// `"CORNWALL COMMUNITY SERVICE"` becomes `"CS"`.
    pub fn trip_headsign(&self, raw: &str) -> String {
        let label = fix_case(&collapse_spaces(raw));
        let label = COMMUNITY_SERVICE.replace_all(&label, "CS");
        let label = fix_mc_names(&label);
        let label = SAINT.replace_all(&label, "St");
        let label = remove_points(&label);
        let label = clean_numbers(&label);
        let label = collapse_spaces(&clean_street_types(&label));
        let label = match &self.headsign_prefix {
            Some(prefix) => prefix.replace(&label, "").into_owned(),
            None => label,
        };
        finish(&label)
    }

    /// `"123 Main St. and Apartments"` becomes `"Main St & Apts"`.
    pub fn stop_name(&self, raw: &str) -> String {
        let label = fix_case(&collapse_spaces(raw));
        let label = AND.replace_all(&label, "&");
        let label = replace_at_signs(&label);
        let label = APARTMENTS.replace_all(&label, "Apts");
        let label = SAINT.replace_all(&label, "St");
        let label = fix_mc_names(&label);
        let label = remove_points(&label);
        let label = clean_numbers(&label);
        let label = collapse_spaces(&clean_street_types(&label));
        let label = LEADING_CIVIC_NUMBER.replace(&label, "");
        finish(&label)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_HEADSIGN_PREFIX)
    }
}

/// Normalize a label with the default agency pipelines.
pub fn normalize_label(kind: LabelKind, raw: &str) -> String {
    DEFAULT.normalize(kind, raw)
}

pub fn clean_route_long_name(raw: &str) -> String {
    DEFAULT.route_long_name(raw)
}

pub fn clean_trip_headsign(raw: &str) -> String {
    DEFAULT.trip_headsign(raw)
}

pub fn clean_stop_name(raw: &str) -> String {
    DEFAULT.stop_name(raw)
}

/// Upper-case noise: no lower-case letter, and a run of at least three
/// capitals. Short acronyms like `"CS"` are not noise.
fn is_noise(label: &str) -> bool {
    !label.chars().any(char::is_lowercase) && UPPERCASE_RUN.is_match(label)
}

/// Lower-case upper-case noise so the rules see ordinary words. Word starts
/// are re-capitalized by [`finish`].
fn fix_case(label: &str) -> String {
    if is_noise(label) {
        label.to_lowercase()
    } else {
        label.to_string()
    }
}

/// Shared last step. Substitutions can strip every lower-case letter from a
/// label (`"ABC and"` becomes `"ABC &"`), so noise is checked once more on
/// the finished label.
fn finish(label: &str) -> String {
    let label = clean_label(label);
    if is_noise(&label) {
        clean_label(&label.to_lowercase())
    } else {
        label
    }
}

/// `"mcconnell"` becomes `"McConnell"`. Mixed-case names like `"McKenzie"`
/// are left as written apart from the `Mc` itself.
fn fix_mc_names(label: &str) -> String {
    MC_NAME
        .replace_all(label, |caps: &Captures| {
            let rest = &caps[3];
            let rest = if rest.chars().all(char::is_uppercase) {
                rest.to_lowercase()
            } else {
                rest.to_string()
            };
            format!("Mc{}{}", caps[2].to_uppercase(), rest)
        })
        .into_owned()
}

/// `"Pitt @ Second"` becomes `"Pitt / Second"`.
///
/// The pattern consumes its neighbours, so adjacent signs need another pass.
fn replace_at_signs(label: &str) -> String {
    let mut label = label.to_string();
    while AT_SIGN.is_match(&label) {
        label = AT_SIGN.replace_all(&label, "${1}/${2}").into_owned();
    }
    label
}
