//! Label normalization for route long names, headsigns and stop names.

pub mod clean;
mod rules;

pub use rules::{
    DEFAULT_HEADSIGN_PREFIX, LabelKind, Normalizer, clean_route_long_name, clean_stop_name,
    clean_trip_headsign, normalize_label,
};
