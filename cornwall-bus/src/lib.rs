//! Cornwall Transit bus adapter for a GTFS import pipeline.
//!
//! Translates the agency's raw feed into the normalized records a mobile
//! app data generator expects: stable numeric route IDs and short codes,
//! cleaned labels, and trips split along static per-route directions.

pub mod adapter;
pub mod config;
pub mod domain;
pub mod routes;
pub mod service;
pub mod snapshot;
pub mod text;
pub mod trips;
