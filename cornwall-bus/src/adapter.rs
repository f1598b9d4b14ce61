//! The adapter seam between the import pipeline and the agency rules.
//!
//! The pipeline owns feed parsing and output. It calls back into an
//! [`AgencyAdapter`] for everything agency-specific: which records to keep,
//! how routes are identified, how trips are split and how labels read.

use std::cmp::Ordering;

use crate::config::AdapterConfig;
use crate::domain::{
    CanonicalTrip, Direction, RawRoute, RawTrip, RouteColor, RouteId, RouteIdentity, TripStop,
};
use crate::routes::{ResolveError, RouteResolver};
use crate::service::ServiceFilter;
use crate::text::{LabelKind, Normalizer};
use crate::trips::{MergeError, SplitError, TripSplitter, merge_headsign};

/// Any fatal adapter error. Each one aborts the record that raised it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Split(#[from] SplitError),

    #[error(transparent)]
    Merge(#[from] MergeError),
}

/// Callbacks the import pipeline makes into an agency adapter.
///
/// `normalize_feed` drives any implementation, so the pipeline logic can
/// be exercised against other adapters.
pub trait AgencyAdapter {
    /// Color for the agency as a whole.
    fn agency_color(&self) -> RouteColor;

    /// GTFS route type reported for every route.
    fn agency_route_type(&self) -> u8;

    /// True when the run has nothing useful to import.
    fn excluding_all(&self) -> bool;

    fn exclude_trip(&self, trip: &RawTrip) -> bool;

    fn exclude_calendar(&self, service_id: &str) -> bool;

    fn exclude_calendar_date(&self, service_id: &str) -> bool;

    fn route_id(&self, route: &RawRoute) -> Result<RouteId, AdapterError>;

    fn route_short_name(&self, route: &RawRoute) -> Result<String, AdapterError>;

    fn route_long_name(&self, route: &RawRoute) -> String;

    fn route_color(&self, route: &RawRoute) -> Result<RouteColor, AdapterError>;

    /// Turn a raw trip into the canonical trips the pipeline stores.
    fn split_trip(
        &self,
        route: &RouteIdentity,
        trip: &RawTrip,
    ) -> Result<Vec<CanonicalTrip>, AdapterError>;

    /// Order two stop visits of a trip on `route_id` travelling `direction`.
    fn compare_stops(
        &self,
        route_id: RouteId,
        direction: Direction,
        a: &TripStop,
        b: &TripStop,
    ) -> Ordering;

    /// Headsign for two trips the pipeline wants to merge.
    fn merge_headsign(
        &self,
        first: &CanonicalTrip,
        second: &CanonicalTrip,
    ) -> Result<String, AdapterError>;

    fn clean_label(&self, kind: LabelKind, raw: &str) -> String;

    /// Resolve all of a route's identity in one call.
    fn resolve_route(&self, route: &RawRoute) -> Result<RouteIdentity, AdapterError> {
        Ok(RouteIdentity {
            numeric_id: self.route_id(route)?,
            short_name: self.route_short_name(route)?,
            long_name: self.route_long_name(route),
            color: self.route_color(route)?,
        })
    }

    fn clean_stop_name(&self, raw: &str) -> String {
        self.clean_label(LabelKind::StopName, raw)
    }
}

/// The Cornwall Transit bus adapter.
#[derive(Debug, Clone)]
pub struct CornwallAdapter {
    config: AdapterConfig,
    normalizer: Normalizer,
    resolver: RouteResolver<'static>,
    splitter: TripSplitter<'static>,
    services: ServiceFilter,
}

impl CornwallAdapter {
    pub fn new(config: AdapterConfig, services: ServiceFilter) -> Self {
        let normalizer = config.normalizer();
        Self {
            resolver: RouteResolver::new(normalizer.clone(), config.agency_color),
            splitter: TripSplitter::new(normalizer.clone()),
            normalizer,
            config,
            services,
        }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }
}

impl Default for CornwallAdapter {
    fn default() -> Self {
        Self::new(AdapterConfig::default(), ServiceFilter::keep_all())
    }
}

impl AgencyAdapter for CornwallAdapter {
    fn agency_color(&self) -> RouteColor {
        self.config.agency_color
    }

    fn agency_route_type(&self) -> u8 {
        self.config.route_type
    }

    fn excluding_all(&self) -> bool {
        self.services.excluding_all()
    }

    fn exclude_trip(&self, trip: &RawTrip) -> bool {
        self.services.exclude_trip(trip)
    }

    fn exclude_calendar(&self, service_id: &str) -> bool {
        self.services.exclude_calendar(service_id)
    }

    fn exclude_calendar_date(&self, service_id: &str) -> bool {
        self.services.exclude_calendar_date(service_id)
    }

    fn route_id(&self, route: &RawRoute) -> Result<RouteId, AdapterError> {
        Ok(self.resolver.route_id(route)?)
    }

    fn route_short_name(&self, route: &RawRoute) -> Result<String, AdapterError> {
        Ok(self.resolver.short_name(route)?)
    }

    fn route_long_name(&self, route: &RawRoute) -> String {
        self.resolver.long_name(route)
    }

    fn route_color(&self, route: &RawRoute) -> Result<RouteColor, AdapterError> {
        Ok(self.resolver.color(route)?)
    }

    fn split_trip(
        &self,
        route: &RouteIdentity,
        trip: &RawTrip,
    ) -> Result<Vec<CanonicalTrip>, AdapterError> {
        Ok(self.splitter.split(route, trip)?)
    }

    fn compare_stops(
        &self,
        route_id: RouteId,
        direction: Direction,
        a: &TripStop,
        b: &TripStop,
    ) -> Ordering {
        self.splitter.specs().compare(route_id, direction, a, b)
    }

    fn merge_headsign(
        &self,
        first: &CanonicalTrip,
        second: &CanonicalTrip,
    ) -> Result<String, AdapterError> {
        Ok(merge_headsign(first, second)?)
    }

    fn clean_label(&self, kind: LabelKind, raw: &str) -> String {
        self.normalizer.normalize(kind, raw)
    }
}
