//! The agency's direction table.

use std::cmp::Ordering;
use std::collections::HashMap;

use lazy_static::lazy_static;
use tracing::error;

use crate::domain::{Direction, RouteId, TripStop};

use super::spec::{RouteTripSpec, RouteTripSpecBuilder};

/// Direction specifications keyed by resolved route ID.
///
/// Routes absent from the table keep the feed's own direction and stop
/// order.
#[derive(Debug, Clone, Default)]
pub struct RouteTripSpecs {
    specs: HashMap<RouteId, RouteTripSpec>,
}

impl RouteTripSpecs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a spec, replacing any earlier one for the same route.
    pub fn insert(&mut self, spec: RouteTripSpec) {
        self.specs.insert(spec.route_id(), spec);
    }

    pub fn get(&self, route_id: RouteId) -> Option<&RouteTripSpec> {
        self.specs.get(&route_id)
    }

    pub fn contains(&self, route_id: RouteId) -> bool {
        self.specs.contains_key(&route_id)
    }

    /// Order two visits of a trip on `route_id` travelling `direction`.
    ///
    /// Routes without a spec are ordered by feed sequence alone.
    pub fn compare(
        &self,
        route_id: RouteId,
        direction: Direction,
        a: &TripStop,
        b: &TripStop,
    ) -> Ordering {
        match self.get(route_id) {
            Some(spec) => spec.compare(direction, a, b),
            None => a.sequence.cmp(&b.sequence),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteTripSpec> {
        self.specs.values()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Build and add a spec. Malformed specs are logged and skipped.
    fn add(mut self, builder: RouteTripSpecBuilder) -> Self {
        match builder.build() {
            Ok(spec) => self.insert(spec),
            Err(e) => error!("{e}"),
        }
        self
    }
}

impl FromIterator<RouteTripSpec> for RouteTripSpecs {
    fn from_iter<I: IntoIterator<Item = RouteTripSpec>>(iter: I) -> Self {
        let mut specs = Self::new();
        for spec in iter {
            specs.insert(spec);
        }
        specs
    }
}

fn route(id: i64) -> RouteTripSpecBuilder {
    RouteTripSpec::builder(RouteId(id))
}

/// Routes whose feed trips run out and back in one record.
///
/// Stop 125 is the downtown terminal most routes start and end at.
#[rustfmt::skip]
fn cornwall_trip_specs() -> RouteTripSpecs {
    use Direction::{East, North, South, West};

    RouteTripSpecs::new()
        .add(route(1_001) // 1 McConnell
            .direction(East, &["125", "418", "440", "401"])
            .direction(West, &["401", "402", "413", "122", "124", "125"]))
        .add(route(1_002) // 1 Pitt
            .direction(North, &["125", "418", "624", "633", "601"])
            .direction(South, &["601", "611", "614", "118", "124", "125"]))
        .add(route(2_001) // 2 Cumberland
            .direction(North, &["125", "332", "301"])
            .direction(South, &["301", "311", "125"]))
        .add(route(2_002) // 2 Sunrise
            .direction(East, &["125", "737", "6141"])
            .direction(West, &["6141", "708", "712", "718", "125"]))
        .add(route(3_001) // 3 Brookdale
            .direction(North, &["125", "6146", "221", "222", "201"])
            .direction(South, &["201", "217", "125"]))
        .add(route(3_002) // 3 Montreal
            .direction(East, &["125", "527", "501"])
            .direction(West, &["501", "507", "125"]))
        .add(route(4_001) // 4 Riverdale
            .direction(East, &["101", "109", "125"])
            .direction(West, &["125", "128", "6148", "129", "141"]))
        .add(route(71) // 71 Express
            .direction(North, &["125", "219", "329", "241", "225", "201", "207", "241", "234", "217", "125"])
            .direction(South, &["125", "126", "527", "528", "529", "534", "718", "508", "528", "509", "517", "125"]))
        .add(route(99) // 99 Business Park
            .direction(North, &[
                "6134", "240", "9900", "733", "734", "9909", "9919", "9914", "9916", "9918", "9920",
                "9917", "9902", "9910", "9912", "9913", "9905", "9903", "9912", "9913", "716", "727",
                "418", "9900",
            ])
            .direction(South, &[
                "6134", "240", "323", "124", "9900", "418", "624", "628", "734", "9909", "9919",
                "9914", "9918", "9916", "9920", "9900",
            ]))
}

lazy_static! {
    static ref CORNWALL: RouteTripSpecs = cornwall_trip_specs();
}

/// The agency's direction table, built on first use.
pub fn route_trip_specs() -> &'static RouteTripSpecs {
    &CORNWALL
}
