//! Trip splitting and sequencing.
//!
//! A raw trip on a route with a direction spec is cut into one trip per
//! direction. Each stop visit is placed into the direction whose sequence
//! it continues. A visit to a shared turnaround stop can end one direction
//! and start the other, so it may be placed in both.
//!
//! Placement is a search over "how far along each sequence are we" states,
//! keeping the placement that fills the most sequence slots. Every
//! direction's stops come out as an in-order subsequence of its spec.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use tracing::{debug, error};

use crate::domain::{CanonicalTrip, Direction, RawTrip, RouteIdentity, TripDirection, TripStop};
use crate::text::Normalizer;

use super::error::SplitError;
use super::spec::RouteTripSpec;
use super::table::{RouteTripSpecs, route_trip_specs};

lazy_static! {
    static ref DEFAULT: TripSplitter<'static> = TripSplitter::new(Normalizer::default());
}

/// Which direction a visit is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    First,
    Second,
    Both,
}

/// Next free position in each direction's sequence.
type Progress = (usize, usize);

#[derive(Debug, Clone, Copy)]
struct Step {
    score: usize,
    prev: Progress,
    placement: Placement,
}

/// Splits raw trips using a direction table.
#[derive(Debug, Clone)]
pub struct TripSplitter<'s> {
    specs: &'s RouteTripSpecs,
    normalizer: Normalizer,
}

impl TripSplitter<'static> {
    /// A splitter over the agency's direction table.
    pub fn new(normalizer: Normalizer) -> Self {
        Self::with_specs(route_trip_specs(), normalizer)
    }
}

impl<'s> TripSplitter<'s> {
    pub fn with_specs(specs: &'s RouteTripSpecs, normalizer: Normalizer) -> Self {
        Self { specs, normalizer }
    }

    pub fn specs(&self) -> &'s RouteTripSpecs {
        self.specs
    }

    /// Turn one raw trip into canonical trips.
    ///
    /// Routes in the direction table always yield exactly two trips, one per
    /// direction, either of which may have no stops. Other routes yield the
    /// trip unchanged apart from headsign cleanup.
    pub fn split(
        &self,
        route: &RouteIdentity,
        trip: &RawTrip,
    ) -> Result<Vec<CanonicalTrip>, SplitError> {
        match self.specs.get(route.numeric_id) {
            Some(spec) => Ok(split_along(spec, trip)?.into()),
            None => Ok(vec![self.unsplit(route, trip)]),
        }
    }

    fn unsplit(&self, route: &RouteIdentity, trip: &RawTrip) -> CanonicalTrip {
        let headsign = trip
            .headsign()
            .map(|h| self.normalizer.trip_headsign(h))
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| self.normalizer.trip_headsign(&route.long_name));

        CanonicalTrip {
            source_trip_id: trip.trip_id.clone(),
            route_id: route.numeric_id,
            direction: TripDirection::Feed(trip.direction_id.unwrap_or(0)),
            headsign,
            stops: trip.stops_in_feed_order(),
            split: false,
        }
    }
}

/// Split a raw trip with the agency's direction table and default label
/// rules.
pub fn split_trip(route: &RouteIdentity, trip: &RawTrip) -> Result<Vec<CanonicalTrip>, SplitError> {
    DEFAULT.split(route, trip)
}

/// Split a raw trip along both directions of `spec`.
///
/// Visits are taken in feed sequence order. A direction that only received
/// shared turnaround visits is left empty: the trip never actually travelled
/// it.
pub fn split_along(spec: &RouteTripSpec, trip: &RawTrip) -> Result<[CanonicalTrip; 2], SplitError> {
    let route_id = spec.route_id();
    let visits = trip.stops_in_feed_order();

    if let Some(stray) = visits.iter().find(|v| !spec.contains(&v.stop_id)) {
        error!(route = %route_id, trip = %trip.trip_id, stop = %stray.stop_id, "stop not in direction table");
        return Err(SplitError::UnknownStop {
            route_id,
            trip_id: trip.trip_id.clone(),
            stop_id: stray.stop_id.clone(),
        });
    }

    let placements = place_visits(spec, &visits).map_err(|i| {
        let visit = &visits[i];
        error!(route = %route_id, trip = %trip.trip_id, stop = %visit.stop_id, "stop out of sequence");
        SplitError::OutOfSequence {
            route_id,
            trip_id: trip.trip_id.clone(),
            stop_id: visit.stop_id.clone(),
            sequence: visit.sequence,
        }
    })?;

    let [first, second] = spec.directions();
    let first_stops = collect(&visits, &placements, Placement::First);
    let second_stops = collect(&visits, &placements, Placement::Second);

    debug!(
        route = %route_id,
        trip = %trip.trip_id,
        first = first_stops.len(),
        second = second_stops.len(),
        "split trip"
    );

    let canonical = |direction: Direction, stops| CanonicalTrip {
        source_trip_id: trip.trip_id.clone(),
        route_id,
        direction: TripDirection::Compass(direction),
        headsign: direction.headsign().to_string(),
        stops,
        split: true,
    };
    Ok([
        canonical(first.direction, first_stops),
        canonical(second.direction, second_stops),
    ])
}

/// Visits placed in `side` (or both), in feed order. Empty if every one of
/// them is shared.
fn collect(visits: &[TripStop], placements: &[Placement], side: Placement) -> Vec<TripStop> {
    let mine: Vec<(&TripStop, Placement)> = visits
        .iter()
        .zip(placements.iter().copied())
        .filter(|(_, p)| *p == side || *p == Placement::Both)
        .collect();
    if mine.iter().all(|(_, p)| *p == Placement::Both) {
        return Vec::new();
    }
    mine.into_iter().map(|(v, _)| v.clone()).collect()
}

/// Place every visit, or return the index of the first visit no placement
/// can accommodate.
fn place_visits(spec: &RouteTripSpec, visits: &[TripStop]) -> Result<Vec<Placement>, usize> {
    let [first, second] = spec.directions();
    let mut layers: Vec<BTreeMap<Progress, Step>> = Vec::with_capacity(visits.len());
    let mut frontier: BTreeMap<Progress, usize> = BTreeMap::from([((0, 0), 0)]);

    for (i, visit) in visits.iter().enumerate() {
        let mut layer: BTreeMap<Progress, Step> = BTreeMap::new();
        for (&(pa, pb), &score) in &frontier {
            let in_first = first.position_from(&visit.stop_id, pa);
            let in_second = second.position_from(&visit.stop_id, pb);

            let mut options = Vec::with_capacity(3);
            if let Some(a) = in_first {
                options.push(((a + 1, pb), score + 1, Placement::First));
            }
            if let Some(b) = in_second {
                options.push(((pa, b + 1), score + 1, Placement::Second));
            }
            if let (Some(a), Some(b)) = (in_first, in_second) {
                options.push(((a + 1, b + 1), score + 2, Placement::Both));
            }

            for (next, score, placement) in options {
                let step = Step {
                    score,
                    prev: (pa, pb),
                    placement,
                };
                layer
                    .entry(next)
                    .and_modify(|best| {
                        if score > best.score {
                            *best = step;
                        }
                    })
                    .or_insert(step);
            }
        }

        if layer.is_empty() {
            return Err(i);
        }
        frontier = layer.iter().map(|(&p, s)| (p, s.score)).collect();
        layers.push(layer);
    }

    // First state with the best score
    let mut state = (0, 0);
    let mut best = None;
    for (&p, &score) in &frontier {
        if best.is_none_or(|b| score > b) {
            best = Some(score);
            state = p;
        }
    }

    let mut placements = vec![Placement::First; visits.len()];
    for (i, layer) in layers.iter().enumerate().rev() {
        let Some(step) = layer.get(&state) else {
            break;
        };
        placements[i] = step.placement;
        state = step.prev;
    }
    Ok(placements)
}
