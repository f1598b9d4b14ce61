//! Useful-service filtering.
//!
//! The pipeline works out, once per run, which service IDs are worth
//! keeping. Trips and calendar rows on any other service are dropped.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::RawTrip;

/// Read-only set of useful service IDs, shared by reference.
///
/// No set at all means "keep everything". A present but empty set means
/// nothing in the feed is useful, and the run can be skipped.
#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    useful: Option<Arc<HashSet<String>>>,
}

impl ServiceFilter {
    /// A filter that keeps every service.
    pub fn keep_all() -> Self {
        Self::default()
    }

    pub fn new(useful: Arc<HashSet<String>>) -> Self {
        Self {
            useful: Some(useful),
        }
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Arc::new(ids.into_iter().map(Into::into).collect()))
    }

    /// True if a set was supplied and it is empty.
    pub fn excluding_all(&self) -> bool {
        self.useful.as_ref().is_some_and(|ids| ids.is_empty())
    }

    pub fn is_useful(&self, service_id: &str) -> bool {
        self.useful
            .as_ref()
            .is_none_or(|ids| ids.contains(service_id))
    }

    pub fn exclude_trip(&self, trip: &RawTrip) -> bool {
        !self.is_useful(&trip.service_id)
    }

    pub fn exclude_calendar(&self, service_id: &str) -> bool {
        !self.is_useful(service_id)
    }

    pub fn exclude_calendar_date(&self, service_id: &str) -> bool {
        !self.is_useful(service_id)
    }
}
