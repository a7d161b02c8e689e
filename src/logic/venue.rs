//! Venue allocation: each venue hosts at most one fixture per scheduling run.

use crate::models::{Venue, VenueId};
use std::collections::HashSet;

/// First venue in pool order whose id is not in `used`.
pub fn find_unused_venue<'a>(pool: &'a [Venue], used: &HashSet<VenueId>) -> Option<&'a Venue> {
    pool.iter().find(|v| !used.contains(&v.id))
}

/// Venue pool plus the ids handed out so far in this run.
#[derive(Debug)]
pub struct VenueAllocator {
    pool: Vec<Venue>,
    used: HashSet<VenueId>,
}

impl VenueAllocator {
    pub fn new(pool: Vec<Venue>) -> Self {
        Self {
            pool,
            used: HashSet::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Next unused venue, marked used. `None` once the pool is exhausted.
    pub fn allocate(&mut self) -> Option<Venue> {
        let venue = find_unused_venue(&self.pool, &self.used)?.clone();
        self.used.insert(venue.id);
        Some(venue)
    }

    pub fn used(&self) -> &HashSet<VenueId> {
        &self.used
    }
}
