//! Venue (ground) a fixture is played at.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a venue.
pub type VenueId = Uuid;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: VenueId,
    pub country: String,
    pub ground: String,
}

impl Venue {
    pub fn new(country: impl Into<String>, ground: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            country: country.into(),
            ground: ground.into(),
        }
    }

    /// Location line shown in match summaries, e.g. "India - Eden Gardens".
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.country, self.ground)
    }
}
