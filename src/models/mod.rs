//! Data structures for cricket tournament scheduling: teams, venues, tournaments, fixtures.

mod error;
mod fixture;
mod team;
mod tournament;
mod venue;

pub use error::{ScheduleError, StoreError};
pub use fixture::{Fixture, FixtureId, KnockoutStage, MatchStage, MatchSummary, NewFixture};
pub use team::{GroupLabel, Team, TeamId, TeamRegistration, UnknownGroupLabel};
pub use tournament::{Tournament, TournamentId, TournamentStatus};
pub use venue::{Venue, VenueId};
