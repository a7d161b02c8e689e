//! Persistence seams used by the scheduler, plus an in-memory implementation and CSV import.
//!
//! The scheduler only talks to the traits below; a relational backend would implement them
//! the same way [`InMemoryStore`] does.

mod import;
mod memory;

pub use import::{read_team_registrations_csv, read_venues_csv, RegistrationRow};
pub use memory::InMemoryStore;

use crate::models::{
    Fixture, GroupLabel, NewFixture, StoreError, TeamId, TeamRegistration, Tournament,
    TournamentId, Venue,
};
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Read access to tournaments, registrations, and the venue pool.
pub trait TournamentCatalog {
    fn find_tournament(&self, id: TournamentId) -> Result<Option<Tournament>, StoreError>;

    /// Registrations of one group, in registration order.
    fn find_registrations(
        &self,
        tournament_id: TournamentId,
        group: GroupLabel,
    ) -> Result<Vec<TeamRegistration>, StoreError>;

    /// Every venue, in pool order.
    fn find_all_venues(&self) -> Result<Vec<Venue>, StoreError>;

    fn find_team_group_map(
        &self,
        tournament_id: TournamentId,
    ) -> Result<HashMap<TeamId, GroupLabel>, StoreError>;
}

/// Fixture persistence.
pub trait FixtureStore {
    /// Whether a fixture with exactly this ordered team pair and time exists (in any tournament).
    fn fixture_exists(
        &self,
        team_a: TeamId,
        team_b: TeamId,
        at: NaiveDateTime,
    ) -> Result<bool, StoreError>;

    /// Persist a fixture and return it with its assigned id.
    fn save_fixture(&mut self, fixture: NewFixture) -> Result<Fixture, StoreError>;

    fn save_tournament(&mut self, tournament: &Tournament) -> Result<(), StoreError>;

    fn find_fixtures_by_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Vec<Fixture>, StoreError>;
}

/// All-or-nothing unit of work.
pub trait Transactional {
    /// Run `f` against the store. If it returns `Err`, every write it made is discarded.
    fn in_transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>;
}

/// Everything a scheduling run needs from persistence.
pub trait Store: TournamentCatalog + FixtureStore + Transactional {}

impl<S: TournamentCatalog + FixtureStore + Transactional> Store for S {}
