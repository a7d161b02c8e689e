//! In-memory store: catalog, fixtures, and snapshot-based transactions.

use super::{FixtureStore, RegistrationRow, TournamentCatalog, Transactional};
use crate::models::{
    Fixture, GroupLabel, NewFixture, StoreError, Team, TeamId, TeamRegistration, Tournament,
    TournamentId, Venue,
};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use uuid::Uuid;

/// Whole-world state held in memory. Cloned wholesale to snapshot a transaction.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    tournaments: HashMap<TournamentId, Tournament>,
    teams: HashMap<TeamId, Team>,
    /// Registration order is the order teams are paired in.
    registrations: Vec<TeamRegistration>,
    /// Pool order is the order venues are allocated in.
    venues: Vec<Venue>,
    fixtures: Vec<Fixture>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_tournament(&mut self, tournament: Tournament) -> TournamentId {
        let id = tournament.id;
        self.tournaments.insert(id, tournament);
        id
    }

    pub fn add_team(&mut self, team: Team) -> TeamId {
        let id = team.id;
        self.teams.insert(id, team);
        id
    }

    /// Register a known team into a tournament group. A team may only be registered once per tournament.
    pub fn register_team(
        &mut self,
        tournament_id: TournamentId,
        team_id: TeamId,
        group: GroupLabel,
    ) -> Result<TeamRegistration, StoreError> {
        if !self.tournaments.contains_key(&tournament_id) {
            return Err(StoreError::UnknownTournament(tournament_id));
        }
        let team = self
            .teams
            .get(&team_id)
            .cloned()
            .ok_or(StoreError::UnknownTeam(team_id))?;
        let already = self
            .registrations
            .iter()
            .any(|r| r.tournament_id == tournament_id && r.team.id == team_id);
        if already {
            return Err(StoreError::AlreadyRegistered {
                team_id,
                tournament_id,
            });
        }
        let registration = TeamRegistration {
            team,
            tournament_id,
            group,
        };
        self.registrations.push(registration.clone());
        Ok(registration)
    }

    /// Create a team per row and register it. Either every row is applied or none is.
    pub fn import_registrations(
        &mut self,
        tournament_id: TournamentId,
        rows: Vec<RegistrationRow>,
    ) -> Result<Vec<TeamRegistration>, StoreError> {
        self.in_transaction(|store: &mut Self| -> Result<Vec<TeamRegistration>, StoreError> {
            rows.into_iter()
                .map(|row| {
                    let team_id = store.add_team(Team::new(row.team));
                    store.register_team(tournament_id, team_id, row.group)
                })
                .collect()
        })
    }

    pub fn add_venue(&mut self, venue: Venue) {
        self.venues.push(venue);
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }
}

impl TournamentCatalog for InMemoryStore {
    fn find_tournament(&self, id: TournamentId) -> Result<Option<Tournament>, StoreError> {
        Ok(self.tournaments.get(&id).cloned())
    }

    fn find_registrations(
        &self,
        tournament_id: TournamentId,
        group: GroupLabel,
    ) -> Result<Vec<TeamRegistration>, StoreError> {
        Ok(self
            .registrations
            .iter()
            .filter(|r| r.tournament_id == tournament_id && r.group == group)
            .cloned()
            .collect())
    }

    fn find_all_venues(&self) -> Result<Vec<Venue>, StoreError> {
        Ok(self.venues.clone())
    }

    fn find_team_group_map(
        &self,
        tournament_id: TournamentId,
    ) -> Result<HashMap<TeamId, GroupLabel>, StoreError> {
        Ok(self
            .registrations
            .iter()
            .filter(|r| r.tournament_id == tournament_id)
            .map(|r| (r.team.id, r.group))
            .collect())
    }
}

impl FixtureStore for InMemoryStore {
    fn fixture_exists(
        &self,
        team_a: TeamId,
        team_b: TeamId,
        at: NaiveDateTime,
    ) -> Result<bool, StoreError> {
        Ok(self
            .fixtures
            .iter()
            .any(|f| f.team_a.id == team_a && f.team_b.id == team_b && f.scheduled_at == at))
    }

    fn save_fixture(&mut self, fixture: NewFixture) -> Result<Fixture, StoreError> {
        if !self.tournaments.contains_key(&fixture.tournament_id) {
            return Err(StoreError::ConstraintViolation(format!(
                "fixture references unknown tournament {}",
                fixture.tournament_id
            )));
        }
        let saved = fixture.with_id(Uuid::new_v4());
        self.fixtures.push(saved.clone());
        Ok(saved)
    }

    fn save_tournament(&mut self, tournament: &Tournament) -> Result<(), StoreError> {
        match self.tournaments.get_mut(&tournament.id) {
            Some(existing) => {
                *existing = tournament.clone();
                Ok(())
            }
            None => Err(StoreError::UnknownTournament(tournament.id)),
        }
    }

    fn find_fixtures_by_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Vec<Fixture>, StoreError> {
        Ok(self
            .fixtures
            .iter()
            .filter(|f| f.tournament_id == tournament_id)
            .cloned()
            .collect())
    }
}

impl Transactional for InMemoryStore {
    fn in_transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
    {
        let snapshot = self.clone();
        let result = f(self);
        if result.is_err() {
            *self = snapshot;
        }
        result
    }
}
