//! Errors raised by the store and by scheduling runs.

use crate::models::team::TeamId;
use crate::models::tournament::TournamentId;
use chrono::NaiveDateTime;
use std::fmt;

/// Store-level failures (lookups of unknown references, constraint violations, bad imports).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    UnknownTournament(TournamentId),
    UnknownTeam(TeamId),
    /// A team holds at most one registration per tournament.
    AlreadyRegistered {
        team_id: TeamId,
        tournament_id: TournamentId,
    },
    ConstraintViolation(String),
    /// CSV input could not be read or contained an invalid row.
    Import(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::UnknownTournament(id) => write!(f, "Tournament {id} not found"),
            StoreError::UnknownTeam(id) => write!(f, "Team {id} not found"),
            StoreError::AlreadyRegistered { team_id, tournament_id } => write!(
                f,
                "Team {team_id} is already registered in tournament {tournament_id}"
            ),
            StoreError::ConstraintViolation(msg) => write!(f, "Constraint violation: {msg}"),
            StoreError::Import(msg) => write!(f, "Import failed: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Errors that abort a scheduling run. Skipped duplicate pairings are not errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScheduleError {
    /// The tournament id does not exist.
    TournamentNotFound(TournamentId),
    /// The venue catalog was empty before any fixture was scheduled.
    NoVenuesAvailable,
    /// Every venue has been used by this run; `scheduled` fixtures had been staged.
    VenueExhausted { scheduled: usize },
    /// The next candidate time after `from` falls past the last representable date.
    ScheduleOutOfRange { from: NaiveDateTime },
    Store(StoreError),
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::TournamentNotFound(id) => write!(f, "Tournament {id} not found"),
            ScheduleError::NoVenuesAvailable => {
                write!(f, "No venues available for scheduling matches")
            }
            ScheduleError::VenueExhausted { scheduled } => write!(
                f,
                "Not enough unique venues available for all matches (ran out after {scheduled})"
            ),
            ScheduleError::ScheduleOutOfRange { from } => {
                write!(f, "Cannot schedule a fixture after {from}: date out of range")
            }
            ScheduleError::Store(e) => write!(f, "Store error: {e}"),
        }
    }
}

impl std::error::Error for ScheduleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScheduleError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ScheduleError {
    fn from(e: StoreError) -> Self {
        ScheduleError::Store(e)
    }
}
