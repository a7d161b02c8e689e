//! Tournament and TournamentStatus.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Lifecycle of a tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentStatus {
    /// Created, teams being registered; no fixtures yet.
    #[default]
    Scheduled,
    /// Group stage fixtures have been scheduled.
    Ongoing,
    /// All matches played.
    Completed,
}

/// A tournament: its name doubles as the match type of its group-stage fixtures.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Date and time Group A's first fixture is scheduled from.
    pub start_date: NaiveDateTime,
    /// Gap between two consecutively scheduled fixtures of one group.
    pub match_interval: Duration,
    pub status: TournamentStatus,
}

impl Tournament {
    /// Create a new tournament in `Scheduled` status.
    pub fn new(name: impl Into<String>, start_date: NaiveDateTime, match_interval: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_date,
            match_interval,
            status: TournamentStatus::Scheduled,
        }
    }

    /// Label stored as the match type of every group-stage fixture.
    pub fn match_type(&self) -> &str {
        &self.name
    }
}
