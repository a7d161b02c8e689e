//! Fixture (a scheduled match), its stage, and the read-only MatchSummary projection.

use crate::models::team::{GroupLabel, Team};
use crate::models::tournament::TournamentId;
use crate::models::venue::Venue;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a fixture, assigned by the store on save.
pub type FixtureId = Uuid;

/// Knockout stages the classifier buckets fixtures into.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnockoutStage {
    Playoffs,
    Semifinals,
    Finals,
}

impl KnockoutStage {
    pub const ALL: [KnockoutStage; 3] = [
        KnockoutStage::Playoffs,
        KnockoutStage::Semifinals,
        KnockoutStage::Finals,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            KnockoutStage::Playoffs => "playoffs",
            KnockoutStage::Semifinals => "semifinals",
            KnockoutStage::Finals => "finals",
        }
    }

    /// Exact, case-sensitive match against the three stage labels.
    pub fn from_label(label: &str) -> Option<Self> {
        KnockoutStage::ALL.into_iter().find(|s| s.as_str() == label)
    }
}

impl fmt::Display for KnockoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stage a fixture belongs to: a group of the group stage, or a knockout round.
///
/// Serialized as its label (`"Group A"`, `"playoffs"`, ...).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum MatchStage {
    Group(GroupLabel),
    Knockout(KnockoutStage),
}

impl fmt::Display for MatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStage::Group(g) => fmt::Display::fmt(g, f),
            MatchStage::Knockout(k) => fmt::Display::fmt(k, f),
        }
    }
}

impl From<MatchStage> for String {
    fn from(stage: MatchStage) -> Self {
        stage.to_string()
    }
}

impl TryFrom<String> for MatchStage {
    type Error = String;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        if let Ok(group) = label.parse::<GroupLabel>() {
            return Ok(MatchStage::Group(group));
        }
        KnockoutStage::from_label(&label)
            .map(MatchStage::Knockout)
            .ok_or_else(|| format!("Unknown match stage '{label}'"))
    }
}

/// A fixture before the store has assigned it an id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewFixture {
    pub team_a: Team,
    pub team_b: Team,
    pub scheduled_at: NaiveDateTime,
    pub venue: Venue,
    pub tournament_id: TournamentId,
    /// Free-form label; the tournament name for group-stage fixtures.
    pub match_type: String,
    pub stage: MatchStage,
    pub live: bool,
}

impl NewFixture {
    pub fn with_id(self, id: FixtureId) -> Fixture {
        Fixture {
            id,
            team_a: self.team_a,
            team_b: self.team_b,
            scheduled_at: self.scheduled_at,
            venue: self.venue,
            tournament_id: self.tournament_id,
            match_type: self.match_type,
            stage: self.stage,
            live: self.live,
        }
    }
}

/// A persisted match between two teams at a given time and venue.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    pub team_a: Team,
    pub team_b: Team,
    pub scheduled_at: NaiveDateTime,
    pub venue: Venue,
    pub tournament_id: TournamentId,
    pub match_type: String,
    pub stage: MatchStage,
    pub live: bool,
}

impl Fixture {
    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            match_id: self.id,
            team_a: self.team_a.name.clone(),
            team_b: self.team_b.name.clone(),
            match_date_time: self.scheduled_at,
            location: self.venue.display_name(),
            match_type: self.match_type.clone(),
            match_stage: self.stage,
            live: self.live,
        }
    }
}

/// Flattened view of a fixture with names resolved (for API responses).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: FixtureId,
    pub team_a: String,
    pub team_b: String,
    pub match_date_time: NaiveDateTime,
    /// "country - ground".
    pub location: String,
    pub match_type: String,
    pub match_stage: MatchStage,
    pub live: bool,
}
