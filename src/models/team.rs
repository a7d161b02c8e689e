//! Team, TeamRegistration, and GroupLabel.

use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// A team that can be registered into tournaments. Immutable once created.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Group a team plays its group-stage matches in.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum GroupLabel {
    #[serde(rename = "Group A")]
    A,
    #[serde(rename = "Group B")]
    B,
}

impl GroupLabel {
    pub const ALL: [GroupLabel; 2] = [GroupLabel::A, GroupLabel::B];

    pub fn as_str(self) -> &'static str {
        match self {
            GroupLabel::A => "Group A",
            GroupLabel::B => "Group B",
        }
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label that is neither `"Group A"` nor `"Group B"`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownGroupLabel(pub String);

impl fmt::Display for UnknownGroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown group label '{}'", self.0)
    }
}

impl std::error::Error for UnknownGroupLabel {}

impl FromStr for GroupLabel {
    type Err = UnknownGroupLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GroupLabel::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownGroupLabel(s.to_string()))
    }
}

/// A team entered into one tournament, in exactly one group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamRegistration {
    pub team: Team,
    pub tournament_id: TournamentId,
    pub group: GroupLabel,
}
