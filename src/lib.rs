//! Cricket tournament fixtures: library with models, scheduling logic, and storage.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use config::Config;
pub use logic::{
    advance_by_interval, classify_by_stage_and_group, find_unused_venue, fixture_group,
    list_fixture_summaries, round_robin_pairings, schedule_group, schedule_group_stage,
    InvalidPlayWindow, PlayWindow, SchedulingRun, StageBuckets, VenueAllocator,
};
pub use models::{
    Fixture, FixtureId, GroupLabel, KnockoutStage, MatchStage, MatchSummary, NewFixture,
    ScheduleError, StoreError, Team, TeamId, TeamRegistration, Tournament, TournamentId,
    TournamentStatus, UnknownGroupLabel, Venue, VenueId,
};
pub use store::{FixtureStore, InMemoryStore, Store, TournamentCatalog, Transactional};
