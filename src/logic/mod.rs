//! Scheduling logic: pairings, play window, venues, group and tournament scheduling, classification.

mod classifier;
mod group_schedule;
mod pairing;
mod time_slot;
mod tournament_schedule;
mod venue;

pub use classifier::{
    classify_by_stage_and_group, fixture_group, list_fixture_summaries, StageBuckets,
};
pub use group_schedule::{schedule_group, SchedulingRun};
pub use pairing::round_robin_pairings;
pub use time_slot::{advance_by_interval, InvalidPlayWindow, PlayWindow};
pub use tournament_schedule::schedule_group_stage;
pub use venue::{find_unused_venue, VenueAllocator};
