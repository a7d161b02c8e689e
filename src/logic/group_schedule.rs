//! Group stage: round-robin fixture scheduling for one group.

use crate::logic::pairing::round_robin_pairings;
use crate::logic::time_slot::{advance_by_interval, PlayWindow};
use crate::logic::venue::VenueAllocator;
use crate::models::{
    GroupLabel, MatchStage, MatchSummary, NewFixture, ScheduleError, Team, Tournament,
};
use crate::store::FixtureStore;
use chrono::{Duration, NaiveDateTime};

/// State threaded through one scheduling run: shared by both groups, dropped when the run ends.
#[derive(Debug)]
pub struct SchedulingRun {
    pub window: PlayWindow,
    pub venues: VenueAllocator,
    /// Fixtures created so far in this run.
    pub scheduled: usize,
}

impl SchedulingRun {
    pub fn new(window: PlayWindow, venues: VenueAllocator) -> Self {
        Self {
            window,
            venues,
            scheduled: 0,
        }
    }
}

/// Schedule every pairing of `teams` starting at `start`, persisting one fixture per pairing.
///
/// For each pairing in round-robin order:
/// 1. Move the candidate time into the play window.
/// 2. If the store already holds this (team A, team B, time), skip the pairing: no venue or time is used.
/// 3. Take the next unused venue; running out aborts with `VenueExhausted`.
/// 4. Save the fixture and step the candidate time by the tournament's match interval.
///
/// A pairing whose candidate time lies past the last representable date aborts with
/// `ScheduleOutOfRange`. Stepping past it after the group's last fixture is not an error.
pub fn schedule_group<S: FixtureStore + ?Sized>(
    store: &mut S,
    run: &mut SchedulingRun,
    tournament: &Tournament,
    teams: &[Team],
    group: GroupLabel,
    start: NaiveDateTime,
) -> Result<Vec<MatchSummary>, ScheduleError> {
    let interval = Duration::from_std(tournament.match_interval).ok();
    // `None` once the candidate time has overflowed; `last` is the latest in-window candidate.
    let mut next = Some(start);
    let mut last = start;
    let mut summaries = Vec::new();

    for (team_a, team_b) in round_robin_pairings(teams) {
        let at = next
            .and_then(|t| run.window.next_playable_slot(t))
            .ok_or(ScheduleError::ScheduleOutOfRange { from: last })?;
        next = Some(at);
        last = at;

        if store.fixture_exists(team_a.id, team_b.id, at)? {
            log::debug!(
                "{group}: {} vs {} already scheduled at {at}, skipping",
                team_a.name,
                team_b.name
            );
            continue;
        }

        let venue = match run.venues.allocate() {
            Some(v) => v,
            None => {
                log::warn!(
                    "{group}: all {} venue(s) in use after {} fixture(s) in tournament {}",
                    run.venues.used().len(),
                    run.scheduled,
                    tournament.id
                );
                return Err(ScheduleError::VenueExhausted {
                    scheduled: run.scheduled,
                });
            }
        };

        let fixture = store.save_fixture(NewFixture {
            team_a: team_a.clone(),
            team_b: team_b.clone(),
            scheduled_at: at,
            venue,
            tournament_id: tournament.id,
            match_type: tournament.match_type().to_string(),
            stage: MatchStage::Group(group),
            live: false,
        })?;
        run.scheduled += 1;
        summaries.push(fixture.summary());

        next = interval.and_then(|i| advance_by_interval(at, i));
    }

    log::info!(
        "{group}: scheduled {} fixture(s) for {} team(s)",
        summaries.len(),
        teams.len()
    );
    Ok(summaries)
}
