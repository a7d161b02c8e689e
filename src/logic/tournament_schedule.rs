//! Group stage scheduling for a whole tournament (both groups, one transaction).

use crate::logic::group_schedule::{schedule_group, SchedulingRun};
use crate::logic::time_slot::PlayWindow;
use crate::logic::venue::VenueAllocator;
use crate::models::{
    GroupLabel, MatchSummary, ScheduleError, Team, TournamentId, TournamentStatus,
};
use crate::store::{FixtureStore, Store, TournamentCatalog, Transactional};
use chrono::Duration;

/// Schedule the group stage of a tournament and mark it `Ongoing`.
///
/// Group A starts at the tournament start date; Group B starts exactly one day after that,
/// regardless of how long Group A runs. Venues are unique across both groups. Group A's
/// summaries come first in the result.
///
/// Runs as one transaction: on any error nothing is saved and the status is unchanged.
pub fn schedule_group_stage<S: Store>(
    store: &mut S,
    tournament_id: TournamentId,
    window: PlayWindow,
) -> Result<Vec<MatchSummary>, ScheduleError> {
    store.in_transaction(|store: &mut S| -> Result<Vec<MatchSummary>, ScheduleError> {
        let mut tournament = store
            .find_tournament(tournament_id)?
            .ok_or(ScheduleError::TournamentNotFound(tournament_id))?;

        let group_a = group_teams(store, tournament_id, GroupLabel::A)?;
        let group_b = group_teams(store, tournament_id, GroupLabel::B)?;

        let venues = VenueAllocator::new(store.find_all_venues()?);
        if venues.is_empty() {
            return Err(ScheduleError::NoVenuesAvailable);
        }

        log::info!(
            "Scheduling group stage of '{}' ({} + {} teams)",
            tournament.name,
            group_a.len(),
            group_b.len()
        );

        let mut run = SchedulingRun::new(window, venues);
        let group_a_start = tournament.start_date;
        let mut summaries = schedule_group(
            store,
            &mut run,
            &tournament,
            &group_a,
            GroupLabel::A,
            group_a_start,
        )?;

        let group_b_start = group_a_start
            .checked_add_signed(Duration::days(1))
            .ok_or(ScheduleError::ScheduleOutOfRange {
                from: group_a_start,
            })?;
        summaries.extend(schedule_group(
            store,
            &mut run,
            &tournament,
            &group_b,
            GroupLabel::B,
            group_b_start,
        )?);

        tournament.status = TournamentStatus::Ongoing;
        store.save_tournament(&tournament)?;
        log::info!(
            "Tournament '{}' is now ongoing with {} new fixture(s)",
            tournament.name,
            summaries.len()
        );

        Ok(summaries)
    })
}

fn group_teams<S: TournamentCatalog>(
    store: &S,
    tournament_id: TournamentId,
    group: GroupLabel,
) -> Result<Vec<Team>, ScheduleError> {
    Ok(store
        .find_registrations(tournament_id, group)?
        .into_iter()
        .map(|r| r.team)
        .collect())
}
