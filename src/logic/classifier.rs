//! Read views over a tournament's fixtures: the date-ordered list and the knockout grouping.

use crate::models::{
    GroupLabel, KnockoutStage, MatchSummary, ScheduleError, TeamId, TournamentId,
};
use crate::store::{FixtureStore, TournamentCatalog};
use std::collections::{BTreeMap, HashMap};

/// Summaries per knockout stage, then per group.
pub type StageBuckets = BTreeMap<KnockoutStage, BTreeMap<GroupLabel, Vec<MatchSummary>>>;

/// Group bucket of a fixture: Group A if team A is registered in Group A, otherwise Group B.
///
/// Team B's group is not consulted, so a cross-group fixture follows team A.
pub fn fixture_group(groups: &HashMap<TeamId, GroupLabel>, team_a: TeamId) -> GroupLabel {
    match groups.get(&team_a) {
        Some(GroupLabel::A) => GroupLabel::A,
        _ => GroupLabel::B,
    }
}

/// Every fixture of a tournament as a match summary, ordered by date (stable for equal times).
pub fn list_fixture_summaries<S: TournamentCatalog + FixtureStore + ?Sized>(
    store: &S,
    tournament_id: TournamentId,
) -> Result<Vec<MatchSummary>, ScheduleError> {
    if store.find_tournament(tournament_id)?.is_none() {
        return Err(ScheduleError::TournamentNotFound(tournament_id));
    }
    let mut summaries: Vec<MatchSummary> = store
        .find_fixtures_by_tournament(tournament_id)?
        .iter()
        .map(|f| f.summary())
        .collect();
    summaries.sort_by_key(|s| s.match_date_time);
    Ok(summaries)
}

/// Group a tournament's fixtures by knockout stage (matched on match type) and group.
///
/// All three stage keys are always present; a group bucket exists only once it has a fixture.
/// Fixtures whose match type is not a knockout stage label are left out.
pub fn classify_by_stage_and_group<S: TournamentCatalog + FixtureStore + ?Sized>(
    store: &S,
    tournament_id: TournamentId,
) -> Result<StageBuckets, ScheduleError> {
    if store.find_tournament(tournament_id)?.is_none() {
        return Err(ScheduleError::TournamentNotFound(tournament_id));
    }

    let mut buckets: StageBuckets = KnockoutStage::ALL
        .into_iter()
        .map(|stage| (stage, BTreeMap::new()))
        .collect();

    let groups = store.find_team_group_map(tournament_id)?;
    let fixtures = store.find_fixtures_by_tournament(tournament_id)?;
    let mut dropped = 0usize;

    for fixture in &fixtures {
        let Some(stage) = KnockoutStage::from_label(&fixture.match_type) else {
            dropped += 1;
            continue;
        };
        let group = fixture_group(&groups, fixture.team_a.id);
        buckets
            .entry(stage)
            .or_default()
            .entry(group)
            .or_default()
            .push(fixture.summary());
    }

    log::debug!(
        "Classified {} of {} fixture(s) of tournament {tournament_id}",
        fixtures.len() - dropped,
        fixtures.len()
    );
    Ok(buckets)
}

