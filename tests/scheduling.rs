//! Integration tests for group stage scheduling: times, venues, duplicates, and rollback.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use cricket_fixtures_web::{
    list_fixture_summaries, schedule_group_stage, Fixture, FixtureStore, GroupLabel,
    InMemoryStore, MatchStage, NewFixture, PlayWindow, ScheduleError, StoreError, Team, TeamId,
    TeamRegistration, TournamentCatalog, Tournament, TournamentId, TournamentStatus,
    Transactional, Venue,
};
use std::collections::{HashMap, HashSet};
use std::time::Duration as StdDuration;
use uuid::Uuid;

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// Store with one tournament, `group_a` + `group_b` registered teams and `venues` venues V1..Vn.
fn setup(
    start: NaiveDateTime,
    interval_hours: u64,
    group_a: usize,
    group_b: usize,
    venues: usize,
) -> (InMemoryStore, TournamentId) {
    setup_with_interval(start, StdDuration::from_secs(interval_hours * 3600), group_a, group_b, venues)
}

fn setup_with_interval(
    start: NaiveDateTime,
    interval: StdDuration,
    group_a: usize,
    group_b: usize,
    venues: usize,
) -> (InMemoryStore, TournamentId) {
    let mut store = InMemoryStore::new();
    let tid = store.insert_tournament(Tournament::new("Premier Cup", start, interval));
    for (prefix, count, group) in [("A", group_a, GroupLabel::A), ("B", group_b, GroupLabel::B)] {
        for i in 1..=count {
            let team = store.add_team(Team::new(format!("{prefix}{i}")));
            store.register_team(tid, team, group).unwrap();
        }
    }
    for i in 1..=venues {
        store.add_venue(Venue::new("India", format!("V{i}")));
    }
    (store, tid)
}

fn status(store: &InMemoryStore, tid: TournamentId) -> TournamentStatus {
    store.find_tournament(tid).unwrap().unwrap().status
}

#[test]
fn group_a_follows_interval_and_pool_order() {
    let (mut store, tid) = setup(at(1, 9), 2, 3, 0, 5);
    let summaries = schedule_group_stage(&mut store, tid, PlayWindow::default()).unwrap();

    let times: Vec<_> = summaries.iter().map(|s| s.match_date_time).collect();
    assert_eq!(times, [at(1, 9), at(1, 11), at(1, 13)]);
    let locations: Vec<_> = summaries.iter().map(|s| s.location.as_str()).collect();
    assert_eq!(locations, ["India - V1", "India - V2", "India - V3"]);
    let pairs: Vec<_> = summaries
        .iter()
        .map(|s| (s.team_a.as_str(), s.team_b.as_str()))
        .collect();
    assert_eq!(pairs, [("A1", "A2"), ("A1", "A3"), ("A2", "A3")]);
}

#[test]
fn group_b_starts_one_day_after_tournament_start() {
    let (mut store, tid) = setup(at(1, 9), 2, 3, 2, 5);
    let summaries = schedule_group_stage(&mut store, tid, PlayWindow::default()).unwrap();

    assert_eq!(summaries.len(), 4);
    let group_b: Vec<_> = summaries
        .iter()
        .filter(|s| s.match_stage == MatchStage::Group(GroupLabel::B))
        .collect();
    assert_eq!(group_b.len(), 1);
    assert_eq!(group_b[0].match_date_time, at(2, 9));
    assert_eq!(group_b[0].location, "India - V4");
    // Group A entries come first.
    assert_eq!(summaries[3].match_stage, MatchStage::Group(GroupLabel::B));
}

#[test]
fn group_b_offset_ignores_how_long_group_a_ran() {
    // 6 teams, 4h apart: Group A runs well past the second day.
    let (mut store, tid) = setup(at(1, 9), 4, 6, 3, 30);
    let summaries = schedule_group_stage(&mut store, tid, PlayWindow::default()).unwrap();

    let first_a = summaries[0].match_date_time;
    let first_b = summaries
        .iter()
        .find(|s| s.match_stage == MatchStage::Group(GroupLabel::B))
        .unwrap()
        .match_date_time;
    assert_eq!(first_b, at(2, 9));
    assert!(first_b >= first_a + Duration::days(1));
    assert!(summaries
        .iter()
        .filter(|s| s.match_stage == MatchStage::Group(GroupLabel::A))
        .any(|s| s.match_date_time > first_b));
}

#[test]
fn night_start_is_pushed_to_next_morning() {
    let (mut store, tid) = setup(at(1, 23), 2, 2, 0, 5);
    let summaries = schedule_group_stage(&mut store, tid, PlayWindow::default()).unwrap();
    assert_eq!(summaries[0].match_date_time, at(2, 10));
}

#[test]
fn every_fixture_time_lies_in_play_window() {
    let window = PlayWindow::default();
    let (mut store, tid) = setup(at(1, 19), 2, 5, 4, 20);
    let summaries = schedule_group_stage(&mut store, tid, window).unwrap();

    assert_eq!(summaries.len(), 10 + 6);
    for s in &summaries {
        assert!(window.contains(s.match_date_time), "{} outside window", s.match_date_time);
    }
    // 19:00, then 21:00 rolls over to 10:00 the next day.
    assert_eq!(summaries[0].match_date_time, at(1, 19));
    assert_eq!(summaries[1].match_date_time, at(2, 10));
}

#[test]
fn venues_are_unique_across_the_run() {
    let (mut store, tid) = setup(at(1, 9), 2, 4, 4, 12);
    let summaries = schedule_group_stage(&mut store, tid, PlayWindow::default()).unwrap();

    assert_eq!(summaries.len(), 12);
    let venue_ids: HashSet<_> = store.fixtures().iter().map(|f| f.venue.id).collect();
    assert_eq!(venue_ids.len(), 12);
}

#[test]
fn scheduled_fixture_carries_tournament_label_and_group_stage() {
    let (mut store, tid) = setup(at(1, 9), 2, 2, 0, 1);
    let summaries = schedule_group_stage(&mut store, tid, PlayWindow::default()).unwrap();

    let fixture = &store.fixtures()[0];
    assert_eq!(fixture.match_type, "Premier Cup");
    assert_eq!(fixture.stage, MatchStage::Group(GroupLabel::A));
    assert_eq!(fixture.tournament_id, tid);
    assert!(!fixture.live);
    assert_eq!(summaries[0].match_id, fixture.id);
    assert_eq!(summaries[0], fixture.summary());
}

#[test]
fn marks_tournament_ongoing() {
    let (mut store, tid) = setup(at(1, 9), 2, 2, 2, 5);
    assert_eq!(status(&store, tid), TournamentStatus::Scheduled);
    schedule_group_stage(&mut store, tid, PlayWindow::default()).unwrap();
    assert_eq!(status(&store, tid), TournamentStatus::Ongoing);
}

#[test]
fn groups_with_fewer_than_two_teams_schedule_nothing() {
    let (mut store, tid) = setup(at(1, 9), 2, 1, 0, 5);
    let summaries = schedule_group_stage(&mut store, tid, PlayWindow::default()).unwrap();
    assert!(summaries.is_empty());
    assert!(store.fixtures().is_empty());
    assert_eq!(status(&store, tid), TournamentStatus::Ongoing);
}

#[test]
fn unknown_tournament_is_not_found() {
    let (mut store, _) = setup(at(1, 9), 2, 2, 0, 5);
    let missing = Uuid::new_v4();
    assert_eq!(
        schedule_group_stage(&mut store, missing, PlayWindow::default()),
        Err(ScheduleError::TournamentNotFound(missing))
    );
}

#[test]
fn empty_venue_catalog_fails_before_scheduling() {
    let (mut store, tid) = setup(at(1, 9), 2, 3, 3, 0);
    assert_eq!(
        schedule_group_stage(&mut store, tid, PlayWindow::default()),
        Err(ScheduleError::NoVenuesAvailable)
    );
    assert_eq!(status(&store, tid), TournamentStatus::Scheduled);
}

#[test]
fn venue_exhaustion_rolls_back_the_whole_run() {
    let (mut store, tid) = setup(at(1, 9), 2, 3, 0, 2);
    assert_eq!(
        schedule_group_stage(&mut store, tid, PlayWindow::default()),
        Err(ScheduleError::VenueExhausted { scheduled: 2 })
    );
    assert!(store.fixtures().is_empty());
    assert_eq!(status(&store, tid), TournamentStatus::Scheduled);
}

#[test]
fn exhaustion_in_group_b_also_discards_group_a() {
    let (mut store, tid) = setup(at(1, 9), 2, 3, 3, 4);
    assert_eq!(
        schedule_group_stage(&mut store, tid, PlayWindow::default()),
        Err(ScheduleError::VenueExhausted { scheduled: 4 })
    );
    assert!(store.find_fixtures_by_tournament(tid).unwrap().is_empty());
}

#[test]
fn existing_fixture_is_skipped_without_using_time_or_venue() {
    let (mut store, tid) = setup(at(1, 9), 2, 3, 0, 5);
    let regs = store.find_registrations(tid, GroupLabel::A).unwrap();
    let (a1, a2) = (regs[0].team.clone(), regs[1].team.clone());
    let elsewhere = Venue::new("England", "Lord's");
    store
        .save_fixture(NewFixture {
            team_a: a1,
            team_b: a2,
            scheduled_at: at(1, 9),
            venue: elsewhere,
            tournament_id: tid,
            match_type: "Premier Cup".into(),
            stage: MatchStage::Group(GroupLabel::A),
            live: false,
        })
        .unwrap();

    let summaries = schedule_group_stage(&mut store, tid, PlayWindow::default()).unwrap();

    let got: Vec<_> = summaries
        .iter()
        .map(|s| (s.team_a.as_str(), s.team_b.as_str(), s.match_date_time, s.location.as_str()))
        .collect();
    assert_eq!(
        got,
        [
            ("A1", "A3", at(1, 9), "India - V1"),
            ("A2", "A3", at(1, 11), "India - V2"),
        ]
    );
}

#[test]
fn rerun_never_duplicates_an_existing_pairing_and_time() {
    let (mut store, tid) = setup(at(1, 9), 2, 4, 3, 40);
    let first = schedule_group_stage(&mut store, tid, PlayWindow::default()).unwrap();
    let second = schedule_group_stage(&mut store, tid, PlayWindow::default()).unwrap();

    assert_eq!(first.len(), 9);
    // Each group's first pairing is skipped on the rerun.
    assert!(second.len() < first.len());
    let tuples: Vec<_> = store
        .fixtures()
        .iter()
        .map(|f| (f.team_a.id, f.team_b.id, f.scheduled_at))
        .collect();
    let unique: HashSet<_> = tuples.iter().collect();
    assert_eq!(unique.len(), tuples.len());
    assert_eq!(status(&store, tid), TournamentStatus::Ongoing);
}

#[test]
fn custom_play_window_is_respected() {
    let window = PlayWindow::new(8, 12, 9).unwrap();
    let (mut store, tid) = setup(at(1, 11), 1, 4, 0, 10);
    let summaries = schedule_group_stage(&mut store, tid, window).unwrap();

    let times: Vec<_> = summaries.iter().map(|s| s.match_date_time).collect();
    assert_eq!(
        times,
        [at(1, 11), at(1, 12), at(2, 9), at(2, 10), at(2, 11), at(2, 12)]
    );
}

#[test]
fn sub_minute_intervals_are_not_truncated() {
    let (mut store, tid) = setup_with_interval(at(1, 9), StdDuration::from_secs(90), 3, 0, 5);
    let summaries = schedule_group_stage(&mut store, tid, PlayWindow::default()).unwrap();
    let times: Vec<_> = summaries.iter().map(|s| s.match_date_time).collect();
    assert_eq!(
        times,
        [at(1, 9), at(1, 9) + Duration::seconds(90), at(1, 9) + Duration::seconds(180)]
    );

    let (mut store, tid) = setup_with_interval(at(1, 9), StdDuration::from_secs(30), 3, 0, 5);
    let summaries = schedule_group_stage(&mut store, tid, PlayWindow::default()).unwrap();
    let distinct: HashSet<_> = summaries.iter().map(|s| s.match_date_time).collect();
    assert_eq!(distinct.len(), 3);
}

/// Roughly 280,000 years: a valid chrono duration, but past the last date `NaiveDateTime` holds.
fn beyond_calendar() -> StdDuration {
    StdDuration::from_secs(280_000 * 365 * 86_400)
}

#[test]
fn interval_overflowing_the_calendar_fails_and_rolls_back() {
    let (mut store, tid) = setup_with_interval(at(1, 9), beyond_calendar(), 3, 0, 5);
    assert_eq!(
        schedule_group_stage(&mut store, tid, PlayWindow::default()),
        Err(ScheduleError::ScheduleOutOfRange { from: at(1, 9) })
    );
    assert!(store.fixtures().is_empty());
    assert_eq!(status(&store, tid), TournamentStatus::Scheduled);
}

#[test]
fn overflowing_step_after_a_group_last_fixture_is_harmless() {
    let (mut store, tid) = setup_with_interval(at(1, 9), beyond_calendar(), 2, 2, 5);
    let summaries = schedule_group_stage(&mut store, tid, PlayWindow::default()).unwrap();
    let times: Vec<_> = summaries.iter().map(|s| s.match_date_time).collect();
    assert_eq!(times, [at(1, 9), at(2, 9)]);
}

#[test]
fn night_start_on_the_last_representable_day_fails_cleanly() {
    let start = NaiveDateTime::MAX.date().and_hms_opt(22, 0, 0).unwrap();
    let (mut store, tid) = setup(start, 2, 2, 0, 5);
    assert_eq!(
        schedule_group_stage(&mut store, tid, PlayWindow::default()),
        Err(ScheduleError::ScheduleOutOfRange { from: start })
    );
    assert!(store.fixtures().is_empty());
    assert_eq!(status(&store, tid), TournamentStatus::Scheduled);
}

/// Wraps an `InMemoryStore` and rejects the `fail_on`-th fixture save (1-based).
struct FailingSaves {
    inner: InMemoryStore,
    fail_on: usize,
    saves: usize,
}

impl TournamentCatalog for FailingSaves {
    fn find_tournament(&self, id: TournamentId) -> Result<Option<Tournament>, StoreError> {
        self.inner.find_tournament(id)
    }

    fn find_registrations(
        &self,
        tournament_id: TournamentId,
        group: GroupLabel,
    ) -> Result<Vec<TeamRegistration>, StoreError> {
        self.inner.find_registrations(tournament_id, group)
    }

    fn find_all_venues(&self) -> Result<Vec<Venue>, StoreError> {
        self.inner.find_all_venues()
    }

    fn find_team_group_map(
        &self,
        tournament_id: TournamentId,
    ) -> Result<HashMap<TeamId, GroupLabel>, StoreError> {
        self.inner.find_team_group_map(tournament_id)
    }
}

impl FixtureStore for FailingSaves {
    fn fixture_exists(
        &self,
        team_a: TeamId,
        team_b: TeamId,
        at: NaiveDateTime,
    ) -> Result<bool, StoreError> {
        self.inner.fixture_exists(team_a, team_b, at)
    }

    fn save_fixture(&mut self, fixture: NewFixture) -> Result<Fixture, StoreError> {
        self.saves += 1;
        if self.saves == self.fail_on {
            return Err(StoreError::ConstraintViolation("disk full".into()));
        }
        self.inner.save_fixture(fixture)
    }

    fn save_tournament(&mut self, tournament: &Tournament) -> Result<(), StoreError> {
        self.inner.save_tournament(tournament)
    }

    fn find_fixtures_by_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Vec<Fixture>, StoreError> {
        self.inner.find_fixtures_by_tournament(tournament_id)
    }
}

impl Transactional for FailingSaves {
    fn in_transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
    {
        let snapshot = self.inner.clone();
        let result = f(self);
        if result.is_err() {
            self.inner = snapshot;
        }
        result
    }
}

#[test]
fn store_failure_mid_run_rolls_back_earlier_saves() {
    let (inner, tid) = setup(at(1, 9), 2, 3, 2, 10);
    let mut store = FailingSaves {
        inner,
        fail_on: 3,
        saves: 0,
    };
    assert_eq!(
        schedule_group_stage(&mut store, tid, PlayWindow::default()),
        Err(ScheduleError::Store(StoreError::ConstraintViolation(
            "disk full".into()
        )))
    );
    assert_eq!(store.saves, 3);
    assert!(store.inner.fixtures().is_empty());
    assert_eq!(status(&store.inner, tid), TournamentStatus::Scheduled);
}

#[test]
fn fixture_list_is_ordered_by_date() {
    // Group A runs past Group B's first day, so the two groups interleave.
    let (mut store, tid) = setup(at(1, 9), 4, 6, 3, 30);
    schedule_group_stage(&mut store, tid, PlayWindow::default()).unwrap();

    let listed = list_fixture_summaries(&store, tid).unwrap();
    assert_eq!(listed.len(), 15 + 3);
    assert!(listed
        .windows(2)
        .all(|w| w[0].match_date_time <= w[1].match_date_time));
}

#[test]
fn fixture_list_of_unknown_tournament_is_not_found() {
    let (store, _) = setup(at(1, 9), 2, 2, 0, 5);
    let missing = Uuid::new_v4();
    assert_eq!(
        list_fixture_summaries(&store, missing),
        Err(ScheduleError::TournamentNotFound(missing))
    );
}
