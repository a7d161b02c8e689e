//! Play window: keeps fixtures out of night hours and steps the candidate time between fixtures.

use chrono::{Duration, NaiveDateTime, Timelike};
use std::fmt;

/// Hour-of-day range fixtures may start in (both bounds inclusive).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlayWindow {
    start_hour: u32,
    end_hour: u32,
    /// Hour a candidate is moved to on the next day when it falls outside the window.
    reset_hour: u32,
}

/// Invalid combination of play window hours.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidPlayWindow {
    pub start_hour: u32,
    pub end_hour: u32,
    pub reset_hour: u32,
}

impl fmt::Display for InvalidPlayWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid play window {}:00-{}:00 (reset {}:00): need start <= reset <= end <= 23",
            self.start_hour, self.end_hour, self.reset_hour
        )
    }
}

impl std::error::Error for InvalidPlayWindow {}

impl Default for PlayWindow {
    /// 06:00 to 20:59, pushed to 10:00 the next day.
    fn default() -> Self {
        Self {
            start_hour: 6,
            end_hour: 20,
            reset_hour: 10,
        }
    }
}

impl PlayWindow {
    /// The reset hour must lie inside the window so advancing always lands in it.
    pub fn new(start_hour: u32, end_hour: u32, reset_hour: u32) -> Result<Self, InvalidPlayWindow> {
        if end_hour > 23 || start_hour > end_hour || !(start_hour..=end_hour).contains(&reset_hour) {
            return Err(InvalidPlayWindow {
                start_hour,
                end_hour,
                reset_hour,
            });
        }
        Ok(Self {
            start_hour,
            end_hour,
            reset_hour,
        })
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn reset_hour(&self) -> u32 {
        self.reset_hour
    }

    pub fn contains(&self, t: NaiveDateTime) -> bool {
        (self.start_hour..=self.end_hour).contains(&t.hour())
    }

    /// First time at or after `t` that is inside the window.
    ///
    /// An in-window `t` is returned unchanged. Otherwise `t` moves forward one day with its hour set to
    /// the reset hour (minutes and seconds are kept), repeated until inside the window.
    ///
    /// `None` if that next day lies past `NaiveDateTime::MAX`.
    pub fn next_playable_slot(&self, mut t: NaiveDateTime) -> Option<NaiveDateTime> {
        while !self.contains(t) {
            let to_reset = i64::from(self.reset_hour) - i64::from(t.hour());
            t = t.checked_add_signed(Duration::days(1) + Duration::hours(to_reset))?;
        }
        Some(t)
    }
}

/// Candidate time for the fixture after one scheduled at `t`, or `None` on overflow.
pub fn advance_by_interval(t: NaiveDateTime, interval: Duration) -> Option<NaiveDateTime> {
    t.checked_add_signed(interval)
}
