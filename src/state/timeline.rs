//! Observation timeline state and navigation.
//!
//! A single UTC observation time drives every imagery layer. Forward
//! navigation is future-checked against the rounded wall clock and becomes
//! a logged no-op when it would point past "now"; backward navigation is
//! always allowed. All operations keep the time aligned to the 10-minute
//! grid of the continuous sources.

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};

use super::clock::{self, STEP_MINUTES};

/// English month names for the date display.
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Fields shown in the date/time display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayFields {
    pub day: u32,
    pub month_name: &'static str,
    pub hour: String,
    pub minute: String,
}

/// The authoritative observation time and its navigation operations.
pub struct TimelineState {
    current: DateTime<Utc>,
}

impl TimelineState {
    /// Creates the timeline at its initial observation time.
    ///
    /// `trusted_today` is the date the host is believed to be on; a host
    /// clock reporting a later date is treated as misconfigured and the
    /// timeline starts at yesterday 23:50 UTC instead.
    pub fn new(now: DateTime<Utc>, trusted_today: chrono::NaiveDate) -> Self {
        let current = clock::initial_observation_time(now, trusted_today);
        log::info!("Initial observation time (UTC): {}", current.to_rfc3339());
        Self { current }
    }

    /// The current observation time.
    pub fn current(&self) -> DateTime<Utc> {
        self.current
    }

    /// Attempts to commit `candidate` as the new observation time.
    ///
    /// Rejected with a warning if the candidate's 10-minute bucket lies
    /// past the wall clock's. Returns whether the commit happened.
    fn commit(&mut self, candidate: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        if clock::is_future(candidate, STEP_MINUTES, now) {
            log::warn!(
                "Navigation to {} rejected: time bucket is in the future",
                candidate.to_rfc3339()
            );
            return false;
        }
        self.current = candidate;
        true
    }

    /// Advance one day. Future-checked.
    pub fn advance_day(&mut self, now: DateTime<Utc>) -> bool {
        self.commit(self.current + Duration::days(1), now)
    }

    /// Retreat one day. Always applied.
    pub fn retreat_day(&mut self) {
        self.current -= Duration::days(1);
    }

    /// Advance one hour. Future-checked.
    pub fn advance_hour(&mut self, now: DateTime<Utc>) -> bool {
        self.commit(self.current + Duration::hours(1), now)
    }

    /// Retreat one hour. Always applied.
    ///
    /// Retreating through hour 0 lands on the previous day at 23:50 — the
    /// minute is forced to 50 regardless of its prior value. This matches
    /// the asymmetric "go back" behavior of the hour arrows.
    pub fn retreat_hour(&mut self) {
        if self.current.hour() == 0 {
            let yesterday = self.current.date_naive() - Duration::days(1);
            self.current = at(yesterday, 23, 50);
        } else {
            self.current -= Duration::hours(1);
        }
    }

    /// Advance ten minutes, carrying into the hour and day. Future-checked.
    pub fn advance_minute(&mut self, now: DateTime<Utc>) -> bool {
        self.commit(self.current + Duration::minutes(10), now)
    }

    /// Retreat ten minutes. Always applied.
    ///
    /// Retreating from minute 0 steps to the previous hour at :50, rolling
    /// the day back when leaving 00:00.
    pub fn retreat_minute(&mut self) {
        if self.current.minute() == 0 {
            if self.current.hour() == 0 {
                let yesterday = self.current.date_naive() - Duration::days(1);
                self.current = at(yesterday, 23, 50);
            } else {
                self.current = at(self.current.date_naive(), self.current.hour() - 1, 50);
            }
        } else {
            self.current -= Duration::minutes(10);
        }
    }

    /// Clicking the date display cycles one day forward.
    pub fn cycle_day(&mut self, now: DateTime<Utc>) -> bool {
        self.advance_day(now)
    }

    /// Clicking the hour display cycles one hour forward.
    pub fn cycle_hour(&mut self, now: DateTime<Utc>) -> bool {
        self.advance_hour(now)
    }

    /// Clicking the minute display cycles ten minutes forward.
    pub fn cycle_minute(&mut self, now: DateTime<Utc>) -> bool {
        self.advance_minute(now)
    }

    /// Values for the UI's date/hour/minute readouts.
    pub fn display_fields(&self) -> DisplayFields {
        DisplayFields {
            day: self.current.day(),
            month_name: MONTH_NAMES[self.current.month0() as usize],
            hour: format!("{:02}", self.current.hour()),
            minute: format!("{:02}", self.current.minute()),
        }
    }
}

fn at(date: chrono::NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(date.year(), date.month(), date.day(), hour, minute, 0)
        .single()
        .expect("valid UTC calendar time")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn timeline_at(t: DateTime<Utc>) -> TimelineState {
        TimelineState { current: t }
    }

    #[test]
    fn test_initial_time_is_ten_minute_aligned() {
        let now = utc(2024, 5, 1, 12, 34);
        let tl = TimelineState::new(now, now.date_naive());
        assert_eq!(tl.current().minute() % 10, 0);
        assert_eq!(tl.current(), utc(2024, 5, 1, 12, 20));
    }

    #[test]
    fn test_clock_guard_forces_yesterday() {
        let now = utc(2024, 5, 2, 3, 0);
        let trusted = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let tl = TimelineState::new(now, trusted);
        assert_eq!(tl.current(), utc(2024, 4, 30, 23, 50));
    }

    #[test]
    fn test_advance_then_retreat_day_round_trips() {
        let now = utc(2024, 6, 20, 12, 0);
        let mut tl = timeline_at(utc(2024, 6, 10, 14, 30));
        assert!(tl.advance_day(now));
        tl.retreat_day();
        assert_eq!(tl.current(), utc(2024, 6, 10, 14, 30));
    }

    #[test]
    fn test_advance_day_rolls_month_boundary() {
        let now = utc(2024, 6, 20, 12, 0);
        let mut tl = timeline_at(utc(2024, 5, 31, 10, 0));
        assert!(tl.advance_day(now));
        assert_eq!(tl.current(), utc(2024, 6, 1, 10, 0));
    }

    #[test]
    fn test_retreat_day_rolls_year_boundary() {
        let mut tl = timeline_at(utc(2024, 1, 1, 8, 10));
        tl.retreat_day();
        assert_eq!(tl.current(), utc(2023, 12, 31, 8, 10));
    }

    #[test]
    fn test_advance_day_into_future_is_rejected() {
        let now = utc(2024, 6, 10, 15, 0);
        let mut tl = timeline_at(utc(2024, 6, 10, 14, 30));
        assert!(!tl.advance_day(now));
        assert_eq!(tl.current(), utc(2024, 6, 10, 14, 30));
    }

    #[test]
    fn test_retreat_hour_keeps_minute_when_nonzero() {
        // 14:30 minus an hour is 13:30; the :50 special case only fires
        // when crossing hour 0.
        let mut tl = timeline_at(utc(2024, 3, 10, 14, 30));
        tl.retreat_hour();
        assert_eq!(tl.current(), utc(2024, 3, 10, 13, 30));
    }

    #[test]
    fn test_retreat_hour_through_midnight_forces_fifty() {
        let mut tl = timeline_at(utc(2024, 3, 10, 0, 20));
        tl.retreat_hour();
        assert_eq!(tl.current(), utc(2024, 3, 9, 23, 50));
    }

    #[test]
    fn test_advance_minute_carries_into_hour() {
        let now = utc(2024, 3, 10, 20, 0);
        let mut tl = timeline_at(utc(2024, 3, 10, 14, 50));
        assert!(tl.advance_minute(now));
        assert_eq!(tl.current(), utc(2024, 3, 10, 15, 0));
    }

    #[test]
    fn test_advance_minute_at_future_boundary_is_rejected() {
        // current 23:50, real now 23:55 (bucket 23:50): the candidate
        // 00:00 next day is one bucket ahead and must be rejected.
        let now = utc(2024, 3, 10, 23, 55);
        let mut tl = timeline_at(utc(2024, 3, 10, 23, 50));
        assert!(!tl.advance_minute(now));
        assert_eq!(tl.current(), utc(2024, 3, 10, 23, 50));
    }

    #[test]
    fn test_retreat_minute_from_zero_minute() {
        let mut tl = timeline_at(utc(2024, 3, 10, 14, 0));
        tl.retreat_minute();
        assert_eq!(tl.current(), utc(2024, 3, 10, 13, 50));
    }

    #[test]
    fn test_retreat_minute_from_midnight() {
        let mut tl = timeline_at(utc(2024, 3, 10, 0, 0));
        tl.retreat_minute();
        assert_eq!(tl.current(), utc(2024, 3, 9, 23, 50));
    }

    #[test]
    fn test_alignment_invariant_under_navigation_sequences() {
        let now = utc(2024, 3, 15, 12, 0);
        let mut tl = timeline_at(utc(2024, 3, 10, 14, 30));
        tl.advance_minute(now);
        tl.retreat_hour();
        tl.advance_day(now);
        tl.retreat_minute();
        tl.retreat_minute();
        tl.cycle_hour(now);
        tl.retreat_day();
        assert_eq!(tl.current().minute() % 10, 0);
        assert_eq!(tl.current().second(), 0);
    }

    #[test]
    fn test_cycle_ops_match_forward_steps() {
        let now = utc(2024, 3, 20, 12, 0);
        let mut a = timeline_at(utc(2024, 3, 10, 14, 30));
        let mut b = timeline_at(utc(2024, 3, 10, 14, 30));
        a.cycle_day(now);
        b.advance_day(now);
        assert_eq!(a.current(), b.current());
        a.cycle_minute(now);
        b.advance_minute(now);
        assert_eq!(a.current(), b.current());
    }

    #[test]
    fn test_display_fields() {
        let tl = timeline_at(utc(2024, 3, 9, 7, 0));
        let f = tl.display_fields();
        assert_eq!(f.day, 9);
        assert_eq!(f.month_name, "March");
        assert_eq!(f.hour, "07");
        assert_eq!(f.minute, "00");
    }
}
