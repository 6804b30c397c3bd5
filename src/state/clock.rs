//! UTC clock utilities for the observation timeline.
//!
//! All imagery sources key their data on UTC timestamps, so every
//! comparison here happens on UTC calendar time. The future check rounds
//! both sides down to the step boundary before comparing, so a candidate a
//! few seconds ahead of "now" within the same bucket is not rejected.

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};

/// Step size of the continuous imagery sources, in minutes.
pub const STEP_MINUTES: u32 = 10;

/// Current wall-clock UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Truncates `t` down to the nearest lower multiple of `step_minutes`,
/// zeroing seconds and sub-second fields.
pub fn floor_to_step(t: DateTime<Utc>, step_minutes: u32) -> DateTime<Utc> {
    let minute = (t.minute() / step_minutes) * step_minutes;
    Utc.with_ymd_and_hms(t.year(), t.month(), t.day(), t.hour(), minute, 0)
        .single()
        .unwrap_or(t)
}

/// Returns true iff `candidate`, rounded down to the step boundary, is
/// strictly later than `now` rounded the same way.
pub fn is_future(candidate: DateTime<Utc>, step_minutes: u32, now: DateTime<Utc>) -> bool {
    floor_to_step(candidate, step_minutes) > floor_to_step(now, step_minutes)
}

/// Initial observation time: `now` minus a 10-minute safety delay, floored
/// to the 10-minute boundary. If the host clock reports a date later than
/// `trusted_today`, the value is forced to the previous day at 23:50 UTC.
pub fn initial_observation_time(
    now: DateTime<Utc>,
    trusted_today: chrono::NaiveDate,
) -> DateTime<Utc> {
    if now.date_naive() > trusted_today {
        log::warn!(
            "Host clock reports a future date ({}), forcing observation time to yesterday 23:50 UTC",
            now.date_naive()
        );
        let yesterday = trusted_today - Duration::days(1);
        return Utc
            .with_ymd_and_hms(
                yesterday.year(),
                yesterday.month(),
                yesterday.day(),
                23,
                50,
                0,
            )
            .single()
            .unwrap_or(now);
    }

    floor_to_step(now - Duration::minutes(STEP_MINUTES as i64), STEP_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_floor_to_step_truncates_minutes_and_seconds() {
        let t = utc(2024, 3, 10, 15, 37, 42);
        assert_eq!(floor_to_step(t, 10), utc(2024, 3, 10, 15, 30, 0));
    }

    #[test]
    fn test_floor_to_step_already_aligned() {
        let t = utc(2024, 3, 10, 15, 30, 0);
        assert_eq!(floor_to_step(t, 10), t);
    }

    #[test]
    fn test_is_future_same_bucket_is_not_future() {
        // A candidate a few seconds ahead of now within the same 10-minute
        // bucket is not rejected.
        let now = utc(2024, 3, 10, 15, 31, 0);
        let candidate = utc(2024, 3, 10, 15, 39, 59);
        assert!(!is_future(candidate, 10, now));
    }

    #[test]
    fn test_is_future_next_bucket() {
        let now = utc(2024, 3, 10, 15, 31, 0);
        let candidate = utc(2024, 3, 10, 15, 40, 0);
        assert!(is_future(candidate, 10, now));
    }

    #[test]
    fn test_boundary_is_never_future_relative_to_itself() {
        let now = utc(2024, 3, 10, 23, 55, 12);
        let rounded = floor_to_step(now, 10);
        assert!(!is_future(rounded, 10, now));
    }

    #[test]
    fn test_initial_time_subtracts_delay_then_rounds() {
        // UTC 15:30 -> minus 10 minutes -> 15:20 -> already aligned.
        let now = utc(2024, 5, 1, 15, 30, 0);
        let t = initial_observation_time(now, now.date_naive());
        assert_eq!(t, utc(2024, 5, 1, 15, 20, 0));
    }

    #[test]
    fn test_initial_time_rounds_down_after_delay() {
        // 15:09:30 -> 14:59:30 -> floored to 14:50.
        let now = utc(2024, 5, 1, 15, 9, 30);
        let t = initial_observation_time(now, now.date_naive());
        assert_eq!(t, utc(2024, 5, 1, 14, 50, 0));
    }

    #[test]
    fn test_initial_time_future_host_date_forced_to_yesterday() {
        let now = utc(2025, 1, 2, 8, 0, 0);
        let trusted = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let t = initial_observation_time(now, trusted);
        assert_eq!(t, utc(2024, 12, 31, 23, 50, 0));
    }
}
