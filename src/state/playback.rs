//! Playback loop over the observation timeline.
//!
//! The controller owns at most one pending tick deadline; that Option is
//! the timer handle. `poll` runs every frame from the update loop and
//! fires the tick once the deadline passes. Hitting the future boundary
//! stops playback and clears the deadline before returning, so no further
//! tick can fire.

use chrono::{DateTime, Utc};
use web_time::{Duration, Instant};

use super::timeline::TimelineState;

/// Playback interval options.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum PlaybackSpeed {
    Fast,
    Quick,
    #[default]
    Normal,
    Slow,
    Slowest,
}

impl PlaybackSpeed {
    pub fn label(&self) -> &'static str {
        match self {
            PlaybackSpeed::Fast => "0.5s",
            PlaybackSpeed::Quick => "1s",
            PlaybackSpeed::Normal => "1.5s",
            PlaybackSpeed::Slow => "2s",
            PlaybackSpeed::Slowest => "3s",
        }
    }

    pub fn all() -> &'static [PlaybackSpeed] {
        &[
            PlaybackSpeed::Fast,
            PlaybackSpeed::Quick,
            PlaybackSpeed::Normal,
            PlaybackSpeed::Slow,
            PlaybackSpeed::Slowest,
        ]
    }

    /// Tick interval for this speed.
    pub fn interval(&self) -> Duration {
        let millis = match self {
            PlaybackSpeed::Fast => 500,
            PlaybackSpeed::Quick => 1000,
            PlaybackSpeed::Normal => 1500,
            PlaybackSpeed::Slow => 2000,
            PlaybackSpeed::Slowest => 3000,
        };
        Duration::from_millis(millis)
    }
}

/// What a playback poll did this frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PlaybackTick {
    /// Not playing, or the deadline has not passed yet.
    Idle,
    /// The observation time advanced one step.
    Advanced,
    /// The advance hit the future boundary and playback stopped.
    Stopped,
}

/// Timer-driven advancement of the observation time.
#[derive(Default)]
pub struct PlaybackController {
    playing: bool,
    speed: PlaybackSpeed,
    /// Pending tick deadline; `Some` iff playing. This is the only timer.
    next_tick: Option<Instant>,
}

impl PlaybackController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    /// Toggles between stopped and playing.
    ///
    /// Starting is refused while the daily source is active (daily imagery
    /// has no sub-day frames to step through). Starting performs one
    /// immediate advance before scheduling the repeating tick; if even that
    /// first advance hits the future boundary, playback stops right away.
    pub fn toggle(
        &mut self,
        timeline: &mut TimelineState,
        now: DateTime<Utc>,
        daily_active: bool,
    ) -> bool {
        if self.playing {
            self.stop();
            return false;
        }

        if daily_active {
            log::warn!("Playback unavailable while a daily layer is active");
            return false;
        }

        self.playing = true;
        if timeline.advance_minute(now) {
            self.next_tick = Some(Instant::now() + self.speed.interval());
        } else {
            log::warn!("Reached the future boundary, playback stopped");
            self.stop();
        }
        self.playing
    }

    /// Stops playback and cancels the pending tick.
    pub fn stop(&mut self) {
        self.playing = false;
        self.next_tick = None;
    }

    /// Changes the tick interval. While playing, the pending deadline is
    /// replaced with one at the new interval; the observation time is not
    /// touched.
    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        if speed == self.speed {
            return;
        }
        self.speed = speed;
        if self.playing {
            self.next_tick = Some(Instant::now() + self.speed.interval());
            log::info!("Playback interval changed to {}", speed.label());
        }
    }

    /// Fires a due tick, advancing the timeline by ten minutes.
    ///
    /// Auto-stops when the advance is rejected at the future boundary; the
    /// returned outcome tells the caller which of the two happened.
    pub fn poll(&mut self, timeline: &mut TimelineState, now: DateTime<Utc>) -> PlaybackTick {
        if !self.playing {
            return PlaybackTick::Idle;
        }
        let Some(deadline) = self.next_tick else {
            return PlaybackTick::Idle;
        };
        if Instant::now() < deadline {
            return PlaybackTick::Idle;
        }

        if timeline.advance_minute(now) {
            self.next_tick = Some(Instant::now() + self.speed.interval());
            PlaybackTick::Advanced
        } else {
            log::warn!("Reached the future boundary, playback stopped");
            self.stop();
            PlaybackTick::Stopped
        }
    }

    /// Time until the next tick, for repaint scheduling. None when stopped.
    pub fn time_until_tick(&self) -> Option<Duration> {
        let deadline = self.next_tick?;
        Some(deadline.saturating_duration_since(Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    /// Builds a timeline sitting exactly at the given aligned instant.
    /// The constructor subtracts its safety delay, so feed it a clock ten
    /// minutes ahead.
    fn timeline_at(t: DateTime<Utc>) -> TimelineState {
        let clock = t + chrono::Duration::minutes(10);
        let tl = TimelineState::new(clock, clock.date_naive());
        assert_eq!(tl.current(), t);
        tl
    }

    #[test]
    fn test_toggle_starts_with_immediate_advance() {
        let now = utc(2024, 3, 10, 12, 0);
        let mut tl = timeline_at(utc(2024, 3, 10, 10, 0));
        let mut pb = PlaybackController::new();

        assert!(pb.toggle(&mut tl, now, false));
        assert!(pb.is_playing());
        assert_eq!(tl.current(), utc(2024, 3, 10, 10, 10));
        assert!(pb.time_until_tick().is_some());
    }

    #[test]
    fn test_toggle_refused_while_daily_active() {
        let now = utc(2024, 3, 10, 12, 0);
        let mut tl = timeline_at(utc(2024, 3, 10, 10, 0));
        let mut pb = PlaybackController::new();

        assert!(!pb.toggle(&mut tl, now, true));
        assert!(!pb.is_playing());
        assert_eq!(tl.current(), utc(2024, 3, 10, 10, 0));
    }

    #[test]
    fn test_toggle_while_playing_stops_and_cancels() {
        let now = utc(2024, 3, 10, 12, 0);
        let mut tl = timeline_at(utc(2024, 3, 10, 10, 0));
        let mut pb = PlaybackController::new();

        pb.toggle(&mut tl, now, false);
        pb.toggle(&mut tl, now, false);
        assert!(!pb.is_playing());
        assert!(pb.time_until_tick().is_none());
    }

    #[test]
    fn test_immediate_advance_at_boundary_stops() {
        let now = utc(2024, 3, 10, 11, 55);
        let mut tl = timeline_at(utc(2024, 3, 10, 11, 50));
        let mut pb = PlaybackController::new();

        assert!(!pb.toggle(&mut tl, now, false));
        assert!(!pb.is_playing());
        assert!(pb.time_until_tick().is_none());
        assert_eq!(tl.current(), utc(2024, 3, 10, 11, 50));
    }

    #[test]
    fn test_poll_before_deadline_is_noop() {
        let now = utc(2024, 3, 10, 12, 0);
        let mut tl = timeline_at(utc(2024, 3, 10, 10, 0));
        let mut pb = PlaybackController::new();

        pb.toggle(&mut tl, now, false);
        let after_start = tl.current();
        assert_eq!(pb.poll(&mut tl, now), PlaybackTick::Idle);
        assert_eq!(tl.current(), after_start);
        assert!(pb.is_playing());
    }

    #[test]
    fn test_due_poll_advances_and_reschedules() {
        let now = utc(2024, 3, 10, 12, 0);
        let mut tl = timeline_at(utc(2024, 3, 10, 10, 0));
        let mut pb = PlaybackController::new();

        pb.toggle(&mut tl, now, false);
        pb.next_tick = Some(Instant::now() - Duration::from_millis(1));
        assert_eq!(pb.poll(&mut tl, now), PlaybackTick::Advanced);
        assert_eq!(tl.current(), utc(2024, 3, 10, 10, 20));
        assert!(pb.is_playing());
        assert!(pb.next_tick.is_some());
    }

    #[test]
    fn test_due_poll_at_boundary_auto_stops() {
        let now = utc(2024, 3, 10, 10, 15);
        let mut tl = timeline_at(utc(2024, 3, 10, 10, 0));
        let mut pb = PlaybackController::new();

        // Immediate advance lands in the current ten-minute bucket.
        pb.toggle(&mut tl, now, false);
        assert_eq!(tl.current(), utc(2024, 3, 10, 10, 10));

        pb.next_tick = Some(Instant::now() - Duration::from_millis(1));
        assert_eq!(pb.poll(&mut tl, now), PlaybackTick::Stopped);
        assert!(!pb.is_playing());
        assert!(pb.next_tick.is_none());
        assert_eq!(tl.current(), utc(2024, 3, 10, 10, 10));
    }

    #[test]
    fn test_poll_while_stopped_reports_idle() {
        let now = utc(2024, 3, 10, 12, 0);
        let mut tl = timeline_at(utc(2024, 3, 10, 10, 0));
        let mut pb = PlaybackController::new();

        // Idle is distinct from the boundary stop, so callers can surface
        // the stop exactly once.
        assert_eq!(pb.poll(&mut tl, now), PlaybackTick::Idle);
        assert_eq!(tl.current(), utc(2024, 3, 10, 10, 0));
    }

    #[test]
    fn test_set_speed_while_playing_keeps_time() {
        let now = utc(2024, 3, 10, 12, 0);
        let mut tl = timeline_at(utc(2024, 3, 10, 10, 0));
        let mut pb = PlaybackController::new();

        pb.toggle(&mut tl, now, false);
        let t = tl.current();
        pb.set_speed(PlaybackSpeed::Fast);
        assert_eq!(tl.current(), t);
        assert!(pb.is_playing());
        assert!(pb.next_tick.is_some());
    }

    #[test]
    fn test_set_speed_while_stopped_does_not_schedule() {
        let mut pb = PlaybackController::new();
        pb.set_speed(PlaybackSpeed::Slowest);
        assert!(pb.next_tick.is_none());
        assert_eq!(pb.speed(), PlaybackSpeed::Slowest);
    }

    #[test]
    fn test_interval_values() {
        assert_eq!(PlaybackSpeed::default(), PlaybackSpeed::Normal);
        assert_eq!(PlaybackSpeed::Normal.interval(), Duration::from_millis(1500));
        assert_eq!(PlaybackSpeed::Fast.interval(), Duration::from_millis(500));
        assert_eq!(PlaybackSpeed::Slowest.interval(), Duration::from_millis(3000));
    }
}
