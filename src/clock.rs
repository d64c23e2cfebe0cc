//! Frame clock turning host timestamps into per-tick time deltas.
//!
//! The host supplies monotonically increasing timestamps (time since any fixed origin); the
//! clock never reads the wall clock itself, so synthetic timestamp sequences drive it in tests.

use std::time::Duration;

use serde::Serialize;

/// Default cap on a single tick's delta, in seconds.
pub const DEFAULT_MAX_FRAME_DT: f64 = 0.25;
/// Default cap on the first host-supplied elapsed time after a resume.
pub const DEFAULT_RESUME_FRAME_DT: f64 = 1.0 / 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockState {
    Idle,
    Running,
    Paused,
    Stopped,
}

/// Start/stop/pause/resume state machine plus elapsed-time tracking.
#[derive(Clone, Debug)]
pub struct AnimationClock {
    state: ClockState,
    last_tick: Option<Duration>,
    max_frame_dt: f64,
    resume_frame_dt: f64,
    just_resumed: bool,
    frames: u64,
    running_time: f64,
    clamp_streak: u64,
}

impl AnimationClock {
    pub fn new(max_frame_dt: f64, resume_frame_dt: f64) -> Self {
        fn positive(v: f64, fallback: f64) -> f64 {
            if v.is_finite() && v > 0.0 { v } else { fallback }
        }

        Self {
            state: ClockState::Idle,
            last_tick: None,
            max_frame_dt: positive(max_frame_dt, DEFAULT_MAX_FRAME_DT),
            resume_frame_dt: positive(resume_frame_dt, DEFAULT_RESUME_FRAME_DT),
            just_resumed: false,
            frames: 0,
            running_time: 0.0,
            clamp_streak: 0,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == ClockState::Paused
    }

    /// Ticks that produced a delta since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Sum of all deltas handed out; paused time never contributes.
    pub fn running_time(&self) -> f64 {
        self.running_time
    }

    /// Consecutive frames, up to the latest, whose delta hit `max_frame_dt`.
    pub fn clamp_streak(&self) -> u64 {
        self.clamp_streak
    }

    pub fn max_frame_dt(&self) -> f64 {
        self.max_frame_dt
    }

    /// Enter `Running`, taking `now` as the baseline. No-op while running; resumes when paused.
    pub fn start(&mut self, now: Duration) {
        match self.state {
            ClockState::Running => {}
            ClockState::Paused => self.resume(now),
            ClockState::Idle | ClockState::Stopped => {
                self.state = ClockState::Running;
                self.last_tick = Some(now);
                self.just_resumed = false;
                tracing::debug!("clock started");
            }
        }
    }

    /// Halt ticking. Idempotent and safe from any state.
    pub fn stop(&mut self) {
        if self.state != ClockState::Stopped {
            tracing::debug!(from = ?self.state, "clock stopped");
        }
        self.state = ClockState::Stopped;
        self.last_tick = None;
        self.just_resumed = false;
    }

    /// Freeze time. Only meaningful while running.
    pub fn pause(&mut self) {
        if self.state == ClockState::Running {
            self.state = ClockState::Paused;
            self.last_tick = None;
            tracing::debug!("clock paused");
        }
    }

    /// Leave `Paused`, re-baselining at `now` so the paused gap never shows up as a delta.
    pub fn resume(&mut self, now: Duration) {
        if self.state == ClockState::Paused {
            self.state = ClockState::Running;
            self.last_tick = Some(now);
            self.just_resumed = true;
            tracing::debug!("clock resumed");
        }
    }

    /// Delta in seconds since the previous tick, or `None` when not running.
    ///
    /// Timestamps that go backwards yield a zero delta; large gaps are clamped to
    /// `max_frame_dt`.
    pub fn tick(&mut self, now: Duration) -> Option<f64> {
        if !self.is_running() {
            return None;
        }
        let raw = match self.last_tick {
            Some(last) => now.saturating_sub(last).as_secs_f64(),
            None => 0.0,
        };
        self.last_tick = Some(now);
        self.just_resumed = false;
        Some(self.account(raw))
    }

    /// Advance by a host-measured frame interval (draw-callback driven hosts).
    ///
    /// The first interval after a resume is capped at `resume_frame_dt`, since hosts often
    /// report the whole paused gap there.
    pub fn advance(&mut self, elapsed: Duration) -> Option<f64> {
        if !self.is_running() {
            return None;
        }
        let mut raw = elapsed.as_secs_f64();
        if self.just_resumed {
            raw = raw.min(self.resume_frame_dt);
            self.just_resumed = false;
        }
        self.last_tick = Some(self.last_tick.unwrap_or_default().saturating_add(elapsed));
        Some(self.account(raw))
    }

    fn account(&mut self, raw: f64) -> f64 {
        let dt = if raw > self.max_frame_dt {
            self.clamp_streak += 1;
            if self.clamp_streak == 1 {
                tracing::warn!(
                    raw_dt = raw,
                    max = self.max_frame_dt,
                    "frame delta clamped"
                );
            } else {
                tracing::debug!(raw_dt = raw, streak = self.clamp_streak, "frame delta clamped");
            }
            self.max_frame_dt
        } else {
            if self.clamp_streak > 1 {
                tracing::debug!(frames = self.clamp_streak, "frame deltas back under the cap");
            }
            self.clamp_streak = 0;
            raw
        };
        self.frames += 1;
        self.running_time += dt;
        dt
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_DT, DEFAULT_RESUME_FRAME_DT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn idle_clock_does_not_tick() {
        let mut c = AnimationClock::default();
        assert_eq!(c.state(), ClockState::Idle);
        assert_eq!(c.tick(ms(10)), None);
        assert_eq!(c.advance(ms(10)), None);
    }

    #[test]
    fn tick_measures_since_previous_tick() {
        let mut c = AnimationClock::default();
        c.start(ms(1000));
        let dt = c.tick(ms(1016)).unwrap();
        assert!((dt - 0.016).abs() < 1e-9);
        let dt = c.tick(ms(1050)).unwrap();
        assert!((dt - 0.034).abs() < 1e-9);
        assert_eq!(c.frames(), 2);
    }

    #[test]
    fn start_twice_keeps_baseline() {
        let mut c = AnimationClock::default();
        c.start(ms(0));
        c.start(ms(100));
        let dt = c.tick(ms(116)).unwrap();
        assert!((dt - 0.116).abs() < 1e-9);
    }

    #[test]
    fn large_gaps_are_clamped() {
        let mut c = AnimationClock::new(0.1, DEFAULT_RESUME_FRAME_DT);
        c.start(ms(0));
        assert_eq!(c.tick(ms(5000)), Some(0.1));
    }

    #[test]
    fn clamp_streak_resets_after_a_normal_frame() {
        let mut c = AnimationClock::new(0.1, DEFAULT_RESUME_FRAME_DT);
        c.start(ms(0));
        for i in 1..=5 {
            assert_eq!(c.tick(ms(i * 1000)), Some(0.1));
            assert_eq!(c.clamp_streak(), i);
        }
        c.tick(ms(5016));
        assert_eq!(c.clamp_streak(), 0);
        c.tick(ms(9000));
        assert_eq!(c.clamp_streak(), 1);
    }

    #[test]
    fn backwards_timestamps_yield_zero() {
        let mut c = AnimationClock::default();
        c.start(ms(500));
        assert_eq!(c.tick(ms(400)), Some(0.0));
    }

    #[test]
    fn pause_resume_skips_gap() {
        let mut c = AnimationClock::default();
        c.start(ms(0));
        c.tick(ms(100));
        c.pause();
        c.pause();
        assert!(c.is_paused());
        assert_eq!(c.tick(ms(200)), None);
        c.resume(ms(10_000));
        let dt = c.tick(ms(10_016)).unwrap();
        assert!((dt - 0.016).abs() < 1e-9);
        assert!((c.running_time() - 0.116).abs() < 1e-9);
    }

    #[test]
    fn first_advance_after_resume_is_capped() {
        let mut c = AnimationClock::default();
        c.start(ms(0));
        assert_eq!(c.advance(ms(20)), Some(0.02));
        c.pause();
        c.resume(ms(0));
        assert_eq!(c.advance(ms(3000)), Some(DEFAULT_RESUME_FRAME_DT));
        assert_eq!(c.advance(ms(20)), Some(0.02));
    }

    #[test]
    fn stop_is_idempotent_and_safe_from_idle() {
        let mut c = AnimationClock::default();
        c.stop();
        c.stop();
        assert!(!c.is_running());
        c.start(ms(0));
        c.stop();
        c.stop();
        assert_eq!(c.state(), ClockState::Stopped);
        assert_eq!(c.tick(ms(10)), None);
        c.resume(ms(20));
        assert_eq!(c.state(), ClockState::Stopped);
    }

    #[test]
    fn start_while_paused_resumes() {
        let mut c = AnimationClock::default();
        c.start(ms(0));
        c.pause();
        c.start(ms(5000));
        assert!(c.is_running());
        let dt = c.tick(ms(5010)).unwrap();
        assert!((dt - 0.01).abs() < 1e-9);
    }
}
