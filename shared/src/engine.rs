//! Timer engine - drift-corrected countdown state machine
//!
//! Owns the remaining time and the running/paused status. The countdown is
//! deadline-based: starting schedules a single wake-up, and the remaining
//! time is always recomputed from actual wall-clock elapsed time rather
//! than counted ticks, so a delayed host (backgrounded window, suspended
//! process) cannot skew it. At most one wake-up is ever pending; every
//! path that schedules a new one cancels the previous one first, so a
//! stale expiry can never fire after a pause.
//!
//! Every operation has an `_at(now)` variant taking an explicit instant;
//! the bare-named wrappers pass `Instant::now()`.

use std::time::{Duration, Instant};

use crate::DialError;

/// Audible-alert collaborator, injected into the engine.
///
/// `play` is fire-and-forget: the engine never awaits or retries it.
pub trait Alert {
    /// Prepare the playback device. The host calls this on the first user
    /// gesture; platforms with autoplay restrictions refuse audio before
    /// one has happened.
    fn arm(&mut self);

    /// Fire the alert.
    fn play(&mut self);
}

/// Countdown status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Running,
    Paused,
}

/// Value handed to the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub remaining: Duration,
    pub max_duration: Duration,
    pub mode: Mode,
}

/// The single pending wake-up while running.
#[derive(Debug, Clone, Copy)]
struct Wakeup {
    scheduled_at: Instant,
    remaining_at_schedule: Duration,
}

impl Wakeup {
    fn deadline(&self) -> Instant {
        self.scheduled_at + self.remaining_at_schedule
    }

    /// Drift-corrected remaining time: the value at schedule time minus the
    /// wall-clock elapsed since, floored at zero.
    fn remaining_at(&self, now: Instant) -> Duration {
        self.remaining_at_schedule
            .saturating_sub(now.saturating_duration_since(self.scheduled_at))
    }
}

/// The countdown state machine.
///
/// Created with `remaining = 0`, paused. Reaching zero always forces a
/// pause, so `remaining == 0` implies `mode == Paused`.
pub struct TimerEngine<A: Alert> {
    remaining: Duration,
    max_duration: Duration,
    mode: Mode,
    wakeup: Option<Wakeup>,
    alert: A,
}

impl<A: Alert> TimerEngine<A> {
    /// Create an engine for a dial spanning `[0, max_duration]`.
    pub fn new(max_duration: Duration, alert: A) -> Result<Self, DialError> {
        if max_duration.is_zero() {
            return Err(DialError::InvalidConfiguration);
        }
        Ok(Self {
            remaining: Duration::ZERO,
            max_duration,
            mode: Mode::Paused,
            wakeup: None,
            alert,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn max_duration(&self) -> Duration {
        self.max_duration
    }

    /// The injected alert collaborator.
    pub fn alert(&self) -> &A {
        &self.alert
    }

    /// Mutable access to the alert collaborator, e.g. to arm it on the
    /// first user gesture.
    pub fn alert_mut(&mut self) -> &mut A {
        &mut self.alert
    }

    /// Remaining time as of `now`, decayed live while running.
    pub fn remaining_at(&self, now: Instant) -> Duration {
        match self.wakeup {
            Some(wakeup) => wakeup.remaining_at(now),
            None => self.remaining,
        }
    }

    pub fn remaining(&self) -> Duration {
        self.remaining_at(Instant::now())
    }

    pub fn snapshot_at(&self, now: Instant) -> TimerSnapshot {
        TimerSnapshot {
            remaining: self.remaining_at(now),
            max_duration: self.max_duration,
            mode: self.mode,
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshot_at(Instant::now())
    }

    /// Start the countdown.
    ///
    /// `Paused → Running` only when time remains; a no-op when already
    /// running or when `remaining` is zero.
    pub fn start_at(&mut self, now: Instant) {
        if self.mode == Mode::Running || self.remaining.is_zero() {
            return;
        }
        self.mode = Mode::Running;
        self.wakeup = Some(Wakeup {
            scheduled_at: now,
            remaining_at_schedule: self.remaining,
        });
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Pause the countdown, freezing `remaining` at its drift-corrected
    /// value and cancelling the pending wake-up. A no-op when already
    /// paused.
    pub fn pause_at(&mut self, now: Instant) {
        if self.mode == Mode::Paused {
            return;
        }
        if let Some(wakeup) = self.wakeup.take() {
            self.remaining = wakeup.remaining_at(now);
        }
        self.mode = Mode::Paused;
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    /// Set the remaining time, clamped to `[0, max_duration]`.
    ///
    /// While running this cancels the pending wake-up and restarts the
    /// countdown from the new value as of `now`; stale timing state is
    /// never extrapolated. A clamped value of zero forces a pause without
    /// firing the alert.
    pub fn set_remaining_at(&mut self, d: Duration, now: Instant) {
        let clamped = d.min(self.max_duration);
        self.wakeup = None;
        self.remaining = clamped;
        if clamped.is_zero() {
            self.mode = Mode::Paused;
        } else if self.mode == Mode::Running {
            self.wakeup = Some(Wakeup {
                scheduled_at: now,
                remaining_at_schedule: clamped,
            });
        }
    }

    pub fn set_remaining(&mut self, d: Duration) {
        self.set_remaining_at(d, Instant::now());
    }

    /// Change the dial's maximum.
    ///
    /// `remaining` is clamped to the new bound, never rescaled; when the
    /// clamp lowers the value of a running countdown, the countdown
    /// restarts from the clamped value.
    pub fn set_max_duration_at(
        &mut self,
        max_duration: Duration,
        now: Instant,
    ) -> Result<(), DialError> {
        if max_duration.is_zero() {
            return Err(DialError::InvalidConfiguration);
        }
        self.max_duration = max_duration;
        if self.remaining_at(now) > max_duration {
            self.set_remaining_at(max_duration, now);
        }
        Ok(())
    }

    pub fn set_max_duration(&mut self, max_duration: Duration) -> Result<(), DialError> {
        self.set_max_duration_at(max_duration, Instant::now())
    }

    /// Observe the wake-up. The host calls this once per frame.
    ///
    /// While running, at or past the deadline the countdown expires:
    /// `remaining` drops to zero, the engine pauses, the alert plays, and
    /// `true` is returned. Expiry is reported exactly once regardless of
    /// wake-up jitter or repeated calls.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let expired = match self.wakeup {
            Some(wakeup) => now >= wakeup.deadline(),
            None => false,
        };
        if expired {
            self.wakeup = None;
            self.remaining = Duration::ZERO;
            self.mode = Mode::Paused;
            self.alert.play();
        }
        expired
    }

    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingAlert {
        armed: bool,
        plays: usize,
    }

    impl Alert for CountingAlert {
        fn arm(&mut self) {
            self.armed = true;
        }

        fn play(&mut self) {
            self.plays += 1;
        }
    }

    fn engine(max_secs: u64) -> TimerEngine<CountingAlert> {
        TimerEngine::new(Duration::from_secs(max_secs), CountingAlert::default()).unwrap()
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_zero_max_duration_rejected() {
        assert!(TimerEngine::new(Duration::ZERO, CountingAlert::default()).is_err());
    }

    #[test]
    fn test_initial_state_is_paused_at_zero() {
        let t0 = Instant::now();
        let mut e = engine(20);
        assert_eq!(e.mode(), Mode::Paused);
        assert_eq!(e.remaining_at(t0), Duration::ZERO);
        // Starting with nothing on the clock is a no-op.
        e.start_at(t0);
        assert_eq!(e.mode(), Mode::Paused);
    }

    #[test]
    fn test_pause_then_start_leaves_remaining_unchanged() {
        let t0 = Instant::now();
        let mut e = engine(20);
        e.set_remaining_at(ms(5000), t0);
        e.start_at(t0);
        e.pause_at(t0);
        e.start_at(t0);
        assert_eq!(e.mode(), Mode::Running);
        assert_eq!(e.remaining_at(t0), ms(5000));
    }

    #[test]
    fn test_pause_is_drift_corrected() {
        let t0 = Instant::now();
        let mut e = engine(20);
        e.set_remaining_at(ms(5000), t0);
        e.start_at(t0);
        e.pause_at(t0 + ms(2000));
        assert_eq!(e.mode(), Mode::Paused);
        assert_eq!(e.remaining_at(t0 + ms(2000)), ms(3000));
        // The cancelled wake-up must never surface as a late expiry.
        assert!(!e.tick_at(t0 + ms(6000)));
        assert_eq!(e.alert().plays, 0);
        assert_eq!(e.remaining_at(t0 + ms(6000)), ms(3000));
    }

    #[test]
    fn test_pause_after_deadline_floors_at_zero() {
        let t0 = Instant::now();
        let mut e = engine(20);
        e.set_remaining_at(ms(1000), t0);
        e.start_at(t0);
        e.pause_at(t0 + ms(2500));
        assert_eq!(e.remaining_at(t0 + ms(2500)), Duration::ZERO);
        assert_eq!(e.alert().plays, 0);
    }

    #[test]
    fn test_pause_when_paused_is_a_no_op() {
        let t0 = Instant::now();
        let mut e = engine(20);
        e.set_remaining_at(ms(4000), t0);
        e.pause_at(t0);
        e.pause_at(t0 + ms(1000));
        assert_eq!(e.mode(), Mode::Paused);
        assert_eq!(e.remaining_at(t0 + ms(1000)), ms(4000));
    }

    #[test]
    fn test_natural_expiry_fires_exactly_once() {
        let t0 = Instant::now();
        let mut e = engine(20);
        e.set_remaining_at(ms(20_000), t0);
        e.start_at(t0);
        assert!(!e.tick_at(t0 + ms(19_999)));
        // A jittered wake-up still expires, once.
        assert!(e.tick_at(t0 + ms(20_350)));
        assert_eq!(e.mode(), Mode::Paused);
        assert_eq!(e.remaining_at(t0 + ms(20_350)), Duration::ZERO);
        assert_eq!(e.alert().plays, 1);
        assert!(!e.tick_at(t0 + ms(30_000)));
        assert!(!e.tick_at(t0 + ms(40_000)));
        assert_eq!(e.alert().plays, 1);
    }

    #[test]
    fn test_expiry_at_exact_deadline() {
        let t0 = Instant::now();
        let mut e = engine(20);
        e.set_remaining_at(ms(1500), t0);
        e.start_at(t0);
        assert!(e.tick_at(t0 + ms(1500)));
    }

    #[test]
    fn test_remaining_decays_live_while_running() {
        let t0 = Instant::now();
        let mut e = engine(20);
        e.set_remaining_at(ms(8000), t0);
        e.start_at(t0);
        assert_eq!(e.remaining_at(t0 + ms(3000)), ms(5000));
        assert_eq!(e.snapshot_at(t0 + ms(3000)).mode, Mode::Running);
        // Past the deadline the live value floors at zero.
        assert_eq!(e.remaining_at(t0 + ms(9000)), Duration::ZERO);
    }

    #[test]
    fn test_set_remaining_clamps_to_max() {
        let t0 = Instant::now();
        let mut e = engine(20);
        e.set_remaining_at(Duration::from_secs(45), t0);
        assert_eq!(e.remaining_at(t0), Duration::from_secs(20));
    }

    #[test]
    fn test_set_remaining_zero_while_running_pauses_silently() {
        let t0 = Instant::now();
        let mut e = engine(20);
        e.set_remaining_at(ms(5000), t0);
        e.start_at(t0);
        e.set_remaining_at(Duration::ZERO, t0 + ms(1000));
        assert_eq!(e.mode(), Mode::Paused);
        assert_eq!(e.remaining_at(t0 + ms(1000)), Duration::ZERO);
        assert_eq!(e.alert().plays, 0);
        assert!(!e.tick_at(t0 + ms(10_000)));
    }

    #[test]
    fn test_set_remaining_while_running_restarts_the_deadline() {
        let t0 = Instant::now();
        let mut e = engine(20);
        e.set_remaining_at(ms(10_000), t0);
        e.start_at(t0);
        // Re-set to the same value 4 s in: the deadline moves to t0 + 14 s.
        e.set_remaining_at(ms(10_000), t0 + ms(4000));
        assert_eq!(e.mode(), Mode::Running);
        assert!(!e.tick_at(t0 + ms(11_000)));
        assert_eq!(e.remaining_at(t0 + ms(11_000)), ms(3000));
        assert!(e.tick_at(t0 + ms(14_000)));
        assert_eq!(e.alert().plays, 1);
    }

    #[test]
    fn test_shrinking_max_clamps_remaining() {
        let t0 = Instant::now();
        let mut e = engine(20);
        e.set_remaining_at(Duration::from_secs(18), t0);
        e.start_at(t0);
        e.set_max_duration_at(Duration::from_secs(10), t0 + ms(1000)).unwrap();
        assert_eq!(e.max_duration(), Duration::from_secs(10));
        assert_eq!(e.mode(), Mode::Running);
        assert_eq!(e.remaining_at(t0 + ms(1000)), Duration::from_secs(10));
        // Restarted from the clamped value, not the old deadline.
        assert!(e.tick_at(t0 + ms(11_000)));
    }

    #[test]
    fn test_growing_max_keeps_remaining() {
        let t0 = Instant::now();
        let mut e = engine(20);
        e.set_remaining_at(Duration::from_secs(12), t0);
        e.set_max_duration_at(Duration::from_secs(60), t0).unwrap();
        assert_eq!(e.remaining_at(t0), Duration::from_secs(12));
        assert!(e.set_max_duration_at(Duration::ZERO, t0).is_err());
    }

    #[test]
    fn test_alert_arming_is_observable() {
        let mut e = engine(20);
        assert!(!e.alert().armed);
        e.alert_mut().arm();
        assert!(e.alert().armed);
    }
}
