//! Drag controller - pointer gestures to engine commands
//!
//! A stateless adapter between a continuous drag gesture and the discrete
//! engine operations. Each sample arrives in dial-local device coordinates
//! (origin at the dial center, y-axis down), is converted through the
//! mapper, and is forwarded immediately; samples apply in arrival order and
//! nothing is retained between events.

use std::time::{Duration, Instant};

use crate::{Alert, DialMapper, TimerEngine};

/// Forwards drag samples and tick taps to a [`TimerEngine`].
#[derive(Debug, Clone, Copy)]
pub struct DragController {
    mapper: DialMapper,
}

impl DragController {
    pub fn new(mapper: DialMapper) -> Self {
        Self { mapper }
    }

    pub fn mapper(&self) -> &DialMapper {
        &self.mapper
    }

    /// Begin a drag: pause the engine so the dial tracks the pointer
    /// without counting down, then apply the first sample.
    pub fn drag_start_at<A: Alert>(
        &self,
        engine: &mut TimerEngine<A>,
        x: f64,
        y: f64,
        now: Instant,
    ) {
        engine.pause_at(now);
        engine.set_remaining_at(self.mapper.position_to_duration(x, y), now);
    }

    pub fn drag_start<A: Alert>(&self, engine: &mut TimerEngine<A>, x: f64, y: f64) {
        self.drag_start_at(engine, x, y, Instant::now());
    }

    /// Apply an intermediate sample. Pausing is idempotent, so this also
    /// holds the engine paused if a start was missed.
    pub fn drag_move_at<A: Alert>(
        &self,
        engine: &mut TimerEngine<A>,
        x: f64,
        y: f64,
        now: Instant,
    ) {
        engine.pause_at(now);
        engine.set_remaining_at(self.mapper.position_to_duration(x, y), now);
    }

    pub fn drag_move<A: Alert>(&self, engine: &mut TimerEngine<A>, x: f64, y: f64) {
        self.drag_move_at(engine, x, y, Instant::now());
    }

    /// Release: commit the final sample and resume the countdown from it.
    pub fn drag_end_at<A: Alert>(
        &self,
        engine: &mut TimerEngine<A>,
        x: f64,
        y: f64,
        now: Instant,
    ) {
        engine.set_remaining_at(self.mapper.position_to_duration(x, y), now);
        engine.start_at(now);
    }

    pub fn drag_end<A: Alert>(&self, engine: &mut TimerEngine<A>, x: f64, y: f64) {
        self.drag_end_at(engine, x, y, Instant::now());
    }

    /// Tap a whole-second tick mark: the same transitions as a drag
    /// released directly at that duration.
    pub fn tap_tick_at<A: Alert>(&self, engine: &mut TimerEngine<A>, seconds: u64, now: Instant) {
        engine.set_remaining_at(Duration::from_secs(seconds), now);
        engine.start_at(now);
    }

    pub fn tap_tick<A: Alert>(&self, engine: &mut TimerEngine<A>, seconds: u64) {
        self.tap_tick_at(engine, seconds, Instant::now());
    }
}
