//! Frame driver contract and the clock feeding it

use crate::error::SceneError;
use crate::graph::SceneGraph;
use std::time::Instant;

/// Something updated once per rendered frame.
///
/// `elapsed` is cumulative scene time in seconds and never decreases.
/// Implementors only touch the nodes they own.
pub trait FrameCallback<G: SceneGraph> {
    fn on_frame(&mut self, graph: &mut G, elapsed: f32) -> Result<(), SceneError>;
}

/// Monotonic scene clock.
///
/// Wall-clock deltas are scaled by `time_scale` before they accumulate, so
/// changing the scale slows or speeds motion without making it jump.
#[derive(Debug)]
pub struct FrameClock {
    last_tick: Instant,
    elapsed: f64,
    pub time_scale: f32,
    pub paused: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            elapsed: 0.0,
            time_scale: 1.0,
            paused: false,
        }
    }

    /// Sample the wall clock and return the new elapsed scene time.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = (now - self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.advance_by(delta)
    }

    /// Advance by an explicit wall-clock delta in seconds.
    pub fn advance_by(&mut self, delta: f32) -> f32 {
        if !self.paused {
            self.elapsed += (delta.max(0.0) * self.time_scale.max(0.0)) as f64;
        }
        self.elapsed()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_scaled_time() {
        let mut clock = FrameClock::new();
        clock.advance_by(0.5);
        clock.time_scale = 2.0;
        assert_eq!(clock.advance_by(0.25), 1.0);
    }

    #[test]
    fn never_runs_backwards() {
        let mut clock = FrameClock::new();
        clock.advance_by(1.0);
        assert_eq!(clock.advance_by(-5.0), 1.0);
        clock.time_scale = -1.0;
        assert_eq!(clock.advance_by(1.0), 1.0);
    }

    #[test]
    fn pause_freezes_time() {
        let mut clock = FrameClock::new();
        clock.advance_by(0.5);
        clock.paused = true;
        assert_eq!(clock.advance_by(3.0), 0.5);
        clock.paused = false;
        assert_eq!(clock.advance_by(0.5), 1.0);
    }

    #[test]
    fn tick_is_monotonic() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        let b = clock.tick();
        assert!(b >= a);
    }
}
