//! Time sources for the scene animator.

use instant::Instant;
use std::cell::Cell;
use std::rc::Rc;

pub trait Clock {
    /// Seconds since an arbitrary, fixed origin.
    fn now_secs(&self) -> f64;
}

/// Wall clock backed by `instant` (performance.now() in the browser).
#[derive(Clone, Copy, Debug)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Shared, hand-advanced clock. Clones observe the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }

    /// Jump to an absolute time. Going backwards is allowed here so callers can
    /// check that consumers stay monotonic.
    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }
}

/// Elapsed time since construction, never decreasing.
#[derive(Debug)]
pub struct SceneClock<C: Clock> {
    source: C,
    start: f64,
    elapsed: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tick {
    pub elapsed: f32,
    pub delta: f32,
}

impl<C: Clock> SceneClock<C> {
    pub fn new(source: C) -> Self {
        let start = source.now_secs();
        Self {
            source,
            start,
            elapsed: 0.0,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn tick(&mut self) -> Tick {
        let raw = self.source.now_secs() - self.start;
        let elapsed = if raw.is_finite() {
            raw.max(self.elapsed)
        } else {
            self.elapsed
        };
        let delta = elapsed - self.elapsed;
        self.elapsed = elapsed;
        Tick {
            elapsed: elapsed as f32,
            delta: delta as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_clock_starts_at_zero_and_ignores_rewinds() {
        let src = ManualClock::new();
        src.set(10.0);
        let mut clock = SceneClock::new(src.clone());
        assert_eq!(clock.tick().elapsed, 0.0);
        src.advance(0.5);
        let t = clock.tick();
        assert_eq!(t.elapsed, 0.5);
        assert_eq!(t.delta, 0.5);
        src.set(9.0);
        let t = clock.tick();
        assert_eq!(t.elapsed, 0.5);
        assert_eq!(t.delta, 0.0);
    }
}
