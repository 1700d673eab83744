//! Frame timing: a swappable time source, per-frame delta time and the
//! periodic meteor spawn trigger.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time since an arbitrary origin.
pub trait TimeSource {
    fn now(&self) -> Duration;
}

/// Wall-clock time measured from construction.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for tests.  Clones share the same time, so a test can
/// keep one handle and give another to the session.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

// ── Frame clock ───────────────────────────────────────────────────────────────

/// Turns successive readings of a `TimeSource` into delta times.
pub struct FrameClock<T: TimeSource> {
    source: T,
    last: Duration,
    max_dt: f32,
}

impl<T: TimeSource> FrameClock<T> {
    /// `max_dt` is the longest step `tick` will ever report, in seconds.
    pub fn new(source: T, max_dt: f32) -> Self {
        let last = source.now();
        Self { source, last, max_dt }
    }

    /// Seconds since the previous tick (or since construction).
    pub fn tick(&mut self) -> f32 {
        let now = self.source.now();
        let dt = now.saturating_sub(self.last).as_secs_f32();
        self.last = now;
        dt.min(self.max_dt)
    }
}

// ── Spawn timer ───────────────────────────────────────────────────────────────

/// Fires once every `interval` of accumulated time.
#[derive(Clone, Debug)]
pub struct SpawnTimer {
    interval: Duration,
    elapsed: Duration,
}

impl SpawnTimer {
    /// Panics on a zero interval; `GameConfig::validate` rejects one.
    pub fn new(interval: Duration) -> Self {
        assert!(!interval.is_zero(), "spawn interval must be non-zero");
        Self { interval, elapsed: Duration::ZERO }
    }

    /// Accumulate `dt` and return how many triggers fired.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fired += 1;
        }
        fired
    }
}
