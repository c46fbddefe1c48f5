//! Injectable time sources for the stopwatch engines

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A wall-clock reading in nanoseconds.
///
/// Stored as a signed count so that step durations (differences between two
/// readings) share the representation used by [`crate::results::Step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn from_nanos(nanos: i64) -> Self {
        Timestamp(nanos)
    }

    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    /// Nanoseconds elapsed between `earlier` and this reading
    pub const fn since(self, earlier: Timestamp) -> i64 {
        self.0 - earlier.0
    }
}

/// Current-time provider injected into every stopwatch engine.
///
/// One clock instance belongs to one engine; forking an engine clones the
/// clock along with the recorded state.
pub trait Clock: fmt::Debug + Send {
    /// The current reading. Takes `&mut self` so synthetic clocks can advance.
    fn now(&mut self) -> Timestamp;

    fn boxed_clone(&self) -> Box<dyn Clock>;
}

impl Clone for Box<dyn Clock> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

/// The real wall clock, nanoseconds since the Unix epoch
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&mut self) -> Timestamp {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as i64)
            .unwrap_or(0);
        Timestamp::from_nanos(nanos)
    }

    fn boxed_clone(&self) -> Box<dyn Clock> {
        Box::new(*self)
    }
}

/// A synthetic clock that advances by a fixed tick on every reading,
/// independent of real elapsed time. Drives [`crate::mock::MockStopwatch`].
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    base: Timestamp,
    tick_nanos: i64,
    reads: i64,
}

impl TickClock {
    /// One millisecond per reading
    pub fn new() -> Self {
        Self::with_tick(1_000_000)
    }

    pub fn with_tick(tick_nanos: i64) -> Self {
        Self {
            base: Timestamp::default(),
            tick_nanos,
            reads: 0,
        }
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TickClock {
    fn now(&mut self) -> Timestamp {
        let reading = Timestamp::from_nanos(self.base.as_nanos() + self.reads * self.tick_nanos);
        self.reads += 1;
        reading
    }

    fn boxed_clone(&self) -> Box<dyn Clock> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_advances() {
        let mut clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b.since(a) >= 0);
        assert!(a.as_nanos() > 0);
    }

    #[test]
    fn test_tick_clock_is_deterministic() {
        let mut clock = TickClock::new();
        assert_eq!(clock.now().as_nanos(), 0);
        assert_eq!(clock.now().as_nanos(), 1_000_000);
        assert_eq!(clock.now().as_nanos(), 2_000_000);
    }

    #[test]
    fn test_tick_clock_clone_diverges() {
        let mut clock = TickClock::with_tick(500);
        clock.now();
        let mut forked = clock.boxed_clone();
        // Both resume from the same state, then advance independently
        assert_eq!(clock.now().as_nanos(), forked.now().as_nanos());
        clock.now();
        assert_eq!(forked.now().as_nanos(), 1_000);
        assert_eq!(clock.now().as_nanos(), 1_500);
    }
}
