//! The stopwatch contract and the real step-recording engine

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};

use crate::clock::{Clock, SystemClock, Timestamp};
use crate::error::{StopwatchError, StopwatchResult};
use crate::results::{Results, Step};

/// The full stopwatch operation set, implemented by the real engine
/// ([`StepStopwatch`]), the no-op variant ([`crate::noop::NoopStopwatch`]) and
/// the deterministic mock ([`crate::mock::MockStopwatch`]).
///
/// An instance is created idle, transitions to running on `start`, records a
/// completed step on every `step`, and returns to idle on `stop`. Calling a
/// mutating operation in the wrong state is an invalid-usage fault
/// ([`StopwatchError::InvalidState`]), not a recoverable condition. Read
/// accessors are valid in any state and idempotent.
///
/// One instance belongs to one logical flow; there is no internal locking.
/// Concurrent branches each take their own [`Stopwatch::fork`] snapshot.
pub trait Stopwatch: fmt::Debug + Send {
    /// Start timing at the injected clock's current reading
    fn start(&mut self) -> StopwatchResult<()>;

    /// Start timing at an explicit reading
    fn start_with_time(&mut self, t: Timestamp) -> StopwatchResult<()>;

    /// Close the current interval under `label` and open the next one
    fn step(&mut self, label: &str) -> StopwatchResult<()>;

    /// Stop timing, discarding the still-open trailing interval
    fn stop(&mut self) -> StopwatchResult<()>;

    fn is_running(&self) -> bool;

    /// A deep, fully independent snapshot: clock source, running flag and
    /// every recorded step by value. Future mutations on either side never
    /// affect the other.
    fn fork(&self) -> Box<dyn Stopwatch>;

    /// The completed steps in chronological order; empty when none exist
    fn results(&self) -> Results;

    /// The same data as one single-entry label -> nanoseconds map per step,
    /// preserving chronological order
    fn result_map(&self) -> Vec<HashMap<String, i64>> {
        self.results()
            .steps
            .into_iter()
            .map(|step| {
                let mut entry = HashMap::new();
                entry.insert(step.label, step.duration);
                entry
            })
            .collect()
    }

    /// Write the aligned text report to the given writer
    fn write_results(&self, w: &mut dyn Write) -> StopwatchResult<()> {
        self.results().write_to(w)
    }

    /// Write the aligned text report to stdout
    fn show_results(&self) -> StopwatchResult<()> {
        self.write_results(&mut io::stdout())
    }
}

/// A completed interval with explicit start and end readings
#[derive(Debug, Clone)]
struct StepRecord {
    label: String,
    start: Timestamp,
    end: Timestamp,
}

/// The real engine: records interval boundaries against an injectable clock.
///
/// Interval-pair model: each completed step owns its start and end reading;
/// the open trailing interval lives in `open` and is discarded by `stop`.
#[derive(Debug, Clone)]
pub struct StepStopwatch {
    clock: Box<dyn Clock>,
    steps: Vec<StepRecord>,
    open: Option<Timestamp>,
}

impl StepStopwatch {
    /// A new idle stopwatch on the system clock
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// A new idle stopwatch on the given clock
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            steps: Vec::new(),
            open: None,
        }
    }

    /// A new stopwatch that is already running, for call sites that would
    /// otherwise start it on the next line
    pub fn started() -> Self {
        let mut sw = Self::new();
        let t = sw.clock.now();
        sw.open = Some(t);
        sw
    }
}

impl Default for StepStopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch for StepStopwatch {
    fn start(&mut self) -> StopwatchResult<()> {
        let t = self.clock.now();
        self.start_with_time(t)
    }

    fn start_with_time(&mut self, t: Timestamp) -> StopwatchResult<()> {
        if self.open.is_some() {
            return Err(StopwatchError::invalid_state("stopwatch already running"));
        }
        self.open = Some(t);
        Ok(())
    }

    fn step(&mut self, label: &str) -> StopwatchResult<()> {
        let start = self
            .open
            .ok_or_else(|| StopwatchError::invalid_state("stopwatch not running"))?;
        let now = self.clock.now();
        self.steps.push(StepRecord {
            label: label.to_string(),
            start,
            end: now,
        });
        self.open = Some(now);
        Ok(())
    }

    fn stop(&mut self) -> StopwatchResult<()> {
        if self.open.take().is_none() {
            return Err(StopwatchError::invalid_state("stopwatch already stopped"));
        }
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.open.is_some()
    }

    fn fork(&self) -> Box<dyn Stopwatch> {
        Box::new(self.clone())
    }

    fn results(&self) -> Results {
        Results {
            steps: self
                .steps
                .iter()
                .map(|record| Step {
                    label: record.label.clone(),
                    duration: record.end.since(record.start),
                })
                .collect(),
        }
    }
}
