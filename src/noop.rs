//! The do-nothing stopwatch variant
//!
//! Keeps instrumentation call sites lexically present in production code
//! without any logical or performance effect. Also the default an ambient
//! [`crate::context::Context`] hands out when no engine was installed.

use std::collections::HashMap;
use std::io::Write;

use crate::clock::Timestamp;
use crate::error::StopwatchResult;
use crate::results::Results;
use crate::stopwatch::Stopwatch;

/// A stopwatch whose every operation is a deliberate no-op.
///
/// Never raises either error class; accessors return empty values in any
/// call order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStopwatch;

impl NoopStopwatch {
    pub fn new() -> Self {
        NoopStopwatch
    }
}

impl Stopwatch for NoopStopwatch {
    fn start(&mut self) -> StopwatchResult<()> {
        Ok(())
    }

    fn start_with_time(&mut self, _t: Timestamp) -> StopwatchResult<()> {
        Ok(())
    }

    fn step(&mut self, _label: &str) -> StopwatchResult<()> {
        Ok(())
    }

    fn stop(&mut self) -> StopwatchResult<()> {
        Ok(())
    }

    fn is_running(&self) -> bool {
        false
    }

    fn fork(&self) -> Box<dyn Stopwatch> {
        Box::new(NoopStopwatch)
    }

    fn results(&self) -> Results {
        Results::new()
    }

    fn result_map(&self) -> Vec<HashMap<String, i64>> {
        Vec::new()
    }

    fn write_results(&self, _w: &mut dyn Write) -> StopwatchResult<()> {
        Ok(())
    }

    fn show_results(&self) -> StopwatchResult<()> {
        Ok(())
    }
}
