//! Step/duration data model and the aligned text report

use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::StopwatchResult;

/// One labeled interval of elapsed time within a timed operation.
///
/// `duration` is a signed nanosecond count; engines only ever produce
/// non-negative values. The JSON field names and nanosecond unit are part of
/// the interchange contract and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub label: String,
    pub duration: i64,
}

/// The ordered list of steps produced by one timed operation.
///
/// Insertion order is chronological order. Labels carry no uniqueness
/// constraint; only position identifies a step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Results {
    pub steps: Vec<Step>,
}

impl Results {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Sum of all step durations in nanoseconds
    pub fn total_nanos(&self) -> i64 {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Write the aligned text report.
    ///
    /// One `label : <ms>` line per step with the label column padded to the
    /// longest label, a dashed separator as wide as the widest rendered line,
    /// then a `total` line. Downstream log scrapers depend on this exact
    /// layout.
    pub fn write_to(&self, w: &mut dyn Write) -> StopwatchResult<()> {
        let width = self.steps.iter().map(|s| s.label.len()).max().unwrap_or(0);

        let mut out = String::new();
        let mut longest_line = 0;
        for step in &self.steps {
            let line = format!(
                "{:<width$} : {}\n",
                step.label,
                millisecond_str(step.duration),
                width = width
            );
            if line.len() > longest_line {
                longest_line = line.len();
            }
            out.push_str(&line);
        }

        out.push_str(&"-".repeat(longest_line));
        out.push('\n');
        out.push_str(&format!(
            "{:<width$} : {}\n",
            "total",
            millisecond_str(self.total_nanos()),
            width = width
        ));

        w.write_all(out.as_bytes())?;
        Ok(())
    }
}

/// Render a nanosecond duration as fractional milliseconds, 6 decimal places
pub(crate) fn millisecond_str(nanos: i64) -> String {
    format!("{:.6}ms", nanos as f64 / 1_000_000.0)
}
