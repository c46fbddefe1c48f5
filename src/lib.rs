//! Stepwatch - step-based stopwatch instrumentation
//!
//! Features:
//! - Labeled step timing across one logical operation (e.g. one request)
//! - Interchangeable real, no-op and deterministic mock engines behind one trait
//! - Fork snapshots for timing independent concurrent branches
//! - Compact 32-bit wire codec (6-bit label index, 26-bit microseconds)
//! - Ambient context injection with a no-op fallback
//! - Aligned text reports and a stable JSON result shape

pub mod clock;
pub mod codec;
pub mod config;
pub mod context;
pub mod error;
pub mod mock;
pub mod noop;
pub mod results;
pub mod stopwatch;

pub use clock::{Clock, SystemClock, TickClock, Timestamp};
pub use codec::{decode, decode_bytes, encode, encode_bytes, MAX_LABELS, MAX_STEP_MICROS};
pub use config::{get_config, update_config, StopwatchConfig};
pub use context::{instrument, Context};
pub use error::{StopwatchError, StopwatchResult};
pub use mock::MockStopwatch;
pub use noop::NoopStopwatch;
pub use results::{Results, Step};
pub use stopwatch::{StepStopwatch, Stopwatch};

/// Initialize logging for binaries that embed the crate. Safe to call more
/// than once; later calls keep the first subscriber.
pub fn init() {
    let _ = tracing_subscriber::fmt::try_init();
    tracing::info!("stepwatch {} initialized", version());
}

/// Get the current crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
