//! Configuration for stopwatch construction at instrumented call sites

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::RwLock;

use crate::error::StopwatchResult;
use crate::mock::MockStopwatch;
use crate::noop::NoopStopwatch;
use crate::stopwatch::{StepStopwatch, Stopwatch};

/// Which engine variant instrumented call sites receive.
///
/// With `enabled` off, call sites get the no-op variant and instrumentation
/// costs nothing. `mock_clock` swaps in the deterministic one-millisecond
/// clock for reproducible output in tests and demos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopwatchConfig {
    pub enabled: bool,
    pub mock_clock: bool,
}

impl Default for StopwatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mock_clock: false,
        }
    }
}

impl StopwatchConfig {
    /// Construct the engine variant this configuration selects
    pub fn stopwatch(&self) -> Box<dyn Stopwatch> {
        if !self.enabled {
            Box::new(NoopStopwatch::new())
        } else if self.mock_clock {
            Box::new(MockStopwatch::new())
        } else {
            Box::new(StepStopwatch::new())
        }
    }

    pub fn load_from_file(path: &Path) -> StopwatchResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: StopwatchConfig = serde_json::from_str(&content)?;
        tracing::info!("stopwatch configuration loaded from {:?}", path);
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> StopwatchResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("stopwatch configuration saved to {:?}", path);
        Ok(())
    }
}

lazy_static! {
    static ref CONFIG: RwLock<StopwatchConfig> = RwLock::new(StopwatchConfig::default());
}

/// Get the global configuration
pub fn get_config() -> StopwatchConfig {
    CONFIG.read().unwrap().clone()
}

/// Update the global configuration
pub fn update_config<F>(f: F)
where
    F: FnOnce(&mut StopwatchConfig),
{
    let mut config = CONFIG.write().unwrap();
    f(&mut config);
}
