//! Ambient stopwatch injection for request-style call chains
//!
//! A [`Context`] is a typed value map threaded explicitly through a call
//! chain; no package-level mutable state. The stopwatch slot is keyed by a
//! private type, so no other context user can collide with it, and looking it
//! up when nothing was installed hands back the no-op variant rather than
//! failing.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::config;
use crate::error::StopwatchResult;
use crate::noop::NoopStopwatch;
use crate::stopwatch::Stopwatch;

/// Collision-resistant slot key: only this module can name the type
#[derive(Debug)]
struct StopwatchSlot(Box<dyn Stopwatch>);

/// Explicit per-operation value map, the Rust shape of a request context.
///
/// Owned by one logical flow; handing it onward transfers ownership to that
/// flow's single-threaded path.
#[derive(Default)]
pub struct Context {
    values: HashMap<TypeId, Box<dyn Any + Send>>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("values", &self.values.len())
            .finish()
    }
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under its type; replaces any previous value of the type
    pub fn insert<T: Any + Send>(&mut self, value: T) {
        self.values.insert(TypeId::of::<T>(), Box::new(value));
    }

    pub fn get<T: Any>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref::<T>())
    }

    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.values
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut::<T>())
    }

    pub fn remove<T: Any>(&mut self) -> Option<Box<T>> {
        self.values
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast::<T>().ok())
    }

    /// Install a stopwatch for downstream code to find
    pub fn set_stopwatch(&mut self, stopwatch: Box<dyn Stopwatch>) {
        self.insert(StopwatchSlot(stopwatch));
    }

    /// The ambient stopwatch. When none was installed, a no-op engine is
    /// installed and returned, so instrumented call sites never fail on
    /// absence.
    pub fn stopwatch_mut(&mut self) -> &mut dyn Stopwatch {
        if self.get::<StopwatchSlot>().is_none() {
            self.set_stopwatch(Box::new(NoopStopwatch::new()));
        }
        self.get_mut::<StopwatchSlot>()
            .map(|slot| slot.0.as_mut())
            .unwrap()
    }

    /// Remove and return the installed stopwatch, if any
    pub fn take_stopwatch(&mut self) -> Option<Box<dyn Stopwatch>> {
        self.remove::<StopwatchSlot>().map(|slot| slot.0)
    }
}

/// Run one unit of work under a freshly started, configured stopwatch.
///
/// The middleware shape without the transport: construct the engine the
/// global configuration selects, start it, make it retrievable through the
/// context, run `f`, then stop the engine if the work left it running and
/// emit the step report through `tracing`.
pub fn instrument<F, R>(ctx: &mut Context, f: F) -> StopwatchResult<R>
where
    F: FnOnce(&mut Context) -> R,
{
    let mut stopwatch = config::get_config().stopwatch();
    stopwatch.start()?;
    ctx.set_stopwatch(stopwatch);

    let out = f(ctx);

    let mut stopwatch = ctx
        .take_stopwatch()
        .unwrap_or_else(|| Box::new(NoopStopwatch::new()));
    if stopwatch.is_running() {
        stopwatch.stop()?;
    }

    let mut report = Vec::new();
    stopwatch.write_results(&mut report)?;
    if !report.is_empty() {
        tracing::info!("step report:\n{}", String::from_utf8_lossy(&report));
    }

    Ok(out)
}
