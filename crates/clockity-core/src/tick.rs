//! Tick contract between the engines and the scheduler

use std::time::Duration;

/// An engine driven by periodic ticks.
///
/// The scheduler never touches engine internals; it only asks how long to
/// wait and then calls [`Tick::advance`].
pub trait Tick: Send + 'static {
    /// Delay until the next advance, or `None` when there is nothing to drive
    fn cadence(&self) -> Option<Duration>;

    /// Perform one step. A no-op in phases that do not tick.
    fn advance(&mut self);
}
