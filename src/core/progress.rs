//! Defines an abstraction over the progress reporting mechanism.

use tokio::sync::mpsc;

/// A trait that abstracts the publishing of job progress percentages.
/// This is "fire-and-forget" and doesn't return a result, simplifying its use
/// from the middle of generation loops.
///
/// Percentages are integers in `0..=100` and arrive in non-decreasing order
/// for a given job. Implementations must be cheap and non-blocking.
pub trait ProgressSink: Send + Sync {
    fn publish(&self, percent: u8);
}

/// Discards every progress event. For headless callers and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn publish(&self, _percent: u8) {}
}

/// Forwards progress events into a tokio channel, decoupling the generation
/// loop from whatever consumes the events (a UI bridge, a logger, a test).
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<u8>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<u8>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelSink {
    fn publish(&self, percent: u8) {
        // The receiver may be gone (shell shut down mid-job); we log and
        // keep going rather than failing the job over a progress event.
        if self.tx.send(percent).is_err() {
            tracing::warn!("Progress receiver dropped; discarding {}% event", percent);
        }
    }
}

/// Any `Fn(u8)` closure is a sink, for callers that prefer callbacks.
impl<F> ProgressSink for F
where
    F: Fn(u8) + Send + Sync,
{
    fn publish(&self, percent: u8) {
        self(percent)
    }
}

/// Integer percentage for `done` of `total` items. `total` must be non-zero.
pub(crate) fn percent_done(done: usize, total: usize) -> u8 {
    ((done as f64 / total as f64) * 100.0).round() as u8
}
