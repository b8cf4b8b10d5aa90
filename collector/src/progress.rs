use gleaner_core::CoreError;
use tracing::{info, warn};

/// Receives pipeline status events. Every method has a no-op default so a
/// sink only implements what it renders; the pipeline never depends on
/// how events are shown.
pub trait ProgressSink: Send + Sync {
    /// A query is about to be searched. `index` is 0-based.
    fn query_started(&self, _query: &str, _index: usize, _total: usize) {}

    /// A query was abandoned after a fetch failure.
    fn query_failed(&self, _query: &str, _error: &CoreError) {}

    /// A post passed the filters and entered the result set.
    fn post_collected(&self, _collected: usize, _limit: usize) {}

    /// The run finished and the result set is final.
    fn run_completed(&self, _total: usize) {}
}

/// Sink that drops every event.
pub struct NullSink;

impl ProgressSink for NullSink {}

/// Sink that renders events through the tracing subscriber.
pub struct LogSink;

impl ProgressSink for LogSink {
    fn query_started(&self, query: &str, index: usize, total: usize) {
        info!("Searching ({}/{}): {}", index + 1, total, query);
    }

    fn query_failed(&self, query: &str, error: &CoreError) {
        warn!("Query '{}' abandoned: {}", query, error);
    }

    fn run_completed(&self, total: usize) {
        info!("Run complete: {} posts collected", total);
    }
}
