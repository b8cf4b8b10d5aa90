pub mod aggregator;
pub mod fingerprint;
pub mod hashtags;
pub mod normalize;
pub mod progress;
pub mod rank;
pub mod walker;


pub use aggregator::{Aggregator, MIN_POST_CHARS};
pub use progress::{LogSink, NullSink, ProgressSink};
pub use walker::PageWalker;

use feed_client::FeedClient;
use gleaner_core::{CoreError, Credentials, NormalizedPost, RunConfig};

/// Runs the full pipeline: aggregate across all queries, rank, renumber.
///
/// The returned sequence numbers form a contiguous 1..N run in final
/// presentation order. Only an authentication failure produces an error;
/// any other failure is absorbed per query and the accumulated result set
/// is returned.
pub async fn collect_posts(
    client: &dyn FeedClient,
    sink: &dyn ProgressSink,
    config: &RunConfig,
    credentials: &Credentials,
) -> Result<Vec<NormalizedPost>, CoreError> {
    config.validate()?;

    let mut results = Aggregator::new(client, sink).run(config, credentials).await?;
    rank::rank(&mut results, config.sort_mode);
    rank::renumber(&mut results);
    sink.run_completed(results.len());
    Ok(results)
}
