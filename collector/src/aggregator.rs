use crate::fingerprint::{self, Fingerprint};
use crate::hashtags;
use crate::normalize;
use crate::progress::ProgressSink;
use crate::walker::PageWalker;
use feed_client::FeedClient;
use gleaner_core::{CoreError, Credentials, NormalizedPost, RawPost, RunConfig};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Minimum number of characters a normalized post must keep to count as
/// real content. Anything shorter is discarded before fingerprinting.
pub const MIN_POST_CHARS: usize = 5;

/// Orchestrates one collection run: walks every query in submitted order,
/// normalizes and deduplicates posts, and enforces the global limit.
///
/// The fingerprint set and the growing result set live for exactly one
/// `run` call; nothing is carried across runs.
pub struct Aggregator<'a> {
    client: &'a dyn FeedClient,
    sink: &'a dyn ProgressSink,
}

impl<'a> Aggregator<'a> {
    pub fn new(client: &'a dyn FeedClient, sink: &'a dyn ProgressSink) -> Self {
        Self { client, sink }
    }

    /// Runs the collection pass and returns the result set in discovery
    /// order, at most `config.limit` entries.
    ///
    /// Authentication failure aborts immediately with no queries
    /// attempted. A failed first-page fetch or a mid-query pagination
    /// failure is absorbed: the query's posts collected so far are kept
    /// and the walk moves to the next query.
    pub async fn run(
        &self,
        config: &RunConfig,
        credentials: &Credentials,
    ) -> Result<Vec<NormalizedPost>, CoreError> {
        self.client.authenticate(credentials).await?;
        info!("Feed session established");

        let mut seen: HashSet<Fingerprint> = HashSet::new();
        let mut results: Vec<NormalizedPost> = Vec::new();

        let total = config.queries.len();
        for (index, query) in config.queries.iter().enumerate() {
            if results.len() >= config.limit {
                debug!("Global limit reached, skipping remaining queries");
                break;
            }
            self.sink.query_started(query, index, total);

            let remaining = (config.limit - results.len()) as u32;
            let mut walker =
                match PageWalker::open(self.client, query, config.search_mode, remaining).await {
                    Ok(Some(walker)) => walker,
                    Ok(None) => continue,
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => {
                        warn!("Search failed for '{}': {}", query, e);
                        self.sink.query_failed(query, &e);
                        continue;
                    }
                };

            loop {
                self.collect_page(walker.posts(), config.limit, &mut seen, &mut results);
                if results.len() >= config.limit {
                    break;
                }
                match walker.advance().await {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => {
                        warn!(
                            "Pagination failed for '{}', keeping {} posts collected so far: {}",
                            query,
                            results.len(),
                            e
                        );
                        self.sink.query_failed(query, &e);
                        break;
                    }
                }
            }
        }

        info!("Collection pass finished with {} posts", results.len());
        Ok(results)
    }

    /// Processes one page in feed order. Posts below the quality
    /// threshold are dropped silently; duplicates lose to the first
    /// occurrence. Stops as soon as the global limit is hit.
    fn collect_page(
        &self,
        posts: &[RawPost],
        limit: usize,
        seen: &mut HashSet<Fingerprint>,
        results: &mut Vec<NormalizedPost>,
    ) {
        for post in posts {
            if results.len() >= limit {
                return;
            }

            let clean = normalize::normalize(&post.text);
            if clean.chars().count() < MIN_POST_CHARS {
                debug!("Discarding post {} below quality threshold", post.id);
                continue;
            }

            let key = fingerprint::fingerprint(&clean);
            if !seen.insert(key) {
                debug!("Discarding duplicate post {}", post.id);
                continue;
            }

            let tags = hashtags::extract(&post.text);
            results.push(NormalizedPost {
                sequence: results.len() + 1,
                text: clean,
                tags,
            });
            self.sink.post_collected(results.len(), limit);
        }
    }
}
