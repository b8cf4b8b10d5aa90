pub mod api;
pub mod rate_limiter;

#[cfg(test)]
mod tests;

pub use api::{AuthState, FeedListing, FeedPostData, HttpFeedClient};

use async_trait::async_trait;
use gleaner_core::{CoreError, Credentials, RawPost, SearchMode};

/// One batch of posts plus an implicit continuation cursor.
#[async_trait]
pub trait FeedPage: Send + Sync {
    /// Posts on this page, in feed order.
    fn posts(&self) -> &[RawPost];

    /// Whether the feed advertised a continuation for this page.
    fn has_more(&self) -> bool;

    /// Fetches the continuation. `Ok(None)` means the query is exhausted.
    async fn next_page(&self) -> Result<Option<Box<dyn FeedPage>>, CoreError>;
}

/// Search capability consumed by the collector pipeline. Transport,
/// authentication and rate limiting live behind this seam.
#[async_trait]
pub trait FeedClient: Send + Sync {
    /// Establishes a session. Failure here is fatal to a run.
    async fn authenticate(&self, credentials: &Credentials) -> Result<(), CoreError>;

    /// Fetches the first page for a query. `Ok(None)` means the query
    /// matched nothing.
    async fn search_first_page(
        &self,
        query: &str,
        mode: SearchMode,
        count_hint: u32,
    ) -> Result<Option<Box<dyn FeedPage>>, CoreError>;
}
