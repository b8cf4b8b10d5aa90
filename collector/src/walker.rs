use feed_client::{FeedClient, FeedPage};
use gleaner_core::{CoreError, RawPost, SearchMode};
use tracing::debug;

/// Drives pagination for a single query against the feed client.
///
/// Holds exactly one page at a time; the caller processes `posts()` and
/// then decides whether to `advance`. There is no retry here: any fetch
/// error is terminal for the query and surfaces to the caller.
pub struct PageWalker {
    page: Box<dyn FeedPage>,
}

impl PageWalker {
    /// Opens the walk with the first page. `Ok(None)` means the query
    /// matched nothing.
    pub async fn open(
        client: &dyn FeedClient,
        query: &str,
        mode: SearchMode,
        count_hint: u32,
    ) -> Result<Option<Self>, CoreError> {
        match client.search_first_page(query, mode, count_hint).await? {
            Some(page) => Ok(Some(Self { page })),
            None => {
                debug!("No results for query '{}'", query);
                Ok(None)
            }
        }
    }

    /// Posts of the current page, in feed order.
    pub fn posts(&self) -> &[RawPost] {
        self.page.posts()
    }

    /// Moves to the next page. `Ok(false)` means the query is exhausted;
    /// no fetch is issued when the current page advertises no
    /// continuation.
    pub async fn advance(&mut self) -> Result<bool, CoreError> {
        if !self.page.has_more() {
            return Ok(false);
        }
        match self.page.next_page().await? {
            Some(next) => {
                self.page = next;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
