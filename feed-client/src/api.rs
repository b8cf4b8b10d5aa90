use crate::rate_limiter::{RateLimitConfig, RateLimiter};
use crate::{FeedClient, FeedPage};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gleaner_core::{CoreError, Credentials, FeedApiError, RawPost, SearchMode};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use url::Url;

const FEED_API_BASE: &str = "https://x.com/i/api/2";
const SEARCH_ENDPOINT: &str = "/search/adaptive.json";
const VERIFY_ENDPOINT: &str = "/account/verify.json";

/// Largest page size the search endpoint accepts.
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedListing {
    pub posts: Vec<FeedPostData>,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPostData {
    pub id: String,
    pub text: String,
    pub screen_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<FeedPostData> for RawPost {
    fn from(data: FeedPostData) -> Self {
        Self {
            id: data.id,
            text: data.text,
            author: data.screen_name,
            created_at: data.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub enum AuthState {
    NotAuthenticated,
    Authenticated(Credentials),
}

#[derive(Debug)]
struct ClientCore {
    http_client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
    auth: RwLock<AuthState>,
}

impl ClientCore {
    /// Cookie header and CSRF token for the current session. The search
    /// API expects the `ct0` cookie value mirrored in `x-csrf-token`.
    async fn auth_headers(&self) -> Result<(String, String), CoreError> {
        match &*self.auth.read().await {
            AuthState::Authenticated(credentials) => Ok((
                format!(
                    "ct0={}; auth_token={}",
                    credentials.ct0, credentials.auth_token
                ),
                credentials.ct0.clone(),
            )),
            AuthState::NotAuthenticated => Err(CoreError::Feed(
                FeedApiError::AuthenticationFailed {
                    reason: "client is not authenticated".to_string(),
                },
            )),
        }
    }

    async fn make_request(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<Response, CoreError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let (cookie, csrf_token) = self.auth_headers().await?;

        self.rate_limiter.acquire_permit().await;
        debug!("Acquired rate limit permit for {}", endpoint);

        info!("Making feed API request: GET {}", endpoint);
        let response = match self
            .http_client
            .get(&url)
            .header("Cookie", cookie)
            .header("x-csrf-token", csrf_token)
            .query(query_params)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Network error for GET {}: {}", endpoint, e);
                if e.is_timeout() {
                    return Err(CoreError::Feed(FeedApiError::RequestTimeout));
                }
                return Err(CoreError::Network(e));
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!("Request successful: {} {}", status, endpoint);
            return Ok(response);
        }

        error!("Request failed with status {} for {}", status, endpoint);
        match status.as_u16() {
            401 => Err(CoreError::Feed(FeedApiError::InvalidToken)),
            403 => Err(CoreError::Feed(FeedApiError::AuthenticationFailed {
                reason: "access forbidden by the feed".to_string(),
            })),
            429 => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                warn!("Rate limited, retry after {} seconds", retry_after);
                Err(CoreError::Feed(FeedApiError::RateLimitExceeded {
                    retry_after,
                }))
            }
            code if status.is_server_error() => {
                Err(CoreError::Feed(FeedApiError::ServerError { status_code: code }))
            }
            code => Err(CoreError::Feed(FeedApiError::InvalidResponse {
                details: format!("unexpected status {} for {}", code, endpoint),
            })),
        }
    }

    async fn fetch_listing(
        &self,
        query: &str,
        mode: SearchMode,
        count: u32,
        cursor: Option<&str>,
    ) -> Result<FeedListing, CoreError> {
        let count_str = count.to_string();
        let mut params = vec![
            ("q", query),
            ("product", mode.as_product()),
            ("count", count_str.as_str()),
        ];
        if let Some(cursor) = cursor {
            params.push(("cursor", cursor));
        }

        let response = self.make_request(SEARCH_ENDPOINT, &params).await?;
        let listing: FeedListing = response.json().await.map_err(|e| {
            error!("Failed to parse search response: {}", e);
            CoreError::Feed(FeedApiError::InvalidResponse {
                details: format!("failed to parse search results for '{}'", query),
            })
        })?;

        debug!(
            "Retrieved {} posts for '{}' (cursor present: {})",
            listing.posts.len(),
            query,
            listing.next_cursor.is_some()
        );
        Ok(listing)
    }
}

/// Feed client speaking the cookie-authenticated search API.
#[derive(Debug, Clone)]
pub struct HttpFeedClient {
    core: Arc<ClientCore>,
}

impl HttpFeedClient {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self::with_base_url(user_agent, FEED_API_BASE)
            .expect("default feed API base URL is valid")
    }

    /// Builds a client against a different API base, e.g. a local stub.
    pub fn with_base_url(
        user_agent: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let base_url = base_url.into();
        Url::parse(&base_url).map_err(|e| CoreError::InvalidInput {
            message: format!("invalid feed API base URL '{}': {}", base_url, e),
        })?;

        let http_client = Client::builder()
            .user_agent(user_agent.into())
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            core: Arc::new(ClientCore {
                http_client,
                rate_limiter: RateLimiter::new(RateLimitConfig::search_api()),
                base_url,
                auth: RwLock::new(AuthState::NotAuthenticated),
            }),
        })
    }

    pub async fn is_authenticated(&self) -> bool {
        matches!(&*self.core.auth.read().await, AuthState::Authenticated(_))
    }
}

#[async_trait]
impl FeedClient for HttpFeedClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<(), CoreError> {
        {
            let mut auth = self.core.auth.write().await;
            *auth = AuthState::Authenticated(credentials.clone());
        }

        match self.core.make_request(VERIFY_ENDPOINT, &[]).await {
            Ok(_) => {
                info!("Feed session verified");
                Ok(())
            }
            Err(e) => {
                let mut auth = self.core.auth.write().await;
                *auth = AuthState::NotAuthenticated;
                match e {
                    CoreError::Feed(
                        FeedApiError::InvalidToken | FeedApiError::AuthenticationFailed { .. },
                    ) => Err(CoreError::Feed(FeedApiError::AuthenticationFailed {
                        reason: "credentials rejected by the feed".to_string(),
                    })),
                    other => Err(other),
                }
            }
        }
    }

    async fn search_first_page(
        &self,
        query: &str,
        mode: SearchMode,
        count_hint: u32,
    ) -> Result<Option<Box<dyn FeedPage>>, CoreError> {
        let count = count_hint.clamp(1, MAX_PAGE_SIZE);
        let listing = self.core.fetch_listing(query, mode, count, None).await?;
        Ok(HttpFeedPage::from_listing(
            Arc::clone(&self.core),
            query,
            mode,
            count,
            listing,
        ))
    }
}

struct HttpFeedPage {
    core: Arc<ClientCore>,
    query: String,
    mode: SearchMode,
    count: u32,
    posts: Vec<RawPost>,
    next_cursor: Option<String>,
}

impl HttpFeedPage {
    /// An empty listing maps to `None`: no results on open, exhausted on
    /// advance.
    fn from_listing(
        core: Arc<ClientCore>,
        query: &str,
        mode: SearchMode,
        count: u32,
        listing: FeedListing,
    ) -> Option<Box<dyn FeedPage>> {
        if listing.posts.is_empty() {
            return None;
        }
        Some(Box::new(Self {
            core,
            query: query.to_string(),
            mode,
            count,
            posts: listing.posts.into_iter().map(RawPost::from).collect(),
            next_cursor: listing.next_cursor,
        }))
    }
}

#[async_trait]
impl FeedPage for HttpFeedPage {
    fn posts(&self) -> &[RawPost] {
        &self.posts
    }

    fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }

    async fn next_page(&self) -> Result<Option<Box<dyn FeedPage>>, CoreError> {
        let cursor = match &self.next_cursor {
            Some(cursor) => cursor,
            None => return Ok(None),
        };

        let listing = self
            .core
            .fetch_listing(&self.query, self.mode, self.count, Some(cursor))
            .await?;
        Ok(HttpFeedPage::from_listing(
            Arc::clone(&self.core),
            &self.query,
            self.mode,
            self.count,
            listing,
        ))
    }
}
