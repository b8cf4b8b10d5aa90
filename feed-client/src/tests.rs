use crate::api::{FeedListing, FeedPostData};
use crate::rate_limiter::{RateLimitConfig, RateLimiter};
use crate::{FeedClient, HttpFeedClient};
use gleaner_core::{CoreError, FeedApiError, RawPost, SearchMode};

#[test]
fn test_listing_parsing() {
    let raw = r#"{
        "posts": [
            {
                "id": "1801",
                "text": "Borrow checker appreciation post #rust",
                "screen_name": "ferris",
                "created_at": "2024-05-01T12:00:00Z"
            },
            {
                "id": "1802",
                "text": "plain post",
                "screen_name": null,
                "created_at": null
            }
        ],
        "next_cursor": "scroll:abc123"
    }"#;

    let listing: FeedListing = serde_json::from_str(raw).unwrap();
    assert_eq!(listing.posts.len(), 2);
    assert_eq!(listing.next_cursor.as_deref(), Some("scroll:abc123"));
    assert_eq!(listing.posts[0].id, "1801");
    assert_eq!(listing.posts[0].screen_name.as_deref(), Some("ferris"));
    assert!(listing.posts[1].created_at.is_none());
}

#[test]
fn test_listing_without_cursor() {
    let raw = r#"{ "posts": [], "next_cursor": null }"#;
    let listing: FeedListing = serde_json::from_str(raw).unwrap();
    assert!(listing.posts.is_empty());
    assert!(listing.next_cursor.is_none());
}

#[test]
fn test_post_data_conversion() {
    let data = FeedPostData {
        id: "42".to_string(),
        text: "Hello #world".to_string(),
        screen_name: Some("someone".to_string()),
        created_at: None,
    };

    let post: RawPost = data.into();
    assert_eq!(post.id, "42");
    assert_eq!(post.text, "Hello #world");
    assert_eq!(post.author.as_deref(), Some("someone"));
    assert!(post.created_at.is_none());
}

#[test]
fn test_search_mode_products() {
    assert_eq!(SearchMode::Latest.as_product(), "Latest");
    assert_eq!(SearchMode::Top.as_product(), "Top");
}

#[tokio::test]
async fn test_client_creation() {
    let client = HttpFeedClient::new("gleaner-test/1.0");
    assert!(!client.is_authenticated().await);
}

#[test]
fn test_invalid_base_url_rejected() {
    let result = HttpFeedClient::with_base_url("gleaner-test/1.0", "not a url");
    assert!(matches!(result, Err(CoreError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_search_requires_authentication() {
    let client = HttpFeedClient::new("gleaner-test/1.0");
    let result = client
        .search_first_page("#rust", SearchMode::Latest, 20)
        .await;
    assert!(matches!(
        result,
        Err(CoreError::Feed(FeedApiError::AuthenticationFailed { .. }))
    ));
}

#[tokio::test]
async fn test_rate_limiter_status() {
    let limiter = RateLimiter::new(RateLimitConfig::search_api());
    let status = limiter.get_rate_limit_status().await;
    assert!(status.available_tokens > 0.0);
    assert_eq!(status.max_tokens, 5);
    assert_eq!(status.requests_per_window, 50);
}

#[tokio::test]
async fn test_rate_limiter_permits() {
    let limiter = RateLimiter::new(RateLimitConfig::search_api());

    limiter.acquire_permit().await;

    let status = limiter.get_rate_limit_status().await;
    assert!(status.available_tokens < 5.0);
}

#[tokio::test]
async fn test_rate_limiter_drains_burst() {
    let config = RateLimitConfig {
        max_requests: 60,
        time_window: std::time::Duration::from_secs(60),
        burst_allowance: 2,
    };
    let limiter = RateLimiter::new(config);

    limiter.acquire_permit().await;
    limiter.acquire_permit().await;

    let status = limiter.get_rate_limit_status().await;
    assert!(status.available_tokens < 1.0);
}
