use gleaner_core::{ConfigError, CoreError, ErrorExt, FeedApiError};
use std::time::Duration;

#[test]
fn test_error_codes() {
    let feed_error = CoreError::Feed(FeedApiError::InvalidToken);
    assert_eq!(feed_error.error_code(), "FEED_API");

    let config_error = CoreError::Config(ConfigError::NoQueries);
    assert_eq!(config_error.error_code(), "CONFIG");

    let input_error = CoreError::InvalidInput {
        message: "bad".to_string(),
    };
    assert_eq!(input_error.error_code(), "INVALID_INPUT");
}

#[test]
fn test_retryable_errors() {
    let retryable = CoreError::Feed(FeedApiError::RateLimitExceeded { retry_after: 60 });
    assert!(retryable.is_retryable());

    let server_error = FeedApiError::ServerError { status_code: 503 };
    assert!(server_error.is_retryable());

    let client_error = FeedApiError::ServerError { status_code: 404 };
    assert!(!client_error.is_retryable());

    let non_retryable = CoreError::Config(ConfigError::MissingField {
        field: "limit".to_string(),
    });
    assert!(!non_retryable.is_retryable());
}

#[test]
fn test_retry_after() {
    let rate_limit = CoreError::Feed(FeedApiError::RateLimitExceeded { retry_after: 60 });
    assert_eq!(rate_limit.retry_after(), Some(Duration::from_secs(60)));

    let config_error = CoreError::Config(ConfigError::NoQueries);
    assert_eq!(config_error.retry_after(), None);
}

#[test]
fn test_user_friendly_messages() {
    let auth_error = CoreError::Feed(FeedApiError::InvalidToken);
    let message = auth_error.user_friendly_message();
    assert!(!message.is_empty());
    assert!(message.contains("rejected"));

    let config_error = CoreError::Config(ConfigError::MissingField {
        field: "limit".to_string(),
    });
    let message = config_error.user_friendly_message();
    assert!(message.contains("limit"));
}

#[test]
fn test_only_auth_errors_are_fatal() {
    let auth_failed = CoreError::Feed(FeedApiError::AuthenticationFailed {
        reason: "cookies rejected".to_string(),
    });
    assert!(auth_failed.is_fatal());

    let invalid_token = CoreError::Feed(FeedApiError::InvalidToken);
    assert!(invalid_token.is_fatal());

    let server_error = CoreError::Feed(FeedApiError::ServerError { status_code: 500 });
    assert!(!server_error.is_fatal());

    let timeout = CoreError::Feed(FeedApiError::RequestTimeout);
    assert!(!timeout.is_fatal());

    let rate_limited = CoreError::Feed(FeedApiError::RateLimitExceeded { retry_after: 60 });
    assert!(!rate_limited.is_fatal());
}
