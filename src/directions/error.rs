//! Error types for the Directions client.

use std::time::Duration;
use thiserror::Error;

/// Any failure to obtain a route from the provider.
///
/// Never retried automatically. A fetch that fails leaves the route cache empty.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RouteFetchError {
    /// The request could not be built (blank address, bad endpoint URL).
    #[error("Invalid route request: {0}")]
    InvalidRequest(String),

    /// The provider answered with a non-OK status such as `NOT_FOUND` or `OVER_QUERY_LIMIT`.
    #[error("Directions provider returned {status}{}", detail(.message))]
    Provider {
        status: String,
        message: Option<String>,
    },

    /// The provider answered OK but without a single route alternative.
    #[error("Directions provider returned no routes")]
    NoRoutes,

    /// Non-success HTTP status.
    #[error("Directions request failed with HTTP {0}")]
    Http(u16),

    /// Connection, TLS or other transport failure.
    #[error("Directions transport error: {0}")]
    Transport(String),

    /// The response body was not a valid directions document.
    #[error("Malformed directions response: {0}")]
    MalformedResponse(String),

    /// The provider did not answer in time.
    #[error("Directions request timed out after {0:?}")]
    Timeout(Duration),
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl From<reqwest::Error> for RouteFetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            RouteFetchError::MalformedResponse(e.to_string())
        } else if let Some(status) = e.status() {
            RouteFetchError::Http(status.as_u16())
        } else {
            RouteFetchError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = RouteFetchError::Provider {
            status: "NOT_FOUND".into(),
            message: None,
        };
        assert_eq!(err.to_string(), "Directions provider returned NOT_FOUND");

        let err = RouteFetchError::Provider {
            status: "REQUEST_DENIED".into(),
            message: Some("The provided API key is invalid.".into()),
        };
        assert_eq!(
            err.to_string(),
            "Directions provider returned REQUEST_DENIED: The provided API key is invalid."
        );
    }

    #[test]
    fn test_timeout_display() {
        let err = RouteFetchError::Timeout(Duration::from_secs(10));
        assert_eq!(err.to_string(), "Directions request timed out after 10s");
    }
}
