//! Classifier failures.
//!
//! Every variant ends up as `"Assistant unavailable"` for the shopper; the
//! distinction only matters for reporting, where an outage on Claude's side
//! (timeouts, 429, 529, 5xx) is told apart from a broken request or key.

use thiserror::Error;

use super::types::ErrorBody;

/// Retry delay assumed when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Status Anthropic uses for temporary overload.
const STATUS_OVERLOADED: u16 = 529;

/// Errors from asking Claude to classify a message.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Transport failure, including the request timeout.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status with the API's own error kind.
    #[error("Claude returned {status} ({kind}): {message}")]
    Api {
        status: u16,
        /// `type` of the API error object, `unknown` if the body was not JSON.
        kind: String,
        message: String,
    },

    #[error("rate limited, retry after {retry_after}s")]
    RateLimited { retry_after: u64 },

    #[error("Claude is overloaded")]
    Overloaded,

    /// The API key was rejected (401/403).
    #[error("API key rejected with status {status}")]
    Unauthorized { status: u16 },

    /// Success status but the body is not a Messages API response.
    #[error("unreadable response: {0}")]
    Parse(String),

    /// Client could not be configured.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClassifierError {
    /// Map a non-success response to an error.
    #[must_use]
    pub fn from_status(status: u16, retry_after: Option<&str>, body: &str) -> Self {
        match status {
            429 => Self::RateLimited {
                retry_after: retry_after
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECS),
            },
            401 | 403 => Self::Unauthorized { status },
            STATUS_OVERLOADED => Self::Overloaded,
            _ => match serde_json::from_str::<ErrorBody>(body) {
                Ok(body) => Self::Api {
                    status,
                    kind: body.error.kind,
                    message: body.error.message,
                },
                Err(_) => Self::Api {
                    status,
                    kind: "unknown".to_string(),
                    message: body.to_string(),
                },
            },
        }
    }

    /// Whether Claude is temporarily unreachable, as opposed to misconfigured.
    #[must_use]
    pub const fn is_outage(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimited { .. } | Self::Overloaded => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Unauthorized { .. } | Self::Parse(_) | Self::Config(_) => false,
        }
    }

    /// Short tag for Sentry and logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http(e) if e.is_timeout() => "timeout",
            Self::Http(_) => "transport",
            Self::Api { .. } => "api",
            Self::RateLimited { .. } => "rate_limited",
            Self::Overloaded => "overloaded",
            Self::Unauthorized { .. } => "unauthorized",
            Self::Parse(_) => "parse",
            Self::Config(_) => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_uses_retry_after() {
        let err = ClassifierError::from_status(429, Some(" 12 "), "");
        assert!(matches!(err, ClassifierError::RateLimited { retry_after: 12 }));
        assert!(err.is_outage());

        let err = ClassifierError::from_status(429, Some("Wed, 21 Oct 2026 07:28:00 GMT"), "");
        assert!(matches!(err, ClassifierError::RateLimited { retry_after: 60 }));
    }

    #[test]
    fn test_overloaded_is_an_outage() {
        let err = ClassifierError::from_status(529, None, "{}");
        assert_eq!(err.kind(), "overloaded");
        assert!(err.is_outage());
    }

    #[test]
    fn test_rejected_key_is_not_an_outage() {
        let err = ClassifierError::from_status(401, None, "");
        assert_eq!(err.to_string(), "API key rejected with status 401");
        assert!(!err.is_outage());
    }

    #[test]
    fn test_api_error_body_is_decoded() {
        let body = r#"{
            "type": "error",
            "error": {
                "type": "invalid_request_error",
                "message": "messages.0.content: text content blocks must be non-empty"
            }
        }"#;

        let err = ClassifierError::from_status(400, None, body);
        assert_eq!(
            err.to_string(),
            "Claude returned 400 (invalid_request_error): messages.0.content: text content blocks must be non-empty"
        );
        assert!(!err.is_outage());
    }

    #[test]
    fn test_server_error_with_plain_body() {
        let err = ClassifierError::from_status(502, None, "Bad Gateway");
        assert!(matches!(
            &err,
            ClassifierError::Api { kind, message, .. } if kind == "unknown" && message == "Bad Gateway"
        ));
        assert!(err.is_outage());
    }
}
