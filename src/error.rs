//! API error types shared by the marketplace and wizard fetch paths

use thiserror::Error;

/// Errors that can occur when interacting with remote connectivity APIs
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 401 Unauthorized - token invalid or expired
    #[error("{source_name}: Unauthorized (401)")]
    Unauthorized { source_name: String },
    /// 403 Forbidden - token lacks required permissions
    #[error("{source_name}: Forbidden (403) - insufficient permissions")]
    Forbidden { source_name: String },
    /// 429 Rate Limited
    #[error("{source_name}: Rate limited{}", .retry_after_secs.map(|s| format!(" - retry after {s}s")).unwrap_or_default())]
    RateLimited {
        source_name: String,
        retry_after_secs: Option<u64>,
    },
    /// Network or timeout error
    #[error("{source_name}: Network error - {message}")]
    Network { source_name: String, message: String },
    /// Other HTTP errors, including unparseable response bodies
    #[error("{source_name}: HTTP {status} - {message}")]
    Http {
        source_name: String,
        status: u16,
        message: String,
    },
    /// Source not configured (no token or base URL)
    #[error("{source_name}: Not configured (no API token)")]
    NotConfigured { source_name: String },
    /// A result arrived for a wizard session that has already been closed
    #[error("wizard session for client '{client_id}' is closed")]
    StaleSession { client_id: String },
}

impl ApiError {
    /// Check if this is an authentication error (401 or 403)
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized { .. } | ApiError::Forbidden { .. }
        )
    }

    /// Check if this is a rate limiting error
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ApiError::RateLimited { .. })
    }

    /// Get retry-after seconds if rate limited
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            ApiError::RateLimited {
                retry_after_secs, ..
            } => *retry_after_secs,
            _ => None,
        }
    }

    /// Name of the remote source this error came from
    pub fn source_name(&self) -> &str {
        match self {
            ApiError::Unauthorized { source_name }
            | ApiError::Forbidden { source_name }
            | ApiError::RateLimited { source_name, .. }
            | ApiError::Network { source_name, .. }
            | ApiError::Http { source_name, .. }
            | ApiError::NotConfigured { source_name } => source_name,
            ApiError::StaleSession { .. } => "wizard",
        }
    }

    /// Create an unauthorized error for a source
    pub fn unauthorized(source_name: impl Into<String>) -> Self {
        ApiError::Unauthorized {
            source_name: source_name.into(),
        }
    }

    /// Create a forbidden error for a source
    pub fn forbidden(source_name: impl Into<String>) -> Self {
        ApiError::Forbidden {
            source_name: source_name.into(),
        }
    }

    /// Create a rate limited error for a source
    pub fn rate_limited(source_name: impl Into<String>, retry_after: Option<u64>) -> Self {
        ApiError::RateLimited {
            source_name: source_name.into(),
            retry_after_secs: retry_after,
        }
    }

    /// Create a network error for a source
    pub fn network(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Network {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP error for a source
    pub fn http(source_name: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        ApiError::Http {
            source_name: source_name.into(),
            status,
            message: message.into(),
        }
    }

    /// Create a not configured error for a source
    pub fn not_configured(source_name: impl Into<String>) -> Self {
        ApiError::NotConfigured {
            source_name: source_name.into(),
        }
    }

    /// Create a stale session error for a client id
    pub fn stale_session(client_id: impl Into<String>) -> Self {
        ApiError::StaleSession {
            client_id: client_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_auth_error() {
        assert!(ApiError::unauthorized("marketplace").is_auth_error());
        assert!(ApiError::forbidden("marketplace").is_auth_error());
        assert!(!ApiError::rate_limited("marketplace", None).is_auth_error());
        assert!(!ApiError::network("marketplace", "timeout").is_auth_error());
    }

    #[test]
    fn test_retry_after() {
        assert_eq!(
            ApiError::rate_limited("marketplace", Some(30)).retry_after(),
            Some(30)
        );
        assert_eq!(ApiError::rate_limited("marketplace", None).retry_after(), None);
        assert_eq!(ApiError::http("marketplace", 500, "boom").retry_after(), None);
    }

    #[test]
    fn test_source_name() {
        assert_eq!(
            ApiError::unauthorized("marketplace").source_name(),
            "marketplace"
        );
        assert_eq!(ApiError::stale_session("abc").source_name(), "wizard");
    }

    #[test]
    fn test_display() {
        let err = ApiError::rate_limited("marketplace", Some(30));
        assert_eq!(err.to_string(), "marketplace: Rate limited - retry after 30s");

        let err = ApiError::not_configured("marketplace");
        assert_eq!(
            err.to_string(),
            "marketplace: Not configured (no API token)"
        );

        let err = ApiError::stale_session("client-1");
        assert_eq!(
            err.to_string(),
            "wizard session for client 'client-1' is closed"
        );
    }
}
