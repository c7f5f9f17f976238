//! # Rate Source Errors
//!
//! Error types for exchange rate lookups.
//!
//! # Examples
//!
//! ```
//! use remit_rank::infrastructure::rates::error::RateSourceError;
//!
//! let error = RateSourceError::timeout("no response after 5000ms");
//! assert!(error.is_retryable());
//!
//! let error = RateSourceError::protocol("missing rates field");
//! assert!(!error.is_retryable());
//! ```

use thiserror::Error;

/// Error type for exchange rate sources.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateSourceError {
    /// Request timed out.
    #[error("rate source timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// Network or connection error.
    #[error("rate source connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("rate source rate limit exceeded: {message}")]
    RateLimited {
        /// Error message.
        message: String,
    },

    /// Non-success HTTP status.
    #[error("rate source returned HTTP {status}: {message}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// Response could not be parsed.
    #[error("rate source protocol error: {message}")]
    Protocol {
        /// Error message.
        message: String,
    },

    /// The source has no table for the requested base currency.
    #[error("rate source has no rates for base {base}")]
    UnsupportedBase {
        /// Requested base currency.
        base: String,
    },

    /// Internal error.
    #[error("rate source internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl RateSourceError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a rate limited error.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Creates an HTTP status error.
    #[must_use]
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates an unsupported base error.
    #[must_use]
    pub fn unsupported_base(base: impl Into<String>) -> Self {
        Self::UnsupportedBase { base: base.into() }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error is transient and may succeed on retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection { .. } | Self::RateLimited { .. } => true,
            Self::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns the timeout in milliseconds, if recorded.
    #[must_use]
    pub fn timeout_ms(&self) -> Option<u64> {
        match self {
            Self::Timeout { timeout_ms, .. } => *timeout_ms,
            _ => None,
        }
    }
}

/// Result type for rate source operations.
pub type RateResult<T> = Result<T, RateSourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_errors_are_retryable() {
        assert!(RateSourceError::timeout("t").is_retryable());
        assert!(RateSourceError::connection("c").is_retryable());
        assert!(RateSourceError::rate_limited("r").is_retryable());
        assert!(RateSourceError::http_status(503, "down").is_retryable());
    }

    #[test]
    fn permanent_errors_are_not_retryable() {
        assert!(!RateSourceError::http_status(404, "nope").is_retryable());
        assert!(!RateSourceError::protocol("bad json").is_retryable());
        assert!(!RateSourceError::unsupported_base("XYZ").is_retryable());
        assert!(!RateSourceError::internal("boom").is_retryable());
    }

    #[test]
    fn timeout_with_duration() {
        let error = RateSourceError::timeout_with_duration("slow", 250);
        assert_eq!(error.timeout_ms(), Some(250));
        assert_eq!(RateSourceError::connection("x").timeout_ms(), None);
    }

    #[test]
    fn display_format() {
        let error = RateSourceError::http_status(502, "bad gateway");
        let display = error.to_string();
        assert!(display.contains("502"));
        assert!(display.contains("bad gateway"));
    }
}
