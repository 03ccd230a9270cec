//! Error types surfaced by feed configuration, GitHub access, and rendering.

use thiserror::Error;

/// Errors produced while configuring or running the review-comment feed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FeedError {
    /// Configuration could not be loaded or is missing a required value.
    #[error("configuration error: {message}")]
    Configuration {
        /// Human-readable description of the configuration problem.
        message: String,
    },
    /// A URL could not be parsed or converted for the HTTP client.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// The lower bound for comment timestamps could not be parsed.
    #[error("invalid since timestamp: {0}")]
    InvalidSince(String),
    /// Pagination parameters fell outside the accepted range.
    #[error("invalid pagination: {message}")]
    InvalidPagination {
        /// Description of the rejected parameter.
        message: String,
    },
    /// GitHub answered a request with an error payload.
    #[error("{message} [{}]", .status.as_u16())]
    Api {
        /// Message extracted from the GitHub error response.
        message: String,
        /// HTTP status code reported by GitHub.
        status: http::StatusCode,
    },
    /// The request failed before GitHub produced a response.
    #[error("network error: {message}")]
    Transport {
        /// Description of the underlying transport failure.
        message: String,
    },
    /// The referenced pull request no longer exists or is not visible.
    #[error("pull request not found")]
    NotFound,
    /// Reading the prompt or writing feed output failed.
    #[error("I/O error: {message}")]
    Io {
        /// Description of the terminal I/O failure.
        message: String,
    },
}
