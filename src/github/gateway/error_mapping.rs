//! Translation of Octocrab failures into feed errors.

use http::StatusCode;

use crate::github::error::FeedError;

/// Maps an Octocrab failure during `operation` onto [`FeedError`].
///
/// GitHub error payloads keep their message and status code; everything else
/// is reported as a transport failure.
pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> FeedError {
    match error {
        octocrab::Error::GitHub { source, .. } => FeedError::Api {
            message: format!("{operation} failed: {message}", message = source.message),
            status: source.status_code,
        },
        _ => FeedError::Transport {
            message: format!("{operation} failed: {error}"),
        },
    }
}

/// Like [`map_octocrab_error`], but folds a 404 payload into
/// [`FeedError::NotFound`] so callers can treat missing resources as data.
pub(super) fn map_octocrab_error_with_not_found(
    operation: &str,
    error: &octocrab::Error,
) -> FeedError {
    if let octocrab::Error::GitHub { source, .. } = error
        && source.status_code == StatusCode::NOT_FOUND
    {
        return FeedError::NotFound;
    }
    map_octocrab_error(operation, error)
}
