//! Construction of the shared Octocrab client.

use http::header::{ACCEPT, HeaderName};
use octocrab::Octocrab;
use url::Url;

use crate::github::error::FeedError;
use crate::github::gateway::error_mapping::map_octocrab_error;
use crate::github::locator::PersonalAccessToken;

/// Builds an Octocrab client rooted at `api_base`.
///
/// Every request carries the GitHub media-type and API-version headers. The
/// bearer credential is attached only when a token is supplied, so the feed
/// also works unauthenticated at the lower rate limit.
///
/// # Errors
///
/// Returns [`FeedError::InvalidUrl`] when `api_base` is not a usable request
/// URI and [`FeedError::Transport`] when the client cannot be constructed.
pub fn build_octocrab_client(
    token: Option<&PersonalAccessToken>,
    api_base: &Url,
) -> Result<Octocrab, FeedError> {
    let mut builder = Octocrab::builder()
        .base_uri(api_base.as_str())
        .map_err(|error| FeedError::InvalidUrl(format!("{api_base}: {error}")))?
        .add_header(ACCEPT, "application/vnd.github+json".to_owned())
        .add_header(
            HeaderName::from_static("x-github-api-version"),
            "2022-11-28".to_owned(),
        );
    if let Some(credential) = token {
        builder = builder.personal_token(credential.value().to_owned());
    }
    builder
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
