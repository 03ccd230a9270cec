//! Gateway traits and Octocrab-backed implementations for GitHub access.
//!
//! The feed core depends only on the traits here; the `Octocrab*` types are
//! the production implementations and the mocks generated for tests stand in
//! for them everywhere else.

mod client;
mod error_mapping;
mod pull_request;
mod review_comments;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::github::error::FeedError;
use crate::github::locator::{PullRequestRef, RepositoryLocator};
use crate::github::models::{PullRequestMeta, ReviewComment};

pub use client::build_octocrab_client;
pub use pull_request::OctocrabPullRequestGateway;
pub use review_comments::OctocrabReviewCommentGateway;

/// Query parameters for one page of the repository comment listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentListingParams {
    /// Only comments updated at or after this instant are returned.
    pub since: DateTime<Utc>,
    /// 1-based page to fetch.
    pub page: u32,
    /// Number of comments per page; GitHub caps this at 100.
    pub per_page: u8,
}

/// Lists pull-request review comments across a repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewCommentGateway: Send + Sync {
    /// Fetches a single page of review comments, newest first.
    ///
    /// Requesting pages beyond the end of the listing yields an empty page;
    /// continuation is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidPagination`] for out-of-range parameters,
    /// [`FeedError::Api`] when GitHub rejects the request, and
    /// [`FeedError::Transport`] when no response arrives.
    async fn list_review_comments(
        &self,
        locator: &RepositoryLocator,
        params: &CommentListingParams,
    ) -> Result<Vec<ReviewComment>, FeedError>;
}

/// Fetches metadata for a single pull request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// Looks up the pull request a review comment references.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::NotFound`] when the pull request no longer
    /// exists, [`FeedError::Api`] for other GitHub error responses, and
    /// [`FeedError::Transport`] when no response arrives.
    async fn pull_request(&self, reference: &PullRequestRef)
    -> Result<PullRequestMeta, FeedError>;
}
