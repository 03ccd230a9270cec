//! Octocrab-backed listing of repository review comments.

use async_trait::async_trait;
use chrono::SecondsFormat;
use octocrab::Octocrab;

use crate::github::error::FeedError;
use crate::github::gateway::error_mapping::map_octocrab_error;
use crate::github::gateway::{CommentListingParams, ReviewCommentGateway};
use crate::github::locator::RepositoryLocator;
use crate::github::models::{ApiReviewComment, ReviewComment};


/// Largest `per_page` value GitHub accepts.
const MAX_PER_PAGE: u8 = 100;

/// Lists review comments through the repository-wide REST endpoint.
pub struct OctocrabReviewCommentGateway {
    client: Octocrab,
}

impl OctocrabReviewCommentGateway {
    /// Wraps an already-configured client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReviewCommentGateway for OctocrabReviewCommentGateway {
    async fn list_review_comments(
        &self,
        locator: &RepositoryLocator,
        params: &CommentListingParams,
    ) -> Result<Vec<ReviewComment>, FeedError> {
        validate_pagination_params(params.page, params.per_page)?;
        let since_param = params.since.to_rfc3339_opts(SecondsFormat::Secs, true);
        let page_param = params.page.to_string();
        let per_page_param = params.per_page.to_string();
        let query_params = [
            ("since", since_param.as_str()),
            ("page", page_param.as_str()),
            ("per_page", per_page_param.as_str()),
        ];
        let listed: Vec<ApiReviewComment> = self
            .client
            .get(locator.review_comments_path(), Some(&query_params))
            .await
            .map_err(|error| map_octocrab_error("list review comments", &error))?;
        Ok(listed.into_iter().map(Into::into).collect())
    }
}

/// Rejects query parameters the endpoint would refuse, before any request
/// leaves the process.
fn validate_pagination_params(page: u32, per_page: u8) -> Result<(), FeedError> {
    if page == 0 {
        return Err(FeedError::InvalidPagination {
            message: "page must be at least 1".to_owned(),
        });
    }
    if per_page == 0 {
        return Err(FeedError::InvalidPagination {
            message: "per_page must be at least 1".to_owned(),
        });
    }
    if per_page > MAX_PER_PAGE {
        return Err(FeedError::InvalidPagination {
            message: format!("per_page must not exceed {MAX_PER_PAGE}"),
        });
    }
    Ok(())
}
