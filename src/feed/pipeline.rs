//! Fetching, filtering, and enrichment of review-comment pages.

use chrono::{DateTime, Utc};

use crate::feed::cache::PullRequestCache;
use crate::github::error::FeedError;
use crate::github::gateway::{CommentListingParams, PullRequestGateway, ReviewCommentGateway};
use crate::github::locator::RepositoryLocator;
use crate::github::models::{PullRequestMeta, ReviewComment};

/// Comments requested per listing page.
pub const DEFAULT_PAGE_SIZE: u8 = 30;

/// Filter and window settings applied to every page of a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedCriteria {
    /// Only comments updated at or after this instant are listed.
    pub since: DateTime<Utc>,
    /// Keep only comments whose author login matches exactly.
    pub author: Option<String>,
    /// Drop the matched author's comments on their own pull requests.
    pub exclude_self: bool,
    /// Comments requested per page.
    pub page_size: u8,
}

impl FeedCriteria {
    /// Criteria with no author filter and the default page size.
    #[must_use]
    pub const fn new(since: DateTime<Utc>) -> Self {
        Self {
            since,
            author: None,
            exclude_self: false,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A review comment paired with the pull request it was left on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    /// The comment itself.
    pub comment: ReviewComment,
    /// Metadata of the owning pull request, possibly the 404 placeholder.
    pub pull_request: PullRequestMeta,
}

/// One fetched page after filtering and enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedPage {
    /// 1-based page number that was fetched.
    pub page: u32,
    /// Entries that survived filtering, in listing order.
    pub entries: Vec<FeedEntry>,
    /// Whether the listing may have another page.
    pub has_more: bool,
}

/// Turns raw listing pages into display-ready feed pages.
pub struct CommentPipeline<'gateways, Listing, PullRequests> {
    listing: &'gateways Listing,
    pull_requests: &'gateways PullRequests,
}

impl<'gateways, Listing, PullRequests> CommentPipeline<'gateways, Listing, PullRequests>
where
    Listing: ReviewCommentGateway,
    PullRequests: PullRequestGateway,
{
    /// Pairs the listing gateway with the pull-request gateway.
    #[must_use]
    pub const fn new(listing: &'gateways Listing, pull_requests: &'gateways PullRequests) -> Self {
        Self {
            listing,
            pull_requests,
        }
    }

    /// Fetches `page` and reduces it to the entries the criteria keep.
    ///
    /// The author filter runs before pull requests are resolved, so filtered
    /// comments cost no lookups. Excluding the author's own pull requests
    /// happens after resolution because it needs the pull-request author.
    /// Lookups run sequentially; the first failure abandons the whole page.
    ///
    /// Continuation is judged from the raw page length: a full page may have
    /// a successor, a short page is the end of the listing. Filtering never
    /// affects that judgement.
    ///
    /// # Errors
    ///
    /// Propagates listing failures and any uncached pull-request lookup
    /// failure.
    pub async fn fetch_page(
        &self,
        locator: &RepositoryLocator,
        criteria: &FeedCriteria,
        page: u32,
        cache: &mut PullRequestCache,
    ) -> Result<FeedPage, FeedError> {
        let params = CommentListingParams {
            since: criteria.since,
            page,
            per_page: criteria.page_size,
        };
        let raw = self.listing.list_review_comments(locator, &params).await?;
        let has_more = raw.len() == usize::from(criteria.page_size);
        tracing::debug!(page, raw = raw.len(), has_more, "listed review comments");

        let mut entries = Vec::new();
        for comment in raw {
            if let Some(author) = criteria.author.as_deref()
                && comment.author.as_deref() != Some(author)
            {
                continue;
            }
            let pull_request = cache
                .resolve(&comment.pull_request_ref, self.pull_requests)
                .await?;
            if criteria.exclude_self
                && let Some(author) = criteria.author.as_deref()
                && pull_request.author.as_deref() == Some(author)
            {
                continue;
            }
            entries.push(FeedEntry {
                comment,
                pull_request,
            });
        }
        Ok(FeedPage {
            page,
            entries,
            has_more,
        })
    }
}
