//! Pagination state for one feed over one repository.

use crate::feed::cache::PullRequestCache;
use crate::feed::pipeline::{CommentPipeline, FeedCriteria, FeedEntry, FeedPage};
use crate::feed::view::FeedView;
use crate::github::error::FeedError;
use crate::github::gateway::{PullRequestGateway, ReviewCommentGateway};
use crate::github::locator::RepositoryLocator;

/// Explicit pagination state for a feed: the accumulated entries, the page
/// counter, and the pull-request cache shared by every fetch.
///
/// [`FeedSession::start_fresh`] rebuilds the feed from page 1;
/// [`FeedSession::load_more`] appends the following page. The counter only
/// advances when a fetch succeeds, so a failed `load_more` retries the same
/// page. Fetch failures are returned to the caller; the session itself never
/// emits the view's error signal.
pub struct FeedSession<'gateways, Listing, PullRequests> {
    pipeline: CommentPipeline<'gateways, Listing, PullRequests>,
    locator: RepositoryLocator,
    criteria: FeedCriteria,
    cache: PullRequestCache,
    page: u32,
    has_more: bool,
    entries: Vec<FeedEntry>,
}

impl<'gateways, Listing, PullRequests> FeedSession<'gateways, Listing, PullRequests>
where
    Listing: ReviewCommentGateway,
    PullRequests: PullRequestGateway,
{
    /// Creates a session positioned before the first page.
    #[must_use]
    pub fn new(
        listing: &'gateways Listing,
        pull_requests: &'gateways PullRequests,
        locator: RepositoryLocator,
        criteria: FeedCriteria,
    ) -> Self {
        Self {
            pipeline: CommentPipeline::new(listing, pull_requests),
            locator,
            criteria,
            cache: PullRequestCache::new(),
            page: 1,
            has_more: false,
            entries: Vec::new(),
        }
    }

    /// Latest successfully loaded page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Whether the listing may have another page.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Entries accumulated across fetches, in feed order.
    #[must_use]
    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    /// Pull-request cache shared by every fetch in this session.
    ///
    /// The cache deliberately survives [`FeedSession::start_fresh`]: a
    /// reload shows mostly the same pull requests, and resolved metadata
    /// does not go stale in a way the feed cares about.
    #[must_use]
    pub const fn cache(&self) -> &PullRequestCache {
        &self.cache
    }

    /// Rebuilds the feed from page 1, clearing accumulated entries.
    ///
    /// # Errors
    ///
    /// Propagates the fetch failure. The view has already received
    /// `loading_finished` by then; translating the error into a signal is
    /// the caller's decision.
    pub async fn start_fresh<View: FeedView>(&mut self, view: &mut View) -> Result<(), FeedError> {
        self.page = 1;
        self.has_more = false;
        self.entries.clear();
        let fetched = self.fetch_page_with_view(1, view).await?;
        self.apply(fetched, view);
        Ok(())
    }

    /// Fetches the page after the last successful one and appends it.
    ///
    /// # Errors
    ///
    /// Propagates the fetch failure without advancing the page counter.
    pub async fn load_more<View: FeedView>(&mut self, view: &mut View) -> Result<(), FeedError> {
        let next_page = self.page + 1;
        let fetched = self.fetch_page_with_view(next_page, view).await?;
        self.page = next_page;
        self.apply(fetched, view);
        Ok(())
    }

    /// Runs one pipeline fetch bracketed by the loading signals.
    ///
    /// `loading_finished` fires on every exit path, success or failure.
    async fn fetch_page_with_view<View: FeedView>(
        &mut self,
        page: u32,
        view: &mut View,
    ) -> Result<FeedPage, FeedError> {
        view.loading_started();
        let result = self
            .pipeline
            .fetch_page(&self.locator, &self.criteria, page, &mut self.cache)
            .await;
        view.loading_finished();
        result
    }

    fn apply<View: FeedView>(&mut self, fetched: FeedPage, view: &mut View) {
        self.has_more = fetched.has_more;
        if fetched.entries.is_empty() {
            view.no_data(fetched.page);
        } else {
            view.entries_loaded(&fetched.entries);
            self.entries.extend(fetched.entries);
        }
        if self.has_more {
            view.more_available(self.page + 1);
        }
    }
}
