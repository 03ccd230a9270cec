//! Review-comment feed for GitHub repositories.
//!
//! `revfeed` lists pull-request review comments across a repository, newest
//! first, pairs each comment with the pull request it was left on, and pages
//! through the listing on demand. GitHub access goes through Octocrab behind
//! mockable gateway traits; errors keep the HTTP status GitHub reported so a
//! revoked token reads differently from a flaky network.

pub mod cli;
pub mod config;
pub mod feed;
pub mod github;
pub mod render;

pub use config::RevfeedConfig;
pub use feed::{
    CommentPipeline, DEFAULT_PAGE_SIZE, FeedCriteria, FeedEntry, FeedPage, FeedSession, FeedView,
    NullFeedView, PullRequestCache,
};
pub use github::{
    CommentListingParams, FeedError, OctocrabPullRequestGateway, OctocrabReviewCommentGateway,
    PersonalAccessToken, PullRequestGateway, PullRequestMeta, PullRequestRef, RepositoryLocator,
    ReviewComment, ReviewCommentGateway, build_octocrab_client,
};
pub use render::TerminalFeedView;
