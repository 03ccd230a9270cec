//! GitHub access layer: validated locators, wire models, and gateways.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;

pub use error::FeedError;
pub use gateway::{
    CommentListingParams, OctocrabPullRequestGateway, OctocrabReviewCommentGateway,
    PullRequestGateway, ReviewCommentGateway, build_octocrab_client,
};
pub use locator::{
    PersonalAccessToken, PullRequestRef, RepositoryLocator, RepositoryName, RepositoryOwner,
};
pub use models::{PullRequestMeta, ReviewComment};

#[cfg(test)]
pub use gateway::{MockPullRequestGateway, MockReviewCommentGateway};
