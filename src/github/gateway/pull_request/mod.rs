//! Octocrab-backed lookup of pull-request metadata.

use async_trait::async_trait;
use octocrab::Octocrab;
use url::Url;

use crate::github::error::FeedError;
use crate::github::gateway::PullRequestGateway;
use crate::github::gateway::error_mapping::map_octocrab_error_with_not_found;
use crate::github::locator::PullRequestRef;
use crate::github::models::{ApiPullRequest, PullRequestMeta};


/// Fetches pull-request metadata by the API URL a review comment references.
pub struct OctocrabPullRequestGateway {
    client: Octocrab,
    api_base: Url,
}

impl OctocrabPullRequestGateway {
    /// Wraps an already-configured client rooted at `api_base`.
    #[must_use]
    pub const fn new(client: Octocrab, api_base: Url) -> Self {
        Self { client, api_base }
    }
}

#[async_trait]
impl PullRequestGateway for OctocrabPullRequestGateway {
    async fn pull_request(
        &self,
        reference: &PullRequestRef,
    ) -> Result<PullRequestMeta, FeedError> {
        let route = reference.route(&self.api_base)?;
        self.client
            .get::<ApiPullRequest, _, _>(route, None::<&()>)
            .await
            .map(ApiPullRequest::into)
            .map_err(|error| map_octocrab_error_with_not_found("pull request lookup", &error))
    }
}
