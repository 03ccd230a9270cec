//! Memoized pull-request lookups keyed by API URL.

use std::collections::HashMap;

use crate::github::error::FeedError;
use crate::github::gateway::PullRequestGateway;
use crate::github::locator::PullRequestRef;
use crate::github::models::PullRequestMeta;

/// Cache of pull-request metadata resolved while assembling feed pages.
///
/// Successful lookups and 404 placeholders are remembered for the life of
/// the session; other failures are not, so a later fetch may retry them.
/// Resolution takes `&mut self`, which rules out concurrent population.
#[derive(Debug, Default)]
pub struct PullRequestCache {
    entries: HashMap<PullRequestRef, PullRequestMeta>,
}

impl PullRequestCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `reference`, consulting the gateway only on a miss.
    ///
    /// A [`FeedError::NotFound`] answer becomes the not-found placeholder
    /// and is cached like a hit: deleted pull requests do not come back, and
    /// the placeholder keeps later pages from re-requesting them.
    ///
    /// # Errors
    ///
    /// Propagates every other gateway failure without caching it.
    pub async fn resolve<Gateway>(
        &mut self,
        reference: &PullRequestRef,
        gateway: &Gateway,
    ) -> Result<PullRequestMeta, FeedError>
    where
        Gateway: PullRequestGateway,
    {
        if let Some(meta) = self.entries.get(reference) {
            tracing::trace!(reference = reference.as_str(), "pull request cache hit");
            return Ok(meta.clone());
        }
        match gateway.pull_request(reference).await {
            Ok(meta) => {
                self.entries.insert(reference.clone(), meta.clone());
                Ok(meta)
            }
            Err(FeedError::NotFound) => {
                tracing::debug!(
                    reference = reference.as_str(),
                    "pull request missing, caching placeholder"
                );
                let placeholder = PullRequestMeta::not_found();
                self.entries.insert(reference.clone(), placeholder.clone());
                Ok(placeholder)
            }
            Err(error) => Err(error),
        }
    }

    /// Whether `reference` is already resolved.
    #[must_use]
    pub fn contains(&self, reference: &PullRequestRef) -> bool {
        self.entries.contains_key(reference)
    }

    /// Number of resolved references.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
