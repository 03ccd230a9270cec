//! Validated identifiers for the repository and credentials a feed reads from.
//!
//! The newtypes here reject empty input at construction so the gateways can
//! assume well-formed values when they build request routes.

use url::Url;

use crate::github::error::FeedError;

/// REST endpoint for github.com repositories.
const PUBLIC_API_BASE: &str = "https://api.github.com";

/// Owner segment of a `owner/repository` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, FeedError> {
        if value.trim().is_empty() {
            return Err(FeedError::Configuration {
                message: "repository owner must not be empty".to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrows the owner as a path segment.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository segment of a `owner/repository` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, FeedError> {
        if value.trim().is_empty() {
            return Err(FeedError::Configuration {
                message: "repository name must not be empty".to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrows the repository name as a path segment.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Personal access token used as a bearer credential.
///
/// Surrounding whitespace is stripped; a blank token is rejected rather than
/// sent as an empty `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Creates a token from raw configuration input.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Configuration`] when the trimmed value is empty.
    pub fn new(value: impl AsRef<str>) -> Result<Self, FeedError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(FeedError::Configuration {
                message: "personal access token must not be blank".to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrows the token value for client construction.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// A repository addressed through a specific GitHub REST endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Locates a repository on github.com.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Configuration`] when either segment is empty.
    pub fn from_owner_repo(owner: &str, repository: &str) -> Result<Self, FeedError> {
        Self::with_api_base(PUBLIC_API_BASE, owner, repository)
    }

    /// Locates a repository behind an explicit REST endpoint, such as a
    /// GitHub Enterprise `https://host/api/v3` base.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidUrl`] when the base does not parse and
    /// [`FeedError::Configuration`] when either segment is empty.
    pub fn with_api_base(api_base: &str, owner: &str, repository: &str) -> Result<Self, FeedError> {
        let base = Url::parse(api_base)
            .map_err(|error| FeedError::InvalidUrl(format!("{api_base}: {error}")))?;
        Ok(Self {
            api_base: base,
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repository)?,
        })
    }

    /// REST endpoint the repository is served from.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Owner path segment.
    #[must_use]
    pub const fn owner(&self) -> &str {
        self.owner.as_str()
    }

    /// Repository path segment.
    #[must_use]
    pub const fn repository(&self) -> &str {
        self.repository.as_str()
    }

    /// Route listing every review comment in the repository, newest first.
    pub(crate) fn review_comments_path(&self) -> String {
        format!(
            "/repos/{owner}/{repository}/pulls/comments",
            owner = self.owner.as_str(),
            repository = self.repository.as_str(),
        )
    }
}

/// Absolute API URL identifying the pull request a review comment belongs to.
///
/// GitHub returns this URL verbatim on every review comment; equal URLs refer
/// to the same pull request, which makes the reference usable as a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PullRequestRef(String);

impl PullRequestRef {
    /// Wraps the `pull_request_url` reported by the listing endpoint.
    #[must_use]
    pub const fn new(url: String) -> Self {
        Self(url)
    }

    /// Borrows the underlying API URL.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Converts the absolute URL into a route relative to `api_base`.
    ///
    /// The client already carries the endpoint's path prefix, so a reference
    /// served from an Enterprise `/api/v3` base must lose that prefix before
    /// it is handed back to the client.
    pub(crate) fn route(&self, api_base: &Url) -> Result<String, FeedError> {
        let url = Url::parse(&self.0)
            .map_err(|error| FeedError::InvalidUrl(format!("{}: {error}", self.0)))?;
        let path = url.path();
        let base_path = api_base.path().trim_end_matches('/');
        if base_path.is_empty() {
            return Ok(path.to_owned());
        }
        Ok(path.strip_prefix(base_path).unwrap_or(path).to_owned())
    }
}
