//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.revfeed.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `REVFEED_OWNER`, `REVFEED_TOKEN`, or legacy
//!    `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `--owner`/`-o`, `--repo`/`-r`, and friends
//!
//! # Configuration File
//!
//! Place `.revfeed.toml` in the current directory, home directory, or
//! XDG config directory with:
//!
//! ```toml
//! owner = "octocat"
//! repo = "hello-world"
//! username = "octocat"
//! since = "2024-01-01"
//! exclude_self = true
//! ```

use std::env;

use chrono::{DateTime, Months, NaiveDate, Utc};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::FeedError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};


/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `REVFEED_OWNER` or `--owner`: Repository owner
/// - `REVFEED_REPO` or `--repo`: Repository name
/// - `REVFEED_TOKEN`, `GITHUB_TOKEN`, or `--token`: Authentication token
/// - `REVFEED_USERNAME` or `--username`: Author login the feed is filtered to
/// - `REVFEED_SINCE` or `--since`: Lower bound for comment timestamps
/// - `REVFEED_PAGES` or `--pages`: Number of pages fetched up front
/// - `REVFEED_API_BASE` or `--api-base`: Enterprise REST endpoint
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use revfeed::RevfeedConfig;
///
/// let config = RevfeedConfig::load().expect("failed to load configuration");
/// let locator = config.resolve_locator().expect("repository required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "REVFEED",
    discovery(
        dotfile_name = ".revfeed.toml",
        config_file_name = "revfeed.toml",
        app_name = "revfeed"
    )
)]
pub struct RevfeedConfig {
    /// Repository owner (e.g., "octocat").
    ///
    /// Can be provided via:
    /// - CLI: `--owner <OWNER>` or `-o <OWNER>`
    /// - Environment: `REVFEED_OWNER`
    /// - Config file: `owner = "..."`
    #[ortho_config(cli_short = 'o')]
    pub owner: Option<String>,

    /// Repository name (e.g., "hello-world").
    ///
    /// Can be provided via:
    /// - CLI: `--repo <REPO>` or `-r <REPO>`
    /// - Environment: `REVFEED_REPO`
    /// - Config file: `repo = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Personal access token for GitHub API authentication.
    ///
    /// Optional: without a token the feed runs unauthenticated against the
    /// lower rate limit.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `REVFEED_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Author login the feed is filtered to, matched case-sensitively.
    ///
    /// Can be provided via:
    /// - CLI: `--username <LOGIN>` or `-u <LOGIN>`
    /// - Environment: `REVFEED_USERNAME`
    /// - Config file: `username = "..."`
    #[ortho_config(cli_short = 'u')]
    pub username: Option<String>,

    /// Lower bound for comment timestamps, RFC 3339 or `YYYY-MM-DD`.
    ///
    /// Defaults to three calendar months before now.
    ///
    /// Can be provided via:
    /// - CLI: `--since <WHEN>` or `-s <WHEN>`
    /// - Environment: `REVFEED_SINCE`
    /// - Config file: `since = "..."`
    #[ortho_config(cli_short = 's')]
    pub since: Option<String>,

    /// Drops the filtered author's comments on their own pull requests.
    ///
    /// Has no effect unless `username` is also set.
    ///
    /// Can be provided via:
    /// - CLI: `--exclude-self`
    /// - Config file: `exclude_self = true`
    ///
    /// Note: Environment variable `REVFEED_EXCLUDE_SELF` is not supported
    /// because `ortho_config` does not load boolean values from the
    /// environment.
    #[ortho_config()]
    pub exclude_self: bool,

    /// Number of pages fetched up front in non-interactive runs.
    ///
    /// Defaults to 1. Fetching stops earlier when the listing runs out.
    ///
    /// Can be provided via:
    /// - CLI: `--pages <N>` or `-p <N>`
    /// - Environment: `REVFEED_PAGES`
    /// - Config file: `pages = 3`
    #[ortho_config(cli_short = 'p')]
    pub pages: Option<u32>,

    /// Prompts between pages instead of fetching a fixed budget.
    ///
    /// Can be provided via:
    /// - CLI: `--interactive` / `-i`
    /// - Config file: `interactive = true`
    ///
    /// Note: Environment variable `REVFEED_INTERACTIVE` is not supported
    /// because `ortho_config` does not load boolean values from the
    /// environment.
    #[ortho_config(cli_short = 'i')]
    pub interactive: bool,

    /// REST endpoint for GitHub Enterprise, e.g. `https://host/api/v3`.
    ///
    /// Defaults to the public `https://api.github.com`.
    ///
    /// Can be provided via:
    /// - CLI: `--api-base <URL>`
    /// - Environment: `REVFEED_API_BASE`
    /// - Config file: `api_base = "..."`
    #[ortho_config()]
    pub api_base: Option<String>,
}

impl Default for RevfeedConfig {
    fn default() -> Self {
        Self {
            owner: None,
            repo: None,
            token: None,
            username: None,
            since: None,
            exclude_self: false,
            pages: None,
            interactive: false,
            api_base: None,
        }
    }
}

impl RevfeedConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// A blank token is treated as absent. `None` means the feed runs
    /// unauthenticated.
    #[must_use]
    pub fn resolve_token(&self) -> Option<PersonalAccessToken> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .and_then(|value| PersonalAccessToken::new(value).ok())
    }

    /// Returns owner and repo if both are configured.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Configuration`] when owner or repo is missing.
    pub fn require_repository(&self) -> Result<(&str, &str), FeedError> {
        match (&self.owner, &self.repo) {
            (Some(owner), Some(repo)) => Ok((owner.as_str(), repo.as_str())),
            (None, _) => Err(FeedError::Configuration {
                message: "repository owner is required (use --owner or -o)".to_owned(),
            }),
            (_, None) => Err(FeedError::Configuration {
                message: "repository name is required (use --repo or -r)".to_owned(),
            }),
        }
    }

    /// Builds the repository locator, honouring a configured API base.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Configuration`] when owner or repo is missing
    /// and [`FeedError::InvalidUrl`] when the API base does not parse.
    pub fn resolve_locator(&self) -> Result<RepositoryLocator, FeedError> {
        let (owner, repo) = self.require_repository()?;
        self.api_base.as_deref().map_or_else(
            || RepositoryLocator::from_owner_repo(owner, repo),
            |base| RepositoryLocator::with_api_base(base, owner, repo),
        )
    }

    /// Resolves the timestamp lower bound, defaulting to three calendar
    /// months before now.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidSince`] when the configured value is
    /// neither RFC 3339 nor `YYYY-MM-DD`.
    pub fn resolve_since(&self) -> Result<DateTime<Utc>, FeedError> {
        self.since
            .as_deref()
            .map_or_else(|| Ok(default_since(Utc::now())), parse_since)
    }

    /// Author filter with surrounding whitespace stripped; blank means none.
    #[must_use]
    pub fn resolve_author_filter(&self) -> Option<String> {
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|username| !username.is_empty())
            .map(str::to_owned)
    }

    /// Number of pages a non-interactive run fetches up front.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Configuration`] when `pages` is zero.
    pub fn resolve_page_budget(&self) -> Result<u32, FeedError> {
        match self.pages {
            Some(0) => Err(FeedError::Configuration {
                message: "pages must be at least 1".to_owned(),
            }),
            Some(budget) => Ok(budget),
            None => Ok(1),
        }
    }
}

/// Three calendar months before `now`, clamped to the end of shorter months.
fn default_since(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(3)).unwrap_or(now)
}

fn parse_since(value: &str) -> Result<DateTime<Utc>, FeedError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|error| FeedError::InvalidSince(format!("{value}: {error}")))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| FeedError::InvalidSince(value.to_owned()))?;
    Ok(midnight.and_utc())
}
