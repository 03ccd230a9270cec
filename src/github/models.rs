//! Wire and domain models for review comments and pull-request metadata.
//!
//! The `Api*` structs mirror the REST payloads; `From` conversions reduce
//! them to the fields the feed renders.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::github::locator::PullRequestRef;

/// Number of diff lines kept below the hunk header when excerpting.
const DIFF_EXCERPT_LINES: usize = 5;

/// A single pull-request review comment, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewComment {
    /// Comment identifier assigned by GitHub.
    pub id: u64,
    /// Login of the comment author, when the account still exists.
    pub author: Option<String>,
    /// Creation timestamp reported by GitHub.
    pub created_at: Option<DateTime<Utc>>,
    /// Markdown body of the comment.
    pub body: String,
    /// Path of the file the comment annotates.
    pub file_path: Option<String>,
    /// Tail of the diff hunk the comment was left on.
    pub diff_excerpt: Option<String>,
    /// API URL of the pull request the comment belongs to.
    pub pull_request_ref: PullRequestRef,
    /// Browser URL of the comment.
    pub html_url: Option<String>,
}

/// Pull-request details shown alongside each of its comments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestMeta {
    /// Pull request number, absent for the not-found placeholder.
    pub number: Option<u64>,
    /// Pull request title.
    pub title: Option<String>,
    /// Login of the pull request author.
    pub author: Option<String>,
    /// Avatar URL of the pull request author.
    pub avatar_url: Option<String>,
    /// Browser URL of the pull request.
    pub html_url: Option<String>,
}

impl PullRequestMeta {
    /// Placeholder recorded for pull requests that return 404.
    ///
    /// Deleted pull requests stay deleted, so the placeholder is cached like
    /// a successful lookup and rendered with stand-in fields.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            number: None,
            title: Some("(Not Found)".to_owned()),
            author: Some("???".to_owned()),
            avatar_url: Some("#".to_owned()),
            html_url: Some("#".to_owned()),
        }
    }

    /// Number rendered in headings, `???` when the pull request is gone.
    #[must_use]
    pub fn display_number(&self) -> String {
        self.number
            .map_or_else(|| "???".to_owned(), |number| number.to_string())
    }
}

/// Account fields shared by comment and pull-request payloads.
#[derive(Debug, Deserialize)]
pub(super) struct ApiUser {
    #[serde(default)]
    pub(super) login: Option<String>,
    #[serde(default)]
    pub(super) avatar_url: Option<String>,
}

/// Pull-request payload returned by the REST endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct ApiPullRequest {
    pub(super) number: u64,
    #[serde(default)]
    pub(super) title: Option<String>,
    #[serde(default)]
    pub(super) html_url: Option<String>,
    #[serde(default)]
    pub(super) user: Option<ApiUser>,
}

impl From<ApiPullRequest> for PullRequestMeta {
    fn from(value: ApiPullRequest) -> Self {
        let (author, avatar_url) = value
            .user
            .map_or((None, None), |user| (user.login, user.avatar_url));
        Self {
            number: Some(value.number),
            title: value.title,
            author,
            avatar_url,
            html_url: value.html_url,
        }
    }
}

/// Review-comment payload returned by the listing endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct ApiReviewComment {
    pub(super) id: u64,
    #[serde(default)]
    pub(super) body: Option<String>,
    #[serde(default)]
    pub(super) user: Option<ApiUser>,
    #[serde(default)]
    pub(super) path: Option<String>,
    #[serde(default)]
    pub(super) diff_hunk: Option<String>,
    pub(super) pull_request_url: String,
    #[serde(default)]
    pub(super) html_url: Option<String>,
    #[serde(default)]
    pub(super) created_at: Option<DateTime<Utc>>,
}

impl From<ApiReviewComment> for ReviewComment {
    fn from(value: ApiReviewComment) -> Self {
        let diff_excerpt = value.diff_hunk.as_deref().and_then(derive_diff_excerpt);
        Self {
            id: value.id,
            author: value.user.and_then(|user| user.login),
            created_at: value.created_at,
            body: value.body.unwrap_or_default(),
            file_path: value.path,
            diff_excerpt,
            pull_request_ref: PullRequestRef::new(value.pull_request_url),
            html_url: value.html_url,
        }
    }
}

/// Drops the `@@` hunk header and keeps the last few diff lines, which are
/// the ones closest to the commented line.
fn derive_diff_excerpt(diff_hunk: &str) -> Option<String> {
    let lines: Vec<&str> = diff_hunk.lines().skip(1).collect();
    if lines.is_empty() {
        return None;
    }
    let start = lines.len().saturating_sub(DIFF_EXCERPT_LINES);
    lines.get(start..).map(|tail| tail.join("\n"))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn converts_review_comment_payload() {
        let payload = json!({
            "id": 42,
            "body": "Consider renaming this.",
            "user": {"login": "octocat", "avatar_url": "https://example.test/octocat.png"},
            "path": "src/lib.rs",
            "diff_hunk": "@@ -1,2 +1,2 @@\n-let x = 1;\n+let count = 1;",
            "pull_request_url": "https://api.github.com/repos/octo/widgets/pulls/7",
            "html_url": "https://github.com/octo/widgets/pull/7#discussion_r42",
            "created_at": "2024-03-01T09:30:00Z"
        });

        let api: ApiReviewComment =
            serde_json::from_value(payload).expect("payload should deserialise");
        let comment = ReviewComment::from(api);

        assert_eq!(comment.id, 42);
        assert_eq!(comment.author.as_deref(), Some("octocat"));
        assert_eq!(comment.body, "Consider renaming this.");
        assert_eq!(comment.file_path.as_deref(), Some("src/lib.rs"));
        assert_eq!(
            comment.diff_excerpt.as_deref(),
            Some("-let x = 1;\n+let count = 1;")
        );
        assert_eq!(
            comment.pull_request_ref,
            PullRequestRef::new("https://api.github.com/repos/octo/widgets/pulls/7".to_owned())
        );
        assert_eq!(
            comment.created_at.map(|created| created.to_rfc3339()),
            Some("2024-03-01T09:30:00+00:00".to_owned())
        );
    }

    #[rstest]
    fn tolerates_sparse_review_comment_payload() {
        let payload = json!({
            "id": 7,
            "pull_request_url": "https://api.github.com/repos/octo/widgets/pulls/9"
        });

        let api: ApiReviewComment =
            serde_json::from_value(payload).expect("payload should deserialise");
        let comment = ReviewComment::from(api);

        assert_eq!(comment.author, None);
        assert_eq!(comment.body, "");
        assert_eq!(comment.file_path, None);
        assert_eq!(comment.diff_excerpt, None);
        assert_eq!(comment.created_at, None);
    }

    #[rstest]
    fn converts_pull_request_payload() {
        let payload = json!({
            "number": 7,
            "title": "Add widget polishing",
            "html_url": "https://github.com/octo/widgets/pull/7",
            "user": {"login": "hubot", "avatar_url": "https://example.test/hubot.png"}
        });

        let api: ApiPullRequest =
            serde_json::from_value(payload).expect("payload should deserialise");
        let meta = PullRequestMeta::from(api);

        assert_eq!(meta.number, Some(7));
        assert_eq!(meta.title.as_deref(), Some("Add widget polishing"));
        assert_eq!(meta.author.as_deref(), Some("hubot"));
        assert_eq!(
            meta.avatar_url.as_deref(),
            Some("https://example.test/hubot.png")
        );
        assert_eq!(meta.display_number(), "7");
    }

    #[rstest]
    fn pull_request_without_user_has_no_author() {
        let payload = json!({"number": 3});

        let api: ApiPullRequest =
            serde_json::from_value(payload).expect("payload should deserialise");
        let meta = PullRequestMeta::from(api);

        assert_eq!(meta.author, None);
        assert_eq!(meta.avatar_url, None);
    }

    #[rstest]
    fn not_found_placeholder_uses_stand_in_fields() {
        let placeholder = PullRequestMeta::not_found();

        assert_eq!(placeholder.number, None);
        assert_eq!(placeholder.title.as_deref(), Some("(Not Found)"));
        assert_eq!(placeholder.author.as_deref(), Some("???"));
        assert_eq!(placeholder.avatar_url.as_deref(), Some("#"));
        assert_eq!(placeholder.html_url.as_deref(), Some("#"));
        assert_eq!(placeholder.display_number(), "???");
    }

    #[rstest]
    #[case::header_only("@@ -1,2 +1,2 @@", None)]
    #[case::shorter_than_window("@@ -1 +1 @@\n-old\n+new", Some("-old\n+new"))]
    #[case::keeps_last_five(
        "@@ -1,7 +1,7 @@\n line1\n line2\n-line3\n+line3b\n line4\n line5\n line6",
        Some("-line3\n+line3b\n line4\n line5\n line6")
    )]
    fn derives_diff_excerpt(#[case] diff_hunk: &str, #[case] expected: Option<&str>) {
        assert_eq!(derive_diff_excerpt(diff_hunk), expected.map(str::to_owned));
    }
}
