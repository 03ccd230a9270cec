//! Drives the review-comment feed from resolved configuration.
//!
//! The driver wires the configured repository and credentials into the
//! Octocrab gateways, streams pages through a [`FeedSession`], and renders
//! every signal with the terminal view. Page turning is either budgeted
//! (fetch up to `--pages` pages without pausing) or interactive (prompt
//! before each additional page). Prompts go to stderr so piped stdout
//! stays clean feed output.

use std::io::{self, BufRead, Write};

use crate::config::RevfeedConfig;
use crate::feed::{FeedCriteria, FeedSession, FeedView};
use crate::github::{
    FeedError, OctocrabPullRequestGateway, OctocrabReviewCommentGateway, PullRequestGateway,
    ReviewCommentGateway, build_octocrab_client,
};
use crate::render::TerminalFeedView;

/// Runs the feed described by `config` against the standard streams.
///
/// # Errors
///
/// Returns an error when the configuration is incomplete, when the first
/// page of a feed cannot be loaded, or when a budgeted page turn fails.
/// Interactive page turns report failures through the view and keep the
/// session alive instead.
pub async fn run(config: &RevfeedConfig) -> Result<(), FeedError> {
    run_with_io(config, io::stdin().lock(), io::stdout().lock(), io::stderr()).await
}

async fn run_with_io<Input, Output, Prompt>(
    config: &RevfeedConfig,
    input: Input,
    output: Output,
    prompt: Prompt,
) -> Result<(), FeedError>
where
    Input: BufRead,
    Output: Write,
    Prompt: Write,
{
    let locator = config.resolve_locator()?;
    let token = config.resolve_token();
    let mut criteria = FeedCriteria::new(config.resolve_since()?);
    criteria.author = config.resolve_author_filter();
    criteria.exclude_self = config.exclude_self;
    let page_budget = config.resolve_page_budget()?;

    let client = build_octocrab_client(token.as_ref(), locator.api_base())?;
    let listing = OctocrabReviewCommentGateway::new(client.clone());
    let pull_requests = OctocrabPullRequestGateway::new(client, locator.api_base().clone());
    let mut session = FeedSession::new(&listing, &pull_requests, locator, criteria);
    let mut view = TerminalFeedView::new(output);
    drive_feed(
        &mut session,
        &mut view,
        input,
        prompt,
        config.interactive,
        page_budget,
    )
    .await
}

/// Loads the first page, then turns pages until the feed or the reader
/// runs out.
///
/// A failed interactive page turn is reported through the view and leaves
/// the session on its current page so the next confirmation retries it.
async fn drive_feed<Listing, PullRequests, View, Input, Prompt>(
    session: &mut FeedSession<'_, Listing, PullRequests>,
    view: &mut View,
    mut input: Input,
    mut prompt: Prompt,
    interactive: bool,
    page_budget: u32,
) -> Result<(), FeedError>
where
    Listing: ReviewCommentGateway,
    PullRequests: PullRequestGateway,
    View: FeedView,
    Input: BufRead,
    Prompt: Write,
{
    session.start_fresh(view).await?;
    if interactive {
        while session.has_more() {
            if !confirm_load_more(&mut input, &mut prompt)? {
                break;
            }
            if let Err(error) = session.load_more(view).await {
                tracing::warn!("loading the next page failed: {error}");
                view.error(&error.to_string());
            }
        }
        return Ok(());
    }
    let mut fetched_pages = 1_u32;
    while session.has_more() && fetched_pages < page_budget {
        session.load_more(view).await?;
        fetched_pages += 1;
    }
    Ok(())
}

/// Asks the reader whether to fetch another page.
///
/// Any answer starting with `y` or `Y` confirms; everything else,
/// including end of input, declines.
fn confirm_load_more<Input, Prompt>(
    input: &mut Input,
    prompt: &mut Prompt,
) -> Result<bool, FeedError>
where
    Input: BufRead,
    Prompt: Write,
{
    write!(prompt, "load more? [y/N] ")
        .and_then(|()| prompt.flush())
        .map_err(|error| FeedError::Io {
            message: error.to_string(),
        })?;
    let mut answer = String::new();
    input.read_line(&mut answer).map_err(|error| FeedError::Io {
        message: error.to_string(),
    })?;
    Ok(answer.trim_start().starts_with(['y', 'Y']))
}

#[cfg(test)]
mod tests {
    //! Exercises page turning, prompting, and configuration guards with
    //! scripted gateways and in-memory streams.

    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use chrono::{TimeZone, Utc};
    use http::StatusCode;
    use rstest::rstest;

    use super::{FeedCriteria, FeedSession, RevfeedConfig, TerminalFeedView};
    use super::{confirm_load_more, drive_feed, run_with_io};
    use crate::github::{
        FeedError, MockPullRequestGateway, MockReviewCommentGateway, PullRequestMeta,
        PullRequestRef, RepositoryLocator, ReviewComment,
    };

    fn locator() -> RepositoryLocator {
        RepositoryLocator::from_owner_repo("octo", "widgets").expect("valid locator")
    }

    fn criteria() -> FeedCriteria {
        let since = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("valid timestamp");
        let mut criteria = FeedCriteria::new(since);
        criteria.page_size = 1;
        criteria
    }

    fn comment(id: u64) -> ReviewComment {
        ReviewComment {
            id,
            author: Some("alice".to_owned()),
            created_at: None,
            body: format!("comment {id}"),
            file_path: None,
            diff_excerpt: None,
            pull_request_ref: PullRequestRef::new(
                "https://api.github.com/repos/octo/widgets/pulls/7".to_owned(),
            ),
            html_url: None,
        }
    }

    fn scripted_listing(
        responses: Vec<Result<Vec<ReviewComment>, FeedError>>,
        requested: Arc<Mutex<Vec<u32>>>,
    ) -> MockReviewCommentGateway {
        let calls = AtomicUsize::new(0);
        let mut listing = MockReviewCommentGateway::new();
        listing
            .expect_list_review_comments()
            .returning(move |_, params| {
                requested.lock().expect("requests lock").push(params.page);
                let index = calls.fetch_add(1, Ordering::SeqCst);
                responses.get(index).cloned().unwrap_or_else(|| Ok(vec![]))
            });
        listing
    }

    fn any_pull_requests() -> MockPullRequestGateway {
        let mut pull_requests = MockPullRequestGateway::new();
        pull_requests.expect_pull_request().returning(|_| {
            Ok(PullRequestMeta {
                number: Some(7),
                title: Some("Add widgets".to_owned()),
                author: Some("hubot".to_owned()),
                avatar_url: None,
                html_url: Some("https://github.com/octo/widgets/pull/7".to_owned()),
            })
        });
        pull_requests
    }

    async fn drive(
        responses: Vec<Result<Vec<ReviewComment>, FeedError>>,
        input: &str,
        interactive: bool,
        page_budget: u32,
    ) -> (Result<(), FeedError>, Vec<u32>, String, String) {
        let requested = Arc::new(Mutex::new(Vec::new()));
        let listing = scripted_listing(responses, Arc::clone(&requested));
        let pull_requests = any_pull_requests();
        let mut session = FeedSession::new(&listing, &pull_requests, locator(), criteria());
        let mut view = TerminalFeedView::new(Vec::new());
        let mut prompt = Vec::new();
        let result = drive_feed(
            &mut session,
            &mut view,
            Cursor::new(input.as_bytes().to_vec()),
            &mut prompt,
            interactive,
            page_budget,
        )
        .await;
        let pages = requested.lock().expect("requests lock").clone();
        let output = String::from_utf8(view.into_inner()).expect("output should be UTF-8");
        let prompts = String::from_utf8(prompt).expect("prompt should be UTF-8");
        (result, pages, output, prompts)
    }

    #[tokio::test]
    async fn budget_turns_pages_without_prompting() {
        let responses = vec![
            Ok(vec![comment(1)]),
            Ok(vec![comment(2)]),
            Ok(vec![comment(3)]),
            Ok(vec![comment(4)]),
        ];
        let (result, pages, output, prompts) = drive(responses, "", false, 3).await;

        result.expect("budgeted run should succeed");
        assert_eq!(pages, vec![1, 2, 3]);
        assert!(output.contains("more comments available (next page 4)"));
        assert!(prompts.is_empty());
    }

    #[tokio::test]
    async fn budget_stops_when_the_feed_runs_out() {
        let responses = vec![Ok(vec![comment(1)]), Ok(vec![])];
        let (result, pages, output, _prompts) = drive(responses, "", false, 5).await;

        result.expect("budgeted run should succeed");
        assert_eq!(pages, vec![1, 2]);
        assert!(output.contains("no comments found on page 2"));
    }

    #[tokio::test]
    async fn interactive_turns_pages_until_declined() {
        let responses = vec![
            Ok(vec![comment(1)]),
            Ok(vec![comment(2)]),
            Ok(vec![comment(3)]),
        ];
        let (result, pages, _output, prompts) = drive(responses, "y\nn\n", true, 1).await;

        result.expect("interactive run should succeed");
        assert_eq!(pages, vec![1, 2]);
        assert_eq!(prompts, "load more? [y/N] load more? [y/N] ");
    }

    #[tokio::test]
    async fn interactive_stops_at_end_of_input() {
        let responses = vec![Ok(vec![comment(1)]), Ok(vec![comment(2)])];
        let (result, pages, _output, prompts) = drive(responses, "", true, 1).await;

        result.expect("interactive run should succeed");
        assert_eq!(pages, vec![1]);
        assert_eq!(prompts, "load more? [y/N] ");
    }

    #[tokio::test]
    async fn interactive_reports_failed_page_turn_and_carries_on() {
        let responses = vec![
            Ok(vec![comment(1)]),
            Err(FeedError::Api {
                message: "list review comments failed: boom".to_owned(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            }),
            Ok(vec![comment(2)]),
        ];
        let (result, pages, output, _prompts) = drive(responses, "y\ny\nn\n", true, 1).await;

        result.expect("interactive run should stay alive after a failed page");
        assert_eq!(pages, vec![1, 2, 2]);
        assert!(output.contains("error: list review comments failed: boom [500]"));
    }

    #[rstest]
    #[case::lower_yes("y\n", true)]
    #[case::upper_yes("Y\n", true)]
    #[case::word_yes("yes\n", true)]
    #[case::padded_yes("  y\n", true)]
    #[case::no("n\n", false)]
    #[case::empty_line("\n", false)]
    #[case::end_of_input("", false)]
    #[case::other_word("maybe\n", false)]
    fn confirm_load_more_reads_the_answer(#[case] input: &str, #[case] expected: bool) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut prompt = Vec::new();

        let confirmed =
            confirm_load_more(&mut reader, &mut prompt).expect("confirmation should succeed");

        assert_eq!(confirmed, expected);
        let written = String::from_utf8(prompt).expect("prompt should be UTF-8");
        assert_eq!(written, "load more? [y/N] ");
    }

    #[tokio::test]
    async fn run_with_io_rejects_incomplete_configuration() {
        let config = RevfeedConfig::default();

        let result = run_with_io(&config, Cursor::new(Vec::new()), Vec::new(), Vec::new()).await;

        match result {
            Err(FeedError::Configuration { message }) => {
                assert!(message.contains("repository owner is required"));
            }
            other => panic!("expected a configuration error, got {other:?}"),
        }
    }
}
