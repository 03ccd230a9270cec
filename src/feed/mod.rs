//! Feed core: pull-request caching, comment filtering, pagination state,
//! and view signalling.

pub mod cache;
pub mod pipeline;
pub mod session;
pub mod view;

pub use cache::PullRequestCache;
pub use pipeline::{CommentPipeline, DEFAULT_PAGE_SIZE, FeedCriteria, FeedEntry, FeedPage};
pub use session::FeedSession;
pub use view::{FeedView, NullFeedView};
