//! View-facing signals emitted while feed pages load.

use crate::feed::pipeline::FeedEntry;

/// Receives progress and result signals from a feed session.
///
/// Signals are fire-and-forget: implementations render them but never fail
/// back into the session. A view that cannot write drops the signal.
pub trait FeedView {
    /// A page fetch is starting.
    fn loading_started(&mut self);

    /// The page fetch finished, whether it succeeded or failed.
    fn loading_finished(&mut self);

    /// Entries that survived filtering, in listing order.
    fn entries_loaded(&mut self, entries: &[FeedEntry]);

    /// `page` produced no entries after filtering.
    fn no_data(&mut self, page: u32);

    /// Another page may exist; `next_page` is the one to request.
    fn more_available(&mut self, next_page: u32);

    /// A fetch failed; `message` is operator-readable.
    fn error(&mut self, message: &str);
}

/// View that discards every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedView;

impl FeedView for NullFeedView {
    fn loading_started(&mut self) {}

    fn loading_finished(&mut self) {}

    fn entries_loaded(&mut self, _entries: &[FeedEntry]) {}

    fn no_data(&mut self, _page: u32) {}

    fn more_available(&mut self, _next_page: u32) {}

    fn error(&mut self, _message: &str) {}
}
