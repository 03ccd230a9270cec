//! Terminal rendering of feed entries and progress signals.

use std::io::Write;

use chrono::SecondsFormat;

use crate::feed::pipeline::FeedEntry;
use crate::feed::view::FeedView;

/// Renders feed signals as plain text on any writer.
///
/// Write failures are dropped, as the view contract requires.
pub struct TerminalFeedView<W: Write> {
    writer: W,
}

impl<W: Write> TerminalFeedView<W> {
    /// Wraps `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Releases the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_entry(&mut self, entry: &FeedEntry) {
        let pull_request = &entry.pull_request;
        let comment = &entry.comment;
        let title = pull_request.title.as_deref().unwrap_or("(no title)");
        let pull_author = pull_request.author.as_deref().unwrap_or("unknown");
        let author = comment.author.as_deref().unwrap_or("unknown");
        let created = comment.created_at.map_or_else(
            || "unknown time".to_owned(),
            |created| created.to_rfc3339_opts(SecondsFormat::Secs, true),
        );

        let _ignored = writeln!(
            self.writer,
            "#{number} {title} (by {pull_author})",
            number = pull_request.display_number(),
        );
        let location = comment.file_path.as_deref().map_or_else(
            || format!("  {author} commented {created}"),
            |path| format!("  {author} commented {created} on {path}"),
        );
        let _ignored = writeln!(self.writer, "{location}");
        if let Some(excerpt) = comment.diff_excerpt.as_deref() {
            for line in excerpt.lines() {
                let _ignored = writeln!(self.writer, "  | {line}");
            }
        }
        for line in comment.body.lines() {
            let _ignored = writeln!(self.writer, "  {line}");
        }
        if let Some(url) = comment.html_url.as_deref() {
            let _ignored = writeln!(self.writer, "  -> {url}");
        }
        let _ignored = writeln!(self.writer);
    }
}

impl<W: Write> FeedView for TerminalFeedView<W> {
    fn loading_started(&mut self) {
        let _ignored = writeln!(self.writer, "loading...");
    }

    fn loading_finished(&mut self) {}

    fn entries_loaded(&mut self, entries: &[FeedEntry]) {
        for entry in entries {
            self.write_entry(entry);
        }
    }

    fn no_data(&mut self, page: u32) {
        let _ignored = writeln!(self.writer, "no comments found on page {page}");
    }

    fn more_available(&mut self, next_page: u32) {
        let _ignored = writeln!(
            self.writer,
            "more comments available (next page {next_page})"
        );
    }

    fn error(&mut self, message: &str) {
        let _ignored = writeln!(self.writer, "error: {message}");
    }
}
