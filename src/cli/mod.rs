//! Command-line drivers for the review-comment feed.

pub mod feed;
