//! Demo consumer of `httpkit`: a feed of posts with their authors.
//!
//! # Overview
//! Lists posts from a JSONPlaceholder-style API, then fetches each post's
//! author concurrently and attaches it. The `posts-feed` binary renders the
//! result as a plain text list.

pub mod feed;
pub mod models;
pub mod requests;

pub use feed::{PostFeed, SiblingPolicy};
pub use models::{Address, Company, Post, User};
pub use requests::{FeedRequests, DEFAULT_BASE_URL};

/// One display row per post.
pub fn render_row(post: &Post) -> String {
    format!(
        "{}\n    by {} (@{})",
        post.title,
        post.author_name(),
        post.author_username()
    )
}
