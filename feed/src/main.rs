use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use httpkit::{HttpClient, UreqTransport};
use posts_feed::{render_row, FeedRequests, PostFeed, SiblingPolicy, DEFAULT_BASE_URL};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OnError {
    Cancel,
    Detach,
}

impl From<OnError> for SiblingPolicy {
    fn from(value: OnError) -> Self {
        match value {
            OnError::Cancel => SiblingPolicy::Cancel,
            OnError::Detach => SiblingPolicy::Detach,
        }
    }
}

/// Print posts with their authors.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// API root serving /posts and /users.
    #[arg(long, env = "FEED_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// What to do with pending author lookups when one fails.
    #[arg(long, value_enum, default_value_t = OnError::Cancel)]
    on_error: OnError,

    /// Only show posts by this user id.
    #[arg(long)]
    user: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::info!(base_url = %args.base_url, "loading feed");

    let transport = UreqTransport::new(Duration::from_secs(args.timeout_secs));
    let feed = PostFeed::new(HttpClient::new(transport), FeedRequests::new(&args.base_url))
        .with_policy(args.on_error.into());

    let posts = match args.user {
        Some(user_id) => feed.load_for_user(user_id).await,
        None => feed.load().await,
    }
    .with_context(|| format!("failed to load feed from {}", args.base_url))?;

    for post in &posts {
        println!("{}", render_row(post));
    }
    tracing::info!(count = posts.len(), "feed loaded");
    Ok(())
}
