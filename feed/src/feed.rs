//! Posts feed: list posts, then look up every author concurrently.
//!
//! # Design
//! Author lookups run as separate Tokio tasks in a `JoinSet` and are joined
//! as they finish. The first failure is returned and nothing after it is
//! reported. What happens to lookups still in flight at that point is a
//! caller decision expressed by [`SiblingPolicy`]. Posts come back in listing
//! order regardless of which lookup finished first.

use std::fmt;

use httpkit::{ApiError, HttpClient, HttpRequest, Transport, TransportError};
use tokio::task::JoinSet;

use crate::models::{Post, User};
use crate::requests::FeedRequests;

/// What to do with in-flight author lookups once one of them fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SiblingPolicy {
    /// Abort the remaining lookups.
    #[default]
    Cancel,
    /// Let the remaining lookups finish and drop their results.
    Detach,
}

impl fmt::Display for SiblingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiblingPolicy::Cancel => f.write_str("cancel"),
            SiblingPolicy::Detach => f.write_str("detach"),
        }
    }
}

#[derive(Debug)]
pub struct PostFeed<T> {
    client: HttpClient<T>,
    requests: FeedRequests,
    policy: SiblingPolicy,
}

impl<T: Transport> PostFeed<T> {
    pub fn new(client: HttpClient<T>, requests: FeedRequests) -> Self {
        Self {
            client,
            requests,
            policy: SiblingPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: SiblingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub async fn get_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.client.get_models(&self.requests.posts()).await
    }

    pub async fn get_posts_for_user(&self, user_id: u32) -> Result<Vec<Post>, ApiError> {
        self.client
            .get_models(&self.requests.posts_for_user_id(user_id))
            .await
    }

    pub async fn get_user(&self, post: &Post) -> Result<User, ApiError> {
        self.client.get_model(&self.requests.user_for_post(post)).await
    }

    /// All posts, each with its author attached.
    pub async fn load(&self) -> Result<Vec<Post>, ApiError> {
        let posts = self.get_posts().await?;
        self.attach_users(posts).await
    }

    /// One user's posts, each with its author attached.
    pub async fn load_for_user(&self, user_id: u32) -> Result<Vec<Post>, ApiError> {
        let posts = self.get_posts_for_user(user_id).await?;
        self.attach_users(posts).await
    }

    /// Fetch every post's author concurrently and attach it.
    ///
    /// Succeeds only after every lookup has succeeded.
    pub async fn attach_users(&self, posts: Vec<Post>) -> Result<Vec<Post>, ApiError> {
        // Build everything up front so a bad URL fails before any task starts.
        let requests = posts
            .iter()
            .map(|post| self.requests.user_for_post(post).build())
            .collect::<Result<Vec<HttpRequest>, _>>()?;

        let mut tasks = JoinSet::new();
        for (index, request) in requests.into_iter().enumerate() {
            let client = self.client.clone();
            tasks.spawn(async move { (index, client.send_request::<User>(&request).await) });
        }
        tracing::debug!(count = tasks.len(), "fetching authors");

        let mut users: Vec<Option<User>> = (0..posts.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            let outcome = match joined {
                Ok((index, result)) => result.map(|user| (index, user)),
                Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                Err(_) => Err(ApiError::Transport(TransportError::Cancelled)),
            };
            match outcome {
                Ok((index, user)) => users[index] = Some(user),
                Err(err) => {
                    tracing::warn!(error = %err, policy = %self.policy, in_flight = tasks.len(), "author lookup failed");
                    match self.policy {
                        SiblingPolicy::Cancel => tasks.abort_all(),
                        SiblingPolicy::Detach => tasks.detach_all(),
                    }
                    return Err(err);
                }
            }
        }

        Ok(posts
            .into_iter()
            .zip(users)
            .map(|(mut post, user)| {
                post.user = user;
                post
            })
            .collect())
    }
}
