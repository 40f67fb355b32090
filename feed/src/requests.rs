//! Request builders for the posts and users endpoints.

use httpkit::RequestBuilder;

use crate::models::{Post, User};

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Hands out builders rooted at one base URL.
#[derive(Debug, Clone)]
pub struct FeedRequests {
    base_url: String,
}

impl Default for FeedRequests {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl FeedRequests {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /posts`
    pub fn posts(&self) -> RequestBuilder {
        let mut builder = RequestBuilder::new(&self.base_url);
        builder.append_path_component("posts");
        builder
    }

    /// `GET /posts?userId={id}`
    pub fn posts_for_user(&self, user: &User) -> RequestBuilder {
        self.posts_for_user_id(user.id)
    }

    pub fn posts_for_user_id(&self, user_id: u32) -> RequestBuilder {
        let mut builder = self.posts();
        builder.append_query_item("userId", &user_id.to_string());
        builder
    }

    /// `GET /users/{post.userId}`
    pub fn user_for_post(&self, post: &Post) -> RequestBuilder {
        let mut builder = RequestBuilder::new(&self.base_url);
        builder
            .append_path_component("users")
            .append_path_component(&post.user_id.to_string());
        builder
    }
}
