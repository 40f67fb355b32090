use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u32,
    pub id: u32,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub address: Address,
    pub phone: String,
    pub website: String,
    pub company: Company,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub user_id: u32,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Deserialize)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostFilter {
    pub user_id: Option<u32>,
}

/// In-memory backing data. Post ids are assigned sequentially.
#[derive(Clone, Debug, Default)]
pub struct Store {
    posts: BTreeMap<u32, Post>,
    users: BTreeMap<u32, User>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two users and three posts, shaped like the JSONPlaceholder fixtures.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.insert_user(user(1, "Leanne Graham", "Bret"));
        store.insert_user(user(2, "Ervin Howell", "Antonette"));
        store.insert_post(1, "sunt aut facere", "quia et suscipit");
        store.insert_post(1, "qui est esse", "est rerum tempore");
        store.insert_post(2, "ea molestias quasi", "et iusto sed quo");
        store
    }

    pub fn insert_user(&mut self, user: User) -> &mut Self {
        self.users.insert(user.id, user);
        self
    }

    /// Insert a post, returning it with its assigned id. The author does not
    /// have to exist.
    pub fn insert_post(&mut self, user_id: u32, title: &str, body: &str) -> Post {
        let id = self.posts.keys().next_back().map_or(1, |last| last + 1);
        let post = Post {
            user_id,
            id,
            title: title.to_string(),
            body: body.to_string(),
        };
        self.posts.insert(id, post.clone());
        post
    }
}

pub fn user(id: u32, name: &str, username: &str) -> User {
    User {
        id,
        name: name.to_string(),
        username: username.to_string(),
        email: format!("{}@example.test", username.to_lowercase()),
        address: Address {
            street: "Kulas Light".to_string(),
            suite: format!("Apt. {id}"),
            city: "Gwenborough".to_string(),
            zipcode: "92998-3874".to_string(),
        },
        phone: "1-770-736-8031".to_string(),
        website: "example.test".to_string(),
        company: Company {
            name: "Romaguera-Crona".to_string(),
            catch_phrase: "Multi-layered client-server neural-net".to_string(),
            bs: "harness real-time e-markets".to_string(),
        },
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post).put(update_post).delete(delete_post))
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Store::seeded()).await
}

pub async fn run_with(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(store)).await
}

async fn list_posts(State(db): State<Db>, Query(filter): Query<PostFilter>) -> Json<Vec<Post>> {
    let store = db.read().await;
    let posts = store
        .posts
        .values()
        .filter(|p| filter.user_id.map_or(true, |id| p.user_id == id))
        .cloned()
        .collect();
    Json(posts)
}

async fn create_post(
    State(db): State<Db>,
    Json(input): Json<NewPost>,
) -> (StatusCode, Json<Post>) {
    let post = db
        .write()
        .await
        .insert_post(input.user_id, &input.title, &input.body);
    tracing::debug!(id = post.id, "created post");
    (StatusCode::CREATED, Json(post))
}

async fn get_post(State(db): State<Db>, Path(id): Path<u32>) -> Result<Json<Post>, StatusCode> {
    let store = db.read().await;
    store.posts.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_post(
    State(db): State<Db>,
    Path(id): Path<u32>,
    Json(input): Json<UpdatePost>,
) -> Result<Json<Post>, StatusCode> {
    let mut store = db.write().await;
    let post = store.posts.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        post.title = title;
    }
    if let Some(body) = input.body {
        post.body = body;
    }
    Ok(Json(post.clone()))
}

async fn delete_post(State(db): State<Db>, Path(id): Path<u32>) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .posts
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    let store = db.read().await;
    Json(store.users.values().cloned().collect())
}

async fn get_user(State(db): State<Db>, Path(id): Path<u32>) -> Result<Json<User>, StatusCode> {
    let store = db.read().await;
    store.users.get(&id).cloned().map(Json).ok_or_else(|| {
        tracing::debug!(id, "user not found");
        StatusCode::NOT_FOUND
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_serializes_with_camel_case_user_id() {
        let post = Post {
            user_id: 7,
            id: 1,
            title: "t".to_string(),
            body: "b".to_string(),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["userId"], 7);
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn company_uses_catch_phrase_key() {
        let json = serde_json::to_value(user(1, "A", "a")).unwrap();
        assert_eq!(json["company"]["catchPhrase"], "Multi-layered client-server neural-net");
        assert_eq!(json["email"], "a@example.test");
    }

    #[test]
    fn seeded_store_assigns_sequential_ids() {
        let mut store = Store::seeded();
        assert_eq!(store.posts.len(), 3);
        assert_eq!(store.users.len(), 2);
        let post = store.insert_post(99, "orphan", "");
        assert_eq!(post.id, 4);
    }

    #[test]
    fn new_post_defaults_body_to_empty() {
        let input: NewPost = serde_json::from_str(r#"{"userId":1,"title":"No body"}"#).unwrap();
        assert_eq!(input.title, "No body");
        assert!(input.body.is_empty());
    }

    #[test]
    fn new_post_rejects_missing_title() {
        let result: Result<NewPost, _> = serde_json::from_str(r#"{"userId":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_post_fields_optional() {
        let input: UpdatePost = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.title.is_none());
        assert!(input.body.is_none());
    }
}
