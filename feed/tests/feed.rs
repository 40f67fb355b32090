//! Feed aggregation against the live mock server and against mock transports.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use httpkit::{ApiError, HttpClient, HttpResponse, MockTransport, ResponseStatus, UreqTransport};
use mock_server::Store;
use posts_feed::{render_row, FeedRequests, PostFeed, SiblingPolicy};

/// Start the mock server with `store` on a background thread.
fn start_server(store: Store) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, store).await
        })
        .unwrap();
    });

    addr
}

fn live_feed(addr: SocketAddr) -> PostFeed<UreqTransport> {
    let transport = UreqTransport::new(Duration::from_secs(5));
    PostFeed::new(
        HttpClient::new(transport),
        FeedRequests::new(&format!("http://{addr}")),
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn loads_feed_from_mock_server() {
    let addr = start_server(Store::seeded());
    let posts = live_feed(addr).load().await.unwrap();

    assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(posts[0].author_name(), "Leanne Graham");
    assert_eq!(posts[2].author_username(), "Antonette");
    assert_eq!(render_row(&posts[0]), "sunt aut facere\n    by Leanne Graham (@Bret)");
}

#[tokio::test(flavor = "multi_thread")]
async fn loads_one_users_posts() {
    let addr = start_server(Store::seeded());
    let posts = live_feed(addr).load_for_user(2).await.unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].author_name(), "Ervin Howell");
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_author_fails_the_feed() {
    let mut store = Store::seeded();
    store.insert_post(99, "orphan", "nobody wrote this");
    let addr = start_server(store);

    let err = live_feed(addr).load().await.unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedStatus(ResponseStatus::NotFound)));
}

const POSTS: &str = r#"[
    {"userId":1,"id":1,"title":"fails fast","body":""},
    {"userId":2,"id":2,"title":"slow","body":""}
]"#;

const USER_2: &str = r#"{"id":2,"name":"Two","username":"two","email":"e","phone":"p","website":"w",
    "address":{"street":"s","suite":"s","city":"c","zipcode":"z"},
    "company":{"name":"n","catchPhrase":"c","bs":"b"}}"#;

/// `/users/1` fails at once, `/users/2` answers after a delay. Returns the
/// transport and a counter of slow lookups that ran to completion.
fn racing_transport() -> (MockTransport, Arc<AtomicUsize>) {
    let completed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&completed);
    let transport = MockTransport::from_fn(move |req| match req.url().path() {
        "/posts" => Ok(HttpResponse::new(200, POSTS)),
        "/users/1" => Ok(HttpResponse::new(500, "")),
        _ => {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(HttpResponse::new(200, USER_2))
        }
    })
    .with_latency(|req| match req.url().path() {
        "/users/2" => Duration::from_millis(100),
        _ => Duration::ZERO,
    });
    (transport, completed)
}

#[tokio::test(flavor = "multi_thread")]
async fn cancel_policy_aborts_in_flight_lookups() {
    let (transport, completed) = racing_transport();
    let feed = PostFeed::new(HttpClient::new(transport), FeedRequests::new("http://feed.test"))
        .with_policy(SiblingPolicy::Cancel);

    let err = feed.load().await.unwrap_err();
    assert_eq!(err.status().map(ResponseStatus::code), Some(500));

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(completed.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn detach_policy_lets_lookups_finish() {
    let (transport, completed) = racing_transport();
    let feed = PostFeed::new(HttpClient::new(transport), FeedRequests::new("http://feed.test"))
        .with_policy(SiblingPolicy::Detach);

    let err = feed.load().await.unwrap_err();
    assert_eq!(err.status().map(ResponseStatus::code), Some(500));

    for _ in 0..50 {
        if completed.load(Ordering::SeqCst) == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(completed.load(Ordering::SeqCst), 1);
}
