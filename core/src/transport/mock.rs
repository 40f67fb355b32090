//! In-process transport for tests.
//!
//! A `MockTransport` answers each submission by calling a closure and
//! remembers every descriptor it was handed. It is passed to
//! [`HttpClient::new`](crate::HttpClient::new) like any other transport, so
//! there is no global registration to reset between tests.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use bytes::Bytes;

use crate::http::{HttpRequest, HttpResponse};
use crate::response::TransportOutcome;
use crate::transport::Transport;

type Responder = dyn Fn(&HttpRequest) -> TransportOutcome + Send + Sync;
type Latency = dyn Fn(&HttpRequest) -> Duration + Send + Sync;

#[derive(Clone)]
pub struct MockTransport {
    responder: Arc<Responder>,
    latency: Option<Arc<Latency>>,
    submitted: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn from_fn<F>(responder: F) -> Self
    where
        F: Fn(&HttpRequest) -> TransportOutcome + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            latency: None,
            submitted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer every request with `status` and `body`.
    pub fn respond(status: u16, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        Self::from_fn(move |_| Ok(HttpResponse::new(status, body.clone())))
    }

    /// Delay each answer by the duration `latency` picks for the request.
    pub fn with_latency<F>(mut self, latency: F) -> Self
    where
        F: Fn(&HttpRequest) -> Duration + Send + Sync + 'static,
    {
        self.latency = Some(Arc::new(latency));
        self
    }

    /// Descriptors submitted so far, in submission order.
    pub fn submitted(&self) -> Vec<HttpRequest> {
        self.submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Transport for MockTransport {
    async fn submit(&self, request: HttpRequest) -> TransportOutcome {
        self.submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        if let Some(latency) = &self.latency {
            tokio::time::sleep(latency(&request)).await;
        }
        (self.responder)(&request)
    }
}

impl fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockTransport")
            .field("submitted", &self.submitted().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::RequestBuilder;
    use crate::error::TransportError;

    #[tokio::test]
    async fn records_submissions_in_order() {
        let transport = MockTransport::respond(200, "[]");
        let first = RequestBuilder::new("http://x.test")
            .append_path_component("a")
            .build()
            .unwrap();
        let second = RequestBuilder::new("http://x.test")
            .append_path_component("b")
            .build()
            .unwrap();

        let outcome = transport.submit(first.clone()).await.unwrap();
        assert_eq!(outcome.status, 200);
        transport.submit(second.clone()).await.unwrap();

        assert_eq!(transport.submitted(), vec![first, second]);
    }

    #[tokio::test]
    async fn closure_sees_the_request() {
        let transport = MockTransport::from_fn(|req| {
            if req.url().path() == "/missing" {
                Err(TransportError::Connection("refused".to_string()))
            } else {
                Ok(HttpResponse::new(204, ""))
            }
        });
        let req = RequestBuilder::new("http://x.test")
            .append_path_component("missing")
            .build()
            .unwrap();
        assert!(matches!(
            transport.submit(req).await,
            Err(TransportError::Connection(_))
        ));
    }
}
