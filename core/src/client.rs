//! Typed send pipeline.
//!
//! # Design
//! `HttpClient` owns an injected [`Transport`] and a [`Codec`] and nothing
//! else: there is no mutable state between calls, and cloning only bumps two
//! reference counts. Each request makes exactly one transport call, then
//! goes through [`response`](crate::response) for classification and
//! decoding. The async, spawned-future and callback surfaces all delegate to
//! the same two async methods, so they cannot drift apart.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;

use crate::builder::RequestBuilder;
use crate::codec::{Codec, JsonCodec};
use crate::error::{ApiError, TransportError};
use crate::http::{HttpMethod, HttpRequest};
use crate::response::{self, TransportOutcome};
use crate::transport::Transport;

#[derive(Debug)]
pub struct HttpClient<T, C = JsonCodec> {
    transport: Arc<T>,
    codec: Arc<C>,
}

impl<T, C> Clone for HttpClient<T, C> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            codec: Arc::clone(&self.codec),
        }
    }
}

impl<T: Transport> HttpClient<T> {
    /// Client that decodes bodies as JSON.
    pub fn new(transport: T) -> Self {
        Self::with_codec(transport, JsonCodec)
    }
}

impl<T: Transport, C: Codec> HttpClient<T, C> {
    pub fn with_codec(transport: T, codec: C) -> Self {
        Self {
            transport: Arc::new(transport),
            codec: Arc::new(codec),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn submit(&self, request: &HttpRequest) -> TransportOutcome {
        tracing::debug!(method = %request.method(), url = %request.url(), "submitting request");
        let outcome = self.transport.submit(request.clone()).await;
        match &outcome {
            Ok(response) => {
                tracing::debug!(url = %request.url(), status = response.status, "response received")
            }
            Err(e) => tracing::warn!(url = %request.url(), error = %e, "transport failed"),
        }
        outcome
    }

    /// Send `request` and decode the body into `R`.
    pub async fn send_request<R>(&self, request: &HttpRequest) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let outcome = self.submit(request).await;
        response::handle_response(self.codec.as_ref(), request.method(), outcome)
    }

    /// Send `request`, classify the response and discard the body.
    pub async fn send_request_expecting_no_content(
        &self,
        request: &HttpRequest,
    ) -> Result<(), ApiError> {
        let outcome = self.submit(request).await;
        response::handle_no_content(request.method(), outcome)
    }

    /// Start `request` on the Tokio runtime right away.
    ///
    /// The returned future resolves to the single outcome. Dropping it does
    /// not stop the call; use [`PendingResponse::abort`] for that.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn spawn_request<R>(&self, request: HttpRequest) -> PendingResponse<R>
    where
        R: DeserializeOwned + Send + 'static,
    {
        let client = self.clone();
        PendingResponse::new(tokio::spawn(async move {
            client.send_request(&request).await
        }))
    }

    /// [`spawn_request`](Self::spawn_request) for requests that expect no content.
    pub fn spawn_request_expecting_no_content(&self, request: HttpRequest) -> PendingResponse<()> {
        let client = self.clone();
        PendingResponse::new(tokio::spawn(async move {
            client.send_request_expecting_no_content(&request).await
        }))
    }

    /// Start `request` right away and hand the outcome to `completion`.
    ///
    /// `completion` runs exactly once, on a runtime worker. The returned
    /// [`Completion`] resolves after it has run; dropping it does not stop
    /// the call. If the runtime shuts down first, `completion` is dropped
    /// without being called.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn send_request_with<R, F>(&self, request: HttpRequest, completion: F) -> Completion
    where
        R: DeserializeOwned + Send + 'static,
        F: FnOnce(Result<R, ApiError>) + Send + 'static,
    {
        let client = self.clone();
        Completion::new(tokio::spawn(async move {
            completion(client.send_request(&request).await);
        }))
    }

    /// [`send_request_with`](Self::send_request_with) for requests that expect no content.
    pub fn send_request_expecting_no_content_with<F>(
        &self,
        request: HttpRequest,
        completion: F,
    ) -> Completion
    where
        F: FnOnce(Result<(), ApiError>) + Send + 'static,
    {
        let client = self.clone();
        Completion::new(tokio::spawn(async move {
            completion(client.send_request_expecting_no_content(&request).await);
        }))
    }

    // CRUD helpers. The builder is never mutated; the method is applied to a copy.

    /// GET a list of models.
    pub async fn get_models<R>(&self, builder: &RequestBuilder) -> Result<Vec<R>, ApiError>
    where
        R: DeserializeOwned,
    {
        self.send_request(&builder.build()?).await
    }

    /// GET a single model, using whatever method the builder carries.
    pub async fn get_model<R>(&self, builder: &RequestBuilder) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        self.send_request(&builder.build()?).await
    }

    pub async fn post_model<R>(&self, builder: &RequestBuilder) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        self.send_request(&build_as(builder, HttpMethod::Post)?).await
    }

    pub async fn put_model<R>(&self, builder: &RequestBuilder) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        self.send_request(&build_as(builder, HttpMethod::Put)?).await
    }

    pub async fn delete_model(&self, builder: &RequestBuilder) -> Result<(), ApiError> {
        self.send_request_expecting_no_content(&build_as(builder, HttpMethod::Delete)?)
            .await
    }
}

fn build_as(builder: &RequestBuilder, method: HttpMethod) -> Result<HttpRequest, ApiError> {
    let mut builder = builder.clone();
    builder.set_method(method).build()
}

/// A request already in flight on the Tokio runtime.
#[derive(Debug)]
pub struct PendingResponse<R> {
    handle: JoinHandle<Result<R, ApiError>>,
}

impl<R> PendingResponse<R> {
    fn new(handle: JoinHandle<Result<R, ApiError>>) -> Self {
        Self { handle }
    }

    /// Stop waiting for the call. Awaiting afterwards yields
    /// `TransportError::Cancelled` unless the call had already finished.
    ///
    /// This only drops the result. A transport that runs blocking I/O off
    /// the async task, like `UreqTransport`, still delivers the request.
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<R> Future for PendingResponse<R> {
    type Output = Result<R, ApiError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx).map(|joined| match joined {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Err(ApiError::Transport(TransportError::Cancelled)),
        })
    }
}

/// Handle to a callback-style call. Resolves once the completion has run.
///
/// Unlike [`PendingResponse`] it cannot be aborted, so the completion is
/// never skipped on the caller's behalf.
#[derive(Debug)]
pub struct Completion {
    handle: JoinHandle<()>,
}

impl Completion {
    fn new(handle: JoinHandle<()>) -> Self {
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Future for Completion {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        Pin::new(&mut self.handle).poll(cx).map(|joined| {
            if let Err(e) = joined {
                if e.is_panic() {
                    std::panic::resume_unwind(e.into_panic());
                }
            }
        })
    }
}
