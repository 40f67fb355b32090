//! Fluent HTTP request builder and typed response pipeline.
//!
//! # Overview
//! A [`RequestBuilder`] accumulates path, query, headers, body and method
//! and snapshots them into an immutable [`HttpRequest`]. An [`HttpClient`]
//! submits that descriptor to an injected [`Transport`], classifies the raw
//! [`HttpResponse`] against the method's accepted statuses, and decodes the
//! body with a [`Codec`].
//!
//! # Design
//! - The builder never touches the network; a malformed base URL surfaces as
//!   [`ApiError::InvalidUrl`] from `build`.
//! - The method/status table in [`HttpMethod::valid_statuses`] is the only
//!   authority on success.
//! - Classification is a pure function in [`response`], shared by the
//!   async, spawned-future and callback surfaces of [`HttpClient`].
//! - Transports are passed in explicitly; [`MockTransport`] stands in for
//!   the network in tests.

pub mod builder;
pub mod client;
pub mod codec;
pub mod error;
pub mod header;
pub mod http;
pub mod response;
pub mod status;
pub mod transport;

pub use builder::RequestBuilder;
pub use client::{Completion, HttpClient, PendingResponse};
pub use codec::{Codec, CodecError, JsonCodec};
pub use error::{ApiError, TransportError};
pub use header::{CacheControl, ContentType, Header};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use response::TransportOutcome;
pub use status::{ResponseStatus, ServerErrorCode};
#[cfg(feature = "ureq-transport")]
pub use transport::UreqTransport;
pub use transport::{MockTransport, Transport};
