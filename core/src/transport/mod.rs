//! The networking seam.
//!
//! The pipeline never performs I/O itself; it hands each descriptor to an
//! injected [`Transport`] and classifies whatever comes back. Implementations
//! must resolve every submission exactly once.

use std::future::Future;

use crate::http::HttpRequest;
use crate::response::TransportOutcome;

pub mod mock;
#[cfg(feature = "ureq-transport")]
mod ureq_transport;

pub use mock::MockTransport;
#[cfg(feature = "ureq-transport")]
pub use ureq_transport::UreqTransport;

/// Trait for pluggable HTTP backends.
///
/// Uses return-position `impl Future` in traits, so no `async-trait` macro
/// is needed.
pub trait Transport: Send + Sync + 'static {
    /// Perform the request and report status, headers and body, or a
    /// transport-level failure. HTTP error statuses are not failures here.
    fn submit(&self, request: HttpRequest) -> impl Future<Output = TransportOutcome> + Send;
}
