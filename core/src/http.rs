//! HTTP transport types exchanged with a [`Transport`](crate::Transport).
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! builds `HttpRequest` values and classifies `HttpResponse` values; an
//! injected transport performs the actual I/O in between. An `HttpRequest`
//! is an owned snapshot: it shares nothing with the builder that produced it,
//! so it can be cloned and read from any task.

use std::fmt;

use bytes::Bytes;
use url::Url;

use crate::header::Header;
use crate::status::ResponseStatus;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Statuses that count as success for this method, in table order.
    ///
    /// This table is the only input to classification. Supporting a new
    /// method/status pair means editing it, not adding range checks.
    pub fn valid_statuses(self) -> &'static [ResponseStatus] {
        match self {
            HttpMethod::Get => &[ResponseStatus::Ok, ResponseStatus::NotModified],
            HttpMethod::Post => &[ResponseStatus::Ok, ResponseStatus::Created],
            HttpMethod::Put => &[ResponseStatus::Ok],
            HttpMethod::Delete => &[ResponseStatus::NoContent],
        }
    }

    pub fn accepts(self, status: ResponseStatus) -> bool {
        self.valid_statuses().contains(&status)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable, fully configured request ready for submission.
///
/// Produced by [`RequestBuilder::build`](crate::RequestBuilder::build).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    origin: Url,
    path: Vec<String>,
    query: Vec<(String, String)>,
    url: Url,
    headers: Vec<Header>,
    body: Option<Bytes>,
    method: HttpMethod,
}

impl HttpRequest {
    pub(crate) fn new(
        origin: Url,
        path: Vec<String>,
        query: Vec<(String, String)>,
        url: Url,
        headers: Vec<Header>,
        body: Option<Bytes>,
        method: HttpMethod,
    ) -> Self {
        Self {
            origin,
            path,
            query,
            url,
            headers,
            body,
            method,
        }
    }

    /// The base origin the builder was created with.
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn path_segments(&self) -> &[String] {
        &self.path
    }

    /// Query pairs in insertion order; duplicates are kept.
    pub fn query_items(&self) -> &[(String, String)] {
        &self.query
    }

    /// The resolved URL: origin, `/`-joined path and query string.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Headers in insertion order, at most one per rendered name.
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// Rendered `(name, value)` pairs for the transport.
    pub fn header_pairs(&self) -> Vec<(&'static str, String)> {
        self.headers.iter().map(Header::render).collect()
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }
}

/// A raw response as delivered by a transport.
///
/// `body` is `None` only when the transport delivered no body at all. An
/// empty payload (e.g. a 204) is `Some` of zero bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Some(body.into()),
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
