//! Fluent accumulator that produces [`HttpRequest`] descriptors.
//!
//! # Design
//! `RequestBuilder` is a plain owned value mutated through `&mut self`
//! methods that return `&mut Self`, so calls chain left to right. `build`
//! takes `&self`: it never consumes or resets the builder, and every call
//! produces a fresh snapshot that later mutations cannot reach. Builders are
//! meant to have a single owner; clone one to branch off a variant.

use bytes::Bytes;
use serde::Serialize;
use url::Url;

use crate::codec::{Codec, JsonCodec};
use crate::error::ApiError;
use crate::header::{CacheControl, ContentType, Header};
use crate::http::{HttpMethod, HttpRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBuilder {
    base_url: String,
    path: Vec<String>,
    query: Vec<(String, String)>,
    body: Option<Bytes>,
    headers: Vec<Header>,
    method: HttpMethod,
}

impl RequestBuilder {
    /// Start a GET request against `base_url` with a JSON content type.
    ///
    /// The base URL is validated by [`build`](Self::build), not here.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            path: Vec::new(),
            query: Vec::new(),
            body: None,
            headers: vec![Header::ContentType(ContentType::Json)],
            method: HttpMethod::Get,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn set_method(&mut self, method: HttpMethod) -> &mut Self {
        self.method = method;
        self
    }

    /// Insert `header`, replacing any header with the same rendered name.
    pub fn set_header(&mut self, header: Header) -> &mut Self {
        match self.headers.iter_mut().find(|h| h.name() == header.name()) {
            Some(existing) => *existing = header,
            None => self.headers.push(header),
        }
        self
    }

    pub fn set_authorization_token(&mut self, token: &str) -> &mut Self {
        self.set_header(Header::Authorization(token.to_string()))
    }

    pub fn set_cache_control(&mut self, directive: CacheControl) -> &mut Self {
        self.set_header(Header::CacheControl(directive))
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>) -> &mut Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` with `codec` and use it as the body.
    ///
    /// On failure the builder is left untouched.
    pub fn encode_body<C, T>(&mut self, codec: &C, value: &T) -> Result<&mut Self, ApiError>
    where
        C: Codec,
        T: Serialize + ?Sized,
    {
        let body = codec
            .encode(value)
            .map_err(|e| ApiError::Encoding(e.to_string()))?;
        Ok(self.set_body(body))
    }

    pub fn set_json_body<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<&mut Self, ApiError> {
        self.encode_body(&JsonCodec, value)
    }

    pub fn post(&mut self, body: impl Into<Bytes>) -> &mut Self {
        self.set_method(HttpMethod::Post).set_body(body)
    }

    pub fn put(&mut self, body: impl Into<Bytes>) -> &mut Self {
        self.set_method(HttpMethod::Put).set_body(body)
    }

    pub fn append_path_component(&mut self, segment: &str) -> &mut Self {
        self.path.push(segment.to_string());
        self
    }

    /// Replace the whole path.
    pub fn set_path_components<I, S>(&mut self, segments: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path = segments.into_iter().map(Into::into).collect();
        self
    }

    /// Append a query pair. Duplicate names are kept in order.
    pub fn append_query_item(&mut self, name: &str, value: &str) -> &mut Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Snapshot the accumulated state into an immutable descriptor.
    ///
    /// Path segments are never normalized. Segments a URL cannot carry
    /// literally (empty, `.` or `..`) fail with [`ApiError::InvalidUrl`].
    pub fn build(&self) -> Result<HttpRequest, ApiError> {
        let origin = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        if !origin.has_host() {
            return Err(ApiError::InvalidUrl(format!("{}: missing host", self.base_url)));
        }
        if let Some(segment) = self
            .path
            .iter()
            .find(|s| matches!(s.as_str(), "" | "." | ".."))
        {
            return Err(ApiError::InvalidUrl(format!(
                "{}: path segment {segment:?} would be normalized away",
                self.base_url
            )));
        }

        let mut url = origin.clone();
        if !self.path.is_empty() {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ApiError::InvalidUrl(format!("{}: cannot be a base", self.base_url)))?;
            segments.pop_if_empty().extend(&self.path);
        }
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }

        Ok(HttpRequest::new(
            origin,
            self.path.clone(),
            self.query.clone(),
            url,
            self.headers.clone(),
            self.body.clone(),
            self.method,
        ))
    }
}
