//! Response status taxonomy.
//!
//! # Design
//! Only the statuses this crate classifies get named variants. Every 5xx code
//! collapses into `ServerError`, carrying the numeric code. Anything else is
//! not a `ResponseStatus` at all: `from_code` returns `None` and the caller
//! decides what an unrecognized code means.

use std::fmt;

/// Numeric code of a server error, guaranteed to lie in `500..599`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServerErrorCode(u16);

impl ServerErrorCode {
    pub const RANGE: std::ops::Range<u16> = 500..599;

    pub fn new(code: u16) -> Option<Self> {
        Self::RANGE.contains(&code).then_some(Self(code))
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

/// A recognized HTTP response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseStatus {
    Ok,
    Created,
    Accepted,
    NoContent,
    NotModified,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    UnprocessableEntity,
    ServerError(ServerErrorCode),
}

impl ResponseStatus {
    /// Look up the status for a numeric code. Unrecognized codes yield `None`.
    pub fn from_code(code: u16) -> Option<Self> {
        let status = match code {
            200 => ResponseStatus::Ok,
            201 => ResponseStatus::Created,
            202 => ResponseStatus::Accepted,
            204 => ResponseStatus::NoContent,
            304 => ResponseStatus::NotModified,
            400 => ResponseStatus::BadRequest,
            401 => ResponseStatus::Unauthorized,
            403 => ResponseStatus::Forbidden,
            404 => ResponseStatus::NotFound,
            422 => ResponseStatus::UnprocessableEntity,
            other => ResponseStatus::ServerError(ServerErrorCode::new(other)?),
        };
        Some(status)
    }

    pub fn code(self) -> u16 {
        match self {
            ResponseStatus::Ok => 200,
            ResponseStatus::Created => 201,
            ResponseStatus::Accepted => 202,
            ResponseStatus::NoContent => 204,
            ResponseStatus::NotModified => 304,
            ResponseStatus::BadRequest => 400,
            ResponseStatus::Unauthorized => 401,
            ResponseStatus::Forbidden => 403,
            ResponseStatus::NotFound => 404,
            ResponseStatus::UnprocessableEntity => 422,
            ResponseStatus::ServerError(code) => code.get(),
        }
    }

    fn reason(self) -> &'static str {
        match self {
            ResponseStatus::Ok => "OK",
            ResponseStatus::Created => "Created",
            ResponseStatus::Accepted => "Accepted",
            ResponseStatus::NoContent => "No Content",
            ResponseStatus::NotModified => "Not Modified",
            ResponseStatus::BadRequest => "Bad Request",
            ResponseStatus::Unauthorized => "Unauthorized",
            ResponseStatus::Forbidden => "Forbidden",
            ResponseStatus::NotFound => "Not Found",
            ResponseStatus::UnprocessableEntity => "Unprocessable Entity",
            ResponseStatus::ServerError(_) => "Server Error",
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}
