//! Classification of transport outcomes.
//!
//! Every send surface in [`client`](crate::client) funnels through these
//! functions, so the checkpoint order lives in exactly one place:
//!
//! 1. transport error
//! 2. body present: unknown code, then status not valid for the method
//! 3. body absent: empty response
//!
//! Decoding only runs after classification succeeds.

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::codec::Codec;
use crate::error::{ApiError, TransportError};
use crate::http::{HttpMethod, HttpResponse};
use crate::status::ResponseStatus;

/// What a transport hands back for one submitted request.
pub type TransportOutcome = Result<HttpResponse, TransportError>;

/// Decide success or failure for `outcome` given the request's `method`.
///
/// On success the raw body is carried forward untouched.
pub fn classify(method: HttpMethod, outcome: TransportOutcome) -> Result<Bytes, ApiError> {
    let response = outcome?;
    let Some(body) = response.body else {
        return Err(ApiError::EmptyResponse);
    };
    let status = ResponseStatus::from_code(response.status)
        .ok_or(ApiError::UnknownResponseCode(response.status))?;
    if !method.accepts(status) {
        return Err(ApiError::UnexpectedStatus(status));
    }
    Ok(body)
}

/// Decode a classified body into `T`, hiding the codec's error detail.
pub fn decode_body<T, C>(codec: &C, body: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    C: Codec,
{
    codec.decode(body).map_err(|e| {
        tracing::debug!(error = %e, "response body did not decode");
        ApiError::DecodingFailure
    })
}

/// Classify, then decode into `T`.
pub fn handle_response<T, C>(
    codec: &C,
    method: HttpMethod,
    outcome: TransportOutcome,
) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    C: Codec,
{
    let body = classify(method, outcome)?;
    decode_body(codec, &body)
}

/// Classify and discard the body. Never decodes.
pub fn handle_no_content(method: HttpMethod, outcome: TransportOutcome) -> Result<(), ApiError> {
    classify(method, outcome).map(|_| ())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::codec::JsonCodec;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        name: String,
    }

    fn ok(status: u16, body: &'static str) -> TransportOutcome {
        Ok(HttpResponse::new(status, body))
    }

    fn bodiless(status: u16) -> TransportOutcome {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: None,
        })
    }

    #[test]
    fn accepted_status_carries_body() {
        let body = classify(HttpMethod::Get, ok(200, "[]")).unwrap();
        assert_eq!(&body[..], b"[]");
        assert!(classify(HttpMethod::Get, ok(304, "")).is_ok());
        assert!(classify(HttpMethod::Post, ok(201, "{}")).is_ok());
    }

    #[test]
    fn get_rejects_created() {
        let err = classify(HttpMethod::Get, ok(201, "{}")).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedStatus(ResponseStatus::Created)));
    }

    #[test]
    fn server_errors_are_unexpected_statuses() {
        let err = classify(HttpMethod::Put, ok(503, "down")).unwrap_err();
        assert_eq!(err.status().map(ResponseStatus::code), Some(503));
    }

    #[test]
    fn unknown_code_is_reported() {
        let err = classify(HttpMethod::Get, ok(9999, "{}")).unwrap_err();
        assert!(matches!(err, ApiError::UnknownResponseCode(9999)));
    }

    #[test]
    fn transport_error_wins() {
        let err = classify(HttpMethod::Get, Err(TransportError::Timeout)).unwrap_err();
        assert!(matches!(err, ApiError::Transport(TransportError::Timeout)));
    }

    #[test]
    fn missing_body_is_empty_response() {
        // Even a status the method accepts.
        let err = classify(HttpMethod::Get, bodiless(200)).unwrap_err();
        assert!(matches!(err, ApiError::EmptyResponse));
        let err = classify(HttpMethod::Get, bodiless(9999)).unwrap_err();
        assert!(matches!(err, ApiError::EmptyResponse));
    }

    #[test]
    fn no_content_for_delete() {
        assert!(handle_no_content(HttpMethod::Delete, ok(204, "")).is_ok());
    }

    #[test]
    fn no_content_still_checks_status() {
        let err = handle_no_content(HttpMethod::Delete, ok(200, "")).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedStatus(ResponseStatus::Ok)));
    }

    #[test]
    fn decodes_typed_value() {
        let named: Named = handle_response(&JsonCodec, HttpMethod::Get, ok(200, r#"{"name":"Foo"}"#)).unwrap();
        assert_eq!(named.name, "Foo");
    }

    #[test]
    fn decode_failure_is_normalized() {
        let err = handle_response::<Named, _>(&JsonCodec, HttpMethod::Get, ok(200, r#"{"poo":"Foo"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::DecodingFailure));
        assert_eq!(err.to_string(), "failed to decode response body");
    }

    #[test]
    fn status_failure_skips_decoding() {
        let err = handle_response::<Named, _>(&JsonCodec, HttpMethod::Get, ok(404, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedStatus(ResponseStatus::NotFound)));
    }
}
