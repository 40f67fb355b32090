//! Ureq-based transport.
//!
//! ureq is blocking, so each submission runs on Tokio's blocking pool and
//! the async side only awaits the join handle. Aborting the awaiting task
//! does not stop a call already handed to ureq.

use std::io::Read as _;
use std::time::Duration;

use bytes::Bytes;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};
use crate::response::TransportOutcome;
use crate::transport::Transport;

/// A [`Transport`] backed by a shared [`ureq::Agent`].
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Create a transport whose calls give up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            // Statuses are classified by the pipeline, not by ureq.
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    async fn submit(&self, request: HttpRequest) -> TransportOutcome {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute(&agent, &request))
            .await
            .unwrap_or_else(|e| {
                if e.is_cancelled() {
                    Err(TransportError::Cancelled)
                } else {
                    Err(TransportError::Other(Box::new(e)))
                }
            })
    }
}

fn execute(agent: &ureq::Agent, request: &HttpRequest) -> TransportOutcome {
    let mut builder = ureq::http::Request::builder()
        .method(request.method().as_str())
        .uri(request.url().as_str());

    for (name, value) in request.header_pairs() {
        builder = builder.header(name, value);
    }

    let result = match request.body() {
        Some(body) => {
            let req = builder
                .body(body.to_vec())
                .map_err(|e| TransportError::Other(Box::new(e)))?;
            agent.run(req)
        }
        None => {
            let req = builder
                .body(())
                .map_err(|e| TransportError::Other(Box::new(e)))?;
            agent.run(req)
        }
    };

    match result {
        Ok(resp) => convert_response(resp),
        Err(ureq::Error::Timeout(_)) => Err(TransportError::Timeout),
        Err(ureq::Error::HostNotFound) => {
            Err(TransportError::Connection("host not found".to_owned()))
        }
        Err(ureq::Error::Io(e)) => Err(TransportError::Connection(e.to_string())),
        Err(e) => Err(TransportError::Other(Box::new(e))),
    }
}

/// Always reports a body, empty or not.
fn convert_response(response: ureq::http::Response<ureq::Body>) -> TransportOutcome {
    let (parts, body) = response.into_parts();

    let headers = parts
        .headers
        .iter()
        .filter_map(|(name, value)| {
            let value = value.to_str().ok()?;
            Some((name.as_str().to_string(), value.to_string()))
        })
        .collect();

    let mut body_bytes = Vec::new();
    body.into_reader()
        .read_to_end(&mut body_bytes)
        .map_err(|e| TransportError::Connection(e.to_string()))?;

    Ok(HttpResponse {
        status: parts.status.as_u16(),
        headers,
        body: Some(Bytes::from(body_bytes)),
    })
}
