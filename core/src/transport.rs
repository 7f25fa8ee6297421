//! The I/O seam between `ApiClient` and the network.
//!
//! # Design
//! `Transport` executes one `HttpRequest` and reports either the response,
//! whatever its status, or a `TransportError` when nothing came back. Status
//! interpretation belongs to the client, so transports must not turn 4xx/5xx
//! into errors. `UreqTransport` runs the blocking `ureq` agent on tokio's
//! blocking pool so callers only ever await. That makes a Tokio runtime a
//! requirement for `UreqTransport`; other transports may run on any executor.

use std::future::Future;
use std::io;

use ureq::Agent;

use crate::error::{TransportError, TransportErrorKind};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes HTTP round-trips on behalf of `ApiClient`.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// `ureq`-backed transport with status-as-error disabled.
///
/// `send` hands the call to `tokio::task::spawn_blocking`, so it must be
/// awaited from within a Tokio runtime; outside one it panics.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute(&agent, &request))
            .await
            .map_err(|e| TransportError::with_source(TransportErrorKind::Other, e.to_string(), e))?
    }
}

fn execute(agent: &Agent, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
    let url = request.url();
    let result = match request.method {
        HttpMethod::Get => with_parts(agent.get(&url), request).call(),
        HttpMethod::Delete => with_parts(agent.delete(&url), request).call(),
        HttpMethod::Post => match request.body.as_deref() {
            Some(body) => with_parts(agent.post(&url), request).send(body.as_bytes()),
            None => with_parts(agent.post(&url), request).send_empty(),
        },
        HttpMethod::Put => match request.body.as_deref() {
            Some(body) => with_parts(agent.put(&url), request).send(body.as_bytes()),
            None => with_parts(agent.put(&url), request).send_empty(),
        },
    };
    let mut response = result.map_err(map_ureq_error)?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(map_ureq_error)?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn with_parts<B>(
    mut builder: ureq::RequestBuilder<B>,
    request: &HttpRequest,
) -> ureq::RequestBuilder<B> {
    for (key, value) in &request.query {
        builder = builder.query(key, value);
    }
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn map_ureq_error(err: ureq::Error) -> TransportError {
    let kind = match &err {
        ureq::Error::Timeout(_) => TransportErrorKind::Timeout,
        ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => TransportErrorKind::Connect,
        ureq::Error::Io(io_err) => match io_err.kind() {
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted => TransportErrorKind::Connect,
            io::ErrorKind::TimedOut => TransportErrorKind::Timeout,
            _ => TransportErrorKind::Io,
        },
        _ => TransportErrorKind::Other,
    };
    TransportError::with_source(kind, err.to_string(), err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn refused_connection_maps_to_connect_and_keeps_source() {
        let err = map_ureq_error(ureq::Error::Io(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "refused",
        )));
        assert_eq!(err.kind, TransportErrorKind::Connect);
        let source = err.source().expect("ureq error kept as source");
        assert!(source.downcast_ref::<ureq::Error>().is_some());
    }

    #[test]
    fn unresolved_host_maps_to_connect() {
        let err = map_ureq_error(ureq::Error::HostNotFound);
        assert_eq!(err.kind, TransportErrorKind::Connect);
        assert_eq!(err.message, ureq::Error::HostNotFound.to_string());
    }

    #[test]
    fn other_io_failures_map_to_io() {
        let err = map_ureq_error(ureq::Error::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "eof",
        )));
        assert_eq!(err.kind, TransportErrorKind::Io);
        assert!(err.source().is_some());
    }
}
