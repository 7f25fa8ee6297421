//! Request and response hooks run by `ApiClient` around every exchange.
//!
//! Request interceptors run in registration order before the transport is
//! called; the first error aborts the call and reaches the caller as is.
//! Response interceptors see every successful response and every failure, in
//! registration order, and may replace either.

use crate::error::{ApiError, TransportError};
use crate::http::{HttpRequest, HttpResponse};

/// A failed exchange as seen by response interceptors, before it is reduced
/// to an `ApiError`.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// The server answered with a non-2xx status.
    Response(HttpResponse),
    /// No response was received.
    Transport(TransportError),
}

impl Failure {
    pub fn status(&self) -> Option<u16> {
        match self {
            Failure::Response(response) => Some(response.status),
            Failure::Transport(_) => None,
        }
    }
}

pub trait RequestInterceptor: Send + Sync {
    fn on_request(&self, request: HttpRequest) -> Result<HttpRequest, ApiError>;
}

pub trait ResponseInterceptor: Send + Sync {
    fn on_response(&self, _request: &HttpRequest, response: HttpResponse) -> HttpResponse {
        response
    }

    fn on_error(&self, _request: &HttpRequest, failure: Failure) -> Failure {
        failure
    }
}

/// Passes requests through unchanged, logging each one. Auth headers would be
/// attached here.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceRequests;

impl RequestInterceptor for TraceRequests {
    fn on_request(&self, request: HttpRequest) -> Result<HttpRequest, ApiError> {
        tracing::debug!(
            method = %request.method,
            url = %request.url(),
            query = request.query.len(),
            "sending request"
        );
        Ok(request)
    }
}

/// Recognises a 401 on a request that has not been replayed yet.
///
/// No refresh or redirect is performed: the failure is logged and passed on
/// so it still reaches the caller as the server's error body.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnauthorizedHook;

impl ResponseInterceptor for UnauthorizedHook {
    fn on_error(&self, request: &HttpRequest, failure: Failure) -> Failure {
        if failure.status() == Some(401) && !request.retried {
            tracing::debug!(
                method = %request.method,
                url = %request.url(),
                "unauthorized; no credential refresh configured"
            );
        }
        failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    fn request() -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, "http://localhost:3000", "/inventory")
    }

    #[test]
    fn trace_requests_is_identity() {
        let mut req = request();
        req.query.push(("category".to_string(), "fruits".to_string()));
        let out = TraceRequests.on_request(req.clone()).unwrap();
        assert_eq!(out, req);
    }

    #[test]
    fn unauthorized_hook_passes_401_through() {
        let failure = Failure::Response(HttpResponse::new(401, r#"{"error":"unauthorized"}"#));
        let out = UnauthorizedHook.on_error(&request(), failure.clone());
        assert_eq!(out, failure);
    }

    #[test]
    fn unauthorized_hook_ignores_retried_and_transport_failures() {
        let mut retried = request();
        retried.retried = true;
        let failure = Failure::Response(HttpResponse::new(401, ""));
        assert_eq!(UnauthorizedHook.on_error(&retried, failure.clone()), failure);

        let transport = Failure::Transport(TransportError::new(
            crate::error::TransportErrorKind::Io,
            "broken pipe",
        ));
        assert_eq!(transport.status(), None);
        assert_eq!(UnauthorizedHook.on_error(&request(), transport.clone()), transport);
    }

    #[test]
    fn default_on_response_is_identity() {
        let response = HttpResponse::new(200, "[]");
        assert_eq!(
            UnauthorizedHook.on_response(&request(), response.clone()),
            response
        );
    }
}
