//! The shared HTTP client every API namespace goes through.
//!
//! # Design
//! `ApiClient` holds only read-only state: its `ClientConfig`, a `Transport`
//! and two interceptor chains. Nothing is mutated per call, so one instance
//! can be put behind an `Arc` and used by any number of concurrent requests.
//! Consumers receive the client explicitly instead of reaching for a global,
//! which lets tests swap in a scripted transport.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::interceptor::{
    Failure, RequestInterceptor, ResponseInterceptor, TraceRequests, UnauthorizedHook,
};
use crate::inventory::InventoryApi;
use crate::transport::{Transport, UreqTransport};

#[derive(Clone)]
pub struct ApiClient<T> {
    config: ClientConfig,
    transport: T,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl ApiClient<UreqTransport> {
    /// Client for `http://localhost:3000` over `ureq` with the default
    /// interceptors installed.
    ///
    /// Calls made through it must be awaited inside a Tokio runtime, since
    /// `UreqTransport` runs each request on `spawn_blocking`.
    pub fn with_defaults() -> Self {
        Self::new(ClientConfig::default(), UreqTransport::new())
    }
}

impl<T: Transport> ApiClient<T> {
    /// Client with the default interceptors: `TraceRequests` on the way out,
    /// `UnauthorizedHook` on the way back.
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self::bare(config, transport)
            .with_request_interceptor(TraceRequests)
            .with_response_interceptor(UnauthorizedHook)
    }

    /// Client with empty interceptor chains.
    pub fn bare(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
        }
    }

    pub fn with_request_interceptor(
        mut self,
        interceptor: impl RequestInterceptor + 'static,
    ) -> Self {
        self.request_interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn with_response_interceptor(
        mut self,
        interceptor: impl ResponseInterceptor + 'static,
    ) -> Self {
        self.response_interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The inventory CRUD operations.
    pub fn inventory(&self) -> InventoryApi<'_, T> {
        InventoryApi::new(self)
    }

    /// A request against the configured base URL carrying the default headers.
    pub fn request(&self, method: HttpMethod, path: impl Into<String>) -> HttpRequest {
        let mut request = HttpRequest::new(method, &self.config.base_url, path);
        request.headers = self.config.headers.clone();
        request
    }

    /// Run `request` through the interceptors and the transport and decode the
    /// 2xx body as `R`.
    pub async fn execute<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ApiError> {
        let response = self.dispatch(request).await?;
        decode_body(&response.body)
    }

    /// Like `execute`, but returns the raw successful response.
    pub async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut request = request;
        for interceptor in &self.request_interceptors {
            request = interceptor.on_request(request)?;
        }

        let outcome = match self.transport.send(request.clone()).await {
            Ok(response) if response.is_success() => Ok(response),
            Ok(response) => Err(Failure::Response(response)),
            Err(err) => Err(Failure::Transport(err)),
        };

        match outcome {
            Ok(response) => Ok(self
                .response_interceptors
                .iter()
                .fold(response, |response, i| i.on_response(&request, response))),
            Err(failure) => {
                let failure = self
                    .response_interceptors
                    .iter()
                    .fold(failure, |failure, i| i.on_error(&request, failure));
                tracing::debug!(
                    method = %request.method,
                    url = %request.url(),
                    status = ?failure.status(),
                    "request failed"
                );
                Err(into_api_error(failure))
            }
        }
    }
}

/// Reduce a failure to what the caller sees: the server's body alone, or the
/// transport error as it was raised.
fn into_api_error(failure: Failure) -> ApiError {
    match failure {
        Failure::Response(response) => ApiError::Server(error_body(&response.body)),
        Failure::Transport(err) => ApiError::Transport(err),
    }
}

fn error_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

fn decode_body<R: DeserializeOwned>(body: &str) -> Result<R, ApiError> {
    let decoded = if body.trim().is_empty() {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_str(body)
    };
    decoded.map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_body_prefers_json() {
        assert_eq!(error_body(r#"{"error":"not found"}"#), json!({"error": "not found"}));
        assert_eq!(error_body("Bad Gateway"), json!("Bad Gateway"));
        assert_eq!(error_body(""), Value::Null);
    }

    #[test]
    fn empty_body_decodes_as_null() {
        let value: Value = decode_body("").unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn mismatched_body_is_a_decode_error() {
        let err = decode_body::<Vec<Value>>("not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn default_client_targets_localhost() {
        let client = ApiClient::with_defaults();
        assert_eq!(client.config(), &ClientConfig::default());
        let req = client.inventory().build_get_by_id(&1.into());
        assert_eq!(req.url(), "http://localhost:3000/inventory/1");
    }

    #[test]
    fn response_failure_keeps_only_the_body() {
        let mut response = HttpResponse::new(404, r#"{"error":"not found"}"#);
        response
            .headers
            .push(("content-type".to_string(), "application/json".to_string()));
        assert_eq!(
            into_api_error(Failure::Response(response)),
            ApiError::Server(json!({"error": "not found"}))
        );
    }
}
