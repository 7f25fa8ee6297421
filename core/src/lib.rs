//! Async API client for the food supply chain inventory service.
//!
//! # Overview
//! One `ApiClient` per process holds the base URL, default headers, a
//! `Transport` and the interceptor chains. `ApiClient::inventory` exposes the
//! five operations on `/inventory`; each resolves to the decoded response
//! body or fails with an `ApiError`.
//!
//! # Design
//! - Requests and responses are plain data (`http`), so interceptors and
//!   transports are testable without sockets.
//! - `Transport` is the only I/O seam; `UreqTransport` is the production one.
//! - Failures keep only what the caller acts on: the server's error body, or
//!   the transport error unchanged.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod inventory;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, TransportError, TransportErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use interceptor::{
    Failure, RequestInterceptor, ResponseInterceptor, TraceRequests, UnauthorizedHook,
};
pub use inventory::InventoryApi;
pub use transport::{Transport, UreqTransport};
pub use types::{InventoryItem, ItemId, ListParams};
