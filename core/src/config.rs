//! Client configuration: base URL and default headers.
//!
//! # Design
//! Configuration is resolved once, when the client is built. `from_env` reads
//! `INVENTORY_API_URL` at that moment and falls back to the local development
//! server; nothing re-reads the environment per request.

use std::env;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const BASE_URL_ENV: &str = "INVENTORY_API_URL";

/// Fixed configuration of an `ApiClient`: where requests go and which headers
/// every request carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub headers: Vec<(String, String)>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        }
    }

    /// Default configuration, with the base URL taken from `INVENTORY_API_URL`
    /// when it is set and non-empty.
    pub fn from_env() -> Self {
        match env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}
