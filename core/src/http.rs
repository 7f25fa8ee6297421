//! HTTP exchange types shared by the client, its interceptors and transports.
//!
//! # Design
//! Requests and responses are plain data. `InventoryApi` builds an
//! `HttpRequest`, interceptors may rewrite it, and a `Transport` turns it into
//! an `HttpResponse`. Nothing here touches the network, so every stage can be
//! exercised in tests with hand-written values.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
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
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing request described as plain data.
///
/// `path` is relative to `base_url`; query pairs are kept separate so the
/// transport can encode them.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub base_url: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    /// Set once a request has been replayed after a 401.
    pub retried: bool,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, base_url: &str, path: impl Into<String>) -> Self {
        Self {
            method,
            base_url: base_url.to_string(),
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            retried: false,
        }
    }

    /// Absolute URL without the query string.
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A response described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
