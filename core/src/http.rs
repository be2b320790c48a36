//! HTTP request/response values exchanged with a [`Transport`].
//!
//! # Design
//! These types describe HTTP requests and responses as plain data.
//! `CatalogClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network; a `Transport` performs the actual
//! round-trip. Keeping the two apart lets tests swap in a scripted transport
//! and count calls.
//!
//! The catalog API is read-only, so every request is a GET. Query parameters
//! stay unencoded key/value pairs; the transport is responsible for encoding
//! them onto the URL.
//!
//! [`Transport`]: crate::transport::Transport

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Look up a query parameter by name.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}
