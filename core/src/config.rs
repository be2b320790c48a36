//! Tunables for the catalog service and the search session.

use std::time::Duration;

use crate::client::DEFAULT_BASE_URL;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Upper bound on a single HTTP round-trip.
    pub timeout: Duration,
    /// Pages fetched at once when walking a listing; 1 walks sequentially.
    pub max_concurrent_pages: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            max_concurrent_pages: 1,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Zero is treated as 1.
    pub fn with_max_concurrent_pages(mut self, max: usize) -> Self {
        self.max_concurrent_pages = max.max(1);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a name search runs.
    pub debounce: Duration,
    /// Shorter name queries are ignored.
    pub min_query_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            min_query_len: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_public_catalog_sequentially() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://rickandmortyapi.com/api");
        assert_eq!(config.max_concurrent_pages, 1);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn zero_concurrency_is_clamped() {
        let config = ClientConfig::default().with_max_concurrent_pages(0);
        assert_eq!(config.max_concurrent_pages, 1);
    }
}
