//! Async catalog operations over a [`Transport`].
//!
//! # Design
//! `CatalogService` is the single point of contact with the remote catalog.
//! It pairs the stateless `CatalogClient` (request building, response
//! parsing, wire-to-domain mapping) with a transport and an injected
//! `CharacterCache`. Every operation returns `ApiResult`; transport, status,
//! JSON and mapping failures all come back as `Err` and are logged at
//! `warn` before they leave, so call sites that ignore a failure still leave
//! a trace.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::CharacterCache;
use crate::client::CatalogClient;
use crate::config::ClientConfig;
use crate::error::ApiResult;
use crate::pagination::collect_all_pages;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Character, CharacterFilter, Episode, Page};

pub struct CatalogService<T = UreqTransport> {
    client: CatalogClient,
    transport: T,
    cache: Arc<CharacterCache>,
    max_concurrent_pages: usize,
}

impl CatalogService<UreqTransport> {
    /// Service talking HTTP through `ureq` with a fresh, private cache.
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> CatalogService<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self::with_cache(config, transport, Arc::new(CharacterCache::new()))
    }

    /// Build a service around an existing cache, e.g. one shared with
    /// another service instance.
    pub fn with_cache(config: ClientConfig, transport: T, cache: Arc<CharacterCache>) -> Self {
        Self {
            client: CatalogClient::new(&config.base_url),
            transport,
            cache,
            max_concurrent_pages: config.max_concurrent_pages.max(1),
        }
    }

    pub fn cache(&self) -> &Arc<CharacterCache> {
        &self.cache
    }

    /// Fetch one character, answering from the cache when possible.
    ///
    /// A cache hit never touches the transport. A successful network fetch
    /// is cached for the lifetime of the cache.
    pub async fn fetch_character(&self, id: u32) -> ApiResult<Character> {
        if let Some(character) = self.cache.get(id) {
            debug!(id, "character cache hit");
            return Ok(character);
        }
        debug!(id, "character cache miss");

        let character = async {
            let response = self
                .transport
                .execute(self.client.build_get_character(id))
                .await?;
            self.client.parse_character(response)
        }
        .await
        .inspect_err(|e| warn!(id, error = %e, "fetching character failed"))?;

        self.cache.put(id, character.clone());
        Ok(character)
    }

    pub async fn fetch_character_page(&self, page: u32) -> ApiResult<Page<Character>> {
        async {
            let response = self
                .transport
                .execute(self.client.build_character_page(page))
                .await?;
            self.client.parse_character_page(response)
        }
        .await
        .inspect_err(|e| warn!(page, error = %e, "fetching character page failed"))
    }

    /// Fetch the given episodes in one request. The result always has one
    /// entry per episode the server returned, whether one id or many were
    /// asked for.
    pub async fn fetch_episodes(&self, ids: &[u32]) -> ApiResult<Vec<Episode>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        async {
            let response = self
                .transport
                .execute(self.client.build_get_episodes(ids))
                .await?;
            self.client.parse_episodes(ids.len(), response)
        }
        .await
        .inspect_err(|e| warn!(?ids, error = %e, "fetching episodes failed"))
    }

    pub async fn fetch_episode_page(&self, page: u32) -> ApiResult<Page<Episode>> {
        self.episode_page(page)
            .await
            .inspect_err(|e| warn!(page, error = %e, "fetching episode page failed"))
    }

    /// Every episode in the catalog, in page order.
    pub async fn fetch_all_episodes(&self) -> ApiResult<Vec<Episode>> {
        collect_all_pages(|page| self.episode_page(page), self.max_concurrent_pages)
            .await
            .inspect_err(|e| warn!(error = %e, "fetching all episodes failed"))
    }

    /// One page of characters matching `filter`.
    pub async fn search_characters(&self, filter: &CharacterFilter) -> ApiResult<Page<Character>> {
        self.search_page(filter)
            .await
            .inspect_err(|e| warn!(?filter, error = %e, "character search failed"))
    }

    pub async fn search_characters_by_name(&self, name: &str) -> ApiResult<Page<Character>> {
        self.search_characters(&CharacterFilter::by_name(name)).await
    }

    /// Every character matching `filter` across all result pages, starting
    /// from page 1 whatever `filter.page` says.
    pub async fn search_all_characters(&self, filter: &CharacterFilter) -> ApiResult<Vec<Character>> {
        collect_all_pages(
            |page| async move { self.search_page(&filter.at_page(page)).await },
            self.max_concurrent_pages,
        )
        .await
        .inspect_err(|e| warn!(?filter, error = %e, "searching all character pages failed"))
    }

    async fn episode_page(&self, page: u32) -> ApiResult<Page<Episode>> {
        let response = self
            .transport
            .execute(self.client.build_episode_page(page))
            .await?;
        self.client.parse_episode_page(response)
    }

    async fn search_page(&self, filter: &CharacterFilter) -> ApiResult<Page<Character>> {
        let response = self
            .transport
            .execute(self.client.build_search_characters(filter))
            .await?;
        self.client.parse_character_page(response)
    }
}
