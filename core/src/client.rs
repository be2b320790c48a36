//! Stateless request builder and response parser for the catalog API.
//!
//! # Design
//! `CatalogClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`, mapping the body from wire records to domain records.
//! `CatalogService` drives the round-trip through a `Transport`.

use crate::error::{ApiError, ApiResult};
use crate::http::{HttpRequest, HttpResponse};
use crate::mapper::map_page;
use crate::remote::{RemoteCharacter, RemoteEpisode, RemotePage};
use crate::types::{Character, CharacterFilter, Episode, Page};

/// Public catalog this crate targets unless told otherwise.
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Synchronous, stateless client for the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_get_character(&self, id: u32) -> HttpRequest {
        HttpRequest::get(format!("{}/character/{id}", self.base_url))
    }

    pub fn build_character_page(&self, page: u32) -> HttpRequest {
        HttpRequest::get(format!("{}/character/", self.base_url))
            .with_query(vec![("page".to_string(), page.to_string())])
    }

    pub fn build_search_characters(&self, filter: &CharacterFilter) -> HttpRequest {
        HttpRequest::get(format!("{}/character", self.base_url)).with_query(filter.query_params())
    }

    /// Request one or more episodes by id, e.g. `episode/1,2,3`.
    pub fn build_get_episodes(&self, ids: &[u32]) -> HttpRequest {
        let joined = ids
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        HttpRequest::get(format!("{}/episode/{joined}", self.base_url))
    }

    pub fn build_episode_page(&self, page: u32) -> HttpRequest {
        HttpRequest::get(format!("{}/episode", self.base_url))
            .with_query(vec![("page".to_string(), page.to_string())])
    }

    pub fn parse_character(&self, response: HttpResponse) -> ApiResult<Character> {
        check_status(&response, 200)?;
        let remote: RemoteCharacter = serde_json::from_str(&response.body)?;
        Ok(Character::try_from(remote)?)
    }

    pub fn parse_character_page(&self, response: HttpResponse) -> ApiResult<Page<Character>> {
        check_status(&response, 200)?;
        let remote: RemotePage<RemoteCharacter> = serde_json::from_str(&response.body)?;
        Ok(map_page(remote)?)
    }

    /// Parse an episode lookup for `requested` ids.
    ///
    /// The server answers a single-id request with a bare object rather than
    /// a one-element array; both shapes come back as a `Vec`.
    pub fn parse_episodes(&self, requested: usize, response: HttpResponse) -> ApiResult<Vec<Episode>> {
        check_status(&response, 200)?;
        let remote: Vec<RemoteEpisode> = if requested == 1 {
            vec![serde_json::from_str(&response.body)?]
        } else {
            serde_json::from_str(&response.body)?
        };
        remote
            .into_iter()
            .map(|episode| Episode::try_from(episode).map_err(ApiError::from))
            .collect()
    }

    pub fn parse_episode_page(&self, response: HttpResponse) -> ApiResult<Page<Episode>> {
        check_status(&response, 200)?;
        let remote: RemotePage<RemoteEpisode> = serde_json::from_str(&response.body)?;
        Ok(map_page(remote)?)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
