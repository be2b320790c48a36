//! Data-access core for the Rick and Morty character/episode catalog.
//!
//! # Overview
//! Fetches characters and episodes from the public REST catalog, maps the
//! wire format into domain records, and hands back `ApiResult` values that a
//! UI layer renders. Nothing here panics or propagates past an operation:
//! every transport, status, JSON or mapping failure becomes an `Err`.
//!
//! # Design
//! - `CatalogClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`. It never touches the network.
//! - `CatalogService` drives those round-trips through a `Transport`, owns
//!   an injected `CharacterCache`, and walks paged listings.
//! - `SearchSession` gives a search box latest-wins semantics on top of the
//!   service.
//! - Wire records (`remote`) are defined independently from the mock
//!   server's; integration tests catch schema drift.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod mapper;
pub mod pagination;
pub mod remote;
pub mod search;
pub mod service;
pub mod transport;
pub mod types;

pub use cache::CharacterCache;
pub use client::{CatalogClient, DEFAULT_BASE_URL};
pub use config::{ClientConfig, SearchConfig};
pub use error::{ApiError, ApiResult, MappingError};
pub use http::{HttpRequest, HttpResponse};
pub use search::{SearchSession, SearchState};
pub use service::CatalogService;
pub use transport::{Transport, UreqTransport};
pub use types::{
    group_by_season, Character, CharacterFilter, CharacterGender, CharacterStatus, Episode, Page,
    PageInfo, Place,
};
