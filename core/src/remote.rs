//! Wire records as the catalog server sends them.
//!
//! # Design
//! Field names follow the server's JSON. Serde ignores fields these structs
//! do not name, so new server fields never break parsing. Conversion into
//! the domain records lives in `mapper`.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCharacter {
    pub id: u32,
    pub name: String,
    pub status: String,
    pub species: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub gender: String,
    pub origin: RemotePlace,
    pub location: RemotePlace,
    pub image: String,
    /// Episode URLs, e.g. `https://host/api/episode/1`.
    pub episode: Vec<String>,
    pub created: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemotePlace {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteEpisode {
    pub id: u32,
    pub name: String,
    /// Packed season/episode code such as `S03E07`.
    pub episode: String,
    pub air_date: String,
    /// Character URLs, e.g. `https://host/api/character/42`.
    pub characters: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemotePage<T> {
    pub info: RemotePageInfo,
    pub results: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemotePageInfo {
    pub count: u32,
    pub pages: u32,
    pub next: Option<String>,
    pub prev: Option<String>,
}
