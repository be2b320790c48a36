//! Domain records for the character/episode catalog.
//!
//! # Design
//! These are the shapes the UI layer consumes. They are defined apart from
//! the wire records in `remote` so that the server's field names and packed
//! encodings (episode codes, resource URLs) never leak past the mapper.
//! Serde derives exist so test vectors can state expected results as JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A character in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub species: String,
    /// Sub-species or variant; the server sends an empty string when absent.
    pub kind: String,
    pub gender: CharacterGender,
    pub status: CharacterStatus,
    pub origin: Place,
    pub location: Place,
    pub image_url: String,
    pub created: String,
    /// Episode ids in the order the server lists the appearances.
    pub episode_ids: Vec<u32>,
}

/// A named location reference. `url` is empty for unknown places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterGender {
    Male,
    Female,
    Genderless,
    Unknown,
}

impl CharacterGender {
    /// Lenient parse: anything unrecognised becomes `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "male" => Self::Male,
            "female" => Self::Female,
            "genderless" => Self::Genderless,
            _ => Self::Unknown,
        }
    }

    /// The spelling the server uses, both in responses and in filters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Genderless => "Genderless",
            Self::Unknown => "unknown",
        }
    }

    pub fn all() -> [Self; 4] {
        [Self::Male, Self::Female, Self::Genderless, Self::Unknown]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterStatus {
    Alive,
    Dead,
    Unknown,
}

impl CharacterStatus {
    /// Lenient parse: anything unrecognised becomes `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "alive" => Self::Alive,
            "dead" => Self::Dead,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alive => "Alive",
            Self::Dead => "Dead",
            Self::Unknown => "unknown",
        }
    }

    pub fn all() -> [Self; 3] {
        [Self::Alive, Self::Dead, Self::Unknown]
    }
}

/// An episode in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u32,
    pub name: String,
    pub season_number: u32,
    pub episode_number: u32,
    pub air_date: String,
    pub character_ids: Vec<u32>,
}

/// Group episodes by season, preserving their relative order within each.
pub fn group_by_season(episodes: &[Episode]) -> BTreeMap<u32, Vec<Episode>> {
    let mut seasons: BTreeMap<u32, Vec<Episode>> = BTreeMap::new();
    for episode in episodes {
        seasons
            .entry(episode.season_number)
            .or_default()
            .push(episode.clone());
    }
    seasons
}

/// One page of a paged listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub info: PageInfo,
    pub results: Vec<T>,
}

/// Metadata accompanying a paged response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of records across all pages.
    pub count: u32,
    /// Total number of pages.
    pub pages: u32,
    pub next: Option<String>,
    pub prev: Option<String>,
}

impl PageInfo {
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

/// Criteria for a character search. Absent fields are not sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterFilter {
    pub name: Option<String>,
    pub status: Option<CharacterStatus>,
    pub species: Option<String>,
    pub kind: Option<String>,
    pub gender: Option<CharacterGender>,
    pub page: u32,
}

impl Default for CharacterFilter {
    fn default() -> Self {
        Self {
            name: None,
            status: None,
            species: None,
            kind: None,
            gender: None,
            page: 1,
        }
    }
}

impl CharacterFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// The same criteria pointed at another page.
    pub fn at_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Query parameters for the present fields, followed by `page`.
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(name) = &self.name {
            params.push(("name".to_string(), name.clone()));
        }
        if let Some(status) = self.status {
            params.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(species) = &self.species {
            params.push(("species".to_string(), species.clone()));
        }
        if let Some(kind) = &self.kind {
            params.push(("type".to_string(), kind.clone()));
        }
        if let Some(gender) = self.gender {
            params.push(("gender".to_string(), gender.as_str().to_string()));
        }
        params.push(("page".to_string(), self.page.to_string()));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(id: u32, season: u32) -> Episode {
        Episode {
            id,
            name: format!("Episode {id}"),
            season_number: season,
            episode_number: id,
            air_date: String::new(),
            character_ids: Vec::new(),
        }
    }

    #[test]
    fn status_and_gender_parse_leniently() {
        assert_eq!(CharacterStatus::parse("Alive"), CharacterStatus::Alive);
        assert_eq!(CharacterStatus::parse("dead"), CharacterStatus::Dead);
        assert_eq!(CharacterStatus::parse("unknown"), CharacterStatus::Unknown);
        assert_eq!(CharacterStatus::parse("zombie"), CharacterStatus::Unknown);

        assert_eq!(CharacterGender::parse("Female"), CharacterGender::Female);
        assert_eq!(CharacterGender::parse("genderless"), CharacterGender::Genderless);
        assert_eq!(CharacterGender::parse(""), CharacterGender::Unknown);
    }

    #[test]
    fn every_filter_value_parses_back_to_itself() {
        for status in CharacterStatus::all() {
            let filter = CharacterFilter {
                status: Some(status),
                ..CharacterFilter::default()
            };
            let sent = &filter.query_params()[0].1;
            assert_eq!(CharacterStatus::parse(sent), status);
        }
        for gender in CharacterGender::all() {
            let filter = CharacterFilter {
                gender: Some(gender),
                ..CharacterFilter::default()
            };
            let sent = &filter.query_params()[0].1;
            assert_eq!(CharacterGender::parse(sent), gender);
        }
    }

    #[test]
    fn default_filter_only_sends_page() {
        let params = CharacterFilter::default().query_params();
        assert_eq!(params, vec![("page".to_string(), "1".to_string())]);
    }

    #[test]
    fn filter_sends_present_fields_in_order() {
        let filter = CharacterFilter {
            name: Some("rick".to_string()),
            status: Some(CharacterStatus::Alive),
            species: None,
            kind: Some("Parasite".to_string()),
            gender: Some(CharacterGender::Male),
            page: 3,
        };
        let keys: Vec<_> = filter.query_params().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name", "status", "type", "gender", "page"]);
        assert_eq!(filter.query_params()[1].1, "Alive");
    }

    #[test]
    fn at_page_keeps_criteria() {
        let filter = CharacterFilter::by_name("morty").at_page(4);
        assert_eq!(filter.name.as_deref(), Some("morty"));
        assert_eq!(filter.page, 4);
    }

    #[test]
    fn group_by_season_keeps_order_within_season() {
        let episodes = vec![episode(1, 1), episode(12, 2), episode(2, 1), episode(13, 2)];
        let seasons = group_by_season(&episodes);
        assert_eq!(seasons.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        let ids: Vec<u32> = seasons[&1].iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
        let ids: Vec<u32> = seasons[&2].iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![12, 13]);
    }
}
