//! Wire-to-domain translation.
//!
//! Pure functions only. Two packed encodings are unpacked here: the episode
//! code (`S03E07`) and resource URLs whose last path segment is a numeric id.

use crate::error::MappingError;
use crate::remote::{RemoteCharacter, RemoteEpisode, RemotePage, RemotePageInfo, RemotePlace};
use crate::types::{Character, CharacterGender, CharacterStatus, Episode, Page, PageInfo, Place};

/// Split an episode code into `(season, episode)`.
///
/// Only the digits are considered: the first two are the season and the last
/// two the episode, so `"S03E07"` yields `(3, 7)`. Fewer than four digits is
/// malformed.
pub fn parse_episode_code(code: &str) -> Result<(u32, u32), MappingError> {
    let digits: String = code.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 4 {
        return Err(MappingError::MalformedEpisodeCode(code.to_string()));
    }
    let malformed = |_| MappingError::MalformedEpisodeCode(code.to_string());
    let season = digits[..2].parse().map_err(malformed)?;
    let episode = digits[digits.len() - 2..].parse().map_err(malformed)?;
    Ok((season, episode))
}

/// Parse the numeric id at the end of a resource URL, e.g. `.../character/42`.
pub fn id_from_resource_url(url: &str) -> Result<u32, MappingError> {
    let segment = url.rsplit('/').next().unwrap_or_default();
    segment
        .parse()
        .map_err(|_| MappingError::InvalidResourceUrl(url.to_string()))
}

fn ids_from_urls(urls: &[String]) -> Result<Vec<u32>, MappingError> {
    urls.iter().map(|url| id_from_resource_url(url)).collect()
}

impl From<RemotePlace> for Place {
    fn from(remote: RemotePlace) -> Self {
        Place {
            name: remote.name,
            url: remote.url,
        }
    }
}

impl TryFrom<RemoteCharacter> for Character {
    type Error = MappingError;

    fn try_from(remote: RemoteCharacter) -> Result<Self, Self::Error> {
        Ok(Character {
            episode_ids: ids_from_urls(&remote.episode)?,
            id: remote.id,
            name: remote.name,
            species: remote.species,
            kind: remote.kind,
            gender: CharacterGender::parse(&remote.gender),
            status: CharacterStatus::parse(&remote.status),
            origin: remote.origin.into(),
            location: remote.location.into(),
            image_url: remote.image,
            created: remote.created,
        })
    }
}

impl TryFrom<RemoteEpisode> for Episode {
    type Error = MappingError;

    fn try_from(remote: RemoteEpisode) -> Result<Self, Self::Error> {
        let (season_number, episode_number) = parse_episode_code(&remote.episode)?;
        Ok(Episode {
            id: remote.id,
            name: remote.name,
            season_number,
            episode_number,
            air_date: remote.air_date,
            character_ids: ids_from_urls(&remote.characters)?,
        })
    }
}

impl From<RemotePageInfo> for PageInfo {
    fn from(remote: RemotePageInfo) -> Self {
        PageInfo {
            count: remote.count,
            pages: remote.pages,
            next: remote.next,
            prev: remote.prev,
        }
    }
}

/// Map every record on a page; the first failure fails the page.
pub fn map_page<R, D>(remote: RemotePage<R>) -> Result<Page<D>, MappingError>
where
    D: TryFrom<R, Error = MappingError>,
{
    let results = remote
        .results
        .into_iter()
        .map(D::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Page {
        info: remote.info.into(),
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote_episode(code: &str, characters: &[&str]) -> RemoteEpisode {
        RemoteEpisode {
            id: 28,
            name: "The Ricklantis Mixup".to_string(),
            episode: code.to_string(),
            air_date: "September 10, 2017".to_string(),
            characters: characters.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn episode_code_splits_season_and_episode() {
        assert_eq!(parse_episode_code("S03E07").unwrap(), (3, 7));
        assert_eq!(parse_episode_code("S01E01").unwrap(), (1, 1));
        assert_eq!(parse_episode_code("S10E11").unwrap(), (10, 11));
    }

    #[test]
    fn short_episode_code_is_rejected() {
        for code in ["", "S1E", "S01E", "pilot"] {
            let err = parse_episode_code(code).unwrap_err();
            assert_eq!(err, MappingError::MalformedEpisodeCode(code.to_string()));
        }
    }

    #[test]
    fn resource_url_yields_trailing_id() {
        assert_eq!(id_from_resource_url("https://host/api/episode/5").unwrap(), 5);
        assert_eq!(id_from_resource_url("https://host/api/character/42").unwrap(), 42);
    }

    #[test]
    fn resource_url_without_numeric_tail_is_rejected() {
        for url in ["https://host/api/character/", "https://host/api/character/abc", ""] {
            assert!(matches!(
                id_from_resource_url(url),
                Err(MappingError::InvalidResourceUrl(_))
            ));
        }
    }

    #[test]
    fn episode_maps_code_and_character_refs() {
        let remote = remote_episode(
            "S03E07",
            &["https://host/api/character/1", "https://host/api/character/2"],
        );
        let episode = Episode::try_from(remote).unwrap();
        assert_eq!(episode.season_number, 3);
        assert_eq!(episode.episode_number, 7);
        assert_eq!(episode.character_ids, vec![1, 2]);
    }

    #[test]
    fn episode_with_bad_character_ref_fails() {
        let remote = remote_episode("S03E07", &["https://host/api/character/one"]);
        assert!(Episode::try_from(remote).is_err());
    }

    #[test]
    fn character_maps_enums_and_episode_refs() {
        let remote = RemoteCharacter {
            id: 1,
            name: "Rick Sanchez".to_string(),
            status: "Alive".to_string(),
            species: "Human".to_string(),
            kind: String::new(),
            gender: "something new".to_string(),
            origin: RemotePlace {
                name: "Earth (C-137)".to_string(),
                url: "https://host/api/location/1".to_string(),
            },
            location: RemotePlace {
                name: "unknown".to_string(),
                url: String::new(),
            },
            image: "https://host/api/character/avatar/1.jpeg".to_string(),
            episode: vec![
                "https://host/api/episode/10".to_string(),
                "https://host/api/episode/2".to_string(),
            ],
            created: "2017-11-04T18:48:46.250Z".to_string(),
        };
        let character = Character::try_from(remote).unwrap();
        assert_eq!(character.status, CharacterStatus::Alive);
        assert_eq!(character.gender, CharacterGender::Unknown);
        assert_eq!(character.episode_ids, vec![10, 2]);
        assert_eq!(character.origin.name, "Earth (C-137)");
        assert_eq!(character.image_url, "https://host/api/character/avatar/1.jpeg");
    }

    #[test]
    fn page_fails_on_first_bad_record() {
        let remote = RemotePage {
            info: RemotePageInfo {
                count: 2,
                pages: 1,
                next: None,
                prev: None,
            },
            results: vec![remote_episode("S01E01", &[]), remote_episode("S1", &[])],
        };
        let mapped: Result<Page<Episode>, _> = map_page(remote);
        assert!(matches!(mapped, Err(MappingError::MalformedEpisodeCode(_))));
    }
}
