use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Records per listing page, matching the public catalog.
pub const PAGE_SIZE: usize = 20;

const NAMES: [(&str, &str, &str); 12] = [
    ("Rick Sanchez", "Human", "Male"),
    ("Morty Smith", "Human", "Male"),
    ("Summer Smith", "Human", "Female"),
    ("Beth Smith", "Human", "Female"),
    ("Jerry Smith", "Human", "Male"),
    ("Birdperson", "Alien", "Male"),
    ("Squanchy", "Alien", "Male"),
    ("Mr. Meeseeks", "Humanoid", "Male"),
    ("Unity", "Alien", "Genderless"),
    ("Tammy Guetermann", "Human", "Female"),
    ("Evil Morty", "Human", "Male"),
    ("Mr. Poopybutthole", "Poopybutthole", "Male"),
];

const STATUSES: [&str; 3] = ["Alive", "Dead", "unknown"];

/// Episodes per season, 51 in total.
const SEASONS: [u32; 5] = [11, 10, 10, 10, 10];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub status: String,
    pub species: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub gender: String,
    pub origin: Place,
    pub location: Place,
    pub image: String,
    pub episode: Vec<String>,
    pub url: String,
    pub created: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Episode {
    pub id: u32,
    pub name: String,
    pub air_date: String,
    pub episode: String,
    pub characters: Vec<String>,
    pub url: String,
    pub created: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PageInfo {
    pub count: usize,
    pub pages: usize,
    pub next: Option<String>,
    pub prev: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub info: PageInfo,
    pub results: Vec<T>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// A single id is answered with a bare object, a list with an array.
#[derive(Serialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

#[derive(Debug, Default, Deserialize)]
pub struct CharacterQuery {
    pub page: Option<usize>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub species: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub gender: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

/// The fixed, read-only data set the server answers from.
#[derive(Debug)]
pub struct Catalog {
    base_url: String,
    characters: Vec<Character>,
    episodes: Vec<Episode>,
}

impl Catalog {
    /// Build the sample catalog with resource URLs rooted at `base_url`.
    pub fn sample(base_url: &str, character_count: u32) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let episode_codes: Vec<(u32, u32)> = SEASONS
            .iter()
            .zip(1..)
            .flat_map(|(&count, season)| (1..=count).map(move |ep| (season, ep)))
            .collect();

        let appears_in = |character: u32, episode: u32| character <= 2 || (character + episode) % 7 == 0;

        let episodes = episode_codes
            .iter()
            .zip(1..)
            .map(|(&(season, ep), id)| Episode {
                id,
                name: format!("Episode {id}"),
                air_date: format!("Season {season} airing {ep}"),
                episode: format!("S{season:02}E{ep:02}"),
                characters: (1..=character_count)
                    .filter(|&c| appears_in(c, id))
                    .map(|c| format!("{base_url}/character/{c}"))
                    .collect(),
                url: format!("{base_url}/episode/{id}"),
                created: "2017-11-10T12:56:33.798Z".to_string(),
            })
            .collect::<Vec<_>>();

        let characters = (1..=character_count)
            .map(|id| {
                let index = (id as usize - 1) % NAMES.len();
                let (base, species, gender) = NAMES[index];
                let cycle = (id as usize - 1) / NAMES.len();
                let name = if cycle == 0 {
                    base.to_string()
                } else {
                    format!("{base} (variant {cycle})")
                };
                Character {
                    id,
                    name,
                    status: STATUSES[(id as usize - 1) % STATUSES.len()].to_string(),
                    species: species.to_string(),
                    kind: if cycle == 0 { String::new() } else { "Clone".to_string() },
                    gender: gender.to_string(),
                    origin: Place {
                        name: "Earth (C-137)".to_string(),
                        url: format!("{base_url}/location/1"),
                    },
                    location: Place {
                        name: "unknown".to_string(),
                        url: String::new(),
                    },
                    image: format!("{base_url}/character/avatar/{id}.jpeg"),
                    episode: episodes
                        .iter()
                        .filter(|e| appears_in(id, e.id))
                        .map(|e| e.url.clone())
                        .collect(),
                    url: format!("{base_url}/character/{id}"),
                    created: "2017-11-04T18:48:46.250Z".to_string(),
                }
            })
            .collect();

        Self {
            base_url,
            characters,
            episodes,
        }
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    fn character_matches(character: &Character, query: &CharacterQuery) -> bool {
        let eq = |value: &str, wanted: &Option<String>| {
            wanted
                .as_deref()
                .map_or(true, |wanted| value.eq_ignore_ascii_case(wanted))
        };
        let name_ok = query.name.as_deref().map_or(true, |needle| {
            character
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });
        name_ok
            && eq(&character.status, &query.status)
            && eq(&character.species, &query.species)
            && eq(&character.kind, &query.kind)
            && eq(&character.gender, &query.gender)
    }

    /// Slice `items` into the requested page. Out-of-range pages and empty
    /// result sets are "nothing here", as on the public catalog.
    fn paginate<T: Clone>(&self, resource: &str, items: Vec<T>, page: usize) -> Option<Page<T>> {
        let pages = items.len().div_ceil(PAGE_SIZE);
        if page == 0 || page > pages {
            return None;
        }
        let link = |n: usize| format!("{}/{resource}?page={n}", self.base_url);
        let results = items
            .iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .cloned()
            .collect();
        Some(Page {
            info: PageInfo {
                count: items.len(),
                pages,
                next: (page < pages).then(|| link(page + 1)),
                prev: (page > 1).then(|| link(page - 1)),
            },
            results,
        })
    }
}

pub type Db = Arc<Catalog>;

type Reply<T> = Result<Json<T>, (StatusCode, Json<ErrorBody>)>;

fn not_found(message: &str) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

/// Router over the sample catalog, linking resources under `base_url`.
pub fn app_with_base(base_url: &str) -> Router {
    let db: Db = Arc::new(Catalog::sample(base_url, 45));
    Router::new()
        .route("/character", get(list_characters))
        .route("/character/", get(list_characters))
        .route("/character/{ids}", get(get_characters))
        .route("/episode", get(list_episodes))
        .route("/episode/", get(list_episodes))
        .route("/episode/{ids}", get(get_episodes))
        .with_state(db)
}

pub fn app() -> Router {
    app_with_base("http://localhost:3000")
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "serving sample catalog");
    axum::serve(listener, app_with_base(&format!("http://{addr}"))).await
}

/// Parse `"1"` or `"1,2,3"`; any non-numeric entry rejects the whole list.
fn parse_ids(raw: &str) -> Option<Vec<u32>> {
    raw.split(',').map(|id| id.trim().parse().ok()).collect()
}

fn lookup<T: Clone>(
    items: &[T],
    raw_ids: &str,
    id_of: impl Fn(&T) -> u32,
    missing: &str,
) -> Reply<OneOrMany<T>> {
    let ids = parse_ids(raw_ids).ok_or_else(|| not_found(missing))?;
    let find = |id: u32| items.iter().find(|item| id_of(*item) == id).cloned();
    if let [id] = ids.as_slice() {
        return find(*id)
            .map(|item| Json(OneOrMany::One(item)))
            .ok_or_else(|| not_found(missing));
    }
    Ok(Json(OneOrMany::Many(ids.into_iter().filter_map(find).collect())))
}

async fn list_characters(
    State(db): State<Db>,
    Query(query): Query<CharacterQuery>,
) -> Reply<Page<Character>> {
    let matching: Vec<Character> = db
        .characters
        .iter()
        .filter(|c| Catalog::character_matches(c, &query))
        .cloned()
        .collect();
    let page = query.page.unwrap_or(1);
    db.paginate("character", matching, page)
        .map(Json)
        .ok_or_else(|| not_found("There is nothing here"))
}

async fn get_characters(State(db): State<Db>, Path(ids): Path<String>) -> Reply<OneOrMany<Character>> {
    lookup(&db.characters, &ids, |c| c.id, "Character not found")
}

async fn list_episodes(State(db): State<Db>, Query(query): Query<PageQuery>) -> Reply<Page<Episode>> {
    db.paginate("episode", db.episodes.clone(), query.page.unwrap_or(1))
        .map(Json)
        .ok_or_else(|| not_found("There is nothing here"))
}

async fn get_episodes(State(db): State<Db>, Path(ids): Path<String>) -> Reply<OneOrMany<Episode>> {
    lookup(&db.episodes, &ids, |e| e.id, "Episode not found")
}
