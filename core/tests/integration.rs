//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port in its own thread and runtime,
//! then exercises every `CatalogService` operation over real HTTP through
//! `UreqTransport`. Validates that request building, status handling and
//! wire-to-domain mapping agree with an actual server.

use std::net::SocketAddr;
use std::time::Duration;

use catalog_core::{
    ApiError, CatalogService, CharacterFilter, CharacterStatus, ClientConfig, UreqTransport,
};

fn start_mock_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn config(addr: SocketAddr) -> ClientConfig {
    ClientConfig::default()
        .with_base_url(format!("http://{addr}"))
        .with_timeout(Duration::from_secs(5))
}

#[tokio::test(flavor = "multi_thread")]
async fn characters_round_trip_and_cache() {
    let addr = start_mock_server();
    let service = CatalogService::new(config(addr));

    // Step 1: first detail fetch goes to the server and lands in the cache.
    let rick = service.fetch_character(1).await.unwrap();
    assert_eq!(rick.name, "Rick Sanchez");
    assert_eq!(rick.status, CharacterStatus::Alive);
    assert_eq!(rick.episode_ids.len(), 51);
    assert_eq!(rick.episode_ids[..3], [1, 2, 3]);
    assert_eq!(service.cache().len(), 1);

    // Step 2: unknown id is NotFound and does not touch the cache.
    let err = service.fetch_character(999).await.unwrap_err();
    assert_eq!(err, ApiError::NotFound);
    assert_eq!(service.cache().len(), 1);

    // Step 3: listing pages.
    let page = service.fetch_character_page(3).await.unwrap();
    assert_eq!(page.info.count, 45);
    assert_eq!(page.info.pages, 3);
    assert!(page.info.is_last());
    assert_eq!(page.results.first().map(|c| c.id), Some(41));
}

#[tokio::test(flavor = "multi_thread")]
async fn episodes_single_multi_and_all() {
    let addr = start_mock_server();
    let service = CatalogService::new(config(addr));

    // Single id: the server answers with a bare object.
    let one = service.fetch_episodes(&[28]).await.unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!((one[0].season_number, one[0].episode_number), (3, 7));

    // Several ids: an array, same element shape.
    let many = service.fetch_episodes(&[1, 28]).await.unwrap();
    assert_eq!(many.len(), 2);
    assert_eq!(many[1], one[0]);
    assert!(many[0].character_ids.contains(&1));

    // Every page, sequentially.
    let all = service.fetch_all_episodes().await.unwrap();
    let ids: Vec<u32> = all.iter().map(|e| e.id).collect();
    assert_eq!(ids, (1..=51).collect::<Vec<_>>());
    assert_eq!(catalog_core::group_by_season(&all).len(), 5);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_walk_matches_sequential_walk() {
    let addr = start_mock_server();
    let sequential = CatalogService::new(config(addr));
    let concurrent = CatalogService::new(config(addr).with_max_concurrent_pages(3));

    let a = sequential.fetch_all_episodes().await.unwrap();
    let b = concurrent.fetch_all_episodes().await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test(flavor = "multi_thread")]
async fn searches_filter_on_the_server() {
    let addr = start_mock_server();
    let service = CatalogService::new(config(addr).with_max_concurrent_pages(2));

    let page = service.search_characters_by_name("rick").await.unwrap();
    assert!(page.results.iter().any(|c| c.name == "Rick Sanchez"));
    assert!(page.results.iter().all(|c| c.name.to_lowercase().contains("rick")));

    // Names with spaces must survive query encoding.
    let page = service.search_characters_by_name("Evil Morty").await.unwrap();
    assert!(page.results.iter().all(|c| c.name.starts_with("Evil Morty")));

    let humans = CharacterFilter {
        species: Some("Human".to_string()),
        ..CharacterFilter::default()
    };
    let first_page = service.search_characters(&humans).await.unwrap();
    assert_eq!(first_page.info.pages, 2);
    let all = service.search_all_characters(&humans).await.unwrap();
    assert_eq!(all.len() as u32, first_page.info.count);
    assert!(all.iter().all(|c| c.species == "Human"));
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));

    let err = service.search_characters_by_name("zzzz").await.unwrap_err();
    assert_eq!(err, ApiError::NotFound);
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let service = CatalogService::with_transport(
        config(addr),
        UreqTransport::new(Duration::from_secs(2)),
    );

    let err = service.fetch_episode_page(1).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
