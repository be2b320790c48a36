//! Latest-wins character search for a single search box.
//!
//! # Design
//! A `SearchSession` owns at most one in-flight search task. Starting a new
//! search aborts the previous task and bumps a generation counter; a task
//! only publishes while its generation is still current. Together these
//! guarantee that a slow response to an old query can never overwrite the
//! state produced for a newer one.
//!
//! State is published on a `tokio::sync::watch` channel so a UI layer can
//! await changes or read the latest value at any time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::service::CatalogService;
use crate::transport::Transport;
use crate::types::{Character, CharacterFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    /// Nothing has been searched yet.
    Initial,
    Loading,
    Loaded(Vec<Character>),
    /// Display message for the failed search.
    Error(String),
}

pub struct SearchSession<T: Transport + 'static> {
    service: Arc<CatalogService<T>>,
    config: SearchConfig,
    shared: Arc<Shared>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

struct Shared {
    state: watch::Sender<SearchState>,
    generation: AtomicU64,
    /// Last query that survived the debounce, for skipping repeats.
    last_query: Mutex<Option<String>>,
}

impl Shared {
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Publish `state` unless a newer search has started.
    fn publish(&self, generation: u64, state: SearchState) {
        self.state.send_if_modified(|current| {
            if !self.is_current(generation) {
                return false;
            }
            *current = state;
            true
        });
    }

    /// Leave `Loading` for `Initial` when a query is dropped without a search.
    /// The aborted task that published `Loading` will never finish it.
    fn settle(&self, generation: u64) {
        self.state.send_if_modified(|current| {
            if !self.is_current(generation) || *current != SearchState::Loading {
                return false;
            }
            *current = SearchState::Initial;
            true
        });
    }
}

impl<T: Transport + 'static> SearchSession<T> {
    pub fn new(service: Arc<CatalogService<T>>, config: SearchConfig) -> Self {
        let (state, _) = watch::channel(SearchState::Initial);
        Self {
            service,
            config,
            shared: Arc::new(Shared {
                state,
                generation: AtomicU64::new(0),
                last_query: Mutex::new(None),
            }),
            in_flight: Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.shared.state.subscribe()
    }

    pub fn state(&self) -> SearchState {
        self.shared.state.borrow().clone()
    }

    /// Record a keystroke in the search box.
    ///
    /// After the debounce period the query is searched by name, unless it is
    /// shorter than `min_query_len` or repeats the previous debounced query.
    /// A dropped query that cut a running search short resets the state to
    /// `Initial`.
    /// Must be called from within a Tokio runtime.
    pub fn query_changed(&self, query: impl Into<String>) {
        let query = query.into();
        let generation = self.supersede();
        let service = self.service.clone();
        let shared = self.shared.clone();
        let config = self.config.clone();

        let task = tokio::spawn(async move {
            tokio::time::sleep(config.debounce).await;
            {
                let mut last = shared.last_query.lock().unwrap_or_else(PoisonError::into_inner);
                if last.as_deref() == Some(query.as_str()) {
                    debug!(%query, "query unchanged after debounce");
                    shared.settle(generation);
                    return;
                }
                *last = Some(query.clone());
            }
            if query.chars().count() < config.min_query_len {
                debug!(%query, "query too short to search");
                shared.settle(generation);
                return;
            }
            run_search(&service, &shared, generation, CharacterFilter::by_name(query)).await;
        });
        self.track(task);
    }

    /// Search with explicit criteria right away, superseding any pending search.
    /// Must be called from within a Tokio runtime.
    pub fn search_with_filter(&self, filter: CharacterFilter) {
        let generation = self.supersede();
        let service = self.service.clone();
        let shared = self.shared.clone();

        let task = tokio::spawn(async move {
            run_search(&service, &shared, generation, filter).await;
        });
        self.track(task);
    }

    /// Claim a new generation and abort whatever search is still running.
    fn supersede(&self) -> u64 {
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = self.lock_in_flight().take() {
            if !previous.is_finished() {
                info!(generation, "superseding in-flight search");
                // Its query may never have produced a result, so it must not
                // count as a repeat.
                *self
                    .shared
                    .last_query
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner) = None;
            }
            previous.abort();
        }
        generation
    }

    fn track(&self, task: JoinHandle<()>) {
        *self.lock_in_flight() = Some(task);
    }

    fn lock_in_flight(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Transport + 'static> Drop for SearchSession<T> {
    fn drop(&mut self) {
        if let Some(task) = self.lock_in_flight().take() {
            task.abort();
        }
    }
}

async fn run_search<T: Transport>(
    service: &CatalogService<T>,
    shared: &Shared,
    generation: u64,
    filter: CharacterFilter,
) {
    shared.publish(generation, SearchState::Loading);
    let state = match service.search_characters(&filter).await {
        Ok(page) => SearchState::Loaded(page.results),
        Err(e) => SearchState::Error(e.to_string()),
    };
    shared.publish(generation, state);
}
