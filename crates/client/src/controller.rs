//! Search orchestration.
//!
//! Every invocation moves the published state `Idle → Loading → {Rendered |
//! Empty | Errored}`. Errors stop here: callers only ever see a state with a
//! message, never an `Err`.
//!
//! Invocations are numbered. A result is published only if no newer
//! invocation has started in the meantime, so a slow stale response cannot
//! overwrite a fresher one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Mutex, watch};
use wikisearch_core::HistoryStore;

use crate::aggregate::enrich;
use crate::debounce::Debouncer;
use crate::http::{HttpTransport, ReqwestTransport};
use crate::render::{DisplayModel, Renderer};
use crate::wiki::{SearchResult, WikiClient};

pub const EMPTY_TERM_MESSAGE: &str = "please enter valid search term";
pub const NO_RESULTS_MESSAGE: &str = "no matching results. Please try again";
pub const SEARCH_FAILED_MESSAGE: &str = "there was an error...";
pub const RANDOM_FAILED_MESSAGE: &str = "Failed to fetch random article";

/// Placeholder snippet for a random article.
pub const RANDOM_SNIPPET: &str = "Loading random article...";

/// Live input shorter than this does not search.
pub const MIN_LIVE_CHARS: usize = 3;

/// What the results area currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Rendered(DisplayModel),
    /// Successful search with zero hits.
    Empty(String),
    Errored(String),
}

pub struct SearchController<T = ReqwestTransport> {
    client: WikiClient<T>,
    renderer: Renderer,
    history: Mutex<HistoryStore>,
    state: watch::Sender<SearchState>,
    generation: AtomicU64,
}

impl<T: HttpTransport + 'static> SearchController<T> {
    pub fn new(client: WikiClient<T>, history: HistoryStore) -> Self {
        let renderer = Renderer::new(client.article_base());
        let (state, _) = watch::channel(SearchState::Idle);
        Self { client, renderer, history: Mutex::new(history), state, generation: AtomicU64::new(0) }
    }

    pub fn client(&self) -> &WikiClient<T> {
        &self.client
    }

    /// Snapshot of the published state.
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub async fn history(&self) -> Vec<String> {
        self.history.lock().await.entries().to_vec()
    }

    pub async fn subscribe_history(&self) -> watch::Receiver<Vec<String>> {
        self.history.lock().await.subscribe()
    }

    /// Explicit submission: validates, remembers the term, then searches.
    pub async fn submit(&self, term: &str) -> SearchState {
        let ticket = self.begin();

        if term.is_empty() {
            let state = SearchState::Errored(EMPTY_TERM_MESSAGE.to_string());
            self.publish(ticket, state.clone());
            return state;
        }

        self.history.lock().await.add(term).await;
        self.run_search(ticket, term).await
    }

    /// Live input: searches only for terms of at least [`MIN_LIVE_CHARS`]
    /// characters and never touches history.
    pub async fn live_input(&self, term: &str) -> Option<SearchState> {
        if term.chars().count() < MIN_LIVE_CHARS {
            return None;
        }

        let ticket = self.begin();
        Some(self.run_search(ticket, term).await)
    }

    /// Re-run a remembered term.
    pub async fn activate_history(&self, term: &str) -> SearchState {
        let ticket = self.begin();
        self.run_search(ticket, term).await
    }

    pub async fn remove_history(&self, term: &str) -> bool {
        self.history.lock().await.remove(term).await
    }

    /// Show one random article.
    pub async fn random(&self) -> SearchState {
        let ticket = self.begin();

        let state = match self.client.fetch_random().await {
            Ok(page) => {
                let placeholder = SearchResult {
                    title: page.title,
                    snippet: RANDOM_SNIPPET.to_string(),
                    page_id: page.page_id,
                    thumbnail: None,
                };
                let enriched = enrich(&self.client, vec![placeholder]).await;
                SearchState::Rendered(self.renderer.render(&enriched))
            }
            Err(e) => {
                tracing::error!(error = %e, "random article lookup failed");
                SearchState::Errored(RANDOM_FAILED_MESSAGE.to_string())
            }
        };

        self.publish(ticket, state.clone());
        state
    }

    /// Debounced live search wired to this controller.
    pub fn live_search(self: &Arc<Self>, delay: Duration) -> Debouncer<String> {
        let controller = Arc::clone(self);
        Debouncer::new(delay, move |term: String| {
            let controller = controller.clone();
            async move {
                controller.live_input(&term).await;
            }
        })
    }

    async fn run_search(&self, ticket: u64, term: &str) -> SearchState {
        let state = match self.client.search(term).await {
            Ok(results) if results.is_empty() => SearchState::Empty(NO_RESULTS_MESSAGE.to_string()),
            Ok(results) => {
                let enriched = enrich(&self.client, results).await;
                SearchState::Rendered(self.renderer.render(&enriched))
            }
            Err(e) => {
                tracing::error!(term, error = %e, "search failed");
                SearchState::Errored(SEARCH_FAILED_MESSAGE.to_string())
            }
        };

        self.publish(ticket, state.clone());
        state
    }

    /// Start an invocation: take a ticket and show `Loading`.
    fn begin(&self) -> u64 {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(SearchState::Loading);
        ticket
    }

    /// Publish `state` unless a newer invocation has started.
    fn publish(&self, ticket: u64, state: SearchState) -> bool {
        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, "discarding stale search result");
            return false;
        }
        self.state.send_replace(state);
        true
    }
}
