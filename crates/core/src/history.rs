//! Bounded, de-duplicated search history.
//!
//! Terms are kept most recent first, capped at [`MAX_HISTORY`]. Adding a term
//! that is already present leaves the list untouched; it is not moved to the
//! front. Every mutation is persisted as a JSON array under [`HISTORY_KEY`] and
//! broadcast on a watch channel so views can refresh.
//!
//! Persistence is best-effort: storage failures are logged and the in-memory
//! list still reflects the mutation.

use std::sync::Arc;

use tokio::sync::watch;

use crate::storage::KeyValueStore;

/// Storage key holding the JSON-encoded history list.
pub const HISTORY_KEY: &str = "wikiSearchHistory";

/// Maximum number of remembered terms.
pub const MAX_HISTORY: usize = 5;

/// Owned history state with an injected persistence collaborator.
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    entries: Vec<String>,
    updates: watch::Sender<Vec<String>>,
}

impl HistoryStore {
    /// Load history from `store`.
    ///
    /// Missing, unreadable, or malformed state yields an empty history.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let entries = match store.get(HISTORY_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(terms) => sanitize(terms),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring malformed search history");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read search history");
                Vec::new()
            }
        };

        let (updates, _) = watch::channel(entries.clone());
        Self { store, entries, updates }
    }

    /// Current terms, most recent first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Term at `index` (0 is most recent).
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Subscribe to history changes.
    pub fn subscribe(&self) -> watch::Receiver<Vec<String>> {
        self.updates.subscribe()
    }

    /// Remember `term`.
    ///
    /// Returns `false` without touching storage when the term is empty or
    /// already present.
    pub async fn add(&mut self, term: &str) -> bool {
        if term.is_empty() || self.entries.iter().any(|t| t == term) {
            return false;
        }

        self.entries.insert(0, term.to_string());
        self.entries.truncate(MAX_HISTORY);
        self.commit().await;
        true
    }

    /// Forget every occurrence of `term`. Returns whether anything was removed.
    pub async fn remove(&mut self, term: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|t| t != term);
        if self.entries.len() == before {
            return false;
        }

        self.commit().await;
        true
    }

    async fn commit(&self) {
        match serde_json::to_string(&self.entries) {
            Ok(json) => {
                if let Err(e) = self.store.set(HISTORY_KEY, &json).await {
                    tracing::warn!(error = %e, "failed to persist search history");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to encode search history"),
        }

        self.updates.send_replace(self.entries.clone());
    }
}

/// Drop empty and repeated terms and enforce the size bound.
fn sanitize(terms: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(MAX_HISTORY);
    for term in terms {
        if out.len() == MAX_HISTORY {
            break;
        }
        if !term.is_empty() && !out.contains(&term) {
            out.push(term);
        }
    }
    out
}
