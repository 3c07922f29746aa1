//! Joins search results with their thumbnails.
//!
//! Lookups run concurrently with [`join_all`], which yields outputs in input
//! order regardless of completion order. Each lookup is isolated: a failure
//! leaves only that result without a thumbnail.

use futures_util::future::join_all;

use crate::http::HttpTransport;
use crate::wiki::{SearchResult, WikiClient};

/// Attach a thumbnail to every result, preserving order and length.
///
/// Waits for all lookups; nothing is returned early.
pub async fn enrich<T: HttpTransport>(client: &WikiClient<T>, results: Vec<SearchResult>) -> Vec<SearchResult> {
    let lookups = results.into_iter().map(|mut result| async move {
        result.thumbnail = client.fetch_thumbnail(&result.title).await;
        result
    });

    let enriched = join_all(lookups).await;

    tracing::debug!(
        total = enriched.len(),
        with_thumbnail = enriched.iter().filter(|r| r.thumbnail.is_some()).count(),
        "enriched search results"
    );

    enriched
}
