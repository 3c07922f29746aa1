//! Client code for wikisearch.
//!
//! This crate provides the Wikipedia API client, thumbnail enrichment, the
//! display model renderer, live-input debouncing, sharing helpers and the
//! search controller that ties them together.

pub mod aggregate;
pub mod controller;
pub mod debounce;
pub mod http;
pub mod render;
pub mod share;
pub mod wiki;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::enrich;
pub use controller::{MIN_LIVE_CHARS, SearchController, SearchState};
pub use debounce::Debouncer;
pub use http::{HttpResponse, HttpTransport, ReqwestTransport};
pub use render::{Card, CardAction, CardImage, DisplayModel, Renderer, strip_tags};
pub use share::{Clipboard, NativeShare, ShareData, ShareError, copy_article_link, share_article};
pub use wiki::{PageHandle, SearchResult, WikiClient, WikiConfig, WikiError};
