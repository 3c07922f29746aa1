//! MediaWiki query construction.
//!
//! Each request type knows its fixed parameters; user-supplied text is passed
//! through as a parameter value and percent-encoded by [`url::Url`].

use url::Url;

use crate::wiki::WikiError;

/// Results per search (`srlimit`).
pub const SEARCH_LIMIT: u8 = 20;

/// Thumbnail edge length in pixels (`pithumbsize`).
pub const THUMBNAIL_SIZE: u16 = 150;

/// Pages per random lookup (`rnlimit`).
pub const RANDOM_COUNT: u8 = 1;

/// Parameters shared by every call.
const COMMON: &[(&str, &str)] = &[("action", "query"), ("format", "json"), ("origin", "*")];

/// Full-text search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub term: String,
}

impl SearchRequest {
    pub fn new(term: impl Into<String>) -> Self {
        Self { term: term.into() }
    }

    /// Reject terms the API would not accept.
    pub fn validate(&self) -> Result<(), WikiError> {
        if self.term.trim().is_empty() {
            return Err(WikiError::InvalidQuery("search term cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn url(&self, endpoint: &Url) -> Url {
        let limit = SEARCH_LIMIT.to_string();
        build(endpoint, &[("list", "search"), ("srlimit", &limit), ("srsearch", &self.term)])
    }
}

/// Thumbnail lookup for one exact page title.
#[derive(Debug, Clone)]
pub struct ThumbnailRequest {
    pub title: String,
}

impl ThumbnailRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }

    pub fn url(&self, endpoint: &Url) -> Url {
        let size = THUMBNAIL_SIZE.to_string();
        build(
            endpoint,
            &[("prop", "pageimages"), ("piprop", "thumbnail"), ("pithumbsize", &size), ("titles", &self.title)],
        )
    }
}

/// Random page lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRequest;

impl RandomRequest {
    pub fn url(&self, endpoint: &Url) -> Url {
        let count = RANDOM_COUNT.to_string();
        build(endpoint, &[("list", "random"), ("rnlimit", &count)])
    }
}

fn build(endpoint: &Url, params: &[(&str, &str)]) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut().extend_pairs(COMMON).extend_pairs(params);
    url
}
