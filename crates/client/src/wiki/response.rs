//! MediaWiki response types and normalization.

use std::collections::HashMap;

use serde::Deserialize;

/// Raw response of `list=search`.
#[derive(Debug, Deserialize)]
pub struct SearchApiResponse {
    pub query: SearchQuery,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Vec<SearchHit>,
}

/// Individual hit from `list=search`.
#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub pageid: u64,
    #[serde(default)]
    pub snippet: String,
}

/// Raw response of `prop=pageimages`.
#[derive(Debug, Deserialize)]
pub struct ThumbnailApiResponse {
    #[serde(default)]
    pub query: Option<PagesQuery>,
}

#[derive(Debug, Deserialize)]
pub struct PagesQuery {
    #[serde(default)]
    pub pages: HashMap<String, PageInfo>,
}

/// One page entry. Unknown titles come back with a negative key and `missing`.
#[derive(Debug, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub source: String,
}

/// Raw response of `list=random`.
#[derive(Debug, Deserialize)]
pub struct RandomApiResponse {
    pub query: RandomQuery,
}

#[derive(Debug, Deserialize)]
pub struct RandomQuery {
    pub random: Vec<RandomPage>,
}

#[derive(Debug, Deserialize)]
pub struct RandomPage {
    pub id: u64,
    pub title: String,
}

/// Error envelope MediaWiki returns with a 200 status.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    #[serde(default)]
    pub info: String,
}

/// Normalized search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    /// Snippet as returned by the API; may contain highlight markup.
    pub snippet: String,
    pub page_id: u64,
    pub thumbnail: Option<String>,
}

/// A page identified by title and id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHandle {
    pub title: String,
    pub page_id: u64,
}

impl From<SearchHit> for SearchResult {
    fn from(hit: SearchHit) -> Self {
        SearchResult { title: hit.title, snippet: hit.snippet, page_id: hit.pageid, thumbnail: None }
    }
}

impl From<SearchApiResponse> for Vec<SearchResult> {
    /// Keep the API's relevance order.
    fn from(raw: SearchApiResponse) -> Self {
        raw.query.search.into_iter().map(SearchResult::from).collect()
    }
}

impl From<RandomPage> for PageHandle {
    fn from(page: RandomPage) -> Self {
        PageHandle { title: page.title, page_id: page.id }
    }
}

impl ThumbnailApiResponse {
    /// Thumbnail URL of the first returned page, if it has one.
    pub fn into_thumbnail(self) -> Option<String> {
        self.query?
            .pages
            .into_values()
            .next()
            .and_then(|page| page.thumbnail)
            .map(|thumb| thumb.source)
    }
}
