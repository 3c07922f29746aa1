//! Wikipedia (MediaWiki) API client.
//!
//! ### Calls
//!
//! - **Search**: `list=search`, 20 results, relevance order.
//! - **Thumbnail**: `prop=pageimages`, 150px, one exact title.
//! - **Random**: `list=random`, one page.
//!
//! All calls are read-only GETs against one endpoint. Thumbnail lookups never
//! fail: any problem, including transport errors, yields `None` so a missing
//! image cannot block the result it belongs to.

pub mod error;
pub mod request;
pub mod response;

pub use error::WikiError;
pub use request::{RANDOM_COUNT, RandomRequest, SEARCH_LIMIT, SearchRequest, THUMBNAIL_SIZE, ThumbnailRequest};
pub use response::{PageHandle, SearchResult};

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use url::Url;
use wikisearch_core::AppConfig;

use crate::http::{HttpTransport, ReqwestTransport};

/// Default API endpoint.
const DEFAULT_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

/// Default base for external read links.
const DEFAULT_ARTICLE_BASE: &str = "https://en.wikipedia.org/";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "wikisearch/0.1";

/// Wikipedia client configuration.
#[derive(Debug, Clone)]
pub struct WikiConfig {
    /// API endpoint (default: https://en.wikipedia.org/w/api.php).
    pub endpoint: String,
    /// Read link base; `?curid=<page id>` is appended.
    pub article_base: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string (default: wikisearch/0.x).
    pub user_agent: String,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            article_base: DEFAULT_ARTICLE_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&AppConfig> for WikiConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            endpoint: config.api_endpoint(),
            article_base: config.article_base(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// External read link for a page id.
pub fn article_url(article_base: &str, page_id: u64) -> String {
    format!("{article_base}?curid={page_id}")
}

/// Wikipedia API client.
#[derive(Debug, Clone)]
pub struct WikiClient<T = ReqwestTransport> {
    transport: T,
    endpoint: Url,
    article_base: String,
}

impl WikiClient<ReqwestTransport> {
    /// Create a client that talks to the network through reqwest.
    pub fn new(config: WikiConfig) -> Result<Self, WikiError> {
        let transport = ReqwestTransport::new(&config.user_agent, config.timeout)?;
        Self::with_transport(&config, transport)
    }
}

impl<T: HttpTransport> WikiClient<T> {
    /// Create a client over an arbitrary transport.
    pub fn with_transport(config: &WikiConfig, transport: T) -> Result<Self, WikiError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| WikiError::InvalidEndpoint(e.to_string()))?;
        Ok(Self { transport, endpoint, article_base: config.article_base.clone() })
    }

    /// External read link for `page_id`.
    pub fn article_url(&self, page_id: u64) -> String {
        article_url(&self.article_base, page_id)
    }

    pub fn article_base(&self) -> &str {
        &self.article_base
    }

    /// Full-text search.
    ///
    /// Zero hits is `Ok(vec![])`; a non-success status is `WikiError::HttpError`.
    pub async fn search(&self, term: &str) -> Result<Vec<SearchResult>, WikiError> {
        let req = SearchRequest::new(term);
        req.validate()?;

        let start = Instant::now();
        tracing::debug!("searching Wikipedia: query={}", term);

        let raw: response::SearchApiResponse = self.get_json(&req.url(&self.endpoint)).await?;
        let results: Vec<SearchResult> = raw.into();

        tracing::debug!("search completed in {:?}, {} results", start.elapsed(), results.len());

        Ok(results)
    }

    /// Thumbnail URL for the page titled exactly `title`.
    pub async fn fetch_thumbnail(&self, title: &str) -> Option<String> {
        let url = ThumbnailRequest::new(title).url(&self.endpoint);

        match self.get_json::<response::ThumbnailApiResponse>(&url).await {
            Ok(raw) => raw.into_thumbnail(),
            Err(e) => {
                tracing::debug!(title, error = %e, "thumbnail unavailable");
                None
            }
        }
    }

    /// One randomly selected page.
    pub async fn fetch_random(&self) -> Result<PageHandle, WikiError> {
        let raw: response::RandomApiResponse = self.get_json(&RandomRequest.url(&self.endpoint)).await?;

        raw.query
            .random
            .into_iter()
            .next()
            .map(PageHandle::from)
            .ok_or_else(|| WikiError::Parse("random lookup returned no pages".to_string()))
    }

    async fn get_json<R: DeserializeOwned>(&self, url: &Url) -> Result<R, WikiError> {
        let response = self.transport.get(url).await?;

        if !response.is_success() {
            tracing::debug!("Wikipedia API response status: {}", response.status);
            return Err(WikiError::HttpError { status: response.status });
        }

        serde_json::from_slice(&response.body).map_err(|e| {
            match serde_json::from_slice::<response::ApiErrorResponse>(&response.body) {
                Ok(api) => WikiError::Api { code: api.error.code, info: api.error.info },
                Err(_) => WikiError::Parse(e.to_string()),
            }
        })
    }
}
