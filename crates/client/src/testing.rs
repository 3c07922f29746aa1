//! Recorded-response transport for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::json;
use url::Url;

use crate::http::{HttpResponse, HttpTransport};
use crate::wiki::WikiError;

#[derive(Debug, Clone)]
enum Reply {
    Json { status: u16, body: String },
    Timeout,
}

#[derive(Debug, Clone)]
struct Route {
    reply: Reply,
    delay: Duration,
}

impl Route {
    fn ok(body: String) -> Self {
        Self { reply: Reply::Json { status: 200, body }, delay: Duration::ZERO }
    }
}

/// Routes requests by MediaWiki call type and its user-supplied parameter.
///
/// Unknown thumbnail titles answer like MediaWiki does for a missing page;
/// unknown searches and an unset random route answer 404.
#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    searches: HashMap<String, Route>,
    thumbnails: HashMap<String, Route>,
    random: Option<Route>,
    requests: Mutex<Vec<Url>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn search(mut self, term: &str, body: String) -> Self {
        self.searches.insert(term.to_string(), Route::ok(body));
        self
    }

    pub(crate) fn search_delayed(mut self, term: &str, body: String, delay: Duration) -> Self {
        self.searches.insert(term.to_string(), Route { delay, ..Route::ok(body) });
        self
    }

    pub(crate) fn search_status(mut self, term: &str, status: u16) -> Self {
        let reply = Reply::Json { status, body: String::new() };
        self.searches.insert(term.to_string(), Route { reply, delay: Duration::ZERO });
        self
    }

    pub(crate) fn search_timeout(mut self, term: &str) -> Self {
        self.searches.insert(term.to_string(), Route { reply: Reply::Timeout, delay: Duration::ZERO });
        self
    }

    pub(crate) fn thumbnail(mut self, title: &str, body: String) -> Self {
        self.thumbnails.insert(title.to_string(), Route::ok(body));
        self
    }

    pub(crate) fn thumbnail_delayed(mut self, title: &str, body: String, delay: Duration) -> Self {
        self.thumbnails.insert(title.to_string(), Route { delay, ..Route::ok(body) });
        self
    }

    pub(crate) fn thumbnail_status(mut self, title: &str, status: u16) -> Self {
        let reply = Reply::Json { status, body: String::new() };
        self.thumbnails.insert(title.to_string(), Route { reply, delay: Duration::ZERO });
        self
    }

    pub(crate) fn thumbnail_timeout(mut self, title: &str) -> Self {
        self.thumbnails.insert(title.to_string(), Route { reply: Reply::Timeout, delay: Duration::ZERO });
        self
    }

    pub(crate) fn random(mut self, body: String) -> Self {
        self.random = Some(Route::ok(body));
        self
    }

    pub(crate) fn random_status(mut self, status: u16) -> Self {
        self.random = Some(Route { reply: Reply::Json { status, body: String::new() }, delay: Duration::ZERO });
        self
    }

    /// Every URL requested so far, in order.
    pub(crate) fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }

    /// Search terms requested so far, in order.
    pub(crate) fn searched_terms(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|url| url.query_pairs().find(|(k, _)| k == "srsearch").map(|(_, v)| v.into_owned()))
            .collect()
    }

    fn route(&self, url: &Url) -> Option<Route> {
        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

        if params.get("list").map(String::as_str) == Some("search") {
            return self.searches.get(params.get("srsearch")?).cloned();
        }
        if params.get("prop").map(String::as_str) == Some("pageimages") {
            let title = params.get("titles")?;
            return Some(
                self.thumbnails
                    .get(title)
                    .cloned()
                    .unwrap_or_else(|| Route::ok(missing_page_body(title))),
            );
        }
        if params.get("list").map(String::as_str) == Some("random") {
            return self.random.clone();
        }
        None
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse, WikiError> {
        self.requests.lock().unwrap().push(url.clone());

        let Some(route) = self.route(url) else {
            return Ok(HttpResponse { status: 404, body: Bytes::new() });
        };

        if !route.delay.is_zero() {
            tokio::time::sleep(route.delay).await;
        }

        match route.reply {
            Reply::Json { status, body } => Ok(HttpResponse { status, body: Bytes::from(body) }),
            Reply::Timeout => Err(WikiError::Timeout),
        }
    }
}

/// `list=search` body with `(title, pageid, snippet)` hits.
pub(crate) fn search_body(hits: &[(&str, u64, &str)]) -> String {
    let search: Vec<_> = hits
        .iter()
        .map(|(title, pageid, snippet)| json!({"ns": 0, "title": title, "pageid": pageid, "snippet": snippet}))
        .collect();
    json!({"batchcomplete": "", "query": {"searchinfo": {"totalhits": hits.len()}, "search": search}}).to_string()
}

/// `prop=pageimages` body for an existing page.
pub(crate) fn thumbnail_body(title: &str, source: Option<&str>) -> String {
    let mut page = json!({"pageid": 1, "ns": 0, "title": title});
    if let Some(source) = source {
        page["thumbnail"] = json!({"source": source, "width": 150, "height": 150});
    }
    json!({"batchcomplete": "", "query": {"pages": {"1": page}}}).to_string()
}

/// `list=random` body with one page.
pub(crate) fn random_body(id: u64, title: &str) -> String {
    json!({"batchcomplete": "", "query": {"random": [{"id": id, "ns": 0, "title": title}]}}).to_string()
}

fn missing_page_body(title: &str) -> String {
    json!({"batchcomplete": "", "query": {"pages": {"-1": {"ns": 0, "title": title, "missing": ""}}}}).to_string()
}
