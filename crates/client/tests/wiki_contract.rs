//! Wikipedia API contract tests.
//!
//! These run the real reqwest transport against a local mock server and
//! verify the query parameters sent and the handling of each response shape.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wikisearch_client::{SearchController, SearchState, WikiClient, WikiConfig, WikiError, enrich};
use wikisearch_core::{HISTORY_KEY, HistoryStore, KeyValueStore, MemoryStore};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> WikiConfig {
    WikiConfig {
        endpoint: format!("{}/w/api.php", server.uri()),
        article_base: "https://en.wikipedia.org/".into(),
        timeout: Duration::from_secs(5),
        user_agent: "wikisearch-test/0.1".into(),
    }
}

#[tokio::test]
async fn test_search_sends_expected_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "query"))
        .and(query_param("list", "search"))
        .and(query_param("srlimit", "20"))
        .and(query_param("format", "json"))
        .and(query_param("origin", "*"))
        .and(query_param("srsearch", "black & white cat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "batchcomplete": "",
            "query": {
                "searchinfo": {"totalhits": 1},
                "search": [{"ns": 0, "title": "Black cat", "pageid": 1234, "snippet": "A <span>black</span> cat"}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = WikiClient::new(config(&server)).unwrap();
    let results = client.search("black & white cat").await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Black cat");
    assert_eq!(results[0].page_id, 1234);
}

#[tokio::test]
async fn test_search_server_error_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("list", "search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = WikiClient::new(config(&server)).unwrap();
    let err = client.search("cat").await.unwrap_err();

    assert!(matches!(err, WikiError::HttpError { status: 503 }));
    assert!(err.is_network());
}

#[tokio::test]
async fn test_search_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("list", "search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = WikiClient::new(config(&server)).unwrap();
    assert!(matches!(client.search("cat").await, Err(WikiError::Parse(_))));
}

#[tokio::test]
async fn test_thumbnail_lookup_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("prop", "pageimages"))
        .and(query_param("piprop", "thumbnail"))
        .and(query_param("pithumbsize", "150"))
        .and(query_param("titles", "Cat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": {"pages": {"6678": {
                "pageid": 6678, "ns": 0, "title": "Cat",
                "thumbnail": {"source": "https://upload.wikimedia.org/cat.jpg", "width": 150, "height": 120}
            }}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = WikiClient::new(config(&server)).unwrap();
    assert_eq!(client.fetch_thumbnail("Cat").await.as_deref(), Some("https://upload.wikimedia.org/cat.jpg"));
}

#[tokio::test]
async fn test_thumbnail_server_error_is_absorbed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("prop", "pageimages"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = WikiClient::new(config(&server)).unwrap();
    assert!(client.fetch_thumbnail("Cat").await.is_none());
}

#[tokio::test]
async fn test_random_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("list", "random"))
        .and(query_param("rnlimit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "batchcomplete": "",
            "query": {"random": [{"id": 99, "ns": 0, "title": "Okapi"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = WikiClient::new(config(&server)).unwrap();
    let page = client.fetch_random().await.unwrap();

    assert_eq!(page.title, "Okapi");
    assert_eq!(page.page_id, 99);
}

#[tokio::test]
async fn test_enrich_against_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("titles", "Cat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": {"pages": {"1": {"title": "Cat", "thumbnail": {"source": "https://img/cat.jpg"}}}}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("titles", "Dog"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = WikiClient::new(config(&server)).unwrap();
    let input = vec![
        wikisearch_client::SearchResult { title: "Dog".into(), snippet: String::new(), page_id: 2, thumbnail: None },
        wikisearch_client::SearchResult { title: "Cat".into(), snippet: String::new(), page_id: 1, thumbnail: None },
    ];

    let enriched = enrich(&client, input).await;

    assert_eq!(enriched[0].title, "Dog");
    assert!(enriched[0].thumbnail.is_none());
    assert_eq!(enriched[1].title, "Cat");
    assert_eq!(enriched[1].thumbnail.as_deref(), Some("https://img/cat.jpg"));
}

#[tokio::test]
async fn test_submit_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("srsearch", "cat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": {"search": [
                {"title": "Cat", "pageid": 6678, "snippet": "<b>Cat</b> is an animal"},
                {"title": "Cat (Unix)", "pageid": 1092, "snippet": "concatenate files"}
            ]}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("titles", "Cat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": {"pages": {"6678": {"title": "Cat", "thumbnail": {"source": "https://img/cat.jpg"}}}}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("titles", "Cat (Unix)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": {"pages": {"1092": {"title": "Cat (Unix)"}}}
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let history = HistoryStore::load(store.clone()).await;
    let controller = SearchController::new(WikiClient::new(config(&server)).unwrap(), history);

    let state = controller.submit("cat").await;

    let SearchState::Rendered(model) = &state else {
        panic!("expected rendered results, got {state:?}");
    };
    assert_eq!(model.header, "Found 2 results");
    assert_eq!(model.cards[0].snippet, "Cat is an animal");
    assert_eq!(model.cards[0].read_url, "https://en.wikipedia.org/?curid=6678");
    assert!(model.cards[0].image.is_some());
    assert!(model.cards[1].image.is_none());

    assert_eq!(store.get(HISTORY_KEY).await.unwrap().as_deref(), Some(r#"["cat"]"#));
}
