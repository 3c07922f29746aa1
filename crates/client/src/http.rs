//! HTTP transport seam for the API client.
//!
//! [`WikiClient`](crate::WikiClient) never talks to reqwest directly; it goes
//! through [`HttpTransport`] so tests can substitute recorded responses.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, header};
use url::Url;

use crate::wiki::WikiError;

/// Status and body of a completed GET request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body bytes
    pub body: Bytes,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues read-only GET requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// GET `url` and return the raw response.
    ///
    /// Non-success statuses are returned as responses, not errors; only
    /// transport failures (DNS, connect, timeout, body read) are errors.
    async fn get(&self, url: &Url) -> Result<HttpResponse, WikiError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn get(&self, url: &Url) -> Result<HttpResponse, WikiError> {
        (**self).get(url).await
    }
}

/// Production transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Build a client with the given user agent and request timeout.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, WikiError> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| WikiError::Network(Arc::new(e)))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse, WikiError> {
        let start = Instant::now();

        let response = self
            .http
            .get(url.as_str())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;

        tracing::debug!("GET {} -> {} in {:?} ({} bytes)", url, status, start.elapsed(), body.len());

        Ok(HttpResponse { status, body })
    }
}
