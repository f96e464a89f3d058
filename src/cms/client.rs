//! HTTP client for the content repository query API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::error::FetchError;
use super::record::{ContentRecord, PageResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const RETRIES: u32 = 2;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Capability to fetch one page of results from an opaque cursor URL.
///
/// The pagination accumulator consumes this seam instead of the concrete
/// client, so it can be driven by an in-memory fake in tests.
#[async_trait]
pub trait FetchPage: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<PageResponse, FetchError>;
}

/// Read-only client for the content repository.
///
/// Queries are plain GETs; an optional bearer token is attached when the
/// repository requires one. Transport errors are retried a bounded number
/// of times, non-success statuses map to [`FetchError`].
pub struct ContentClient {
    http: Client,
    api_url: String,
    token: Option<String>,
}

impl ContentClient {
    pub fn new(api_url: &str, token: Option<String>) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Query records of one content type, newest first, one page at a time.
    pub async fn get_by_type(
        &self,
        type_tag: &str,
        page_size: usize,
    ) -> Result<PageResponse, FetchError> {
        let url = format!(
            "{}/documents?type={}&page_size={}",
            self.api_url, type_tag, page_size
        );
        self.get_json(&url).await
    }

    /// Fetch a single record by its unique identifier.
    pub async fn get_by_uid(
        &self,
        type_tag: &str,
        uid: &str,
    ) -> Result<ContentRecord, FetchError> {
        let url = format!("{}/documents/{}/{}", self.api_url, type_tag, uid);
        match self.get_json(&url).await {
            Err(FetchError::Status { code, .. }) if code == StatusCode::NOT_FOUND => {
                Err(FetchError::NotFound {
                    uid: uid.to_string(),
                })
            }
            other => other,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self.get_with_retry(url).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            return Err(FetchError::Status { code: status, body });
        }
        response
            .json::<T>()
            .await
            .map_err(|err| FetchError::Decode(err.to_string()))
    }

    async fn get_with_retry(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let mut attempt = 0;
        loop {
            let mut request = self.http.get(url);
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }
            match request.send().await {
                Ok(response) => return Ok(response),
                Err(err) if attempt < RETRIES => {
                    attempt += 1;
                    tracing::warn!(
                        "request to {} failed ({}), retry {}/{}",
                        url,
                        err,
                        attempt,
                        RETRIES
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(err) => return Err(FetchError::Http(err)),
            }
        }
    }
}

#[async_trait]
impl FetchPage for ContentClient {
    /// GET the opaque `next_page` URL exactly as the repository handed it
    /// back; the response body is the same page envelope as type queries.
    async fn fetch_page(&self, url: &str) -> Result<PageResponse, FetchError> {
        self.get_json(url).await
    }
}
