use crate::api::types::{SearchResponse, TopicDocument, UserProfile};
use crate::error::{Result, ScoopViewError};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Remote collaborator serving topics, search results and profiles.
///
/// Implementations block until the response is available. Callers that need
/// to stay responsive run lookups on a worker thread.
pub trait TopicApi: Send + Sync {
    /// `GET /api/search/topic/{query}`
    ///
    /// # Errors
    ///
    /// `RemoteUnavailable` on transport failure or non-OK status, `Decode`
    /// when the body is not the expected JSON.
    fn search_topics(&self, query: &str) -> Result<SearchResponse>;

    /// `GET /api/topic/{url_name}`
    ///
    /// # Errors
    ///
    /// `NotFound` on any non-OK status, `RemoteUnavailable` on transport
    /// failure, `Decode` on a malformed body.
    fn get_topic(&self, url_name: &str) -> Result<TopicDocument>;

    /// `GET /api/user/{short_name}`
    ///
    /// # Errors
    ///
    /// Same mapping as [`TopicApi::get_topic`].
    fn get_user(&self, short_name: &str) -> Result<UserProfile>;
}

pub fn search_path(query: &str) -> String {
    format!("/api/search/topic/{}", urlencoding::encode(query))
}

pub fn topic_path(url_name: &str) -> String {
    format!("/api/topic/{}", urlencoding::encode(url_name))
}

pub fn user_path(short_name: &str) -> String {
    format!("/api/user/{}", urlencoding::encode(short_name))
}

/// How a non-OK status is reported for an endpoint
#[derive(Clone, Copy)]
enum StatusMapping {
    Unavailable,
    NotFound,
}

/// Blocking HTTP implementation of [`TopicApi`]
pub struct HttpApi {
    base: String,
    http_client: reqwest::blocking::Client,
}

impl HttpApi {
    /// Create a client rooted at `base` (for example `http://127.0.0.1:8080`).
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is not http(s) or the HTTP client
    /// cannot be initialized.
    pub fn new(base: &str, timeout: Duration) -> Result<Self> {
        let parsed = reqwest::Url::parse(base)
            .map_err(|e| ScoopViewError::InvalidBaseUrl(base.to_string(), e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScoopViewError::InvalidBaseUrl(
                base.to_string(),
                "scheme must be http or https".to_string(),
            ));
        }

        let http_client = reqwest::blocking::Client::builder()
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .timeout(timeout)
            .user_agent(format!("scoopview {}", crate::VERSION))
            .build()
            .map_err(|e| ScoopViewError::RemoteUnavailable(e.to_string()))?;

        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn fetch_json<T: DeserializeOwned>(&self, path: &str, mapping: StatusMapping) -> Result<T> {
        let url = format!("{}{}", self.base, path);
        debug!(%url, "GET");

        let response = self.http_client.get(&url).send().map_err(|e| {
            warn!(%path, error = %e, "request failed");
            ScoopViewError::from_http(path, &e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%path, status = status.as_u16(), "non-OK response");
            return Err(match mapping {
                StatusMapping::NotFound => ScoopViewError::NotFound(path.to_string()),
                StatusMapping::Unavailable => ScoopViewError::from_status(path, status),
            });
        }

        let body = response
            .text()
            .map_err(|e| ScoopViewError::from_http(path, &e))?;
        serde_json::from_str(&body).map_err(|e| ScoopViewError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

impl TopicApi for HttpApi {
    fn search_topics(&self, query: &str) -> Result<SearchResponse> {
        self.fetch_json(&search_path(query), StatusMapping::Unavailable)
    }

    fn get_topic(&self, url_name: &str) -> Result<TopicDocument> {
        self.fetch_json(&topic_path(url_name), StatusMapping::NotFound)
    }

    fn get_user(&self, short_name: &str) -> Result<UserProfile> {
        self.fetch_json(&user_path(short_name), StatusMapping::NotFound)
    }
}
