//! # ListenBrainz Integration Module
//!
//! An async client for the ListenBrainz web API, plus the handful of
//! MusicBrainz and CritiqueBrainz lookups the application needs.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI)
//!          ↓
//! ListenBrainz Client
//!     ├── Listen submission (batching, retry, splitting)
//!     ├── Listens, feed and import markers
//!     ├── Social graph (follow, similar users, recommendations)
//!     ├── Feedback, playlists, pins, statistics
//!     └── External lookups (MusicBrainz, CritiqueBrainz)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Request Pipeline
//!
//! Every wrapper follows the same path: build the URL from a base plus path
//! and query parameters, send one request, buffer the response into a
//! [`RawResponse`], run it through [`check_status`], then decode JSON. The
//! only exception is [`Client::submit_listens`], which returns the response of
//! the submission as a value and applies its own retry and split policy (see
//! [`submit`]).
//!
//! ## Authentication
//!
//! ListenBrainz calls carry `Authorization: Token <user token>`; CritiqueBrainz
//! uses an OAuth bearer token. No session state is kept between calls.

use std::time::Duration;

use reqwest::{RequestBuilder, header::AUTHORIZATION};
use serde::de::DeserializeOwned;

use crate::{config, error::Result, utils};

mod external;
mod feedback;
mod listens;
mod pins;
mod playlists;
mod response;
mod social;
mod stats;
pub mod submit;

pub use response::{RateLimit, RawResponse, check_status};
pub use submit::Submission;

/// Maximum serialized size of a listens payload, in bytes.
pub const MAX_LISTEN_SIZE: usize = 10_000;
/// Fixed wait before a submission is retried.
pub const RETRY_DELAY: Duration = Duration::from_millis(3000);
/// Retry budget of a submission when none is given.
pub const DEFAULT_RETRIES: u32 = 3;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_root: String,
    pub musicbrainz_root: String,
    pub critiquebrainz_root: String,
    pub max_listen_size: usize,
    pub retry_delay: Duration,
    pub default_retries: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_root: config::DEFAULT_API_URL.to_string(),
            musicbrainz_root: config::DEFAULT_MUSICBRAINZ_URL.to_string(),
            critiquebrainz_root: config::DEFAULT_CRITIQUEBRAINZ_URL.to_string(),
            max_listen_size: MAX_LISTEN_SIZE,
            retry_delay: RETRY_DELAY,
            default_retries: DEFAULT_RETRIES,
        }
    }
}

impl ClientConfig {
    /// Builds a configuration from the environment (see [`crate::config`]).
    pub fn from_env() -> Self {
        Self {
            api_root: config::api_url(),
            musicbrainz_root: config::musicbrainz_url(),
            critiquebrainz_root: config::critiquebrainz_url(),
            ..Self::default()
        }
    }

    pub fn with_api_root(mut self, root: impl Into<String>) -> Self {
        self.api_root = root.into();
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_max_listen_size(mut self, size: usize) -> Self {
        self.max_listen_size = size;
        self
    }
}

/// ListenBrainz API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
}

impl Client {
    /// Creates a client for the API at `api_root` with default settings.
    ///
    /// `api_root` may be given with or without the `/1` version suffix.
    pub fn new(api_root: &str) -> Self {
        Self::with_config(ClientConfig::default().with_api_root(api_root))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_http(reqwest::Client::new(), config)
    }

    pub fn with_http(http: reqwest::Client, mut config: ClientConfig) -> Self {
        config.api_root = utils::normalize_api_root(&config.api_root);
        config.musicbrainz_root = utils::trim_root(&config.musicbrainz_root);
        config.critiquebrainz_root = utils::trim_root(&config.critiquebrainz_root);
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The normalised API root, always ending in `/1`.
    pub fn api_root(&self) -> &str {
        &self.config.api_root
    }

    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_root, path.trim_start_matches('/'))
    }

    pub(crate) fn get(&self, url: impl AsRef<str>) -> RequestBuilder {
        self.http.get(url.as_ref())
    }

    pub(crate) fn post(&self, url: impl AsRef<str>) -> RequestBuilder {
        self.http.post(url.as_ref())
    }

    /// Sends the request and buffers the response without judging its status.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<RawResponse> {
        let response = request.send().await?;
        Ok(RawResponse::read(response).await?)
    }

    /// Sends the request and fails on any status outside `[200, 300)`.
    pub(crate) async fn fetch(&self, request: RequestBuilder) -> Result<RawResponse> {
        check_status(self.send(request).await?)
    }

    pub(crate) async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        Ok(self.fetch(request).await?.json()?)
    }
}

/// `Authorization: Token <token>` as ListenBrainz expects it.
pub(crate) trait TokenAuth {
    fn token_auth(self, token: &str) -> Self;
    fn maybe_token_auth(self, token: Option<&str>) -> Self;
}

impl TokenAuth for RequestBuilder {
    fn token_auth(self, token: &str) -> Self {
        self.header(AUTHORIZATION, format!("Token {token}"))
    }

    fn maybe_token_auth(self, token: Option<&str>) -> Self {
        match token.filter(|t| !t.is_empty()) {
            Some(token) => self.token_auth(token),
            None => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.max_listen_size, 10_000);
        assert_eq!(config.retry_delay, Duration::from_millis(3000));
        assert_eq!(config.default_retries, 3);
        assert_eq!(config.api_root, "https://api.listenbrainz.org");
    }

    #[test]
    fn test_client_normalises_roots() {
        let client = Client::with_config(ClientConfig {
            musicbrainz_root: "https://musicbrainz.org/ws/2/".to_string(),
            ..ClientConfig::default()
        });
        assert_eq!(client.api_root(), "https://api.listenbrainz.org/1");
        assert_eq!(client.config().musicbrainz_root, "https://musicbrainz.org/ws/2");
        assert_eq!(
            client.api_url("/submit-listens"),
            "https://api.listenbrainz.org/1/submit-listens"
        );
    }
}
