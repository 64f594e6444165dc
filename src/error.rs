//! Error types shared by every ListenBrainz client operation.
//!
//! Two kinds of failure leave the client: errors raised through [`Error`]
//! and HTTP responses with a failing status that are handed back as values
//! (see [`crate::listenbrainz::Submission`]). [`ApiError`] is the bridge
//! between the two: it is raised whenever a wrapper decides a response status
//! is a failure and still carries the full response for inspection.

use reqwest::StatusCode;
use thiserror::Error;

use crate::listenbrainz::RawResponse;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Api(Box<ApiError>),

    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} missing")]
    MissingArgument(&'static str),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns the HTTP status when this error came from a server response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api(api) => Some(api.status),
            Error::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(api) => Some(api),
            _ => None,
        }
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Api(Box::new(err))
    }
}

/// A response the client refused to treat as a success.
///
/// `message` is the most specific description available: the server's JSON
/// `error` field, the raw body text, or `HTTP Error <status text>` when
/// neither could be extracted.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub status_text: String,
    pub message: String,
    pub response: RawResponse,
}

impl ApiError {
    /// Builds an error whose message is the generic `HTTP Error <status text>`.
    pub fn generic(response: RawResponse) -> Self {
        let status_text = response.status_text().to_owned();
        Self {
            status: response.status(),
            message: format!("HTTP Error {status_text}"),
            status_text,
            response,
        }
    }
}
