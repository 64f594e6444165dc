use reqwest::{
    StatusCode,
    header::{CONTENT_TYPE, HeaderMap},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, Error};

/// A fully buffered HTTP response.
///
/// The body is read eagerly so the response can be inspected more than once,
/// stored inside an [`ApiError`], or handed back to the caller after the
/// connection is gone.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

/// Rate limit state reported by the `X-RateLimit-*` headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    /// Seconds until the window resets.
    pub reset_in: u64,
}

impl RawResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Reads the whole body of a `reqwest` response.
    pub async fn read(response: reqwest::Response) -> Result<Self, reqwest::Error> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        Ok(Self::new(status, headers, body))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The canonical reason phrase of the status, e.g. `Not Found`.
    pub fn status_text(&self) -> &str {
        self.status.canonical_reason().unwrap_or("")
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The body as UTF-8 text, `None` if it is not valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    pub fn rate_limit(&self) -> Option<RateLimit> {
        let header = |name: &str| {
            self.headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
        };

        Some(RateLimit {
            limit: header("x-ratelimit-limit").unwrap_or_default(),
            remaining: header("x-ratelimit-remaining")?,
            reset_in: header("x-ratelimit-reset-in")?,
        })
    }
}

/// Passes responses with a status in `[200, 300)` through unchanged.
///
/// Any other status becomes an [`Error::Api`] that keeps the status, its
/// reason phrase and the response itself. The message is refined from the
/// body when possible: the `error` field of a JSON body, otherwise the raw
/// text. If that extraction fails the generic `HTTP Error <status text>`
/// message is used; the error is raised either way.
pub fn check_status(response: RawResponse) -> Result<RawResponse, Error> {
    if response.is_success() {
        return Ok(response);
    }

    let message = error_message(&response);
    let mut err = ApiError::generic(response);
    if let Some(message) = message {
        err.message = message;
    }
    Err(err.into())
}

fn error_message(response: &RawResponse) -> Option<String> {
    let is_json = response
        .content_type()
        .is_some_and(|ct| ct.contains("application/json"));

    if is_json {
        let body: Value = response.json().ok()?;
        body.get("error")?.as_str().map(str::to_owned)
    } else {
        response
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    fn response(status: u16, content_type: Option<&str>, body: &str) -> RawResponse {
        let mut headers = HeaderMap::new();
        if let Some(ct) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_str(ct).unwrap());
        }
        RawResponse::new(StatusCode::from_u16(status).unwrap(), headers, body)
    }

    fn api_error(resp: RawResponse) -> ApiError {
        match check_status(resp) {
            Err(Error::Api(e)) => *e,
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn test_success_range_passes() {
        for status in [200, 201, 204, 299] {
            assert!(check_status(response(status, None, "")).is_ok());
        }
    }

    #[test]
    fn test_json_error_field() {
        let err = api_error(response(
            400,
            Some("application/json; charset=utf-8"),
            r#"{"code": 400, "error": "Invalid listen type"}"#,
        ));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.status_text, "Bad Request");
        assert_eq!(err.message, "Invalid listen type");
        assert_eq!(err.response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_text_body() {
        let err = api_error(response(502, Some("text/html"), "upstream went away"));
        assert_eq!(err.message, "upstream went away");
        assert_eq!(err.status_text, "Bad Gateway");
    }

    #[test]
    fn test_broken_json_falls_back_to_generic() {
        let err = api_error(response(500, Some("application/json"), "{not json"));
        assert_eq!(err.message, "HTTP Error Internal Server Error");

        let err = api_error(response(404, Some("application/json"), r#"{"code": 404}"#));
        assert_eq!(err.message, "HTTP Error Not Found");
    }

    #[test]
    fn test_rate_limit_headers() {
        let mut resp = response(200, None, "");
        assert_eq!(resp.rate_limit(), None);

        resp.headers.insert("x-ratelimit-limit", HeaderValue::from_static("30"));
        resp.headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        resp.headers.insert("x-ratelimit-reset-in", HeaderValue::from_static("7"));
        assert_eq!(
            resp.rate_limit(),
            Some(RateLimit {
                limit: 30,
                remaining: 0,
                reset_in: 7
            })
        );
    }
}
