//! Listen submission with retry and payload splitting.
//!
//! A submission walks through these states:
//!
//! ```text
//! START ─┬─ SIZE_OK ──────→ SEND ─┬─ DONE (any status but 429)
//!        │                        ├─ RATE_LIMITED ─→ WAIT ─→ START (budget - 1)
//!        │                        ├─ TRANSPORT_FAIL → WAIT ─→ START (budget - 1)
//!        │                        └─ EXHAUSTED ────→ DONE (429 value / raised error)
//!        └─ SIZE_EXCEEDED → SPLIT → FIRST HALF → SECOND HALF → DONE
//!                                      └─ raised ─┬─ START on the whole batch (budget - 1)
//!                                                 └─ EXHAUSTED → DONE (error as value)
//! ```
//!
//! The budget travels by value: a retry gets `budget - 1`, and both halves of
//! a split start from the budget of their parent. Across a split the total
//! number of requests is therefore not bounded by the nominal budget.
//!
//! Failures leave through two channels. HTTP statuses (including an
//! exhausted 429) come back as [`Submission::Completed`]; the caller inspects
//! the status. A transport failure on a single request is raised as `Err`
//! once the budget is spent, while a split that runs out of budget hands its
//! error back as [`Submission::Abandoned`] instead of raising it.

use futures::future::{BoxFuture, FutureExt};
use reqwest::StatusCode;
use tokio::time::sleep;

use super::{Client, RawResponse, TokenAuth, check_status};
use crate::{
    error::{Error, Result},
    types::{Listen, ListenType, SubmitListens},
    utils, warning,
};

/// Terminal outcome of a submission that was not raised as an error.
#[derive(Debug)]
pub enum Submission {
    /// The server answered. The status may be anything, including 4xx/5xx
    /// and an exhausted 429.
    Completed(RawResponse),
    /// A split submission failed and had no retries left.
    Abandoned(Error),
}

impl Submission {
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            Submission::Completed(resp) => Some(resp),
            Submission::Abandoned(_) => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(RawResponse::status)
    }

    pub fn is_success(&self) -> bool {
        self.response().is_some_and(RawResponse::is_success)
    }

    /// Folds both channels into one `Result`, applying [`check_status`] to
    /// completed submissions.
    pub fn into_result(self) -> Result<RawResponse> {
        match self {
            Submission::Completed(resp) => check_status(resp),
            Submission::Abandoned(e) => Err(e),
        }
    }
}

impl Client {
    /// Submits listens with the configured default retry budget.
    ///
    /// See [`Client::submit_listens_with_retries`].
    pub async fn submit_listens(
        &self,
        token: &str,
        listen_type: ListenType,
        listens: &[Listen],
    ) -> Result<Submission> {
        self.submit_listens_with_retries(token, listen_type, listens, self.config.default_retries)
            .await
    }

    /// Submits listens to `POST /submit-listens`.
    ///
    /// # Behaviour
    ///
    /// - `playing_now` listens are sent without `listened_at`; `listens` itself
    ///   is left untouched.
    /// - A payload whose JSON array exceeds `max_listen_size` bytes is split in
    ///   two halves that are submitted one after the other, in order.
    /// - Only 429 responses and transport failures are retried, after a fixed
    ///   `retry_delay`. Any other status is returned immediately.
    ///
    /// # Returns
    ///
    /// - `Ok(Submission::Completed(resp))` - the response of the last request
    ///   (for a split, the second half's)
    /// - `Ok(Submission::Abandoned(err))` - a split ran out of retries
    /// - `Err(Error::Transport(_))` - a single request could not be delivered
    ///   and no retries are left
    pub async fn submit_listens_with_retries(
        &self,
        token: &str,
        listen_type: ListenType,
        listens: &[Listen],
        retries: u32,
    ) -> Result<Submission> {
        self.submit(token, listen_type, listens, retries).await
    }

    fn submit<'a>(
        &'a self,
        token: &'a str,
        listen_type: ListenType,
        listens: &'a [Listen],
        retries: u32,
    ) -> BoxFuture<'a, Result<Submission>> {
        async move {
            let payload = utils::prepare_payload(listen_type, listens);
            let size = utils::payload_size(&payload)?;

            // a single oversized listen cannot be split any further
            if size <= self.config.max_listen_size || listens.len() < 2 {
                self.submit_once(token, listen_type, listens, &payload, retries)
                    .await
            } else {
                self.submit_split(token, listen_type, listens, retries).await
            }
        }
        .boxed()
    }

    async fn submit_once(
        &self,
        token: &str,
        listen_type: ListenType,
        listens: &[Listen],
        payload: &[Listen],
        retries: u32,
    ) -> Result<Submission> {
        let body = SubmitListens {
            listen_type,
            payload,
        };
        let request = self
            .post(self.api_url("submit-listens"))
            .token_auth(token)
            .json(&body);

        match self.send(request).await {
            Ok(resp) if resp.status() != StatusCode::TOO_MANY_REQUESTS || retries == 0 => {
                Ok(Submission::Completed(resp))
            }
            Ok(_) => {
                warning!(
                    "Rate limited while submitting {} listens. Retrying in {}ms ({} left).",
                    listens.len(),
                    self.config.retry_delay.as_millis(),
                    retries
                );
                self.retry_after_delay(token, listen_type, listens, retries)
                    .await
            }
            Err(e) if retries == 0 => Err(e),
            Err(e) => {
                warning!(
                    "Failed to submit {} listens: {}. Retrying in {}ms ({} left).",
                    listens.len(),
                    e,
                    self.config.retry_delay.as_millis(),
                    retries
                );
                self.retry_after_delay(token, listen_type, listens, retries)
                    .await
            }
        }
    }

    async fn retry_after_delay(
        &self,
        token: &str,
        listen_type: ListenType,
        listens: &[Listen],
        retries: u32,
    ) -> Result<Submission> {
        sleep(self.config.retry_delay).await;
        self.submit(token, listen_type, listens, retries - 1).await
    }

    async fn submit_split(
        &self,
        token: &str,
        listen_type: ListenType,
        listens: &[Listen],
        retries: u32,
    ) -> Result<Submission> {
        let (first, second) = utils::split_batch(listens);

        let halves = async {
            // only a raised failure of the first half matters
            let _ = self.submit(token, listen_type, first, retries).await?;
            self.submit(token, listen_type, second, retries).await
        };

        match halves.await {
            Ok(outcome) => Ok(outcome),
            Err(e) if retries > 0 => {
                warning!(
                    "Split submission of {} listens failed: {}. Resubmitting ({} left).",
                    listens.len(),
                    e,
                    retries
                );
                self.submit(token, listen_type, listens, retries - 1).await
            }
            Err(e) => Ok(Submission::Abandoned(e)),
        }
    }
}
