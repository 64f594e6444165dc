use serde_json::{Value, json};

use super::{Client, TokenAuth};
use crate::{
    error::{Error, Result},
    types::{
        CoverArt, FeedResponse, LatestImport, Listen, ListenCountResponse, ListensResponse,
        TimelineEvent, TokenValidation,
    },
    utils::require,
};

/// Builds the `min_ts` / `max_ts` / `count` query shared by listen and feed
/// endpoints. Zero values are treated as absent.
fn range_query(min_ts: Option<i64>, max_ts: Option<i64>, count: Option<u32>) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(max_ts) = max_ts.filter(|&ts| ts != 0) {
        query.push(("max_ts", max_ts.to_string()));
    }
    if let Some(min_ts) = min_ts.filter(|&ts| ts != 0) {
        query.push(("min_ts", min_ts.to_string()));
    }
    if let Some(count) = count.filter(|&c| c != 0) {
        query.push(("count", count.to_string()));
    }
    query
}

impl Client {
    /// Fetches the most recent listens of several users at once.
    pub async fn recent_listens_for_users(
        &self,
        user_names: &[&str],
        limit: Option<u32>,
    ) -> Result<Vec<Listen>> {
        let url = self.api_url(&format!("users/{}/recent-listens", user_names.join(",")));
        let mut request = self.get(url);
        if let Some(limit) = limit.filter(|&l| l != 0) {
            request = request.query(&[("limit", limit)]);
        }

        let resp: ListensResponse = self.fetch_json(request).await?;
        Ok(resp.payload.listens)
    }

    /// Fetches a page of a user's listens.
    ///
    /// `min_ts` and `max_ts` page forwards and backwards respectively and
    /// cannot be combined.
    pub async fn listens_for_user(
        &self,
        user_name: &str,
        min_ts: Option<i64>,
        max_ts: Option<i64>,
        count: Option<u32>,
    ) -> Result<Vec<Listen>> {
        let user_name = require(user_name, "username")?;
        if min_ts.is_some_and(|ts| ts != 0) && max_ts.is_some_and(|ts| ts != 0) {
            return Err(Error::InvalidArgument(
                "cannot have both min_ts and max_ts defined at the same time".to_string(),
            ));
        }

        let request = self
            .get(self.api_url(&format!("user/{user_name}/listens")))
            .query(&range_query(min_ts, max_ts, count));

        let resp: ListensResponse = self.fetch_json(request).await?;
        Ok(resp.payload.listens)
    }

    /// Fetches the timeline events visible to a user.
    pub async fn feed_for_user(
        &self,
        user_name: &str,
        token: &str,
        min_ts: Option<i64>,
        max_ts: Option<i64>,
        count: Option<u32>,
    ) -> Result<Vec<TimelineEvent>> {
        let user_name = require(user_name, "username")?;
        let token = require(token, "user token")?;

        let request = self
            .get(self.api_url(&format!("user/{user_name}/feed/events")))
            .query(&range_query(min_ts, max_ts, count))
            .token_auth(token);

        let resp: FeedResponse = self.fetch_json(request).await?;
        Ok(resp.payload.events)
    }

    pub async fn user_listen_count(&self, user_name: &str) -> Result<u64> {
        let user_name = require(user_name, "username")?;
        let request = self.get(self.api_url(&format!("user/{user_name}/listen-count")));

        let resp: ListenCountResponse = self.fetch_json(request).await?;
        Ok(resp.payload.count)
    }

    /// Deletes a single listen, identified by its recording MSID and timestamp.
    pub async fn delete_listen(
        &self,
        token: &str,
        recording_msid: &str,
        listened_at: i64,
    ) -> Result<u16> {
        let request = self
            .post(self.api_url("delete-listen"))
            .token_auth(token)
            .json(&json!({
                "listened_at": listened_at,
                "recording_msid": recording_msid,
            }));

        Ok(self.fetch(request).await?.status().as_u16())
    }

    /// Returns the timestamp at which the last import from `service` stopped.
    pub async fn latest_import(&self, user_name: &str, service: &str) -> Result<i64> {
        let request = self
            .get(self.api_url("latest-import"))
            .query(&[("user_name", user_name), ("service", service)]);

        let resp: LatestImport = self.fetch_json(request).await?;
        Ok(resp.latest_import)
    }

    /// Records where an import from `service` stopped, so the next one can
    /// resume from there.
    pub async fn set_latest_import(&self, token: &str, service: &str, ts: i64) -> Result<u16> {
        let request = self
            .post(self.api_url("latest-import"))
            .token_auth(token)
            .json(&json!({ "ts": ts, "service": service }));

        Ok(self.fetch(request).await?.status().as_u16())
    }

    /// Checks a user token and returns the user it belongs to.
    pub async fn validate_token(&self, token: &str) -> Result<TokenValidation> {
        let token = require(token, "user token")?;
        let request = self.get(self.api_url("validate-token")).token_auth(token);
        self.fetch_json(request).await
    }

    /// Looks up cover art; `None` unless the server answers with 200.
    pub async fn cover_art(
        &self,
        release_mbid: &str,
        recording_msid: &str,
    ) -> Result<Option<String>> {
        let request = self.get(self.api_url("get-cover-art/")).query(&[
            ("release_mbid", release_mbid),
            ("recording_msid", recording_msid),
        ]);

        let resp = self.fetch(request).await?;
        if resp.status().as_u16() != 200 {
            return Ok(None);
        }
        Ok(resp.json::<CoverArt>()?.image_url)
    }

    /// Finds releases whose cover art is close to a colour (`rrggbb`).
    pub async fn releases_from_color(&self, color: &str, count: Option<u32>) -> Result<Value> {
        let color = color.trim_start_matches('#');
        let mut request = self.get(self.api_url(&format!("color/{color}")));
        if let Some(count) = count {
            request = request.query(&[("count", count)]);
        }
        self.fetch_json(request).await
    }
}
