//! User statistics.
//!
//! Statistics are computed offline. Until they exist the server answers
//! `204 No Content`, which these wrappers raise as an [`ApiError`] rather than
//! returning an empty payload.

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::Client;
use crate::{
    error::{ApiError, Result},
    types::{
        DailyActivityPayload, DailyActivityResponse, Entity, ListeningActivityPayload,
        ListeningActivityResponse, StatsRange, UserEntityPayload, UserEntityResponse,
    },
    utils::require,
};

impl Client {
    /// Top artists, releases or recordings of a user.
    pub async fn user_entity(
        &self,
        user_name: &str,
        entity: Entity,
        range: StatsRange,
        offset: u64,
        count: Option<u32>,
    ) -> Result<UserEntityPayload> {
        let user_name = require(user_name, "username")?;
        let mut request = self
            .get(self.api_url(&format!("stats/user/{user_name}/{entity}s")))
            .query(&[("offset", offset.to_string()), ("range", range.to_string())]);
        if let Some(count) = count {
            request = request.query(&[("count", count)]);
        }

        let resp: UserEntityResponse = self.fetch_stats(request).await?;
        Ok(resp.payload)
    }

    pub async fn user_listening_activity(
        &self,
        user_name: &str,
        range: StatsRange,
    ) -> Result<ListeningActivityPayload> {
        let user_name = require(user_name, "username")?;
        let request = self
            .get(self.api_url(&format!("stats/user/{user_name}/listening-activity")))
            .query(&[("range", range.as_str())]);

        let resp: ListeningActivityResponse = self.fetch_stats(request).await?;
        Ok(resp.payload)
    }

    pub async fn user_daily_activity(
        &self,
        user_name: &str,
        range: StatsRange,
    ) -> Result<DailyActivityPayload> {
        let user_name = require(user_name, "username")?;
        let request = self
            .get(self.api_url(&format!("stats/user/{user_name}/daily-activity")))
            .query(&[("range", range.as_str())]);

        let resp: DailyActivityResponse = self.fetch_stats(request).await?;
        Ok(resp.payload)
    }

    /// Listen counts per country of the user's artists.
    pub async fn user_artist_map(
        &self,
        user_name: &str,
        range: StatsRange,
        force_recalculate: bool,
    ) -> Result<Value> {
        let user_name = require(user_name, "username")?;
        let request = self
            .get(self.api_url(&format!("stats/user/{user_name}/artist-map")))
            .query(&[
                ("range", range.as_str()),
                ("force_recalculate", if force_recalculate { "true" } else { "false" }),
            ]);

        self.fetch_stats(request).await
    }

    async fn fetch_stats<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = self.fetch(request).await?;
        if resp.status() == StatusCode::NO_CONTENT {
            return Err(ApiError::generic(resp).into());
        }
        Ok(resp.json()?)
    }
}
