use reqwest::StatusCode;
use serde_json::json;

use super::{Client, TokenAuth};
use crate::{
    error::Result,
    types::{Followers, Following, SimilarUser, SimilarUsersResponse, TrackRecommendation},
    utils::require,
};

impl Client {
    /// Follows `user_name` as the owner of `token`.
    ///
    /// The status is returned as-is, without [`super::check_status`], so the
    /// caller can tell "already following" apart from real failures.
    pub async fn follow_user(&self, user_name: &str, token: &str) -> Result<StatusCode> {
        self.follow_action(user_name, token, "follow").await
    }

    pub async fn unfollow_user(&self, user_name: &str, token: &str) -> Result<StatusCode> {
        self.follow_action(user_name, token, "unfollow").await
    }

    async fn follow_action(&self, user_name: &str, token: &str, action: &str) -> Result<StatusCode> {
        let user_name = require(user_name, "username")?;
        let token = require(token, "user token")?;

        let request = self
            .post(self.api_url(&format!("user/{user_name}/{action}")))
            .token_auth(token);

        Ok(self.send(request).await?.status())
    }

    pub async fn followers_of_user(&self, user_name: &str) -> Result<Vec<String>> {
        let user_name = require(user_name, "username")?;
        let request = self.get(self.api_url(&format!("user/{user_name}/followers")));

        let resp: Followers = self.fetch_json(request).await?;
        Ok(resp.followers)
    }

    pub async fn following_for_user(&self, user_name: &str) -> Result<Vec<String>> {
        let user_name = require(user_name, "username")?;
        let request = self.get(self.api_url(&format!("user/{user_name}/following")));

        let resp: Following = self.fetch_json(request).await?;
        Ok(resp.following)
    }

    pub async fn similar_users_for_user(&self, user_name: &str) -> Result<Vec<SimilarUser>> {
        let user_name = require(user_name, "username")?;
        let request = self.get(self.api_url(&format!("user/{user_name}/similar-users")));

        let resp: SimilarUsersResponse = self.fetch_json(request).await?;
        Ok(resp.payload)
    }

    /// Posts a track recommendation to the timeline of `user_name`'s followers.
    pub async fn recommend_track_to_followers(
        &self,
        user_name: &str,
        token: &str,
        metadata: &TrackRecommendation,
    ) -> Result<u16> {
        let user_name = require(user_name, "username")?;
        let request = self
            .post(self.api_url(&format!("user/{user_name}/timeline-event/create/recording")))
            .token_auth(token)
            .json(&json!({ "metadata": metadata }));

        Ok(self.fetch(request).await?.status().as_u16())
    }
}
